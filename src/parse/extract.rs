use rust_decimal::Decimal;

use crate::core::{CfdiError, FactorType, Invoice, LineItem, TaxDetail, TaxKind};

use super::document::{XmlValue, read_document, sequence};

/// Parse the text of one CFDI XML document into an [`Invoice`].
///
/// The parser is tolerant of namespace-prefixed or bare element names, of
/// PascalCase or lowercase attribute names, and of singular-vs-repeated
/// element representation. Missing scalar fields degrade to defaults
/// (`0`, `"MXN"`, empty string) rather than erroring; the only fatal
/// conditions are ill-formed XML ([`CfdiError::MalformedXml`]) and a
/// document with no fiscal stamp UUID anywhere
/// ([`CfdiError::MissingUuid`]). A partially populated invoice is never
/// returned.
///
/// ```
/// let xml = r#"<cfdi:Comprobante Folio="842" Total="1160.00" Moneda="MXN">
///   <cfdi:Complemento>
///     <tfd:TimbreFiscalDigital UUID="AAA-BBB-CCC"/>
///   </cfdi:Complemento>
/// </cfdi:Comprobante>"#;
///
/// let invoice = cfdi::parse::from_xml(xml).unwrap();
/// assert_eq!(invoice.uuid, "AAA-BBB-CCC");
/// assert_eq!(invoice.folio, "842");
/// ```
pub fn from_xml(xml: &str) -> Result<Invoice, CfdiError> {
    let document = read_document(xml)?;

    // Documents vary in whether they declare the cfdi prefix; fall back to
    // the deserialized root when no comprobante tag is found.
    let comprobante = document
        .get(&["cfdi:Comprobante", "Comprobante"])
        .unwrap_or(&document);

    let uuid = stamped_uuid(comprobante).ok_or(CfdiError::MissingUuid)?;

    let (taxes, total_taxes_transferred, total_taxes_withheld) = extract_taxes(comprobante);

    Ok(Invoice {
        uuid,
        folio: text_at(comprobante, &["Folio", "folio"]).unwrap_or_default(),
        serie: nonempty_text_at(comprobante, &["Serie", "serie"]),
        issue_date: text_at(comprobante, &["Fecha", "fecha"]).unwrap_or_default(),
        total: decimal_or(comprobante, &["Total", "total"], Decimal::ZERO),
        subtotal: decimal_or(
            comprobante,
            &["SubTotal", "subTotal", "subtotal"],
            Decimal::ZERO,
        ),
        currency: nonempty_text_at(comprobante, &["Moneda", "moneda"])
            .unwrap_or_else(|| "MXN".to_string()),
        issuer_tax_id: party_field(comprobante, &["cfdi:Emisor", "Emisor"], &["Rfc", "rfc"]),
        issuer_name: party_field(comprobante, &["cfdi:Emisor", "Emisor"], &["Nombre", "nombre"]),
        receiver_tax_id: party_field(comprobante, &["cfdi:Receptor", "Receptor"], &["Rfc", "rfc"]),
        receiver_name: party_field(
            comprobante,
            &["cfdi:Receptor", "Receptor"],
            &["Nombre", "nombre"],
        ),
        line_items: extract_line_items(comprobante),
        taxes,
        total_taxes_transferred,
        total_taxes_withheld,
        raw_document: document,
    })
}

/// Locate the fiscal stamp UUID, probing in order: the complement path
/// (prefixed or bare, at each level), then a top-level UUID attribute.
/// First non-empty value wins.
fn stamped_uuid(comprobante: &XmlValue) -> Option<String> {
    child(comprobante, &["cfdi:Complemento", "Complemento"])
        .and_then(|complemento| {
            child(
                complemento,
                &["tfd:TimbreFiscalDigital", "TimbreFiscalDigital"],
            )
        })
        .and_then(|stamp| nonempty_text_at(stamp, &["UUID", "uuid"]))
        .or_else(|| nonempty_text_at(comprobante, &["UUID", "uuid"]))
}

fn extract_line_items(comprobante: &XmlValue) -> Vec<LineItem> {
    let Some(conceptos) = child(comprobante, &["cfdi:Conceptos", "Conceptos"]) else {
        return Vec::new();
    };

    sequence(conceptos.get(&["cfdi:Concepto", "Concepto", "concepto"]))
        .iter()
        .filter(|node| !node.is_empty())
        .map(|node| LineItem {
            quantity: decimal_or(node, &["Cantidad", "cantidad"], Decimal::ONE),
            unit: text_at(node, &["Unidad", "unidad"]).unwrap_or_default(),
            description: text_at(node, &["Descripcion", "descripcion"]).unwrap_or_default(),
            unit_price: decimal_or(node, &["ValorUnitario", "valorUnitario"], Decimal::ZERO),
            amount: decimal_or(node, &["Importe", "importe"], Decimal::ZERO),
            unit_code: text_at(node, &["ClaveUnidad", "claveUnidad"]).unwrap_or_default(),
            product_service_code: text_at(node, &["ClaveProdServ", "claveProdServ"])
                .unwrap_or_default(),
        })
        .collect()
}

fn extract_taxes(comprobante: &XmlValue) -> (Vec<TaxDetail>, Option<Decimal>, Option<Decimal>) {
    let Some(impuestos) = child(comprobante, &["cfdi:Impuestos", "Impuestos"]) else {
        return (Vec::new(), None, None);
    };

    // A declared total of exactly zero is surfaced as None, same as an
    // absent attribute. Downstream display relies on None to hide the row.
    let transferred_total = positive_decimal(
        impuestos,
        &["TotalImpuestosTrasladados", "totalImpuestosTrasladados"],
    );
    let withheld_total = positive_decimal(
        impuestos,
        &["TotalImpuestosRetenidos", "totalImpuestosRetenidos"],
    );

    let mut taxes = Vec::new();

    let traslados = child(impuestos, &["cfdi:Traslados", "Traslados"]);
    for node in sequence(traslados.and_then(|n| n.get(&["cfdi:Traslado", "Traslado", "traslado"])))
    {
        taxes.push(tax_detail(node, TaxKind::Transferred, "IVA"));
    }

    let retenciones = child(impuestos, &["cfdi:Retenciones", "Retenciones"]);
    for node in sequence(
        retenciones.and_then(|n| n.get(&["cfdi:Retencion", "Retencion", "retencion"])),
    ) {
        taxes.push(tax_detail(node, TaxKind::Withheld, "ISR"));
    }

    (taxes, transferred_total, withheld_total)
}

fn tax_detail(node: &XmlValue, kind: TaxKind, default_name: &str) -> TaxDetail {
    TaxDetail {
        kind,
        tax_name: nonempty_text_at(node, &["Impuesto", "impuesto"])
            .unwrap_or_else(|| default_name.to_string()),
        factor_type: text_at(node, &["TipoFactor", "tipoFactor"])
            .map(|value| FactorType::from_source(&value))
            .unwrap_or_default(),
        rate_or_quota: decimal_opt(node, &["TasaOCuota", "tasaOCuota"]),
        amount: decimal_opt(node, &["Importe", "importe"]),
        base: decimal_opt(node, &["Base", "base"]),
    }
}

// ---------------------------------------------------------------------------
// Accessor helpers
// ---------------------------------------------------------------------------

/// Read one scalar off an emitter/receiver child node, empty when either
/// the node or the field is absent.
fn party_field(comprobante: &XmlValue, party: &[&str], field: &[&str]) -> String {
    child(comprobante, party)
        .and_then(|node| text_at(node, field))
        .unwrap_or_default()
}

/// First present candidate child, unwrapping a repeated element to its
/// first occurrence.
fn child<'a>(node: &'a XmlValue, candidates: &[&str]) -> Option<&'a XmlValue> {
    match node.get(candidates)? {
        XmlValue::List(items) => items.first(),
        other => Some(other),
    }
}

fn text_at(node: &XmlValue, candidates: &[&str]) -> Option<String> {
    node.get(candidates)
        .and_then(XmlValue::text)
        .map(str::to_string)
}

fn nonempty_text_at(node: &XmlValue, candidates: &[&str]) -> Option<String> {
    text_at(node, candidates).filter(|text| !text.is_empty())
}

/// Numeric coercion: absent or unparseable text degrades to `default`,
/// never an error.
fn decimal_or(node: &XmlValue, candidates: &[&str], default: Decimal) -> Decimal {
    decimal_opt(node, candidates).unwrap_or(default)
}

fn decimal_opt(node: &XmlValue, candidates: &[&str]) -> Option<Decimal> {
    text_at(node, candidates).and_then(|text| text.trim().parse().ok())
}

fn positive_decimal(node: &XmlValue, candidates: &[&str]) -> Option<Decimal> {
    decimal_opt(node, candidates).filter(|value| *value > Decimal::ZERO)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn child_unwraps_repeated_elements() {
        let doc = read_document("<Doc><A>first</A><A>second</A></Doc>").unwrap();
        let root = doc.get(&["Doc"]).unwrap();
        assert_eq!(child(root, &["A"]).and_then(XmlValue::text), Some("first"));
    }

    #[test]
    fn decimal_coercion_defaults() {
        let doc = read_document(r#"<Doc Total="abc" SubTotal="12.50"/>"#).unwrap();
        let root = doc.get(&["Doc"]).unwrap();
        assert_eq!(decimal_or(root, &["Total"], Decimal::ZERO), Decimal::ZERO);
        assert_eq!(decimal_or(root, &["SubTotal"], Decimal::ZERO), dec!(12.50));
        assert_eq!(decimal_or(root, &["Missing"], Decimal::ONE), Decimal::ONE);
    }

    #[test]
    fn positive_decimal_collapses_zero() {
        let doc = read_document(r#"<Doc A="0" B="0.00" C="16.00"/>"#).unwrap();
        let root = doc.get(&["Doc"]).unwrap();
        assert_eq!(positive_decimal(root, &["A"]), None);
        assert_eq!(positive_decimal(root, &["B"]), None);
        assert_eq!(positive_decimal(root, &["C"]), Some(dec!(16.00)));
    }
}
