use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::parse::XmlValue;

/// A parsed CFDI comprobante — the normalized content of one stamped
/// tax-invoice document.
///
/// Produced fresh on every [`parse`](crate::parse::from_xml) call and never
/// mutated afterwards; the caller owns the value exclusively.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Invoice {
    /// Fiscal stamp UUID (folio fiscal) — the authoritative document
    /// identifier assigned by the SAT certification process.
    pub uuid: String,
    /// Document sequence number. May be empty.
    pub folio: String,
    /// Optional series prefix used together with `folio` as the
    /// human-facing invoice number.
    pub serie: Option<String>,
    /// Issue date exactly as found in the document (ISO-like text).
    /// Not reparsed or validated here; see [`crate::display`].
    pub issue_date: String,
    /// Grand total. Zero when absent or unparseable.
    pub total: Decimal,
    /// Pre-tax amount. Zero when absent or unparseable.
    pub subtotal: Decimal,
    /// ISO 4217 currency code. `"MXN"` when the document omits it.
    pub currency: String,
    /// Issuer RFC (tax id).
    pub issuer_tax_id: String,
    /// Issuer legal name.
    pub issuer_name: String,
    /// Receiver RFC (tax id).
    pub receiver_tax_id: String,
    /// Receiver legal name.
    pub receiver_name: String,
    /// Invoice concepts, in document order.
    pub line_items: Vec<LineItem>,
    /// Tax assessment lines: all transferred entries first, then all
    /// withheld entries, preserving source order within each group.
    pub taxes: Vec<TaxDetail>,
    /// Document-level declared sum of transferred taxes. `None` when the
    /// declared value is absent or not strictly positive — a declared
    /// total of exactly zero is indistinguishable from "not present".
    pub total_taxes_transferred: Option<Decimal>,
    /// Document-level declared sum of withheld taxes. Same zero rule as
    /// `total_taxes_transferred`.
    pub total_taxes_withheld: Option<Decimal>,
    /// The full deserialized document tree, kept read-only for callers
    /// that need fields not mapped above.
    #[serde(default, skip_deserializing)]
    pub raw_document: XmlValue,
}

/// One invoiced concept line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    /// Invoiced quantity (Cantidad). Defaults to one, not zero.
    pub quantity: Decimal,
    /// Free-text unit (Unidad).
    pub unit: String,
    /// Concept description (Descripcion).
    pub description: String,
    /// Net price per unit (ValorUnitario). Zero when absent.
    pub unit_price: Decimal,
    /// Line amount (Importe). Zero when absent.
    pub amount: Decimal,
    /// UNECE-style unit code (ClaveUnidad).
    pub unit_code: String,
    /// SAT product/service catalogue code (ClaveProdServ).
    pub product_service_code: String,
}

/// One tax assessment line — a single traslado or retención.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaxDetail {
    /// Which XML group the entry came from. Never inferred beyond that.
    pub kind: TaxKind,
    /// Tax name. When the source omits one: `"IVA"` for transferred
    /// entries, `"ISR"` for withheld entries (the structurally most
    /// common taxes; a display convenience, not a business inference).
    pub tax_name: String,
    /// How `rate_or_quota` is to be read.
    pub factor_type: FactorType,
    /// A fraction (e.g. 0.16) under [`FactorType::Rate`], a fixed currency
    /// amount under [`FactorType::Quota`], absent under
    /// [`FactorType::Exempt`]. Never defaulted to zero — "no rate
    /// recorded" and "zero rate" are different things.
    pub rate_or_quota: Option<Decimal>,
    /// Computed tax amount in the document currency.
    pub amount: Option<Decimal>,
    /// Amount the tax was computed against.
    pub base: Option<Decimal>,
}

/// Tax direction: collected from the receiver, or withheld from the
/// issuer's payment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaxKind {
    /// Traslado — tax the issuer collects and must remit (e.g. IVA).
    Transferred,
    /// Retención — tax the receiver withholds and remits on the issuer's
    /// behalf (e.g. ISR).
    Withheld,
}

impl TaxKind {
    /// Human-facing label used in composite tax descriptions.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Transferred => "Transferred",
            Self::Withheld => "Withheld",
        }
    }
}

/// TipoFactor — how a tax line's rate-or-quota value is interpreted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FactorType {
    /// Tasa — `rate_or_quota` is a fraction of the base.
    #[default]
    Rate,
    /// Cuota — `rate_or_quota` is a fixed currency amount.
    Quota,
    /// Exento — the base is exempt; no rate applies.
    Exempt,
}

impl FactorType {
    /// Parse a TipoFactor value, tolerating the CFDI Spanish spellings and
    /// any casing. Unrecognized text falls back to [`FactorType::Rate`],
    /// the same default used when the attribute is absent.
    pub fn from_source(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "quota" | "cuota" => Self::Quota,
            "exempt" | "exento" => Self::Exempt,
            _ => Self::Rate,
        }
    }
}
