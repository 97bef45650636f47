//! Property-based tests for the parsing pipeline and formatting helpers.

use cfdi::display::{format_currency, format_percent};
use cfdi::parse::{XmlValue, from_xml};
use proptest::prelude::*;
use rust_decimal::Decimal;

/// Generate a money amount between 0.00 and 99999.99.
fn arb_amount() -> impl Strategy<Value = Decimal> {
    (0u64..10_000_000u64).prop_map(|cents| Decimal::new(cents as i64, 2))
}

/// Generate a tax fraction between 0.00 and 0.99.
fn arb_rate() -> impl Strategy<Value = Decimal> {
    (0i64..100i64).prop_map(|hundredths| Decimal::new(hundredths, 2))
}

fn invoice_xml(prefix: &str, folio: &str, serie: &str, total: Decimal, rate: Decimal) -> String {
    format!(
        r#"<{prefix}Comprobante Serie="{serie}" Folio="{folio}" Total="{total}" SubTotal="{total}">
  <{prefix}Emisor Rfc="AAA010101AAA" Nombre="Emisor SA"/>
  <{prefix}Receptor Rfc="BBB020202BBB" Nombre="Receptor SA"/>
  <{prefix}Impuestos>
    <{prefix}Traslados>
      <{prefix}Traslado Impuesto="IVA" TipoFactor="Tasa" TasaOCuota="{rate}"/>
    </{prefix}Traslados>
  </{prefix}Impuestos>
  <{prefix}Complemento>
    <tfd:TimbreFiscalDigital UUID="11111111-2222-3333-4444-555555555555"/>
  </{prefix}Complemento>
</{prefix}Comprobante>"#
    )
}

proptest! {
    /// Prefixed and bare tag spellings must extract identical records.
    #[test]
    fn namespace_prefix_never_changes_the_result(
        folio in "[0-9]{1,6}",
        serie in "[A-Z]{1,3}",
        total in arb_amount(),
        rate in arb_rate(),
    ) {
        let mut prefixed = from_xml(&invoice_xml("cfdi:", &folio, &serie, total, rate)).unwrap();
        let mut bare = from_xml(&invoice_xml("", &folio, &serie, total, rate)).unwrap();

        prefixed.raw_document = XmlValue::default();
        bare.raw_document = XmlValue::default();
        prop_assert_eq!(prefixed, bare);
    }

    /// Every generated line item comes back, in order.
    #[test]
    fn line_items_round_trip_in_order(descriptions in prop::collection::vec("[A-Za-z]{1,12}", 1..6)) {
        let concepts: String = descriptions
            .iter()
            .map(|d| format!(r#"<Concepto Cantidad="1" Descripcion="{d}"/>"#))
            .collect();
        let xml = format!(
            r#"<Comprobante UUID="u"><Conceptos>{concepts}</Conceptos></Comprobante>"#
        );

        let invoice = from_xml(&xml).unwrap();
        prop_assert_eq!(invoice.line_items.len(), descriptions.len());
        for (item, description) in invoice.line_items.iter().zip(&descriptions) {
            prop_assert_eq!(&item.description, description);
        }
    }

    /// Non-numeric totals always coerce to zero, never error.
    #[test]
    fn garbage_totals_coerce_to_zero(total in "[a-zA-Z ]{0,10}") {
        let xml = format!(r#"<Comprobante UUID="u" Total="{total}"/>"#);
        let invoice = from_xml(&xml).unwrap();
        prop_assert_eq!(invoice.total, Decimal::ZERO);
    }

    /// The parser returns a result — it must never panic, whatever the input.
    #[test]
    fn parser_never_panics(input in "\\PC{0,300}") {
        let _ = from_xml(&input);
    }

    /// Currency strings always carry exactly two decimal places.
    #[test]
    fn currency_always_two_decimals(amount in arb_amount()) {
        let formatted = format_currency(amount, "MXN");
        let (_, decimals) = formatted.rsplit_once('.').unwrap();
        prop_assert_eq!(decimals.len(), 2);
        prop_assert!(formatted.starts_with('$'));
    }

    /// Percent strings always carry exactly two decimals and a % suffix.
    #[test]
    fn percent_always_two_decimals(rate in arb_rate()) {
        let formatted = format_percent(rate);
        prop_assert!(formatted.ends_with('%'));
        let body = formatted.trim_end_matches('%');
        let (_, decimals) = body.rsplit_once('.').unwrap();
        prop_assert_eq!(decimals.len(), 2);
    }
}
