use cfdi::core::*;
use cfdi::parse::XmlValue;
use rust_decimal_macros::dec;

/// A record that passes every check.
fn valid_invoice() -> Invoice {
    Invoice {
        uuid: "6FA4C2A0-3C7D-4F1B-9E2A-111111111111".into(),
        folio: "842".into(),
        serie: Some("A".into()),
        issue_date: "2024-06-15T10:30:00".into(),
        total: dec!(1160.00),
        subtotal: dec!(1000.00),
        currency: "MXN".into(),
        issuer_tax_id: "AAA010101AAA".into(),
        issuer_name: "ACME SA de CV".into(),
        receiver_tax_id: "BBB020202BBB".into(),
        receiver_name: "Cliente SA".into(),
        line_items: Vec::new(),
        taxes: Vec::new(),
        total_taxes_transferred: Some(dec!(160.00)),
        total_taxes_withheld: None,
        raw_document: XmlValue::default(),
    }
}

#[test]
fn complete_invoice_is_valid() {
    let result = validate(&valid_invoice());

    assert!(result.is_valid);
    assert!(result.errors.is_empty());
}

#[test]
fn missing_folio_is_reported() {
    let mut invoice = valid_invoice();
    invoice.folio = String::new();

    let result = validate(&invoice);
    assert!(!result.is_valid);
    assert_eq!(result.errors.len(), 1);
    assert_eq!(result.errors[0].field, "folio");
}

#[test]
fn missing_issuer_tax_id_is_reported() {
    let mut invoice = valid_invoice();
    invoice.issuer_tax_id = String::new();

    let result = validate(&invoice);
    assert_eq!(result.errors.len(), 1);
    assert_eq!(result.errors[0].field, "issuer_tax_id");
}

#[test]
fn missing_receiver_tax_id_is_reported() {
    let mut invoice = valid_invoice();
    invoice.receiver_tax_id = "   ".into();

    let result = validate(&invoice);
    assert_eq!(result.errors.len(), 1);
    assert_eq!(result.errors[0].field, "receiver_tax_id");
}

#[test]
fn zero_total_is_reported() {
    let mut invoice = valid_invoice();
    invoice.total = dec!(0);

    let result = validate(&invoice);
    assert_eq!(result.errors.len(), 1);
    assert_eq!(result.errors[0].field, "total");
}

#[test]
fn negative_total_is_reported() {
    let mut invoice = valid_invoice();
    invoice.total = dec!(-5.00);

    assert!(!validate(&invoice).is_valid);
}

#[test]
fn empty_uuid_is_reported_on_external_records() {
    // parse() refuses these, but validate() re-checks records built
    // elsewhere.
    let mut invoice = valid_invoice();
    invoice.uuid = String::new();

    let result = validate(&invoice);
    assert_eq!(result.errors.len(), 1);
    assert_eq!(result.errors[0].field, "uuid");
}

#[test]
fn all_failures_are_accumulated() {
    let mut invoice = valid_invoice();
    invoice.folio = String::new();
    invoice.receiver_tax_id = String::new();

    let result = validate(&invoice);
    assert!(!result.is_valid);
    assert_eq!(result.errors.len(), 2);
    assert_eq!(result.errors[0].field, "folio");
    assert_eq!(result.errors[1].field, "receiver_tax_id");
}

#[test]
fn everything_wrong_reports_every_check() {
    let mut invoice = valid_invoice();
    invoice.uuid = String::new();
    invoice.folio = String::new();
    invoice.issuer_tax_id = String::new();
    invoice.receiver_tax_id = String::new();
    invoice.total = dec!(0);

    assert_eq!(validate(&invoice).errors.len(), 5);
}

#[test]
fn error_messages_read_as_sentences() {
    let mut invoice = valid_invoice();
    invoice.folio = String::new();

    let message = validate(&invoice).errors[0].to_string();
    assert_eq!(message, "folio: folio must not be empty");
}

#[test]
fn validation_does_not_mutate_the_invoice() {
    let invoice = valid_invoice();
    let before = invoice.clone();
    let _ = validate(&invoice);
    assert_eq!(invoice, before);
}
