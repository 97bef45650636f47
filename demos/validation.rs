use cfdi::core::validate;
use cfdi::parse::from_xml;

fn main() {
    // A stamped document missing its folio and receiver RFC
    let xml = r#"<cfdi:Comprobante Total="1160.00" Moneda="MXN">
  <cfdi:Emisor Rfc="AAA010101AAA" Nombre="ACME SA de CV"/>
  <cfdi:Receptor Nombre="Cliente SA"/>
  <cfdi:Complemento>
    <tfd:TimbreFiscalDigital UUID="6FA4C2A0-3C7D-4F1B-9E2A-111111111111"/>
  </cfdi:Complemento>
</cfdi:Comprobante>"#;

    let invoice = from_xml(xml).expect("document should parse");

    let result = validate(&invoice);
    println!("valid: {}", result.is_valid);
    println!("{} errors:", result.errors.len());
    for error in &result.errors {
        println!("  {}", error);
    }

    // A document with no fiscal stamp fails before validation
    match from_xml("<cfdi:Comprobante Folio=\"1\"/>") {
        Ok(_) => unreachable!(),
        Err(e) => println!("\nunstamped document rejected: {e}"),
    }
}
