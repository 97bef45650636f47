use cfdi::display::format_invoice;
use cfdi::parse::from_xml;

fn main() {
    let xml = r#"<?xml version="1.0" encoding="UTF-8"?>
<cfdi:Comprobante xmlns:cfdi="http://www.sat.gob.mx/cfd/4"
                  Serie="A" Folio="842" Fecha="2024-06-15T10:30:00"
                  SubTotal="1000.00" Total="1160.00" Moneda="MXN">
  <cfdi:Emisor Rfc="AAA010101AAA" Nombre="ACME SA de CV"/>
  <cfdi:Receptor Rfc="BBB020202BBB" Nombre="Cliente SA"/>
  <cfdi:Conceptos>
    <cfdi:Concepto Cantidad="2" Unidad="Servicio" Descripcion="Consultoria"
                   ValorUnitario="400.00" Importe="800.00"
                   ClaveUnidad="E48" ClaveProdServ="80101500"/>
    <cfdi:Concepto Cantidad="1" Unidad="Pieza" Descripcion="Licencia"
                   ValorUnitario="200.00" Importe="200.00"
                   ClaveUnidad="H87" ClaveProdServ="43230000"/>
  </cfdi:Conceptos>
  <cfdi:Impuestos TotalImpuestosTrasladados="160.00">
    <cfdi:Traslados>
      <cfdi:Traslado Base="1000.00" Impuesto="IVA" TipoFactor="Tasa"
                     TasaOCuota="0.160000" Importe="160.00"/>
    </cfdi:Traslados>
  </cfdi:Impuestos>
  <cfdi:Complemento>
    <tfd:TimbreFiscalDigital UUID="6FA4C2A0-3C7D-4F1B-9E2A-111111111111"/>
  </cfdi:Complemento>
</cfdi:Comprobante>"#;

    let invoice = from_xml(xml).expect("document should parse");

    println!("UUID:      {}", invoice.uuid);
    println!("Issuer:    {} ({})", invoice.issuer_name, invoice.issuer_tax_id);
    println!("Receiver:  {} ({})", invoice.receiver_name, invoice.receiver_tax_id);
    println!("Currency:  {}", invoice.currency);

    println!("\nLine items:");
    for item in &invoice.line_items {
        println!(
            "  {} x {} @ {} = {}",
            item.quantity, item.description, item.unit_price, item.amount
        );
    }

    let display = format_invoice(&invoice);
    println!("\nFolio:     {}", display.full_folio);
    println!("Issued:    {}", display.issue_date_formatted);
    println!("Subtotal:  {}", display.subtotal_formatted);
    println!("Total:     {}", display.total_formatted);

    println!("\nTaxes:");
    for tax in &display.taxes {
        println!("  {}", tax.description);
    }
}
