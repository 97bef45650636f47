//! # cfdi
//!
//! Parsing, validation, and display formatting for Mexican CFDI
//! tax-invoice XML documents (Comprobante Fiscal Digital por Internet).
//!
//! The parser is deliberately schema-less: real-world documents vary in
//! namespace prefixes, attribute casing, and singular-vs-repeated element
//! representation, so extraction works over a generic value tree and
//! probes ordered candidate locations instead of assuming one shape.
//! All monetary values use [`rust_decimal::Decimal`] — never floating
//! point.
//!
//! ## Quick Start
//!
//! ```rust
//! use rust_decimal_macros::dec;
//!
//! let xml = r#"
//! <cfdi:Comprobante Serie="A" Folio="123" Fecha="2024-06-15T10:30:00"
//!                   SubTotal="1000.00" Total="1160.00" Moneda="MXN">
//!   <cfdi:Emisor Rfc="AAA010101AAA" Nombre="ACME SA de CV"/>
//!   <cfdi:Receptor Rfc="BBB020202BBB" Nombre="Cliente SA"/>
//!   <cfdi:Conceptos>
//!     <cfdi:Concepto Cantidad="2" Descripcion="Consultoria"
//!                    ValorUnitario="500.00" Importe="1000.00"/>
//!   </cfdi:Conceptos>
//!   <cfdi:Impuestos TotalImpuestosTrasladados="160.00">
//!     <cfdi:Traslados>
//!       <cfdi:Traslado Impuesto="IVA" TipoFactor="Tasa"
//!                      TasaOCuota="0.160000" Importe="160.00" Base="1000.00"/>
//!     </cfdi:Traslados>
//!   </cfdi:Impuestos>
//!   <cfdi:Complemento>
//!     <tfd:TimbreFiscalDigital UUID="6FA4C2A0-3C7D-4F1B-9E2A-000000000001"/>
//!   </cfdi:Complemento>
//! </cfdi:Comprobante>"#;
//!
//! let invoice = cfdi::parse::from_xml(xml).unwrap();
//! assert_eq!(invoice.uuid, "6FA4C2A0-3C7D-4F1B-9E2A-000000000001");
//! assert_eq!(invoice.total, dec!(1160.00));
//! assert_eq!(invoice.line_items.len(), 1);
//!
//! let result = cfdi::core::validate(&invoice);
//! assert!(result.is_valid);
//!
//! let display = cfdi::display::format_invoice(&invoice);
//! assert_eq!(display.full_folio, "A-123");
//! assert_eq!(display.taxes[0].rate_formatted, "16.00%");
//! ```
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`core`] | Invoice record types and business-field validation |
//! | [`parse`] | XML deserialization and structural extraction |
//! | [`display`] | Fixed-locale display projection |

pub mod core;
pub mod display;
pub mod parse;

// Re-export core types at crate root for convenience
pub use crate::core::*;
