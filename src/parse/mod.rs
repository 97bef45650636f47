//! CFDI XML parsing.
//!
//! One pure pipeline per document: raw XML text → generic value tree
//! ([`XmlValue`]) → structural extraction into an
//! [`Invoice`](crate::core::Invoice).
//!
//! # Example
//!
//! ```no_run
//! let xml = std::fs::read_to_string("invoice.xml").unwrap();
//! let invoice = cfdi::parse::from_xml(&xml).unwrap();
//! println!("{} — {}", invoice.uuid, invoice.total);
//! ```

mod document;
mod extract;

pub use document::{XmlValue, read_document, sequence};
pub use extract::from_xml;
