use rust_decimal::Decimal;

use super::error::{ValidationError, ValidationResult};
use super::types::Invoice;

/// Validate the business-required fields of a parsed invoice.
/// Returns all validation errors found (not just the first).
///
/// The UUID check is a defensive re-check — [`crate::parse::from_xml`]
/// already refuses documents without one, but `validate` may be called on
/// externally constructed records.
pub fn validate(invoice: &Invoice) -> ValidationResult {
    let mut errors = Vec::new();

    if invoice.uuid.trim().is_empty() {
        errors.push(ValidationError::new(
            "uuid",
            "fiscal stamp UUID must not be empty",
        ));
    }

    if invoice.folio.trim().is_empty() {
        errors.push(ValidationError::new("folio", "folio must not be empty"));
    }

    if invoice.issuer_tax_id.trim().is_empty() {
        errors.push(ValidationError::new(
            "issuer_tax_id",
            "issuer RFC must not be empty",
        ));
    }

    if invoice.receiver_tax_id.trim().is_empty() {
        errors.push(ValidationError::new(
            "receiver_tax_id",
            "receiver RFC must not be empty",
        ));
    }

    if invoice.total <= Decimal::ZERO {
        errors.push(ValidationError::new(
            "total",
            "total must be greater than zero",
        ));
    }

    ValidationResult::from_errors(errors)
}
