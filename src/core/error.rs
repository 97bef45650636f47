use thiserror::Error;

/// Fatal errors raised while parsing a CFDI document.
///
/// Anything less than fatal (missing scalar fields, unparseable numbers)
/// degrades to a documented default instead of erroring — see the field
/// coercion rules on [`crate::parse::from_xml`].
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CfdiError {
    /// The input is not well-formed XML and could not be deserialized.
    #[error("malformed XML: {0}")]
    MalformedXml(String),

    /// No fiscal stamp UUID was found at any of the probed locations.
    /// The document is not a recognizable stamped tax invoice.
    #[error("no fiscal stamp UUID found in document")]
    MissingUuid,
}

/// A single validation error with field name and message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Name of the invalid field (e.g. "receiver_tax_id").
    pub field: String,
    /// Human-readable error description, shown to end users verbatim.
    pub message: String,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl ValidationError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Outcome of [`validate`](crate::core::validate): all failures found, in
/// check order. Never raised as an error — callers decide whether to block
/// persistence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationResult {
    /// True when `errors` is empty.
    pub is_valid: bool,
    /// Every failed check, one entry per field.
    pub errors: Vec<ValidationError>,
}

impl ValidationResult {
    pub(crate) fn from_errors(errors: Vec<ValidationError>) -> Self {
        Self {
            is_valid: errors.is_empty(),
            errors,
        }
    }
}
