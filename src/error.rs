//! Error types for Avro to Airbyte conversion

use thiserror::Error;

/// Errors that can occur while converting a single value
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConvertError {
    /// A string-like schema received a value that is neither string encoding
    #[error("Unsupported string type: {0}")]
    UnsupportedStringEncoding(String),
    /// The raw value does not have a shape the schema accepts
    #[error("Unsupported schema type {schema} for value of type {value}")]
    UnsupportedSchema { schema: String, value: String },
    /// Every option of a union failed to convert
    #[error("Could not convert value to any of the union types: {0}")]
    UnionExhausted(String),
    /// NaN and infinities have no decimal representation
    #[error("Non-finite number cannot be represented as a decimal: {0}")]
    NonFiniteNumber(f64),
    /// Epoch offset lies outside the representable calendar range
    #[error("Value {value} is out of range for {schema}")]
    OutOfRange { schema: String, value: i64 },
}

/// Errors that can occur while parsing a JSON schema
#[derive(Debug, Error)]
pub enum SchemaError {
    /// Structurally invalid schema
    #[error("Invalid schema: {0}")]
    InvalidSchema(String),
    /// Schema text is not valid JSON
    #[error("Parse error: {0}")]
    ParseError(String),
}

/// Recoverable error for one record of a batch (for skip mode)
#[derive(Debug, Clone)]
pub struct RecordError {
    /// The kind of error that occurred
    pub kind: RecordErrorKind,
    /// Position of the record within the batch
    pub record_index: usize,
    /// Human-readable error message
    pub message: String,
}

impl RecordError {
    /// Create a new RecordError
    pub fn new(kind: RecordErrorKind, record_index: usize, message: impl Into<String>) -> Self {
        Self {
            kind,
            record_index,
            message: message.into(),
        }
    }

    /// Wrap a conversion failure for the record at `record_index`
    pub fn conversion(record_index: usize, err: &ConvertError) -> Self {
        Self::new(
            RecordErrorKind::ConversionFailed,
            record_index,
            err.to_string(),
        )
    }
}

impl std::fmt::Display for RecordError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{:?} at record {}: {}",
            self.kind, self.record_index, self.message
        )
    }
}

impl std::error::Error for RecordError {}

/// Types of per-record errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordErrorKind {
    /// The record could not be converted against the schema
    ConversionFailed,
    /// Skip mode gave up after too many failed records
    TooManyErrors,
}
