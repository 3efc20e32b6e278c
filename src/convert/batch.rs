//! Batch conversion of decoded records.
//!
//! `RecordConverter` converts a stream of records against one schema and
//! decides, per its `ErrorMode`, whether a record that fails to convert
//! aborts the batch or is skipped and reported.

use tracing::{debug, warn};

use crate::avro::AvroValue;
use crate::error::{RecordError, RecordErrorKind};
use crate::schema::AirbyteType;
use crate::value::AirbyteValue;

use super::record::AvroRecordToAirbyteValue;

/// Error handling mode for the RecordConverter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrorMode {
    /// Fail on the first record that does not convert.
    #[default]
    Strict,
    /// Skip records that do not convert and keep going.
    ///
    /// Errors are logged and can be retrieved after processing.
    Skip,
}

/// Configuration for the RecordConverter.
#[derive(Debug, Clone, Default)]
pub struct ConverterConfig {
    /// Error handling mode.
    pub error_mode: ErrorMode,
    /// In skip mode, give up once more than this many records have failed.
    pub max_errors: Option<usize>,
}

impl ConverterConfig {
    /// Create a strict configuration with no error limit.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the error mode.
    pub fn with_error_mode(mut self, mode: ErrorMode) -> Self {
        self.error_mode = mode;
        self
    }

    /// Set strict error mode (fail on first error).
    pub fn strict(mut self) -> Self {
        self.error_mode = ErrorMode::Strict;
        self
    }

    /// Set skip error mode (continue on errors).
    pub fn skip_errors(mut self) -> Self {
        self.error_mode = ErrorMode::Skip;
        self
    }

    /// Cap the number of skipped records.
    pub fn with_max_errors(mut self, max_errors: usize) -> Self {
        self.max_errors = Some(max_errors);
        self
    }
}

/// Converts top-level records against a fixed schema.
///
/// Every record is converted with the top-level flag set, so each declared
/// property of an object schema appears in the output.
///
/// # Example
/// ```
/// use avro_airbyte::avro::AvroValue;
/// use avro_airbyte::convert::{ConverterConfig, RecordConverter};
/// use avro_airbyte::schema::{AirbyteType, FieldType, ObjectType};
///
/// let schema = AirbyteType::Object(
///     ObjectType::default().with_property("id", FieldType::new(AirbyteType::Integer)),
/// );
/// let mut converter = RecordConverter::new(schema, ConverterConfig::new().skip_errors());
///
/// let records = vec![
///     AvroValue::record([("id", AvroValue::Long(1))]),
///     AvroValue::record([("id", AvroValue::from("not a long"))]),
/// ];
/// let values = converter.convert_all(&records).unwrap();
///
/// assert_eq!(values.len(), 1);
/// assert_eq!(converter.errors().len(), 1);
/// ```
#[derive(Debug)]
pub struct RecordConverter {
    schema: AirbyteType,
    error_mode: ErrorMode,
    max_errors: Option<usize>,
    /// Accumulated errors (in skip mode).
    errors: Vec<RecordError>,
    /// Index of the next record to be converted.
    next_index: usize,
    converted: usize,
    /// Records skipped so far. Not reset by `take_errors`.
    skipped: usize,
}

impl RecordConverter {
    /// Create a converter for records of `schema`.
    pub fn new(schema: AirbyteType, config: ConverterConfig) -> Self {
        Self {
            schema,
            error_mode: config.error_mode,
            max_errors: config.max_errors,
            errors: Vec::new(),
            next_index: 0,
            converted: 0,
            skipped: 0,
        }
    }

    /// The schema records are converted against.
    pub fn schema(&self) -> &AirbyteType {
        &self.schema
    }

    /// Convert one record.
    ///
    /// Returns `Ok(None)` when the record failed in skip mode.
    pub fn convert_record(
        &mut self,
        record: &AvroValue,
    ) -> Result<Option<AirbyteValue>, RecordError> {
        let record_index = self.next_index;
        self.next_index += 1;

        match AvroRecordToAirbyteValue.convert(Some(record), &self.schema, true) {
            Ok(value) => {
                self.converted += 1;
                Ok(Some(value))
            }
            Err(err) => {
                let error = RecordError::conversion(record_index, &err);
                if self.error_mode == ErrorMode::Strict {
                    return Err(error);
                }

                if let Some(max_errors) = self.max_errors {
                    if self.skipped + 1 > max_errors {
                        return Err(RecordError::new(
                            RecordErrorKind::TooManyErrors,
                            record_index,
                            format!(
                                "{} records failed conversion (limit {}): {}",
                                self.skipped + 1,
                                max_errors,
                                err
                            ),
                        ));
                    }
                }

                warn!(record_index, error = %err, "Skipping record that failed conversion");
                self.skipped += 1;
                self.errors.push(error);
                Ok(None)
            }
        }
    }

    /// Convert every record, keeping the ones that succeed in order.
    pub fn convert_all<'a, I>(&mut self, records: I) -> Result<Vec<AirbyteValue>, RecordError>
    where
        I: IntoIterator<Item = &'a AvroValue>,
    {
        let records = records.into_iter();
        let mut values = Vec::with_capacity(records.size_hint().0);
        for record in records {
            if let Some(value) = self.convert_record(record)? {
                values.push(value);
            }
        }

        debug!(
            converted = self.converted,
            skipped = self.skipped,
            schema = self.schema.name(),
            "Finished converting records"
        );
        Ok(values)
    }

    /// Errors recorded in skip mode.
    pub fn errors(&self) -> &[RecordError] {
        &self.errors
    }

    /// Take the recorded errors, leaving the list empty.
    pub fn take_errors(&mut self) -> Vec<RecordError> {
        std::mem::take(&mut self.errors)
    }

    /// Number of records converted successfully.
    pub fn records_converted(&self) -> usize {
        self.converted
    }

    /// Number of records skipped, including ones whose errors were taken.
    ///
    /// A record that made a call return `Err` was not skipped and is not
    /// counted.
    pub fn records_skipped(&self) -> usize {
        self.skipped
    }
}
