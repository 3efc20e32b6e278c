//! Avro to Airbyte value conversion
//!
//! This module maps decoded Avro values onto the Airbyte value model, one
//! value at a time (`AvroRecordToAirbyteValue`) or for whole batches of
//! records with configurable error handling (`RecordConverter`).

mod batch;
mod record;

pub use batch::{ConverterConfig, ErrorMode, RecordConverter};
pub use record::{to_airbyte_value, AvroRecordToAirbyteValue};
