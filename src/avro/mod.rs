//! Decoded Avro data as handed to the converter.

mod value;

pub use value::{AvroValue, Utf8};
