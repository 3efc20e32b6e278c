//! Conversion of decoded Avro records into the Airbyte value model
//!
//! A destination reading Avro data gets back decoded values whose shape is
//! dictated by the Avro writer schema. This crate maps those values onto the
//! schema-typed Airbyte value model, driven by the Airbyte schema declared
//! for the stream.
//!
//! # Example
//! ```
//! use avro_airbyte::{parse_json_schema, to_airbyte_value, AirbyteValue, AvroValue};
//!
//! let schema = parse_json_schema(
//!     r#"{"type": "object", "properties": {"id": {"type": "integer"}, "name": {"type": "string"}}}"#,
//! )
//! .unwrap();
//!
//! let record = AvroValue::record([("id", AvroValue::Long(7))]);
//! let value = to_airbyte_value(&record, &schema).unwrap();
//!
//! let object = value.as_object().unwrap();
//! assert_eq!(object.get("id"), Some(&AirbyteValue::Integer(7)));
//! assert_eq!(object.get("name"), Some(&AirbyteValue::Null));
//! ```

pub mod avro;
pub mod convert;
pub mod error;
pub mod schema;
pub mod value;

// Re-export main types
pub use avro::{AvroValue, Utf8};
pub use convert::{
    to_airbyte_value, AvroRecordToAirbyteValue, ConverterConfig, ErrorMode, RecordConverter,
};
pub use error::{ConvertError, RecordError, RecordErrorKind, SchemaError};
pub use schema::{
    parse_json_schema, parse_json_schema_with_options, AirbyteType, ArrayType, FieldType,
    JsonSchemaParser, ObjectType, UnionType,
};
pub use value::{AirbyteValue, ObjectValue, OffsetTime};
