//! Airbyte schema types and parsing.
//!
//! This module defines the logical type system records are converted
//! against, and parsing of that type system from JSON schema documents.

mod parser;
mod types;

pub use parser::{parse_json_schema, parse_json_schema_with_options, JsonSchemaParser};
pub use types::*;
