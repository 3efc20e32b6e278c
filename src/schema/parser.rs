//! JSON schema parser for Airbyte types.
//!
//! Parses the JSON-schema dialect used in Airbyte catalogs (with the
//! `airbyte_type` extension keyword) into the AirbyteType hierarchy.

use serde_json::{Map, Value};
use tracing::warn;

use crate::error::SchemaError;
use crate::schema::{AirbyteType, ArrayType, FieldType, ObjectType, UnionType};

/// Parse an Airbyte type from a JSON schema string.
///
/// # Example
/// ```
/// use avro_airbyte::schema::{parse_json_schema, AirbyteType};
///
/// let schema = parse_json_schema(r#"{"type": "integer"}"#).unwrap();
/// assert_eq!(schema, AirbyteType::Integer);
/// ```
pub fn parse_json_schema(json: &str) -> Result<AirbyteType, SchemaError> {
    parse_json_schema_with_options(json, false)
}

/// Parse an Airbyte type from a JSON schema string with validation options.
///
/// In strict mode, type names the parser does not recognise are errors. In
/// permissive mode (default) they become `AirbyteType::Unknown`, whose
/// values always convert to null.
///
/// # Example
/// ```
/// use avro_airbyte::schema::{parse_json_schema_with_options, AirbyteType};
///
/// let schema = parse_json_schema_with_options(r#"{"type": "geometry"}"#, false).unwrap();
/// assert!(matches!(schema, AirbyteType::Unknown(_)));
///
/// let result = parse_json_schema_with_options(r#"{"type": "geometry"}"#, true);
/// assert!(result.is_err());
/// ```
pub fn parse_json_schema_with_options(
    json: &str,
    strict: bool,
) -> Result<AirbyteType, SchemaError> {
    let value: Value = serde_json::from_str(json)
        .map_err(|e| SchemaError::ParseError(format!("Invalid JSON: {}", e)))?;

    JsonSchemaParser::new().with_strict(strict).parse(&value)
}

/// Parser from JSON schema documents to `AirbyteType`.
#[derive(Debug, Default, Clone, Copy)]
pub struct JsonSchemaParser {
    /// Whether unrecognised types are rejected
    strict_schema: bool,
}

impl JsonSchemaParser {
    /// Create a new parser in permissive mode.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new parser that rejects unrecognised types.
    pub fn new_strict() -> Self {
        Self {
            strict_schema: true,
        }
    }

    /// Set whether to use strict schema validation.
    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict_schema = strict;
        self
    }

    /// Parse a JSON value into an AirbyteType.
    pub fn parse(&self, value: &Value) -> Result<AirbyteType, SchemaError> {
        let obj = value.as_object().ok_or_else(|| {
            SchemaError::InvalidSchema(format!("Expected a JSON object, found: {}", value))
        })?;

        for keyword in ["oneOf", "anyOf"] {
            if let Some(options) = obj.get(keyword) {
                return self.parse_union(keyword, options);
            }
        }

        match obj.get("type") {
            Some(Value::String(type_name)) => self.parse_typed(type_name, obj),
            Some(Value::Array(type_names)) => self.parse_type_list(type_names, obj),
            Some(other) => Err(SchemaError::InvalidSchema(format!(
                "'type' must be a string or an array of strings, found: {}",
                other
            ))),
            // Objects are often declared by their properties alone
            None if obj.contains_key("properties") => self.parse_object(obj),
            None => Ok(AirbyteType::Unknown(value.clone())),
        }
    }

    /// Parse `oneOf` / `anyOf` alternatives into a union.
    fn parse_union(&self, keyword: &str, options: &Value) -> Result<AirbyteType, SchemaError> {
        let options = options.as_array().ok_or_else(|| {
            SchemaError::InvalidSchema(format!("'{}' must be an array", keyword))
        })?;

        let options = options
            .iter()
            .map(|option| self.parse(option))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(AirbyteType::Union(UnionType { options }))
    }

    /// Parse `"type": [..]`. Null entries only mark nullability.
    fn parse_type_list(
        &self,
        type_names: &[Value],
        obj: &Map<String, Value>,
    ) -> Result<AirbyteType, SchemaError> {
        let type_names = type_names
            .iter()
            .map(|name| {
                name.as_str().ok_or_else(|| {
                    SchemaError::InvalidSchema(format!("Type names must be strings, found: {}", name))
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let non_null: Vec<&str> = type_names.into_iter().filter(|n| *n != "null").collect();

        match non_null.as_slice() {
            [] => Ok(AirbyteType::Unknown(Value::Object(obj.clone()))),
            [single] => self.parse_typed(single, obj),
            many => {
                let options = many
                    .iter()
                    .map(|name| self.parse_typed(name, obj))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(AirbyteType::Union(UnionType { options }))
            }
        }
    }

    /// Parse a schema whose type name is known.
    fn parse_typed(
        &self,
        type_name: &str,
        obj: &Map<String, Value>,
    ) -> Result<AirbyteType, SchemaError> {
        let airbyte_type = obj.get("airbyte_type").and_then(|v| v.as_str());

        match type_name {
            "string" => Ok(parse_string_format(obj, airbyte_type)),
            "boolean" => Ok(AirbyteType::Boolean),
            "integer" => Ok(AirbyteType::Integer),
            "number" if airbyte_type == Some("integer") => Ok(AirbyteType::Integer),
            "number" => Ok(AirbyteType::Number),
            "array" => self.parse_array(obj),
            "object" => self.parse_object(obj),
            "null" => Ok(AirbyteType::Unknown(Value::Object(obj.clone()))),
            other => {
                let msg = format!("Unrecognised type '{}'", other);
                if self.strict_schema {
                    return Err(SchemaError::InvalidSchema(msg));
                }
                warn!(type_name = %other, "{}, treating as unknown", msg);
                Ok(AirbyteType::Unknown(Value::Object(obj.clone())))
            }
        }
    }

    fn parse_array(&self, obj: &Map<String, Value>) -> Result<AirbyteType, SchemaError> {
        match obj.get("items") {
            None => Ok(AirbyteType::ArrayWithoutSchema),
            Some(Value::Array(tuple)) => {
                let options = tuple
                    .iter()
                    .map(|item| self.parse(item))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(AirbyteType::Array(ArrayType::new(FieldType::nullable(
                    UnionType { options },
                ))))
            }
            Some(items) => Ok(AirbyteType::Array(ArrayType::new(FieldType::nullable(
                self.parse(items)?,
            )))),
        }
    }

    fn parse_object(&self, obj: &Map<String, Value>) -> Result<AirbyteType, SchemaError> {
        let properties = match obj.get("properties") {
            None => return Ok(AirbyteType::ObjectWithoutSchema),
            Some(Value::Object(properties)) => properties,
            Some(other) => {
                return Err(SchemaError::InvalidSchema(format!(
                    "'properties' must be an object, found: {}",
                    other
                )))
            }
        };

        if properties.is_empty() {
            return Ok(AirbyteType::ObjectWithEmptySchema);
        }

        let required: Vec<&str> = obj
            .get("required")
            .and_then(|v| v.as_array())
            .map(|arr| arr.iter().filter_map(|v| v.as_str()).collect())
            .unwrap_or_default();

        let mut object = ObjectType::default();
        for (name, property) in properties {
            let field = FieldType {
                r#type: self.parse(property)?,
                nullable: !required.contains(&name.as_str()),
            };
            object.properties.push((name.clone(), field));
        }

        Ok(AirbyteType::Object(object))
    }
}

/// Pick the string or temporal type named by `format` / `airbyte_type`.
fn parse_string_format(obj: &Map<String, Value>, airbyte_type: Option<&str>) -> AirbyteType {
    match obj.get("format").and_then(|v| v.as_str()) {
        Some("date") => AirbyteType::Date,
        Some("time") if airbyte_type == Some("time_without_timezone") => {
            AirbyteType::TimeWithoutTimezone
        }
        Some("time") => AirbyteType::TimeWithTimezone,
        Some("date-time") if airbyte_type == Some("timestamp_without_timezone") => {
            AirbyteType::TimestampWithoutTimezone
        }
        Some("date-time") => AirbyteType::TimestampWithTimezone,
        _ => AirbyteType::String,
    }
}
