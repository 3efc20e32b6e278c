//! Airbyte schema types.
//!
//! This module defines the logical type system records are converted
//! against: objects, arrays, primitives, temporal types, unions, and the
//! schemaless variants that are carried as plain strings.

use serde_json::Value;

/// Represents an Airbyte logical type.
#[derive(Debug, Clone, PartialEq)]
pub enum AirbyteType {
    /// Object with declared properties.
    Object(ObjectType),
    /// Array with a declared item type.
    Array(ArrayType),
    /// Boolean type.
    Boolean,
    /// 64-bit signed integer.
    Integer,
    /// Arbitrary-precision decimal.
    Number,
    /// Unicode string.
    String,
    /// Array whose items are not described; carried as a string.
    ArrayWithoutSchema,
    /// Object declared with an empty property set; carried as a string.
    ObjectWithEmptySchema,
    /// Object with no property declaration; carried as a string.
    ObjectWithoutSchema,

    // Temporal types
    /// Calendar date.
    Date,
    /// Time of day with a UTC offset.
    TimeWithTimezone,
    /// Time of day without zone information.
    TimeWithoutTimezone,
    /// Instant with a UTC offset.
    TimestampWithTimezone,
    /// Local date-time without zone information.
    TimestampWithoutTimezone,

    /// Union of alternative types, tried in declaration order.
    Union(UnionType),
    /// Type that could not be classified. Holds the schema fragment.
    Unknown(Value),
}

impl AirbyteType {
    /// Stable snake-case name of the type, used in diagnostics.
    pub fn name(&self) -> &'static str {
        match self {
            AirbyteType::Object(_) => "object",
            AirbyteType::Array(_) => "array",
            AirbyteType::Boolean => "boolean",
            AirbyteType::Integer => "integer",
            AirbyteType::Number => "number",
            AirbyteType::String => "string",
            AirbyteType::ArrayWithoutSchema => "array_without_schema",
            AirbyteType::ObjectWithEmptySchema => "object_with_empty_schema",
            AirbyteType::ObjectWithoutSchema => "object_without_schema",
            AirbyteType::Date => "date",
            AirbyteType::TimeWithTimezone => "time_with_timezone",
            AirbyteType::TimeWithoutTimezone => "time_without_timezone",
            AirbyteType::TimestampWithTimezone => "timestamp_with_timezone",
            AirbyteType::TimestampWithoutTimezone => "timestamp_without_timezone",
            AirbyteType::Union(_) => "union",
            AirbyteType::Unknown(_) => "unknown",
        }
    }

    /// Check if values of this type are carried as strings.
    pub fn is_string_like(&self) -> bool {
        matches!(
            self,
            AirbyteType::String
                | AirbyteType::ArrayWithoutSchema
                | AirbyteType::ObjectWithEmptySchema
                | AirbyteType::ObjectWithoutSchema
        )
    }

    /// Check if this is one of the date/time types.
    pub fn is_temporal(&self) -> bool {
        matches!(
            self,
            AirbyteType::Date
                | AirbyteType::TimeWithTimezone
                | AirbyteType::TimeWithoutTimezone
                | AirbyteType::TimestampWithTimezone
                | AirbyteType::TimestampWithoutTimezone
        )
    }
}

impl From<ObjectType> for AirbyteType {
    fn from(object: ObjectType) -> Self {
        AirbyteType::Object(object)
    }
}

impl From<ArrayType> for AirbyteType {
    fn from(array: ArrayType) -> Self {
        AirbyteType::Array(array)
    }
}

impl From<UnionType> for AirbyteType {
    fn from(union: UnionType) -> Self {
        AirbyteType::Union(union)
    }
}

/// A property's type together with its nullability.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldType {
    /// The declared type.
    pub r#type: AirbyteType,
    /// Whether the property may be null or missing.
    pub nullable: bool,
}

impl FieldType {
    /// Create a non-nullable field type.
    pub fn new(r#type: impl Into<AirbyteType>) -> Self {
        Self {
            r#type: r#type.into(),
            nullable: false,
        }
    }

    /// Create a nullable field type.
    pub fn nullable(r#type: impl Into<AirbyteType>) -> Self {
        Self {
            r#type: r#type.into(),
            nullable: true,
        }
    }
}

/// Schema for an object type.
///
/// Properties are kept in declaration order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ObjectType {
    /// The declared properties.
    pub properties: Vec<(String, FieldType)>,
}

impl ObjectType {
    /// Create an ObjectType from `(name, field)` pairs.
    pub fn new<K, I>(properties: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, FieldType)>,
    {
        Self {
            properties: properties
                .into_iter()
                .map(|(name, field)| (name.into(), field))
                .collect(),
        }
    }

    /// Append a property.
    pub fn with_property(mut self, name: impl Into<String>, field: FieldType) -> Self {
        self.properties.push((name.into(), field));
        self
    }

    /// Look up a property by name.
    pub fn property(&self, name: &str) -> Option<&FieldType> {
        self.properties
            .iter()
            .find(|(property, _)| property == name)
            .map(|(_, field)| field)
    }

    /// Iterate over property names in declaration order.
    pub fn property_names(&self) -> impl Iterator<Item = &str> {
        self.properties.iter().map(|(name, _)| name.as_str())
    }
}

/// Schema for an array type.
#[derive(Debug, Clone, PartialEq)]
pub struct ArrayType {
    /// The item type.
    pub items: Box<FieldType>,
}

impl ArrayType {
    /// Create an array type with the given item type.
    pub fn new(items: FieldType) -> Self {
        Self {
            items: Box::new(items),
        }
    }
}

/// Schema for a union type.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct UnionType {
    /// The alternatives, in the order they are tried.
    pub options: Vec<AirbyteType>,
}

impl UnionType {
    /// Create a union of the given alternatives.
    pub fn of(options: impl IntoIterator<Item = AirbyteType>) -> Self {
        Self {
            options: options.into_iter().collect(),
        }
    }
}
