//! Decoded Avro values.
//!
//! `AvroValue` is the shape a decoded Avro datum takes before it is mapped
//! onto the Airbyte value model. Records keep their fields in writer order
//! and support lookup by name; strings arrive either as undecoded Avro text
//! (`Utf8`) or as plain Rust strings.

use std::fmt;

/// Avro text as carried on the wire: length-prefixed UTF-8 bytes that have
/// not been validated or copied into a `String` yet.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Utf8(Vec<u8>);

impl Utf8 {
    /// Wrap raw string bytes.
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Self(bytes.into())
    }

    /// The raw, possibly invalid, UTF-8 bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Byte length of the encoded text.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True if the text has no bytes.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<&str> for Utf8 {
    fn from(s: &str) -> Self {
        Self(s.as_bytes().to_vec())
    }
}

impl From<String> for Utf8 {
    fn from(s: String) -> Self {
        Self(s.into_bytes())
    }
}

/// Decodes lossily: invalid sequences become U+FFFD.
impl fmt::Display for Utf8 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&String::from_utf8_lossy(&self.0))
    }
}

/// Represents a decoded Avro value.
#[derive(Debug, Clone, PartialEq)]
pub enum AvroValue {
    /// Null value
    Null,
    /// Boolean value
    Boolean(bool),
    /// 32-bit signed integer
    Int(i32),
    /// 64-bit signed integer
    Long(i64),
    /// 32-bit floating point
    Float(f32),
    /// 64-bit floating point
    Double(f64),
    /// Byte array
    Bytes(Vec<u8>),
    /// Avro-encoded text
    Utf8(Utf8),
    /// Plain text, as produced by readers that decode strings eagerly
    String(String),
    /// Record with named fields
    Record(Vec<(String, AvroValue)>),
    /// Enum variant (index and symbol name)
    Enum(i32, String),
    /// Array of values
    Array(Vec<AvroValue>),
    /// Map with string keys
    Map(Vec<(String, AvroValue)>),
    /// Union variant (index and value)
    Union(i32, Box<AvroValue>),
    /// Fixed-size byte array
    Fixed(Vec<u8>),

    // Logical type values
    /// Date value (days since Unix epoch, 1970-01-01)
    Date(i32),
    /// Time in microseconds since midnight
    TimeMicros(i64),
    /// Timestamp in microseconds since Unix epoch
    TimestampMicros(i64),
}

impl AvroValue {
    /// Build a record from `(name, value)` pairs.
    pub fn record<K, I>(fields: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, AvroValue)>,
    {
        AvroValue::Record(
            fields
                .into_iter()
                .map(|(name, value)| (name.into(), value))
                .collect(),
        )
    }

    /// Look up a record field by name.
    ///
    /// Returns `None` when this value is not a record or the record has no
    /// field with that name.
    pub fn field(&self, name: &str) -> Option<&AvroValue> {
        match self {
            AvroValue::Record(fields) => fields
                .iter()
                .find(|(field_name, _)| field_name == name)
                .map(|(_, value)| value),
            AvroValue::Union(_, inner) => inner.field(name),
            _ => None,
        }
    }

    /// True for `Null` and for unions whose branch is `Null`.
    pub fn is_null(&self) -> bool {
        match self {
            AvroValue::Null => true,
            AvroValue::Union(_, inner) => inner.is_null(),
            _ => false,
        }
    }

    /// Strip union wrappers down to the selected branch.
    pub fn unwrap_union(&self) -> &AvroValue {
        match self {
            AvroValue::Union(_, inner) => inner.unwrap_union(),
            other => other,
        }
    }

    /// Avro name of the value's type, used in diagnostics.
    pub fn type_name(&self) -> &'static str {
        match self {
            AvroValue::Null => "null",
            AvroValue::Boolean(_) => "boolean",
            AvroValue::Int(_) => "int",
            AvroValue::Long(_) => "long",
            AvroValue::Float(_) => "float",
            AvroValue::Double(_) => "double",
            AvroValue::Bytes(_) => "bytes",
            AvroValue::Utf8(_) | AvroValue::String(_) => "string",
            AvroValue::Record(_) => "record",
            AvroValue::Enum(_, _) => "enum",
            AvroValue::Array(_) => "array",
            AvroValue::Map(_) => "map",
            AvroValue::Union(_, _) => "union",
            AvroValue::Fixed(_) => "fixed",
            AvroValue::Date(_) => "date",
            AvroValue::TimeMicros(_) => "time-micros",
            AvroValue::TimestampMicros(_) => "timestamp-micros",
        }
    }
}

impl From<bool> for AvroValue {
    fn from(b: bool) -> Self {
        AvroValue::Boolean(b)
    }
}

impl From<i32> for AvroValue {
    fn from(i: i32) -> Self {
        AvroValue::Int(i)
    }
}

impl From<i64> for AvroValue {
    fn from(l: i64) -> Self {
        AvroValue::Long(l)
    }
}

impl From<f64> for AvroValue {
    fn from(d: f64) -> Self {
        AvroValue::Double(d)
    }
}

impl From<&str> for AvroValue {
    fn from(s: &str) -> Self {
        AvroValue::Utf8(Utf8::from(s))
    }
}

impl<T: Into<AvroValue>> From<Option<T>> for AvroValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(AvroValue::Null, Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_lookup() {
        let record = AvroValue::record([
            ("id", AvroValue::Long(1)),
            ("name", AvroValue::from("alice")),
        ]);

        assert_eq!(record.field("id"), Some(&AvroValue::Long(1)));
        assert_eq!(
            record.field("name"),
            Some(&AvroValue::Utf8(Utf8::from("alice")))
        );
        assert_eq!(record.field("missing"), None);
        assert_eq!(AvroValue::Long(1).field("id"), None);
    }

    #[test]
    fn test_field_lookup_through_union() {
        let record = AvroValue::Union(
            1,
            Box::new(AvroValue::record([("id", AvroValue::Long(3))])),
        );
        assert_eq!(record.field("id"), Some(&AvroValue::Long(3)));
    }

    #[test]
    fn test_null_detection() {
        assert!(AvroValue::Null.is_null());
        assert!(AvroValue::Union(0, Box::new(AvroValue::Null)).is_null());
        assert!(!AvroValue::Union(1, Box::new(AvroValue::Long(0))).is_null());
        assert!(!AvroValue::Boolean(false).is_null());
    }

    #[test]
    fn test_utf8_display_is_lossy() {
        assert_eq!(Utf8::from("héllo").to_string(), "héllo");
        assert_eq!(Utf8::new(vec![b'a', 0xFF, b'b']).to_string(), "a\u{FFFD}b");
    }

    #[test]
    fn test_option_conversion() {
        assert_eq!(AvroValue::from(None::<i64>), AvroValue::Null);
        assert_eq!(AvroValue::from(Some(5i64)), AvroValue::Long(5));
    }
}
