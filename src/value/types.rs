//! Airbyte value types.

use bigdecimal::BigDecimal;
use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime};
use std::fmt;

/// A schema-typed value in the Airbyte value model.
#[derive(Debug, Clone, PartialEq)]
pub enum AirbyteValue {
    /// Absent or null value
    Null,
    /// Boolean value
    Boolean(bool),
    /// 64-bit signed integer
    Integer(i64),
    /// Arbitrary-precision decimal
    Number(BigDecimal),
    /// Unicode string
    String(String),
    /// Calendar date
    Date(NaiveDate),
    /// Time of day with a UTC offset
    TimeWithTimezone(OffsetTime),
    /// Time of day without zone information
    TimeWithoutTimezone(NaiveTime),
    /// Instant with a UTC offset
    TimestampWithTimezone(DateTime<FixedOffset>),
    /// Local date-time without zone information
    TimestampWithoutTimezone(NaiveDateTime),
    /// Ordered list of values
    Array(Vec<AirbyteValue>),
    /// Object with insertion-ordered properties
    Object(ObjectValue),
}

impl AirbyteValue {
    /// True for `Null`.
    pub fn is_null(&self) -> bool {
        matches!(self, AirbyteValue::Null)
    }

    /// Borrow the properties if this is an object.
    pub fn as_object(&self) -> Option<&ObjectValue> {
        match self {
            AirbyteValue::Object(object) => Some(object),
            _ => None,
        }
    }

    /// Borrow the items if this is an array.
    pub fn as_array(&self) -> Option<&[AirbyteValue]> {
        match self {
            AirbyteValue::Array(items) => Some(items),
            _ => None,
        }
    }

    /// The text of a `String` value.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            AirbyteValue::String(s) => Some(s),
            _ => None,
        }
    }
}

impl From<ObjectValue> for AirbyteValue {
    fn from(object: ObjectValue) -> Self {
        AirbyteValue::Object(object)
    }
}

/// Time of day paired with a UTC offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OffsetTime {
    pub time: NaiveTime,
    pub offset: FixedOffset,
}

impl OffsetTime {
    /// Pair a wall-clock time with its UTC offset.
    pub fn new(time: NaiveTime, offset: FixedOffset) -> Self {
        Self { time, offset }
    }
}

/// ISO-8601 local time followed by the offset, e.g. `12:30:00+00:00`.
impl fmt::Display for OffsetTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.time, self.offset)
    }
}

/// Object properties in insertion order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ObjectValue {
    properties: Vec<(String, AirbyteValue)>,
}

impl ObjectValue {
    /// Create an empty object.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty object with room for `capacity` properties.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            properties: Vec::with_capacity(capacity),
        }
    }

    /// Insert a property, replacing the value in place if the key exists.
    ///
    /// Returns the replaced value, if any.
    pub fn insert(&mut self, name: impl Into<String>, value: AirbyteValue) -> Option<AirbyteValue> {
        let name = name.into();
        match self.properties.iter_mut().find(|(key, _)| *key == name) {
            Some((_, existing)) => Some(std::mem::replace(existing, value)),
            None => {
                self.properties.push((name, value));
                None
            }
        }
    }

    /// Look up a property by name.
    pub fn get(&self, name: &str) -> Option<&AirbyteValue> {
        self.properties
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value)
    }

    /// True if a property called `name` is present.
    pub fn contains_key(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Number of properties.
    pub fn len(&self) -> usize {
        self.properties.len()
    }

    /// True if the object has no properties.
    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }

    /// Property names in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.properties.iter().map(|(key, _)| key.as_str())
    }

    /// `(name, value)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &AirbyteValue)> {
        self.properties
            .iter()
            .map(|(key, value)| (key.as_str(), value))
    }
}

impl<K: Into<String>> FromIterator<(K, AirbyteValue)> for ObjectValue {
    fn from_iter<I: IntoIterator<Item = (K, AirbyteValue)>>(iter: I) -> Self {
        let mut object = ObjectValue::new();
        for (name, value) in iter {
            object.insert(name, value);
        }
        object
    }
}

impl IntoIterator for ObjectValue {
    type Item = (String, AirbyteValue);
    type IntoIter = std::vec::IntoIter<(String, AirbyteValue)>;

    fn into_iter(self) -> Self::IntoIter {
        self.properties.into_iter()
    }
}
