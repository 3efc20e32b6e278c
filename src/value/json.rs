//! JSON rendering of Airbyte values.

use serde_json::{Map, Number, Value};

use super::AirbyteValue;

impl AirbyteValue {
    /// Convert the AirbyteValue to a serde_json::Value.
    ///
    /// Numbers keep their exact decimal digits. Temporal values are
    /// rendered as ISO-8601 strings.
    pub fn to_json_value(&self) -> Value {
        match self {
            AirbyteValue::Null => Value::Null,
            AirbyteValue::Boolean(b) => Value::Bool(*b),
            AirbyteValue::Integer(i) => Value::Number((*i).into()),
            AirbyteValue::Number(d) => {
                let text = d.to_string();
                match text.parse::<Number>() {
                    Ok(n) => Value::Number(n),
                    Err(_) => Value::String(text),
                }
            }
            AirbyteValue::String(s) => Value::String(s.clone()),
            AirbyteValue::Date(d) => Value::String(d.format("%Y-%m-%d").to_string()),
            AirbyteValue::TimeWithTimezone(t) => Value::String(t.to_string()),
            AirbyteValue::TimeWithoutTimezone(t) => Value::String(t.to_string()),
            AirbyteValue::TimestampWithTimezone(ts) => Value::String(ts.to_rfc3339()),
            AirbyteValue::TimestampWithoutTimezone(ts) => {
                Value::String(ts.format("%Y-%m-%dT%H:%M:%S%.f").to_string())
            }
            AirbyteValue::Array(items) => {
                Value::Array(items.iter().map(AirbyteValue::to_json_value).collect())
            }
            AirbyteValue::Object(object) => {
                let mut map = Map::new();
                for (name, value) in object.iter() {
                    map.insert(name.to_string(), value.to_json_value());
                }
                Value::Object(map)
            }
        }
    }
}
