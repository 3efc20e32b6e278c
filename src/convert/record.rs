//! Conversion of decoded Avro values into Airbyte values.
//!
//! The converter walks the Airbyte schema and the decoded value side by
//! side. Dispatch is on the schema; the raw value only has to have the shape
//! the schema expects. Absent values (missing fields, nulls, unions holding
//! null) become `AirbyteValue::Null` for every schema.
//!
//! Time and timestamp longs are divided by 1000 and then read as epoch
//! milliseconds, so sub-millisecond precision is dropped. Existing encoded
//! data depends on this scaling.

use std::str::FromStr;

use bigdecimal::BigDecimal;
use chrono::{DateTime, FixedOffset, Offset, Utc};

use crate::avro::AvroValue;
use crate::error::ConvertError;
use crate::schema::{AirbyteType, ObjectType, UnionType};
use crate::value::{AirbyteValue, ObjectValue, OffsetTime};

const MILLIS_PER_DAY: i64 = 86_400_000;

/// Stateless converter from decoded Avro values to Airbyte values.
///
/// # Example
/// ```
/// use avro_airbyte::avro::AvroValue;
/// use avro_airbyte::convert::AvroRecordToAirbyteValue;
/// use avro_airbyte::schema::AirbyteType;
/// use avro_airbyte::value::AirbyteValue;
///
/// let value = AvroRecordToAirbyteValue
///     .convert(Some(&AvroValue::Long(42)), &AirbyteType::Integer, false)
///     .unwrap();
/// assert_eq!(value, AirbyteValue::Integer(42));
/// ```
#[derive(Debug, Default, Clone, Copy)]
pub struct AvroRecordToAirbyteValue;

impl AvroRecordToAirbyteValue {
    /// Convert `avro_value` against `schema`.
    ///
    /// `top` only affects an Object schema's own fields: when set, fields
    /// that are absent from the record are emitted as null instead of
    /// being omitted. Nested conversions always run with `top = false`.
    pub fn convert(
        &self,
        avro_value: Option<&AvroValue>,
        schema: &AirbyteType,
        top: bool,
    ) -> Result<AirbyteValue, ConvertError> {
        let Some(value) = present(avro_value) else {
            return Ok(AirbyteValue::Null);
        };

        match schema {
            AirbyteType::Object(object) => self.convert_object(value, object, schema, top),
            AirbyteType::Array(array) => match value {
                AvroValue::Array(items) => items
                    .iter()
                    .map(|item| self.convert(Some(item), &array.items.r#type, false))
                    .collect::<Result<Vec<_>, _>>()
                    .map(AirbyteValue::Array),
                other => Err(mismatch(schema, other)),
            },
            AirbyteType::Boolean => match value {
                AvroValue::Boolean(b) => Ok(AirbyteValue::Boolean(*b)),
                other => Err(mismatch(schema, other)),
            },
            AirbyteType::Date => match value {
                AvroValue::Int(days) | AvroValue::Date(days) => {
                    let millis = i64::from(*days) * MILLIS_PER_DAY;
                    Ok(AirbyteValue::Date(utc_from_millis(schema, millis)?.date_naive()))
                }
                other => Err(mismatch(schema, other)),
            },
            AirbyteType::Integer => match value {
                AvroValue::Long(l) => Ok(AirbyteValue::Integer(*l)),
                other => Err(mismatch(schema, other)),
            },
            AirbyteType::Number => match value {
                AvroValue::Double(d) => double_to_decimal(*d).map(AirbyteValue::Number),
                other => Err(mismatch(schema, other)),
            },
            AirbyteType::Unknown(_) => Ok(AirbyteValue::Null),
            AirbyteType::String
            | AirbyteType::ArrayWithoutSchema
            | AirbyteType::ObjectWithEmptySchema
            | AirbyteType::ObjectWithoutSchema => match value {
                AvroValue::Utf8(text) => Ok(AirbyteValue::String(text.to_string())),
                AvroValue::String(text) => Ok(AirbyteValue::String(text.clone())),
                other => Err(ConvertError::UnsupportedStringEncoding(format!(
                    "{:?}",
                    other
                ))),
            },
            AirbyteType::TimeWithoutTimezone => match value {
                AvroValue::Long(micros) | AvroValue::TimeMicros(micros) => {
                    let instant = utc_from_millis(schema, *micros / 1000)?;
                    Ok(AirbyteValue::TimeWithoutTimezone(instant.time()))
                }
                other => Err(mismatch(schema, other)),
            },
            AirbyteType::TimeWithTimezone => match value {
                AvroValue::Long(micros) | AvroValue::TimeMicros(micros) => {
                    let instant = utc_from_millis(schema, *micros / 1000)?;
                    Ok(AirbyteValue::TimeWithTimezone(OffsetTime::new(
                        instant.time(),
                        utc_offset(),
                    )))
                }
                other => Err(mismatch(schema, other)),
            },
            AirbyteType::TimestampWithoutTimezone => match value {
                AvroValue::Long(micros) | AvroValue::TimestampMicros(micros) => {
                    let instant = utc_from_millis(schema, *micros / 1000)?;
                    Ok(AirbyteValue::TimestampWithoutTimezone(instant.naive_utc()))
                }
                other => Err(mismatch(schema, other)),
            },
            AirbyteType::TimestampWithTimezone => match value {
                AvroValue::Long(micros) | AvroValue::TimestampMicros(micros) => {
                    let instant = utc_from_millis(schema, *micros / 1000)?;
                    Ok(AirbyteValue::TimestampWithTimezone(
                        instant.with_timezone(&utc_offset()),
                    ))
                }
                other => Err(mismatch(schema, other)),
            },
            AirbyteType::Union(union) => self.convert_union(value, union),
        }
    }

    fn convert_object(
        &self,
        value: &AvroValue,
        object: &ObjectType,
        schema: &AirbyteType,
        top: bool,
    ) -> Result<AirbyteValue, ConvertError> {
        if !matches!(value, AvroValue::Record(_)) {
            return Err(mismatch(schema, value));
        }

        let mut properties = ObjectValue::with_capacity(object.properties.len());
        for (name, field) in &object.properties {
            let field_value = present(value.field(name));
            if field_value.is_some() || top {
                properties.insert(name.as_str(), self.convert(field_value, &field.r#type, false)?);
            }
        }
        Ok(AirbyteValue::Object(properties))
    }

    /// First option that converts wins. Individual failures are dropped.
    fn convert_union(
        &self,
        value: &AvroValue,
        union: &UnionType,
    ) -> Result<AirbyteValue, ConvertError> {
        union
            .options
            .iter()
            .find_map(|option| self.convert(Some(value), option, false).ok())
            .ok_or_else(|| {
                let options: Vec<&str> = union.options.iter().map(AirbyteType::name).collect();
                ConvertError::UnionExhausted(format!(
                    "value of type {} against [{}]",
                    value.type_name(),
                    options.join(", ")
                ))
            })
    }
}

/// Convert a top-level record, emitting every declared field.
///
/// For an Object schema and a non-null record the result is always an
/// `AirbyteValue::Object` listing every property, absent ones set to null.
pub fn to_airbyte_value(
    record: &AvroValue,
    schema: &AirbyteType,
) -> Result<AirbyteValue, ConvertError> {
    AvroRecordToAirbyteValue.convert(Some(record), schema, true)
}

impl AvroValue {
    /// Convert this record against `schema`. See [`to_airbyte_value`].
    pub fn to_airbyte_value(&self, schema: &AirbyteType) -> Result<AirbyteValue, ConvertError> {
        to_airbyte_value(self, schema)
    }
}

/// Drop nulls and see through union wrappers.
fn present(value: Option<&AvroValue>) -> Option<&AvroValue> {
    value
        .map(AvroValue::unwrap_union)
        .filter(|value| !value.is_null())
}

fn mismatch(schema: &AirbyteType, value: &AvroValue) -> ConvertError {
    ConvertError::UnsupportedSchema {
        schema: schema.name().to_string(),
        value: value.type_name().to_string(),
    }
}

fn utc_offset() -> FixedOffset {
    Utc.fix()
}

fn utc_from_millis(schema: &AirbyteType, millis: i64) -> Result<DateTime<Utc>, ConvertError> {
    DateTime::from_timestamp_millis(millis).ok_or_else(|| ConvertError::OutOfRange {
        schema: schema.name().to_string(),
        value: millis,
    })
}

/// Exact decimal of `value`, with the digits and scale of its JVM text.
fn double_to_decimal(value: f64) -> Result<BigDecimal, ConvertError> {
    if !value.is_finite() {
        return Err(ConvertError::NonFiniteNumber(value));
    }
    BigDecimal::from_str(&jvm_double_text(value))
        .map_err(|_| ConvertError::NonFiniteNumber(value))
}

/// Shortest round-trip text of a finite double, laid out like the JVM's
/// `Double.toString`: plain with at least one fractional digit when the
/// magnitude is in [1e-3, 1e7), otherwise `d.dddE<n>`.
fn jvm_double_text(value: f64) -> String {
    let sign = if value.is_sign_negative() { "-" } else { "" };
    if value == 0.0 {
        return format!("{sign}0.0");
    }

    let scientific = format!("{:e}", value.abs());
    let (mantissa, exponent) = scientific
        .split_once('e')
        .unwrap_or((scientific.as_str(), "0"));
    let exponent: i32 = exponent.parse().unwrap_or(0);
    let digits: String = mantissa.chars().filter(|c| *c != '.').collect();

    if !(1e-3..1e7).contains(&value.abs()) {
        let (first, rest) = digits.split_at(1);
        let rest = if rest.is_empty() { "0" } else { rest };
        return format!("{sign}{first}.{rest}E{exponent}");
    }

    if exponent < 0 {
        let zeros = "0".repeat((-exponent - 1) as usize);
        return format!("{sign}0.{zeros}{digits}");
    }
    let point = exponent as usize + 1;
    if digits.len() > point {
        format!("{sign}{}.{}", &digits[..point], &digits[point..])
    } else {
        let zeros = "0".repeat(point - digits.len());
        format!("{sign}{digits}{zeros}.0")
    }
}
