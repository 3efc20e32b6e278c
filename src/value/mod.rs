//! The Airbyte value model produced by conversion.

mod json;
mod types;

pub use types::{AirbyteValue, ObjectValue, OffsetTime};
