//! Field values and their JSON encodings.

use crate::FieldType;
use chrono::NaiveDateTime;
use serde::ser::Error as _;
use serde::{Serialize, Serializer};
use serde_json::value::RawValue;

/// Timestamps are written without a zone suffix; the fraction only when non-zero.
const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";

/// Fixed-point decimal: `mantissa * 10^-scale`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Decimal {
    pub mantissa: i64,
    pub scale: u32,
}

impl Decimal {
    pub fn new(mantissa: i64, scale: u32) -> Self {
        Self { mantissa, scale }
    }

    /// A whole number with scale zero.
    pub fn whole(value: i64) -> Self {
        Self::new(value, 0)
    }

    pub fn is_zero(&self) -> bool {
        self.mantissa == 0
    }
}

impl std::fmt::Display for Decimal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.scale == 0 {
            return write!(f, "{}", self.mantissa);
        }
        let sign = if self.mantissa < 0 { "-" } else { "" };
        let scale = self.scale as usize;
        let mut digits = self.mantissa.unsigned_abs().to_string();
        if digits.len() <= scale {
            digits.insert_str(0, &"0".repeat(scale + 1 - digits.len()));
        }
        let (whole, fraction) = digits.split_at(digits.len() - scale);
        write!(f, "{sign}{whole}.{fraction}")
    }
}

impl Serialize for Decimal {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        if self.scale == 0 {
            return serializer.serialize_i64(self.mantissa);
        }
        // Written verbatim so neither digits nor trailing zeros are lost
        let number = RawValue::from_string(self.to_string()).map_err(S::Error::custom)?;
        number.serialize(serializer)
    }
}

/// A present value of one of the supported semantic types.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Text(String),
    Integer(i64),
    Timestamp(NaiveDateTime),
    Boolean(bool),
    Decimal(Decimal),
    /// Declared but not encodable as text.
    Binary(Vec<u8>),
}

impl FieldValue {
    /// Semantic type of this value.
    pub fn field_type(&self) -> FieldType {
        match self {
            FieldValue::Text(_) => FieldType::Text,
            FieldValue::Integer(_) => FieldType::Integer,
            FieldValue::Timestamp(_) => FieldType::Timestamp,
            FieldValue::Boolean(_) => FieldType::Boolean,
            FieldValue::Decimal(_) => FieldType::Decimal,
            FieldValue::Binary(_) => FieldType::Binary,
        }
    }

    /// Whether the value equals the zero of its type (`""`, `0`, `false`, ...).
    ///
    /// Skip policies never consult this: for optional fields only absence
    /// counts as default. It is used for reporting.
    pub fn is_zero_value(&self) -> bool {
        match self {
            FieldValue::Text(s) => s.is_empty(),
            FieldValue::Integer(i) => *i == 0,
            FieldValue::Timestamp(ts) => *ts == NaiveDateTime::default(),
            FieldValue::Boolean(b) => !*b,
            FieldValue::Decimal(d) => d.is_zero(),
            FieldValue::Binary(bytes) => bytes.is_empty(),
        }
    }
}

impl Serialize for FieldValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            FieldValue::Text(s) => serializer.serialize_str(s),
            FieldValue::Integer(i) => serializer.serialize_i64(*i),
            FieldValue::Timestamp(ts) => serializer.collect_str(&ts.format(TIMESTAMP_FORMAT)),
            FieldValue::Boolean(b) => serializer.serialize_bool(*b),
            FieldValue::Decimal(d) => d.serialize(serializer),
            FieldValue::Binary(_) => {
                Err(serde::ser::Error::custom("binary values have no text encoding"))
            }
        }
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        FieldValue::Integer(value)
    }
}

impl From<i32> for FieldValue {
    fn from(value: i32) -> Self {
        FieldValue::Integer(value.into())
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        FieldValue::Boolean(value)
    }
}

impl From<NaiveDateTime> for FieldValue {
    fn from(value: NaiveDateTime) -> Self {
        FieldValue::Timestamp(value)
    }
}

impl From<Decimal> for FieldValue {
    fn from(value: Decimal) -> Self {
        FieldValue::Decimal(value)
    }
}

impl From<Vec<u8>> for FieldValue {
    fn from(value: Vec<u8>) -> Self {
        FieldValue::Binary(value)
    }
}
