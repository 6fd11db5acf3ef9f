//! Owned cell values.
//!
//! DuckDB hands out borrowed [`ValueRef`]s that only live as long as the
//! current chunk. [`CellValue`] is the owned copy kept in a
//! [`QueryResult`](crate::fetch::QueryResult) once the statement is gone.

use base64::Engine as _;
use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};
use duckdb::types::{TimeUnit, Value, ValueRef};
use serde::{Serialize, Serializer};
use serde_json::{Map, Value as JsonValue};
use std::fmt;

/// A single materialized cell.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Null,
    Boolean(bool),
    /// Any signed integer that fits in 64 bits.
    Integer(i64),
    /// Unsigned integer (`UBIGINT` and smaller).
    UnsignedInteger(u64),
    /// `HUGEINT` values.
    HugeInteger(i128),
    /// `FLOAT` and `DOUBLE`.
    Float(f64),
    /// `DECIMAL`, kept in its exact textual form.
    Decimal(String),
    /// `VARCHAR` and `ENUM` labels.
    Text(String),
    Blob(Vec<u8>),
    Date(NaiveDate),
    Time(NaiveTime),
    Timestamp(NaiveDateTime),
    /// `LIST` and fixed-size `ARRAY`.
    List(Vec<CellValue>),
    /// `STRUCT` fields in declaration order.
    Struct(Vec<(String, CellValue)>),
    /// `MAP` entries in storage order.
    Map(Vec<(CellValue, CellValue)>),
    /// Intervals and anything without a dedicated variant, as text.
    Other(String),
}

impl CellValue {
    /// Copy a borrowed DuckDB value.
    pub fn from_duckdb(value: ValueRef<'_>) -> Self {
        match value {
            ValueRef::Null => CellValue::Null,
            ValueRef::Boolean(b) => CellValue::Boolean(b),
            ValueRef::TinyInt(i) => CellValue::Integer(i.into()),
            ValueRef::SmallInt(i) => CellValue::Integer(i.into()),
            ValueRef::Int(i) => CellValue::Integer(i.into()),
            ValueRef::BigInt(i) => CellValue::Integer(i),
            ValueRef::HugeInt(i) => CellValue::HugeInteger(i),
            ValueRef::UTinyInt(i) => CellValue::UnsignedInteger(i.into()),
            ValueRef::USmallInt(i) => CellValue::UnsignedInteger(i.into()),
            ValueRef::UInt(i) => CellValue::UnsignedInteger(i.into()),
            ValueRef::UBigInt(i) => CellValue::UnsignedInteger(i),
            ValueRef::Float(f) => CellValue::Float(f as f64),
            ValueRef::Double(f) => CellValue::Float(f),
            ValueRef::Decimal(d) => CellValue::Decimal(d.to_string()),
            ValueRef::Text(s) => CellValue::Text(String::from_utf8_lossy(s).into_owned()),
            ValueRef::Blob(b) => CellValue::Blob(b.to_vec()),
            ValueRef::Date32(days) => date_from_days(days),
            ValueRef::Time64(unit, v) => time_from(unit, v),
            ValueRef::Timestamp(unit, v) => timestamp_from(unit, v),
            ValueRef::Interval {
                months,
                days,
                nanos,
            } => interval(months, days, nanos),
            // Nested and dictionary-encoded values borrow Arrow arrays;
            // take an owned copy and walk that instead.
            other => Self::from_value(other.to_owned()),
        }
    }

    /// Convert an owned DuckDB value, recursing into nested types.
    pub fn from_value(value: Value) -> Self {
        match value {
            Value::Null => CellValue::Null,
            Value::Boolean(b) => CellValue::Boolean(b),
            Value::TinyInt(i) => CellValue::Integer(i.into()),
            Value::SmallInt(i) => CellValue::Integer(i.into()),
            Value::Int(i) => CellValue::Integer(i.into()),
            Value::BigInt(i) => CellValue::Integer(i),
            Value::HugeInt(i) => CellValue::HugeInteger(i),
            Value::UTinyInt(i) => CellValue::UnsignedInteger(i.into()),
            Value::USmallInt(i) => CellValue::UnsignedInteger(i.into()),
            Value::UInt(i) => CellValue::UnsignedInteger(i.into()),
            Value::UBigInt(i) => CellValue::UnsignedInteger(i),
            Value::Float(f) => CellValue::Float(f as f64),
            Value::Double(f) => CellValue::Float(f),
            Value::Decimal(d) => CellValue::Decimal(d.to_string()),
            Value::Text(s) => CellValue::Text(s),
            Value::Enum(label) => CellValue::Text(label),
            Value::Blob(b) => CellValue::Blob(b),
            Value::Date32(days) => date_from_days(days),
            Value::Time64(unit, v) => time_from(unit, v),
            Value::Timestamp(unit, v) => timestamp_from(unit, v),
            Value::Interval {
                months,
                days,
                nanos,
            } => interval(months, days, nanos),
            Value::List(items) | Value::Array(items) => {
                CellValue::List(items.into_iter().map(Self::from_value).collect())
            }
            Value::Struct(fields) => CellValue::Struct(
                fields
                    .iter()
                    .map(|(name, v)| (name.clone(), Self::from_value(v.clone())))
                    .collect(),
            ),
            Value::Map(entries) => CellValue::Map(
                entries
                    .iter()
                    .map(|(k, v)| (Self::from_value(k.clone()), Self::from_value(v.clone())))
                    .collect(),
            ),
            Value::Union(inner) => Self::from_value(*inner),
            #[allow(unreachable_patterns)]
            other => CellValue::Other(format!("{:?}", other)),
        }
    }

    /// JSON representation used by the API route.
    ///
    /// Numbers stay numbers where JSON can carry them exactly; `HUGEINT`
    /// beyond `i64` and non-finite floats become strings, blobs become
    /// base64. Lists become arrays; structs and maps become objects, map
    /// keys rendered as text.
    pub fn to_json(&self) -> JsonValue {
        match self {
            CellValue::Null => JsonValue::Null,
            CellValue::Boolean(b) => JsonValue::Bool(*b),
            CellValue::Integer(i) => JsonValue::Number((*i).into()),
            CellValue::UnsignedInteger(i) => JsonValue::Number((*i).into()),
            CellValue::HugeInteger(i) => match i64::try_from(*i) {
                Ok(n) => JsonValue::Number(n.into()),
                Err(_) => JsonValue::String(i.to_string()),
            },
            CellValue::Float(f) => serde_json::Number::from_f64(*f)
                .map(JsonValue::Number)
                .unwrap_or_else(|| JsonValue::String(non_finite_name(*f).to_string())),
            CellValue::Blob(b) => {
                JsonValue::String(base64::engine::general_purpose::STANDARD.encode(b))
            }
            CellValue::List(items) => JsonValue::Array(items.iter().map(Self::to_json).collect()),
            CellValue::Struct(fields) => JsonValue::Object(
                fields
                    .iter()
                    .map(|(name, v)| (name.clone(), v.to_json()))
                    .collect::<Map<_, _>>(),
            ),
            CellValue::Map(entries) => JsonValue::Object(
                entries
                    .iter()
                    .map(|(k, v)| (k.to_string(), v.to_json()))
                    .collect::<Map<_, _>>(),
            ),
            other => JsonValue::String(other.to_string()),
        }
    }
}

/// Generic textual conversion, the page's default cell rendering.
impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Null => write!(f, "null"),
            CellValue::Boolean(b) => write!(f, "{}", b),
            CellValue::Integer(i) => write!(f, "{}", i),
            CellValue::UnsignedInteger(i) => write!(f, "{}", i),
            CellValue::HugeInteger(i) => write!(f, "{}", i),
            CellValue::Float(v) if v.is_finite() => write!(f, "{}", v),
            CellValue::Float(v) => write!(f, "{}", non_finite_name(*v)),
            CellValue::Decimal(d) => write!(f, "{}", d),
            CellValue::Text(s) => write!(f, "{}", s),
            CellValue::Blob(b) => write!(
                f,
                "{}",
                base64::engine::general_purpose::STANDARD.encode(b)
            ),
            CellValue::Date(d) => write!(f, "{}", d.format("%Y-%m-%d")),
            CellValue::Time(t) => write!(f, "{}", t.format("%H:%M:%S%.f")),
            CellValue::Timestamp(ts) => write!(f, "{}", ts.format("%Y-%m-%d %H:%M:%S%.f")),
            CellValue::List(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                write!(f, "]")
            }
            CellValue::Struct(fields) => {
                write!(f, "{{")?;
                for (i, (name, v)) in fields.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "'{}': {}", name, v)?;
                }
                write!(f, "}}")
            }
            CellValue::Map(entries) => {
                write!(f, "{{")?;
                for (i, (k, v)) in entries.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}={}", k, v)?;
                }
                write!(f, "}}")
            }
            CellValue::Other(s) => write!(f, "{}", s),
        }
    }
}

impl Serialize for CellValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_json().serialize(serializer)
    }
}

fn date_from_days(days: i32) -> CellValue {
    DateTime::from_timestamp(i64::from(days) * 86_400, 0)
        .map(|dt| CellValue::Date(dt.date_naive()))
        .unwrap_or_else(|| CellValue::Other(format!("date({})", days)))
}

fn time_from(unit: TimeUnit, value: i64) -> CellValue {
    let micros = to_micros(unit, value);
    let secs = micros.div_euclid(1_000_000);
    let nanos = micros.rem_euclid(1_000_000) * 1_000;
    u32::try_from(secs)
        .ok()
        .and_then(|s| NaiveTime::from_num_seconds_from_midnight_opt(s, nanos as u32))
        .map(CellValue::Time)
        .unwrap_or_else(|| CellValue::Other(format!("time({})", value)))
}

fn timestamp_from(unit: TimeUnit, value: i64) -> CellValue {
    DateTime::from_timestamp_micros(to_micros(unit, value))
        .map(|dt| CellValue::Timestamp(dt.naive_utc()))
        .unwrap_or_else(|| CellValue::Other(format!("timestamp({})", value)))
}

fn interval(months: i32, days: i32, nanos: i64) -> CellValue {
    CellValue::Other(format!(
        "{} months {} days {} micros",
        months,
        days,
        nanos / 1_000
    ))
}

fn to_micros(unit: TimeUnit, value: i64) -> i64 {
    match unit {
        TimeUnit::Second => value.saturating_mul(1_000_000),
        TimeUnit::Millisecond => value.saturating_mul(1_000),
        TimeUnit::Microsecond => value,
        TimeUnit::Nanosecond => value / 1_000,
    }
}

fn non_finite_name(f: f64) -> &'static str {
    if f.is_nan() {
        "NaN"
    } else if f.is_sign_positive() {
        "Infinity"
    } else {
        "-Infinity"
    }
}
