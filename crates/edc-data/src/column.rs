//! Column type descriptors.
//!
//! DuckDB reports result-set types through its Arrow schema. [`ColumnKind`]
//! folds those Arrow types back into the closed set of engine-level types
//! users see in DuckDB itself, so presentation code can dispatch on a
//! small enum and print the familiar type names (`INTEGER`, `VARCHAR`, ...).

use duckdb::arrow::datatypes::DataType;
use serde::{Serialize, Serializer};
use std::fmt;

/// Engine-level type of a result column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColumnKind {
    Boolean,
    TinyInt,
    SmallInt,
    Integer,
    BigInt,
    UTinyInt,
    USmallInt,
    UInteger,
    UBigInt,
    Float,
    Double,
    /// Fixed-point decimal. `HUGEINT` also surfaces as `DECIMAL(38,0)`.
    Decimal {
        precision: u8,
        scale: i8,
    },
    Varchar,
    Blob,
    Date,
    Time,
    Timestamp,
    TimestampTz,
    Interval,
    List,
    Struct,
    Map,
    Enum,
    Null,
    /// Anything DuckDB can return that has no dedicated variant.
    Other(String),
}

impl From<&DataType> for ColumnKind {
    fn from(data_type: &DataType) -> Self {
        match data_type {
            DataType::Null => ColumnKind::Null,
            DataType::Boolean => ColumnKind::Boolean,
            DataType::Int8 => ColumnKind::TinyInt,
            DataType::Int16 => ColumnKind::SmallInt,
            DataType::Int32 => ColumnKind::Integer,
            DataType::Int64 => ColumnKind::BigInt,
            DataType::UInt8 => ColumnKind::UTinyInt,
            DataType::UInt16 => ColumnKind::USmallInt,
            DataType::UInt32 => ColumnKind::UInteger,
            DataType::UInt64 => ColumnKind::UBigInt,
            DataType::Float16 | DataType::Float32 => ColumnKind::Float,
            DataType::Float64 => ColumnKind::Double,
            DataType::Decimal128(precision, scale) | DataType::Decimal256(precision, scale) => {
                ColumnKind::Decimal {
                    precision: *precision,
                    scale: *scale,
                }
            }
            DataType::Utf8 | DataType::LargeUtf8 => ColumnKind::Varchar,
            DataType::Binary | DataType::LargeBinary | DataType::FixedSizeBinary(_) => {
                ColumnKind::Blob
            }
            DataType::Date32 | DataType::Date64 => ColumnKind::Date,
            DataType::Time32(_) | DataType::Time64(_) => ColumnKind::Time,
            DataType::Timestamp(_, None) => ColumnKind::Timestamp,
            DataType::Timestamp(_, Some(_)) => ColumnKind::TimestampTz,
            DataType::Interval(_) | DataType::Duration(_) => ColumnKind::Interval,
            DataType::List(_) | DataType::LargeList(_) | DataType::FixedSizeList(_, _) => {
                ColumnKind::List
            }
            DataType::Struct(_) => ColumnKind::Struct,
            DataType::Map(_, _) => ColumnKind::Map,
            DataType::Dictionary(_, _) => ColumnKind::Enum,
            other => ColumnKind::Other(format!("{:?}", other)),
        }
    }
}

impl fmt::Display for ColumnKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColumnKind::Boolean => write!(f, "BOOLEAN"),
            ColumnKind::TinyInt => write!(f, "TINYINT"),
            ColumnKind::SmallInt => write!(f, "SMALLINT"),
            ColumnKind::Integer => write!(f, "INTEGER"),
            ColumnKind::BigInt => write!(f, "BIGINT"),
            ColumnKind::UTinyInt => write!(f, "UTINYINT"),
            ColumnKind::USmallInt => write!(f, "USMALLINT"),
            ColumnKind::UInteger => write!(f, "UINTEGER"),
            ColumnKind::UBigInt => write!(f, "UBIGINT"),
            ColumnKind::Float => write!(f, "FLOAT"),
            ColumnKind::Double => write!(f, "DOUBLE"),
            ColumnKind::Decimal { precision, scale } => {
                write!(f, "DECIMAL({},{})", precision, scale)
            }
            ColumnKind::Varchar => write!(f, "VARCHAR"),
            ColumnKind::Blob => write!(f, "BLOB"),
            ColumnKind::Date => write!(f, "DATE"),
            ColumnKind::Time => write!(f, "TIME"),
            ColumnKind::Timestamp => write!(f, "TIMESTAMP"),
            ColumnKind::TimestampTz => write!(f, "TIMESTAMP WITH TIME ZONE"),
            ColumnKind::Interval => write!(f, "INTERVAL"),
            ColumnKind::List => write!(f, "LIST"),
            ColumnKind::Struct => write!(f, "STRUCT"),
            ColumnKind::Map => write!(f, "MAP"),
            ColumnKind::Enum => write!(f, "ENUM"),
            ColumnKind::Null => write!(f, "NULL"),
            ColumnKind::Other(name) => write!(f, "{}", name),
        }
    }
}

impl Serialize for ColumnKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use duckdb::arrow::datatypes::TimeUnit;

    #[test]
    fn test_arrow_types_map_to_duckdb_names() {
        assert_eq!(ColumnKind::from(&DataType::Int32).to_string(), "INTEGER");
        assert_eq!(ColumnKind::from(&DataType::Int64).to_string(), "BIGINT");
        assert_eq!(ColumnKind::from(&DataType::Utf8).to_string(), "VARCHAR");
        assert_eq!(ColumnKind::from(&DataType::Float64).to_string(), "DOUBLE");
        assert_eq!(
            ColumnKind::from(&DataType::Decimal128(18, 3)).to_string(),
            "DECIMAL(18,3)"
        );
        assert_eq!(
            ColumnKind::from(&DataType::Timestamp(TimeUnit::Microsecond, None)),
            ColumnKind::Timestamp
        );
    }

    #[test]
    fn test_serializes_as_type_name() {
        let json = serde_json::to_string(&vec![ColumnKind::Integer, ColumnKind::Varchar]).unwrap();
        assert_eq!(json, r#"["INTEGER","VARCHAR"]"#);
    }
}
