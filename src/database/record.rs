use chrono::NaiveDate;
use serde::{de::DeserializeOwned, Serialize};
use sqlx::{postgres::PgRow, FromRow};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnType {
    Text,
    BigInt,
    Double,
    Date,
}

impl ColumnType {
    pub fn sql(self) -> &'static str {
        match self {
            ColumnType::Text => "TEXT",
            ColumnType::BigInt => "BIGINT",
            ColumnType::Double => "DOUBLE PRECISION",
            ColumnType::Date => "DATE",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Column {
    pub name: &'static str,
    pub ty: ColumnType,
}

pub const fn column(name: &'static str, ty: ColumnType) -> Column {
    Column { name, ty }
}

/// A single bindable cell. Every column is nullable.
#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
    Text(Option<String>),
    BigInt(Option<i64>),
    Double(Option<f64>),
    Date(Option<NaiveDate>),
}

/// A flat row that can be appended to a dated table and read back.
///
/// `COLUMNS` and `values()` must list the same columns in the same order, and the
/// column names must match the struct's field names for the read-back.
pub trait SinkRecord:
    Serialize + DeserializeOwned + for<'r> FromRow<'r, PgRow> + Send + Sync + Unpin + 'static
{
    const COLUMNS: &'static [Column];

    fn values(&self) -> Vec<SqlValue>;
}
