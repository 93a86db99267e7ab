use crate::database::record::{column, Column, ColumnType, SinkRecord, SqlValue};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct City {
    /// work.ua region code the city was found under.
    pub city_id: i64,
    pub city_name: String,
    pub city_lat_name: String,
    pub city_link: String,
    pub city_latitude: Option<f64>,
    pub city_longitude: Option<f64>,
}

impl SinkRecord for City {
    const COLUMNS: &'static [Column] = &[
        column("city_id", ColumnType::BigInt),
        column("city_name", ColumnType::Text),
        column("city_lat_name", ColumnType::Text),
        column("city_link", ColumnType::Text),
        column("city_latitude", ColumnType::Double),
        column("city_longitude", ColumnType::Double),
    ];

    fn values(&self) -> Vec<SqlValue> {
        vec![
            SqlValue::BigInt(Some(self.city_id)),
            SqlValue::Text(Some(self.city_name.clone())),
            SqlValue::Text(Some(self.city_lat_name.clone())),
            SqlValue::Text(Some(self.city_link.clone())),
            SqlValue::Double(self.city_latitude),
            SqlValue::Double(self.city_longitude),
        ]
    }
}
