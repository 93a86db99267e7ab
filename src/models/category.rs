use crate::database::record::{column, Column, ColumnType, SinkRecord, SqlValue};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Category {
    pub category_value: Option<String>,
    pub category_name: String,
    pub category_link: String,
    pub category_lat_name: String,
}

impl SinkRecord for Category {
    const COLUMNS: &'static [Column] = &[
        column("category_value", ColumnType::Text),
        column("category_name", ColumnType::Text),
        column("category_link", ColumnType::Text),
        column("category_lat_name", ColumnType::Text),
    ];

    fn values(&self) -> Vec<SqlValue> {
        vec![
            SqlValue::Text(self.category_value.clone()),
            SqlValue::Text(Some(self.category_name.clone())),
            SqlValue::Text(Some(self.category_link.clone())),
            SqlValue::Text(Some(self.category_lat_name.clone())),
        ]
    }
}
