use crate::database::record::{column, Column, ColumnType, SinkRecord, SqlValue};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct VacancyLink {
    pub vacancy_link: Option<String>,
}

impl SinkRecord for VacancyLink {
    const COLUMNS: &'static [Column] = &[column("vacancy_link", ColumnType::Text)];

    fn values(&self) -> Vec<SqlValue> {
        vec![SqlValue::Text(self.vacancy_link.clone())]
    }
}
