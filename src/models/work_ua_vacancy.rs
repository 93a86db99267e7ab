use crate::database::record::{column, Column, ColumnType, SinkRecord, SqlValue};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// One card from a work.ua listing page, tagged with the facet it was listed under.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct WorkUaVacancy {
    pub vacancy_id: Option<String>,
    pub vacancy_link: Option<String>,
    pub vacancy_title: Option<String>,
    pub company_title: Option<String>,
    pub vacancy_salary: Option<i64>,
    pub publication_date: Option<NaiveDate>,
    pub vacancy_city: String,
    pub vacancy_category: String,
}

impl SinkRecord for WorkUaVacancy {
    const COLUMNS: &'static [Column] = &[
        column("vacancy_id", ColumnType::Text),
        column("vacancy_link", ColumnType::Text),
        column("vacancy_title", ColumnType::Text),
        column("company_title", ColumnType::Text),
        column("vacancy_salary", ColumnType::BigInt),
        column("publication_date", ColumnType::Date),
        column("vacancy_city", ColumnType::Text),
        column("vacancy_category", ColumnType::Text),
    ];

    fn values(&self) -> Vec<SqlValue> {
        vec![
            SqlValue::Text(self.vacancy_id.clone()),
            SqlValue::Text(self.vacancy_link.clone()),
            SqlValue::Text(self.vacancy_title.clone()),
            SqlValue::Text(self.company_title.clone()),
            SqlValue::BigInt(self.vacancy_salary),
            SqlValue::Date(self.publication_date),
            SqlValue::Text(Some(self.vacancy_city.clone())),
            SqlValue::Text(Some(self.vacancy_category.clone())),
        ]
    }
}
