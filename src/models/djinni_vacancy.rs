use crate::database::record::{column, Column, ColumnType, SinkRecord, SqlValue};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// One djinni.co vacancy page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct DjinniVacancy {
    pub vacancy_link: String,
    pub position: String,
    pub specialization: Option<String>,
    pub city: String,
    /// Short blurb under the heading.
    pub title: Option<String>,
    pub published_date: Option<NaiveDate>,
    pub recruiter: String,
    pub recruiter_company: String,
    pub recruiter_link: String,
    pub descriptions: String,
    pub about_company: Option<String>,
    /// Position of the source link in the run, counting skipped pages.
    pub seq_index: i64,
}

impl SinkRecord for DjinniVacancy {
    const COLUMNS: &'static [Column] = &[
        column("vacancy_link", ColumnType::Text),
        column("position", ColumnType::Text),
        column("specialization", ColumnType::Text),
        column("city", ColumnType::Text),
        column("title", ColumnType::Text),
        column("published_date", ColumnType::Date),
        column("recruiter", ColumnType::Text),
        column("recruiter_company", ColumnType::Text),
        column("recruiter_link", ColumnType::Text),
        column("descriptions", ColumnType::Text),
        column("about_company", ColumnType::Text),
        column("seq_index", ColumnType::BigInt),
    ];

    fn values(&self) -> Vec<SqlValue> {
        vec![
            SqlValue::Text(Some(self.vacancy_link.clone())),
            SqlValue::Text(Some(self.position.clone())),
            SqlValue::Text(self.specialization.clone()),
            SqlValue::Text(Some(self.city.clone())),
            SqlValue::Text(self.title.clone()),
            SqlValue::Date(self.published_date),
            SqlValue::Text(Some(self.recruiter.clone())),
            SqlValue::Text(Some(self.recruiter_company.clone())),
            SqlValue::Text(Some(self.recruiter_link.clone())),
            SqlValue::Text(Some(self.descriptions.clone())),
            SqlValue::Text(self.about_company.clone()),
            SqlValue::BigInt(Some(self.seq_index)),
        ]
    }
}
