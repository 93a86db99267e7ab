use chrono::{Local, NaiveDate};

pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// `YYYY-MM-DD`, the suffix used for dated table names.
pub fn date_suffix(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}
