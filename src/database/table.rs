use crate::utils::time::date_suffix;
use chrono::NaiveDate;
use std::fmt;

/// What a dated table holds; each purpose has a fixed name prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TablePurpose {
    DjinniLinks,
    DjinniVacancies,
    WorkUaCities,
    WorkUaCategories,
    WorkUaVacancies,
}

impl TablePurpose {
    pub fn prefix(self) -> &'static str {
        match self {
            TablePurpose::DjinniLinks => "djinni_vacancy_links",
            TablePurpose::DjinniVacancies => "djinni",
            TablePurpose::WorkUaCities => "city_work_ua",
            TablePurpose::WorkUaCategories => "category_work_ua",
            TablePurpose::WorkUaVacancies => "work_ua_vacancies",
        }
    }
}

/// `<prefix>_<YYYY-MM-DD>`. Built only from a fixed prefix and a date, so quoting it is
/// enough to use it as an identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TableName(String);

impl TableName {
    pub fn dated(purpose: TablePurpose, date: NaiveDate) -> Self {
        Self(format!("{}_{}", purpose.prefix(), date_suffix(date)))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn quoted(&self) -> String {
        format!("\"{}\"", self.0)
    }
}

impl fmt::Display for TableName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_carry_purpose_and_date() {
        let date = NaiveDate::from_ymd_opt(2019, 2, 22).unwrap();
        let table = TableName::dated(TablePurpose::DjinniVacancies, date);
        assert_eq!(table.as_str(), "djinni_2019-02-22");
        assert_eq!(table.quoted(), "\"djinni_2019-02-22\"");
        assert_eq!(
            TableName::dated(TablePurpose::WorkUaCities, date).to_string(),
            "city_work_ua_2019-02-22"
        );
    }
}
