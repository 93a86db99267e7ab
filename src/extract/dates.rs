//! Dates written as `day month year` with the month spelled out in Russian (djinni) or
//! Ukrainian (work.ua), always in the genitive case.

use crate::error::ExtractError;
use chrono::NaiveDate;

const RUSSIAN_MONTHS: [&str; 12] = [
    "января",
    "февраля",
    "марта",
    "апреля",
    "мая",
    "июня",
    "июля",
    "августа",
    "сентября",
    "октября",
    "ноября",
    "декабря",
];

const UKRAINIAN_MONTHS: [&str; 12] = [
    "січня",
    "лютого",
    "березня",
    "квітня",
    "травня",
    "червня",
    "липня",
    "серпня",
    "вересня",
    "жовтня",
    "листопада",
    "грудня",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MonthVocabulary {
    Russian,
    Ukrainian,
}

impl MonthVocabulary {
    pub fn names(self) -> &'static [&'static str; 12] {
        match self {
            MonthVocabulary::Russian => &RUSSIAN_MONTHS,
            MonthVocabulary::Ukrainian => &UKRAINIAN_MONTHS,
        }
    }

    /// 1-based month for a spelled-out name; a bare number is accepted as well.
    pub fn month_number(self, token: &str) -> Option<u32> {
        let token = token.trim_matches(|c: char| c.is_ascii_punctuation() || c.is_whitespace());
        if let Ok(number) = token.parse::<u32>() {
            return (1..=12).contains(&number).then_some(number);
        }
        let lowered = token.to_lowercase();
        self.names()
            .iter()
            .position(|name| *name == lowered)
            .map(|idx| idx as u32 + 1)
    }
}

/// Converts `[day, month, year]` tokens into a date.
pub fn parse_localized_date(
    field: &'static str,
    parts: &[&str],
    vocabulary: MonthVocabulary,
) -> Result<NaiveDate, ExtractError> {
    let [day, month, year] = parts else {
        return Err(ExtractError::malformed(
            field,
            format!("expected day, month and year, got {:?}", parts),
        ));
    };

    let day: u32 = trim_token(day)
        .parse()
        .map_err(|_| ExtractError::malformed(field, format!("bad day `{}`", day)))?;
    let month = vocabulary
        .month_number(month)
        .ok_or_else(|| ExtractError::malformed(field, format!("unknown month `{}`", month)))?;
    let year: i32 = trim_token(year)
        .parse()
        .map_err(|_| ExtractError::malformed(field, format!("bad year `{}`", year)))?;

    NaiveDate::from_ymd_opt(year, month, day).ok_or_else(|| {
        ExtractError::malformed(field, format!("{}-{}-{} is not a date", year, month, day))
    })
}

/// Scans free text for the first `day month year` triple.
pub fn find_localized_date(text: &str, vocabulary: MonthVocabulary) -> Option<NaiveDate> {
    let tokens: Vec<&str> = text.split_whitespace().collect();
    tokens.windows(3).find_map(|window| {
        let looks_like_day = trim_token(window[0]).parse::<u32>().is_ok();
        let looks_like_year = trim_token(window[2]).len() == 4;
        if !looks_like_day || !looks_like_year {
            return None;
        }
        vocabulary.month_number(window[1])?;
        parse_localized_date("date", window, vocabulary).ok()
    })
}

fn trim_token(token: &str) -> &str {
    token.trim_matches(|c: char| !c.is_alphanumeric())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_russian_month_maps_to_its_number() {
        for (idx, name) in RUSSIAN_MONTHS.iter().enumerate() {
            let date = parse_localized_date("d", &["5", *name, "2019"], MonthVocabulary::Russian)
                .unwrap();
            assert_eq!(date, NaiveDate::from_ymd_opt(2019, idx as u32 + 1, 5).unwrap());
        }
    }

    #[test]
    fn every_ukrainian_month_maps_to_its_number() {
        for (idx, name) in UKRAINIAN_MONTHS.iter().enumerate() {
            let date =
                parse_localized_date("d", &["12", *name, "2020"], MonthVocabulary::Ukrainian)
                    .unwrap();
            assert_eq!(date, NaiveDate::from_ymd_opt(2020, idx as u32 + 1, 12).unwrap());
        }
    }

    #[test]
    fn vocabularies_do_not_mix() {
        assert_eq!(MonthVocabulary::Russian.month_number("лютого"), None);
        assert_eq!(MonthVocabulary::Ukrainian.month_number("февраля"), None);
    }

    #[test]
    fn impossible_dates_are_malformed() {
        let err = parse_localized_date("d", &["31", "февраля", "2019"], MonthVocabulary::Russian)
            .unwrap_err();
        assert!(matches!(err, ExtractError::Malformed { .. }));
    }

    #[test]
    fn finds_date_inside_sentence() {
        let text = "Вакансия опубликована 22 февраля 2019. Просмотров: 104";
        assert_eq!(
            find_localized_date(text, MonthVocabulary::Russian),
            NaiveDate::from_ymd_opt(2019, 2, 22)
        );
        assert_eq!(find_localized_date("без даты", MonthVocabulary::Russian), None);
    }
}
