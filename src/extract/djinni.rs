//! djinni.co listing and vacancy pages.

use crate::error::ExtractError;
use crate::extract::dates::{find_localized_date, MonthVocabulary};
use crate::extract::html::{attr_of, select_all, select_first, select_first_within, text_of};
use crate::extract::table::{ExtractionTable, FieldRule, Locate};
use crate::extract::text::{
    drop_double_spaces, newlines_to_spaces, split_space_runs, strip_nbsp, strip_newlines,
};
use crate::models::djinni_vacancy::DjinniVacancy;
use crate::models::vacancy_link::VacancyLink;
use scraper::Html;

/// Vacancies shown per listing page.
pub const PAGE_SIZE: u32 = 15;

/// Marks the sidebar block that only carries the publication line, not a company blurb.
const PUBLISHED_MARKER: &str = "Вакансия опубликована";

const DETAIL_RULES: &[FieldRule] = &[
    FieldRule::required("position", "div.page-header h1").transform(clean_position),
    FieldRule::optional("specialization", "div.page-header li")
        .locate(Locate::NthWhenCount { index: 1, min: 3 })
        .transform(clean_line),
    FieldRule::required("city", "div.page-header li")
        .locate(Locate::NthOr {
            index: 2,
            fallback: 1,
        })
        .transform(clean_line),
    FieldRule::optional("title", "p.profile"),
    FieldRule::optional("published_date", "div.profile-page-section.text-small")
        .transform(clean_date_line),
    FieldRule::required("recruiter", "img.list-jobs__userpic.back-recruiter-image").attr("alt"),
    FieldRule::required("recruiter_company", "div.list-jobs__details")
        .transform(pick_recruiter_company),
    FieldRule::required("recruiter_link", "div.list-jobs__details a").attr("href"),
    FieldRule::required("descriptions", "div.profile-page-section")
        .locate(Locate::Nth(1))
        .transform(clean_block),
    FieldRule::optional("about_company", "div.profile-page-section")
        .locate(Locate::Nth(2))
        .transform(clean_about_company),
];

pub const DETAIL_TABLE: ExtractionTable = ExtractionTable::new(DETAIL_RULES);

fn clean_position(_field: &'static str, value: String) -> Result<String, ExtractError> {
    Ok(drop_double_spaces(&strip_newlines(&value)))
}

fn clean_line(_field: &'static str, value: String) -> Result<String, ExtractError> {
    Ok(strip_newlines(&value))
}

fn clean_block(_field: &'static str, value: String) -> Result<String, ExtractError> {
    Ok(newlines_to_spaces(&value))
}

fn clean_date_line(_field: &'static str, value: String) -> Result<String, ExtractError> {
    Ok(strip_newlines(&value))
}

fn clean_about_company(field: &'static str, value: String) -> Result<String, ExtractError> {
    let value = newlines_to_spaces(&value);
    if value.contains(PUBLISHED_MARKER) {
        return Err(ExtractError::Missing { field });
    }
    Ok(value)
}

/// The recruiter block reads like `Name   ...   Title at Company   ...`. Splitting on
/// three-space runs puts the job title at index 2, or at index 8 when the block opens
/// with indentation.
fn pick_recruiter_company(field: &'static str, value: String) -> Result<String, ExtractError> {
    let cleaned = strip_nbsp(&strip_newlines(&value));
    let segments = split_space_runs(&cleaned);
    let index = if segments.first().is_some_and(|s| s.is_empty()) {
        8
    } else {
        2
    };
    segments
        .get(index)
        .map(|s| s.to_string())
        .ok_or_else(|| {
            ExtractError::malformed(
                field,
                format!("expected segment {} of {}", index, segments.len()),
            )
        })
}

/// Total number of vacancies from the first listing page.
pub fn parse_total_vacancies(html: &str) -> Result<u32, ExtractError> {
    let doc = Html::parse_document(html);
    let counter = select_first(&doc, "small.text-muted")?.ok_or(ExtractError::Missing {
        field: "total_vacancies",
    })?;
    let raw = text_of(counter);
    let digits: String = raw.chars().filter(|c| !c.is_whitespace()).collect();
    digits
        .parse()
        .map_err(|e| ExtractError::malformed("total_vacancies", format!("`{}`: {}", raw.trim(), e)))
}

pub fn page_count(total: u32) -> u32 {
    total.div_ceil(PAGE_SIZE)
}

/// One link per `li.list-jobs__item`; items without an inner block yield an empty link.
pub fn parse_listing_links(html: &str, base_url: &str) -> Result<Vec<VacancyLink>, ExtractError> {
    let doc = Html::parse_document(html);
    select_all(&doc, "li.list-jobs__item")?
        .into_iter()
        .map(|item| -> Result<VacancyLink, ExtractError> {
            if select_first_within(item, "div")?.is_none() {
                return Ok(VacancyLink { vacancy_link: None });
            }
            let href = select_first_within(item, "a.profile")?
                .and_then(|anchor| attr_of(anchor, "href"))
                .ok_or(ExtractError::Missing {
                    field: "vacancy_link",
                })?;
            Ok(VacancyLink {
                vacancy_link: Some(format!("{}{}", base_url, href)),
            })
        })
        .collect()
}

/// Extracts one vacancy page. Returns `Ok(None)` when the position heading is empty;
/// such pages are dropped without being stored.
pub fn parse_vacancy_page(
    html: &str,
    url: &str,
    base_url: &str,
    seq_index: i64,
) -> Result<Option<DjinniVacancy>, ExtractError> {
    let doc = Html::parse_document(html);
    let mut fields = DETAIL_TABLE.evaluate(&doc)?;

    let position = fields.take_required("position")?;
    if position.is_empty() {
        return Ok(None);
    }

    let published_date = match fields.take("published_date") {
        Some(line) => {
            let date = find_localized_date(&line.replace('.', ""), MonthVocabulary::Russian);
            let date = date.ok_or_else(|| {
                ExtractError::malformed("published_date", format!("no date in `{}`", line.trim()))
            })?;
            Some(date)
        }
        None => None,
    };

    Ok(Some(DjinniVacancy {
        vacancy_link: url.to_string(),
        position,
        specialization: fields.take("specialization"),
        city: fields.take_required("city")?,
        title: fields.take("title"),
        published_date,
        recruiter: fields.take_required("recruiter")?,
        recruiter_company: fields.take_required("recruiter_company")?,
        recruiter_link: format!("{}{}", base_url, fields.take_required("recruiter_link")?),
        descriptions: fields.take_required("descriptions")?,
        about_company: fields.take("about_company"),
        seq_index,
    }))
}
