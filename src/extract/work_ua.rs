//! work.ua listing, region and category pages.

use crate::error::ExtractError;
use crate::extract::dates::{parse_localized_date, MonthVocabulary};
use crate::extract::html::{
    attr_of, has_class, select_all, select_first, select_first_within, text_of,
};
use crate::extract::salary::parse_salary;
use crate::extract::text::slug_from_link;
use crate::models::category::Category;
use crate::models::work_ua_vacancy::WorkUaVacancy;
use scraper::{ElementRef, Html};

/// Text of the first `<b>` on a listing page once a facet has no more results.
pub const EMPTY_PAGE_SENTINEL: &str = "За вашим запитом з вибраними фільтрами вакансій поки немає.";

const CARD_SELECTOR: &str = "div.card.card-hover.card-visited.wordwrap.job-link";
const HOT_CARD_CLASS: &str = "js-hot-block";
const TITLE_DATE_SEPARATOR: &str = ", вакансія від ";

#[derive(Debug, Clone, PartialEq)]
pub enum ListingPage {
    /// The sentinel was found; pagination for the facet stops here.
    Exhausted,
    /// Promoted cards and regular cards, each written as its own batch.
    Cards {
        hot: Vec<WorkUaVacancy>,
        regular: Vec<WorkUaVacancy>,
    },
}

/// The facet a listing page was fetched for.
#[derive(Debug, Clone, Copy)]
pub struct Facet<'a> {
    pub city: &'a str,
    pub category: &'a str,
}

pub fn listing_url(base_url: &str, facet: Facet<'_>, page: u32) -> String {
    format!(
        "{}/jobs-{}-{}/?page={}",
        base_url, facet.city, facet.category, page
    )
}

pub fn region_url(base_url: &str, region: u32) -> String {
    format!("{}/jobs/?region={}&advs=1", base_url, region)
}

pub fn categories_url(base_url: &str) -> String {
    format!("{}/jobs-kyiv/?advs=1", base_url)
}

pub fn parse_listing_page(
    html: &str,
    base_url: &str,
    facet: Facet<'_>,
) -> Result<ListingPage, ExtractError> {
    let doc = Html::parse_document(html);
    let marker = select_first(&doc, "b")?.ok_or(ExtractError::Missing {
        field: "result_marker",
    })?;
    if text_of(marker).trim() == EMPTY_PAGE_SENTINEL {
        return Ok(ListingPage::Exhausted);
    }

    let mut hot = Vec::new();
    let mut regular = Vec::new();
    for card in select_all(&doc, CARD_SELECTOR)? {
        let vacancy = parse_card(card, base_url, facet)?;
        if has_class(card, HOT_CARD_CLASS) {
            hot.push(vacancy);
        } else {
            regular.push(vacancy);
        }
    }
    Ok(ListingPage::Cards { hot, regular })
}

fn parse_card(
    card: ElementRef<'_>,
    base_url: &str,
    facet: Facet<'_>,
) -> Result<WorkUaVacancy, ExtractError> {
    let anchor = select_first_within(card, "a")?;

    let vacancy_link = anchor
        .and_then(|a| attr_of(a, "href"))
        .map(|href| format!("{}{}", base_url, href));
    let vacancy_id = vacancy_link.as_ref().map(|link| {
        link.replace(&format!("{}/jobs/", base_url), "")
            .replace('/', "")
    });

    let (vacancy_title, publication_date) = match anchor.and_then(|a| attr_of(a, "title")) {
        Some(title) => split_title(&title)?,
        None => (None, None),
    };

    let company_title = select_first_within(card, "b")?.map(text_of);

    let vacancy_salary = select_first_within(card, "span.nowrap")?
        .map(|span| parse_salary("vacancy_salary", &text_of(span)))
        .transpose()?;

    Ok(WorkUaVacancy {
        vacancy_id,
        vacancy_link,
        vacancy_title,
        company_title,
        vacancy_salary,
        publication_date,
        vacancy_city: facet.city.to_string(),
        vacancy_category: facet.category.to_string(),
    })
}

/// `Python Developer, вакансія від 20 лютого 2019` → title and publication date. Only the
/// first three tokens after the separator form the date.
fn split_title(
    title: &str,
) -> Result<(Option<String>, Option<chrono::NaiveDate>), ExtractError> {
    let Some((name, date)) = title.split_once(TITLE_DATE_SEPARATOR) else {
        return Ok((Some(title.to_string()), None));
    };
    let parts: Vec<&str> = date.split_whitespace().take(3).collect();
    let published = parse_localized_date("publication_date", &parts, MonthVocabulary::Ukrainian)?;
    Ok((Some(name.to_string()), Some(published)))
}

/// A region page that turned out to be a city page.
#[derive(Debug, Clone, PartialEq)]
pub struct CityPage {
    pub city_id: i64,
    pub city_name: String,
    pub city_lat_name: String,
    pub city_link: String,
}

/// `Ok(None)` when the region code does not map to a city.
pub fn parse_city_page(html: &str, region: u32) -> Result<Option<CityPage>, ExtractError> {
    let doc = Html::parse_document(html);
    if select_first(&doc, "h1#cityPage")?.is_none() {
        return Ok(None);
    }

    let city_link = select_first(&doc, r#"meta[property="og:url"]"#)?
        .and_then(|meta| attr_of(meta, "content"))
        .ok_or(ExtractError::Missing { field: "city_link" })?;
    let city_name = select_first(&doc, "input#city")?
        .and_then(|input| attr_of(input, "value"))
        .ok_or(ExtractError::Missing { field: "city_name" })?;
    let city_lat_name = slug_from_link(&city_link, "jobs-").ok_or_else(|| {
        ExtractError::malformed("city_lat_name", format!("no slug in `{}`", city_link))
    })?;

    Ok(Some(CityPage {
        city_id: i64::from(region),
        city_name,
        city_lat_name,
        city_link,
    }))
}

/// Category filters from the Kyiv listing. Anchors and checkboxes are paired by position.
pub fn parse_categories(html: &str, base_url: &str) -> Result<Vec<Category>, ExtractError> {
    let doc = Html::parse_document(html);
    let anchors = select_all(&doc, "a.filter-link.catlink")?;
    let checkboxes = select_all(&doc, r#"div#category_selection input[type="checkbox"]"#)?;

    if anchors.len() != checkboxes.len() {
        return Err(ExtractError::malformed(
            "category_value",
            format!(
                "{} category links but {} checkboxes",
                anchors.len(),
                checkboxes.len()
            ),
        ));
    }

    anchors
        .into_iter()
        .zip(checkboxes)
        .map(|(anchor, checkbox)| -> Result<Category, ExtractError> {
            let href = attr_of(anchor, "href").ok_or(ExtractError::Missing {
                field: "category_link",
            })?;
            let category_link = format!("{}{}", base_url, href);
            let category_lat_name = slug_from_link(&category_link, "jobs-kyiv-").ok_or_else(|| {
                ExtractError::malformed(
                    "category_lat_name",
                    format!("no slug in `{}`", category_link),
                )
            })?;
            Ok(Category {
                category_value: attr_of(checkbox, "value"),
                category_name: text_of(anchor),
                category_link,
                category_lat_name,
            })
        })
        .collect()
}
