use chrono::NaiveDate;
use vacancy_scraper::extract::work_ua::{
    parse_categories, parse_city_page, parse_listing_page, Facet, ListingPage,
};

const BASE: &str = "https://www.work.ua";

const KYIV_IT: Facet<'static> = Facet {
    city: "kyiv",
    category: "it",
};

fn fixture(name: &str) -> String {
    let path = format!("{}/tests/fixtures/{}", env!("CARGO_MANIFEST_DIR"), name);
    std::fs::read_to_string(&path).unwrap_or_else(|e| panic!("read {}: {}", path, e))
}

#[test]
fn listing_splits_hot_and_regular_cards() {
    let page = parse_listing_page(&fixture("work_ua_listing.html"), BASE, KYIV_IT).expect("parse");
    let ListingPage::Cards { hot, regular } = page else {
        panic!("expected cards");
    };

    assert_eq!(hot.len(), 1);
    let architect = &hot[0];
    assert_eq!(architect.vacancy_id.as_deref(), Some("3405251"));
    assert_eq!(
        architect.vacancy_link.as_deref(),
        Some("https://www.work.ua/jobs/3405251/")
    );
    assert_eq!(architect.vacancy_title.as_deref(), Some("Big Data Architect"));
    assert_eq!(architect.company_title.as_deref(), Some("SoftServe"));
    assert_eq!(architect.vacancy_salary, Some(50000));
    assert_eq!(architect.publication_date, NaiveDate::from_ymd_opt(2019, 2, 22));
    assert_eq!(architect.vacancy_city, "kyiv");
    assert_eq!(architect.vacancy_category, "it");

    assert_eq!(regular.len(), 1);
    assert_eq!(regular[0].vacancy_salary, None);
    assert_eq!(regular[0].company_title.as_deref(), Some("EPAM"));
    assert_eq!(regular[0].publication_date, NaiveDate::from_ymd_opt(2019, 2, 20));
}

#[test]
fn sentinel_page_is_exhausted() {
    let page = parse_listing_page(&fixture("work_ua_empty.html"), BASE, KYIV_IT).expect("parse");
    assert_eq!(page, ListingPage::Exhausted);
}

#[test]
fn city_page_is_recognised() {
    let city = parse_city_page(&fixture("work_ua_city.html"), 14)
        .expect("parse")
        .expect("city page");
    assert_eq!(city.city_id, 14);
    assert_eq!(city.city_name, "Львів");
    assert_eq!(city.city_lat_name, "lviv");
    assert_eq!(city.city_link, "https://www.work.ua/jobs-lviv/");
}

#[test]
fn non_city_region_is_skipped() {
    let city = parse_city_page(&fixture("work_ua_listing.html"), 3).expect("parse");
    assert_eq!(city, None);
}

#[test]
fn categories_pair_links_with_checkboxes() {
    let categories = parse_categories(&fixture("work_ua_categories.html"), BASE).expect("parse");
    assert_eq!(categories.len(), 2);
    assert_eq!(categories[0].category_value.as_deref(), Some("1"));
    assert_eq!(categories[0].category_name, "IT");
    assert_eq!(categories[0].category_link, "https://www.work.ua/jobs-kyiv-it/");
    assert_eq!(categories[0].category_lat_name, "it");
    assert_eq!(categories[1].category_lat_name, "accounting");
    assert_eq!(categories[1].category_name, "Бухгалтерія, аудит");
}

#[test]
fn unpaired_categories_are_malformed() {
    let html = r#"<a class="filter-link catlink" href="/jobs-kyiv-it/">IT</a>"#;
    let err = parse_categories(html, BASE).unwrap_err();
    assert!(!err.is_missing());
}
