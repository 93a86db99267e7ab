use crate::database::sink::RecordSink;
use crate::database::table::{TableName, TablePurpose};
use crate::error::{Error, Result};
use crate::extract::work_ua::{
    categories_url, listing_url, parse_categories, parse_city_page, parse_listing_page,
    region_url, Facet, ListingPage,
};
use crate::models::category::Category;
use crate::models::city::City;
use crate::models::work_ua_vacancy::WorkUaVacancy;
use crate::services::fetcher::PageFetcher;
use crate::services::geocode_service::GeocodeService;
use chrono::NaiveDate;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, instrument, warn};

#[derive(Clone)]
pub struct WorkUaService<S> {
    fetcher: Arc<dyn PageFetcher>,
    sink: S,
    geocoder: GeocodeService,
    base_url: String,
    max_pages: Option<u32>,
    region_limit: u32,
}

impl<S: RecordSink> WorkUaService<S> {
    pub fn new(
        fetcher: Arc<dyn PageFetcher>,
        sink: S,
        geocoder: GeocodeService,
        base_url: String,
    ) -> Self {
        Self {
            fetcher,
            sink,
            geocoder,
            base_url,
            max_pages: None,
            region_limit: crate::config::DEFAULT_REGION_LIMIT,
        }
    }

    pub fn with_max_pages(mut self, max_pages: Option<u32>) -> Self {
        self.max_pages = max_pages;
        self
    }

    pub fn with_region_limit(mut self, region_limit: u32) -> Self {
        self.region_limit = region_limit;
        self
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Probes every region code; the ones that land on a city page are stored with
    /// coordinates. Returns the slugs of all cities stored for `date`.
    #[instrument(skip(self))]
    pub async fn discover_cities(&self, date: NaiveDate) -> Result<Vec<String>> {
        let table = TableName::dated(TablePurpose::WorkUaCities, date);
        let run_started = Instant::now();
        let mut found = 0usize;

        for region in 0..self.region_limit {
            let url = region_url(&self.base_url, region);
            let html = self.fetcher.fetch(&url).await?;
            let Some(page) = parse_city_page(&html, region).map_err(|e| Error::extraction(&url, e))?
            else {
                debug!(region, "Region is not a city");
                continue;
            };

            let coordinates = self
                .geocoder
                .locate(&page.city_lat_name, &page.city_name)
                .await?;
            if coordinates.is_none() {
                warn!(city = %page.city_lat_name, "No coordinates for city");
            }

            let city = City {
                city_id: page.city_id,
                city_name: page.city_name,
                city_lat_name: page.city_lat_name,
                city_link: page.city_link,
                city_latitude: coordinates.map(|c| c.latitude),
                city_longitude: coordinates.map(|c| c.longitude),
            };
            self.sink.append(&table, std::slice::from_ref(&city)).await?;
            found += 1;
            info!(region, city = %city.city_lat_name, "Found city");
        }

        let stored = self.sink.read_all::<City>(&table).await?;
        info!(
            found,
            stored = stored.len(),
            elapsed = ?run_started.elapsed(),
            "Discovered work.ua cities"
        );
        Ok(stored.into_iter().map(|city| city.city_lat_name).collect())
    }

    /// Replaces the day's categories table with the filters listed on the Kyiv page.
    /// Returns the category slugs.
    #[instrument(skip(self))]
    pub async fn discover_categories(&self, date: NaiveDate) -> Result<Vec<String>> {
        let table = TableName::dated(TablePurpose::WorkUaCategories, date);
        let started = Instant::now();

        let url = categories_url(&self.base_url);
        let html = self.fetcher.fetch(&url).await?;
        let categories =
            parse_categories(&html, &self.base_url).map_err(|e| Error::extraction(&url, e))?;
        self.sink.replace(&table, &categories).await?;

        let stored = self.sink.read_all::<Category>(&table).await?;
        info!(
            categories = stored.len(),
            elapsed = ?started.elapsed(),
            "Discovered work.ua categories"
        );
        Ok(stored
            .into_iter()
            .map(|category| category.category_lat_name)
            .collect())
    }

    /// Pages through every (city, category) facet until the empty-result page, appending
    /// each page's cards. Returns everything stored for `date`.
    #[instrument(skip(self))]
    pub async fn collect_vacancies(
        &self,
        cities: &[String],
        categories: &[String],
        date: NaiveDate,
    ) -> Result<Vec<WorkUaVacancy>> {
        let table = TableName::dated(TablePurpose::WorkUaVacancies, date);
        let run_started = Instant::now();

        for city in cities {
            for category in categories {
                let facet = Facet {
                    city: city.as_str(),
                    category: category.as_str(),
                };
                let written = self.collect_facet(&table, facet).await?;
                info!(%city, %category, written, "Finished facet");
            }
        }

        let stored = self.sink.read_all::<WorkUaVacancy>(&table).await?;
        info!(
            stored = stored.len(),
            elapsed = ?run_started.elapsed(),
            "Collected work.ua vacancies"
        );
        Ok(stored)
    }

    async fn collect_facet(&self, table: &TableName, facet: Facet<'_>) -> Result<usize> {
        let mut written = 0usize;
        let mut page = 1u32;

        loop {
            if self.max_pages.is_some_and(|max| page > max) {
                warn!(city = facet.city, category = facet.category, page, "Page cap reached");
                break;
            }

            let started = Instant::now();
            let url = listing_url(&self.base_url, facet, page);
            let html = self.fetcher.fetch(&url).await?;
            let parsed = parse_listing_page(&html, &self.base_url, facet)
                .map_err(|e| Error::extraction(&url, e))?;

            let ListingPage::Cards { hot, regular } = parsed else {
                debug!(%url, "No more results");
                break;
            };

            for batch in [&hot, &regular] {
                if !batch.is_empty() {
                    self.sink.append(table, batch).await?;
                }
            }
            written += hot.len() + regular.len();
            info!(
                page,
                hot = hot.len(),
                regular = regular.len(),
                elapsed = ?started.elapsed(),
                "Parsed listing page"
            );
            page += 1;
        }

        Ok(written)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::memory::MemorySink;
    use crate::extract::work_ua::EMPTY_PAGE_SENTINEL;
    use crate::services::fetcher::MockPageFetcher;

    const BASE: &str = "https://work.test";

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2019, 2, 22).unwrap()
    }

    fn sentinel_page() -> String {
        format!("<html><body><b>{}</b></body></html>", EMPTY_PAGE_SENTINEL)
    }

    fn cards_page(ids: &[&str], hot_id: Option<&str>) -> String {
        let mut cards = String::from("<b>Знайдено вакансії</b>");
        if let Some(id) = hot_id {
            cards.push_str(&card(
                id,
                "card card-hover card-visited wordwrap job-link js-hot-block",
            ));
        }
        for id in ids {
            cards.push_str(&card(id, "card card-hover card-visited wordwrap job-link"));
        }
        format!("<html><body>{}</body></html>", cards)
    }

    fn card(id: &str, class: &str) -> String {
        format!(
            r#"<div class="{}"><h2><a href="/jobs/{}/" title="Rust Developer, вакансія від 20 лютого 2019">Rust Developer</a></h2><b>Acme</b><span class="nowrap">40&nbsp;000&nbsp;грн</span></div>"#,
            class, id
        )
    }

    fn service(fetcher: MockPageFetcher) -> WorkUaService<MemorySink> {
        let fetcher: Arc<dyn PageFetcher> = Arc::new(fetcher);
        let geocoder = GeocodeService::new(fetcher.clone(), "https://geo.test/search".into());
        WorkUaService::new(fetcher, MemorySink::new(), geocoder, BASE.into())
    }

    #[tokio::test]
    async fn sentinel_page_stops_with_no_rows() {
        let mut fetcher = MockPageFetcher::new();
        fetcher
            .expect_fetch()
            .times(1)
            .returning(|_| Ok(sentinel_page()));
        let service = service(fetcher);

        let stored = service
            .collect_vacancies(&["kyiv".into()], &["it".into()], date())
            .await
            .unwrap();

        assert!(stored.is_empty());
        let table = TableName::dated(TablePurpose::WorkUaVacancies, date());
        assert_eq!(service.sink().row_count(&table).unwrap(), 0);
    }

    #[tokio::test]
    async fn pages_until_sentinel_for_every_facet() {
        let mut fetcher = MockPageFetcher::new();
        fetcher.expect_fetch().returning(|url| {
            let body = match url {
                "https://work.test/jobs-kyiv-it/?page=1" => {
                    cards_page(&["101", "102"], Some("100"))
                }
                "https://work.test/jobs-kyiv-it/?page=2" => cards_page(&["103"], None),
                "https://work.test/jobs-lviv-it/?page=1" => cards_page(&["201"], None),
                _ => sentinel_page(),
            };
            Ok(body)
        });
        let service = service(fetcher);

        let stored = service
            .collect_vacancies(&["kyiv".into(), "lviv".into()], &["it".into()], date())
            .await
            .unwrap();

        let ids: Vec<_> = stored.iter().filter_map(|v| v.vacancy_id.as_deref()).collect();
        assert_eq!(ids, ["100", "101", "102", "103", "201"]);
        assert_eq!(stored[0].vacancy_salary, Some(40000));
        assert_eq!(stored[0].company_title.as_deref(), Some("Acme"));
        assert_eq!(stored[4].vacancy_city, "lviv");
        assert_eq!(stored[4].vacancy_category, "it");
    }

    #[tokio::test]
    async fn page_cap_bounds_pagination() {
        let mut fetcher = MockPageFetcher::new();
        fetcher
            .expect_fetch()
            .times(2)
            .returning(|_| Ok(cards_page(&["1"], None)));
        let service = service(fetcher).with_max_pages(Some(2));

        let stored = service
            .collect_vacancies(&["kyiv".into()], &["it".into()], date())
            .await
            .unwrap();
        assert_eq!(stored.len(), 2);
    }

    #[tokio::test]
    async fn only_city_pages_are_stored() {
        let mut fetcher = MockPageFetcher::new();
        fetcher.expect_fetch().times(3).returning(|url| {
            let body = if url == "https://work.test/jobs/?region=1&advs=1" {
                r#"<html><head><meta property="og:url" content="https://work.test/jobs-kyiv/"></head>
                <body><h1 id="cityPage">Робота в Києві</h1><input id="city" value="Київ"></body></html>"#
                    .to_string()
            } else {
                "<html><body><h1>Робота</h1></body></html>".to_string()
            };
            Ok(body)
        });
        let service = service(fetcher).with_region_limit(3);

        let slugs = service.discover_cities(date()).await.unwrap();
        assert_eq!(slugs, ["kyiv"]);

        let table = TableName::dated(TablePurpose::WorkUaCities, date());
        let cities = service.sink().read_all::<City>(&table).await.unwrap();
        assert_eq!(cities[0].city_id, 1);
        assert_eq!(cities[0].city_name, "Київ");
        assert_eq!(cities[0].city_latitude, Some(50.4501071));
    }

    #[tokio::test]
    async fn categories_replace_earlier_rows() {
        let mut fetcher = MockPageFetcher::new();
        fetcher.expect_fetch().times(2).returning(|_| {
            Ok(r#"<html><body>
                <a class="filter-link catlink" href="/jobs-kyiv-it/">IT</a>
                <a class="filter-link catlink" href="/jobs-kyiv-design-art/">Дизайн</a>
                <div id="category_selection">
                  <input type="checkbox" value="1"><input type="checkbox" value="2">
                </div></body></html>"#
                .to_string())
        });
        let service = service(fetcher);

        service.discover_categories(date()).await.unwrap();
        let slugs = service.discover_categories(date()).await.unwrap();

        assert_eq!(slugs, ["it", "design-art"]);
    }
}
