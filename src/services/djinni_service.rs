use crate::database::sink::RecordSink;
use crate::database::table::{TableName, TablePurpose};
use crate::error::{Error, Result};
use crate::extract::djinni::{
    page_count, parse_listing_links, parse_total_vacancies, parse_vacancy_page,
};
use crate::models::djinni_vacancy::DjinniVacancy;
use crate::models::vacancy_link::VacancyLink;
use crate::services::fetcher::PageFetcher;
use chrono::NaiveDate;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, instrument};

#[derive(Clone)]
pub struct DjinniService<S> {
    fetcher: Arc<dyn PageFetcher>,
    sink: S,
    base_url: String,
}

impl<S: RecordSink> DjinniService<S> {
    pub fn new(fetcher: Arc<dyn PageFetcher>, sink: S, base_url: String) -> Self {
        Self {
            fetcher,
            sink,
            base_url,
        }
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    fn listing_url(&self, page: Option<u32>) -> String {
        match page {
            Some(page) => format!("{}/jobs/?page={}", self.base_url, page),
            None => format!("{}/jobs/?page=", self.base_url),
        }
    }

    /// Walks every listing page and appends its links to the day's links table.
    /// Returns the whole table afterwards.
    #[instrument(skip(self))]
    pub async fn collect_links(&self, date: NaiveDate) -> Result<Vec<VacancyLink>> {
        let table = TableName::dated(TablePurpose::DjinniLinks, date);
        let run_started = Instant::now();

        let first_url = self.listing_url(None);
        let first_page = self.fetcher.fetch(&first_url).await?;
        let total =
            parse_total_vacancies(&first_page).map_err(|e| Error::extraction(&first_url, e))?;
        let pages = page_count(total);
        info!(total, pages, "Discovered djinni listing size");

        for page in 1..=pages {
            let started = Instant::now();
            let url = self.listing_url(Some(page));
            let html = self.fetcher.fetch(&url).await?;
            let links = parse_listing_links(&html, &self.base_url)
                .map_err(|e| Error::extraction(&url, e))?;
            self.sink.append(&table, &links).await?;
            info!(
                page,
                %url,
                links = links.len(),
                elapsed = ?started.elapsed(),
                "Parsed listing page"
            );
        }

        let stored = self.sink.read_all::<VacancyLink>(&table).await?;
        info!(
            pages,
            total,
            stored = stored.len(),
            elapsed = ?run_started.elapsed(),
            "Collected djinni vacancy links"
        );
        Ok(stored)
    }

    /// Links stored by an earlier `collect_links` run on `date`.
    pub async fn stored_links(&self, date: NaiveDate) -> Result<Vec<VacancyLink>> {
        let table = TableName::dated(TablePurpose::DjinniLinks, date);
        self.sink.read_all(&table).await
    }

    /// Fetches each vacancy page in order and appends every extracted record to the
    /// day's vacancies table. Pages with an empty position are dropped.
    #[instrument(skip(self, links), fields(links = links.len()))]
    pub async fn collect_vacancies(
        &self,
        links: &[VacancyLink],
        date: NaiveDate,
    ) -> Result<Vec<DjinniVacancy>> {
        let table = TableName::dated(TablePurpose::DjinniVacancies, date);
        let run_started = Instant::now();
        let mut seq_index: i64 = 0;

        for link in links {
            let Some(url) = link.vacancy_link.as_deref() else {
                debug!("Skipping listing item without a link");
                continue;
            };
            let started = Instant::now();
            seq_index += 1;

            let html = self.fetcher.fetch(url).await?;
            let parsed = parse_vacancy_page(&html, url, &self.base_url, seq_index)
                .map_err(|e| Error::extraction(url, e))?;
            let Some(vacancy) = parsed else {
                continue;
            };

            self.sink.append(&table, std::slice::from_ref(&vacancy)).await?;
            info!(seq_index, %url, elapsed = ?started.elapsed(), "Parsed vacancy");
        }

        let stored = self.sink.read_all::<DjinniVacancy>(&table).await?;
        info!(
            stored = stored.len(),
            elapsed = ?run_started.elapsed(),
            "Collected djinni vacancies"
        );
        Ok(stored)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::memory::MemorySink;
    use crate::services::fetcher::MockPageFetcher;

    const BASE: &str = "https://djinni.test";

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2019, 2, 22).unwrap()
    }

    fn listing(total: u32) -> String {
        format!(r#"<html><body><small class="text-muted">{}</small></body></html>"#, total)
    }

    fn listing_page(slugs: &[&str]) -> String {
        let items: String = slugs
            .iter()
            .map(|slug| {
                format!(
                    r#"<li class="list-jobs__item"><div><a class="profile" href="/jobs/{}/">x</a></div></li>"#,
                    slug
                )
            })
            .collect();
        format!(r#"<ul>{}<li class="list-jobs__item"><span>ad</span></li></ul>"#, items)
    }

    fn vacancy_page(position: &str) -> String {
        format!(
            r#"<html><body>
            <div class="page-header"><h1>{}</h1><ul><li>Jobs</li><li>Python</li><li>Київ</li></ul></div>
            <div class="list-jobs__details">Anna   x   Recruiter at Acme<a href="/r/1-anna/">Anna</a></div>
            <img class="list-jobs__userpic back-recruiter-image" alt="Anna">
            <div class="profile-page-section">Intro</div>
            <div class="profile-page-section">Build things</div>
            </body></html>"#,
            position
        )
    }

    fn fetcher() -> MockPageFetcher {
        let mut fetcher = MockPageFetcher::new();
        fetcher.expect_fetch().returning(|url| {
            let body = match url {
                "https://djinni.test/jobs/?page=" => listing(17),
                "https://djinni.test/jobs/?page=1" => listing_page(&["1-python"]),
                "https://djinni.test/jobs/?page=2" => listing_page(&["2-rust"]),
                "https://djinni.test/jobs/1-python/" => vacancy_page("Python Developer"),
                "https://djinni.test/jobs/2-rust/" => vacancy_page(""),
                other => panic!("unexpected fetch {}", other),
            };
            Ok(body)
        });
        fetcher
    }

    #[tokio::test]
    async fn links_from_every_page_are_stored() {
        let service = DjinniService::new(Arc::new(fetcher()), MemorySink::new(), BASE.to_string());

        let links = service.collect_links(date()).await.unwrap();

        assert_eq!(links.len(), 4);
        assert_eq!(
            links[0].vacancy_link.as_deref(),
            Some("https://djinni.test/jobs/1-python/")
        );
        assert_eq!(links[1].vacancy_link, None);
    }

    #[tokio::test]
    async fn empty_position_is_never_written() {
        let service = DjinniService::new(Arc::new(fetcher()), MemorySink::new(), BASE.to_string());
        let links = service.collect_links(date()).await.unwrap();

        let vacancies = service.collect_vacancies(&links, date()).await.unwrap();
        assert_eq!(vacancies.len(), 1);
        assert_eq!(vacancies[0].position, "Python Developer");
        assert_eq!(vacancies[0].seq_index, 1);
        assert_eq!(vacancies[0].recruiter_link, "https://djinni.test/r/1-anna/");

        let again = service.collect_vacancies(&links, date()).await.unwrap();
        assert_eq!(again.len(), 2);
        assert!(again.iter().all(|v| v.position == "Python Developer"));
    }

    #[tokio::test]
    async fn rerun_appends_instead_of_replacing() {
        let service = DjinniService::new(Arc::new(fetcher()), MemorySink::new(), BASE.to_string());

        let first = service.collect_links(date()).await.unwrap();
        let second = service.collect_links(date()).await.unwrap();

        assert_eq!(second.len(), first.len() * 2);
        assert!(first.iter().all(|link| second.contains(link)));
        assert_eq!(service.stored_links(date()).await.unwrap(), second);
    }
}
