pub mod cli;
pub mod config;
pub mod database;
pub mod error;
pub mod extract;
pub mod models;
pub mod services;
pub mod utils;

use crate::config::Config;
use crate::database::sink::RecordSink;
use crate::error::Result;
use crate::services::{
    djinni_service::DjinniService,
    fetcher::{HttpFetcher, PageFetcher},
    geocode_service::GeocodeService,
    work_ua_service::WorkUaService,
};
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState<S> {
    pub djinni_service: DjinniService<S>,
    pub work_ua_service: WorkUaService<S>,
}

impl<S: RecordSink + Clone> AppState<S> {
    pub fn new(config: &Config, sink: S) -> Result<Self> {
        let fetcher: Arc<dyn PageFetcher> = Arc::new(HttpFetcher::new(&config.user_agent)?);
        Ok(Self::with_fetcher(config, sink, fetcher))
    }

    pub fn with_fetcher(config: &Config, sink: S, fetcher: Arc<dyn PageFetcher>) -> Self {
        let geocoder = GeocodeService::new(fetcher.clone(), config.nominatim_url.clone());
        let djinni_service =
            DjinniService::new(fetcher.clone(), sink.clone(), config.djinni_base_url.clone());
        let work_ua_service =
            WorkUaService::new(fetcher, sink, geocoder, config.work_ua_base_url.clone())
                .with_max_pages(config.work_ua_max_pages)
                .with_region_limit(config.work_ua_region_limit);

        Self {
            djinni_service,
            work_ua_service,
        }
    }
}
