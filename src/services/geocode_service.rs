use crate::error::{Error, Result};
use crate::services::fetcher::PageFetcher;
use serde::Deserialize;
use std::sync::Arc;
use tracing::{debug, instrument};
use url::Url;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

/// Coordinates for work.ua city slugs that are known up front.
const KNOWN_CITIES: &[(&str, f64, f64)] = &[
    ("kyiv", 50.4501071, 30.5240501),
    ("kharkiv", 49.9935, 36.2304),
    ("odesa", 46.4825, 30.7233),
    ("dnipro", 48.4647, 35.0462),
    ("lviv", 49.8397, 24.0297),
    ("zaporizhzhia", 47.8388, 35.1396),
    ("kryvyi_rih", 47.9105, 33.3918),
    ("mykolaiv", 46.975, 31.9946),
    ("vinnytsia", 49.2331, 28.4682),
    ("poltava", 49.5883, 34.5514),
    ("chernihiv", 51.4982, 31.2893),
    ("cherkasy", 49.4444, 32.0598),
    ("zhytomyr", 50.2547, 28.6587),
    ("sumy", 50.9077, 34.7981),
    ("khmelnytskyi", 49.4229, 26.9871),
    ("chernivtsi", 48.2921, 25.9358),
    ("rivne", 50.6199, 26.2516),
    ("ivano_frankivsk", 48.9226, 24.7111),
    ("ternopil", 49.5535, 25.5948),
    ("lutsk", 50.7472, 25.3254),
    ("uzhhorod", 48.6208, 22.2879),
    ("kropyvnytskyi", 48.5079, 32.2623),
    ("kherson", 46.6354, 32.6169),
    ("bila_tserkva", 49.7968, 30.1311),
];

pub fn known_coordinates(slug: &str) -> Option<Coordinates> {
    KNOWN_CITIES
        .iter()
        .find(|(known, _, _)| *known == slug)
        .map(|(_, latitude, longitude)| Coordinates {
            latitude: *latitude,
            longitude: *longitude,
        })
}

#[derive(Debug, Deserialize)]
struct Place {
    lat: String,
    lon: String,
}

/// Static table first, then a Nominatim search by slug and by display name.
#[derive(Clone)]
pub struct GeocodeService {
    fetcher: Arc<dyn PageFetcher>,
    endpoint: String,
}

impl GeocodeService {
    pub fn new(fetcher: Arc<dyn PageFetcher>, endpoint: String) -> Self {
        Self { fetcher, endpoint }
    }

    #[instrument(skip(self))]
    pub async fn locate(&self, slug: &str, display_name: &str) -> Result<Option<Coordinates>> {
        if let Some(coordinates) = known_coordinates(slug) {
            return Ok(Some(coordinates));
        }
        if let Some(coordinates) = self.search(&slug.replace('_', " ")).await? {
            return Ok(Some(coordinates));
        }
        self.search(display_name).await
    }

    async fn search(&self, query: &str) -> Result<Option<Coordinates>> {
        let mut url = Url::parse(&self.endpoint)
            .map_err(|e| Error::Config(format!("Invalid geocoder URL {}: {}", self.endpoint, e)))?;
        url.query_pairs_mut()
            .append_pair("q", query)
            .append_pair("format", "json")
            .append_pair("limit", "1");

        let body = self.fetcher.fetch(url.as_str()).await?;
        let places: Vec<Place> = serde_json::from_str(&body)?;
        let Some(place) = places.into_iter().next() else {
            debug!(query, "Geocoder found nothing");
            return Ok(None);
        };

        let latitude = parse_coordinate(&place.lat)?;
        let longitude = parse_coordinate(&place.lon)?;
        Ok(Some(Coordinates {
            latitude,
            longitude,
        }))
    }
}

fn parse_coordinate(raw: &str) -> Result<f64> {
    raw.parse()
        .map_err(|e| Error::Internal(format!("Geocoder returned bad coordinate `{}`: {}", raw, e)))
}
