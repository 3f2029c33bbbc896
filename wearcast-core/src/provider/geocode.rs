//! Postal code → labeled coordinate, via a Zippopotam-style lookup service.

use serde::Deserialize;

use crate::{cache::FileCache, error::WeatherError, model::Place};

use super::http::HttpClient;

#[derive(Debug, Deserialize)]
struct ZipResponse {
    places: Vec<ZipPlace>,
}

#[derive(Debug, Deserialize)]
struct ZipPlace {
    #[serde(rename = "place name")]
    place_name: String,
    #[serde(rename = "state abbreviation")]
    state_abbreviation: String,
    latitude: String,
    longitude: String,
}

impl ZipPlace {
    fn into_place(self, zip: &str) -> Option<Place> {
        let latitude: f64 = self.latitude.parse().ok()?;
        let longitude: f64 = self.longitude.parse().ok()?;
        let label = format!("{}, {}", self.place_name, self.state_abbreviation);
        Some(Place::new(zip, label, latitude, longitude))
    }
}

#[derive(Debug, Clone)]
pub struct Geocoder {
    http: HttpClient,
    cache: FileCache,
    base_url: String,
}

impl Geocoder {
    pub fn new(http: HttpClient, cache: FileCache, base_url: impl Into<String>) -> Self {
        Self { http, cache, base_url: base_url.into() }
    }

    /// Resolve a ZIP to a place. Cached per ZIP; failures are not retried.
    /// Anything but ASCII letters and digits is `NotFound` without a request.
    #[tracing::instrument(skip(self), level = "info")]
    pub async fn lookup(&self, zip: &str) -> Result<Place, WeatherError> {
        let zip = zip.trim();
        let not_found = || WeatherError::NotFound { zip: zip.to_string() };
        if zip.is_empty() || !zip.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(not_found());
        }

        let key = cache_key(zip);
        if let Some(place) = self.cache.load::<Place>(&key) {
            return Ok(place);
        }

        let url = format!("{}/{}", self.base_url.trim_end_matches('/'), zip);
        let response: ZipResponse = match self.http.get_json(&url).await {
            // the lookup service answers unknown codes with 404
            Err(WeatherError::Upstream { status: 404, .. }) => return Err(not_found()),
            other => other?,
        };

        let place = response
            .places
            .into_iter()
            .next()
            .and_then(|p| p.into_place(zip))
            .ok_or_else(not_found)?;

        tracing::info!(zip, label = %place.label, "resolved place");
        self.cache.save(&key, &place);
        Ok(place)
    }
}

pub fn cache_key(zip: &str) -> String {
    format!("geo-{zip}.json")
}
