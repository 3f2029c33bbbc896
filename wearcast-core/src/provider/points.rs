use serde::{Deserialize, Serialize};

use crate::{cache::FileCache, error::WeatherError};

use super::http::HttpClient;

/// Resource URLs the provider serves for one coordinate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PointEndpoints {
    pub forecast: String,
    pub forecast_hourly: String,
    pub forecast_grid_data: String,
}

#[derive(Debug, Deserialize)]
struct PointsResponse {
    properties: PointEndpoints,
}

/// Coordinate → endpoint triple, cached by the exact coordinate pair.
#[derive(Debug, Clone)]
pub struct PointResolver {
    http: HttpClient,
    cache: FileCache,
    base_url: String,
}

impl PointResolver {
    pub fn new(http: HttpClient, cache: FileCache, base_url: impl Into<String>) -> Self {
        Self { http, cache, base_url: base_url.into() }
    }

    #[tracing::instrument(skip(self), level = "debug")]
    pub async fn resolve(&self, lat: f64, lon: f64) -> Result<PointEndpoints, WeatherError> {
        let key = cache_key(lat, lon);
        if let Some(endpoints) = self.cache.load::<PointEndpoints>(&key) {
            return Ok(endpoints);
        }

        let url = format!("{}/points/{lat},{lon}", self.base_url.trim_end_matches('/'));
        let response: PointsResponse = self.http.get_json(&url).await?;

        self.cache.save(&key, &response.properties);
        Ok(response.properties)
    }
}

pub fn cache_key(lat: f64, lon: f64) -> String {
    format!("points-{lat}-{lon}.json")
}
