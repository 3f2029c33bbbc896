use anyhow::Context;
use async_trait::async_trait;

use crate::{
    cache::FileCache,
    config::{Config, Endpoints},
    error::WeatherError,
    model::{Place, WeatherSnapshot},
};

use super::{
    WeatherProvider, aggregate::Aggregator, geocode::Geocoder, http::HttpClient,
    points::PointResolver,
};

/// ZIP geocoding plus National Weather Service forecasts.
#[derive(Debug, Clone)]
pub struct NwsProvider {
    geocoder: Geocoder,
    aggregator: Aggregator,
}

impl NwsProvider {
    pub fn new(http: HttpClient, cache: FileCache, endpoints: &Endpoints) -> Self {
        let geocoder = Geocoder::new(http.clone(), cache.clone(), &endpoints.geocode_base);
        let points = PointResolver::new(http.clone(), cache, &endpoints.weather_base);
        let aggregator = Aggregator::new(http, points, &endpoints.weather_base);
        Self { geocoder, aggregator }
    }

    pub fn from_config(config: &Config, use_cache: bool) -> anyhow::Result<Self> {
        let http = HttpClient::new(&config.user_agent, config.timeout())
            .context("Failed to build HTTP client")?;

        let cache = if use_cache {
            FileCache::new(config.cache_dir()?)
        } else {
            FileCache::disabled()
        };
        tracing::debug!(cache = cache.is_enabled(), weather_base = %config.endpoints.weather_base, "provider ready");

        Ok(Self::new(http, cache, &config.endpoints))
    }
}

#[async_trait]
impl WeatherProvider for NwsProvider {
    async fn lookup_place(&self, zip: &str) -> Result<Place, WeatherError> {
        self.geocoder.lookup(zip).await
    }

    async fn load_weather(&self, place: &Place) -> Result<WeatherSnapshot, WeatherError> {
        self.aggregator.load_weather(place).await
    }
}
