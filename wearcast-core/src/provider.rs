use crate::{
    Config,
    error::WeatherError,
    model::{Place, WeatherSnapshot},
    provider::nws::NwsProvider,
};
use async_trait::async_trait;
use std::fmt::Debug;

pub mod aggregate;
pub mod geocode;
pub mod http;
pub mod nws;
pub mod points;

/// Source of places and forecasts. The CLI only talks to this trait.
#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    /// Resolve a postal code to a labeled coordinate.
    async fn lookup_place(&self, zip: &str) -> Result<Place, WeatherError>;

    /// Fetch every resource for `place` and merge them into one snapshot.
    async fn load_weather(&self, place: &Place) -> Result<WeatherSnapshot, WeatherError>;
}

/// Construct the provider described by `config`.
///
/// With `use_cache` off, geocode and points lookups always go to the network.
pub fn provider_from_config(
    config: &Config,
    use_cache: bool,
) -> anyhow::Result<Box<dyn WeatherProvider>> {
    let provider = NwsProvider::from_config(config, use_cache)?;
    Ok(Box::new(provider))
}
