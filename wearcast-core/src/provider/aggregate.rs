//! Fan-out fetch of forecast, hourly, grid and alert resources for a place,
//! merged into a single [`WeatherSnapshot`].

use chrono::{DateTime, FixedOffset, Utc};
use serde::Deserialize;

use crate::{
    error::WeatherError,
    metrics::{self, GridSample},
    model::{AlertItem, ForecastPeriod, HourlyPeriod, Place, WeatherSnapshot},
};

use super::{http::HttpClient, points::PointResolver};

pub const HOURLY_LIMIT: usize = 24;
pub const DAILY_LIMIT: usize = 7;

#[derive(Debug, Deserialize)]
pub(crate) struct ForecastResponse {
    properties: ForecastProperties,
}

#[derive(Debug, Deserialize)]
struct ForecastProperties {
    periods: Vec<ForecastPeriodWire>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ForecastPeriodWire {
    name: String,
    start_time: DateTime<FixedOffset>,
    temperature: f64,
    temperature_unit: String,
    short_forecast: String,
}

impl From<ForecastPeriodWire> for ForecastPeriod {
    fn from(p: ForecastPeriodWire) -> Self {
        ForecastPeriod {
            name: p.name,
            start_time: p.start_time,
            temperature: p.temperature,
            temperature_unit: p.temperature_unit,
            short_forecast: p.short_forecast,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct HourlyResponse {
    properties: HourlyProperties,
}

#[derive(Debug, Deserialize)]
struct HourlyProperties {
    periods: Vec<HourlyPeriodWire>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct HourlyPeriodWire {
    start_time: DateTime<FixedOffset>,
    temperature: f64,
    temperature_unit: String,
    wind_speed: String,
    probability_of_precipitation: QuantitativeValue,
    short_forecast: String,
}

#[derive(Debug, Deserialize)]
struct QuantitativeValue {
    value: Option<f64>,
}

impl From<HourlyPeriodWire> for HourlyPeriod {
    fn from(p: HourlyPeriodWire) -> Self {
        HourlyPeriod {
            start_time: p.start_time,
            temperature: p.temperature,
            temperature_unit: p.temperature_unit,
            wind_speed: p.wind_speed,
            probability_of_precipitation: p.probability_of_precipitation.value,
            short_forecast: p.short_forecast,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct GridResponse {
    properties: GridProperties,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GridProperties {
    relative_humidity: GridSeries,
}

#[derive(Debug, Deserialize)]
struct GridSeries {
    values: Vec<GridSample>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct AlertResponse {
    features: Vec<AlertFeature>,
}

#[derive(Debug, Deserialize)]
struct AlertFeature {
    properties: AlertProperties,
}

#[derive(Debug, Deserialize)]
struct AlertProperties {
    event: String,
    headline: String,
    severity: String,
    effective: Option<DateTime<FixedOffset>>,
    expires: Option<DateTime<FixedOffset>>,
}

impl From<AlertFeature> for AlertItem {
    fn from(f: AlertFeature) -> Self {
        let p = f.properties;
        AlertItem {
            event: p.event,
            headline: p.headline,
            severity: p.severity,
            effective: p.effective,
            expires: p.expires,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Aggregator {
    http: HttpClient,
    points: PointResolver,
    base_url: String,
}

impl Aggregator {
    pub fn new(http: HttpClient, points: PointResolver, base_url: impl Into<String>) -> Self {
        Self { http, points, base_url: base_url.into() }
    }

    /// Fetch all four resources concurrently. Any single failure fails the
    /// whole call; no partial snapshot is built.
    #[tracing::instrument(skip(self, place), fields(zip = %place.zip), level = "info")]
    pub async fn load_weather(&self, place: &Place) -> Result<WeatherSnapshot, WeatherError> {
        let endpoints = self.points.resolve(place.latitude, place.longitude).await?;
        let alerts_url = format!(
            "{}/alerts/active?point={},{}",
            self.base_url.trim_end_matches('/'),
            place.latitude,
            place.longitude
        );

        let (forecast, hourly, grid, alerts) = tokio::try_join!(
            self.http.get_json::<ForecastResponse>(&endpoints.forecast),
            self.http.get_json::<HourlyResponse>(&endpoints.forecast_hourly),
            self.http.get_json::<GridResponse>(&endpoints.forecast_grid_data),
            self.http.get_json::<AlertResponse>(&alerts_url),
        )?;

        let snapshot = assemble(place.clone(), forecast, hourly, grid, alerts, Utc::now());
        tracing::info!(
            hourly = snapshot.hourly.len(),
            daily = snapshot.daily.len(),
            alerts = snapshot.alerts.len(),
            feels_like_source = %snapshot.metrics.feels_like_source,
            "weather loaded"
        );
        Ok(snapshot)
    }
}

pub(crate) fn assemble(
    place: Place,
    forecast: ForecastResponse,
    hourly: HourlyResponse,
    grid: GridResponse,
    alerts: AlertResponse,
    updated_at: DateTime<Utc>,
) -> WeatherSnapshot {
    let hourly: Vec<HourlyPeriod> =
        hourly.properties.periods.into_iter().take(HOURLY_LIMIT).map(Into::into).collect();
    let daily: Vec<ForecastPeriod> =
        forecast.properties.periods.into_iter().take(DAILY_LIMIT).map(Into::into).collect();
    let alerts: Vec<AlertItem> = alerts.features.into_iter().map(Into::into).collect();

    let current = hourly.first().cloned();
    let metrics = metrics::derive(current.as_ref(), &grid.properties.relative_humidity.values);

    WeatherSnapshot { place, current, hourly, daily, alerts, metrics, updated_at }
}
