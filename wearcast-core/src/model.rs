use chrono::{DateTime, FixedOffset, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A geocoded location. Identity within a saved list is the postal code.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Place {
    pub id: Uuid,
    pub zip: String,
    pub label: String,
    pub latitude: f64,
    pub longitude: f64,
    pub last_used_at: DateTime<Utc>,
}

impl Place {
    pub fn new(zip: impl Into<String>, label: impl Into<String>, latitude: f64, longitude: f64) -> Self {
        Self {
            id: Uuid::new_v4(),
            zip: zip.into(),
            label: label.into(),
            latitude,
            longitude,
            last_used_at: Utc::now(),
        }
    }
}

/// One hourly forecast sample. The first of a sequence stands for "now".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HourlyPeriod {
    pub start_time: DateTime<FixedOffset>,
    pub temperature: f64,
    pub temperature_unit: String,
    pub wind_speed: String,
    /// 0-100
    pub probability_of_precipitation: Option<f64>,
    pub short_forecast: String,
}

/// A named daily/half-day forecast period, e.g. "Tonight".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastPeriod {
    pub name: String,
    pub start_time: DateTime<FixedOffset>,
    pub temperature: f64,
    pub temperature_unit: String,
    pub short_forecast: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlertItem {
    pub event: String,
    pub headline: String,
    pub severity: String,
    pub effective: Option<DateTime<FixedOffset>>,
    pub expires: Option<DateTime<FixedOffset>>,
}

/// Which formula produced the feels-like value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum FeelsLikeSource {
    HeatIndex,
    WindChill,
    #[default]
    Temperature,
}

impl FeelsLikeSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            FeelsLikeSource::HeatIndex => "heat-index",
            FeelsLikeSource::WindChill => "wind-chill",
            FeelsLikeSource::Temperature => "temperature",
        }
    }
}

impl std::fmt::Display for FeelsLikeSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Values derived from the current period and grid data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct WeatherMetrics {
    pub humidity: Option<f64>,
    pub wind_mph: Option<f64>,
    pub feels_like_f: Option<f64>,
    pub feels_like_source: FeelsLikeSource,
}

/// Aggregated forecast for a place. Replaced wholesale on every refresh.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherSnapshot {
    pub place: Place,
    pub current: Option<HourlyPeriod>,
    /// At most 24 entries.
    pub hourly: Vec<HourlyPeriod>,
    /// At most 7 entries.
    pub daily: Vec<ForecastPeriod>,
    pub alerts: Vec<AlertItem>,
    pub metrics: WeatherMetrics,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClothingAdvice {
    pub summary: String,
    pub details: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn feels_like_source_serializes_as_tag() {
        let json = serde_json::to_string(&FeelsLikeSource::HeatIndex).unwrap();
        assert_eq!(json, "\"heat-index\"");

        let parsed: FeelsLikeSource = serde_json::from_str("\"wind-chill\"").unwrap();
        assert_eq!(parsed, FeelsLikeSource::WindChill);
        assert_eq!(FeelsLikeSource::default().as_str(), "temperature");
    }

    #[test]
    fn new_place_gets_fresh_identity() {
        let a = Place::new("80302", "Boulder, CO", 40.0, -105.27);
        let b = Place::new("80302", "Boulder, CO", 40.0, -105.27);

        assert_ne!(a.id, b.id);
        assert_eq!(a.zip, b.zip);
    }
}
