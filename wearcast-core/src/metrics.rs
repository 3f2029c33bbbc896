//! Derived comfort metrics: humidity at the current hour, wind speed,
//! wind chill, heat index and the resulting feels-like temperature.
//!
//! All functions are pure and never fail; a value that cannot be derived is
//! simply `None`.

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

use crate::model::{FeelsLikeSource, HourlyPeriod, WeatherMetrics};

/// One entry of a grid time series, e.g. `{"validTime": "2024-01-15T14:00:00+00:00/PT1H", "value": 82}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridSample {
    #[serde(rename = "validTime")]
    pub valid_time: String,
    pub value: Option<f64>,
}

impl GridSample {
    /// Start of the validity interval (the part before `/`).
    fn start(&self) -> Option<DateTime<FixedOffset>> {
        let start = self.valid_time.split('/').next()?;
        DateTime::parse_from_rfc3339(start).ok()
    }
}

/// Derive metrics for the current period.
pub fn derive(current: Option<&HourlyPeriod>, humidity_series: &[GridSample]) -> WeatherMetrics {
    let humidity = pick_grid_value(humidity_series, current.map(|c| c.start_time));
    let wind_mph = parse_wind_mph(current.map(|c| c.wind_speed.as_str()));
    let temp_f = current.map(|c| to_fahrenheit(c.temperature, &c.temperature_unit));

    let wind_chill = temp_f.and_then(|t| wind_chill_f(t, wind_mph));
    let heat_index = temp_f.and_then(|t| heat_index_f(t, humidity));

    let (feels_like_f, feels_like_source) = match (heat_index, wind_chill) {
        (Some(hi), _) => (Some(hi), FeelsLikeSource::HeatIndex),
        (None, Some(wc)) => (Some(wc), FeelsLikeSource::WindChill),
        (None, None) => (temp_f, FeelsLikeSource::Temperature),
    };

    WeatherMetrics { humidity, wind_mph, feels_like_f, feels_like_source }
}

/// First whitespace-delimited token of e.g. `"10 mph"` or `"5 to 10 mph"`.
pub fn parse_wind_mph(text: Option<&str>) -> Option<f64> {
    text?.split_whitespace().next()?.parse().ok()
}

/// Value of the sample whose interval start is closest to `at`.
/// Ties go to the first sample encountered.
pub fn pick_grid_value(samples: &[GridSample], at: Option<DateTime<FixedOffset>>) -> Option<f64> {
    let target = at?;
    let mut best: Option<(i64, Option<f64>)> = None;

    for sample in samples {
        let Some(start) = sample.start() else {
            continue;
        };
        let delta = (start - target).num_milliseconds().abs();
        if best.is_none_or(|(best_delta, _)| delta < best_delta) {
            best = Some((delta, sample.value));
        }
    }

    best.and_then(|(_, value)| value)
}

/// Anything other than `"F"` is treated as Celsius.
pub fn to_fahrenheit(temperature: f64, unit: &str) -> f64 {
    if unit == "F" { temperature } else { celsius_to_fahrenheit(temperature) }
}

pub fn celsius_to_fahrenheit(c: f64) -> f64 {
    c * 9.0 / 5.0 + 32.0
}

pub fn fahrenheit_to_celsius(f: f64) -> f64 {
    (f - 32.0) * 5.0 / 9.0
}

/// NWS wind chill; defined for `temp_f <= 50` and `wind_mph >= 3`.
pub fn wind_chill_f(temp_f: f64, wind_mph: Option<f64>) -> Option<f64> {
    let v = wind_mph?;
    if temp_f > 50.0 || v < 3.0 {
        return None;
    }
    let v16 = v.powf(0.16);
    Some(35.74 + 0.6215 * temp_f - 35.75 * v16 + 0.4275 * temp_f * v16)
}

/// Rothfusz heat index regression; defined for `temp_f >= 80` and `humidity >= 40`.
pub fn heat_index_f(temp_f: f64, humidity: Option<f64>) -> Option<f64> {
    let rh = humidity?;
    if temp_f < 80.0 || rh < 40.0 {
        return None;
    }
    let t = temp_f;
    Some(
        -42.379 + 2.04901523 * t + 10.14333127 * rh
            - 0.22475541 * t * rh
            - 0.00683783 * t * t
            - 0.05481717 * rh * rh
            + 0.00122874 * t * t * rh
            + 0.00085282 * t * rh * rh
            - 0.00000199 * t * t * rh * rh,
    )
}
