//! Human-readable rendering of places, snapshots and advice.

use serde::Serialize;
use std::fmt::Write;

use wearcast_core::{ClothingAdvice, OutfitRecommendation, Place, WeatherSnapshot};

/// Hourly rows printed by `show`; the full 24 are in `--json`.
const HOURS_SHOWN: usize = 12;

#[derive(Debug, Serialize)]
pub struct ShowReport<'a> {
    pub snapshot: &'a WeatherSnapshot,
    pub advice: &'a ClothingAdvice,
}

pub fn place_line(place: &Place) -> String {
    format!(
        "{} ({})  {:.4}, {:.4}",
        place.label, place.zip, place.latitude, place.longitude
    )
}

pub fn snapshot_text(snapshot: &WeatherSnapshot) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", place_line(&snapshot.place));

    match &snapshot.current {
        Some(now) => {
            let _ = writeln!(
                out,
                "Now: {:.0}°{}, {}",
                now.temperature, now.temperature_unit, now.short_forecast
            );
            let metrics = &snapshot.metrics;
            if let Some(feels) = metrics.feels_like_f {
                let _ = writeln!(out, "  Feels like {feels:.0}°F ({})", metrics.feels_like_source);
            }
            if let Some(wind) = metrics.wind_mph {
                let _ = writeln!(out, "  Wind {wind:.0} mph");
            }
            if let Some(humidity) = metrics.humidity {
                let _ = writeln!(out, "  Humidity {humidity:.0}%");
            }
            if let Some(pop) = now.probability_of_precipitation {
                let _ = writeln!(out, "  Precipitation {pop:.0}%");
            }
        }
        None => {
            let _ = writeln!(out, "Now: no current conditions");
        }
    }

    if !snapshot.alerts.is_empty() {
        let _ = writeln!(out, "\nAlerts:");
        for alert in &snapshot.alerts {
            let _ = writeln!(out, "  [{}] {}", alert.severity, alert.headline);
        }
    }

    if !snapshot.hourly.is_empty() {
        let _ = writeln!(out, "\nNext hours:");
        for hour in snapshot.hourly.iter().take(HOURS_SHOWN) {
            let _ = writeln!(
                out,
                "  {}  {:>4.0}°{}  {}",
                hour.start_time.format("%a %H:%M"),
                hour.temperature,
                hour.temperature_unit,
                hour.short_forecast
            );
        }
    }

    if !snapshot.daily.is_empty() {
        let _ = writeln!(out, "\nForecast:");
        for period in &snapshot.daily {
            let _ = writeln!(
                out,
                "  {:<16} {:>4.0}°{}  {}",
                period.name, period.temperature, period.temperature_unit, period.short_forecast
            );
        }
    }

    let _ = write!(out, "\nUpdated {}", snapshot.updated_at.format("%Y-%m-%d %H:%M UTC"));
    out
}

pub fn advice_text(advice: &ClothingAdvice) -> String {
    let mut out = format!("What to wear: {}", advice.summary);
    for detail in &advice.details {
        let _ = write!(out, "\n  - {detail}");
    }
    out
}

pub fn recommendation_text(rec: &OutfitRecommendation) -> String {
    let mut out = rec.summary.clone();
    if !rec.items.is_empty() {
        let names: Vec<&str> = rec.items.iter().map(|item| item.display_name()).collect();
        let _ = write!(out, "\nItems: {}", names.join(", "));
    }
    for why in &rec.explanations {
        let _ = write!(out, "\n  - {why}");
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Utc};
    use wearcast_core::{
        model::{AlertItem, FeelsLikeSource, ForecastPeriod, HourlyPeriod, WeatherMetrics},
        outfit::OutfitItem,
    };

    fn snapshot() -> WeatherSnapshot {
        let start = DateTime::parse_from_rfc3339("2024-01-15T08:00:00-07:00").unwrap();
        let hour = HourlyPeriod {
            start_time: start,
            temperature: 30.0,
            temperature_unit: "F".to_string(),
            wind_speed: "10 mph".to_string(),
            probability_of_precipitation: Some(20.0),
            short_forecast: "Light Snow".to_string(),
        };
        WeatherSnapshot {
            place: Place::new("80302", "Boulder, CO", 40.015, -105.2705),
            current: Some(hour.clone()),
            hourly: vec![hour; 20],
            daily: vec![ForecastPeriod {
                name: "Tonight".to_string(),
                start_time: start,
                temperature: 18.0,
                temperature_unit: "F".to_string(),
                short_forecast: "Snow Likely".to_string(),
            }],
            alerts: vec![AlertItem {
                event: "Winter Storm Warning".to_string(),
                headline: "Winter Storm Warning until 6 PM".to_string(),
                severity: "Severe".to_string(),
                effective: None,
                expires: None,
            }],
            metrics: WeatherMetrics {
                humidity: Some(45.0),
                wind_mph: Some(10.0),
                feels_like_f: Some(21.25),
                feels_like_source: FeelsLikeSource::WindChill,
            },
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn place_line_shows_label_zip_and_coordinates() {
        let place = Place::new("80302", "Boulder, CO", 40.015, -105.2705);
        assert_eq!(place_line(&place), "Boulder, CO (80302)  40.0150, -105.2705");
    }

    #[test]
    fn snapshot_text_includes_metrics_alerts_and_forecast() {
        let text = snapshot_text(&snapshot());

        assert!(text.contains("Now: 30°F, Light Snow"));
        assert!(text.contains("Feels like 21°F (wind-chill)"));
        assert!(text.contains("Humidity 45%"));
        assert!(text.contains("[Severe] Winter Storm Warning until 6 PM"));
        assert!(text.contains("Tonight"));
        assert_eq!(text.matches("Light Snow").count(), 1 + HOURS_SHOWN);
    }

    #[test]
    fn snapshot_without_current_says_so() {
        let mut snap = snapshot();
        snap.current = None;
        snap.hourly.clear();

        let text = snapshot_text(&snap);
        assert!(text.contains("no current conditions"));
        assert!(!text.contains("Next hours"));
    }

    #[test]
    fn advice_lists_details() {
        let advice = ClothingAdvice {
            summary: "Warm coat, hat, and gloves.".to_string(),
            details: vec!["Bring an umbrella.".to_string()],
        };
        assert_eq!(
            advice_text(&advice),
            "What to wear: Warm coat, hat, and gloves.\n  - Bring an umbrella."
        );
    }

    #[test]
    fn recommendation_lists_items() {
        let rec = OutfitRecommendation {
            items: vec![OutfitItem::Umbrella],
            summary: "Umbrella.".to_string(),
            explanations: vec!["Rain is likely.".to_string()],
        };
        let text = recommendation_text(&rec);
        assert!(text.starts_with("Umbrella."));
        assert!(text.contains("Items: umbrella"));
        assert!(text.ends_with("  - Rain is likely."));
    }

    #[test]
    fn report_serializes_both_parts() {
        let snap = snapshot();
        let advice = ClothingAdvice { summary: "Layers.".to_string(), details: vec![] };
        let value = serde_json::to_value(ShowReport { snapshot: &snap, advice: &advice }).unwrap();

        assert_eq!(value["advice"]["summary"], "Layers.");
        assert_eq!(value["snapshot"]["metrics"]["feels_like_source"], "wind-chill");
        assert_eq!(value["snapshot"]["hourly"].as_array().unwrap().len(), 20);
    }
}
