//! Rule-based outfit recommendations with a per-user profile.
//!
//! Rules run in a fixed order: base layer by effective temperature, then the
//! wind, precipitation and commute modifiers. Every rule that fires leaves one
//! explanation behind.

use serde::{Deserialize, Serialize};

use crate::{
    metrics::{fahrenheit_to_celsius, to_fahrenheit},
    model::{ClothingAdvice, WeatherSnapshot},
};

/// Conditions in the units the engine reasons in.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Weather {
    /// Celsius
    pub temperature: f64,
    /// Celsius
    pub feels_like: f64,
    /// mph
    pub wind_speed: f64,
    /// 0.0-1.0
    pub precipitation_probability: f64,
    /// 0-100
    pub humidity: f64,
}

impl Weather {
    /// Convert the current period of a snapshot. `None` without a current period.
    pub fn from_snapshot(snapshot: &WeatherSnapshot) -> Option<Self> {
        let current = snapshot.current.as_ref()?;
        let temp_f = to_fahrenheit(current.temperature, &current.temperature_unit);
        let metrics = &snapshot.metrics;

        Some(Self {
            temperature: fahrenheit_to_celsius(temp_f),
            feels_like: fahrenheit_to_celsius(metrics.feels_like_f.unwrap_or(temp_f)),
            wind_speed: metrics.wind_mph.unwrap_or(0.0),
            precipitation_probability: current.probability_of_precipitation.unwrap_or(0.0) / 100.0,
            humidity: metrics.humidity.unwrap_or(0.0),
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserProfile {
    /// -2 (tolerates cold) to +2 (feels cold easily).
    pub cold_sensitivity: i32,
    pub commute_minutes: u32,
}

impl UserProfile {
    pub const MIN_SENSITIVITY: i32 = -2;
    pub const MAX_SENSITIVITY: i32 = 2;

    /// Sensitivity outside [-2, 2] is clamped.
    pub fn new(cold_sensitivity: i32, commute_minutes: u32) -> Self {
        Self {
            cold_sensitivity: cold_sensitivity.clamp(Self::MIN_SENSITIVITY, Self::MAX_SENSITIVITY),
            commute_minutes,
        }
    }
}

impl Default for UserProfile {
    fn default() -> Self {
        Self { cold_sensitivity: 0, commute_minutes: 30 }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutfitItem {
    HeavyWinterCoat,
    WinterCoat,
    InsulatedJacket,
    LightJacket,
    NoOuterwear,
    WarmBaseLayer,
    TShirt,
    LongSleeveShirt,
    Sweater,
    Gloves,
    Hat,
    Scarf,
    Umbrella,
    WaterproofBoots,
    Shoes,
}

impl OutfitItem {
    pub fn display_name(&self) -> &'static str {
        match self {
            OutfitItem::HeavyWinterCoat => "heavier winter coat",
            OutfitItem::WinterCoat => "winter coat",
            OutfitItem::InsulatedJacket => "insulated jacket",
            OutfitItem::LightJacket => "light jacket",
            OutfitItem::NoOuterwear => "no outerwear",
            OutfitItem::WarmBaseLayer => "warm base layer",
            OutfitItem::TShirt => "t-shirt",
            OutfitItem::LongSleeveShirt => "long-sleeve shirt",
            OutfitItem::Sweater => "sweater",
            OutfitItem::Gloves => "gloves",
            OutfitItem::Hat => "hat",
            OutfitItem::Scarf => "scarf",
            OutfitItem::Umbrella => "umbrella",
            OutfitItem::WaterproofBoots => "waterproof boots",
            OutfitItem::Shoes => "shoes",
        }
    }
}

impl std::fmt::Display for OutfitItem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutfitRecommendation {
    pub items: Vec<OutfitItem>,
    pub summary: String,
    pub explanations: Vec<String>,
}

impl From<OutfitRecommendation> for ClothingAdvice {
    fn from(rec: OutfitRecommendation) -> Self {
        ClothingAdvice { summary: rec.summary, details: rec.explanations }
    }
}

/// Items and explanations accumulated while the rules run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OutfitDraft {
    pub items: Vec<OutfitItem>,
    pub explanations: Vec<String>,
}

impl OutfitDraft {
    fn push(&mut self, items: &[OutfitItem], explanation: &str) {
        self.items.extend_from_slice(items);
        self.explanations.push(explanation.to_string());
    }

    fn replace(&mut self, from: OutfitItem, to: OutfitItem) -> bool {
        match self.items.iter().position(|item| *item == from) {
            Some(idx) => {
                self.items[idx] = to;
                true
            }
            None => false,
        }
    }
}

pub struct OutfitRecommendationEngine;

impl OutfitRecommendationEngine {
    pub fn recommend(weather: &Weather, profile: &UserProfile) -> OutfitRecommendation {
        let mut draft = OutfitDraft::default();

        let effective = Self::effective_temperature(weather, profile);
        Self::apply_base_layer(&mut draft, effective);
        Self::apply_wind(&mut draft, weather);
        Self::apply_precipitation(&mut draft, weather);
        Self::apply_commute(&mut draft, profile);

        let summary = summarize(&draft.items);
        OutfitRecommendation { items: draft.items, summary, explanations: draft.explanations }
    }

    /// Feels-like shifted 2 C per sensitivity level; sensitive users get a lower value.
    pub fn effective_temperature(weather: &Weather, profile: &UserProfile) -> f64 {
        weather.feels_like - f64::from(profile.cold_sensitivity) * 2.0
    }

    pub fn apply_base_layer(draft: &mut OutfitDraft, effective: f64) {
        use OutfitItem::*;

        if effective < -10.0 {
            draft.push(
                &[HeavyWinterCoat, WarmBaseLayer, Gloves, Hat],
                "Temperatures below -10°C require heavy insulation and extremity protection.",
            );
        } else if effective < 0.0 {
            draft.push(
                &[WinterCoat, WarmBaseLayer],
                "Freezing temperatures require a winter coat and thermal layers.",
            );
        } else if effective < 10.0 {
            draft.push(&[InsulatedJacket], "Cool temperatures between 0-10°C call for an insulated jacket.");
        } else {
            draft.push(&[LightJacket], "Mild temperatures allow for lighter outerwear.");
        }
    }

    /// Adds a scarf above 10 mph. Never adds a second one.
    pub fn apply_wind(draft: &mut OutfitDraft, weather: &Weather) {
        if weather.wind_speed > 10.0 && !draft.items.contains(&OutfitItem::Scarf) {
            draft.push(&[OutfitItem::Scarf], "Wind speed over 10mph suggests adding a scarf or windbreaker.");
        }
    }

    pub fn apply_precipitation(draft: &mut OutfitDraft, weather: &Weather) {
        if weather.precipitation_probability > 0.4 {
            draft.push(
                &[OutfitItem::WaterproofBoots, OutfitItem::Umbrella],
                "High chance of precipitation (>40%) requires waterproof footwear and an umbrella.",
            );
        }
    }

    /// Long commutes bump the outerwear one step warmer, in place.
    pub fn apply_commute(draft: &mut OutfitDraft, profile: &UserProfile) {
        if profile.commute_minutes <= 40 {
            return;
        }
        if draft.replace(OutfitItem::LightJacket, OutfitItem::InsulatedJacket) {
            draft
                .explanations
                .push("Long commute (>40m) suggests upgrading to a warmer jacket.".to_string());
        } else if draft.replace(OutfitItem::InsulatedJacket, OutfitItem::WinterCoat) {
            draft
                .explanations
                .push("Long commute (>40m) suggests upgrading to a full winter coat.".to_string());
        }
    }
}

pub const EMPTY_OUTFIT_SUMMARY: &str = "Wear whatever you like.";

/// Oxford-comma sentence from the item list, e.g.
/// "Heavier winter coat, warm base layer, gloves, and a hat."
///
/// Plurality is guessed from a trailing `s` in the display name.
pub fn summarize(items: &[OutfitItem]) -> String {
    let names: Vec<&str> = items
        .iter()
        .filter(|item| **item != OutfitItem::NoOuterwear)
        .map(OutfitItem::display_name)
        .collect();

    match names.as_slice() {
        [] => EMPTY_OUTFIT_SUMMARY.to_string(),
        [only] => format!("A {only}."),
        [first, second] => format!("{} and a {second}.", title_case(first)),
        [first, middle @ .., last] => {
            let mut sentence = capitalize_first(first);
            for name in middle {
                sentence.push_str(", ");
                sentence.push_str(name);
            }
            sentence.push_str(", and ");
            if !last.ends_with('s') {
                sentence.push_str("a ");
            }
            sentence.push_str(last);
            sentence.push('.');
            sentence
        }
    }
}

/// Uppercase the first letter of every word; space and hyphen split words.
fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut at_word_start = true;
    for c in s.chars() {
        if at_word_start {
            out.extend(c.to_uppercase());
        } else {
            out.push(c);
        }
        at_word_start = c.is_whitespace() || c == '-';
    }
    out
}

fn capitalize_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{FeelsLikeSource, HourlyPeriod, Place, WeatherMetrics};
    use chrono::{DateTime, Utc};
    use OutfitItem::*;

    fn weather(feels_like: f64, wind_speed: f64, precipitation_probability: f64) -> Weather {
        Weather { temperature: feels_like, feels_like, wind_speed, precipitation_probability, humidity: 0.0 }
    }

    #[test]
    fn bitter_cold_with_wind() {
        let rec = OutfitRecommendationEngine::recommend(&weather(-13.0, 12.0, 0.0), &UserProfile::new(0, 30));

        assert_eq!(rec.items, vec![HeavyWinterCoat, WarmBaseLayer, Gloves, Hat, Scarf]);
        assert_eq!(rec.summary, "Heavier winter coat, warm base layer, gloves, hat, and a scarf.");
        assert_eq!(rec.explanations.len(), 2);
    }

    #[test]
    fn mild_rain_long_commute() {
        let rec = OutfitRecommendationEngine::recommend(&weather(12.0, 5.0, 0.5), &UserProfile::new(0, 50));

        assert_eq!(rec.items, vec![InsulatedJacket, WaterproofBoots, Umbrella]);
        assert_eq!(
            rec.explanations.last().map(String::as_str),
            Some("Long commute (>40m) suggests upgrading to a warmer jacket.")
        );
    }

    #[test]
    fn band_edges() {
        let cases = [
            (-10.01, vec![HeavyWinterCoat, WarmBaseLayer, Gloves, Hat]),
            (-10.0, vec![WinterCoat, WarmBaseLayer]),
            (-0.01, vec![WinterCoat, WarmBaseLayer]),
            (0.0, vec![InsulatedJacket]),
            (9.99, vec![InsulatedJacket]),
            (10.0, vec![LightJacket]),
        ];
        for (effective, expected) in cases {
            let mut draft = OutfitDraft::default();
            OutfitRecommendationEngine::apply_base_layer(&mut draft, effective);
            assert_eq!(draft.items, expected, "effective {effective}");
            assert_eq!(draft.explanations.len(), 1);
        }
    }

    #[test]
    fn cold_sensitivity_shifts_bands() {
        let w = weather(10.0, 0.0, 0.0);

        assert_eq!(OutfitRecommendationEngine::effective_temperature(&w, &UserProfile::new(2, 0)), 6.0);
        assert_eq!(OutfitRecommendationEngine::effective_temperature(&w, &UserProfile::new(-2, 0)), 14.0);

        let sensitive = OutfitRecommendationEngine::recommend(&w, &UserProfile::new(2, 0));
        assert_eq!(sensitive.items, vec![InsulatedJacket]);
    }

    #[test]
    fn sensitivity_is_clamped() {
        assert_eq!(UserProfile::new(7, 10).cold_sensitivity, 2);
        assert_eq!(UserProfile::new(-9, 10).cold_sensitivity, -2);
    }

    #[test]
    fn wind_modifier_is_idempotent() {
        let w = weather(5.0, 25.0, 0.0);
        let mut draft = OutfitDraft::default();

        OutfitRecommendationEngine::apply_wind(&mut draft, &w);
        OutfitRecommendationEngine::apply_wind(&mut draft, &w);

        assert_eq!(draft.items, vec![Scarf]);
        assert_eq!(draft.explanations.len(), 1);
    }

    #[test]
    fn wind_and_precip_thresholds_are_strict() {
        let rec = OutfitRecommendationEngine::recommend(&weather(15.0, 10.0, 0.4), &UserProfile::new(0, 40));

        assert_eq!(rec.items, vec![LightJacket]);
        assert_eq!(rec.summary, "A light jacket.");
    }

    #[test]
    fn commute_upgrades_insulated_to_winter_coat() {
        let rec = OutfitRecommendationEngine::recommend(&weather(5.0, 0.0, 0.0), &UserProfile::new(0, 41));

        assert_eq!(rec.items, vec![WinterCoat]);
        assert_eq!(
            rec.explanations,
            vec![
                "Cool temperatures between 0-10°C call for an insulated jacket.",
                "Long commute (>40m) suggests upgrading to a full winter coat.",
            ]
        );
    }

    #[test]
    fn commute_leaves_coats_alone() {
        let rec = OutfitRecommendationEngine::recommend(&weather(-5.0, 0.0, 0.0), &UserProfile::new(0, 90));

        assert_eq!(rec.items, vec![WinterCoat, WarmBaseLayer]);
        assert_eq!(rec.explanations.len(), 1);
    }

    #[test]
    fn summary_shapes() {
        assert_eq!(summarize(&[]), EMPTY_OUTFIT_SUMMARY);
        assert_eq!(summarize(&[NoOuterwear]), EMPTY_OUTFIT_SUMMARY);
        assert_eq!(summarize(&[Hat]), "A hat.");
        assert_eq!(summarize(&[LightJacket, Scarf]), "Light Jacket and a scarf.");
        assert_eq!(summarize(&[LongSleeveShirt, Umbrella]), "Long-Sleeve Shirt and a umbrella.");
        assert_eq!(summarize(&[NoOuterwear, Sweater, Umbrella]), "Sweater and a umbrella.");
        assert_eq!(summarize(&[WinterCoat, Hat, Gloves]), "Winter coat, hat, and gloves.");
        assert_eq!(
            summarize(&[InsulatedJacket, WaterproofBoots, Umbrella]),
            "Insulated jacket, waterproof boots, and a umbrella."
        );
    }

    fn snapshot(current: Option<HourlyPeriod>, metrics: WeatherMetrics) -> WeatherSnapshot {
        WeatherSnapshot {
            place: Place::new("80302", "Boulder, CO", 40.015, -105.2705),
            hourly: current.iter().cloned().collect(),
            current,
            daily: Vec::new(),
            alerts: Vec::new(),
            metrics,
            updated_at: Utc::now(),
        }
    }

    fn period(temperature: f64, unit: &str, pop: Option<f64>) -> HourlyPeriod {
        HourlyPeriod {
            start_time: DateTime::parse_from_rfc3339("2024-01-15T08:00:00-07:00").unwrap(),
            temperature,
            temperature_unit: unit.to_string(),
            wind_speed: "calm".to_string(),
            probability_of_precipitation: pop,
            short_forecast: "Cloudy".to_string(),
        }
    }

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn from_snapshot_without_current_is_none() {
        assert_eq!(Weather::from_snapshot(&snapshot(None, WeatherMetrics::default())), None);
    }

    #[test]
    fn from_snapshot_celsius_period_with_missing_metrics() {
        let snap = snapshot(Some(period(10.0, "C", None)), WeatherMetrics::default());

        let w = Weather::from_snapshot(&snap).unwrap();

        assert!(close(w.temperature, 10.0), "temperature {}", w.temperature);
        // no feels-like: falls back to the current temperature
        assert!(close(w.feels_like, 10.0), "feels_like {}", w.feels_like);
        assert_eq!(w.wind_speed, 0.0);
        assert_eq!(w.humidity, 0.0);
        assert_eq!(w.precipitation_probability, 0.0);
    }

    #[test]
    fn from_snapshot_fahrenheit_period_with_metrics() {
        let metrics = WeatherMetrics {
            humidity: Some(45.0),
            wind_mph: Some(12.0),
            feels_like_f: Some(14.0),
            feels_like_source: FeelsLikeSource::WindChill,
        };
        let snap = snapshot(Some(period(23.0, "F", Some(60.0))), metrics);

        let w = Weather::from_snapshot(&snap).unwrap();

        assert!(close(w.temperature, -5.0), "temperature {}", w.temperature);
        assert!(close(w.feels_like, -10.0), "feels_like {}", w.feels_like);
        assert_eq!(w.wind_speed, 12.0);
        assert_eq!(w.humidity, 45.0);
        assert!(close(w.precipitation_probability, 0.6));
    }

    #[test]
    fn title_case_only_for_two_items() {
        assert_eq!(title_case("heavier winter coat"), "Heavier Winter Coat");
        assert_eq!(title_case("t-shirt"), "T-Shirt");
        assert_eq!(title_case(""), "");
        assert_eq!(summarize(&[LightJacket, Hat, Scarf]), "Light jacket, hat, and a scarf.");
    }

    #[test]
    fn recommendation_maps_to_advice() {
        let rec = OutfitRecommendationEngine::recommend(&weather(20.0, 0.0, 0.0), &UserProfile::default());
        let advice: ClothingAdvice = rec.clone().into();

        assert_eq!(advice.summary, rec.summary);
        assert_eq!(advice.details, rec.explanations);
    }
}
