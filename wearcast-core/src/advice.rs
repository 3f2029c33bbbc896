use crate::{
    metrics::{fahrenheit_to_celsius, to_fahrenheit},
    model::{ClothingAdvice, HourlyPeriod, WeatherMetrics, WeatherSnapshot},
    outfit::{OutfitRecommendationEngine, UserProfile, Weather},
};

pub const NO_PLACE_SUMMARY: &str = "Add a ZIP to see advice.";

/// Fixed-threshold clothing advice from the current period and metrics.
pub fn make_advice(current: Option<&HourlyPeriod>, metrics: &WeatherMetrics) -> ClothingAdvice {
    let Some(current) = current else {
        return ClothingAdvice { summary: NO_PLACE_SUMMARY.to_string(), details: Vec::new() };
    };

    let temp_f = to_fahrenheit(current.temperature, &current.temperature_unit);
    let feels_c = fahrenheit_to_celsius(metrics.feels_like_f.unwrap_or(temp_f));

    let summary = if feels_c <= 0.0 {
        "Heavy coat, warm base layer, gloves and a hat."
    } else if feels_c <= 10.0 {
        "Thick jacket and a scarf."
    } else if feels_c <= 20.0 {
        "Light jacket or sweatshirt."
    } else if feels_c <= 27.0 {
        "Short sleeves or a thin long-sleeve."
    } else {
        "Light, breathable clothes."
    };

    let mut details = Vec::new();
    if current.probability_of_precipitation.is_some_and(|pop| pop >= 50.0) {
        details.push("Bring an umbrella or a waterproof layer.".to_string());
    }
    if metrics.wind_mph.is_some_and(|wind| wind >= 15.0) {
        details.push("A windbreaker will help.".to_string());
    }
    if metrics.humidity.is_some_and(|h| h >= 70.0) && feels_c >= 24.0 {
        details.push("High humidity: choose moisture-wicking fabrics.".to_string());
    }

    ClothingAdvice { summary: summary.to_string(), details }
}

/// Advice for a snapshot: the outfit engine when a profile is given and
/// there is a current period, the fixed-threshold engine otherwise.
pub fn advise(snapshot: &WeatherSnapshot, profile: Option<&UserProfile>) -> ClothingAdvice {
    match (profile, Weather::from_snapshot(snapshot)) {
        (Some(profile), Some(weather)) => {
            OutfitRecommendationEngine::recommend(&weather, profile).into()
        }
        _ => make_advice(snapshot.current.as_ref(), &snapshot.metrics),
    }
}
