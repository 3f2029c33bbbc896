use anyhow::{Context, bail};
use clap::{Parser, Subcommand};
use inquire::{CustomType, Text};
use wearcast_core::{
    Config, OutfitRecommendationEngine, PlaceBook, UserProfile, Weather, WeatherProvider, advise,
    advice::NO_PLACE_SUMMARY, model::Place, provider_from_config,
};

use crate::output;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "wearcast", version, about = "Forecasts and what to wear for a US ZIP code")]
pub struct Cli {
    /// Log debug output to stderr.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Skip the on-disk geocode and points cache.
    #[arg(long, global = true)]
    pub no_cache: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Interactively set the user agent and outfit profile.
    Configure,

    /// Resolve a ZIP code and save it.
    Lookup {
        zip: String,
    },

    /// Show the forecast and clothing advice.
    Show {
        /// ZIP code; defaults to the most recently saved place.
        zip: Option<String>,

        /// Use the profile-aware outfit engine.
        #[arg(long)]
        outfit: bool,

        /// -2 (tolerates cold) to 2 (feels cold easily). Implies --outfit.
        #[arg(long, allow_hyphen_values = true)]
        cold_sensitivity: Option<i32>,

        /// Minutes spent outside commuting. Implies --outfit.
        #[arg(long)]
        commute: Option<u32>,

        /// Print the snapshot and advice as JSON.
        #[arg(long)]
        json: bool,
    },

    /// List saved places.
    Places,

    /// Remove a saved place.
    Forget {
        zip: String,
    },

    /// Run the outfit engine on given conditions, without network access.
    Outfit {
        /// Feels-like temperature in °C.
        #[arg(long, allow_hyphen_values = true)]
        feels_like: f64,

        /// Air temperature in °C; defaults to the feels-like value.
        #[arg(long, allow_hyphen_values = true)]
        temperature: Option<f64>,

        /// Wind speed in mph.
        #[arg(long, default_value_t = 0.0)]
        wind: f64,

        /// Chance of precipitation, 0.0 to 1.0.
        #[arg(long, default_value_t = 0.0)]
        precip: f64,

        /// Relative humidity in percent.
        #[arg(long, default_value_t = 0.0)]
        humidity: f64,

        #[arg(long, allow_hyphen_values = true)]
        cold_sensitivity: Option<i32>,

        #[arg(long)]
        commute: Option<u32>,
    },
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        let use_cache = !self.no_cache;

        match self.command {
            Command::Configure => configure()?,
            Command::Lookup { zip } => {
                let config = Config::load()?;
                let provider = provider_from_config(&config, use_cache)?;
                let place = remember(provider.as_ref(), &zip).await?;
                println!("{}", output::place_line(&place));
            }
            Command::Show { zip, outfit, cold_sensitivity, commute, json } => {
                let config = Config::load()?;
                let provider = provider_from_config(&config, use_cache)?;

                let place = match zip {
                    Some(zip) => remember(provider.as_ref(), &zip).await?,
                    None => match PlaceBook::load_default()?.most_recent() {
                        Some(place) => place.clone(),
                        None => bail!("{NO_PLACE_SUMMARY} Run `wearcast lookup <zip>` first."),
                    },
                };

                let snapshot = provider
                    .load_weather(&place)
                    .await
                    .with_context(|| format!("Failed to load weather for {}", place.label))?;

                let profile = (outfit || cold_sensitivity.is_some() || commute.is_some())
                    .then(|| profile_with(&config, cold_sensitivity, commute));
                let advice = advise(&snapshot, profile.as_ref());

                if json {
                    let report = output::ShowReport { snapshot: &snapshot, advice: &advice };
                    println!("{}", serde_json::to_string_pretty(&report)?);
                } else {
                    println!("{}\n", output::snapshot_text(&snapshot));
                    println!("{}", output::advice_text(&advice));
                }
            }
            Command::Places => {
                let book = PlaceBook::load_default()?;
                if book.is_empty() {
                    println!("No saved places.");
                }
                for place in book.iter() {
                    println!("{}", output::place_line(place));
                }
            }
            Command::Forget { zip } => {
                let mut book = PlaceBook::load_default()?;
                match book.remove(zip.trim()) {
                    Some(place) => {
                        book.save()?;
                        println!("Removed {}.", place.label);
                    }
                    None => bail!("No saved place with ZIP {zip}."),
                }
            }
            Command::Outfit {
                feels_like,
                temperature,
                wind,
                precip,
                humidity,
                cold_sensitivity,
                commute,
            } => {
                let config = Config::load()?;
                let weather = Weather {
                    temperature: temperature.unwrap_or(feels_like),
                    feels_like,
                    wind_speed: wind,
                    precipitation_probability: precip,
                    humidity,
                };
                let profile = profile_with(&config, cold_sensitivity, commute);
                let rec = OutfitRecommendationEngine::recommend(&weather, &profile);
                println!("{}", output::recommendation_text(&rec));
            }
        }

        Ok(())
    }
}

/// Configured profile with command-line overrides applied.
fn profile_with(config: &Config, cold_sensitivity: Option<i32>, commute: Option<u32>) -> UserProfile {
    let base = config.user_profile();
    UserProfile::new(
        cold_sensitivity.unwrap_or(base.cold_sensitivity),
        commute.unwrap_or(base.commute_minutes),
    )
}

/// Geocode `zip` and add it to the saved places if it's new.
async fn remember(provider: &dyn WeatherProvider, zip: &str) -> anyhow::Result<Place> {
    let place = provider.lookup_place(zip).await?;

    let mut book = PlaceBook::load_default()?;
    if book.add(place.clone()) {
        book.save()?;
        tracing::debug!(zip = %place.zip, "saved place");
    }

    Ok(book.get(&place.zip).cloned().unwrap_or(place))
}

fn configure() -> anyhow::Result<()> {
    let mut config = Config::load()?;

    let user_agent = Text::new("User agent (include a contact address):")
        .with_default(&config.user_agent)
        .prompt()?;

    let current = config.user_profile();
    let cold_sensitivity = CustomType::<i32>::new("Cold sensitivity (-2 to 2):")
        .with_default(current.cold_sensitivity)
        .with_error_message("Please enter a whole number")
        .prompt()?;

    let commute_minutes = CustomType::<u32>::new("Minutes outside on your commute:")
        .with_default(current.commute_minutes)
        .with_error_message("Please enter a whole number of minutes")
        .prompt()?;

    config.user_agent = user_agent;
    config.set_profile(UserProfile::new(cold_sensitivity, commute_minutes));
    config.save()?;

    println!("Saved configuration to {}", Config::config_file_path()?.display());
    Ok(())
}
