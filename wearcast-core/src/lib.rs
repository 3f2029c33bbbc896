//! Core library for the `wearcast` CLI.
//!
//! This crate defines:
//! - Configuration, saved places and the on-disk lookup cache
//! - The weather provider abstraction and its ZIP + NWS implementation
//! - Derived metrics (feels-like, humidity, wind) and clothing advice
//!
//! It is used by `wearcast-cli`, but can also be reused by other binaries or services.

pub mod advice;
pub mod cache;
pub mod config;
pub mod error;
pub mod metrics;
pub mod model;
pub mod outfit;
pub mod places;
pub mod provider;

pub use advice::{advise, make_advice};
pub use config::Config;
pub use error::WeatherError;
pub use model::{ClothingAdvice, Place, WeatherSnapshot};
pub use outfit::{OutfitRecommendation, OutfitRecommendationEngine, UserProfile, Weather};
pub use places::PlaceBook;
pub use provider::{WeatherProvider, provider_from_config};
