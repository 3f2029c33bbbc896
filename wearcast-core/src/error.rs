use thiserror::Error;

/// Errors surfaced by the geocoder, point resolver and aggregator.
///
/// Derivation and advice never fail; everything here comes from the network
/// boundary.
#[derive(Debug, Error)]
pub enum WeatherError {
    /// The postal-code lookup yielded no usable place.
    #[error("No place found for ZIP '{zip}'")]
    NotFound { zip: String },

    /// Upstream answered with HTTP status >= 400.
    #[error("Upstream request failed with status {status}: {}", truncate_body(body))]
    Upstream { status: u16, body: String },

    /// Response body did not match the expected shape.
    #[error("Failed to decode response from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    /// Transport-level failure (connect, timeout, body read).
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
}

impl WeatherError {
    /// HTTP status carried by an upstream failure, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            WeatherError::Upstream { status, .. } => Some(*status),
            _ => None,
        }
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.len() > MAX {
        let cut = (0..=MAX).rev().find(|i| body.is_char_boundary(*i)).unwrap_or(0);
        format!("{}...", &body[..cut])
    } else {
        body.to_string()
    }
}
