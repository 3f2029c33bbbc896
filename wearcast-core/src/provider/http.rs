use reqwest::{
    Client,
    header::{ACCEPT, HeaderMap, HeaderValue},
};
use serde::de::DeserializeOwned;
use std::time::Duration;

use crate::error::WeatherError;

const ACCEPT_JSON: &str = "application/geo+json, application/json";

/// Shared HTTP client carrying the identifying user agent and JSON accept header.
#[derive(Debug, Clone)]
pub struct HttpClient {
    http: Client,
}

impl HttpClient {
    pub fn new(user_agent: &str, timeout: Duration) -> Result<Self, WeatherError> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static(ACCEPT_JSON));

        let http = Client::builder()
            .user_agent(user_agent)
            .default_headers(headers)
            .timeout(timeout)
            .build()?;

        Ok(Self { http })
    }

    /// GET `url` and decode the JSON body. Status >= 400 fails with the body attached.
    pub async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, WeatherError> {
        tracing::debug!(url, "GET");

        let res = self.http.get(url).send().await?;
        let status = res.status().as_u16();
        let body = res.text().await?;

        if status >= 400 {
            tracing::debug!(url, status, "upstream error");
            return Err(WeatherError::Upstream { status, body });
        }

        serde_json::from_str(&body)
            .map_err(|source| WeatherError::Decode { url: url.to_string(), source })
    }
}
