/*
 *  weather.rs
 *
 *  RigaClock - analog clock, weather and holidays
 *	(c) 2020-26 Stuart Hunter
 *
 *	This program is free software: you can redistribute it and/or modify
 *	it under the terms of the GNU General Public License as published by
 *	the Free Software Foundation, either version 3 of the License, or
 *	(at your option) any later version.
 *
 *	This program is distributed in the hope that it will be useful,
 *	but WITHOUT ANY WARRANTY; without even the implied warranty of
 *	MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
 *	GNU General Public License for more details.
 *
 *	See <http://www.gnu.org/licenses/> to get a copy of the GNU General
 *	Public License.
 *
 */
use log::{debug, info, warn};
use reqwest::{Client, header};
use serde_json::Value;
use std::fmt::{self, Display};
use std::time::Duration;
use thiserror::Error;

pub const DEFAULT_BASE_URL: &str = "http://api.openweathermap.org/data/2.5/weather";
pub const DEFAULT_CITY: &str = "Riga";

pub const WEATHER_UNAVAILABLE: &str = "Weather data unavailable";
pub const WEATHER_INVALID_FORMAT: &str = "Invalid weather data format";

/// Errors raised while talking to the weather API.
#[derive(Debug, Error)]
pub enum WeatherApiError {
    #[error("HTTP request error: {0}")]
    HttpRequestError(#[from] reqwest::Error),
    #[error("JSON deserialization error: {0}")]
    DeserializationError(#[from] serde_json::Error),
    #[error("Missing weather data: {0}")]
    MissingData(&'static str),
    #[error("HTTP client setup failed: {0}")]
    ClientError(String),
}

/// Latest weather result. Each refresh replaces the previous one.
#[derive(Debug, Clone, PartialEq)]
pub enum WeatherSample {
    Reading { temperature: f64, description: String },
    /// Transport failure or non-2xx status.
    Unavailable,
    /// Response did not have the expected shape.
    InvalidFormat,
    /// Anything else, with the cause.
    Failed(String),
}

impl WeatherSample {
    pub fn is_reading(&self) -> bool {
        matches!(self, WeatherSample::Reading { .. })
    }
}

impl Display for WeatherSample {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WeatherSample::Reading { temperature, description } => {
                f.write_str(&format_reading(*temperature, description))
            }
            WeatherSample::Unavailable => f.write_str(WEATHER_UNAVAILABLE),
            WeatherSample::InvalidFormat => f.write_str(WEATHER_INVALID_FORMAT),
            WeatherSample::Failed(cause) => write!(f, "Error: {}", cause),
        }
    }
}

impl From<WeatherApiError> for WeatherSample {
    fn from(err: WeatherApiError) -> Self {
        match err {
            WeatherApiError::HttpRequestError(_) => WeatherSample::Unavailable,
            WeatherApiError::DeserializationError(_) | WeatherApiError::MissingData(_) => {
                WeatherSample::InvalidFormat
            }
            WeatherApiError::ClientError(msg) => WeatherSample::Failed(msg),
        }
    }
}

/// "7°C, Light rain": temperature rounded half-to-even, description capitalized.
pub fn format_reading(temperature: f64, description: &str) -> String {
    format!("{}°C, {}", temperature.round_ties_even() as i64, capitalize(description))
}

/// First character upper-cased, the rest lower-cased.
pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

/// Pull `main.temp` and `weather[0].description` out of a response body.
pub fn parse_current(body: &str) -> Result<WeatherSample, WeatherApiError> {
    let json: Value = serde_json::from_str(body)?;
    let temperature = json["main"]["temp"]
        .as_f64()
        .ok_or(WeatherApiError::MissingData("main.temp"))?;
    let description = json["weather"][0]["description"]
        .as_str()
        .ok_or(WeatherApiError::MissingData("weather[0].description"))?;
    Ok(WeatherSample::Reading {
        temperature,
        description: description.to_string(),
    })
}

/// Current-conditions client for one fixed city.
#[derive(Debug, Clone)]
pub struct WeatherClient {
    client: Client,
    base_url: String,
    api_key: String,
    city: String,
}

impl WeatherClient {
    pub fn new(base_url: &str, api_key: &str, city: &str) -> Result<Self, WeatherApiError> {
        const VERSION: &str = concat!(env!("CARGO_PKG_NAME"), " v", env!("CARGO_PKG_VERSION"));

        let mut headers = header::HeaderMap::new();
        headers.insert("User-Agent", header::HeaderValue::from_static(VERSION));
        headers.insert("Accept", header::HeaderValue::from_static("application/json"));
        headers.insert("Connection", header::HeaderValue::from_static("close"));

        let client = Client::builder()
            .connect_timeout(Duration::from_secs(5))
            .default_headers(headers)
            .timeout(Duration::from_secs(10))
            .build()
            .map_err(|e| WeatherApiError::ClientError(e.to_string()))?;

        Ok(Self::with_client(client, base_url, api_key, city))
    }

    /// Use a preconfigured reqwest client (proxy settings, tests).
    pub fn with_client(client: Client, base_url: &str, api_key: &str, city: &str) -> Self {
        if api_key.is_empty() {
            warn!("No weather API key configured, requests will be rejected");
        }
        Self {
            client,
            base_url: base_url.to_string(),
            api_key: api_key.to_string(),
            city: city.to_string(),
        }
    }

    pub fn city(&self) -> &str {
        &self.city
    }

    /// One request; errors are classified by `WeatherSample::from`.
    pub async fn fetch(&self) -> Result<WeatherSample, WeatherApiError> {
        info!("Fetching weather data for {}...", self.city);
        let body = self
            .client
            .get(&self.base_url)
            .query(&[
                ("q", self.city.as_str()),
                ("appid", self.api_key.as_str()),
                ("units", "metric"),
            ])
            .send()
            .await?
            .error_for_status()? // none 2xx raise
            .text()
            .await?;
        debug!("Weather response: {} bytes", body.len());
        parse_current(&body)
    }

    /// Never fails: errors become the matching marker sample.
    pub async fn sample(&self) -> WeatherSample {
        match self.fetch().await {
            Ok(sample) => {
                info!("Weather data fetched successfully: {}", sample);
                sample
            }
            Err(e) => {
                warn!("Weather fetch failed: {}", e);
                WeatherSample::from(e)
            }
        }
    }
}

/// Formatted current weather for `city` from the default endpoint.
pub async fn get_weather(api_key: &str, city: &str) -> String {
    get_weather_from(DEFAULT_BASE_URL, api_key, city).await
}

/// As `get_weather`, against an explicit endpoint.
pub async fn get_weather_from(base_url: &str, api_key: &str, city: &str) -> String {
    match WeatherClient::new(base_url, api_key, city) {
        Ok(client) => client.sample().await.to_string(),
        Err(e) => WeatherSample::from(e).to_string(),
    }
}
