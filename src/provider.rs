//! Weather data providers.
//!
//! The core only talks to a [`WeatherProvider`]; transport, status handling
//! and timeouts belong to the implementation. [`OpenMeteoClient`] is the
//! production one.

use std::future::Future;
use std::time::Duration;

use anyhow::Result;
use reqwest::Client;
use serde::de::DeserializeOwned;

use crate::constants::USER_AGENT;
use crate::models::RawWeather;

/// Source of raw column-oriented weather data.
pub trait WeatherProvider: Send + Sync {
    /// Current conditions (`current` block) for the requested fields.
    fn current(
        &self,
        latitude: f64,
        longitude: f64,
        fields: &[&str],
    ) -> impl Future<Output = Result<RawWeather>> + Send;

    /// Forecast with `daily` and, when `hourly_fields` is non-empty, `hourly` blocks.
    fn forecast(
        &self,
        latitude: f64,
        longitude: f64,
        days: u32,
        daily_fields: &[&str],
        hourly_fields: &[&str],
    ) -> impl Future<Output = Result<RawWeather>> + Send;

    /// Daily historical reanalysis between two `YYYY-MM-DD` dates.
    fn archive(
        &self,
        latitude: f64,
        longitude: f64,
        start_date: &str,
        end_date: &str,
        daily_fields: &[&str],
    ) -> impl Future<Output = Result<RawWeather>> + Send;
}

/// Open-Meteo HTTP client
#[derive(Clone)]
pub struct OpenMeteoClient {
    client: Client,
    api_base: String,
    archive_url: String,
}

impl OpenMeteoClient {
    /// Client against the given forecast base and archive endpoint.
    pub fn with_endpoints(api_base: &str, archive_url: &str, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()?;

        Ok(Self {
            client,
            api_base: api_base.trim_end_matches('/').to_string(),
            archive_url: archive_url.to_string(),
        })
    }

    /// Makes an HTTP GET request and deserializes the JSON response
    async fn make_request<T: DeserializeOwned>(
        &self,
        url: &str,
        params: &[(&str, String)],
    ) -> Result<T> {
        tracing::debug!(url, ?params, "Requesting Open-Meteo");

        let response = self.client.get(url).query(params).send().await?;

        if !response.status().is_success() {
            anyhow::bail!("Open-Meteo request failed with status: {}", response.status());
        }

        let data = response.json::<T>().await?;
        Ok(data)
    }

    fn forecast_url(&self) -> String {
        format!("{}/forecast", self.api_base)
    }
}

fn location_params(latitude: f64, longitude: f64) -> Vec<(&'static str, String)> {
    vec![
        ("latitude", latitude.to_string()),
        ("longitude", longitude.to_string()),
        ("timezone", "auto".to_string()),
    ]
}

fn current_params(latitude: f64, longitude: f64, fields: &[&str]) -> Vec<(&'static str, String)> {
    let mut params = location_params(latitude, longitude);
    params.push(("current", fields.join(",")));
    params
}

/// Empty field lists leave their block out of the request.
fn forecast_params(
    latitude: f64,
    longitude: f64,
    days: u32,
    daily_fields: &[&str],
    hourly_fields: &[&str],
) -> Vec<(&'static str, String)> {
    let mut params = location_params(latitude, longitude);
    params.push(("forecast_days", days.to_string()));
    if !daily_fields.is_empty() {
        params.push(("daily", daily_fields.join(",")));
    }
    if !hourly_fields.is_empty() {
        params.push(("hourly", hourly_fields.join(",")));
    }
    params
}

fn archive_params(
    latitude: f64,
    longitude: f64,
    start_date: &str,
    end_date: &str,
    daily_fields: &[&str],
) -> Vec<(&'static str, String)> {
    let mut params = location_params(latitude, longitude);
    params.push(("start_date", start_date.to_string()));
    params.push(("end_date", end_date.to_string()));
    params.push(("daily", daily_fields.join(",")));
    params.push(("models", "era5".to_string()));
    params
}

impl WeatherProvider for OpenMeteoClient {
    async fn current(&self, latitude: f64, longitude: f64, fields: &[&str]) -> Result<RawWeather> {
        let params = current_params(latitude, longitude, fields);
        self.make_request(&self.forecast_url(), &params).await
    }

    async fn forecast(
        &self,
        latitude: f64,
        longitude: f64,
        days: u32,
        daily_fields: &[&str],
        hourly_fields: &[&str],
    ) -> Result<RawWeather> {
        let params = forecast_params(latitude, longitude, days, daily_fields, hourly_fields);
        self.make_request(&self.forecast_url(), &params).await
    }

    async fn archive(
        &self,
        latitude: f64,
        longitude: f64,
        start_date: &str,
        end_date: &str,
        daily_fields: &[&str],
    ) -> Result<RawWeather> {
        let params = archive_params(latitude, longitude, start_date, end_date, daily_fields);
        self.make_request(&self.archive_url, &params).await
    }
}
