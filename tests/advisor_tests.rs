//! Integration tests for the agricultural advisor.
//!
//! These drive `AgriAdvisor` end to end against an in-memory provider that
//! serves Open-Meteo-shaped payloads.

use std::sync::atomic::{AtomicUsize, Ordering};

use anyhow::Result;
use chrono::{TimeZone, Utc};
use serde_json::{json, Value};

use agri_weather_mcp::models::{AlertKind, RawWeather, Severity};
use agri_weather_mcp::region::{self, CustomBounds, RegionSelector};
use agri_weather_mcp::{AgriAdvisor, AgriError, FixedClock, Region, WeatherProvider};

struct StaticProvider {
    current: Value,
    forecast: Value,
    archive: Value,
    fail: bool,
    calls: AtomicUsize,
    last_days: AtomicUsize,
}

impl StaticProvider {
    fn new(current: Value, forecast: Value) -> Self {
        Self {
            current,
            forecast,
            archive: json!({}),
            fail: false,
            calls: AtomicUsize::new(0),
            last_days: AtomicUsize::new(0),
        }
    }

    fn failing() -> Self {
        Self {
            fail: true,
            ..Self::new(json!({}), json!({}))
        }
    }

    fn serve(&self, payload: &Value) -> Result<RawWeather> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            anyhow::bail!("Open-Meteo request failed with status: 503 Service Unavailable");
        }
        Ok(serde_json::from_value(payload.clone())?)
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl WeatherProvider for StaticProvider {
    async fn current(
        &self,
        _latitude: f64,
        _longitude: f64,
        _fields: &[&str],
    ) -> Result<RawWeather> {
        self.serve(&self.current)
    }

    async fn forecast(
        &self,
        _latitude: f64,
        _longitude: f64,
        days: u32,
        _daily_fields: &[&str],
        _hourly_fields: &[&str],
    ) -> Result<RawWeather> {
        self.last_days.store(days as usize, Ordering::SeqCst);
        self.serve(&self.forecast)
    }

    async fn archive(
        &self,
        _latitude: f64,
        _longitude: f64,
        _start_date: &str,
        _end_date: &str,
        _daily_fields: &[&str],
    ) -> Result<RawWeather> {
        self.serve(&self.archive)
    }
}

fn indonesia() -> Region {
    region::configure(RegionSelector::Named("indonesia".to_string())).unwrap()
}

fn clock() -> FixedClock {
    FixedClock(Utc.with_ymd_and_hms(2024, 1, 15, 8, 0, 0).unwrap())
}

fn current_payload(temperature: f64, humidity: f64, moisture: f64) -> Value {
    json!({
        "latitude": -6.2,
        "longitude": 106.8,
        "timezone": "Asia/Jakarta",
        "elevation": 8.0,
        "current": {
            "time": "2024-01-15T15:00",
            "temperature_2m": temperature,
            "relative_humidity_2m": humidity,
            "precipitation": 0.0,
            "weather_code": 1,
            "wind_speed_10m": 12.0,
            "wind_gusts_10m": 20.0,
            "soil_temperature_0cm": 31.0,
            "soil_moisture_0_to_1cm": moisture,
            "soil_moisture_1_to_3cm": 0.2
        }
    })
}

fn forecast_payload(precipitation: &[f64]) -> Value {
    let time: Vec<String> = (0..precipitation.len())
        .map(|i| format!("2024-01-{:02}", 15 + i))
        .collect();
    json!({
        "timezone": "Asia/Jakarta",
        "elevation": 8.0,
        "daily": {
            "time": time,
            "temperature_2m_max": [33.0, 32.5, 31.0],
            "temperature_2m_min": [24.0, 24.5, 23.0],
            "precipitation_sum": precipitation,
            "weather_code": [1, 2, 3, 61, 0, 0, 0]
        },
        "hourly": {
            "time": ["2024-01-15T00:00", "2024-01-15T01:00"],
            "temperature_2m": [25.0, 24.8]
        }
    })
}

#[tokio::test]
async fn test_report_combines_alerts_dry_spell_and_recommendations() {
    let provider = StaticProvider::new(
        current_payload(36.0, 60.0, 0.05),
        forecast_payload(&[0.0, 0.2, 0.0, 0.5, 0.0, 3.0, 0.0]),
    );
    let advisor = AgriAdvisor::with_clock(indonesia(), provider, clock());

    let report = advisor
        .build_report(-6.2, 106.8, "rice", "flowering")
        .await
        .unwrap();

    let kinds: Vec<AlertKind> = report.alerts.iter().map(|a| a.kind).collect();
    assert_eq!(
        kinds,
        vec![AlertKind::HeatStress, AlertKind::DroughtStress, AlertKind::DrySpell]
    );
    assert_eq!(report.alerts[2].severity, Severity::Medium);
    assert!(report.alerts[2].message.contains("5 days"));

    assert_eq!(report.recommendations.len(), 1);
    assert_eq!(report.recommendations[0].kind, "heat_stress_prevention");

    assert_eq!(report.crop_info.crop_type, "rice");
    assert_eq!(report.crop_info.growth_stage, "flowering");
    assert_eq!(report.location.latitude, -6.2);
    assert_eq!(report.analysis_time, clock().0);
}

#[tokio::test]
async fn test_report_requests_seven_day_forecast() {
    let provider = StaticProvider::new(current_payload(25.0, 60.0, 0.3), forecast_payload(&[]));
    let advisor = AgriAdvisor::with_clock(indonesia(), provider, clock());

    advisor.build_report(-6.2, 106.8, "rice", "planting").await.unwrap();

    assert_eq!(advisor.provider().last_days.load(Ordering::SeqCst), 7);
    assert_eq!(advisor.provider().calls(), 2);
}

#[tokio::test]
async fn test_report_is_idempotent() {
    let provider = StaticProvider::new(
        current_payload(25.0, 85.0, 0.45),
        forecast_payload(&[0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0]),
    );
    let advisor = AgriAdvisor::with_clock(indonesia(), provider, clock());

    let first = advisor.build_report(-6.2, 106.8, "corn", "vegetative").await.unwrap();
    let second = advisor.build_report(-6.2, 106.8, "corn", "vegetative").await.unwrap();

    assert_eq!(first, second);
    assert_eq!(
        serde_json::to_string(&first).unwrap(),
        serde_json::to_string(&second).unwrap()
    );
}

#[tokio::test]
async fn test_out_of_region_fails_before_fetch() {
    let provider = StaticProvider::new(current_payload(25.0, 60.0, 0.3), forecast_payload(&[]));
    let advisor = AgriAdvisor::with_clock(indonesia(), provider, clock());

    // Berlin
    let err = advisor
        .build_report(52.52, 13.41, "rice", "planting")
        .await
        .unwrap_err();

    assert!(matches!(err, AgriError::OutOfRegion { ref region } if region == "indonesia"));
    assert_eq!(advisor.provider().calls(), 0);
}

#[tokio::test]
async fn test_globally_invalid_coordinates_rejected_without_region() {
    let provider = StaticProvider::new(current_payload(25.0, 60.0, 0.3), forecast_payload(&[]));
    let advisor = AgriAdvisor::with_clock(Region::unrestricted(), provider, clock());

    let err = advisor.current_weather(95.0, 10.0, true).await.unwrap_err();

    assert!(matches!(err, AgriError::OutOfRegion { .. }));
    assert!(advisor.current_weather(52.52, 13.41, true).await.is_ok());
}

#[tokio::test]
async fn test_provider_failure_propagates() {
    let advisor = AgriAdvisor::with_clock(indonesia(), StaticProvider::failing(), clock());

    let err = advisor
        .build_report(-6.2, 106.8, "rice", "planting")
        .await
        .unwrap_err();

    assert!(matches!(err, AgriError::Provider(_)));
    assert!(err.to_string().contains("503"));
}

#[tokio::test]
async fn test_missing_fields_degrade_to_unknown() {
    let provider = StaticProvider::new(
        json!({ "current": { "time": "2024-01-15T15:00" } }),
        json!({ "daily": { "time": ["2024-01-15", "2024-01-16"] } }),
    );
    let advisor = AgriAdvisor::with_clock(indonesia(), provider, clock());

    let report = advisor
        .build_report(-6.2, 106.8, "vegetables", "planting")
        .await
        .unwrap();

    assert!(report.alerts.is_empty());
    assert!(report.recommendations.is_empty());
}

#[tokio::test]
async fn test_current_weather_normalizes_payload() {
    let provider = StaticProvider::new(current_payload(28.4, 70.0, 0.31), forecast_payload(&[]));
    let advisor = AgriAdvisor::with_clock(indonesia(), provider, clock());

    let report = advisor.current_weather(-6.2, 106.8, true).await.unwrap();

    assert_eq!(report.location.timezone.as_deref(), Some("Asia/Jakarta"));
    assert_eq!(report.location.elevation, Some(8.0));
    assert_eq!(report.current_time, "2024-01-15T15:00");
    assert_eq!(report.weather.temperature, Some(28.4));
    assert_eq!(report.weather.pressure, None);
    assert_eq!(report.conditions().shallowest_soil_moisture(), Some(0.31));

    let without_soil = advisor.current_weather(-6.2, 106.8, false).await.unwrap();
    assert!(without_soil.soil.is_none());
}

#[tokio::test]
async fn test_current_weather_json_shape() {
    let provider = StaticProvider::new(current_payload(28.4, 70.0, 0.31), forecast_payload(&[]));
    let advisor = AgriAdvisor::with_clock(indonesia(), provider, clock());

    let report = advisor.current_weather(-6.2, 106.8, true).await.unwrap();
    let value = serde_json::to_value(&report).unwrap();

    let mut keys: Vec<&str> = value.as_object().unwrap().keys().map(String::as_str).collect();
    keys.sort_unstable();
    assert_eq!(keys, vec!["current_time", "location", "soil", "weather"]);
    assert_eq!(value["current_time"], "2024-01-15T15:00");
    assert_eq!(value["weather"]["temperature"], 28.4);
    assert_eq!(value["weather"]["weather_code"], 1);
    assert_eq!(value["soil"]["moisture"]["0_1cm"], 0.31);
    assert_eq!(value["location"]["timezone"], "Asia/Jakarta");

    let bare = StaticProvider::new(json!({ "current": {} }), json!({}));
    let advisor = AgriAdvisor::with_clock(indonesia(), bare, clock());
    let report = advisor.current_weather(-6.2, 106.8, false).await.unwrap();
    let value = serde_json::to_value(&report).unwrap();
    assert_eq!(value["current_time"], "");
    assert!(value.get("soil").is_none());
    assert!(value["weather"]["temperature"].is_null());
}

#[tokio::test]
async fn test_forecast_aligns_short_columns_and_clamps_days() {
    let provider = StaticProvider::new(
        json!({}),
        forecast_payload(&[0.0, 1.5, 4.0, 0.0, 0.0]),
    );
    let advisor = AgriAdvisor::with_clock(indonesia(), provider, clock());

    let report = advisor.forecast(-6.2, 106.8, 30, true).await.unwrap();

    assert_eq!(report.forecast_days, 16);
    assert_eq!(report.daily_forecast.len(), 5);
    assert_eq!(report.daily_forecast[2].temperature_max, Some(31.0));
    assert_eq!(report.daily_forecast[3].temperature_max, None);
    assert_eq!(report.daily_forecast[3].weather_code, Some(61));
    assert_eq!(report.hourly_forecast.as_ref().map(Vec::len), Some(2));

    let daily_only = advisor.forecast(-6.2, 106.8, 0, false).await.unwrap();
    assert_eq!(daily_only.forecast_days, 1);
    assert!(daily_only.hourly_forecast.is_none());
}

#[tokio::test]
async fn test_historical_weather_validates_dates() {
    let mut provider = StaticProvider::new(json!({}), json!({}));
    provider.archive = json!({
        "daily": {
            "time": ["2023-12-01", "2023-12-02"],
            "temperature_2m_mean": [27.1, 26.8],
            "precipitation_sum": [12.0, 0.0]
        }
    });
    let advisor = AgriAdvisor::with_clock(indonesia(), provider, clock());

    let report = advisor
        .historical_weather(-6.2, 106.8, "2023-12-01", "2023-12-02")
        .await
        .unwrap();
    assert_eq!(report.historical_data.len(), 2);
    assert_eq!(report.historical_data[0].temperature_mean, Some(27.1));
    assert_eq!(report.period.end_date, "2023-12-02");

    let err = advisor
        .historical_weather(-6.2, 106.8, "2023-12-05", "2023-12-01")
        .await
        .unwrap_err();
    assert!(matches!(err, AgriError::InvalidParameter(_)));

    let err = advisor
        .historical_weather(-6.2, 106.8, "yesterday", "2023-12-01")
        .await
        .unwrap_err();
    assert!(matches!(err, AgriError::InvalidParameter(_)));
}

#[tokio::test]
async fn test_custom_region_gates_requests() {
    let region = region::configure(RegionSelector::Custom(CustomBounds {
        lat_min: Some(-5.0),
        lat_max: Some(5.0),
        lon_min: Some(100.0),
        lon_max: Some(120.0),
    }))
    .unwrap();
    let provider = StaticProvider::new(current_payload(25.0, 60.0, 0.3), forecast_payload(&[]));
    let advisor = AgriAdvisor::with_clock(region, provider, clock());

    assert!(advisor.soil_conditions(0.0, 110.0, 3).await.is_ok());
    assert!(matches!(
        advisor.evapotranspiration(-6.2, 106.8, 7).await,
        Err(AgriError::OutOfRegion { .. })
    ));
    assert_eq!(advisor.region().name, "Custom");
}
