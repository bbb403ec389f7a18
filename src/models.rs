use std::collections::HashMap;

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

// ============================================================================
// Open-Meteo API Models
// ============================================================================

/// Raw Open-Meteo response. Every block is optional so that partial payloads
/// still deserialize; missing data surfaces later as unknown values.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RawWeather {
    #[serde(default)]
    pub timezone: Option<String>,
    #[serde(default)]
    pub elevation: Option<f64>,
    #[serde(default)]
    pub current: Option<Map<String, Value>>,
    #[serde(default)]
    pub hourly: Option<RawSeries>,
    #[serde(default)]
    pub daily: Option<RawSeries>,
}

/// Column-oriented time series: a time index plus one array per field.
///
/// Columns are kept as raw JSON so a malformed column degrades to unknown
/// values instead of failing the whole payload.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RawSeries {
    #[serde(default)]
    pub time: Vec<String>,
    #[serde(flatten)]
    pub columns: HashMap<String, Value>,
}

// ============================================================================
// Normalized Weather Models
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Location {
    pub latitude: f64,
    pub longitude: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timezone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub elevation: Option<f64>,
}

impl Location {
    pub fn at(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
            timezone: None,
            elevation: None,
        }
    }

    pub fn from_raw(latitude: f64, longitude: f64, raw: &RawWeather) -> Self {
        Self {
            latitude,
            longitude,
            timezone: Some(raw.timezone.clone().unwrap_or_default()),
            elevation: Some(raw.elevation.unwrap_or(0.0)),
        }
    }
}

/// Soil temperature (°C) keyed by depth.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SoilTemperature {
    pub surface: Option<f64>,
    #[serde(rename = "6cm")]
    pub depth_6cm: Option<f64>,
    #[serde(rename = "18cm")]
    pub depth_18cm: Option<f64>,
    #[serde(rename = "54cm")]
    pub depth_54cm: Option<f64>,
}

/// Volumetric soil moisture (m³/m³) keyed by depth band.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SoilMoisture {
    #[serde(rename = "0_1cm")]
    pub depth_0_1cm: Option<f64>,
    #[serde(rename = "1_3cm")]
    pub depth_1_3cm: Option<f64>,
    #[serde(rename = "3_9cm")]
    pub depth_3_9cm: Option<f64>,
    #[serde(rename = "9_27cm")]
    pub depth_9_27cm: Option<f64>,
    #[serde(rename = "27_81cm", skip_serializing_if = "Option::is_none")]
    pub depth_27_81cm: Option<f64>,
}

impl SoilMoisture {
    pub fn shallowest(&self) -> Option<f64> {
        self.depth_0_1cm
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SoilSnapshot {
    pub temperature: SoilTemperature,
    pub moisture: SoilMoisture,
}

/// Current conditions at a point. `None` means the upstream did not report
/// the value; it is never treated as zero.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CurrentConditions {
    pub timestamp: Option<String>,
    pub temperature: Option<f64>,
    pub humidity: Option<f64>,
    pub apparent_temperature: Option<f64>,
    pub precipitation: Option<f64>,
    pub weather_code: Option<i64>,
    pub cloud_cover: Option<f64>,
    pub pressure: Option<f64>,
    pub wind_speed: Option<f64>,
    pub wind_direction: Option<f64>,
    pub wind_gusts: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub soil: Option<SoilSnapshot>,
}

impl CurrentConditions {
    pub fn shallowest_soil_moisture(&self) -> Option<f64> {
        self.soil.as_ref().and_then(|soil| soil.moisture.shallowest())
    }
}

/// The weather part of a current reading, without timestamp or soil.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct WeatherSnapshot {
    pub temperature: Option<f64>,
    pub humidity: Option<f64>,
    pub apparent_temperature: Option<f64>,
    pub precipitation: Option<f64>,
    pub weather_code: Option<i64>,
    pub cloud_cover: Option<f64>,
    pub pressure: Option<f64>,
    pub wind_speed: Option<f64>,
    pub wind_direction: Option<f64>,
    pub wind_gusts: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CurrentWeatherReport {
    pub location: Location,
    /// Empty when upstream did not report a time.
    pub current_time: String,
    pub weather: WeatherSnapshot,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub soil: Option<SoilSnapshot>,
}

impl CurrentWeatherReport {
    pub fn new(location: Location, conditions: CurrentConditions) -> Self {
        Self {
            location,
            current_time: conditions.timestamp.unwrap_or_default(),
            weather: WeatherSnapshot {
                temperature: conditions.temperature,
                humidity: conditions.humidity,
                apparent_temperature: conditions.apparent_temperature,
                precipitation: conditions.precipitation,
                weather_code: conditions.weather_code,
                cloud_cover: conditions.cloud_cover,
                pressure: conditions.pressure,
                wind_speed: conditions.wind_speed,
                wind_direction: conditions.wind_direction,
                wind_gusts: conditions.wind_gusts,
            },
            soil: conditions.soil,
        }
    }

    /// Flat view of the reading, as the alert rules consume it.
    pub fn conditions(&self) -> CurrentConditions {
        let weather = &self.weather;
        CurrentConditions {
            timestamp: (!self.current_time.is_empty()).then(|| self.current_time.clone()),
            temperature: weather.temperature,
            humidity: weather.humidity,
            apparent_temperature: weather.apparent_temperature,
            precipitation: weather.precipitation,
            weather_code: weather.weather_code,
            cloud_cover: weather.cloud_cover,
            pressure: weather.pressure,
            wind_speed: weather.wind_speed,
            wind_direction: weather.wind_direction,
            wind_gusts: weather.wind_gusts,
            soil: self.soil.clone(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ForecastDay {
    pub date: String,
    pub temperature_max: Option<f64>,
    pub temperature_min: Option<f64>,
    pub precipitation: Option<f64>,
    pub precipitation_probability: Option<f64>,
    pub wind_speed_max: Option<f64>,
    pub weather_code: Option<i64>,
    pub sunrise: Option<String>,
    pub sunset: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct HourlyForecast {
    pub time: String,
    pub temperature: Option<f64>,
    pub humidity: Option<f64>,
    pub precipitation: Option<f64>,
    pub wind_speed: Option<f64>,
    pub soil_temperature: Option<f64>,
    pub soil_moisture: Option<f64>,
    pub evapotranspiration: Option<f64>,
    pub et0_fao: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ForecastReport {
    pub location: Location,
    pub forecast_days: u32,
    pub daily_forecast: Vec<ForecastDay>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hourly_forecast: Option<Vec<HourlyForecast>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SoilCondition {
    pub time: String,
    pub temperature: SoilTemperature,
    pub moisture: SoilMoisture,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SoilReport {
    pub location: Location,
    pub forecast_days: u32,
    pub soil_conditions: Vec<SoilCondition>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DailyEvapotranspiration {
    pub date: String,
    pub et0_fao: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct HourlyEvapotranspiration {
    pub time: String,
    pub evapotranspiration: Option<f64>,
    pub et0_fao: Option<f64>,
    pub vpd: Option<f64>,
    pub temperature: Option<f64>,
    pub humidity: Option<f64>,
    pub wind_speed: Option<f64>,
    pub solar_radiation: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EvapotranspirationReport {
    pub location: Location,
    pub forecast_days: u32,
    pub daily_et: Vec<DailyEvapotranspiration>,
    pub hourly_et: Vec<HourlyEvapotranspiration>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct HistoricalDay {
    pub date: String,
    pub temperature_max: Option<f64>,
    pub temperature_min: Option<f64>,
    pub temperature_mean: Option<f64>,
    pub precipitation: Option<f64>,
    pub wind_speed_max: Option<f64>,
    pub wind_direction: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Period {
    pub start_date: String,
    pub end_date: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistoricalReport {
    pub location: Location,
    pub period: Period,
    pub historical_data: Vec<HistoricalDay>,
}

// ============================================================================
// Agricultural Alert Models
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertKind {
    HeatStress,
    ColdStress,
    HeavyRain,
    DroughtStress,
    Waterlogged,
    StrongWind,
    DrySpell,
}

impl AlertKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::HeatStress => "heat_stress",
            Self::ColdStress => "cold_stress",
            Self::HeavyRain => "heavy_rain",
            Self::DroughtStress => "drought_stress",
            Self::Waterlogged => "waterlogged",
            Self::StrongWind => "strong_wind",
            Self::DrySpell => "dry_spell",
        }
    }
}

/// Alert priority tag. Does not affect ordering or suppression.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Alert {
    #[serde(rename = "type")]
    pub kind: AlertKind,
    pub severity: Severity,
    pub message: String,
    pub recommendations: Vec<String>,
}

/// Advisory guidance. Unlike [`Alert`] it carries no severity.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recommendation {
    #[serde(rename = "type")]
    pub kind: String,
    pub message: String,
    pub action: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CropInfo {
    #[serde(rename = "type")]
    pub crop_type: String,
    pub growth_stage: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AlertReport {
    pub location: Location,
    pub crop_info: CropInfo,
    pub alerts: Vec<Alert>,
    pub recommendations: Vec<Recommendation>,
    pub analysis_time: DateTime<Utc>,
}

// ============================================================================
// MCP Tool Request Models
// ============================================================================

fn default_true() -> bool {
    true
}

fn default_forecast_days() -> u32 {
    5
}

fn default_soil_days() -> u32 {
    3
}

fn default_et_days() -> u32 {
    7
}

fn default_crop_type() -> String {
    "rice".to_string()
}

fn default_growth_stage() -> String {
    "vegetative".to_string()
}

#[derive(Debug, Deserialize, Serialize, JsonSchema)]
pub struct GetCurrentWeatherRequest {
    pub latitude: f64,
    pub longitude: f64,
    /// Include soil temperature and moisture by depth
    #[serde(default = "default_true")]
    pub include_soil_data: bool,
}

#[derive(Debug, Deserialize, Serialize, JsonSchema)]
pub struct GetForecastRequest {
    pub latitude: f64,
    pub longitude: f64,
    /// Number of forecast days (1-16)
    #[serde(default = "default_forecast_days")]
    pub days: u32,
    #[serde(default = "default_true")]
    pub include_hourly: bool,
}

#[derive(Debug, Deserialize, Serialize, JsonSchema)]
pub struct GetAgriculturalAlertsRequest {
    pub latitude: f64,
    pub longitude: f64,
    /// Crop type, e.g. rice, corn, vegetables
    #[serde(default = "default_crop_type")]
    pub crop_type: String,
    /// Growth stage, e.g. planting, vegetative, flowering
    #[serde(default = "default_growth_stage")]
    pub growth_stage: String,
}

#[derive(Debug, Deserialize, Serialize, JsonSchema)]
pub struct GetSoilConditionsRequest {
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default = "default_soil_days")]
    pub forecast_days: u32,
}

#[derive(Debug, Deserialize, Serialize, JsonSchema)]
pub struct GetEvapotranspirationRequest {
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default = "default_et_days")]
    pub days: u32,
}

#[derive(Debug, Deserialize, Serialize, JsonSchema)]
pub struct GetHistoricalWeatherRequest {
    pub latitude: f64,
    pub longitude: f64,
    /// Start date, YYYY-MM-DD
    pub start_date: String,
    /// End date, YYYY-MM-DD
    pub end_date: String,
}
