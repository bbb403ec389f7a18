/// User agent string for HTTP requests
pub const USER_AGENT: &str = "agri-weather-mcp/0.1.0";

/// Open-Meteo forecast API base URL
pub const OPEN_METEO_API_BASE: &str = "https://api.open-meteo.com/v1";

/// Open-Meteo historical archive endpoint
pub const OPEN_METEO_ARCHIVE_URL: &str = "https://archive-api.open-meteo.com/v1/archive";

/// Region used when no selector is configured
pub const DEFAULT_REGION: &str = "indonesia";

/// HTTP timeout for upstream requests, in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Open-Meteo serves at most 16 forecast days
pub const MAX_FORECAST_DAYS: u32 = 16;

/// Forecast horizon used for agricultural alert analysis
pub const ALERT_FORECAST_DAYS: u32 = 7;

// ============================================================================
// Open-Meteo field sets
// ============================================================================

pub const CURRENT_WEATHER_FIELDS: &[&str] = &[
    "temperature_2m",
    "relative_humidity_2m",
    "apparent_temperature",
    "precipitation",
    "weather_code",
    "cloud_cover",
    "pressure_msl",
    "wind_speed_10m",
    "wind_direction_10m",
    "wind_gusts_10m",
];

pub const CURRENT_SOIL_FIELDS: &[&str] = &[
    "soil_temperature_0cm",
    "soil_temperature_6cm",
    "soil_temperature_18cm",
    "soil_temperature_54cm",
    "soil_moisture_0_to_1cm",
    "soil_moisture_1_to_3cm",
    "soil_moisture_3_to_9cm",
    "soil_moisture_9_to_27cm",
];

pub const FORECAST_DAILY_FIELDS: &[&str] = &[
    "temperature_2m_max",
    "temperature_2m_min",
    "precipitation_sum",
    "precipitation_probability_max",
    "wind_speed_10m_max",
    "wind_gusts_10m_max",
    "weather_code",
    "sunrise",
    "sunset",
];

pub const FORECAST_HOURLY_FIELDS: &[&str] = &[
    "temperature_2m",
    "relative_humidity_2m",
    "precipitation",
    "weather_code",
    "wind_speed_10m",
    "soil_temperature_0cm",
    "soil_moisture_0_to_1cm",
    "evapotranspiration",
    "et0_fao_evapotranspiration",
];

pub const SOIL_HOURLY_FIELDS: &[&str] = &[
    "soil_temperature_0cm",
    "soil_temperature_6cm",
    "soil_temperature_18cm",
    "soil_temperature_54cm",
    "soil_moisture_0_to_1cm",
    "soil_moisture_1_to_3cm",
    "soil_moisture_3_to_9cm",
    "soil_moisture_9_to_27cm",
    "soil_moisture_27_to_81cm",
];

pub const ET_HOURLY_FIELDS: &[&str] = &[
    "evapotranspiration",
    "et0_fao_evapotranspiration",
    "vapour_pressure_deficit",
    "temperature_2m",
    "relative_humidity_2m",
    "wind_speed_10m",
    "shortwave_radiation",
];

pub const ET_DAILY_FIELDS: &[&str] = &["et0_fao_evapotranspiration"];

pub const HISTORICAL_DAILY_FIELDS: &[&str] = &[
    "temperature_2m_max",
    "temperature_2m_min",
    "temperature_2m_mean",
    "precipitation_sum",
    "wind_speed_10m_max",
    "wind_direction_10m_dominant",
];
