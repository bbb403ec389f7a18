//! Conversion of raw Open-Meteo blocks into the typed weather models.

use serde_json::{Map, Value};

use crate::constants::{
    ET_DAILY_FIELDS, ET_HOURLY_FIELDS, FORECAST_DAILY_FIELDS, FORECAST_HOURLY_FIELDS,
    HISTORICAL_DAILY_FIELDS, SOIL_HOURLY_FIELDS,
};
use crate::models::{
    CurrentConditions, DailyEvapotranspiration, ForecastDay, HistoricalDay,
    HourlyEvapotranspiration, HourlyForecast, RawSeries, SoilCondition, SoilMoisture,
    SoilSnapshot, SoilTemperature,
};
use crate::series::{align_series, as_integer, SeriesRecord};

fn number(map: &Map<String, Value>, field: &str) -> Option<f64> {
    map.get(field).and_then(Value::as_f64)
}

fn soil_temperature(get: impl Fn(&str) -> Option<f64>) -> SoilTemperature {
    SoilTemperature {
        surface: get("soil_temperature_0cm"),
        depth_6cm: get("soil_temperature_6cm"),
        depth_18cm: get("soil_temperature_18cm"),
        depth_54cm: get("soil_temperature_54cm"),
    }
}

fn soil_moisture(get: impl Fn(&str) -> Option<f64>) -> SoilMoisture {
    SoilMoisture {
        depth_0_1cm: get("soil_moisture_0_to_1cm"),
        depth_1_3cm: get("soil_moisture_1_to_3cm"),
        depth_3_9cm: get("soil_moisture_3_to_9cm"),
        depth_9_27cm: get("soil_moisture_9_to_27cm"),
        depth_27_81cm: get("soil_moisture_27_to_81cm"),
    }
}

/// Reads the flat `current` block. Missing or non-numeric fields stay unknown.
pub fn current_conditions(
    current: Option<&Map<String, Value>>,
    include_soil: bool,
) -> CurrentConditions {
    let empty = Map::new();
    let current = current.unwrap_or(&empty);
    let get = |field: &str| number(current, field);

    CurrentConditions {
        timestamp: current.get("time").and_then(Value::as_str).map(str::to_string),
        temperature: get("temperature_2m"),
        humidity: get("relative_humidity_2m"),
        apparent_temperature: get("apparent_temperature"),
        precipitation: get("precipitation"),
        weather_code: current.get("weather_code").and_then(as_integer),
        cloud_cover: get("cloud_cover"),
        pressure: get("pressure_msl"),
        wind_speed: get("wind_speed_10m"),
        wind_direction: get("wind_direction_10m"),
        wind_gusts: get("wind_gusts_10m"),
        soil: include_soil.then(|| SoilSnapshot {
            temperature: soil_temperature(get),
            moisture: soil_moisture(get),
        }),
    }
}

pub fn daily_forecast(daily: Option<&RawSeries>) -> Vec<ForecastDay> {
    align_series(daily, FORECAST_DAILY_FIELDS)
        .into_iter()
        .map(|r| ForecastDay {
            temperature_max: r.number("temperature_2m_max"),
            temperature_min: r.number("temperature_2m_min"),
            precipitation: r.number("precipitation_sum"),
            precipitation_probability: r.number("precipitation_probability_max"),
            wind_speed_max: r.number("wind_speed_10m_max"),
            weather_code: r.integer("weather_code"),
            sunrise: r.text("sunrise"),
            sunset: r.text("sunset"),
            date: r.time,
        })
        .collect()
}

pub fn hourly_forecast(hourly: Option<&RawSeries>) -> Vec<HourlyForecast> {
    align_series(hourly, FORECAST_HOURLY_FIELDS)
        .into_iter()
        .map(|r| HourlyForecast {
            temperature: r.number("temperature_2m"),
            humidity: r.number("relative_humidity_2m"),
            precipitation: r.number("precipitation"),
            wind_speed: r.number("wind_speed_10m"),
            soil_temperature: r.number("soil_temperature_0cm"),
            soil_moisture: r.number("soil_moisture_0_to_1cm"),
            evapotranspiration: r.number("evapotranspiration"),
            et0_fao: r.number("et0_fao_evapotranspiration"),
            time: r.time,
        })
        .collect()
}

pub fn soil_conditions(hourly: Option<&RawSeries>) -> Vec<SoilCondition> {
    align_series(hourly, SOIL_HOURLY_FIELDS)
        .into_iter()
        .map(|r: SeriesRecord| SoilCondition {
            temperature: soil_temperature(|f| r.number(f)),
            moisture: soil_moisture(|f| r.number(f)),
            time: r.time,
        })
        .collect()
}

pub fn daily_evapotranspiration(daily: Option<&RawSeries>) -> Vec<DailyEvapotranspiration> {
    align_series(daily, ET_DAILY_FIELDS)
        .into_iter()
        .map(|r| DailyEvapotranspiration {
            et0_fao: r.number("et0_fao_evapotranspiration"),
            date: r.time,
        })
        .collect()
}

pub fn hourly_evapotranspiration(hourly: Option<&RawSeries>) -> Vec<HourlyEvapotranspiration> {
    align_series(hourly, ET_HOURLY_FIELDS)
        .into_iter()
        .map(|r| HourlyEvapotranspiration {
            evapotranspiration: r.number("evapotranspiration"),
            et0_fao: r.number("et0_fao_evapotranspiration"),
            vpd: r.number("vapour_pressure_deficit"),
            temperature: r.number("temperature_2m"),
            humidity: r.number("relative_humidity_2m"),
            wind_speed: r.number("wind_speed_10m"),
            solar_radiation: r.number("shortwave_radiation"),
            time: r.time,
        })
        .collect()
}

pub fn historical_days(daily: Option<&RawSeries>) -> Vec<HistoricalDay> {
    align_series(daily, HISTORICAL_DAILY_FIELDS)
        .into_iter()
        .map(|r| HistoricalDay {
            temperature_max: r.number("temperature_2m_max"),
            temperature_min: r.number("temperature_2m_min"),
            temperature_mean: r.number("temperature_2m_mean"),
            precipitation: r.number("precipitation_sum"),
            wind_speed_max: r.number("wind_speed_10m_max"),
            wind_direction: r.number("wind_direction_10m_dominant"),
            date: r.time,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_current_conditions_with_soil() {
        let current: Map<String, Value> = serde_json::from_value(json!({
            "time": "2024-01-15T12:00",
            "temperature_2m": 28.5,
            "relative_humidity_2m": 75,
            "weather_code": 2,
            "wind_gusts_10m": 18.4,
            "soil_temperature_0cm": 29.1,
            "soil_moisture_0_to_1cm": 0.32,
        }))
        .unwrap();

        let conditions = current_conditions(Some(&current), true);

        assert_eq!(conditions.timestamp.as_deref(), Some("2024-01-15T12:00"));
        assert_eq!(conditions.temperature, Some(28.5));
        assert_eq!(conditions.humidity, Some(75.0));
        assert_eq!(conditions.weather_code, Some(2));
        assert_eq!(conditions.precipitation, None);
        let soil = conditions.soil.as_ref().unwrap();
        assert_eq!(soil.temperature.surface, Some(29.1));
        assert_eq!(soil.temperature.depth_54cm, None);
        assert_eq!(conditions.shallowest_soil_moisture(), Some(0.32));
    }

    #[test]
    fn test_current_weather_code_as_float() {
        let current: Map<String, Value> =
            serde_json::from_value(json!({ "weather_code": 3.0 })).unwrap();

        let conditions = current_conditions(Some(&current), false);

        assert_eq!(conditions.weather_code, Some(3));
    }

    #[test]
    fn test_current_conditions_without_block() {
        let conditions = current_conditions(None, false);

        assert_eq!(conditions, CurrentConditions::default());
    }

    #[test]
    fn test_daily_forecast_from_partial_series() {
        let daily: RawSeries = serde_json::from_value(json!({
            "time": ["2024-01-15", "2024-01-16"],
            "temperature_2m_max": [32.0, 31.5],
            "precipitation_sum": [0.0],
            "sunrise": ["2024-01-15T05:58", "2024-01-16T05:58"],
        }))
        .unwrap();

        let days = daily_forecast(Some(&daily));

        assert_eq!(days.len(), 2);
        assert_eq!(days[0].date, "2024-01-15");
        assert_eq!(days[0].precipitation, Some(0.0));
        assert_eq!(days[1].precipitation, None);
        assert_eq!(days[1].temperature_max, Some(31.5));
        assert_eq!(days[1].sunrise.as_deref(), Some("2024-01-16T05:58"));
        assert_eq!(days[1].sunset, None);
    }

    #[test]
    fn test_soil_conditions_include_deep_moisture() {
        let hourly: RawSeries = serde_json::from_value(json!({
            "time": ["2024-01-15T00:00"],
            "soil_temperature_6cm": [27.0],
            "soil_moisture_27_to_81cm": [0.38],
        }))
        .unwrap();

        let rows = soil_conditions(Some(&hourly));

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].temperature.depth_6cm, Some(27.0));
        assert_eq!(rows[0].moisture.depth_27_81cm, Some(0.38));
        assert_eq!(rows[0].moisture.depth_0_1cm, None);
    }
}
