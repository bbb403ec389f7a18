use crate::models::{AlertReport, ForecastReport};

/// Formats an agricultural alert report into a human-readable string
pub fn format_alert_report(report: &AlertReport) -> String {
    let mut output = format!(
        "Agricultural Alerts\nLocation: {:.4}, {:.4}\nCrop: {} ({})\nAnalysis time: {}\n\n",
        report.location.latitude,
        report.location.longitude,
        report.crop_info.crop_type,
        report.crop_info.growth_stage,
        report.analysis_time.to_rfc3339()
    );

    if report.alerts.is_empty() {
        output.push_str("No active agricultural alerts.\n");
    } else {
        output.push_str("Alerts:\n");
        for (i, alert) in report.alerts.iter().enumerate() {
            output.push_str(&format!(
                "  {}. [{}] {}: {}\n",
                i + 1,
                alert.severity.as_str().to_uppercase(),
                alert.kind.as_str(),
                alert.message
            ));
            for step in &alert.recommendations {
                output.push_str(&format!("     - {}\n", step));
            }
        }
    }

    if !report.recommendations.is_empty() {
        output.push_str("\nRecommendations:\n");
        for rec in &report.recommendations {
            output.push_str(&format!(
                "  {}: {}\n     Action: {}\n",
                rec.kind, rec.message, rec.action
            ));
        }
    }
    output
}

/// Formats the daily part of a forecast report into a human-readable string
pub fn format_forecast(forecast: &ForecastReport) -> String {
    let mut output = format!(
        "Weather Forecast (Open-Meteo)\nLocation: {:.4}, {:.4}\nTimezone: {}\n\n",
        forecast.location.latitude,
        forecast.location.longitude,
        forecast.location.timezone.as_deref().unwrap_or("unknown")
    );

    for day in &forecast.daily_forecast {
        let conditions = day
            .weather_code
            .map(weather_code_to_description)
            .unwrap_or("Unknown");
        output.push_str(&format!(
            "{}:\n  Temperature: {} - {}\n  Conditions: {}\n  Wind Speed: {}\n  Precipitation: {} ({} chance)\n\n",
            day.date,
            reading(day.temperature_min, "\u{00b0}C"),
            reading(day.temperature_max, "\u{00b0}C"),
            conditions,
            reading(day.wind_speed_max, " km/h"),
            reading(day.precipitation, " mm"),
            reading(day.precipitation_probability, "%"),
        ));
    }
    output
}

fn reading(value: Option<f64>, unit: &str) -> String {
    match value {
        Some(v) => format!("{:.1}{}", v, unit),
        None => "n/a".to_string(),
    }
}

/// Converts WMO weather code to human-readable description
pub fn weather_code_to_description(code: i64) -> &'static str {
    match code {
        0 => "Clear sky",
        1 => "Mainly clear",
        2 => "Partly cloudy",
        3 => "Overcast",
        45 | 48 => "Foggy",
        51 | 53 | 55 => "Drizzle",
        56 | 57 => "Freezing drizzle",
        61 | 63 | 65 => "Rain",
        66 | 67 => "Freezing rain",
        71 | 73 | 75 => "Snow",
        77 => "Snow grains",
        80 | 81 | 82 => "Rain showers",
        85 | 86 => "Snow showers",
        95 => "Thunderstorm",
        96 | 99 => "Thunderstorm with hail",
        _ => "Unknown",
    }
}
