//! Threshold alerts over current conditions.
//!
//! Every rule runs on every evaluation and rules never suppress each other.
//! Output order is the rule order below, not severity order. A measurement
//! the upstream did not report never fires its rule.

use crate::models::{Alert, AlertKind, CurrentConditions, Severity};

pub const HEAT_STRESS_CELSIUS: f64 = 35.0;
pub const COLD_STRESS_CELSIUS: f64 = 15.0;
pub const HEAVY_RAIN_MM: f64 = 20.0;
pub const DROUGHT_MOISTURE: f64 = 0.10;
pub const WATERLOGGED_MOISTURE: f64 = 0.40;
pub const STRONG_GUST_KMH: f64 = 50.0;

struct ThresholdRule {
    kind: AlertKind,
    severity: Severity,
    /// Returns the alert message when the rule fires.
    check: fn(&CurrentConditions) -> Option<String>,
    recommendations: &'static [&'static str],
}

impl ThresholdRule {
    fn apply(&self, current: &CurrentConditions) -> Option<Alert> {
        (self.check)(current).map(|message| Alert {
            kind: self.kind,
            severity: self.severity,
            message,
            recommendations: self.recommendations.iter().map(|r| r.to_string()).collect(),
        })
    }
}

const RULES: [ThresholdRule; 6] = [
    ThresholdRule {
        kind: AlertKind::HeatStress,
        severity: Severity::High,
        check: heat_stress,
        recommendations: &[
            "Increase irrigation frequency",
            "Provide shade if possible",
            "Monitor plants for wilting",
        ],
    },
    ThresholdRule {
        kind: AlertKind::ColdStress,
        severity: Severity::Medium,
        check: cold_stress,
        recommendations: &[
            "Consider protective covering",
            "Delay planting if in planning stage",
        ],
    },
    ThresholdRule {
        kind: AlertKind::HeavyRain,
        severity: Severity::Medium,
        check: heavy_rain,
        recommendations: &[
            "Ensure proper drainage",
            "Delay field operations",
            "Monitor for fungal diseases",
        ],
    },
    ThresholdRule {
        kind: AlertKind::DroughtStress,
        severity: Severity::High,
        check: drought_stress,
        recommendations: &[
            "Immediate irrigation required",
            "Check irrigation system",
            "Consider mulching",
        ],
    },
    ThresholdRule {
        kind: AlertKind::Waterlogged,
        severity: Severity::Medium,
        check: waterlogged,
        recommendations: &[
            "Improve drainage",
            "Avoid heavy machinery",
            "Monitor for root diseases",
        ],
    },
    ThresholdRule {
        kind: AlertKind::StrongWind,
        severity: Severity::High,
        check: strong_wind,
        recommendations: &[
            "Secure tall crops",
            "Delay spraying operations",
            "Check for physical damage",
        ],
    },
];

fn heat_stress(current: &CurrentConditions) -> Option<String> {
    let temp = current.temperature.filter(|t| *t > HEAT_STRESS_CELSIUS)?;
    Some(format!(
        "High temperature alert: {temp:.0}°C. Risk of heat stress for crops."
    ))
}

fn cold_stress(current: &CurrentConditions) -> Option<String> {
    let temp = current.temperature.filter(|t| *t < COLD_STRESS_CELSIUS)?;
    Some(format!(
        "Low temperature alert: {temp:.0}°C. Potential cold stress for tropical crops."
    ))
}

fn heavy_rain(current: &CurrentConditions) -> Option<String> {
    let precip = current.precipitation.filter(|p| *p > HEAVY_RAIN_MM)?;
    Some(format!(
        "Heavy rainfall detected: {precip:.1}mm. Risk of waterlogging."
    ))
}

fn drought_stress(current: &CurrentConditions) -> Option<String> {
    let moisture = current
        .shallowest_soil_moisture()
        .filter(|m| *m < DROUGHT_MOISTURE)?;
    Some(format!(
        "Low soil moisture: {moisture:.3} m³/m³. Irrigation needed."
    ))
}

fn waterlogged(current: &CurrentConditions) -> Option<String> {
    let moisture = current
        .shallowest_soil_moisture()
        .filter(|m| *m > WATERLOGGED_MOISTURE)?;
    Some(format!(
        "High soil moisture: {moisture:.3} m³/m³. Risk of waterlogging."
    ))
}

fn strong_wind(current: &CurrentConditions) -> Option<String> {
    let gusts = current.wind_gusts.filter(|g| *g > STRONG_GUST_KMH)?;
    Some(format!(
        "Strong wind gusts: {gusts:.0} km/h. Risk of crop damage."
    ))
}

/// Runs heat, cold, rain, drought, waterlog and wind rules in that order.
pub fn evaluate(current: &CurrentConditions) -> Vec<Alert> {
    RULES.iter().filter_map(|rule| rule.apply(current)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{SoilMoisture, SoilSnapshot};

    fn with_moisture(moisture: f64) -> Option<SoilSnapshot> {
        Some(SoilSnapshot {
            moisture: SoilMoisture {
                depth_0_1cm: Some(moisture),
                ..Default::default()
            },
            ..Default::default()
        })
    }

    fn kinds(alerts: &[Alert]) -> Vec<AlertKind> {
        alerts.iter().map(|a| a.kind).collect()
    }

    #[test]
    fn test_heat_and_drought_co_fire_in_order() {
        let current = CurrentConditions {
            temperature: Some(36.0),
            soil: with_moisture(0.05),
            ..Default::default()
        };

        let alerts = evaluate(&current);

        assert_eq!(kinds(&alerts), vec![AlertKind::HeatStress, AlertKind::DroughtStress]);
        assert!(alerts.iter().all(|a| a.severity == Severity::High));
        assert_eq!(
            alerts[0].message,
            "High temperature alert: 36°C. Risk of heat stress for crops."
        );
        assert_eq!(
            alerts[1].message,
            "Low soil moisture: 0.050 m³/m³. Irrigation needed."
        );
    }

    #[test]
    fn test_unknown_measurements_never_fire() {
        let alerts = evaluate(&CurrentConditions::default());

        assert!(alerts.is_empty());
    }

    #[test]
    fn test_mild_conditions_produce_no_alerts() {
        let current = CurrentConditions {
            temperature: Some(28.0),
            precipitation: Some(2.0),
            wind_gusts: Some(20.0),
            soil: with_moisture(0.25),
            ..Default::default()
        };

        assert!(evaluate(&current).is_empty());
    }

    #[test]
    fn test_thresholds_are_strict() {
        let current = CurrentConditions {
            temperature: Some(35.0),
            precipitation: Some(20.0),
            wind_gusts: Some(50.0),
            soil: with_moisture(0.40),
            ..Default::default()
        };

        assert!(evaluate(&current).is_empty());

        let cold_edge = CurrentConditions {
            temperature: Some(15.0),
            soil: with_moisture(0.10),
            ..Default::default()
        };

        assert!(evaluate(&cold_edge).is_empty());
    }

    #[test]
    fn test_cold_rain_waterlog_wind() {
        let current = CurrentConditions {
            temperature: Some(12.4),
            precipitation: Some(25.3),
            wind_gusts: Some(62.0),
            soil: with_moisture(0.45),
            ..Default::default()
        };

        let alerts = evaluate(&current);

        assert_eq!(
            kinds(&alerts),
            vec![
                AlertKind::ColdStress,
                AlertKind::HeavyRain,
                AlertKind::Waterlogged,
                AlertKind::StrongWind,
            ]
        );
        assert_eq!(alerts[0].severity, Severity::Medium);
        assert!(alerts[0].message.contains("12°C"));
        assert!(alerts[2].message.contains("0.450"));
        assert_eq!(alerts[3].severity, Severity::High);
        assert_eq!(alerts[3].recommendations.len(), 3);
    }

    #[test]
    fn test_soil_alerts_need_soil_data() {
        let current = CurrentConditions {
            temperature: Some(25.0),
            soil: None,
            ..Default::default()
        };

        assert!(evaluate(&current).is_empty());
    }
}
