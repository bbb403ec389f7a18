//! Leading dry-spell detection over a daily forecast.

use crate::models::{Alert, AlertKind, ForecastDay, Severity};

/// Days examined by default.
pub const DEFAULT_WINDOW: usize = 7;

/// Daily precipitation below this counts as a dry day.
pub const DRY_DAY_MM: f64 = 1.0;

/// Minimum leading run that raises an alert.
pub const MIN_DRY_RUN: usize = 5;

// A day with unknown precipitation ends the run.
fn is_dry(day: &ForecastDay) -> bool {
    day.precipitation.is_some_and(|p| p < DRY_DAY_MM)
}

/// Length of the uninterrupted dry run starting at day 0, capped at `window`.
/// A dry day after a wet day does not count.
pub fn leading_dry_days(forecast: &[ForecastDay], window: usize) -> usize {
    forecast.iter().take(window).take_while(|d| is_dry(d)).count()
}

pub fn scan(forecast: &[ForecastDay], window: usize) -> Option<Alert> {
    let dry_days = leading_dry_days(forecast, window);
    if dry_days < MIN_DRY_RUN {
        return None;
    }

    Some(Alert {
        kind: AlertKind::DrySpell,
        severity: Severity::Medium,
        message: format!(
            "Extended dry period forecast: {dry_days} days without significant rain."
        ),
        recommendations: vec![
            "Plan irrigation schedule".to_string(),
            "Check water reserves".to_string(),
            "Consider drought-resistant practices".to_string(),
        ],
    })
}
