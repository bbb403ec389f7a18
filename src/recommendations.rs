//! Crop and growth-stage specific guidance.
//!
//! Guidance lives in a flat table of `(crop, stage)` entries, each guarded by
//! a predicate over current conditions. Adding a crop means adding entries;
//! existing entries are never consulted for other crops.

use crate::models::{CurrentConditions, Recommendation};

#[derive(Debug, Clone, Copy)]
enum Stage {
    Any,
    Only(&'static str),
}

impl Stage {
    fn matches(&self, growth_stage: &str) -> bool {
        match self {
            Stage::Any => true,
            Stage::Only(stage) => stage.eq_ignore_ascii_case(growth_stage),
        }
    }
}

struct CropRule {
    crop: &'static str,
    stage: Stage,
    applies: fn(&CurrentConditions) -> bool,
    kind: &'static str,
    message: &'static str,
    action: &'static str,
}

const CROP_RULES: &[CropRule] = &[
    CropRule {
        crop: "rice",
        stage: Stage::Only("planting"),
        applies: |c| c.temperature.is_some_and(|t| (20.0..=35.0).contains(&t)),
        kind: "optimal_conditions",
        message: "Temperature conditions are optimal for rice planting.",
        action: "Proceed with planting operations",
    },
    CropRule {
        crop: "rice",
        stage: Stage::Only("flowering"),
        applies: |c| c.temperature.is_some_and(|t| t > 35.0),
        kind: "heat_stress_prevention",
        message: "High temperatures during flowering can reduce yield.",
        action: "Maintain adequate water levels and consider evening irrigation",
    },
    CropRule {
        crop: "corn",
        stage: Stage::Only("vegetative"),
        applies: |c| c.humidity.is_some_and(|h| h > 80.0),
        kind: "disease_prevention",
        message: "High humidity increases risk of fungal diseases in corn.",
        action: "Monitor for leaf blight and ensure good air circulation",
    },
    CropRule {
        crop: "vegetables",
        stage: Stage::Any,
        applies: |c| c.temperature.is_some_and(|t| t > 30.0),
        kind: "heat_protection",
        message: "High temperatures can stress vegetable crops.",
        action: "Consider shade cloth and increase watering frequency",
    },
];

/// Guidance for a crop at a growth stage. Unknown crops or stages yield an
/// empty list.
pub fn recommend(
    crop_type: &str,
    growth_stage: &str,
    current: &CurrentConditions,
) -> Vec<Recommendation> {
    let crop_type = crop_type.trim();
    let growth_stage = growth_stage.trim();

    CROP_RULES
        .iter()
        .filter(|rule| rule.crop.eq_ignore_ascii_case(crop_type) && rule.stage.matches(growth_stage))
        .filter(|rule| (rule.applies)(current))
        .map(|rule| Recommendation {
            kind: rule.kind.to_string(),
            message: rule.message.to_string(),
            action: rule.action.to_string(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(temperature: f64, humidity: f64) -> CurrentConditions {
        CurrentConditions {
            temperature: Some(temperature),
            humidity: Some(humidity),
            ..Default::default()
        }
    }

    #[test]
    fn test_rice_planting_optimal() {
        let recs = recommend("rice", "planting", &at(25.0, 70.0));

        assert_eq!(recs.len(), 1);
        assert_eq!(recs[0].kind, "optimal_conditions");
        assert_eq!(recs[0].action, "Proceed with planting operations");
    }

    #[test]
    fn test_rice_planting_range_is_inclusive() {
        assert_eq!(recommend("rice", "planting", &at(20.0, 70.0)).len(), 1);
        assert_eq!(recommend("rice", "planting", &at(35.0, 70.0)).len(), 1);
        assert!(recommend("rice", "planting", &at(19.9, 70.0)).is_empty());
        assert!(recommend("rice", "planting", &at(35.1, 70.0)).is_empty());
    }

    #[test]
    fn test_rice_flowering_heat() {
        let recs = recommend("rice", "flowering", &at(36.0, 50.0));

        assert_eq!(recs.len(), 1);
        assert_eq!(recs[0].kind, "heat_stress_prevention");
        assert!(recommend("rice", "flowering", &at(30.0, 50.0)).is_empty());
    }

    #[test]
    fn test_corn_vegetative_humidity() {
        let recs = recommend("corn", "vegetative", &at(28.0, 85.0));

        assert_eq!(recs.len(), 1);
        assert_eq!(recs[0].kind, "disease_prevention");
        assert!(recommend("corn", "flowering", &at(28.0, 85.0)).is_empty());
    }

    #[test]
    fn test_vegetables_any_stage() {
        for stage in ["planting", "vegetative", "harvest", "anything"] {
            let recs = recommend("vegetables", stage, &at(31.0, 60.0));
            assert_eq!(recs.len(), 1, "stage {stage}");
            assert_eq!(recs[0].kind, "heat_protection");
        }
    }

    #[test]
    fn test_unknown_crop_is_empty() {
        assert!(recommend("wheat", "planting", &at(25.0, 70.0)).is_empty());
    }

    #[test]
    fn test_unknown_temperature_gives_nothing() {
        let current = CurrentConditions {
            humidity: Some(90.0),
            ..Default::default()
        };

        assert!(recommend("rice", "planting", &current).is_empty());
        assert!(recommend("vegetables", "planting", &current).is_empty());
    }

    #[test]
    fn test_lookup_ignores_case() {
        assert_eq!(recommend("Rice", "Planting", &at(25.0, 70.0)).len(), 1);
    }
}
