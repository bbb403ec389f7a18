//! Geographic restriction of the service.
//!
//! A [`RegionSelector`] is read once at startup and resolved with [`configure`]
//! into a [`Region`]: a display name plus an optional [`BoundingBox`]. Every
//! coordinate-taking operation is gated by [`Region::contains`].

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{AgriError, AgriResult};

/// Axis-aligned lat/lon rectangle. Edges are inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BoundingBox {
    lat_min: f64,
    lat_max: f64,
    lon_min: f64,
    lon_max: f64,
}

impl BoundingBox {
    pub fn new(lat_min: f64, lat_max: f64, lon_min: f64, lon_max: f64) -> AgriResult<Self> {
        if !(lat_min < lat_max) || !(lon_min < lon_max) {
            return Err(AgriError::Configuration(format!(
                "bounding box must satisfy lat_min < lat_max and lon_min < lon_max \
                 (got lat {lat_min}..{lat_max}, lon {lon_min}..{lon_max})"
            )));
        }
        Ok(Self {
            lat_min,
            lat_max,
            lon_min,
            lon_max,
        })
    }

    pub fn lat_min(&self) -> f64 {
        self.lat_min
    }

    pub fn lat_max(&self) -> f64 {
        self.lat_max
    }

    pub fn lon_min(&self) -> f64 {
        self.lon_min
    }

    pub fn lon_max(&self) -> f64 {
        self.lon_max
    }

    pub fn contains(&self, latitude: f64, longitude: f64) -> bool {
        (self.lat_min..=self.lat_max).contains(&latitude)
            && (self.lon_min..=self.lon_max).contains(&longitude)
    }
}

/// Well-known regions addressable by key.
pub const PREDEFINED_REGIONS: &[(&str, BoundingBox)] = &[
    (
        "indonesia",
        BoundingBox {
            lat_min: -11.0,
            lat_max: 6.0,
            lon_min: 95.0,
            lon_max: 141.0,
        },
    ),
    (
        "south_east_asia",
        BoundingBox {
            lat_min: -10.0,
            lat_max: 28.0,
            lon_min: 90.0,
            lon_max: 141.0,
        },
    ),
    (
        "australia",
        BoundingBox {
            lat_min: -44.0,
            lat_max: -10.0,
            lon_min: 112.0,
            lon_max: 154.0,
        },
    ),
    (
        "india",
        BoundingBox {
            lat_min: 6.0,
            lat_max: 37.0,
            lon_min: 68.0,
            lon_max: 98.0,
        },
    ),
];

/// Custom bounds as supplied by the operator. Any field may be missing.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct CustomBounds {
    pub lat_min: Option<f64>,
    pub lat_max: Option<f64>,
    pub lon_min: Option<f64>,
    pub lon_max: Option<f64>,
}

/// Raw region selector before resolution.
#[derive(Debug, Clone, PartialEq)]
pub enum RegionSelector {
    Named(String),
    Custom(CustomBounds),
    Unrestricted,
}

impl FromStr for RegionSelector {
    type Err = AgriError;

    /// Accepts `none`, a JSON object of bounds, or a region key.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("none") {
            return Ok(Self::Unrestricted);
        }
        if s.starts_with('{') {
            let bounds: CustomBounds = serde_json::from_str(s).map_err(|e| {
                AgriError::Configuration(format!("custom region is not valid JSON: {e}"))
            })?;
            return Ok(Self::Custom(bounds));
        }
        Ok(Self::Named(s.to_string()))
    }
}

/// Resolved region: what the service reports and enforces.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Region {
    #[serde(rename = "region_name")]
    pub name: String,
    #[serde(rename = "bounding_box")]
    pub bounds: Option<BoundingBox>,
}

impl Region {
    pub fn unrestricted() -> Self {
        Self {
            name: "None".to_string(),
            bounds: None,
        }
    }

    /// Global bounds first, then the configured box if any.
    pub fn contains(&self, latitude: f64, longitude: f64) -> bool {
        validate(latitude, longitude, self)
    }
}

pub fn predefined_region(key: &str) -> Option<BoundingBox> {
    let key = normalize_key(key);
    PREDEFINED_REGIONS
        .iter()
        .find(|(name, _)| *name == key)
        .map(|(_, bounds)| *bounds)
}

fn normalize_key(key: &str) -> String {
    key.trim().to_lowercase().replace(' ', "_")
}

/// Resolves a selector into a [`Region`].
pub fn configure(selector: RegionSelector) -> AgriResult<Region> {
    match selector {
        RegionSelector::Unrestricted => Ok(Region::unrestricted()),
        RegionSelector::Named(name) => {
            let bounds = predefined_region(&name).ok_or_else(|| {
                AgriError::Configuration(format!("Unknown predefined region: {name}"))
            })?;
            Ok(Region {
                name,
                bounds: Some(bounds),
            })
        }
        RegionSelector::Custom(custom) => match custom {
            CustomBounds {
                lat_min: Some(lat_min),
                lat_max: Some(lat_max),
                lon_min: Some(lon_min),
                lon_max: Some(lon_max),
            } => Ok(Region {
                name: "Custom".to_string(),
                bounds: Some(BoundingBox::new(lat_min, lat_max, lon_min, lon_max)?),
            }),
            partial => Err(AgriError::Configuration(format!(
                "Custom region is missing required keys: {}",
                partial.missing_keys().join(", ")
            ))),
        },
    }
}

impl CustomBounds {
    fn missing_keys(&self) -> Vec<&'static str> {
        [
            ("lat_min", self.lat_min),
            ("lat_max", self.lat_max),
            ("lon_min", self.lon_min),
            ("lon_max", self.lon_max),
        ]
        .into_iter()
        .filter(|(_, value)| value.is_none())
        .map(|(key, _)| key)
        .collect()
    }
}

/// True when the coordinate is globally valid and inside the region's box.
pub fn validate(latitude: f64, longitude: f64, region: &Region) -> bool {
    if !(-90.0..=90.0).contains(&latitude) || !(-180.0..=180.0).contains(&longitude) {
        return false;
    }
    match &region.bounds {
        None => true,
        Some(bounds) => bounds.contains(latitude, longitude),
    }
}
