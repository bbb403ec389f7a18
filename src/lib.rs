//! Weather and agricultural intelligence for a bounded region.
//!
//! Raw Open-Meteo responses are aligned into per-timestamp records, gated by
//! a configurable bounding region, and run through threshold rules that
//! produce crop alerts and recommendations.
//!
//! # Modules
//!
//! - [`region`]: region selection and coordinate validation
//! - [`series`]: column-to-row alignment of time series
//! - [`alerts`], [`dry_spell`], [`recommendations`]: the agricultural rules
//! - [`advisor`]: orchestration over a [`provider::WeatherProvider`]
//! - [`service`]: the MCP tool surface

pub mod advisor;
pub mod alerts;
pub mod config;
pub mod constants;
pub mod dry_spell;
pub mod error;
pub mod formatters;
pub mod models;
pub mod normalize;
pub mod provider;
pub mod recommendations;
pub mod region;
pub mod series;
pub mod service;

pub use advisor::{AgriAdvisor, Clock, FixedClock, SystemClock};
pub use error::{AgriError, AgriResult};
pub use provider::{OpenMeteoClient, WeatherProvider};
pub use region::{BoundingBox, Region, RegionSelector};
