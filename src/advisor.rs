//! Request orchestration: region gate, provider fetches, normalization and
//! the agricultural analysis.

use chrono::{DateTime, NaiveDate, Utc};

use crate::alerts;
use crate::constants::{
    ALERT_FORECAST_DAYS, CURRENT_SOIL_FIELDS, CURRENT_WEATHER_FIELDS, ET_DAILY_FIELDS,
    ET_HOURLY_FIELDS, FORECAST_DAILY_FIELDS, FORECAST_HOURLY_FIELDS, HISTORICAL_DAILY_FIELDS,
    MAX_FORECAST_DAYS, SOIL_HOURLY_FIELDS,
};
use crate::dry_spell;
use crate::error::{AgriError, AgriResult};
use crate::models::{
    AlertReport, CropInfo, CurrentWeatherReport, EvapotranspirationReport, ForecastReport,
    HistoricalReport, Location, Period, SoilReport,
};
use crate::normalize;
use crate::provider::WeatherProvider;
use crate::recommendations;
use crate::region::Region;

/// Source of `analysis_time`.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Always reports the same instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Stateless between requests; the region is fixed at construction.
pub struct AgriAdvisor<P, C = SystemClock> {
    region: Region,
    provider: P,
    clock: C,
}

impl<P: WeatherProvider> AgriAdvisor<P> {
    pub fn new(region: Region, provider: P) -> Self {
        Self::with_clock(region, provider, SystemClock)
    }
}

impl<P: WeatherProvider, C: Clock> AgriAdvisor<P, C> {
    pub fn with_clock(region: Region, provider: P, clock: C) -> Self {
        Self {
            region,
            provider,
            clock,
        }
    }

    pub fn region(&self) -> &Region {
        &self.region
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    fn ensure_in_region(&self, latitude: f64, longitude: f64) -> AgriResult<()> {
        if self.region.contains(latitude, longitude) {
            Ok(())
        } else {
            Err(AgriError::OutOfRegion {
                region: self.region.name.clone(),
            })
        }
    }

    pub async fn current_weather(
        &self,
        latitude: f64,
        longitude: f64,
        include_soil: bool,
    ) -> AgriResult<CurrentWeatherReport> {
        self.ensure_in_region(latitude, longitude)?;

        let mut fields = CURRENT_WEATHER_FIELDS.to_vec();
        if include_soil {
            fields.extend_from_slice(CURRENT_SOIL_FIELDS);
        }

        let raw = self.provider.current(latitude, longitude, &fields).await?;

        Ok(CurrentWeatherReport::new(
            Location::from_raw(latitude, longitude, &raw),
            normalize::current_conditions(raw.current.as_ref(), include_soil),
        ))
    }

    pub async fn forecast(
        &self,
        latitude: f64,
        longitude: f64,
        days: u32,
        include_hourly: bool,
    ) -> AgriResult<ForecastReport> {
        self.ensure_in_region(latitude, longitude)?;

        let days = days.clamp(1, MAX_FORECAST_DAYS);
        let hourly_fields: &[&str] = if include_hourly {
            FORECAST_HOURLY_FIELDS
        } else {
            &[]
        };

        let raw = self
            .provider
            .forecast(latitude, longitude, days, FORECAST_DAILY_FIELDS, hourly_fields)
            .await?;

        Ok(ForecastReport {
            location: Location::from_raw(latitude, longitude, &raw),
            forecast_days: days,
            daily_forecast: normalize::daily_forecast(raw.daily.as_ref()),
            hourly_forecast: include_hourly.then(|| normalize::hourly_forecast(raw.hourly.as_ref())),
        })
    }

    pub async fn soil_conditions(
        &self,
        latitude: f64,
        longitude: f64,
        forecast_days: u32,
    ) -> AgriResult<SoilReport> {
        self.ensure_in_region(latitude, longitude)?;

        let days = forecast_days.clamp(1, MAX_FORECAST_DAYS);
        let raw = self
            .provider
            .forecast(latitude, longitude, days, &[], SOIL_HOURLY_FIELDS)
            .await?;

        Ok(SoilReport {
            location: Location::from_raw(latitude, longitude, &raw),
            forecast_days: days,
            soil_conditions: normalize::soil_conditions(raw.hourly.as_ref()),
        })
    }

    pub async fn evapotranspiration(
        &self,
        latitude: f64,
        longitude: f64,
        days: u32,
    ) -> AgriResult<EvapotranspirationReport> {
        self.ensure_in_region(latitude, longitude)?;

        let days = days.clamp(1, MAX_FORECAST_DAYS);
        let raw = self
            .provider
            .forecast(latitude, longitude, days, ET_DAILY_FIELDS, ET_HOURLY_FIELDS)
            .await?;

        Ok(EvapotranspirationReport {
            location: Location::from_raw(latitude, longitude, &raw),
            forecast_days: days,
            daily_et: normalize::daily_evapotranspiration(raw.daily.as_ref()),
            hourly_et: normalize::hourly_evapotranspiration(raw.hourly.as_ref()),
        })
    }

    pub async fn historical_weather(
        &self,
        latitude: f64,
        longitude: f64,
        start_date: &str,
        end_date: &str,
    ) -> AgriResult<HistoricalReport> {
        self.ensure_in_region(latitude, longitude)?;

        let start = parse_date("start_date", start_date)?;
        let end = parse_date("end_date", end_date)?;
        if start > end {
            return Err(AgriError::InvalidParameter(format!(
                "start_date {start} is after end_date {end}"
            )));
        }

        let raw = self
            .provider
            .archive(latitude, longitude, start_date, end_date, HISTORICAL_DAILY_FIELDS)
            .await?;

        Ok(HistoricalReport {
            location: Location::from_raw(latitude, longitude, &raw),
            period: Period {
                start_date: start_date.to_string(),
                end_date: end_date.to_string(),
            },
            historical_data: normalize::historical_days(raw.daily.as_ref()),
        })
    }

    /// Alerts and crop guidance from current conditions plus a 7-day forecast.
    ///
    /// The region is checked before anything is fetched. Either fetch failing
    /// fails the whole report.
    pub async fn build_report(
        &self,
        latitude: f64,
        longitude: f64,
        crop_type: &str,
        growth_stage: &str,
    ) -> AgriResult<AlertReport> {
        self.ensure_in_region(latitude, longitude)?;

        let (current, forecast) = tokio::try_join!(
            self.current_weather(latitude, longitude, true),
            self.forecast(latitude, longitude, ALERT_FORECAST_DAYS, true),
        )?;

        let conditions = current.conditions();
        let mut alerts = alerts::evaluate(&conditions);
        alerts.extend(dry_spell::scan(
            &forecast.daily_forecast,
            dry_spell::DEFAULT_WINDOW,
        ));

        Ok(AlertReport {
            location: Location::at(latitude, longitude),
            crop_info: CropInfo {
                crop_type: crop_type.to_string(),
                growth_stage: growth_stage.to_string(),
            },
            alerts,
            recommendations: recommendations::recommend(crop_type, growth_stage, &conditions),
            analysis_time: self.clock.now(),
        })
    }
}

fn parse_date(name: &str, value: &str) -> AgriResult<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|e| {
        AgriError::InvalidParameter(format!("{name} must be YYYY-MM-DD (got {value:?}): {e}"))
    })
}
