use std::sync::Arc;

use rmcp::{
    handler::server::{wrapper::Parameters, ServerHandler, tool::ToolRouter},
    model::{CallToolResult, Content, Implementation, ProtocolVersion, ServerCapabilities, ServerInfo},
    tool, tool_handler, tool_router,
    ErrorData as McpError,
};
use serde::Serialize;

use crate::advisor::AgriAdvisor;
use crate::error::AgriError;
use crate::formatters::{format_alert_report, format_forecast};
use crate::models::{
    GetAgriculturalAlertsRequest, GetCurrentWeatherRequest, GetEvapotranspirationRequest,
    GetForecastRequest, GetHistoricalWeatherRequest, GetSoilConditionsRequest,
};
use crate::provider::OpenMeteoClient;

/// MCP front end for the agricultural weather advisor
#[derive(Clone)]
pub struct AgriWeather {
    advisor: Arc<AgriAdvisor<OpenMeteoClient>>,
    tool_router: ToolRouter<Self>,
}

impl AgriWeather {
    pub fn new(advisor: AgriAdvisor<OpenMeteoClient>) -> Self {
        Self {
            advisor: Arc::new(advisor),
            tool_router: Self::tool_router(),
        }
    }
}

fn to_mcp_error(err: AgriError) -> McpError {
    match err {
        AgriError::OutOfRegion { .. }
        | AgriError::InvalidParameter(_)
        | AgriError::Configuration(_) => McpError::invalid_params(err.to_string(), None),
        AgriError::Provider(e) => {
            tracing::warn!("Weather provider failed: {:#}", e);
            McpError::internal_error(format!("Failed to fetch weather data: {}", e), None)
        }
    }
}

fn json_content<T: Serialize>(value: &T) -> Result<Content, McpError> {
    let text = serde_json::to_string_pretty(value).map_err(|e| {
        McpError::internal_error(format!("Failed to serialize result: {}", e), None)
    })?;
    Ok(Content::text(text))
}

#[tool_handler]
impl ServerHandler for AgriWeather {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "agri-weather-mcp".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                icons: None,
                title: None,
                website_url: None,
            },
            instructions: Some(format!(
                "Weather data and agricultural intelligence powered by the Open-Meteo API. \
                Provides current conditions, forecasts, soil conditions, evapotranspiration, \
                historical weather and crop alerts. Queries are restricted to the configured \
                region: {}.",
                self.advisor.region().name
            )),
        }
    }
}

#[tool_router]
impl AgriWeather {
    #[tool(description = "Get current weather conditions for a location, optionally with soil temperature and moisture by depth.")]
    async fn get_current_weather(
        &self,
        Parameters(request): Parameters<GetCurrentWeatherRequest>,
    ) -> Result<CallToolResult, McpError> {
        tracing::info!(
            "Getting current weather for coordinates: {}, {}",
            request.latitude,
            request.longitude
        );

        let report = self
            .advisor
            .current_weather(request.latitude, request.longitude, request.include_soil_data)
            .await
            .map_err(to_mcp_error)?;

        Ok(CallToolResult::success(vec![json_content(&report)?]))
    }

    #[tool(description = "Get a daily weather forecast (1-16 days, default 5) for a location, optionally with hourly detail including soil and evapotranspiration.")]
    async fn get_weather_forecast(
        &self,
        Parameters(request): Parameters<GetForecastRequest>,
    ) -> Result<CallToolResult, McpError> {
        tracing::info!(
            "Getting {}-day forecast for coordinates: {}, {}",
            request.days,
            request.latitude,
            request.longitude
        );

        let report = self
            .advisor
            .forecast(
                request.latitude,
                request.longitude,
                request.days,
                request.include_hourly,
            )
            .await
            .map_err(to_mcp_error)?;

        Ok(CallToolResult::success(vec![
            Content::text(format_forecast(&report)),
            json_content(&report)?,
        ]))
    }

    #[tool(description = "Get agricultural alerts and crop-specific recommendations for a location. Crop types: rice, corn, vegetables. Growth stages: planting, vegetative, flowering.")]
    async fn get_agricultural_alerts(
        &self,
        Parameters(request): Parameters<GetAgriculturalAlertsRequest>,
    ) -> Result<CallToolResult, McpError> {
        tracing::info!(
            "Getting agricultural alerts for {} ({}) at {}, {}",
            request.crop_type,
            request.growth_stage,
            request.latitude,
            request.longitude
        );

        let report = self
            .advisor
            .build_report(
                request.latitude,
                request.longitude,
                &request.crop_type,
                &request.growth_stage,
            )
            .await
            .map_err(to_mcp_error)?;

        tracing::info!(
            alerts = report.alerts.len(),
            recommendations = report.recommendations.len(),
            "Agricultural analysis complete"
        );

        Ok(CallToolResult::success(vec![
            Content::text(format_alert_report(&report)),
            json_content(&report)?,
        ]))
    }

    #[tool(description = "Get hourly soil temperature and moisture forecast by depth for a location (default 3 days).")]
    async fn get_soil_conditions(
        &self,
        Parameters(request): Parameters<GetSoilConditionsRequest>,
    ) -> Result<CallToolResult, McpError> {
        tracing::info!(
            "Getting soil conditions for coordinates: {}, {}",
            request.latitude,
            request.longitude
        );

        let report = self
            .advisor
            .soil_conditions(request.latitude, request.longitude, request.forecast_days)
            .await
            .map_err(to_mcp_error)?;

        Ok(CallToolResult::success(vec![json_content(&report)?]))
    }

    #[tool(description = "Get daily and hourly evapotranspiration (ET0 FAO) data for a location (default 7 days).")]
    async fn get_evapotranspiration_data(
        &self,
        Parameters(request): Parameters<GetEvapotranspirationRequest>,
    ) -> Result<CallToolResult, McpError> {
        tracing::info!(
            "Getting evapotranspiration for coordinates: {}, {}",
            request.latitude,
            request.longitude
        );

        let report = self
            .advisor
            .evapotranspiration(request.latitude, request.longitude, request.days)
            .await
            .map_err(to_mcp_error)?;

        Ok(CallToolResult::success(vec![json_content(&report)?]))
    }

    #[tool(description = "Get daily historical weather for a location between two dates (YYYY-MM-DD).")]
    async fn get_historical_weather(
        &self,
        Parameters(request): Parameters<GetHistoricalWeatherRequest>,
    ) -> Result<CallToolResult, McpError> {
        tracing::info!(
            "Getting historical weather {}..{} for coordinates: {}, {}",
            request.start_date,
            request.end_date,
            request.latitude,
            request.longitude
        );

        let report = self
            .advisor
            .historical_weather(
                request.latitude,
                request.longitude,
                &request.start_date,
                &request.end_date,
            )
            .await
            .map_err(to_mcp_error)?;

        Ok(CallToolResult::success(vec![json_content(&report)?]))
    }

    #[tool(description = "Get the currently configured geographical region restriction.")]
    async fn get_supported_region(&self) -> Result<CallToolResult, McpError> {
        Ok(CallToolResult::success(vec![json_content(self.advisor.region())?]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_out_of_region_maps_to_invalid_params() {
        let err = to_mcp_error(AgriError::OutOfRegion {
            region: "indonesia".to_string(),
        });

        assert_eq!(err.code, rmcp::model::ErrorCode::INVALID_PARAMS);
        assert!(err.message.contains("indonesia"));
    }

    #[test]
    fn test_provider_failure_maps_to_internal_error() {
        let err = to_mcp_error(AgriError::Provider(anyhow::anyhow!("status 503")));

        assert_eq!(err.code, rmcp::model::ErrorCode::INTERNAL_ERROR);
        assert!(err.message.contains("status 503"));
    }
}
