use anyhow::Result;
use rmcp::ServiceExt;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use agri_weather_mcp::config::Config;
use agri_weather_mcp::region;
use agri_weather_mcp::service::AgriWeather;
use agri_weather_mcp::{AgriAdvisor, OpenMeteoClient};

#[tokio::main]
async fn main() -> Result<()> {
    // stdout carries the MCP protocol, so logs go to stderr
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "agri_weather_mcp=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = Config::from_env()?;
    let region = region::configure(config.region.clone())?;
    tracing::info!(
        "Starting agricultural weather MCP server for region: {}",
        region.name
    );

    let client = OpenMeteoClient::with_endpoints(&config.api_base, &config.archive_url, config.timeout)?;
    let service = AgriWeather::new(AgriAdvisor::new(region, client));

    let server = service.serve(rmcp::transport::stdio()).await?;
    server.waiting().await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}
