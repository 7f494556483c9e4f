use anyhow::Result;
use tracing_subscriber::EnvFilter;

use meteobot::assemble::Pipeline;
use meteobot::config::MeteoBotConfig;
use meteobot::ipma::IpmaClient;
use meteobot::narrative::OllamaClient;
use meteobot::web::{self, AppState};

#[tokio::main]
async fn main() -> Result<()> {
    let config = MeteoBotConfig::load()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.logging.level)),
        )
        .init();

    let ipma = IpmaClient::new(&config.ipma)?;
    let narrative = OllamaClient::new(&config.narrative)?;
    let pipeline = Pipeline::new(ipma, narrative, config.defaults.all_cities_fan_out);

    web::run(AppState { pipeline }, config.server.port).await
}
