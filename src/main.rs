use dailyinfo_scrape::config::{self, AppConfig};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let dotenv_error = config::load_dotenv();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "dailyinfo_scrape=debug,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    if let Some(message) = dotenv_error {
        tracing::warn!("{message}");
    }

    let config = AppConfig::from_env();
    tracing::info!(port = config.port, "dailyinfo-scrape starting");

    dailyinfo_scrape::run(config).await
}
