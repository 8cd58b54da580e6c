//! Wiring & DI. Entry point: bootstrap adapters, inject into the console
//! flow, run it. No business logic here.

use compose_flow::adapters::backend::{HttpPublisher, MockPublisher};
use compose_flow::adapters::directory::FixtureDirectory;
use compose_flow::adapters::ingestion::FsMediaSource;
use compose_flow::adapters::ui::console::ConsoleInput;
use compose_flow::ports::{Directory, InputPort, MediaSource, Publisher};
use compose_flow::shared::config::AppConfig;
use dotenv::dotenv;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    let env_loaded = dotenv();
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    match &env_loaded {
        Ok(path) => info!(path = %path.display(), "loaded .env"),
        Err(_) => info!(cwd = %cwd.display(), "no .env found (check CWD)"),
    }

    compose_flow::adapters::ui::init_ui();

    let cfg = AppConfig::load().unwrap_or_default();
    let publish_timeout = Duration::from_millis(cfg.publish_timeout_ms_or_default());

    let publisher: Arc<dyn Publisher> = if cfg.is_backend_configured() {
        info!(url = %cfg.api_url_or_default(), "HTTP publish backend enabled");
        Arc::new(HttpPublisher::new(
            cfg.api_url_or_default(),
            cfg.api_key_or_default(),
            publish_timeout,
        ))
    } else {
        warn!("COMPOSE_API_URL not set, using mock publisher");
        Arc::new(MockPublisher::with_delay(cfg.mock_delay_ms_or_default()))
    };

    let media_dir = cfg.media_dir_or_default();
    info!(media_dir = %media_dir, "scanning for selectable media");
    let media_source: Arc<dyn MediaSource> = Arc::new(FsMediaSource::new(&media_dir));
    let directory: Arc<dyn Directory> = Arc::new(FixtureDirectory::new());

    let input: Arc<dyn InputPort> = Arc::new(ConsoleInput::new(
        media_source,
        publisher,
        directory,
        publish_timeout,
    ));

    match input.run_compose().await {
        Ok(Some(message)) => {
            println!("\n{message}");
            info!("composition finished");
        }
        Ok(None) => {
            println!("\nComposition abandoned.");
            info!("composition abandoned");
        }
        Err(e) => {
            anyhow::bail!("{e}");
        }
    }
    Ok(())
}
