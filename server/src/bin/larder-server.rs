use clap::Parser;
use larder_core::client::GeminiClient;
use larder_core::config::GeminiConfig;
use larder_server::config::{ConfigOverrides, ServerConfig};
use larder_server::http_server;
use std::net::IpAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "larder-server", about = "Meal suggestion and recipe backend")]
struct Args {
    /// Path to config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Address to listen on
    #[arg(long)]
    host: Option<IpAddr>,

    /// Port to listen on
    #[arg(short, long)]
    port: Option<u16>,

    /// Gemini API key
    #[arg(short = 'k', long)]
    api_key: Option<String>,

    /// Gemini model to use
    #[arg(short = 'm', long)]
    model: Option<String>,

    /// Base URL of the Gemini REST API
    #[arg(long)]
    api_base_url: Option<String>,
}

impl Args {
    fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            host: self.host,
            port: self.port,
            gemini: GeminiConfig {
                api_key: self.api_key.clone(),
                model_name: self.model.clone(),
                api_base_url: self.api_base_url.clone(),
                temperature: None,
            },
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env before the subscriber so RUST_LOG can come from it
    let dotenv = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    match dotenv {
        Ok(path) => info!("Loaded environment from {}", path.display()),
        Err(e) if e.not_found() => {}
        Err(e) => warn!(error = %e, "Failed to load .env file"),
    }

    let args = Args::parse();

    let config = match ServerConfig::load(args.config.as_deref()) {
        Ok(cfg) => cfg,
        Err(e) => {
            error!(error = %e, "Failed to load configuration");
            return Err(anyhow::anyhow!("Configuration error: {}", e));
        }
    };
    let env_overrides = ConfigOverrides::from_env()
        .map_err(|e| anyhow::anyhow!("Configuration error: {}", e))?;
    let config = config.apply(env_overrides).apply(args.overrides());

    // Initialize Gemini client
    let gemini_client = match GeminiClient::new(config.gemini.clone()) {
        Ok(client) => {
            info!(model = client.model_name(), "Initialized Gemini client");
            client
        }
        Err(e) => {
            error!(error = %e, "Failed to initialize Gemini client");
            return Err(anyhow::anyhow!("Failed to initialize Gemini client: {}", e));
        }
    };

    http_server::run_server(Arc::new(gemini_client), config.socket_addr()).await?;

    info!("Server shutting down");
    Ok(())
}
