mod config;
mod gemini;
mod gemini_client;
mod logging;
mod models;
mod relay;
mod request_id;

use clap::Parser;
use config::Settings;
use gemini_client::GeminiClient;
use relay::AppState;
use std::str::FromStr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, services::ServeDir};
use tracing::{Level, info, warn};

#[derive(Parser, Debug)]
#[command(name = "merge-relay")]
#[command(about = "Relay server for the photo-merge web app")]
struct Args {
    #[arg(short, long, default_value = "0.0.0.0")]
    ip: String,

    #[arg(short, long, default_value = "8000")]
    port: u16,

    /// Path to config file; built-in defaults are used when omitted
    #[arg(short, long)]
    config: Option<String>,

    /// Directory holding the static web client
    #[arg(short, long, default_value = "static")]
    static_dir: String,

    /// trace, debug, info, warn, error
    #[arg(short, long, default_value = "info")]
    log_level: String,

    /// Append logs to this file in addition to stdout
    #[arg(long)]
    log_file: Option<String>,

    /// socks and http proxy, example: socks5://192.168.0.2:10080
    #[arg(long)]
    proxy: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let log_level = Level::from_str(&args.log_level).unwrap_or_else(|_| {
        eprintln!("Invalid log level: {}. Using INFO level.", args.log_level);
        Level::INFO
    });
    logging::init_logging(log_level, args.log_file.as_deref())?;

    let settings = Settings::load(args.config.as_deref())?;
    if settings.api_key.is_none() {
        warn!(
            "{} is not set; generation requests will fail until it is configured",
            config::API_KEY_ENV
        );
    }

    let client_builder = reqwest::Client::builder();
    let client_builder = if let Some(proxy) = &args.proxy {
        client_builder.proxy(reqwest::Proxy::all(proxy)?)
    } else {
        client_builder
    };
    let http_client = Arc::new(client_builder.build()?);

    let gemini = Arc::new(GeminiClient::new(
        http_client,
        settings.api_base.clone(),
        settings.model.clone(),
    ));
    let state = AppState {
        settings: Arc::new(settings),
        gemini,
    };

    let app = relay::app(state)
        .fallback_service(ServeDir::new(&args.static_dir))
        .layer(axum::middleware::from_fn(request_id::inject_request_id))
        .layer(CorsLayer::permissive());

    let bind_address = format!("{}:{}", args.ip, args.port);
    let listener = tokio::net::TcpListener::bind(&bind_address).await?;
    info!("Server started on http://{}", bind_address);

    axum::serve(listener, app).await?;
    Ok(())
}
