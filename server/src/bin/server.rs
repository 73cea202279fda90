use std::sync::Arc;

use axum::http::Method;
use camino::Utf8PathBuf as PathBuf;
use clap::Parser;
use eyre::{self, Context, Result};
use quarkhub::{
    app_router,
    app_state::{AppState, SharedState},
};
use tokio::signal;
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    request_id::MakeRequestUuid,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
    ServiceBuilderExt,
};
use tracing::info;
use tracing_error::ErrorLayer;
use tracing_subscriber::{prelude::*, EnvFilter};

use quarkhub_core::{
    config::{read_config, Config},
    storage::JsonFileBackend,
    Store,
};

#[derive(Parser)]
#[command(version, about, long_about = None)]
struct Cli {
    /// TOML config file, defaults are used if not given
    #[arg(short, long)]
    config: Option<String>,
    /// overrides the data directory from the config file
    #[arg(long)]
    data_dir: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Cli::parse();

    if std::env::var("RUST_LIB_BACKTRACE").is_err() {
        std::env::set_var("RUST_LIB_BACKTRACE", "1")
    }
    if std::env::var("RUST_SPANTRACE").is_err() {
        std::env::set_var("RUST_SPANTRACE", "1");
    }
    color_eyre::install()?;
    if std::env::var("QUARKHUB_LOG").is_err() {
        std::env::set_var("QUARKHUB_LOG", "info,tower_http=debug")
    }
    tracing_subscriber::registry()
        .with(EnvFilter::from_env("QUARKHUB_LOG"))
        .with(ErrorLayer::default())
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let mut config = match args.config {
        Some(path) => read_config(&PathBuf::from(path)).await?,
        None => Config::default(),
    };
    if let Some(data_dir) = args.data_dir {
        config.data_dir.path = PathBuf::from(data_dir);
    }

    info!(
        data_dir = %config.data_dir.path,
        name = config.data_dir.name.as_deref().unwrap_or("default"),
        "Starting up..."
    );
    tokio::fs::create_dir_all(&config.data_dir.path)
        .await
        .wrap_err_with(|| format!("could not create data directory {}", config.data_dir.path))?;
    let store = Store::open(JsonFileBackend::new(config.data_dir.path.clone()))
        .await
        .wrap_err("Error opening resource store")?;
    let settings = store.settings().await;
    info!(
        version = %settings.version,
        default_category = %settings.default_category,
        "Store opened"
    );
    let bind_address = config.bind_address();
    let shared_state: SharedState = Arc::new(AppState { store, config });

    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers(Any)
        .allow_origin(Any);
    let app = app_router(shared_state)
        .layer(
            ServiceBuilder::new()
                .set_x_request_id(MakeRequestUuid)
                .layer(
                    TraceLayer::new_for_http()
                        .make_span_with(DefaultMakeSpan::new().include_headers(true))
                        .on_response(DefaultOnResponse::new().include_headers(true)),
                )
                .propagate_x_request_id(),
        )
        .layer(cors);
    let listener = tokio::net::TcpListener::bind(&bind_address)
        .await
        .wrap_err_with(|| format!("Error binding socket {}", bind_address))?;
    info!("Listening on {}", bind_address);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .wrap_err("Server error")?;
    info!("Shutting down...");

    Ok(())
}

async fn shutdown_signal() {
    match signal::ctrl_c().await {
        Ok(()) => {}
        Err(err) => {
            eprintln!("Unable to listen for shutdown signal: {}", err);
            std::process::exit(1);
        }
    }
}
