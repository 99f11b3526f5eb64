use actix_web::{web, App, HttpServer};
use std::io;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use recommender_api::config::Config;
use recommender_api::handlers;
use recommender_api::middleware::{cors, RequestTracing};
use recommender_api::services::{initialize, LifecycleState};

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "info,actix_web=info".into());

    let pretty = std::env::var("LOG_FORMAT")
        .map(|v| v.eq_ignore_ascii_case("pretty"))
        .unwrap_or(false);

    if pretty {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_current_span(true)
                    .with_span_list(true)
                    .with_thread_ids(true)
                    .with_line_number(true)
                    .with_file(true)
                    .with_target(true),
            )
            .init();
    }
}

#[actix_web::main]
async fn main() -> io::Result<()> {
    init_tracing();

    // Load configuration
    let config = match Config::from_env() {
        Ok(cfg) => cfg,
        Err(e) => {
            tracing::error!("Configuration loading failed: {}", e);
            eprintln!("ERROR: Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    tracing::info!(
        "Starting recommender-api v{}",
        env!("CARGO_PKG_VERSION")
    );
    tracing::info!("Environment: {}", config.app.env);

    // Single startup attempt; missing or corrupt artifacts degrade, anything else aborts
    let state = match initialize(&config.artifacts) {
        Ok(state) => state,
        Err(e) => {
            tracing::error!("Startup aborted: {}", e);
            eprintln!("ERROR: Startup aborted: {}", e);
            std::process::exit(1);
        }
    };

    match state.lifecycle() {
        LifecycleState::Ready => tracing::info!("✅ Model and mappings loaded, service ready"),
        other => tracing::warn!(state = %other, "Service started without a model"),
    }

    let state = web::Data::new(state);
    let cors_config = config.cors.clone();
    let bind_addr = config.bind_addr();

    tracing::info!("HTTP server listening on {}", bind_addr);

    let mut server = HttpServer::new(move || {
        App::new()
            .wrap(cors(&cors_config))
            .wrap(RequestTracing)
            .app_data(state.clone())
            .configure(handlers::configure)
    });

    if let Some(workers) = config.app.workers {
        server = server.workers(workers);
    }

    server.bind(&bind_addr)?.run().await
}
