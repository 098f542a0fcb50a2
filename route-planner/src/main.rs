use std::net::SocketAddr;
use std::process::ExitCode;

use tracing::level_filters::LevelFilter;
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use route_planner::planner::SearchConfig;
use route_planner::timetable::Timetable;
use route_planner::web::{AppState, create_router};

/// Address used when BIND_ADDR is not set.
const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";

fn init_logger() {
    let default_level = LevelFilter::INFO;
    let rust_log =
        std::env::var(EnvFilter::DEFAULT_ENV).unwrap_or_else(|_| default_level.to_string());
    let env_filter = EnvFilter::try_new(rust_log).unwrap_or_else(|err| {
        eprintln!(
            "invalid {}, falling back to level '{}' - {}",
            EnvFilter::DEFAULT_ENV,
            default_level,
            err,
        );
        EnvFilter::new(default_level.to_string())
    });
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(env_filter)
        .init();
}

#[tokio::main]
async fn main() -> ExitCode {
    init_logger();

    // Timetable location is required
    let Ok(timetable_path) = std::env::var("TIMETABLE_PATH") else {
        error!("TIMETABLE_PATH not set");
        return ExitCode::FAILURE;
    };

    let bind_addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string());
    let addr: SocketAddr = match bind_addr.parse() {
        Ok(addr) => addr,
        Err(e) => {
            error!(%bind_addr, error = %e, "Invalid BIND_ADDR");
            return ExitCode::FAILURE;
        }
    };

    let timetable = match Timetable::load(&timetable_path) {
        Ok(timetable) => timetable,
        Err(e) => {
            error!(path = %timetable_path, error = %e, "Failed to load timetable");
            return ExitCode::FAILURE;
        }
    };
    info!(
        path = %timetable_path,
        cities = timetable.len(),
        departures = timetable.departure_count(),
        "Loaded timetable"
    );

    let search_config = SearchConfig::default();
    info!(
        anchor = ?search_config.anchor,
        max_transfers = search_config.max_transfers,
        max_iterations = search_config.max_iterations,
        "Search configuration"
    );

    let state = AppState::new(timetable, search_config);
    let app = create_router(state);

    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(listener) => listener,
        Err(e) => {
            error!(%addr, error = %e, "Failed to bind");
            return ExitCode::FAILURE;
        }
    };
    info!(%addr, "Route planner listening");
    info!("Endpoints: /health /cities /route /routes /routes/best");

    if let Err(e) = axum::serve(listener, app).await {
        error!(error = %e, "Server error");
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}
