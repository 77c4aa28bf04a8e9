// In crates/web-server/src/lib.rs

use api_client::CandleSource;
use app_config::ServerSettings;
use axum::{
    Router,
    extract::{Query, State},
    response::Json,
    routing::get,
};
use core_types::{Period, Signal};
use std::sync::Arc;
use strategies::{PriceSeries, SmaCrossover, SmaSource};
use tokio::net::TcpListener;
use types::{SignalParams, SignalResponse};

pub mod error;
pub mod types;

// Re-export our custom error type for convenience.
pub use error::{Error, Result};

/// The shared application state that is available to all API handlers.
///
/// Nothing in here is mutated after startup, so requests never contend.
#[derive(Clone)]
pub struct AppState {
    pub candles: Arc<dyn CandleSource>,
    pub strategy: SmaCrossover,
}

impl AppState {
    pub fn new(candles: Arc<dyn CandleSource>, strategy: SmaCrossover) -> Self {
        Self { candles, strategy }
    }
}

/// Creates the main application router with all routes and middleware.
pub fn create_router(app_state: AppState) -> Router {
    let cors = tower_http::cors::CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods(tower_http::cors::Any)
        .allow_headers(tower_http::cors::Any);

    let api_router = Router::new().route("/signal", get(signal_json_handler));

    Router::new()
        .route("/", get(signal_handler))
        .route("/signal", get(signal_handler))
        .route("/health", get(health_check_handler))
        .nest("/api", api_router)
        .layer(tower_http::trace::TraceLayer::new_for_http())
        .layer(cors)
        .with_state(app_state)
}

/// A simple health check handler.
async fn health_check_handler() -> &'static str {
    "OK"
}

/// The handler for `GET /` and `GET /signal`.
/// Responds with the bare signal token as plain text.
async fn signal_handler(
    State(state): State<AppState>,
    Query(params): Query<SignalParams>,
) -> Result<&'static str> {
    let signal = assess_signal(
        state.candles.as_ref(),
        &state.strategy,
        &params.exchange,
        &params.pair,
        &params.period,
    )
    .await?;

    Ok(signal.as_str())
}

/// The handler for `GET /api/signal`.
async fn signal_json_handler(
    State(state): State<AppState>,
    Query(params): Query<SignalParams>,
) -> Result<Json<SignalResponse>> {
    let signal = assess_signal(
        state.candles.as_ref(),
        &state.strategy,
        &params.exchange,
        &params.pair,
        &params.period,
    )
    .await?;

    Ok(Json(SignalResponse {
        exchange: params.exchange,
        pair: params.pair,
        period: params.period,
        signal,
    }))
}

/// Fetches candles for one pair and classifies the latest SMA crossover.
///
/// The period is parsed before any network traffic. A series shorter than the
/// strategy's lookback is reported as `Error::InsufficientData` and never
/// reaches the classifier.
pub async fn assess_signal(
    candles: &dyn CandleSource,
    strategy: &SmaCrossover,
    exchange: &str,
    pair: &str,
    period: &str,
) -> Result<Signal> {
    let period: Period = period.parse()?;
    let required = strategy.required_len();

    let fetched = candles
        .fetch_candles(exchange, pair, period, required)
        .await?;

    let series = PriceSeries::from_candles(&fetched).with_min_len(required);
    if !series.is_valid() {
        return Err(Error::InsufficientData {
            received: series.len(),
            required,
        });
    }

    let signal = strategy.generate(&series);
    tracing::info!(exchange, pair, %period, candles = series.len(), %signal, "Generated signal.");

    Ok(signal)
}

/// The main entry point for running the web server.
///
/// This function sets up the TCP listener and serves the application router.
/// It will run forever until the process is terminated.
pub async fn run(settings: ServerSettings, app_state: AppState) -> Result<()> {
    let app = create_router(app_state);

    let address = format!("{}:{}", settings.host, settings.port);
    tracing::info!("Web server listening on {}", address);

    let listener = TcpListener::bind(&address).await.map_err(Error::ServerBindError)?;

    axum::serve(listener, app.into_make_service())
        .await
        .map_err(Error::ServeError)?;

    Ok(())
}
