use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use stockradar_core::compare::run_comparison;
use stockradar_core::domain::report::ComparisonReport;
use stockradar_core::provider::{FundamentalsProvider, StaticFundamentalsProvider};
use stockradar_core::scoring::classify::ProfileRules;
use stockradar_core::scoring::normalize::ScoringConfig;

const MAX_CODES_PER_REQUEST: usize = 50;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let settings = stockradar_core::config::Settings::from_env()?;
    let _sentry_guard = init_sentry(&settings);

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer())
        .with(sentry_tracing::layer())
        .init();

    let config = ScoringConfig::from_env();
    tracing::info!(?config, "scoring configuration loaded");

    let state = AppState {
        provider: Arc::new(StaticFundamentalsProvider::synthetic()),
        config,
        rules: Arc::new(ProfileRules::default()),
    };

    let app = Router::new()
        .route("/healthz", get(healthz))
        .route("/compare", post(compare))
        .with_state(state)
        .layer(TraceLayer::new_for_http());

    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(3000);
    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], port));

    tracing::info!(%addr, "api listening");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn healthz() -> &'static str {
    "ok"
}

#[derive(Clone)]
struct AppState {
    provider: Arc<dyn FundamentalsProvider>,
    config: ScoringConfig,
    rules: Arc<ProfileRules>,
}

#[derive(Debug, Deserialize)]
struct CompareParams {
    codes: Vec<String>,
}

async fn compare(
    State(state): State<AppState>,
    Json(params): Json<CompareParams>,
) -> Result<Json<ComparisonReport>, StatusCode> {
    if params.codes.is_empty() || params.codes.len() > MAX_CODES_PER_REQUEST {
        return Err(StatusCode::BAD_REQUEST);
    }

    let report = run_comparison(
        state.provider.as_ref(),
        &params.codes,
        &state.config,
        &state.rules,
    )
    .await
    .map_err(|e| {
        sentry_anyhow::capture_anyhow(&e);
        tracing::error!(error = %e, "comparison failed");
        StatusCode::INTERNAL_SERVER_ERROR
    })?;

    Ok(Json(report))
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
}

fn init_sentry(settings: &stockradar_core::config::Settings) -> Option<sentry::ClientInitGuard> {
    let dsn = settings.sentry_dsn.as_deref()?;
    Some(sentry::init((
        dsn,
        sentry::ClientOptions {
            release: sentry::release_name!(),
            ..Default::default()
        },
    )))
}
