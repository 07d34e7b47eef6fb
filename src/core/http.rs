//! HTTP dashboard server using Axum

use axum::{
    extract::{Query, Request, State},
    http::StatusCode,
    middleware::Next,
    response::{Html, IntoResponse, Json, Response},
    routing::get,
    Router,
};
use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Instant;
use tower::ServiceBuilder;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::{info, Level};

use crate::config::{InputDefaults, Settings};
use crate::core::clock::{Clock, SystemClock};
use crate::core::pipeline::{AnalysisPipeline, PipelineError, RunResult};
use crate::dashboard::html::render_page;
use crate::dashboard::view::DashboardView;
use crate::metrics::Metrics;
use crate::models::run::RunInputs;
use crate::services::market_data::MarketDataProvider;
use crate::services::yahoo::YahooFinanceClient;

pub const SERVICE_NAME: &str = "stockdash";

#[derive(Clone)]
pub struct AppState {
    pub metrics: Arc<Metrics>,
    pub start_time: Arc<Instant>,
    pub pipeline: AnalysisPipeline,
    pub clock: Arc<dyn Clock>,
    pub defaults: InputDefaults,
}

impl AppState {
    pub fn new(
        provider: Arc<dyn MarketDataProvider>,
        clock: Arc<dyn Clock>,
        settings: &Settings,
        metrics: Arc<Metrics>,
    ) -> Self {
        let pipeline = AnalysisPipeline::new(provider, settings.analysis.clone())
            .with_metrics(metrics.clone());
        Self {
            metrics,
            start_time: Arc::new(Instant::now()),
            pipeline,
            clock,
            defaults: settings.inputs.clone(),
        }
    }
}

/// Liveness only; there is no backing store to probe
const HEALTHY: &str = "healthy";

/// Raw query string; dates are parsed by hand so errors can name the field
#[derive(Debug, Default, Deserialize)]
pub struct AnalysisQuery {
    pub symbol: Option<String>,
    pub start: Option<String>,
    pub end: Option<String>,
}

impl AnalysisQuery {
    pub fn resolve(&self, defaults: &InputDefaults, clock: &dyn Clock) -> Result<RunInputs, String> {
        let start = parse_date_field("start", self.start.as_deref())?;
        let end = parse_date_field("end", self.end.as_deref())?;
        // An empty form field means the field was left alone
        let symbol = self.symbol.as_deref().filter(|s| !s.trim().is_empty());
        Ok(RunInputs::resolve(
            symbol,
            start,
            end,
            defaults,
            clock,
        ))
    }
}

/// Empty form fields count as unset
fn parse_date_field(field: &str, raw: Option<&str>) -> Result<Option<NaiveDate>, String> {
    match raw.map(str::trim).filter(|s| !s.is_empty()) {
        None => Ok(None),
        Some(value) => NaiveDate::parse_from_str(value, "%Y-%m-%d")
            .map(Some)
            .map_err(|e| format!("invalid {} date {:?}: {}", field, value, e)),
    }
}

pub async fn health_check(State(state): State<AppState>) -> Result<Json<Value>, StatusCode> {
    let uptime_seconds = state.start_time.elapsed().as_secs();
    Ok(Json(json!({
        "status": HEALTHY,
        "uptime_seconds": uptime_seconds,
        "service": SERVICE_NAME
    })))
}

pub async fn metrics_handler(State(state): State<AppState>) -> Result<String, StatusCode> {
    state
        .metrics
        .export()
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)
}

async fn run_view(state: &AppState, query: &AnalysisQuery) -> Result<(DashboardView, RunResult), String> {
    let inputs = query.resolve(&state.defaults, state.clock.as_ref())?;
    let result = state.pipeline.run(&inputs).await;
    let view = DashboardView::from_result(&inputs, &result);
    Ok((view, result))
}

fn status_for(result: &RunResult) -> StatusCode {
    match result {
        Ok(_) => StatusCode::OK,
        Err(PipelineError::NoData { .. }) => StatusCode::NOT_FOUND,
        Err(PipelineError::Fetch(_)) => StatusCode::BAD_GATEWAY,
        Err(PipelineError::Settings(_)) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// HTML dashboard; every request is a fresh pipeline run
async fn dashboard_page(
    State(state): State<AppState>,
    Query(query): Query<AnalysisQuery>,
) -> Response {
    match run_view(&state, &query).await {
        Ok((view, result)) => (status_for(&result), Html(render_page(&view))).into_response(),
        Err(message) => (StatusCode::BAD_REQUEST, message).into_response(),
    }
}

/// JSON variant of the dashboard
async fn analysis_api(
    State(state): State<AppState>,
    Query(query): Query<AnalysisQuery>,
) -> Response {
    match run_view(&state, &query).await {
        Ok((view, result)) => (status_for(&result), Json(view)).into_response(),
        Err(message) => (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": message })),
        )
            .into_response(),
    }
}

/// Middleware to track HTTP request metrics
async fn metrics_middleware(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let start = Instant::now();
    let method = request.method().clone();
    let path = request.uri().path().to_string();

    state.metrics.http_requests_in_flight.inc();
    let response = next.run(request).await;
    let status = response.status();
    let duration = start.elapsed();
    state.metrics.http_requests_in_flight.dec();

    state.metrics.http_requests_total.inc();
    state
        .metrics
        .http_request_duration_seconds
        .observe(duration.as_secs_f64());

    if status.is_server_error() {
        tracing::error!(
            method = %method,
            path = %path,
            status = %status,
            duration_ms = duration.as_millis(),
            "HTTP request error"
        );
    }

    response
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(dashboard_page))
        .route("/api/analysis", get(analysis_api))
        .route("/health", get(health_check))
        .route("/metrics", get(metrics_handler))
        .layer(
            ServiceBuilder::new()
                .layer(
                    TraceLayer::new_for_http()
                        .make_span_with(DefaultMakeSpan::new().level(Level::DEBUG))
                        .on_request(DefaultOnRequest::new().level(Level::DEBUG))
                        .on_response(DefaultOnResponse::new().level(Level::DEBUG)),
                )
                .layer(axum::middleware::from_fn_with_state(
                    state.clone(),
                    metrics_middleware,
                ))
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}

pub async fn start_server(settings: Settings) -> Result<(), Box<dyn std::error::Error>> {
    let metrics = Arc::new(Metrics::new()?);
    let provider: Arc<dyn MarketDataProvider> =
        Arc::new(YahooFinanceClient::with_base_url(settings.yahoo_base_url.clone()));
    let state = AppState::new(provider, Arc::new(SystemClock), &settings, metrics);

    let app = create_router(state);
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", settings.port)).await?;

    info!(port = settings.port, "HTTP server listening on port {}", settings.port);
    info!("Dashboard available at http://0.0.0.0:{}/", settings.port);
    axum::serve(listener, app).await?;

    Ok(())
}
