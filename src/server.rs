use std::net::SocketAddr;
use std::path::Path;

use anyhow::Context;
use axum::{
    Json, Router,
    extract::{ConnectInfo, Query, Request, State},
    http::StatusCode,
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::get,
};
use serde::Deserialize;
use thiserror::Error;
use tokio::net::TcpListener;
use tower_http::{compression::CompressionLayer, services::ServeDir};

use crate::api;
use crate::config::ServerConfig;
use crate::data::loader::LoadError;
use crate::data::model::PriceListResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Failures surfaced to HTTP clients as a plain-text body.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Load(#[from] LoadError),

    #[error("request worker failed: {0}")]
    Worker(#[from] tokio::task::JoinError),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Load(LoadError::SourceUnavailable { .. }) => StatusCode::SERVICE_UNAVAILABLE,
            ApiError::Load(LoadError::ParseFailure { .. }) | ApiError::Worker(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        log::error!("{self}");
        (self.status(), self.to_string()).into_response()
    }
}

// ---------------------------------------------------------------------------
// Router
// ---------------------------------------------------------------------------

/// Raw query parameters; both are optional and never rejected.
#[derive(Debug, Default, Deserialize)]
pub struct PageParams {
    pub getpage: Option<String>,
    pub querystr: Option<String>,
}

/// `getpage` as an integer; missing or garbage reads as 0 (the first page).
///
/// A value too large for `i64` is garbage too and also lands on page 1,
/// rather than saturating to a page past the end.
pub fn parse_page(raw: Option<&str>) -> i64 {
    raw.and_then(|s| s.trim().parse().ok()).unwrap_or(0)
}

/// Routes:
/// - `GET /pricelist?getpage=N`
/// - `GET /pricelistquery?getpage=N&querystr=Q`
/// - anything else is served from `static_dir`
pub fn app_router(state: AppState, static_dir: &Path) -> Router {
    Router::new()
        .route("/pricelist", get(price_list))
        .route("/pricelistquery", get(price_list_query))
        .fallback_service(ServeDir::new(static_dir))
        .layer(middleware::from_fn_with_state(state.clone(), log_requests))
        .layer(CompressionLayer::new())
        .with_state(state)
}

pub async fn run_server(config: ServerConfig) -> anyhow::Result<()> {
    let addr = config.socket_addr()?;
    let app = app_router(AppState::from_config(&config), &config.static_dir);

    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("binding {addr}"))?;
    log::info!(
        "serving {} on http://{addr} (static files from {})",
        config.source.display(),
        config.static_dir.display()
    );
    serve(listener, app).await
}

/// Serve `app` on an already bound listener, exposing peer addresses to handlers.
pub async fn serve(listener: TcpListener, app: Router) -> anyhow::Result<()> {
    axum::serve(listener, app.into_make_service_with_connect_info::<SocketAddr>())
        .await
        .context("http server stopped")
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

async fn price_list(
    State(state): State<AppState>,
    Query(params): Query<PageParams>,
) -> Result<Json<PriceListResponse>, ApiError> {
    let page = parse_page(params.getpage.as_deref());
    let source = state.source.clone();

    // The source is re-read on every request; keep that off the async workers.
    let response = tokio::task::spawn_blocking(move || api::price_list(&source, page)).await??;
    Ok(Json(response))
}

async fn price_list_query(
    State(state): State<AppState>,
    Query(params): Query<PageParams>,
) -> Result<Json<PriceListResponse>, ApiError> {
    let page = parse_page(params.getpage.as_deref());
    let query = params.querystr.unwrap_or_default();
    let source = state.source.clone();

    let response =
        tokio::task::spawn_blocking(move || api::price_list_query(&source, page, &query)).await??;
    Ok(Json(response))
}

async fn log_requests(State(state): State<AppState>, request: Request, next: Next) -> Response {
    let client = request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.to_string())
        .unwrap_or_else(|| "-".to_string());
    let method = request.method().clone();
    let uri = request.uri().clone();

    let response = next.run(request).await;

    state.request_log.record(
        &client,
        &format!("{method} {uri} -> {}", response.status().as_u16()),
    );
    response
}
