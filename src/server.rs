//! HTTP front end for the dashboard.
//!
//! The dataset and layout are built once and shared read-only between
//! requests. Every chart request carries the full selection, so the server
//! keeps no per-session state and one session's selection cannot leak into
//! another's.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Query, State},
    http::{StatusCode, header},
    response::{Html, IntoResponse, Response},
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, warn};

use crate::config::Settings;
use crate::dashboard::{Layout, build_layout, update_chart};
use crate::data::{Dataset, write_csv};
use crate::error::{DashboardError, Result};
use crate::interface::{render_chart_svg, render_dashboard, render_error_svg};
use crate::models::{ChartSpec, Metric, SelectionState};

#[derive(Clone)]
pub struct AppState {
    dataset: Arc<Dataset>,
    layout: Arc<Layout>,
}

impl AppState {
    pub fn new(dataset: Dataset) -> Self {
        let layout = build_layout(&dataset);
        Self {
            dataset: Arc::new(dataset),
            layout: Arc::new(layout),
        }
    }
}

/// Body of `POST /api/chart`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum ChartResponse {
    Ok { chart: ChartSpec },
    Error { message: String },
}

#[derive(Debug, Serialize)]
struct ApiError {
    error: String,
}

#[derive(Debug, Deserialize)]
struct TableQuery {
    #[serde(default)]
    page: usize,
}

#[derive(Debug, Deserialize)]
struct ChartQuery {
    metric: Option<String>,
    #[serde(default)]
    page: usize,
    rows: Option<String>,
}

/// Parse a comma-separated list of row indices; blank means no selection.
fn parse_rows(raw: Option<&str>) -> Result<Option<Vec<usize>>> {
    let Some(raw) = raw.map(str::trim).filter(|s| !s.is_empty()) else {
        return Ok(None);
    };

    raw.split(',')
        .map(|part| {
            part.trim()
                .parse::<usize>()
                .map_err(|_| DashboardError::InvalidInput(format!("invalid row index '{}'", part)))
        })
        .collect::<Result<Vec<_>>>()
        .map(Some)
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/healthz", get(healthz))
        .route("/api/layout", get(layout))
        .route("/api/table", get(table_page))
        .route("/api/chart", post(chart_json))
        .route("/api/chart.svg", get(chart_svg))
        .route("/api/export.csv", get(export_csv))
        .with_state(state)
}

fn log_rejection(e: &DashboardError) {
    if e.is_interaction_error() {
        warn!(error = %e, "chart request rejected");
    } else {
        error!(error = %e, "chart request failed");
    }
}

fn internal_error(e: DashboardError) -> Response {
    error!(error = %e, "request failed");
    (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response()
}

async fn index(State(state): State<AppState>) -> Response {
    let Some(first_page) = state.layout.table.page(&state.dataset, 0) else {
        return internal_error(DashboardError::InvalidInput("table has no pages".into()));
    };
    match render_dashboard(&state.layout, &first_page) {
        Ok(html) => Html(html).into_response(),
        Err(e) => internal_error(e),
    }
}

async fn healthz() -> &'static str {
    "ok"
}

async fn layout(State(state): State<AppState>) -> Json<Layout> {
    Json(state.layout.as_ref().clone())
}

async fn table_page(State(state): State<AppState>, Query(q): Query<TableQuery>) -> Response {
    match state.layout.table.page(&state.dataset, q.page) {
        Some(page) => Json(page).into_response(),
        None => (
            StatusCode::NOT_FOUND,
            Json(ApiError {
                error: format!("page {} does not exist", q.page),
            }),
        )
            .into_response(),
    }
}

async fn chart_json(
    State(state): State<AppState>,
    Json(selection): Json<SelectionState>,
) -> (StatusCode, Json<ChartResponse>) {
    debug!(?selection, "chart requested");
    match update_chart(&state.dataset, &selection) {
        Ok(chart) => (StatusCode::OK, Json(ChartResponse::Ok { chart })),
        Err(e) => {
            log_rejection(&e);
            (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(ChartResponse::Error {
                    message: e.to_string(),
                }),
            )
        }
    }
}

fn svg_response(status: StatusCode, svg: Result<String>) -> Response {
    match svg {
        Ok(body) => (status, [(header::CONTENT_TYPE, "image/svg+xml")], body).into_response(),
        Err(e) => internal_error(e),
    }
}

async fn chart_svg(State(state): State<AppState>, Query(q): Query<ChartQuery>) -> Response {
    let metric = q
        .metric
        .unwrap_or_else(|| Metric::default().as_str().to_string());

    let chart = parse_rows(q.rows.as_deref()).and_then(|selected_rows| {
        let selection = SelectionState {
            metric: metric.clone(),
            page: q.page,
            selected_rows,
        };
        debug!(?selection, "chart image requested");
        update_chart(&state.dataset, &selection)
    });

    match chart {
        Ok(chart) => svg_response(StatusCode::OK, render_chart_svg(&chart, &metric)),
        Err(e) => {
            log_rejection(&e);
            svg_response(
                StatusCode::UNPROCESSABLE_ENTITY,
                render_error_svg(&e.to_string()),
            )
        }
    }
}

async fn export_csv(State(state): State<AppState>) -> Response {
    let mut body = Vec::new();
    match write_csv(&state.dataset, &mut body) {
        Ok(()) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "text/csv; charset=utf-8")],
            body,
        )
            .into_response(),
        Err(e) => internal_error(e),
    }
}

/// Serve the dashboard until the process is stopped.
pub async fn serve(settings: &Settings, dataset: Dataset) -> Result<()> {
    let addr: SocketAddr = settings.bind_addr.parse().map_err(|_| {
        DashboardError::InvalidInput(format!("invalid bind address '{}'", settings.bind_addr))
    })?;

    let rows = dataset.len();
    let app = build_router(AppState::new(dataset));

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, rows, "dashboard listening");
    axum::serve(listener, app).await?;
    Ok(())
}
