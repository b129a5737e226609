//! HTTP server for the dashboard.
//!
//! Routes:
//!   GET /           the dashboard; `toggle` and `open` query parameters
//!   GET /health     liveness probe
//!   GET /api/views  the five views and their insights as JSON

use crate::config::ServerConfig;
use crate::dashboard::Dashboard;
use crate::error::DashboardError;
use crate::models::{Aggregates, Insights, ViewId};
use crate::report::render_dashboard;
use crate::toggle::CardState;
use anyhow::Result;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::{debug, error, info};

/// Query parameters of a click on a card header.
#[derive(Debug, Default, Deserialize)]
pub struct ToggleQuery {
    /// Id of the card whose header was clicked.
    pub toggle: Option<String>,
    /// Comma-separated ids of the cards open before the click.
    pub open: Option<String>,
}

impl ToggleQuery {
    /// Resolve the query into the next card state.
    pub fn next_state(&self) -> Result<CardState, DashboardError> {
        let trigger = self
            .toggle
            .as_deref()
            .map(str::parse::<ViewId>)
            .transpose()?;
        let current = CardState::decode(self.open.as_deref())?;

        Ok(current.toggle(trigger))
    }
}

impl IntoResponse for DashboardError {
    fn into_response(self) -> Response {
        let status = match self {
            DashboardError::UnknownView(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, self.to_string()).into_response()
    }
}

/// Build the router over a shared dashboard.
pub fn router(dashboard: Arc<Dashboard>, debug: bool) -> Router {
    let app = Router::new()
        .route("/", get(index))
        .route("/health", get(|| async { "ok" }))
        .route("/api/views", get(export_views))
        .with_state(dashboard);

    if debug {
        app.layer(TraceLayer::new_for_http())
    } else {
        app
    }
}

/// Bind and serve until the process is stopped.
pub async fn serve(dashboard: Arc<Dashboard>, config: &ServerConfig) -> Result<()> {
    let addr = format!("{}:{}", config.host, config.port);

    let listener = match TcpListener::bind(&addr).await {
        Ok(listener) => {
            info!("Dashboard listening on http://{}", addr);
            listener
        }
        Err(e) => {
            if e.kind() == std::io::ErrorKind::AddrInUse {
                error!("Port {} is already in use", config.port);
            } else {
                error!("Failed to bind to {}: {}", addr, e);
            }
            return Err(e.into());
        }
    };

    axum::serve(listener, router(dashboard, config.debug)).await?;
    Ok(())
}

/// GET /
async fn index(
    State(dashboard): State<Arc<Dashboard>>,
    Query(query): Query<ToggleQuery>,
) -> Result<Html<String>, DashboardError> {
    let state = query.next_state()?;
    debug!("Toggle {:?} -> {:?}", query.toggle, state.flags());

    Ok(Html(render_dashboard(&dashboard, &state)))
}

/// One view in the JSON export.
#[derive(Debug, Serialize)]
pub struct ViewSummary<'a> {
    pub id: ViewId,
    pub title: &'static str,
    pub insights: &'a Insights,
}

/// Body of GET /api/views.
#[derive(Debug, Serialize)]
pub struct ViewsExport<'a> {
    pub source: String,
    pub loaded_at: DateTime<Utc>,
    pub transactions: usize,
    pub views: Vec<ViewSummary<'a>>,
    pub aggregates: &'a Aggregates,
}

impl<'a> ViewsExport<'a> {
    pub fn from_dashboard(dashboard: &'a Dashboard) -> Self {
        Self {
            source: dashboard.source.display().to_string(),
            loaded_at: dashboard.loaded_at,
            transactions: dashboard.transaction_count,
            views: dashboard
                .insights
                .iter()
                .map(|(id, insights)| ViewSummary {
                    id,
                    title: id.title(),
                    insights,
                })
                .collect(),
            aggregates: &dashboard.aggregates,
        }
    }
}

/// GET /api/views
async fn export_views(State(dashboard): State<Arc<Dashboard>>) -> Response {
    Json(ViewsExport::from_dashboard(&dashboard)).into_response()
}
