//! HTTP API server and route handlers

use super::static_files;
use crate::{
    analytics::AnalyticsClient,
    config::ServerConfig,
    error::{MissionControlError, Result},
    store::DashboardStore,
    types::{
        Agent, AgentPatch, CalendarEvent, DashboardStats, Memory, NewMemory, PipelineBoard, Task,
        TaskPatch, TEAM_MEMBERS,
    },
};
use axum::{
    extract::{Path, Query, Request, State},
    http::{header, Method, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, patch},
    Json, Router, ServiceExt,
};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use tower::Layer;
use tower_http::{
    cors::{Any, CorsLayer},
    normalize_path::NormalizePathLayer,
    trace::TraceLayer,
};
use tracing::{debug, info};

/// Shared handler state: the store and collaborators, injected rather than
/// held as process globals so tests run against isolated instances.
#[derive(Clone)]
pub struct AppState {
    /// Dashboard collections
    pub store: Arc<DashboardStore>,
    /// Mixpanel client for the stats endpoint
    pub analytics: Arc<AnalyticsClient>,
    /// Service configuration (static asset root)
    pub config: Arc<ServerConfig>,
}

/// Error wrapper that renders as a JSON response
///
/// NotFound variants map to 404, everything else to 500, both with an
/// `{"error": message}` body.
pub struct ApiError(MissionControlError);

impl From<MissionControlError> for ApiError {
    fn from(err: MissionControlError) -> Self {
        ApiError(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = if self.0.is_not_found() {
            StatusCode::NOT_FOUND
        } else {
            StatusCode::INTERNAL_SERVER_ERROR
        };
        (status, Json(json!({ "error": self.0.to_string() }))).into_response()
    }
}

/// Dashboard API server
pub struct ApiServer {
    config: ServerConfig,
    store: Arc<DashboardStore>,
    analytics: Arc<AnalyticsClient>,
}

impl ApiServer {
    /// Create a server with a freshly seeded store
    pub fn new(config: ServerConfig) -> Result<Self> {
        let analytics = Arc::new(AnalyticsClient::new(config.analytics.clone())?);
        Ok(Self {
            config,
            store: Arc::new(DashboardStore::new()),
            analytics,
        })
    }

    /// The store backing this server
    pub fn store(&self) -> &Arc<DashboardStore> {
        &self.store
    }

    /// Build the router
    ///
    /// CORS is wide open: any origin, the four methods the dashboard uses,
    /// Content-Type allowed. Preflight OPTIONS requests are answered by the
    /// CORS layer for every path.
    fn build_router(state: AppState) -> Router {
        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods([Method::GET, Method::POST, Method::PATCH, Method::OPTIONS])
            .allow_headers([header::CONTENT_TYPE]);

        Router::new()
            .route("/api/stats", get(stats_handler))
            .route("/api/tasks", get(list_tasks_handler))
            .route("/api/tasks/:id", patch(update_task_handler))
            .route("/api/agents", get(agents_handler))
            .route("/api/agents/:name", patch(update_agent_handler))
            .route("/api/memories", get(list_memories_handler).post(create_memory_handler))
            .route("/api/memories/:id", get(get_memory_handler))
            .route("/api/pipeline", get(pipeline_handler))
            .route("/api/calendar", get(calendar_handler))
            .fallback(static_files::static_handler)
            .with_state(state)
            .layer(cors)
            .layer(TraceLayer::new_for_http())
    }

    /// Bind the configured address and serve until shutdown
    pub async fn serve(self) -> Result<()> {
        let addr = self.config.addr;
        let listener = tokio::net::TcpListener::bind(addr).await?;
        self.serve_on(listener).await
    }

    /// Serve on an already-bound listener (tests bind port 0)
    pub async fn serve_on(self, listener: tokio::net::TcpListener) -> Result<()> {
        let state = AppState {
            store: self.store.clone(),
            analytics: self.analytics.clone(),
            config: Arc::new(self.config),
        };
        let router = Self::build_router(state);

        // Trailing slashes on API paths are tolerated; normalization runs
        // before routing so `/api/tasks/` hits the same handler.
        let app = NormalizePathLayer::trim_trailing_slash().layer(router);

        let addr = listener.local_addr()?;
        info!("Mission Control API running on port {}", addr.port());

        axum::serve(listener, ServiceExt::<Request>::into_make_service(app)).await?;
        Ok(())
    }
}

/// Aggregate counters, blended with one best-effort analytics fetch
async fn stats_handler(State(state): State<AppState>) -> Json<DashboardStats> {
    let counters = state.store.stats().await;
    let dau = state.analytics.dau_snapshot().await;

    Json(DashboardStats {
        active_tasks: counters.active_tasks,
        team_members: TEAM_MEMBERS,
        online_agents: counters.online_agents,
        completed_this_week: counters.completed_this_week,
        dau_trend: dau.trend,
        dau_data: dau.data,
    })
}

#[derive(Debug, Deserialize)]
struct TaskListQuery {
    status: Option<String>,
}

/// Task list, optionally filtered by exact status match
async fn list_tasks_handler(
    State(state): State<AppState>,
    Query(query): Query<TaskListQuery>,
) -> Json<Vec<Task>> {
    let tasks = state.store.list_tasks(query.status.as_deref()).await;
    Json(tasks)
}

/// Partial task update by id
async fn update_task_handler(
    State(state): State<AppState>,
    Path(id): Path<u32>,
    Json(patch): Json<TaskPatch>,
) -> std::result::Result<Json<Task>, ApiError> {
    debug!("Updating task {}", id);
    let task = state
        .store
        .update_task(id, patch)
        .await
        .ok_or(MissionControlError::TaskNotFound(id))?;
    Ok(Json(task))
}

/// Agent registry keyed by agent key
async fn agents_handler(
    State(state): State<AppState>,
) -> Json<std::collections::HashMap<String, Agent>> {
    Json(state.store.agents().await)
}

/// Partial agent update by key
async fn update_agent_handler(
    State(state): State<AppState>,
    Path(name): Path<String>,
    Json(patch): Json<AgentPatch>,
) -> std::result::Result<Json<Agent>, ApiError> {
    debug!("Updating agent {}", name);
    let agent = state
        .store
        .update_agent(&name, patch)
        .await
        .ok_or_else(|| MissionControlError::AgentNotFound(name))?;
    Ok(Json(agent))
}

/// Memory list, most recent first
async fn list_memories_handler(State(state): State<AppState>) -> Json<Vec<Memory>> {
    Json(state.store.list_memories().await)
}

/// Single memory by id
async fn get_memory_handler(
    State(state): State<AppState>,
    Path(id): Path<u32>,
) -> std::result::Result<Json<Memory>, ApiError> {
    let memory = state
        .store
        .get_memory(id)
        .await
        .ok_or(MissionControlError::MemoryNotFound(id))?;
    Ok(Json(memory))
}

/// Create a memory; id and date are server-assigned
async fn create_memory_handler(
    State(state): State<AppState>,
    Json(new): Json<NewMemory>,
) -> Json<Memory> {
    Json(state.store.add_memory(new).await)
}

/// The four-lane content pipeline
async fn pipeline_handler(State(state): State<AppState>) -> Json<PipelineBoard> {
    Json(state.store.pipeline())
}

/// Calendar events
async fn calendar_handler(State(state): State<AppState>) -> Json<Vec<CalendarEvent>> {
    Json(state.store.calendar())
}
