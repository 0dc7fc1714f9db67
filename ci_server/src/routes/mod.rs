//! CI status HTTP routes — pipeline badges and job step metrics.

pub mod jobs;
pub mod pipelines;

use std::sync::Arc;

use axum::routing::get;
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::config::StatusConfig;
use crate::services::badge_service::BadgeSources;
use crate::store::{EventStore, JobStore, MemoryStore, PipelineStore};
use crate::workflow::{EdgeWorkflowParser, WorkflowParser};

/// Shared state for status route handlers.
#[derive(Clone)]
pub struct StatusRouterState {
    pub pipelines: Arc<dyn PipelineStore>,
    pub events: Arc<dyn EventStore>,
    pub jobs: Arc<dyn JobStore>,
    pub parser: Arc<dyn WorkflowParser>,
    pub config: StatusConfig,
}

impl StatusRouterState {
    /// State backed by a single in-memory store and the edge-list parser.
    pub fn in_memory(store: Arc<MemoryStore>, config: StatusConfig) -> Self {
        Self {
            pipelines: store.clone(),
            events: store.clone(),
            jobs: store,
            parser: Arc::new(EdgeWorkflowParser),
            config,
        }
    }

    pub fn badge_sources(&self) -> BadgeSources<'_> {
        BadgeSources {
            pipelines: self.pipelines.as_ref(),
            events: self.events.as_ref(),
            parser: self.parser.as_ref(),
            limits: self.config.reachability,
        }
    }
}

/// Build the status router.
pub fn status_router(state: StatusRouterState) -> Router {
    Router::new()
        // Badge
        .route("/pipelines/{id}/badge", get(pipelines::badge))
        // Metrics API
        .route("/jobs/{id}/metrics/steps", get(jobs::step_metrics))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
