//! Entity stores the status endpoints read from.
//!
//! Persistence lives behind these traits; the request path only ever reads.

pub mod memory;

use async_trait::async_trait;
use thiserror::Error;

use crate::models::build::CiBuild;
use crate::models::event::CiEvent;
use crate::models::job::CiJob;
use crate::models::pipeline::CiPipeline;
use crate::models::step_metric::{StepMetric, StepMetricsQuery};

pub use memory::MemoryStore;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store unavailable: {0}")]
    Unavailable(String),

    #[error("store query failed: {0}")]
    Query(String),
}

pub type StoreResult<T> = Result<T, StoreError>;

#[async_trait]
pub trait PipelineStore: Send + Sync {
    async fn get_pipeline(&self, id: i64) -> StoreResult<Option<CiPipeline>>;

    /// Events of a pipeline, oldest first (ties by id).
    async fn list_events(&self, pipeline_id: i64) -> StoreResult<Vec<CiEvent>>;
}

#[async_trait]
pub trait EventStore: Send + Sync {
    /// Builds of an event, newest first.
    async fn list_builds(&self, event_id: i64) -> StoreResult<Vec<CiBuild>>;
}

#[async_trait]
pub trait JobStore: Send + Sync {
    async fn get_job(&self, id: i64) -> StoreResult<Option<CiJob>>;

    /// Step metrics across the job's builds, oldest first.
    async fn step_metrics(
        &self,
        job_id: i64,
        query: &StepMetricsQuery,
    ) -> StoreResult<Vec<StepMetric>>;
}
