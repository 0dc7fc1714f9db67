//! `GET /jobs/{id}/metrics/steps` — step metrics for a job.

use axum::extract::rejection::{PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::Json;
use serde::Deserialize;

use super::StatusRouterState;
use crate::error::{ApiError, ApiResult, StatusError};
use crate::models::step_metric::{StepMetric, StepMetricsQuery};
use crate::services::step_metrics_service;

/// Raw query string. `stepName` omitted means every step; any other key is
/// rejected.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct StepMetricsParams {
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub step_name: Option<String>,
}

impl StepMetricsParams {
    pub fn into_query(self) -> Result<StepMetricsQuery, StatusError> {
        let start_time = self
            .start_time
            .map(|raw| step_metrics_service::parse_timestamp("startTime", &raw))
            .transpose()?;
        let end_time = self
            .end_time
            .map(|raw| step_metrics_service::parse_timestamp("endTime", &raw))
            .transpose()?;
        if self.step_name.as_deref() == Some("") {
            return Err(StatusError::BadRequest("stepName must not be empty".to_string()));
        }

        Ok(StepMetricsQuery { start_time, end_time, step_name: self.step_name })
    }
}

/// Extractor rejections are taken as `Result`s so that every failure is
/// answered with the JSON error body and counted.
pub async fn step_metrics(
    State(state): State<StatusRouterState>,
    path: Result<Path<String>, PathRejection>,
    query: Result<Query<StepMetricsParams>, QueryRejection>,
) -> ApiResult<Json<Vec<StepMetric>>> {
    let result = load(&state, path, query).await;
    crate::metrics::step_metrics_request(match &result {
        Ok(_) => "ok",
        Err(StatusError::NotFound(_)) => "not_found",
        Err(StatusError::BadRequest(_)) => "bad_request",
        Err(StatusError::Store(_)) => "error",
    });
    result.map(Json).map_err(ApiError::from)
}

async fn load(
    state: &StatusRouterState,
    path: Result<Path<String>, PathRejection>,
    query: Result<Query<StepMetricsParams>, QueryRejection>,
) -> Result<Vec<StepMetric>, StatusError> {
    let Query(params) = query.map_err(|rejection| StatusError::BadRequest(rejection.body_text()))?;
    let query = params.into_query()?;
    let job_id = job_id(path)?;
    step_metrics_service::get_step_metrics(state.jobs.as_ref(), job_id, &query).await
}

/// Job ids that are not integers cannot name a job, so they are not found
/// rather than malformed.
fn job_id(path: Result<Path<String>, PathRejection>) -> Result<i64, StatusError> {
    match path {
        Ok(Path(id)) => id.parse().map_err(|_| StatusError::NotFound(format!("Job {id}"))),
        Err(rejection) => {
            tracing::debug!(error = %rejection, "Undecodable job id");
            Err(StatusError::NotFound("Job".to_string()))
        }
    }
}
