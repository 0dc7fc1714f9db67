//! `GET /pipelines/{id}/badge` — redirect to the pipeline's badge image.
//!
//! Badges are embedded in READMEs and dashboards, so this route only ever
//! answers with a redirect. Failures redirect to the default badge.

use axum::extract::rejection::PathRejection;
use axum::extract::{Path, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};

use super::StatusRouterState;
use crate::badge::{BadgeOutcome, BadgeTemplate, DegradedReason};
use crate::services::badge_service;

/// Takes the path extraction as a `Result` so that ids axum cannot decode
/// (e.g. invalid UTF-8) redirect like any other unknown pipeline.
pub async fn badge(
    State(state): State<StatusRouterState>,
    path: Result<Path<String>, PathRejection>,
) -> Response {
    let pipeline_id = match &path {
        Ok(Path(id)) => id.parse::<i64>().ok(),
        Err(_) => None,
    };
    let outcome = match pipeline_id {
        Some(pipeline_id) => badge_service::pipeline_badge(state.badge_sources(), pipeline_id).await,
        None => {
            match path {
                Ok(Path(id)) => tracing::debug!(%id, "Badge requested for malformed pipeline id"),
                Err(rejection) => {
                    tracing::debug!(error = %rejection, "Badge requested with undecodable pipeline id")
                }
            }
            crate::metrics::badge_degraded(DegradedReason::PipelineNotFound.kind());
            BadgeOutcome::degraded(DegradedReason::PipelineNotFound)
        }
    };

    redirect(&state.config.badge_template, &outcome)
}

fn redirect(template: &BadgeTemplate, outcome: &BadgeOutcome) -> Response {
    let location = match outcome {
        BadgeOutcome::Computed(status) => template.location(status),
        BadgeOutcome::Degraded { .. } => template.default_location(),
    };
    (StatusCode::FOUND, [(header::LOCATION, location)]).into_response()
}
