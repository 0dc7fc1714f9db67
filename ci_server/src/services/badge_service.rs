//! Pipeline badge computation.
//!
//! Resolves the pipeline's most recent event, aggregates its build statuses
//! against the number of jobs the event is expected to run, and returns a
//! [`BadgeOutcome`]. Every failure becomes a degraded outcome; nothing here
//! returns an error.

use crate::badge::{aggregate, BadgeOutcome, BadgeStatus, DegradedReason};
use crate::models::event::CiEvent;
use crate::store::{EventStore, PipelineStore};
use crate::workflow::{reachable, ReachabilityLimits, WorkflowParser};

/// Collaborators a badge is computed from.
#[derive(Clone, Copy)]
pub struct BadgeSources<'a> {
    pub pipelines: &'a dyn PipelineStore,
    pub events: &'a dyn EventStore,
    pub parser: &'a dyn WorkflowParser,
    pub limits: ReachabilityLimits,
}

/// Compute the badge for a pipeline.
pub async fn pipeline_badge(sources: BadgeSources<'_>, pipeline_id: i64) -> BadgeOutcome {
    let outcome = match compute(sources, pipeline_id).await {
        Ok(status) => BadgeOutcome::Computed(status),
        Err(reason) => BadgeOutcome::degraded(reason),
    };

    match &outcome {
        BadgeOutcome::Computed(status) => {
            tracing::debug!(pipeline_id, label = %status.label, color = %status.color, "Badge computed");
            crate::metrics::badge_rendered(&status.color);
        }
        BadgeOutcome::Degraded { reason } => {
            match reason {
                DegradedReason::Store(_) | DegradedReason::Workflow(_) => {
                    tracing::warn!(pipeline_id, %reason, "Serving default badge");
                }
                _ => tracing::debug!(pipeline_id, %reason, "Serving default badge"),
            }
            crate::metrics::badge_degraded(reason.kind());
        }
    }

    outcome
}

async fn compute(sources: BadgeSources<'_>, pipeline_id: i64) -> Result<BadgeStatus, DegradedReason> {
    let pipeline = sources
        .pipelines
        .get_pipeline(pipeline_id)
        .await
        .map_err(|e| DegradedReason::Store(e.to_string()))?
        .ok_or(DegradedReason::PipelineNotFound)?;

    let mut events = sources
        .pipelines
        .list_events(pipeline.id)
        .await
        .map_err(|e| DegradedReason::Store(e.to_string()))?;
    let event = events.pop().ok_or(DegradedReason::NoEvents)?;

    let mut builds = sources
        .events
        .list_builds(event.id)
        .await
        .map_err(|e| DegradedReason::Store(e.to_string()))?;
    if builds.is_empty() {
        return Err(DegradedReason::NoBuilds);
    }

    // Stores return newest first; restore trigger order.
    builds.reverse();
    let statuses: Vec<String> = builds.iter().map(|b| b.status.to_lowercase()).collect();

    let expected = expected_build_count(sources, &event)?;
    Ok(aggregate(&statuses, expected))
}

/// Number of jobs reachable from the event's start, or 0 without a graph.
fn expected_build_count(sources: BadgeSources<'_>, event: &CiEvent) -> Result<usize, DegradedReason> {
    let Some(graph) = &event.workflow_graph else {
        return Ok(0);
    };

    let jobs = reachable(sources.parser, graph, &event.start_from, event.pr_num, sources.limits)
        .map_err(|e| DegradedReason::Workflow(e.to_string()))?;

    crate::metrics::reachable_jobs(jobs.len());
    Ok(jobs.len())
}
