//! Fixture seeder — loads pipelines, jobs, events, builds and step metrics
//! from a JSON document into the in-memory store.

use std::path::Path;

use serde::Deserialize;

use crate::models::build::CiBuild;
use crate::models::event::CiEvent;
use crate::models::job::CiJob;
use crate::models::pipeline::CiPipeline;
use crate::models::step_metric::StepMetric;
use crate::store::MemoryStore;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Fixtures {
    #[serde(default)]
    pub pipelines: Vec<CiPipeline>,
    #[serde(default)]
    pub jobs: Vec<CiJob>,
    #[serde(default)]
    pub events: Vec<CiEvent>,
    #[serde(default)]
    pub builds: Vec<CiBuild>,
    #[serde(default)]
    pub step_metrics: Vec<StepMetric>,
}

/// Row counts loaded by a seed run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SeedSummary {
    pub pipelines: usize,
    pub jobs: usize,
    pub events: usize,
    pub builds: usize,
    pub step_metrics: usize,
}

/// Seed the store from a fixture file.
///
/// Entities keyed by id replace earlier rows with the same id; step metrics
/// are appended.
pub fn seed_from_file(store: &MemoryStore, path: &Path) -> anyhow::Result<SeedSummary> {
    let raw = std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("reading fixtures {}: {e}", path.display()))?;
    let summary = seed_from_str(store, &raw)?;
    tracing::info!(
        path = %path.display(),
        pipelines = summary.pipelines,
        events = summary.events,
        builds = summary.builds,
        "Fixtures loaded"
    );
    Ok(summary)
}

pub fn seed_from_str(store: &MemoryStore, raw: &str) -> anyhow::Result<SeedSummary> {
    let fixtures: Fixtures =
        serde_json::from_str(raw).map_err(|e| anyhow::anyhow!("invalid fixtures json: {e}"))?;
    seed(store, fixtures)
}

pub fn seed(store: &MemoryStore, fixtures: Fixtures) -> anyhow::Result<SeedSummary> {
    let summary = SeedSummary {
        pipelines: fixtures.pipelines.len(),
        jobs: fixtures.jobs.len(),
        events: fixtures.events.len(),
        builds: fixtures.builds.len(),
        step_metrics: fixtures.step_metrics.len(),
    };

    for pipeline in fixtures.pipelines {
        store.insert_pipeline(pipeline)?;
    }
    for job in fixtures.jobs {
        store.insert_job(job)?;
    }
    for event in fixtures.events {
        store.insert_event(event)?;
    }
    for build in fixtures.builds {
        store.insert_build(build)?;
    }
    for metric in fixtures.step_metrics {
        store.insert_step_metric(metric)?;
    }

    Ok(summary)
}
