//! In-memory store backed by `RwLock<HashMap>`s.
//!
//! Filled once by the seeder before the server starts accepting requests,
//! then read concurrently.

use std::collections::HashMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;

use super::{EventStore, JobStore, PipelineStore, StoreError, StoreResult};
use crate::models::build::CiBuild;
use crate::models::event::CiEvent;
use crate::models::job::CiJob;
use crate::models::pipeline::CiPipeline;
use crate::models::step_metric::{StepMetric, StepMetricsQuery};

#[derive(Debug, Default)]
struct Tables {
    pipelines: HashMap<i64, CiPipeline>,
    events: HashMap<i64, CiEvent>,
    builds: HashMap<i64, CiBuild>,
    jobs: HashMap<i64, CiJob>,
    step_metrics: Vec<StepMetric>,
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> StoreResult<RwLockReadGuard<'_, Tables>> {
        self.tables
            .read()
            .map_err(|_| StoreError::Unavailable("memory store lock poisoned".to_string()))
    }

    fn write(&self) -> StoreResult<RwLockWriteGuard<'_, Tables>> {
        self.tables
            .write()
            .map_err(|_| StoreError::Unavailable("memory store lock poisoned".to_string()))
    }

    pub fn insert_pipeline(&self, pipeline: CiPipeline) -> StoreResult<()> {
        self.write()?.pipelines.insert(pipeline.id, pipeline);
        Ok(())
    }

    pub fn insert_event(&self, event: CiEvent) -> StoreResult<()> {
        self.write()?.events.insert(event.id, event);
        Ok(())
    }

    pub fn insert_build(&self, build: CiBuild) -> StoreResult<()> {
        self.write()?.builds.insert(build.id, build);
        Ok(())
    }

    pub fn insert_job(&self, job: CiJob) -> StoreResult<()> {
        self.write()?.jobs.insert(job.id, job);
        Ok(())
    }

    pub fn insert_step_metric(&self, metric: StepMetric) -> StoreResult<()> {
        self.write()?.step_metrics.push(metric);
        Ok(())
    }
}

#[async_trait]
impl PipelineStore for MemoryStore {
    async fn get_pipeline(&self, id: i64) -> StoreResult<Option<CiPipeline>> {
        Ok(self.read()?.pipelines.get(&id).cloned())
    }

    async fn list_events(&self, pipeline_id: i64) -> StoreResult<Vec<CiEvent>> {
        let tables = self.read()?;
        let mut events: Vec<CiEvent> = tables
            .events
            .values()
            .filter(|e| e.pipeline_id == pipeline_id)
            .cloned()
            .collect();

        events.sort_by(|a, b| a.create_time.cmp(&b.create_time).then(a.id.cmp(&b.id)));
        Ok(events)
    }
}

#[async_trait]
impl EventStore for MemoryStore {
    async fn list_builds(&self, event_id: i64) -> StoreResult<Vec<CiBuild>> {
        let tables = self.read()?;
        let mut builds: Vec<CiBuild> = tables
            .builds
            .values()
            .filter(|b| b.event_id == event_id)
            .cloned()
            .collect();

        builds.sort_by(|a, b| b.create_time.cmp(&a.create_time).then(b.id.cmp(&a.id)));
        Ok(builds)
    }
}

#[async_trait]
impl JobStore for MemoryStore {
    async fn get_job(&self, id: i64) -> StoreResult<Option<CiJob>> {
        Ok(self.read()?.jobs.get(&id).cloned())
    }

    async fn step_metrics(
        &self,
        job_id: i64,
        query: &StepMetricsQuery,
    ) -> StoreResult<Vec<StepMetric>> {
        let tables = self.read()?;
        let mut metrics: Vec<StepMetric> = tables
            .step_metrics
            .iter()
            .filter(|m| {
                tables
                    .builds
                    .get(&m.build_id)
                    .is_some_and(|b| b.job_id == job_id)
            })
            .filter(|m| query.matches(m))
            .cloned()
            .collect();

        metrics.sort_by(|a, b| a.create_time.cmp(&b.create_time).then(a.build_id.cmp(&b.build_id)));
        Ok(metrics)
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::*;

    fn event(id: i64, pipeline_id: i64, minute: u32) -> CiEvent {
        CiEvent {
            id,
            pipeline_id,
            workflow_graph: None,
            start_from: "~commit".to_string(),
            pr_num: None,
            create_time: Utc.with_ymd_and_hms(2024, 1, 1, 0, minute, 0).unwrap(),
        }
    }

    fn build(id: i64, event_id: i64, job_id: i64, minute: u32) -> CiBuild {
        CiBuild {
            id,
            event_id,
            job_id,
            status: "SUCCESS".to_string(),
            create_time: Utc.with_ymd_and_hms(2024, 1, 1, 0, minute, 0).unwrap(),
        }
    }

    #[tokio::test]
    async fn events_sort_by_creation_time_then_id() {
        let store = MemoryStore::new();
        store.insert_event(event(3, 1, 5)).unwrap();
        store.insert_event(event(1, 1, 9)).unwrap();
        store.insert_event(event(2, 1, 5)).unwrap();
        store.insert_event(event(4, 2, 1)).unwrap();

        let events = store.list_events(1).await.unwrap();
        assert_eq!(events.iter().map(|e| e.id).collect::<Vec<_>>(), vec![2, 3, 1]);
    }

    #[tokio::test]
    async fn builds_are_newest_first() {
        let store = MemoryStore::new();
        store.insert_build(build(1, 10, 100, 1)).unwrap();
        store.insert_build(build(2, 10, 101, 2)).unwrap();
        store.insert_build(build(3, 11, 100, 3)).unwrap();

        let builds = store.list_builds(10).await.unwrap();
        assert_eq!(builds.iter().map(|b| b.id).collect::<Vec<_>>(), vec![2, 1]);
    }

    #[tokio::test]
    async fn step_metrics_are_scoped_to_the_job() {
        let store = MemoryStore::new();
        store.insert_build(build(1, 10, 100, 1)).unwrap();
        store.insert_build(build(2, 10, 101, 2)).unwrap();
        for (build_id, name, minute) in [(1, "install", 3), (1, "test", 4), (2, "install", 5)] {
            store
                .insert_step_metric(StepMetric {
                    build_id,
                    name: name.to_string(),
                    code: Some(0),
                    duration: Some(10.0),
                    create_time: Utc.with_ymd_and_hms(2024, 1, 1, 0, minute, 0).unwrap(),
                })
                .unwrap();
        }

        let all = store.step_metrics(100, &StepMetricsQuery::default()).await.unwrap();
        assert_eq!(all.iter().map(|m| m.name.as_str()).collect::<Vec<_>>(), vec!["install", "test"]);

        let query = StepMetricsQuery { step_name: Some("test".to_string()), ..Default::default() };
        let filtered = store.step_metrics(100, &query).await.unwrap();
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].build_id, 1);

        assert!(store.step_metrics(999, &StepMetricsQuery::default()).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn missing_entities_are_none() {
        let store = MemoryStore::new();
        assert!(store.get_pipeline(1).await.unwrap().is_none());
        assert!(store.get_job(1).await.unwrap().is_none());
        assert!(store.list_events(1).await.unwrap().is_empty());
    }
}
