//! Step metrics for a job.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

use crate::error::StatusError;
use crate::models::step_metric::{StepMetric, StepMetricsQuery};
use crate::store::JobStore;

/// Fetch step metrics for a job, filtered by `query`.
///
/// Fails with `NotFound` when the job does not exist. The query is passed to
/// the store unchanged.
pub async fn get_step_metrics(
    jobs: &dyn JobStore,
    job_id: i64,
    query: &StepMetricsQuery,
) -> Result<Vec<StepMetric>, StatusError> {
    if jobs.get_job(job_id).await?.is_none() {
        return Err(StatusError::NotFound(format!("Job {job_id}")));
    }

    let metrics = jobs.step_metrics(job_id, query).await?;
    tracing::debug!(job_id, count = metrics.len(), step = ?query.step_name, "Step metrics loaded");
    Ok(metrics)
}

/// Parse an ISO 8601 timestamp: RFC 3339, a date-time without offset (UTC),
/// or a bare date (midnight UTC).
pub fn parse_timestamp(field: &str, raw: &str) -> Result<DateTime<Utc>, StatusError> {
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Ok(ts.with_timezone(&Utc));
    }
    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, fmt) {
            return Ok(naive.and_utc());
        }
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        if let Some(midnight) = date.and_hms_opt(0, 0, 0) {
            return Ok(midnight.and_utc());
        }
    }
    Err(StatusError::BadRequest(format!("{field} must be an ISO 8601 date: {raw:?}")))
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;
    use crate::models::build::CiBuild;
    use crate::models::job::CiJob;
    use crate::store::MemoryStore;

    fn store() -> MemoryStore {
        let store = MemoryStore::new();
        store.insert_job(CiJob { id: 5, pipeline_id: 1, name: "main".to_string() }).unwrap();
        store
            .insert_build(CiBuild {
                id: 50,
                event_id: 1,
                job_id: 5,
                status: "SUCCESS".to_string(),
                create_time: Utc.with_ymd_and_hms(2024, 2, 1, 0, 0, 0).unwrap(),
            })
            .unwrap();
        for (name, day) in [("install", 1), ("test", 2)] {
            store
                .insert_step_metric(StepMetric {
                    build_id: 50,
                    name: name.to_string(),
                    code: Some(0),
                    duration: Some(3.0),
                    create_time: Utc.with_ymd_and_hms(2024, 2, day, 0, 0, 0).unwrap(),
                })
                .unwrap();
        }
        store
    }

    #[tokio::test]
    async fn unknown_job_is_not_found() {
        let err = get_step_metrics(&store(), 6, &StepMetricsQuery::default())
            .await
            .unwrap_err();
        assert!(matches!(err, StatusError::NotFound(_)));
    }

    #[tokio::test]
    async fn no_step_name_returns_all_steps() {
        let metrics = get_step_metrics(&store(), 5, &StepMetricsQuery::default()).await.unwrap();
        assert_eq!(metrics.len(), 2);
    }

    #[tokio::test]
    async fn window_filters_steps() {
        let query = StepMetricsQuery {
            start_time: Some(parse_timestamp("startTime", "2024-02-02").unwrap()),
            ..Default::default()
        };
        let metrics = get_step_metrics(&store(), 5, &query).await.unwrap();
        assert_eq!(metrics.len(), 1);
        assert_eq!(metrics[0].name, "test");
    }

    #[test]
    fn parses_iso_8601_variants() {
        let expected = Utc.with_ymd_and_hms(2024, 2, 1, 10, 30, 0).unwrap();
        assert_eq!(parse_timestamp("t", "2024-02-01T10:30:00Z").unwrap(), expected);
        assert_eq!(parse_timestamp("t", "2024-02-01T12:30:00+02:00").unwrap(), expected);
        assert_eq!(parse_timestamp("t", "2024-02-01T10:30:00.000").unwrap(), expected);
        assert_eq!(parse_timestamp("t", "2024-02-01T10:30").unwrap(), expected);
        assert_eq!(
            parse_timestamp("t", "2024-02-01").unwrap(),
            Utc.with_ymd_and_hms(2024, 2, 1, 0, 0, 0).unwrap()
        );
    }

    #[test]
    fn rejects_non_iso_timestamps() {
        for raw in ["yesterday", "02/01/2024", "2024-13-01", ""] {
            let err = parse_timestamp("startTime", raw).unwrap_err();
            assert!(matches!(err, StatusError::BadRequest(_)), "accepted {raw:?}");
        }
    }
}
