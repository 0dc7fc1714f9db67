//! ci.build.step metrics — Per-step timing and exit code across a job's builds.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StepMetric {
    pub build_id: i64,
    /// Step name, e.g. `install` or `sd-setup-scm`.
    pub name: String,
    pub code: Option<i32>,
    /// Wall-clock duration in seconds; absent while the step is running.
    pub duration: Option<f64>,
    pub create_time: DateTime<Utc>,
}

/// Filter for a step-metrics read. Every field is optional; an empty
/// query returns every step of every build of the job.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StepMetricsQuery {
    pub start_time: Option<DateTime<Utc>>,
    pub end_time: Option<DateTime<Utc>>,
    pub step_name: Option<String>,
}

impl StepMetricsQuery {
    /// Whether a metric falls inside the window and matches the step filter.
    pub fn matches(&self, metric: &StepMetric) -> bool {
        if let Some(start) = self.start_time {
            if metric.create_time < start {
                return false;
            }
        }
        if let Some(end) = self.end_time {
            if metric.create_time > end {
                return false;
            }
        }
        match &self.step_name {
            Some(name) => metric.name == *name,
            None => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn metric(name: &str, hour: u32) -> StepMetric {
        StepMetric {
            build_id: 1,
            name: name.to_string(),
            code: Some(0),
            duration: Some(1.5),
            create_time: Utc.with_ymd_and_hms(2024, 3, 1, hour, 0, 0).unwrap(),
        }
    }

    #[test]
    fn empty_query_matches_everything() {
        let query = StepMetricsQuery::default();
        assert!(query.matches(&metric("install", 1)));
        assert!(query.matches(&metric("test", 23)));
    }

    #[test]
    fn window_bounds_are_inclusive() {
        let query = StepMetricsQuery {
            start_time: Some(Utc.with_ymd_and_hms(2024, 3, 1, 2, 0, 0).unwrap()),
            end_time: Some(Utc.with_ymd_and_hms(2024, 3, 1, 4, 0, 0).unwrap()),
            step_name: None,
        };
        assert!(!query.matches(&metric("install", 1)));
        assert!(query.matches(&metric("install", 2)));
        assert!(query.matches(&metric("install", 4)));
        assert!(!query.matches(&metric("install", 5)));
    }

    #[test]
    fn step_name_is_an_exact_match() {
        let query = StepMetricsQuery {
            step_name: Some("install".to_string()),
            ..Default::default()
        };
        assert!(query.matches(&metric("install", 1)));
        assert!(!query.matches(&metric("install-deps", 1)));
    }
}
