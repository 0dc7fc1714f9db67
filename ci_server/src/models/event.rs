//! ci.event — One execution instance of a pipeline's workflow graph.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::workflow::WorkflowGraph;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CiEvent {
    pub id: i64,
    pub pipeline_id: i64,
    /// Snapshot of the graph taken when the event was created.
    #[serde(default)]
    pub workflow_graph: Option<WorkflowGraph>,
    /// Job name or pseudo-trigger (`~commit`, `~pr`, ...) the event started from.
    pub start_from: String,
    #[serde(default)]
    pub pr_num: Option<u64>,
    pub create_time: DateTime<Utc>,
}
