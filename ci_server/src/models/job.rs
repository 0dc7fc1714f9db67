//! ci.job — A named job of a pipeline.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CiJob {
    pub id: i64,
    pub pipeline_id: i64,
    pub name: String,
}
