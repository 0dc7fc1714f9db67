//! ci.pipeline — Owner of events; the unit a badge is rendered for.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CiPipeline {
    pub id: i64,
    pub name: String,
}
