//! ci.build — One execution attempt of one job within an event.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CiBuild {
    pub id: i64,
    pub event_id: i64,
    pub job_id: i64,
    /// Raw status literal as reported by the executor (`SUCCESS`, `QUEUED`,
    /// `BLOCKED`, ...). Not normalized on the way in.
    pub status: String,
    pub create_time: DateTime<Utc>,
}
