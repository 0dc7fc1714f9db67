//! Pipeline badge: status aggregation, URL rendering and the fail-soft outcome.

pub mod aggregate;
pub mod url;

use std::fmt;

pub use aggregate::{aggregate, BadgeLevel, BadgeStatus, StatusTally, DEFAULT_COLOR};
pub use url::{render_badge_url, BadgeTemplate, TemplateError, SHIELDS_TEMPLATE};

/// Why a badge fell back to the default.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DegradedReason {
    PipelineNotFound,
    NoEvents,
    NoBuilds,
    Store(String),
    Workflow(String),
}

impl DegradedReason {
    /// Short, bounded label for metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::PipelineNotFound => "pipeline_not_found",
            Self::NoEvents => "no_events",
            Self::NoBuilds => "no_builds",
            Self::Store(_) => "store",
            Self::Workflow(_) => "workflow",
        }
    }
}

impl fmt::Display for DegradedReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PipelineNotFound => f.write_str("pipeline not found"),
            Self::NoEvents => f.write_str("pipeline has no events"),
            Self::NoBuilds => f.write_str("latest event has no builds"),
            Self::Store(msg) => write!(f, "store error: {msg}"),
            Self::Workflow(msg) => write!(f, "workflow error: {msg}"),
        }
    }
}

/// Either a computed badge or the default one with the reason it was served.
/// Both variants render to a redirect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BadgeOutcome {
    Computed(BadgeStatus),
    Degraded { reason: DegradedReason },
}

impl BadgeOutcome {
    pub fn degraded(reason: DegradedReason) -> Self {
        Self::Degraded { reason }
    }

    pub fn status(&self) -> BadgeStatus {
        match self {
            Self::Computed(status) => status.clone(),
            Self::Degraded { .. } => BadgeStatus::default(),
        }
    }

    pub fn is_degraded(&self) -> bool {
        matches!(self, Self::Degraded { .. })
    }
}
