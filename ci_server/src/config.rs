//! Status service configuration — loaded from environment variables.

use crate::badge::{BadgeTemplate, SHIELDS_TEMPLATE};
use crate::workflow::{ReachabilityLimits, MAX_DEPTH_CEILING};

#[derive(Clone, Debug)]
pub struct StatusConfig {
    /// Badge service URL with `{{status}}` and `{{color}}` placeholders.
    pub badge_template: BadgeTemplate,
    /// Bounds on workflow traversal when estimating expected builds.
    pub reachability: ReachabilityLimits,
}

impl StatusConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup. Unparseable numbers fall back to
    /// their defaults; an invalid badge template is an error.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let badge_template = match lookup("CI_BADGE_TEMPLATE").filter(|s| !s.trim().is_empty()) {
            Some(template) => BadgeTemplate::parse(template)?,
            None => {
                tracing::info!("CI_BADGE_TEMPLATE not set -- using shields.io badges");
                BadgeTemplate::shields_io()
            }
        };

        let defaults = ReachabilityLimits::default();
        let max_depth = lookup("CI_WORKFLOW_MAX_DEPTH")
            .and_then(|s| s.parse().ok())
            .unwrap_or(defaults.max_depth);
        if max_depth > MAX_DEPTH_CEILING {
            tracing::warn!(max_depth, ceiling = MAX_DEPTH_CEILING, "CI_WORKFLOW_MAX_DEPTH too large -- clamping");
        }
        let max_depth = max_depth.min(MAX_DEPTH_CEILING);
        let max_jobs = lookup("CI_WORKFLOW_MAX_JOBS")
            .and_then(|s| s.parse().ok())
            .unwrap_or(defaults.max_jobs);

        Ok(Self {
            badge_template,
            reachability: ReachabilityLimits { max_depth, max_jobs },
        })
    }
}

impl Default for StatusConfig {
    fn default() -> Self {
        Self {
            badge_template: BadgeTemplate::shields_io(),
            reachability: ReachabilityLimits::default(),
        }
    }
}
