//! CI status services — pipeline badges and job step metrics.

pub mod badge_service;
pub mod step_metrics_service;
