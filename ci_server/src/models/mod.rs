//! CI platform data models read by the status endpoints.

pub mod build;
pub mod event;
pub mod job;
pub mod pipeline;
pub mod step_metric;
