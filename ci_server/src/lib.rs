//! Centrix CI status — pipeline badges and job step metrics.
//!
//! The badge endpoint summarizes the most recent event of a pipeline: build
//! statuses are tallied in severity order, jobs the event's workflow graph
//! can still reach are counted as unknown, and the result is rendered into
//! a configured badge URL.

pub mod badge;
pub mod config;
pub mod error;
pub mod metrics;
pub mod models;
pub mod routes;
pub mod seeder;
pub mod services;
pub mod store;
pub mod workflow;
