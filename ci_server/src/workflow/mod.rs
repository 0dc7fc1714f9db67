//! Workflow graphs attached to events, and traversal over them.

pub mod graph;
pub mod parser;
pub mod reachability;

pub use graph::{WorkflowEdge, WorkflowGraph, WorkflowNode, PR_TRIGGER};
pub use parser::{EdgeWorkflowParser, NextJobsQuery, ParserError, WorkflowParser};
pub use reachability::{reachable, ReachabilityError, ReachabilityLimits, MAX_DEPTH_CEILING};
