//! Depth-first reachability over a workflow graph.
//!
//! Used to estimate how many builds an event is expected to produce: every
//! job reachable from the event's `start_from` trigger counts, whether or not
//! it has produced a build yet.
//!
//! Only the root query carries the PR number. Deeper queries are made by
//! trigger name alone, even when the successor is itself PR-scoped, so a PR
//! event sees its first-level jobs and nothing below them.

use std::collections::BTreeSet;

use thiserror::Error;

use super::graph::{WorkflowGraph, PR_TRIGGER};
use super::parser::{NextJobsQuery, ParserError, WorkflowParser};

/// Upper bound for a configured `max_depth`. Expansion recurses once per
/// level, so the depth limit is also the stack bound.
pub const MAX_DEPTH_CEILING: usize = 256;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReachabilityLimits {
    /// Longest trigger chain expanded below the start node.
    pub max_depth: usize,
    /// Largest reachable set accepted.
    pub max_jobs: usize,
}

impl Default for ReachabilityLimits {
    fn default() -> Self {
        Self { max_depth: 64, max_jobs: 1000 }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReachabilityError {
    #[error("workflow cycle detected at job {job}")]
    Cycle { job: String },

    #[error("workflow deeper than {max_depth} levels")]
    DepthExceeded { max_depth: usize },

    #[error("workflow reaches more than {max_jobs} jobs")]
    TooManyJobs { max_jobs: usize },

    #[error("workflow parser rejected query: {0}")]
    Parser(#[from] ParserError),
}

/// Every job reachable from `start`, excluding `start` itself.
///
/// An empty graph or empty start yields an empty set. Shared descendants are
/// expanded once; a successor already on the current expansion path is a
/// cycle and fails the whole traversal.
pub fn reachable(
    parser: &dyn WorkflowParser,
    graph: &WorkflowGraph,
    start: &str,
    pr_num: Option<u64>,
    limits: ReachabilityLimits,
) -> Result<BTreeSet<String>, ReachabilityError> {
    if start.is_empty() || graph.is_empty() {
        return Ok(BTreeSet::new());
    }

    let root = if start == PR_TRIGGER {
        NextJobsQuery::pull_request(start, pr_num)
    } else {
        NextJobsQuery::trigger(start)
    };

    let mut walk = Walk {
        parser,
        graph,
        limits,
        visited: BTreeSet::new(),
        path: Vec::new(),
    };
    walk.expand(root, 0)?;

    tracing::trace!(start, jobs = walk.visited.len(), "Workflow traversal finished");
    Ok(walk.visited)
}

struct Walk<'a> {
    parser: &'a dyn WorkflowParser,
    graph: &'a WorkflowGraph,
    limits: ReachabilityLimits,
    visited: BTreeSet<String>,
    path: Vec<String>,
}

impl Walk<'_> {
    fn expand(&mut self, query: NextJobsQuery, depth: usize) -> Result<(), ReachabilityError> {
        if depth > self.limits.max_depth {
            return Err(ReachabilityError::DepthExceeded { max_depth: self.limits.max_depth });
        }

        let next = self.parser.next_jobs(self.graph, &query)?;
        self.path.push(query.trigger);

        for job in next {
            if self.path.contains(&job) {
                return Err(ReachabilityError::Cycle { job });
            }
            if !self.visited.insert(job.clone()) {
                continue;
            }
            if self.visited.len() > self.limits.max_jobs {
                return Err(ReachabilityError::TooManyJobs { max_jobs: self.limits.max_jobs });
            }
            self.expand(NextJobsQuery::trigger(job), depth + 1)?;
        }

        self.path.pop();
        Ok(())
    }
}
