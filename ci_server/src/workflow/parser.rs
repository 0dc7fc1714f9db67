//! Workflow-parser oracle: immediate successors of a trigger in a graph.

use thiserror::Error;

use super::graph::{WorkflowGraph, PR_TRIGGER};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NextJobsQuery {
    pub trigger: String,
    pub pr_num: Option<u64>,
}

impl NextJobsQuery {
    pub fn trigger(trigger: impl Into<String>) -> Self {
        Self { trigger: trigger.into(), pr_num: None }
    }

    pub fn pull_request(trigger: impl Into<String>, pr_num: Option<u64>) -> Self {
        Self { trigger: trigger.into(), pr_num }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParserError {
    #[error("a trigger is required")]
    MissingTrigger,

    #[error("trigger {0} requires a PR number")]
    MissingPrNumber(String),
}

/// Returns first-level successors only; callers recurse themselves.
pub trait WorkflowParser: Send + Sync {
    fn next_jobs(
        &self,
        graph: &WorkflowGraph,
        query: &NextJobsQuery,
    ) -> Result<Vec<String>, ParserError>;
}

/// Edge-list parser. PR-scoped successors are named `PR-<num>:<job>`.
#[derive(Debug, Clone, Copy, Default)]
pub struct EdgeWorkflowParser;

impl WorkflowParser for EdgeWorkflowParser {
    fn next_jobs(
        &self,
        graph: &WorkflowGraph,
        query: &NextJobsQuery,
    ) -> Result<Vec<String>, ParserError> {
        if query.trigger.is_empty() {
            return Err(ParserError::MissingTrigger);
        }
        if query.trigger == PR_TRIGGER && query.pr_num.is_none() {
            return Err(ParserError::MissingPrNumber(query.trigger.clone()));
        }

        let mut jobs: Vec<String> = Vec::new();
        for edge in graph.edges.iter().filter(|e| e.src == query.trigger) {
            let job = match query.pr_num {
                Some(num) => format!("PR-{num}:{}", edge.dest),
                None => edge.dest.clone(),
            };
            if !jobs.contains(&job) {
                jobs.push(job);
            }
        }

        Ok(jobs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflow::graph::WorkflowEdge;

    fn edge(src: &str, dest: &str) -> WorkflowEdge {
        WorkflowEdge { src: src.to_string(), dest: dest.to_string() }
    }

    fn graph() -> WorkflowGraph {
        WorkflowGraph {
            nodes: vec![],
            edges: vec![
                edge("~commit", "main"),
                edge("~pr", "main"),
                edge("main", "publish"),
                edge("main", "docs"),
                edge("main", "publish"),
            ],
        }
    }

    #[test]
    fn returns_direct_successors_in_edge_order() {
        let jobs = EdgeWorkflowParser
            .next_jobs(&graph(), &NextJobsQuery::trigger("main"))
            .unwrap();
        assert_eq!(jobs, vec!["publish", "docs"]);
    }

    #[test]
    fn pr_trigger_prefixes_job_names() {
        let jobs = EdgeWorkflowParser
            .next_jobs(&graph(), &NextJobsQuery::pull_request("~pr", Some(42)))
            .unwrap();
        assert_eq!(jobs, vec!["PR-42:main"]);
    }

    #[test]
    fn pr_trigger_without_number_is_rejected() {
        let err = EdgeWorkflowParser
            .next_jobs(&graph(), &NextJobsQuery::pull_request("~pr", None))
            .unwrap_err();
        assert_eq!(err, ParserError::MissingPrNumber("~pr".to_string()));
    }

    #[test]
    fn empty_trigger_is_rejected() {
        let err = EdgeWorkflowParser
            .next_jobs(&graph(), &NextJobsQuery::trigger(""))
            .unwrap_err();
        assert_eq!(err, ParserError::MissingTrigger);
    }

    #[test]
    fn unknown_trigger_has_no_successors() {
        let jobs = EdgeWorkflowParser
            .next_jobs(&graph(), &NextJobsQuery::trigger("~release"))
            .unwrap();
        assert!(jobs.is_empty());
    }
}
