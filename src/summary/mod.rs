//! Merged result of the three scans.

pub mod write;

use crate::Transcript;
use crate::scan::{
    CounterSummary, QuerySummary, TaskSummary, scan_counters, scan_query_summary,
    scan_task_summary,
};
use crate::trace::Trace;
use anyhow::Context;
use serde::{Deserialize, Serialize};

pub const QUERY_KEY: &str = "query_execution_summary";
pub const TASK_KEY: &str = "task_execution_summary";
pub const DETAILED_KEY: &str = "detailed_metrics_summary";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExecutionSummaries {
    pub query_execution_summary: QuerySummary,
    pub task_execution_summary: TaskSummary,
    pub detailed_metrics_summary: CounterSummary,
}

impl ExecutionSummaries {
    /// Run all three scans over one transcript.
    pub fn extract(transcript: &Transcript, trace: &Trace) -> crate::Result<Self> {
        let query_execution_summary =
            scan_query_summary(transcript, trace).context("query execution summary")?;
        let task_execution_summary =
            scan_task_summary(transcript, trace).context("task execution summary")?;
        let detailed_metrics_summary =
            scan_counters(transcript, trace).context("detailed metrics summary")?;

        log::debug!(
            "Extracted {} operations, {} vertices, {} counter groups",
            query_execution_summary.len(),
            task_execution_summary.len(),
            detailed_metrics_summary.len()
        );

        Ok(Self {
            query_execution_summary,
            task_execution_summary,
            detailed_metrics_summary,
        })
    }

    /// `(key, json)` per output file, in query, task, detailed order.
    pub fn files(&self) -> crate::Result<Vec<(&'static str, serde_json::Value)>> {
        Ok(vec![
            (QUERY_KEY, serde_json::to_value(&self.query_execution_summary)?),
            (TASK_KEY, serde_json::to_value(&self.task_execution_summary)?),
            (DETAILED_KEY, serde_json::to_value(&self.detailed_metrics_summary)?),
        ])
    }

    pub fn is_empty(&self) -> bool {
        self.query_execution_summary.is_empty()
            && self.task_execution_summary.is_empty()
            && self.detailed_metrics_summary.is_empty()
    }
}
