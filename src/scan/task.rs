//! "Task Execution Summary" table: per-vertex duration, CPU/GC time and
//! record counts.
//!
//! Example block:
//! INFO  : Task Execution Summary
//! INFO  : ----------------------------------------------------------------------------------------------
//! INFO  :   VERTICES      DURATION(ms)   CPU_TIME(ms)    GC_TIME(ms)   INPUT_RECORDS   OUTPUT_RECORDS
//! INFO  : ----------------------------------------------------------------------------------------------
//! INFO  :      Map 1          65013.00        516,890          7,624      13,119,189            1,200
//! INFO  :  Reducer 2           1234.00          2,640             35           1,200                0
//! INFO  : ----------------------------------------------------------------------------------------------

use crate::Transcript;
use crate::scan::ScanError;
use crate::scan::markers::{TASK_COLUMNS, TASK_TITLE, data_payload, has_all, is_rule};
use crate::scan::value::{parse_count, parse_float};
use crate::trace::Trace;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

const SCAN: &str = "task";

/// Tokens a row needs: two for the vertex name, five metrics.
const ROW_TOKENS: usize = 7;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VertexMetrics {
    #[serde(rename = "DURATION(ms)")]
    pub duration_ms: f64,
    #[serde(rename = "CPU_TIME(ms)")]
    pub cpu_time_ms: f64,
    #[serde(rename = "GC_TIME(ms)")]
    pub gc_time_ms: f64,
    #[serde(rename = "INPUT_RECORDS")]
    pub input_records: i64,
    #[serde(rename = "OUTPUT_RECORDS")]
    pub output_records: i64,
}

pub type TaskSummary = BTreeMap<String, VertexMetrics>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum State {
    SeekingTitle,
    SeekingColumns,
    Rows,
}

impl State {
    fn advance(self, line: &str) -> Option<Self> {
        match self {
            State::SeekingTitle if line.contains(TASK_TITLE) => Some(State::SeekingColumns),
            State::SeekingColumns if has_all(line, &TASK_COLUMNS) => Some(State::Rows),
            _ => None,
        }
    }
}

pub fn scan_task_summary(transcript: &Transcript, trace: &Trace) -> Result<TaskSummary, ScanError> {
    let mut out = TaskSummary::new();
    let mut state = State::SeekingTitle;

    for (lno, raw) in transcript.numbered() {
        let line = raw.trim();

        if let Some(next) = state.advance(line) {
            trace.line(SCAN, lno, format_args!("{:?} -> {:?}", state, next));
            state = next;
            continue;
        }

        if state != State::Rows {
            continue;
        }

        // The rule under the column header arrives before any row.
        if is_rule(line) && !out.is_empty() {
            trace.line(SCAN, lno, format_args!("closing rule, end of vertices"));
            break;
        }

        let Some(payload) = data_payload(line) else {
            continue;
        };

        let tokens: Vec<&str> = payload.split_whitespace().collect();
        if tokens.len() < ROW_TOKENS {
            continue;
        }

        let name = format!("{} {}", tokens[0], tokens[1]);
        let metrics = VertexMetrics {
            duration_ms: parse_float(lno, "DURATION(ms)", tokens[2])?,
            cpu_time_ms: parse_float(lno, "CPU_TIME(ms)", tokens[3])?,
            gc_time_ms: parse_float(lno, "GC_TIME(ms)", tokens[4])?,
            input_records: parse_count(lno, "INPUT_RECORDS", tokens[5])?,
            output_records: parse_count(lno, "OUTPUT_RECORDS", tokens[6])?,
        };
        trace.line(SCAN, lno, format_args!("vertex {:?}", name));
        out.insert(name, metrics);
    }

    Ok(out)
}
