//! Literal markers recognized in Beeline transcripts.

/// Per-line tag carried by every data row.
pub const DATA_PREFIX: &str = "INFO  :";

/// Trimmed metric lines start with the data tag plus this indentation.
pub const METRIC_PREFIX: &str = "INFO  :    ";

/// Dashed separator around table headers.
pub const RULE: &str = "----";

pub const QUERY_TITLE: &str = "Query Execution Summary";
pub const QUERY_COLUMNS: [&str; 2] = ["OPERATION", "DURATION"];

pub const TASK_TITLE: &str = "Task Execution Summary";
pub const TASK_COLUMNS: [&str; 2] = ["VERTICES", "DURATION(ms)"];

pub const COUNTERS_START: &str = "org.apache.tez.common.counters.DAGCounter";
pub const COMPLETED: &str = "Completed executing command";
pub const CONFIRMED: &str = "OK";

pub fn is_rule(line: &str) -> bool {
    line.contains(RULE)
}

pub fn has_all(line: &str, needles: &[&str]) -> bool {
    needles.iter().all(|n| line.contains(n))
}

/// Text following the first data tag, untrimmed. `None` if the line has no tag.
pub fn data_payload(line: &str) -> Option<&str> {
    line.split_once(DATA_PREFIX).map(|(_, rest)| rest)
}
