//! Section scanners for Beeline transcripts.
//!
//! Each scanner walks the whole transcript once with its own forward-only
//! state machine and returns its own map. Scanners share helpers but no state.

pub mod counters;
pub mod error;
pub mod markers;
pub mod query;
pub mod task;
pub mod value;

pub use counters::{CounterGroup, CounterSummary, scan_counters};
pub use error::ScanError;
pub use query::{QuerySummary, scan_query_summary};
pub use task::{TaskSummary, VertexMetrics, scan_task_summary};
pub use value::MetricValue;
