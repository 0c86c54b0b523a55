//! Extract execution metrics from Beeline (Hive CLI) console transcripts.
//!
//! Three sections are recognized: the query execution summary, the Tez task
//! execution summary and the detailed counters block. Each is scanned
//! independently and the results are merged into [`ExecutionSummaries`].

pub mod config;
pub mod scan;
pub mod summary;
pub mod trace;
pub mod transcript;

pub use scan::{MetricValue, ScanError, VertexMetrics};
pub use summary::ExecutionSummaries;
pub use trace::Trace;
pub use transcript::Transcript;

pub type Result<T> = anyhow::Result<T>;
