//! Detailed Tez counters: group -> metric -> value.
//!
//! Groups sit directly after the data tag, metrics are indented under them:
//! INFO  : org.apache.tez.common.counters.DAGCounter:
//! INFO  :    NUM_SUCCEEDED_TASKS: 58
//! INFO  :    TOTAL_LAUNCHED_TASKS: 58
//! INFO  : File System Counters:
//! INFO  :    FILE_BYTES_READ: 0
//!
//! The block ends with the command completion line followed by `OK`. The
//! completion line itself is read as a group header, so that group is dropped
//! when the pair is seen. If the pair never shows up, the scan runs to the end
//! of input and whatever group is open stays in the result.

use crate::Transcript;
use crate::scan::ScanError;
use crate::scan::markers::{COMPLETED, CONFIRMED, COUNTERS_START, METRIC_PREFIX, data_payload};
use crate::scan::value::MetricValue;
use crate::trace::Trace;
use std::collections::BTreeMap;

const SCAN: &str = "counters";

pub type CounterGroup = BTreeMap<String, MetricValue>;
pub type CounterSummary = BTreeMap<String, CounterGroup>;

#[derive(Debug, Clone, PartialEq, Eq)]
enum State {
    SeekingStart,
    /// Inside the counters block; holds the most recently opened group.
    Groups(Option<String>),
}

pub fn scan_counters(transcript: &Transcript, trace: &Trace) -> Result<CounterSummary, ScanError> {
    let mut out = CounterSummary::new();
    let mut state = State::SeekingStart;

    for (lno, raw) in transcript.numbered() {
        if state == State::SeekingStart {
            if !raw.contains(COUNTERS_START) {
                continue;
            }
            trace.line(SCAN, lno, format_args!("counters start"));
            state = State::Groups(None);
        }

        let State::Groups(current) = &mut state else {
            continue;
        };
        let line = raw.trim();

        if let Some(metric) = line.strip_prefix(METRIC_PREFIX) {
            if let Some(group) = current.as_deref() {
                if let Some((name, value)) = split_metric(metric) {
                    trace.line(SCAN, lno, format_args!("{} / {} = {:?}", group, name, value));
                    out.entry(group.to_string())
                        .or_default()
                        .insert(name.to_string(), value);
                }
            }
        } else if let Some(payload) = data_payload(line) {
            let name = payload
                .split_once(':')
                .map_or(payload, |(head, _)| head)
                .trim()
                .to_string();
            trace.line(SCAN, lno, format_args!("group {:?}", name));
            out.insert(name.clone(), CounterGroup::new());
            *current = Some(name);
        }

        // `lno` is 1-indexed, so it is the 0-based index of the next line.
        let confirmed = transcript
            .get(lno)
            .is_some_and(|next| next.contains(CONFIRMED));
        if line.contains(COMPLETED) && confirmed {
            if let Some(group) = current.take() {
                out.remove(&group);
            }
            trace.line(SCAN, lno, format_args!("end of counters"));
            break;
        }
    }

    Ok(out)
}

/// `"NAME: 1,024 (bytes)"` -> `("NAME", Integer(1024))`. `None` when there is
/// no colon or no value after it.
fn split_metric(metric: &str) -> Option<(&str, MetricValue)> {
    let (name, rest) = metric.trim().split_once(':')?;
    let token = rest.split_whitespace().next()?;
    Some((name.trim(), MetricValue::parse(token)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn group(pairs: &[(&str, MetricValue)]) -> CounterGroup {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn empty_transcript_yields_empty_summary() {
        let out = scan_counters(&Transcript::default(), &Trace::silent()).unwrap();
        assert!(out.is_empty());
    }

    #[test]
    fn nothing_before_start_marker_is_read() {
        let t = Transcript::from_lines([
            "INFO  : Early Group:",
            "INFO  :    EARLY: 1",
            "INFO  : org.apache.tez.common.counters.DAGCounter:",
            "INFO  :    NUM_SUCCEEDED_TASKS: 58",
        ]);
        let out = scan_counters(&t, &Trace::silent()).unwrap();
        let mut expected = CounterSummary::new();
        expected.insert(
            "org.apache.tez.common.counters.DAGCounter".to_string(),
            group(&[("NUM_SUCCEEDED_TASKS", MetricValue::Integer(58))]),
        );
        assert_eq!(out, expected);
    }

    #[test]
    fn completion_pair_drops_open_group() {
        let t = Transcript::from_lines([
            "INFO  : org.apache.tez.common.counters.DAGCounter:",
            "INFO  :    NUM_SUCCEEDED_TASKS: 58",
            "INFO  :    AM_CPU_MILLISECONDS: 3,370",
            "INFO  : File System Counters:",
            "INFO  :    FILE_BYTES_READ: 0",
            "INFO  : Completed executing command(queryId=hive_20240101); Time taken: 9.1 seconds",
            "INFO  : OK",
            "INFO  : Late Group:",
        ]);
        let out = scan_counters(&t, &Trace::silent()).unwrap();

        let mut expected = CounterSummary::new();
        expected.insert(
            "org.apache.tez.common.counters.DAGCounter".to_string(),
            group(&[
                ("NUM_SUCCEEDED_TASKS", MetricValue::Integer(58)),
                ("AM_CPU_MILLISECONDS", MetricValue::Integer(3370)),
            ]),
        );
        expected.insert(
            "File System Counters".to_string(),
            group(&[("FILE_BYTES_READ", MetricValue::Integer(0))]),
        );
        assert_eq!(out, expected);
    }

    #[test]
    fn completion_without_confirmation_keeps_going() {
        let t = Transcript::from_lines([
            "INFO  : org.apache.tez.common.counters.DAGCounter:",
            "INFO  :    NUM_SUCCEEDED_TASKS: 58",
            "INFO  : Completed executing command(queryId=hive_1); Time taken: 1 seconds",
            "ERROR : something else",
            "INFO  : Shuffle Errors:",
            "INFO  :    BAD_ID: 0",
        ]);
        let out = scan_counters(&t, &Trace::silent()).unwrap();
        assert_eq!(out.len(), 3);
        assert_eq!(
            out["Shuffle Errors"],
            group(&[("BAD_ID", MetricValue::Integer(0))])
        );
    }

    #[test]
    fn unterminated_block_keeps_last_group() {
        let t = Transcript::from_lines([
            "INFO  : org.apache.tez.common.counters.DAGCounter:",
            "INFO  :    NUM_SUCCEEDED_TASKS: 58",
            "INFO  : TaskCounter_Map_1_INPUT_customer:",
            "INFO  :    INPUT_RECORDS_PROCESSED: 12,811",
        ]);
        let out = scan_counters(&t, &Trace::silent()).unwrap();
        assert_eq!(
            out["TaskCounter_Map_1_INPUT_customer"],
            group(&[("INPUT_RECORDS_PROCESSED", MetricValue::Integer(12811))])
        );
    }

    #[test]
    fn values_are_typed_by_first_successful_conversion() {
        let t = Transcript::from_lines([
            "INFO  : org.apache.tez.common.counters.DAGCounter:",
            "INFO  :    WALL_CLOCK_MILLIS: 1,024 ms",
            "INFO  :    RATIO: 0.75",
            "INFO  :    STATUS: SUCCEEDED",
            "INFO  :    NO_VALUE:",
            "INFO  :    NO_COLON",
        ]);
        let out = scan_counters(&t, &Trace::silent()).unwrap();
        assert_eq!(
            out["org.apache.tez.common.counters.DAGCounter"],
            group(&[
                ("WALL_CLOCK_MILLIS", MetricValue::Integer(1024)),
                ("RATIO", MetricValue::Float(0.75)),
                ("STATUS", MetricValue::Text("SUCCEEDED".to_string())),
            ])
        );
    }

    #[test]
    fn metric_without_open_group_is_ignored() {
        let t = Transcript::from_lines([
            "   INFO  :    org.apache.tez.common.counters.DAGCounter: 1",
            "INFO  :    ORPHAN: 3",
        ]);
        let out = scan_counters(&t, &Trace::silent()).unwrap();
        assert!(out.is_empty());
    }

    #[test]
    fn reopened_group_starts_empty() {
        let t = Transcript::from_lines([
            "INFO  : org.apache.tez.common.counters.DAGCounter:",
            "INFO  :    A: 1",
            "INFO  : org.apache.tez.common.counters.DAGCounter:",
            "INFO  :    B: 2",
        ]);
        let out = scan_counters(&t, &Trace::silent()).unwrap();
        assert_eq!(
            out["org.apache.tez.common.counters.DAGCounter"],
            group(&[("B", MetricValue::Integer(2))])
        );
    }
}
