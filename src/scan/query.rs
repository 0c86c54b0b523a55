//! "Query Execution Summary" table: operation name -> duration.
//!
//! Example block:
//! INFO  : Query Execution Summary
//! INFO  : ----------------------------------------------------------------------
//! INFO  : OPERATION                            DURATION
//! INFO  : ----------------------------------------------------------------------
//! INFO  : Compile Query                           0.31s
//! INFO  : Run DAG                                 7.43s
//! INFO  : ----------------------------------------------------------------------

use crate::Transcript;
use crate::scan::ScanError;
use crate::scan::markers::{QUERY_COLUMNS, QUERY_TITLE, data_payload, has_all, is_rule};
use crate::scan::value::{DurationTokenizer, parse_float};
use crate::trace::Trace;
use std::collections::BTreeMap;

const SCAN: &str = "query";

/// Keys are `"<operation> (<unit>)"`; the unit may be empty.
pub type QuerySummary = BTreeMap<String, f64>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum State {
    SeekingTitle,
    SeekingOpeningRule,
    SeekingColumns,
    SeekingHeaderRule,
    Rows,
}

impl State {
    /// Next state if `line` is the marker this state waits for.
    fn advance(self, line: &str) -> Option<Self> {
        match self {
            State::SeekingTitle if line.contains(QUERY_TITLE) => Some(State::SeekingOpeningRule),
            State::SeekingOpeningRule if is_rule(line) => Some(State::SeekingColumns),
            State::SeekingColumns if has_all(line, &QUERY_COLUMNS) => {
                Some(State::SeekingHeaderRule)
            }
            State::SeekingHeaderRule if is_rule(line) => Some(State::Rows),
            _ => None,
        }
    }
}

pub fn scan_query_summary(transcript: &Transcript, trace: &Trace) -> Result<QuerySummary, ScanError> {
    let tokenizer = DurationTokenizer::new()?;
    let mut out = QuerySummary::new();
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

        if is_rule(line) {
            trace.line(SCAN, lno, format_args!("closing rule, end of operations"));
            break;
        }

        let Some(payload) = data_payload(line) else {
            continue;
        };

        let Some((name, token)) = payload.trim().rsplit_once(char::is_whitespace) else {
            trace.line(SCAN, lno, format_args!("skipped row without a duration"));
            continue;
        };

        let (magnitude, unit) = tokenizer.split(token);
        let key = format!("{} ({})", name.trim(), unit);
        let duration = parse_float(lno, &key, magnitude)?;
        trace.line(SCAN, lno, format_args!("{:?} = {}", key, duration));
        out.insert(key, duration);
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const RULE: &str = "INFO  : ----------------------------------------------------------------------";

    fn table(rows: &[&str]) -> Transcript {
        let mut lines = vec![
            "INFO  : Completed executing command(queryId=hive_1); Time taken: 9.1 seconds",
            "INFO  : Query Execution Summary",
            RULE,
            "INFO  : OPERATION                            DURATION",
            RULE,
        ];
        lines.extend_from_slice(rows);
        lines.push(RULE);
        lines.push("INFO  : Trailing Op 1.0s");
        Transcript::from_lines(lines)
    }

    fn summary(pairs: &[(&str, f64)]) -> QuerySummary {
        pairs.iter().map(|(k, v)| (k.to_string(), *v)).collect()
    }

    #[test]
    fn empty_transcript_yields_empty_summary() {
        let out = scan_query_summary(&Transcript::default(), &Trace::silent()).unwrap();
        assert!(out.is_empty());
    }

    #[test]
    fn unit_suffix_becomes_part_of_key() {
        let t = table(&["INFO  : Some Op 12.5s", "INFO  : Compile Query      0.31s"]);
        let out = scan_query_summary(&t, &Trace::silent()).unwrap();
        assert_eq!(out, summary(&[("Some Op (s)", 12.5), ("Compile Query (s)", 0.31)]));
    }

    #[test]
    fn missing_unit_gives_empty_parens() {
        let t = table(&["INFO  : Op2 7"]);
        let out = scan_query_summary(&t, &Trace::silent()).unwrap();
        assert_eq!(out, summary(&[("Op2 ()", 7.0)]));
    }

    #[test]
    fn rows_after_closing_rule_are_ignored() {
        let t = table(&["INFO  : Run DAG 7.43s"]);
        let out = scan_query_summary(&t, &Trace::silent()).unwrap();
        assert!(!out.contains_key("Trailing Op (s)"));
        assert_eq!(out.len(), 1);
    }

    #[test]
    fn closing_rule_right_after_header_yields_empty_summary() {
        let out = scan_query_summary(&table(&[]), &Trace::silent()).unwrap();
        assert!(out.is_empty());
    }

    #[test]
    fn single_token_rows_are_skipped() {
        let t = table(&["INFO  : lonely", "INFO  :", "INFO  : Run DAG 2s"]);
        let out = scan_query_summary(&t, &Trace::silent()).unwrap();
        assert_eq!(out, summary(&[("Run DAG (s)", 2.0)]));
    }

    #[test]
    fn duplicate_operations_keep_last_value() {
        let t = table(&["INFO  : Run DAG 2s", "INFO  : Run DAG 3s"]);
        let out = scan_query_summary(&t, &Trace::silent()).unwrap();
        assert_eq!(out, summary(&[("Run DAG (s)", 3.0)]));
    }

    #[test]
    fn columns_before_first_rule_do_not_advance() {
        let t = Transcript::from_lines([
            "INFO  : Query Execution Summary",
            "INFO  : OPERATION                            DURATION",
            RULE,
            "INFO  : Not A Row 1s",
            RULE,
        ]);
        // The second rule is taken as the opening rule; the header is never seen.
        let out = scan_query_summary(&t, &Trace::silent()).unwrap();
        assert!(out.is_empty());
    }

    #[test]
    fn non_numeric_duration_is_an_error() {
        let t = table(&["INFO  : Broken Op n/a"]);
        let err = scan_query_summary(&t, &Trace::silent()).unwrap_err();
        assert!(matches!(err, ScanError::InvalidFloat { lno: 6, .. }));
    }

    #[test]
    fn scanning_twice_is_stable() {
        let t = table(&["INFO  : Run DAG 7.43s"]);
        let first = scan_query_summary(&t, &Trace::silent()).unwrap();
        let second = scan_query_summary(&t, &Trace::from_verbosity(1)).unwrap();
        assert_eq!(first, second);
    }
}
