//! Run summary and status-line formatting

use std::time::Duration;

use crate::counters::CounterSnapshot;

/// Final outcome of one pipeline run
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub counters: CounterSnapshot,
    pub elapsed: Duration,
    /// Overlap runs report a match count instead of written rows
    pub reports_matches: bool,
}

impl RunSummary {
    /// True when every row was read but at least one could not be persisted
    pub fn completed_with_loss(&self) -> bool {
        self.counters.write_failures > 0
    }

    pub fn format_summary(&self) -> String {
        let c = &self.counters;
        let mut output = String::new();

        if self.reports_matches {
            output.push_str(&format!(
                "Rows processed: {} read, {} tested; matches found: {}",
                c.rows_read, c.rows_processed, c.rows_matched
            ));
        } else {
            output.push_str(&format!(
                "Rows processed: {} read, {} transformed, {} written",
                c.rows_read, c.rows_processed, c.rows_written
            ));
        }

        if c.rows_malformed > 0 {
            output.push_str(&format!(", {} malformed", c.rows_malformed));
        }
        if c.rows_padded > 0 {
            output.push_str(&format!(", {} padded", c.rows_padded));
        }
        if c.write_failures > 0 {
            output.push_str(&format!(", {} write failures", c.write_failures));
        }

        let elapsed_ms = self.elapsed.as_millis();
        output.push_str(&format!(" in {}ms", elapsed_ms));

        if elapsed_ms > 0 && c.rows_read > 0 {
            let rows_per_sec = (c.rows_read as f64 * 1000.0) / elapsed_ms as f64;
            output.push_str(&format!(" ({:.0} rows/s)", rows_per_sec));
        }

        output
    }
}

/// One periodic status line for the progress reporter
pub fn format_progress(snapshot: &CounterSnapshot, show_matches: bool) -> String {
    if show_matches {
        format!(
            "progress: {} rows read, {} tested, {} matched",
            snapshot.rows_read, snapshot.rows_processed, snapshot.rows_matched
        )
    } else {
        format!(
            "progress: {} rows read, {} transformed, {} written",
            snapshot.rows_read, snapshot.rows_processed, snapshot.rows_written
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary(counters: CounterSnapshot, reports_matches: bool) -> RunSummary {
        RunSummary {
            counters,
            elapsed: Duration::from_millis(250),
            reports_matches,
        }
    }

    #[test]
    fn test_transform_summary_mentions_written_rows() {
        let text = summary(
            CounterSnapshot {
                rows_read: 10,
                rows_processed: 10,
                rows_written: 9,
                write_failures: 1,
                ..Default::default()
            },
            false,
        )
        .format_summary();
        assert!(text.contains("10 read"));
        assert!(text.contains("9 written"));
        assert!(text.contains("1 write failures"));
        assert!(text.contains("in 250ms"));
    }

    #[test]
    fn test_match_summary_mentions_match_count() {
        let text = summary(
            CounterSnapshot {
                rows_read: 3,
                rows_processed: 3,
                rows_matched: 2,
                ..Default::default()
            },
            true,
        )
        .format_summary();
        assert!(text.contains("matches found: 2"));
        assert!(!text.contains("written"));
    }

    #[test]
    fn test_clean_run_omits_failure_sections() {
        let text = summary(
            CounterSnapshot {
                rows_read: 5,
                rows_processed: 5,
                rows_written: 5,
                ..Default::default()
            },
            false,
        )
        .format_summary();
        assert!(!text.contains("malformed"));
        assert!(!text.contains("padded"));
        assert!(!text.contains("write failures"));
    }

    #[test]
    fn test_loss_detection() {
        let lossy = summary(
            CounterSnapshot {
                write_failures: 1,
                ..Default::default()
            },
            false,
        );
        assert!(lossy.completed_with_loss());

        let clean = summary(CounterSnapshot::default(), false);
        assert!(!clean.completed_with_loss());
    }

    #[test]
    fn test_progress_line_variants() {
        let snapshot = CounterSnapshot {
            rows_read: 100,
            rows_processed: 90,
            rows_written: 80,
            rows_matched: 7,
            ..Default::default()
        };
        assert!(format_progress(&snapshot, false).contains("80 written"));
        assert!(format_progress(&snapshot, true).contains("7 matched"));
    }
}
