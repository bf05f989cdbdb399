//! Periodic progress reporting
//!
//! A background thread wakes on a fixed tick, snapshots the shared
//! counters and prints one status line. It never touches the pipeline
//! channels, so a stalled or finished pipeline cannot be held up by it.
//! The owner stops it explicitly after the pipeline joins; dropping the
//! reporter stops it too.

use crossbeam_channel::{bounded, select, tick, Sender};
use std::sync::Arc;
use std::thread::JoinHandle;
use std::time::Duration;

use crate::config::Reporter;
use crate::counters::SharedCounters;
use crate::stats::format_progress;

pub const PROGRESS_INTERVAL: Duration = Duration::from_secs(5);

pub struct ProgressReporter {
    done_sender: Option<Sender<()>>,
    handle: Option<JoinHandle<()>>,
}

impl ProgressReporter {
    /// Start the ticker thread. Inert when the reporter is quiet.
    pub fn start(
        counters: Arc<SharedCounters>,
        reporter: Reporter,
        show_matches: bool,
    ) -> Self {
        Self::start_with_interval(counters, reporter, show_matches, PROGRESS_INTERVAL)
    }

    pub(crate) fn start_with_interval(
        counters: Arc<SharedCounters>,
        reporter: Reporter,
        show_matches: bool,
        interval: Duration,
    ) -> Self {
        if reporter.is_quiet() {
            return Self {
                done_sender: None,
                handle: None,
            };
        }

        let (done_sender, done_receiver) = bounded::<()>(0);
        let ticker = tick(interval);
        let handle = std::thread::spawn(move || loop {
            select! {
                recv(ticker) -> _ => {
                    let snapshot = counters.snapshot();
                    reporter.status(&format_progress(&snapshot, show_matches));
                }
                // Closing the done channel wakes the select and ends the loop
                recv(done_receiver) -> _ => return,
            }
        });

        Self {
            done_sender: Some(done_sender),
            handle: Some(handle),
        }
    }

    /// Stop the ticker thread and wait for it. Safe to call twice.
    pub fn stop(&mut self) {
        if let Some(sender) = self.done_sender.take() {
            drop(sender);
        }
        if let Some(handle) = self.handle.take() {
            handle
                .join()
                .unwrap_or_else(|e| panic!("Progress thread panicked: {:?}", e));
        }
    }
}

impl Drop for ProgressReporter {
    fn drop(&mut self) {
        self.stop();
    }
}
