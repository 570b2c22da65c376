//! Timed auto-advance after an answer is revealed.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::event::AppEvent;

/// How long an answered question stays on screen by default.
pub const DEFAULT_ADVANCE_DELAY: Duration = Duration::from_millis(1000);

/// Spawns delayed [`AppEvent::Advance`] events onto the app's event channel.
#[derive(Debug, Clone)]
pub struct AdvanceScheduler {
    delay: Duration,
    tx: mpsc::UnboundedSender<AppEvent>,
}

/// A pending advance. Cancelling or dropping it guarantees it never fires.
#[derive(Debug)]
pub struct AdvanceHandle {
    question_index: usize,
    task: JoinHandle<()>,
}

impl AdvanceScheduler {
    pub fn new(delay: Duration, tx: mpsc::UnboundedSender<AppEvent>) -> Self {
        Self { delay, tx }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Must be called from within a tokio runtime.
    pub fn schedule(&self, question_index: usize) -> AdvanceHandle {
        let delay = self.delay;
        let tx = self.tx.clone();

        let task = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            // Receiver gone means the app is shutting down.
            let _ = tx.send(AppEvent::Advance { question_index });
        });

        AdvanceHandle {
            question_index,
            task,
        }
    }
}

impl AdvanceHandle {
    pub fn question_index(&self) -> usize {
        self.question_index
    }

    pub fn cancel(self) {
        // Drop does the work.
    }
}

impl Drop for AdvanceHandle {
    fn drop(&mut self) {
        self.task.abort();
    }
}
