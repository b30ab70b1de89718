use std::time::Duration;
use tokio::time::{sleep_until, Instant};

/// Owner of a single restartable deadline.
///
/// Arming while already armed pushes the deadline out; cancelling while
/// unarmed is a no-op. Both are first-class operations rather than implicit
/// null checks, so the idempotency contract is testable on its own.
#[derive(Debug)]
pub struct DebounceTimer {
    window: Duration,
    deadline: Option<Instant>,
}

impl DebounceTimer {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            deadline: None,
        }
    }

    /// (Re)start the window from now.
    pub fn arm(&mut self) {
        self.deadline = Some(Instant::now() + self.window);
    }

    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    pub fn is_armed(&self) -> bool {
        self.deadline.is_some()
    }

    /// Completes when the armed deadline passes, disarming the timer.
    /// Pending forever while unarmed, so it can sit in a `select!` loop.
    pub async fn expired(&mut self) {
        match self.deadline {
            Some(deadline) => {
                sleep_until(deadline).await;
                self.deadline = None;
            }
            None => std::future::pending().await,
        }
    }
}
