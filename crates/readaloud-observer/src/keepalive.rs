use std::time::Duration;

use readaloud_bus::{BusHandle, Message};
use tokio::task::JoinHandle;
use tracing::debug;

/// Periodic keep-alive signaling while speech is active.
///
/// The controller context can be suspended independently of an in-progress
/// utterance, and the platform silently ends utterances after an idle
/// timeout on the order of tens of seconds. While running, this timer
/// publishes `REFRESH_TTS` every period so the controller nudges the engine
/// before that timeout fires. At most one interval task exists at a time.
pub struct KeepAliveTimer {
    period: Duration,
    handle: Option<JoinHandle<()>>,
}

impl KeepAliveTimer {
    pub fn new(period: Duration) -> Self {
        Self {
            period,
            handle: None,
        }
    }

    /// Start the refresh interval. Restarting while already running first
    /// cancels the previous interval, so two can never run concurrently.
    pub fn start(&mut self, bus: BusHandle) {
        self.stop();
        let period = self.period;
        debug!(period_ms = period.as_millis() as u64, "keep-alive started");
        self.handle = Some(tokio::spawn(async move {
            let mut interval = tokio::time::interval(period);
            // The first tick of a tokio interval fires immediately.
            interval.tick().await;
            loop {
                interval.tick().await;
                bus.publish(Message::RefreshTts).await;
            }
        }));
    }

    /// Cancel the refresh interval. No-op while not running.
    pub fn stop(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
            debug!("keep-alive stopped");
        }
    }

    pub fn is_running(&self) -> bool {
        self.handle
            .as_ref()
            .map(|handle| !handle.is_finished())
            .unwrap_or(false)
    }
}

impl Drop for KeepAliveTimer {
    fn drop(&mut self) {
        self.stop();
    }
}
