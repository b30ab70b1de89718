//! Simulated speech engine
//!
//! Voices each utterance as a timed task so the whole pipeline can run and
//! be tested without a platform synthesizer. Duration scales with text
//! length; `stop` cuts the current utterance off with an `Interrupted`
//! event; `pause`/`resume` emit nothing, per the engine contract.

use std::time::Duration;

use async_trait::async_trait;
use readaloud_tts::{EngineEvent, SpeakOptions, SpeechEngine, TtsResult, VoiceInfo};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::debug;

pub struct SimEngine {
    events: mpsc::UnboundedSender<EngineEvent>,
    /// Characters voiced per second at rate 1.0.
    chars_per_sec: u32,
    voicing: Option<JoinHandle<()>>,
}

impl SimEngine {
    pub fn new(events: mpsc::UnboundedSender<EngineEvent>, chars_per_sec: u32) -> Self {
        Self {
            events,
            chars_per_sec: chars_per_sec.max(1),
            voicing: None,
        }
    }

    fn utterance_duration(&self, text: &str, rate: f32) -> Duration {
        let chars = text.chars().count() as f32;
        let per_sec = self.chars_per_sec as f32 * rate.max(0.1);
        Duration::from_secs_f32(chars / per_sec)
    }
}

#[async_trait]
impl SpeechEngine for SimEngine {
    async fn speak(&mut self, text: &str, options: &SpeakOptions) -> TtsResult<()> {
        let duration = self.utterance_duration(text, options.rate);
        debug!(chars = text.chars().count(), ?duration, "voicing utterance");
        let events = self.events.clone();
        self.voicing = Some(tokio::spawn(async move {
            let _ = events.send(EngineEvent::Start);
            tokio::time::sleep(duration).await;
            let _ = events.send(EngineEvent::End);
        }));
        Ok(())
    }

    async fn stop(&mut self) -> TtsResult<()> {
        if let Some(handle) = self.voicing.take() {
            if !handle.is_finished() {
                handle.abort();
                let _ = self.events.send(EngineEvent::Interrupted);
            }
        }
        Ok(())
    }

    async fn pause(&mut self) -> TtsResult<()> {
        debug!("sim engine paused");
        Ok(())
    }

    async fn resume(&mut self) -> TtsResult<()> {
        debug!("sim engine resumed");
        Ok(())
    }

    async fn is_speaking(&self) -> bool {
        self.voicing
            .as_ref()
            .map(|handle| !handle.is_finished())
            .unwrap_or(false)
    }

    async fn list_voices(&self) -> TtsResult<Vec<VoiceInfo>> {
        Ok(vec![
            VoiceInfo {
                name: "Sim English Female".to_string(),
                language: "en-GB".to_string(),
            },
            VoiceInfo {
                name: "Sim English Male".to_string(),
                language: "en-US".to_string(),
            },
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn speak_emits_start_then_end() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut engine = SimEngine::new(tx, 60);

        engine
            .speak("hello there", &SpeakOptions::default())
            .await
            .unwrap();
        assert_eq!(rx.recv().await, Some(EngineEvent::Start));
        assert_eq!(rx.recv().await, Some(EngineEvent::End));
    }

    #[tokio::test(start_paused = true)]
    async fn stop_interrupts_an_in_flight_utterance() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut engine = SimEngine::new(tx, 1);

        engine
            .speak("a very long utterance indeed", &SpeakOptions::default())
            .await
            .unwrap();
        assert_eq!(rx.recv().await, Some(EngineEvent::Start));
        assert!(engine.is_speaking().await);

        engine.stop().await.unwrap();
        assert_eq!(rx.recv().await, Some(EngineEvent::Interrupted));
        assert!(!engine.is_speaking().await);
    }

    #[tokio::test(start_paused = true)]
    async fn stop_twice_emits_one_interrupted() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut engine = SimEngine::new(tx, 1);

        engine.speak("text", &SpeakOptions::default()).await.unwrap();
        assert_eq!(rx.recv().await, Some(EngineEvent::Start));
        engine.stop().await.unwrap();
        engine.stop().await.unwrap();

        assert_eq!(rx.recv().await, Some(EngineEvent::Interrupted));
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn pause_and_resume_emit_no_lifecycle_events() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut engine = SimEngine::new(tx, 1);

        engine.speak("text", &SpeakOptions::default()).await.unwrap();
        assert_eq!(rx.recv().await, Some(EngineEvent::Start));

        engine.pause().await.unwrap();
        engine.resume().await.unwrap();
        assert!(rx.try_recv().is_err(), "keep-alive nudge must be silent");
    }
}
