//! Speech output. The browser does the actual synthesis; the service decides
//! what is said and whether playback should stop.

use std::sync::Mutex;

use serde::Serialize;
use tracing::debug;

/// Voices to try first, in order.
pub const PREFERRED_VOICES: &[&str] = &["Google US English", "Samantha"];

/// Text ready for synthesis plus playback parameters.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Utterance {
    pub text: String,
    pub rate: f32,
    pub pitch: f32,
    pub preferred_voices: &'static [&'static str],
}

impl Utterance {
    pub fn new(text: &str) -> Self {
        Self {
            text: clean_for_speech(text),
            rate: 1.0,
            pitch: 1.0,
            preferred_voices: PREFERRED_VOICES,
        }
    }
}

pub trait SpeechOutput: Send + Sync {
    /// Replaces whatever is playing with `text`.
    fn speak(&self, text: &str);
    fn cancel(&self);
    fn current(&self) -> Option<Utterance>;
}

/// Holds the single pending utterance for the client to play.
#[derive(Default)]
pub struct UtteranceSlot {
    current: Mutex<Option<Utterance>>,
}

impl UtteranceSlot {
    fn with_slot<T>(&self, f: impl FnOnce(&mut Option<Utterance>) -> T) -> T {
        let mut guard = self.current.lock().unwrap_or_else(|e| e.into_inner());
        f(&mut guard)
    }
}

impl SpeechOutput for UtteranceSlot {
    fn speak(&self, text: &str) {
        let utterance = Utterance::new(text);
        debug!("Queued utterance ({} chars)", utterance.text.len());
        self.with_slot(|slot| *slot = Some(utterance));
    }

    fn cancel(&self) {
        self.with_slot(|slot| *slot = None);
    }

    fn current(&self) -> Option<Utterance> {
        self.with_slot(|slot| slot.clone())
    }
}

/// Drops markdown markers and turns line breaks into sentence pauses.
pub fn clean_for_speech(text: &str) -> String {
    text.chars()
        .filter(|c| !matches!(c, '*' | '#' | '_' | '-'))
        .collect::<String>()
        .replace('\n', ". ")
}
