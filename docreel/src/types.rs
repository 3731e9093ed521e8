use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// One recognized spoken word with timing.
///
/// Offsets are seconds into the narration track. The recognizer guarantees
/// `start < end` per word and non-decreasing `start` across the sequence;
/// neither is re-checked downstream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WordTiming {
    pub text: String,
    pub start: f64,
    pub end: f64,
}

impl WordTiming {
    /// How long the word is spoken for, in seconds.
    pub fn duration(&self) -> f64 {
        self.end - self.start
    }
}

/// Synthesized narration: the audio track on disk plus its word timings.
#[derive(Debug, Clone)]
pub struct Narration {
    pub audio_path: PathBuf,
    /// Track length in seconds, read from the WAV header.
    pub duration: f64,
    pub words: Vec<WordTiming>,
}

/// The final rendered video.
#[derive(Debug, Clone, Serialize)]
pub struct VideoArtifact {
    pub video_path: PathBuf,
    /// Seconds; equals the narration duration.
    pub duration: f64,
    /// The summary the narration was synthesized from.
    pub summary: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_word_timing_duration() {
        let w = WordTiming {
            text: "hello".into(),
            start: 1.25,
            end: 1.75,
        };
        assert!((w.duration() - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_word_timing_serde() {
        let w = WordTiming {
            text: "cap".into(),
            start: 0.0,
            end: 0.4,
        };
        let json = serde_json::to_string(&w).unwrap();
        let back: WordTiming = serde_json::from_str(&json).unwrap();
        assert_eq!(back, w);
    }
}
