//! Narration script assembly: an optional stylistic intro phrase prepended
//! to the summary.

use rand::seq::SliceRandom;

/// Intro phrases, one of which is chosen at random per video.
pub const INTRO_PHRASES: [&str; 10] = [
    "Ayo rizzler, we gonna learn about...",
    "No cap, this is about to be fire...",
    "Bet you didn't know this...",
    "Slay alert! Let's get into...",
    "This is giving main character energy...",
    "Lowkey obsessed with this...",
    "This is absolutely bussin...",
    "Sup fam, this is about to blow your mind...",
    "It's giving educational vibes...",
    "Let's get this bread and learn about...",
];

/// The text handed to the speech synthesizer, split into intro and body so
/// the caption composer can style them differently.
#[derive(Debug, Clone)]
pub struct NarrationScript {
    pub intro: Option<String>,
    pub summary: String,
}

impl NarrationScript {
    /// Script with a randomly chosen intro phrase.
    pub fn with_random_intro(summary: impl Into<String>) -> Self {
        let intro = INTRO_PHRASES
            .choose(&mut rand::thread_rng())
            .map(|s| s.to_string());
        Self {
            intro,
            summary: summary.into(),
        }
    }

    /// Script without an intro.
    pub fn plain(summary: impl Into<String>) -> Self {
        Self {
            intro: None,
            summary: summary.into(),
        }
    }

    /// The full text to synthesize: `"{intro} {summary}"`, or just the
    /// summary when there is no intro.
    pub fn full_text(&self) -> String {
        match &self.intro {
            Some(intro) => format!("{intro} {}", self.summary),
            None => self.summary.clone(),
        }
    }

    /// The intro phrase, or "" when there is none. This is what the caption
    /// composer derives its style boundary from.
    pub fn intro_phrase(&self) -> &str {
        self.intro.as_deref().unwrap_or("")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_random_intro_from_pool() {
        for _ in 0..20 {
            let script = NarrationScript::with_random_intro("a summary");
            let intro = script.intro.as_deref().unwrap();
            assert!(INTRO_PHRASES.contains(&intro));
        }
    }

    #[test]
    fn test_full_text_joins_with_space() {
        let script = NarrationScript {
            intro: Some("Bet you didn't know this...".into()),
            summary: "Rust is fast.".into(),
        };
        assert_eq!(
            script.full_text(),
            "Bet you didn't know this... Rust is fast."
        );
    }

    #[test]
    fn test_plain_full_text_is_summary() {
        let script = NarrationScript::plain("Just the summary.");
        assert_eq!(script.full_text(), "Just the summary.");
        assert_eq!(script.intro_phrase(), "");
    }

    #[test]
    fn test_intro_phrase_matches_intro() {
        let script = NarrationScript {
            intro: Some("a b c".into()),
            summary: "body".into(),
        };
        assert_eq!(script.intro_phrase(), "a b c");
    }
}
