//! Document in, narrated short-form video out.
//!
//! **docreel** handles the full pipeline: text extraction (PDF or plain
//! text), abstractive summarization (any OpenAI-compatible endpoint), TTS
//! narration (via Piper), word-level timing recognition (via whisper.cpp),
//! and compositing the narration over a looping background video with
//! word-by-word karaoke captions (via ffmpeg).
//!
//! # Quick start
//!
//! ```rust,no_run
//! # #[tokio::main]
//! # async fn main() -> docreel::Result<()> {
//! // Just the summary
//! let summary = docreel::summarize_file("paper.pdf", &Default::default()).await?;
//! println!("{summary}");
//!
//! // The full video
//! let options = docreel::VideoOptions::new().background("assets/gameplay.mp4");
//! let artifact = docreel::generate_video("paper.pdf", &options).await?;
//! println!("{}", artifact.video_path.display());
//! # Ok(())
//! # }
//! ```

pub(crate) mod audio;
pub mod captions;
pub mod config;
pub mod error;
pub mod extract;
pub mod model;
pub mod script;
pub mod summarize;
pub(crate) mod transcribe;
pub(crate) mod tts;
pub mod types;

mod compose;

pub use captions::{compose_overlays, CaptionOverlayElement, CaptionStyle, CONTENT_STYLE, INTRO_STYLE};
pub use config::{SummarizerConfig, VideoOptions, WhisperModel};
pub use error::{Error, Result};
pub use script::NarrationScript;
pub use summarize::{ApiSummarizer, Summarizer};
pub use types::{Narration, VideoArtifact, WordTiming};

use std::path::Path;

use tracing::info;

/// Summarize a document on disk.
pub async fn summarize_file(
    path: impl AsRef<Path>,
    config: &SummarizerConfig,
) -> Result<String> {
    let text = extract::extract_text(path.as_ref())?;
    ApiSummarizer::new(config).summarize(&text).await
}

/// Summarize in-memory document bytes (`filename` decides the parser).
pub async fn summarize_bytes(
    bytes: &[u8],
    filename: &str,
    config: &SummarizerConfig,
) -> Result<String> {
    let text = extract::extract_text_from_bytes(bytes, filename)?;
    ApiSummarizer::new(config).summarize(&text).await
}

/// Generate a narrated caption video from a document on disk.
pub async fn generate_video(
    path: impl AsRef<Path>,
    options: &VideoOptions,
) -> Result<VideoArtifact> {
    let text = extract::extract_text(path.as_ref())?;
    let summary = ApiSummarizer::new(&options.summarizer)
        .summarize(&text)
        .await?;
    narrate_and_compose(summary, options).await
}

/// Generate a narrated caption video from in-memory document bytes.
pub async fn generate_video_from_bytes(
    bytes: &[u8],
    filename: &str,
    options: &VideoOptions,
) -> Result<VideoArtifact> {
    let text = extract::extract_text_from_bytes(bytes, filename)?;
    let summary = ApiSummarizer::new(&options.summarizer)
        .summarize(&text)
        .await?;
    narrate_and_compose(summary, options).await
}

/// Narrate a summary and composite it over the background video.
async fn narrate_and_compose(summary: String, options: &VideoOptions) -> Result<VideoArtifact> {
    if !options.background.exists() {
        return Err(Error::BackgroundNotFound {
            path: options.background.clone(),
        });
    }

    let script = if options.intro {
        NarrationScript::with_random_intro(summary.as_str())
    } else {
        NarrationScript::plain(summary.as_str())
    };

    // Unique temp directory per invocation so concurrent requests (even
    // within the same process) don't collide.
    let tmp_dir = std::env::temp_dir().join(format!(
        "docreel-{}-{}",
        std::process::id(),
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap_or_default()
            .as_nanos()
    ));
    std::fs::create_dir_all(&tmp_dir)?;
    let _cleanup = TempDirGuard(&tmp_dir);

    // Narration synthesis
    let audio_path = tmp_dir.join("narration.wav");
    tts::synthesize(&script.full_text(), &options.voice_model, &audio_path)?;
    let duration = tts::wav_duration(&audio_path)?;

    // Word-level timings
    let cache_dir = options.resolve_cache_dir();
    let model_path = model::ensure_model(&options.whisper_model, &cache_dir).await?;
    let samples = audio::load_samples(&audio_path)?;
    let words = transcribe::word_timings(&samples, &model_path, options)?;

    let narration = Narration {
        audio_path,
        duration,
        words,
    };

    // Caption composition
    let elements = compose_overlays(&narration.words, script.intro_phrase());
    let ass_path = tmp_dir.join("captions.ass");
    std::fs::write(
        &ass_path,
        captions::render_ass(&elements, options.width, options.height),
    )?;

    // Final assembly
    std::fs::create_dir_all(&options.output_dir)?;
    let out_path = options
        .output_dir
        .join(format!("{}.mp4", uuid::Uuid::new_v4()));
    compose::composite(
        &options.background,
        &ass_path,
        &narration.audio_path,
        narration.duration,
        options,
        &out_path,
    )?;

    info!(
        path = %out_path.display(),
        duration_secs = format!("{:.1}", narration.duration),
        words = narration.words.len(),
        "video generated"
    );

    Ok(VideoArtifact {
        video_path: out_path,
        duration: narration.duration,
        summary,
    })
}

/// Removes the request's temp directory (narration WAV, caption document) on
/// every exit path, including failure.
struct TempDirGuard<'a>(&'a std::path::Path);

impl Drop for TempDirGuard<'_> {
    fn drop(&mut self) {
        if self.0.exists() {
            if let Err(e) = std::fs::remove_dir_all(self.0) {
                tracing::warn!(path = %self.0.display(), error = %e, "failed to remove request temp dir");
            }
        }
    }
}
