//! Word-level timing recognition over the narration track via whisper.cpp.
//!
//! The narration text is already known (we synthesized it); what whisper
//! contributes is *when* each word is spoken. Segments are flattened into one
//! time-ordered word list — the recognizer's own word segmentation is treated
//! as ground truth and never reconciled against the script.

use std::path::Path;

use tracing::{debug, info};
use whisper_rs::{FullParams, SamplingStrategy, WhisperContext, WhisperContextParameters};

use crate::config::VideoOptions;
use crate::error::{Error, Result};
use crate::types::WordTiming;

/// Recognize word timings from 16 kHz mono f32 samples.
pub fn word_timings(
    samples: &[f32],
    model_path: &Path,
    options: &VideoOptions,
) -> Result<Vec<WordTiming>> {
    info!(model = %model_path.display(), "loading whisper model");

    let mut ctx_params = WhisperContextParameters::new();
    ctx_params.use_gpu(options.gpu);

    let ctx = WhisperContext::new_with_params(
        model_path
            .to_str()
            .ok_or_else(|| Error::Model("model path contains invalid UTF-8".into()))?,
        ctx_params,
    )?;

    let mut state = ctx.create_state()?;

    let mut params = FullParams::new(SamplingStrategy::Greedy { best_of: 5 });
    params.set_language(Some(options.language.as_str()));
    params.set_token_timestamps(true);

    if let Some(n) = options.n_threads {
        params.set_n_threads(n as i32);
    }

    // Disable stderr printing from whisper.cpp
    params.set_print_progress(false);
    params.set_print_realtime(false);
    params.set_print_timestamps(false);

    info!(samples = samples.len(), "running word-timing recognition");
    state.full(params, samples)?;

    let num_segments = state.full_n_segments();
    debug!(num_segments, "recognition complete");

    let mut words = Vec::new();

    for i in 0..num_segments {
        let segment = state
            .get_segment(i)
            .ok_or_else(|| Error::Transcription(format!("segment {i} not found")))?;

        let n_tokens = segment.n_tokens();
        for t in 0..n_tokens {
            let token = match segment.get_token(t) {
                Some(tok) => tok,
                None => continue,
            };

            let token_text = match token.to_str_lossy() {
                Ok(s) => s.into_owned(),
                Err(_) => continue,
            };

            // Skip special tokens (they start with '[' or '<')
            let trimmed = token_text.trim();
            if trimmed.is_empty() || trimmed.starts_with('[') || trimmed.starts_with('<') {
                continue;
            }

            let token_data = token.token_data();

            words.push(WordTiming {
                text: token_text,
                start: token_data.t0 as f64 / 100.0,
                end: token_data.t1 as f64 / 100.0,
            });
        }
    }

    info!(words = words.len(), "word timings collected");
    Ok(words)
}
