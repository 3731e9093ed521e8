//! Narration audio decoding for the word-timing recognizer.

use std::path::Path;
use std::process::Command;

use tracing::{debug, info};

use crate::error::{Error, Result};

/// Target sample rate for whisper.cpp.
pub(crate) const WHISPER_SAMPLE_RATE: u32 = 16_000;

/// Decode the narration track to 16 kHz mono f32 samples ready for whisper.
///
/// Piper writes 22.05 kHz mono WAV, so resampling is always needed; ffmpeg
/// handles decoding, resampling, and channel mixing in one shot.
pub fn load_samples(path: &Path) -> Result<Vec<f32>> {
    info!(path = %path.display(), "decoding narration audio");

    let output = Command::new("ffmpeg")
        .args(["-nostdin", "-threads", "0", "-i"])
        .arg(path)
        .args([
            "-f",
            "s16le",
            "-ac",
            "1",
            "-acodec",
            "pcm_s16le",
            "-ar",
            &WHISPER_SAMPLE_RATE.to_string(),
            "-",
        ])
        .output()
        .map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                Error::AudioDecode("ffmpeg not found — install with: apt install ffmpeg".into())
            } else {
                Error::AudioDecode(format!("failed to run ffmpeg: {e}"))
            }
        })?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(Error::AudioDecode(format!("ffmpeg failed: {stderr}")));
    }

    if output.stdout.is_empty() {
        return Err(Error::AudioDecode("ffmpeg produced no output".into()));
    }

    let samples = convert_samples(&output.stdout);
    debug!(
        samples = samples.len(),
        duration_secs = format!("{:.1}", samples.len() as f64 / WHISPER_SAMPLE_RATE as f64),
        "narration decoded"
    );

    Ok(samples)
}

/// Convert s16le bytes to f32 samples, normalized to [-1.0, 1.0].
fn convert_samples(bytes: &[u8]) -> Vec<f32> {
    bytes
        .chunks_exact(2)
        .map(|chunk| {
            let sample = i16::from_le_bytes([chunk[0], chunk[1]]);
            sample as f32 / 32768.0
        })
        .collect()
}
