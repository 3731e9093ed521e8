//! Speech synthesis via a Piper subprocess.
//!
//! Piper reads the script from stdin and writes a WAV file; the voice is an
//! .onnx model picked in [`VideoOptions`](crate::VideoOptions).

use std::io::Write;
use std::path::Path;
use std::process::{Command, Stdio};

use tracing::info;

use crate::error::{Error, Result};

/// Synthesize `script` into a WAV file at `out_path`.
pub fn synthesize(script: &str, voice_model: &Path, out_path: &Path) -> Result<()> {
    info!(voice = %voice_model.display(), chars = script.len(), "synthesizing narration");

    let mut child = Command::new("piper")
        .arg("--model")
        .arg(voice_model)
        .arg("--output_file")
        .arg(out_path)
        .stdin(Stdio::piped())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                Error::Synthesis("piper not found — install with: pip install piper-tts".into())
            } else {
                Error::Synthesis(format!("failed to run piper: {e}"))
            }
        })?;

    let mut stdin = child
        .stdin
        .take()
        .ok_or_else(|| Error::Synthesis("failed to open piper stdin".into()))?;
    stdin.write_all(script.as_bytes())?;
    drop(stdin);

    let status = child.wait()?;
    if !status.success() {
        return Err(Error::Synthesis(format!("piper exited with {status}")));
    }

    if !out_path.exists() {
        return Err(Error::Synthesis("piper produced no output file".into()));
    }

    info!(path = %out_path.display(), "narration written");
    Ok(())
}

/// Track length in seconds, from the WAV header.
pub fn wav_duration(path: &Path) -> Result<f64> {
    let reader = hound::WavReader::open(path)
        .map_err(|e| Error::Synthesis(format!("failed to read WAV {}: {e}", path.display())))?;
    let spec = reader.spec();
    let frames = reader.len() as f64 / spec.channels as f64;
    Ok(frames / spec.sample_rate as f64)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_test_wav(path: &Path, sample_rate: u32, channels: u16, frames: u32) {
        let spec = hound::WavSpec {
            channels,
            sample_rate,
            bits_per_sample: 16,
            sample_format: hound::SampleFormat::Int,
        };
        let mut writer = hound::WavWriter::create(path, spec).unwrap();
        for _ in 0..(frames * channels as u32) {
            writer.write_sample(0i16).unwrap();
        }
        writer.finalize().unwrap();
    }

    #[test]
    fn test_wav_duration_mono() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mono.wav");
        write_test_wav(&path, 22_050, 1, 22_050);
        let d = wav_duration(&path).unwrap();
        assert!((d - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_wav_duration_stereo() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("stereo.wav");
        write_test_wav(&path, 16_000, 2, 8_000);
        let d = wav_duration(&path).unwrap();
        assert!((d - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_wav_duration_missing_file() {
        let err = wav_duration(Path::new("/nonexistent/audio.wav")).unwrap_err();
        assert!(matches!(err, Error::Synthesis(_)));
    }
}
