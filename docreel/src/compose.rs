//! Final video assembly via ffmpeg: loop the background under the narration,
//! trim to the narration length, scale to the output frame, burn the caption
//! overlays, and mux the audio.

use std::path::Path;
use std::process::Command;

use tracing::info;

use crate::config::VideoOptions;
use crate::error::{Error, Result};

/// Container duration in seconds, via ffprobe.
pub fn probe_duration(path: &Path) -> Result<f64> {
    let output = Command::new("ffprobe")
        .args([
            "-v",
            "error",
            "-show_entries",
            "format=duration",
            "-of",
            "default=noprint_wrappers=1:nokey=1",
        ])
        .arg(path)
        .output()
        .map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                Error::Compositing("ffprobe not found — install with: apt install ffmpeg".into())
            } else {
                Error::Compositing(format!("failed to run ffprobe: {e}"))
            }
        })?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(Error::Compositing(format!("ffprobe failed: {stderr}")));
    }

    String::from_utf8_lossy(&output.stdout)
        .trim()
        .parse()
        .map_err(|e| Error::Compositing(format!("unparseable ffprobe duration: {e}")))
}

/// How many plays of the background cover the narration.
pub(crate) fn loops_needed(narration_secs: f64, background_secs: f64) -> u32 {
    (narration_secs / background_secs) as u32 + 1
}

/// Composite the final video.
///
/// `duration` is the narration length; the looped background is trimmed to it
/// so no overlay outlives the visual track.
pub fn composite(
    background: &Path,
    ass_path: &Path,
    audio_path: &Path,
    duration: f64,
    options: &VideoOptions,
    out_path: &Path,
) -> Result<()> {
    let background_duration = probe_duration(background)?;
    if background_duration <= 0.0 {
        return Err(Error::Compositing("background video has zero duration".into()));
    }

    let loops = loops_needed(duration, background_duration);
    info!(
        narration_secs = format!("{duration:.1}"),
        background_secs = format!("{background_duration:.1}"),
        loops,
        "compositing video"
    );

    let args = build_ffmpeg_args(background, ass_path, audio_path, duration, loops, options, out_path);

    let output = Command::new("ffmpeg")
        .args(&args)
        .output()
        .map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                Error::Compositing("ffmpeg not found — install with: apt install ffmpeg".into())
            } else {
                Error::Compositing(format!("failed to run ffmpeg: {e}"))
            }
        })?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(Error::Compositing(format!("ffmpeg failed: {stderr}")));
    }

    info!(path = %out_path.display(), "video written");
    Ok(())
}

/// The full ffmpeg argument list. `-stream_loop` counts repeats after the
/// first play, so it gets `loops - 1`.
fn build_ffmpeg_args(
    background: &Path,
    ass_path: &Path,
    audio_path: &Path,
    duration: f64,
    loops: u32,
    options: &VideoOptions,
    out_path: &Path,
) -> Vec<String> {
    vec![
        "-y".into(),
        "-stream_loop".into(),
        loops.saturating_sub(1).to_string(),
        "-i".into(),
        background.to_string_lossy().into_owned(),
        "-i".into(),
        audio_path.to_string_lossy().into_owned(),
        "-vf".into(),
        format!(
            "scale={}:{},subtitles={}",
            options.width,
            options.height,
            ass_path.to_string_lossy()
        ),
        "-map".into(),
        "0:v:0".into(),
        "-map".into(),
        "1:a:0".into(),
        "-c:v".into(),
        "libx264".into(),
        "-preset".into(),
        "medium".into(),
        "-crf".into(),
        "23".into(),
        "-c:a".into(),
        "aac".into(),
        "-r".into(),
        options.fps.to_string(),
        "-t".into(),
        format!("{duration:.3}"),
        "-shortest".into(),
        out_path.to_string_lossy().into_owned(),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_loops_needed_exact_multiple() {
        // 10s narration over a 5s background: floor(10/5) + 1 = 3 plays
        assert_eq!(loops_needed(10.0, 5.0), 3);
    }

    #[test]
    fn test_loops_needed_partial() {
        assert_eq!(loops_needed(7.2, 5.0), 2);
        assert_eq!(loops_needed(4.9, 5.0), 1);
    }

    #[test]
    fn test_loops_needed_long_background() {
        // Background longer than narration still plays once
        assert_eq!(loops_needed(3.0, 60.0), 1);
    }

    #[test]
    fn test_build_ffmpeg_args_shape() {
        let options = VideoOptions::new().frame(720, 480).fps(24);
        let args = build_ffmpeg_args(
            &PathBuf::from("bg.mp4"),
            &PathBuf::from("subs.ass"),
            &PathBuf::from("narration.wav"),
            12.5,
            3,
            &options,
            &PathBuf::from("out.mp4"),
        );

        // 3 plays → 2 repeats
        let loop_idx = args.iter().position(|a| a == "-stream_loop").unwrap();
        assert_eq!(args[loop_idx + 1], "2");

        let vf_idx = args.iter().position(|a| a == "-vf").unwrap();
        assert_eq!(args[vf_idx + 1], "scale=720:480,subtitles=subs.ass");

        let t_idx = args.iter().position(|a| a == "-t").unwrap();
        assert_eq!(args[t_idx + 1], "12.500");

        assert_eq!(args.last().unwrap(), "out.mp4");
        assert!(args.contains(&"libx264".to_string()));
        assert!(args.contains(&"aac".to_string()));
        assert!(args.contains(&"23".to_string()));
    }
}
