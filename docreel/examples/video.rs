//! Generate a narrated caption video with custom options.
//!
//! Usage: cargo run --example video -- path/to/document.pdf

use docreel::{VideoOptions, WhisperModel};

#[tokio::main]
async fn main() -> docreel::Result<()> {
    let path = std::env::args()
        .nth(1)
        .expect("usage: video <document>");

    let options = VideoOptions::new()
        .whisper_model(WhisperModel::Base)
        .background("assets/background.mp4")
        .frame(720, 480)
        .output_dir("out");

    let artifact = docreel::generate_video(&path, &options).await?;

    println!("video:   {}", artifact.video_path.display());
    println!("length:  {:.1}s", artifact.duration);
    println!("summary: {}", artifact.summary);

    Ok(())
}
