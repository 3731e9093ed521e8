//! Summarize a document and print the result.
//!
//! Usage: cargo run --example summarize -- path/to/document.pdf

#[tokio::main]
async fn main() -> docreel::Result<()> {
    let path = std::env::args()
        .nth(1)
        .expect("usage: summarize <document>");

    let summary = docreel::summarize_file(&path, &Default::default()).await?;

    println!("{summary}");

    Ok(())
}
