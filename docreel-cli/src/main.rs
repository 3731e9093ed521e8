use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use docreel::{SummarizerConfig, VideoOptions, WhisperModel};

#[derive(Parser)]
#[command(name = "docreel", about = "Turn a document into a narrated caption video")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Summarize a document and print the summary.
    Summarize {
        /// PDF or plain-text document.
        input: PathBuf,

        #[command(flatten)]
        llm: LlmArgs,
    },
    /// Generate the full narrated caption video.
    Video {
        /// PDF or plain-text document.
        input: PathBuf,

        /// Background video to loop under the captions.
        #[arg(short, long, default_value = "assets/background.mp4")]
        background: PathBuf,

        /// Directory the final .mp4 lands in.
        #[arg(short, long, default_value = "out")]
        output_dir: PathBuf,

        /// Piper voice model (.onnx).
        #[arg(long, default_value = "en_US-amy-medium.onnx")]
        voice: PathBuf,

        /// Whisper model for word timings.
        #[arg(short, long, default_value = "base")]
        model: String,

        /// Narration language code.
        #[arg(short, long, default_value = "en")]
        language: String,

        /// Output frame width.
        #[arg(long, default_value = "720")]
        width: u32,

        /// Output frame height.
        #[arg(long, default_value = "480")]
        height: u32,

        /// Output frame rate.
        #[arg(long, default_value = "24")]
        fps: u32,

        /// Skip the random intro phrase.
        #[arg(long)]
        no_intro: bool,

        /// Disable GPU acceleration for whisper.
        #[arg(long)]
        no_gpu: bool,

        /// Number of whisper threads (default: auto).
        #[arg(long)]
        threads: Option<u32>,

        /// Model cache directory.
        #[arg(long)]
        cache_dir: Option<PathBuf>,

        #[command(flatten)]
        llm: LlmArgs,
    },
}

#[derive(Args)]
struct LlmArgs {
    /// Base URL of an OpenAI-compatible endpoint.
    #[arg(long, default_value = "http://localhost:11434")]
    llm_url: String,

    /// Model name at that endpoint.
    #[arg(long, default_value = "llama3.2")]
    llm_model: String,

    /// API key (omit for local providers).
    #[arg(long)]
    api_key: Option<String>,

    /// Minimum summary length in words.
    #[arg(long, default_value = "100")]
    min_words: u32,

    /// Maximum summary length in words.
    #[arg(long, default_value = "500")]
    max_words: u32,
}

impl LlmArgs {
    fn into_config(self) -> SummarizerConfig {
        let mut config = SummarizerConfig::new()
            .base_url(self.llm_url)
            .model(self.llm_model)
            .word_bounds(self.min_words, self.max_words);
        if let Some(key) = self.api_key {
            config = config.api_key(key);
        }
        config
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("docreel=info".parse().unwrap()),
        )
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Command::Summarize { input, llm } => {
            let summary = match docreel::summarize_file(&input, &llm.into_config()).await {
                Ok(s) => s,
                Err(e) => {
                    eprintln!("Error: {e}");
                    std::process::exit(1);
                }
            };
            println!("{summary}");
        }
        Command::Video {
            input,
            background,
            output_dir,
            voice,
            model,
            language,
            width,
            height,
            fps,
            no_intro,
            no_gpu,
            threads,
            cache_dir,
            llm,
        } => {
            let whisper_model = match WhisperModel::parse_name(&model) {
                Some(m) => m,
                None => {
                    // Try as custom model path
                    let path = PathBuf::from(&model);
                    if path.exists() {
                        WhisperModel::Custom(path)
                    } else {
                        eprintln!("Unknown model: {model}");
                        eprintln!("Pick one of tiny/base/small/medium/large-v3 (with optional .en), or pass a path to a .ggml file");
                        std::process::exit(1);
                    }
                }
            };

            let mut options = VideoOptions::new()
                .summarizer(llm.into_config())
                .whisper_model(whisper_model)
                .language(language)
                .voice_model(voice)
                .background(background)
                .output_dir(output_dir)
                .frame(width, height)
                .fps(fps)
                .intro(!no_intro)
                .gpu(!no_gpu);

            if let Some(n) = threads {
                options = options.n_threads(n);
            }
            if let Some(dir) = cache_dir {
                options = options.cache_dir(dir);
            }

            let artifact = match docreel::generate_video(&input, &options).await {
                Ok(a) => a,
                Err(e) => {
                    eprintln!("Error: {e}");
                    std::process::exit(1);
                }
            };

            eprintln!(
                "Video complete: {:.1}s of narration, summary of {} words",
                artifact.duration,
                artifact.summary.split_whitespace().count(),
            );
            println!("{}", artifact.video_path.display());
        }
    }
}
