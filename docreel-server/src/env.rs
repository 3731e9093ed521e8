use std::path::PathBuf;
use std::sync::OnceLock;

use serde::Deserialize;

fn default_port() -> u16 {
    8000
}

fn default_background() -> PathBuf {
    PathBuf::from("assets/background.mp4")
}

fn default_voice_model() -> PathBuf {
    PathBuf::from("en_US-amy-medium.onnx")
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("out")
}

fn default_whisper_model() -> String {
    "base".into()
}

fn default_llm_base_url() -> String {
    "http://localhost:11434".into()
}

fn default_llm_model() -> String {
    "llama3.2".into()
}

#[derive(Deserialize)]
pub struct Env {
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_background")]
    pub background: PathBuf,
    #[serde(default = "default_voice_model")]
    pub voice_model: PathBuf,
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
    #[serde(default = "default_whisper_model")]
    pub whisper_model: String,
    #[serde(default = "default_llm_base_url")]
    pub llm_base_url: String,
    #[serde(default = "default_llm_model")]
    pub llm_model: String,
    #[serde(default)]
    pub llm_api_key: Option<String>,
}

static ENV: OnceLock<Env> = OnceLock::new();

pub fn env() -> &'static Env {
    ENV.get_or_init(|| envy::from_env().expect("Failed to load environment"))
}
