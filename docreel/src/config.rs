use std::path::PathBuf;

/// Whisper model sizes for word-timing recognition.
///
/// The narration is short and synthesized, so the small models hold up well;
/// `Base` is the default.
#[derive(Debug, Clone)]
pub enum WhisperModel {
    Tiny,
    TinyEn,
    Base,
    BaseEn,
    Small,
    SmallEn,
    Medium,
    MediumEn,
    LargeV3,
    LargeV3Turbo,
    /// User-provided .ggml file path.
    Custom(PathBuf),
}

impl WhisperModel {
    /// Model filename as used by HuggingFace / whisper.cpp.
    pub fn filename(&self) -> String {
        match self {
            WhisperModel::Tiny => "ggml-tiny.bin".into(),
            WhisperModel::TinyEn => "ggml-tiny.en.bin".into(),
            WhisperModel::Base => "ggml-base.bin".into(),
            WhisperModel::BaseEn => "ggml-base.en.bin".into(),
            WhisperModel::Small => "ggml-small.bin".into(),
            WhisperModel::SmallEn => "ggml-small.en.bin".into(),
            WhisperModel::Medium => "ggml-medium.bin".into(),
            WhisperModel::MediumEn => "ggml-medium.en.bin".into(),
            WhisperModel::LargeV3 => "ggml-large-v3.bin".into(),
            WhisperModel::LargeV3Turbo => "ggml-large-v3-turbo.bin".into(),
            WhisperModel::Custom(path) => path
                .file_name()
                .map(|f| f.to_string_lossy().into_owned())
                .unwrap_or_else(|| "custom-model".into()),
        }
    }

    /// Human-readable name.
    pub fn name(&self) -> &str {
        match self {
            WhisperModel::Tiny => "tiny",
            WhisperModel::TinyEn => "tiny.en",
            WhisperModel::Base => "base",
            WhisperModel::BaseEn => "base.en",
            WhisperModel::Small => "small",
            WhisperModel::SmallEn => "small.en",
            WhisperModel::Medium => "medium",
            WhisperModel::MediumEn => "medium.en",
            WhisperModel::LargeV3 => "large-v3",
            WhisperModel::LargeV3Turbo => "large-v3-turbo",
            WhisperModel::Custom(_) => "custom",
        }
    }

    /// Parse from string (e.g. CLI argument).
    pub fn parse_name(s: &str) -> Option<Self> {
        match s {
            "tiny" => Some(WhisperModel::Tiny),
            "tiny.en" => Some(WhisperModel::TinyEn),
            "base" => Some(WhisperModel::Base),
            "base.en" => Some(WhisperModel::BaseEn),
            "small" => Some(WhisperModel::Small),
            "small.en" => Some(WhisperModel::SmallEn),
            "medium" => Some(WhisperModel::Medium),
            "medium.en" => Some(WhisperModel::MediumEn),
            "large-v3" => Some(WhisperModel::LargeV3),
            "large-v3-turbo" => Some(WhisperModel::LargeV3Turbo),
            _ => None,
        }
    }
}

impl Default for WhisperModel {
    fn default() -> Self {
        WhisperModel::Base
    }
}

/// Connection and bounds for the summarization model.
///
/// Points at any OpenAI-compatible `/v1/chat/completions` endpoint — Ollama
/// (OpenAI mode), OpenAI, Groq, LM Studio, vLLM. Nothing is hardcoded.
#[derive(Debug, Clone)]
pub struct SummarizerConfig {
    /// Base URL without the `/v1/chat/completions` suffix.
    pub base_url: String,
    /// Attached as `Authorization: Bearer …` only when non-empty.
    pub api_key: Option<String>,
    pub model: String,
    pub timeout_secs: u64,
    /// Lower bound on summary length, in words.
    pub min_words: u32,
    /// Upper bound on summary length, in words.
    pub max_words: u32,
}

impl Default for SummarizerConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:11434".into(),
            api_key: None,
            model: "llama3.2".into(),
            timeout_secs: 120,
            min_words: 100,
            max_words: 500,
        }
    }
}

impl SummarizerConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    pub fn word_bounds(mut self, min: u32, max: u32) -> Self {
        self.min_words = min;
        self.max_words = max;
        self
    }
}

/// Builder for video generation options.
pub struct VideoOptions {
    pub summarizer: SummarizerConfig,
    pub whisper_model: WhisperModel,
    /// Language code passed to whisper (narration is synthesized, so this is
    /// known up front rather than detected).
    pub language: String,
    /// Piper voice model (.onnx).
    pub voice_model: PathBuf,
    /// Background clip that gets looped and trimmed under the captions.
    pub background: PathBuf,
    /// Where the final .mp4 lands.
    pub output_dir: PathBuf,
    pub width: u32,
    pub height: u32,
    pub fps: u32,
    /// Prepend a randomly chosen intro phrase to the narration.
    pub intro: bool,
    pub gpu: bool,
    pub n_threads: Option<u32>,
    pub cache_dir: Option<PathBuf>,
}

impl Default for VideoOptions {
    fn default() -> Self {
        Self {
            summarizer: SummarizerConfig::default(),
            whisper_model: WhisperModel::Base,
            language: "en".into(),
            voice_model: PathBuf::from("en_US-amy-medium.onnx"),
            background: PathBuf::from("assets/background.mp4"),
            output_dir: PathBuf::from("out"),
            width: 720,
            height: 480,
            fps: 24,
            intro: true,
            gpu: true,
            n_threads: None,
            cache_dir: None,
        }
    }
}

impl VideoOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn summarizer(mut self, config: SummarizerConfig) -> Self {
        self.summarizer = config;
        self
    }

    pub fn whisper_model(mut self, model: WhisperModel) -> Self {
        self.whisper_model = model;
        self
    }

    pub fn language(mut self, code: impl Into<String>) -> Self {
        self.language = code.into();
        self
    }

    pub fn voice_model(mut self, path: impl Into<PathBuf>) -> Self {
        self.voice_model = path.into();
        self
    }

    pub fn background(mut self, path: impl Into<PathBuf>) -> Self {
        self.background = path.into();
        self
    }

    pub fn output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }

    pub fn frame(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn fps(mut self, fps: u32) -> Self {
        self.fps = fps;
        self
    }

    pub fn intro(mut self, enabled: bool) -> Self {
        self.intro = enabled;
        self
    }

    pub fn gpu(mut self, enabled: bool) -> Self {
        self.gpu = enabled;
        self
    }

    pub fn n_threads(mut self, n: u32) -> Self {
        self.n_threads = Some(n);
        self
    }

    pub fn cache_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.cache_dir = Some(dir.into());
        self
    }

    /// Resolve the model cache directory, defaulting to ~/.cache/docreel/models.
    pub fn resolve_cache_dir(&self) -> PathBuf {
        self.cache_dir.clone().unwrap_or_else(|| {
            dirs::cache_dir()
                .unwrap_or_else(|| PathBuf::from(".cache"))
                .join("docreel")
                .join("models")
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_whisper_model_roundtrip_names() {
        for name in [
            "tiny", "tiny.en", "base", "base.en", "small", "small.en", "medium", "medium.en",
            "large-v3", "large-v3-turbo",
        ] {
            let model = WhisperModel::parse_name(name).unwrap();
            assert_eq!(model.name(), name);
        }
    }

    #[test]
    fn test_whisper_model_parse_unknown() {
        assert!(WhisperModel::parse_name("large-v1").is_none());
        assert!(WhisperModel::parse_name("").is_none());
    }

    #[test]
    fn test_whisper_model_custom_filename() {
        let model = WhisperModel::Custom(PathBuf::from("/models/ggml-finetune.bin"));
        assert_eq!(model.filename(), "ggml-finetune.bin");
        assert_eq!(model.name(), "custom");
    }

    #[test]
    fn test_video_options_builder() {
        let opts = VideoOptions::new()
            .whisper_model(WhisperModel::Small)
            .language("de")
            .frame(1080, 1920)
            .fps(30)
            .intro(false)
            .n_threads(4);
        assert_eq!(opts.whisper_model.name(), "small");
        assert_eq!(opts.language, "de");
        assert_eq!((opts.width, opts.height), (1080, 1920));
        assert_eq!(opts.fps, 30);
        assert!(!opts.intro);
        assert_eq!(opts.n_threads, Some(4));
    }

    #[test]
    fn test_resolve_cache_dir_explicit() {
        let opts = VideoOptions::new().cache_dir("/tmp/models");
        assert_eq!(opts.resolve_cache_dir(), PathBuf::from("/tmp/models"));
    }

    #[test]
    fn test_resolve_cache_dir_default_ends_with_models() {
        let opts = VideoOptions::new();
        let dir = opts.resolve_cache_dir();
        assert!(dir.ends_with("docreel/models"));
    }

    #[test]
    fn test_summarizer_config_builder() {
        let config = SummarizerConfig::new()
            .base_url("https://api.groq.com/openai")
            .api_key("sk-test")
            .model("mixtral")
            .word_bounds(50, 200);
        assert_eq!(config.base_url, "https://api.groq.com/openai");
        assert_eq!(config.api_key.as_deref(), Some("sk-test"));
        assert_eq!(config.model, "mixtral");
        assert_eq!((config.min_words, config.max_words), (50, 200));
    }
}
