//! Abstractive summarization behind a trait seam.
//!
//! [`ApiSummarizer`] calls any OpenAI-compatible `/v1/chat/completions`
//! endpoint — Ollama (OpenAI mode), OpenAI, Groq, LM Studio, vLLM. All
//! connection details come from [`SummarizerConfig`].

use async_trait::async_trait;
use tracing::info;

use crate::config::SummarizerConfig;
use crate::error::{Error, Result};

/// Async trait for the summarization collaborator.
///
/// Implementors must be `Send + Sync` so they can be shared across requests
/// (e.g. wrapped in `Arc<dyn Summarizer>`).
#[async_trait]
pub trait Summarizer: Send + Sync {
    async fn summarize(&self, text: &str) -> Result<String>;
}

/// Summarizer backed by an OpenAI-compatible chat-completions endpoint.
pub struct ApiSummarizer {
    client: reqwest::Client,
    config: SummarizerConfig,
}

impl ApiSummarizer {
    pub fn new(config: &SummarizerConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());

        Self {
            client,
            config: config.clone(),
        }
    }
}

#[async_trait]
impl Summarizer for ApiSummarizer {
    async fn summarize(&self, text: &str) -> Result<String> {
        let url = format!("{}/v1/chat/completions", self.config.base_url);
        let (system_msg, user_msg) =
            build_prompt(text, self.config.min_words, self.config.max_words);

        let body = serde_json::json!({
            "model": self.config.model,
            "messages": [
                { "role": "system", "content": system_msg },
                { "role": "user",   "content": user_msg },
            ],
            "stream": false,
            "temperature": 0.3,
        });

        let mut req = self.client.post(&url).json(&body);

        // Authorization header only when a non-empty key is configured, so
        // local providers without auth keep working.
        let key = self.config.api_key.as_deref().unwrap_or("");
        if !key.is_empty() {
            req = req.bearer_auth(key);
        }

        info!(model = %self.config.model, "requesting summary");
        let response = req.send().await?.error_for_status()?;
        let json: serde_json::Value = response.json().await?;

        let summary = parse_completion(&json)?;
        info!(words = summary.split_whitespace().count(), "summary received");
        Ok(summary)
    }
}

/// System and user messages carrying the configured length bounds.
fn build_prompt(text: &str, min_words: u32, max_words: u32) -> (String, String) {
    let system = format!(
        "You are a summarization engine. Produce an abstractive summary of the \
         user's document in {min_words} to {max_words} words. Reply with the \
         summary only — no preamble, no headings, no bullet points."
    );
    (system, text.to_string())
}

/// Pull the assistant message text out of a chat-completions response.
fn parse_completion(json: &serde_json::Value) -> Result<String> {
    let summary = json["choices"][0]["message"]["content"]
        .as_str()
        .ok_or_else(|| Error::Summarization("response carried no message content".into()))?
        .trim()
        .to_string();

    if summary.is_empty() {
        return Err(Error::Summarization("model returned an empty summary".into()));
    }

    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_completion_ok() {
        let json = serde_json::json!({
            "choices": [
                { "message": { "role": "assistant", "content": "  A tidy summary.  " } }
            ]
        });
        assert_eq!(parse_completion(&json).unwrap(), "A tidy summary.");
    }

    #[test]
    fn test_parse_completion_missing_choices() {
        let json = serde_json::json!({ "error": "overloaded" });
        let err = parse_completion(&json).unwrap_err();
        assert!(matches!(err, Error::Summarization(_)));
    }

    #[test]
    fn test_parse_completion_empty_content() {
        let json = serde_json::json!({
            "choices": [ { "message": { "content": "   " } } ]
        });
        let err = parse_completion(&json).unwrap_err();
        assert!(err.to_string().contains("empty summary"));
    }

    #[test]
    fn test_build_prompt_carries_bounds() {
        let (system, user) = build_prompt("document body", 100, 500);
        assert!(system.contains("100"));
        assert!(system.contains("500"));
        assert_eq!(user, "document body");
    }
}
