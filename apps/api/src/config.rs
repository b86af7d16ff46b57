use std::str::FromStr;

use anyhow::{bail, Context, Result};

/// Which embedding backend the engine is wired with at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmbeddingBackend {
    /// HTTP embedding server speaking the Ollama `/api/embed` protocol.
    Ollama,
    /// Offline feature-hashing embedder. No model weights, deterministic.
    Hashing,
}

impl EmbeddingBackend {
    pub fn as_str(&self) -> &'static str {
        match self {
            EmbeddingBackend::Ollama => "ollama",
            EmbeddingBackend::Hashing => "hashing",
        }
    }
}

impl FromStr for EmbeddingBackend {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ollama" => Ok(EmbeddingBackend::Ollama),
            "hashing" => Ok(EmbeddingBackend::Hashing),
            other => bail!("unknown embedding backend '{other}' (expected 'ollama' or 'hashing')"),
        }
    }
}

/// Application configuration loaded from environment variables.
/// Every variable has a default; malformed values abort startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    pub embedding_backend: EmbeddingBackend,
    pub ollama_host: String,
    pub embedding_model: String,
    pub nlp_enabled: bool,
    pub max_resumes: usize,
    pub min_resume_chars: usize,
    pub explain_fallback_reason: bool,
    pub max_upload_bytes: usize,
    pub cors_allowed_origins: Vec<String>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            port: parse_env("PORT", 8000)?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            embedding_backend: parse_env("EMBEDDING_BACKEND", EmbeddingBackend::Ollama)?,
            ollama_host: std::env::var("OLLAMA_HOST")
                .unwrap_or_else(|_| "http://localhost:11434".to_string()),
            embedding_model: std::env::var("EMBEDDING_MODEL")
                .unwrap_or_else(|_| "all-minilm".to_string()),
            nlp_enabled: parse_env("NLP_ENABLED", true)?,
            max_resumes: parse_env("MAX_RESUMES", 10)?,
            min_resume_chars: parse_env("MIN_RESUME_CHARS", 50)?,
            explain_fallback_reason: parse_env("EXPLAIN_FALLBACK_REASON", false)?,
            max_upload_bytes: parse_env("MAX_UPLOAD_BYTES", 25 * 1024 * 1024)?,
            cors_allowed_origins: parse_origins(
                &std::env::var("CORS_ALLOWED_ORIGINS")
                    .unwrap_or_else(|_| "http://localhost:5173,http://localhost:3000".to_string()),
            ),
        })
    }
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .map_err(|e| anyhow::anyhow!("{e}"))
            .with_context(|| format!("Environment variable '{key}' has an invalid value '{raw}'")),
        Err(_) => Ok(default),
    }
}

/// Splits a comma-separated origin list, dropping blanks.
fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_origins_trims_and_drops_blanks() {
        let origins = parse_origins(" http://localhost:5173 , ,http://localhost:3000,");
        assert_eq!(
            origins,
            vec!["http://localhost:5173", "http://localhost:3000"]
        );
    }

    #[test]
    fn test_embedding_backend_parses_case_insensitively() {
        assert_eq!(
            "Ollama".parse::<EmbeddingBackend>().unwrap(),
            EmbeddingBackend::Ollama
        );
        assert_eq!(
            " hashing ".parse::<EmbeddingBackend>().unwrap(),
            EmbeddingBackend::Hashing
        );
    }

    #[test]
    fn test_embedding_backend_rejects_unknown() {
        assert!("openai".parse::<EmbeddingBackend>().is_err());
    }
}
