//! Embedding capability: turns text into dense vectors for semantic scoring.
//!
//! The matching engine only sees `Arc<dyn Embedder>`; the backend is chosen once
//! at startup (`EMBEDDING_BACKEND`) and shared read-only across requests.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use async_trait::async_trait;
use thiserror::Error;

pub mod ollama;

pub use ollama::OllamaEmbedder;

#[derive(Debug, Error)]
pub enum EmbeddingError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Embedding service returned {got} vectors for {expected} inputs")]
    CountMismatch { expected: usize, got: usize },

    #[error("Embedding service returned an empty embedding")]
    EmptyEmbedding,

    #[error("Gave up after {retries} retries")]
    RetriesExhausted { retries: u32 },
}

/// A text embedding backend. Implement this to swap models without touching
/// the scoring pipeline.
#[async_trait]
pub trait Embedder: Send + Sync {
    /// Backend name, surfaced by the health endpoint.
    fn name(&self) -> &str;

    /// Model identifier.
    fn model(&self) -> &str;

    /// Embeds a batch of texts. Output order matches input order.
    async fn embed(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, EmbeddingError>;

    async fn embed_one(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        self.embed(&[text.to_string()])
            .await?
            .into_iter()
            .next()
            .ok_or(EmbeddingError::EmptyEmbedding)
    }

    fn cosine_similarity(&self, a: &[f32], b: &[f32]) -> f32 {
        cosine_similarity(a, b)
    }
}

/// Cosine similarity in `[-1, 1]`. Mismatched lengths or a zero vector yield 0.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }

    let dot: f32 = a.iter().zip(b).map(|(x, y)| x * y).sum();
    let norm_a = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b = b.iter().map(|x| x * x).sum::<f32>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }

    (dot / (norm_a * norm_b)).clamp(-1.0, 1.0)
}

// ────────────────────────────────────────────────────────────────────────────
// HashingEmbedder (offline backend)
// ────────────────────────────────────────────────────────────────────────────

/// Same width as all-MiniLM-L6-v2, so the two backends are interchangeable downstream.
pub const HASHING_DIMENSION: usize = 384;

/// Signed feature-hashing bag-of-words embedder.
///
/// Each lowercased alphanumeric word is hashed to one of `dimension` buckets with a
/// hash-derived sign; the vector is L2-normalised. Texts sharing vocabulary land
/// close together. Captures no meaning beyond word overlap, so it is meant for
/// offline runs and tests, not production ranking.
pub struct HashingEmbedder {
    dimension: usize,
}

impl HashingEmbedder {
    pub fn new(dimension: usize) -> Self {
        Self {
            dimension: dimension.max(1),
        }
    }

    fn embed_text(&self, text: &str) -> Vec<f32> {
        let mut vector = vec![0.0_f32; self.dimension];

        for word in text
            .split(|c: char| !(c.is_alphanumeric() || c == '+' || c == '#'))
            .filter(|w| !w.is_empty())
        {
            let mut hasher = DefaultHasher::new();
            word.to_lowercase().hash(&mut hasher);
            let hash = hasher.finish();
            let bucket = (hash % self.dimension as u64) as usize;
            let sign = if hash >> 63 == 0 { 1.0 } else { -1.0 };
            vector[bucket] += sign;
        }

        let norm = vector.iter().map(|x| x * x).sum::<f32>().sqrt();
        if norm > 0.0 {
            vector.iter_mut().for_each(|x| *x /= norm);
        }
        vector
    }
}

impl Default for HashingEmbedder {
    fn default() -> Self {
        Self::new(HASHING_DIMENSION)
    }
}

#[async_trait]
impl Embedder for HashingEmbedder {
    fn name(&self) -> &str {
        "hashing"
    }

    fn model(&self) -> &str {
        "feature-hashing-bow"
    }

    async fn embed(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, EmbeddingError> {
        Ok(texts.iter().map(|t| self.embed_text(t)).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cosine_identical_vectors_is_one() {
        let v = vec![0.3, 0.4, 0.5];
        assert!((cosine_similarity(&v, &v) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_cosine_opposite_vectors_is_minus_one() {
        let a = vec![1.0, 2.0];
        let b = vec![-1.0, -2.0];
        assert!((cosine_similarity(&a, &b) + 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_cosine_orthogonal_is_zero() {
        assert_eq!(cosine_similarity(&[1.0, 0.0], &[0.0, 1.0]), 0.0);
    }

    #[test]
    fn test_cosine_mismatched_lengths_is_zero() {
        assert_eq!(cosine_similarity(&[1.0, 0.0], &[1.0]), 0.0);
    }

    #[test]
    fn test_cosine_zero_vector_is_zero() {
        assert_eq!(cosine_similarity(&[0.0, 0.0], &[1.0, 1.0]), 0.0);
    }

    #[tokio::test]
    async fn test_hashing_embedder_is_deterministic_and_normalised() {
        let embedder = HashingEmbedder::default();
        let a = embedder.embed_one("Rust backend engineer").await.unwrap();
        let b = embedder.embed_one("rust Backend ENGINEER").await.unwrap();
        assert_eq!(a.len(), HASHING_DIMENSION);
        assert_eq!(a, b);
        let norm = a.iter().map(|x| x * x).sum::<f32>().sqrt();
        assert!((norm - 1.0).abs() < 1e-5);
    }

    #[tokio::test]
    async fn test_hashing_embedder_prefers_shared_vocabulary() {
        let embedder = HashingEmbedder::default();
        let job = embedder.embed_one("python docker aws kubernetes").await.unwrap();
        let close = embedder.embed_one("python docker aws").await.unwrap();
        let far = embedder.embed_one("pastry chef bakery croissant").await.unwrap();
        assert!(embedder.cosine_similarity(&job, &close) > embedder.cosine_similarity(&job, &far));
    }

    #[tokio::test]
    async fn test_hashing_embedder_empty_text_is_zero_vector() {
        let embedder = HashingEmbedder::new(8);
        let v = embedder.embed_one("").await.unwrap();
        assert!(v.iter().all(|x| *x == 0.0));
    }
}
