//! Section-Aware Semantic Scorer.
//!
//! Each resume section with enough text is embedded and compared with the job
//! description. Section scores are combined with fixed weights, re-normalised
//! over the sections that actually scored, so a resume is not penalised just
//! for lacking e.g. a projects section.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::embedding::{Embedder, EmbeddingError};
use crate::matching::round2;
use crate::matching::segmenter::{Section, SectionMap};

/// Sections with this many trimmed characters or fewer are not embedded.
pub const MIN_SECTION_CHARS: usize = 20;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SectionWeights {
    pub skills: f64,
    pub experience: f64,
    pub education: f64,
    pub projects: f64,
    pub summary: f64,
}

impl SectionWeights {
    pub fn weight(&self, section: Section) -> f64 {
        match section {
            Section::Skills => self.skills,
            Section::Experience => self.experience,
            Section::Education => self.education,
            Section::Projects => self.projects,
            Section::Summary => self.summary,
        }
    }
}

impl Default for SectionWeights {
    fn default() -> Self {
        Self {
            skills: 0.4,
            experience: 0.4,
            education: 0.1,
            projects: 0.05,
            summary: 0.05,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SectionScores {
    pub weighted_score: f64,
    /// Always holds all five sections.
    pub section_breakdown: BTreeMap<Section, f64>,
}

pub struct SemanticScorer<'a> {
    embedder: &'a dyn Embedder,
    weights: &'a SectionWeights,
}

impl<'a> SemanticScorer<'a> {
    pub fn new(embedder: &'a dyn Embedder, weights: &'a SectionWeights) -> Self {
        Self { embedder, weights }
    }

    #[allow(dead_code)]
    pub async fn score_sections(
        &self,
        job_text: &str,
        sections: &SectionMap,
    ) -> Result<SectionScores, EmbeddingError> {
        let job_embedding = self.embedder.embed_one(job_text).await?;
        self.score_against(&job_embedding, sections).await
    }

    /// Scores sections against a job embedding computed once per request.
    pub async fn score_against(
        &self,
        job_embedding: &[f32],
        sections: &SectionMap,
    ) -> Result<SectionScores, EmbeddingError> {
        let eligible: Vec<(Section, String)> = sections
            .iter()
            .map(|(section, body)| (section, body.trim()))
            .filter(|(_, body)| body.chars().count() > MIN_SECTION_CHARS)
            .map(|(section, body)| (section, body.to_string()))
            .collect();

        let texts: Vec<String> = eligible.iter().map(|(_, body)| body.clone()).collect();
        let embeddings = self.embedder.embed(&texts).await?;
        if embeddings.len() != texts.len() {
            return Err(EmbeddingError::CountMismatch {
                expected: texts.len(),
                got: embeddings.len(),
            });
        }

        let mut section_breakdown: BTreeMap<Section, f64> =
            Section::ALL.iter().map(|s| (*s, 0.0)).collect();

        for ((section, _), embedding) in eligible.iter().zip(&embeddings) {
            let similarity = self.embedder.cosine_similarity(job_embedding, embedding);
            let score = round2((similarity as f64 * 100.0).clamp(0.0, 100.0));
            section_breakdown.insert(*section, score);
        }

        let weighted_score = weighted_average(&section_breakdown, self.weights);
        debug!(?section_breakdown, weighted_score, "Section scores computed");

        Ok(SectionScores {
            weighted_score,
            section_breakdown,
        })
    }
}

/// `Σ(score × weight)` divided by the weight of sections with a nonzero score.
fn weighted_average(breakdown: &BTreeMap<Section, f64>, weights: &SectionWeights) -> f64 {
    let mut total = 0.0;
    let mut active_weight = 0.0;

    for (section, score) in breakdown {
        let weight = weights.weight(*section);
        total += score * weight;
        if *score != 0.0 {
            active_weight += weight;
        }
    }

    if active_weight == 0.0 {
        return 0.0;
    }
    round2(total / active_weight)
}
