//! Matching pipeline: wires the scoring components into one ranking pass.
//!
//! `MatchingEngine` is built once at startup with its capabilities injected and
//! shared behind an `Arc`. It holds no mutable state; everything computed for a
//! request lives on the stack of `rank_resumes` and is dropped with it.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::config::Config;
use crate::embedding::{Embedder, EmbeddingError};
use crate::matching::combiner::{
    build_reasons, build_summary, combine, CombinationWeights, FallbackReason,
};
use crate::matching::experience::{extract_years, YearsPolicy, MAX_MENTIONED_YEARS};
use crate::matching::extractor::{EntityExtractor, TextProfile};
use crate::matching::overlap::score_overlap;
use crate::matching::ranker::rank;
use crate::matching::segmenter::segment;
use crate::matching::semantic::{SectionWeights, SemanticScorer};
use crate::matching::vocabulary::{SectionHeaders, SkillVocabulary};
use crate::models::ranking::{RankedResult, RankingResponse, ResumeDocument, ScoreBreakdown};
use crate::nlp::NlpCapability;

pub const INSUFFICIENT_TEXT_ERROR: &str = "Insufficient text content";

/// Tunables for one engine instance.
#[derive(Debug, Clone)]
pub struct ScoringSettings {
    pub section_weights: SectionWeights,
    pub combination: CombinationWeights,
    /// Resumes with fewer trimmed characters than this are not scored.
    pub min_resume_chars: usize,
    pub fallback_reason: FallbackReason,
    pub years_policy: YearsPolicy,
}

impl Default for ScoringSettings {
    fn default() -> Self {
        Self {
            section_weights: SectionWeights::default(),
            combination: CombinationWeights::default(),
            min_resume_chars: 50,
            fallback_reason: FallbackReason::Omit,
            years_policy: MAX_MENTIONED_YEARS,
        }
    }
}

impl ScoringSettings {
    pub fn from_config(config: &Config) -> Self {
        Self {
            min_resume_chars: config.min_resume_chars,
            fallback_reason: if config.explain_fallback_reason {
                FallbackReason::Emit
            } else {
                FallbackReason::Omit
            },
            ..Self::default()
        }
    }
}

/// Job-side work done once per request and reused for every resume.
struct PreparedJob {
    embedding: Vec<f32>,
    profile: TextProfile,
}

pub struct MatchingEngine {
    embedder: Arc<dyn Embedder>,
    nlp: NlpCapability,
    vocabulary: Arc<SkillVocabulary>,
    headers: SectionHeaders,
    settings: ScoringSettings,
}

impl MatchingEngine {
    pub fn new(
        embedder: Arc<dyn Embedder>,
        nlp: NlpCapability,
        vocabulary: Arc<SkillVocabulary>,
        headers: SectionHeaders,
        settings: ScoringSettings,
    ) -> Self {
        Self {
            embedder,
            nlp,
            vocabulary,
            headers,
            settings,
        }
    }

    pub fn embedder(&self) -> &dyn Embedder {
        self.embedder.as_ref()
    }

    pub fn nlp(&self) -> &NlpCapability {
        &self.nlp
    }

    pub fn vocabulary(&self) -> &SkillVocabulary {
        &self.vocabulary
    }

    pub fn section_headers(&self) -> &SectionHeaders {
        &self.headers
    }

    /// Scores every resume sequentially, then ranks them best first.
    ///
    /// Resumes below the minimum length get a zero-score placeholder. An
    /// embedding failure aborts the whole batch.
    pub async fn rank_resumes(
        &self,
        job_description: &str,
        resumes: &[ResumeDocument],
    ) -> Result<RankingResponse, EmbeddingError> {
        let job = self.prepare_job(job_description.trim()).await?;

        let mut results = Vec::with_capacity(resumes.len());
        for resume in resumes {
            info!(filename = %resume.filename, "Processing resume");

            if resume.text.trim().chars().count() < self.settings.min_resume_chars {
                warn!(filename = %resume.filename, "Insufficient text content, skipping scoring");
                results.push(RankedResult::failed(&resume.filename, INSUFFICIENT_TEXT_ERROR));
                continue;
            }

            let (details, summary) = self.score_resume(&job, &resume.text).await?;
            info!(
                filename = %resume.filename,
                match_percentage = details.final_score,
                "Resume scored"
            );
            results.push(RankedResult::scored(&resume.filename, summary, details));
        }

        Ok(RankingResponse {
            success: true,
            total_resumes: results.len(),
            ranked_resumes: rank(results),
        })
    }

    async fn prepare_job(&self, job_text: &str) -> Result<PreparedJob, EmbeddingError> {
        info!(embedder = self.embedder.name(), "Generating job description embedding");
        let embedding = self.embedder.embed_one(job_text).await?;
        let profile = self.extractor().extract(job_text);
        debug!(
            skills = profile.skills.len(),
            keywords = profile.entities.noun_chunks.len(),
            "Job description analysed"
        );
        if profile.skills.is_empty() {
            debug!("No vocabulary skills in job description; skill score will be zero");
        }
        Ok(PreparedJob { embedding, profile })
    }

    async fn score_resume(
        &self,
        job: &PreparedJob,
        text: &str,
    ) -> Result<(ScoreBreakdown, String), EmbeddingError> {
        let sections = segment(text, &self.headers);
        let semantic = SemanticScorer::new(self.embedder.as_ref(), &self.settings.section_weights)
            .score_against(&job.embedding, &sections)
            .await?;

        let profile = self.extractor().extract(text);
        let overlap = score_overlap(&job.profile, &profile);
        let years_of_experience = extract_years(text, self.settings.years_policy);

        let final_score = combine(
            semantic.weighted_score,
            overlap.skill_score,
            overlap.keyword_score,
            &self.settings.combination,
        );
        let reasons = build_reasons(
            semantic.weighted_score,
            overlap.keyword_score,
            &overlap.matched_skills,
            self.settings.fallback_reason,
        );
        let summary = build_summary(years_of_experience, &overlap.matched_skills);

        let details = ScoreBreakdown {
            final_score,
            semantic_score: semantic.weighted_score,
            skill_score: overlap.skill_score,
            keyword_score: overlap.keyword_score,
            section_breakdown: semantic.section_breakdown,
            matched_skills: overlap.matched_skills,
            missing_skills: overlap.missing_skills,
            matched_keywords: overlap.matched_keywords,
            years_of_experience,
            reasons,
        };
        Ok((details, summary))
    }

    fn extractor(&self) -> EntityExtractor<'_> {
        EntityExtractor::new(&self.nlp, &self.vocabulary)
    }
}
