//! Final hybrid percentage plus human-readable reasons.

use serde::{Deserialize, Serialize};

use crate::matching::round2;

pub const HIGH_SEMANTIC_THRESHOLD: f64 = 75.0;
pub const STRONG_KEYWORD_THRESHOLD: f64 = 50.0;
pub const REASON_SKILL_LIMIT: usize = 5;
pub const SUMMARY_SKILL_LIMIT: usize = 3;
pub const FALLBACK_REASON: &str = "Moderate match based on general content analysis";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CombinationWeights {
    pub semantic: f64,
    pub skill: f64,
    pub keyword: f64,
}

impl Default for CombinationWeights {
    fn default() -> Self {
        Self {
            semantic: 0.5,
            skill: 0.4,
            keyword: 0.1,
        }
    }
}

/// Whether an explanation may come back empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FallbackReason {
    /// No reason fired → empty list.
    #[default]
    Omit,
    /// No reason fired → one generic reason.
    Emit,
}

/// Weighted hybrid score, rounded to 2 decimals and clamped to `[0, 100]`.
pub fn combine(
    semantic_score: f64,
    skill_score: f64,
    keyword_score: f64,
    weights: &CombinationWeights,
) -> f64 {
    let raw = semantic_score * weights.semantic
        + skill_score * weights.skill
        + keyword_score * weights.keyword;
    round2(raw).clamp(0.0, 100.0)
}

/// Reasons in fixed order; several may apply at once.
pub fn build_reasons(
    semantic_score: f64,
    keyword_score: f64,
    matched_skills: &[String],
    fallback: FallbackReason,
) -> Vec<String> {
    let mut reasons = Vec::new();

    if semantic_score > HIGH_SEMANTIC_THRESHOLD {
        reasons.push("High semantic similarity to job description".to_string());
    }
    if !matched_skills.is_empty() {
        let top: Vec<&str> = matched_skills
            .iter()
            .take(REASON_SKILL_LIMIT)
            .map(String::as_str)
            .collect();
        reasons.push(format!("Matched key skills: {}", top.join(", ")));
    }
    if keyword_score > STRONG_KEYWORD_THRESHOLD {
        reasons.push("Strong overlap in terminology and domain language".to_string());
    }

    if reasons.is_empty() && fallback == FallbackReason::Emit {
        reasons.push(FALLBACK_REASON.to_string());
    }
    reasons
}

pub fn build_summary(years_of_experience: f64, matched_skills: &[String]) -> String {
    if matched_skills.is_empty() {
        return format!("{years_of_experience}+ years of experience. Matched 0 key skills.");
    }
    let top: Vec<&str> = matched_skills
        .iter()
        .take(SUMMARY_SKILL_LIMIT)
        .map(String::as_str)
        .collect();
    format!(
        "{years_of_experience}+ years of experience. Matched {} key skills including {}.",
        matched_skills.len(),
        top.join(", ")
    )
}
