//! How much of the job's terminology and skill list a resume covers.
//!
//! Both ratios are taken over the job side, as sets. Lists come back in order of
//! first occurrence in the job text so output is reproducible.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::matching::extractor::{ordered_unique, TextProfile};
use crate::matching::round2;

/// Display cap for `matched_keywords`.
pub const MAX_MATCHED_KEYWORDS: usize = 10;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OverlapScores {
    pub keyword_score: f64,
    pub skill_score: f64,
    pub matched_skills: Vec<String>,
    pub missing_skills: Vec<String>,
    pub matched_keywords: Vec<String>,
}

pub fn score_overlap(job: &TextProfile, resume: &TextProfile) -> OverlapScores {
    let job_keywords = ordered_unique(&job.entities.noun_chunks);
    let resume_keywords: HashSet<&str> = resume
        .entities
        .noun_chunks
        .iter()
        .map(String::as_str)
        .collect();

    let matched_keywords: Vec<String> = job_keywords
        .iter()
        .filter(|k| resume_keywords.contains(k.as_str()))
        .cloned()
        .collect();
    let keyword_score = ratio(matched_keywords.len(), job_keywords.len());

    let (matched_skills, missing_skills): (Vec<String>, Vec<String>) = job
        .skills
        .iter()
        .cloned()
        .partition(|skill| resume.skills.contains(skill));
    let skill_score = ratio(matched_skills.len(), job.skills.len());

    OverlapScores {
        keyword_score,
        skill_score,
        matched_skills,
        missing_skills,
        matched_keywords: matched_keywords
            .into_iter()
            .take(MAX_MATCHED_KEYWORDS)
            .collect(),
    }
}

/// `matched / total × 100`, 0 when there is nothing to match against.
fn ratio(matched: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    round2(matched as f64 / total as f64 * 100.0)
}
