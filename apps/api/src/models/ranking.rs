use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::matching::segmenter::Section;

/// Plain-text extraction of one uploaded resume.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResumeDocument {
    pub filename: String,
    pub text: String,
}

impl ResumeDocument {
    pub fn new(filename: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            filename: filename.into(),
            text: text.into(),
        }
    }
}

/// Explainable per-resume breakdown, returned as `match_details`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub final_score: f64,
    pub semantic_score: f64,
    pub skill_score: f64,
    pub keyword_score: f64,
    /// Always all five sections.
    pub section_breakdown: BTreeMap<Section, f64>,
    pub matched_skills: Vec<String>,
    pub missing_skills: Vec<String>,
    /// At most 10, job order.
    pub matched_keywords: Vec<String>,
    pub years_of_experience: f64,
    #[serde(rename = "match_reasons")]
    pub reasons: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RankedResult {
    pub filename: String,
    pub match_percentage: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub years_of_experience: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub match_details: Option<ScoreBreakdown>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl RankedResult {
    /// Zero-score placeholder for a resume that could not be scored.
    pub fn failed(filename: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            filename: filename.into(),
            match_percentage: 0.0,
            error: Some(error.into()),
            ..Default::default()
        }
    }

    pub fn scored(filename: impl Into<String>, summary: String, details: ScoreBreakdown) -> Self {
        Self {
            filename: filename.into(),
            match_percentage: details.final_score,
            summary: Some(summary),
            years_of_experience: Some(details.years_of_experience),
            match_details: Some(details),
            error: None,
        }
    }
}

/// Response body of `POST /rank-resumes`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankingResponse {
    pub success: bool,
    pub total_resumes: usize,
    pub ranked_resumes: Vec<RankedResult>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failed_result_omits_optional_fields() {
        let json = serde_json::to_value(RankedResult::failed("cv.pdf", "Insufficient text content"))
            .unwrap();
        assert_eq!(json["filename"], "cv.pdf");
        assert_eq!(json["match_percentage"], 0.0);
        assert_eq!(json["error"], "Insufficient text content");
        assert!(json.get("summary").is_none());
        assert!(json.get("match_details").is_none());
    }

    #[test]
    fn test_breakdown_serializes_reasons_as_match_reasons() {
        let details = ScoreBreakdown {
            final_score: 63.0,
            semantic_score: 80.0,
            skill_score: 50.0,
            keyword_score: 30.0,
            section_breakdown: Section::ALL.iter().map(|s| (*s, 0.0)).collect(),
            matched_skills: vec!["python".into()],
            missing_skills: vec!["aws".into()],
            matched_keywords: vec![],
            years_of_experience: 4.0,
            reasons: vec!["Matched key skills: python".into()],
        };
        let result = RankedResult::scored("cv.pdf", "summary".into(), details);
        let json = serde_json::to_value(&result).unwrap();

        assert_eq!(json["match_percentage"], 63.0);
        assert_eq!(json["years_of_experience"], 4.0);
        let details = &json["match_details"];
        assert_eq!(details["match_reasons"][0], "Matched key skills: python");
        assert!(details.get("reasons").is_none());
        assert_eq!(details["section_breakdown"].as_object().unwrap().len(), 5);
        assert!(details["section_breakdown"].get("experience").is_some());
        assert!(json.get("error").is_none());
    }
}
