//! Static matching vocabularies: canonical skills and resume section headers.
//!
//! Bump `VOCABULARY_VERSION` whenever either list changes; scores computed under
//! different versions are not comparable.

use std::collections::HashSet;

use crate::matching::segmenter::Section;

pub const VOCABULARY_VERSION: &str = "2024.2";

const LANGUAGES: &[&str] = &[
    "python", "java", "javascript", "typescript", "c++", "c#", "golang", "rust", "ruby",
    "php", "swift", "kotlin", "scala", "sql", "html", "css", "bash", "perl", "matlab",
];

const FRAMEWORKS: &[&str] = &[
    "react", "angular", "vue", "next.js", "node.js", "express.js", "django", "flask", "fastapi",
    "spring boot", ".net", "rails", "tensorflow", "pytorch", "keras", "pandas",
    "numpy", "scikit-learn", "graphql", "rest api", "microservices",
];

const CLOUD_DEVOPS: &[&str] = &[
    "aws", "azure", "gcp", "google cloud", "docker", "kubernetes", "terraform", "ansible",
    "jenkins", "ci/cd", "git", "github actions", "linux", "devops", "serverless",
];

const DATA_AI: &[&str] = &[
    "machine learning", "deep learning", "nlp", "natural language processing",
    "computer vision", "data science", "data analysis", "data engineering", "statistics",
    "spark", "hadoop", "kafka", "airflow", "etl", "tableau", "power bi",
    "postgresql", "mysql", "mongodb", "redis", "elasticsearch", "llm", "generative ai",
];

const SOFT_SKILLS: &[&str] = &[
    "leadership", "communication", "teamwork", "collaboration", "problem solving",
    "project management", "agile", "scrum", "mentoring", "stakeholder management",
];

/// The fixed skill vocabulary. Terms are lowercase; matching lowercases the candidate.
#[derive(Debug, Clone)]
pub struct SkillVocabulary {
    pub version: &'static str,
    terms: HashSet<String>,
}

impl SkillVocabulary {
    pub fn from_terms<I, S>(version: &'static str, terms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            version,
            terms: terms
                .into_iter()
                .map(|t| t.as_ref().trim().to_lowercase())
                .filter(|t| !t.is_empty())
                .collect(),
        }
    }

    pub fn contains(&self, candidate: &str) -> bool {
        self.terms.contains(candidate.trim().to_lowercase().as_str())
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }
}

impl Default for SkillVocabulary {
    fn default() -> Self {
        Self::from_terms(
            VOCABULARY_VERSION,
            LANGUAGES
                .iter()
                .chain(FRAMEWORKS)
                .chain(CLOUD_DEVOPS)
                .chain(DATA_AI)
                .chain(SOFT_SKILLS),
        )
    }
}

const DEFAULT_HEADERS: &[(Section, &[&str])] = &[
    (
        Section::Skills,
        &[
            "skills",
            "technical skills",
            "technologies",
            "competencies",
            "core competencies",
            "tech stack",
        ],
    ),
    (
        Section::Experience,
        &[
            "experience",
            "work experience",
            "professional experience",
            "employment history",
            "work history",
            "employment",
        ],
    ),
    (
        Section::Education,
        &[
            "education",
            "academic background",
            "qualifications",
            "academics",
            "certifications",
        ],
    ),
    (
        Section::Projects,
        &["projects", "personal projects", "academic projects", "key projects"],
    ),
    (
        Section::Summary,
        &[
            "summary",
            "professional summary",
            "profile",
            "objective",
            "career objective",
            "about me",
        ],
    ),
];

/// Section-header keywords, checked in declaration order.
#[derive(Debug, Clone)]
pub struct SectionHeaders {
    pub version: &'static str,
    entries: Vec<(Section, Vec<String>)>,
}

impl SectionHeaders {
    /// `normalized` must already be trimmed and lowercased. Matches `keyword`
    /// or `keyword:` exactly.
    pub fn match_header(&self, normalized: &str) -> Option<Section> {
        let bare = normalized.strip_suffix(':').unwrap_or(normalized);
        self.entries
            .iter()
            .find(|(_, keywords)| keywords.iter().any(|k| k == bare))
            .map(|(section, _)| *section)
    }
}

impl Default for SectionHeaders {
    fn default() -> Self {
        Self {
            version: VOCABULARY_VERSION,
            entries: DEFAULT_HEADERS
                .iter()
                .map(|(section, keywords)| {
                    (*section, keywords.iter().map(|k| k.to_string()).collect())
                })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vocabulary_matches_case_insensitively() {
        let vocab = SkillVocabulary::default();
        assert!(vocab.contains("Python"));
        assert!(vocab.contains("Machine Learning"));
        assert!(vocab.contains("C++"));
        assert!(!vocab.contains("barista"));
    }

    #[test]
    fn test_custom_vocabulary_normalises_terms() {
        let vocab = SkillVocabulary::from_terms("test", [" Rust ", "", "GO"]);
        assert_eq!(vocab.len(), 2);
        assert!(vocab.contains("rust"));
        assert!(vocab.contains("go"));
    }

    #[test]
    fn test_header_matches_with_and_without_colon() {
        let headers = SectionHeaders::default();
        assert_eq!(headers.match_header("technical skills"), Some(Section::Skills));
        assert_eq!(headers.match_header("work experience:"), Some(Section::Experience));
        assert_eq!(headers.match_header("education"), Some(Section::Education));
        assert_eq!(headers.match_header("projects:"), Some(Section::Projects));
        assert_eq!(headers.match_header("profile"), Some(Section::Summary));
    }

    #[test]
    fn test_header_requires_exact_match() {
        let headers = SectionHeaders::default();
        assert_eq!(headers.match_header("skills and tools"), None);
        assert_eq!(headers.match_header("my experience"), None);
        assert_eq!(headers.match_header(""), None);
    }
}
