//! Entity and skill extraction: categorised entities, noun-phrase keywords and
//! canonical skills for any text, via the injected NLP capability.
//!
//! With the capability unavailable every output is empty. That is the
//! documented fallback, not an error.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::matching::vocabulary::SkillVocabulary;
use crate::nlp::{Analysis, EntityLabel, NlpAnalyzer, NlpCapability};

/// Noun chunks this short or shorter are discarded.
const MIN_CHUNK_CHARS: usize = 2;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EntitySet {
    #[serde(rename = "ORG")]
    pub org: Vec<String>,
    #[serde(rename = "DATE")]
    pub date: Vec<String>,
    #[serde(rename = "GPE")]
    pub gpe: Vec<String>,
    #[serde(rename = "PERSON")]
    pub person: Vec<String>,
    /// Lowercased, not deduplicated, text order.
    #[serde(rename = "NOUN_CHUNKS")]
    pub noun_chunks: Vec<String>,
}

/// Insertion-ordered set of canonical (lowercase) skill names.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SkillSet(Vec<String>);

impl SkillSet {
    pub fn insert(&mut self, skill: String) -> bool {
        if self.contains(&skill) {
            return false;
        }
        self.0.push(skill);
        true
    }

    pub fn contains(&self, skill: &str) -> bool {
        self.0.iter().any(|s| s == skill)
    }

    pub fn iter(&self) -> impl Iterator<Item = &String> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Everything the overlap scorer needs from one text, from a single analysis pass.
#[derive(Debug, Clone, Default)]
pub struct TextProfile {
    pub entities: EntitySet,
    pub skills: SkillSet,
}

pub struct EntityExtractor<'a> {
    nlp: &'a NlpCapability,
    vocabulary: &'a SkillVocabulary,
}

impl<'a> EntityExtractor<'a> {
    pub fn new(nlp: &'a NlpCapability, vocabulary: &'a SkillVocabulary) -> Self {
        Self { nlp, vocabulary }
    }

    #[allow(dead_code)]
    pub fn extract_entities(&self, text: &str) -> EntitySet {
        self.extract(text).entities
    }

    #[allow(dead_code)]
    pub fn extract_skills(&self, text: &str) -> SkillSet {
        self.extract(text).skills
    }

    pub fn extract(&self, text: &str) -> TextProfile {
        match self.nlp {
            NlpCapability::Available(analyzer) => {
                let analysis = analyzer.analyze(text);
                TextProfile {
                    entities: collect_entities(&analysis, analyzer.as_ref()),
                    skills: collect_skills(&analysis, self.vocabulary),
                }
            }
            NlpCapability::Unavailable => TextProfile::default(),
        }
    }
}

fn collect_entities(analysis: &Analysis, analyzer: &dyn NlpAnalyzer) -> EntitySet {
    let mut entities = EntitySet::default();

    for entity in &analysis.named_entities {
        let bucket = match entity.label {
            EntityLabel::Org => &mut entities.org,
            EntityLabel::Date => &mut entities.date,
            EntityLabel::Gpe => &mut entities.gpe,
            EntityLabel::Person => &mut entities.person,
            EntityLabel::Other(_) => continue,
        };
        if !bucket.contains(&entity.text) {
            bucket.push(entity.text.clone());
        }
    }

    for chunk in &analysis.noun_chunks {
        let normalized = chunk.trim().to_lowercase();
        if normalized.chars().count() > MIN_CHUNK_CHARS && !analyzer.is_stopword(&normalized) {
            entities.noun_chunks.push(normalized);
        }
    }

    entities
}

/// Single-token hits in text order first, then multi-word phrase hits.
fn collect_skills(analysis: &Analysis, vocabulary: &SkillVocabulary) -> SkillSet {
    let mut skills = SkillSet::default();

    let token_hits = analysis
        .tokens
        .iter()
        .flat_map(|t| token_candidates(t, vocabulary));
    let chunk_hits = analysis
        .noun_chunks
        .iter()
        .map(|c| c.trim().to_lowercase())
        .filter(|c| vocabulary.contains(c));

    for skill in token_hits.chain(chunk_hits) {
        skills.insert(skill);
    }

    skills
}

/// Vocabulary terms carried by one token. A known term (`ci/cd`, `.net`) is
/// taken whole; a joined form such as `Docker/Kubernetes` or `Python-based`
/// falls back to its `/`- and `-`-separated parts.
fn token_candidates(token: &str, vocabulary: &SkillVocabulary) -> Vec<String> {
    let lowered = token.to_lowercase();
    if vocabulary.contains(&lowered) {
        return vec![lowered];
    }
    let bare = lowered.trim_start_matches('.');
    if vocabulary.contains(bare) {
        return vec![bare.to_string()];
    }
    bare.split(['/', '-'])
        .map(|part| part.trim_start_matches('.'))
        .filter(|part| !part.is_empty() && vocabulary.contains(part))
        .map(str::to_string)
        .collect()
}

/// First-occurrence-ordered distinct values.
pub fn ordered_unique<'s, I>(items: I) -> Vec<String>
where
    I: IntoIterator<Item = &'s String>,
{
    let mut seen: HashSet<&str> = HashSet::new();
    let mut unique = Vec::new();
    for item in items {
        if seen.insert(item.as_str()) {
            unique.push(item.clone());
        }
    }
    unique
}
