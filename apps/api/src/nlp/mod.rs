//! NLP capability: tokens, named entities, noun chunks and stop words.
//!
//! The capability may be absent (`NLP_ENABLED=false`). Callers receive an
//! `NlpCapability` and must handle `Unavailable` explicitly; there is no
//! nullable global to check.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

pub mod rule_based;
pub mod stopwords;

pub use rule_based::RuleBasedAnalyzer;

/// Named-entity labels. Only the first four are consumed by the matching engine.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityLabel {
    #[serde(rename = "ORG")]
    Org,
    #[serde(rename = "DATE")]
    Date,
    #[serde(rename = "GPE")]
    Gpe,
    #[serde(rename = "PERSON")]
    Person,
    Other(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NamedEntity {
    pub label: EntityLabel,
    pub text: String,
}

/// Output of one analysis pass over a text.
#[derive(Debug, Clone, Default)]
pub struct Analysis {
    /// Surface tokens in text order, original casing.
    pub tokens: Vec<String>,
    /// Entities in text order.
    pub named_entities: Vec<NamedEntity>,
    /// Noun-phrase spans in text order, original casing.
    pub noun_chunks: Vec<String>,
}

pub trait NlpAnalyzer: Send + Sync {
    fn name(&self) -> &str;

    fn analyze(&self, text: &str) -> Analysis;

    fn is_stopword(&self, token: &str) -> bool;
}

/// An NLP analyzer that may or may not be loaded.
#[derive(Clone)]
pub enum NlpCapability {
    Available(Arc<dyn NlpAnalyzer>),
    Unavailable,
}

impl NlpCapability {
    pub fn rule_based() -> Self {
        NlpCapability::Available(Arc::new(RuleBasedAnalyzer::new()))
    }

    pub fn is_available(&self) -> bool {
        matches!(self, NlpCapability::Available(_))
    }
}

impl std::fmt::Debug for NlpCapability {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NlpCapability::Available(analyzer) => {
                f.debug_tuple("Available").field(&analyzer.name()).finish()
            }
            NlpCapability::Unavailable => f.write_str("Unavailable"),
        }
    }
}
