//! Rule-based English analyzer. Pure Rust, no model files.
//!
//! Tokens keep skill-shaped words intact (`C++`, `C#`, `Node.js`, `CI/CD`).
//! Noun chunks are maximal runs of content words inside a clause.
//! Entities come from regexes and a small gazetteer, tuned for resumes and job posts.

use std::collections::HashSet;

use once_cell::sync::Lazy;
use regex::Regex;

use super::stopwords::STOP_WORDS;
use super::{Analysis, EntityLabel, NamedEntity, NlpAnalyzer};

/// Characters that end a clause: a noun chunk never spans one.
const CLAUSE_BREAKS: &[char] = &[
    ',', ';', '(', ')', '[', ']', '{', '}', '|', '"', '!', '?', '•', '·', '▪', '●', '–', '—',
];

static DATE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)\b(?:(?:jan(?:uary)?|feb(?:ruary)?|mar(?:ch)?|apr(?:il)?|may|june?|july?|aug(?:ust)?|sep(?:t(?:ember)?)?|oct(?:ober)?|nov(?:ember)?|dec(?:ember)?)\.?\s+(?:19|20)\d{2}|\d+(?:\.\d+)?\+?\s+(?:years?|months?)|(?:19|20)\d{2})\b",
    )
    .expect("date regex is valid")
});

static ORG_SUFFIX_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"\b(?:(?:University|Institute|College)[ \t]+of(?:[ \t]+[A-Z][\w&\-]*)+|(?:[A-Z][\w&\-]*[ \t]+){0,4}(?:Inc|LLC|Ltd|Corp|Corporation|Company|Technologies|Labs|Systems|Solutions|University|College|Institute|Group|Bank|Consulting)\b\.?)",
    )
    .expect("org suffix regex is valid")
});

static ORG_AFTER_AT_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\bat[ \t]+([A-Z][\w&\-]*(?:[ \t]+[A-Z][\w&\-]*){0,3})")
        .expect("org-after-at regex is valid")
});

const PLACES: &[&str] = &[
    "New York", "San Francisco", "Los Angeles", "Seattle", "Austin", "Boston", "Chicago",
    "Denver", "Atlanta", "Toronto", "Vancouver", "Montreal", "London", "Manchester", "Dublin",
    "Berlin", "Munich", "Paris", "Amsterdam", "Madrid", "Barcelona", "Lisbon", "Stockholm",
    "Zurich", "Warsaw", "Bangalore", "Bengaluru", "Mumbai", "Delhi", "Hyderabad", "Pune",
    "Chennai", "Singapore", "Tokyo", "Sydney", "Melbourne", "Dubai", "USA", "United States",
    "United Kingdom", "UK", "Canada", "Germany", "France", "Spain", "India", "China", "Japan",
    "Australia", "Brazil", "Mexico", "Ireland", "Netherlands", "Poland",
];

static PLACE_RE: Lazy<Regex> = Lazy::new(|| {
    let alternation = PLACES
        .iter()
        .map(|p| regex::escape(p))
        .collect::<Vec<_>>()
        .join("|");
    Regex::new(&format!(r"\b(?:{alternation})\b")).expect("place regex is valid")
});

#[derive(Debug)]
struct Token {
    text: String,
    boundary_after: bool,
}

pub struct RuleBasedAnalyzer {
    stop_words: HashSet<&'static str>,
}

impl RuleBasedAnalyzer {
    pub fn new() -> Self {
        Self {
            stop_words: STOP_WORDS.iter().copied().collect(),
        }
    }

    fn tokenize(&self, text: &str) -> Vec<Token> {
        let mut tokens = Vec::new();
        let mut current = String::new();

        for ch in text.chars() {
            if ch.is_whitespace() || CLAUSE_BREAKS.contains(&ch) {
                push_word(&mut tokens, &mut current);
                if ch == '\n' || CLAUSE_BREAKS.contains(&ch) {
                    mark_boundary(&mut tokens);
                }
            } else {
                current.push(ch);
            }
        }
        push_word(&mut tokens, &mut current);
        tokens
    }

    fn is_content(&self, word: &str) -> bool {
        word.chars().any(char::is_alphabetic) && !self.is_stopword(word)
    }

    fn noun_chunks(&self, tokens: &[Token]) -> Vec<String> {
        let mut chunks = Vec::new();
        let mut run: Vec<&str> = Vec::new();

        for token in tokens {
            if self.is_content(&token.text) {
                run.push(&token.text);
            } else {
                close_run(&mut run, &mut chunks);
            }
            if token.boundary_after {
                close_run(&mut run, &mut chunks);
            }
        }
        close_run(&mut run, &mut chunks);
        chunks
    }

    fn named_entities(&self, text: &str) -> Vec<NamedEntity> {
        let mut found: Vec<(usize, NamedEntity)> = Vec::new();

        for m in DATE_RE.find_iter(text) {
            found.push((m.start(), entity(EntityLabel::Date, m.as_str())));
        }
        for m in ORG_SUFFIX_RE.find_iter(text) {
            found.push((m.start(), entity(EntityLabel::Org, m.as_str())));
        }
        for caps in ORG_AFTER_AT_RE.captures_iter(text) {
            if let Some(m) = caps.get(1) {
                found.push((m.start(), entity(EntityLabel::Org, m.as_str())));
            }
        }
        for m in PLACE_RE.find_iter(text) {
            found.push((m.start(), entity(EntityLabel::Gpe, m.as_str())));
        }
        if let Some((offset, name)) = self.leading_person_name(text) {
            found.push((offset, entity(EntityLabel::Person, name)));
        }

        found.retain(|(_, e)| !e.text.is_empty());
        found.sort_by_key(|(start, _)| *start);
        found.into_iter().map(|(_, e)| e).collect()
    }

    /// Resumes conventionally open with the candidate's name on its own line.
    fn leading_person_name<'t>(&self, text: &'t str) -> Option<(usize, &'t str)> {
        let line = text.lines().find(|l| !l.trim().is_empty())?;
        let name = line.trim();
        let words: Vec<&str> = name.split_whitespace().collect();

        if !(2..=4).contains(&words.len()) {
            return None;
        }
        let looks_like_name = words.iter().all(|w| {
            let first_upper = w.chars().next().is_some_and(char::is_uppercase);
            let rest_ok = w
                .chars()
                .skip(1)
                .all(|c| c.is_alphabetic() || matches!(c, '.' | '-' | '\''));
            let has_lower = w.chars().any(char::is_lowercase);
            first_upper && rest_ok && has_lower && !self.is_stopword(w)
        });
        if !looks_like_name {
            return None;
        }

        let offset = text.find(name)?;
        Some((offset, name))
    }
}

impl Default for RuleBasedAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl NlpAnalyzer for RuleBasedAnalyzer {
    fn name(&self) -> &str {
        "rule-based"
    }

    fn analyze(&self, text: &str) -> Analysis {
        let tokens = self.tokenize(text);
        let noun_chunks = self.noun_chunks(&tokens);
        Analysis {
            tokens: tokens.into_iter().map(|t| t.text).collect(),
            named_entities: self.named_entities(text),
            noun_chunks,
        }
    }

    fn is_stopword(&self, token: &str) -> bool {
        self.stop_words.contains(token.to_lowercase().as_str())
    }
}

fn entity(label: EntityLabel, text: &str) -> NamedEntity {
    NamedEntity {
        label,
        text: text.trim().trim_end_matches('.').to_string(),
    }
}

fn mark_boundary(tokens: &mut [Token]) {
    if let Some(last) = tokens.last_mut() {
        last.boundary_after = true;
    }
}

/// Strips surrounding punctuation from a raw word and records a boundary when
/// it ended a sentence or label (`Docker.`, `Skills:`).
fn push_word(tokens: &mut Vec<Token>, current: &mut String) {
    if current.is_empty() {
        return;
    }
    let raw = std::mem::take(current);

    let mut start_trimmed = raw.trim_start_matches(|c: char| !(c.is_alphanumeric() || c == '.'));
    // A single leading dot is part of the word (`.NET`); an ellipsis is not.
    if start_trimmed.starts_with("..") {
        start_trimmed = start_trimmed.trim_start_matches('.');
    }
    let word = start_trimmed.trim_end_matches(|c: char| !(c.is_alphanumeric() || c == '+' || c == '#'));
    let ends_sentence = start_trimmed[word.len()..]
        .chars()
        .any(|c| matches!(c, '.' | ':' | '!' | '?'));

    if word.is_empty() || !word.chars().any(char::is_alphanumeric) {
        // Stray punctuation such as a dash between dates still splits clauses.
        mark_boundary(tokens);
        return;
    }

    tokens.push(Token {
        text: word.to_string(),
        boundary_after: ends_sentence,
    });
}

fn close_run(run: &mut Vec<&str>, chunks: &mut Vec<String>) {
    if !run.is_empty() {
        chunks.push(run.join(" "));
        run.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn analyze(text: &str) -> Analysis {
        RuleBasedAnalyzer::new().analyze(text)
    }

    fn entities_with(analysis: &Analysis, label: EntityLabel) -> Vec<String> {
        analysis
            .named_entities
            .iter()
            .filter(|e| e.label == label)
            .map(|e| e.text.clone())
            .collect()
    }

    #[test]
    fn test_tokens_keep_skill_shapes() {
        let a = analyze("Built services in C++, C# and Node.js; owned CI/CD with scikit-learn.");
        for expected in ["C++", "C#", "Node.js", "CI/CD", "scikit-learn"] {
            assert!(a.tokens.contains(&expected.to_string()), "missing {expected}");
        }
    }

    #[test]
    fn test_tokens_drop_leading_ellipsis_but_keep_dotted_names() {
        let a = analyze("...Python and .NET");
        assert_eq!(a.tokens, vec!["Python", "and", ".NET"]);
    }

    #[test]
    fn test_tokens_strip_bullets_and_trailing_punctuation() {
        let a = analyze("• Docker.\n- Kubernetes:");
        assert_eq!(a.tokens, vec!["Docker", "Kubernetes"]);
    }

    #[test]
    fn test_noun_chunks_split_on_stop_words_and_commas() {
        let a = analyze("Python developer with Docker and AWS");
        assert_eq!(a.noun_chunks, vec!["Python developer", "Docker", "AWS"]);

        let b = analyze("Python, Docker, AWS");
        assert_eq!(b.noun_chunks, vec!["Python", "Docker", "AWS"]);
    }

    #[test]
    fn test_noun_chunks_do_not_cross_lines_or_numbers() {
        let a = analyze("machine learning\n5 years experience");
        assert_eq!(a.noun_chunks, vec!["machine learning", "years experience"]);
    }

    #[test]
    fn test_stopword_lookup_is_case_insensitive() {
        let analyzer = RuleBasedAnalyzer::new();
        assert!(analyzer.is_stopword("The"));
        assert!(analyzer.is_stopword("with"));
        assert!(!analyzer.is_stopword("developer"));
    }

    #[test]
    fn test_dates_are_detected() {
        let a = analyze("Engineer, Jan 2019 - Present. Graduated 2015. 5+ years in fintech.");
        let dates = entities_with(&a, EntityLabel::Date);
        assert_eq!(dates, vec!["Jan 2019", "2015", "5+ years"]);
    }

    #[test]
    fn test_orgs_by_suffix_and_after_at() {
        let a = analyze("Backend engineer at Stripe; previously at Acme Corp. BSc, University of Toronto");
        let orgs = entities_with(&a, EntityLabel::Org);
        assert!(orgs.contains(&"Stripe".to_string()), "{orgs:?}");
        assert!(orgs.contains(&"Acme Corp".to_string()), "{orgs:?}");
        assert!(orgs.contains(&"University of Toronto".to_string()), "{orgs:?}");
    }

    #[test]
    fn test_places_from_gazetteer() {
        let a = analyze("Based in San Francisco, open to relocating to Berlin");
        assert_eq!(entities_with(&a, EntityLabel::Gpe), vec!["San Francisco", "Berlin"]);
    }

    #[test]
    fn test_person_from_first_line() {
        let a = analyze("\n  Jane Doe  \nSenior Engineer");
        assert_eq!(entities_with(&a, EntityLabel::Person), vec!["Jane Doe"]);
    }

    #[test]
    fn test_no_person_for_sentence_first_line() {
        let a = analyze("Python developer with Docker and AWS");
        assert!(entities_with(&a, EntityLabel::Person).is_empty());
    }

    #[test]
    fn test_entities_in_text_order() {
        let a = analyze("Jane Doe\nLondon 2020");
        let labels: Vec<EntityLabel> = a.named_entities.iter().map(|e| e.label.clone()).collect();
        assert_eq!(
            labels,
            vec![EntityLabel::Person, EntityLabel::Gpe, EntityLabel::Date]
        );
    }
}
