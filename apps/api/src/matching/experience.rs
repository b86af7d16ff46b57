//! Years of experience from explicit textual mentions.
//!
//! Two pattern families run in order over the raw text:
//!   1. `<N>[+] years|yrs`
//!   2. `experience|history of <N>[+] years|yrs`
//! All numeric hits from both are pooled and resolved by a [`YearsPolicy`].
//! Date ranges such as `2019 - present` are not interpreted.

use once_cell::sync::Lazy;
use regex::Regex;

static DIRECT_YEARS_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(\d+(?:\.\d+)?)\+?\s*(?:years|yrs)\b").expect("direct years regex is valid")
});

static EXPERIENCE_OF_YEARS_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(?:experience|history)\s+of\s+(\d+(?:\.\d+)?)\+?\s*(?:years|yrs)\b")
        .expect("experience-of regex is valid")
});

/// How pooled year mentions collapse into one number.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum YearsPolicy {
    /// Largest single mention. Overlapping mentions ("5 years ... 5+ years of
    /// experience") are never added together.
    MaxMentionedYears,
}

pub const MAX_MENTIONED_YEARS: YearsPolicy = YearsPolicy::MaxMentionedYears;

impl YearsPolicy {
    pub fn resolve(&self, mentions: &[f64]) -> f64 {
        match self {
            YearsPolicy::MaxMentionedYears => mentions.iter().copied().fold(0.0, f64::max),
        }
    }
}

/// Every year count mentioned in `text`, pattern family order, match order within each.
pub fn year_mentions(text: &str) -> Vec<f64> {
    [&*DIRECT_YEARS_RE, &*EXPERIENCE_OF_YEARS_RE]
        .into_iter()
        .flat_map(|re| re.captures_iter(text))
        .filter_map(|caps| caps.get(1)?.as_str().parse::<f64>().ok())
        .collect()
}

pub fn extract_years(text: &str, policy: YearsPolicy) -> f64 {
    policy.resolve(&year_mentions(text))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_mention() {
        assert_eq!(extract_years("5 years experience", MAX_MENTIONED_YEARS), 5.0);
    }

    #[test]
    fn test_plus_and_abbreviation() {
        assert_eq!(extract_years("8+ yrs in backend roles", MAX_MENTIONED_YEARS), 8.0);
        assert_eq!(extract_years("10+years of Python", MAX_MENTIONED_YEARS), 10.0);
    }

    #[test]
    fn test_max_not_sum() {
        let text = "3 years at Acme, then 4 years at Globex. Total experience of 7 years.";
        assert_eq!(extract_years(text, MAX_MENTIONED_YEARS), 7.0);
    }

    #[test]
    fn test_case_insensitive() {
        assert_eq!(extract_years("Experience Of 6 YEARS", MAX_MENTIONED_YEARS), 6.0);
    }

    #[test]
    fn test_both_families_contribute_mentions() {
        let mentions = year_mentions("history of 4 years");
        // direct family sees "4 years", experience-of family sees it again
        assert_eq!(mentions, vec![4.0, 4.0]);
    }

    #[test]
    fn test_decimal_years() {
        assert_eq!(extract_years("2.5 years of Rust", MAX_MENTIONED_YEARS), 2.5);
    }

    #[test]
    fn test_no_mention_is_zero() {
        assert_eq!(extract_years("Worked at Acme 2019 - Present", MAX_MENTIONED_YEARS), 0.0);
    }

    #[test]
    fn test_singular_year_is_not_counted() {
        assert_eq!(extract_years("1 year internship", MAX_MENTIONED_YEARS), 0.0);
    }
}
