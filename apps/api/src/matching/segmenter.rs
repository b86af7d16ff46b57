//! Splits resume text into the five fixed sections.
//!
//! Single linear pass. A short line equal to a known header keyword (optionally
//! followed by `:`) switches the current section and is dropped; every other line
//! is appended to the current section. Text before the first header lands in
//! `summary`. Nested or multi-line headers are not recognised.

use serde::{Deserialize, Serialize};

use crate::matching::vocabulary::SectionHeaders;

/// Lines this long or longer are never treated as headers.
pub const MAX_HEADER_CHARS: usize = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Section {
    Skills,
    Experience,
    Education,
    Projects,
    Summary,
}

impl Section {
    pub const ALL: [Section; 5] = [
        Section::Skills,
        Section::Experience,
        Section::Education,
        Section::Projects,
        Section::Summary,
    ];

    fn index(self) -> usize {
        match self {
            Section::Skills => 0,
            Section::Experience => 1,
            Section::Education => 2,
            Section::Projects => 3,
            Section::Summary => 4,
        }
    }
}

/// Accumulated body text per section. Always holds all five sections.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SectionMap {
    bodies: [String; 5],
}

impl SectionMap {
    pub fn get(&self, section: Section) -> &str {
        &self.bodies[section.index()]
    }

    pub fn iter(&self) -> impl Iterator<Item = (Section, &str)> + '_ {
        Section::ALL.into_iter().map(move |s| (s, self.get(s)))
    }

    fn push_line(&mut self, section: Section, line: &str) {
        let body = &mut self.bodies[section.index()];
        body.push_str(line);
        body.push('\n');
    }
}

pub fn segment(text: &str, headers: &SectionHeaders) -> SectionMap {
    let mut sections = SectionMap::default();
    let mut current = Section::Summary;

    for line in text.lines() {
        let normalized = line.trim().to_lowercase();
        if normalized.chars().count() < MAX_HEADER_CHARS {
            if let Some(section) = headers.match_header(&normalized) {
                current = section;
                continue;
            }
        }
        sections.push_line(current, line);
    }

    sections
}

#[cfg(test)]
mod tests {
    use super::*;

    const RESUME: &str = "Jane Doe\n\
        Backend engineer focused on distributed systems\n\
        Skills:\n\
        Python, Docker, AWS\n\
        Work Experience\n\
        Acme Corp 2019 - Present\n\
        Built ingestion pipelines\n\
        EDUCATION\n\
        BSc Computer Science\n\
        Projects\n\
        Open-source CLI for log search\n";

    fn seg(text: &str) -> SectionMap {
        segment(text, &SectionHeaders::default())
    }

    #[test]
    fn test_lines_before_first_header_go_to_summary() {
        let map = seg(RESUME);
        assert_eq!(
            map.get(Section::Summary),
            "Jane Doe\nBackend engineer focused on distributed systems\n"
        );
    }

    #[test]
    fn test_headers_switch_section_and_are_dropped() {
        let map = seg(RESUME);
        assert_eq!(map.get(Section::Skills), "Python, Docker, AWS\n");
        assert_eq!(
            map.get(Section::Experience),
            "Acme Corp 2019 - Present\nBuilt ingestion pipelines\n"
        );
        assert_eq!(map.get(Section::Education), "BSc Computer Science\n");
        assert_eq!(map.get(Section::Projects), "Open-source CLI for log search\n");
    }

    #[test]
    fn test_every_non_header_line_lands_in_exactly_one_section() {
        let headers = SectionHeaders::default();
        let map = seg(RESUME);

        let mut expected: Vec<&str> = RESUME
            .lines()
            .filter(|l| headers.match_header(&l.trim().to_lowercase()).is_none())
            .collect();
        let mut actual: Vec<&str> = map.iter().flat_map(|(_, body)| body.lines()).collect();

        expected.sort_unstable();
        actual.sort_unstable();
        assert_eq!(actual, expected);
    }

    #[test]
    fn test_long_line_is_never_a_header() {
        let long = "Skills gained across a decade of backend and infrastructure work";
        let text = format!("intro\n{long}\nPython");
        let map = seg(&text);
        assert!(map.get(Section::Skills).is_empty());
        assert_eq!(map.get(Section::Summary), format!("intro\n{long}\nPython\n"));
    }

    #[test]
    fn test_padded_header_is_still_a_header() {
        let map = seg("  SKILLS  \nRust");
        assert_eq!(map.get(Section::Skills), "Rust\n");
        assert!(map.get(Section::Summary).is_empty());
    }

    #[test]
    fn test_header_with_trailing_text_is_body() {
        let map = seg("Skills: Python, Rust");
        assert_eq!(map.get(Section::Summary), "Skills: Python, Rust\n");
    }

    #[test]
    fn test_empty_text_yields_five_empty_sections() {
        let map = seg("");
        assert_eq!(map.iter().count(), 5);
        assert!(map.iter().all(|(_, body)| body.is_empty()));
    }

    #[test]
    fn test_section_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Section::Projects).unwrap(), r#""projects""#);
    }
}
