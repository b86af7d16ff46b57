//! Hybrid matching core: segmentation, extraction, semantic and overlap
//! scoring, experience heuristics, combination and ranking.

pub mod combiner;
pub mod experience;
pub mod extractor;
pub mod handlers;
pub mod overlap;
pub mod pipeline;
pub mod ranker;
pub mod segmenter;
pub mod semantic;
pub mod vocabulary;

pub use pipeline::{MatchingEngine, ScoringSettings};

/// Round to 2 decimal places, the precision of every reported score.
pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round2() {
        assert_eq!(round2(66.666_666), 66.67);
        assert_eq!(round2(0.004), 0.0);
        assert_eq!(round2(100.0), 100.0);
    }
}
