//! Orders scored resumes by match percentage, highest first.

use crate::models::ranking::RankedResult;

/// Stable descending sort; equal scores keep upload order.
pub fn rank(mut results: Vec<RankedResult>) -> Vec<RankedResult> {
    results.sort_by(|a, b| b.match_percentage.total_cmp(&a.match_percentage));
    results
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(filename: &str, score: f64) -> RankedResult {
        RankedResult {
            filename: filename.to_string(),
            match_percentage: score,
            ..Default::default()
        }
    }

    #[test]
    fn test_rank_orders_descending() {
        let ranked = rank(vec![result("a.pdf", 40.0), result("b.pdf", 90.5), result("c.pdf", 61.0)]);
        let names: Vec<&str> = ranked.iter().map(|r| r.filename.as_str()).collect();
        assert_eq!(names, vec!["b.pdf", "c.pdf", "a.pdf"]);
    }

    #[test]
    fn test_rank_is_stable_for_ties() {
        let ranked = rank(vec![
            result("first.pdf", 50.0),
            result("top.pdf", 70.0),
            result("second.pdf", 50.0),
            result("errored.pdf", 0.0),
            result("third.pdf", 50.0),
        ]);
        let names: Vec<&str> = ranked.iter().map(|r| r.filename.as_str()).collect();
        assert_eq!(
            names,
            vec!["top.pdf", "first.pdf", "second.pdf", "third.pdf", "errored.pdf"]
        );
    }

    #[test]
    fn test_rank_empty() {
        assert!(rank(Vec::new()).is_empty());
    }
}
