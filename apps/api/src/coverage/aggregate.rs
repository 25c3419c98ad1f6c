//! Weighted coverage aggregation: collapses whatever subset of per-criterion
//! scores currently exists into one summary score per document, and orders
//! documents for display.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::coverage::criteria::CriterionKey;
use crate::coverage::scorer::ScoreResult;
use crate::coverage::weights::WeightSet;

/// Computes the weighted summary score for one document.
///
/// - No scores at all → `None` (rendered as "no data", never zero).
/// - Otherwise `round_half_up(Σ score·weight / Σ weight)` over the keys that
///   have a score; unset weights default inside [`WeightSet::get`].
/// - All-zero weights → `Some(0)`.
///
/// Defined over whatever subset of criteria has resolved so far, so partial
/// matrices aggregate cleanly while batch scoring is still in flight.
pub fn compute_summary(
    scores: &HashMap<CriterionKey, ScoreResult>,
    weights: &WeightSet,
) -> Option<u32> {
    if scores.is_empty() {
        return None;
    }

    let mut total_weighted = 0u64;
    let mut total_weight = 0u64;

    for (key, result) in scores {
        let weight = u64::from(weights.get(*key));
        total_weighted += u64::from(result.score) * weight;
        total_weight += weight;
    }

    if total_weight == 0 {
        return Some(0);
    }

    // Exact round-half-up over non-negative integers.
    Some(((total_weighted * 2 + total_weight) / (total_weight * 2)) as u32)
}

/// Sort key for the results view.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortKey {
    #[default]
    Name,
    Score,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortOrder {
    Asc,
    // Matches the original results view default.
    #[default]
    Desc,
}

/// Stably orders candidate indices by name (lexicographic, case-sensitive)
/// or summary score (`None` ordered as 0). Descending reverses the
/// comparator; stability for equal elements is preserved either way.
pub fn sort_candidates<T>(
    items: &mut [T],
    name_of: impl Fn(&T) -> &str,
    summary_of: impl Fn(&T) -> Option<u32>,
    key: SortKey,
    order: SortOrder,
) {
    items.sort_by(|a, b| {
        let forward = match key {
            SortKey::Name => name_of(a).cmp(name_of(b)),
            SortKey::Score => summary_of(a)
                .unwrap_or(0)
                .cmp(&summary_of(b).unwrap_or(0)),
        };
        match order {
            SortOrder::Asc => forward,
            SortOrder::Desc => forward.reverse(),
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coverage::criteria::Category;

    fn key(category: Category, index: usize) -> CriterionKey {
        CriterionKey::new(category, index)
    }

    fn scores(entries: &[(CriterionKey, u32)]) -> HashMap<CriterionKey, ScoreResult> {
        entries
            .iter()
            .map(|(k, s)| {
                (
                    *k,
                    ScoreResult {
                        score: *s,
                        feedback: String::new(),
                    },
                )
            })
            .collect()
    }

    #[test]
    fn test_empty_scores_yield_none() {
        assert_eq!(compute_summary(&HashMap::new(), &WeightSet::new()), None);
    }

    #[test]
    fn test_equal_weights_give_rounded_mean() {
        let map = scores(&[
            (key(Category::Responsibilities, 0), 70),
            (key(Category::CompanyCulture, 0), 75),
        ]);
        // mean 72.5 → rounds half-up to 73
        assert_eq!(compute_summary(&map, &WeightSet::new()), Some(73));
    }

    #[test]
    fn test_weights_shift_the_average() {
        let map = scores(&[
            (key(Category::Responsibilities, 0), 100),
            (key(Category::TechnicalSkills, 0), 0),
        ]);
        let mut weights = WeightSet::new();
        weights.adjust(key(Category::Responsibilities, 0), 5); // → 10
        weights.adjust(key(Category::TechnicalSkills, 0), -5); // → 0
        assert_eq!(compute_summary(&map, &weights), Some(100));
    }

    #[test]
    fn test_all_zero_weights_yield_zero() {
        let map = scores(&[(key(Category::Responsibilities, 0), 90)]);
        let mut weights = WeightSet::new();
        weights.adjust(key(Category::Responsibilities, 0), -5);
        assert_eq!(compute_summary(&map, &weights), Some(0));
    }

    #[test]
    fn test_missing_weights_never_block_computation() {
        let map = scores(&[(key(Category::TechnicalSkills, 4), 40)]);
        // no weight ever set for skill-4; default 5 applies
        assert_eq!(compute_summary(&map, &WeightSet::new()), Some(40));
    }

    #[test]
    fn test_result_stays_in_score_range() {
        let map = scores(&[
            (key(Category::Responsibilities, 0), 100),
            (key(Category::Responsibilities, 1), 100),
            (key(Category::CompanyCulture, 0), 100),
        ]);
        assert_eq!(compute_summary(&map, &WeightSet::new()), Some(100));
    }

    #[derive(Clone)]
    struct Row {
        name: &'static str,
        summary: Option<u32>,
    }

    fn rows() -> Vec<Row> {
        vec![
            Row {
                name: "b.pdf",
                summary: Some(40),
            },
            Row {
                name: "a.pdf",
                summary: None,
            },
            Row {
                name: "c.pdf",
                summary: Some(90),
            },
        ]
    }

    fn names(items: &[Row]) -> Vec<&'static str> {
        items.iter().map(|r| r.name).collect()
    }

    #[test]
    fn test_sort_by_name_ascending() {
        let mut items = rows();
        sort_candidates(
            &mut items,
            |r| r.name,
            |r| r.summary,
            SortKey::Name,
            SortOrder::Asc,
        );
        assert_eq!(names(&items), vec!["a.pdf", "b.pdf", "c.pdf"]);
    }

    #[test]
    fn test_sort_is_reversible() {
        let mut items = rows();
        sort_candidates(
            &mut items,
            |r| r.name,
            |r| r.summary,
            SortKey::Name,
            SortOrder::Desc,
        );
        assert_eq!(names(&items), vec!["c.pdf", "b.pdf", "a.pdf"]);
    }

    #[test]
    fn test_sort_by_score_treats_none_as_zero() {
        let mut items = rows();
        sort_candidates(
            &mut items,
            |r| r.name,
            |r| r.summary,
            SortKey::Score,
            SortOrder::Asc,
        );
        assert_eq!(names(&items), vec!["a.pdf", "b.pdf", "c.pdf"]);
    }

    #[test]
    fn test_sort_by_score_is_stable_for_ties() {
        let mut items = vec![
            Row {
                name: "first",
                summary: Some(50),
            },
            Row {
                name: "second",
                summary: Some(50),
            },
            Row {
                name: "third",
                summary: Some(50),
            },
        ];
        sort_candidates(
            &mut items,
            |r| r.name,
            |r| r.summary,
            SortKey::Score,
            SortOrder::Asc,
        );
        assert_eq!(names(&items), vec!["first", "second", "third"]);
    }

    #[test]
    fn test_name_sort_is_case_sensitive_as_provided() {
        let mut items = vec![
            Row {
                name: "b.txt",
                summary: None,
            },
            Row {
                name: "A.txt",
                summary: None,
            },
        ];
        sort_candidates(
            &mut items,
            |r| r.name,
            |r| r.summary,
            SortKey::Name,
            SortOrder::Asc,
        );
        // byte order: 'A' < 'b'
        assert_eq!(names(&items), vec!["A.txt", "b.txt"]);
    }
}
