//! Results grid — the displayable view over the score matrix, in two
//! transposable layouts. Absent cells stay `None` ("no data"), never zero.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::coverage::aggregate::{sort_candidates, SortKey, SortOrder};
use crate::coverage::criteria::{CriterionKey, ParsedJobDescription};
use crate::coverage::matrix::ScoreMatrix;
use crate::coverage::scorer::ScoreResult;
use crate::coverage::weights::WeightSet;

/// Lightweight candidate view the grid is built from (the batch module maps
/// its documents into these).
#[derive(Debug, Clone)]
pub struct Candidate {
    pub id: Uuid,
    pub name: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum GridLayout {
    #[default]
    CandidatesAsRows,
    CandidatesAsColumns,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CriterionHeader {
    pub key: CriterionKey,
    pub summary: String,
    pub description: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CandidateRow {
    pub id: Uuid,
    pub name: String,
    /// Weighted average; `None` until any score exists for this candidate.
    pub summary: Option<u32>,
    /// One cell per criterion, in fixed category order.
    pub cells: Vec<Option<ScoreResult>>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CandidateHeader {
    pub id: Uuid,
    pub name: String,
    pub summary: Option<u32>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CriterionRow {
    pub key: CriterionKey,
    pub summary: String,
    /// One cell per candidate, in the sorted candidate order.
    pub cells: Vec<Option<ScoreResult>>,
}

/// The full grid in one of its two layouts. In the transposed layout the
/// per-candidate weighted averages lead as the header row.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "layout", rename_all = "camelCase")]
pub enum ResultsGrid {
    #[serde(rename_all = "camelCase")]
    CandidatesAsRows {
        criteria: Vec<CriterionHeader>,
        rows: Vec<CandidateRow>,
    },
    #[serde(rename_all = "camelCase")]
    CandidatesAsColumns {
        candidates: Vec<CandidateHeader>,
        rows: Vec<CriterionRow>,
    },
}

pub fn build_grid(
    candidates: &[Candidate],
    parsed: &ParsedJobDescription,
    matrix: &ScoreMatrix,
    weights: &WeightSet,
    sort_key: SortKey,
    sort_order: SortOrder,
    layout: GridLayout,
) -> ResultsGrid {
    let mut ordered: Vec<(Candidate, Option<u32>)> = candidates
        .iter()
        .map(|c| (c.clone(), matrix.summary(c.id, weights)))
        .collect();
    sort_candidates(
        &mut ordered,
        |(c, _)| c.name.as_str(),
        |(_, summary)| *summary,
        sort_key,
        sort_order,
    );

    let headers: Vec<CriterionHeader> = parsed
        .keys()
        .map(|key| {
            let criterion = &parsed.section(key.category)[key.index];
            CriterionHeader {
                key,
                summary: criterion.summary.clone(),
                description: criterion.description.clone(),
            }
        })
        .collect();

    match layout {
        GridLayout::CandidatesAsRows => {
            let rows = ordered
                .into_iter()
                .map(|(candidate, summary)| CandidateRow {
                    cells: headers
                        .iter()
                        .map(|h| matrix.get(candidate.id, h.key).cloned())
                        .collect(),
                    id: candidate.id,
                    name: candidate.name,
                    summary,
                })
                .collect();
            ResultsGrid::CandidatesAsRows {
                criteria: headers,
                rows,
            }
        }
        GridLayout::CandidatesAsColumns => {
            let rows = headers
                .iter()
                .map(|h| CriterionRow {
                    key: h.key,
                    summary: h.summary.clone(),
                    cells: ordered
                        .iter()
                        .map(|(candidate, _)| matrix.get(candidate.id, h.key).cloned())
                        .collect(),
                })
                .collect();
            let candidates = ordered
                .into_iter()
                .map(|(candidate, summary)| CandidateHeader {
                    id: candidate.id,
                    name: candidate.name,
                    summary,
                })
                .collect();
            ResultsGrid::CandidatesAsColumns { candidates, rows }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coverage::criteria::{Category, Criterion};

    fn parsed() -> ParsedJobDescription {
        let item = |label: &str| Criterion {
            summary: label.to_string(),
            description: format!("{label} in depth"),
        };
        ParsedJobDescription {
            responsibilities: vec![item("Ownership")],
            company_culture: vec![item("Remote")],
            technical_skills: vec![item("Rust"), item("Tokio")],
        }
    }

    fn result(score: u32) -> ScoreResult {
        ScoreResult {
            score,
            feedback: "f".to_string(),
        }
    }

    fn fixture() -> (Vec<Candidate>, ScoreMatrix) {
        let a = Candidate {
            id: Uuid::new_v4(),
            name: "alice.pdf".to_string(),
        };
        let b = Candidate {
            id: Uuid::new_v4(),
            name: "bob.pdf".to_string(),
        };
        let mut matrix = ScoreMatrix::new();
        matrix.upsert(
            a.id,
            CriterionKey::new(Category::Responsibilities, 0),
            result(80),
        );
        matrix.upsert(
            a.id,
            CriterionKey::new(Category::TechnicalSkills, 1),
            result(40),
        );
        // bob has no scores at all
        (vec![a, b], matrix)
    }

    #[test]
    fn test_rows_layout_has_cell_per_criterion() {
        let (candidates, matrix) = fixture();
        let grid = build_grid(
            &candidates,
            &parsed(),
            &matrix,
            &WeightSet::new(),
            SortKey::Name,
            SortOrder::Asc,
            GridLayout::CandidatesAsRows,
        );
        let ResultsGrid::CandidatesAsRows { criteria, rows } = grid else {
            panic!("expected rows layout");
        };
        assert_eq!(criteria.len(), 4);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].name, "alice.pdf");
        assert_eq!(rows[0].cells.len(), 4);
        assert_eq!(rows[0].cells[0].as_ref().unwrap().score, 80);
        assert!(rows[0].cells[1].is_none());
        // half-up mean of 80 and 40
        assert_eq!(rows[0].summary, Some(60));
        // scoreless candidate renders no data, not zero
        assert_eq!(rows[1].summary, None);
        assert!(rows[1].cells.iter().all(Option::is_none));
    }

    #[test]
    fn test_columns_layout_transposes_cells() {
        let (candidates, matrix) = fixture();
        let grid = build_grid(
            &candidates,
            &parsed(),
            &matrix,
            &WeightSet::new(),
            SortKey::Name,
            SortOrder::Asc,
            GridLayout::CandidatesAsColumns,
        );
        let ResultsGrid::CandidatesAsColumns { candidates, rows } = grid else {
            panic!("expected columns layout");
        };
        assert_eq!(candidates.len(), 2);
        assert_eq!(candidates[0].summary, Some(60));
        assert_eq!(rows.len(), 4);
        assert_eq!(rows[0].key.to_string(), "resp-0");
        assert_eq!(rows[0].cells.len(), 2);
        assert_eq!(rows[0].cells[0].as_ref().unwrap().score, 80);
        assert!(rows[0].cells[1].is_none());
    }

    #[test]
    fn test_score_sort_descending_puts_scoreless_last() {
        let (candidates, matrix) = fixture();
        let grid = build_grid(
            &candidates,
            &parsed(),
            &matrix,
            &WeightSet::new(),
            SortKey::Score,
            SortOrder::Desc,
            GridLayout::CandidatesAsRows,
        );
        let ResultsGrid::CandidatesAsRows { rows, .. } = grid else {
            panic!("expected rows layout");
        };
        assert_eq!(rows[0].name, "alice.pdf");
        assert_eq!(rows[1].name, "bob.pdf");
    }
}
