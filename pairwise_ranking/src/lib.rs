mod config;
use log::{debug, info};

use std::collections::HashMap;

pub use crate::config::*;

pub mod builder;
pub mod manual;

// **** Private structures ****

/// Position of an alternative in the catalog ordering. Doubles as the row and
/// column index of that alternative in the preference matrix.
#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash, Ord, PartialOrd)]
struct AltIndex(usize);

/// The checked form of a rating set: one entry per pair, keyed by catalog
/// indices with the first index strictly smaller than the second.
struct CheckResult {
    ratings: HashMap<(AltIndex, AltIndex), u32>,
}

const RATING_MIN: u32 = 1;
const RATING_MAX: u32 = 10;

/// Derived matrix of normalized pairwise preference strengths.
///
/// Entries are in [0,1], the diagonal is always 0 and off-diagonal entries
/// are complementary: `P[i][j] + P[j][i] == 1.0`. The dimension is fixed per
/// session, so the values live in a flat row-major buffer with no resizing.
#[derive(PartialEq, Debug, Clone)]
pub struct PreferenceMatrix {
    n: usize,
    values: Vec<f64>,
}

impl PreferenceMatrix {
    fn zeroed(n: usize) -> PreferenceMatrix {
        PreferenceMatrix {
            n,
            values: vec![0.0; n * n],
        }
    }

    /// The number of alternatives this matrix was built over.
    pub fn dim(&self) -> usize {
        self.n
    }

    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.values[row * self.n + col]
    }

    fn set(&mut self, row: usize, col: usize, value: f64) {
        self.values[row * self.n + col] = value;
    }

    /// The raw score of one alternative: the sum of its row. The diagonal
    /// term is 0 and contributes nothing.
    pub fn row_sum(&self, row: usize) -> f64 {
        self.values[row * self.n..(row + 1) * self.n].iter().sum()
    }
}

/// Builds the preference matrix for the given catalog and rating set.
///
/// Validates the input contract first and fails with
/// [ScoringErrors::InvalidInput] rather than producing a malformed matrix.
/// For a valid set:
/// - `P[i][j] = rating(i,j) / 10` for i < j
/// - `P[i][j] = (10 - rating(j,i)) / 10` for i > j
/// - `P[i][i] = 0`
///
/// The matrix is not symmetrized and judgments are not checked for
/// transitivity.
pub fn build_matrix(
    alternatives: &[Alternative],
    ratings: &[PairwiseRating],
) -> Result<PreferenceMatrix, ScoringErrors> {
    let cr = checks(alternatives, ratings)?;
    let n = alternatives.len();
    let mut matrix = PreferenceMatrix::zeroed(n);
    for i in 0..n {
        for j in 0..n {
            if i < j {
                let rating = cr.ratings[&(AltIndex(i), AltIndex(j))];
                matrix.set(i, j, rating as f64 / 10.0);
            } else if i > j {
                let rating = cr.ratings[&(AltIndex(j), AltIndex(i))];
                matrix.set(i, j, (10 - rating) as f64 / 10.0);
            }
        }
    }
    Ok(matrix)
}

/// Computes the raw and normalized scores for every alternative, in catalog
/// order. Ranks are left unassigned; see [rank_entries].
///
/// The normalization constant is `n * (n - 1)`, counting each pair once per
/// direction. This reproduces the original method as published.
pub fn compute_scores(alternatives: &[Alternative], matrix: &PreferenceMatrix) -> Vec<ScoreEntry> {
    let n = matrix.dim();
    let norm = (n * (n - 1)) as f64;
    alternatives
        .iter()
        .enumerate()
        .map(|(i, alt)| {
            let raw_score = matrix.row_sum(i);
            ScoreEntry {
                rank: 0,
                code: alt.code.clone(),
                label: alt.label.clone(),
                raw_score,
                normalized_score: raw_score / norm,
            }
        })
        .collect()
}

/// Sorts entries by descending normalized score and assigns ranks 1..n.
///
/// The sort is stable: equal scores keep their catalog order, since no
/// tie-break rule exists upstream.
pub fn rank_entries(mut entries: Vec<ScoreEntry>) -> Vec<ScoreEntry> {
    entries.sort_by(|a, b| {
        b.normalized_score
            .partial_cmp(&a.normalized_score)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    for (idx, entry) in entries.iter_mut().enumerate() {
        entry.rank = (idx + 1) as u32;
    }
    entries
}

/// Runs a complete scoring session over one expert's judgments.
///
/// Arguments:
/// * `alternatives` the ordered catalog of alternatives being ranked
/// * `ratings` the complete set of pairwise ratings, one per unordered pair,
///   keyed in catalog order
///
/// This is a single deterministic pass over in-memory values. The only error
/// condition is a malformed or incomplete input.
pub fn run_scoring_session(
    alternatives: &[Alternative],
    ratings: &[PairwiseRating],
) -> Result<ScoringResult, ScoringErrors> {
    info!(
        "run_scoring_session: processing {:?} ratings over {:?} alternatives",
        ratings.len(),
        alternatives.len()
    );
    let matrix = build_matrix(alternatives, ratings)?;
    debug!("run_scoring_session: matrix: {:?}", matrix);

    let entries = rank_entries(compute_scores(alternatives, &matrix));
    for entry in entries.iter() {
        info!(
            "Rank {}: {} f={:.2} g={:.4} ({})",
            entry.rank, entry.code, entry.raw_score, entry.normalized_score, entry.label
        );
    }

    // The checks guarantee at least two entries.
    let most_preferred = entries[0].code.clone();
    let least_preferred = entries[entries.len() - 1].code.clone();
    Ok(ScoringResult {
        matrix,
        entries,
        most_preferred,
        least_preferred,
    })
}

// Validates the input contract: catalog size and uniqueness, then exactly one
// in-range rating per pair, keyed in catalog order.
fn checks(
    alternatives: &[Alternative],
    ratings: &[PairwiseRating],
) -> Result<CheckResult, ScoringErrors> {
    debug!("checks: {:?} alternatives", alternatives.len());
    let n = alternatives.len();
    if n < 2 {
        return Err(ScoringErrors::InvalidInput(format!(
            "at least two alternatives are required, got {}",
            n
        )));
    }

    let mut indices: HashMap<String, AltIndex> = HashMap::new();
    for (idx, alt) in alternatives.iter().enumerate() {
        if indices.insert(alt.code.clone(), AltIndex(idx)).is_some() {
            return Err(ScoringErrors::InvalidInput(format!(
                "duplicate alternative code {}",
                alt.code
            )));
        }
    }

    let mut checked: HashMap<(AltIndex, AltIndex), u32> = HashMap::new();
    for r in ratings.iter() {
        let first = *indices.get(&r.first).ok_or_else(|| {
            ScoringErrors::InvalidInput(format!("rating references unknown code {}", r.first))
        })?;
        let second = *indices.get(&r.second).ok_or_else(|| {
            ScoringErrors::InvalidInput(format!("rating references unknown code {}", r.second))
        })?;
        if first == second {
            return Err(ScoringErrors::InvalidInput(format!(
                "alternative {} is compared to itself",
                r.first
            )));
        }
        if first > second {
            return Err(ScoringErrors::InvalidInput(format!(
                "rating for pair ({}, {}) is keyed against the catalog order",
                r.first, r.second
            )));
        }
        if r.rating < RATING_MIN || r.rating > RATING_MAX {
            return Err(ScoringErrors::InvalidInput(format!(
                "rating {} for pair ({}, {}) is outside [{}, {}]",
                r.rating, r.first, r.second, RATING_MIN, RATING_MAX
            )));
        }
        if checked.insert((first, second), r.rating).is_some() {
            return Err(ScoringErrors::InvalidInput(format!(
                "duplicate rating for pair ({}, {})",
                r.first, r.second
            )));
        }
    }

    for i in 0..n {
        for j in (i + 1)..n {
            if !checked.contains_key(&(AltIndex(i), AltIndex(j))) {
                return Err(ScoringErrors::InvalidInput(format!(
                    "missing rating for pair ({}, {})",
                    alternatives[i].code, alternatives[j].code
                )));
            }
        }
    }

    debug!("checks: {:?} checked ratings", checked.len());
    Ok(CheckResult { ratings: checked })
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOL: f64 = 1e-12;

    fn catalog(codes: &[&str]) -> Vec<Alternative> {
        codes
            .iter()
            .map(|c| Alternative {
                code: c.to_string(),
                label: format!("Direction {}", c),
            })
            .collect()
    }

    fn rating(first: &str, second: &str, rating: u32) -> PairwiseRating {
        PairwiseRating {
            first: first.to_string(),
            second: second.to_string(),
            rating,
        }
    }

    /// The worked example: A_B=7, A_C=3, B_C=9.
    fn three_way_session() -> (Vec<Alternative>, Vec<PairwiseRating>) {
        (
            catalog(&["A", "B", "C"]),
            vec![rating("A", "B", 7), rating("A", "C", 3), rating("B", "C", 9)],
        )
    }

    #[test]
    fn three_way_matrix_and_scores() {
        let (alts, ratings) = three_way_session();
        let result = run_scoring_session(&alts, &ratings).unwrap();

        let expected = [[0.0, 0.7, 0.3], [0.3, 0.0, 0.9], [0.7, 0.1, 0.0]];
        for (i, row) in expected.iter().enumerate() {
            for (j, value) in row.iter().enumerate() {
                assert!(
                    (result.matrix.get(i, j) - value).abs() < TOL,
                    "P[{}][{}] = {}, expected {}",
                    i,
                    j,
                    result.matrix.get(i, j),
                    value
                );
            }
        }

        // Ranking: B first, then A, then C.
        let ranked: Vec<(&str, u32)> = result
            .entries
            .iter()
            .map(|e| (e.code.as_str(), e.rank))
            .collect();
        assert_eq!(ranked, vec![("B", 1), ("A", 2), ("C", 3)]);

        let by_code: HashMap<&str, &ScoreEntry> = result
            .entries
            .iter()
            .map(|e| (e.code.as_str(), e))
            .collect();
        assert!((by_code["A"].raw_score - 1.0).abs() < TOL);
        assert!((by_code["B"].raw_score - 1.2).abs() < TOL);
        assert!((by_code["C"].raw_score - 0.8).abs() < TOL);
        // N = n * (n - 1) = 6.
        assert!((by_code["A"].normalized_score - 1.0 / 6.0).abs() < TOL);
        assert!((by_code["B"].normalized_score - 0.2).abs() < TOL);
        assert!((by_code["C"].normalized_score - 0.8 / 6.0).abs() < TOL);

        assert_eq!(result.most_preferred, "B");
        assert_eq!(result.least_preferred, "C");
    }

    #[test]
    fn complementarity_and_diagonal() {
        let alts = catalog(&["A", "B", "C", "D"]);
        let ratings = vec![
            rating("A", "B", 7),
            rating("A", "C", 3),
            rating("A", "D", 10),
            rating("B", "C", 9),
            rating("B", "D", 1),
            rating("C", "D", 5),
        ];
        let matrix = build_matrix(&alts, &ratings).unwrap();
        let n = matrix.dim();
        for i in 0..n {
            assert_eq!(matrix.get(i, i), 0.0);
            for j in 0..n {
                if i != j {
                    assert!(
                        (matrix.get(i, j) + matrix.get(j, i) - 1.0).abs() < TOL,
                        "complementarity broken at ({}, {})",
                        i,
                        j
                    );
                }
            }
            let f = matrix.row_sum(i);
            assert!((0.0..=(n as f64 - 1.0)).contains(&f), "row sum {} out of bounds", f);
        }
    }

    #[test]
    fn normalization_uses_n_times_n_minus_one() {
        let (alts, ratings) = three_way_session();
        let matrix = build_matrix(&alts, &ratings).unwrap();
        let n = matrix.dim();
        for entry in compute_scores(&alts, &matrix) {
            assert_eq!(entry.normalized_score, entry.raw_score / ((n * (n - 1)) as f64));
        }
    }

    #[test]
    fn rank_sequence_is_total() {
        let (alts, ratings) = three_way_session();
        let result = run_scoring_session(&alts, &ratings).unwrap();
        let ranks: Vec<u32> = result.entries.iter().map(|e| e.rank).collect();
        assert_eq!(ranks, vec![1, 2, 3]);
        for pair in result.entries.windows(2) {
            assert!(pair[0].normalized_score >= pair[1].normalized_score);
        }
    }

    #[test]
    fn recomputing_on_unchanged_matrix_is_identical() {
        let (alts, ratings) = three_way_session();
        let matrix = build_matrix(&alts, &ratings).unwrap();
        let first = rank_entries(compute_scores(&alts, &matrix));
        let second = rank_entries(compute_scores(&alts, &matrix));
        assert_eq!(first, second);
    }

    #[test]
    fn all_equal_ratings_tie_in_catalog_order() {
        let alts = catalog(&["A", "B", "C", "D"]);
        let mut ratings = Vec::new();
        for i in 0..alts.len() {
            for j in (i + 1)..alts.len() {
                ratings.push(rating(&alts[i].code, &alts[j].code, 5));
            }
        }
        let result = run_scoring_session(&alts, &ratings).unwrap();
        let n = alts.len() as f64;
        for entry in result.entries.iter() {
            // Every off-diagonal entry is 0.5, so f = (n - 1) / 2 and g = 1 / (2n).
            assert!((entry.raw_score - (n - 1.0) / 2.0).abs() < TOL);
            assert!((entry.normalized_score - 1.0 / (2.0 * n)).abs() < TOL);
        }
        // The stable tie keeps the catalog order.
        let codes: Vec<&str> = result.entries.iter().map(|e| e.code.as_str()).collect();
        assert_eq!(codes, vec!["A", "B", "C", "D"]);
    }

    #[test]
    fn extreme_dominance_takes_top_rank() {
        let alts = catalog(&["A", "B", "C"]);
        let ratings = vec![rating("A", "B", 10), rating("A", "C", 10), rating("B", "C", 5)];
        let result = run_scoring_session(&alts, &ratings).unwrap();
        assert_eq!(result.most_preferred, "A");
        assert!((result.entries[0].raw_score - 2.0).abs() < TOL);
    }

    #[test]
    fn too_few_alternatives_is_rejected() {
        let alts = catalog(&["A"]);
        let res = run_scoring_session(&alts, &[]);
        assert!(matches!(res, Err(ScoringErrors::InvalidInput(_))));
    }

    #[test]
    fn duplicate_code_is_rejected() {
        let alts = catalog(&["A", "B", "A"]);
        let res = build_matrix(&alts, &[]);
        assert!(matches!(res, Err(ScoringErrors::InvalidInput(_))));
    }

    #[test]
    fn unknown_code_is_rejected() {
        let alts = catalog(&["A", "B"]);
        let res = build_matrix(&alts, &[rating("A", "Z", 5)]);
        assert!(matches!(res, Err(ScoringErrors::InvalidInput(_))));
    }

    #[test]
    fn self_comparison_is_rejected() {
        let alts = catalog(&["A", "B"]);
        let res = build_matrix(&alts, &[rating("A", "A", 5)]);
        assert!(matches!(res, Err(ScoringErrors::InvalidInput(_))));
    }

    #[test]
    fn reversed_pair_is_rejected() {
        let alts = catalog(&["A", "B"]);
        let res = build_matrix(&alts, &[rating("B", "A", 5)]);
        assert!(matches!(res, Err(ScoringErrors::InvalidInput(_))));
    }

    #[test]
    fn duplicate_rating_is_rejected() {
        let alts = catalog(&["A", "B"]);
        let res = build_matrix(&alts, &[rating("A", "B", 5), rating("A", "B", 7)]);
        assert!(matches!(res, Err(ScoringErrors::InvalidInput(_))));
    }

    #[test]
    fn missing_rating_is_rejected() {
        let alts = catalog(&["A", "B", "C"]);
        let res = build_matrix(&alts, &[rating("A", "B", 5), rating("A", "C", 5)]);
        assert!(matches!(res, Err(ScoringErrors::InvalidInput(_))));
    }

    #[test]
    fn out_of_range_ratings_are_rejected() {
        let alts = catalog(&["A", "B"]);
        for bad in [0, 11] {
            let res = build_matrix(&alts, &[rating("A", "B", bad)]);
            assert!(matches!(res, Err(ScoringErrors::InvalidInput(_))), "rating {}", bad);
        }
    }
}
