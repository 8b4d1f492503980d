// ********* Input data structures ***********

use std::error::Error;
use std::fmt::Display;

/// One candidate policy direction being ranked.
///
/// The catalog of alternatives is ordered: the position of an alternative in
/// the catalog defines its row and column in the preference matrix.
#[derive(Eq, PartialEq, Debug, Clone, Hash)]
pub struct Alternative {
    /// A short identifier, unique within the catalog.
    pub code: String,
    /// The human-readable description of the alternative.
    pub label: String,
}

/// A single expert judgment between two alternatives.
///
/// `first` must precede `second` in the catalog ordering. The rating is an
/// integer in the closed range [1,10]:
/// - 1: `second` is absolutely preferred over `first`
/// - 5: both alternatives are equivalent
/// - 10: `first` is absolutely preferred over `second`
///
/// Only this direction is ever supplied. The reverse preference is derived as
/// the complement and never rated independently.
#[derive(Eq, PartialEq, Debug, Clone, Hash)]
pub struct PairwiseRating {
    pub first: String,
    pub second: String,
    pub rating: u32,
}

// ******** Output data structures *********

/// The derived scores for one alternative.
#[derive(PartialEq, Debug, Clone)]
pub struct ScoreEntry {
    /// 1 is the highest normalized score. Assigned by [rank_entries](crate::rank_entries);
    /// 0 until then.
    pub rank: u32,
    pub code: String,
    pub label: String,
    /// Row sum of the preference matrix.
    pub raw_score: f64,
    /// Raw score divided by n * (n - 1).
    pub normalized_score: f64,
}

/// The complete outcome of one scoring session.
#[derive(PartialEq, Debug, Clone)]
pub struct ScoringResult {
    pub matrix: crate::PreferenceMatrix,
    /// All entries, sorted by rank.
    pub entries: Vec<ScoreEntry>,
    /// Code of the top-ranked alternative.
    pub most_preferred: String,
    /// Code of the bottom-ranked alternative.
    pub least_preferred: String,
}

/// Errors that prevent a scoring session from completing.
#[derive(Eq, PartialEq, Debug, Clone)]
pub enum ScoringErrors {
    /// The alternative catalog or the rating set does not satisfy the input
    /// contract: fewer than two alternatives, a duplicate code, a missing or
    /// duplicated pair, a rating outside [1,10], or a pair keyed against the
    /// catalog order. There is no recovery path; the session must be redone
    /// by the judge.
    InvalidInput(String),
}

impl Error for ScoringErrors {}

impl Display for ScoringErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScoringErrors::InvalidInput(msg) => write!(f, "invalid input: {}", msg),
        }
    }
}
