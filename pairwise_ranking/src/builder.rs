pub use crate::config::*;
use crate::run_scoring_session;

/// A builder for assembling one expert session.
///
/// It mirrors how judgments are collected in practice: the catalog is fixed
/// first, then one rating arrives per judged pair, and the scores are
/// computed once the session is complete.
///
/// ```
/// pub use pairwise_ranking::builder::Builder;
/// # use pairwise_ranking::ScoringErrors;
///
/// let mut builder = Builder::new()
///     .alternatives(&[("A", "Import substitution"), ("B", "Export diversification")])?;
///
/// builder.rate("A", "B", 7)?;
/// let result = builder.score()?;
/// assert_eq!(result.most_preferred, "A");
///
/// # Ok::<(), ScoringErrors>(())
/// ```
pub struct Builder {
    pub(crate) _alternatives: Vec<Alternative>,
    pub(crate) _ratings: Vec<PairwiseRating>,
}

impl Builder {
    pub fn new() -> Builder {
        Builder {
            _alternatives: Vec::new(),
            _ratings: Vec::new(),
        }
    }

    /// Sets the ordered catalog of alternatives as (code, label) pairs.
    /// Resets any ratings added so far, since they are only meaningful
    /// against a fixed catalog.
    pub fn alternatives(self, alts: &[(&str, &str)]) -> Result<Builder, ScoringErrors> {
        Ok(Builder {
            _alternatives: alts
                .iter()
                .map(|(code, label)| Alternative {
                    code: code.to_string(),
                    label: label.to_string(),
                })
                .collect(),
            _ratings: Vec::new(),
        })
    }

    /// Adds the rating for one pair. `first` must precede `second` in the
    /// catalog ordering; validation happens when the session is scored.
    pub fn rate(&mut self, first: &str, second: &str, rating: u32) -> Result<(), ScoringErrors> {
        self._ratings.push(PairwiseRating {
            first: first.to_string(),
            second: second.to_string(),
            rating,
        });
        Ok(())
    }

    /// Scores the assembled session.
    pub fn score(&self) -> Result<ScoringResult, ScoringErrors> {
        run_scoring_session(&self._alternatives, &self._ratings)
    }
}

impl Default for Builder {
    fn default() -> Self {
        Builder::new()
    }
}
