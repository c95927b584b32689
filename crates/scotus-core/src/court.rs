//! Court-level records: natural courts, terms, and per-justice term
//! estimates.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::ids::{JusticeCode, JusticeId, NaturalCourtId, Term};

/// A period during which the bench composition did not change.
///
/// Its terms are the distinct terms of the cases it decided; see
/// [`crate::store::RecordStore::natural_court_terms`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NaturalCourt {
  pub natural_court: NaturalCourtId,
  pub chief:         Option<String>,
}

/// Martin–Quinn aggregates for one term.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CourtTerm {
  pub term:           Term,
  /// Median justice's ideal point.
  pub median:         Option<f64>,
  pub median_sd:      Option<f64>,
  pub min:            Option<f64>,
  pub max:            Option<f64>,
  /// Ideal point of every justice sitting that term.
  pub justice_scores: BTreeMap<JusticeCode, f64>,
}

impl CourtTerm {
  pub fn new(term: Term) -> Self {
    Self {
      term,
      median: None,
      median_sd: None,
      min: None,
      max: None,
      justice_scores: BTreeMap::new(),
    }
  }

  pub fn score_of(&self, code: &JusticeCode) -> Option<f64> {
    self.justice_scores.get(code).copied()
  }
}

/// Posterior Martin–Quinn estimate for one justice in one term.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JusticeTerm {
  pub justice_term: String,
  pub justice:      JusticeId,
  pub justice_name: Option<String>,
  pub term:         Term,
  pub code:         Option<JusticeCode>,
  pub post_mn:      Option<f64>,
  pub post_sd:      Option<f64>,
  pub post_med:     Option<f64>,
  pub post_025:     Option<f64>,
  pub post_975:     Option<f64>,
}
