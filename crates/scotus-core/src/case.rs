//! Case — one merits decision row.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{
  ids::{CaseId, CaseIssuesId, DocketId, NaturalCourtId, Term},
  normalize::Direction,
  validity,
};

/// One merits case, as recorded by SCDB.
///
/// Consolidated cases appear once per docket and multi-issue cases once per
/// issue; use the valid view ([`Case::is_valid`], `CaseFilter::valid_only`)
/// when counting votes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Case {
  pub case_issues_id:     CaseIssuesId,
  pub case_id:            CaseId,
  pub docket_id:          Option<DocketId>,
  pub docket:             Option<String>,
  pub case_name:          Option<String>,
  pub term:               Term,
  pub natural_court:      NaturalCourtId,
  pub chief:              Option<String>,
  pub date_decision:      Option<NaiveDate>,
  pub maj_votes:          Option<u8>,
  pub min_votes:          Option<u8>,
  /// Raw decision-direction code.
  pub decision_direction: Option<String>,
  /// Last persisted weight; see [`crate::weighted`] for the derivation.
  pub weighted_majvotes:  Option<i32>,
}

impl Case {
  /// A case with every optional field unset.
  pub fn new(
    case_issues_id: impl Into<CaseIssuesId>,
    case_id: impl Into<CaseId>,
    term: Term,
    natural_court: NaturalCourtId,
  ) -> Self {
    Self {
      case_issues_id: case_issues_id.into(),
      case_id: case_id.into(),
      docket_id: None,
      docket: None,
      case_name: None,
      term,
      natural_court,
      chief: None,
      date_decision: None,
      maj_votes: None,
      min_votes: None,
      decision_direction: None,
      weighted_majvotes: None,
    }
  }

  /// The vote tally, e.g. `"7-2"`, when both counts are known.
  pub fn vote_split(&self) -> Option<String> {
    Some(format!("{}-{}", self.maj_votes?, self.min_votes?))
  }

  pub fn decision_direction(&self) -> Option<Direction> {
    Direction::parse(self.decision_direction.as_deref())
  }

  pub fn is_valid(&self) -> bool {
    validity::is_valid_row(self.docket_id.as_ref(), Some(&self.case_issues_id))
  }

  pub fn display_name(&self) -> String {
    self
      .case_name
      .clone()
      .unwrap_or_else(|| self.case_id.to_string())
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn vote_split_needs_both_counts() {
    let mut case = Case::new("1990-045-01-01", "1990-045", Term(1990), NaturalCourtId(1603));
    assert_eq!(case.vote_split(), None);
    case.maj_votes = Some(9);
    assert_eq!(case.vote_split(), None);
    case.min_votes = Some(0);
    assert_eq!(case.vote_split().as_deref(), Some("9-0"));
  }
}
