//! Vote — one justice's position on one case.

use serde::{Deserialize, Serialize};

use crate::{
  ids::{CaseId, CaseIssuesId, DocketId, JusticeId, NaturalCourtId, Term, VoteId},
  normalize::{self, Direction, Eligibility, VoteCode},
  validity,
};

/// A single justice-vote row. Coded fields are kept exactly as recorded; the
/// typed accessors below are read-only views over them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vote {
  pub vote_id:            VoteId,
  /// Not enforced against the case table.
  pub case_id:            CaseId,
  pub case_issues_id:     Option<CaseIssuesId>,
  pub docket_id:          Option<DocketId>,
  pub case_name:          Option<String>,
  pub justice:            JusticeId,
  /// SCDB short name, e.g. `"WJBrennan"`.
  pub justice_name:       String,
  pub term:               Term,
  pub natural_court:      NaturalCourtId,
  pub maj_votes:          Option<u8>,
  pub min_votes:          Option<u8>,
  pub vote:               Option<String>,
  pub opinion:            Option<String>,
  /// Direction of this justice's vote.
  pub direction:          Option<String>,
  pub majority:           Option<String>,
  /// Direction of the case decision, copied from the case row.
  pub decision_direction: Option<String>,
  pub first_agreement:    Option<String>,
  pub second_agreement:   Option<String>,
}

impl Vote {
  /// A vote with every optional field unset.
  pub fn new(
    vote_id: impl Into<VoteId>,
    case_id: impl Into<CaseId>,
    justice: impl Into<JusticeId>,
    justice_name: impl Into<String>,
    term: Term,
    natural_court: NaturalCourtId,
  ) -> Self {
    Self {
      vote_id: vote_id.into(),
      case_id: case_id.into(),
      case_issues_id: None,
      docket_id: None,
      case_name: None,
      justice: justice.into(),
      justice_name: justice_name.into(),
      term,
      natural_court,
      maj_votes: None,
      min_votes: None,
      vote: None,
      opinion: None,
      direction: None,
      majority: None,
      decision_direction: None,
      first_agreement: None,
      second_agreement: None,
    }
  }

  /// `Some(true)` with the majority, `Some(false)` in dissent, `None` if the
  /// majority code is missing or unrecognised.
  pub fn is_majority(&self) -> Option<bool> {
    normalize::is_majority(self)
  }

  pub fn vote_code(&self) -> Option<VoteCode> {
    VoteCode::parse(self.vote.as_deref())
  }

  pub fn eligibility(&self) -> Eligibility {
    normalize::eligibility(self.vote.as_deref())
  }

  pub fn direction(&self) -> Option<Direction> {
    Direction::parse(self.direction.as_deref())
  }

  pub fn decision_direction(&self) -> Option<Direction> {
    Direction::parse(self.decision_direction.as_deref())
  }

  pub fn is_valid(&self) -> bool {
    validity::is_valid_row(self.docket_id.as_ref(), self.case_issues_id.as_ref())
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn vote_with_majority(code: Option<&str>) -> Vote {
    let mut vote =
      Vote::new("v1", "1990-001", "90", "WJBrennan", Term(1990), NaturalCourtId(1603));
    vote.majority = code.map(str::to_owned);
    vote
  }

  #[test]
  fn is_majority_reads_only_the_majority_code() {
    let mut vote = vote_with_majority(Some("2"));
    vote.vote = Some("2".into());
    vote.direction = Some("1".into());
    assert_eq!(vote.is_majority(), Some(true));

    assert_eq!(vote_with_majority(Some("1")).is_majority(), Some(false));
    assert_eq!(vote_with_majority(Some("")).is_majority(), None);
    assert_eq!(vote_with_majority(None).is_majority(), None);
  }

  #[test]
  fn typed_views_leave_raw_fields_untouched() {
    let mut vote = vote_with_majority(Some("2"));
    vote.vote = Some("9".into());
    let before = vote.clone();
    assert_eq!(vote.vote_code(), None);
    assert_eq!(vote.eligibility(), Eligibility::Excluded);
    assert_eq!(vote, before);
  }
}
