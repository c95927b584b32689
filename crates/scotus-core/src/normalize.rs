//! Normalisation of SCDB coded fields.
//!
//! Votes, majority membership and ideological direction are stored as short
//! numeric strings. Historical rows are incomplete, so every parser here maps
//! an unrecognised or missing code to `None` rather than failing.

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};

use crate::vote::Vote;

// ─── Majority ────────────────────────────────────────────────────────────────

/// Majority membership from a raw `majority` code.
///
/// The dataset codes `"2"` for a vote with the majority and `"1"` for a
/// dissent. Anything else, including an empty string, is unknown.
pub fn majority_from_code(code: Option<&str>) -> Option<bool> {
  match code? {
    "2" => Some(true),
    "1" => Some(false),
    _ => None,
  }
}

/// [`majority_from_code`] on the vote's `majority` field. Nothing else on the
/// vote is consulted.
pub fn is_majority(vote: &Vote) -> Option<bool> {
  majority_from_code(vote.majority.as_deref())
}

// ─── Vote codes ──────────────────────────────────────────────────────────────

/// A justice's recorded position, per the SCDB `vote` variable.
#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Hash,
  Serialize,
  Deserialize,
  EnumString,
  AsRefStr,
  Display,
)]
#[serde(rename_all = "snake_case")]
pub enum VoteCode {
  #[strum(serialize = "1")]
  Majority,
  #[strum(serialize = "2")]
  Dissent,
  #[strum(serialize = "3")]
  RegularConcurrence,
  #[strum(serialize = "4")]
  SpecialConcurrence,
  #[strum(serialize = "5")]
  JudgmentOfCourt,
  #[strum(serialize = "6")]
  DissentFromDenial,
  #[strum(serialize = "7")]
  JurisdictionalDissent,
  #[strum(serialize = "8")]
  EquallyDivided,
}

impl VoteCode {
  /// Codes that count as joining the outcome.
  pub const AGREEMENT: [VoteCode; 4] = [
    VoteCode::Majority,
    VoteCode::RegularConcurrence,
    VoteCode::SpecialConcurrence,
    VoteCode::JudgmentOfCourt,
  ];

  /// Codes that count as dissenting from the outcome.
  pub const DISAGREEMENT: [VoteCode; 1] = [VoteCode::Dissent];

  pub fn parse(code: Option<&str>) -> Option<Self> { code?.parse().ok() }

  pub fn eligibility(self) -> Eligibility {
    if Self::AGREEMENT.contains(&self) {
      Eligibility::Agreement
    } else if Self::DISAGREEMENT.contains(&self) {
      Eligibility::Disagreement
    } else {
      Eligibility::Excluded
    }
  }
}

/// Which side of a cohort comparison a vote can count towards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Eligibility {
  Agreement,
  Disagreement,
  /// Unknown, missing, or a code that is neither (e.g. a jurisdictional
  /// dissent).
  Excluded,
}

/// Eligibility of a raw vote code.
pub fn eligibility(code: Option<&str>) -> Eligibility {
  VoteCode::parse(code).map_or(Eligibility::Excluded, VoteCode::eligibility)
}

// ─── Direction ───────────────────────────────────────────────────────────────

/// Ideological valence of a decision or of an individual vote.
#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Hash,
  Serialize,
  Deserialize,
  EnumString,
  AsRefStr,
  Display,
)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
  #[strum(serialize = "1")]
  Conservative,
  #[strum(serialize = "2")]
  Liberal,
  #[strum(serialize = "3")]
  Unspecifiable,
}

impl Direction {
  pub fn parse(code: Option<&str>) -> Option<Self> { code?.parse().ok() }

  /// `+1` conservative, `-1` liberal, `0` unspecifiable.
  pub fn sign(self) -> i32 {
    match self {
      Direction::Conservative => 1,
      Direction::Liberal => -1,
      Direction::Unspecifiable => 0,
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn majority_code_mapping() {
    assert_eq!(majority_from_code(Some("2")), Some(true));
    assert_eq!(majority_from_code(Some("1")), Some(false));
    assert_eq!(majority_from_code(Some("")), None);
    assert_eq!(majority_from_code(Some("3")), None);
    assert_eq!(majority_from_code(None), None);
  }

  #[test]
  fn agreement_codes_are_exactly_one_three_four_five() {
    for code in ["1", "3", "4", "5"] {
      assert_eq!(eligibility(Some(code)), Eligibility::Agreement, "{code}");
    }
    assert_eq!(eligibility(Some("2")), Eligibility::Disagreement);
    for code in ["6", "7", "8", "9", "", "x", " 1"] {
      assert_eq!(eligibility(Some(code)), Eligibility::Excluded, "{code:?}");
    }
    assert_eq!(eligibility(None), Eligibility::Excluded);
  }

  #[test]
  fn vote_code_displays_raw_code() {
    assert_eq!(VoteCode::JudgmentOfCourt.to_string(), "5");
    assert_eq!(VoteCode::parse(Some("8")), Some(VoteCode::EquallyDivided));
  }

  #[test]
  fn direction_parse_and_sign() {
    assert_eq!(Direction::parse(Some("1")), Some(Direction::Conservative));
    assert_eq!(Direction::parse(Some("2")).map(Direction::sign), Some(-1));
    assert_eq!(Direction::parse(Some("3")).map(Direction::sign), Some(0));
    assert_eq!(Direction::parse(Some("4")), None);
    assert_eq!(Direction::parse(None), None);
  }
}
