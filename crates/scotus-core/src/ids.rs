//! Typed identifiers.
//!
//! SCDB links its tables through plain string codes. Each code gets its own
//! type so a justice id can't be handed to something expecting a case id;
//! resolution to records always goes through [`crate::store::RecordStore`].

use std::{fmt, num::ParseIntError, str::FromStr};

use serde::{Deserialize, Serialize};

macro_rules! string_id {
  ($(#[$meta:meta])* $name:ident) => {
    $(#[$meta])*
    #[derive(
      Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
    )]
    #[serde(transparent)]
    pub struct $name(String);

    impl $name {
      pub fn new(raw: impl Into<String>) -> Self { Self(raw.into()) }

      pub fn as_str(&self) -> &str { &self.0 }

      pub fn into_inner(self) -> String { self.0 }
    }

    impl fmt::Display for $name {
      fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
      }
    }

    impl From<&str> for $name {
      fn from(raw: &str) -> Self { Self(raw.to_owned()) }
    }

    impl From<String> for $name {
      fn from(raw: String) -> Self { Self(raw) }
    }
  };
}

string_id!(
  /// SCDB justice code, e.g. `"90"`.
  JusticeId
);
string_id!(
  /// SCDB `caseId`, shared by every issue row of one case, e.g. `"1990-045"`.
  CaseId
);
string_id!(
  /// SCDB `caseIssuesId`; the primary key of a case row.
  CaseIssuesId
);
string_id!(
  /// SCDB `docketId`, e.g. `"1990-045-01"`.
  DocketId
);
string_id!(VoteId);
string_id!(
  /// Lower-case surname key used by the Martin–Quinn court tables, e.g.
  /// `"brennan"`.
  JusticeCode
);

// ─── Numeric ids ─────────────────────────────────────────────────────────────

/// A term of the Court, identified by the year it began.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize,
  Deserialize,
)]
#[serde(transparent)]
pub struct Term(pub u16);

impl fmt::Display for Term {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.0)
  }
}

impl FromStr for Term {
  type Err = ParseIntError;

  fn from_str(s: &str) -> Result<Self, Self::Err> { s.trim().parse().map(Self) }
}

/// SCDB natural-court code, e.g. `1301` for the first Warren court.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize,
  Deserialize,
)]
#[serde(transparent)]
pub struct NaturalCourtId(pub u32);

impl fmt::Display for NaturalCourtId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.0)
  }
}

impl FromStr for NaturalCourtId {
  type Err = ParseIntError;

  fn from_str(s: &str) -> Result<Self, Self::Err> { s.trim().parse().map(Self) }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn term_parses_trimmed_year() {
    assert_eq!(" 1990 ".parse::<Term>().unwrap(), Term(1990));
    assert!("OT90".parse::<Term>().is_err());
  }

  #[test]
  fn string_ids_serialize_transparently() {
    let id = JusticeId::new("90");
    assert_eq!(serde_json::to_string(&id).unwrap(), "\"90\"");
    assert_eq!(id.to_string(), "90");
  }
}
