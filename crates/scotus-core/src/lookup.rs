//! Display-name resolution for identifiers carried on vote rows.
//!
//! Identifier lookups are best-effort: a missing or ambiguous match falls
//! back to the raw identifier instead of failing.

use serde::Serialize;
use tracing::debug;

use crate::{
  Error, Result,
  case::Case,
  ids::{CaseId, JusticeId},
  justice::Justice,
  store::{CaseFilter, RecordStore},
  vote::Vote,
};

/// Outcome of looking up a record by a foreign-key-style identifier.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "resolution", rename_all = "snake_case")]
pub enum Resolution<T> {
  Unique { record: T },
  Missing { raw: String },
  Ambiguous { raw: String, matches: usize },
}

impl<T> Resolution<T> {
  pub fn from_matches(raw: impl Into<String>, mut matches: Vec<T>) -> Self {
    if matches.len() == 1
      && let Some(record) = matches.pop()
    {
      return Self::Unique { record };
    }
    let raw = raw.into();
    if matches.is_empty() {
      Self::Missing { raw }
    } else {
      Self::Ambiguous { raw, matches: matches.len() }
    }
  }

  pub fn record(&self) -> Option<&T> {
    match self {
      Self::Unique { record } => Some(record),
      _ => None,
    }
  }

  pub fn into_record(self) -> Option<T> {
    match self {
      Self::Unique { record } => Some(record),
      _ => None,
    }
  }

  /// `name(record)` when resolved, else `fallback`.
  pub fn display_or(&self, name: impl FnOnce(&T) -> String, fallback: String) -> String {
    self.record().map_or(fallback, name)
  }

  /// `name(record)` when resolved, else the raw identifier.
  pub fn display(&self, name: impl FnOnce(&T) -> String) -> String {
    match self {
      Self::Unique { record } => name(record),
      Self::Missing { raw } | Self::Ambiguous { raw, .. } => raw.clone(),
    }
  }
}

pub async fn resolve_justice<S: RecordStore>(
  store: &S,
  id: &JusticeId,
) -> Result<Resolution<Justice>> {
  let matches = store.find_justices(id).await.map_err(Error::store)?;
  if matches.len() != 1 {
    debug!(justice = %id, matches = matches.len(), "justice lookup fell back to raw id");
  }
  Ok(Resolution::from_matches(id.as_str(), matches))
}

/// Resolve a case id against the valid view. Consolidated-case duplicates
/// would otherwise make every consolidated case ambiguous.
pub async fn resolve_case<S: RecordStore>(
  store: &S,
  id: &CaseId,
) -> Result<Resolution<Case>> {
  let filter = CaseFilter {
    case_id: Some(id.clone()),
    valid_only: true,
    ..Default::default()
  };
  let matches = store.find_cases(&filter).await.map_err(Error::store)?;
  if matches.len() != 1 {
    debug!(case = %id, matches = matches.len(), "case lookup fell back to raw id");
  }
  Ok(Resolution::from_matches(id.as_str(), matches))
}

/// `"<justice> in <case>"` for a vote, e.g.
/// `"William J. Brennan, Jr. in Texas v. Johnson"`.
///
/// An unresolved justice shows its raw id; an unresolved case shows the case
/// name copied onto the vote, or its raw id.
pub async fn describe_vote<S: RecordStore>(store: &S, vote: &Vote) -> Result<String> {
  let justice = resolve_justice(store, &vote.justice)
    .await?
    .display(Justice::display_name);
  let case_fallback = vote
    .case_name
    .clone()
    .unwrap_or_else(|| vote.case_id.to_string());
  let case = resolve_case(store, &vote.case_id)
    .await?
    .display_or(Case::display_name, case_fallback);
  Ok(format!("{justice} in {case}"))
}
