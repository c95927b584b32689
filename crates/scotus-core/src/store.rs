//! The `RecordStore` / `RecordWriter` traits and supporting query types.
//!
//! Traits are implemented by storage backends (e.g. `scotus-store-sqlite`,
//! or [`crate::memory::MemoryStore`]). The engine modules depend on this
//! abstraction only, and never write through [`RecordStore`].

use std::{collections::BTreeSet, future::Future};

use crate::{
  case::Case,
  court::{CourtTerm, JusticeTerm, NaturalCourt},
  ids::{CaseId, CaseIssuesId, JusticeId, NaturalCourtId, Term},
  justice::Justice,
  vote::Vote,
};

// ─── Query types ─────────────────────────────────────────────────────────────

/// Parameters for [`RecordStore::find_votes`].
///
/// Every set field narrows the result. A `Some` list that is empty matches
/// nothing.
#[derive(Debug, Clone, Default)]
pub struct VoteFilter {
  pub justice:       Option<JusticeId>,
  pub justice_name:  Option<String>,
  pub case_ids:      Option<BTreeSet<CaseId>>,
  pub term:          Option<Term>,
  pub natural_court: Option<NaturalCourtId>,
  pub maj_votes_in:  Option<Vec<u8>>,
  /// Raw vote codes.
  pub vote_in:       Option<Vec<String>>,
  /// Raw majority codes.
  pub majority_in:   Option<Vec<String>>,
  /// Raw direction code of the individual vote.
  pub direction:     Option<String>,
  /// Restrict to the deduplicated view.
  pub valid_only:    bool,
}

impl VoteFilter {
  /// Reference semantics for the filter; SQL backends must agree with it.
  pub fn matches(&self, vote: &Vote) -> bool {
    fn within<T: PartialEq>(allowed: &Option<Vec<T>>, value: Option<&T>) -> bool {
      match allowed {
        None => true,
        Some(list) => value.is_some_and(|v| list.contains(v)),
      }
    }

    self.justice.as_ref().is_none_or(|j| *j == vote.justice)
      && self
        .justice_name
        .as_ref()
        .is_none_or(|n| *n == vote.justice_name)
      && self
        .case_ids
        .as_ref()
        .is_none_or(|ids| ids.contains(&vote.case_id))
      && self.term.is_none_or(|t| t == vote.term)
      && self.natural_court.is_none_or(|nc| nc == vote.natural_court)
      && within(&self.maj_votes_in, vote.maj_votes.as_ref())
      && within(&self.vote_in, vote.vote.as_ref())
      && within(&self.majority_in, vote.majority.as_ref())
      && self
        .direction
        .as_ref()
        .is_none_or(|d| vote.direction.as_ref() == Some(d))
      && (!self.valid_only || vote.is_valid())
  }
}

/// Parameters for [`RecordStore::find_cases`].
#[derive(Debug, Clone, Default)]
pub struct CaseFilter {
  pub case_id:       Option<CaseId>,
  pub term:          Option<Term>,
  pub natural_court: Option<NaturalCourtId>,
  pub maj_votes_in:  Option<Vec<u8>>,
  pub valid_only:    bool,
}

impl CaseFilter {
  pub fn matches(&self, case: &Case) -> bool {
    self.case_id.as_ref().is_none_or(|id| *id == case.case_id)
      && self.term.is_none_or(|t| t == case.term)
      && self.natural_court.is_none_or(|nc| nc == case.natural_court)
      && self
        .maj_votes_in
        .as_ref()
        .is_none_or(|list| case.maj_votes.is_some_and(|m| list.contains(&m)))
      && (!self.valid_only || case.is_valid())
  }
}

/// Parameters for [`RecordStore::find_justice_terms`].
#[derive(Debug, Clone, Default)]
pub struct JusticeTermFilter {
  pub justice: Option<JusticeId>,
  pub term:    Option<Term>,
}

impl JusticeTermFilter {
  pub fn matches(&self, jt: &JusticeTerm) -> bool {
    self.justice.as_ref().is_none_or(|j| *j == jt.justice)
      && self.term.is_none_or(|t| t == jt.term)
  }
}

// ─── Traits ──────────────────────────────────────────────────────────────────

/// Read-only access to a snapshot of SCDB records.
///
/// All methods return `Send` futures so engine operations can run
/// concurrently on a multi-threaded runtime over one snapshot.
pub trait RecordStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Votes matching `filter`, in no particular order.
  fn find_votes<'a>(
    &'a self,
    filter: &'a VoteFilter,
  ) -> impl Future<Output = Result<Vec<Vote>, Self::Error>> + Send + 'a;

  /// Cases matching `filter`, in no particular order.
  fn find_cases<'a>(
    &'a self,
    filter: &'a CaseFilter,
  ) -> impl Future<Output = Result<Vec<Case>, Self::Error>> + Send + 'a;

  /// Every justice record carrying `id`. Callers must cope with zero or
  /// several.
  fn find_justices<'a>(
    &'a self,
    id: &'a JusticeId,
  ) -> impl Future<Output = Result<Vec<Justice>, Self::Error>> + Send + 'a;

  fn find_natural_court(
    &self,
    id: NaturalCourtId,
  ) -> impl Future<Output = Result<Option<NaturalCourt>, Self::Error>> + Send + '_;

  /// Distinct terms of the cases decided by a natural court, ascending.
  fn natural_court_terms(
    &self,
    id: NaturalCourtId,
  ) -> impl Future<Output = Result<Vec<Term>, Self::Error>> + Send + '_;

  /// Court-term rows for the given terms; missing terms are skipped.
  fn find_court_terms<'a>(
    &'a self,
    terms: &'a [Term],
  ) -> impl Future<Output = Result<Vec<CourtTerm>, Self::Error>> + Send + 'a;

  fn find_justice_terms<'a>(
    &'a self,
    filter: &'a JusticeTermFilter,
  ) -> impl Future<Output = Result<Vec<JusticeTerm>, Self::Error>> + Send + 'a;
}

/// The explicit write path for derived case fields.
pub trait RecordWriter: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Persist (or clear) the weighted majority for a case row. Returns whether
  /// a row was touched.
  fn set_weighted_majvotes<'a>(
    &'a self,
    case: &'a CaseIssuesId,
    value: Option<i32>,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + 'a;
}
