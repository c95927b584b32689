//! [`MemoryStore`] — a [`RecordStore`] over records already held in memory.

use std::{collections::BTreeSet, convert::Infallible};

use crate::{
  case::Case,
  court::{CourtTerm, JusticeTerm, NaturalCourt},
  ids::{JusticeId, NaturalCourtId, Term},
  justice::Justice,
  store::{CaseFilter, JusticeTermFilter, RecordStore, VoteFilter},
  vote::Vote,
};

/// An immutable snapshot of records. Filtering uses the reference
/// `matches` semantics of the query types.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
  cases:          Vec<Case>,
  votes:          Vec<Vote>,
  justices:       Vec<Justice>,
  natural_courts: Vec<NaturalCourt>,
  court_terms:    Vec<CourtTerm>,
  justice_terms:  Vec<JusticeTerm>,
}

impl MemoryStore {
  pub fn new() -> Self { Self::default() }

  pub fn with_cases(mut self, cases: impl IntoIterator<Item = Case>) -> Self {
    self.cases.extend(cases);
    self
  }

  pub fn with_votes(mut self, votes: impl IntoIterator<Item = Vote>) -> Self {
    self.votes.extend(votes);
    self
  }

  pub fn with_justices(
    mut self,
    justices: impl IntoIterator<Item = Justice>,
  ) -> Self {
    self.justices.extend(justices);
    self
  }

  pub fn with_natural_courts(
    mut self,
    courts: impl IntoIterator<Item = NaturalCourt>,
  ) -> Self {
    self.natural_courts.extend(courts);
    self
  }

  pub fn with_court_terms(
    mut self,
    terms: impl IntoIterator<Item = CourtTerm>,
  ) -> Self {
    self.court_terms.extend(terms);
    self
  }

  pub fn with_justice_terms(
    mut self,
    terms: impl IntoIterator<Item = JusticeTerm>,
  ) -> Self {
    self.justice_terms.extend(terms);
    self
  }
}

impl RecordStore for MemoryStore {
  type Error = Infallible;

  async fn find_votes(&self, filter: &VoteFilter) -> Result<Vec<Vote>, Infallible> {
    Ok(self.votes.iter().filter(|v| filter.matches(v)).cloned().collect())
  }

  async fn find_cases(&self, filter: &CaseFilter) -> Result<Vec<Case>, Infallible> {
    Ok(self.cases.iter().filter(|c| filter.matches(c)).cloned().collect())
  }

  async fn find_justices(&self, id: &JusticeId) -> Result<Vec<Justice>, Infallible> {
    Ok(
      self
        .justices
        .iter()
        .filter(|j| j.justice == *id)
        .cloned()
        .collect(),
    )
  }

  async fn find_natural_court(
    &self,
    id: NaturalCourtId,
  ) -> Result<Option<NaturalCourt>, Infallible> {
    Ok(
      self
        .natural_courts
        .iter()
        .find(|nc| nc.natural_court == id)
        .cloned(),
    )
  }

  async fn natural_court_terms(
    &self,
    id: NaturalCourtId,
  ) -> Result<Vec<Term>, Infallible> {
    let terms: BTreeSet<Term> = self
      .cases
      .iter()
      .filter(|c| c.natural_court == id)
      .map(|c| c.term)
      .collect();
    Ok(terms.into_iter().collect())
  }

  async fn find_court_terms(&self, terms: &[Term]) -> Result<Vec<CourtTerm>, Infallible> {
    Ok(
      self
        .court_terms
        .iter()
        .filter(|ct| terms.contains(&ct.term))
        .cloned()
        .collect(),
    )
  }

  async fn find_justice_terms(
    &self,
    filter: &JusticeTermFilter,
  ) -> Result<Vec<JusticeTerm>, Infallible> {
    Ok(
      self
        .justice_terms
        .iter()
        .filter(|jt| filter.matches(jt))
        .cloned()
        .collect(),
    )
  }
}
