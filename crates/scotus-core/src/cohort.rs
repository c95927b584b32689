//! Cohort intersection: the cases on which a group of justices all voted
//! together.
//!
//! One primitive covers agreement, disagreement and the shared comparison
//! universe. The [`CohortMode`] decides which votes make a case eligible for
//! a justice; the cohort's cases are the intersection of every member's
//! eligible set.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize, Serializer, ser::SerializeStruct as _};
use tracing::debug;

use crate::{
  Error, Result,
  ids::{CaseId, JusticeId, NaturalCourtId, Term},
  normalize::{Eligibility, VoteCode},
  store::{RecordStore, VoteFilter},
  vote::Vote,
};

// ─── Mode ────────────────────────────────────────────────────────────────────

/// Which votes count towards a member's eligible set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CohortMode {
  /// Joined the outcome: vote codes 1, 3, 4, 5.
  Agree,
  /// Dissented: vote code 2.
  Disagree,
  /// Any recorded vote.
  Common,
}

impl CohortMode {
  /// Raw codes a store may pre-filter on. `None` admits every vote.
  pub fn vote_codes(self) -> Option<Vec<String>> {
    let codes: &[VoteCode] = match self {
      CohortMode::Agree => &VoteCode::AGREEMENT,
      CohortMode::Disagree => &VoteCode::DISAGREEMENT,
      CohortMode::Common => return None,
    };
    Some(codes.iter().map(ToString::to_string).collect())
  }

  pub fn admits(self, vote: &Vote) -> bool {
    match self {
      CohortMode::Agree => vote.eligibility() == Eligibility::Agreement,
      CohortMode::Disagree => vote.eligibility() == Eligibility::Disagreement,
      CohortMode::Common => true,
    }
  }
}

// ─── Query ───────────────────────────────────────────────────────────────────

/// How a cohort member is identified. SCDB vote rows carry both the numeric
/// justice id and the short name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "by", content = "value", rename_all = "snake_case")]
pub enum JusticeRef {
  Id(JusticeId),
  /// Short name, e.g. `"WJBrennan"`.
  Name(String),
}

/// Filters applied to every member's votes.
#[derive(Debug, Clone)]
pub struct CohortFilters {
  pub term:          Option<Term>,
  pub natural_court: Option<NaturalCourtId>,
  /// Allowed majority sizes, e.g. `[5]` for 5–4 decisions.
  pub maj_votes_in:  Option<Vec<u8>>,
  /// Defaults to `true`.
  pub valid_only:    bool,
}

impl Default for CohortFilters {
  fn default() -> Self {
    Self {
      term:          None,
      natural_court: None,
      maj_votes_in:  None,
      valid_only:    true,
    }
  }
}

#[derive(Debug, Clone)]
pub struct CohortQuery {
  pub anchor:   JusticeId,
  pub peers:    Vec<JusticeRef>,
  /// Restrict to these cases; `None` means every case.
  pub universe: Option<BTreeSet<CaseId>>,
  pub filters:  CohortFilters,
}

impl CohortQuery {
  pub fn new(anchor: impl Into<JusticeId>) -> Self {
    Self {
      anchor:   anchor.into(),
      peers:    Vec::new(),
      universe: None,
      filters:  CohortFilters::default(),
    }
  }

  pub fn with_peers(mut self, peers: impl IntoIterator<Item = JusticeRef>) -> Self {
    self.peers.extend(peers);
    self
  }

  /// Anchor first, then peers in the order given.
  pub fn members(&self) -> impl Iterator<Item = JusticeRef> + '_ {
    std::iter::once(JusticeRef::Id(self.anchor.clone())).chain(self.peers.iter().cloned())
  }

  fn vote_filter(&self, member: &JusticeRef, mode: CohortMode) -> VoteFilter {
    let (justice, justice_name) = match member {
      JusticeRef::Id(id) => (Some(id.clone()), None),
      JusticeRef::Name(name) => (None, Some(name.clone())),
    };
    VoteFilter {
      justice,
      justice_name,
      case_ids: self.universe.clone(),
      term: self.filters.term,
      natural_court: self.filters.natural_court,
      maj_votes_in: self.filters.maj_votes_in.clone(),
      vote_in: mode.vote_codes(),
      valid_only: self.filters.valid_only,
      ..Default::default()
    }
  }
}

// ─── Result ──────────────────────────────────────────────────────────────────

/// The cohort's case set. The count is always derived from the set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CohortResult {
  cases: BTreeSet<CaseId>,
}

impl CohortResult {
  pub fn count(&self) -> usize { self.cases.len() }

  pub fn is_empty(&self) -> bool { self.cases.is_empty() }

  pub fn cases(&self) -> &BTreeSet<CaseId> { &self.cases }

  pub fn into_cases(self) -> BTreeSet<CaseId> { self.cases }
}

impl From<BTreeSet<CaseId>> for CohortResult {
  fn from(cases: BTreeSet<CaseId>) -> Self { Self { cases } }
}

impl Serialize for CohortResult {
  fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
    let mut s = serializer.serialize_struct("CohortResult", 2)?;
    s.serialize_field("count", &self.count())?;
    s.serialize_field("cases", &self.cases)?;
    s.end()
  }
}

// ─── Pure set logic ──────────────────────────────────────────────────────────

/// Case ids of the votes admitted by `mode`.
pub fn eligible_cases<'a>(
  votes: impl IntoIterator<Item = &'a Vote>,
  mode: CohortMode,
) -> BTreeSet<CaseId> {
  votes
    .into_iter()
    .filter(|v| mode.admits(v))
    .map(|v| v.case_id.clone())
    .collect()
}

/// Left-to-right intersection of per-member sets. A single set comes back
/// unchanged; no sets at all gives the empty set.
pub fn intersect(sets: impl IntoIterator<Item = BTreeSet<CaseId>>) -> BTreeSet<CaseId> {
  let mut sets = sets.into_iter();
  let Some(mut acc) = sets.next() else {
    return BTreeSet::new();
  };
  for next in sets {
    acc.retain(|id| next.contains(id));
  }
  acc
}

// ─── Store-backed operations ─────────────────────────────────────────────────

/// Cases on which every cohort member cast a vote admitted by `mode`.
///
/// Once the running intersection is empty the remaining members are not
/// queried; an empty result is not an error.
pub async fn cohort_cases<S: RecordStore>(
  store: &S,
  query: &CohortQuery,
  mode: CohortMode,
) -> Result<CohortResult> {
  let mut acc: Option<BTreeSet<CaseId>> = None;
  for member in query.members() {
    let filter = query.vote_filter(&member, mode);
    let votes = store.find_votes(&filter).await.map_err(Error::store)?;
    let cases = eligible_cases(
      votes.iter().filter(|v| filter.matches(v)),
      mode,
    );
    debug!(?member, ?mode, cases = cases.len(), "cohort member eligible cases");

    let narrowed = intersect(acc.into_iter().chain([cases]));
    if narrowed.is_empty() {
      return Ok(CohortResult::default());
    }
    acc = Some(narrowed);
  }
  Ok(acc.unwrap_or_default().into())
}

/// Cases every member voted on at all, whatever the vote.
pub async fn common_cases<S: RecordStore>(
  store: &S,
  query: &CohortQuery,
) -> Result<CohortResult> {
  cohort_cases(store, query, CohortMode::Common).await
}

/// Agreement and disagreement measured within the cohort's common cases.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AgreementSummary {
  pub common:         CohortResult,
  pub agree:          CohortResult,
  pub disagree:       CohortResult,
  /// `agree / common`; `None` when there are no common cases.
  pub agreement_rate: Option<f64>,
}

pub async fn agreement_summary<S: RecordStore>(
  store: &S,
  query: &CohortQuery,
) -> Result<AgreementSummary> {
  let common = common_cases(store, query).await?;
  let scoped = CohortQuery {
    universe: Some(common.cases().clone()),
    ..query.clone()
  };

  let agree = cohort_cases(store, &scoped, CohortMode::Agree).await?;
  let disagree = cohort_cases(store, &scoped, CohortMode::Disagree).await?;
  let agreement_rate =
    (!common.is_empty()).then(|| agree.count() as f64 / common.count() as f64);

  Ok(AgreementSummary { common, agree, disagree, agreement_rate })
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::{ids::DocketId, memory::MemoryStore};

  const NC: NaturalCourtId = NaturalCourtId(1603);

  fn vote(justice: &str, name: &str, case: &str, code: &str) -> Vote {
    let term = Term(case[..4].parse().unwrap());
    let mut v = Vote::new(format!("{case}-{justice}"), case, justice, name, term, NC);
    v.vote = Some(code.into());
    v.maj_votes = Some(if code == "2" { 5 } else { 9 });
    v
  }

  /// Three justices over four cases:
  ///
  /// | case     | 90 | 91 | 92 |
  /// |----------|----|----|----|
  /// | 1990-001 | 1  | 1  | 1  |
  /// | 1990-002 | 2  | 2  | 1  |
  /// | 1991-003 | 3  | 4  | 2  |
  /// | 1991-004 | 2  | 2  | 2  |
  /// | 1991-005 | 7  | 1  | –  |
  fn store() -> MemoryStore {
    let rows = [
      ("1990-001", ["1", "1", "1"]),
      ("1990-002", ["2", "2", "1"]),
      ("1991-003", ["3", "4", "2"]),
      ("1991-004", ["2", "2", "2"]),
    ];
    let mut votes = Vec::new();
    for (case, codes) in rows {
      votes.push(vote("90", "WJBrennan", case, codes[0]));
      votes.push(vote("91", "TMarshall", case, codes[1]));
      votes.push(vote("92", "AScalia", case, codes[2]));
    }
    votes.push(vote("90", "WJBrennan", "1991-005", "7"));
    votes.push(vote("91", "TMarshall", "1991-005", "1"));
    MemoryStore::new().with_votes(votes)
  }

  fn ids(cases: &[&str]) -> BTreeSet<CaseId> {
    cases.iter().map(|c| CaseId::new(*c)).collect()
  }

  fn by_id(ids: &[&str]) -> Vec<JusticeRef> {
    ids.iter().map(|i| JusticeRef::Id(JusticeId::new(*i))).collect()
  }

  #[test]
  fn intersect_edge_cases() {
    assert!(intersect(Vec::new()).is_empty());
    let only = ids(&["a", "b"]);
    assert_eq!(intersect([only.clone()]), only);
    assert_eq!(intersect([ids(&["a", "b"]), ids(&["b", "c"])]), ids(&["b"]));
    assert!(intersect([ids(&["a"]), BTreeSet::new(), ids(&["a"])]).is_empty());
  }

  #[test]
  fn result_count_tracks_cases() {
    let r = CohortResult::from(ids(&["x", "y"]));
    assert_eq!(r.count(), 2);
    let json = serde_json::to_value(&r).unwrap();
    assert_eq!(json["count"], 2);
    assert_eq!(json["cases"], serde_json::json!(["x", "y"]));

    let empty = CohortResult::default();
    assert_eq!(empty.count(), 0);
    assert_eq!(serde_json::to_value(&empty).unwrap()["count"], 0);
  }

  #[tokio::test]
  async fn anchor_alone_returns_its_eligible_set() {
    let s = store();
    let q = CohortQuery::new("90");
    let agree = cohort_cases(&s, &q, CohortMode::Agree).await.unwrap();
    assert_eq!(*agree.cases(), ids(&["1990-001", "1991-003"]));
    let disagree = cohort_cases(&s, &q, CohortMode::Disagree).await.unwrap();
    assert_eq!(*disagree.cases(), ids(&["1990-002", "1991-004"]));
  }

  #[tokio::test]
  async fn agreement_excludes_dissents_and_unknown_codes() {
    let s = store();
    let q = CohortQuery::new("90").with_peers(by_id(&["91"]));
    let agree = cohort_cases(&s, &q, CohortMode::Agree).await.unwrap();
    // 1991-005 is a jurisdictional dissent (7) for 90.
    assert_eq!(*agree.cases(), ids(&["1990-001", "1991-003"]));
    assert_eq!(agree.count(), 2);
  }

  #[tokio::test]
  async fn peer_order_does_not_matter() {
    let s = store();
    let forward = CohortQuery::new("90").with_peers(by_id(&["91", "92"]));
    let reverse = CohortQuery::new("90").with_peers(by_id(&["92", "91"]));
    for mode in [CohortMode::Agree, CohortMode::Disagree, CohortMode::Common] {
      let a = cohort_cases(&s, &forward, mode).await.unwrap();
      let b = cohort_cases(&s, &reverse, mode).await.unwrap();
      assert_eq!(a, b, "{mode:?}");
    }
    let disagree = cohort_cases(&s, &forward, CohortMode::Disagree).await.unwrap();
    assert_eq!(*disagree.cases(), ids(&["1991-004"]));
  }

  #[tokio::test]
  async fn peers_by_name() {
    let s = store();
    let q = CohortQuery::new("90")
      .with_peers([JusticeRef::Name("TMarshall".into()), JusticeRef::Name("AScalia".into())]);
    let agree = cohort_cases(&s, &q, CohortMode::Agree).await.unwrap();
    assert_eq!(*agree.cases(), ids(&["1990-001"]));
  }

  #[tokio::test]
  async fn store_result_is_the_intersection_of_member_sets() {
    let s = store();
    let members = ["90", "91", "92"];
    let q = CohortQuery::new(members[0]).with_peers(by_id(&members[1..]));
    for mode in [CohortMode::Agree, CohortMode::Disagree, CohortMode::Common] {
      let mut sets = Vec::new();
      for justice in members {
        let filter = VoteFilter { justice: Some(justice.into()), ..Default::default() };
        let votes = s.find_votes(&filter).await.unwrap();
        sets.push(eligible_cases(&votes, mode));
      }
      let result = cohort_cases(&s, &q, mode).await.unwrap();
      assert_eq!(*result.cases(), intersect(sets), "{mode:?}");
    }
  }

  #[tokio::test]
  async fn member_without_votes_empties_the_result() {
    let s = store();
    let q = CohortQuery::new("90").with_peers(by_id(&["99"]));
    let r = cohort_cases(&s, &q, CohortMode::Common).await.unwrap();
    assert!(r.is_empty());
    assert_eq!(r.count(), 0);
  }

  #[tokio::test]
  async fn filters_narrow_every_member() {
    let s = store();
    let mut q = CohortQuery::new("90").with_peers(by_id(&["91"]));
    q.filters.term = Some(Term(1991));
    let common = common_cases(&s, &q).await.unwrap();
    assert_eq!(*common.cases(), ids(&["1991-003", "1991-004", "1991-005"]));

    q.filters.maj_votes_in = Some(vec![5]);
    let close = common_cases(&s, &q).await.unwrap();
    assert_eq!(*close.cases(), ids(&["1991-004"]));
  }

  #[tokio::test]
  async fn universe_restricts_candidates() {
    let s = store();
    let mut q = CohortQuery::new("90").with_peers(by_id(&["91"]));
    q.universe = Some(ids(&["1991-003", "1991-004"]));
    let agree = cohort_cases(&s, &q, CohortMode::Agree).await.unwrap();
    assert_eq!(*agree.cases(), ids(&["1991-003"]));
  }

  #[tokio::test]
  async fn duplicate_dockets_are_skipped_by_default() {
    let mut dup = vote("90", "WJBrennan", "1992-009", "1");
    dup.docket_id = Some(DocketId::new("1992-009-02"));
    let s = MemoryStore::new().with_votes([dup]);

    let q = CohortQuery::new("90");
    assert!(cohort_cases(&s, &q, CohortMode::Agree).await.unwrap().is_empty());

    let mut all = q.clone();
    all.filters.valid_only = false;
    assert_eq!(cohort_cases(&s, &all, CohortMode::Agree).await.unwrap().count(), 1);
  }

  #[tokio::test]
  async fn summary_scopes_agreement_to_common_cases() {
    let s = store();
    let q = CohortQuery::new("90").with_peers(by_id(&["91"]));
    let summary = agreement_summary(&s, &q).await.unwrap();
    assert_eq!(summary.common.count(), 5);
    assert_eq!(summary.agree.count(), 2);
    assert_eq!(summary.disagree.count(), 2);
    assert_eq!(summary.agreement_rate, Some(0.4));
  }

  #[tokio::test]
  async fn summary_without_common_cases_has_no_rate() {
    let s = store();
    let q = CohortQuery::new("90").with_peers(by_id(&["99"]));
    let summary = agreement_summary(&s, &q).await.unwrap();
    assert!(summary.common.is_empty());
    assert_eq!(summary.agreement_rate, None);
  }
}
