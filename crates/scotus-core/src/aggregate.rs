//! Per-justice and per-court roll-ups: liberal-vote shares and Martin–Quinn
//! series.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::{
  Error, Result,
  court::JusticeTerm,
  ids::{JusticeId, NaturalCourtId, Term},
  justice::Justice,
  lookup::{self, Resolution},
  normalize::Direction,
  store::{JusticeTermFilter, RecordStore, VoteFilter},
  vote::Vote,
};

// ─── Liberal share ───────────────────────────────────────────────────────────

/// Liberal votes out of all votes considered.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LiberalShare {
  pub liberal_count: usize,
  pub total_count:   usize,
  /// `liberal_count / total_count`, in `[0, 1]`.
  pub pct:           f64,
}

impl LiberalShare {
  /// `None` when there are no votes, so the share is never NaN.
  pub fn from_votes<'a>(votes: impl IntoIterator<Item = &'a Vote>) -> Option<Self> {
    let (liberal_count, total_count) =
      votes.into_iter().fold((0, 0), |(liberal, total), vote| {
        let is_liberal = vote.direction() == Some(Direction::Liberal);
        (liberal + usize::from(is_liberal), total + 1)
      });
    (total_count > 0).then(|| Self {
      liberal_count,
      total_count,
      pct: liberal_count as f64 / total_count as f64,
    })
  }
}

/// Share of a justice's valid votes in one term that were liberal.
pub async fn term_liberal_share<S: RecordStore>(
  store: &S,
  justice: &JusticeId,
  term: Term,
) -> Result<LiberalShare> {
  let filter = VoteFilter {
    justice: Some(justice.clone()),
    term: Some(term),
    valid_only: true,
    ..Default::default()
  };
  let votes = store.find_votes(&filter).await.map_err(Error::store)?;
  LiberalShare::from_votes(&votes).ok_or_else(|| Error::NoVotes {
    justice: justice.clone(),
    term,
  })
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TermLiberalShare {
  pub term:  Term,
  #[serde(flatten)]
  pub share: LiberalShare,
}

/// [`term_liberal_share`] for every term the justice has valid votes in,
/// ascending by term.
pub async fn liberal_series<S: RecordStore>(
  store: &S,
  justice: &JusticeId,
) -> Result<Vec<TermLiberalShare>> {
  let filter = VoteFilter {
    justice: Some(justice.clone()),
    valid_only: true,
    ..Default::default()
  };
  let votes = store.find_votes(&filter).await.map_err(Error::store)?;

  let mut by_term: BTreeMap<Term, Vec<&Vote>> = BTreeMap::new();
  for vote in &votes {
    by_term.entry(vote.term).or_default().push(vote);
  }

  Ok(
    by_term
      .into_iter()
      .filter_map(|(term, votes)| {
        LiberalShare::from_votes(votes).map(|share| TermLiberalShare { term, share })
      })
      .collect(),
  )
}

// ─── Martin–Quinn series ─────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TermScore {
  pub term:   Term,
  /// Median justice's ideal point that term.
  pub median: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NaturalCourtSeries {
  pub natural_court: NaturalCourtId,
  pub chief:         Option<String>,
  /// Ascending by term; terms without a court-term row are omitted.
  pub terms:         Vec<TermScore>,
}

pub async fn natural_court_series<S: RecordStore>(
  store: &S,
  natural_court: NaturalCourtId,
) -> Result<NaturalCourtSeries> {
  let court = store
    .find_natural_court(natural_court)
    .await
    .map_err(Error::store)?
    .ok_or(Error::NaturalCourtNotFound(natural_court))?;

  let terms = store
    .natural_court_terms(natural_court)
    .await
    .map_err(Error::store)?;
  let mut court_terms = store.find_court_terms(&terms).await.map_err(Error::store)?;
  court_terms.sort_by_key(|ct| ct.term);

  Ok(NaturalCourtSeries {
    natural_court,
    chief: court.chief,
    terms: court_terms
      .into_iter()
      .map(|ct| TermScore { term: ct.term, median: ct.median })
      .collect(),
  })
}

// ─── Justice-term profile ────────────────────────────────────────────────────

/// Everything known about one justice in one term.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JusticeTermProfile {
  pub justice:      Resolution<Justice>,
  pub term:         Term,
  /// Posterior ideal-point estimate, if recorded.
  pub justice_term: Option<JusticeTerm>,
  /// `None` when the justice cast no valid votes that term.
  pub liberal:      Option<LiberalShare>,
}

pub async fn justice_term_profile<S: RecordStore>(
  store: &S,
  justice: &JusticeId,
  term: Term,
) -> Result<JusticeTermProfile> {
  let filter = JusticeTermFilter { justice: Some(justice.clone()), term: Some(term) };
  let justice_term = store
    .find_justice_terms(&filter)
    .await
    .map_err(Error::store)?
    .into_iter()
    .next();

  let liberal = match term_liberal_share(store, justice, term).await {
    Ok(share) => Some(share),
    Err(Error::NoVotes { .. }) => None,
    Err(e) => return Err(e),
  };

  Ok(JusticeTermProfile {
    justice: lookup::resolve_justice(store, justice).await?,
    term,
    justice_term,
    liberal,
  })
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::{
    case::Case,
    court::{CourtTerm, NaturalCourt},
    ids::{DocketId, JusticeCode},
    memory::MemoryStore,
  };

  const NC: NaturalCourtId = NaturalCourtId(1603);

  fn vote(n: usize, term: u16, direction: &str) -> Vote {
    let mut v = Vote::new(
      format!("v{n}"),
      format!("{term}-{n:03}"),
      "90",
      "WJBrennan",
      Term(term),
      NC,
    );
    v.direction = Some(direction.into());
    v
  }

  #[test]
  fn share_of_no_votes_is_none() {
    assert_eq!(LiberalShare::from_votes(std::iter::empty::<&Vote>()), None);
  }

  #[tokio::test]
  async fn three_of_ten_liberal() {
    let votes = (0..10).map(|n| vote(n, 1990, if n < 3 { "2" } else { "1" }));
    let store = MemoryStore::new().with_votes(votes);

    let share = term_liberal_share(&store, &JusticeId::new("90"), Term(1990))
      .await
      .unwrap();
    assert_eq!(share, LiberalShare { liberal_count: 3, total_count: 10, pct: 0.3 });
  }

  #[tokio::test]
  async fn duplicates_and_other_terms_are_excluded() {
    let mut dup = vote(20, 1990, "2");
    dup.docket_id = Some(DocketId::new("1990-020-02"));
    let store = MemoryStore::new().with_votes([
      vote(1, 1990, "2"),
      vote(2, 1990, "1"),
      vote(3, 1991, "2"),
      dup,
    ]);

    let share = term_liberal_share(&store, &JusticeId::new("90"), Term(1990))
      .await
      .unwrap();
    assert_eq!(share.total_count, 2);
    assert_eq!(share.liberal_count, 1);
    assert_eq!(share.pct, 0.5);
  }

  #[tokio::test]
  async fn multi_issue_case_counts_once() {
    let issue_vote = |n: usize, issue: &str, direction: &str| {
      let mut v = vote(n, 1990, direction);
      v.case_id = "1990-001".into();
      v.docket_id = Some(DocketId::new("1990-001-01"));
      v.case_issues_id = Some(format!("1990-001-01-{issue}").into());
      v
    };
    let store =
      MemoryStore::new().with_votes([issue_vote(1, "01", "2"), issue_vote(2, "02", "1")]);

    let share = term_liberal_share(&store, &JusticeId::new("90"), Term(1990))
      .await
      .unwrap();
    assert_eq!(share, LiberalShare { liberal_count: 1, total_count: 1, pct: 1.0 });
  }

  #[tokio::test]
  async fn zero_votes_is_a_defined_error() {
    let store = MemoryStore::new().with_votes([vote(1, 1990, "2")]);
    let err = term_liberal_share(&store, &JusticeId::new("90"), Term(1995))
      .await
      .unwrap_err();
    assert!(matches!(err, Error::NoVotes { term: Term(1995), .. }));
  }

  #[tokio::test]
  async fn unknown_direction_counts_towards_total_only() {
    let store = MemoryStore::new().with_votes([vote(1, 1990, "2"), vote(2, 1990, "")]);
    let share = term_liberal_share(&store, &JusticeId::new("90"), Term(1990))
      .await
      .unwrap();
    assert_eq!((share.liberal_count, share.total_count), (1, 2));
  }

  #[tokio::test]
  async fn series_is_ascending_by_term() {
    let store = MemoryStore::new().with_votes([
      vote(1, 1991, "2"),
      vote(2, 1989, "1"),
      vote(3, 1991, "1"),
      vote(4, 1990, "2"),
    ]);
    let series = liberal_series(&store, &JusticeId::new("90")).await.unwrap();
    let terms: Vec<_> = series.iter().map(|s| s.term).collect();
    assert_eq!(terms, vec![Term(1989), Term(1990), Term(1991)]);
    assert_eq!(series[2].share.pct, 0.5);
  }

  fn court_term(term: u16, median: f64) -> CourtTerm {
    let mut ct = CourtTerm::new(Term(term));
    ct.median = Some(median);
    ct.justice_scores.insert(JusticeCode::new("brennan"), -2.5);
    ct
  }

  #[tokio::test]
  async fn natural_court_series_follows_case_terms() {
    let store = MemoryStore::new()
      .with_natural_courts([NaturalCourt { natural_court: NC, chief: Some("Rehnquist".into()) }])
      .with_cases([
        Case::new("a", "1991-001", Term(1991), NC),
        Case::new("b", "1990-001", Term(1990), NC),
        Case::new("c", "1992-001", Term(1992), NaturalCourtId(1604)),
      ])
      .with_court_terms([court_term(1992, 0.9), court_term(1991, 0.4), court_term(1990, 0.1)]);

    let series = natural_court_series(&store, NC).await.unwrap();
    assert_eq!(series.chief.as_deref(), Some("Rehnquist"));
    assert_eq!(
      series.terms,
      vec![
        TermScore { term: Term(1990), median: Some(0.1) },
        TermScore { term: Term(1991), median: Some(0.4) },
      ]
    );
  }

  #[tokio::test]
  async fn unknown_natural_court_is_an_error() {
    let err = natural_court_series(&MemoryStore::new(), NC).await.unwrap_err();
    assert!(matches!(err, Error::NaturalCourtNotFound(NaturalCourtId(1603))));
  }

  #[tokio::test]
  async fn profile_without_votes_has_no_share() {
    let store = MemoryStore::new().with_justices([Justice::new("90")]);
    let profile = justice_term_profile(&store, &JusticeId::new("90"), Term(1990))
      .await
      .unwrap();
    assert!(profile.liberal.is_none());
    assert!(profile.justice_term.is_none());
    assert!(profile.justice.record().is_some());
  }
}
