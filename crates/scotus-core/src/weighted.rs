//! Weighted majority votes: one signed number combining how lopsided a
//! decision was with its ideological direction.
//!
//! Derivation is pure ([`weighted_majvotes`]). Persisting the result is a
//! separate, explicit step ([`backfill_weighted_majvotes`]).

use serde::Serialize;
use tracing::{info, warn};

use crate::{
  Error, Result,
  case::Case,
  normalize::Direction,
  store::{CaseFilter, RecordStore, RecordWriter},
};

/// Seats on a full bench.
pub const FULL_BENCH: u8 = 9;

/// Decisiveness for an incomplete bench, indexed by minority votes. Absent
/// justices are counted with the majority; four dissenters on a short bench
/// weigh nothing.
const INCOMPLETE_BENCH_WEIGHTS: [u8; 5] = [9, 8, 7, 6, 0];

/// Unsigned decisiveness of a tally. `None` when an incomplete bench reports
/// more minority votes than the table covers.
pub fn decisiveness(maj_votes: u8, min_votes: u8) -> Option<u8> {
  if maj_votes.saturating_add(min_votes) < FULL_BENCH {
    INCOMPLETE_BENCH_WEIGHTS.get(usize::from(min_votes)).copied()
  } else {
    Some(maj_votes)
  }
}

/// Signed weight for a case: positive when conservative, negative when
/// liberal, zero when unspecifiable.
///
/// `None` when the direction code is missing or unknown, or when the vote
/// counts needed for a directional case are missing or out of range.
pub fn weighted_majvotes(case: &Case) -> Option<i32> {
  match case.decision_direction()? {
    Direction::Unspecifiable => Some(0),
    direction => {
      let (maj, min) = (case.maj_votes?, case.min_votes?);
      let Some(magnitude) = decisiveness(maj, min) else {
        warn!(
          case = %case.case_issues_id,
          maj, min,
          "vote counts outside the incomplete-bench table",
        );
        return None;
      };
      Some(direction.sign() * i32::from(magnitude))
    }
  }
}

// ─── Persistence ─────────────────────────────────────────────────────────────

/// Outcome of [`backfill_weighted_majvotes`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BackfillReport {
  pub examined: usize,
  /// Rows whose stored weight differed from the derived one (written unless
  /// `dry_run`).
  pub updated:  usize,
  /// Rows whose derived weight is unset.
  pub unset:    usize,
  pub dry_run:  bool,
}

/// Recompute the weight of every case matching `filter` and write the ones
/// that changed.
pub async fn backfill_weighted_majvotes<S>(
  store: &S,
  filter: &CaseFilter,
  dry_run: bool,
) -> Result<BackfillReport>
where
  S: RecordStore + RecordWriter,
{
  let cases = RecordStore::find_cases(store, filter)
    .await
    .map_err(Error::store)?;

  let mut report = BackfillReport { dry_run, ..Default::default() };
  for case in &cases {
    report.examined += 1;
    let weight = weighted_majvotes(case);
    if weight.is_none() {
      report.unset += 1;
    }
    if weight == case.weighted_majvotes {
      continue;
    }
    report.updated += 1;
    if !dry_run {
      store
        .set_weighted_majvotes(&case.case_issues_id, weight)
        .await
        .map_err(Error::store)?;
    }
  }

  info!(
    examined = report.examined,
    updated = report.updated,
    unset = report.unset,
    dry_run,
    "weighted majority backfill finished",
  );
  Ok(report)
}
