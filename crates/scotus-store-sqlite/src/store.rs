//! [`SqliteStore`] — the SQLite implementation of [`RecordStore`] and
//! [`RecordWriter`].

use std::path::Path;

use rusqlite::OptionalExtension as _;
use scotus_core::{
  case::Case,
  court::{CourtTerm, JusticeTerm, NaturalCourt},
  ids::{CaseIssuesId, JusticeCode, JusticeId, NaturalCourtId, Term},
  justice::Justice,
  store::{CaseFilter, JusticeTermFilter, RecordStore, RecordWriter, VoteFilter},
  vote::Vote,
};
use tracing::debug;

use crate::{
  Result,
  encode::{
    CASE_COLUMNS, JUSTICE_COLUMNS, JUSTICE_TERM_COLUMNS, RawCase, VOTE_COLUMNS,
    encode_date, justice_from_row, justice_term_from_row, vote_from_row,
  },
  query::Where,
  schema::{SCHEMA, VALID_ROW},
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A record store backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  // ── Seeding ───────────────────────────────────────────────────────────────
  //
  // Loading SCDB exports is the host's job; these inserts are the primitives
  // a loader (or a test) builds on.

  pub async fn insert_natural_court(&self, court: &NaturalCourt) -> Result<()> {
    let id    = court.natural_court.0;
    let chief = court.chief.clone();

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO naturalcourts (naturalcourt, chief) VALUES (?1, ?2)",
          rusqlite::params![id, chief],
        )?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  /// Insert a court term and its per-justice scores in one transaction.
  pub async fn insert_court_term(&self, court_term: &CourtTerm) -> Result<()> {
    let ct = court_term.clone();

    self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        tx.execute(
          "INSERT INTO courts (term, med, med_sd, min, max) VALUES (?1, ?2, ?3, ?4, ?5)",
          rusqlite::params![ct.term.0, ct.median, ct.median_sd, ct.min, ct.max],
        )?;
        {
          let mut stmt = tx.prepare(
            "INSERT INTO court_term_scores (term, justice_code, score) VALUES (?1, ?2, ?3)",
          )?;
          for (code, score) in &ct.justice_scores {
            stmt.execute(rusqlite::params![ct.term.0, code.as_str(), score])?;
          }
        }
        tx.commit()?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  pub async fn insert_case(&self, case: &Case) -> Result<()> {
    let c             = case.clone();
    let date_decision = c.date_decision.map(encode_date);

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO cases (
             caseissuesid, caseid, docketid, docket, casename, term, naturalcourt,
             chief, datedecision, majvotes, minvotes, decisiondirection,
             weighted_majvotes
           ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13)",
          rusqlite::params![
            c.case_issues_id.as_str(),
            c.case_id.as_str(),
            c.docket_id.as_ref().map(|d| d.as_str()),
            c.docket,
            c.case_name,
            c.term.0,
            c.natural_court.0,
            c.chief,
            date_decision,
            c.maj_votes,
            c.min_votes,
            c.decision_direction,
            c.weighted_majvotes,
          ],
        )?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  pub async fn insert_vote(&self, vote: &Vote) -> Result<()> {
    let v = vote.clone();

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO votes (
             voteid, caseid, caseissuesid, docketid, casename, justice, justicename,
             term, naturalcourt, majvotes, minvotes, vote, opinion, direction,
             majority, decisiondirection, firstagreement, secondagreement
           ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14,
                     ?15, ?16, ?17, ?18)",
          rusqlite::params![
            v.vote_id.as_str(),
            v.case_id.as_str(),
            v.case_issues_id.as_ref().map(|c| c.as_str()),
            v.docket_id.as_ref().map(|d| d.as_str()),
            v.case_name,
            v.justice.as_str(),
            v.justice_name,
            v.term.0,
            v.natural_court.0,
            v.maj_votes,
            v.min_votes,
            v.vote,
            v.opinion,
            v.direction,
            v.majority,
            v.decision_direction,
            v.first_agreement,
            v.second_agreement,
          ],
        )?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  pub async fn insert_justice(&self, justice: &Justice) -> Result<()> {
    let j = justice.clone();

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO scotus_justices (
             justice, justicename, full_name, chief_justice, confirmation_votes_for,
             confirmation_votes_against, qualifications_score, ideology_score
           ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
          rusqlite::params![
            j.justice.as_str(),
            j.justice_name,
            j.full_name,
            j.chief_justice,
            j.confirmation_votes_for,
            j.confirmation_votes_against,
            j.qualifications_score,
            j.ideology_score,
          ],
        )?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  pub async fn insert_justice_term(&self, justice_term: &JusticeTerm) -> Result<()> {
    let jt = justice_term.clone();

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO justice_terms (
             justiceterm, justice, justicename, term, code,
             post_mn, post_sd, post_med, post_025, post_975
           ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
          rusqlite::params![
            jt.justice_term,
            jt.justice.as_str(),
            jt.justice_name,
            jt.term.0,
            jt.code.as_ref().map(|c| c.as_str()),
            jt.post_mn,
            jt.post_sd,
            jt.post_med,
            jt.post_025,
            jt.post_975,
          ],
        )?;
        Ok(())
      })
      .await?;
    Ok(())
  }
}

// ─── RecordStore impl ────────────────────────────────────────────────────────

impl RecordStore for SqliteStore {
  type Error = crate::Error;

  async fn find_votes(&self, filter: &VoteFilter) -> Result<Vec<Vote>> {
    let mut w = Where::default();
    if let Some(j) = &filter.justice {
      w.eq("justice", j.as_str().to_owned());
    }
    if let Some(name) = &filter.justice_name {
      w.eq("justicename", name.clone());
    }
    if let Some(term) = filter.term {
      w.eq("term", term.0);
    }
    if let Some(nc) = filter.natural_court {
      w.eq("naturalcourt", nc.0);
    }
    if let Some(maj) = &filter.maj_votes_in {
      w.any_of("majvotes", maj.iter().copied());
    }
    if let Some(codes) = &filter.vote_in {
      w.any_of("vote", codes.iter().cloned());
    }
    if let Some(codes) = &filter.majority_in {
      w.any_of("majority", codes.iter().cloned());
    }
    if let Some(direction) = &filter.direction {
      w.eq("direction", direction.clone());
    }
    if filter.valid_only {
      w.raw(VALID_ROW);
    }

    let sql    = format!("SELECT {VOTE_COLUMNS} FROM votes{}", w.clause());
    let params = w.into_params();

    let mut votes: Vec<Vote> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt
          .query_map(rusqlite::params_from_iter(params.iter()), vote_from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    // Case universes can run to thousands of ids, past what a single IN list
    // should carry; the justice/term conditions already bound the row count.
    if let Some(ids) = &filter.case_ids {
      votes.retain(|v| ids.contains(&v.case_id));
    }

    debug!(rows = votes.len(), "find_votes");
    Ok(votes)
  }

  async fn find_cases(&self, filter: &CaseFilter) -> Result<Vec<Case>> {
    let mut w = Where::default();
    if let Some(id) = &filter.case_id {
      w.eq("caseid", id.as_str().to_owned());
    }
    if let Some(term) = filter.term {
      w.eq("term", term.0);
    }
    if let Some(nc) = filter.natural_court {
      w.eq("naturalcourt", nc.0);
    }
    if let Some(maj) = &filter.maj_votes_in {
      w.any_of("majvotes", maj.iter().copied());
    }
    if filter.valid_only {
      w.raw(VALID_ROW);
    }

    let sql    = format!("SELECT {CASE_COLUMNS} FROM cases{}", w.clause());
    let params = w.into_params();

    let raws: Vec<RawCase> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt
          .query_map(rusqlite::params_from_iter(params.iter()), RawCase::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawCase::into_case).collect()
  }

  async fn find_justices(&self, id: &JusticeId) -> Result<Vec<Justice>> {
    let id_str = id.as_str().to_owned();

    let justices = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&format!(
          "SELECT {JUSTICE_COLUMNS} FROM scotus_justices WHERE justice = ?1"
        ))?;
        let rows = stmt
          .query_map(rusqlite::params![id_str], justice_from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;
    Ok(justices)
  }

  async fn find_natural_court(&self, id: NaturalCourtId) -> Result<Option<NaturalCourt>> {
    let court = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              "SELECT naturalcourt, chief FROM naturalcourts WHERE naturalcourt = ?1",
              rusqlite::params![id.0],
              |row| {
                Ok(NaturalCourt {
                  natural_court: NaturalCourtId(row.get(0)?),
                  chief:         row.get(1)?,
                })
              },
            )
            .optional()?,
        )
      })
      .await?;
    Ok(court)
  }

  async fn natural_court_terms(&self, id: NaturalCourtId) -> Result<Vec<Term>> {
    let terms = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(
          "SELECT DISTINCT term FROM cases WHERE naturalcourt = ?1 ORDER BY term",
        )?;
        let rows = stmt
          .query_map(rusqlite::params![id.0], |row| Ok(Term(row.get(0)?)))?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;
    Ok(terms)
  }

  async fn find_court_terms(&self, terms: &[Term]) -> Result<Vec<CourtTerm>> {
    if terms.is_empty() {
      return Ok(Vec::new());
    }

    let mut w = Where::default();
    w.any_of("term", terms.iter().map(|t| t.0));
    let clause = w.clause();
    let params = w.into_params();

    let court_terms = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&format!(
          "SELECT term, med, med_sd, min, max FROM courts{clause}"
        ))?;
        let mut court_terms = stmt
          .query_map(rusqlite::params_from_iter(params.iter()), |row| {
            let mut ct = CourtTerm::new(Term(row.get(0)?));
            ct.median    = row.get(1)?;
            ct.median_sd = row.get(2)?;
            ct.min       = row.get(3)?;
            ct.max       = row.get(4)?;
            Ok(ct)
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;

        let mut stmt = conn.prepare(&format!(
          "SELECT term, justice_code, score FROM court_term_scores{clause}"
        ))?;
        let scores = stmt
          .query_map(rusqlite::params_from_iter(params.iter()), |row| {
            Ok((
              Term(row.get(0)?),
              JusticeCode::new(row.get::<_, String>(1)?),
              row.get::<_, f64>(2)?,
            ))
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;

        for (term, code, score) in scores {
          if let Some(ct) = court_terms.iter_mut().find(|ct| ct.term == term) {
            ct.justice_scores.insert(code, score);
          }
        }
        Ok(court_terms)
      })
      .await?;
    Ok(court_terms)
  }

  async fn find_justice_terms(&self, filter: &JusticeTermFilter) -> Result<Vec<JusticeTerm>> {
    let mut w = Where::default();
    if let Some(j) = &filter.justice {
      w.eq("justice", j.as_str().to_owned());
    }
    if let Some(term) = filter.term {
      w.eq("term", term.0);
    }
    let sql    = format!("SELECT {JUSTICE_TERM_COLUMNS} FROM justice_terms{}", w.clause());
    let params = w.into_params();

    let rows = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt
          .query_map(rusqlite::params_from_iter(params.iter()), justice_term_from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;
    Ok(rows)
  }
}

// ─── RecordWriter impl ───────────────────────────────────────────────────────

impl RecordWriter for SqliteStore {
  type Error = crate::Error;

  async fn set_weighted_majvotes(&self, case: &CaseIssuesId, value: Option<i32>) -> Result<bool> {
    let id_str = case.as_str().to_owned();

    let changed = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          "UPDATE cases SET weighted_majvotes = ?2 WHERE caseissuesid = ?1",
          rusqlite::params![id_str, value],
        )?)
      })
      .await?;
    Ok(changed > 0)
  }
}
