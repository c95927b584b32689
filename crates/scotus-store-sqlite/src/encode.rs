//! Encoding and decoding helpers between domain types and SQLite rows.
//!
//! Dates are stored as `YYYY-MM-DD` text; terms and natural courts as
//! integers; every coded field as the raw text the dataset uses.

use chrono::NaiveDate;
use rusqlite::Row;
use scotus_core::{
  case::Case,
  court::JusticeTerm,
  ids::{CaseId, CaseIssuesId, DocketId, JusticeCode, JusticeId, NaturalCourtId, Term, VoteId},
  justice::Justice,
  vote::Vote,
};

use crate::{Error, Result};

// ─── NaiveDate ───────────────────────────────────────────────────────────────

pub fn encode_date(d: NaiveDate) -> String { d.format("%Y-%m-%d").to_string() }

pub fn decode_date(s: &str) -> Result<NaiveDate> {
  NaiveDate::parse_from_str(s, "%Y-%m-%d")
    .map_err(|e| Error::DateParse(format!("{s:?}: {e}")))
}

// ─── Cases ───────────────────────────────────────────────────────────────────

pub const CASE_COLUMNS: &str = "caseissuesid, caseid, docketid, docket, casename, term, \
   naturalcourt, chief, datedecision, majvotes, minvotes, decisiondirection, \
   weighted_majvotes";

/// A `cases` row before its decision date is parsed.
pub struct RawCase {
  pub case_issues_id:     String,
  pub case_id:            String,
  pub docket_id:          Option<String>,
  pub docket:             Option<String>,
  pub case_name:          Option<String>,
  pub term:               u16,
  pub natural_court:      u32,
  pub chief:              Option<String>,
  pub date_decision:      Option<String>,
  pub maj_votes:          Option<u8>,
  pub min_votes:          Option<u8>,
  pub decision_direction: Option<String>,
  pub weighted_majvotes:  Option<i32>,
}

impl RawCase {
  /// Read a row selected with [`CASE_COLUMNS`].
  pub fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      case_issues_id:     row.get(0)?,
      case_id:            row.get(1)?,
      docket_id:          row.get(2)?,
      docket:             row.get(3)?,
      case_name:          row.get(4)?,
      term:               row.get(5)?,
      natural_court:      row.get(6)?,
      chief:              row.get(7)?,
      date_decision:      row.get(8)?,
      maj_votes:          row.get(9)?,
      min_votes:          row.get(10)?,
      decision_direction: row.get(11)?,
      weighted_majvotes:  row.get(12)?,
    })
  }

  pub fn into_case(self) -> Result<Case> {
    Ok(Case {
      case_issues_id:     CaseIssuesId::new(self.case_issues_id),
      case_id:            CaseId::new(self.case_id),
      docket_id:          self.docket_id.map(DocketId::new),
      docket:             self.docket,
      case_name:          self.case_name,
      term:               Term(self.term),
      natural_court:      NaturalCourtId(self.natural_court),
      chief:              self.chief,
      date_decision:      self.date_decision.as_deref().map(decode_date).transpose()?,
      maj_votes:          self.maj_votes,
      min_votes:          self.min_votes,
      decision_direction: self.decision_direction,
      weighted_majvotes:  self.weighted_majvotes,
    })
  }
}

// ─── Votes ───────────────────────────────────────────────────────────────────

pub const VOTE_COLUMNS: &str = "voteid, caseid, caseissuesid, docketid, casename, justice, \
   justicename, term, naturalcourt, majvotes, minvotes, vote, opinion, direction, \
   majority, decisiondirection, firstagreement, secondagreement";

/// Read a row selected with [`VOTE_COLUMNS`].
pub fn vote_from_row(row: &Row<'_>) -> rusqlite::Result<Vote> {
  Ok(Vote {
    vote_id:            VoteId::new(row.get::<_, String>(0)?),
    case_id:            CaseId::new(row.get::<_, String>(1)?),
    case_issues_id:     row.get::<_, Option<String>>(2)?.map(CaseIssuesId::new),
    docket_id:          row.get::<_, Option<String>>(3)?.map(DocketId::new),
    case_name:          row.get(4)?,
    justice:            JusticeId::new(row.get::<_, String>(5)?),
    justice_name:       row.get(6)?,
    term:               Term(row.get(7)?),
    natural_court:      NaturalCourtId(row.get(8)?),
    maj_votes:          row.get(9)?,
    min_votes:          row.get(10)?,
    vote:               row.get(11)?,
    opinion:            row.get(12)?,
    direction:          row.get(13)?,
    majority:           row.get(14)?,
    decision_direction: row.get(15)?,
    first_agreement:    row.get(16)?,
    second_agreement:   row.get(17)?,
  })
}

// ─── Justices ────────────────────────────────────────────────────────────────

pub const JUSTICE_COLUMNS: &str = "justice, justicename, full_name, chief_justice, \
   confirmation_votes_for, confirmation_votes_against, qualifications_score, \
   ideology_score";

pub fn justice_from_row(row: &Row<'_>) -> rusqlite::Result<Justice> {
  Ok(Justice {
    justice:                    JusticeId::new(row.get::<_, String>(0)?),
    justice_name:               row.get(1)?,
    full_name:                  row.get(2)?,
    chief_justice:              row.get(3)?,
    confirmation_votes_for:     row.get(4)?,
    confirmation_votes_against: row.get(5)?,
    qualifications_score:       row.get(6)?,
    ideology_score:             row.get(7)?,
  })
}

pub const JUSTICE_TERM_COLUMNS: &str = "justiceterm, justice, justicename, term, code, \
   post_mn, post_sd, post_med, post_025, post_975";

pub fn justice_term_from_row(row: &Row<'_>) -> rusqlite::Result<JusticeTerm> {
  Ok(JusticeTerm {
    justice_term: row.get(0)?,
    justice:      JusticeId::new(row.get::<_, String>(1)?),
    justice_name: row.get(2)?,
    term:         Term(row.get(3)?),
    code:         row.get::<_, Option<String>>(4)?.map(JusticeCode::new),
    post_mn:      row.get(5)?,
    post_sd:      row.get(6)?,
    post_med:     row.get(7)?,
    post_025:     row.get(8)?,
    post_975:     row.get(9)?,
  })
}
