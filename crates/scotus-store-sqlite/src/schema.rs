//! SQL schema for the SCOTUS SQLite store.
//!
//! Executed once at connection startup. Future migrations will be gated on
//! `PRAGMA user_version`.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;
PRAGMA foreign_keys = ON;

CREATE TABLE IF NOT EXISTS naturalcourts (
    naturalcourt INTEGER PRIMARY KEY,
    chief        TEXT
);

CREATE TABLE IF NOT EXISTS courts (
    term   INTEGER PRIMARY KEY,
    med    REAL,
    med_sd REAL,
    min    REAL,
    max    REAL
);

-- One row per justice per term, in place of one column per justice.
CREATE TABLE IF NOT EXISTS court_term_scores (
    term         INTEGER NOT NULL REFERENCES courts(term),
    justice_code TEXT    NOT NULL,
    score        REAL    NOT NULL,
    PRIMARY KEY (term, justice_code)
);

CREATE TABLE IF NOT EXISTS cases (
    caseissuesid      TEXT PRIMARY KEY,
    caseid            TEXT    NOT NULL,
    docketid          TEXT,
    docket            TEXT,
    casename          TEXT,
    term              INTEGER NOT NULL,
    naturalcourt      INTEGER NOT NULL,
    chief             TEXT,
    datedecision      TEXT,            -- YYYY-MM-DD
    majvotes          INTEGER,
    minvotes          INTEGER,
    decisiondirection TEXT,            -- '1' | '2' | '3' | other
    weighted_majvotes INTEGER          -- derived; written only by the backfill
);

-- caseid is not a foreign key: vote rows may reference cases that are absent.
CREATE TABLE IF NOT EXISTS votes (
    voteid            TEXT PRIMARY KEY,
    caseid            TEXT    NOT NULL,
    caseissuesid      TEXT,
    docketid          TEXT,
    casename          TEXT,
    justice           TEXT    NOT NULL,
    justicename       TEXT    NOT NULL,
    term              INTEGER NOT NULL,
    naturalcourt      INTEGER NOT NULL,
    majvotes          INTEGER,
    minvotes          INTEGER,
    vote              TEXT,
    opinion           TEXT,
    direction         TEXT,
    majority          TEXT,
    decisiondirection TEXT,
    firstagreement    TEXT,
    secondagreement   TEXT
);

CREATE TABLE IF NOT EXISTS scotus_justices (
    justice                    TEXT PRIMARY KEY,
    justicename                TEXT,
    full_name                  TEXT,
    chief_justice              INTEGER,
    confirmation_votes_for     TEXT,
    confirmation_votes_against TEXT,
    qualifications_score       REAL,
    ideology_score             REAL
);

CREATE TABLE IF NOT EXISTS justice_terms (
    justiceterm TEXT PRIMARY KEY,
    justice     TEXT    NOT NULL,
    justicename TEXT,
    term        INTEGER NOT NULL,
    code        TEXT,
    post_mn     REAL,
    post_sd     REAL,
    post_med    REAL,
    post_025    REAL,
    post_975    REAL
);

CREATE INDEX IF NOT EXISTS cases_caseid_idx       ON cases(caseid);
CREATE INDEX IF NOT EXISTS cases_naturalcourt_idx ON cases(naturalcourt);
CREATE INDEX IF NOT EXISTS cases_term_idx         ON cases(term);
CREATE INDEX IF NOT EXISTS votes_justice_idx      ON votes(justice);
CREATE INDEX IF NOT EXISTS votes_justicename_idx  ON votes(justicename);
CREATE INDEX IF NOT EXISTS votes_caseid_idx       ON votes(caseid);
CREATE INDEX IF NOT EXISTS votes_term_idx         ON votes(term);
CREATE INDEX IF NOT EXISTS votes_naturalcourt_idx ON votes(naturalcourt);
CREATE INDEX IF NOT EXISTS justice_terms_idx      ON justice_terms(justice, term);

PRAGMA user_version = 1;
";

/// SQL form of `scotus_core::validity::is_valid_row`. Both `cases` and
/// `votes` carry the two columns it reads.
pub const VALID_ROW: &str = "((docketid IS NULL OR docketid = '' OR docketid LIKE '%-01') \
   AND (caseissuesid IS NULL OR caseissuesid = '' OR caseissuesid LIKE '%-01-01'))";
