//! Error types for `scotus-core`.
//!
//! Malformed codes and unresolvable references never surface here; they
//! degrade to `None` or to a raw-identifier fallback at the call site.

use thiserror::Error;

use crate::ids::{JusticeId, NaturalCourtId, Term};

#[derive(Debug, Error)]
pub enum Error {
  /// A liberal-share was requested for a justice-term with no valid votes.
  #[error("no valid votes for justice {justice} in term {term}")]
  NoVotes { justice: JusticeId, term: Term },

  #[error("natural court not found: {0}")]
  NaturalCourtNotFound(NaturalCourtId),

  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl Error {
  /// Box a record-store error.
  pub fn store<E>(err: E) -> Self
  where
    E: std::error::Error + Send + Sync + 'static,
  {
    Self::Store(Box::new(err))
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
