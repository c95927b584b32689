//! Justice — one member of the Court.

use serde::{Deserialize, Serialize};

use crate::ids::JusticeId;

/// A justice record. Much of the biographical data is incomplete in the
/// source dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Justice {
  pub justice:                    JusticeId,
  /// SCDB short name, e.g. `"WJBrennan"`.
  pub justice_name:               Option<String>,
  pub full_name:                  Option<String>,
  pub chief_justice:              Option<bool>,
  pub confirmation_votes_for:     Option<String>,
  pub confirmation_votes_against: Option<String>,
  pub qualifications_score:       Option<f64>,
  pub ideology_score:             Option<f64>,
}

impl Justice {
  pub fn new(justice: impl Into<JusticeId>) -> Self {
    Self {
      justice:                    justice.into(),
      justice_name:               None,
      full_name:                  None,
      chief_justice:              None,
      confirmation_votes_for:     None,
      confirmation_votes_against: None,
      qualifications_score:       None,
      ideology_score:             None,
    }
  }

  /// Full name when one is recorded (the dataset uses `"-"` for none), then
  /// the short name, then the raw id.
  pub fn display_name(&self) -> String {
    self
      .full_name
      .as_deref()
      .filter(|n| !n.is_empty() && *n != "-")
      .or(self.justice_name.as_deref())
      .map_or_else(|| self.justice.to_string(), str::to_owned)
  }
}
