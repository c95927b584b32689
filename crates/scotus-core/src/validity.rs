//! The "valid" (deduplicated) view of cases and votes.
//!
//! SCDB repeats a consolidated case once per docket, and a case with several
//! legal issues once per issue. Only the first issue of the first docket
//! carries independent vote information, so aggregation skips the rest and
//! each justice has at most one valid vote per case.

use crate::ids::{CaseIssuesId, DocketId};

/// Whether a row with this docket id belongs to the valid view.
///
/// Rows without a docket id are kept. Otherwise the id must end in `-01`.
pub fn is_valid_docket(docket_id: Option<&DocketId>) -> bool {
  match docket_id {
    None => true,
    Some(id) => id.as_str().is_empty() || id.as_str().ends_with("-01"),
  }
}

/// Whether a case-issues id names the first issue of the first docket
/// (`<case>-01-01`). Rows without one are kept.
pub fn is_first_issue(case_issues_id: Option<&CaseIssuesId>) -> bool {
  match case_issues_id {
    None => true,
    Some(id) => id.as_str().is_empty() || id.as_str().ends_with("-01-01"),
  }
}

/// The full row rule used by `valid_only` filters. Store backends that
/// filter in their own query language must apply the same rule.
pub fn is_valid_row(
  docket_id: Option<&DocketId>,
  case_issues_id: Option<&CaseIssuesId>,
) -> bool {
  is_valid_docket(docket_id) && is_first_issue(case_issues_id)
}
