//! Dynamic `WHERE` clause assembly for the filter structs.

use rusqlite::types::Value;

/// Conditions joined with `AND`, with positional parameters numbered in
/// the order they are added.
#[derive(Debug, Default)]
pub struct Where {
  conds:  Vec<String>,
  params: Vec<Value>,
}

impl Where {
  pub fn eq(&mut self, column: &str, value: impl Into<Value>) -> &mut Self {
    self.params.push(value.into());
    self.conds.push(format!("{column} = ?{}", self.params.len()));
    self
  }

  /// `column IN (...)`. An empty list matches nothing.
  pub fn any_of<T: Into<Value>>(
    &mut self,
    column: &str,
    values: impl IntoIterator<Item = T>,
  ) -> &mut Self {
    let mut placeholders = Vec::new();
    for value in values {
      self.params.push(value.into());
      placeholders.push(format!("?{}", self.params.len()));
    }
    if placeholders.is_empty() {
      self.conds.push("0".to_owned());
    } else {
      self
        .conds
        .push(format!("{column} IN ({})", placeholders.join(", ")));
    }
    self
  }

  pub fn raw(&mut self, cond: &str) -> &mut Self {
    self.conds.push(cond.to_owned());
    self
  }

  pub fn clause(&self) -> String {
    if self.conds.is_empty() {
      String::new()
    } else {
      format!(" WHERE {}", self.conds.join(" AND "))
    }
  }

  pub fn into_params(self) -> Vec<Value> { self.params }
}
