//! Configuration for the `scotus` binary.
//!
//! Sources, lowest precedence first: built-in defaults, the optional TOML
//! file, then `SCOTUS_*` environment variables (e.g. `SCOTUS_STORE_PATH`).

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct CliConfig {
  /// SQLite database holding the SCDB tables.
  #[serde(default = "default_store_path")]
  pub store_path: PathBuf,
}

fn default_store_path() -> PathBuf { PathBuf::from("scotus.db") }

impl CliConfig {
  pub fn load(file: &Path) -> anyhow::Result<Self> {
    let settings = config::Config::builder()
      .add_source(config::File::from(file).required(false))
      .add_source(config::Environment::with_prefix("SCOTUS"))
      .build()
      .context("failed to read config file")?;

    settings
      .try_deserialize()
      .context("failed to deserialise CliConfig")
  }
}

/// Expand a leading `~` to the user's home directory.
pub fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  if let Some(rest) = s.strip_prefix("~/")
    && let Ok(home) = std::env::var("HOME")
  {
    return PathBuf::from(home).join(rest);
  }
  path.to_path_buf()
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn missing_file_falls_back_to_default() {
    let cfg = CliConfig::load(Path::new("does-not-exist.toml")).unwrap();
    if std::env::var_os("SCOTUS_STORE_PATH").is_none() {
      assert_eq!(cfg.store_path, PathBuf::from("scotus.db"));
    }
  }

  #[test]
  fn tilde_only_expands_as_a_prefix() {
    assert_eq!(expand_tilde(Path::new("data/~/x.db")), PathBuf::from("data/~/x.db"));
    if let Ok(home) = std::env::var("HOME") {
      assert_eq!(expand_tilde(Path::new("~/x.db")), PathBuf::from(home).join("x.db"));
    }
  }
}
