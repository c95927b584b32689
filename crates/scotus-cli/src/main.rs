//! `scotus` — query the Supreme Court Database from the command line.
//!
//! Every subcommand prints pretty JSON on stdout; logs go to stderr.
//!
//! # Usage
//!
//! ```
//! scotus cohort 90 TMarshall --mode agree --majvotes 5
//! scotus agreement 90 91 --natural-court 1604
//! scotus liberal 90 1990
//! scotus weigh --dry-run
//! scotus --store ~/data/scdb.db court-series 1604
//! ```

mod config;

use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand, ValueEnum};
use crate::config::{CliConfig, expand_tilde};
use scotus_core::{
  aggregate,
  cohort::{self, CohortFilters, CohortMode, CohortQuery, JusticeRef},
  ids::{CaseId, JusticeId, NaturalCourtId, Term},
  lookup,
  store::{CaseFilter, RecordStore as _, VoteFilter},
  weighted,
};
use scotus_store_sqlite::SqliteStore;
use serde::Serialize;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

// ─── CLI args ─────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "scotus", version, about = "Vote aggregation over the Supreme Court Database")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "scotus.toml")]
  config: PathBuf,

  /// SQLite database to query; overrides the config file and environment.
  #[arg(long, value_name = "FILE")]
  store: Option<PathBuf>,

  #[command(subcommand)]
  command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
  /// Cases on which every listed justice voted the given way.
  Cohort {
    #[command(flatten)]
    members: Members,
    #[arg(long, value_enum, default_value_t = Mode::Agree)]
    mode:    Mode,
    #[command(flatten)]
    filters: Filters,
  },
  /// Common, agreeing and dissenting cases for a cohort, with the rate.
  Agreement {
    #[command(flatten)]
    members: Members,
    #[command(flatten)]
    filters: Filters,
  },
  /// Share of a justice's valid votes in one term that were liberal.
  Liberal { justice: JusticeId, term: Term },
  /// Liberal share for every term a justice sat.
  LiberalSeries { justice: JusticeId },
  /// Median Martin–Quinn score for each term of a natural court.
  CourtSeries { natural_court: NaturalCourtId },
  /// Ideal-point estimate and liberal share for a justice in one term.
  Profile { justice: JusticeId, term: Term },
  /// Recompute and store weighted majority votes.
  Weigh {
    /// Report what would change without writing.
    #[arg(long)]
    dry_run:       bool,
    #[arg(long)]
    term:          Option<Term>,
    #[arg(long)]
    natural_court: Option<NaturalCourtId>,
  },
  /// "<justice> in <case>" for a justice's vote in a case.
  DescribeVote { justice: JusticeId, case: CaseId },
}

#[derive(Args, Debug)]
struct Members {
  /// Justice id the cohort is anchored on.
  anchor: JusticeId,
  /// Further members: numeric SCDB ids or short names like `WJBrennan`.
  peers:  Vec<String>,
}

#[derive(Args, Debug)]
struct Filters {
  #[arg(long)]
  term:               Option<Term>,
  #[arg(long)]
  natural_court:      Option<NaturalCourtId>,
  /// Allowed majority sizes, comma-separated.
  #[arg(long, value_delimiter = ',')]
  majvotes:           Vec<u8>,
  /// Count consolidated-case duplicates too.
  #[arg(long)]
  include_duplicates: bool,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum Mode {
  Agree,
  Disagree,
  Common,
}

impl From<Mode> for CohortMode {
  fn from(mode: Mode) -> Self {
    match mode {
      Mode::Agree => CohortMode::Agree,
      Mode::Disagree => CohortMode::Disagree,
      Mode::Common => CohortMode::Common,
    }
  }
}

impl Members {
  fn query(&self, filters: &Filters) -> CohortQuery {
    let mut query = CohortQuery::new(self.anchor.clone())
      .with_peers(self.peers.iter().map(|p| justice_ref(p)));
    query.filters = filters.into();
    query
  }
}

impl From<&Filters> for CohortFilters {
  fn from(f: &Filters) -> Self {
    CohortFilters {
      term:          f.term,
      natural_court: f.natural_court,
      maj_votes_in:  (!f.majvotes.is_empty()).then(|| f.majvotes.clone()),
      valid_only:    !f.include_duplicates,
    }
  }
}

/// SCDB justice ids are numeric; anything else is taken as a short name.
fn justice_ref(raw: &str) -> JusticeRef {
  if !raw.is_empty() && raw.bytes().all(|b| b.is_ascii_digit()) {
    JusticeRef::Id(JusticeId::new(raw))
  } else {
    JusticeRef::Name(raw.to_owned())
  }
}

// ─── Entry point ──────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .with_writer(std::io::stderr)
    .init();

  let cli = Cli::parse();

  let cfg = CliConfig::load(&cli.config)?;
  let store_path = expand_tilde(cli.store.as_deref().unwrap_or(&cfg.store_path));

  tracing::debug!(store = %store_path.display(), "opening store");
  let store = SqliteStore::open(&store_path)
    .await
    .with_context(|| format!("failed to open store at {store_path:?}"))?;

  run(&store, cli.command).await
}

async fn run(store: &SqliteStore, command: Command) -> anyhow::Result<()> {
  match command {
    Command::Cohort { members, mode, filters } => {
      let query = members.query(&filters);
      print_json(&cohort::cohort_cases(store, &query, mode.into()).await?)
    }
    Command::Agreement { members, filters } => {
      let query = members.query(&filters);
      print_json(&cohort::agreement_summary(store, &query).await?)
    }
    Command::Liberal { justice, term } => {
      print_json(&aggregate::term_liberal_share(store, &justice, term).await?)
    }
    Command::LiberalSeries { justice } => {
      print_json(&aggregate::liberal_series(store, &justice).await?)
    }
    Command::CourtSeries { natural_court } => {
      print_json(&aggregate::natural_court_series(store, natural_court).await?)
    }
    Command::Profile { justice, term } => {
      print_json(&aggregate::justice_term_profile(store, &justice, term).await?)
    }
    Command::Weigh { dry_run, term, natural_court } => {
      let filter = CaseFilter { term, natural_court, ..Default::default() };
      print_json(&weighted::backfill_weighted_majvotes(store, &filter, dry_run).await?)
    }
    Command::DescribeVote { justice, case } => {
      let filter = VoteFilter {
        justice: Some(justice.clone()),
        case_ids: Some([case.clone()].into_iter().collect()),
        valid_only: true,
        ..Default::default()
      };
      let vote = store
        .find_votes(&filter)
        .await?
        .into_iter()
        .next()
        .with_context(|| format!("no vote by justice {justice} in case {case}"))?;

      #[derive(Serialize)]
      struct Described {
        vote:        String,
        description: String,
      }
      print_json(&Described {
        description: lookup::describe_vote(store, &vote).await?,
        vote:        vote.vote_id.into_inner(),
      })
    }
  }
}

fn print_json(value: &impl Serialize) -> anyhow::Result<()> {
  let json = serde_json::to_string_pretty(value).context("failed to serialise output")?;
  println!("{json}");
  Ok(())
}
