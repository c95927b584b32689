//! Core types and the vote-aggregation engine for SCDB adjudication data.
//!
//! This crate is deliberately free of database dependencies. Records are
//! fetched through the [`store::RecordStore`] trait; everything else here is a
//! pure computation over what the store returns.

// We intentionally use native `async fn` in traits (stabilised in Rust 1.75).
// Suppress the advisory lint about `Send` bounds on the returned futures.
#![allow(async_fn_in_trait)]

pub mod aggregate;
pub mod case;
pub mod cohort;
pub mod court;
pub mod error;
pub mod ids;
pub mod justice;
pub mod lookup;
pub mod memory;
pub mod normalize;
pub mod store;
pub mod validity;
pub mod vote;
pub mod weighted;

pub use error::{Error, Result};
