//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - source selection and entry limits (`ApiVersion`, `EntryLimits`)
//! - listing results before enrichment (`Candidate`, `ArticleMetrics`)
//! - ranked output rows (`ArticleStat`, `RankedResults`, `RunOutcome`)

pub mod types;

pub use types::*;
