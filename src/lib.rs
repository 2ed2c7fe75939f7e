//! `gemrxiv` library crate.
//!
//! Finds preprints that collect downloads quickly relative to how long they
//! have been online. The binary is a thin wrapper so the whole pipeline can be
//! driven from tests with a fake HTTP layer and a fixed reference date.

pub mod app;
pub mod cli;
pub mod data;
pub mod domain;
pub mod error;
pub mod report;
