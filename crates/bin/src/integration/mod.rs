//! Glue between the command line and the library crates.
//!
//! Universe resolution, logging setup and progress reporting live here so
//! `main.rs` only has to deal with commands.

pub(crate) mod logging;
pub(crate) mod progress;
pub(crate) mod sources;
