//! ulawkit CLI library.
//!
//! Argument definitions and the `encode` / `decode` commands, kept out of
//! `main.rs` so they can be exercised from tests.

pub mod cli_args;
pub mod commands;
