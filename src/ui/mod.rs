//! ui
//!
//! User-facing output and prompts.
//!
//! # Responsibilities
//!
//! - [`output`] - Plain-console reporting that respects `--quiet`/`--debug`
//! - [`prompts`] - The confirmation prompt gating the destructive prune
//!
//! Nothing here talks to the container engine or mutates state.

pub mod output;
pub mod prompts;
