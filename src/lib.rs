//! Stackup - a deployment helper for the subscriptions demo platform
//!
//! Stackup is a single-binary tool that builds the platform's service images,
//! optionally pushes them to a registry, and brings up the two compose stacks
//! ("requirements" first, then "apps") with a stabilization delay in between.
//! It also knows how to tear the stacks down again and, on request, prune
//! unused engine resources.
//!
//! # Architecture
//!
//! The codebase follows a strict layered architecture:
//!
//! - [`cli`] - Command-line interface layer (parses flags, delegates to the pipeline)
//! - [`pipeline`] - Sequential build / deploy / teardown orchestration
//! - [`core`] - Domain types, deploy configuration, and settings
//! - [`docker`] - Single interface to the container engine CLI
//! - [`ui`] - Output and prompt utilities
//!
//! # Invariants
//!
//! 1. Every container-engine invocation flows through [`docker`]
//! 2. The deploy configuration is built once per run and never mutated
//! 3. A build failure aborts the run before any deploy step executes
//! 4. The destructive prune never runs without explicit confirmation

pub mod cli;
pub mod core;
pub mod docker;
pub mod pipeline;
pub mod ui;
