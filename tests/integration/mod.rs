//! Integration test suite for ccmeta
//!
//! End-to-end tests over real reference directories: the library pipeline
//! through [`ccmeta::metadata::generate`] and the `ccmeta` binary through
//! `assert_cmd`.
//!
//! # Running Integration Tests
//!
//! ```bash
//! cargo test --test integration
//! ```
//!
//! # Test Organization
//!
//! - **generate**: naming, status resolution, conflicts, determinism
//! - **cli**: `generate` / `check` commands, flags, exit codes

mod cli;
mod generate;
