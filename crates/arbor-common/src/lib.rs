//! Common utilities for the Arbor tree-query engine.
//!
//! This crate provides shared infrastructure used by the query core and
//! every tree backend:
//! - **Warning System** - colored terminal output for lossy conversions
//!   and inconsistent backend data

pub mod warning;
