//! Common utilities for the Lemur selector engine.
//!
//! This crate provides shared infrastructure used by the other components:
//! - **Warning System** - deduplicated colored terminal output for
//!   degraded-but-tolerated input (e.g. suspicious selector syntax)

pub mod warning;
