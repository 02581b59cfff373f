//! Rendering of a finished [`crate::report::Report`].
//!
//! # Submodules
//!
//! - [`markdown`]: human-readable report with sentiment table and article cards
//! - [`json`]: machine-readable report for piping into other tools
//! - [`audio`]: writes the synthesized spoken summary to disk
//!
//! Reports go to stdout; logs go to stderr so the two never interleave.

pub mod audio;
pub mod json;
pub mod markdown;
