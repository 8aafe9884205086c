//! User interface components for terminal interaction.
//!
//! Provides result tables and verdicts for the command line, and the
//! progress indicator shown while local files are hashed.
//!
//! # Modules
//!
//! - [`display`]: Result tables, verdicts, report notices
//! - [`progress`]: Progress bar for hashing feedback

pub mod display;
pub mod progress;
