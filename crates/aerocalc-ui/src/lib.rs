//! Terminal UI components for aerocalc.
//!
//! Provides color detection and styled rendering of report lines and
//! headings for console output.

pub mod styles;
pub mod terminal;
