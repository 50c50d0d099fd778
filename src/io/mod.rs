//! I/O module
//!
//! Handles the user-facing report output.
//!
//! # Components
//!
//! - `report` - Progress and plan lines written to stdout

pub mod report;

pub use report::{plan_line, session_lines, Reporter};
