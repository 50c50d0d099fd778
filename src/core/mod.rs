//! Core business logic module
//!
//! This module contains the pure balancing components:
//! - `currency` - Conversion between display strings and minor units
//! - `session_builder` - Validation of scraped rows into a session
//! - `balancing` - Computation of the fillup plan

pub mod balancing;
pub mod currency;
pub mod session_builder;

pub use balancing::{missing_amount, plan_transfers, total_required};
pub use currency::{CurrencyCodec, CurrencyLocale};
pub use session_builder::{SelectionTracking, SessionBuilder, SessionSettings};
