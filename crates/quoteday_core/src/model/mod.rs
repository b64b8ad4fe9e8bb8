//! Domain model for quotes and the read-only catalog.
//!
//! # Responsibility
//! - Define canonical data structures used by selection, favorites and
//!   reminder logic.
//!
//! # Invariants
//! - Every quote is identified by a stable `QuoteId`.
//! - The catalog is immutable and non-empty once constructed.

pub mod catalog;
pub mod quote;
