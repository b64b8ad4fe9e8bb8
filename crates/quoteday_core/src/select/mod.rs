//! Quote selection entry points.
//!
//! # Responsibility
//! - Pick quotes from the catalog for the "new quote" flow and reminders.
//! - Filter the catalog by category for list screens.
//!
//! # Invariants
//! - Selection never mutates the catalog.
//! - Every selection call terminates in bounded time.

pub mod random;
