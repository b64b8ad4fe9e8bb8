//! User state stores.
//!
//! # Responsibility
//! - Own mutable per-user state (favorites, preference flags).
//! - Keep presentation/FFI layers decoupled from storage details.

pub mod favorites;
pub mod settings;
