//! Daily quote reminder scheduling.
//!
//! # Responsibility
//! - Negotiate notification permission with the host platform.
//! - Keep exactly one daily reminder registered per app.
//! - Route incoming notification events to scoped listeners.
//!
//! # Invariants
//! - Cancel-all always completes before a new reminder is registered.
//! - Denied permission and unsupported platforms are silent no-ops.
//! - Platform failures are logged and never propagated to the host UI.

pub mod listeners;
pub mod memory;
pub mod platform;
pub mod scheduler;
pub mod session;
