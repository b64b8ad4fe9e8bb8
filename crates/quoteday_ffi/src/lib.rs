//! Flutter bridge crate for QuoteDay.

pub mod api;
