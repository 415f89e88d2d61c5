//! Core logic for fixbot: link rewriting and permission-gated moderation.
//!
//! This crate is framework-agnostic. Telegram lives behind the `ChatPort`
//! trait, implemented in the adapter crate.

pub mod audit;
pub mod config;
pub mod dispatch;
pub mod domain;
pub mod errors;
pub mod links;
pub mod logging;
pub mod messaging;
pub mod moderation;
pub mod permissions;
pub mod spark;

#[cfg(test)]
mod testing;

pub use errors::{Error, Result};
