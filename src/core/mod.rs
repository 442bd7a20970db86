//! Core components of the `market-pulse` crate.
//!
//! This module contains the foundational building blocks of the library, including:
//! - The main [`PulseClient`] and its builder.
//! - The primary [`PulseError`] type.
//! - The [`Published`] state container every aggregator exposes.
//! - Internal networking and shared wire helpers.

/// The main client (`PulseClient`), builder, and configuration.
pub mod client;
/// The primary error type (`PulseError`) for the crate.
pub mod error;
/// Subscribe/notify state container.
pub mod state;

pub(crate) mod net;
pub(crate) mod wire;

// convenient re-exports so most code can just `use crate::core::PulseClient`
pub use client::{PulseClient, PulseClientBuilder};
pub use error::PulseError;
pub use state::Published;
pub(crate) use state::InFlight;
