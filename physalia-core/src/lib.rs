//! Shared primitives and traits for the Physalia structural alignment engine.
//!
//! `physalia-core` provides the foundation the other Physalia crates build on:
//!
//! - **Error types** — [`PhysaliaError`] and [`Result`] for structured error handling
//! - **Traits** — [`Scored`] and [`Summarizable`] for result types

pub mod error;
pub mod traits;

pub use error::{PhysaliaError, Result};
pub use traits::*;
