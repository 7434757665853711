//! Core trait definitions for the Physalia ecosystem.
//!
//! These traits define the contracts that result types implement across crates.

/// A type that carries a numeric score (alignment score, fit quality, etc.).
pub trait Scored {
    /// The score value. Higher is better.
    fn score(&self) -> f64;
}

/// A type that can produce a summary of its contents.
pub trait Summarizable {
    /// A one-line summary suitable for display.
    fn summary(&self) -> String;
}
