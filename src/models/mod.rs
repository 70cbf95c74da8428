//! Parsed value types derived from engine payloads.

pub mod score;

pub use score::ScoreComponents;
