//! Models module for the songbook lyrics engine
//!
//! This module contains the data structures for the
//! paragraph-based song text representation.

pub mod core;
pub mod chords;

// Re-export commonly used types
pub use core::*;
pub use chords::*;
