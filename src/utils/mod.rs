//! Shared utilities for the songbook lyrics engine

pub mod id;
