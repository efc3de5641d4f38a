//! Per-triangle coverage, color averaging and flat fill.

/// Triangle membership test, average color and fill.
pub mod triangle;
