//! Vertex sampling for the low-poly triangulation.

/// Random interior points plus the four image corners.
pub mod points;
