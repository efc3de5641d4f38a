//! Still-image stylization: sample, triangulate, rasterize.

/// The [`LowPoly`](lowpoly::LowPoly) engine.
pub mod lowpoly;
