//! Animated, palette-indexed frame sequences and the per-frame stylization pipeline.

/// Indexed frames, palettes and sequence metadata.
pub mod model;
/// Frame-parallel stylization of a whole sequence.
pub mod pipeline;
/// Progress reporting for multi-frame runs.
pub mod progress;
/// Mapping full-color pixels back onto a frame palette.
pub mod quantize;
