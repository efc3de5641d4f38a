//! Decode, encode and resize services around the stylization core.

/// Animated GIF decode/encode preserving per-frame palettes and timing.
pub mod gif;
/// High-quality RGBA resize.
pub mod resize;
/// JPEG/PNG still images and format dispatch.
pub mod still;
