//! Lowpoly turns raster images and animated GIFs into low-poly art.
//!
//! An image is covered with triangles whose vertices are random points plus the four image
//! corners; every triangle is then flat-filled with the average color of the source pixels it
//! covers.
//!
//! # Pipeline overview
//!
//! 1. **Sample**: `width x height + intensity -> Vec<Point>` ([`SamplerConfig::sample`])
//! 2. **Triangulate**: `&[Point] -> Vec<Triangle>` through a [`Triangulator`] (Delaunay by default)
//! 3. **Rasterize**: per triangle, average the covered source pixels and fill the same coverage
//!    in a copy of the source ([`rasterize_triangle`])
//! 4. **Sequence** (GIF): run steps 1-3 on every frame, optionally resized first, and quantize the
//!    result back onto the frame's own palette ([`process_sequence`])
//!
//! Design constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Injectable randomness and triangulation**: seeded generators and stub triangulators make
//!   every step reproducible in tests.
//! - **Order-stable parallelism**: frames may finish in any order, but results are always stored
//!   by frame index.
#![forbid(unsafe_code)]

mod foundation;

/// Decode, encode and resize services.
pub mod codec;
/// Run configuration, resize parsing and output naming.
pub mod config;
/// Still-image stylization engine.
pub mod engine;
/// Triangle rasterization.
pub mod raster;
/// Point sampling.
pub mod sample;
/// Indexed frame sequences and the frame pipeline.
pub mod sequence;
/// Triangulation capability.
pub mod triangulate;

pub use codec::gif::{decode_gif, encode_gif, load_gif, save_gif};
pub use codec::resize::resize_rgba;
pub use codec::still::{ImageKind, JPEG_QUALITY, decode_still, encode_still, load_still, save_still};
pub use config::{RunConfig, default_output_path, parse_resize};
pub use engine::lowpoly::{LowPoly, apply_low_poly};
pub use foundation::core::{Point, Triangle};
pub use foundation::error::{LowPolyError, LowPolyResult};
pub use raster::triangle::{
    FALLBACK_COLOR, TriangleCoverage, average_color, fill_triangle, point_in_triangle,
    rasterize_triangle,
};
pub use sample::points::{SamplerConfig, corner_points};
pub use sequence::model::{Disposal, FrameSequence, IndexedFrame, LoopCount, Palette};
pub use sequence::pipeline::{SequenceOpts, process_sequence};
pub use sequence::progress::{AtomicProgress, ProgressSink};
pub use triangulate::Triangulator;
pub use triangulate::delaunay::DelaunayTriangulator;
pub use triangulate::fan::FanTriangulator;
