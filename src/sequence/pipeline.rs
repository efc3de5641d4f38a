use rand::SeedableRng;
use rand::rngs::StdRng;
use rayon::prelude::*;

use crate::codec::resize::resize_rgba;
use crate::engine::lowpoly::LowPoly;
use crate::foundation::error::{LowPolyError, LowPolyResult};
use crate::sequence::model::{FrameSequence, IndexedFrame};
use crate::sequence::progress::ProgressSink;
use crate::sequence::quantize::quantize_to_palette;
use crate::triangulate::Triangulator;

/// Options for [`process_sequence`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SequenceOpts {
    /// Resize every frame to `target_width x target_height` first. Ignored unless both are > 0.
    pub target_width: u32,
    pub target_height: u32,
    /// Triangle density, 1..=100.
    pub intensity: u32,
    /// Run frames on a worker pool when `true`, one after another otherwise.
    pub parallel: bool,
    /// Worker count for the pool. `None` uses rayon's default (one per CPU).
    pub threads: Option<usize>,
    /// Derive each frame's random points from `(seed, frame index)` instead of the thread RNG.
    pub seed: Option<u64>,
}

impl Default for SequenceOpts {
    fn default() -> Self {
        Self {
            target_width: 0,
            target_height: 0,
            intensity: 100,
            parallel: true,
            threads: None,
            seed: None,
        }
    }
}

impl SequenceOpts {
    pub fn resize_target(&self) -> Option<(u32, u32)> {
        (self.target_width > 0 && self.target_height > 0)
            .then_some((self.target_width, self.target_height))
    }
}

/// Stylize every frame of `seq` in place.
///
/// Each frame is expanded to full color, optionally resized, stylized, and re-quantized onto its
/// own palette (the same `Arc`, never a recomputed one). Frame order, timing, disposal and loop
/// count are unchanged. With a resize target the logical screen size becomes the target size.
///
/// If any frame fails, the error of the lowest failing frame index is returned and `seq` is left
/// exactly as it was. `progress` is advanced once per successfully processed frame.
#[tracing::instrument(
    level = "debug",
    skip(engine, seq, progress),
    fields(frames = seq.frames.len(), width = seq.width, height = seq.height)
)]
pub fn process_sequence<T: Triangulator>(
    engine: &LowPoly<T>,
    seq: &mut FrameSequence,
    opts: &SequenceOpts,
    progress: Option<&dyn ProgressSink>,
) -> LowPolyResult<()> {
    let target = opts.resize_target();
    let run = |(index, frame): (usize, &IndexedFrame)| -> LowPolyResult<IndexedFrame> {
        let out = process_frame(engine, frame, index, opts.intensity, target, opts.seed)
            .map_err(|e| tag_frame(e, index))?;
        if let Some(p) = progress {
            p.advance();
        }
        Ok(out)
    };

    let results = if opts.parallel {
        let pool = build_thread_pool(opts.threads)?;
        pool.install(|| {
            seq.frames
                .par_iter()
                .enumerate()
                .map(run)
                .collect::<Vec<_>>()
        })
    } else {
        seq.frames.iter().enumerate().map(run).collect::<Vec<_>>()
    };

    let frames = results.into_iter().collect::<LowPolyResult<Vec<_>>>()?;
    seq.frames = frames;
    if let Some((w, h)) = target {
        seq.width = w;
        seq.height = h;
    }
    tracing::debug!(frames = seq.frames.len(), "sequence stylized");
    Ok(())
}

fn process_frame<T: Triangulator>(
    engine: &LowPoly<T>,
    frame: &IndexedFrame,
    index: usize,
    intensity: u32,
    target: Option<(u32, u32)>,
    seed: Option<u64>,
) -> LowPolyResult<IndexedFrame> {
    let mut rgba = frame.to_rgba();
    let (left, top) = match target {
        Some((w, h)) => {
            rgba = resize_rgba(&rgba, w, h);
            (0, 0)
        }
        None => (frame.left, frame.top),
    };

    let styled = match seed {
        Some(seed) => engine.apply_with_rng(&rgba, intensity, &mut frame_rng(seed, index))?,
        None => engine.apply(&rgba, intensity)?,
    };

    let indices = quantize_to_palette(&styled, frame.palette());
    Ok(frame.with_pixels(left, top, styled.width(), styled.height(), indices))
}

/// Per-frame generator that depends only on the seed and the frame's position.
pub fn frame_rng(seed: u64, index: usize) -> StdRng {
    StdRng::seed_from_u64(seed ^ (index as u64).wrapping_mul(0x9E37_79B9_7F4A_7C15))
}

fn tag_frame(err: LowPolyError, index: usize) -> LowPolyError {
    match err {
        LowPolyError::Validation(m) => LowPolyError::Validation(format!("frame {index}: {m}")),
        LowPolyError::Triangulation(m) => {
            LowPolyError::Triangulation(format!("frame {index}: {m}"))
        }
        LowPolyError::Codec(m) => LowPolyError::Codec(format!("frame {index}: {m}")),
        LowPolyError::Other(e) => LowPolyError::Other(e.context(format!("frame {index}"))),
    }
}

fn build_thread_pool(threads: Option<usize>) -> LowPolyResult<rayon::ThreadPool> {
    if let Some(n) = threads
        && n == 0
    {
        return Err(LowPolyError::validation(
            "sequence 'threads' must be >= 1 when set",
        ));
    }

    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(n) = threads {
        builder = builder.num_threads(n);
    }
    builder
        .build()
        .map_err(|e| LowPolyError::validation(format!("failed to build rayon thread pool: {e}")))
}

#[cfg(test)]
#[path = "../../tests/unit/sequence/pipeline.rs"]
mod tests;
