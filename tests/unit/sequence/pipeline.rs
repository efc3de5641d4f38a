use std::sync::Arc;

use image::Rgba;

use super::*;
use crate::foundation::core::{Point, Triangle};
use crate::sample::points::SamplerConfig;
use crate::sequence::model::{Disposal, LoopCount, Palette};
use crate::sequence::progress::AtomicProgress;
use crate::triangulate::delaunay::DelaunayTriangulator;

fn palette(shift: u8) -> Arc<Palette> {
    let colors = (0..8u8)
        .map(|i| Rgba([i.wrapping_mul(31).wrapping_add(shift), i * 17, 255 - i * 29, 255]))
        .collect();
    Arc::new(Palette::new(colors).unwrap())
}

fn frame(w: u32, h: u32, shift: u8) -> IndexedFrame {
    let indices = (0..w * h)
        .map(|i| ((i % w) * 8 / w) as u8 ^ ((i / w) % 2) as u8)
        .collect();
    let mut f = IndexedFrame::new(w, h, palette(shift), indices).unwrap();
    f.delay_cs = 4 + u16::from(shift);
    f.disposal = Disposal::Background;
    f
}

fn sequence() -> FrameSequence {
    let mut seq = FrameSequence::new(50, 30, (0..5).map(|i| frame(50, 30, i * 3)).collect());
    seq.loop_count = LoopCount::Finite(2);
    seq
}

#[test]
fn preserves_frame_count_palettes_and_timing() {
    let mut seq = sequence();
    let before = seq.clone();
    let opts = SequenceOpts {
        intensity: 50,
        seed: Some(1),
        ..SequenceOpts::default()
    };
    process_sequence(&LowPoly::new(), &mut seq, &opts, None).unwrap();

    assert_eq!(seq.frames.len(), before.frames.len());
    assert_eq!((seq.width, seq.height), (50, 30));
    assert_eq!(seq.loop_count, LoopCount::Finite(2));
    for (a, b) in seq.frames.iter().zip(before.frames.iter()) {
        assert!(Arc::ptr_eq(a.palette(), b.palette()));
        assert_eq!(a.delay_cs, b.delay_cs);
        assert_eq!(a.disposal, b.disposal);
        assert_eq!((a.width(), a.height()), (b.width(), b.height()));
        assert_eq!(a.indices().len(), b.indices().len());
    }
}

#[test]
fn worker_count_does_not_change_output() {
    let engine = LowPoly::new();
    let run = |parallel: bool, threads: Option<usize>| {
        let mut seq = sequence();
        let opts = SequenceOpts {
            intensity: 50,
            parallel,
            threads,
            seed: Some(99),
            ..SequenceOpts::default()
        };
        process_sequence(&engine, &mut seq, &opts, None).unwrap();
        seq.frames
            .iter()
            .map(|f| f.indices().to_vec())
            .collect::<Vec<_>>()
    };

    let one = run(true, Some(1));
    assert_eq!(one, run(true, Some(4)));
    assert_eq!(one, run(true, None));
    assert_eq!(one, run(false, None));
}

#[test]
fn resize_target_rescales_frames_and_screen() {
    let mut seq = sequence();
    seq.frames[1].left = 5;
    let opts = SequenceOpts {
        target_width: 20,
        target_height: 12,
        intensity: 100,
        seed: Some(3),
        ..SequenceOpts::default()
    };
    process_sequence(&LowPoly::new(), &mut seq, &opts, None).unwrap();
    assert_eq!((seq.width, seq.height), (20, 12));
    for f in &seq.frames {
        assert_eq!((f.width(), f.height()), (20, 12));
        assert_eq!((f.left, f.top), (0, 0));
        assert_eq!(f.indices().len(), 240);
    }
}

#[test]
fn partial_resize_target_is_ignored() {
    let mut seq = sequence();
    seq.frames[0].left = 2;
    seq.frames[0].top = 1;
    let opts = SequenceOpts {
        target_width: 20,
        target_height: 0,
        seed: Some(3),
        ..SequenceOpts::default()
    };
    process_sequence(&LowPoly::new(), &mut seq, &opts, None).unwrap();
    assert_eq!((seq.width, seq.height), (50, 30));
    assert_eq!((seq.frames[0].left, seq.frames[0].top), (2, 1));
    assert_eq!(seq.frames[0].width(), 50);
}

#[test]
fn progress_advances_once_per_frame() {
    let mut seq = sequence();
    let progress = AtomicProgress::new();
    let opts = SequenceOpts {
        threads: Some(3),
        ..SequenceOpts::default()
    };
    process_sequence(&LowPoly::new(), &mut seq, &opts, Some(&progress)).unwrap();
    assert_eq!(progress.get(), 5);
}

#[test]
fn solid_frames_keep_their_indices() {
    let p = palette(0);
    let solid = IndexedFrame::new(16, 16, Arc::clone(&p), vec![5; 256]).unwrap();
    let mut seq = FrameSequence::new(16, 16, vec![solid.clone(), solid]);
    process_sequence(&LowPoly::new(), &mut seq, &SequenceOpts::default(), None).unwrap();
    for f in &seq.frames {
        assert!(f.indices().iter().all(|&i| i == 5));
        assert!(Arc::ptr_eq(f.palette(), &p));
    }
}

/// Fails for any point set reaching past x = 30, i.e. only for wide frames.
struct NarrowOnly;

impl Triangulator for NarrowOnly {
    fn triangulate(&self, points: &[Point]) -> LowPolyResult<Vec<Triangle>> {
        if points.iter().any(|p| p.x > 30.0) {
            return Err(LowPolyError::triangulation("too wide"));
        }
        DelaunayTriangulator.triangulate(points)
    }
}

#[test]
fn failing_frame_fails_whole_sequence_and_leaves_it_untouched() {
    let mut frames = (0..5).map(|i| frame(20, 20, i)).collect::<Vec<_>>();
    frames[2] = frame(50, 30, 9);
    let mut seq = FrameSequence::new(50, 30, frames);
    let before = seq.clone();

    for parallel in [true, false] {
        let progress = AtomicProgress::new();
        let opts = SequenceOpts {
            target_width: 0,
            parallel,
            seed: Some(5),
            ..SequenceOpts::default()
        };
        let engine = LowPoly::with_triangulator(SamplerConfig::default(), NarrowOnly);
        let err = process_sequence(&engine, &mut seq, &opts, Some(&progress)).unwrap_err();

        assert!(err.to_string().contains("frame 2"), "{err}");
        assert_eq!(progress.get(), 4);
        for (a, b) in seq.frames.iter().zip(before.frames.iter()) {
            assert_eq!(a.indices(), b.indices());
        }
    }
}

#[test]
fn zero_threads_is_rejected() {
    let mut seq = sequence();
    let opts = SequenceOpts {
        threads: Some(0),
        ..SequenceOpts::default()
    };
    let err = process_sequence(&LowPoly::new(), &mut seq, &opts, None).unwrap_err();
    assert!(matches!(err, LowPolyError::Validation(_)));
}

#[test]
fn frame_rng_depends_on_index() {
    use rand::Rng;
    let a: u64 = frame_rng(1, 0).r#gen();
    let b: u64 = frame_rng(1, 1).r#gen();
    let c: u64 = frame_rng(1, 0).r#gen();
    assert_ne!(a, b);
    assert_eq!(a, c);
}
