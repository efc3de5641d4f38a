use std::borrow::Cow;
use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;
use std::sync::Arc;

use anyhow::Context;

use crate::foundation::error::{LowPolyError, LowPolyResult};
use crate::sequence::model::{Disposal, FrameSequence, IndexedFrame, LoopCount, Palette};

/// Decode a GIF into indexed frames.
///
/// Frames without a local color table share one `Arc` of the global palette, unless they declare
/// a transparent index, in which case they get their own copy with that entry's alpha set to 0.
pub fn decode_gif<R: Read>(reader: R) -> LowPolyResult<FrameSequence> {
    let mut opts = ::gif::DecodeOptions::new();
    opts.set_color_output(::gif::ColorOutput::Indexed);
    let mut dec = opts
        .read_info(reader)
        .map_err(|e| LowPolyError::codec(format!("read gif header: {e}")))?;

    let width = u32::from(dec.width());
    let height = u32::from(dec.height());
    let global_rgb = dec.global_palette().map(<[u8]>::to_vec);
    let global = match &global_rgb {
        Some(rgb) => Some(Arc::new(Palette::from_rgb_bytes(rgb, None)?)),
        None => None,
    };

    let mut frames = Vec::new();
    while let Some(frame) = dec
        .read_next_frame()
        .map_err(|e| LowPolyError::codec(format!("read gif frame {}: {e}", frames.len())))?
    {
        let palette = match (&frame.palette, frame.transparent, &global, &global_rgb) {
            (Some(local), transparent, _, _) => {
                Arc::new(Palette::from_rgb_bytes(local, transparent)?)
            }
            (None, None, Some(shared), _) => Arc::clone(shared),
            (None, Some(t), _, Some(rgb)) => Arc::new(Palette::from_rgb_bytes(rgb, Some(t))?),
            _ => {
                return Err(LowPolyError::codec(format!(
                    "gif frame {} has no color table",
                    frames.len()
                )));
            }
        };

        let mut f = IndexedFrame::new(
            u32::from(frame.width),
            u32::from(frame.height),
            palette,
            frame.buffer.to_vec(),
        )?;
        f.left = u32::from(frame.left);
        f.top = u32::from(frame.top);
        f.delay_cs = frame.delay;
        f.transparent = frame.transparent;
        f.disposal = match frame.dispose {
            ::gif::DisposalMethod::Any => Disposal::Unspecified,
            ::gif::DisposalMethod::Keep => Disposal::Keep,
            ::gif::DisposalMethod::Background => Disposal::Background,
            ::gif::DisposalMethod::Previous => Disposal::Previous,
        };
        frames.push(f);
    }

    let loop_count = match dec.repeat() {
        ::gif::Repeat::Infinite => LoopCount::Infinite,
        ::gif::Repeat::Finite(0) => LoopCount::Once,
        ::gif::Repeat::Finite(n) => LoopCount::Finite(n),
    };

    tracing::debug!(width, height, frames = frames.len(), "decoded gif");
    Ok(FrameSequence {
        width,
        height,
        loop_count,
        frames,
    })
}

/// Encode a sequence, writing each frame's palette as its local color table.
pub fn encode_gif<W: Write>(seq: &FrameSequence, writer: W) -> LowPolyResult<()> {
    let width = to_u16(seq.width, "width")?;
    let height = to_u16(seq.height, "height")?;
    let mut enc = ::gif::Encoder::new(writer, width, height, &[])
        .map_err(|e| LowPolyError::codec(format!("write gif header: {e}")))?;
    match seq.loop_count {
        LoopCount::Infinite => enc.set_repeat(::gif::Repeat::Infinite),
        LoopCount::Finite(n) => enc.set_repeat(::gif::Repeat::Finite(n)),
        LoopCount::Once => Ok(()),
    }
    .map_err(|e| LowPolyError::codec(format!("write gif loop extension: {e}")))?;

    for (i, f) in seq.frames.iter().enumerate() {
        let mut frame = ::gif::Frame::default();
        frame.width = to_u16(f.width(), "frame width")?;
        frame.height = to_u16(f.height(), "frame height")?;
        frame.left = to_u16(f.left, "frame left")?;
        frame.top = to_u16(f.top, "frame top")?;
        frame.delay = f.delay_cs;
        frame.transparent = f.transparent;
        frame.dispose = match f.disposal {
            Disposal::Unspecified => ::gif::DisposalMethod::Any,
            Disposal::Keep => ::gif::DisposalMethod::Keep,
            Disposal::Background => ::gif::DisposalMethod::Background,
            Disposal::Previous => ::gif::DisposalMethod::Previous,
        };
        frame.palette = Some(f.palette().to_rgb_bytes());
        frame.buffer = Cow::Borrowed(f.indices());
        enc.write_frame(&frame)
            .map_err(|e| LowPolyError::codec(format!("write gif frame {i}: {e}")))?;
    }

    enc.into_inner()
        .map_err(|e| LowPolyError::codec(format!("finish gif: {e}")))?;
    Ok(())
}

#[tracing::instrument(level = "debug")]
pub fn load_gif(path: &Path) -> LowPolyResult<FrameSequence> {
    let f = File::open(path).with_context(|| format!("open gif '{}'", path.display()))?;
    decode_gif(BufReader::new(f))
}

#[tracing::instrument(level = "debug", skip(seq))]
pub fn save_gif(seq: &FrameSequence, path: &Path) -> LowPolyResult<()> {
    let f = File::create(path).with_context(|| format!("create gif '{}'", path.display()))?;
    encode_gif(seq, BufWriter::new(f))
}

fn to_u16(v: u32, what: &str) -> LowPolyResult<u16> {
    u16::try_from(v)
        .map_err(|_| LowPolyError::validation(format!("gif {what} {v} exceeds 65535")))
}

#[cfg(test)]
#[path = "../../tests/unit/codec/gif.rs"]
mod tests;
