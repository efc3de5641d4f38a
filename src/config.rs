use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

use anyhow::Context;

use crate::foundation::error::{LowPolyError, LowPolyResult};
use crate::sample::points::SamplerConfig;
use crate::sequence::pipeline::SequenceOpts;

/// Lowest accepted intensity.
pub const MIN_INTENSITY: u32 = 1;
/// Highest accepted intensity.
pub const MAX_INTENSITY: u32 = 100;

/// Run-level settings for one conversion.
///
/// Every field has a default, so a JSON file only needs the keys it overrides:
///
/// ```json
/// { "intensity": 60, "resize": "800x600", "sampler": { "density": 300 } }
/// ```
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RunConfig {
    /// Triangle density, 1..=100.
    pub intensity: u32,
    /// Optional `WIDTHxHEIGHT` to resize to before stylizing.
    pub resize: Option<String>,
    pub sampler: SamplerConfig,
    /// Process animation frames on a worker pool.
    pub parallel: bool,
    /// Worker count; `None` means one per CPU.
    pub threads: Option<usize>,
    /// Fixed seed for reproducible output.
    pub seed: Option<u64>,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            intensity: MAX_INTENSITY,
            resize: None,
            sampler: SamplerConfig::default(),
            parallel: true,
            threads: None,
            seed: None,
        }
    }
}

impl RunConfig {
    pub fn from_path(path: impl AsRef<Path>) -> LowPolyResult<Self> {
        let path = path.as_ref();
        let f = File::open(path)
            .with_context(|| format!("open config JSON '{}'", path.display()))?;
        Self::from_reader(BufReader::new(f))
    }

    pub fn from_reader(r: impl Read) -> LowPolyResult<Self> {
        serde_json::from_reader(r)
            .map_err(|e| LowPolyError::validation(format!("parse config JSON: {e}")))
    }

    pub fn validate(&self) -> LowPolyResult<()> {
        if !(MIN_INTENSITY..=MAX_INTENSITY).contains(&self.intensity) {
            return Err(LowPolyError::validation(format!(
                "intensity must be between {MIN_INTENSITY} and {MAX_INTENSITY}, got {}",
                self.intensity
            )));
        }
        self.sampler.validate()?;
        self.resize_target()?;
        if self.threads == Some(0) {
            return Err(LowPolyError::validation("threads must be >= 1 when set"));
        }
        Ok(())
    }

    /// Parsed `resize`, if set.
    pub fn resize_target(&self) -> LowPolyResult<Option<(u32, u32)>> {
        self.resize.as_deref().map(parse_resize).transpose()
    }

    /// Frame pipeline options equivalent to this configuration.
    pub fn sequence_opts(&self) -> LowPolyResult<SequenceOpts> {
        let (target_width, target_height) = self.resize_target()?.unwrap_or((0, 0));
        Ok(SequenceOpts {
            target_width,
            target_height,
            intensity: self.intensity,
            parallel: self.parallel,
            threads: self.threads,
            seed: self.seed,
        })
    }
}

/// Parse `WIDTHxHEIGHT` (digits only, both > 0).
pub fn parse_resize(text: &str) -> LowPolyResult<(u32, u32)> {
    let invalid =
        || LowPolyError::validation("invalid resize format, expected WIDTHxHEIGHT (e.g., 800x600)");
    let (w, h) = text.split_once('x').ok_or_else(invalid)?;
    let dim = |s: &str| -> LowPolyResult<u32> {
        if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }
        s.parse::<u32>().map_err(|_| invalid())
    };
    let (w, h) = (dim(w)?, dim(h)?);
    if w == 0 || h == 0 {
        return Err(LowPolyError::validation(format!(
            "resize dimensions must be > 0, got {w}x{h}"
        )));
    }
    Ok((w, h))
}

/// `<dir>/<stem>-low-poly.<ext>` next to `input`.
pub fn default_output_path(input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let name = match input.extension() {
        Some(ext) => format!("{stem}-low-poly.{}", ext.to_string_lossy()),
        None => format!("{stem}-low-poly"),
    };
    input.with_file_name(name)
}

#[cfg(test)]
#[path = "../tests/unit/config/config.rs"]
mod tests;
