use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};

use anyhow::Context as _;
use clap::Parser;
use tracing::level_filters::LevelFilter;

#[derive(Parser, Debug)]
#[command(name = "lowpoly", version, about = "Convert an image or GIF into low-poly art")]
struct Cli {
    /// Input image (.jpg, .jpeg, .png or .gif).
    input: PathBuf,

    /// Output path. Defaults to `<name>-low-poly.<ext>` next to the input.
    #[arg(long)]
    out: Option<PathBuf>,

    /// JSON run configuration; flags given on the command line override it.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Resize to WIDTHxHEIGHT (e.g. 800x600) before stylizing.
    #[arg(long)]
    resize: Option<String>,

    /// Triangle density, 1-100.
    #[arg(long)]
    intensity: Option<u32>,

    /// Source pixels per sampled point at 100% intensity.
    #[arg(long)]
    density: Option<u32>,

    /// Minimum number of random points per image.
    #[arg(long)]
    min_points: Option<u32>,

    /// Worker threads for GIF frames.
    #[arg(long)]
    threads: Option<usize>,

    /// Process GIF frames one at a time.
    #[arg(long, default_value_t = false)]
    sequential: bool,

    /// Fixed random seed for reproducible output.
    #[arg(long)]
    seed: Option<u64>,

    /// More log output (-v info with per-frame GIF progress, -vv debug, -vvv trace).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Only log errors.
    #[arg(short, long, default_value_t = false)]
    quiet: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);

    let cfg = run_config(&cli)?;
    let kind = lowpoly::ImageKind::from_path(&cli.input)?;
    let out = cli
        .out
        .clone()
        .unwrap_or_else(|| lowpoly::default_output_path(&cli.input));

    tracing::info!(input = %cli.input.display(), out = %out.display(), "processing image");

    if let Some(parent) = out.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }

    let engine = lowpoly::LowPoly::with_sampler(cfg.sampler);
    if kind.is_sequence() {
        convert_gif(&engine, &cfg, &cli.input, &out)?;
    } else {
        convert_still(&engine, &cfg, &cli.input, &out)?;
    }

    eprintln!("wrote {}", out.display());
    Ok(())
}

fn run_config(cli: &Cli) -> anyhow::Result<lowpoly::RunConfig> {
    let mut cfg = match &cli.config {
        Some(path) => lowpoly::RunConfig::from_path(path)?,
        None => lowpoly::RunConfig::default(),
    };
    if let Some(v) = cli.intensity {
        cfg.intensity = v;
    }
    if let Some(v) = &cli.resize {
        cfg.resize = Some(v.clone());
    }
    if let Some(v) = cli.density {
        cfg.sampler.density = v;
    }
    if let Some(v) = cli.min_points {
        cfg.sampler.min_points = v;
    }
    if let Some(v) = cli.threads {
        cfg.threads = Some(v);
    }
    if cli.sequential {
        cfg.parallel = false;
    }
    if let Some(v) = cli.seed {
        cfg.seed = Some(v);
    }
    cfg.validate()?;
    Ok(cfg)
}

fn convert_still(
    engine: &lowpoly::LowPoly,
    cfg: &lowpoly::RunConfig,
    input: &Path,
    out: &Path,
) -> anyhow::Result<()> {
    let mut img = lowpoly::load_still(input)?;
    if let Some((w, h)) = cfg.resize_target()? {
        tracing::info!("resizing image to {w}x{h}");
        img = lowpoly::resize_rgba(&img, w, h);
    }

    let styled = match cfg.seed {
        Some(seed) => {
            use rand::SeedableRng as _;
            let mut rng = rand::rngs::StdRng::seed_from_u64(seed);
            engine.apply_with_rng(&img, cfg.intensity, &mut rng)?
        }
        None => engine.apply(&img, cfg.intensity)?,
    };

    lowpoly::save_still(&styled, out)?;
    Ok(())
}

fn convert_gif(
    engine: &lowpoly::LowPoly,
    cfg: &lowpoly::RunConfig,
    input: &Path,
    out: &Path,
) -> anyhow::Result<()> {
    let mut seq = lowpoly::load_gif(input)?;
    let progress = FrameLog::new(seq.frames.len());
    let opts = cfg.sequence_opts()?;

    lowpoly::process_sequence(engine, &mut seq, &opts, Some(&progress))?;
    lowpoly::save_gif(&seq, out)?;
    tracing::info!(frames = progress.done(), "gif processed");
    Ok(())
}

/// Reports each finished GIF frame as an `info` event (visible with `-v`).
struct FrameLog {
    total: usize,
    done: AtomicUsize,
}

impl FrameLog {
    fn new(total: usize) -> Self {
        Self {
            total,
            done: AtomicUsize::new(0),
        }
    }

    fn done(&self) -> usize {
        self.done.load(Ordering::Relaxed)
    }
}

impl lowpoly::ProgressSink for FrameLog {
    fn advance(&self) {
        let done = self.done.fetch_add(1, Ordering::Relaxed) + 1;
        tracing::info!("frames done: {done}/{}", self.total);
    }
}

fn init_logging(verbose: u8, quiet: bool) {
    let level = if quiet {
        LevelFilter::ERROR
    } else {
        match verbose {
            0 => LevelFilter::WARN,
            1 => LevelFilter::INFO,
            2 => LevelFilter::DEBUG,
            _ => LevelFilter::TRACE,
        }
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
