use std::path::{Path, PathBuf};

use ani_me::RenderSurface as _;
use anyhow::Context as _;
use clap::{Parser, Subcommand};
use tracing_subscriber::prelude::*;

#[derive(Parser, Debug)]
#[command(name = "ani-me", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render the hero at one scroll progress as a PNG.
    Frame(FrameArgs),
    /// Scroll through the pinned span and write one PNG per step.
    Sweep(SweepArgs),
    /// Print the frame URLs of the configured sequence.
    Urls(UrlsArgs),
}

#[derive(Parser, Debug)]
struct SourceArgs {
    /// Hero configuration JSON.
    #[arg(long)]
    config: PathBuf,

    /// Directory frame URLs resolve against. Defaults to the config file's directory.
    #[arg(long)]
    root: Option<PathBuf>,

    /// Viewport width in logical pixels.
    #[arg(long, default_value_t = 1280.0)]
    width: f64,

    /// Viewport height in logical pixels.
    #[arg(long, default_value_t = 720.0)]
    height: f64,

    /// Device pixel ratio.
    #[arg(long, default_value_t = 1.0)]
    dpr: f64,
}

#[derive(Parser, Debug)]
struct FrameArgs {
    #[command(flatten)]
    source: SourceArgs,

    /// Scroll progress through the pinned span, 0..=1.
    #[arg(long)]
    progress: f64,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Parser, Debug)]
struct SweepArgs {
    #[command(flatten)]
    source: SourceArgs,

    /// Number of evenly spaced scroll positions, first and last included.
    #[arg(long, default_value_t = 10)]
    steps: usize,

    /// Output directory for `step_NNNN.png` files.
    #[arg(long)]
    out_dir: PathBuf,
}

#[derive(Parser, Debug)]
struct UrlsArgs {
    /// Hero configuration JSON.
    #[arg(long)]
    config: PathBuf,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Frame(args) => cmd_frame(args),
        Command::Sweep(args) => cmd_sweep(args),
        Command::Urls(args) => cmd_urls(args),
    }
}

/// A hero mounted at the top of a page, with scrub lag disabled so every scroll settles at once.
struct Session {
    driver: ani_me::ScrollDriver,
    hero: ani_me::MountedHero<ani_me::CpuSurface>,
    span: f64,
}

impl Session {
    fn open(args: &SourceArgs) -> anyhow::Result<Self> {
        let mut cfg = ani_me::HeroConfig::from_path(&args.config)?;
        cfg.pin.scrub_lag_secs = 0.0;

        let root = match &args.root {
            Some(root) => root.clone(),
            None => args
                .config
                .parent()
                .unwrap_or_else(|| Path::new("."))
                .to_path_buf(),
        };
        let source = ani_me::FsSource::new(root);
        let urls = ani_me::sequence_urls(&cfg.sequence);
        let frames = ani_me::load_all(
            &urls,
            &source,
            ani_me::LoadOpts {
                threads: cfg.loader.threads,
            },
        )
        .context("preload frame sequence")?;

        let viewport = ani_me::Viewport::new(args.width, args.height, args.dpr)?;
        let driver = ani_me::ScrollDriver::new(viewport);
        let hero = ani_me::HeroSequence::mount(
            &driver,
            frames,
            ani_me::HeroSequence::cpu_surface(&cfg),
            &cfg,
            0.0,
        )?;
        let span = cfg.pin.span_viewports * viewport.height;
        Ok(Self { driver, hero, span })
    }

    fn scroll_to_progress(&self, progress: f64) {
        self.driver.scroll_to(ani_me::clamp_unit(progress) * self.span);
    }

    fn write_png(&self, out: &Path) -> anyhow::Result<ani_me::FrameIndex> {
        let scrubber = self.hero.scrubber();
        let frame = scrubber
            .surface()
            .context("hero surface detached")?
            .snapshot();
        write_png(out, &frame)?;
        Ok(scrubber.frame_index())
    }
}

fn write_png(out: &Path, frame: &ani_me::FrameRGBA) -> anyhow::Result<()> {
    if let Some(parent) = out.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    image::save_buffer_with_format(
        out,
        &frame.to_straight_rgba8(),
        frame.width,
        frame.height,
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .with_context(|| format!("write png '{}'", out.display()))
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let session = Session::open(&args.source)?;
    session.scroll_to_progress(args.progress);
    let index = session.write_png(&args.out)?;
    eprintln!("wrote {} (frame {})", args.out.display(), index.0);
    Ok(())
}

fn cmd_sweep(args: SweepArgs) -> anyhow::Result<()> {
    if args.steps == 0 {
        anyhow::bail!("--steps must be >= 1");
    }
    let session = Session::open(&args.source)?;
    std::fs::create_dir_all(&args.out_dir)
        .with_context(|| format!("create output dir '{}'", args.out_dir.display()))?;

    for step in 0..args.steps {
        let progress = if args.steps == 1 {
            0.0
        } else {
            step as f64 / (args.steps - 1) as f64
        };
        session.scroll_to_progress(progress);
        let out = args.out_dir.join(format!("step_{step:04}.png"));
        let index = session.write_png(&out)?;
        tracing::info!(step, progress, frame = index.0, "wrote {}", out.display());
    }
    eprintln!("wrote {} frames to {}", args.steps, args.out_dir.display());
    Ok(())
}

fn cmd_urls(args: UrlsArgs) -> anyhow::Result<()> {
    let cfg = ani_me::HeroConfig::from_path(&args.config)?;
    for url in ani_me::sequence_urls(&cfg.sequence) {
        println!("{url}");
    }
    Ok(())
}
