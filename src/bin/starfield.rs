use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "starfield", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the generated star and bubble batches as JSON.
    Dump(DumpArgs),
    /// Write an SVG snapshot of one instant.
    Svg(SvgArgs),
    /// Render a single frame as a PNG.
    Frame(FrameArgs),
    /// Render a range of frames as a PNG sequence.
    Frames(FramesArgs),
    /// Write the overlay as a self-contained HTML/CSS fragment.
    Html(HtmlArgs),
}

#[derive(Parser, Debug)]
struct ConfigArg {
    /// Surface configuration JSON. Defaults to the reference layout.
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct DumpArgs {
    #[command(flatten)]
    config: ConfigArg,
}

#[derive(Parser, Debug)]
struct SvgArgs {
    #[command(flatten)]
    config: ConfigArg,

    /// Seconds since mount.
    #[arg(long, default_value_t = 0.0)]
    time: f64,

    /// Output SVG path.
    #[arg(long)]
    out: PathBuf,

    /// Leave the page background transparent.
    #[arg(long, default_value_t = false)]
    transparent: bool,
}

#[derive(Parser, Debug)]
struct FrameArgs {
    #[command(flatten)]
    config: ConfigArg,

    /// Frame index (0-based).
    #[arg(long)]
    frame: u64,

    /// Frames per second used to turn the index into elapsed time.
    #[arg(long, default_value_t = 30)]
    fps: u32,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Parser, Debug)]
struct FramesArgs {
    #[command(flatten)]
    config: ConfigArg,

    /// First frame (inclusive).
    #[arg(long, default_value_t = 0)]
    start: u64,

    /// Last frame (exclusive).
    #[arg(long)]
    end: u64,

    #[arg(long, default_value_t = 30)]
    fps: u32,

    /// Output directory for `frame_NNNNNN.png` files.
    #[arg(long)]
    out_dir: PathBuf,

    /// Enable frame-level parallelism.
    #[arg(long, default_value_t = false)]
    parallel: bool,

    /// Override rayon worker threads (parallel mode only).
    #[arg(long)]
    threads: Option<usize>,
}

#[derive(Parser, Debug)]
struct HtmlArgs {
    #[command(flatten)]
    config: ConfigArg,

    /// Output HTML path.
    #[arg(long)]
    out: PathBuf,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Dump(args) => cmd_dump(args),
        Command::Svg(args) => cmd_svg(args),
        Command::Frame(args) => cmd_frame(args),
        Command::Frames(args) => cmd_frames(args),
        Command::Html(args) => cmd_html(args),
    }
}

fn mount(arg: &ConfigArg) -> anyhow::Result<starfield::RenderSurface> {
    let cfg = match &arg.config {
        Some(path) => starfield::SurfaceConfig::from_path(path)?,
        None => starfield::SurfaceConfig::default(),
    };
    Ok(starfield::RenderSurface::mount(cfg)?)
}

fn write_text(path: &Path, text: &str) -> anyhow::Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    std::fs::write(path, text).with_context(|| format!("write '{}'", path.display()))?;
    eprintln!("wrote {}", path.display());
    Ok(())
}

fn cmd_dump(args: DumpArgs) -> anyhow::Result<()> {
    let surface = mount(&args.config)?;
    let dump = serde_json::json!({
        "stars": surface.stars(),
        "bubbles": surface.bubbles(),
    });
    println!(
        "{}",
        serde_json::to_string_pretty(&dump).context("serialize batches")?
    );
    surface.unmount();
    Ok(())
}

fn cmd_svg(args: SvgArgs) -> anyhow::Result<()> {
    let surface = mount(&args.config)?;
    let opts = starfield::SvgOpts {
        background: !args.transparent,
    };
    let svg = starfield::frame_to_svg(&surface.sample(args.time), &opts);
    write_text(&args.out, &svg)
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let surface = mount(&args.config)?;
    let fps = starfield::Fps::new(args.fps, 1)?;
    let elapsed = fps.frame_to_secs(starfield::FrameIndex(args.frame));

    let frame = starfield::rasterize_frame(&surface.sample(elapsed), &Default::default())?;
    frame.save_png(&args.out)?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_frames(args: FramesArgs) -> anyhow::Result<()> {
    let surface = mount(&args.config)?;
    let fps = starfield::Fps::new(args.fps, 1)?;
    let range = starfield::FrameRange::new(
        starfield::FrameIndex(args.start),
        starfield::FrameIndex(args.end),
    )?;
    let opts = starfield::SequenceOpts {
        parallel: args.parallel,
        threads: args.threads,
        ..Default::default()
    };

    let mut sink = starfield::PngSequenceSink::new(&args.out_dir);
    let stats = starfield::render_range(&surface, range, fps, &opts, &mut sink)?;

    eprintln!(
        "wrote {} frames to {}",
        stats.frames_rendered,
        args.out_dir.display()
    );
    Ok(())
}

fn cmd_html(args: HtmlArgs) -> anyhow::Result<()> {
    let surface = mount(&args.config)?;
    write_text(&args.out, &starfield::overlay_html(&surface))
}
