use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand, ValueEnum};

#[derive(Parser, Debug)]
#[command(name = "fourier-wave", version)]
struct Cli {
    /// Log per-frame diagnostics.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render the whole animation (GIF by default, MP4 requires `ffmpeg` on PATH).
    Render(RenderArgs),
    /// Render a single frame as a PNG.
    Frame(FrameArgs),
    /// Print grid, square wave and partial sum for one N as JSON.
    Samples(SamplesArgs),
}

#[derive(Args, Debug)]
struct CommonArgs {
    /// Animation config JSON; missing fields keep their defaults.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Number of sample points over the domain.
    #[arg(long)]
    samples: Option<usize>,
}

#[derive(Args, Debug)]
struct StyleArgs {
    /// Skip title, tick labels and legend text.
    #[arg(long)]
    no_text: bool,

    /// Extra directory to load fonts from (repeatable).
    #[arg(long = "font-dir")]
    font_dirs: Vec<PathBuf>,
}

#[derive(Parser, Debug)]
struct RenderArgs {
    #[command(flatten)]
    common: CommonArgs,

    #[command(flatten)]
    style: StyleArgs,

    /// Output path; the format follows the extension unless `--format` is given.
    #[arg(long)]
    out: Option<PathBuf>,

    #[arg(long, value_enum)]
    format: Option<FormatChoice>,

    /// Export frame rate.
    #[arg(long)]
    fps: Option<u32>,

    /// Highest term count; frames cover N = 1..=max_terms.
    #[arg(long)]
    max_terms: Option<u32>,

    /// Refuse to replace an existing output file.
    #[arg(long)]
    no_overwrite: bool,
}

#[derive(Parser, Debug)]
struct FrameArgs {
    #[command(flatten)]
    common: CommonArgs,

    #[command(flatten)]
    style: StyleArgs,

    /// Term count N to draw.
    #[arg(long)]
    terms: u32,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Parser, Debug)]
struct SamplesArgs {
    #[command(flatten)]
    common: CommonArgs,

    /// Term count N to evaluate.
    #[arg(long)]
    terms: u32,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum FormatChoice {
    Gif,
    Mp4,
}

impl From<FormatChoice> for fourier_wave::OutputFormat {
    fn from(c: FormatChoice) -> Self {
        match c {
            FormatChoice::Gif => Self::Gif,
            FormatChoice::Mp4 => Self::Mp4,
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.cmd {
        Command::Render(args) => cmd_render(args),
        Command::Frame(args) => cmd_frame(args),
        Command::Samples(args) => cmd_samples(args),
    }
}

fn init_tracing(verbose: bool) {
    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(common: &CommonArgs) -> anyhow::Result<fourier_wave::AnimationConfig> {
    let mut cfg = match &common.config {
        Some(path) => fourier_wave::AnimationConfig::from_path(path)
            .with_context(|| format!("load config '{}'", path.display()))?,
        None => fourier_wave::AnimationConfig::default(),
    };
    if let Some(samples) = common.samples {
        cfg.samples = samples;
    }
    Ok(cfg)
}

fn make_backend(style: &StyleArgs) -> anyhow::Result<Box<dyn fourier_wave::RenderBackend>> {
    let settings = fourier_wave::RenderSettings {
        text: !style.no_text,
        font_dirs: style.font_dirs.clone(),
    };
    Ok(fourier_wave::create_backend(
        fourier_wave::BackendKind::Cpu,
        &settings,
    )?)
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let mut cfg = load_config(&args.common)?;

    if let Some(out) = args.out {
        if args.format.is_none()
            && let Some(format) = fourier_wave::OutputFormat::from_path(&out)
        {
            cfg.format = format;
        }
        cfg.out_path = out;
    }
    if let Some(format) = args.format {
        cfg.format = format.into();
    }
    if let Some(fps) = args.fps {
        cfg.fps = Some(fps);
    }
    if let Some(max_terms) = args.max_terms {
        cfg.terms = fourier_wave::TermRange::up_to(max_terms)?;
    }
    if args.no_overwrite {
        cfg.overwrite = false;
    }

    let mut backend = make_backend(&args.style)?;
    let stats = fourier_wave::render_animation(&cfg, backend.as_mut())?;

    eprintln!(
        "wrote {} ({} frames)",
        stats.out_path.display(),
        stats.frames_total
    );
    Ok(())
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let cfg = load_config(&args.common)?;
    cfg.validate()?;

    let generator = fourier_wave::FrameGenerator::new(cfg.sample_grid()?)?;
    let terms = fourier_wave::TermCount::new(args.terms)?;
    let mut backend = make_backend(&args.style)?;
    let frame = fourier_wave::render_frame(&cfg, &generator, terms, backend.as_mut())?;

    write_png(&args.out, &frame, cfg.style.background.to_array())?;
    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn write_png(path: &Path, frame: &fourier_wave::FrameRGBA, bg: [u8; 4]) -> anyhow::Result<()> {
    fourier_wave::ensure_parent_dir(path)?;

    let mut opaque = vec![0u8; frame.data.len()];
    fourier_wave::flatten_to_opaque_rgba8(&mut opaque, &frame.data, frame.premultiplied, bg)?;

    image::save_buffer_with_format(
        path,
        &opaque,
        frame.width,
        frame.height,
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .with_context(|| format!("write png '{}'", path.display()))?;
    Ok(())
}

#[derive(serde::Serialize)]
struct SampleDump<'a> {
    terms: u32,
    x: &'a [f64],
    reference: &'a [f64],
    approx: &'a [f64],
}

fn cmd_samples(args: SamplesArgs) -> anyhow::Result<()> {
    let cfg = load_config(&args.common)?;
    cfg.validate()?;

    let generator = fourier_wave::FrameGenerator::new(cfg.sample_grid()?)?;
    let frame = generator.frame(fourier_wave::TermCount::new(args.terms)?)?;

    let dump = SampleDump {
        terms: frame.terms.0,
        x: frame.grid.xs(),
        reference: &frame.reference,
        approx: &frame.curve,
    };
    let stdout = std::io::stdout();
    serde_json::to_writer(stdout.lock(), &dump).context("write samples json")?;
    println!();
    Ok(())
}
