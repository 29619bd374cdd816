use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use planewarp::{
    AnimationConfig, Clock, FrameMode, ManualClock, PcmSynth, PlaybackIo, Player,
    PngSequenceSurface, ProgressSink, RunEnd, StepIndex, SystemClock, TransformMatrix,
};

#[derive(Parser, Debug)]
#[command(name = "planewarp", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Play a full run and export it as a PNG sequence plus PCM audio.
    Render(RenderArgs),
    /// Render a single interpolation step as a PNG.
    Frame(FrameArgs),
}

#[derive(Args, Debug)]
struct SourceArgs {
    /// Target matrix as `a,b,c,d` (rows `[a, b]` and `[c, d]`).
    #[arg(long, allow_hyphen_values = true)]
    matrix: TransformMatrix,

    /// Image drawn centered on the canvas. Without it only the overlays are animated.
    #[arg(long)]
    image: Option<PathBuf>,

    /// JSON file with animation config overrides.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Interpolation steps (overrides the config file).
    #[arg(long)]
    steps: Option<u32>,

    /// Draw the reference grid.
    #[arg(long)]
    grid: bool,
}

#[derive(Args, Debug)]
struct RenderArgs {
    #[command(flatten)]
    source: SourceArgs,

    /// Playback rate in frames per second (overrides the config file).
    #[arg(long)]
    fps: Option<u32>,

    /// Keep the voices near silence.
    #[arg(long)]
    no_sound: bool,

    /// Precompute every frame before playback (holds the whole run in memory).
    #[arg(long)]
    eager: bool,

    /// Pace ticks on the wall clock instead of exporting as fast as possible.
    #[arg(long)]
    realtime: bool,

    /// Output directory for `frame_00000.png`, `frame_00001.png`, ...
    #[arg(long)]
    out: PathBuf,

    /// Output path for interleaved stereo f32le PCM at 48 kHz.
    #[arg(long)]
    audio_out: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct FrameArgs {
    #[command(flatten)]
    source: SourceArgs,

    /// Step to render (0 is the untransformed canvas).
    #[arg(long)]
    step: u32,

    /// Output PNG path.
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
        Command::Render(args) => cmd_render(args),
        Command::Frame(args) => cmd_frame(args),
    }
}

fn load_config(args: &SourceArgs) -> anyhow::Result<AnimationConfig> {
    let mut config = match &args.config {
        Some(path) => AnimationConfig::from_path(path)?,
        None => AnimationConfig::default(),
    };
    if let Some(steps) = args.steps {
        config.steps = steps;
    }
    if args.grid {
        config.grid_enabled = true;
    }
    Ok(config)
}

fn load_source(
    args: &SourceArgs,
    config: &AnimationConfig,
) -> anyhow::Result<planewarp::SampleField> {
    let image = args
        .image
        .as_deref()
        .map(planewarp::load_image)
        .transpose()?;
    Ok(planewarp::prepare_source(image.as_ref(), config)?)
}

struct LogProgress;

impl ProgressSink for LogProgress {
    fn progress(&mut self, done: usize, total: usize) {
        if done == total || done % 10 == 0 {
            tracing::info!(done, total, "precomputing frames");
        }
    }
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let mut config = load_config(&args.source)?;
    if let Some(fps) = args.fps {
        config.fps = planewarp::Fps::new(fps, 1)?;
    }
    if args.no_sound {
        config.sound_enabled = false;
    }
    if args.eager {
        config.frame_mode = FrameMode::Eager;
    }
    config.validate()?;

    let source = load_source(&args.source, &config)?;
    let mut player = Player::new(config.clone())?;
    let mut surface = PngSequenceSurface::new(&args.out);
    let mut synth = PcmSynth::new(&config.sonify_settings());
    let mut progress = LogProgress;

    let run = player.submit(args.source.matrix, source, &mut synth)?;
    let mut clock: Box<dyn Clock> = if args.realtime {
        Box::new(SystemClock::new())
    } else {
        Box::new(ManualClock::new())
    };
    let summary = {
        let mut io = PlaybackIo {
            surface: &mut surface,
            audio: &mut synth,
            progress: &mut progress,
        };
        player.drive(run, clock.as_mut(), &mut io)?
    };
    if summary.end != RunEnd::Completed {
        anyhow::bail!("run {} ended early", summary.run.0);
    }
    eprintln!(
        "wrote {} frames to {}",
        surface.written(),
        args.out.display()
    );

    if let Some(audio_out) = &args.audio_out {
        write_audio(synth, audio_out)?;
    }
    Ok(())
}

fn write_audio(synth: PcmSynth, out: &Path) -> anyhow::Result<()> {
    let samples = synth.finish();
    planewarp::write_f32le(&samples, out)?;
    eprintln!(
        "wrote {} stereo samples to {}",
        samples.len() / 2,
        out.display()
    );
    Ok(())
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let config = load_config(&args.source)?;
    config.validate()?;

    let path = planewarp::build_transform_path(args.source.matrix, config.steps)?;
    let matrix = path.matrix_at(StepIndex(args.step)).with_context(|| {
        format!(
            "step {} is out of range for a {}-step run",
            args.step, config.steps
        )
    })?;
    let source = load_source(&args.source, &config)?;
    let frame = planewarp::to_raster(&planewarp::apply_transform(matrix, &source), config.canvas);

    if let Some(parent) = args.out.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    image::save_buffer_with_format(
        &args.out,
        &frame.data,
        frame.width,
        frame.height,
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .with_context(|| format!("write png '{}'", args.out.display()))?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}
