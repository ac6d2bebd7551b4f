use std::{
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use clap::{Parser, Subcommand, ValueEnum};
use social_canvas::{
    Canvas, DEFAULT_ARCHIVE_NAME, DEFAULT_PATTERN, Deliverable, FORMAT_PRESETS, PackageMode,
    ProcessingOptions, Rgb8, SourceImage,
};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "social-canvas", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compose every input onto a social media canvas and write JPEGs (or one ZIP).
    Process(ProcessArgs),
    /// List the built-in format presets.
    Presets,
    /// Print the default processing options as JSON.
    Defaults,
}

#[derive(Parser, Debug)]
struct ProcessArgs {
    /// Input image files, processed in the given order.
    #[arg(required = true)]
    inputs: Vec<PathBuf>,

    /// Output directory.
    #[arg(long)]
    out: PathBuf,

    /// How finished images are delivered.
    #[arg(long, value_enum, default_value_t = ModeChoice::Archive)]
    mode: ModeChoice,

    /// Archive file name, without extension.
    #[arg(long, default_value = DEFAULT_ARCHIVE_NAME)]
    archive_name: String,

    /// Output naming pattern; `{idx}` and `{stem}` are substituted.
    #[arg(long, default_value = DEFAULT_PATTERN)]
    pattern: String,

    /// JSON file with base processing options; flags below override it.
    #[arg(long)]
    options: Option<PathBuf>,

    /// Format preset id (see `presets`).
    #[arg(long)]
    preset: Option<String>,

    /// Canvas width in pixels.
    #[arg(long, requires = "height")]
    width: Option<u32>,

    /// Canvas height in pixels.
    #[arg(long, requires = "width")]
    height: Option<u32>,

    /// Background blur strength (gaussian sigma, output pixels).
    #[arg(long)]
    blur: Option<f32>,

    /// Overlay opacity in percent (0..=100).
    #[arg(long)]
    overlay_opacity: Option<u8>,

    /// Overlay colour as `#rrggbb`.
    #[arg(long)]
    overlay_color: Option<Rgb8>,

    /// JPEG quality in (0, 1].
    #[arg(long)]
    quality: Option<f32>,

    /// Margin around the foreground, in pixels.
    #[arg(long)]
    border: Option<u32>,

    /// Stroke width around the foreground, in pixels.
    #[arg(long)]
    stroke_width: Option<u32>,

    /// Stroke colour as `#rrggbb`.
    #[arg(long)]
    stroke_color: Option<Rgb8>,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum ModeChoice {
    Individual,
    Archive,
}

impl From<ModeChoice> for PackageMode {
    fn from(choice: ModeChoice) -> Self {
        match choice {
            ModeChoice::Individual => PackageMode::Individual,
            ModeChoice::Archive => PackageMode::Archive,
        }
    }
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
        Command::Process(args) => cmd_process(args),
        Command::Presets => cmd_presets(),
        Command::Defaults => cmd_defaults(),
    }
}

fn read_options_json(path: &Path) -> anyhow::Result<ProcessingOptions> {
    let f = File::open(path).with_context(|| format!("open options '{}'", path.display()))?;
    let r = BufReader::new(f);
    let opts: ProcessingOptions =
        serde_json::from_reader(r).with_context(|| "parse options JSON")?;
    Ok(opts)
}

fn build_options(args: &ProcessArgs) -> anyhow::Result<ProcessingOptions> {
    let mut opts = match &args.options {
        Some(path) => read_options_json(path)?,
        None => ProcessingOptions::default(),
    };

    if let Some(id) = &args.preset {
        let preset = social_canvas::find_preset(id)
            .with_context(|| format!("unknown preset '{id}' (see `social-canvas presets`)"))?;
        opts = opts.with_canvas(preset.canvas);
    }
    if let (Some(width), Some(height)) = (args.width, args.height) {
        opts = opts.with_canvas(Canvas::new(width, height)?);
    }

    if let Some(v) = args.blur {
        opts.blur_radius = v;
    }
    if let Some(v) = args.overlay_opacity {
        opts.overlay_opacity = v;
    }
    if let Some(v) = args.overlay_color {
        opts.overlay_color = v;
    }
    if let Some(v) = args.quality {
        opts.quality = v;
    }
    if let Some(v) = args.border {
        opts.outer_border = v;
    }
    if let Some(v) = args.stroke_width {
        opts.stroke_width = v;
    }
    if let Some(v) = args.stroke_color {
        opts.stroke_color = v;
    }

    let opts = opts.clamped();
    opts.validate()?;
    Ok(opts)
}

fn cmd_process(args: ProcessArgs) -> anyhow::Result<()> {
    let opts = build_options(&args)?;

    let sources = args
        .inputs
        .iter()
        .map(|path| SourceImage::read(path))
        .collect::<Result<Vec<_>, _>>()?;

    tracing::info!(
        items = sources.len(),
        width = opts.canvas.width,
        height = opts.canvas.height,
        "processing"
    );

    let report = social_canvas::run_with_report(
        &sources,
        &opts,
        &args.pattern,
        &social_canvas::CancelFlag::new(),
        |p| tracing::info!(percent = (p * 100.0).round() as u32, "progress"),
    )?;

    for skipped in &report.skipped {
        eprintln!("skipped {} ({})", skipped.name, skipped.reason);
    }
    if report.artifacts.is_empty() {
        anyhow::bail!("no image could be processed");
    }

    let deliverables =
        social_canvas::package(report.artifacts, args.mode.into(), &args.archive_name)?;
    write_deliverables(&args.out, deliverables)
}

fn write_deliverables(dir: &Path, deliverables: Vec<Deliverable>) -> anyhow::Result<()> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("create output dir '{}'", dir.display()))?;

    let existing = existing_file_names(dir)?;
    let names = social_canvas::dedupe_names(
        existing
            .iter()
            .map(String::as_str)
            .chain(deliverables.iter().map(|d| d.name.as_str())),
    );

    for (deliverable, name) in deliverables.iter().zip(names.into_iter().skip(existing.len())) {
        let path = dir.join(&name);
        std::fs::write(&path, &deliverable.bytes)
            .with_context(|| format!("write '{}'", path.display()))?;
        eprintln!("wrote {}", path.display());
    }
    Ok(())
}

fn existing_file_names(dir: &Path) -> anyhow::Result<Vec<String>> {
    let mut names = Vec::new();
    for entry in
        std::fs::read_dir(dir).with_context(|| format!("list output dir '{}'", dir.display()))?
    {
        let entry = entry.with_context(|| format!("list output dir '{}'", dir.display()))?;
        names.push(entry.file_name().to_string_lossy().into_owned());
    }
    names.sort();
    Ok(names)
}

fn cmd_presets() -> anyhow::Result<()> {
    for preset in FORMAT_PRESETS {
        println!(
            "{:<24} {:>4}x{:<4}  {}",
            preset.id, preset.canvas.width, preset.canvas.height, preset.label
        );
    }
    Ok(())
}

fn cmd_defaults() -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(&ProcessingOptions::default())
        .with_context(|| "serialize default options")?;
    println!("{json}");
    Ok(())
}
