use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};
use sha2::Digest as _;
use tracing_subscriber::EnvFilter;

use walli::scene::presets::{find_preset, grouped_presets, parse_aspect_ratio};

#[derive(Parser, Debug)]
#[command(name = "walli", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render the reduced-size preview as a PNG.
    Preview(PreviewArgs),
    /// Render the full-resolution composition as a PNG named after its settings.
    Export(ExportArgs),
    /// Validate a style JSON file and print every invalid field.
    Check(CheckArgs),
    /// List the built-in canvas presets.
    Presets,
}

#[derive(Args, Debug)]
struct InputArgs {
    /// Style parameters JSON. Defaults are used when omitted.
    #[arg(long)]
    style: Option<PathBuf>,

    /// Source image to place on the canvas.
    #[arg(long)]
    image: Option<PathBuf>,

    /// Replace the canvas size with a named preset (e.g. "Instagram Post").
    #[arg(long)]
    preset: Option<String>,

    /// Keep the canvas width and derive the height from a W:H ratio (e.g. 16:9).
    #[arg(long)]
    aspect: Option<String>,

    /// Extra directory of font files. `WALLI_FONT_DIR` is also honored.
    #[arg(long)]
    font_dir: Option<PathBuf>,

    /// Print the installed font families and the resolved watermark font (family + SHA-256).
    #[arg(long)]
    dump_fonts: bool,
}

#[derive(Parser, Debug)]
struct PreviewArgs {
    #[command(flatten)]
    input: InputArgs,

    /// Longest preview side in pixels.
    #[arg(long, default_value_t = 400)]
    max_footprint: u32,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Parser, Debug)]
struct ExportArgs {
    #[command(flatten)]
    input: InputArgs,

    /// Directory the exported PNG is written into.
    #[arg(long, default_value = ".")]
    out_dir: PathBuf,
}

#[derive(Parser, Debug)]
struct CheckArgs {
    /// Style parameters JSON.
    #[arg(long)]
    style: PathBuf,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Preview(args) => cmd_preview(args),
        Command::Export(args) => cmd_export(args),
        Command::Check(args) => cmd_check(args),
        Command::Presets => cmd_presets(),
    }
}

struct Loaded {
    style: walli::StyleParameters,
    image: Option<walli::SourceImage>,
    compositor: walli::Compositor,
}

fn load_inputs(args: &InputArgs) -> anyhow::Result<Loaded> {
    let mut style = match &args.style {
        Some(path) => walli::StyleParameters::from_path(path)
            .with_context(|| format!("load style '{}'", path.display()))?,
        None => walli::StyleParameters::default(),
    };

    if let Some(name) = &args.preset {
        let preset = find_preset(name).with_context(|| format!("unknown preset '{name}'"))?;
        style.canvas_size = preset.size;
    }
    if let Some(aspect) = &args.aspect {
        let ratio = parse_aspect_ratio(aspect)?;
        style.canvas_size.height = walli::apply_aspect_ratio(style.canvas_size.width, ratio)?;
    }
    style.validate()?;

    let image = match &args.image {
        Some(path) => Some(
            walli::decode_source_image_path(path)
                .with_context(|| format!("decode image '{}'", path.display()))?,
        ),
        None => None,
    };

    let mut fonts = walli::FontLibrary::with_system_fonts();
    if let Some(dir) = std::env::var_os("WALLI_FONT_DIR") {
        fonts.load_fonts_dir(Path::new(&dir));
    }
    if let Some(dir) = &args.font_dir {
        fonts.load_fonts_dir(dir);
    }

    if args.dump_fonts {
        dump_font_diagnostics(&fonts, &style)?;
    }

    Ok(Loaded {
        style,
        image,
        compositor: walli::Compositor::new(fonts),
    })
}

fn cmd_preview(args: PreviewArgs) -> anyhow::Result<()> {
    let mut loaded = load_inputs(&args.input)?;
    let opts = walli::PreviewOpts {
        max_footprint: args.max_footprint,
        ..walli::PreviewOpts::default()
    };
    let mut driver = walli::PreviewDriver::new(opts);
    let status = driver.refresh(&mut loaded.compositor, &loaded.style, loaded.image.as_ref())?;
    if let walli::PreviewStatus::Redrawn(report) = &status {
        warn_failures(report);
    }

    let surface = driver
        .surface()
        .context("preview surface was not allocated")?;
    let size = surface.size();
    let png = walli::encode::png::encode_png(size, surface.to_straight_rgba8())?;

    if let Some(parent) = args.out.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    std::fs::write(&args.out, png)
        .with_context(|| format!("write png '{}'", args.out.display()))?;

    eprintln!("wrote {} ({size})", args.out.display());
    Ok(())
}

fn cmd_export(args: ExportArgs) -> anyhow::Result<()> {
    let mut loaded = load_inputs(&args.input)?;
    let exported = walli::ExportDriver::default().export(
        &mut loaded.compositor,
        &loaded.style,
        loaded.image.as_ref(),
    )?;
    warn_failures(&exported.report);
    let path = exported.save_in(&args.out_dir)?;
    eprintln!("wrote {}", path.display());
    Ok(())
}

fn cmd_check(args: CheckArgs) -> anyhow::Result<()> {
    let style = walli::StyleParameters::from_path(&args.style)
        .with_context(|| format!("load style '{}'", args.style.display()))?;
    let errors = walli::validate_style(&style);
    if errors.is_empty() {
        println!("ok: {}", walli::export_file_name(&style));
        return Ok(());
    }
    for e in &errors {
        println!("{e}");
    }
    anyhow::bail!("{} invalid field(s)", errors.len());
}

fn cmd_presets() -> anyhow::Result<()> {
    for (category, presets) in grouped_presets() {
        println!("{category}:");
        for p in presets {
            println!("  {:<20} {}", p.name, p.size);
        }
    }
    Ok(())
}

fn warn_failures(report: &walli::RenderReport) {
    for f in &report.failures {
        eprintln!("warning: {} pass skipped: {}", f.pass, f.error);
    }
}

fn dump_font_diagnostics(
    fonts: &walli::FontLibrary,
    style: &walli::StyleParameters,
) -> anyhow::Result<()> {
    eprintln!("font diagnostics:");
    eprintln!("  faces:       {}", fonts.face_count());
    let families = fonts.family_names();
    eprintln!("  families:    {}", families.len());
    for name in &families {
        eprintln!("    {name}");
    }
    eprintln!("  font_family: {}", style.watermark.font_family);
    match fonts.resolve(&style.watermark.font_family) {
        Ok(font) => {
            eprintln!("  family:      {}", font.family);
            eprintln!("  index:       {}", font.index);
            eprintln!("  sha256:      {}", sha256_hex(&font.data));
        }
        Err(e) => eprintln!("  unresolved:  {e}"),
    }
    Ok(())
}

fn sha256_hex(bytes: &[u8]) -> String {
    let digest = sha2::Sha256::digest(bytes);
    let mut out = String::with_capacity(digest.len() * 2);
    for b in digest {
        out.push_str(&format!("{:02x}", b));
    }
    out
}
