use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use canvas_overlay::render::image::draw_overlay_on_image;
use canvas_overlay::{DrawingOverlay, OverlayConfig};

const USAGE: &str = "Usage: canvas-overlay <state> <output.png> [--background <image>] [--size <width>x<height>]";

const DEFAULT_SIZE: (u32, u32) = (640, 480);

/// Parsed command line
struct Args {
    state: String,
    output: PathBuf,
    background: Option<PathBuf>,
    size: (u32, u32),
}

fn parse_args(mut args: impl Iterator<Item = String>) -> Result<Args> {
    let state = args.next().context(USAGE)?;
    let output = args.next().map(PathBuf::from).context(USAGE)?;
    let mut background = None;
    let mut size = DEFAULT_SIZE;

    while let Some(flag) = args.next() {
        match flag.as_str() {
            "--background" => {
                let path = args.next().context("--background needs a path")?;
                background = Some(PathBuf::from(path));
            }
            "--size" => {
                let value = args.next().context("--size needs <width>x<height>")?;
                size = parse_size(&value)?;
            }
            other => bail!("Unknown argument {other:?}\n{USAGE}"),
        }
    }

    Ok(Args {
        state,
        output,
        background,
        size,
    })
}

fn parse_size(value: &str) -> Result<(u32, u32)> {
    let (w, h) = value
        .split_once('x')
        .with_context(|| format!("Invalid size {value:?}, expected <width>x<height>"))?;
    let width: u32 = w.trim().parse().with_context(|| format!("Invalid width {w:?}"))?;
    let height: u32 = h.trim().parse().with_context(|| format!("Invalid height {h:?}"))?;
    if width == 0 || height == 0 {
        bail!("Size must be non-zero, got {value:?}");
    }
    Ok((width, height))
}

fn run(args: Args) -> Result<()> {
    let mut overlay = DrawingOverlay::new(OverlayConfig::load());
    overlay
        .set_serialized_state(&args.state)
        .context("Failed to restore overlay state")?;
    log::info!("Restored {} element(s)", overlay.model().len());

    let mut img = match &args.background {
        Some(path) => image::open(path)
            .with_context(|| format!("Failed to open background: {}", path.display()))?
            .to_rgba8(),
        None => image::RgbaImage::new(args.size.0, args.size.1),
    };

    draw_overlay_on_image(&mut img, &overlay);
    img.save(&args.output)
        .with_context(|| format!("Failed to save image: {}", args.output.display()))?;
    log::info!("Saved overlay to {}", args.output.display());
    Ok(())
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let args = parse_args(std::env::args().skip(1))?;
    run(args)
}
