//! glass-render: renders one glass surface to a PNG.
//!
//! Usage: glass-render [--size W H] [--radius R] [--dark] [--tint HEX]
//!                     [--custom] [--interactive] [--config PATH] [--out PATH]
//!
//! The output covers the surface plus the shadow inset on every side. When
//! the native compositor backend is active there is nothing to rasterize and
//! the effect parameters are printed instead.

use std::path::PathBuf;

use log::{error, info};

use glass_surface::backend::GlassContent;
use glass_surface::config::GlassConfig;
use glass_surface::export::save_png;
use glass_surface::{GlassSurface, Rgba, Size, TintColor};

struct Args {
    size: Size,
    radius: Option<f32>,
    is_dark: bool,
    tint: Rgba,
    custom_tint: bool,
    is_interactive: bool,
    config: Option<PathBuf>,
    out: PathBuf,
}

impl Default for Args {
    fn default() -> Self {
        Args {
            size: Size::new(120.0, 40.0),
            radius: None,
            is_dark: false,
            tint: Rgba::white(1.0, 0.6),
            custom_tint: false,
            is_interactive: false,
            config: None,
            out: PathBuf::from("glass.png"),
        }
    }
}

fn number(it: &mut impl Iterator<Item = String>, flag: &str) -> Result<f32, String> {
    let raw = it.next().ok_or_else(|| format!("{flag} needs a value"))?;
    raw.parse::<f32>().map_err(|e| format!("{flag} {raw}: {e}"))
}

fn parse_args(mut it: impl Iterator<Item = String>) -> Result<Args, String> {
    let mut args = Args::default();

    while let Some(arg) = it.next() {
        match arg.as_str() {
            "--size" => {
                let w = number(&mut it, "--size")?;
                let h = number(&mut it, "--size")?;
                args.size = Size::new(w, h);
            }
            "--radius" => args.radius = Some(number(&mut it, "--radius")?),
            "--dark" => args.is_dark = true,
            "--tint" => {
                let hex = it.next().ok_or("--tint needs a value")?;
                args.tint = Rgba::from_hex(&hex).ok_or_else(|| format!("bad colour {hex}"))?;
            }
            "--custom" => args.custom_tint = true,
            "--interactive" => args.is_interactive = true,
            "--config" => args.config = Some(PathBuf::from(it.next().ok_or("--config needs a path")?)),
            "--out" => args.out = PathBuf::from(it.next().ok_or("--out needs a path")?),
            other => return Err(format!("unknown argument {other}")),
        }
    }
    Ok(args)
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = match parse_args(std::env::args().skip(1)) {
        Ok(a) => a,
        Err(e) => {
            error!("{e}");
            std::process::exit(2);
        }
    };

    let config = match &args.config {
        Some(path) => match GlassConfig::load(path) {
            Ok(c) => c,
            Err(e) => {
                error!("Failed to load config: {e}");
                std::process::exit(1);
            }
        },
        None => GlassConfig::find_and_load(),
    };

    let mut surface = GlassSurface::from_config(&config);
    let radius = args.radius.unwrap_or(args.size.width.min(args.size.height) / 2.0);
    let tint = if args.custom_tint {
        TintColor::custom(args.tint)
    } else {
        TintColor::panel(args.tint)
    };
    let inset = surface.inset();
    let update = surface.update(args.size, radius, args.is_dark, tint, args.is_interactive);

    match update.content {
        GlassContent::Native(effect) => {
            info!("Native backend active, nothing to rasterize");
            println!("{effect:?}");
        }
        GlassContent::Procedural { .. } => {
            let Some(pixmap) = update.content.compose(args.size, inset) else {
                error!("Surface {}x{} is too large to rasterize", args.size.width, args.size.height);
                std::process::exit(1);
            };
            if let Err(e) = save_png(&args.out, &pixmap) {
                error!("Failed to write PNG: {e}");
                std::process::exit(1);
            }
            info!("Wrote {} ({}x{})", args.out.display(), pixmap.width(), pixmap.height());
        }
    }
}
