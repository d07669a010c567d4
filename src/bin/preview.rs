//! Local preview tool: renders glass variants to PNG files + atlas.
//!
//! Usage: cargo run --bin glass-preview [-- --out DIR]
//!
//! Outputs:
//!   preview-output/glass-*.png   surfaces for each appearance and tint
//!   preview-output/rim-*.png     rim-lit foreground ellipses
//!   preview-output/atlas.png     single tiled overview over a backdrop

use std::path::{Path, PathBuf};

use tiny_skia::{Pixmap, PixmapPaint, Transform};

use glass_surface::backend::PlatformCapabilities;
use glass_surface::config::GlassConfig;
use glass_surface::export::save_png;
use glass_surface::rim::generate_foreground_image;
use glass_surface::{GlassSurface, Rgba, Size, TintColor};

const CELL_W: u32 = 280;
const CELL_H: u32 = 140;
const PAD: u32 = 8;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let out = std::env::args()
        .skip_while(|a| a != "--out")
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("preview-output"));
    if let Err(e) = std::fs::create_dir_all(&out) {
        eprintln!("create {}: {e}", out.display());
        std::process::exit(1);
    }

    // Procedural regardless of the host: the preview is about the bitmaps.
    let mut config = GlassConfig::find_and_load();
    config.backend.prefer_procedural = true;
    let mut surface = GlassSurface::with_capabilities(PlatformCapabilities::default(), &config);
    let inset = surface.inset();

    let tints = [
        ("panel", Rgba::white(1.0, 0.6)),
        ("clear", Rgba::white(1.0, 0.0)),
        ("blue", Rgba::from_rgba8(0x33, 0x90, 0xec, 0xcc)),
        ("wine", Rgba::from_rgba8(0x30, 0x08, 0x14, 0xcc)),
    ];
    let shapes = [("pill", Size::new(180.0, 44.0), 22.0), ("button", Size::new(56.0, 56.0), 28.0)];

    let mut frames: Vec<(String, Pixmap)> = Vec::new();

    // ── Surfaces ────────────────────────────────────────────
    for is_dark in [false, true] {
        for (tint_name, tint) in tints {
            for (shape_name, size, radius) in shapes {
                let update = surface.update(size, radius, is_dark, TintColor::custom(tint), false);
                let Some(pixmap) = update.content.compose(size, inset) else {
                    continue;
                };
                let mode = if is_dark { "dark" } else { "light" };
                frames.push((format!("glass-{mode}-{tint_name}-{shape_name}"), pixmap));
            }
        }
    }
    println!("rendered {} surfaces ({} renders)", frames.len(), surface.render_count());

    // ── Rim-lit foregrounds ─────────────────────────────────
    for is_dark in [false, true] {
        let fill = if is_dark { Rgba::white(0.1, 0.5) } else { Rgba::white(1.0, 0.5) };
        let rim = generate_foreground_image(Size::new(96.0, 96.0), is_dark, fill);
        let Some(stretched) = rim.stretch(200, 96) else {
            continue;
        };
        let mode = if is_dark { "dark" } else { "light" };
        frames.push((format!("rim-{mode}"), stretched));
    }

    for (label, pixmap) in &frames {
        if let Err(e) = save_png(&out.join(format!("{label}.png")), pixmap) {
            eprintln!("{e}");
        }
    }

    // ── Build atlas ─────────────────────────────────────────
    let cols = 4_u32;
    let rows = (frames.len() as u32).div_ceil(cols);
    let atlas_w = cols * (CELL_W + PAD) + PAD;
    let atlas_h = rows * (CELL_H + PAD) + PAD;

    let Some(mut atlas) = generate_backdrop(atlas_w, atlas_h) else {
        eprintln!("atlas {atlas_w}x{atlas_h} too large");
        std::process::exit(1);
    };

    for (idx, (_label, pixmap)) in frames.iter().enumerate() {
        let col = idx as u32 % cols;
        let row = idx as u32 / cols;
        let ox = PAD + col * (CELL_W + PAD) + CELL_W.saturating_sub(pixmap.width()) / 2;
        let oy = PAD + row * (CELL_H + PAD) + CELL_H.saturating_sub(pixmap.height()) / 2;
        atlas.draw_pixmap(
            ox as i32,
            oy as i32,
            pixmap.as_ref(),
            &PixmapPaint::default(),
            Transform::identity(),
            None,
        );
    }

    let atlas_path = out.join("atlas.png");
    save_or_exit(&atlas_path, &atlas);
    println!("\natlas: {} ({}x{}, {} frames)", atlas_path.display(), atlas_w, atlas_h, frames.len());
    println!("individual frames in {}/", out.display());

    #[cfg(target_os = "macos")]
    {
        let _ = std::process::Command::new("open").arg(&atlas_path).spawn();
    }
}

fn save_or_exit(path: &Path, pixmap: &Pixmap) {
    if let Err(e) = save_png(path, pixmap) {
        eprintln!("{e}");
        std::process::exit(1);
    }
}

/// Busy diagonal stripes so translucency and shadows are visible.
fn generate_backdrop(w: u32, h: u32) -> Option<Pixmap> {
    let mut pixmap = Pixmap::new(w, h)?;
    let data = pixmap.data_mut();
    for y in 0..h {
        for x in 0..w {
            let tx = x as f32 / w as f32;
            let ty = y as f32 / h as f32;
            let stripe = if ((x + y) / 24) % 2 == 0 { 1.0 } else { 0.8 };
            let r = ((90.0 + 120.0 * tx) * stripe) as u8;
            let g = ((140.0 + 60.0 * (1.0 - ty)) * stripe) as u8;
            let b = ((200.0 - 80.0 * tx) * stripe) as u8;
            let i = ((y * w + x) * 4) as usize;
            data[i..i + 4].copy_from_slice(&[r, g, b, 255]);
        }
    }
    Some(pixmap)
}
