//! Pixel format conversion and PNG output.

use std::path::Path;

use tiny_skia::Pixmap;

/// Straight-alpha RGBA8, ready for PNG.
pub fn pixmap_to_rgba(pixmap: &Pixmap) -> Vec<u8> {
    let mut rgba = Vec::with_capacity(pixmap.data().len());
    for px in pixmap.pixels() {
        let c = px.demultiply();
        rgba.extend_from_slice(&[c.red(), c.green(), c.blue(), c.alpha()]);
    }
    rgba
}

pub fn encode_png(pixmap: &Pixmap) -> Result<Vec<u8>, String> {
    let mut buf = Vec::new();
    {
        let mut encoder = png::Encoder::new(&mut buf, pixmap.width(), pixmap.height());
        encoder.set_color(png::ColorType::Rgba);
        encoder.set_depth(png::BitDepth::Eight);
        let mut writer = encoder.write_header().map_err(|e| format!("png header: {e}"))?;
        writer
            .write_image_data(&pixmap_to_rgba(pixmap))
            .map_err(|e| format!("png data: {e}"))?;
        writer.finish().map_err(|e| format!("png finish: {e}"))?;
    }
    Ok(buf)
}

pub fn save_png(path: &Path, pixmap: &Pixmap) -> Result<(), String> {
    let bytes = encode_png(pixmap).map_err(|e| format!("{}: {e}", path.display()))?;
    std::fs::write(path, bytes).map_err(|e| format!("write {}: {e}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tiny_skia::Color;

    fn half_red() -> Pixmap {
        let mut p = Pixmap::new(3, 2).unwrap();
        p.fill(Color::from_rgba8(255, 0, 0, 128));
        p
    }

    #[test]
    fn rgba_is_demultiplied() {
        let rgba = pixmap_to_rgba(&half_red());
        assert_eq!(rgba.len(), 3 * 2 * 4);
        assert_eq!(&rgba[..4], &[255, 0, 0, 128]);
    }

    #[test]
    fn png_has_signature_and_size() {
        let bytes = encode_png(&half_red()).unwrap();
        assert_eq!(&bytes[..8], &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A]);
        let decoder = png::Decoder::new(bytes.as_slice());
        let reader = decoder.read_info().unwrap();
        assert_eq!((reader.info().width, reader.info().height), (3, 2));
    }

    #[test]
    fn save_to_missing_dir_fails() {
        let err = save_png(Path::new("/nonexistent/dir/out.png"), &half_red()).unwrap_err();
        assert!(err.starts_with("write /nonexistent/dir/out.png"));
    }

    #[test]
    fn saved_file_matches_encoded_bytes() {
        let path = std::env::temp_dir().join(format!("glass-export-{}.png", std::process::id()));
        save_png(&path, &half_red()).unwrap();
        let written = std::fs::read(&path).unwrap();
        let _ = std::fs::remove_file(&path);
        assert_eq!(written, encode_png(&half_red()).unwrap());
    }
}
