//! Pre-rendered edge texture used in place of the procedural highlights for
//! the single most common capsule size.

use std::path::Path;

use tiny_skia::{FillRule, Mask, Pixmap, PixmapPaint, Transform};

use crate::shape::Size;

pub struct EdgeTexture {
    pixmap: Pixmap,
    size: f32,
}

impl EdgeTexture {
    /// Rasterize the SVG at `path` into a `size` x `size` square.
    pub fn load(path: &Path, size: f32) -> Result<Self, String> {
        let data = std::fs::read(path).map_err(|e| format!("read {}: {e}", path.display()))?;
        Self::from_svg_data(&data, size).map_err(|e| format!("{}: {e}", path.display()))
    }

    pub fn from_svg_data(data: &[u8], size: f32) -> Result<Self, String> {
        let opts = resvg::usvg::Options::default();
        let tree = resvg::usvg::Tree::from_data(data, &opts).map_err(|e| format!("parse svg: {e}"))?;

        let side = size.round().max(1.0) as u32;
        let svg_size = tree.size();
        let sx = side as f32 / svg_size.width();
        let sy = side as f32 / svg_size.height();
        let scale = sx.min(sy);
        let dx = (side as f32 - svg_size.width() * scale) / 2.0;
        let dy = (side as f32 - svg_size.height() * scale) / 2.0;

        let mut pixmap = Pixmap::new(side, side).ok_or_else(|| format!("texture size {side} out of range"))?;
        let transform = Transform::from_scale(scale, scale).post_translate(dx, dy);
        resvg::render(&tree, transform, &mut pixmap.as_mut());

        Ok(EdgeTexture { pixmap, size })
    }

    pub fn matches(&self, inner: Size) -> bool {
        (inner.width - self.size).abs() < 0.5 && (inner.height - self.size).abs() < 0.5
    }

    /// Draw at (`x`, `y`) clipped to `clip`.
    pub fn overlay(&self, canvas: &mut Pixmap, x: f32, y: f32, clip: &tiny_skia::Path) {
        let Some(mut mask) = Mask::new(canvas.width(), canvas.height()) else {
            return;
        };
        mask.fill_path(clip, FillRule::Winding, true, Transform::identity());
        canvas.draw_pixmap(
            0,
            0,
            self.pixmap.as_ref(),
            &PixmapPaint::default(),
            Transform::from_translate(x, y),
            Some(&mask),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RING: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" width="20" height="20">
        <circle cx="10" cy="10" r="9" fill="none" stroke="#ffffff" stroke-width="2"/>
    </svg>"##;

    #[test]
    fn rasterizes_svg_at_requested_size() {
        let tex = EdgeTexture::from_svg_data(RING.as_bytes(), 40.0).unwrap();
        assert_eq!((tex.pixmap.width(), tex.pixmap.height()), (40, 40));
        assert!(tex.pixmap.pixel(20, 1).unwrap().alpha() > 0);
        assert_eq!(tex.pixmap.pixel(20, 20).unwrap().alpha(), 0);
        assert!(tex.matches(Size::square(40.0)));
        assert!(!tex.matches(Size::new(40.0, 44.0)));
    }

    #[test]
    fn invalid_svg_is_an_error() {
        assert!(EdgeTexture::from_svg_data(b"not svg", 40.0).is_err());
        assert!(EdgeTexture::load(Path::new("/nonexistent/edge.svg"), 40.0).is_err());
    }
}
