//! Drop-shadow compositing along closed paths.
//!
//! Outer passes are isolated in their own layer: the blurred silhouette is
//! drawn, then the shape interior is erased with a copy of full transparency,
//! leaving only the ring that bleeds outward. Inner passes blur the region
//! *outside* the shape (enclosing rect + path, even-odd) into a scratch
//! bitmap, keep only what falls inside the shape, and blend it onto the
//! canvas.

use log::debug;
use tiny_skia::{BlendMode, FillRule, Paint, Path, Pixmap, PixmapPaint, Rect, Shader, Transform};

use crate::blur::{gaussian_blur, sigma_for_blur};
use crate::color::Rgba;
use crate::shape::{enclosing_path, outset, spread_band};

/// Default contraction (outer) / expansion (inner) of the silhouette that
/// keeps anti-aliased seams from showing at the shape edge.
pub const SEAM_EPSILON: f32 = 0.25;

/// How a finished shadow pass lands on the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShadowBlend {
    Normal,
    Multiply,
    DestinationOut,
    PlusLighter,
    Overlay,
    Copy,
}

impl ShadowBlend {
    pub fn to_skia(self) -> BlendMode {
        match self {
            ShadowBlend::Normal => BlendMode::SourceOver,
            ShadowBlend::Multiply => BlendMode::Multiply,
            ShadowBlend::DestinationOut => BlendMode::DestinationOut,
            ShadowBlend::PlusLighter => BlendMode::Plus,
            ShadowBlend::Overlay => BlendMode::Overlay,
            ShadowBlend::Copy => BlendMode::Source,
        }
    }
}

/// One shadow pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShadowSpec {
    pub is_outer: bool,
    pub offset: (f32, f32),
    pub blur: f32,
    pub spread: f32,
    pub color: Rgba,
    pub blend: ShadowBlend,
}

impl ShadowSpec {
    /// Centered outer shadow with no spread.
    pub fn outer(blur: f32, color: Rgba) -> Self {
        ShadowSpec {
            is_outer: true,
            offset: (0.0, 0.0),
            blur: blur.max(0.0),
            spread: 0.0,
            color,
            blend: ShadowBlend::Normal,
        }
    }

    /// Inner shadow falling inward from the edge opposite to `offset`.
    pub fn inner(offset: (f32, f32), blur: f32, color: Rgba) -> Self {
        ShadowSpec {
            is_outer: false,
            offset,
            blur: blur.max(0.0),
            spread: 0.0,
            color,
            blend: ShadowBlend::Normal,
        }
    }

    pub fn with_offset(self, dx: f32, dy: f32) -> Self {
        ShadowSpec { offset: (dx, dy), ..self }
    }

    pub fn with_spread(self, spread: f32) -> Self {
        ShadowSpec { spread, ..self }
    }

    pub fn with_blend(self, blend: ShadowBlend) -> Self {
        ShadowSpec { blend, ..self }
    }

    fn offset_transform(&self) -> Transform {
        Transform::from_translate(self.offset.0, self.offset.1)
    }

    /// Blur handed to the rasterizer. Outer spread is emulated by widening
    /// the blur rather than growing the silhouette.
    pub fn effective_blur(&self) -> f32 {
        if self.is_outer {
            self.blur.max(0.0) + self.spread.abs()
        } else {
            self.blur.max(0.0)
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct ShadowCompositor {
    pub seam_epsilon: f32,
}

impl Default for ShadowCompositor {
    fn default() -> Self {
        ShadowCompositor { seam_epsilon: SEAM_EPSILON }
    }
}

impl ShadowCompositor {
    pub fn new(seam_epsilon: f32) -> Self {
        ShadowCompositor { seam_epsilon: seam_epsilon.max(0.0) }
    }

    /// Run `passes` strictly in order.
    pub fn render_all(&self, canvas: &mut Pixmap, passes: &[ShadowSpec], base: &Path) {
        for spec in passes {
            self.render(canvas, spec, base);
        }
    }

    pub fn render(&self, canvas: &mut Pixmap, spec: &ShadowSpec, base: &Path) {
        if spec.color.a <= 0.0 {
            return;
        }
        debug!(
            "shadow pass outer={} offset={:?} blur={} spread={} blend={:?}",
            spec.is_outer,
            spec.offset,
            spec.effective_blur(),
            spec.spread,
            spec.blend
        );
        if spec.is_outer {
            self.render_outer(canvas, spec, base);
        } else {
            self.render_inner(canvas, spec, base);
        }
    }

    fn render_outer(&self, canvas: &mut Pixmap, spec: &ShadowSpec, base: &Path) {
        let Some(mut layer) = Pixmap::new(canvas.width(), canvas.height()) else {
            return;
        };
        let shift = spec.offset_transform();

        fill_transformed(&mut layer, base, FillRule::Winding, spec.color, BlendMode::SourceOver, shift);
        if let Some(band) = spread_band(base, self.seam_epsilon) {
            fill_transformed(&mut layer, &band, FillRule::Winding, Rgba::TRANSPARENT, BlendMode::Clear, shift);
        }
        gaussian_blur(&mut layer, sigma_for_blur(spec.effective_blur()));
        fill(&mut layer, base, FillRule::Winding, Rgba::TRANSPARENT, BlendMode::Source);

        composite(canvas, &layer, spec.blend);
    }

    /// The silhouette is cast from geometry already shifted by the offset, so
    /// shapes touching the bitmap edge still receive shade along that edge.
    fn render_inner(&self, canvas: &mut Pixmap, spec: &ShadowSpec, base: &Path) {
        let (w, h) = (canvas.width(), canvas.height());
        let Some(mut layer) = Pixmap::new(w, h) else {
            return;
        };
        let margin = spec.blur * 3.0 + spec.offset.0.abs() + spec.offset.1.abs() + 2.0;
        let Some(enclosing) = Rect::from_xywh(0.0, 0.0, w as f32, h as f32).and_then(|r| outset(r, margin, margin))
        else {
            return;
        };
        let Some(outside) = enclosing_path(enclosing, base) else {
            return;
        };
        let shift = spec.offset_transform();

        fill_transformed(&mut layer, &outside, FillRule::EvenOdd, spec.color, BlendMode::SourceOver, shift);
        let grow = spec.spread + self.seam_epsilon;
        if let Some(band) = spread_band(base, grow) {
            if grow > 0.0 {
                fill_transformed(&mut layer, &band, FillRule::Winding, Rgba::TRANSPARENT, BlendMode::Clear, shift);
            } else {
                fill_transformed(&mut layer, &band, FillRule::Winding, spec.color, BlendMode::Source, shift);
            }
        }
        gaussian_blur(&mut layer, sigma_for_blur(spec.effective_blur()));
        fill(&mut layer, &outside, FillRule::EvenOdd, Rgba::TRANSPARENT, BlendMode::Clear);

        composite(canvas, &layer, spec.blend);
    }
}

/// Run a single pass with the default seam epsilon.
pub fn render_shadow(canvas: &mut Pixmap, spec: &ShadowSpec, base: &Path) {
    ShadowCompositor::default().render(canvas, spec, base);
}

pub(crate) fn fill(pixmap: &mut Pixmap, path: &Path, rule: FillRule, color: Rgba, blend_mode: BlendMode) {
    fill_transformed(pixmap, path, rule, color, blend_mode, Transform::identity());
}

fn fill_transformed(
    pixmap: &mut Pixmap,
    path: &Path,
    rule: FillRule,
    color: Rgba,
    blend_mode: BlendMode,
    transform: Transform,
) {
    let paint = Paint {
        shader: Shader::SolidColor(color.to_skia()),
        blend_mode,
        anti_alias: true,
        ..Paint::default()
    };
    pixmap.fill_path(path, &paint, rule, transform, None);
}

fn composite(canvas: &mut Pixmap, layer: &Pixmap, blend: ShadowBlend) {
    let paint = PixmapPaint {
        blend_mode: blend.to_skia(),
        ..PixmapPaint::default()
    };
    canvas.draw_pixmap(0, 0, layer.as_ref(), &paint, Transform::identity(), None);
}
