//! Glass capsule synthesis.
//!
//! Pass order is fixed: ambient outer shadows, the flat tint fill, then the
//! inner highlight/shadow pairs picked from the tint's HSB. Every input maps
//! to exactly one pixmap; there is no hidden state between calls.

use log::{debug, warn};
use tiny_skia::{BlendMode, FillRule, Pixmap, Rect};

use crate::color::Rgba;
use crate::config::SynthesisConfig;
use crate::shadow::{fill, ShadowBlend, ShadowCompositor, ShadowSpec};
use crate::shape::{capsule_path, ellipse_path, Size};
use crate::stretch::StretchableImage;
use crate::texture::EdgeTexture;

/// Upper bound for either bitmap side.
pub const MAX_DIMENSION: u32 = 8192;

const LOW_SATURATION: f32 = 0.3;
const LOW_BRIGHTNESS: f32 = 0.2;

/// Pass lists for one surface, outer passes before the fill and inner after.
#[derive(Debug, Clone, PartialEq)]
pub struct GlassRecipe {
    pub outer: Vec<ShadowSpec>,
    pub inner: Vec<ShadowSpec>,
}

impl GlassRecipe {
    pub fn for_tint(is_dark: bool, tint: Rgba) -> Self {
        if is_dark {
            return GlassRecipe {
                outer: vec![
                    ShadowSpec::outer(16.0, Rgba::white(0.0, 0.12)),
                    ShadowSpec::outer(8.0, Rgba::white(0.0, 0.1)),
                ],
                inner: vec![
                    ShadowSpec::inner((0.0, 0.0), 3.0, Rgba::white(1.0, 0.5)),
                    ShadowSpec::inner((3.0, 3.0), 2.0, Rgba::white(1.0, 0.25)),
                    ShadowSpec::inner((-3.0, -3.0), 2.0, Rgba::white(1.0, 0.25)),
                ],
            };
        }

        let outer = vec![
            ShadowSpec::outer(32.0, Rgba::white(0.0, 0.08)),
            ShadowSpec::outer(16.0, Rgba::white(0.0, 0.08)),
        ];
        let hsb = tint.hsb();
        let alpha = tint.a.clamp(0.0, 1.0);

        let inner = if hsb.s <= LOW_SATURATION {
            let strength = alpha.min(1.0).max(0.8);
            vec![
                ShadowSpec::inner((-2.0, -2.0), 0.5, Rgba::white(0.0, 0.15)).with_blend(ShadowBlend::Overlay),
                ShadowSpec::inner((-2.0, -2.0), 0.6, Rgba::white(0.0, 0.1)),
                ShadowSpec::inner((2.0, 2.0), 0.5, Rgba::white(1.0, 0.5 * strength)),
                ShadowSpec::inner((-2.0, -2.0), 1.0, Rgba::white(1.0, 0.25 * strength)),
            ]
        } else if hsb.b >= LOW_BRIGHTNESS {
            let strength = alpha.powi(3);
            let saturated = tint.with_multiplied(1.0, 2.0, 1.0);
            let highlight = saturated.adjusted_perceived_brightness(2.0);
            let counter = saturated.adjusted_perceived_brightness(0.5);
            vec![
                ShadowSpec::inner((-2.0, -2.0), 0.5, counter.with_alpha(0.2 * strength)),
                ShadowSpec::inner((2.0, 2.0), 0.5, highlight.with_alpha(0.9 * strength))
                    .with_blend(ShadowBlend::PlusLighter),
                ShadowSpec::inner((-2.0, -2.0), 1.0, highlight.with_alpha(0.45 * strength))
                    .with_blend(ShadowBlend::PlusLighter),
            ]
        } else {
            let strength = alpha.powi(3).max(0.4);
            let highlight = tint.with_multiplied(1.0, 0.6, 1.0).adjusted_perceived_brightness(4.0);
            vec![
                ShadowSpec::inner((2.0, 2.0), 0.5, highlight.with_alpha(0.6 * strength)),
                ShadowSpec::inner((-2.0, -2.0), 1.0, highlight.with_alpha(0.3 * strength)),
            ]
        };

        GlassRecipe { outer, inner }
    }
}

pub struct GlassSynthesizer {
    inset: f32,
    shadow_inner_inset: f32,
    compositor: ShadowCompositor,
    edge_texture: Option<EdgeTexture>,
}

impl Default for GlassSynthesizer {
    fn default() -> Self {
        GlassSynthesizer::new(&SynthesisConfig::default())
    }
}

impl GlassSynthesizer {
    pub fn new(config: &SynthesisConfig) -> Self {
        let edge_texture = config.edge_texture.as_deref().and_then(|path| {
            EdgeTexture::load(path, config.edge_texture_size)
                .map_err(|e| warn!("Edge texture disabled: {e}"))
                .ok()
        });
        GlassSynthesizer {
            inset: config.inset.max(0.0),
            shadow_inner_inset: config.shadow_inner_inset.max(0.0),
            compositor: ShadowCompositor::new(config.seam_epsilon),
            edge_texture,
        }
    }

    pub fn with_edge_texture(mut self, texture: EdgeTexture) -> Self {
        self.edge_texture = Some(texture);
        self
    }

    pub fn inset(&self) -> f32 {
        self.inset
    }

    /// Render a capsule of `size` inside an `inset` margin. An empty size is
    /// drawn as 1x1.
    pub fn generate_glass_image(&self, size: Size, corner_radius: f32, is_dark: bool, tint: Rgba) -> Pixmap {
        let inner = if size.is_empty() { Size::square(1.0) } else { size };
        let mut canvas = blank_canvas(inner.width + self.inset * 2.0, inner.height + self.inset * 2.0);

        let Some(path) = Rect::from_xywh(self.inset, self.inset, inner.width, inner.height)
            .and_then(|rect| capsule_path(rect, corner_radius.max(0.0)))
        else {
            return canvas;
        };

        let recipe = GlassRecipe::for_tint(is_dark, tint);
        debug!(
            "glass image {}x{} r={} dark={} tint={} ({} outer, {} inner)",
            canvas.width(),
            canvas.height(),
            corner_radius,
            is_dark,
            tint,
            recipe.outer.len(),
            recipe.inner.len()
        );

        self.compositor.render_all(&mut canvas, &recipe.outer, &path);
        fill(&mut canvas, &path, FillRule::Winding, tint, BlendMode::SourceOver);

        match &self.edge_texture {
            Some(texture) if texture.matches(inner) => {
                texture.overlay(&mut canvas, self.inset, self.inset, &path);
            }
            _ => self.compositor.render_all(&mut canvas, &recipe.inner, &path),
        }
        canvas
    }

    /// Soft ambient shadow alone, with the ellipse interior left clear. Caps
    /// sit at `inset + corner_radius` so the ring stretches around any pill.
    pub fn generate_shadow_image(&self, corner_radius: f32) -> StretchableImage {
        let radius = corner_radius.max(0.0);
        let side = self.inset * 2.0 + radius * 2.0;
        let mut canvas = blank_canvas(side, side);

        let ellipse = side - self.inset * 2.0 - self.shadow_inner_inset * 2.0;
        let origin = self.inset + self.shadow_inner_inset;
        if let Some(path) = Rect::from_xywh(origin, origin, ellipse, ellipse).and_then(ellipse_path) {
            let spec = ShadowSpec::outer(40.0, Rgba::white(0.0, 0.09)).with_offset(0.0, 1.0);
            self.compositor.render(&mut canvas, &spec, &path);
        }

        let cap = (self.inset + radius) as u32;
        StretchableImage::with_caps(canvas, cap, cap)
    }
}

/// Transparent pixmap of at least 1x1 and at most `MAX_DIMENSION` a side.
pub(crate) fn blank_canvas(width: f32, height: f32) -> Pixmap {
    let clamp = |v: f32| {
        if v.is_finite() {
            (v.ceil() as u32).clamp(1, MAX_DIMENSION)
        } else {
            1
        }
    };
    Pixmap::new(clamp(width), clamp(height)).expect("canvas dimensions are clamped to a valid range")
}

/// Synthesize with the default 32px inset and no edge texture.
pub fn generate_glass_image(size: Size, corner_radius: f32, is_dark: bool, tint: Rgba) -> Pixmap {
    GlassSynthesizer::default().generate_glass_image(size, corner_radius, is_dark, tint)
}
