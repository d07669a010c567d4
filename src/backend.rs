//! Backend strategy: synthesize glass images on the CPU, or describe a
//! native compositor effect and let the platform draw it.
//!
//! The backend is chosen once per surface from the platform's capabilities
//! and the `[backend]` config section.

use log::info;
use tiny_skia::{Pixmap, PixmapPaint, Transform};

use crate::color::Rgba;
use crate::config::{GlassConfig, SynthesisConfig};
use crate::params::{SurfaceParams, TintKind};
use crate::shader::GlassSynthesizer;
use crate::shape::Size;
use crate::stretch::{pack, StretchableImage};

const NATIVE_ENV: &str = "GLASS_SURFACE_NATIVE_COMPOSITOR";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PlatformCapabilities {
    /// The host compositor can draw a live glass effect itself.
    pub native_glass: bool,
}

impl PlatformCapabilities {
    pub fn detect() -> Self {
        Self::from_env_value(std::env::var(NATIVE_ENV).ok().as_deref())
    }

    fn from_env_value(value: Option<&str>) -> Self {
        let native_glass = value
            .map(|v| matches!(v.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on"))
            .unwrap_or(false);
        PlatformCapabilities { native_glass }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Appearance {
    Light,
    Dark,
}

/// Parameters handed to a native glass effect.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NativeGlassEffect {
    /// `None` keeps the platform's own panel tint.
    pub tint: Option<Rgba>,
    pub is_interactive: bool,
    pub appearance: Appearance,
    pub corner_radius: f32,
}

#[derive(Debug, Clone)]
pub enum GlassContent {
    Procedural {
        foreground: StretchableImage,
        shadow: StretchableImage,
    },
    Native(NativeGlassEffect),
}

impl GlassContent {
    /// Flatten procedural content into one bitmap covering `size` plus the
    /// `inset` margin on every side: ambient shadow first, glass on top.
    /// Native content has nothing to rasterize and yields `None`.
    pub fn compose(&self, size: Size, inset: f32) -> Option<Pixmap> {
        let GlassContent::Procedural { foreground, shadow } = self else {
            return None;
        };

        let side = |v: f32| (v.max(0.0) + inset.max(0.0) * 2.0).ceil() as u32;
        let width = side(size.width).max(foreground.width()).max(shadow.width());
        let height = side(size.height).max(foreground.height()).max(shadow.height());

        let mut out = Pixmap::new(width, height)?;
        for layer in [shadow, foreground] {
            let stretched = layer.stretch(width, height)?;
            out.draw_pixmap(0, 0, stretched.as_ref(), &PixmapPaint::default(), Transform::identity(), None);
        }
        Some(out)
    }
}

pub trait GlassBackend {
    fn name(&self) -> &'static str;
    fn render(&self, params: &SurfaceParams) -> GlassContent;
}

pub struct ProceduralBackend {
    synthesizer: GlassSynthesizer,
}

impl ProceduralBackend {
    pub fn new(config: &SynthesisConfig) -> Self {
        ProceduralBackend {
            synthesizer: GlassSynthesizer::new(config),
        }
    }
}

impl GlassBackend for ProceduralBackend {
    fn name(&self) -> &'static str {
        "procedural"
    }

    /// The glass bitmap is a `2r` square capsule; stretching its center row
    /// and column covers any surface size.
    fn render(&self, params: &SurfaceParams) -> GlassContent {
        let radius = params.corner_radius.max(0.0);
        let glass = self.synthesizer.generate_glass_image(
            Size::square(radius * 2.0),
            radius,
            params.is_dark,
            params.tint.color,
        );
        GlassContent::Procedural {
            foreground: pack(glass),
            shadow: self.synthesizer.generate_shadow_image(radius),
        }
    }
}

#[derive(Debug, Default)]
pub struct NativeBackend;

impl GlassBackend for NativeBackend {
    fn name(&self) -> &'static str {
        "native"
    }

    fn render(&self, params: &SurfaceParams) -> GlassContent {
        let tint = match params.tint.kind {
            TintKind::Panel => None,
            TintKind::Custom => Some(params.tint.color),
        };
        GlassContent::Native(NativeGlassEffect {
            tint,
            is_interactive: params.is_interactive,
            appearance: if params.is_dark { Appearance::Dark } else { Appearance::Light },
            corner_radius: params.corner_radius,
        })
    }
}

pub fn select_backend(caps: PlatformCapabilities, config: &GlassConfig) -> Box<dyn GlassBackend> {
    if caps.native_glass && !config.backend.prefer_procedural {
        info!("Glass backend: native compositor effect");
        Box::new(NativeBackend)
    } else {
        info!(
            "Glass backend: procedural (native available: {}, prefer_procedural: {})",
            caps.native_glass, config.backend.prefer_procedural
        );
        Box::new(ProceduralBackend::new(&config.synthesis))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::TintColor;

    fn params(tint: TintColor) -> SurfaceParams {
        SurfaceParams {
            size: Size::new(120.0, 40.0),
            corner_radius: 20.0,
            is_dark: true,
            tint,
            is_interactive: true,
        }
    }

    #[test]
    fn env_value_parsing() {
        assert!(!PlatformCapabilities::from_env_value(None).native_glass);
        assert!(!PlatformCapabilities::from_env_value(Some("0")).native_glass);
        assert!(!PlatformCapabilities::from_env_value(Some("")).native_glass);
        assert!(PlatformCapabilities::from_env_value(Some("1")).native_glass);
        assert!(PlatformCapabilities::from_env_value(Some(" TRUE ")).native_glass);
    }

    #[test]
    fn selection_honours_config() {
        let native = PlatformCapabilities { native_glass: true };
        let mut config = GlassConfig::default();
        assert_eq!(select_backend(native, &config).name(), "native");
        assert_eq!(select_backend(PlatformCapabilities::default(), &config).name(), "procedural");
        config.backend.prefer_procedural = true;
        assert_eq!(select_backend(native, &config).name(), "procedural");
    }

    #[test]
    fn native_tint_depends_on_kind() {
        let color = Rgba::from_rgba8(0x33, 0x90, 0xec, 0x80);
        let GlassContent::Native(panel) = NativeBackend.render(&params(TintColor::panel(color))) else {
            panic!("expected native content");
        };
        assert_eq!(panel.tint, None);
        assert_eq!(panel.appearance, Appearance::Dark);
        assert!(panel.is_interactive);
        assert_eq!(panel.corner_radius, 20.0);

        let GlassContent::Native(custom) = NativeBackend.render(&params(TintColor::custom(color))) else {
            panic!("expected native content");
        };
        assert_eq!(custom.tint, Some(color));
    }

    #[test]
    fn procedural_content_dimensions() {
        let backend = ProceduralBackend::new(&SynthesisConfig::default());
        let GlassContent::Procedural { foreground, shadow } = backend.render(&params(TintColor::panel(Rgba::WHITE)))
        else {
            panic!("expected procedural content");
        };
        assert_eq!((foreground.width(), foreground.height()), (104, 104));
        assert_eq!(foreground.left_cap_width, 52);
        assert_eq!((shadow.width(), shadow.height()), (104, 104));
        assert_eq!(shadow.left_cap_width, 52);
    }

    #[test]
    fn compose_stretches_to_surface_plus_inset() {
        let backend = ProceduralBackend::new(&SynthesisConfig::default());
        let content = backend.render(&params(TintColor::panel(Rgba::WHITE)));
        let img = content.compose(Size::new(120.0, 40.0), 32.0).unwrap();
        assert_eq!((img.width(), img.height()), (184, 104));
        // middle of the pill is opaque glass, far corner is clear
        assert_eq!(img.pixel(92, 52).unwrap().alpha(), 255);
        assert_eq!(img.pixel(0, 0).unwrap().alpha(), 0);

        assert!(NativeBackend.render(&params(TintColor::panel(Rgba::WHITE))).compose(Size::new(10.0, 10.0), 32.0).is_none());
    }
}
