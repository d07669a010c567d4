//! A glass surface: one backend, one cache slot and the frames that place the
//! rendered layers around the caller's content.

use log::debug;

use crate::backend::{select_backend, GlassBackend, GlassContent, PlatformCapabilities};
use crate::cache::SurfaceCache;
use crate::config::GlassConfig;
use crate::params::{SurfaceParams, TintColor};
use crate::shape::{Frame, Size};

/// Where each layer goes, relative to the content origin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceLayout {
    pub content: Frame,
    pub foreground: Frame,
    pub shadow: Frame,
    /// Mask frames live in the foreground's coordinate space.
    pub mask: Frame,
    pub mask_content: Frame,
}

impl SurfaceLayout {
    pub fn new(size: Size, inset: f32) -> Self {
        let content = Frame::from_size(size);
        SurfaceLayout {
            content,
            foreground: content.outset(inset),
            shadow: content.outset(inset),
            mask: Frame {
                x: 0.0,
                y: 0.0,
                width: size.width + inset * 2.0,
                height: size.height + inset * 2.0,
            },
            mask_content: Frame { x: inset, y: inset, ..content },
        }
    }
}

pub struct SurfaceUpdate<'a> {
    pub layout: SurfaceLayout,
    pub content: &'a GlassContent,
    /// True when this update rendered new content instead of reusing the slot.
    pub regenerated: bool,
}

pub struct GlassSurface {
    backend: Box<dyn GlassBackend>,
    cache: SurfaceCache<GlassContent>,
    inset: f32,
}

impl GlassSurface {
    pub fn new(backend: Box<dyn GlassBackend>, inset: f32) -> Self {
        GlassSurface {
            backend,
            cache: SurfaceCache::new(),
            inset: inset.max(0.0),
        }
    }

    pub fn from_config(config: &GlassConfig) -> Self {
        Self::with_capabilities(PlatformCapabilities::detect(), config)
    }

    pub fn with_capabilities(caps: PlatformCapabilities, config: &GlassConfig) -> Self {
        Self::new(select_backend(caps, config), config.synthesis.inset)
    }

    pub fn backend_name(&self) -> &'static str {
        self.backend.name()
    }

    pub fn inset(&self) -> f32 {
        self.inset
    }

    /// Number of times content has been rendered so far.
    pub fn render_count(&self) -> u64 {
        self.cache.generation()
    }

    pub fn update(
        &mut self,
        size: Size,
        corner_radius: f32,
        is_dark: bool,
        tint: TintColor,
        is_interactive: bool,
    ) -> SurfaceUpdate<'_> {
        let params = SurfaceParams {
            size,
            corner_radius,
            is_dark,
            tint,
            is_interactive,
        }
        .normalized();
        let regenerated = self.cache.params() != Some(&params);
        let backend = &self.backend;
        let content = self.cache.get_or_render(&params, || backend.render(&params));
        debug!("surface update {}x{} regenerated={}", params.size.width, params.size.height, regenerated);

        SurfaceUpdate {
            layout: SurfaceLayout::new(params.size, self.inset),
            content,
            regenerated,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::ProceduralBackend;
    use crate::color::Rgba;
    use crate::config::SynthesisConfig;
    use std::cell::Cell;
    use std::rc::Rc;

    /// Counts renders and delegates to the procedural backend.
    struct Counting {
        inner: ProceduralBackend,
        calls: Rc<Cell<u32>>,
    }

    impl GlassBackend for Counting {
        fn name(&self) -> &'static str {
            "counting"
        }

        fn render(&self, params: &SurfaceParams) -> GlassContent {
            self.calls.set(self.calls.get() + 1);
            self.inner.render(params)
        }
    }

    fn counting_surface() -> (GlassSurface, Rc<Cell<u32>>) {
        let calls = Rc::new(Cell::new(0));
        let backend = Counting {
            inner: ProceduralBackend::new(&SynthesisConfig::default()),
            calls: calls.clone(),
        };
        (GlassSurface::new(Box::new(backend), 32.0), calls)
    }

    #[test]
    fn layout_frames() {
        let layout = SurfaceLayout::new(Size::new(120.0, 40.0), 32.0);
        assert_eq!(layout.content, Frame { x: 0.0, y: 0.0, width: 120.0, height: 40.0 });
        assert_eq!(layout.foreground, Frame { x: -32.0, y: -32.0, width: 184.0, height: 104.0 });
        assert_eq!(layout.shadow, layout.foreground);
        assert_eq!(layout.mask, Frame { x: 0.0, y: 0.0, width: 184.0, height: 104.0 });
        assert_eq!(layout.mask_content, Frame { x: 32.0, y: 32.0, width: 120.0, height: 40.0 });
    }

    #[test]
    fn identical_updates_render_once() {
        let (mut surface, calls) = counting_surface();
        let tint = TintColor::panel(Rgba::WHITE);
        assert!(surface.update(Size::new(120.0, 40.0), 20.0, false, tint, false).regenerated);
        for _ in 0..5 {
            let update = surface.update(Size::new(120.0, 40.0), 20.0, false, tint, false);
            assert!(!update.regenerated);
            assert!(matches!(update.content, GlassContent::Procedural { .. }));
        }
        assert_eq!(calls.get(), 1);
        assert_eq!(surface.render_count(), 1);
    }

    #[test]
    fn changed_params_rerender() {
        let (mut surface, calls) = counting_surface();
        let tint = TintColor::panel(Rgba::WHITE);
        surface.update(Size::new(120.0, 40.0), 20.0, false, tint, false);
        assert!(surface.update(Size::new(120.0, 40.0), 20.0, true, tint, false).regenerated);
        assert!(surface.update(Size::new(120.0, 40.0), 20.0, true, tint, true).regenerated);
        assert!(surface.update(Size::new(100.0, 40.0), 20.0, true, tint, true).regenerated);
        assert_eq!(calls.get(), 4);
    }

    #[test]
    fn nan_radius_does_not_defeat_the_cache() {
        let (mut surface, calls) = counting_surface();
        let tint = TintColor::panel(Rgba::WHITE);
        for _ in 0..3 {
            surface.update(Size::new(f32::NAN, 40.0), f32::NAN, false, tint, false);
        }
        assert_eq!(calls.get(), 1);
        let update = surface.update(Size::new(f32::NAN, 40.0), f32::NAN, false, tint, false);
        assert!(!update.regenerated);
        assert_eq!(update.layout.content.width, 0.0);
    }

    #[test]
    fn config_picks_backend_and_inset() {
        let mut config = GlassConfig::default();
        config.synthesis.inset = 16.0;
        let surface = GlassSurface::with_capabilities(PlatformCapabilities { native_glass: true }, &config);
        assert_eq!(surface.backend_name(), "native");
        assert_eq!(surface.inset(), 16.0);

        config.backend.prefer_procedural = true;
        let mut surface = GlassSurface::with_capabilities(PlatformCapabilities { native_glass: true }, &config);
        assert_eq!(surface.backend_name(), "procedural");
        let update = surface.update(Size::new(60.0, 30.0), 15.0, false, TintColor::custom(Rgba::WHITE), false);
        assert_eq!(update.layout.foreground.x, -16.0);
        let composed = update.content.compose(Size::new(60.0, 30.0), 16.0).unwrap();
        assert_eq!((composed.width(), composed.height()), (92, 62));
    }
}
