//! Single-slot memo of the last rendered surface.
//!
//! Only the most recent `(params, content)` pair is kept. Access goes through
//! `&mut self`; each surface owns its own slot and never shares it.

use log::debug;

use crate::params::SurfaceParams;

#[derive(Debug)]
pub struct SurfaceCache<T> {
    slot: Option<(SurfaceParams, T)>,
    generation: u64,
}

impl<T> Default for SurfaceCache<T> {
    fn default() -> Self {
        SurfaceCache::new()
    }
}

impl<T> SurfaceCache<T> {
    pub fn new() -> Self {
        SurfaceCache { slot: None, generation: 0 }
    }

    /// Return the cached content for `params`, calling `render` only when the
    /// slot is empty or holds different params.
    pub fn get_or_render(&mut self, params: &SurfaceParams, render: impl FnOnce() -> T) -> &T {
        let hit = matches!(&self.slot, Some((cached, _)) if cached == params);
        if !hit {
            self.slot = None;
        }
        let generation = &mut self.generation;
        let (_, value) = self.slot.get_or_insert_with(|| {
            *generation += 1;
            debug!("regenerating surface content (generation {}): {:?}", generation, params);
            (*params, render())
        });
        value
    }

    pub fn params(&self) -> Option<&SurfaceParams> {
        self.slot.as_ref().map(|(params, _)| params)
    }

    pub fn get(&self) -> Option<&T> {
        self.slot.as_ref().map(|(_, value)| value)
    }

    /// Number of times content has been rendered into this slot.
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Rgba;
    use crate::params::TintColor;
    use crate::shape::Size;
    use std::cell::Cell;

    fn params() -> SurfaceParams {
        SurfaceParams {
            size: Size::new(120.0, 40.0),
            corner_radius: 20.0,
            is_dark: false,
            tint: TintColor::panel(Rgba::WHITE),
            is_interactive: false,
        }
    }

    #[test]
    fn repeated_params_render_once() {
        let mut cache = SurfaceCache::new();
        let calls = Cell::new(0);
        for _ in 0..10 {
            let v = cache.get_or_render(&params(), || {
                calls.set(calls.get() + 1);
                42
            });
            assert_eq!(*v, 42);
        }
        assert_eq!(calls.get(), 1);
        assert_eq!(cache.generation(), 1);
    }

    #[test]
    fn each_field_change_forces_one_render() {
        let base = params();
        let variants = [
            SurfaceParams { size: Size::new(121.0, 40.0), ..base },
            SurfaceParams { corner_radius: 19.0, ..base },
            SurfaceParams { is_dark: true, ..base },
            SurfaceParams { tint: TintColor::custom(Rgba::WHITE), ..base },
            SurfaceParams { tint: TintColor::panel(Rgba::white(1.0, 0.5)), ..base },
            SurfaceParams { is_interactive: true, ..base },
        ];

        for changed in variants {
            let mut cache = SurfaceCache::new();
            let calls = Cell::new(0);
            let mut render = || {
                calls.set(calls.get() + 1);
                calls.get()
            };
            cache.get_or_render(&base, &mut render);
            cache.get_or_render(&base, &mut render);
            assert_eq!(calls.get(), 1);

            assert_eq!(*cache.get_or_render(&changed, &mut render), 2);
            assert_eq!(*cache.get_or_render(&changed, &mut render), 2);
            assert_eq!(calls.get(), 2, "{:?}", changed);
            assert_eq!(cache.params(), Some(&changed));
        }
    }

    #[test]
    fn only_latest_params_are_kept() {
        let mut cache = SurfaceCache::new();
        let a = params();
        let b = SurfaceParams { is_dark: true, ..a };
        cache.get_or_render(&a, || 1);
        cache.get_or_render(&b, || 2);
        assert_eq!(*cache.get_or_render(&a, || 3), 3);
        assert_eq!(cache.generation(), 3);
    }
}
