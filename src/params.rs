//! Inputs that fully determine a glass surface's rendered content.

use crate::color::Rgba;
use crate::shape::Size;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TintKind {
    /// Default panel glass; the native effect keeps its own tint.
    Panel,
    /// Caller-chosen tint forwarded to every backend.
    Custom,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TintColor {
    pub kind: TintKind,
    pub color: Rgba,
}

impl TintColor {
    pub fn panel(color: Rgba) -> Self {
        TintColor { kind: TintKind::Panel, color }
    }

    pub fn custom(color: Rgba) -> Self {
        TintColor { kind: TintKind::Custom, color }
    }
}

/// Value type compared by equality; any change means the cached content is
/// stale. Never mutated, only replaced.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceParams {
    pub size: Size,
    pub corner_radius: f32,
    pub is_dark: bool,
    pub tint: TintColor,
    pub is_interactive: bool,
}

impl SurfaceParams {
    /// NaN fields become 0 so the params still compare equal to themselves.
    /// Rendering already reads NaN as 0, so the output is unchanged.
    pub fn normalized(self) -> Self {
        let n = |v: f32| if v.is_nan() { 0.0 } else { v };
        let c = self.tint.color;
        SurfaceParams {
            size: Size::new(n(self.size.width), n(self.size.height)),
            corner_radius: n(self.corner_radius),
            tint: TintColor {
                color: Rgba::new(n(c.r), n(c.g), n(c.b), n(c.a)),
                ..self.tint
            },
            ..self
        }
    }
}
