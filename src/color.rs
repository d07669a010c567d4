//! Tint colors and the HSB math the highlight recipes are derived from.

use std::fmt;

/// Straight-alpha RGBA color with components in `0.0..=1.0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

/// Hue, saturation, brightness and alpha, all in `0.0..=1.0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hsb {
    pub h: f32,
    pub s: f32,
    pub b: f32,
    pub a: f32,
}

impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [r, g, b, a] = self.to_rgba8();
        write!(f, "#{:02x}{:02x}{:02x}{:02x}", r, g, b, a)
    }
}

impl Rgba {
    pub const WHITE: Rgba = Rgba::new(1.0, 1.0, 1.0, 1.0);
    pub const BLACK: Rgba = Rgba::new(0.0, 0.0, 0.0, 1.0);
    pub const TRANSPARENT: Rgba = Rgba::new(0.0, 0.0, 0.0, 0.0);

    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Rgba { r, g, b, a }
    }

    /// Gray level `white` at the given alpha.
    pub const fn white(white: f32, a: f32) -> Self {
        Rgba { r: white, g: white, b: white, a }
    }

    pub fn from_rgba8(r: u8, g: u8, b: u8, a: u8) -> Self {
        Rgba {
            r: r as f32 / 255.0,
            g: g as f32 / 255.0,
            b: b as f32 / 255.0,
            a: a as f32 / 255.0,
        }
    }

    /// Parse `#RRGGBB` or `#RRGGBBAA` (leading `#` optional).
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.trim().trim_start_matches('#');
        let channel = |i: usize| u8::from_str_radix(hex.get(i..i + 2)?, 16).ok();
        match hex.len() {
            6 => Some(Rgba::from_rgba8(channel(0)?, channel(2)?, channel(4)?, 255)),
            8 => Some(Rgba::from_rgba8(channel(0)?, channel(2)?, channel(4)?, channel(6)?)),
            _ => None,
        }
    }

    pub fn to_rgba8(self) -> [u8; 4] {
        let q = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        [q(self.r), q(self.g), q(self.b), q(self.a)]
    }

    pub fn to_skia(self) -> tiny_skia::Color {
        tiny_skia::Color::from_rgba(
            self.r.clamp(0.0, 1.0),
            self.g.clamp(0.0, 1.0),
            self.b.clamp(0.0, 1.0),
            self.a.clamp(0.0, 1.0),
        )
        .unwrap_or(tiny_skia::Color::TRANSPARENT)
    }

    pub fn with_alpha(self, a: f32) -> Self {
        Rgba { a, ..self }
    }

    pub fn with_multiplied_alpha(self, factor: f32) -> Self {
        Rgba { a: (self.a * factor).clamp(0.0, 1.0), ..self }
    }

    pub fn hsb(&self) -> Hsb {
        let max = self.r.max(self.g).max(self.b);
        let min = self.r.min(self.g).min(self.b);
        let delta = max - min;

        let s = if max > 0.0 { delta / max } else { 0.0 };
        let h = if delta <= f32::EPSILON {
            0.0
        } else if max == self.r {
            ((self.g - self.b) / delta).rem_euclid(6.0) / 6.0
        } else if max == self.g {
            ((self.b - self.r) / delta + 2.0) / 6.0
        } else {
            ((self.r - self.g) / delta + 4.0) / 6.0
        };

        Hsb { h, s, b: max, a: self.a }
    }

    pub fn from_hsb(hsb: Hsb) -> Self {
        let h = hsb.h.rem_euclid(1.0) * 6.0;
        let s = hsb.s.clamp(0.0, 1.0);
        let v = hsb.b.clamp(0.0, 1.0);

        let sector = h.floor();
        let f = h - sector;
        let p = v * (1.0 - s);
        let q = v * (1.0 - s * f);
        let t = v * (1.0 - s * (1.0 - f));

        let (r, g, b) = match sector as u32 % 6 {
            0 => (v, t, p),
            1 => (q, v, p),
            2 => (p, v, t),
            3 => (p, q, v),
            4 => (t, p, v),
            _ => (v, p, q),
        };
        Rgba { r, g, b, a: hsb.a }
    }

    /// Scale hue, saturation and brightness independently, clamping the result.
    pub fn with_multiplied(self, hue: f32, saturation: f32, brightness: f32) -> Self {
        let hsb = self.hsb();
        Rgba::from_hsb(Hsb {
            h: (hsb.h * hue).clamp(0.0, 1.0),
            s: (hsb.s * saturation).clamp(0.0, 1.0),
            b: (hsb.b * brightness).clamp(0.0, 1.0),
            a: hsb.a,
        })
    }

    /// Scale brightness by `factor`. Whatever exceeds full brightness is spent
    /// washing out saturation, so bright tints still move toward white.
    pub fn adjusted_perceived_brightness(self, factor: f32) -> Self {
        let hsb = self.hsb();
        let target = hsb.b * factor.max(0.0);
        let (b, s) = if target > 1.0 {
            (1.0, hsb.s / target)
        } else {
            (target, hsb.s)
        };
        Rgba::from_hsb(Hsb { b, s, ..hsb })
    }
}
