//! Path construction for capsules, ellipses and the enclosing rects used by
//! even-odd shadow silhouettes.

use tiny_skia::{Path, PathBuilder, PathSegment, Rect, Stroke};

/// Bezier handle length for a quarter circle.
const KAPPA: f32 = 0.552_284_8;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub const fn new(width: f32, height: f32) -> Self {
        Size { width, height }
    }

    pub const fn square(side: f32) -> Self {
        Size { width: side, height: side }
    }

    /// True when either side is zero, negative or NaN.
    pub fn is_empty(&self) -> bool {
        !(self.width > 0.0 && self.height > 0.0)
    }
}

/// Layout rectangle. Unlike `tiny_skia::Rect` it may be empty.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Frame {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Frame {
    pub fn from_size(size: Size) -> Self {
        Frame { x: 0.0, y: 0.0, width: size.width, height: size.height }
    }

    /// Grow by `d` on every side (negative shrinks).
    pub fn outset(self, d: f32) -> Self {
        Frame {
            x: self.x - d,
            y: self.y - d,
            width: self.width + d * 2.0,
            height: self.height + d * 2.0,
        }
    }
}

/// Append a rounded rect with circular corners of `radius` (clamped to half
/// the shorter side, so `radius >= min(w, h) / 2` yields a pill).
pub fn push_capsule(pb: &mut PathBuilder, rect: Rect, radius: f32) {
    let (x, y, w, h) = (rect.x(), rect.y(), rect.width(), rect.height());
    let r = radius.min(w / 2.0).min(h / 2.0).max(0.0);
    let k = r * KAPPA;

    pb.move_to(x + r, y);
    pb.line_to(x + w - r, y);
    pb.cubic_to(x + w - r + k, y, x + w, y + r - k, x + w, y + r);
    pb.line_to(x + w, y + h - r);
    pb.cubic_to(x + w, y + h - r + k, x + w - r + k, y + h, x + w - r, y + h);
    pb.line_to(x + r, y + h);
    pb.cubic_to(x + r - k, y + h, x, y + h - r + k, x, y + h - r);
    pb.line_to(x, y + r);
    pb.cubic_to(x, y + r - k, x + r - k, y, x + r, y);
    pb.close();
}

pub fn capsule_path(rect: Rect, radius: f32) -> Option<Path> {
    let mut pb = PathBuilder::new();
    push_capsule(&mut pb, rect, radius);
    pb.finish()
}

/// Capsule whose corners are fully rounded (radius = half the shorter side).
/// For a square rect this is the inscribed circle.
pub fn pill_path(rect: Rect) -> Option<Path> {
    capsule_path(rect, rect.width().min(rect.height()) * 0.5)
}

pub fn ellipse_path(rect: Rect) -> Option<Path> {
    PathBuilder::from_oval(rect)
}

/// Replay the segments of `path` into `pb`.
pub fn append_path(pb: &mut PathBuilder, path: &Path) {
    for segment in path.segments() {
        match segment {
            PathSegment::MoveTo(p) => pb.move_to(p.x, p.y),
            PathSegment::LineTo(p) => pb.line_to(p.x, p.y),
            PathSegment::QuadTo(p1, p) => pb.quad_to(p1.x, p1.y, p.x, p.y),
            PathSegment::CubicTo(p1, p2, p) => pb.cubic_to(p1.x, p1.y, p2.x, p2.y, p.x, p.y),
            PathSegment::Close => pb.close(),
        }
    }
}

/// `rect` with `path` appended; filled with `FillRule::EvenOdd` this covers
/// everything in `rect` outside `path`.
pub fn enclosing_path(rect: Rect, path: &Path) -> Option<Path> {
    let mut pb = PathBuilder::new();
    pb.push_rect(rect);
    append_path(&mut pb, path);
    pb.finish()
}

/// Band of width `2 * |spread|` centered on the path boundary. Adding it to
/// the fill grows the shape by `spread`; removing it shrinks the shape.
pub fn spread_band(path: &Path, spread: f32) -> Option<Path> {
    if spread == 0.0 {
        return None;
    }
    let stroke = Stroke {
        width: spread.abs() * 2.0,
        ..Stroke::default()
    };
    path.stroke(&stroke, 1.0)
}

/// `rect` grown by `dx`/`dy` on each side (negative values shrink it).
pub fn outset(rect: Rect, dx: f32, dy: f32) -> Option<Rect> {
    Rect::from_xywh(
        rect.x() - dx,
        rect.y() - dy,
        rect.width() + dx * 2.0,
        rect.height() + dy * 2.0,
    )
}
