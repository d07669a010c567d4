//! Rim-lit ellipse: a flat fill, two faint opposing inner shades and a thin
//! stroke whose halves carry mirrored vertical white gradients.

use tiny_skia::{
    Color, FillRule, GradientStop, LinearGradient, Mask, Paint, PathBuilder, Pixmap, Point, Rect, SpreadMode, Stroke,
    Transform,
};

use crate::color::Rgba;
use crate::shader::blank_canvas;
use crate::shadow::{fill, ShadowCompositor, ShadowSpec};
use crate::shape::{ellipse_path, outset, Size};
use crate::stretch::{pack, StretchableImage};

const RIM_WIDTH: f32 = 0.66;
const SHADE_OFFSET: f32 = 10.0;
const SHADE_BLUR: f32 = 24.0;
const SHADE_ALPHA: f32 = 0.035;

/// Gradient stops for the left half, top to bottom. `true` is the bright end.
const LEFT_STOPS: [(f32, bool); 5] = [(0.0, true), (0.5, true), (0.7, false), (0.9, false), (1.0, true)];
const RIGHT_STOPS: [(f32, bool); 5] = [(0.0, true), (0.1, false), (0.3, false), (0.5, true), (1.0, true)];

pub fn generate_foreground_image(size: Size, is_dark: bool, fill_color: Rgba) -> StretchableImage {
    render_foreground(&ShadowCompositor::default(), size, is_dark, fill_color)
}

/// Same as [`generate_foreground_image`] with an explicit compositor.
pub fn render_foreground(compositor: &ShadowCompositor, size: Size, is_dark: bool, fill_color: Rgba) -> StretchableImage {
    let size = if size.is_empty() { Size::square(1.0) } else { size };
    let mut canvas = blank_canvas(size.width, size.height);

    let Some(bounds) = Rect::from_xywh(0.0, 0.0, size.width, size.height) else {
        return pack(canvas);
    };
    let Some(ellipse) = ellipse_path(bounds) else {
        return pack(canvas);
    };
    fill(&mut canvas, &ellipse, FillRule::Winding, fill_color, tiny_skia::BlendMode::SourceOver);

    // The rim is stroked on the ellipse pulled in by half its width so it
    // never spills past the bitmap.
    let rim = outset(bounds, -RIM_WIDTH / 2.0, -RIM_WIDTH / 2.0).and_then(ellipse_path);
    if let Some(rim) = &rim {
        let (near, far) = if is_dark { (1.0, 0.0) } else { (0.0, 1.0) };
        let shades = [
            ShadowSpec::inner((SHADE_OFFSET, SHADE_OFFSET), SHADE_BLUR, Rgba::white(near, SHADE_ALPHA)),
            ShadowSpec::inner((-SHADE_OFFSET, -SHADE_OFFSET), SHADE_BLUR, Rgba::white(far, SHADE_ALPHA)),
        ];
        compositor.render_all(&mut canvas, &shades, rim);

        let max_alpha = if is_dark { 0.25 } else { 0.9 };
        let half = size.width / 2.0;
        stroke_half(&mut canvas, rim, Rect::from_xywh(0.0, 0.0, half, size.height), &LEFT_STOPS, max_alpha, size.height);
        stroke_half(
            &mut canvas,
            rim,
            Rect::from_xywh(size.width - half, 0.0, half, size.height),
            &RIGHT_STOPS,
            max_alpha,
            size.height,
        );
    }

    pack(canvas)
}

fn stroke_half(
    canvas: &mut Pixmap,
    rim: &tiny_skia::Path,
    clip: Option<Rect>,
    stops: &[(f32, bool)],
    max_alpha: f32,
    height: f32,
) {
    let Some(clip) = clip else { return };
    let Some(mut mask) = Mask::new(canvas.width(), canvas.height()) else {
        return;
    };
    let clip_path = PathBuilder::from_rect(clip);
    mask.fill_path(&clip_path, FillRule::Winding, false, Transform::identity());

    let stops = stops
        .iter()
        .map(|&(pos, bright)| {
            let a = if bright { max_alpha } else { 0.0 };
            GradientStop::new(pos, Color::from_rgba(1.0, 1.0, 1.0, a).unwrap_or(Color::TRANSPARENT))
        })
        .collect();
    let Some(shader) = LinearGradient::new(
        Point::from_xy(0.0, 0.0),
        Point::from_xy(0.0, height),
        stops,
        SpreadMode::Pad,
        Transform::identity(),
    ) else {
        return;
    };

    let paint = Paint {
        shader,
        anti_alias: true,
        ..Paint::default()
    };
    let stroke = Stroke {
        width: RIM_WIDTH,
        ..Stroke::default()
    };
    canvas.stroke_path(rim, &paint, &stroke, Transform::identity(), Some(&mask));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn alpha(p: &Pixmap, x: u32, y: u32) -> u8 {
        p.pixel(x, y).unwrap().alpha()
    }

    #[test]
    fn packs_with_half_caps() {
        let img = generate_foreground_image(Size::new(40.0, 30.0), true, Rgba::white(0.1, 0.5));
        assert_eq!((img.width(), img.height()), (40, 30));
        assert_eq!((img.left_cap_width, img.top_cap_height), (20, 15));
    }

    #[test]
    fn zero_size_is_one_pixel() {
        let img = generate_foreground_image(Size::default(), false, Rgba::WHITE);
        assert_eq!((img.width(), img.height()), (1, 1));
    }

    #[test]
    fn fill_and_top_rim_are_visible() {
        let fill_color = Rgba::white(0.0, 0.5);
        let img = generate_foreground_image(Size::square(40.0), true, fill_color);
        let center = alpha(&img.pixels, 20, 20);
        assert!((120..=150).contains(&center), "center alpha {center}");
        assert!(alpha(&img.pixels, 20, 0) > 0);
        assert_eq!(alpha(&img.pixels, 0, 0), 0, "outside the ellipse");
    }

    #[test]
    fn lower_rim_lights_the_right_half_only() {
        let img = generate_foreground_image(Size::square(40.0), false, Rgba::TRANSPARENT);
        let row = 32;
        let left: u32 = (0..10).map(|x| alpha(&img.pixels, x, row) as u32).sum();
        let right: u32 = (30..40).map(|x| alpha(&img.pixels, x, row) as u32).sum();
        assert!(right > left + 60, "left {left} right {right}");
    }
}
