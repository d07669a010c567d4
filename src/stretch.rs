//! 9-slice packing: fixed corners, one stretchable middle row and column.

use tiny_skia::Pixmap;

#[derive(Debug, Clone)]
pub struct StretchableImage {
    pub pixels: Pixmap,
    pub left_cap_width: u32,
    pub top_cap_height: u32,
}

/// Pack a symmetric bitmap with its caps at the center.
pub fn pack(bitmap: Pixmap) -> StretchableImage {
    let left = bitmap.width() / 2;
    let top = bitmap.height() / 2;
    StretchableImage::with_caps(bitmap, left, top)
}

impl StretchableImage {
    /// Caps are clamped so the stretchable column/row stays inside the bitmap.
    pub fn with_caps(pixels: Pixmap, left_cap_width: u32, top_cap_height: u32) -> Self {
        StretchableImage {
            left_cap_width: left_cap_width.min(pixels.width() - 1),
            top_cap_height: top_cap_height.min(pixels.height() - 1),
            pixels,
        }
    }

    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    /// Resize by repeating the middle column and row. Targets smaller than
    /// the source are raised to the source size.
    pub fn stretch(&self, width: u32, height: u32) -> Option<Pixmap> {
        let (sw, sh) = (self.width(), self.height());
        let (tw, th) = (width.max(sw), height.max(sh));
        let mut out = Pixmap::new(tw, th)?;

        let columns: Vec<u32> = (0..tw).map(|x| source_index(x, tw, sw, self.left_cap_width)).collect();
        let src = self.pixels.pixels();
        let dst = out.pixels_mut();
        for y in 0..th {
            let sy = source_index(y, th, sh, self.top_cap_height);
            let src_row = &src[(sy * sw) as usize..((sy + 1) * sw) as usize];
            let dst_row = &mut dst[(y * tw) as usize..((y + 1) * tw) as usize];
            for (d, &sx) in dst_row.iter_mut().zip(&columns) {
                *d = src_row[sx as usize];
            }
        }
        Some(out)
    }
}

/// Map a target coordinate to its source along one axis of length `src_len`
/// stretched to `dst_len` (`dst_len >= src_len`).
fn source_index(i: u32, dst_len: u32, src_len: u32, cap: u32) -> u32 {
    let trailing = src_len - cap - 1;
    if i < cap {
        i
    } else if i >= dst_len - trailing {
        src_len - (dst_len - i)
    } else {
        cap
    }
}
