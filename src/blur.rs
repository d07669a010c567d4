//! Separable Gaussian blur over premultiplied RGBA8 pixmaps.
//!
//! Shadow blur radii follow the drawing-context convention where `blur` is
//! roughly twice the Gaussian standard deviation.

use tiny_skia::Pixmap;

/// Standard deviation for a drop-shadow `blur` value.
pub fn sigma_for_blur(blur: f32) -> f32 {
    blur.max(0.0) * 0.5
}

/// Q16 fixed-point Gaussian weights spanning `ceil(3 * sigma)` on each side.
/// Weights always sum to exactly `1 << 16`.
pub fn gaussian_kernel_q16(sigma: f32) -> Vec<u32> {
    if !sigma.is_finite() || sigma <= 0.0 {
        return vec![1 << 16];
    }
    let r = (sigma * 3.0).ceil().max(1.0) as i32;
    let denom = 2.0 * (sigma as f64) * (sigma as f64);

    let weights_f: Vec<f64> = (-r..=r).map(|i| (-(i * i) as f64 / denom).exp()).collect();
    let sum: f64 = weights_f.iter().sum();

    let mut weights: Vec<u32> = weights_f
        .iter()
        .map(|w| ((w / sum) * 65536.0).round().clamp(0.0, 65536.0) as u32)
        .collect();

    let acc: i64 = weights.iter().map(|&w| i64::from(w)).sum();
    let delta = 65536 - acc;
    if delta != 0 {
        let mid = weights.len() / 2;
        weights[mid] = (i64::from(weights[mid]) + delta).clamp(0, 65536) as u32;
    }
    weights
}

/// Blur `pixmap` in place. Samples past the edges clamp to the border pixel.
pub fn gaussian_blur(pixmap: &mut Pixmap, sigma: f32) {
    let kernel = gaussian_kernel_q16(sigma);
    if kernel.len() == 1 {
        return;
    }
    let (w, h) = (pixmap.width(), pixmap.height());
    let mut tmp = vec![0u8; pixmap.data().len()];
    horizontal_pass(pixmap.data(), &mut tmp, w, h, &kernel);
    vertical_pass(&tmp, pixmap.data_mut(), w, h, &kernel);
}

fn horizontal_pass(src: &[u8], dst: &mut [u8], width: u32, height: u32, k: &[u32]) {
    let radius = (k.len() / 2) as i32;
    let w = width as i32;
    for y in 0..height as i32 {
        for x in 0..w {
            let mut acc = [0u64; 4];
            for (ki, &kw) in k.iter().enumerate() {
                let sx = (x + ki as i32 - radius).clamp(0, w - 1);
                let idx = ((y * w + sx) as usize) * 4;
                for c in 0..4 {
                    acc[c] += u64::from(kw) * u64::from(src[idx + c]);
                }
            }
            let out = ((y * w + x) as usize) * 4;
            write_premultiplied(&mut dst[out..out + 4], acc);
        }
    }
}

fn vertical_pass(src: &[u8], dst: &mut [u8], width: u32, height: u32, k: &[u32]) {
    let radius = (k.len() / 2) as i32;
    let w = width as i32;
    let h = height as i32;
    for y in 0..h {
        for x in 0..w {
            let mut acc = [0u64; 4];
            for (ki, &kw) in k.iter().enumerate() {
                let sy = (y + ki as i32 - radius).clamp(0, h - 1);
                let idx = ((sy * w + x) as usize) * 4;
                for c in 0..4 {
                    acc[c] += u64::from(kw) * u64::from(src[idx + c]);
                }
            }
            let out = ((y * w + x) as usize) * 4;
            write_premultiplied(&mut dst[out..out + 4], acc);
        }
    }
}

/// Round Q16 accumulators back to bytes, keeping color <= alpha.
fn write_premultiplied(dst: &mut [u8], acc: [u64; 4]) {
    let a = q16_to_u8(acc[3]);
    for c in 0..3 {
        dst[c] = q16_to_u8(acc[c]).min(a);
    }
    dst[3] = a;
}

fn q16_to_u8(acc: u64) -> u8 {
    ((acc + 32768) >> 16).min(255) as u8
}
