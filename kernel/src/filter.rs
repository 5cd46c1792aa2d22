//! Per-pixel transforms
//!
//! Both filters walk the buffer in row-major order (top row first, left to
//! right) and touch each pixel exactly once; pixels are independent, so the
//! transforms are idempotent per invocation.
//!
//! The two variants handle alpha differently on purpose: threshold forces
//! A=255 on the dark branch only, grayscale never writes alpha. They are
//! separate historical behaviors and are kept as separate code paths.

use halftone_shared::{pixel_len, Filter};

/// Perceptual luminance of an RGB triple, in `[0, 1]`.
///
/// Fixed 0.30/0.59/0.11 luma weights over the raw (not gamma-corrected)
/// channel values.
pub fn luminance(r: u8, g: u8, b: u8) -> f32 {
    (r as f32 / 255.0) * 0.30 + (g as f32 / 255.0) * 0.59 + (b as f32 / 255.0) * 0.11
}

/// Apply `filter` in place to a `width` x `height` RGBA buffer.
///
/// The caller guarantees `pixels` holds at least `width*height*4` bytes;
/// dimensions whose byte size overflows the size type are equally out of
/// contract. Violations never touch out-of-range memory: an overflowing
/// size is ignored as zero pixels, a short buffer panics on the prefix
/// slicing (and asserts first in debug builds). Zero width or height
/// processes zero pixels.
pub fn apply(width: u32, height: u32, pixels: &mut [u8], filter: Filter) {
    debug_assert!(
        pixel_len(width, height).is_some_and(|len| len <= pixels.len()),
        "pixel buffer shorter than {width}x{height} RGBA"
    );
    let Some(len) = pixel_len(width, height) else {
        return;
    };
    let pixels = &mut pixels[..len];

    match filter {
        Filter::Threshold { threshold } => threshold_pass(pixels, threshold),
        Filter::Grayscale => grayscale_pass(pixels),
    }
}

/// Binarize by luminance: at or above `threshold` becomes white with alpha
/// untouched, below becomes black with alpha forced opaque.
fn threshold_pass(pixels: &mut [u8], threshold: f32) {
    for px in pixels.chunks_exact_mut(4) {
        if luminance(px[0], px[1], px[2]) >= threshold {
            px[0] = 255;
            px[1] = 255;
            px[2] = 255;
        } else {
            px[0] = 0;
            px[1] = 0;
            px[2] = 0;
            px[3] = 255;
        }
    }
}

/// Truncating integer average of R, G, B written back to all three
/// channels. The sum is widened to u32 so 255*3 cannot wrap.
fn grayscale_pass(pixels: &mut [u8]) {
    for px in pixels.chunks_exact_mut(4) {
        let gray = ((px[0] as u32 + px[1] as u32 + px[2] as u32) / 3) as u8;
        px[0] = gray;
        px[1] = gray;
        px[2] = gray;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const THRESHOLD_DEFAULT: Filter = Filter::Threshold { threshold: 0.5 };

    #[test]
    fn test_threshold_white_keeps_alpha() {
        let mut pixels = [255, 255, 255, 42];
        apply(1, 1, &mut pixels, THRESHOLD_DEFAULT);
        assert_eq!(pixels, [255, 255, 255, 42]);
    }

    #[test]
    fn test_threshold_black_forces_alpha() {
        let mut pixels = [0, 0, 0, 7];
        apply(1, 1, &mut pixels, THRESHOLD_DEFAULT);
        assert_eq!(pixels, [0, 0, 0, 255]);
    }

    #[test]
    fn test_threshold_two_pixel_image() {
        // (100,100,100) has luminance 100/255 = 0.392, (200,10,10) lands at
        // (0.30*200 + 0.59*10 + 0.11*10)/255 = 0.263; both fall below 0.5.
        let mut pixels = [100, 100, 100, 255, 200, 10, 10, 0];
        apply(2, 1, &mut pixels, THRESHOLD_DEFAULT);
        assert_eq!(pixels, [0, 0, 0, 255, 0, 0, 0, 255]);
    }

    #[test]
    fn test_threshold_unclamped_range() {
        // Above 1.0 nothing reaches the cutoff, so even white goes black.
        let mut pixels = [255, 255, 255, 9];
        apply(1, 1, &mut pixels, Filter::Threshold { threshold: 1.5 });
        assert_eq!(pixels, [0, 0, 0, 255]);

        // Below 0.0 everything passes, alpha untouched on the light branch.
        let mut pixels = [0, 0, 0, 9];
        apply(1, 1, &mut pixels, Filter::Threshold { threshold: -1.0 });
        assert_eq!(pixels, [255, 255, 255, 9]);
    }

    #[test]
    fn test_threshold_idempotent() {
        let mut once = [100, 100, 100, 255, 200, 10, 10, 0, 250, 250, 250, 3];
        apply(3, 1, &mut once, THRESHOLD_DEFAULT);
        let mut twice = once;
        apply(3, 1, &mut twice, THRESHOLD_DEFAULT);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_grayscale_truncates() {
        let mut pixels = [10, 20, 30, 255, 255, 0, 0, 128];
        apply(2, 1, &mut pixels, Filter::Grayscale);
        // (10+20+30)/3 = 20 exactly, 255/3 = 85 truncated.
        assert_eq!(pixels, [20, 20, 20, 255, 85, 85, 85, 128]);
    }

    #[test]
    fn test_grayscale_leaves_alpha() {
        let mut pixels = [200, 10, 10, 0];
        apply(1, 1, &mut pixels, Filter::Grayscale);
        assert_eq!(pixels, [73, 73, 73, 0]);
    }

    #[test]
    fn test_grayscale_idempotent() {
        let mut once = [10, 20, 30, 255, 200, 10, 10, 0];
        apply(2, 1, &mut once, Filter::Grayscale);
        let mut twice = once;
        apply(2, 1, &mut twice, Filter::Grayscale);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_zero_dimensions_touch_nothing() {
        let mut pixels = [100, 100, 100, 100];
        apply(0, 1, &mut pixels, THRESHOLD_DEFAULT);
        assert_eq!(pixels, [100, 100, 100, 100]);
        apply(1, 0, &mut pixels, Filter::Grayscale);
        assert_eq!(pixels, [100, 100, 100, 100]);
    }

    #[test]
    fn test_processes_only_declared_region() {
        // Buffer longer than width*height*4: the tail stays untouched.
        let mut pixels = [0, 0, 0, 0, 100, 100, 100, 100];
        apply(1, 1, &mut pixels, THRESHOLD_DEFAULT);
        assert_eq!(pixels, [0, 0, 0, 255, 100, 100, 100, 100]);
    }

    #[test]
    fn test_luminance_weights() {
        assert_eq!(luminance(255, 255, 255), 1.0);
        assert_eq!(luminance(0, 0, 0), 0.0);
        assert!((luminance(255, 0, 0) - 0.30).abs() < 1e-6);
        assert!((luminance(0, 255, 0) - 0.59).abs() < 1e-6);
        assert!((luminance(0, 0, 255) - 0.11).abs() < 1e-6);
    }
}
