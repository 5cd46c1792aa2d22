//! Pixel-buffer layout and size math
//!
//! Buffers are row-major interleaved RGBA with no row padding: `width*4`
//! bytes per row, channels R,G,B,A at offsets 0..4 within a pixel.

/// Bytes per RGBA pixel.
pub const BYTES_PER_PIXEL: usize = 4;

/// Widest image the static frame buffer accepts.
pub const MAX_FRAME_WIDTH: u32 = 800;

/// Tallest image the static frame buffer accepts.
pub const MAX_FRAME_HEIGHT: u32 = 500;

/// Capacity of the kernel's static frame buffer in bytes.
pub const FRAME_BUFFER_LEN: usize =
    MAX_FRAME_WIDTH as usize * MAX_FRAME_HEIGHT as usize * BYTES_PER_PIXEL;

/// Byte length of a `width` x `height` RGBA buffer, or `None` if the
/// product overflows the platform size type.
///
/// Zero dimensions are valid and yield `Some(0)`: a zero-pixel image has a
/// zero-length buffer.
pub fn pixel_len(width: u32, height: u32) -> Option<usize> {
    (width as usize)
        .checked_mul(height as usize)?
        .checked_mul(BYTES_PER_PIXEL)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pixel_len() {
        assert_eq!(pixel_len(2, 1), Some(8));
        assert_eq!(pixel_len(800, 500), Some(FRAME_BUFFER_LEN));
        assert_eq!(pixel_len(0, 500), Some(0));
        assert_eq!(pixel_len(800, 0), Some(0));
    }

    #[test]
    fn test_pixel_len_overflow() {
        // Overflows 32-bit and 64-bit size types alike.
        assert_eq!(pixel_len(u32::MAX, u32::MAX), None);
    }

    #[test]
    fn test_frame_buffer_len() {
        assert_eq!(FRAME_BUFFER_LEN, 1_600_000);
    }
}
