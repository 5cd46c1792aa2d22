//! Halftone WASM image-filtering kernel
//!
//! Compiled to `wasm32-unknown-unknown` as a cdylib, this crate is the
//! guest side of the kernel/host boundary: the host writes interleaved
//! RGBA pixels into linear memory, invokes `process_frame` or `process`,
//! and reads the transformed bytes back through the same handle. Every
//! exported signature is primitive-only (addresses, integers, one float);
//! the two sides share no type system.
//!
//! The same crate builds as an rlib so the processing and buffer logic can
//! be exercised by native tests without a WASM toolchain.

pub use halftone_shared::Filter;

pub mod buffer;
pub mod filter;
mod host;

use std::slice;

use halftone_shared::{pixel_len, FRAME_BUFFER_LEN};

/// Address of the shared static frame buffer.
#[no_mangle]
pub extern "C" fn get_buffer_offset() -> *mut u8 {
    buffer::frame_ptr()
}

/// Fixed capacity of the static frame buffer in bytes.
#[no_mangle]
pub extern "C" fn get_buffer_length() -> u32 {
    FRAME_BUFFER_LEN as u32
}

/// Run a filter over a `width` x `height` image in the static frame buffer.
///
/// Out-of-contract calls (dimensions whose byte size overflows or exceeds
/// the frame capacity, unknown filter kind) log a diagnostic and leave the
/// buffer untouched; a void export has no error channel to report through.
#[no_mangle]
pub extern "C" fn process_frame(width: u32, height: u32, kind: u32, threshold: f32) {
    let Some(len) = pixel_len(width, height) else {
        host::log("process_frame: image dimensions overflow");
        return;
    };
    if len > FRAME_BUFFER_LEN {
        host::log("process_frame: image exceeds frame buffer capacity");
        return;
    }
    let Ok(filter) = Filter::from_raw(kind, threshold) else {
        host::log("process_frame: unknown filter kind");
        return;
    };
    let pixels = unsafe { slice::from_raw_parts_mut(buffer::frame_ptr(), len) };
    filter::apply(width, height, pixels, filter);
}

/// Run a filter over a caller-provided region of `width*height*4` bytes,
/// usually one returned by [`alloc_image`].
///
/// Same degraded no-op behavior as [`process_frame`] for null pointers,
/// overflowing dimensions, and unknown filter kinds. A region shorter than
/// the declared dimensions is undefined behavior; the kernel trusts the
/// handle it handed out.
#[no_mangle]
pub extern "C" fn process(width: u32, height: u32, ptr: *mut u8, kind: u32, threshold: f32) {
    if ptr.is_null() {
        host::log("process: null pixel buffer");
        return;
    }
    let Some(len) = pixel_len(width, height) else {
        host::log("process: image dimensions overflow");
        return;
    };
    let Ok(filter) = Filter::from_raw(kind, threshold) else {
        host::log("process: unknown filter kind");
        return;
    };
    let pixels = unsafe { slice::from_raw_parts_mut(ptr, len) };
    filter::apply(width, height, pixels, filter);
}

/// Allocate a zeroed image region for the host; null signals failure
/// (zero dimension, size overflow, or out of memory).
#[no_mangle]
pub extern "C" fn alloc_image(width: u32, height: u32) -> *mut u8 {
    let ptr = buffer::alloc_pixels(width, height);
    if ptr.is_null() {
        host::log("alloc_image: allocation failed");
    }
    ptr
}

/// Release a region returned by [`alloc_image`], with the dimensions it
/// was allocated for. Null is a no-op; anything else not allocated by
/// [`alloc_image`] is undefined behavior.
#[no_mangle]
pub extern "C" fn free_image(ptr: *mut u8, width: u32, height: u32) {
    buffer::free_pixels(ptr, width, height);
}
