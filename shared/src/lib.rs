//! Shared contract between the Halftone kernel and its hosts
//!
//! This crate contains the filter variants, buffer-size math, and boundary
//! naming shared by the WASM guest kernel and the native host runtime.

pub mod abi;
pub mod filter;
pub mod layout;

// Re-export commonly used types
pub use filter::{AbiError, Filter};
pub use layout::{pixel_len, FRAME_BUFFER_LEN, MAX_FRAME_HEIGHT, MAX_FRAME_WIDTH};
