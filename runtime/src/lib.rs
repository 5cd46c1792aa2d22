//! Native host runtime for the Halftone image kernel
//!
//! Loads a kernel module compiled to WebAssembly and drives it over its
//! primitive boundary: write RGBA bytes into guest linear memory, invoke
//! processing, read the transformed bytes back. Nothing structured crosses
//! the boundary; the host and the kernel share no type system.

pub mod host;
pub mod runtime;

pub use runtime::{ImageKernel, KernelRuntime};
