//! Load a compiled kernel module and threshold a generated gradient.
//!
//! Build the kernel first:
//!   cargo build -p halftone-kernel --target wasm32-unknown-unknown --release
//! then:
//!   cargo run -p halftone-runtime --example apply_filter -- \
//!     target/wasm32-unknown-unknown/release/halftone_kernel.wasm

use anyhow::{Context, Result};
use halftone_runtime::KernelRuntime;
use halftone_shared::Filter;

fn main() -> Result<()> {
    let path = std::env::args()
        .nth(1)
        .context("usage: apply_filter <kernel.wasm>")?;
    let wasm = std::fs::read(&path).with_context(|| format!("Failed to read {path}"))?;

    let runtime = KernelRuntime::new()?;
    let mut kernel = runtime.load(&wasm)?;

    // Horizontal gray gradient, dark to light.
    let (width, height) = (64u32, 16u32);
    let mut pixels = Vec::with_capacity((width * height * 4) as usize);
    for _y in 0..height {
        for x in 0..width {
            let v = (x * 255 / (width - 1)) as u8;
            pixels.extend_from_slice(&[v, v, v, 255]);
        }
    }

    kernel.apply_in_frame(width, height, &mut pixels, Filter::default())?;

    let white = pixels.chunks_exact(4).filter(|px| px[0] == 255).count();
    println!(
        "{} of {} pixels thresholded to white",
        white,
        width * height
    );
    Ok(())
}
