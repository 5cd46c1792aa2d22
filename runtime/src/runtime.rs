//! wasmtime host implementation.
//!
//! Loads a kernel module that exports the Halftone boundary (see
//! `halftone_shared::abi`) and drives both processing strategies: the
//! kernel's shared static frame buffer and exclusively owned allocated
//! regions. The host validates sizes with checked math before crossing the
//! boundary, so Rust callers get `Err` values where the void guest entry
//! points could only degrade to a logged no-op.

use anyhow::{bail, Context, Result};
use halftone_shared::{abi, pixel_len, Filter};
use wasmtime::*;

use crate::host::register_host_functions;

/// Fuel floor for any kernel invocation.
const FUEL_BASE: u64 = 1_000_000;

/// Additional fuel per pixel. Generous against the handful of operations a
/// pixel actually costs, small enough to stop a runaway module.
const FUEL_PER_PIXEL: u64 = 512;

/// Instantiated kernel module, ready for execution.
pub struct ImageKernel {
    store: Store<()>,
    memory: Memory,
    get_buffer_offset: TypedFunc<(), u32>,
    get_buffer_length: TypedFunc<(), u32>,
    process_frame: TypedFunc<(u32, u32, u32, f32), ()>,
    process: TypedFunc<(u32, u32, u32, u32, f32), ()>,
    alloc_image: TypedFunc<(u32, u32), u32>,
    free_image: TypedFunc<(u32, u32, u32), ()>,
}

/// WASM runtime for loading and executing kernel modules.
pub struct KernelRuntime {
    engine: Engine,
}

impl KernelRuntime {
    /// Create a new WASM runtime with security-hardened configuration.
    pub fn new() -> Result<Self> {
        let mut config = Config::new();
        config.consume_fuel(true);
        config.wasm_bulk_memory(true);
        config.wasm_multi_value(false);
        config.wasm_threads(false);

        let engine = Engine::new(&config).context("Failed to create WASM engine")?;
        Ok(Self { engine })
    }

    /// Compile and instantiate a kernel module.
    ///
    /// The module must export its linear `memory` plus the six boundary
    /// entry points named in `halftone_shared::abi`.
    pub fn load(&self, wasm_bytes: &[u8]) -> Result<ImageKernel> {
        let module =
            Module::new(&self.engine, wasm_bytes).context("Failed to compile kernel module")?;

        let mut store = Store::new(&self.engine, ());
        store.set_fuel(FUEL_BASE).ok();

        let mut linker = Linker::new(&self.engine);
        register_host_functions(&mut linker)?;

        let instance = linker
            .instantiate(&mut store, &module)
            .context("Failed to instantiate kernel module")?;

        let memory = instance
            .get_memory(&mut store, abi::EXPORT_MEMORY)
            .context("Kernel module must export its linear memory")?;

        let get_buffer_offset = instance
            .get_typed_func::<(), u32>(&mut store, abi::EXPORT_GET_BUFFER_OFFSET)
            .context("Kernel module must export `get_buffer_offset() -> i32`")?;
        let get_buffer_length = instance
            .get_typed_func::<(), u32>(&mut store, abi::EXPORT_GET_BUFFER_LENGTH)
            .context("Kernel module must export `get_buffer_length() -> i32`")?;
        let process_frame = instance
            .get_typed_func::<(u32, u32, u32, f32), ()>(&mut store, abi::EXPORT_PROCESS_FRAME)
            .context("Kernel module must export `process_frame(width, height, kind, threshold)`")?;
        let process = instance
            .get_typed_func::<(u32, u32, u32, u32, f32), ()>(&mut store, abi::EXPORT_PROCESS)
            .context("Kernel module must export `process(width, height, ptr, kind, threshold)`")?;
        let alloc_image = instance
            .get_typed_func::<(u32, u32), u32>(&mut store, abi::EXPORT_ALLOC_IMAGE)
            .context("Kernel module must export `alloc_image(width, height) -> i32`")?;
        let free_image = instance
            .get_typed_func::<(u32, u32, u32), ()>(&mut store, abi::EXPORT_FREE_IMAGE)
            .context("Kernel module must export `free_image(ptr, width, height)`")?;

        Ok(ImageKernel {
            store,
            memory,
            get_buffer_offset,
            get_buffer_length,
            process_frame,
            process,
            alloc_image,
            free_image,
        })
    }
}

impl ImageKernel {
    /// Fixed capacity of the kernel's static frame buffer in bytes.
    pub fn frame_capacity(&mut self) -> Result<u32> {
        self.store.set_fuel(FUEL_BASE).ok();
        self.get_buffer_length
            .call(&mut self.store, ())
            .context("get_buffer_length failed")
    }

    /// Run `filter` over `pixels` through the kernel's static frame buffer.
    ///
    /// `pixels` must be exactly `width*height*4` bytes of interleaved RGBA
    /// and fit the frame capacity; the transformed bytes are read back in
    /// place. The frame is shared kernel state, so callers interleaving two
    /// logical images get corrupted pixels, not memory unsafety.
    pub fn apply_in_frame(
        &mut self,
        width: u32,
        height: u32,
        pixels: &mut [u8],
        filter: Filter,
    ) -> Result<()> {
        let len = expected_len(width, height, pixels)?;
        let capacity = self.frame_capacity()? as usize;
        if len > capacity {
            bail!(
                "{}x{} image ({} bytes) exceeds the frame buffer capacity ({} bytes)",
                width,
                height,
                len,
                capacity
            );
        }

        self.store.set_fuel(fuel_for(len)).ok();
        let offset = self
            .get_buffer_offset
            .call(&mut self.store, ())
            .context("get_buffer_offset failed")? as usize;

        self.write_pixels(offset, pixels)?;
        self.process_frame
            .call(
                &mut self.store,
                (width, height, filter.kind(), filter.threshold()),
            )
            .context("process_frame failed")?;
        self.read_pixels(offset, pixels)
    }

    /// Run `filter` over `pixels` through a freshly allocated guest region,
    /// released before returning on success and error paths alike.
    ///
    /// Unlike the shared frame, the region is exclusively owned, so
    /// multiple logical images may be processed through one kernel without
    /// coordinating. Allocation failure in the kernel (zero dimensions,
    /// size overflow, out of memory) surfaces as an error.
    pub fn apply_allocated(
        &mut self,
        width: u32,
        height: u32,
        pixels: &mut [u8],
        filter: Filter,
    ) -> Result<()> {
        let len = expected_len(width, height, pixels)?;
        if len == 0 {
            bail!("cannot allocate a zero-pixel image");
        }

        self.store.set_fuel(fuel_for(len)).ok();
        let ptr = self
            .alloc_image
            .call(&mut self.store, (width, height))
            .context("alloc_image failed")?;
        if ptr == 0 {
            bail!(
                "kernel failed to allocate a {}x{} image ({} bytes)",
                width,
                height,
                len
            );
        }

        let result = self.process_allocated(ptr, width, height, pixels, filter);

        // The region is exclusively ours; release it whatever happened.
        self.store.set_fuel(FUEL_BASE).ok();
        self.free_image
            .call(&mut self.store, (ptr, width, height))
            .context("free_image failed")?;

        result
    }

    fn process_allocated(
        &mut self,
        ptr: u32,
        width: u32,
        height: u32,
        pixels: &mut [u8],
        filter: Filter,
    ) -> Result<()> {
        self.write_pixels(ptr as usize, pixels)?;
        self.process
            .call(
                &mut self.store,
                (width, height, ptr, filter.kind(), filter.threshold()),
            )
            .context("process failed")?;
        self.read_pixels(ptr as usize, pixels)
    }

    fn write_pixels(&mut self, offset: usize, pixels: &[u8]) -> Result<()> {
        let mem_data = self.memory.data_mut(&mut self.store);
        let end = region_end(offset, pixels.len(), mem_data.len())?;
        mem_data[offset..end].copy_from_slice(pixels);
        Ok(())
    }

    fn read_pixels(&mut self, offset: usize, pixels: &mut [u8]) -> Result<()> {
        let mem_data = self.memory.data(&self.store);
        let end = region_end(offset, pixels.len(), mem_data.len())?;
        pixels.copy_from_slice(&mem_data[offset..end]);
        Ok(())
    }
}

fn expected_len(width: u32, height: u32, pixels: &[u8]) -> Result<usize> {
    let len = pixel_len(width, height)
        .with_context(|| format!("{width}x{height} image byte size overflows"))?;
    if pixels.len() != len {
        bail!(
            "pixel buffer is {} bytes, a {}x{} RGBA image requires {}",
            pixels.len(),
            width,
            height,
            len
        );
    }
    Ok(len)
}

fn region_end(offset: usize, len: usize, mem_len: usize) -> Result<usize> {
    let end = offset
        .checked_add(len)
        .context("pixel region overflows guest addressing")?;
    if end > mem_len {
        bail!(
            "pixel region {}..{} exceeds guest memory ({} bytes)",
            offset,
            end,
            mem_len
        );
    }
    Ok(end)
}

fn fuel_for(len: usize) -> u64 {
    FUEL_BASE + FUEL_PER_PIXEL * (len as u64 / 4)
}
