//! Host functions available to kernel modules

use halftone_shared::abi;
use wasmtime::*;

/// Register host functions with the WASM linker
pub fn register_host_functions(linker: &mut Linker<()>) -> Result<(), Error> {
    // Diagnostic log channel from the kernel; observational only, the
    // kernel's results never depend on it.
    linker.func_wrap(
        abi::HOST_MODULE,
        abi::HOST_LOG,
        |mut caller: Caller<'_, ()>, ptr: u32, len: u32| {
            // Read string from memory
            if let Some(memory) = caller
                .get_export(abi::EXPORT_MEMORY)
                .and_then(|e| e.into_memory())
            {
                let mut buf = vec![0u8; len as usize];
                if memory.read(&caller, ptr as usize, &mut buf).is_ok() {
                    if let Ok(msg) = String::from_utf8(buf) {
                        tracing::debug!("[kernel] {}", msg);
                    }
                }
            }
        },
    )?;

    Ok(())
}
