//! Host diagnostics
//!
//! One-way text channel from kernel to host, purely observational: the
//! host may print or drop messages, processing results never depend on it.

/// Log a message to the host (for debugging)
#[cfg(target_arch = "wasm32")]
pub fn log(msg: &str) {
    extern "C" {
        fn log(ptr: u32, len: u32);
    }

    unsafe {
        log(msg.as_ptr() as u32, msg.len() as u32);
    }
}

/// Native builds (the rlib under test) have no host to talk to.
#[cfg(not(target_arch = "wasm32"))]
pub fn log(_msg: &str) {}
