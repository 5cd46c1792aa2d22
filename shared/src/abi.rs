//! Boundary naming
//!
//! Names of the kernel's `extern "C"` exports and host imports. The host
//! runtime binds against these constants; the kernel's `#[no_mangle]` items
//! must keep the literal names in sync (attribute names cannot reference
//! constants).

/// Export: address of the static frame buffer.
pub const EXPORT_GET_BUFFER_OFFSET: &str = "get_buffer_offset";

/// Export: capacity of the static frame buffer in bytes.
pub const EXPORT_GET_BUFFER_LENGTH: &str = "get_buffer_length";

/// Export: run a filter over the static frame buffer.
pub const EXPORT_PROCESS_FRAME: &str = "process_frame";

/// Export: run a filter over a caller-provided region.
pub const EXPORT_PROCESS: &str = "process";

/// Export: allocate an exclusively owned image region.
pub const EXPORT_ALLOC_IMAGE: &str = "alloc_image";

/// Export: release a region returned by `alloc_image`.
pub const EXPORT_FREE_IMAGE: &str = "free_image";

/// Export: the kernel's linear memory.
pub const EXPORT_MEMORY: &str = "memory";

/// Module name the kernel's host imports resolve in.
pub const HOST_MODULE: &str = "env";

/// Host import: one-way diagnostic log, `(ptr, len)` of a UTF-8 message.
pub const HOST_LOG: &str = "log";
