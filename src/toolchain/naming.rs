//! Zig to CMake naming tables.

/// Value of `CMAKE_SYSTEM_NAME` for a zig OS name.
///
/// CMake treats anything it doesn't recognise specially as a generic
/// Unix-like system, so unmapped operating systems fall back to `Linux`.
pub fn system_name(os: &str) -> &'static str {
    match os {
        "windows" => "Windows",
        "macos" => "Darwin",
        "wasi" => "WASI",
        _ => "Linux",
    }
}

/// Value of `CMAKE_SYSTEM_PROCESSOR` for a zig architecture name.
///
/// Unmapped architectures keep zig's own spelling.
pub fn system_processor(arch: &str) -> &str {
    match arch {
        "x86" => "X86",
        "x86_64" => "AMD64",
        other => other,
    }
}
