// Full-debug tracing of API traffic, enabled with --full-debug
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

// Global flag for full debug mode
static FULL_DEBUG_ENABLED: AtomicBool = AtomicBool::new(false);

/// Set the global full debug mode state
pub fn set_full_debug(enabled: bool) {
    FULL_DEBUG_ENABLED.store(enabled, Ordering::Relaxed);
}

/// Check if full debug mode is enabled
pub fn is_full_debug_enabled() -> bool {
    FULL_DEBUG_ENABLED.load(Ordering::Relaxed)
}

/// Get current timestamp for logging
pub fn get_timestamp() -> u128 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis()
}

/// Macro for logging API calls specifically
#[macro_export]
macro_rules! debug_api_call {
    ($method:expr, $url:expr) => {
        if $crate::debug::is_full_debug_enabled() {
            let timestamp = $crate::debug::get_timestamp();
            eprintln!("🌐 [{}] API: {} {}", timestamp, $method, $url);
        }
    };
    ($method:expr, $url:expr, $body:expr) => {
        if $crate::debug::is_full_debug_enabled() {
            let timestamp = $crate::debug::get_timestamp();
            eprintln!("🌐 [{}] API: {} {} - Body: {}", timestamp, $method, $url, $body);
        }
    };
}

/// Macro for logging important debug information
#[macro_export]
macro_rules! debug_info {
    ($($arg:tt)*) => {
        if $crate::debug::is_full_debug_enabled() {
            let timestamp = $crate::debug::get_timestamp();
            eprintln!("ℹ️  [{}] DEBUG: {}", timestamp, format!($($arg)*));
        }
    };
}
