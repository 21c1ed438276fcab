// Wire-level debug logging, off by default and toggled from the console
// through the socket debug api.
//
// The hover inspector logs per mousemove, which can mean hundreds of lines
// per second; throttle those instead of flooding the console.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

static DEBUG_ENABLED: AtomicBool = AtomicBool::new(false);

static LOG_COUNT: AtomicUsize = AtomicUsize::new(0);
const MAX_LOGS_PER_WINDOW: usize = 5;
const WINDOW_SIZE: usize = 100;

pub fn set_debug_enabled(enabled: bool) {
    DEBUG_ENABLED.store(enabled, Ordering::Relaxed);
    zoon::println!(
        "[DEBUG] wire logging {}",
        if enabled { "enabled" } else { "disabled" }
    );
}

pub fn debug_enabled() -> bool {
    DEBUG_ENABLED.load(Ordering::Relaxed)
}

/// Log one wire message when debug logging is on.
pub fn wire_log(message: &str) {
    if debug_enabled() {
        zoon::println!("[WIRE] {}", message);
    }
}

/// Throttled logging for high-frequency handlers: at most the first
/// `MAX_LOGS_PER_WINDOW` out of every `WINDOW_SIZE` calls are printed.
pub fn debug_throttled(message: &str) {
    if !debug_enabled() {
        return;
    }

    let current_count = LOG_COUNT.load(Ordering::Relaxed);
    if current_count >= WINDOW_SIZE {
        LOG_COUNT.store(0, Ordering::Relaxed);
    }

    let count = LOG_COUNT.fetch_add(1, Ordering::Relaxed);
    if count < MAX_LOGS_PER_WINDOW {
        zoon::println!("[THROTTLED] {}", message);
    } else if count == MAX_LOGS_PER_WINDOW {
        zoon::println!("[THROTTLED] rate limit reached, suppressing further messages...");
    }
}
