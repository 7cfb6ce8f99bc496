// cli/constants.rs: program identity, size multipliers and the display level

use std::sync::atomic::{AtomicU32, Ordering};

// ── Identity ─────────────────────────────────────────────────────────────────
pub const COMPRESSOR_NAME: &str = "bdelta";
pub const BDZ_EXTENSION: &str = ".bdz";

// ── Size multipliers ─────────────────────────────────────────────────────────
pub const KB: u64 = 1 << 10;
pub const MB: u64 = 1 << 20;
pub const GB: u64 = 1 << 30;

// ── Display level ────────────────────────────────────────────────────────────
//
// Crate-wide so library code (scheduler, io layer) can report through the same
// gate as the binary.
//
// 0 = no output; 1 = errors only; 2 = normal; 3 = progress; 4 = verbose
pub static DISPLAY_LEVEL: AtomicU32 = AtomicU32::new(2);

#[inline]
pub fn display_level() -> u32 {
    DISPLAY_LEVEL.load(Ordering::Relaxed)
}

#[inline]
pub fn set_display_level(level: u32) {
    DISPLAY_LEVEL.store(level, Ordering::Relaxed);
}

// ── Display macros ───────────────────────────────────────────────────────────

/// Print to stderr unconditionally.
#[macro_export]
macro_rules! display {
    ($($arg:tt)*) => { eprint!($($arg)*) };
}

/// Print to stderr when the display level is at least `level`.
#[macro_export]
macro_rules! displaylevel {
    ($level:expr, $($arg:tt)*) => {
        if $crate::cli::constants::display_level() >= $level {
            eprint!($($arg)*);
        }
    };
}
