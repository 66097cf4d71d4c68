use std::sync::atomic::{AtomicU8, Ordering};

/// Output level: 0 = quiet, 1 = normal, 2 = verbose.
static VERBOSITY: AtomicU8 = AtomicU8::new(1);

pub const QUIET: u8 = 0;
pub const NORMAL: u8 = 1;
pub const VERBOSE: u8 = 2;

pub fn set_verbosity(level: u8) {
    VERBOSITY.store(level, Ordering::Relaxed);
}

pub fn verbosity() -> u8 {
    VERBOSITY.load(Ordering::Relaxed)
}

pub fn is_verbose() -> bool {
    verbosity() >= VERBOSE
}

#[macro_export]
macro_rules! info {
    ($($arg:tt)*) => {
        if $crate::logger::verbosity() >= $crate::logger::NORMAL {
            println!($($arg)*);
        }
    };
}

#[macro_export]
macro_rules! verbose {
    ($($arg:tt)*) => {
        if $crate::logger::is_verbose() {
            println!("🔍 {}", format!($($arg)*));
        }
    };
}

#[macro_export]
macro_rules! warn {
    ($($arg:tt)*) => {
        if $crate::logger::verbosity() >= $crate::logger::NORMAL {
            eprintln!("⚠️  Warning: {}", format!($($arg)*));
        }
    };
}

#[macro_export]
macro_rules! error {
    ($($arg:tt)*) => {
        eprintln!("❌ {}", format!($($arg)*));
    };
}
