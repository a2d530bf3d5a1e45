#![cfg_attr(docsrs, feature(doc_auto_cfg))]
#![warn(clippy::print_stderr)]
#![warn(clippy::print_stdout)]

#[cfg(feature = "color")]
pub use anstream::eprint;
#[cfg(feature = "color")]
pub use anstream::eprintln;
#[cfg(not(feature = "color"))]
pub use std::eprint;
#[cfg(not(feature = "color"))]
pub use std::eprintln;

/// Feature-flag controlled trace of what the runner is doing
///
/// Enable with `cargo build -F snaprun/debug`.
#[cfg(feature = "debug")]
#[macro_export]
macro_rules! debug {
    ($($arg:tt)*) => ({
        $crate::eprint!("[{:>w$}] \t", module_path!(), w = 28);
        $crate::eprintln!($($arg)*);
    })
}

/// Feature-flag controlled trace of what the runner is doing
#[cfg(not(feature = "debug"))]
#[macro_export]
macro_rules! debug {
    ($($arg:tt)*) => {};
}
