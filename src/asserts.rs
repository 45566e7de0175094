//! Assertion macros used for checking internal invariants.
//!
//! Simple assertions are always checked. Extreme assertions may be expensive (e.g. re-verifying a
//! complete packing) and are only checked when the `debug-checks` feature is enabled.

/// Assertion which is always checked.
#[macro_export]
macro_rules! hs_assert_simple {
    ($($arg:tt)*) => {
        assert!($($arg)*);
    };
}

/// Assertion which is only checked when the `debug-checks` feature is enabled.
#[macro_export]
macro_rules! hs_assert_extreme {
    ($($arg:tt)*) => {
        if cfg!(feature = "debug-checks") {
            assert!($($arg)*);
        }
    };
}
