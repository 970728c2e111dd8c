//! Internal constants for Foresight.
//!
//! Values mirror the host shell's own timings. They are defaults only; the
//! configuration file can override the animation durations.

/// Timing constants for the close-animation debounce.
pub mod timing {
    /// Destroy animation of a normal window (ms).
    ///
    /// Matches `DESTROY_WINDOW_ANIMATION_TIME` of the shell's window manager.
    pub const DESTROY_WINDOW_ANIMATION_MS: u64 = 150;

    /// Destroy animation of a dialog or modal dialog (ms).
    ///
    /// Matches `DIALOG_DESTROY_WINDOW_ANIMATION_TIME`.
    pub const DIALOG_DESTROY_WINDOW_ANIMATION_MS: u64 = 100;
}

/// Logging defaults.
pub mod logging {
    /// Filter used when `RUST_LOG` is unset.
    pub const DEFAULT_FILTER: &str = "foresight=info,foresight_lib=info";

    /// Filter used with `--verbose`.
    pub const VERBOSE_FILTER: &str = "foresight=debug,foresight_lib=debug";
}
