#[cfg(feature = "metrics")]
use std::time::Instant;

#[cfg(feature = "metrics")]
use log::debug;

/// Runs given function, logging how long it took (when the `metrics` feature
/// is enabled).
#[cfg(feature = "metrics")]
pub fn measure<T>(label: &str, f: impl FnOnce() -> T) -> T {
    let tt = Instant::now();
    let val = f();

    debug!(
        "{}: {}",
        label,
        humantime::format_duration(tt.elapsed())
    );

    val
}

#[cfg(not(feature = "metrics"))]
pub fn measure<T>(_: &str, f: impl FnOnce() -> T) -> T {
    f()
}
