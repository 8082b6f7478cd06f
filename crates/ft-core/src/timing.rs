//! Setup-phase timing.
//!
//! Building a table is the only expensive step: every grid point costs one
//! slow-model evaluation. `table_timing` counts those calls and their total
//! time; the summary is rendered only when timing is switched on with
//! [`enable_timing`] or the `FT_TIMING` environment variable.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::time::Instant;

static ENABLED: AtomicBool = AtomicBool::new(false);

pub fn enable_timing() {
    ENABLED.store(true, Ordering::Relaxed);
}

pub fn is_enabled() -> bool {
    ENABLED.load(Ordering::Relaxed) || std::env::var_os("FT_TIMING").is_some()
}

/// Wall-clock stopwatch for one setup phase.
pub struct Timer {
    start: Instant,
}

impl Timer {
    pub fn start() -> Self {
        Self {
            start: Instant::now(),
        }
    }

    /// Seconds since [`Timer::start`].
    pub fn stop(self) -> f64 {
        self.start.elapsed().as_secs_f64()
    }
}

/// Call count and total duration for one kind of slow-model call.
///
/// Counters are atomics so grid sampling may record from any thread.
pub struct CallStats {
    total_ns: AtomicU64,
    count: AtomicU64,
}

impl Default for CallStats {
    fn default() -> Self {
        Self::new()
    }
}

impl CallStats {
    pub const fn new() -> Self {
        Self {
            total_ns: AtomicU64::new(0),
            count: AtomicU64::new(0),
        }
    }

    /// Run `f`, charging its duration to this counter.
    pub fn time<T>(&self, f: impl FnOnce() -> T) -> T {
        let timer = Timer::start();
        let out = f();
        self.record(timer.stop());
        out
    }

    pub fn record(&self, duration_s: f64) {
        self.total_ns
            .fetch_add((duration_s * 1e9) as u64, Ordering::Relaxed);
        self.count.fetch_add(1, Ordering::Relaxed);
    }

    pub fn count(&self) -> u64 {
        self.count.load(Ordering::Relaxed)
    }

    pub fn total_seconds(&self) -> f64 {
        self.total_ns.load(Ordering::Relaxed) as f64 / 1e9
    }

    pub fn average_seconds(&self) -> f64 {
        match self.count() {
            0 => 0.0,
            n => self.total_seconds() / n as f64,
        }
    }

    pub fn reset(&self) {
        self.total_ns.store(0, Ordering::Relaxed);
        self.count.store(0, Ordering::Relaxed);
    }
}

/// Counters for table construction.
pub mod table_timing {
    use super::CallStats;
    use std::fmt::Write as _;

    /// `rho`/`e` evaluations made while filling property matrices.
    pub static SLOW_MODEL_CALLS: CallStats = CallStats::new();
    /// `*_dpt` evaluations made for edge slopes.
    pub static BOUNDARY_CALLS: CallStats = CallStats::new();

    /// Render both counters, or `None` when timing is disabled.
    pub fn summary() -> Option<String> {
        if !super::is_enabled() {
            return None;
        }

        let mut out = String::from("=== Table setup ===\n");
        for (name, stats) in [
            ("grid samples", &SLOW_MODEL_CALLS),
            ("edge derivatives", &BOUNDARY_CALLS),
        ] {
            let _ = writeln!(
                out,
                "{name:<18} {:>8} calls {:>9.3}s total {:>9.4}ms avg",
                stats.count(),
                stats.total_seconds(),
                stats.average_seconds() * 1e3
            );
        }
        Some(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn call_stats_count_and_reset() {
        let stats = CallStats::new();
        stats.record(0.5);
        stats.record(1.5);
        assert_eq!(stats.count(), 2);
        assert!((stats.total_seconds() - 2.0).abs() < 1e-6);
        assert!((stats.average_seconds() - 1.0).abs() < 1e-6);

        stats.reset();
        assert_eq!(stats.count(), 0);
        assert_eq!(stats.average_seconds(), 0.0);
    }

    #[test]
    fn timed_closure_returns_its_value() {
        let stats = CallStats::new();
        let v = stats.time(|| 6 * 7);
        assert_eq!(v, 42);
        assert_eq!(stats.count(), 1);
    }

    #[test]
    fn summary_lists_both_counters_when_enabled() {
        enable_timing();
        let text = table_timing::summary().unwrap();
        assert!(text.contains("grid samples"));
        assert!(text.contains("edge derivatives"));
    }
}
