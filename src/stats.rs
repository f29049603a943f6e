//! Optional performance counters for the sort implementations.
//!
//! Collection is gated twice. At compile time by the `stats` feature, and at runtime by a process
//! wide flag that defaults to off. The flag is sampled once when a sort call starts, a call is
//! either measured completely or not at all. Toggling the flag while another thread is sorting is
//! not synchronized with that sort.

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Instant;

use once_cell::sync::Lazy;

/// Ticks per second of the clock used for `start_time` and `end_time`.
pub const CLOCK_RESOLUTION: u64 = 1_000_000_000;

static STATS_ENABLED: AtomicBool = AtomicBool::new(false);

static CLOCK_EPOCH: Lazy<Instant> = Lazy::new(Instant::now);

pub fn enable_stats() {
    STATS_ENABLED.store(true, Ordering::Relaxed);
    log::debug!("sort statistics enabled");
}

pub fn disable_stats() {
    STATS_ENABLED.store(false, Ordering::Relaxed);
    log::debug!("sort statistics disabled");
}

#[inline]
pub fn is_stats_enabled() -> bool {
    cfg!(feature = "stats") && STATS_ENABLED.load(Ordering::Relaxed)
}

fn clock_ticks() -> u64 {
    CLOCK_EPOCH.elapsed().as_nanos() as u64
}

/// Statistics of a single sort call.
///
/// Owned by the caller and handed to a sort as `Some(&mut stats)`. The sort resets it first, so
/// the same record can be reused across calls, but it only ever describes the last one.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SortStats {
    /// Size of one element in bytes.
    pub element_size: usize,
    /// Number of elements.
    pub array_length: usize,
    /// Clock ticks, see [`CLOCK_RESOLUTION`].
    pub start_time: u64,
    pub end_time: u64,
    pub time_elapsed_ms: f64,
    pub comparisons: usize,
    pub movements: usize,
    /// Auxiliary bytes currently held by the sort.
    pub memory_used: usize,
    /// Peak of `memory_used`.
    pub max_memory_used: usize,
}

impl SortStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Zeroes all counters and captures the start timestamp.
    pub fn reset(&mut self) {
        *self = SortStats {
            element_size: self.element_size,
            array_length: self.array_length,
            ..SortStats::default()
        };

        if is_stats_enabled() {
            self.start_time = clock_ticks();
        }
    }

    #[inline]
    pub fn record_comparison(&mut self) {
        if is_stats_enabled() {
            self.comparisons += 1;
        }
    }

    #[inline]
    pub fn record_movement(&mut self) {
        if is_stats_enabled() {
            self.movements += 1;
        }
    }

    #[inline]
    pub fn record_movements(&mut self, n: usize) {
        if is_stats_enabled() {
            self.movements += n;
        }
    }

    pub fn record_alloc(&mut self, bytes: usize) {
        if is_stats_enabled() {
            self.alloc(bytes);
        }
    }

    pub fn record_free(&mut self, bytes: usize) {
        if is_stats_enabled() {
            self.free(bytes);
        }
    }

    /// Captures the end timestamp and computes `time_elapsed_ms`.
    pub fn finalize(&mut self) {
        if is_stats_enabled() {
            self.stop_clock();
        }
    }

    fn alloc(&mut self, bytes: usize) {
        self.memory_used += bytes;
        self.max_memory_used = self.max_memory_used.max(self.memory_used);
    }

    fn free(&mut self, bytes: usize) {
        self.memory_used = self.memory_used.saturating_sub(bytes);
    }

    fn stop_clock(&mut self) {
        self.end_time = clock_ticks();
        self.time_elapsed_ms = (self.end_time.saturating_sub(self.start_time) as f64)
            / (CLOCK_RESOLUTION as f64)
            * 1000.0;
    }
}

impl fmt::Display for SortStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "element_size: {} bytes", self.element_size)?;
        writeln!(f, "array_length: {}", self.array_length)?;
        writeln!(f, "Comparisons: {}", self.comparisons)?;
        writeln!(f, "Movements: {}", self.movements)?;
        writeln!(f, "Time Spent: {:.2} ms", self.time_elapsed_ms)?;
        write!(f, "Additional Memory Used: {} bytes", self.max_memory_used)
    }
}

/// Per call view on an optional [`SortStats`] record.
///
/// If the flag is off when the call starts the record is reset and then dropped, every update
/// after that is a single branch on `None`.
pub struct StatsRecorder<'a> {
    stats: Option<&'a mut SortStats>,
}

impl<'a> StatsRecorder<'a> {
    pub fn start(stats: Option<&'a mut SortStats>, elem_size: usize, len: usize) -> Self {
        let stats = stats.and_then(|stats| {
            *stats = SortStats {
                element_size: elem_size,
                array_length: len,
                ..SortStats::default()
            };

            if is_stats_enabled() {
                stats.start_time = clock_ticks();
                Some(stats)
            } else {
                None
            }
        });

        Self { stats }
    }

    #[cfg(test)]
    pub(crate) fn disabled() -> Self {
        Self { stats: None }
    }

    #[inline]
    pub fn is_recording(&self) -> bool {
        self.stats.is_some()
    }

    #[inline(always)]
    pub fn comparison(&mut self) {
        if let Some(stats) = &mut self.stats {
            stats.comparisons += 1;
        }
    }

    #[inline(always)]
    pub fn movement(&mut self) {
        if let Some(stats) = &mut self.stats {
            stats.movements += 1;
        }
    }

    #[inline(always)]
    pub fn movements(&mut self, n: usize) {
        if let Some(stats) = &mut self.stats {
            stats.movements += n;
        }
    }

    #[inline]
    pub fn alloc(&mut self, bytes: usize) {
        if let Some(stats) = &mut self.stats {
            stats.alloc(bytes);
        }
    }

    #[inline]
    pub fn free(&mut self, bytes: usize) {
        if let Some(stats) = &mut self.stats {
            stats.free(bytes);
        }
    }

    pub fn finish(self) {
        if let Some(stats) = self.stats {
            stats.stop_clock();
        }
    }
}
