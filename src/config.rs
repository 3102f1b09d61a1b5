//! Timing configuration for the sensor and the watcher loop.
//!
//! All waits the driver performs live here. [`Timing::default()`] and
//! [`WatcherConfig::default()`] reproduce the delays the M5Stack unit was
//! tuned with; callers can shorten or lengthen any of them at construction
//! time without modifying library source.

// ---------------------------------------------------------------------------
// Timing
// ---------------------------------------------------------------------------

/// Settle delays used by [`Paj7620`](crate::Paj7620), in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Timing {
    /// Wait before the first bus access after power-up. Default: 100.
    pub power_up_ms: u32,
    /// Wait after selecting bank 0 for the identity read. Default: 10.
    pub bank_select_ms: u32,
    /// Wait after the configuration table has been written. Default: 100.
    pub init_complete_ms: u32,

    // ── Gesture settle delays ────────────────────────────────────────
    /// Wait after any directional gesture is detected. Default: 100.
    pub gesture_settle_ms: u32,
    /// Extra wait after `Forward` or `Backward`, on top of
    /// `gesture_settle_ms`. The sensor reports these mid-motion. Default: 200.
    pub depth_settle_ms: u32,
    /// Wait after a wave is detected. Default: 1000.
    pub wave_settle_ms: u32,
}

impl Default for Timing {
    fn default() -> Self {
        Self {
            power_up_ms: 100,
            bank_select_ms: 10,
            init_complete_ms: 100,
            gesture_settle_ms: 100,
            depth_settle_ms: 200,
            wave_settle_ms: 1000,
        }
    }
}

// ---------------------------------------------------------------------------
// WatcherConfig
// ---------------------------------------------------------------------------

/// Configuration for [`GestureWatcher`](crate::GestureWatcher).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct WatcherConfig {
    /// How long the loop sleeps before re-checking an uninitialised
    /// sensor. Default: 1000.
    pub idle_backoff_ms: u32,
}

impl Default for WatcherConfig {
    fn default() -> Self {
        Self {
            idle_backoff_ms: 1000,
        }
    }
}
