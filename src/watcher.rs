//! Gesture change watcher.
//!
//! Contains [`GestureWatcher`], which owns the observer registry and runs
//! the polling loop that samples a shared [`Paj7620`] and notifies
//! observers once per gesture transition.

use core::cell::RefCell;

use embassy_futures::select::{select, Either};
use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_sync::blocking_mutex::Mutex as BlockingMutex;
use embassy_sync::mutex::Mutex;
use embassy_sync::signal::Signal;
use embedded_hal_async::delay::DelayNs;
use embedded_hal_async::i2c::I2c;

use crate::config::WatcherConfig;
use crate::error::WatchError;
use crate::gesture::Gesture;
use crate::observers::{Observer, ObserverRegistry, DEFAULT_OBSERVER_CAPACITY};
use crate::sensor::Paj7620;

/// Registry plus the one-shot flags guarding the loop.
struct Shared<'a, const N: usize> {
    registry: ObserverRegistry<'a, N>,
    /// Set by the first registration; the loop does not poll before this.
    armed: bool,
    /// Set while a loop is running.
    running: bool,
}

/// Polls a shared sensor and notifies observers on gesture transitions.
///
/// The sensor sits behind an async [`Mutex`] so application code can call
/// [`Paj7620::initialize()`] while the watcher is running. The mutex is
/// held for the whole of one sample, settle delays included, so sampling
/// and initialisation never interleave on the bus.
///
/// The loop itself is a regular `async fn`, **not** an Embassy `#[task]`.
/// Callers should spawn a thin, concrete task wrapper that calls
/// [`run()`](Self::run), since Embassy tasks cannot be generic:
///
/// ```ignore
/// #[embassy_executor::task]
/// async fn gesture_task(sensor: &'static Mutex<CriticalSectionRawMutex, Sensor>) {
///     let watcher = GestureWatcher::new(sensor);
///     watcher.on_gesture_changed(&log_gesture).unwrap();
///     watcher.run(embassy_time::Delay).await.unwrap();
/// }
/// ```
///
/// # Control flow
///
/// 1. Wait until the first observer has been registered.
/// 2. Loop:
///    - Lock the sensor. If it is not initialised, unlock and sleep
///      `idle_backoff_ms`, then re-check.
///    - Otherwise take one sample (bus errors read as [`Gesture::None`]) and
///      unlock.
///    - If the sample differs from the last reported gesture, remember it
///      and call every observer in registration order.
///
/// The last reported gesture starts at [`Gesture::None`] every time the
/// loop starts, so an initial `None` sample is not reported.
///
/// Observers are called in-line on the watcher's task: a slow observer
/// delays the next sample. A panicking observer is not caught.
pub struct GestureWatcher<'a, M, I2C, D, const N: usize = DEFAULT_OBSERVER_CAPACITY>
where
    M: RawMutex,
{
    sensor: &'a Mutex<M, Paj7620<I2C, D>>,
    shared: BlockingMutex<M, RefCell<Shared<'a, N>>>,
    armed: Signal<M, ()>,
    config: WatcherConfig,
}

impl<'a, M, I2C, D, const N: usize> GestureWatcher<'a, M, I2C, D, N>
where
    M: RawMutex,
    I2C: I2c,
    D: DelayNs,
{
    /// Create an unarmed watcher over a shared sensor.
    pub fn new(sensor: &'a Mutex<M, Paj7620<I2C, D>>) -> Self {
        Self {
            sensor,
            shared: BlockingMutex::new(RefCell::new(Shared {
                registry: ObserverRegistry::new(),
                armed: false,
                running: false,
            })),
            armed: Signal::new(),
            config: WatcherConfig::default(),
        }
    }

    /// Replace the loop configuration.
    pub fn with_config(mut self, config: WatcherConfig) -> Self {
        self.config = config;
        self
    }

    // ── Observer registry ────────────────────────────────────────────

    /// Register `observer` to be called with the new gesture on every
    /// transition.
    ///
    /// Observers are called in registration order. The first registration
    /// arms the loop; later ones never start a second loop.
    ///
    /// # Errors
    /// * [`WatchError::RegistryFull`] if all `N` observer slots are taken.
    pub fn on_gesture_changed(&self, observer: Observer<'a>) -> Result<(), WatchError> {
        let first = self.shared.lock(|shared| -> Result<bool, WatchError> {
            let mut shared = shared.borrow_mut();
            shared.registry.register(observer)?;
            Ok(!core::mem::replace(&mut shared.armed, true))
        })?;

        if first {
            self.armed.signal(());
        }
        Ok(())
    }

    /// Number of registered observers.
    pub fn observer_count(&self) -> usize {
        self.shared.lock(|shared| shared.borrow().registry.len())
    }

    /// `true` once an observer has been registered.
    pub fn is_armed(&self) -> bool {
        self.shared.lock(|shared| shared.borrow().armed)
    }

    /// `true` while a loop is running.
    pub fn is_running(&self) -> bool {
        self.shared.lock(|shared| shared.borrow().running)
    }

    fn notify(&self, gesture: Gesture) {
        // Snapshot first: an observer may register further observers.
        let observers = self.shared.lock(|shared| shared.borrow().registry.snapshot());
        for observer in observers.iter() {
            observer(gesture);
        }
    }

    // ── Polling loop ─────────────────────────────────────────────────

    /// Poll forever.
    ///
    /// `backoff` is used only for the idle wait while the sensor is
    /// uninitialised; settle delays use the sensor's own delay.
    ///
    /// # Errors
    /// * [`WatchError::AlreadyRunning`] if another loop is running on this
    ///   watcher. Otherwise this never returns.
    pub async fn run<B: DelayNs>(&self, backoff: B) -> Result<(), WatchError> {
        let never = Signal::<M, ()>::new();
        self.run_until(backoff, &never).await
    }

    /// Poll until `stop` is signalled.
    ///
    /// `stop` is checked before every sample and interrupts the idle
    /// backoff, but never a sample in progress.
    ///
    /// # Errors
    /// * [`WatchError::AlreadyRunning`] if another loop is running on this
    ///   watcher. The sensor is not touched.
    pub async fn run_until<B: DelayNs>(
        &self,
        mut backoff: B,
        stop: &Signal<M, ()>,
    ) -> Result<(), WatchError> {
        let _running = RunGuard::claim(&self.shared)?;

        if !self.is_armed() {
            if let Either::Second(()) = select(self.armed.wait(), stop.wait()).await {
                return Ok(());
            }
        }

        #[cfg(feature = "defmt")]
        defmt::info!("Gesture watcher started");

        let mut last = Gesture::None;
        loop {
            if stop.signaled() {
                break;
            }

            // Sensor lock held for the whole sample, released before any
            // observer runs.
            let sample = {
                let mut sensor = self.sensor.lock().await;
                if sensor.is_initialized() {
                    Some(sensor.gesture().await)
                } else {
                    None
                }
            };

            let Some(gesture) = sample else {
                let idle = backoff.delay_ms(self.config.idle_backoff_ms);
                if let Either::Second(()) = select(idle, stop.wait()).await {
                    break;
                }
                continue;
            };

            if gesture != last {
                #[cfg(feature = "defmt")]
                defmt::debug!("Gesture changed: {} -> {}", last, gesture);
                last = gesture;
                self.notify(gesture);
            }
        }

        #[cfg(feature = "defmt")]
        defmt::info!("Gesture watcher stopped");
        Ok(())
    }
}

/// Holds the `running` flag for the lifetime of one loop, including when the
/// loop future is dropped mid-poll.
struct RunGuard<'w, 'a, M: RawMutex, const N: usize> {
    shared: &'w BlockingMutex<M, RefCell<Shared<'a, N>>>,
}

impl<'w, 'a, M: RawMutex, const N: usize> RunGuard<'w, 'a, M, N> {
    fn claim(shared: &'w BlockingMutex<M, RefCell<Shared<'a, N>>>) -> Result<Self, WatchError> {
        shared.lock(|s| {
            let mut s = s.borrow_mut();
            if s.running {
                return Err(WatchError::AlreadyRunning);
            }
            s.running = true;
            Ok(())
        })?;
        Ok(Self { shared })
    }
}

impl<M: RawMutex, const N: usize> Drop for RunGuard<'_, '_, M, N> {
    fn drop(&mut self) {
        self.shared.lock(|s| s.borrow_mut().running = false);
    }
}
