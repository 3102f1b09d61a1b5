//! Async driver for the PAJ7620U2 gesture sensor.
//!
//! This crate provides an Embassy-compatible async I2C driver for the
//! PixArt PAJ7620U2 as fitted to the M5Stack Unit Gesture. The sensor
//! recognises nine gestures: up, down, left, right, forward, backward,
//! clockwise, anti-clockwise, and wave.
//!
//! # Architecture
//!
//! - **`driver`** (crate-private): single-byte register access and bank
//!   selection.
//! - **[`Paj7620`]**: power-up sequence, identity check, and gesture
//!   decoding with settle delays.
//! - **[`GestureWatcher`]**: polling loop that reports each gesture
//!   transition exactly once to registered observers.
//!
//! # Quick start
//!
//! ```ignore
//! use paj7620_driver::{gesture_name, GestureWatcher, Paj7620, DEFAULT_ADDRESS};
//!
//! // Construct with any `embedded-hal-async` I2C bus and delay
//! let sensor = SENSOR.init(Mutex::new(Paj7620::new(i2c, delay, DEFAULT_ADDRESS)));
//! sensor.lock().await.initialize().await?;
//!
//! let watcher = GestureWatcher::new(sensor);
//! watcher.on_gesture_changed(&|g| info!("{}", gesture_name(g.bits())))?;
//! watcher.run(backoff_delay).await?;
//! ```
//!
//! # Features
//!
//! - **`defmt`**: structured logging and [`defmt::Format`] implementations
//!   on public types.
//! - **`embassy-time`**: [`Paj7620::new_embassy`], which waits on
//!   `embassy_time::Delay`.

#![cfg_attr(not(test), no_std)]

pub use config::{Timing, WatcherConfig};
pub use error::{GestureError, WatchError};
pub use gesture::{decode_flags, gesture_name, is_gesture, Gesture, GestureName};
pub use observers::{Observer, ObserverRegistry, DEFAULT_OBSERVER_CAPACITY};
pub use registers::{DEFAULT_ADDRESS, PART_ID};
pub use sensor::Paj7620;
pub use watcher::GestureWatcher;

pub mod config;
mod driver;
mod error;
pub mod gesture;
mod observers;
pub mod registers;
mod sensor;
mod watcher;

#[cfg(test)]
mod mock;
