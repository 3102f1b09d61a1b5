//! Error types for the gesture driver and watcher.

use core::fmt;

/// Errors that can occur when communicating with the PAJ7620.
#[derive(Debug, PartialEq, Eq)]
pub enum GestureError<E> {
    /// Underlying I2C bus error.
    I2c(E),

    /// The part id registers did not read back `0x7620`: the device is
    /// absent or a different part is answering at the address.
    IdentityMismatch {
        /// Part id actually read, `high << 8 | low`.
        found: u16,
    },
}

// Allow ergonomic `?` propagation from raw I2C errors.
impl<E> From<E> for GestureError<E> {
    fn from(error: E) -> Self {
        GestureError::I2c(error)
    }
}

impl<E: fmt::Debug> fmt::Display for GestureError<E> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            GestureError::I2c(e) => write!(f, "I2C error: {:?}", e),
            GestureError::IdentityMismatch { found } => {
                write!(f, "Unexpected part id {:#06x} (expected 0x7620)", found)
            }
        }
    }
}

#[cfg(feature = "defmt")]
impl<E: defmt::Format> defmt::Format for GestureError<E> {
    fn format(&self, f: defmt::Formatter) {
        match self {
            GestureError::I2c(e) => defmt::write!(f, "I2C error: {}", e),
            GestureError::IdentityMismatch { found } => {
                defmt::write!(f, "Unexpected part id {=u16:#x}", found)
            }
        }
    }
}

/// Errors reported by [`GestureWatcher`](crate::GestureWatcher).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum WatchError {
    /// The observer registry has no free slot.
    RegistryFull,

    /// A polling loop is already running for this watcher.
    AlreadyRunning,
}

impl fmt::Display for WatchError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            WatchError::RegistryFull => write!(f, "Observer registry is full"),
            WatchError::AlreadyRunning => write!(f, "Gesture watcher is already running"),
        }
    }
}
