//! Ordered, fixed-capacity list of gesture observers.

use heapless::Vec;

use crate::error::WatchError;
use crate::gesture::Gesture;

/// Default number of observer slots in a [`GestureWatcher`](crate::GestureWatcher).
pub const DEFAULT_OBSERVER_CAPACITY: usize = 8;

/// A callback invoked with the new gesture on every transition.
///
/// Observers run synchronously on the watcher's task. A slow observer delays
/// the next sample and every observer registered after it.
pub type Observer<'a> = &'a dyn Fn(Gesture);

/// Observers in registration order.
///
/// There is no removal: entries live as long as the registry. Registering the
/// same observer twice is allowed and it then appears twice in every
/// [`snapshot`](Self::snapshot).
pub struct ObserverRegistry<'a, const N: usize> {
    observers: Vec<Observer<'a>, N>,
}

impl<'a, const N: usize> ObserverRegistry<'a, N> {
    pub const fn new() -> Self {
        Self {
            observers: Vec::new(),
        }
    }

    /// Append `observer` after every existing entry.
    ///
    /// # Errors
    /// * [`WatchError::RegistryFull`] if all `N` slots are taken.
    pub fn register(&mut self, observer: Observer<'a>) -> Result<(), WatchError> {
        self.observers
            .push(observer)
            .map_err(|_| WatchError::RegistryFull)
    }

    pub fn len(&self) -> usize {
        self.observers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observers.is_empty()
    }

    /// Copy of the current list, so observers can be called without holding
    /// whatever lock guards the registry.
    pub fn snapshot(&self) -> Vec<Observer<'a>, N> {
        self.observers.clone()
    }
}

impl<const N: usize> Default for ObserverRegistry<'_, N> {
    fn default() -> Self {
        Self::new()
    }
}
