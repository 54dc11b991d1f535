//! Hub-owned subscriber registry.
//!
//! The [`SubscriberSet`] is mutated exclusively from inside a hub
//! worker's processing loop -- external callers only ever ask the hub to
//! add or remove them via commands, so the set is never iterated and
//! mutated concurrently.
//!
//! Delivery is strictly non-blocking. Every subscriber gets a bounded
//! buffer; a subscriber whose buffer is full when a broadcast arrives is
//! forcibly removed rather than allowed to stall the hub (and with it,
//! every other subscriber). A closed channel just means the session
//! raced its own disconnect and is removed silently.

use liveboard_types::SubscriberId;
use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TrySendError;
use tracing::{debug, warn};

/// Buffered updates each subscriber may fall behind by before it is
/// considered stalled and dropped.
pub const DELIVERY_BUFFER: usize = 16;

/// The set of delivery channels registered with one hub.
#[derive(Debug)]
pub struct SubscriberSet<U> {
    entries: Vec<(SubscriberId, mpsc::Sender<U>)>,
}

impl<U: Clone> SubscriberSet<U> {
    /// Create an empty set.
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Number of registered subscribers.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no subscribers are registered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Allocate a delivery channel and register its sending half.
    ///
    /// Returns the new subscriber's id and the receiving half for the
    /// owning session.
    pub fn add(&mut self) -> (SubscriberId, mpsc::Receiver<U>) {
        let id = SubscriberId::new();
        let (tx, rx) = mpsc::channel(DELIVERY_BUFFER);
        self.entries.push((id, tx));
        (id, rx)
    }

    /// Remove a subscriber by id. Unknown ids are a silent no-op.
    ///
    /// Removal is unordered (`swap_remove`), which drops the sender and
    /// thereby closes the delivery channel so the owning session can
    /// detect completion.
    pub fn remove(&mut self, id: SubscriberId) -> bool {
        match self.entries.iter().position(|(entry, _)| *entry == id) {
            Some(index) => {
                self.entries.swap_remove(index);
                true
            }
            None => false,
        }
    }

    /// Push `update` to every subscriber. Returns the delivery count.
    ///
    /// Subscribers that cannot accept the update are removed in place:
    /// a full buffer means the consumer stalled, a closed channel means
    /// it already went away.
    pub fn broadcast(&mut self, update: &U) -> usize {
        let mut delivered: usize = 0;
        let mut index = 0;
        while let Some((id, tx)) = self.entries.get(index) {
            match tx.try_send(update.clone()) {
                Ok(()) => {
                    delivered = delivered.saturating_add(1);
                    index = index.saturating_add(1);
                }
                Err(TrySendError::Full(_)) => {
                    warn!(subscriber = %id, "delivery buffer full, dropping stalled subscriber");
                    self.entries.swap_remove(index);
                }
                Err(TrySendError::Closed(_)) => {
                    debug!(subscriber = %id, "subscriber already disconnected, removing");
                    self.entries.swap_remove(index);
                }
            }
        }
        delivered
    }
}

impl<U: Clone> Default for SubscriberSet<U> {
    fn default() -> Self {
        Self::new()
    }
}
