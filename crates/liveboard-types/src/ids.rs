//! Type-safe identifier wrapper around [`Uuid`].
//!
//! A subscriber handle is identified by a [`SubscriberId`] so the hub's
//! registry never confuses delivery channels belonging to different
//! sessions. IDs use UUID v7 (time-ordered) so log output sorts by
//! connection time.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a subscriber registered with a broadcast hub.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SubscriberId(pub Uuid);

impl SubscriberId {
    /// Create a new identifier using UUID v7 (time-ordered).
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    /// Return the inner [`Uuid`] value.
    pub const fn into_inner(self) -> Uuid {
        self.0
    }
}

impl Default for SubscriberId {
    fn default() -> Self {
        Self::new()
    }
}

impl core::fmt::Display for SubscriberId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<Uuid> for SubscriberId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

impl From<SubscriberId> for Uuid {
    fn from(id: SubscriberId) -> Self {
        id.0
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_unique() {
        let a = SubscriberId::new();
        let b = SubscriberId::new();
        assert_ne!(a, b);
    }

    #[test]
    fn display_matches_inner_uuid() {
        let id = SubscriberId::new();
        assert_eq!(id.to_string(), id.into_inner().to_string());
    }
}
