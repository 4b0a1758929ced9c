//! Best-effort single-slot cache for the most recently detected user.
//!
//! Process-lifetime and advisory only: the profile lookup writes the slot,
//! `/api/profiles/current` reads it. Last write wins; concurrent lookups race
//! and readers may observe a stale value. Nothing else may depend on this
//! slot for correctness.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::{Arc, PoisonError, RwLock};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectedUser {
    pub fid: u64,
    pub username: String,
    pub detected_at: DateTime<Utc>,
}

#[derive(Clone, Default)]
pub struct DetectedUserSlot {
    slot: Arc<RwLock<Option<DetectedUser>>>,
}

impl DetectedUserSlot {
    pub fn record(&self, user: DetectedUser) {
        let mut guard = self.slot.write().unwrap_or_else(PoisonError::into_inner);
        *guard = Some(user);
    }

    pub fn current(&self) -> Option<DetectedUser> {
        self.slot
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(fid: u64, username: &str) -> DetectedUser {
        DetectedUser {
            fid,
            username: username.to_string(),
            detected_at: Utc::now(),
        }
    }

    #[test]
    fn starts_empty() {
        let slot = DetectedUserSlot::default();
        assert!(slot.current().is_none());
    }

    #[test]
    fn last_write_wins() {
        let slot = DetectedUserSlot::default();
        slot.record(user(1, "alice"));
        slot.record(user(2, "bob"));

        let current = slot.current().expect("slot should be populated");
        assert_eq!(current.fid, 2);
        assert_eq!(current.username, "bob");
    }

    #[test]
    fn clones_share_the_slot() {
        let slot = DetectedUserSlot::default();
        let other = slot.clone();
        slot.record(user(7, "carol"));
        assert_eq!(other.current().map(|u| u.fid), Some(7));
    }
}
