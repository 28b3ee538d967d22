use crate::app::store::{AdField, AdvertisementId};
use std::collections::HashMap;
use std::time::{Duration, Instant};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FieldAction {
    Copy,
    Enhance,
}

#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerKey {
    pub id: AdvertisementId,
    pub field: AdField,
    pub action: FieldAction,
}

impl TimerKey {
    pub fn new(id: AdvertisementId, field: AdField, action: FieldAction) -> Self {
        Self { id, field, action }
    }
}

/// Fixed-duration `idle -> in-progress -> idle` state per (record, field, action).
///
/// Deadlines are polled by the event loop. Cancelling drops a pending completion so it is
/// never reported.
pub struct FieldTimers {
    deadlines: HashMap<TimerKey, Instant>,
    copy_duration: Duration,
    enhance_duration: Duration,
}

impl FieldTimers {
    pub fn new(copy_duration: Duration, enhance_duration: Duration) -> Self {
        Self {
            deadlines: HashMap::new(),
            copy_duration,
            enhance_duration,
        }
    }

    fn duration_for(&self, action: FieldAction) -> Duration {
        match action {
            FieldAction::Copy => self.copy_duration,
            FieldAction::Enhance => self.enhance_duration,
        }
    }

    /// Starts the timer unless it is already running. Re-triggers are dropped, not queued.
    pub fn start(&mut self, key: TimerKey, now: Instant) -> bool {
        if self.deadlines.contains_key(&key) {
            return false;
        }
        let deadline = now + self.duration_for(key.action);
        self.deadlines.insert(key, deadline);
        true
    }

    pub fn is_active(&self, id: &AdvertisementId, field: AdField, action: FieldAction) -> bool {
        self.deadlines
            .contains_key(&TimerKey::new(id.clone(), field, action))
    }

    pub fn any_active(&self, action: FieldAction) -> bool {
        self.deadlines.keys().any(|key| key.action == action)
    }

    /// Removes and returns every timer whose deadline has passed.
    pub fn tick(&mut self, now: Instant) -> Vec<TimerKey> {
        let mut expired: Vec<TimerKey> = self
            .deadlines
            .iter()
            .filter(|(_, deadline)| **deadline <= now)
            .map(|(key, _)| key.clone())
            .collect();
        for key in &expired {
            self.deadlines.remove(key);
        }
        expired.sort();
        expired
    }

    pub fn cancel_record(&mut self, id: &AdvertisementId) -> usize {
        let before = self.deadlines.len();
        self.deadlines.retain(|key, _| &key.id != id);
        before - self.deadlines.len()
    }

    pub fn cancel_all(&mut self) -> usize {
        let count = self.deadlines.len();
        self.deadlines.clear();
        count
    }

    pub fn is_empty(&self) -> bool {
        self.deadlines.is_empty()
    }
}
