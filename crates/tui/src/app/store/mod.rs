//! In-memory advertisement collection with reducer-style mutations.
//!
//! The store is owned by [`crate::app::AppState`] and mutated only from the UI thread.
//! Views read it through [`AdvertisementStore::snapshot`] and compare versions to notice
//! changes.

mod model;

pub use model::{format_price, AdField, Advertisement, AdvertisementId};

use std::collections::VecDeque;
use thiserror::Error;
use tracing::info;

const MAX_INTENT_RECORDS: usize = 50;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("advertisement id already exists: {0}")]
    DuplicateId(AdvertisementId),
}

#[derive(Clone, Debug, PartialEq)]
pub enum AdAction {
    Add(Advertisement),
    Update(Advertisement),
    Delete(AdvertisementId),
    EnhanceIntent {
        id: AdvertisementId,
        field: Option<AdField>,
    },
    FacebookAdIntent(AdvertisementId),
    SetRecentPhoto(Option<String>),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DispatchOutcome {
    Changed,
    Unchanged,
    Recorded,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IntentKind {
    Enhance,
    FacebookAd,
}

impl IntentKind {
    pub fn label(self) -> &'static str {
        match self {
            IntentKind::Enhance => "enhance with AI",
            IntentKind::FacebookAd => "create Facebook ad",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IntentRecord {
    pub seq: u64,
    pub kind: IntentKind,
    pub id: AdvertisementId,
    pub field: Option<AdField>,
}

pub struct StoreSnapshot<'a> {
    pub version: u64,
    pub records: &'a [Advertisement],
}

#[derive(Default)]
pub struct AdvertisementStore {
    records: Vec<Advertisement>,
    version: u64,
    recent_photo: Option<String>,
    intents: VecDeque<IntentRecord>,
    next_intent_seq: u64,
}

impl AdvertisementStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn dispatch(&mut self, action: AdAction) -> Result<DispatchOutcome, StoreError> {
        match action {
            AdAction::Add(record) => self.add(record).map(|_| DispatchOutcome::Changed),
            AdAction::Update(record) => Ok(changed_or_not(self.update(record))),
            AdAction::Delete(id) => Ok(changed_or_not(self.delete(&id) > 0)),
            AdAction::EnhanceIntent { id, field } => {
                self.record_intent(IntentKind::Enhance, id, field);
                Ok(DispatchOutcome::Recorded)
            }
            AdAction::FacebookAdIntent(id) => {
                self.record_intent(IntentKind::FacebookAd, id, None);
                Ok(DispatchOutcome::Recorded)
            }
            AdAction::SetRecentPhoto(photo) => {
                if self.recent_photo == photo {
                    return Ok(DispatchOutcome::Unchanged);
                }
                self.recent_photo = photo;
                self.bump();
                Ok(DispatchOutcome::Changed)
            }
        }
    }

    /// Appends a record. Rejects an id that is already present.
    pub fn add(&mut self, record: Advertisement) -> Result<(), StoreError> {
        if self.get(&record.id).is_some() {
            return Err(StoreError::DuplicateId(record.id));
        }
        info!(id = %record.id, name = %record.name, "advertisement added");
        self.records.push(record);
        self.bump();
        Ok(())
    }

    /// Replaces the first record with a matching id in place. Returns false when no
    /// record matched.
    pub fn update(&mut self, record: Advertisement) -> bool {
        let Some(slot) = self.records.iter_mut().find(|item| item.id == record.id) else {
            return false;
        };
        info!(id = %record.id, "advertisement updated");
        *slot = record;
        self.bump();
        true
    }

    /// Removes every record with the given id and returns how many were removed.
    pub fn delete(&mut self, id: &AdvertisementId) -> usize {
        let before = self.records.len();
        self.records.retain(|item| &item.id != id);
        let removed = before - self.records.len();
        if removed > 0 {
            info!(id = %id, removed, "advertisement deleted");
            self.bump();
        }
        removed
    }

    pub fn list(&self) -> &[Advertisement] {
        &self.records
    }

    pub fn get(&self, id: &AdvertisementId) -> Option<&Advertisement> {
        self.records.iter().find(|item| &item.id == id)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    #[cfg(test)]
    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn snapshot(&self) -> StoreSnapshot<'_> {
        StoreSnapshot {
            version: self.version,
            records: &self.records,
        }
    }

    pub fn recent_photo(&self) -> Option<&str> {
        self.recent_photo.as_deref()
    }

    /// Most recent intents first.
    pub fn recent_intents(&self) -> impl Iterator<Item = &IntentRecord> {
        self.intents.iter().rev()
    }

    fn record_intent(&mut self, kind: IntentKind, id: AdvertisementId, field: Option<AdField>) {
        match field {
            Some(field) => info!(id = %id, field = field.label(), "intent: {}", kind.label()),
            None => info!(id = %id, "intent: {}", kind.label()),
        }
        self.next_intent_seq += 1;
        self.intents.push_back(IntentRecord {
            seq: self.next_intent_seq,
            kind,
            id,
            field,
        });
        while self.intents.len() > MAX_INTENT_RECORDS {
            self.intents.pop_front();
        }
    }

    fn bump(&mut self) {
        self.version = self.version.wrapping_add(1);
    }
}

fn changed_or_not(changed: bool) -> DispatchOutcome {
    if changed {
        DispatchOutcome::Changed
    } else {
        DispatchOutcome::Unchanged
    }
}
