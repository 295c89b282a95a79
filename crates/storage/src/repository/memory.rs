use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{HistoryStore, VolunteerDirectory};
use crate::dto::history::{Completion, NewHistoryEntry, UpdateHistoryEntryRequest};
use crate::error::Result;
use crate::models::{HistoryEntry, VolunteerProfile};

/// History store kept in process memory, in insertion order
#[derive(Default)]
pub struct MemoryHistoryStore {
    entries: RwLock<Vec<HistoryEntry>>,
}

impl MemoryHistoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    async fn modify<F>(&self, id: Uuid, change: F) -> Result<Option<HistoryEntry>>
    where
        F: FnOnce(&mut HistoryEntry) -> Result<()> + Send,
    {
        let mut entries = self.entries.write().await;

        let Some(slot) = entries.iter_mut().find(|e| e.id == id) else {
            return Ok(None);
        };

        // Work on a copy so a rejected change leaves the stored entry untouched
        let mut updated = slot.clone();
        change(&mut updated)?;
        *slot = updated.clone();

        Ok(Some(updated))
    }
}

#[async_trait]
impl HistoryStore for MemoryHistoryStore {
    async fn list_by_volunteer(&self, volunteer_id: i64) -> Result<Vec<HistoryEntry>> {
        let entries = self.entries.read().await;
        Ok(entries
            .iter()
            .filter(|e| e.volunteer_id == volunteer_id)
            .cloned()
            .collect())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<HistoryEntry>> {
        let entries = self.entries.read().await;
        Ok(entries.iter().find(|e| e.id == id).cloned())
    }

    async fn create(&self, entry: &NewHistoryEntry) -> Result<HistoryEntry> {
        let created = HistoryEntry::new(entry, Utc::now());
        self.entries.write().await.push(created.clone());
        Ok(created)
    }

    async fn update(
        &self,
        id: Uuid,
        patch: &UpdateHistoryEntryRequest,
    ) -> Result<Option<HistoryEntry>> {
        self.modify(id, |entry| entry.apply_patch(patch, Utc::now()))
            .await
    }

    async fn complete(&self, id: Uuid, completion: &Completion) -> Result<Option<HistoryEntry>> {
        self.modify(id, |entry| entry.complete(completion, Utc::now()))
            .await
    }

    async fn delete(&self, id: Uuid) -> Result<Option<HistoryEntry>> {
        let mut entries = self.entries.write().await;
        let position = entries.iter().position(|e| e.id == id);
        Ok(position.map(|index| entries.remove(index)))
    }

    async fn list_all(&self) -> Result<Vec<HistoryEntry>> {
        Ok(self.entries.read().await.clone())
    }

    async fn list_by_event(&self, event_id: i64) -> Result<Vec<HistoryEntry>> {
        let entries = self.entries.read().await;
        Ok(entries
            .iter()
            .filter(|e| e.event_id == event_id)
            .cloned()
            .collect())
    }
}

/// Volunteer directory kept in process memory
#[derive(Default)]
pub struct MemoryVolunteerDirectory {
    profiles: RwLock<HashMap<i64, VolunteerProfile>>,
}

impl MemoryVolunteerDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_profiles(profiles: impl IntoIterator<Item = (i64, VolunteerProfile)>) -> Self {
        Self {
            profiles: RwLock::new(profiles.into_iter().collect()),
        }
    }

    pub async fn profile_count(&self) -> usize {
        self.profiles.read().await.len()
    }
}

#[async_trait]
impl VolunteerDirectory for MemoryVolunteerDirectory {
    async fn find_profile(&self, volunteer_id: i64) -> Result<Option<VolunteerProfile>> {
        Ok(self.profiles.read().await.get(&volunteer_id).cloned())
    }

    async fn upsert_profile(
        &self,
        volunteer_id: i64,
        profile: &VolunteerProfile,
    ) -> Result<VolunteerProfile> {
        self.profiles
            .write()
            .await
            .insert(volunteer_id, profile.clone());
        Ok(profile.clone())
    }
}
