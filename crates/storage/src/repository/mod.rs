use async_trait::async_trait;
use uuid::Uuid;

use crate::dto::history::{Completion, NewHistoryEntry, UpdateHistoryEntryRequest};
use crate::error::Result;
use crate::models::{HistoryEntry, Volunteer, VolunteerProfile};

pub mod history;
pub mod memory;
pub mod volunteer;

pub use history::PgHistoryRepository;
pub use memory::{MemoryHistoryStore, MemoryVolunteerDirectory};
pub use volunteer::PgVolunteerRepository;

/// Storage of volunteer history entries.
///
/// Lookups by id report a missing entry as `Ok(None)` rather than an error.
#[async_trait]
pub trait HistoryStore: Send + Sync {
    /// Entries of one volunteer, in creation order
    async fn list_by_volunteer(&self, volunteer_id: i64) -> Result<Vec<HistoryEntry>>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<HistoryEntry>>;

    async fn create(&self, entry: &NewHistoryEntry) -> Result<HistoryEntry>;

    async fn update(
        &self,
        id: Uuid,
        patch: &UpdateHistoryEntryRequest,
    ) -> Result<Option<HistoryEntry>>;

    async fn complete(&self, id: Uuid, completion: &Completion) -> Result<Option<HistoryEntry>>;

    /// Removes the entry and returns it
    async fn delete(&self, id: Uuid) -> Result<Option<HistoryEntry>>;

    async fn list_all(&self) -> Result<Vec<HistoryEntry>>;

    async fn list_by_event(&self, event_id: i64) -> Result<Vec<HistoryEntry>>;
}

/// Resolves volunteer ids to profile details
#[async_trait]
pub trait VolunteerDirectory: Send + Sync {
    async fn find_profile(&self, volunteer_id: i64) -> Result<Option<VolunteerProfile>>;

    async fn upsert_profile(
        &self,
        volunteer_id: i64,
        profile: &VolunteerProfile,
    ) -> Result<VolunteerProfile>;

    async fn find_volunteer(&self, volunteer_id: i64) -> Result<Option<Volunteer>> {
        let profile = self.find_profile(volunteer_id).await?;
        Ok(profile.map(|p| Volunteer::from_profile(volunteer_id, &p)))
    }
}
