use storage::{
    dto::stats::VolunteerStatsResponse,
    error::Result,
    models::{HistoryEntry, VolunteerProfile},
    repository::{HistoryStore, VolunteerDirectory},
    services::stats,
};

use crate::lookup::VolunteerLookup;

/// History entries of one volunteer, in creation order
pub async fn get_volunteer_history(
    store: &dyn HistoryStore,
    volunteer_id: i64,
) -> Result<Vec<HistoryEntry>> {
    store.list_by_volunteer(volunteer_id).await
}

/// Statistics for a volunteer together with their details, when known
pub async fn get_volunteer_stats(
    store: &dyn HistoryStore,
    directory: &dyn VolunteerDirectory,
    volunteer_id: i64,
) -> Result<VolunteerStatsResponse> {
    let stats = stats::stats_for_volunteer(store, volunteer_id).await?;
    let volunteer = VolunteerLookup::new(directory).resolve(volunteer_id).await;

    Ok(VolunteerStatsResponse { volunteer, stats })
}

pub async fn get_profile(
    directory: &dyn VolunteerDirectory,
    volunteer_id: i64,
) -> Result<Option<VolunteerProfile>> {
    directory.find_profile(volunteer_id).await
}

/// Create or replace a volunteer's profile
pub async fn save_profile(
    directory: &dyn VolunteerDirectory,
    volunteer_id: i64,
    profile: &VolunteerProfile,
) -> Result<VolunteerProfile> {
    let saved = directory.upsert_profile(volunteer_id, profile).await?;
    tracing::info!(volunteer_id, "Volunteer profile saved");
    Ok(saved)
}
