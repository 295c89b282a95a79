use storage::{
    dto::history::EnrichedHistoryEntry,
    error::Result,
    repository::{HistoryStore, VolunteerDirectory},
    services::stats,
};

use crate::lookup::VolunteerLookup;

/// Every entry recorded for an event, annotated with volunteer details
pub async fn get_event_history(
    store: &dyn HistoryStore,
    directory: &dyn VolunteerDirectory,
    event_id: i64,
) -> Result<Vec<EnrichedHistoryEntry>> {
    let entries = stats::event_history(store, event_id).await?;
    Ok(VolunteerLookup::new(directory).enrich_entries(entries).await)
}
