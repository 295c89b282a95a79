use storage::{
    dto::history::{Completion, NewHistoryEntry, UpdateHistoryEntryRequest},
    error::Result,
    models::HistoryEntry,
    repository::HistoryStore,
};
use uuid::Uuid;

/// List every history entry
pub async fn list_all(store: &dyn HistoryStore) -> Result<Vec<HistoryEntry>> {
    store.list_all().await
}

/// Get a history entry by id
pub async fn get_entry(store: &dyn HistoryStore, id: Uuid) -> Result<Option<HistoryEntry>> {
    store.find_by_id(id).await
}

/// Create a new history entry
pub async fn create_entry(store: &dyn HistoryStore, entry: &NewHistoryEntry) -> Result<HistoryEntry> {
    let created = store.create(entry).await?;
    tracing::info!(
        id = %created.id,
        volunteer_id = created.volunteer_id,
        event_id = created.event_id,
        "History entry created"
    );
    Ok(created)
}

/// Merge a partial update into a history entry
pub async fn update_entry(
    store: &dyn HistoryStore,
    id: Uuid,
    patch: &UpdateHistoryEntryRequest,
) -> Result<Option<HistoryEntry>> {
    let updated = store.update(id, patch).await?;
    if let Some(ref entry) = updated {
        tracing::info!(id = %entry.id, status = %entry.status, "History entry updated");
    }
    Ok(updated)
}

/// Mark a scheduled entry as completed
pub async fn complete_entry(
    store: &dyn HistoryStore,
    id: Uuid,
    completion: &Completion,
) -> Result<Option<HistoryEntry>> {
    let completed = store.complete(id, completion).await?;
    if let Some(ref entry) = completed {
        tracing::info!(
            id = %entry.id,
            volunteer_id = entry.volunteer_id,
            hours_worked = completion.hours_worked,
            "Event completed"
        );
    }
    Ok(completed)
}

/// Delete a history entry, returning the removed entry
pub async fn delete_entry(store: &dyn HistoryStore, id: Uuid) -> Result<Option<HistoryEntry>> {
    let deleted = store.delete(id).await?;
    if deleted.is_some() {
        tracing::info!(%id, "History entry deleted");
    }
    Ok(deleted)
}
