use std::sync::Arc;

use storage::{
    Database,
    repository::{
        HistoryStore, MemoryHistoryStore, MemoryVolunteerDirectory, PgHistoryRepository,
        PgVolunteerRepository, VolunteerDirectory,
    },
};

/// Shared handles to the stores, cloned into every handler
#[derive(Clone)]
pub struct AppState {
    pub history: Arc<dyn HistoryStore>,
    pub volunteers: Arc<dyn VolunteerDirectory>,
}

impl AppState {
    pub fn new(history: Arc<dyn HistoryStore>, volunteers: Arc<dyn VolunteerDirectory>) -> Self {
        Self {
            history,
            volunteers,
        }
    }

    pub fn in_memory() -> Self {
        Self::new(
            Arc::new(MemoryHistoryStore::new()),
            Arc::new(MemoryVolunteerDirectory::new()),
        )
    }

    pub fn postgres(db: &Database) -> Self {
        Self::new(
            Arc::new(PgHistoryRepository::new(db.pool().clone())),
            Arc::new(PgVolunteerRepository::new(db.pool().clone())),
        )
    }
}
