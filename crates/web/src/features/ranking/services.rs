use storage::{
    dto::stats::RankedVolunteer,
    error::Result,
    repository::{HistoryStore, VolunteerDirectory},
    services::stats,
};

use crate::lookup::VolunteerLookup;

/// Top volunteers by hours worked, annotated with names and skills
pub async fn get_top_volunteers(
    store: &dyn HistoryStore,
    directory: &dyn VolunteerDirectory,
    limit: usize,
) -> Result<Vec<RankedVolunteer>> {
    let ranking = stats::top_volunteers(store, limit).await?;
    Ok(VolunteerLookup::new(directory).enrich_ranking(ranking).await)
}
