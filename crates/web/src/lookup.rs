use std::collections::HashMap;

use storage::{
    dto::{
        history::EnrichedHistoryEntry,
        stats::{RankedVolunteer, TopVolunteer},
    },
    models::{HistoryEntry, Volunteer},
    repository::VolunteerDirectory,
};

pub const UNKNOWN_VOLUNTEER: &str = "Unknown";

/// Per-request volunteer resolver.
///
/// Lookup failures are logged and treated like a missing volunteer, so
/// enrichment never fails the response. Results are memoized per id.
pub struct VolunteerLookup<'a> {
    directory: &'a dyn VolunteerDirectory,
    cache: HashMap<i64, Option<Volunteer>>,
}

impl<'a> VolunteerLookup<'a> {
    pub fn new(directory: &'a dyn VolunteerDirectory) -> Self {
        Self {
            directory,
            cache: HashMap::new(),
        }
    }

    pub async fn resolve(&mut self, volunteer_id: i64) -> Option<Volunteer> {
        if let Some(cached) = self.cache.get(&volunteer_id) {
            return cached.clone();
        }

        let volunteer = match self.directory.find_volunteer(volunteer_id).await {
            Ok(volunteer) => volunteer,
            Err(e) => {
                tracing::warn!(volunteer_id, error = %e, "Volunteer lookup failed");
                None
            }
        };

        self.cache.insert(volunteer_id, volunteer.clone());
        volunteer
    }

    /// Name and skills of the volunteer, or the "Unknown" placeholder
    pub async fn name_and_skills(&mut self, volunteer_id: i64) -> (String, Vec<String>) {
        match self.resolve(volunteer_id).await {
            Some(volunteer) => (volunteer.name, volunteer.skills),
            None => (UNKNOWN_VOLUNTEER.to_string(), Vec::new()),
        }
    }

    pub async fn enrich_entries(&mut self, entries: Vec<HistoryEntry>) -> Vec<EnrichedHistoryEntry> {
        let mut enriched = Vec::with_capacity(entries.len());

        for entry in entries {
            let (volunteer_name, volunteer_skills) = self.name_and_skills(entry.volunteer_id).await;
            enriched.push(EnrichedHistoryEntry {
                entry,
                volunteer_name,
                volunteer_skills,
            });
        }

        enriched
    }

    pub async fn enrich_ranking(&mut self, ranking: Vec<TopVolunteer>) -> Vec<RankedVolunteer> {
        let mut enriched = Vec::with_capacity(ranking.len());

        for row in ranking {
            let (volunteer_name, volunteer_skills) = self.name_and_skills(row.volunteer_id).await;
            enriched.push(RankedVolunteer {
                ranking: row,
                volunteer_name,
                volunteer_skills,
            });
        }

        enriched
    }
}
