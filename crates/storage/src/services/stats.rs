use std::collections::BTreeMap;

use crate::dto::stats::{TopVolunteer, VolunteerStats};
use crate::error::Result;
use crate::models::{EntryStatus, HistoryEntry};
use crate::repository::HistoryStore;

#[derive(Default)]
struct Tally {
    total_hours: i64,
    completed_events: usize,
}

/// Ranks every volunteer that has at least one entry.
///
/// Ordering: total hours worked (descending), then completed events
/// (descending), then volunteer id (ascending).
pub fn rank_volunteers(entries: &[HistoryEntry]) -> Vec<TopVolunteer> {
    let mut tallies: BTreeMap<i64, Tally> = BTreeMap::new();

    for entry in entries {
        let tally = tallies.entry(entry.volunteer_id).or_default();
        if entry.is_completed() {
            tally.completed_events += 1;
            tally.total_hours += i64::from(entry.hours_worked.unwrap_or(0));
        }
    }

    let mut ranked: Vec<(i64, Tally)> = tallies.into_iter().collect();
    ranked.sort_by(|(id_a, a), (id_b, b)| {
        b.total_hours
            .cmp(&a.total_hours)
            .then(b.completed_events.cmp(&a.completed_events))
            .then(id_a.cmp(id_b))
    });

    ranked
        .into_iter()
        .enumerate()
        .map(|(index, (volunteer_id, tally))| TopVolunteer {
            rank: index + 1,
            volunteer_id,
            total_hours: tally.total_hours,
            completed_events: tally.completed_events,
        })
        .collect()
}

pub fn compute_top_volunteers(entries: &[HistoryEntry], limit: usize) -> Vec<TopVolunteer> {
    let mut ranked = rank_volunteers(entries);
    ranked.truncate(limit);
    ranked
}

pub fn compute_volunteer_stats(entries: &[HistoryEntry], volunteer_id: i64) -> VolunteerStats {
    let mut stats = VolunteerStats::default();
    let mut rating_sum = 0i64;
    let mut rating_count = 0i64;

    for entry in entries.iter().filter(|e| e.volunteer_id == volunteer_id) {
        stats.total_events += 1;

        match entry.status {
            EntryStatus::Completed => {
                stats.completed_events += 1;
                stats.total_hours += i64::from(entry.hours_worked.unwrap_or(0));
            }
            EntryStatus::Scheduled => stats.scheduled_events += 1,
            EntryStatus::Cancelled | EntryStatus::NoShow => {}
        }

        if let Some(rating) = entry.rating {
            rating_sum += i64::from(rating);
            rating_count += 1;
        }
    }

    if rating_count > 0 {
        let average = rating_sum as f64 / rating_count as f64;
        stats.average_rating = Some((average * 100.0).round() / 100.0);
    }

    if stats.total_events > 0 {
        stats.rank = rank_volunteers(entries)
            .iter()
            .find(|row| row.volunteer_id == volunteer_id)
            .map(|row| row.rank);
    }

    stats
}

/// Statistics for one volunteer; an unknown volunteer yields zero counts
pub async fn stats_for_volunteer(store: &dyn HistoryStore, volunteer_id: i64) -> Result<VolunteerStats> {
    let entries = store.list_all().await?;
    Ok(compute_volunteer_stats(&entries, volunteer_id))
}

pub async fn top_volunteers(store: &dyn HistoryStore, limit: usize) -> Result<Vec<TopVolunteer>> {
    let entries = store.list_all().await?;
    Ok(compute_top_volunteers(&entries, limit))
}

pub async fn event_history(store: &dyn HistoryStore, event_id: i64) -> Result<Vec<HistoryEntry>> {
    store.list_by_event(event_id).await
}
