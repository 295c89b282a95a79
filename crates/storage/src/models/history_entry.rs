use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::dto::history::{Completion, NewHistoryEntry, UpdateHistoryEntryRequest};
use crate::error::{Result, StorageError};
use crate::models::EntryStatus;

/// A volunteer's participation record for one event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    pub id: Uuid,
    pub volunteer_id: i64,
    pub event_id: i64,
    pub event_name: String,
    pub event_date: String,
    pub event_location: String,
    pub status: EntryStatus,
    pub hours_worked: Option<i32>,
    pub skills_used: Vec<String>,
    pub feedback: Option<String>,
    pub rating: Option<i32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
}

impl HistoryEntry {
    pub fn new(input: &NewHistoryEntry, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            volunteer_id: input.volunteer_id,
            event_id: input.event_id,
            event_name: input.event_name.clone(),
            event_date: input.event_date.clone(),
            event_location: input.event_location.clone(),
            status: input.status,
            hours_worked: None,
            skills_used: Vec::new(),
            feedback: None,
            rating: None,
            created_at: now,
            updated_at: now,
            completed_at: None,
        }
    }

    pub fn is_completed(&self) -> bool {
        self.status == EntryStatus::Completed
    }

    /// Merges a partial update into the entry. Fields present in the patch
    /// overwrite the stored value, absent fields are kept.
    pub fn apply_patch(&mut self, patch: &UpdateHistoryEntryRequest, now: DateTime<Utc>) -> Result<()> {
        let next_status = patch.status.unwrap_or(self.status);

        if !self.status.can_update_to(next_status) {
            return Err(StorageError::InvalidTransition {
                from: self.status,
                to: next_status,
            });
        }

        if patch.has_completion_details() && next_status != EntryStatus::Completed {
            return Err(StorageError::InvalidData(
                "hoursWorked, skillsUsed and rating can only be set on completed entries".to_string(),
            ));
        }

        let event_name = required_text("eventName", patch.event_name.as_deref())?;
        let event_date = required_text("eventDate", patch.event_date.as_deref())?;
        let event_location = required_text("eventLocation", patch.event_location.as_deref())?;

        if let Some(volunteer_id) = patch.volunteer_id {
            self.volunteer_id = volunteer_id;
        }
        if let Some(event_id) = patch.event_id {
            self.event_id = event_id;
        }
        if let Some(event_name) = event_name {
            self.event_name = event_name;
        }
        if let Some(event_date) = event_date {
            self.event_date = event_date;
        }
        if let Some(event_location) = event_location {
            self.event_location = event_location;
        }
        if let Some(hours_worked) = patch.hours_worked {
            self.hours_worked = Some(hours_worked);
        }
        if let Some(ref skills_used) = patch.skills_used {
            self.skills_used = dedup_skills(skills_used);
        }
        if let Some(ref feedback) = patch.feedback {
            self.feedback = Some(feedback.clone());
        }
        if let Some(rating) = patch.rating {
            self.rating = Some(rating);
        }

        self.status = next_status;
        self.updated_at = now;

        Ok(())
    }

    /// Moves a scheduled entry to `completed`, recording the participation
    /// details. Event fields are left untouched.
    pub fn complete(&mut self, completion: &Completion, now: DateTime<Utc>) -> Result<()> {
        if !self.status.can_complete() {
            return Err(StorageError::InvalidTransition {
                from: self.status,
                to: EntryStatus::Completed,
            });
        }

        self.status = EntryStatus::Completed;
        self.hours_worked = Some(completion.hours_worked);
        self.skills_used = dedup_skills(&completion.skills_used);
        if let Some(ref feedback) = completion.feedback {
            self.feedback = Some(feedback.clone());
        }
        if let Some(rating) = completion.rating {
            self.rating = Some(rating);
        }
        self.completed_at = Some(now);
        self.updated_at = now;

        Ok(())
    }
}

/// Trims skill names and drops blanks and duplicates, keeping first-seen order
/// Trimmed replacement for a required text field; blank values are rejected
fn required_text(field: &str, value: Option<&str>) -> Result<Option<String>> {
    match value.map(str::trim) {
        Some("") => Err(StorageError::InvalidData(format!("{} must not be blank", field))),
        trimmed => Ok(trimmed.map(str::to_string)),
    }
}

pub fn dedup_skills(skills: &[String]) -> Vec<String> {
    let mut result: Vec<String> = Vec::with_capacity(skills.len());

    for skill in skills {
        let skill = skill.trim();
        if !skill.is_empty() && !result.iter().any(|s| s.eq_ignore_ascii_case(skill)) {
            result.push(skill.to_string());
        }
    }

    result
}
