use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use super::common::{MissingFields, lenient_int, non_blank};
use crate::models::{EntryStatus, HistoryEntry};

/// Request payload for creating a history entry.
///
/// Every field is optional at the wire level so that absent fields can be
/// reported together instead of failing on the first one.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateHistoryEntryRequest {
    #[serde(default, deserialize_with = "lenient_int")]
    pub volunteer_id: Option<i64>,
    #[serde(default, deserialize_with = "lenient_int")]
    pub event_id: Option<i64>,
    pub event_name: Option<String>,
    pub event_date: Option<String>,
    pub event_location: Option<String>,
    pub status: Option<EntryStatus>,
}

impl CreateHistoryEntryRequest {
    pub fn into_new_entry(self) -> Result<NewHistoryEntry, MissingFields> {
        let event_name = non_blank(self.event_name);
        let event_date = non_blank(self.event_date);
        let event_location = non_blank(self.event_location);

        match (
            self.volunteer_id,
            self.event_id,
            event_name,
            event_date,
            event_location,
        ) {
            (
                Some(volunteer_id),
                Some(event_id),
                Some(event_name),
                Some(event_date),
                Some(event_location),
            ) => Ok(NewHistoryEntry {
                volunteer_id,
                event_id,
                event_name,
                event_date,
                event_location,
                status: self.status.unwrap_or_default(),
            }),
            (volunteer_id, event_id, event_name, event_date, event_location) => {
                Err(MissingFields::from_presence(&[
                    ("volunteerId", volunteer_id.is_some()),
                    ("eventId", event_id.is_some()),
                    ("eventName", event_name.is_some()),
                    ("eventDate", event_date.is_some()),
                    ("eventLocation", event_location.is_some()),
                ]))
            }
        }
    }
}

/// A fully specified history entry ready to be stored
#[derive(Debug, Clone, Validate)]
pub struct NewHistoryEntry {
    #[validate(range(min = 0, message = "volunteerId must not be negative"))]
    pub volunteer_id: i64,
    #[validate(range(min = 0, message = "eventId must not be negative"))]
    pub event_id: i64,
    #[validate(length(min = 1, max = 255))]
    pub event_name: String,
    #[validate(length(min = 1, max = 64))]
    pub event_date: String,
    #[validate(length(min = 1, max = 255))]
    pub event_location: String,
    #[validate(custom(function = "validate_initial_status"))]
    pub status: EntryStatus,
}

fn validate_initial_status(status: &EntryStatus) -> Result<(), validator::ValidationError> {
    if *status == EntryStatus::Completed {
        Err(validator::ValidationError::new("invalid_status").with_message(
            "Entries cannot be created as completed; use the complete operation".into(),
        ))
    } else {
        Ok(())
    }
}

/// Partial update of a history entry; absent fields are left unchanged
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateHistoryEntryRequest {
    #[serde(default, deserialize_with = "lenient_int")]
    #[validate(range(min = 0, message = "volunteerId must not be negative"))]
    pub volunteer_id: Option<i64>,

    #[serde(default, deserialize_with = "lenient_int")]
    #[validate(range(min = 0, message = "eventId must not be negative"))]
    pub event_id: Option<i64>,

    #[validate(length(min = 1, max = 255), custom(function = "validate_not_blank"))]
    pub event_name: Option<String>,

    #[validate(length(min = 1, max = 64), custom(function = "validate_not_blank"))]
    pub event_date: Option<String>,

    #[validate(length(min = 1, max = 255), custom(function = "validate_not_blank"))]
    pub event_location: Option<String>,

    pub status: Option<EntryStatus>,

    #[serde(default, deserialize_with = "lenient_int")]
    #[validate(range(min = 0, max = 168, message = "hoursWorked must be between 0 and 168"))]
    pub hours_worked: Option<i32>,

    pub skills_used: Option<Vec<String>>,

    pub feedback: Option<String>,

    #[serde(default, deserialize_with = "lenient_int")]
    #[validate(range(min = 1, max = 5, message = "rating must be between 1 and 5"))]
    pub rating: Option<i32>,
}

fn validate_not_blank(value: &str) -> Result<(), validator::ValidationError> {
    if value.trim().is_empty() {
        Err(validator::ValidationError::new("blank").with_message("must not be blank".into()))
    } else {
        Ok(())
    }
}

impl UpdateHistoryEntryRequest {
    /// Fields that only make sense once the entry is completed
    pub fn has_completion_details(&self) -> bool {
        self.hours_worked.is_some() || self.skills_used.is_some() || self.rating.is_some()
    }
}

/// Request payload for the completion operation
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CompleteEventRequest {
    #[serde(default, deserialize_with = "lenient_int")]
    pub hours_worked: Option<i32>,
    pub skills_used: Option<Vec<String>>,
    pub feedback: Option<String>,
    #[serde(default, deserialize_with = "lenient_int")]
    pub rating: Option<i32>,
}

impl CompleteEventRequest {
    pub fn into_completion(self) -> Result<Completion, MissingFields> {
        let Some(hours_worked) = self.hours_worked else {
            return Err(MissingFields(vec!["hoursWorked"]));
        };

        Ok(Completion {
            hours_worked,
            skills_used: self.skills_used.unwrap_or_default(),
            feedback: non_blank(self.feedback),
            rating: self.rating,
        })
    }
}

/// Participation details recorded when an entry is completed
#[derive(Debug, Clone, Validate)]
pub struct Completion {
    #[validate(range(min = 0, max = 168, message = "hoursWorked must be between 0 and 168"))]
    pub hours_worked: i32,
    pub skills_used: Vec<String>,
    pub feedback: Option<String>,
    #[validate(range(min = 1, max = 5, message = "rating must be between 1 and 5"))]
    pub rating: Option<i32>,
}

/// History entry annotated with the volunteer's name and skills
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EnrichedHistoryEntry {
    #[serde(flatten)]
    pub entry: HistoryEntry,
    pub volunteer_name: String,
    pub volunteer_skills: Vec<String>,
}
