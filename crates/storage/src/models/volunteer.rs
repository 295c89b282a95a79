use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

/// Volunteer details used to enrich history responses
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Volunteer {
    pub id: i64,
    pub name: String,
    pub skills: Vec<String>,
    pub location: String,
}

impl Volunteer {
    pub fn from_profile(id: i64, profile: &VolunteerProfile) -> Self {
        Self {
            id,
            name: profile.full_name.clone(),
            skills: profile.skills.clone(),
            location: format!("{}, {}", profile.city, profile.state),
        }
    }
}

/// Profile submitted by the volunteer profile editor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct VolunteerProfile {
    #[validate(length(
        min = 1,
        max = 50,
        message = "Full name must be between 1 and 50 characters"
    ))]
    pub full_name: String,

    #[validate(length(
        min = 1,
        max = 100,
        message = "Address line 1 must be between 1 and 100 characters"
    ))]
    pub address1: String,

    #[validate(length(max = 100))]
    pub address2: Option<String>,

    #[validate(length(min = 1, max = 100, message = "City is required"))]
    pub city: String,

    #[validate(custom(function = "validate_state_code"))]
    pub state: String,

    #[validate(custom(function = "validate_zip"))]
    pub zip: String,

    #[validate(length(min = 1, message = "At least one skill is required"))]
    pub skills: Vec<String>,

    pub preferences: Option<String>,

    #[serde(default)]
    pub availability: Vec<NaiveDate>,
}

/// Seed record for the in-memory volunteer directory
#[derive(Debug, Clone, Deserialize)]
pub struct VolunteerSeed {
    pub id: i64,
    #[serde(flatten)]
    pub profile: VolunteerProfile,
}

fn validate_state_code(state: &str) -> Result<(), validator::ValidationError> {
    if state.len() == 2 && state.chars().all(|c| c.is_ascii_uppercase()) {
        Ok(())
    } else {
        Err(validator::ValidationError::new("invalid_state")
            .with_message("State must be a two-letter code".into()))
    }
}

fn validate_zip(zip: &str) -> Result<(), validator::ValidationError> {
    if (5..=9).contains(&zip.len()) && zip.chars().all(|c| c.is_ascii_digit()) {
        Ok(())
    } else {
        Err(validator::ValidationError::new("invalid_zip")
            .with_message("Zip code must contain 5 to 9 digits".into()))
    }
}
