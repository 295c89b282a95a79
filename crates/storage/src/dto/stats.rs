use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use super::common::lenient_int;
use crate::models::Volunteer;

pub const DEFAULT_TOP_LIMIT: usize = 10;
pub const MAX_TOP_LIMIT: usize = 100;

/// Aggregate participation figures for one volunteer
#[derive(Debug, Clone, Default, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct VolunteerStats {
    pub total_events: usize,
    pub completed_events: usize,
    pub scheduled_events: usize,
    pub total_hours: i64,
    pub average_rating: Option<f64>,
    /// 1-based position in the top-volunteers ranking
    pub rank: Option<usize>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct VolunteerStatsResponse {
    pub volunteer: Option<Volunteer>,
    pub stats: VolunteerStats,
}

/// One row of the volunteer ranking
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TopVolunteer {
    pub rank: usize,
    pub volunteer_id: i64,
    pub total_hours: i64,
    pub completed_events: usize,
}

/// Ranking row annotated with the volunteer's name and skills
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RankedVolunteer {
    #[serde(flatten)]
    pub ranking: TopVolunteer,
    pub volunteer_name: String,
    pub volunteer_skills: Vec<String>,
}

#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct TopVolunteersQuery {
    /// Maximum number of volunteers to return (1-100, default 10)
    #[serde(default, deserialize_with = "lenient_int")]
    #[param(value_type = Option<u32>)]
    pub limit: Option<i64>,
}

impl TopVolunteersQuery {
    pub fn validate(&self) -> Result<(), String> {
        if let Some(limit) = self.limit
            && (limit < 1 || limit > MAX_TOP_LIMIT as i64)
        {
            return Err(format!("limit must be between 1 and {}", MAX_TOP_LIMIT));
        }
        Ok(())
    }

    pub fn limit(&self) -> usize {
        self.limit
            .map(|limit| limit.clamp(1, MAX_TOP_LIMIT as i64) as usize)
            .unwrap_or(DEFAULT_TOP_LIMIT)
    }
}
