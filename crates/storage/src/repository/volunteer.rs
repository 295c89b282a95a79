use async_trait::async_trait;
use sqlx::PgPool;

use super::VolunteerDirectory;
use crate::error::Result;
use crate::models::VolunteerProfile;

const PROFILE_COLUMNS: &str =
    "full_name, address1, address2, city, state, zip, skills, preferences, availability";

/// Postgres-backed volunteer directory
#[derive(Clone)]
pub struct PgVolunteerRepository {
    pool: PgPool,
}

impl PgVolunteerRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl VolunteerDirectory for PgVolunteerRepository {
    async fn find_profile(&self, volunteer_id: i64) -> Result<Option<VolunteerProfile>> {
        let profile = sqlx::query_as::<_, VolunteerProfile>(&format!(
            "SELECT {PROFILE_COLUMNS} FROM volunteer_profiles WHERE volunteer_id = $1"
        ))
        .bind(volunteer_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(profile)
    }

    async fn upsert_profile(
        &self,
        volunteer_id: i64,
        profile: &VolunteerProfile,
    ) -> Result<VolunteerProfile> {
        let saved = sqlx::query_as::<_, VolunteerProfile>(&format!(
            r#"
            INSERT INTO volunteer_profiles
                (volunteer_id, full_name, address1, address2, city, state, zip,
                 skills, preferences, availability, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, NOW())
            ON CONFLICT (volunteer_id) DO UPDATE SET
                full_name = EXCLUDED.full_name,
                address1 = EXCLUDED.address1,
                address2 = EXCLUDED.address2,
                city = EXCLUDED.city,
                state = EXCLUDED.state,
                zip = EXCLUDED.zip,
                skills = EXCLUDED.skills,
                preferences = EXCLUDED.preferences,
                availability = EXCLUDED.availability,
                updated_at = NOW()
            RETURNING {PROFILE_COLUMNS}
            "#
        ))
        .bind(volunteer_id)
        .bind(&profile.full_name)
        .bind(&profile.address1)
        .bind(&profile.address2)
        .bind(&profile.city)
        .bind(&profile.state)
        .bind(&profile.zip)
        .bind(&profile.skills)
        .bind(&profile.preferences)
        .bind(&profile.availability)
        .fetch_one(&self.pool)
        .await?;

        Ok(saved)
    }
}
