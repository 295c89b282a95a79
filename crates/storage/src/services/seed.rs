use validator::Validate;

use crate::error::{Result, StorageError};
use crate::models::VolunteerSeed;
use crate::repository::VolunteerDirectory;

/// Parses a JSON array of volunteer seed records, validating every profile
pub fn parse_seeds(json: &str) -> Result<Vec<VolunteerSeed>> {
    let seeds: Vec<VolunteerSeed> = serde_json::from_str(json)
        .map_err(|e| StorageError::InvalidData(format!("Invalid volunteer seed data: {}", e)))?;

    for seed in &seeds {
        seed.profile.validate().map_err(|e| {
            StorageError::InvalidData(format!("Invalid profile for volunteer {}: {}", seed.id, e))
        })?;
    }

    Ok(seeds)
}

/// Loads seed records into a directory, replacing existing profiles with the same id
pub async fn seed_directory(directory: &dyn VolunteerDirectory, json: &str) -> Result<usize> {
    let seeds = parse_seeds(json)?;

    for seed in &seeds {
        directory.upsert_profile(seed.id, &seed.profile).await?;
    }

    Ok(seeds.len())
}
