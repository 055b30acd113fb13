//! User profile entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use zerozero_core::error::CoreError;
use zerozero_core::profile::{CarType, EnergySource, HomeType, LifestyleProfile, TransportMode};
use zerozero_core::types::{DbId, Timestamp};

/// A row from the `user_profiles` table.
///
/// Lifestyle enums are stored as their wire strings; use
/// [`UserProfile::lifestyle`] to reconstruct the typed record (which
/// fails loudly if a row was written with an unrecognized value).
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct UserProfile {
    pub id: DbId,
    pub name: String,
    pub postcode: String,
    pub home_type: String,
    pub rooms: i32,
    pub people: i32,
    pub transport: String,
    pub car_type: Option<String>,
    pub energy_source: String,
    pub monthly_spend: i64,
    pub goals: Vec<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl UserProfile {
    /// Reconstruct the typed lifestyle record from the stored strings.
    pub fn lifestyle(&self) -> Result<LifestyleProfile, CoreError> {
        let car_type = match self.car_type.as_deref() {
            Some(raw) => Some(CarType::from_str_db(raw)?),
            None => None,
        };

        Ok(LifestyleProfile {
            name: self.name.clone(),
            postcode: self.postcode.clone(),
            home_type: HomeType::from_str_db(&self.home_type)?,
            rooms: self.rooms,
            people: self.people,
            transport: TransportMode::from_str_db(&self.transport)?,
            car_type,
            energy_source: EnergySource::from_str_db(&self.energy_source)?,
            monthly_spend: self.monthly_spend,
            goals: self.goals.clone(),
        })
    }
}

/// DTO for inserting a profile row.
#[derive(Debug, Clone, Deserialize)]
pub struct NewUserProfile {
    pub name: String,
    pub postcode: String,
    pub home_type: String,
    pub rooms: i32,
    pub people: i32,
    pub transport: String,
    pub car_type: Option<String>,
    pub energy_source: String,
    pub monthly_spend: i64,
    pub goals: Vec<String>,
}

impl NewUserProfile {
    /// Build the insert DTO from a validated lifestyle record.
    pub fn from_lifestyle(profile: &LifestyleProfile) -> Self {
        Self {
            name: profile.name.clone(),
            postcode: profile.postcode.clone(),
            home_type: profile.home_type.as_str().to_string(),
            rooms: profile.rooms,
            people: profile.people,
            transport: profile.transport.as_str().to_string(),
            car_type: profile.car_type.map(|c| c.as_str().to_string()),
            energy_source: profile.energy_source.as_str().to_string(),
            monthly_spend: profile.monthly_spend,
            goals: profile.goals.clone(),
        }
    }
}
