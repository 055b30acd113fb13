//! Lifestyle profile types and validation.
//!
//! Defines the canonical lifestyle record produced by the onboarding
//! wizard and consumed by the footprint calculator, tip generator, and
//! chat assistant. All enumerations parse from their wire strings and
//! fail loudly on unrecognized input instead of silently propagating a
//! poisoned value downstream.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Spend bounds
// ---------------------------------------------------------------------------

/// Minimum accepted monthly spend in pounds.
pub const MIN_MONTHLY_SPEND: i64 = 500;

/// Maximum accepted monthly spend in pounds.
pub const MAX_MONTHLY_SPEND: i64 = 10_000;

// ---------------------------------------------------------------------------
// Goal catalog
// ---------------------------------------------------------------------------

/// The fixed catalog of goals a user may select during onboarding.
pub const GOAL_CATALOG: &[&str] = &[
    "save_money",
    "reduce_carbon",
    "eat_sustainably",
    "waste_less",
    "travel_greener",
    "support_local",
];

/// Check whether a goal string belongs to the catalog.
pub fn is_valid_goal(goal: &str) -> bool {
    GOAL_CATALOG.contains(&goal)
}

// ---------------------------------------------------------------------------
// Home type
// ---------------------------------------------------------------------------

/// The kind of home the user lives in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HomeType {
    House,
    Apartment,
    Shared,
    Student,
}

impl HomeType {
    /// Parse a home type string from the database or a request body.
    pub fn from_str_db(s: &str) -> Result<Self, CoreError> {
        match s {
            "house" => Ok(Self::House),
            "apartment" => Ok(Self::Apartment),
            "shared" => Ok(Self::Shared),
            "student" => Ok(Self::Student),
            _ => Err(CoreError::Configuration(format!(
                "Unrecognized home type '{s}'. Must be one of: house, apartment, shared, student"
            ))),
        }
    }

    /// Convert to a database-compatible string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::House => "house",
            Self::Apartment => "apartment",
            Self::Shared => "shared",
            Self::Student => "student",
        }
    }

    /// Human-readable label.
    pub fn label(self) -> &'static str {
        match self {
            Self::House => "House",
            Self::Apartment => "Apartment or flat",
            Self::Shared => "Shared house",
            Self::Student => "Student accommodation",
        }
    }
}

// ---------------------------------------------------------------------------
// Transport mode
// ---------------------------------------------------------------------------

/// The user's primary mode of transport (single-select).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransportMode {
    Car,
    Public,
    Bike,
    Walk,
    Mixed,
}

/// Default transport mode substituted when the field is absent.
pub const DEFAULT_TRANSPORT: TransportMode = TransportMode::Mixed;

impl TransportMode {
    /// Parse a transport mode string from the database or a request body.
    pub fn from_str_db(s: &str) -> Result<Self, CoreError> {
        match s {
            "car" => Ok(Self::Car),
            "public" => Ok(Self::Public),
            "bike" => Ok(Self::Bike),
            "walk" => Ok(Self::Walk),
            "mixed" => Ok(Self::Mixed),
            _ => Err(CoreError::Configuration(format!(
                "Unrecognized transport mode '{s}'. Must be one of: car, public, bike, walk, mixed"
            ))),
        }
    }

    /// Convert to a database-compatible string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Car => "car",
            Self::Public => "public",
            Self::Bike => "bike",
            Self::Walk => "walk",
            Self::Mixed => "mixed",
        }
    }

    /// Human-readable label.
    pub fn label(self) -> &'static str {
        match self {
            Self::Car => "Car",
            Self::Public => "Public transport",
            Self::Bike => "Bike",
            Self::Walk => "Walking",
            Self::Mixed => "A mix of everything",
        }
    }
}

// ---------------------------------------------------------------------------
// Car type
// ---------------------------------------------------------------------------

/// Fuel type for car drivers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CarType {
    Petrol,
    Diesel,
    Hybrid,
    Electric,
}

impl CarType {
    /// Parse a car type string from the database or a request body.
    pub fn from_str_db(s: &str) -> Result<Self, CoreError> {
        match s {
            "petrol" => Ok(Self::Petrol),
            "diesel" => Ok(Self::Diesel),
            "hybrid" => Ok(Self::Hybrid),
            "electric" => Ok(Self::Electric),
            _ => Err(CoreError::Configuration(format!(
                "Unrecognized car type '{s}'. Must be one of: petrol, diesel, hybrid, electric"
            ))),
        }
    }

    /// Convert to a database-compatible string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Petrol => "petrol",
            Self::Diesel => "diesel",
            Self::Hybrid => "hybrid",
            Self::Electric => "electric",
        }
    }
}

// ---------------------------------------------------------------------------
// Energy source
// ---------------------------------------------------------------------------

/// The user's household energy source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EnergySource {
    Grid,
    Renewable,
    Mixed,
}

impl EnergySource {
    /// Parse an energy source string from the database or a request body.
    pub fn from_str_db(s: &str) -> Result<Self, CoreError> {
        match s {
            "grid" => Ok(Self::Grid),
            "renewable" => Ok(Self::Renewable),
            "mixed" => Ok(Self::Mixed),
            _ => Err(CoreError::Configuration(format!(
                "Unrecognized energy source '{s}'. Must be one of: grid, renewable, mixed"
            ))),
        }
    }

    /// Convert to a database-compatible string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Grid => "grid",
            Self::Renewable => "renewable",
            Self::Mixed => "mixed",
        }
    }
}

// ---------------------------------------------------------------------------
// Lifestyle profile
// ---------------------------------------------------------------------------

/// The canonical lifestyle record, assembled once at onboarding
/// completion and read everywhere downstream.
///
/// A constructed profile is never partially valid: optional inputs are
/// substituted with documented defaults at assembly time, and
/// [`LifestyleProfile::validate`] is applied at every boundary where a
/// profile enters the system.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LifestyleProfile {
    pub name: String,
    pub postcode: String,
    pub home_type: HomeType,
    pub rooms: i32,
    pub people: i32,
    pub transport: TransportMode,
    pub car_type: Option<CarType>,
    pub energy_source: EnergySource,
    /// Pounds per month, bounded to `[MIN_MONTHLY_SPEND, MAX_MONTHLY_SPEND]`.
    pub monthly_spend: i64,
    pub goals: Vec<String>,
}

impl LifestyleProfile {
    /// The car type used for emissions, defaulting to petrol for car
    /// drivers who never specified one.
    pub fn effective_car_type(&self) -> CarType {
        self.car_type.unwrap_or(CarType::Petrol)
    }

    /// Validate field ranges and goal membership.
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.name.trim().is_empty() {
            return Err(CoreError::Validation("Name must not be empty".to_string()));
        }
        if self.postcode.trim().is_empty() {
            return Err(CoreError::Validation(
                "Postcode must not be empty".to_string(),
            ));
        }
        if self.rooms < 1 {
            return Err(CoreError::Validation(format!(
                "Rooms must be at least 1, got {}",
                self.rooms
            )));
        }
        if self.people < 1 {
            return Err(CoreError::Validation(format!(
                "People must be at least 1, got {}",
                self.people
            )));
        }
        if self.monthly_spend < MIN_MONTHLY_SPEND || self.monthly_spend > MAX_MONTHLY_SPEND {
            return Err(CoreError::Validation(format!(
                "Monthly spend must be between {MIN_MONTHLY_SPEND} and {MAX_MONTHLY_SPEND}, got {}",
                self.monthly_spend
            )));
        }
        for goal in &self.goals {
            if !is_valid_goal(goal) {
                return Err(CoreError::Validation(format!(
                    "Unknown goal '{goal}'. Must be one of: {}",
                    GOAL_CATALOG.join(", ")
                )));
            }
        }
        Ok(())
    }

    /// Whether the user has selected the given goal.
    pub fn has_goal(&self, goal: &str) -> bool {
        self.goals.iter().any(|g| g == goal)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
