//! Carbon footprint calculator.
//!
//! Pure, deterministic mapping from a [`LifestyleProfile`] to an annual
//! CO2e estimate broken into home, transport, and spending components,
//! plus a letter grade and comparison figures. Multiplier tables are
//! exhaustive matches over the typed enums, so an unrecognized lifestyle
//! value can never reach this module — string parsing fails loudly at
//! the boundary instead.

use serde::Serialize;

use crate::profile::{CarType, EnergySource, HomeType, LifestyleProfile, TransportMode};
use crate::tips;

// ---------------------------------------------------------------------------
// Emission constants
// ---------------------------------------------------------------------------

/// Tonnes CO2e per room per year before home/energy multipliers.
pub const ROOM_BASE_TONNES: f64 = 0.8;

/// Tonnes CO2e per pound of annual spend.
pub const SPEND_TONNES_PER_POUND: f64 = 0.0004;

/// Months per year, used to annualize the monthly spend figure.
pub const MONTHS_PER_YEAR: f64 = 12.0;

// ---------------------------------------------------------------------------
// Comparison constants
// ---------------------------------------------------------------------------

/// UK average annual footprint in tonnes CO2e.
pub const UK_AVERAGE_TONNES: f64 = 12.7;

/// World average annual footprint in tonnes CO2e.
pub const WORLD_AVERAGE_TONNES: f64 = 4.7;

/// South West England regional average in tonnes CO2e.
pub const REGION_AVERAGE_TONNES: f64 = 11.4;

/// Weight of one adult elephant in tonnes, for the animal equivalent.
pub const ELEPHANT_TONNES: f64 = 6.0;

/// Emoji shown next to the animal equivalent count.
pub const ELEPHANT_EMOJI: &str = "\u{1F418}";

// ---------------------------------------------------------------------------
// Multiplier tables
// ---------------------------------------------------------------------------

/// Home-type multiplier applied to the per-room base.
pub fn home_multiplier(home_type: HomeType) -> f64 {
    match home_type {
        HomeType::House => 1.2,
        HomeType::Apartment => 0.8,
        HomeType::Shared => 0.6,
        HomeType::Student => 0.6,
    }
}

/// Energy-source multiplier applied to the per-room base.
pub fn energy_multiplier(energy_source: EnergySource) -> f64 {
    match energy_source {
        EnergySource::Grid => 2.1,
        EnergySource::Renewable => 0.8,
        EnergySource::Mixed => 1.4,
    }
}

/// Annual transport emissions in tonnes for a given mode and car type.
pub fn transport_emissions(transport: TransportMode, car_type: CarType) -> f64 {
    match transport {
        TransportMode::Car => match car_type {
            CarType::Petrol => 2.3,
            CarType::Diesel => 2.7,
            CarType::Hybrid => 1.4,
            CarType::Electric => 0.6,
        },
        TransportMode::Public => 0.8,
        TransportMode::Mixed => 1.2,
        TransportMode::Walk | TransportMode::Bike => 0.2,
    }
}

// ---------------------------------------------------------------------------
// Grade
// ---------------------------------------------------------------------------

/// Letter grade breakpoints on the total (tonnes CO2e/year).
pub const GRADE_A_BELOW: f64 = 6.0;
pub const GRADE_B_BELOW: f64 = 8.0;
pub const GRADE_C_BELOW: f64 = 12.0;
pub const GRADE_D_BELOW: f64 = 16.0;

/// Footprint letter grade, A (best) through E.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Grade {
    A,
    B,
    C,
    D,
    E,
}

impl Grade {
    /// Assign a grade from the total via the fixed breakpoints.
    pub fn from_total(total: f64) -> Self {
        if total < GRADE_A_BELOW {
            Self::A
        } else if total < GRADE_B_BELOW {
            Self::B
        } else if total < GRADE_C_BELOW {
            Self::C
        } else if total < GRADE_D_BELOW {
            Self::D
        } else {
            Self::E
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::A => "A",
            Self::B => "B",
            Self::C => "C",
            Self::D => "D",
            Self::E => "E",
        }
    }
}

// ---------------------------------------------------------------------------
// Result types
// ---------------------------------------------------------------------------

/// Per-component annual emissions in tonnes CO2e.
#[derive(Debug, Clone, Serialize)]
pub struct FootprintBreakdown {
    pub home: f64,
    pub transport: f64,
    pub spending: f64,
}

/// Footprint expressed as a count of a familiar animal's weight.
#[derive(Debug, Clone, Serialize)]
pub struct AnimalEquivalent {
    pub emoji: &'static str,
    pub count: u32,
}

/// Comparison of the user's total against fixed averages.
#[derive(Debug, Clone, Serialize)]
pub struct Comparisons {
    pub world_average: f64,
    pub uk_average: f64,
    pub region_average: f64,
    /// Headroom below the UK average, never negative.
    pub reduction: f64,
    pub animal_equivalent: AnimalEquivalent,
}

/// Estimated achievable savings for this profile.
#[derive(Debug, Clone, Serialize)]
pub struct Savings {
    pub potential_tonnes: f64,
    /// Pounds per month, a conservative achievable-spend estimate.
    pub monthly_money: i64,
    pub actions: Vec<String>,
}

/// The full derived footprint. Recomputed on demand from the profile;
/// carries no identity of its own.
#[derive(Debug, Clone, Serialize)]
pub struct CarbonFootprint {
    /// Sum of the breakdown components, tonnes CO2e/year.
    pub total: f64,
    pub breakdown: FootprintBreakdown,
    pub grade: Grade,
    pub comparisons: Comparisons,
    pub savings: Savings,
}

// ---------------------------------------------------------------------------
// Calculation
// ---------------------------------------------------------------------------

/// Portion of monthly spend treated as realistically saveable (10%).
const ACHIEVABLE_SPEND_DIVISOR: i64 = 10;

/// Calculate the annual footprint for a profile.
///
/// Pure and infallible: the profile's enums are already typed, so there
/// is no lookup that can miss.
pub fn calculate(profile: &LifestyleProfile) -> CarbonFootprint {
    let home = profile.rooms as f64
        * ROOM_BASE_TONNES
        * home_multiplier(profile.home_type)
        * energy_multiplier(profile.energy_source);

    let transport = transport_emissions(profile.transport, profile.effective_car_type());

    let spending = profile.monthly_spend as f64 * MONTHS_PER_YEAR * SPEND_TONNES_PER_POUND;

    let total = home + transport + spending;
    let reduction = (UK_AVERAGE_TONNES - total).max(0.0);

    let animal_count = (total / ELEPHANT_TONNES).round().max(1.0) as u32;

    CarbonFootprint {
        total,
        breakdown: FootprintBreakdown {
            home,
            transport,
            spending,
        },
        grade: Grade::from_total(total),
        comparisons: Comparisons {
            world_average: WORLD_AVERAGE_TONNES,
            uk_average: UK_AVERAGE_TONNES,
            region_average: REGION_AVERAGE_TONNES,
            reduction,
            animal_equivalent: AnimalEquivalent {
                emoji: ELEPHANT_EMOJI,
                count: animal_count,
            },
        },
        savings: Savings {
            potential_tonnes: reduction,
            monthly_money: profile.monthly_spend / ACHIEVABLE_SPEND_DIVISOR,
            actions: tips::fallback_action_titles(profile),
        },
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
