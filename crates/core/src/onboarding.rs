//! Onboarding wizard constants and validation.
//!
//! Defines the wizard step definitions, status enumeration, and the
//! validation helpers used by the API and repository layers for the
//! lifestyle onboarding wizard. Also assembles the canonical
//! [`LifestyleProfile`] from accumulated step data at completion.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::profile::{
    is_valid_goal, CarType, EnergySource, HomeType, LifestyleProfile, TransportMode,
    DEFAULT_TRANSPORT, MAX_MONTHLY_SPEND, MIN_MONTHLY_SPEND,
};

// ---------------------------------------------------------------------------
// Onboarding status
// ---------------------------------------------------------------------------

/// Status values for an onboarding session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OnboardingStatus {
    InProgress,
    Completed,
    Abandoned,
}

impl OnboardingStatus {
    /// Parse a status string from the database.
    pub fn from_str_db(s: &str) -> Result<Self, CoreError> {
        match s {
            "in_progress" => Ok(Self::InProgress),
            "completed" => Ok(Self::Completed),
            "abandoned" => Ok(Self::Abandoned),
            _ => Err(CoreError::Validation(format!(
                "Invalid onboarding status '{s}'. Must be one of: in_progress, completed, abandoned"
            ))),
        }
    }

    /// Convert to a database-compatible string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::InProgress => "in_progress",
            Self::Completed => "completed",
            Self::Abandoned => "abandoned",
        }
    }
}

// ---------------------------------------------------------------------------
// Onboarding steps
// ---------------------------------------------------------------------------

/// The eight steps in the onboarding wizard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OnboardingStep {
    Name,
    Location,
    Home,
    Household,
    Transport,
    Energy,
    Spend,
    Goals,
}

/// Total number of steps in the wizard.
pub const TOTAL_STEPS: u8 = 8;

/// Minimum step number (1-based).
pub const MIN_STEP: u8 = 1;

/// Maximum step number (1-based).
pub const MAX_STEP: u8 = 8;

impl OnboardingStep {
    /// Convert a 1-based step number to an `OnboardingStep`.
    pub fn from_number(n: u8) -> Result<Self, CoreError> {
        match n {
            1 => Ok(Self::Name),
            2 => Ok(Self::Location),
            3 => Ok(Self::Home),
            4 => Ok(Self::Household),
            5 => Ok(Self::Transport),
            6 => Ok(Self::Energy),
            7 => Ok(Self::Spend),
            8 => Ok(Self::Goals),
            _ => Err(CoreError::Validation(format!(
                "Invalid step number {n}. Must be between {MIN_STEP} and {MAX_STEP}"
            ))),
        }
    }

    /// Convert to a 1-based step number.
    pub fn to_number(self) -> u8 {
        match self {
            Self::Name => 1,
            Self::Location => 2,
            Self::Home => 3,
            Self::Household => 4,
            Self::Transport => 5,
            Self::Energy => 6,
            Self::Spend => 7,
            Self::Goals => 8,
        }
    }

    /// Human-readable label for the step.
    pub fn label(self) -> &'static str {
        match self {
            Self::Name => "Your name",
            Self::Location => "Where you live",
            Self::Home => "Your home",
            Self::Household => "Rooms and people",
            Self::Transport => "How you get around",
            Self::Energy => "Your energy",
            Self::Spend => "Monthly spend",
            Self::Goals => "Your goals",
        }
    }
}

// ---------------------------------------------------------------------------
// Step data key names
// ---------------------------------------------------------------------------

/// JSON key for the user's name in step 1 data.
pub const STEP_DATA_KEY_NAME: &str = "name";

/// JSON key for the postcode in step 2 data.
pub const STEP_DATA_KEY_POSTCODE: &str = "postcode";

/// JSON key for the home type in step 3 data.
pub const STEP_DATA_KEY_HOME_TYPE: &str = "home_type";

/// JSON key for the room count in step 4 data.
pub const STEP_DATA_KEY_ROOMS: &str = "rooms";

/// JSON key for the household size in step 4 data.
pub const STEP_DATA_KEY_PEOPLE: &str = "people";

/// JSON key for the transport mode in step 5 data.
pub const STEP_DATA_KEY_TRANSPORT: &str = "transport";

/// JSON key for the optional car type in step 5 data.
pub const STEP_DATA_KEY_CAR_TYPE: &str = "car_type";

/// JSON key for the energy source in step 6 data.
pub const STEP_DATA_KEY_ENERGY_SOURCE: &str = "energy_source";

/// JSON key for the monthly spend in step 7 data.
pub const STEP_DATA_KEY_MONTHLY_SPEND: &str = "monthly_spend";

/// JSON key for the selected goals in step 8 data.
pub const STEP_DATA_KEY_GOALS: &str = "goals";

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// Validate a step transition.
///
/// A transition is valid if the next step is exactly one step forward or
/// one step backward from the current step. Jumping more than one step
/// in either direction is not allowed.
pub fn validate_step_transition(current: u8, next: u8) -> Result<(), CoreError> {
    if current < MIN_STEP || current > MAX_STEP {
        return Err(CoreError::Validation(format!(
            "Current step {current} is out of range ({MIN_STEP}..{MAX_STEP})"
        )));
    }
    if next < MIN_STEP || next > MAX_STEP {
        return Err(CoreError::Validation(format!(
            "Next step {next} is out of range ({MIN_STEP}..{MAX_STEP})"
        )));
    }

    let diff = (next as i16) - (current as i16);
    if diff != 1 && diff != -1 {
        return Err(CoreError::Validation(format!(
            "Cannot transition from step {current} to step {next}. \
             Must advance or go back exactly one step."
        )));
    }

    Ok(())
}

fn require_object(data: &serde_json::Value) -> Result<&serde_json::Map<String, serde_json::Value>, CoreError> {
    data.as_object()
        .ok_or_else(|| CoreError::Validation("Step data must be a JSON object".to_string()))
}

fn require_nonempty_str<'a>(
    obj: &'a serde_json::Map<String, serde_json::Value>,
    key: &str,
    step_label: &str,
) -> Result<&'a str, CoreError> {
    obj.get(key)
        .and_then(|v| v.as_str())
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| {
            CoreError::Validation(format!(
                "Step '{step_label}' requires a non-empty '{key}' field"
            ))
        })
}

fn require_i64(
    obj: &serde_json::Map<String, serde_json::Value>,
    key: &str,
    step_label: &str,
) -> Result<i64, CoreError> {
    obj.get(key).and_then(|v| v.as_i64()).ok_or_else(|| {
        CoreError::Validation(format!("Step '{step_label}' requires an integer '{key}' field"))
    })
}

/// Validate that step data contains the required keys for a given step.
///
/// Enum-valued fields are parsed with their loud `from_str_db` parsers,
/// so a misspelled home type or transport mode is rejected here rather
/// than surfacing as a poisoned number later.
pub fn validate_step_data(step: u8, data: &serde_json::Value) -> Result<(), CoreError> {
    let step_enum = OnboardingStep::from_number(step)?;
    let obj = require_object(data)?;
    let label = step_enum.label();

    match step_enum {
        OnboardingStep::Name => {
            require_nonempty_str(obj, STEP_DATA_KEY_NAME, label)?;
        }
        OnboardingStep::Location => {
            require_nonempty_str(obj, STEP_DATA_KEY_POSTCODE, label)?;
        }
        OnboardingStep::Home => {
            let raw = require_nonempty_str(obj, STEP_DATA_KEY_HOME_TYPE, label)?;
            HomeType::from_str_db(raw)?;
        }
        OnboardingStep::Household => {
            let rooms = require_i64(obj, STEP_DATA_KEY_ROOMS, label)?;
            let people = require_i64(obj, STEP_DATA_KEY_PEOPLE, label)?;
            if rooms < 1 {
                return Err(CoreError::Validation(format!(
                    "Rooms must be at least 1, got {rooms}"
                )));
            }
            if people < 1 {
                return Err(CoreError::Validation(format!(
                    "People must be at least 1, got {people}"
                )));
            }
        }
        OnboardingStep::Transport => {
            let raw = require_nonempty_str(obj, STEP_DATA_KEY_TRANSPORT, label)?;
            TransportMode::from_str_db(raw)?;
            if let Some(car) = obj.get(STEP_DATA_KEY_CAR_TYPE).and_then(|v| v.as_str()) {
                CarType::from_str_db(car)?;
            }
        }
        OnboardingStep::Energy => {
            let raw = require_nonempty_str(obj, STEP_DATA_KEY_ENERGY_SOURCE, label)?;
            EnergySource::from_str_db(raw)?;
        }
        OnboardingStep::Spend => {
            let spend = require_i64(obj, STEP_DATA_KEY_MONTHLY_SPEND, label)?;
            if !(MIN_MONTHLY_SPEND..=MAX_MONTHLY_SPEND).contains(&spend) {
                return Err(CoreError::Validation(format!(
                    "Monthly spend must be between {MIN_MONTHLY_SPEND} and {MAX_MONTHLY_SPEND}, got {spend}"
                )));
            }
        }
        OnboardingStep::Goals => {
            let goals = obj
                .get(STEP_DATA_KEY_GOALS)
                .and_then(|v| v.as_array())
                .ok_or_else(|| {
                    CoreError::Validation(format!(
                        "Step '{label}' requires a 'goals' array"
                    ))
                })?;
            if goals.is_empty() {
                return Err(CoreError::Validation(
                    "Select at least one goal".to_string(),
                ));
            }
            for goal in goals {
                let goal = goal.as_str().ok_or_else(|| {
                    CoreError::Validation("Goals must be strings".to_string())
                })?;
                if !is_valid_goal(goal) {
                    return Err(CoreError::Validation(format!("Unknown goal '{goal}'")));
                }
            }
        }
    }

    Ok(())
}

/// Check whether the current step can be advanced based on step data.
pub fn can_advance_step(step: u8, step_data: &serde_json::Value) -> bool {
    validate_step_data(step, step_data).is_ok()
}

/// Validate that a step number is within the valid range.
pub fn validate_step_number(step: u8) -> Result<(), CoreError> {
    if step < MIN_STEP || step > MAX_STEP {
        return Err(CoreError::Validation(format!(
            "Step {step} is out of range ({MIN_STEP}..{MAX_STEP})"
        )));
    }
    Ok(())
}

/// Check if a session can be completed (must be on the final step).
pub fn can_complete_session(current_step: u8) -> Result<(), CoreError> {
    if current_step != MAX_STEP {
        return Err(CoreError::Validation(format!(
            "Cannot complete session: must be on step {MAX_STEP} (Goals), \
             currently on step {current_step}"
        )));
    }
    Ok(())
}

/// Check if a session can be abandoned (must be in_progress).
pub fn can_abandon_session(status: &str) -> Result<(), CoreError> {
    if status != OnboardingStatus::InProgress.as_str() {
        return Err(CoreError::Validation(format!(
            "Cannot abandon session with status '{status}'. Only 'in_progress' sessions can be abandoned."
        )));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Profile assembly
// ---------------------------------------------------------------------------

/// Assemble the canonical [`LifestyleProfile`] from accumulated step data.
///
/// Optional fields get their documented defaults (`transport` falls back
/// to mixed, goals to an empty selection); everything else is required
/// and parsed loudly. The assembled profile is validated before being
/// returned, so callers never see a partially valid record.
pub fn profile_from_step_data(data: &serde_json::Value) -> Result<LifestyleProfile, CoreError> {
    let obj = require_object(data)?;

    let name = require_nonempty_str(obj, STEP_DATA_KEY_NAME, "completion")?.to_string();
    let postcode = require_nonempty_str(obj, STEP_DATA_KEY_POSTCODE, "completion")?.to_string();

    let home_type =
        HomeType::from_str_db(require_nonempty_str(obj, STEP_DATA_KEY_HOME_TYPE, "completion")?)?;

    let rooms = require_i64(obj, STEP_DATA_KEY_ROOMS, "completion")? as i32;
    let people = require_i64(obj, STEP_DATA_KEY_PEOPLE, "completion")? as i32;

    let transport = match obj.get(STEP_DATA_KEY_TRANSPORT).and_then(|v| v.as_str()) {
        Some(raw) => TransportMode::from_str_db(raw)?,
        None => DEFAULT_TRANSPORT,
    };

    let car_type = match obj.get(STEP_DATA_KEY_CAR_TYPE).and_then(|v| v.as_str()) {
        Some(raw) => Some(CarType::from_str_db(raw)?),
        None => None,
    };

    let energy_source = EnergySource::from_str_db(require_nonempty_str(
        obj,
        STEP_DATA_KEY_ENERGY_SOURCE,
        "completion",
    )?)?;

    let monthly_spend = require_i64(obj, STEP_DATA_KEY_MONTHLY_SPEND, "completion")?;

    let goals = obj
        .get(STEP_DATA_KEY_GOALS)
        .and_then(|v| v.as_array())
        .map(|arr| {
            arr.iter()
                .filter_map(|g| g.as_str())
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default();

    let profile = LifestyleProfile {
        name,
        postcode,
        home_type,
        rooms,
        people,
        transport,
        car_type,
        energy_source,
        monthly_spend,
        goals,
    };
    profile.validate()?;
    Ok(profile)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn full_step_data() -> serde_json::Value {
        json!({
            "name": "Ada",
            "postcode": "BS1 4DJ",
            "home_type": "house",
            "rooms": 3,
            "people": 2,
            "transport": "car",
            "car_type": "petrol",
            "energy_source": "grid",
            "monthly_spend": 2000,
            "goals": ["reduce_carbon", "save_money"],
        })
    }

    // -- OnboardingStatus --

    #[test]
    fn status_roundtrip() {
        for status in [
            OnboardingStatus::InProgress,
            OnboardingStatus::Completed,
            OnboardingStatus::Abandoned,
        ] {
            assert_eq!(OnboardingStatus::from_str_db(status.as_str()).unwrap(), status);
        }
    }

    #[test]
    fn status_from_str_invalid() {
        assert!(OnboardingStatus::from_str_db("paused").is_err());
        assert!(OnboardingStatus::from_str_db("").is_err());
    }

    // -- OnboardingStep --

    #[test]
    fn step_from_number_valid() {
        assert_eq!(OnboardingStep::from_number(1).unwrap(), OnboardingStep::Name);
        assert_eq!(OnboardingStep::from_number(8).unwrap(), OnboardingStep::Goals);
    }

    #[test]
    fn step_from_number_invalid() {
        assert!(OnboardingStep::from_number(0).is_err());
        assert!(OnboardingStep::from_number(9).is_err());
        assert!(OnboardingStep::from_number(255).is_err());
    }

    #[test]
    fn step_to_number_roundtrip() {
        for n in MIN_STEP..=MAX_STEP {
            let step = OnboardingStep::from_number(n).unwrap();
            assert_eq!(step.to_number(), n);
        }
    }

    #[test]
    fn step_labels_are_nonempty() {
        for n in MIN_STEP..=MAX_STEP {
            let step = OnboardingStep::from_number(n).unwrap();
            assert!(!step.label().is_empty());
        }
    }

    // -- validate_step_transition --

    #[test]
    fn transition_forward_by_one_is_valid() {
        for current in MIN_STEP..MAX_STEP {
            assert!(validate_step_transition(current, current + 1).is_ok());
        }
    }

    #[test]
    fn transition_backward_by_one_is_valid() {
        for current in (MIN_STEP + 1)..=MAX_STEP {
            assert!(validate_step_transition(current, current - 1).is_ok());
        }
    }

    #[test]
    fn transition_same_step_is_invalid() {
        for step in MIN_STEP..=MAX_STEP {
            assert!(validate_step_transition(step, step).is_err());
        }
    }

    #[test]
    fn transition_skip_step_is_invalid() {
        assert!(validate_step_transition(1, 3).is_err());
        assert!(validate_step_transition(2, 6).is_err());
        assert!(validate_step_transition(8, 6).is_err());
    }

    #[test]
    fn transition_out_of_range() {
        assert!(validate_step_transition(0, 1).is_err());
        assert!(validate_step_transition(9, 8).is_err());
        assert!(validate_step_transition(1, 0).is_err());
        assert!(validate_step_transition(8, 9).is_err());
    }

    // -- validate_step_data --

    #[test]
    fn step1_requires_name() {
        assert!(validate_step_data(1, &json!({ "name": "Ada" })).is_ok());
        assert!(validate_step_data(1, &json!({ "name": "  " })).is_err());
        assert!(validate_step_data(1, &json!({})).is_err());
    }

    #[test]
    fn step2_requires_postcode() {
        assert!(validate_step_data(2, &json!({ "postcode": "BS1 4DJ" })).is_ok());
        assert!(validate_step_data(2, &json!({})).is_err());
    }

    #[test]
    fn step3_parses_home_type_loudly() {
        assert!(validate_step_data(3, &json!({ "home_type": "apartment" })).is_ok());
        assert!(matches!(
            validate_step_data(3, &json!({ "home_type": "castle" })),
            Err(CoreError::Configuration(_))
        ));
    }

    #[test]
    fn step4_requires_positive_counts() {
        assert!(validate_step_data(4, &json!({ "rooms": 2, "people": 1 })).is_ok());
        assert!(validate_step_data(4, &json!({ "rooms": 0, "people": 1 })).is_err());
        assert!(validate_step_data(4, &json!({ "rooms": 2, "people": 0 })).is_err());
        assert!(validate_step_data(4, &json!({ "rooms": 2 })).is_err());
    }

    #[test]
    fn step5_parses_transport_and_optional_car_type() {
        assert!(validate_step_data(5, &json!({ "transport": "public" })).is_ok());
        assert!(
            validate_step_data(5, &json!({ "transport": "car", "car_type": "hybrid" })).is_ok()
        );
        assert!(validate_step_data(5, &json!({ "transport": "rocket" })).is_err());
        assert!(
            validate_step_data(5, &json!({ "transport": "car", "car_type": "steam" })).is_err()
        );
    }

    #[test]
    fn step6_parses_energy_source() {
        assert!(validate_step_data(6, &json!({ "energy_source": "renewable" })).is_ok());
        assert!(validate_step_data(6, &json!({ "energy_source": "gas" })).is_err());
    }

    #[test]
    fn step7_bounds_spend() {
        assert!(validate_step_data(7, &json!({ "monthly_spend": 500 })).is_ok());
        assert!(validate_step_data(7, &json!({ "monthly_spend": 10_000 })).is_ok());
        assert!(validate_step_data(7, &json!({ "monthly_spend": 499 })).is_err());
        assert!(validate_step_data(7, &json!({ "monthly_spend": 10_001 })).is_err());
    }

    #[test]
    fn step8_requires_catalog_goals() {
        assert!(validate_step_data(8, &json!({ "goals": ["save_money"] })).is_ok());
        assert!(validate_step_data(8, &json!({ "goals": [] })).is_err());
        assert!(validate_step_data(8, &json!({ "goals": ["win_lottery"] })).is_err());
        assert!(validate_step_data(8, &json!({})).is_err());
    }

    #[test]
    fn step_data_rejects_non_object() {
        assert!(validate_step_data(1, &json!("not an object")).is_err());
        assert!(validate_step_data(1, &json!(42)).is_err());
        assert!(validate_step_data(1, &json!(null)).is_err());
    }

    #[test]
    fn step_data_invalid_step_number() {
        assert!(validate_step_data(0, &json!({})).is_err());
        assert!(validate_step_data(9, &json!({})).is_err());
    }

    // -- can_advance_step --

    #[test]
    fn can_advance_matches_validation() {
        assert!(can_advance_step(1, &json!({ "name": "Ada" })));
        assert!(!can_advance_step(1, &json!({})));
    }

    // -- completion / abandonment guards --

    #[test]
    fn can_complete_only_on_final_step() {
        assert!(can_complete_session(MAX_STEP).is_ok());
        for step in MIN_STEP..MAX_STEP {
            assert!(can_complete_session(step).is_err());
        }
    }

    #[test]
    fn can_abandon_in_progress_only() {
        assert!(can_abandon_session("in_progress").is_ok());
        assert!(can_abandon_session("completed").is_err());
        assert!(can_abandon_session("abandoned").is_err());
    }

    // -- profile_from_step_data --

    #[test]
    fn assembles_full_profile() {
        let profile = profile_from_step_data(&full_step_data()).unwrap();
        assert_eq!(profile.name, "Ada");
        assert_eq!(profile.home_type, HomeType::House);
        assert_eq!(profile.transport, TransportMode::Car);
        assert_eq!(profile.car_type, Some(CarType::Petrol));
        assert_eq!(profile.monthly_spend, 2000);
        assert_eq!(profile.goals.len(), 2);
    }

    #[test]
    fn missing_transport_defaults_to_mixed() {
        let mut data = full_step_data();
        data.as_object_mut().unwrap().remove(STEP_DATA_KEY_TRANSPORT);
        let profile = profile_from_step_data(&data).unwrap();
        assert_eq!(profile.transport, TransportMode::Mixed);
    }

    #[test]
    fn missing_goals_default_to_empty() {
        let mut data = full_step_data();
        data.as_object_mut().unwrap().remove(STEP_DATA_KEY_GOALS);
        let profile = profile_from_step_data(&data).unwrap();
        assert!(profile.goals.is_empty());
    }

    #[test]
    fn malformed_enum_fails_loudly() {
        let mut data = full_step_data();
        data.as_object_mut()
            .unwrap()
            .insert("energy_source".to_string(), json!("gas"));
        assert!(matches!(
            profile_from_step_data(&data),
            Err(CoreError::Configuration(_))
        ));
    }

    #[test]
    fn missing_required_field_fails() {
        let mut data = full_step_data();
        data.as_object_mut().unwrap().remove(STEP_DATA_KEY_NAME);
        assert!(profile_from_step_data(&data).is_err());
    }

    #[test]
    fn out_of_range_spend_fails_validation() {
        let mut data = full_step_data();
        data.as_object_mut()
            .unwrap()
            .insert("monthly_spend".to_string(), json!(20));
        assert!(profile_from_step_data(&data).is_err());
    }
}
