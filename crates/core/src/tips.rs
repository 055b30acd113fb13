//! Personalized tip types and the deterministic fallback rule table.
//!
//! The remote tip generator (the Zai engine crate) produces tips via an
//! LLM call; when that path is unconfigured or fails, these rules supply
//! the batch instead. The rule table is insertion-ordered and capped at
//! [`MAX_TIPS`], and it never fails for any valid profile.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::footprint::CarbonFootprint;
use crate::profile::{CarType, EnergySource, LifestyleProfile, TransportMode};

// ---------------------------------------------------------------------------
// Limits and thresholds
// ---------------------------------------------------------------------------

/// Maximum number of tips in a batch.
pub const MAX_TIPS: usize = 6;

/// Home component (tonnes/year) above which the insulation tip fires.
pub const HOME_COMPONENT_TIP_THRESHOLD: f64 = 4.0;

/// Monthly spend (pounds) above which the mindful-spend tip fires.
pub const HIGH_SPEND_THRESHOLD: i64 = 2000;

// ---------------------------------------------------------------------------
// Category
// ---------------------------------------------------------------------------

/// Dashboard card category a tip belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TipCategory {
    Carbon,
    Money,
    Local,
    Partners,
}

impl TipCategory {
    /// Parse a category string from the database or a remote response.
    pub fn from_str_db(s: &str) -> Result<Self, CoreError> {
        match s {
            "carbon" => Ok(Self::Carbon),
            "money" => Ok(Self::Money),
            "local" => Ok(Self::Local),
            "partners" => Ok(Self::Partners),
            _ => Err(CoreError::Configuration(format!(
                "Unrecognized tip category '{s}'. Must be one of: carbon, money, local, partners"
            ))),
        }
    }

    /// Convert to a database-compatible string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Carbon => "carbon",
            Self::Money => "money",
            Self::Local => "local",
            Self::Partners => "partners",
        }
    }
}

// ---------------------------------------------------------------------------
// Difficulty
// ---------------------------------------------------------------------------

/// How much effort a tip takes to act on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    /// Parse a difficulty string from the database or a remote response.
    pub fn from_str_db(s: &str) -> Result<Self, CoreError> {
        match s {
            "easy" => Ok(Self::Easy),
            "medium" => Ok(Self::Medium),
            "hard" => Ok(Self::Hard),
            _ => Err(CoreError::Configuration(format!(
                "Unrecognized difficulty '{s}'. Must be one of: easy, medium, hard"
            ))),
        }
    }

    /// Convert to a database-compatible string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Easy => "easy",
            Self::Medium => "medium",
            Self::Hard => "hard",
        }
    }
}

// ---------------------------------------------------------------------------
// Tip record
// ---------------------------------------------------------------------------

/// A personalized recommendation shown as a dashboard card.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PersonalizedTip {
    pub id: String,
    pub title: String,
    pub content: String,
    pub category: TipCategory,
    /// 1 (lowest) to 10 (highest). Callers decide any ranking display.
    pub priority: u8,
    pub action: String,
    pub saving_carbon_kg: f64,
    pub saving_money_monthly: f64,
    pub timeframe: String,
    pub difficulty: Difficulty,
}

fn tip(
    title: &str,
    content: &str,
    category: TipCategory,
    priority: u8,
    action: &str,
    saving_carbon_kg: f64,
    saving_money_monthly: f64,
    timeframe: &str,
    difficulty: Difficulty,
) -> PersonalizedTip {
    PersonalizedTip {
        id: uuid::Uuid::new_v4().to_string(),
        title: title.to_string(),
        content: content.to_string(),
        category,
        priority,
        action: action.to_string(),
        saving_carbon_kg,
        saving_money_monthly,
        timeframe: timeframe.to_string(),
        difficulty,
    }
}

// ---------------------------------------------------------------------------
// Rule table
// ---------------------------------------------------------------------------

fn renewable_tariff_tip() -> PersonalizedTip {
    tip(
        "Switch to a renewable tariff",
        "Your home runs on standard grid energy. Moving to a verified renewable \
         tariff is the single biggest cut most households can make, and switching \
         usually takes under twenty minutes online.",
        TipCategory::Carbon,
        9,
        "Compare renewable tariffs for your postcode",
        820.0,
        8.0,
        "This month",
        Difficulty::Easy,
    )
}

fn car_free_days_tip() -> PersonalizedTip {
    tip(
        "Try two car-free days a week",
        "Swapping two driving days for walking, cycling, or the bus trims a petrol \
         or diesel car's emissions by roughly a quarter without giving the car up.",
        TipCategory::Carbon,
        8,
        "Pick two weekdays and plan alternative routes",
        450.0,
        35.0,
        "This week",
        Difficulty::Medium,
    )
}

fn insulation_tip() -> PersonalizedTip {
    tip(
        "Stop heat escaping",
        "Heating dominates your home footprint. Draught-proofing doors and windows \
         and topping up loft insulation pays for itself in a winter or two.",
        TipCategory::Money,
        7,
        "Book a home energy assessment",
        300.0,
        22.0,
        "Next 3 months",
        Difficulty::Medium,
    )
}

fn mindful_spend_tip() -> PersonalizedTip {
    tip(
        "Audit your recurring spend",
        "Your monthly spend sits above the typical household. A one-hour audit of \
         subscriptions and impulse categories usually finds savings with an \
         emissions cut attached.",
        TipCategory::Money,
        6,
        "List your five biggest recurring costs",
        120.0,
        60.0,
        "This week",
        Difficulty::Easy,
    )
}

fn seasonal_food_tip() -> PersonalizedTip {
    tip(
        "Eat with the season",
        "Locally grown, in-season food skips the air freight and the heated \
         greenhouse. Your area has weekly producer markets worth a look.",
        TipCategory::Local,
        5,
        "Find a local producer market",
        150.0,
        10.0,
        "This week",
        Difficulty::Easy,
    )
}

fn local_partners_tip() -> PersonalizedTip {
    tip(
        "Shop with partner businesses",
        "Independent shops near you offer rewards for sustainable choices through \
         Zero Zero partners, so supporting local also earns points.",
        TipCategory::Partners,
        4,
        "Browse partner offers near your postcode",
        40.0,
        5.0,
        "Anytime",
        Difficulty::Easy,
    )
}

fn waste_less_tip() -> PersonalizedTip {
    tip(
        "Halve your food waste",
        "Planning meals around what is already in the fridge cuts the average \
         household's binned food roughly in half.",
        TipCategory::Local,
        5,
        "Do a fridge-first meal plan for one week",
        180.0,
        25.0,
        "This week",
        Difficulty::Easy,
    )
}

fn led_bulb_tip() -> PersonalizedTip {
    tip(
        "Swap remaining bulbs to LED",
        "LEDs use around a tenth of the energy of old incandescent bulbs and last \
         years longer. Start with the lights you leave on longest.",
        TipCategory::Carbon,
        3,
        "Replace your three most-used bulbs",
        60.0,
        4.0,
        "This weekend",
        Difficulty::Easy,
    )
}

/// Generate the deterministic fallback tip batch for a profile.
///
/// Rules fire in a fixed order and the batch is trimmed to [`MAX_TIPS`],
/// matching the insertion-then-cap behaviour tips have always had. Never
/// fails for any valid profile.
pub fn fallback_tips(profile: &LifestyleProfile, footprint: &CarbonFootprint) -> Vec<PersonalizedTip> {
    let mut tips = Vec::new();

    if profile.energy_source == EnergySource::Grid {
        tips.push(renewable_tariff_tip());
    }

    if profile.transport == TransportMode::Car && profile.effective_car_type() != CarType::Electric
    {
        tips.push(car_free_days_tip());
    }

    if footprint.breakdown.home > HOME_COMPONENT_TIP_THRESHOLD {
        tips.push(insulation_tip());
    }

    if profile.monthly_spend > HIGH_SPEND_THRESHOLD {
        tips.push(mindful_spend_tip());
    }

    if profile.has_goal("eat_sustainably") {
        tips.push(seasonal_food_tip());
    }

    if profile.has_goal("support_local") {
        tips.push(local_partners_tip());
    }

    if profile.has_goal("waste_less") {
        tips.push(waste_less_tip());
    }

    // Universal tip, appended before the cap is applied.
    tips.push(led_bulb_tip());

    tips.truncate(MAX_TIPS);
    tips
}

/// Titles of the profile-only fallback rules, used as the suggested
/// actions on the footprint's savings block. At most three.
pub fn fallback_action_titles(profile: &LifestyleProfile) -> Vec<String> {
    let mut titles = Vec::new();

    if profile.energy_source == EnergySource::Grid {
        titles.push(renewable_tariff_tip().title);
    }
    if profile.transport == TransportMode::Car && profile.effective_car_type() != CarType::Electric
    {
        titles.push(car_free_days_tip().title);
    }
    if profile.monthly_spend > HIGH_SPEND_THRESHOLD {
        titles.push(mindful_spend_tip().title);
    }
    titles.push(led_bulb_tip().title);

    titles.truncate(3);
    titles
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
