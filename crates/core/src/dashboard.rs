//! Dashboard card interaction actions and reward points.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Points awarded for saving a tip card.
pub const POINTS_SAVED: i64 = 5;

/// Points awarded for completing a tip card's action.
pub const POINTS_COMPLETED: i64 = 20;

/// What a user did with a dashboard card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CardAction {
    Viewed,
    Saved,
    Dismissed,
    Completed,
}

impl CardAction {
    /// Parse an action string from the database or a request body.
    pub fn from_str_db(s: &str) -> Result<Self, CoreError> {
        match s {
            "viewed" => Ok(Self::Viewed),
            "saved" => Ok(Self::Saved),
            "dismissed" => Ok(Self::Dismissed),
            "completed" => Ok(Self::Completed),
            _ => Err(CoreError::Validation(format!(
                "Invalid card action '{s}'. Must be one of: viewed, saved, dismissed, completed"
            ))),
        }
    }

    /// Convert to a database-compatible string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Viewed => "viewed",
            Self::Saved => "saved",
            Self::Dismissed => "dismissed",
            Self::Completed => "completed",
        }
    }

    /// Reward points earned by this action.
    pub fn points(self) -> i64 {
        match self {
            Self::Viewed | Self::Dismissed => 0,
            Self::Saved => POINTS_SAVED,
            Self::Completed => POINTS_COMPLETED,
        }
    }
}
