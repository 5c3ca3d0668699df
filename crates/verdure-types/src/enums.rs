//! Enumeration types shared across the Verdure workspace.

use serde::{Deserialize, Serialize};

/// An action an organism can take during one tick.
///
/// The action-selection policy returns exactly one of these; the engine
/// then dispatches the matching capability (movement, reproduction,
/// drinking, or eating).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    /// Move on the grid via the movement policy.
    Move,
    /// Replicate via the reproduction policy.
    Reproduce,
    /// Take water from the occupied cell via the drinking policy.
    Drink,
    /// Take food from the occupied cell via the eating policy.
    Eat,
}

impl core::fmt::Display for Action {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Move => write!(f, "move"),
            Self::Reproduce => write!(f, "reproduce"),
            Self::Drink => write!(f, "drink"),
            Self::Eat => write!(f, "eat"),
        }
    }
}

/// Why an organism died.
///
/// Set exactly once, together with `age_at_death`, when the organism
/// transitions out of the living state. Death is a state transition, not a
/// removal: dead organisms stay in the population as terminal records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CauseOfDeath {
    /// Age exceeded the species' maximum age.
    OldAge,
    /// Went too many consecutive ticks with no water.
    Thirst,
    /// Went too many consecutive ticks with no food.
    Hunger,
    /// Replaced by its children during replication.
    Replication,
    /// The organism vanished from its own action outcome and was
    /// defensively marked dead by the engine.
    Unknown,
}

impl core::fmt::Display for CauseOfDeath {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::OldAge => write!(f, "old_age"),
            Self::Thirst => write!(f, "thirst"),
            Self::Hunger => write!(f, "hunger"),
            Self::Replication => write!(f, "replication"),
            Self::Unknown => write!(f, "unknown"),
        }
    }
}

/// A consumable resource an organism can hold and the world can stock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceKind {
    /// Water, consumed via the drinking capability.
    Water,
    /// Food, consumed via the eating capability.
    Food,
}

impl core::fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Water => write!(f, "water"),
            Self::Food => write!(f, "food"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cause_of_death_serializes_snake_case() {
        let json = serde_json::to_string(&CauseOfDeath::OldAge).ok();
        assert_eq!(json.as_deref(), Some("\"old_age\""));
    }

    #[test]
    fn action_display_matches_serde() {
        for action in [Action::Move, Action::Reproduce, Action::Drink, Action::Eat] {
            let json = serde_json::to_string(&action).ok();
            assert_eq!(json, Some(format!("\"{action}\"")));
        }
    }
}
