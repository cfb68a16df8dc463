use serde::{Deserialize, Serialize};

/// One axis of the scheduling grid. The wire form is the exact literal
/// variant name; lookups are case-sensitive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MealSlot {
    Breakfast,
    Lunch,
    Dinner,
}

impl MealSlot {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "Breakfast" => Some(Self::Breakfast),
            "Lunch" => Some(Self::Lunch),
            "Dinner" => Some(Self::Dinner),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Breakfast => "Breakfast",
            Self::Lunch => "Lunch",
            Self::Dinner => "Dinner",
        }
    }

    /// Position within a day: Breakfast < Lunch < Dinner.
    pub fn index(&self) -> i64 {
        match self {
            Self::Breakfast => 0,
            Self::Lunch => 1,
            Self::Dinner => 2,
        }
    }
}

impl std::fmt::Display for MealSlot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
