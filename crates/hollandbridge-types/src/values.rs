//! The Values Bridge catalog.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Maximum number of core values a user may select.
pub const MAX_CORE_VALUES: usize = 5;

/// A personal-value label from the fixed 15-item Values Bridge catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CoreValue {
    Cosmos,
    Scope,
    Luminance,
    Workcentrism,
    Radius,
    #[serde(rename = "Non Sibi")]
    NonSibi,
    Agency,
    Achievement,
    Voice,
    Beholderism,
    Belonging,
    Familycentrism,
    Place,
    Eudemonia,
    Affluence,
}

impl CoreValue {
    /// The full catalog in display order.
    pub const ALL: [CoreValue; 15] = [
        CoreValue::Cosmos,
        CoreValue::Scope,
        CoreValue::Luminance,
        CoreValue::Workcentrism,
        CoreValue::Radius,
        CoreValue::NonSibi,
        CoreValue::Agency,
        CoreValue::Achievement,
        CoreValue::Voice,
        CoreValue::Beholderism,
        CoreValue::Belonging,
        CoreValue::Familycentrism,
        CoreValue::Place,
        CoreValue::Eudemonia,
        CoreValue::Affluence,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            CoreValue::Cosmos => "Cosmos",
            CoreValue::Scope => "Scope",
            CoreValue::Luminance => "Luminance",
            CoreValue::Workcentrism => "Workcentrism",
            CoreValue::Radius => "Radius",
            CoreValue::NonSibi => "Non Sibi",
            CoreValue::Agency => "Agency",
            CoreValue::Achievement => "Achievement",
            CoreValue::Voice => "Voice",
            CoreValue::Beholderism => "Beholderism",
            CoreValue::Belonging => "Belonging",
            CoreValue::Familycentrism => "Familycentrism",
            CoreValue::Place => "Place",
            CoreValue::Eudemonia => "Eudemonia",
            CoreValue::Affluence => "Affluence",
        }
    }
}

impl fmt::Display for CoreValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for CoreValue {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CoreValue::ALL
            .into_iter()
            .find(|value| value.label().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("invalid core value: '{s}'"))
    }
}
