//! Wizard step numbering.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The page the wizard is on, always within 1..=5.
///
/// Moves only by one in either direction and clamps at both ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct WizardStep(u8);

impl WizardStep {
    pub const FIRST: WizardStep = WizardStep(1);
    pub const LAST: WizardStep = WizardStep(5);

    pub fn new(number: u8) -> Option<Self> {
        (Self::FIRST.0..=Self::LAST.0)
            .contains(&number)
            .then_some(Self(number))
    }

    pub fn number(&self) -> u8 {
        self.0
    }

    pub fn is_first(&self) -> bool {
        *self == Self::FIRST
    }

    pub fn is_last(&self) -> bool {
        *self == Self::LAST
    }

    /// The following step, or `self` on the last step.
    pub fn next(self) -> Self {
        if self.is_last() { self } else { Self(self.0 + 1) }
    }

    /// The preceding step, or `self` on the first step.
    pub fn previous(self) -> Self {
        if self.is_first() { self } else { Self(self.0 - 1) }
    }

    /// Page heading for this step.
    pub fn title(&self) -> &'static str {
        match self.0 {
            1 => "Select Your Holland Codes",
            2 => "Choose Your Top 5 Values",
            3 => "Admired Lives",
            4 => "Select Your YouScience Results",
            _ => "Contact Info & Submit",
        }
    }
}

impl Default for WizardStep {
    fn default() -> Self {
        Self::FIRST
    }
}

impl TryFrom<u8> for WizardStep {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        WizardStep::new(value).ok_or_else(|| format!("wizard step must be 1-5, got {value}"))
    }
}

impl From<WizardStep> for u8 {
    fn from(step: WizardStep) -> Self {
        step.0
    }
}

impl fmt::Display for WizardStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Step {}: {}", self.0, self.title())
    }
}
