//! Holland codes (RIASEC career-interest categories).

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Maximum number of Holland codes a user may select.
pub const MAX_HOLLAND_CODES: usize = 3;

/// One of the six Holland personality/interest categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum HollandCode {
    Realistic,
    Investigative,
    Artistic,
    Social,
    Enterprising,
    Conventional,
}

impl HollandCode {
    /// All codes in display order.
    pub const ALL: [HollandCode; 6] = [
        HollandCode::Realistic,
        HollandCode::Investigative,
        HollandCode::Artistic,
        HollandCode::Social,
        HollandCode::Enterprising,
        HollandCode::Conventional,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            HollandCode::Realistic => "Realistic",
            HollandCode::Investigative => "Investigative",
            HollandCode::Artistic => "Artistic",
            HollandCode::Social => "Social",
            HollandCode::Enterprising => "Enterprising",
            HollandCode::Conventional => "Conventional",
        }
    }
}

impl fmt::Display for HollandCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for HollandCode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        HollandCode::ALL
            .into_iter()
            .find(|code| code.label().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("invalid Holland code: '{s}'"))
    }
}
