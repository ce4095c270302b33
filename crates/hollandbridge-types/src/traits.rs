//! YouScience trait categories and their enumerated options.
//!
//! Each of the eight categories offers exactly three options. Options are a
//! closed enum and each one knows its category, so a category slot can only
//! ever hold one of its own options.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One of the 8 fixed trait dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TraitCategory {
    Interpersonal,
    Timeframe,
    Workstyle,
    Inductive,
    Sequential,
    Spatial,
    Idea,
    Numeric,
}

impl TraitCategory {
    /// All categories in their fixed order.
    pub const ALL: [TraitCategory; 8] = [
        TraitCategory::Interpersonal,
        TraitCategory::Timeframe,
        TraitCategory::Workstyle,
        TraitCategory::Inductive,
        TraitCategory::Sequential,
        TraitCategory::Spatial,
        TraitCategory::Idea,
        TraitCategory::Numeric,
    ];

    /// Stable key used in serialized answers.
    pub fn key(&self) -> &'static str {
        match self {
            TraitCategory::Interpersonal => "interpersonal",
            TraitCategory::Timeframe => "timeframe",
            TraitCategory::Workstyle => "workstyle",
            TraitCategory::Inductive => "inductive",
            TraitCategory::Sequential => "sequential",
            TraitCategory::Spatial => "spatial",
            TraitCategory::Idea => "idea",
            TraitCategory::Numeric => "numeric",
        }
    }

    /// Heading shown above the category's choices in the wizard.
    pub fn heading(&self) -> &'static str {
        match self {
            TraitCategory::Interpersonal => "Interpersonal Style",
            TraitCategory::Timeframe => "Time Frame Orientation",
            TraitCategory::Workstyle => "Work Approach",
            TraitCategory::Inductive => "Inductive Reasoning",
            TraitCategory::Sequential => "Sequential Reasoning",
            TraitCategory::Spatial => "Spatial Visualization",
            TraitCategory::Idea => "Idea Generation",
            TraitCategory::Numeric => "Numerical Reasoning",
        }
    }

    /// Label used for the category in the outbound prompt.
    ///
    /// Differs from [`heading`](Self::heading) only for `Timeframe`.
    pub fn prompt_label(&self) -> &'static str {
        match self {
            TraitCategory::Timeframe => "Time Orientation",
            other => other.heading(),
        }
    }

    /// The three options for this category, in display order.
    pub fn options(&self) -> [TraitOption; 3] {
        use TraitOption::*;
        match self {
            TraitCategory::Interpersonal => [Introvert, BlendedEnergizer, Extrovert],
            TraitCategory::Timeframe => [FutureFocuser, BalancedFocuser, PresentFocuser],
            TraitCategory::Workstyle => [Generalist, Liaison, Specialist],
            TraitCategory::Inductive => [DiagnosticProblemSolver, Investigator, FactChecker],
            TraitCategory::Sequential => {
                [SequentialThinker, CollaborativePlanner, ProcessSupporter]
            }
            TraitCategory::Spatial => [Visualizer3d, SpacePlanner, AbstractThinker],
            TraitCategory::Idea => [Brainstormer, IdeaContributor, ConcentratedFocuser],
            TraitCategory::Numeric => {
                [NumericalDetective, NumericalPredictor, NumericalChecker]
            }
        }
    }
}

impl fmt::Display for TraitCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for TraitCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TraitCategory::ALL
            .into_iter()
            .find(|c| c.key() == s.trim().to_lowercase())
            .ok_or_else(|| format!("invalid trait category: '{s}'"))
    }
}

/// A single enumerated trait result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TraitOption {
    Introvert,
    #[serde(rename = "Blended Energizer")]
    BlendedEnergizer,
    Extrovert,
    #[serde(rename = "Future Focuser")]
    FutureFocuser,
    #[serde(rename = "Balanced Focuser")]
    BalancedFocuser,
    #[serde(rename = "Present Focuser")]
    PresentFocuser,
    Generalist,
    Liaison,
    Specialist,
    #[serde(rename = "Diagnostic Problem Solver")]
    DiagnosticProblemSolver,
    Investigator,
    #[serde(rename = "Fact Checker")]
    FactChecker,
    #[serde(rename = "Sequential Thinker")]
    SequentialThinker,
    #[serde(rename = "Collaborative Planner")]
    CollaborativePlanner,
    #[serde(rename = "Process Supporter")]
    ProcessSupporter,
    #[serde(rename = "3D Visualizer")]
    Visualizer3d,
    #[serde(rename = "Space Planner")]
    SpacePlanner,
    #[serde(rename = "Abstract Thinker")]
    AbstractThinker,
    Brainstormer,
    #[serde(rename = "Idea Contributor")]
    IdeaContributor,
    #[serde(rename = "Concentrated Focuser")]
    ConcentratedFocuser,
    #[serde(rename = "Numerical Detective")]
    NumericalDetective,
    #[serde(rename = "Numerical Predictor")]
    NumericalPredictor,
    #[serde(rename = "Numerical Checker")]
    NumericalChecker,
}

impl TraitOption {
    pub fn label(&self) -> &'static str {
        match self {
            TraitOption::Introvert => "Introvert",
            TraitOption::BlendedEnergizer => "Blended Energizer",
            TraitOption::Extrovert => "Extrovert",
            TraitOption::FutureFocuser => "Future Focuser",
            TraitOption::BalancedFocuser => "Balanced Focuser",
            TraitOption::PresentFocuser => "Present Focuser",
            TraitOption::Generalist => "Generalist",
            TraitOption::Liaison => "Liaison",
            TraitOption::Specialist => "Specialist",
            TraitOption::DiagnosticProblemSolver => "Diagnostic Problem Solver",
            TraitOption::Investigator => "Investigator",
            TraitOption::FactChecker => "Fact Checker",
            TraitOption::SequentialThinker => "Sequential Thinker",
            TraitOption::CollaborativePlanner => "Collaborative Planner",
            TraitOption::ProcessSupporter => "Process Supporter",
            TraitOption::Visualizer3d => "3D Visualizer",
            TraitOption::SpacePlanner => "Space Planner",
            TraitOption::AbstractThinker => "Abstract Thinker",
            TraitOption::Brainstormer => "Brainstormer",
            TraitOption::IdeaContributor => "Idea Contributor",
            TraitOption::ConcentratedFocuser => "Concentrated Focuser",
            TraitOption::NumericalDetective => "Numerical Detective",
            TraitOption::NumericalPredictor => "Numerical Predictor",
            TraitOption::NumericalChecker => "Numerical Checker",
        }
    }

    /// The category this option belongs to.
    pub fn category(&self) -> TraitCategory {
        TraitCategory::ALL
            .into_iter()
            .find(|c| c.options().contains(self))
            .unwrap_or_else(|| unreachable!("every trait option belongs to a category"))
    }
}

impl fmt::Display for TraitOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for TraitOption {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TraitCategory::ALL
            .iter()
            .flat_map(|c| c.options())
            .find(|o| o.label().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("invalid trait option: '{s}'"))
    }
}

/// Trait selections, one slot per category.
///
/// All eight keys are always present when serialized; an unset slot is
/// `null`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Traits {
    pub interpersonal: Option<TraitOption>,
    pub timeframe: Option<TraitOption>,
    pub workstyle: Option<TraitOption>,
    pub inductive: Option<TraitOption>,
    pub sequential: Option<TraitOption>,
    pub spatial: Option<TraitOption>,
    pub idea: Option<TraitOption>,
    pub numeric: Option<TraitOption>,
}

impl Traits {
    pub fn get(&self, category: TraitCategory) -> Option<TraitOption> {
        *self.slot(category)
    }

    /// Store `option` in its own category's slot. Returns the previous value.
    pub fn select(&mut self, option: TraitOption) -> Option<TraitOption> {
        self.slot_mut(option.category()).replace(option)
    }

    /// Unset a category. Returns the previous value.
    pub fn clear(&mut self, category: TraitCategory) -> Option<TraitOption> {
        self.slot_mut(category).take()
    }

    /// Iterate every category with its selection, in fixed order.
    pub fn iter(&self) -> impl Iterator<Item = (TraitCategory, Option<TraitOption>)> + '_ {
        TraitCategory::ALL.into_iter().map(|c| (c, self.get(c)))
    }

    fn slot(&self, category: TraitCategory) -> &Option<TraitOption> {
        match category {
            TraitCategory::Interpersonal => &self.interpersonal,
            TraitCategory::Timeframe => &self.timeframe,
            TraitCategory::Workstyle => &self.workstyle,
            TraitCategory::Inductive => &self.inductive,
            TraitCategory::Sequential => &self.sequential,
            TraitCategory::Spatial => &self.spatial,
            TraitCategory::Idea => &self.idea,
            TraitCategory::Numeric => &self.numeric,
        }
    }

    fn slot_mut(&mut self, category: TraitCategory) -> &mut Option<TraitOption> {
        match category {
            TraitCategory::Interpersonal => &mut self.interpersonal,
            TraitCategory::Timeframe => &mut self.timeframe,
            TraitCategory::Workstyle => &mut self.workstyle,
            TraitCategory::Inductive => &mut self.inductive,
            TraitCategory::Sequential => &mut self.sequential,
            TraitCategory::Spatial => &mut self.spatial,
            TraitCategory::Idea => &mut self.idea,
            TraitCategory::Numeric => &mut self.numeric,
        }
    }
}
