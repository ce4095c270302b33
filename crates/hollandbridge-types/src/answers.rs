//! The answer record accumulated over one wizard session.
//!
//! `AnswerRecord` keeps its fields private so the selection caps and the
//! fixed four admired-life slots hold for every value in existence:
//! mutation goes through [`AnswerRecord::apply`], and deserialization
//! re-checks the caps.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::holland::{HollandCode, MAX_HOLLAND_CODES};
use crate::traits::{TraitCategory, TraitOption, Traits};
use crate::values::{CoreValue, MAX_CORE_VALUES};

/// Number of admired-life slots.
pub const ADMIRED_LIFE_SLOTS: usize = 4;

/// Position of an admired person, 1 through 4.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct AdmiredSlot(u8);

impl AdmiredSlot {
    /// All slots in order.
    pub const ALL: [AdmiredSlot; ADMIRED_LIFE_SLOTS] =
        [AdmiredSlot(1), AdmiredSlot(2), AdmiredSlot(3), AdmiredSlot(4)];

    /// Returns `None` outside 1..=4.
    pub fn new(position: u8) -> Option<Self> {
        (1..=ADMIRED_LIFE_SLOTS as u8)
            .contains(&position)
            .then_some(Self(position))
    }

    pub fn position(&self) -> u8 {
        self.0
    }

    fn index(&self) -> usize {
        usize::from(self.0 - 1)
    }
}

impl TryFrom<u8> for AdmiredSlot {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        AdmiredSlot::new(value).ok_or_else(|| format!("admired slot must be 1-4, got {value}"))
    }
}

impl From<AdmiredSlot> for u8 {
    fn from(slot: AdmiredSlot) -> Self {
        slot.0
    }
}

impl fmt::Display for AdmiredSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A person whose life the user admires.
///
/// `None` means the field was never filled in; `Some("")` means the user
/// deliberately left it blank. Both render as empty text in the prompt.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdmiredLife {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub admire: Option<String>,
    #[serde(default)]
    pub reject: Option<String>,
}

/// Contact details collected on the final step.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub industries_to_avoid: Option<String>,
}

/// A single typed write into the answer record.
///
/// There is one variant per declared field, so an unknown field cannot be
/// expressed. Over JSON this is `{"field": "...", "value": ...}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "field", content = "value", rename_all = "snake_case")]
pub enum AnswerUpdate {
    SelectHollandCode(HollandCode),
    DeselectHollandCode(HollandCode),
    SetHollandCodes(Vec<HollandCode>),
    SelectCoreValue(CoreValue),
    DeselectCoreValue(CoreValue),
    SetCoreValues(Vec<CoreValue>),
    AdmiredName { slot: AdmiredSlot, text: String },
    AdmiredAdmire { slot: AdmiredSlot, text: String },
    AdmiredReject { slot: AdmiredSlot, text: String },
    SelectTrait(TraitOption),
    ClearTrait(TraitCategory),
    ContactName(String),
    ContactEmail(String),
    IndustriesToAvoid(String),
}

/// What an [`AnswerUpdate`] did. Never an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UpdateOutcome {
    /// The record changed.
    Applied,
    /// The record already held this value.
    Unchanged,
    /// The update would have exceeded a selection cap and was refused.
    CapReached,
}

/// Everything the user has answered so far.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "AnswerRecordRepr")]
pub struct AnswerRecord {
    holland_codes: Vec<HollandCode>,
    core_values: Vec<CoreValue>,
    admired_lives: [AdmiredLife; ADMIRED_LIFE_SLOTS],
    traits: Traits,
    contact: Contact,
}

impl AnswerRecord {
    /// Holland codes in the order they were selected.
    pub fn holland_codes(&self) -> &[HollandCode] {
        &self.holland_codes
    }

    /// Core values in the order they were selected.
    pub fn core_values(&self) -> &[CoreValue] {
        &self.core_values
    }

    pub fn admired_lives(&self) -> &[AdmiredLife; ADMIRED_LIFE_SLOTS] {
        &self.admired_lives
    }

    pub fn admired_life(&self, slot: AdmiredSlot) -> &AdmiredLife {
        &self.admired_lives[slot.index()]
    }

    pub fn traits(&self) -> &Traits {
        &self.traits
    }

    pub fn contact(&self) -> &Contact {
        &self.contact
    }

    /// Apply one typed update.
    ///
    /// Selection updates that would exceed a cap are refused and leave the
    /// set untouched. Text and trait updates always overwrite.
    pub fn apply(&mut self, update: AnswerUpdate) -> UpdateOutcome {
        match update {
            AnswerUpdate::SelectHollandCode(code) => {
                select_capped(&mut self.holland_codes, code, MAX_HOLLAND_CODES)
            }
            AnswerUpdate::DeselectHollandCode(code) => deselect(&mut self.holland_codes, code),
            AnswerUpdate::SetHollandCodes(codes) => {
                replace_capped(&mut self.holland_codes, codes, MAX_HOLLAND_CODES)
            }
            AnswerUpdate::SelectCoreValue(value) => {
                select_capped(&mut self.core_values, value, MAX_CORE_VALUES)
            }
            AnswerUpdate::DeselectCoreValue(value) => deselect(&mut self.core_values, value),
            AnswerUpdate::SetCoreValues(values) => {
                replace_capped(&mut self.core_values, values, MAX_CORE_VALUES)
            }
            AnswerUpdate::AdmiredName { slot, text } => {
                overwrite(&mut self.admired_lives[slot.index()].name, text)
            }
            AnswerUpdate::AdmiredAdmire { slot, text } => {
                overwrite(&mut self.admired_lives[slot.index()].admire, text)
            }
            AnswerUpdate::AdmiredReject { slot, text } => {
                overwrite(&mut self.admired_lives[slot.index()].reject, text)
            }
            AnswerUpdate::SelectTrait(option) => {
                if self.traits.select(option) == Some(option) {
                    UpdateOutcome::Unchanged
                } else {
                    UpdateOutcome::Applied
                }
            }
            AnswerUpdate::ClearTrait(category) => match self.traits.clear(category) {
                Some(_) => UpdateOutcome::Applied,
                None => UpdateOutcome::Unchanged,
            },
            AnswerUpdate::ContactName(text) => overwrite(&mut self.contact.name, text),
            AnswerUpdate::ContactEmail(text) => overwrite(&mut self.contact.email, text),
            AnswerUpdate::IndustriesToAvoid(text) => {
                overwrite(&mut self.contact.industries_to_avoid, text)
            }
        }
    }
}

fn select_capped<T: PartialEq>(set: &mut Vec<T>, item: T, cap: usize) -> UpdateOutcome {
    if set.contains(&item) {
        UpdateOutcome::Unchanged
    } else if set.len() >= cap {
        UpdateOutcome::CapReached
    } else {
        set.push(item);
        UpdateOutcome::Applied
    }
}

fn deselect<T: PartialEq>(set: &mut Vec<T>, item: T) -> UpdateOutcome {
    let before = set.len();
    set.retain(|existing| *existing != item);
    if set.len() == before {
        UpdateOutcome::Unchanged
    } else {
        UpdateOutcome::Applied
    }
}

fn replace_capped<T: PartialEq>(set: &mut Vec<T>, items: Vec<T>, cap: usize) -> UpdateOutcome {
    let mut deduped: Vec<T> = Vec::with_capacity(items.len());
    for item in items {
        if !deduped.contains(&item) {
            deduped.push(item);
        }
    }
    if deduped.len() > cap {
        UpdateOutcome::CapReached
    } else if *set == deduped {
        UpdateOutcome::Unchanged
    } else {
        *set = deduped;
        UpdateOutcome::Applied
    }
}

fn overwrite(field: &mut Option<String>, text: String) -> UpdateOutcome {
    if field.as_deref() == Some(text.as_str()) {
        UpdateOutcome::Unchanged
    } else {
        *field = Some(text);
        UpdateOutcome::Applied
    }
}

/// Unchecked wire shape of [`AnswerRecord`].
#[derive(Deserialize)]
struct AnswerRecordRepr {
    #[serde(default)]
    holland_codes: Vec<HollandCode>,
    #[serde(default)]
    core_values: Vec<CoreValue>,
    #[serde(default)]
    admired_lives: [AdmiredLife; ADMIRED_LIFE_SLOTS],
    #[serde(default)]
    traits: Traits,
    #[serde(default)]
    contact: Contact,
}

impl TryFrom<AnswerRecordRepr> for AnswerRecord {
    type Error = String;

    fn try_from(repr: AnswerRecordRepr) -> Result<Self, Self::Error> {
        let mut record = AnswerRecord {
            admired_lives: repr.admired_lives,
            traits: repr.traits,
            contact: repr.contact,
            ..AnswerRecord::default()
        };
        if record.apply(AnswerUpdate::SetHollandCodes(repr.holland_codes))
            == UpdateOutcome::CapReached
        {
            return Err(format!("at most {MAX_HOLLAND_CODES} Holland codes may be selected"));
        }
        if record.apply(AnswerUpdate::SetCoreValues(repr.core_values)) == UpdateOutcome::CapReached
        {
            return Err(format!("at most {MAX_CORE_VALUES} core values may be selected"));
        }
        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slot(n: u8) -> AdmiredSlot {
        AdmiredSlot::new(n).unwrap()
    }

    #[test]
    fn test_default_record_is_empty() {
        let record = AnswerRecord::default();
        assert!(record.holland_codes().is_empty());
        assert!(record.core_values().is_empty());
        assert_eq!(record.admired_lives().len(), 4);
        assert!(record.admired_lives().iter().all(|l| *l == AdmiredLife::default()));
        assert!(record.traits().iter().all(|(_, o)| o.is_none()));
        assert_eq!(*record.contact(), Contact::default());
    }

    #[test]
    fn test_admired_slot_bounds() {
        assert!(AdmiredSlot::new(0).is_none());
        assert!(AdmiredSlot::new(5).is_none());
        assert_eq!(AdmiredSlot::new(4).unwrap().position(), 4);
        assert!(serde_json::from_str::<AdmiredSlot>("7").is_err());
    }

    #[test]
    fn test_fourth_holland_code_is_refused() {
        let mut record = AnswerRecord::default();
        for code in [HollandCode::Social, HollandCode::Realistic, HollandCode::Artistic] {
            assert_eq!(record.apply(AnswerUpdate::SelectHollandCode(code)), UpdateOutcome::Applied);
        }
        let before = record.holland_codes().to_vec();

        let outcome = record.apply(AnswerUpdate::SelectHollandCode(HollandCode::Conventional));

        assert_eq!(outcome, UpdateOutcome::CapReached);
        assert_eq!(record.holland_codes(), before.as_slice());
    }

    #[test]
    fn test_sixth_core_value_is_refused() {
        let mut record = AnswerRecord::default();
        for value in &CoreValue::ALL[..5] {
            record.apply(AnswerUpdate::SelectCoreValue(*value));
        }
        let before = record.core_values().to_vec();

        for value in &CoreValue::ALL[5..] {
            assert_eq!(
                record.apply(AnswerUpdate::SelectCoreValue(*value)),
                UpdateOutcome::CapReached
            );
        }
        assert_eq!(record.core_values(), before.as_slice());
    }

    #[test]
    fn test_selection_keeps_selection_order_and_ignores_duplicates() {
        let mut record = AnswerRecord::default();
        record.apply(AnswerUpdate::SelectCoreValue(CoreValue::Voice));
        record.apply(AnswerUpdate::SelectCoreValue(CoreValue::Agency));
        assert_eq!(
            record.apply(AnswerUpdate::SelectCoreValue(CoreValue::Voice)),
            UpdateOutcome::Unchanged
        );
        assert_eq!(record.core_values(), &[CoreValue::Voice, CoreValue::Agency]);
    }

    #[test]
    fn test_deselect_frees_capacity() {
        let mut record = AnswerRecord::default();
        record.apply(AnswerUpdate::SetHollandCodes(vec![
            HollandCode::Social,
            HollandCode::Realistic,
            HollandCode::Artistic,
        ]));
        assert_eq!(
            record.apply(AnswerUpdate::DeselectHollandCode(HollandCode::Realistic)),
            UpdateOutcome::Applied
        );
        assert_eq!(
            record.apply(AnswerUpdate::DeselectHollandCode(HollandCode::Realistic)),
            UpdateOutcome::Unchanged
        );
        assert_eq!(
            record.apply(AnswerUpdate::SelectHollandCode(HollandCode::Enterprising)),
            UpdateOutcome::Applied
        );
        assert_eq!(
            record.holland_codes(),
            &[HollandCode::Social, HollandCode::Artistic, HollandCode::Enterprising]
        );
    }

    #[test]
    fn test_oversized_replacement_leaves_set_unchanged() {
        let mut record = AnswerRecord::default();
        record.apply(AnswerUpdate::SetHollandCodes(vec![HollandCode::Social]));

        let outcome = record.apply(AnswerUpdate::SetHollandCodes(HollandCode::ALL.to_vec()));

        assert_eq!(outcome, UpdateOutcome::CapReached);
        assert_eq!(record.holland_codes(), &[HollandCode::Social]);
    }

    #[test]
    fn test_replacement_dedupes_before_checking_cap() {
        let mut record = AnswerRecord::default();
        let outcome = record.apply(AnswerUpdate::SetHollandCodes(vec![
            HollandCode::Social,
            HollandCode::Social,
            HollandCode::Artistic,
            HollandCode::Artistic,
        ]));
        assert_eq!(outcome, UpdateOutcome::Applied);
        assert_eq!(record.holland_codes(), &[HollandCode::Social, HollandCode::Artistic]);
    }

    #[test]
    fn test_admired_text_overwrites_only_its_slot() {
        let mut record = AnswerRecord::default();
        record.apply(AnswerUpdate::AdmiredName {
            slot: slot(2),
            text: "Ada Lovelace".to_string(),
        });
        record.apply(AnswerUpdate::AdmiredName {
            slot: slot(2),
            text: "Grace Hopper".to_string(),
        });

        assert_eq!(record.admired_life(slot(2)).name.as_deref(), Some("Grace Hopper"));
        assert_eq!(record.admired_life(slot(1)).name, None);
        assert_eq!(record.admired_lives().len(), 4);
    }

    #[test]
    fn test_blank_text_is_distinct_from_unset() {
        let mut record = AnswerRecord::default();
        assert_eq!(
            record.apply(AnswerUpdate::ContactEmail(String::new())),
            UpdateOutcome::Applied
        );
        assert_eq!(record.contact().email.as_deref(), Some(""));
        assert_eq!(record.contact().name, None);
    }

    #[test]
    fn test_trait_select_and_clear_outcomes() {
        let mut record = AnswerRecord::default();
        assert_eq!(
            record.apply(AnswerUpdate::SelectTrait(TraitOption::Introvert)),
            UpdateOutcome::Applied
        );
        assert_eq!(
            record.apply(AnswerUpdate::SelectTrait(TraitOption::Introvert)),
            UpdateOutcome::Unchanged
        );
        assert_eq!(
            record.apply(AnswerUpdate::ClearTrait(TraitCategory::Interpersonal)),
            UpdateOutcome::Applied
        );
        assert_eq!(
            record.apply(AnswerUpdate::ClearTrait(TraitCategory::Interpersonal)),
            UpdateOutcome::Unchanged
        );
    }

    #[test]
    fn test_update_json_shape() {
        let update: AnswerUpdate = serde_json::from_str(
            r#"{"field": "admired_admire", "value": {"slot": 1, "text": "Rigor"}}"#,
        )
        .unwrap();
        assert_eq!(
            update,
            AnswerUpdate::AdmiredAdmire {
                slot: slot(1),
                text: "Rigor".to_string()
            }
        );

        let update: AnswerUpdate =
            serde_json::from_str(r#"{"field": "select_trait", "value": "3D Visualizer"}"#).unwrap();
        assert_eq!(update, AnswerUpdate::SelectTrait(TraitOption::Visualizer3d));

        assert!(serde_json::from_str::<AnswerUpdate>(r#"{"field": "favourite_colour", "value": "blue"}"#).is_err());
    }

    #[test]
    fn test_record_deserialize_rejects_over_cap() {
        let json = r#"{"holland_codes": ["Realistic", "Social", "Artistic", "Conventional"]}"#;
        let err = serde_json::from_str::<AnswerRecord>(json).unwrap_err();
        assert!(err.to_string().contains("at most 3"));
    }

    #[test]
    fn test_record_json_roundtrip_preserves_state() {
        let mut record = AnswerRecord::default();
        record.apply(AnswerUpdate::SetCoreValues(vec![CoreValue::Agency, CoreValue::NonSibi]));
        record.apply(AnswerUpdate::SelectTrait(TraitOption::Brainstormer));
        record.apply(AnswerUpdate::AdmiredReject {
            slot: slot(4),
            text: "Burnout".to_string(),
        });

        let json = serde_json::to_string(&record).unwrap();
        let parsed: AnswerRecord = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed, record);
    }
}
