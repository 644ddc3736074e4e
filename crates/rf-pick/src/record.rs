//! PickRecord — one candidate shown in one slot
//!
//! Emitted once per slot per animation tick (preview) and once more when the
//! slot is finalized.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier of a reveal slot ("portrait", "addon_0", "perk_2", ...)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SlotId(String);

impl SlotId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SlotId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SlotId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for SlotId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl AsRef<str> for SlotId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// A candidate shown in a slot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PickRecord {
    /// Run that produced this pick
    pub run_id: u64,
    /// Target slot
    pub slot: SlotId,
    /// Raw candidate identifier (usually a file name)
    pub candidate: String,
    /// Human-readable label derived from the candidate
    pub label: String,
    /// False while animating, true for the committed pick
    pub is_final: bool,
    /// Phase index within the run
    #[serde(default)]
    pub phase: usize,
    /// Animation tick within the phase (the finalizing tick for final picks)
    #[serde(default)]
    pub tick: u32,
}

impl PickRecord {
    /// Animated preview pick
    pub fn preview(
        run_id: u64,
        slot: SlotId,
        candidate: impl Into<String>,
        label: impl Into<String>,
        phase: usize,
        tick: u32,
    ) -> Self {
        Self {
            run_id,
            slot,
            candidate: candidate.into(),
            label: label.into(),
            is_final: false,
            phase,
            tick,
        }
    }

    /// Committed pick
    pub fn final_pick(
        run_id: u64,
        slot: SlotId,
        candidate: impl Into<String>,
        label: impl Into<String>,
        phase: usize,
        tick: u32,
    ) -> Self {
        Self {
            is_final: true,
            ..Self::preview(run_id, slot, candidate, label, phase, tick)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slot_id_display_and_conversions() {
        let id = SlotId::from("perk_2");
        assert_eq!(id.to_string(), "perk_2");
        assert_eq!(id, SlotId::new(String::from("perk_2")));
        assert_eq!(id.as_str(), "perk_2");
    }

    #[test]
    fn test_final_pick_sets_flag() {
        let preview = PickRecord::preview(1, "item".into(), "Medkit.png", "MEDKIT", 1, 4);
        let fin = PickRecord::final_pick(1, "item".into(), "Medkit.png", "MEDKIT", 1, 21);

        assert!(!preview.is_final);
        assert!(fin.is_final);
        assert_eq!(fin.candidate, preview.candidate);
    }

    #[test]
    fn test_slot_id_serializes_as_plain_string() {
        let json = serde_json::to_string(&SlotId::from("addon_0")).unwrap();
        assert_eq!(json, "\"addon_0\"");
    }
}
