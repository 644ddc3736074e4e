//! Slots — reveal positions and their current picks

use std::fmt;

use serde::{Deserialize, Serialize};

use rf_pick::SlotId;

use crate::pool::PoolSpec;

/// What a slot shows
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SlotRole {
    Portrait,
    Item,
    Addon(u8),
    Perk(u8),
    Custom(String),
}

impl SlotRole {
    /// Role tag: "portrait", "item", "addon:0", "perk:2"
    pub fn tag(&self) -> String {
        match self {
            SlotRole::Portrait => "portrait".to_string(),
            SlotRole::Item => "item".to_string(),
            SlotRole::Addon(i) => format!("addon:{i}"),
            SlotRole::Perk(i) => format!("perk:{i}"),
            SlotRole::Custom(tag) => tag.clone(),
        }
    }
}

impl fmt::Display for SlotRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.tag())
    }
}

/// Static description of a slot within a topology
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotSpec {
    pub id: SlotId,
    pub role: SlotRole,
    pub pool: PoolSpec,
    /// Upstream slot whose pick scopes this slot's pool
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<SlotId>,
}

impl SlotSpec {
    pub fn new(id: impl Into<SlotId>, role: SlotRole, pool: PoolSpec) -> Self {
        Self {
            id: id.into(),
            role,
            pool,
            parent: None,
        }
    }

    pub fn depends_on(mut self, parent: impl Into<SlotId>) -> Self {
        self.parent = Some(parent.into());
        self
    }
}

/// A live slot: spec plus current pick
#[derive(Debug, Clone)]
pub struct Slot {
    spec: SlotSpec,
    pick: Option<String>,
}

impl Slot {
    pub fn new(spec: SlotSpec) -> Self {
        Self { spec, pick: None }
    }

    pub fn id(&self) -> &SlotId {
        &self.spec.id
    }

    pub fn role(&self) -> &SlotRole {
        &self.spec.role
    }

    pub fn pool(&self) -> &PoolSpec {
        &self.spec.pool
    }

    pub fn parent(&self) -> Option<&SlotId> {
        self.spec.parent.as_ref()
    }

    pub fn spec(&self) -> &SlotSpec {
        &self.spec
    }

    /// Current pick, `None` while unset
    pub fn pick(&self) -> Option<&str> {
        self.pick.as_deref()
    }

    pub fn is_set(&self) -> bool {
        self.pick.is_some()
    }

    pub(crate) fn set_pick(&mut self, candidate: impl Into<String>) {
        self.pick = Some(candidate.into());
    }

    /// Returns true if there was a pick to clear
    pub(crate) fn clear(&mut self) -> bool {
        self.pick.take().is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_tags() {
        assert_eq!(SlotRole::Portrait.tag(), "portrait");
        assert_eq!(SlotRole::Addon(0).tag(), "addon:0");
        assert_eq!(SlotRole::Perk(2).to_string(), "perk:2");
        assert_eq!(SlotRole::Custom("map".into()).tag(), "map");
    }

    #[test]
    fn test_slot_starts_unset() {
        let mut slot = Slot::new(SlotSpec::new("item", SlotRole::Item, PoolSpec::new("survivor_items")));
        assert!(!slot.is_set());
        slot.set_pick("Medkit.png");
        assert_eq!(slot.pick(), Some("Medkit.png"));
        assert!(slot.clear());
        assert!(!slot.clear());
    }
}
