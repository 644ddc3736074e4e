//! Scenario System — built-in reveal topologies
//!
//! ## Built-in Presets
//!
//! - `killer_perks` / `survivor_perks`: four perks from one pool
//! - `killer`: portrait, then two add-ons scoped by the portrait
//! - `survivor`: portrait, item, then two add-ons scoped by the item
//! - `full_killer`: `killer` followed by four perks
//! - `full_survivor`: `survivor` followed by four perks

mod presets;

pub use presets::*;

use serde::{Deserialize, Serialize};

use crate::topology::Topology;

/// Asset category names shared by the presets
pub mod category {
    pub const KILLERS: &str = "killers";
    pub const KILLER_ADDONS: &str = "killer_addons";
    pub const KILLER_PERKS: &str = "killer_perks";
    pub const SURVIVORS: &str = "survivors";
    pub const SURVIVOR_ITEMS: &str = "survivor_items";
    pub const SURVIVOR_ADDONS: &str = "survivor_items/addons";
    pub const SURVIVOR_PERKS: &str = "survivor_perks";
}

/// Prefix of the placeholder icons that live beside the perks
pub const PLACEHOLDER_PREFIX: &str = "helpLoading";

/// Built-in scenario
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScenarioKind {
    KillerPerks,
    SurvivorPerks,
    Killer,
    Survivor,
    FullKiller,
    FullSurvivor,
}

impl ScenarioKind {
    pub const ALL: [ScenarioKind; 6] = [
        ScenarioKind::KillerPerks,
        ScenarioKind::SurvivorPerks,
        ScenarioKind::Killer,
        ScenarioKind::Survivor,
        ScenarioKind::FullKiller,
        ScenarioKind::FullSurvivor,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            ScenarioKind::KillerPerks => "killer_perks",
            ScenarioKind::SurvivorPerks => "survivor_perks",
            ScenarioKind::Killer => "killer",
            ScenarioKind::Survivor => "survivor",
            ScenarioKind::FullKiller => "full_killer",
            ScenarioKind::FullSurvivor => "full_survivor",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.name() == name)
    }

    pub fn topology(&self) -> Topology {
        match self {
            ScenarioKind::KillerPerks => killer_perks(),
            ScenarioKind::SurvivorPerks => survivor_perks(),
            ScenarioKind::Killer => killer(),
            ScenarioKind::Survivor => survivor(),
            ScenarioKind::FullKiller => full_killer(),
            ScenarioKind::FullSurvivor => full_survivor(),
        }
    }
}

/// Topology of a built-in scenario by name
pub fn by_name(name: &str) -> Option<Topology> {
    ScenarioKind::from_name(name).map(|k| k.topology())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_preset_validates() {
        for kind in ScenarioKind::ALL {
            let topo = kind.topology();
            assert_eq!(topo.name, kind.name());
            topo.validate()
                .unwrap_or_else(|e| panic!("{} invalid: {e}", kind.name()));
        }
    }

    #[test]
    fn test_by_name() {
        assert!(by_name("full_survivor").is_some());
        assert!(by_name("maps").is_none());
        assert_eq!(all_presets().len(), ScenarioKind::ALL.len());
    }
}
