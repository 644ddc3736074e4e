//! Built-in scenario topologies

use rf_pick::SlotId;

use super::{PLACEHOLDER_PREFIX, category};
use crate::pool::{PoolSpec, ScopeKey};
use crate::slot::{SlotRole, SlotSpec};
use crate::topology::Topology;

const PERK_SLOTS: u8 = 4;
const ADDON_SLOTS: u8 = 2;

/// Get all built-in presets
pub fn all_presets() -> Vec<Topology> {
    vec![
        killer_perks(),
        survivor_perks(),
        killer(),
        survivor(),
        full_killer(),
        full_survivor(),
    ]
}

/// Four killer perks
pub fn killer_perks() -> Topology {
    with_perks(Topology::new("killer_perks"), category::KILLER_PERKS)
}

/// Four survivor perks
pub fn survivor_perks() -> Topology {
    with_perks(Topology::new("survivor_perks"), category::SURVIVOR_PERKS)
}

/// Killer portrait, then two add-ons from the killer's own folder
pub fn killer() -> Topology {
    with_addons(
        with_portrait(Topology::new("killer"), category::KILLERS),
        "portrait",
        PoolSpec::scoped(category::KILLER_ADDONS, ScopeKey::CompactLabel),
    )
}

/// Survivor portrait, item, then two add-ons for that item
pub fn survivor() -> Topology {
    let topo = with_portrait(Topology::new("survivor"), category::SURVIVORS)
        .with_slot(SlotSpec::new(
            "item",
            SlotRole::Item,
            PoolSpec::new(category::SURVIVOR_ITEMS),
        ))
        .with_phase(["item"]);
    with_addons(
        topo,
        "item",
        PoolSpec::scoped(category::SURVIVOR_ADDONS, ScopeKey::Stem),
    )
}

/// Killer with add-ons, then four perks
pub fn full_killer() -> Topology {
    let mut topo = with_perks(killer(), category::KILLER_PERKS);
    topo.name = "full_killer".to_string();
    topo
}

/// Survivor with item and add-ons, then four perks
pub fn full_survivor() -> Topology {
    let mut topo = with_perks(survivor(), category::SURVIVOR_PERKS);
    topo.name = "full_survivor".to_string();
    topo
}

fn with_portrait(topo: Topology, pool: &str) -> Topology {
    topo.with_slot(SlotSpec::new(
        "portrait",
        SlotRole::Portrait,
        PoolSpec::new(pool),
    ))
    .with_phase(["portrait"])
}

fn with_addons(mut topo: Topology, parent: &str, pool: PoolSpec) -> Topology {
    let mut phase = Vec::new();
    for i in 0..ADDON_SLOTS {
        let id = SlotId::new(format!("addon_{i}"));
        topo = topo.with_slot(
            SlotSpec::new(id.clone(), SlotRole::Addon(i), pool.clone()).depends_on(parent),
        );
        phase.push(id);
    }
    topo.with_phase(phase)
}

fn with_perks(mut topo: Topology, pool: &str) -> Topology {
    let spec = PoolSpec::new(pool).excluding(PLACEHOLDER_PREFIX);
    let mut phase = Vec::new();
    for i in 0..PERK_SLOTS {
        let id = SlotId::new(format!("perk_{i}"));
        topo = topo.with_slot(SlotSpec::new(id.clone(), SlotRole::Perk(i), spec.clone()));
        phase.push(id);
    }
    topo.with_phase(phase)
}
