//! Topology — the slots of a scenario and the order their phases run in

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use rf_pick::SlotId;

use crate::error::{RevealError, RevealResult};
use crate::graph::DependencyGraph;
use crate::slot::SlotSpec;

/// Slots plus their phase order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Topology {
    /// Scenario name
    pub name: String,
    /// Slot declarations; parents are named by id
    pub slots: Vec<SlotSpec>,
    /// Each phase animates and finalizes its slots together
    pub phases: Vec<Vec<SlotId>>,
}

impl Topology {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            slots: Vec::new(),
            phases: Vec::new(),
        }
    }

    /// Add a slot declaration
    pub fn with_slot(mut self, spec: SlotSpec) -> Self {
        self.slots.push(spec);
        self
    }

    /// Append a phase
    pub fn with_phase<I, S>(mut self, slots: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<SlotId>,
    {
        self.phases.push(slots.into_iter().map(Into::into).collect());
        self
    }

    pub fn slot(&self, id: &SlotId) -> Option<&SlotSpec> {
        self.slots.iter().find(|s| &s.id == id)
    }

    pub fn phase_of(&self, id: &SlotId) -> Option<usize> {
        self.phases.iter().position(|p| p.contains(id))
    }

    /// Validate and build the dependency graph.
    ///
    /// Slot ids are unique, every slot sits in exactly one non-empty phase,
    /// and a parent's phase strictly precedes its child's.
    pub fn validate(&self) -> RevealResult<DependencyGraph> {
        if self.phases.is_empty() {
            return Err(RevealError::Topology(format!("'{}' has no phases", self.name)));
        }

        let mut ids = HashSet::new();
        for spec in &self.slots {
            if !ids.insert(&spec.id) {
                return Err(RevealError::Topology(format!("duplicate slot '{}'", spec.id)));
            }
        }

        let mut phase_of: HashMap<&SlotId, usize> = HashMap::new();
        for (index, phase) in self.phases.iter().enumerate() {
            if phase.is_empty() {
                return Err(RevealError::Topology(format!("phase {index} is empty")));
            }
            for id in phase {
                if !ids.contains(id) {
                    return Err(RevealError::Topology(format!(
                        "phase {index} names unknown slot '{id}'"
                    )));
                }
                if phase_of.insert(id, index).is_some() {
                    return Err(RevealError::Topology(format!(
                        "slot '{id}' appears in more than one phase"
                    )));
                }
            }
        }

        if let Some(missing) = self.slots.iter().find(|s| !phase_of.contains_key(&s.id)) {
            return Err(RevealError::Topology(format!(
                "slot '{}' is not in any phase",
                missing.id
            )));
        }

        let graph = DependencyGraph::from_specs(&self.slots)?;

        for spec in &self.slots {
            let Some(parent) = &spec.parent else {
                continue;
            };
            if !spec.pool.is_scoped() {
                log::warn!("slot '{}' depends on '{}' but its pool is unscoped", spec.id, parent);
            }
            if phase_of[parent] >= phase_of[&spec.id] {
                return Err(RevealError::Topology(format!(
                    "slot '{}' must run in a later phase than its parent '{}'",
                    spec.id, parent
                )));
            }
        }

        Ok(graph)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{PoolSpec, ScopeKey};
    use crate::slot::SlotRole;

    fn item_topology() -> Topology {
        Topology::new("items")
            .with_slot(SlotSpec::new("item", SlotRole::Item, PoolSpec::new("items")))
            .with_slot(
                SlotSpec::new("addon_0", SlotRole::Addon(0), PoolSpec::scoped("addons", ScopeKey::Stem))
                    .depends_on("item"),
            )
    }

    #[test]
    fn test_valid_topology() {
        let topo = item_topology().with_phase(["item"]).with_phase(["addon_0"]);
        let graph = topo.validate().unwrap();
        assert_eq!(graph.edge_count(), 1);
        assert_eq!(topo.phase_of(&SlotId::from("addon_0")), Some(1));
    }

    #[test]
    fn test_child_in_same_phase_rejected() {
        let topo = item_topology().with_phase(["item", "addon_0"]);
        assert!(matches!(topo.validate(), Err(RevealError::Topology(_))));
    }

    #[test]
    fn test_slot_outside_phases_rejected() {
        let topo = item_topology().with_phase(["item"]);
        assert!(topo.validate().is_err());
    }

    #[test]
    fn test_duplicate_phase_membership_rejected() {
        let topo = item_topology()
            .with_phase(["item"])
            .with_phase(["addon_0"])
            .with_phase(["addon_0"]);
        assert!(topo.validate().is_err());
    }

    #[test]
    fn test_empty_topology_rejected() {
        assert!(Topology::new("empty").validate().is_err());
    }
}
