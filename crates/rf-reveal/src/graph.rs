//! Dependency graph between slots
//!
//! Each slot has at most one upstream slot. Edges are declared once per
//! topology and never change afterwards.

use std::collections::{HashMap, HashSet, VecDeque};

use rf_pick::SlotId;

use crate::error::{RevealError, RevealResult};
use crate::slot::SlotSpec;

/// Parent/child relations between slots
#[derive(Debug, Clone, Default)]
pub struct DependencyGraph {
    parents: HashMap<SlotId, SlotId>,
    /// Children in declaration order
    children: HashMap<SlotId, Vec<SlotId>>,
}

impl DependencyGraph {
    /// Build and validate from slot specs: parents must exist, no cycles
    pub fn from_specs(specs: &[SlotSpec]) -> RevealResult<Self> {
        let known: HashSet<&SlotId> = specs.iter().map(|s| &s.id).collect();
        let mut graph = Self::default();

        for spec in specs {
            let Some(parent) = &spec.parent else {
                continue;
            };
            if parent == &spec.id {
                return Err(RevealError::Topology(format!("slot '{}' depends on itself", spec.id)));
            }
            if !known.contains(parent) {
                return Err(RevealError::Topology(format!(
                    "slot '{}' depends on unknown slot '{}'",
                    spec.id, parent
                )));
            }
            graph.parents.insert(spec.id.clone(), parent.clone());
            graph
                .children
                .entry(parent.clone())
                .or_default()
                .push(spec.id.clone());
        }

        graph.check_acyclic()?;
        Ok(graph)
    }

    fn check_acyclic(&self) -> RevealResult<()> {
        for start in self.parents.keys() {
            let mut seen = HashSet::new();
            let mut current = start;
            while let Some(parent) = self.parents.get(current) {
                if !seen.insert(current) {
                    return Err(RevealError::Topology(format!(
                        "dependency cycle through slot '{start}'"
                    )));
                }
                current = parent;
            }
        }
        Ok(())
    }

    pub fn parent(&self, slot: &SlotId) -> Option<&SlotId> {
        self.parents.get(slot)
    }

    pub fn children(&self, slot: &SlotId) -> &[SlotId] {
        self.children.get(slot).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn has_dependents(&self, slot: &SlotId) -> bool {
        !self.children(slot).is_empty()
    }

    /// Downstream slots grouped by distance: direct children first
    pub fn levels(&self, slot: &SlotId) -> Vec<Vec<SlotId>> {
        let mut levels = Vec::new();
        let mut frontier: Vec<SlotId> = self.children(slot).to_vec();
        while !frontier.is_empty() {
            let next: Vec<SlotId> = frontier
                .iter()
                .flat_map(|s| self.children(s).iter().cloned())
                .collect();
            levels.push(frontier);
            frontier = next;
        }
        levels
    }

    /// Every transitive dependent, breadth-first
    pub fn descendants(&self, slot: &SlotId) -> Vec<SlotId> {
        let mut out = Vec::new();
        let mut queue: VecDeque<&SlotId> = self.children(slot).iter().collect();
        while let Some(next) = queue.pop_front() {
            out.push(next.clone());
            queue.extend(self.children(next));
        }
        out
    }

    pub fn edge_count(&self) -> usize {
        self.parents.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{PoolSpec, ScopeKey};
    use crate::slot::SlotRole;

    fn spec(id: &str) -> SlotSpec {
        SlotSpec::new(id, SlotRole::Custom(id.into()), PoolSpec::new(id))
    }

    fn scoped(id: &str, parent: &str) -> SlotSpec {
        SlotSpec::new(id, SlotRole::Custom(id.into()), PoolSpec::scoped(id, ScopeKey::Stem))
            .depends_on(parent)
    }

    #[test]
    fn test_levels_and_descendants() {
        let specs = vec![
            spec("item"),
            scoped("addon_0", "item"),
            scoped("addon_1", "item"),
            scoped("charm", "addon_0"),
        ];
        let graph = DependencyGraph::from_specs(&specs).unwrap();
        let item = SlotId::from("item");

        assert_eq!(graph.edge_count(), 3);
        assert_eq!(
            graph.levels(&item),
            vec![
                vec![SlotId::from("addon_0"), SlotId::from("addon_1")],
                vec![SlotId::from("charm")],
            ]
        );
        assert_eq!(graph.descendants(&item).len(), 3);
        assert_eq!(graph.parent(&SlotId::from("charm")), Some(&SlotId::from("addon_0")));
        assert!(!graph.has_dependents(&SlotId::from("addon_1")));
    }

    #[test]
    fn test_unknown_parent_rejected() {
        let err = DependencyGraph::from_specs(&[scoped("addon_0", "item")]).unwrap_err();
        assert!(matches!(err, RevealError::Topology(_)));
    }

    #[test]
    fn test_cycle_rejected() {
        let specs = vec![scoped("a", "b"), scoped("b", "a")];
        assert!(DependencyGraph::from_specs(&specs).is_err());
        assert!(DependencyGraph::from_specs(&[scoped("a", "a")]).is_err());
    }
}
