//! Sequence — one run of the reveal state machine
//!
//! ```text
//! Idle → Animating(phase=i, tick=t) → Finalizing(phase=i) → Animating(i+1, 0) | Idle
//! ```
//!
//! A `Sequence` only tracks where a run is. Drawing picks and mutating slots
//! is the sequencer's job.

use serde::{Deserialize, Serialize};

use rf_pick::{RunKind, SlotId};

/// Position of a run in the state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum SequenceState {
    #[default]
    Idle,
    Animating { phase: usize, tick: u32 },
    Finalizing { phase: usize },
}

impl SequenceState {
    pub fn is_idle(&self) -> bool {
        matches!(self, SequenceState::Idle)
    }

    pub fn phase(&self) -> Option<usize> {
        match self {
            SequenceState::Idle => None,
            SequenceState::Animating { phase, .. } | SequenceState::Finalizing { phase } => {
                Some(*phase)
            }
        }
    }
}

/// A single run: full spin or single-slot reroll with its cascade
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sequence {
    run_id: u64,
    kind: RunKind,
    phases: Vec<Vec<SlotId>>,
    state: SequenceState,
}

impl Sequence {
    /// Run every phase in declared order
    pub fn full(run_id: u64, phases: Vec<Vec<SlotId>>) -> Self {
        Self::start(run_id, RunKind::Full, phases)
    }

    /// Reroll `slot` as a one-slot phase, then each dependent level in turn
    pub fn reroll(run_id: u64, slot: SlotId, cascade: Vec<Vec<SlotId>>) -> Self {
        let mut phases = Vec::with_capacity(cascade.len() + 1);
        phases.push(vec![slot.clone()]);
        phases.extend(cascade);
        Self::start(run_id, RunKind::Reroll { slot }, phases)
    }

    fn start(run_id: u64, kind: RunKind, phases: Vec<Vec<SlotId>>) -> Self {
        let state = if phases.is_empty() {
            SequenceState::Idle
        } else {
            SequenceState::Animating { phase: 0, tick: 0 }
        };
        Self {
            run_id,
            kind,
            phases,
            state,
        }
    }

    pub fn run_id(&self) -> u64 {
        self.run_id
    }

    pub fn kind(&self) -> &RunKind {
        &self.kind
    }

    pub fn state(&self) -> SequenceState {
        self.state
    }

    pub fn phases(&self) -> &[Vec<SlotId>] {
        &self.phases
    }

    pub fn phase_count(&self) -> usize {
        self.phases.len()
    }

    /// Slots of the phase currently animating or finalizing
    pub fn current_slots(&self) -> &[SlotId] {
        self.state
            .phase()
            .and_then(|p| self.phases.get(p))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Count one animation tick; switches to `Finalizing` once the counter
    /// exceeds `steps`. Returns the new tick count.
    pub fn advance_tick(&mut self, steps: u32) -> u32 {
        if let SequenceState::Animating { phase, tick } = self.state {
            let tick = tick.saturating_add(1);
            self.state = if tick > steps {
                SequenceState::Finalizing { phase }
            } else {
                SequenceState::Animating { phase, tick }
            };
            tick
        } else {
            0
        }
    }

    /// Leave `Finalizing`: next phase from tick 0, or `Idle` after the last
    pub fn complete_phase(&mut self) {
        if let SequenceState::Finalizing { phase } = self.state {
            let next = phase + 1;
            self.state = if next < self.phases.len() {
                SequenceState::Animating { phase: next, tick: 0 }
            } else {
                SequenceState::Idle
            };
        }
    }

    pub fn is_done(&self) -> bool {
        self.state.is_idle()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(names: &[&str]) -> Vec<SlotId> {
        names.iter().map(|n| SlotId::from(*n)).collect()
    }

    #[test]
    fn test_full_sequence_walks_phases() {
        let mut seq = Sequence::full(1, vec![ids(&["portrait"]), ids(&["perk_0", "perk_1"])]);
        assert_eq!(seq.state(), SequenceState::Animating { phase: 0, tick: 0 });

        assert_eq!(seq.advance_tick(2), 1);
        assert_eq!(seq.advance_tick(2), 2);
        assert_eq!(seq.state(), SequenceState::Animating { phase: 0, tick: 2 });
        seq.advance_tick(2);
        assert_eq!(seq.state(), SequenceState::Finalizing { phase: 0 });

        seq.complete_phase();
        assert_eq!(seq.state(), SequenceState::Animating { phase: 1, tick: 0 });
        assert_eq!(seq.current_slots().len(), 2);

        seq.advance_tick(0);
        seq.complete_phase();
        assert!(seq.is_done());
        assert!(seq.current_slots().is_empty());
    }

    #[test]
    fn test_reroll_prepends_target_phase() {
        let seq = Sequence::reroll(7, "item".into(), vec![ids(&["addon_0", "addon_1"])]);
        assert_eq!(seq.phase_count(), 2);
        assert_eq!(seq.current_slots(), ids(&["item"]).as_slice());
        assert_eq!(seq.kind(), &RunKind::Reroll { slot: "item".into() });
    }

    #[test]
    fn test_complete_phase_ignored_while_animating() {
        let mut seq = Sequence::full(1, vec![ids(&["a"])]);
        seq.complete_phase();
        assert_eq!(seq.state(), SequenceState::Animating { phase: 0, tick: 0 });
    }

    #[test]
    fn test_empty_sequence_is_idle() {
        assert!(Sequence::full(1, Vec::new()).is_done());
    }
}
