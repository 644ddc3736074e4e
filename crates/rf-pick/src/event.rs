//! SequenceEvent — everything a run emits, in emission order

use serde::{Deserialize, Serialize};

use crate::record::{PickRecord, SlotId};
use crate::surface::DisplaySurface;

/// What started a run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RunKind {
    /// Every phase of the topology
    Full,
    /// One slot plus its downstream dependents
    Reroll { slot: SlotId },
}

/// A single sequencer output
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum SequenceEvent {
    RunStarted { run_id: u64, kind: RunKind },
    Pick(PickRecord),
    /// A downstream slot lost its pick because its upstream changed
    SlotCleared { run_id: u64, slot: SlotId },
    PhaseFinalized { run_id: u64, phase: usize },
    RunCompleted { run_id: u64 },
}

impl SequenceEvent {
    pub fn run_id(&self) -> u64 {
        match self {
            SequenceEvent::RunStarted { run_id, .. }
            | SequenceEvent::SlotCleared { run_id, .. }
            | SequenceEvent::PhaseFinalized { run_id, .. }
            | SequenceEvent::RunCompleted { run_id } => *run_id,
            SequenceEvent::Pick(record) => record.run_id,
        }
    }

    /// The pick, if this is a pick event
    pub fn as_pick(&self) -> Option<&PickRecord> {
        match self {
            SequenceEvent::Pick(record) => Some(record),
            _ => None,
        }
    }

    pub fn is_final_pick(&self) -> bool {
        self.as_pick().is_some_and(|r| r.is_final)
    }

    /// Forward to the matching surface callback
    pub fn dispatch(&self, surface: &mut dyn DisplaySurface) {
        match self {
            SequenceEvent::RunStarted { run_id, kind } => surface.on_run_started(*run_id, kind),
            SequenceEvent::Pick(record) => surface.on_pick(record),
            SequenceEvent::SlotCleared { run_id, slot } => surface.on_cleared(*run_id, slot),
            SequenceEvent::PhaseFinalized { run_id, phase } => {
                surface.on_phase_finalized(*run_id, *phase)
            }
            SequenceEvent::RunCompleted { run_id } => surface.on_idle(*run_id),
        }
    }
}
