//! PickTrace — a recorded timeline of sequencer events
//!
//! A trace is itself a [`DisplaySurface`], so it can be handed to the
//! sequencer directly. Used for test assertions and for exporting a run.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::event::{RunKind, SequenceEvent};
use crate::record::{PickRecord, SlotId};
use crate::surface::DisplaySurface;

/// Every event seen by a surface, in arrival order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PickTrace {
    /// Unique identifier for this trace
    pub trace_id: String,

    /// Scenario or topology name
    pub scenario: String,

    /// All events in arrival order
    pub events: Vec<SequenceEvent>,

    /// When recording started
    pub recorded_at: DateTime<Utc>,
}

impl PickTrace {
    /// Create a new empty trace
    pub fn new(trace_id: impl Into<String>, scenario: impl Into<String>) -> Self {
        Self {
            trace_id: trace_id.into(),
            scenario: scenario.into(),
            events: Vec::new(),
            recorded_at: Utc::now(),
        }
    }

    pub fn push(&mut self, event: SequenceEvent) {
        self.events.push(event);
    }

    pub fn extend(&mut self, events: impl IntoIterator<Item = SequenceEvent>) {
        self.events.extend(events);
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// All pick records
    pub fn picks(&self) -> impl Iterator<Item = &PickRecord> {
        self.events.iter().filter_map(SequenceEvent::as_pick)
    }

    pub fn finals(&self) -> Vec<&PickRecord> {
        self.picks().filter(|r| r.is_final).collect()
    }

    pub fn previews(&self) -> Vec<&PickRecord> {
        self.picks().filter(|r| !r.is_final).collect()
    }

    /// Final picks for one slot, oldest first
    pub fn finals_for(&self, slot: &SlotId) -> Vec<&PickRecord> {
        self.picks().filter(|r| r.is_final && &r.slot == slot).collect()
    }

    pub fn last_final(&self, slot: &SlotId) -> Option<&PickRecord> {
        self.picks().filter(|r| r.is_final && &r.slot == slot).last()
    }

    /// Run ids that reached `RunCompleted`
    pub fn completions(&self) -> Vec<u64> {
        self.events
            .iter()
            .filter_map(|e| match e {
                SequenceEvent::RunCompleted { run_id } => Some(*run_id),
                _ => None,
            })
            .collect()
    }

    /// (run_id, phase) pairs in the order they were finalized
    pub fn phase_finalizations(&self) -> Vec<(u64, usize)> {
        self.events
            .iter()
            .filter_map(|e| match e {
                SequenceEvent::PhaseFinalized { run_id, phase } => Some((*run_id, *phase)),
                _ => None,
            })
            .collect()
    }

    /// Index of the first event matching a predicate
    pub fn position_of<F>(&self, predicate: F) -> Option<usize>
    where
        F: Fn(&SequenceEvent) -> bool,
    {
        self.events.iter().position(predicate)
    }

    /// Export as pretty JSON
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

impl DisplaySurface for PickTrace {
    fn on_pick(&mut self, record: &PickRecord) {
        self.events.push(SequenceEvent::Pick(record.clone()));
    }

    fn on_run_started(&mut self, run_id: u64, kind: &RunKind) {
        self.events.push(SequenceEvent::RunStarted {
            run_id,
            kind: kind.clone(),
        });
    }

    fn on_cleared(&mut self, run_id: u64, slot: &SlotId) {
        self.events.push(SequenceEvent::SlotCleared {
            run_id,
            slot: slot.clone(),
        });
    }

    fn on_phase_finalized(&mut self, run_id: u64, phase: usize) {
        self.events.push(SequenceEvent::PhaseFinalized { run_id, phase });
    }

    fn on_idle(&mut self, run_id: u64) {
        self.events.push(SequenceEvent::RunCompleted { run_id });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_trace() -> PickTrace {
        let mut trace = PickTrace::new("t1", "killer");
        let events = vec![
            SequenceEvent::RunStarted { run_id: 1, kind: RunKind::Full },
            SequenceEvent::Pick(PickRecord::preview(1, "portrait".into(), "a.png", "A", 0, 1)),
            SequenceEvent::Pick(PickRecord::final_pick(1, "portrait".into(), "b.png", "B", 0, 2)),
            SequenceEvent::PhaseFinalized { run_id: 1, phase: 0 },
            SequenceEvent::RunCompleted { run_id: 1 },
        ];
        for event in &events {
            event.dispatch(&mut trace);
        }
        trace
    }

    #[test]
    fn test_trace_records_dispatched_events() {
        let trace = sample_trace();
        assert_eq!(trace.len(), 5);
        assert_eq!(trace.finals().len(), 1);
        assert_eq!(trace.previews().len(), 1);
        assert_eq!(trace.completions(), vec![1]);
        assert_eq!(trace.phase_finalizations(), vec![(1, 0)]);
    }

    #[test]
    fn test_last_final_for_slot() {
        let trace = sample_trace();
        let last = trace.last_final(&SlotId::from("portrait")).unwrap();
        assert_eq!(last.candidate, "b.png");
        assert!(trace.last_final(&SlotId::from("item")).is_none());
    }

    #[test]
    fn test_json_export_roundtrip() {
        let trace = sample_trace();
        let json = trace.to_json().unwrap();
        let parsed = PickTrace::from_json(&json).unwrap();
        assert_eq!(parsed, trace);
    }
}
