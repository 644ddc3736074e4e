//! DisplaySurface — the render side of the sequencer boundary

use crate::event::RunKind;
use crate::record::{PickRecord, SlotId};

/// Receives picks and lifecycle notifications from the sequencer.
///
/// Only [`on_pick`](DisplaySurface::on_pick) is required; a UI that just
/// swaps icons and labels can ignore the rest.
pub trait DisplaySurface {
    /// Called once per slot per animation tick and once at finalization
    fn on_pick(&mut self, record: &PickRecord);

    fn on_run_started(&mut self, _run_id: u64, _kind: &RunKind) {}

    /// The slot's pick was invalidated by an upstream change
    fn on_cleared(&mut self, _run_id: u64, _slot: &SlotId) {}

    fn on_phase_finalized(&mut self, _run_id: u64, _phase: usize) {}

    /// The run finished and the sequencer is idle again
    fn on_idle(&mut self, _run_id: u64) {}
}

/// Surface that drops everything
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSurface;

impl DisplaySurface for NullSurface {
    fn on_pick(&mut self, _record: &PickRecord) {}
}

impl<F> DisplaySurface for F
where
    F: FnMut(&PickRecord),
{
    fn on_pick(&mut self, record: &PickRecord) {
        self(record)
    }
}
