//! Reveal Sequencer — drives phased randomized reveals
//!
//! One engine serves every scenario; the [`Topology`] decides which slots
//! exist, which phases they run in and which picks scope which pools.
//!
//! The host loop calls [`RevealSequencer::tick`] on a timer. Each call runs
//! one discrete step to completion and returns the events it produced:
//!
//! - `Animating`: every slot of the phase gets one random preview pick
//! - `Finalizing`: the phase's committed picks are drawn (distinct within a
//!   shared pool), dependents of the finalized slots are cleared, and the run
//!   moves to the next phase or back to idle
//!
//! Draw failures never leave the sequencer; the affected slot keeps whatever
//! it showed before and the rest of the run continues.

use std::collections::HashMap;
use std::thread;

use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;

use rf_pick::{DisplaySurface, PickRecord, RunKind, SequenceEvent, SlotId};

use crate::error::{RevealError, RevealResult};
use crate::graph::DependencyGraph;
use crate::label::format_label;
use crate::pool::{AssetPool, AssetSource};
use crate::sequence::{Sequence, SequenceState};
use crate::slot::Slot;
use crate::timing::TimingConfig;
use crate::topology::Topology;

/// Phased reveal engine over an asset source
pub struct RevealSequencer<S: AssetSource> {
    /// Scenario layout
    topology: Topology,
    /// Validated parent/child edges
    graph: DependencyGraph,
    /// Live slots in declaration order
    slots: Vec<Slot>,
    /// Slot id → index into `slots`
    index: HashMap<SlotId, usize>,
    /// Candidate lookup
    source: S,
    /// Random number generator
    rng: StdRng,
    /// Tick pacing
    timing: TimingConfig,
    /// In-flight run, if any
    active: Option<Sequence>,
    /// Events produced outside `tick` (run start), flushed on the next tick
    pending: Vec<SequenceEvent>,
    /// Last issued run id
    run_counter: u64,
}

impl<S: AssetSource> RevealSequencer<S> {
    /// Create a sequencer; fails if the topology is invalid
    pub fn new(topology: Topology, source: S) -> RevealResult<Self> {
        let graph = topology.validate()?;
        let slots: Vec<Slot> = topology.slots.iter().cloned().map(Slot::new).collect();
        let index = slots
            .iter()
            .enumerate()
            .map(|(i, s)| (s.id().clone(), i))
            .collect();

        log::debug!(
            "sequencer '{}': {} slots, {} phases, {} edges",
            topology.name,
            slots.len(),
            topology.phases.len(),
            graph.edge_count()
        );

        Ok(Self {
            topology,
            graph,
            slots,
            index,
            source,
            rng: StdRng::from_os_rng(),
            timing: TimingConfig::default(),
            active: None,
            pending: Vec::new(),
            run_counter: 0,
        })
    }

    // ═══════════════════════════════════════════════════════════════════════════
    // CONFIGURATION
    // ═══════════════════════════════════════════════════════════════════════════

    pub fn with_timing(mut self, timing: TimingConfig) -> Self {
        self.timing = timing;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed(seed);
        self
    }

    pub fn set_timing(&mut self, timing: TimingConfig) {
        self.timing = timing;
    }

    /// Seed RNG for reproducible runs
    pub fn seed(&mut self, seed: u64) {
        self.rng = StdRng::seed_from_u64(seed);
    }

    pub fn timing(&self) -> &TimingConfig {
        &self.timing
    }

    pub fn topology(&self) -> &Topology {
        &self.topology
    }

    pub fn graph(&self) -> &DependencyGraph {
        &self.graph
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    // ═══════════════════════════════════════════════════════════════════════════
    // STATE
    // ═══════════════════════════════════════════════════════════════════════════

    pub fn state(&self) -> SequenceState {
        self.active
            .as_ref()
            .map(Sequence::state)
            .unwrap_or(SequenceState::Idle)
    }

    pub fn is_idle(&self) -> bool {
        self.active.is_none()
    }

    /// Run id of the in-flight sequence
    pub fn active_run(&self) -> Option<u64> {
        self.active.as_ref().map(Sequence::run_id)
    }

    pub fn active_kind(&self) -> Option<&RunKind> {
        self.active.as_ref().map(Sequence::kind)
    }

    pub fn slot(&self, id: &SlotId) -> Option<&Slot> {
        self.index.get(id).map(|&i| &self.slots[i])
    }

    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }

    /// Committed pick of a slot
    pub fn pick(&self, id: &SlotId) -> Option<&str> {
        self.slot(id).and_then(Slot::pick)
    }

    /// All committed picks in declaration order
    pub fn picks(&self) -> Vec<(SlotId, Option<String>)> {
        self.slots
            .iter()
            .map(|s| (s.id().clone(), s.pick().map(str::to_string)))
            .collect()
    }

    /// Resolve the pool a slot would draw from right now
    pub fn pool_for(&self, id: &SlotId) -> RevealResult<AssetPool> {
        let slot = self
            .slot(id)
            .ok_or_else(|| RevealError::UnknownSlot(id.to_string()))?;
        let parent = slot.parent().and_then(|p| self.pick(p));
        AssetPool::resolve(slot.pool(), &self.source, parent)
    }

    // ═══════════════════════════════════════════════════════════════════════════
    // INBOUND
    // ═══════════════════════════════════════════════════════════════════════════

    /// Start a spin of every phase. An in-flight run is discarded without
    /// emitting anything further for it.
    pub fn start_full_sequence(&mut self) -> u64 {
        let run_id = self.next_run_id();
        if let Some(old) = self.active.take() {
            log::info!(
                "run {} superseded by run {} at {:?}",
                old.run_id(),
                run_id,
                old.state()
            );
        }
        self.pending.clear();

        let sequence = Sequence::full(run_id, self.topology.phases.clone());
        log::info!(
            "run {}: full spin of '{}' ({} phases)",
            run_id,
            self.topology.name,
            sequence.phase_count()
        );
        self.begin(sequence);
        run_id
    }

    /// Reroll one slot and cascade into its dependents.
    ///
    /// Returns false (and does nothing) for unknown slots, while another run
    /// is in flight, or when the slot's upstream pick is unset.
    pub fn reroll_slot(&mut self, slot: impl Into<SlotId>) -> bool {
        let slot = slot.into();
        match self.prepare_reroll(&slot) {
            Ok(sequence) => {
                log::info!(
                    "run {}: reroll '{}' ({} cascade phases)",
                    sequence.run_id(),
                    slot,
                    sequence.phase_count() - 1
                );
                self.begin(sequence);
                true
            }
            Err(RevealError::InvalidContext { slot }) => {
                log::debug!("reroll of '{slot}' ignored: upstream pick is unset");
                false
            }
            Err(e) => {
                log::warn!("reroll of '{slot}' ignored: {e}");
                false
            }
        }
    }

    fn prepare_reroll(&mut self, slot: &SlotId) -> RevealResult<Sequence> {
        let target = self
            .slot(slot)
            .ok_or_else(|| RevealError::UnknownSlot(slot.to_string()))?;

        if let Some(parent) = target.parent() {
            if self.pick(parent).is_none() {
                return Err(RevealError::InvalidContext {
                    slot: slot.to_string(),
                });
            }
        }

        if let Some(run_id) = self.active_run() {
            return Err(RevealError::Busy(run_id));
        }

        let cascade = self.graph.levels(slot);
        let run_id = self.next_run_id();
        Ok(Sequence::reroll(run_id, slot.clone(), cascade))
    }

    fn begin(&mut self, sequence: Sequence) {
        self.pending.push(SequenceEvent::RunStarted {
            run_id: sequence.run_id(),
            kind: sequence.kind().clone(),
        });
        self.active = Some(sequence);
    }

    fn next_run_id(&mut self) -> u64 {
        self.run_counter += 1;
        self.run_counter
    }

    // ═══════════════════════════════════════════════════════════════════════════
    // TICK
    // ═══════════════════════════════════════════════════════════════════════════

    /// Run one step of the state machine. Idle sequencers return no events.
    pub fn tick(&mut self) -> Vec<SequenceEvent> {
        let mut events = std::mem::take(&mut self.pending);
        let Some(mut sequence) = self.active.take() else {
            return events;
        };

        let run_id = sequence.run_id();
        let slots = sequence.current_slots().to_vec();

        match sequence.state() {
            SequenceState::Animating { phase, .. } => {
                let tick = sequence.advance_tick(self.timing.steps_per_phase);
                self.preview_phase(run_id, phase, tick, &slots, &mut events);
                if let SequenceState::Finalizing { .. } = sequence.state() {
                    log::debug!("run {run_id}: phase {phase} finalizing after {tick} ticks");
                }
            }
            SequenceState::Finalizing { phase } => {
                let holders = self.holders(&sequence, phase);
                self.finalize_phase(run_id, phase, &slots, &holders, &mut events);
                sequence.complete_phase();
            }
            SequenceState::Idle => {}
        }

        if sequence.is_done() {
            log::info!("run {run_id} complete");
            events.push(SequenceEvent::RunCompleted { run_id });
        } else {
            self.active = Some(sequence);
        }

        events
    }

    /// Tick once and hand the events to a surface. Returns true while a run
    /// is still in flight.
    pub fn tick_into(&mut self, surface: &mut dyn DisplaySurface) -> bool {
        for event in self.tick() {
            event.dispatch(surface);
        }
        !self.is_idle()
    }

    /// Tick without delay until idle. Returns the number of ticks taken.
    pub fn run_to_idle(&mut self, surface: &mut dyn DisplaySurface) -> usize {
        self.drive(surface, false)
    }

    /// Tick until idle, sleeping the configured interval between ticks
    pub fn run_paced(&mut self, surface: &mut dyn DisplaySurface) -> usize {
        self.drive(surface, true)
    }

    fn drive(&mut self, surface: &mut dyn DisplaySurface, paced: bool) -> usize {
        // Every run has at most one phase per slot
        let limit = (self.slots.len() + 1)
            .saturating_mul(self.timing.ticks_per_phase() as usize)
            .saturating_add(1);
        let mut ticks = 0;

        while ticks < limit {
            ticks += 1;
            if !self.tick_into(surface) {
                return ticks;
            }
            if paced {
                thread::sleep(self.timing.tick_interval());
            }
        }

        log::warn!("sequencer still busy after {limit} ticks");
        ticks
    }

    // ═══════════════════════════════════════════════════════════════════════════
    // DRAWS
    // ═══════════════════════════════════════════════════════════════════════════

    fn preview_phase(
        &mut self,
        run_id: u64,
        phase: usize,
        tick: u32,
        slots: &[SlotId],
        events: &mut Vec<SequenceEvent>,
    ) {
        for id in slots {
            let pool = match self.pool_for(id) {
                Ok(pool) => pool,
                Err(e) => {
                    log::warn!("run {run_id}: preview of '{id}' skipped: {e}");
                    continue;
                }
            };
            if let Some(candidate) = pool.candidates().choose(&mut self.rng) {
                events.push(SequenceEvent::Pick(PickRecord::preview(
                    run_id,
                    id.clone(),
                    candidate.as_str(),
                    format_label(candidate),
                    phase,
                    tick,
                )));
            }
        }
    }

    fn finalize_phase(
        &mut self,
        run_id: u64,
        phase: usize,
        slots: &[SlotId],
        holders: &[SlotId],
        events: &mut Vec<SequenceEvent>,
    ) {
        let tick = self.timing.ticks_per_phase();

        // Slots drawing from the same resolved pool are sampled together
        let mut groups: Vec<(AssetPool, Vec<SlotId>)> = Vec::new();
        for id in slots {
            match self.pool_for(id) {
                Ok(pool) => match groups.iter_mut().find(|(p, _)| p.key() == pool.key()) {
                    Some((_, members)) => members.push(id.clone()),
                    None => groups.push((pool, vec![id.clone()])),
                },
                Err(e) => log::warn!("run {run_id}: '{id}' not finalized: {e}"),
            }
        }

        let mut finalized = Vec::new();
        for (pool, members) in groups {
            let held = self.picks_sharing(&pool, holders);
            let held: Vec<&str> = held.iter().map(String::as_str).collect();
            let candidates = pool.without(&held);

            if members.len() > candidates.len() {
                log::warn!(
                    "run {run_id}: {} slots share '{}' with only {} candidates",
                    members.len(),
                    pool.category(),
                    candidates.len()
                );
            }

            let picks: Vec<String> = candidates
                .choose_multiple(&mut self.rng, members.len())
                .map(|c| (*c).clone())
                .collect();

            for (i, id) in members.iter().enumerate() {
                match picks.get(i) {
                    Some(candidate) => {
                        self.set_pick(id, candidate);
                        events.push(SequenceEvent::Pick(PickRecord::final_pick(
                            run_id,
                            id.clone(),
                            candidate.as_str(),
                            format_label(candidate),
                            phase,
                            tick,
                        )));
                        finalized.push(id.clone());
                    }
                    None => self.clear_slot(run_id, id, events),
                }
            }
        }

        for id in &finalized {
            for dependent in self.graph.descendants(id) {
                self.clear_slot(run_id, &dependent, events);
            }
        }

        log::debug!("run {run_id}: phase {phase} finalized {} slots", finalized.len());
        events.push(SequenceEvent::PhaseFinalized { run_id, phase });
    }

    /// Slots whose current picks a finalizing phase must avoid.
    ///
    /// A full run only avoids picks it already committed in earlier phases;
    /// a reroll avoids every pick outside the phase being drawn.
    fn holders(&self, sequence: &Sequence, phase: usize) -> Vec<SlotId> {
        match sequence.kind() {
            RunKind::Full => sequence.phases()[..phase].concat(),
            RunKind::Reroll { .. } => {
                let current = sequence.current_slots();
                self.slots
                    .iter()
                    .map(Slot::id)
                    .filter(|id| !current.contains(*id))
                    .cloned()
                    .collect()
            }
        }
    }

    /// Current picks of `holders` that draw from the same pool
    fn picks_sharing(&self, pool: &AssetPool, holders: &[SlotId]) -> Vec<String> {
        let key = pool.key();
        self.slots
            .iter()
            .filter(|s| holders.contains(s.id()))
            .filter_map(|s| {
                let pick = s.pick()?;
                let parent = s.parent().and_then(|p| self.pick(p));
                key.matches(s.pool(), parent).then(|| pick.to_string())
            })
            .collect()
    }

    fn set_pick(&mut self, id: &SlotId, candidate: &str) {
        if let Some(&i) = self.index.get(id) {
            self.slots[i].set_pick(candidate);
        }
    }

    fn clear_slot(&mut self, run_id: u64, id: &SlotId, events: &mut Vec<SequenceEvent>) {
        let Some(&i) = self.index.get(id) else {
            return;
        };
        if self.slots[i].clear() {
            events.push(SequenceEvent::SlotCleared {
                run_id,
                slot: id.clone(),
            });
        }
    }
}
