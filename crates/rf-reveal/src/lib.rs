//! # rf-reveal — Phased reveal sequencer
//!
//! Slot-machine style reveals for randomized loadouts: every slot cycles
//! through random previews on a timer, then commits a final pick. Slots are
//! grouped into phases that run strictly in order, and a slot may draw from a
//! pool scoped by an earlier slot's pick (add-ons scoped by the item).
//!
//! ## Features
//!
//! - **One engine, many layouts**: scenarios are declared as a [`Topology`]
//! - **Distinct draws**: slots sharing a pool never finalize the same pick
//! - **Cascading rerolls**: rerolling a slot re-runs everything downstream
//! - **Superseding**: a new full spin discards the run in flight
//! - **Pluggable assets**: in-memory or directory-backed [`AssetSource`]s
//!
//! ## Architecture
//!
//! ```text
//! RevealSequencer
//!     │
//!     ├── Topology (slots × phases)
//!     ├── DependencyGraph (parent → dependents)
//!     ├── AssetSource → AssetPool (per draw)
//!     └── TimingConfig (tick interval, steps per phase)
//!           │
//!           v
//!     tick() → Vec<SequenceEvent> → DisplaySurface
//! ```

pub mod config;
pub mod error;
pub mod graph;
pub mod label;
pub mod pool;
pub mod scenario;
pub mod sequence;
pub mod sequencer;
pub mod slot;
pub mod timing;
pub mod topology;

pub use config::*;
pub use error::*;
pub use graph::*;
pub use label::{compact_label, format_label};
pub use pool::*;
pub use sequence::*;
pub use sequencer::*;
pub use slot::*;
pub use timing::*;
pub use topology::*;

pub use rf_pick::{DisplaySurface, PickRecord, PickTrace, RunKind, SequenceEvent, SlotId};
