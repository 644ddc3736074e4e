//! # rf-pick — Reveal pick vocabulary
//!
//! Everything the reveal sequencer hands to the outside world. The engine
//! never draws anything itself; it emits [`SequenceEvent`]s and a
//! [`DisplaySurface`] decides how to render them.
//!
//! ## Flow
//!
//! ```text
//! RevealSequencer::tick()
//!     │
//!     v
//! Vec<SequenceEvent> ──dispatch──> DisplaySurface (UI, PickTrace, ...)
//! ```

pub mod event;
pub mod record;
pub mod surface;
pub mod trace;

pub use event::*;
pub use record::*;
pub use surface::*;
pub use trace::*;
