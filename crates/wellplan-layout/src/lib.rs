//! Assigns liquid-handling instructions to plates and wells.
//!
//! Takes an ordered instruction list (each instruction possibly pinned to a
//! plate, a layout group, or nothing) and produces concrete plates plus a
//! `"plateID:well"` → instruction-ID assignment map. The input is never
//! mutated; every run returns a fresh [`LayoutOutcome`] or an error.
//!
//! # Pipeline
//!
//! ```text
//! resolver     explicit plates + layout groups → PlateChoice
//!   ↓          unassigned instructions → PlateChoice by plate type
//! splitter     chunk choices to template capacity
//!   ↓
//! materializer one concrete Plate per choice
//!   ↓
//! writer       seed pre-specified wells, claim the rest in order
//! ```

pub mod agent;
pub mod choice;
pub mod error;
pub mod ids;
pub mod materializer;
pub mod report;
pub mod resolver;
pub mod splitter;
pub mod writer;

pub use agent::{LayoutOutcome, LayoutRequest, layout};
pub use choice::{ChoiceOrigin, PlateChoice};
pub use error::{LayoutError, LayoutResult};
pub use ids::{IdGenerator, ReservedIds, SequentialIds, UuidIds};
pub use report::format_report;
