//! Reactive Runtime
//!
//! Explicit "recompute on any input change" wiring between the page's
//! controls and its outputs.
//!
//! ## Architecture
//!
//! - **controls**: control / output identifiers and the values they carry
//! - **callbacks**: the `Recompute` trait and the three dashboard callbacks
//! - **registry**: output ← inputs bindings
//! - **runtime**: applies changes to a session's selection and reruns
//!   subscribers
//!
//! Sessions own their `FilterSelection`; the runtime is shared and holds
//! only read-only state.

mod callbacks;
mod controls;
mod error;
mod registry;
mod runtime;

pub use callbacks::{Recompute, ReleaseTimeline, ScoreScatter, SelectionCount};
pub use controls::{ControlId, ControlValue, OutputId, OutputUpdate, OutputValue, ValueKind};
pub use error::{ReactiveError, ReactiveResult};
pub use registry::{Binding, CallbackRegistry};
pub use runtime::{set_control, Runtime};
