//! Reactive runtime error types

use super::controls::{ControlId, OutputId, ValueKind};
use thiserror::Error;

/// Errors raised while wiring callbacks or applying control changes
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ReactiveError {
    /// Value shape does not fit the control
    #[error("Control {control} expects a {expected} value, got {actual}")]
    ValueKind {
        control: ControlId,
        expected: ValueKind,
        actual: ValueKind,
    },

    /// Year range with min above max
    #[error("Invalid year range: {min} is after {max}")]
    ReversedRange { min: i32, max: i32 },

    /// Two callbacks bound to one output
    #[error("Output {0} already has a callback")]
    DuplicateOutput(OutputId),
}

/// Result type for reactive operations
pub type ReactiveResult<T> = Result<T, ReactiveError>;
