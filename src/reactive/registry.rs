//! Callback Registry
//!
//! Output ← inputs bindings. Each output has at most one callback; a control
//! may feed any number of them.

use super::callbacks::{Recompute, ReleaseTimeline, ScoreScatter, SelectionCount};
use super::controls::{ControlId, OutputId};
use super::error::{ReactiveError, ReactiveResult};
use crate::recompute::YearBounds;
use serde::Serialize;
use std::sync::Arc;

/// Registered callbacks in registration order
#[derive(Default, Clone)]
pub struct CallbackRegistry {
    callbacks: Vec<Arc<dyn Recompute>>,
    bounds: Option<YearBounds>,
}

/// Serializable view of one binding
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Binding {
    pub output: OutputId,
    pub inputs: Vec<ControlId>,
}

impl CallbackRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// The dashboard's three callbacks, each listening to all three controls
    pub fn standard(bounds: YearBounds) -> Self {
        let mut registry = Self {
            callbacks: Vec::new(),
            bounds: Some(bounds),
        };
        let callbacks: [Arc<dyn Recompute>; 3] = [
            Arc::new(ReleaseTimeline { bounds }),
            Arc::new(ScoreScatter { bounds }),
            Arc::new(SelectionCount { bounds }),
        ];
        for callback in callbacks {
            registry.bind(callback);
        }
        registry
    }

    /// Bind a callback to its output
    pub fn register(&mut self, callback: Arc<dyn Recompute>) -> ReactiveResult<()> {
        let output = callback.output();
        if self.callbacks.iter().any(|c| c.output() == output) {
            return Err(ReactiveError::DuplicateOutput(output));
        }

        self.bind(callback);
        Ok(())
    }

    fn bind(&mut self, callback: Arc<dyn Recompute>) {
        tracing::debug!(
            output = %callback.output(),
            inputs = ?callback.inputs(),
            "Registered callback"
        );
        self.callbacks.push(callback);
    }

    /// Year policy of the standard callbacks; `None` for a custom set
    pub fn bounds(&self) -> Option<YearBounds> {
        self.bounds
    }

    /// Callbacks that listen to `control`
    pub fn subscribers(&self, control: ControlId) -> impl Iterator<Item = &Arc<dyn Recompute>> {
        self.callbacks
            .iter()
            .filter(move |c| c.inputs().contains(&control))
    }

    pub fn callbacks(&self) -> &[Arc<dyn Recompute>] {
        &self.callbacks
    }

    pub fn bindings(&self) -> Vec<Binding> {
        self.callbacks
            .iter()
            .map(|c| Binding {
                output: c.output(),
                inputs: c.inputs().to_vec(),
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.callbacks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.callbacks.is_empty()
    }
}
