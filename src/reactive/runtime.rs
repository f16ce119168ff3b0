//! Reactive Runtime
//!
//! Applies control changes to a session's filter selection and reruns the
//! callbacks subscribed to the changed control. Each rerun reads the whole
//! selection, never just the changed control.
//!
//! ```text
//! change(control, value) → update selection → subscribers(control) → compute → OutputUpdate*
//! ```

use super::controls::{ControlId, ControlValue, OutputUpdate};
use super::error::{ReactiveError, ReactiveResult};
use super::registry::CallbackRegistry;
use crate::dataset::CleanedDataset;
use crate::recompute::{FilterSelection, YearBounds};
use std::sync::Arc;

/// The dataset plus its callback wiring, shared by every session
pub struct Runtime {
    dataset: Arc<CleanedDataset>,
    registry: CallbackRegistry,
}

impl Runtime {
    /// Runtime with the dashboard's standard callbacks
    pub fn new(dataset: Arc<CleanedDataset>, bounds: YearBounds) -> Self {
        Self {
            dataset,
            registry: CallbackRegistry::standard(bounds),
        }
    }

    /// Runtime with a custom callback set
    pub fn with_registry(dataset: Arc<CleanedDataset>, registry: CallbackRegistry) -> Self {
        Self { dataset, registry }
    }

    pub fn dataset(&self) -> &Arc<CleanedDataset> {
        &self.dataset
    }

    pub fn registry(&self) -> &CallbackRegistry {
        &self.registry
    }

    /// Year policy the callbacks filter with, when the registry knows it
    pub fn bounds(&self) -> Option<YearBounds> {
        self.registry.bounds()
    }

    /// Selection a fresh page starts with
    pub fn initial_selection(&self) -> FilterSelection {
        FilterSelection::full(&self.dataset)
    }

    /// Compute every registered output
    pub fn render_all(&self, selection: &FilterSelection) -> Vec<OutputUpdate> {
        self.registry
            .callbacks()
            .iter()
            .map(|c| OutputUpdate {
                output: c.output(),
                value: c.compute(selection, &self.dataset),
            })
            .collect()
    }

    /// Recompute the outputs subscribed to `changed`, or all of them when
    /// nothing is named
    pub fn recompute(
        &self,
        selection: &FilterSelection,
        changed: Option<ControlId>,
    ) -> Vec<OutputUpdate> {
        let Some(control) = changed else {
            return self.render_all(selection);
        };

        self.registry
            .subscribers(control)
            .map(|c| OutputUpdate {
                output: c.output(),
                value: c.compute(selection, &self.dataset),
            })
            .collect()
    }

    /// Apply a control change to `selection` and recompute its subscribers.
    ///
    /// On error the selection is left untouched.
    pub fn apply(
        &self,
        selection: &mut FilterSelection,
        control: ControlId,
        value: ControlValue,
    ) -> ReactiveResult<Vec<OutputUpdate>> {
        set_control(selection, control, value)?;

        let updates = self.recompute(selection, Some(control));
        tracing::debug!(
            control = %control,
            outputs = updates.len(),
            "Control changed"
        );
        Ok(updates)
    }

    /// Build a selection from a full set of control values.
    ///
    /// Controls not named keep their initial value.
    pub fn selection_from<I>(&self, values: I) -> ReactiveResult<FilterSelection>
    where
        I: IntoIterator<Item = (ControlId, ControlValue)>,
    {
        let mut selection = self.initial_selection();
        for (control, value) in values {
            set_control(&mut selection, control, value)?;
        }
        Ok(selection)
    }
}

/// Write one control's value into the selection
pub fn set_control(
    selection: &mut FilterSelection,
    control: ControlId,
    value: ControlValue,
) -> ReactiveResult<()> {
    match (control, value) {
        (ControlId::YearSelector, ControlValue::Range([min, max])) => {
            if min > max {
                return Err(ReactiveError::ReversedRange { min, max });
            }
            selection.year_min = min;
            selection.year_max = max;
        }
        (ControlId::GenreDropdown, ControlValue::Multi(genres)) => {
            selection.genres = genres.into_iter().collect();
        }
        (ControlId::RatingDropdown, ControlValue::Multi(ratings)) => {
            selection.ratings = ratings.into_iter().collect();
        }
        (control, value) => {
            return Err(ReactiveError::ValueKind {
                control,
                expected: control.kind(),
                actual: value.kind(),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::DatasetLoader;
    use crate::reactive::callbacks::Recompute;
    use crate::reactive::controls::{OutputId, OutputValue};

    const GAMES: &str = "Name,Platform,Year_of_Release,Genre,Publisher,Critic_Score,User_Score,Rating
Quest,PS2,2001,RPG,Pub,80,7.5,E
Blast,Xbox,2005,Action,Pub,90,8.0,T
Oldie,PS1,1999,RPG,Pub,95,9.0,E";

    fn runtime() -> Runtime {
        let ds = DatasetLoader::new().load_str(GAMES).unwrap();
        Runtime::new(Arc::new(ds), YearBounds::Exclusive)
    }

    fn count_of(updates: &[OutputUpdate]) -> Option<usize> {
        updates
            .iter()
            .find(|u| u.output == OutputId::SelectedGames)
            .and_then(|u| u.value.as_count())
    }

    #[test]
    fn test_initial_render() {
        let rt = runtime();
        let sel = rt.initial_selection();

        // Raw span 1999..2005: the 2005 row sits on the upper bound
        assert_eq!((sel.year_min, sel.year_max), (1999, 2005));

        let updates = rt.render_all(&sel);
        assert_eq!(updates.len(), 3);
        assert_eq!(count_of(&updates), Some(1));
    }

    #[test]
    fn test_apply_reads_full_selection() {
        let rt = runtime();
        let mut sel = rt.initial_selection();

        let updates = rt
            .apply(&mut sel, ControlId::YearSelector, ControlValue::Range([2000, 2010]))
            .unwrap();
        assert_eq!(count_of(&updates), Some(2));

        let updates = rt
            .apply(
                &mut sel,
                ControlId::RatingDropdown,
                ControlValue::Multi(vec!["M".to_string()]),
            )
            .unwrap();
        assert_eq!(count_of(&updates), Some(0));
        for update in &updates {
            if let OutputValue::Figure(spec) = &update.value {
                assert!(spec.is_empty());
            }
        }
        // The year change persists across the rating change
        assert_eq!((sel.year_min, sel.year_max), (2000, 2010));
    }

    #[test]
    fn test_empty_genres_count_zero() {
        let rt = runtime();
        let mut sel = rt.initial_selection();

        let updates = rt
            .apply(&mut sel, ControlId::GenreDropdown, ControlValue::Multi(Vec::new()))
            .unwrap();
        assert_eq!(count_of(&updates), Some(0));
    }

    #[test]
    fn test_idempotent() {
        let rt = runtime();
        let sel = FilterSelection::new(2000, 2010, ["RPG", "Action"], ["E", "T"]);
        assert_eq!(rt.render_all(&sel), rt.render_all(&sel));
    }

    #[test]
    fn test_invalid_changes_leave_selection_untouched() {
        let rt = runtime();
        let mut sel = rt.initial_selection();
        let before = sel.clone();

        let err = rt
            .apply(&mut sel, ControlId::GenreDropdown, ControlValue::Range([1, 2]))
            .unwrap_err();
        assert!(matches!(err, ReactiveError::ValueKind { .. }));

        let err = rt
            .apply(&mut sel, ControlId::YearSelector, ControlValue::Range([2010, 2000]))
            .unwrap_err();
        assert_eq!(err, ReactiveError::ReversedRange { min: 2010, max: 2000 });

        assert_eq!(sel, before);
    }

    #[test]
    fn test_only_subscribers_recompute() {
        struct YearOnly;

        impl Recompute for YearOnly {
            fn output(&self) -> OutputId {
                OutputId::SelectedGames
            }

            fn inputs(&self) -> &[ControlId] {
                &[ControlId::YearSelector]
            }

            fn compute(&self, sel: &FilterSelection, _: &CleanedDataset) -> OutputValue {
                OutputValue::Count((sel.year_max - sel.year_min) as usize)
            }
        }

        let ds = DatasetLoader::new().load_str(GAMES).unwrap();
        let mut registry = CallbackRegistry::new();
        registry.register(Arc::new(YearOnly)).unwrap();
        let rt = Runtime::with_registry(Arc::new(ds), registry);
        assert_eq!(rt.bounds(), None);
        let mut sel = rt.initial_selection();

        let updates = rt
            .apply(&mut sel, ControlId::GenreDropdown, ControlValue::Multi(Vec::new()))
            .unwrap();
        assert!(updates.is_empty());

        let updates = rt
            .apply(&mut sel, ControlId::YearSelector, ControlValue::Range([2000, 2004]))
            .unwrap();
        assert_eq!(count_of(&updates), Some(4));
    }

    #[test]
    fn test_selection_from_values() {
        let rt = runtime();
        let sel = rt
            .selection_from([
                (ControlId::YearSelector, ControlValue::Range([2000, 2010])),
                (ControlId::RatingDropdown, ControlValue::Multi(vec!["E".to_string()])),
            ])
            .unwrap();

        assert_eq!(sel.year_min, 2000);
        assert_eq!(sel.ratings.len(), 1);
        // Genre keeps its initial full set
        assert_eq!(sel.genres.len(), 2);
        assert_eq!(count_of(&rt.recompute(&sel, None)), Some(1));
    }
}
