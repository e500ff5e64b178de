//! Filter engine: narrows the loaded events down to the user's selection

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::model::{Magnitude, StateCode, TornadoEvent, Year};

/// Which states pass the filter
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StateSelection {
    /// Every state present in the data
    #[default]
    All,
    /// Only the listed states; an empty set selects nothing
    Only(BTreeSet<StateCode>),
}

impl StateSelection {
    pub fn only<I, S>(states: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        StateSelection::Only(states.into_iter().map(StateCode::new).collect())
    }

    pub fn contains(&self, state: &StateCode) -> bool {
        match self {
            StateSelection::All => true,
            StateSelection::Only(states) => states.contains(state),
        }
    }
}

/// Inclusive magnitude bounds. `min > max` is accepted and matches nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MagnitudeRange {
    pub min: Magnitude,
    pub max: Magnitude,
}

impl MagnitudeRange {
    pub const fn new(min: Magnitude, max: Magnitude) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, magnitude: Magnitude) -> bool {
        self.min <= magnitude && magnitude <= self.max
    }
}

/// Complete set of user filter inputs
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct EventFilter {
    #[serde(default)]
    pub states: StateSelection,
    /// `None` means the full magnitude range of the data
    #[serde(default)]
    pub magnitude: Option<MagnitudeRange>,
}

impl EventFilter {
    pub fn matches(&self, event: &TornadoEvent) -> bool {
        self.states.contains(&event.state)
            && self
                .magnitude
                .map_or(true, |range| range.contains(event.magnitude))
    }
}

/// Read-only view over the events that passed a filter
#[derive(Debug, Clone, Default)]
pub struct FilteredEventSet<'a> {
    events: Vec<&'a TornadoEvent>,
}

impl<'a> FilteredEventSet<'a> {
    pub fn new(events: Vec<&'a TornadoEvent>) -> Self {
        Self { events }
    }

    /// View every event without filtering
    pub fn all(events: &'a [TornadoEvent]) -> Self {
        Self::new(events.iter().collect())
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &'a TornadoEvent> + '_ {
        self.events.iter().copied()
    }

    /// Events recorded in a single year, in their original order
    pub fn in_year(&self, year: Year) -> impl Iterator<Item = &'a TornadoEvent> + '_ {
        self.iter().filter(move |event| event.year == year)
    }

    /// Events recorded in a single state, in their original order
    pub fn in_state<'s>(
        &'s self,
        state: &'s StateCode,
    ) -> impl Iterator<Item = &'a TornadoEvent> + 's {
        self.iter().filter(move |event| &event.state == state)
    }
}

impl<'a> IntoIterator for &'a FilteredEventSet<'_> {
    type Item = &'a TornadoEvent;
    type IntoIter = std::iter::Copied<std::slice::Iter<'a, &'a TornadoEvent>>;

    fn into_iter(self) -> Self::IntoIter {
        self.events.iter().copied()
    }
}

/// Apply a filter to the loaded events
pub fn filter<'a>(events: &'a [TornadoEvent], filter: &EventFilter) -> FilteredEventSet<'a> {
    let matched: Vec<_> = events.iter().filter(|event| filter.matches(event)).collect();
    tracing::debug!("Filter kept {} of {} events", matched.len(), events.len());
    FilteredEventSet::new(matched)
}
