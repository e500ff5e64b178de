//! Session context: everything loaded at startup, shared read-only
//! with every component for the rest of the process.

use std::collections::BTreeSet;
use std::sync::Arc;

use ahash::AHashMap;

use crate::filter::{self, EventFilter, FilteredEventSet, MagnitudeRange};
use crate::model::{StateAreaFact, StateBoundary, StateCode, TornadoEvent, Year};

/// Land area lookup keyed by state
#[derive(Debug, Clone, Default)]
pub struct AreaTable {
    areas: AHashMap<StateCode, f64>,
}

impl AreaTable {
    pub fn new(facts: impl IntoIterator<Item = StateAreaFact>) -> Self {
        let mut areas = AHashMap::new();
        for fact in facts {
            if let Some(previous) = areas.insert(fact.state.clone(), fact.square_miles) {
                tracing::warn!(
                    "Duplicate area for {}: {} replaces {}",
                    fact.state,
                    fact.square_miles,
                    previous
                );
            }
        }
        Self { areas }
    }

    /// Area in square miles, if the state has a fact
    pub fn square_miles(&self, state: &StateCode) -> Option<f64> {
        self.areas.get(state).copied()
    }

    pub fn len(&self) -> usize {
        self.areas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.areas.is_empty()
    }
}

/// Immutable data for one session
#[derive(Debug, Clone)]
pub struct SessionContext {
    events: Arc<[TornadoEvent]>,
    boundaries: Arc<[StateBoundary]>,
    areas: Arc<AreaTable>,

    /// Sorted distinct years of the unfiltered data
    years: Vec<Year>,
    /// Sorted distinct states of the unfiltered data
    states: Vec<StateCode>,
    magnitude_bounds: Option<MagnitudeRange>,
}

impl SessionContext {
    pub fn new(
        events: Vec<TornadoEvent>,
        boundaries: Vec<StateBoundary>,
        areas: AreaTable,
    ) -> Self {
        let years: BTreeSet<Year> = events.iter().map(|e| e.year).collect();
        let states: BTreeSet<StateCode> = events.iter().map(|e| e.state.clone()).collect();
        let magnitude_bounds = events
            .iter()
            .map(|e| e.magnitude)
            .fold(None, |acc: Option<MagnitudeRange>, m| {
                Some(match acc {
                    Some(range) => MagnitudeRange::new(range.min.min(m), range.max.max(m)),
                    None => MagnitudeRange::new(m, m),
                })
            });

        tracing::debug!(
            "Session holds {} events across {} years and {} states",
            events.len(),
            years.len(),
            states.len()
        );

        Self {
            events: events.into(),
            boundaries: boundaries.into(),
            areas: Arc::new(areas),
            years: years.into_iter().collect(),
            states: states.into_iter().collect(),
            magnitude_bounds,
        }
    }

    pub fn events(&self) -> &[TornadoEvent] {
        &self.events
    }

    pub fn boundaries(&self) -> &[StateBoundary] {
        &self.boundaries
    }

    pub fn areas(&self) -> &AreaTable {
        &self.areas
    }

    /// Year axis of the full dataset, independent of any filter
    pub fn years(&self) -> &[Year] {
        &self.years
    }

    pub fn states(&self) -> &[StateCode] {
        &self.states
    }

    /// Smallest and largest magnitude in the data, `None` when empty
    pub fn magnitude_bounds(&self) -> Option<MagnitudeRange> {
        self.magnitude_bounds
    }

    pub fn has_state(&self, state: &StateCode) -> bool {
        self.states.binary_search(state).is_ok()
    }

    /// Apply a filter to the session's events
    pub fn filter(&self, event_filter: &EventFilter) -> FilteredEventSet<'_> {
        filter::filter(&self.events, event_filter)
    }

    /// Every event, unfiltered
    pub fn all_events(&self) -> FilteredEventSet<'_> {
        FilteredEventSet::all(&self.events)
    }
}
