//! Grouped summary statistics over a filtered event set

use std::collections::{BTreeMap, BTreeSet};

use ahash::AHashMap;
use indexmap::IndexMap;
use serde::Serialize;

use tv_core::{AreaTable, FilteredEventSet, StateCode, Year};

/// Name of the synthetic bucket collecting states outside the top N
pub const OTHER_GROUP: &str = "Other";

/// Headline totals
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Summary {
    pub total_events: usize,
    pub total_injuries: u64,
    pub total_fatalities: u64,
}

pub fn count_injuries_fatalities(events: &FilteredEventSet<'_>) -> Summary {
    events.iter().fold(Summary::default(), |mut acc, event| {
        acc.total_events += 1;
        acc.total_injuries += u64::from(event.injuries);
        acc.total_fatalities += u64::from(event.fatalities);
        acc
    })
}

/// Number of events for one state in one year
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct YearStateCount {
    pub year: Year,
    pub state: StateCode,
    pub count: usize,
    /// The state's own code when it ranks in the top N, otherwise "Other"
    pub group: String,
}

/// Yearly counts per state, bucketed for a stacked bar chart
#[derive(Debug, Clone, Default, Serialize)]
pub struct StackedCounts {
    /// Sorted by count, largest first
    pub rows: Vec<YearStateCount>,
    /// States kept by name, in rank order
    pub top_states: Vec<StateCode>,
    /// Chart series order: named groups alphabetically, then "Other"
    pub groups: Vec<String>,
}

impl StackedCounts {
    pub fn total(&self) -> usize {
        self.rows.iter().map(|row| row.count).sum()
    }

    pub fn group_total(&self, group: &str) -> usize {
        self.rows
            .iter()
            .filter(|row| row.group == group)
            .map(|row| row.count)
            .sum()
    }

    /// Per-year counts of one group, summed across its states, by year
    pub fn group_series(&self, group: &str) -> BTreeMap<Year, usize> {
        let mut series = BTreeMap::new();
        for row in self.rows.iter().filter(|row| row.group == group) {
            *series.entry(row.year).or_insert(0) += row.count;
        }
        series
    }
}

/// Count events per (year, state) and bucket all but the `top_n` busiest
/// states into [`OTHER_GROUP`].
///
/// States are ranked by total count; equal totals keep alphabetical order.
pub fn counts_by_year_state(events: &FilteredEventSet<'_>, top_n: usize) -> StackedCounts {
    let mut per_year_state: BTreeMap<(Year, &StateCode), usize> = BTreeMap::new();
    for event in events {
        *per_year_state.entry((event.year, &event.state)).or_insert(0) += 1;
    }

    let mut totals: BTreeMap<&StateCode, usize> = BTreeMap::new();
    for (&(_, state), &count) in &per_year_state {
        *totals.entry(state).or_insert(0) += count;
    }

    let mut ranked: Vec<(&StateCode, usize)> = totals.into_iter().collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1));
    let top: IndexMap<&StateCode, usize> = ranked.into_iter().take(top_n).collect();

    let mut rows: Vec<YearStateCount> = per_year_state
        .into_iter()
        .map(|((year, state), count)| YearStateCount {
            year,
            state: state.clone(),
            count,
            group: if top.contains_key(state) {
                state.to_string()
            } else {
                OTHER_GROUP.to_string()
            },
        })
        .collect();
    rows.sort_by(|a, b| b.count.cmp(&a.count));

    let named: BTreeSet<String> = top.keys().map(|state| state.to_string()).collect();
    let mut groups: Vec<String> = named.into_iter().collect();
    if rows.iter().any(|row| row.group == OTHER_GROUP) {
        groups.push(OTHER_GROUP.to_string());
    }

    StackedCounts {
        rows,
        top_states: top.keys().map(|state| (*state).clone()).collect(),
        groups,
    }
}

/// Events per square mile for one state
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AreaRate {
    pub state: StateCode,
    pub total_events: usize,
    pub square_miles: f64,
    pub rate: f64,
}

/// Join per-state event counts with land areas, highest rate first.
///
/// States without a usable area are left out.
pub fn per_area_rate(events: &FilteredEventSet<'_>, areas: &AreaTable) -> Vec<AreaRate> {
    let mut counts: AHashMap<&StateCode, usize> = AHashMap::new();
    for event in events {
        *counts.entry(&event.state).or_insert(0) += 1;
    }

    let mut rates: Vec<AreaRate> = counts
        .into_iter()
        .filter_map(|(state, total_events)| {
            let square_miles = areas.square_miles(state).filter(|area| *area > 0.0);
            if square_miles.is_none() {
                tracing::debug!("No land area for {}, leaving it out of the per-area rates", state);
            }
            let square_miles = square_miles?;
            Some(AreaRate {
                state: state.clone(),
                total_events,
                square_miles,
                rate: total_events as f64 / square_miles,
            })
        })
        .collect();

    rates.sort_by(|a, b| b.rate.total_cmp(&a.rate).then_with(|| a.state.cmp(&b.state)));
    rates
}

/// Summed casualties for one state
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StateCasualties {
    pub state: StateCode,
    pub events: usize,
    pub injuries: u64,
    pub fatalities: u64,
}

/// Injuries and fatalities per state, alphabetical by state
pub fn casualties_by_state(events: &FilteredEventSet<'_>) -> Vec<StateCasualties> {
    let mut by_state: BTreeMap<&StateCode, StateCasualties> = BTreeMap::new();
    for event in events {
        let entry = by_state.entry(&event.state).or_insert_with(|| StateCasualties {
            state: event.state.clone(),
            events: 0,
            injuries: 0,
            fatalities: 0,
        });
        entry.events += 1;
        entry.injuries += u64::from(event.injuries);
        entry.fatalities += u64::from(event.fatalities);
    }
    by_state.into_values().collect()
}

/// Events per year for one state. Years without events are absent.
pub fn yearly_counts(events: &FilteredEventSet<'_>, state: &StateCode) -> BTreeMap<Year, usize> {
    let mut counts = BTreeMap::new();
    for event in events.in_state(state) {
        *counts.entry(event.year).or_insert(0) += 1;
    }
    counts
}

#[cfg(test)]
mod tests {
    use super::*;
    use tv_core::{GeoPoint, StateAreaFact, TornadoEvent};

    fn event(year: Year, state: &str, injuries: u32, fatalities: u32) -> TornadoEvent {
        TornadoEvent {
            year,
            state: StateCode::new(state),
            magnitude: 1,
            start: GeoPoint::default(),
            end: GeoPoint::default(),
            injuries,
            fatalities,
            date: None,
        }
    }

    /// `counts[i]` events for the i-th state code, all in 2000 and 2001
    fn ten_states(counts: &[usize]) -> Vec<TornadoEvent> {
        const CODES: [&str; 10] = ["AL", "AR", "FL", "GA", "IA", "KS", "MS", "NE", "OK", "TX"];
        let mut events = Vec::new();
        for (code, &n) in CODES.iter().zip(counts) {
            for i in 0..n {
                events.push(event(2000 + (i % 2) as Year, code, 0, 0));
            }
        }
        events
    }

    #[test]
    fn test_empty_summary() {
        let events: Vec<TornadoEvent> = Vec::new();
        let summary = count_injuries_fatalities(&FilteredEventSet::all(&events));
        assert_eq!(summary, Summary::default());
        assert_eq!(
            (summary.total_events, summary.total_injuries, summary.total_fatalities),
            (0, 0, 0)
        );
    }

    #[test]
    fn test_summary_sums() {
        let events = vec![event(2010, "TX", 5, 1), event(2010, "OK", 0, 0), event(2011, "TX", 3, 2)];
        let summary = count_injuries_fatalities(&FilteredEventSet::all(&events));
        assert_eq!(summary.total_events, 3);
        assert_eq!(summary.total_injuries, 8);
        assert_eq!(summary.total_fatalities, 3);
    }

    #[test]
    fn test_year_state_counts_sum_to_total() {
        let events = ten_states(&[3, 7, 1, 4, 9, 2, 5, 6, 8, 10]);
        let set = FilteredEventSet::all(&events);
        let stacked = counts_by_year_state(&set, 8);
        assert_eq!(stacked.total(), set.len());
        assert!(stacked.rows.windows(2).all(|w| w[0].count >= w[1].count));
    }

    #[test]
    fn test_top_eight_plus_other() {
        // FL (1) and KS (2) fall outside the top eight
        let events = ten_states(&[3, 7, 1, 4, 9, 2, 5, 6, 8, 10]);
        let stacked = counts_by_year_state(&FilteredEventSet::all(&events), 8);

        assert_eq!(stacked.top_states.len(), 8);
        assert_eq!(stacked.groups.len(), 9);
        assert_eq!(stacked.groups.last().map(String::as_str), Some(OTHER_GROUP));
        assert!(!stacked.groups.iter().any(|g| g == "FL" || g == "KS"));
        assert_eq!(stacked.group_total(OTHER_GROUP), 3);
        assert_eq!(stacked.top_states[0].as_str(), "TX");
    }

    #[test]
    fn test_top_n_ties_keep_alphabetical_order() {
        let events = ten_states(&[2, 2, 2, 2, 2, 2, 2, 2, 2, 2]);
        let stacked = counts_by_year_state(&FilteredEventSet::all(&events), 8);
        let top: Vec<_> = stacked.top_states.iter().map(|s| s.as_str()).collect();
        assert_eq!(top, vec!["AL", "AR", "FL", "GA", "IA", "KS", "MS", "NE"]);
        assert_eq!(stacked.group_total(OTHER_GROUP), 4);
    }

    #[test]
    fn test_no_other_group_when_few_states() {
        let events = vec![event(2010, "TX", 0, 0), event(2011, "OK", 0, 0)];
        let stacked = counts_by_year_state(&FilteredEventSet::all(&events), 8);
        assert_eq!(stacked.groups, vec!["OK".to_string(), "TX".to_string()]);
        let tx = stacked.group_series("TX");
        assert_eq!(tx.get(&2010), Some(&1));
    }

    #[test]
    fn test_per_area_rate_exact() {
        let events: Vec<_> = (0..10).map(|_| event(2010, "RI", 0, 0)).collect();
        let areas = AreaTable::new(vec![StateAreaFact {
            state: StateCode::new("RI"),
            square_miles: 5.0,
        }]);
        let rates = per_area_rate(&FilteredEventSet::all(&events), &areas);
        assert_eq!(rates.len(), 1);
        assert_eq!(rates[0].total_events, 10);
        assert_eq!(rates[0].rate, 2.0);
    }

    #[test]
    fn test_per_area_rate_drops_unmatched_states() {
        let events = vec![event(2010, "TX", 0, 0), event(2010, "PR", 0, 0)];
        let areas = AreaTable::new(vec![
            StateAreaFact { state: StateCode::new("TX"), square_miles: 268_596.0 },
            StateAreaFact { state: StateCode::new("PR"), square_miles: 0.0 },
        ]);
        let rates = per_area_rate(&FilteredEventSet::all(&events), &areas);
        assert_eq!(rates.len(), 1);
        assert_eq!(rates[0].state.as_str(), "TX");
    }

    #[test]
    fn test_casualties_and_yearly_counts() {
        let events = vec![event(2010, "TX", 5, 1), event(2012, "TX", 1, 0), event(2010, "OK", 2, 2)];
        let set = FilteredEventSet::all(&events);

        let casualties = casualties_by_state(&set);
        assert_eq!(casualties.len(), 2);
        assert_eq!(casualties[1].state.as_str(), "TX");
        assert_eq!((casualties[1].injuries, casualties[1].fatalities), (6, 1));

        let tx = yearly_counts(&set, &StateCode::new("TX"));
        assert_eq!(tx.into_iter().collect::<Vec<_>>(), vec![(2010, 1), (2012, 1)]);
    }
}
