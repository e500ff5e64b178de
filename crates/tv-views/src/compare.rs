//! State-vs-state and before/since comparisons of yearly tornado counts
//!
//! Comparisons always run over the full dataset, independent of the map
//! and chart filter.

use std::collections::BTreeMap;

use serde::Serialize;

use tv_core::{DashboardSettings, SessionContext, StateCode, Year};

use crate::aggregate::yearly_counts;
use crate::stats::{self, SeriesSummary, TTest, VarianceAssumption, Verdict};

/// Yearly counts of one series with their summary
#[derive(Debug, Clone, Serialize)]
pub struct SeriesReport {
    pub label: String,
    pub yearly: BTreeMap<Year, usize>,
    pub summary: SeriesSummary,
}

impl SeriesReport {
    pub fn new(label: impl Into<String>, yearly: BTreeMap<Year, usize>) -> Self {
        let counts: Vec<usize> = yearly.values().copied().collect();
        Self {
            label: label.into(),
            summary: SeriesSummary::of(&stats::as_f64(&counts)),
            yearly,
        }
    }

    pub fn counts(&self) -> Vec<usize> {
        self.yearly.values().copied().collect()
    }

    pub fn mean(&self) -> f64 {
        self.summary.mean
    }
}

/// Two states' yearly counts tested against each other
#[derive(Debug, Clone, Serialize)]
pub struct StateComparison {
    pub a: SeriesReport,
    pub b: SeriesReport,
    pub test: TTest,
    pub verdict: Verdict,
    /// Both series are roughly bell-shaped
    pub looks_normal: bool,
}

pub fn compare_states(
    ctx: &SessionContext,
    a: &StateCode,
    b: &StateCode,
    settings: &DashboardSettings,
    assumption: VarianceAssumption,
) -> StateComparison {
    let events = ctx.all_events();
    let a = SeriesReport::new(a.as_str(), yearly_counts(&events, a));
    let b = SeriesReport::new(b.as_str(), yearly_counts(&events, b));

    let test = stats::compare(&a.counts(), &b.counts(), assumption);
    let verdict = stats::verdict(&test, a.mean(), b.mean(), settings.significance_level);
    tracing::debug!("{} vs {}: {:?}", a.label, b.label, verdict);

    StateComparison {
        looks_normal: a.summary.looks_normal() && b.summary.looks_normal(),
        a,
        b,
        test,
        verdict,
    }
}

/// One state's yearly counts before and since a split year
#[derive(Debug, Clone, Serialize)]
pub struct PeriodComparison {
    pub state: StateCode,
    pub split_year: Year,
    pub before: SeriesReport,
    pub since: SeriesReport,
    pub test: TTest,
    /// Side `A` is the "before" period
    pub verdict: Verdict,
}

pub fn compare_periods(
    ctx: &SessionContext,
    state: &StateCode,
    settings: &DashboardSettings,
    assumption: VarianceAssumption,
) -> PeriodComparison {
    let split_year = settings.period_split_year;
    let mut before = yearly_counts(&ctx.all_events(), state);
    let since = before.split_off(&split_year);

    let before = SeriesReport::new(format!("Before {split_year}"), before);
    let since = SeriesReport::new(format!("Since {split_year}"), since);

    let test = stats::compare(&before.counts(), &since.counts(), assumption);
    let verdict = stats::verdict(&test, before.mean(), since.mean(), settings.significance_level);

    PeriodComparison {
        state: state.clone(),
        split_year,
        before,
        since,
        test,
        verdict,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::Side;
    use tv_core::{AreaTable, GeoPoint, TornadoEvent};

    fn events_per_year(state: &str, per_year: &[(Year, usize)]) -> Vec<TornadoEvent> {
        per_year
            .iter()
            .flat_map(|&(year, n)| {
                (0..n).map(move |_| TornadoEvent {
                    year,
                    state: StateCode::new(state),
                    magnitude: 1,
                    start: GeoPoint::default(),
                    end: GeoPoint::default(),
                    injuries: 0,
                    fatalities: 0,
                    date: None,
                })
            })
            .collect()
    }

    fn session(events: Vec<TornadoEvent>) -> SessionContext {
        SessionContext::new(events, Vec::new(), AreaTable::default())
    }

    #[test]
    fn test_compare_states_uses_yearly_counts() {
        let mut events = events_per_year("TX", &[(1998, 10), (1999, 11), (2000, 12), (2001, 13), (2002, 14)]);
        events.extend(events_per_year("OK", &[(1998, 1), (1999, 2), (2000, 3), (2001, 4), (2002, 5)]));
        let ctx = session(events);

        let cmp = compare_states(
            &ctx,
            &StateCode::new("TX"),
            &StateCode::new("OK"),
            &DashboardSettings::default(),
            VarianceAssumption::Equal,
        );
        assert_eq!(cmp.a.mean(), 12.0);
        assert_eq!(cmp.b.mean(), 3.0);
        assert_eq!(cmp.verdict, Verdict::Significant { higher: Side::A });
        assert!(cmp.looks_normal);
    }

    #[test]
    fn test_compare_unknown_state_is_insufficient() {
        let ctx = session(events_per_year("TX", &[(2000, 3), (2001, 4)]));
        let cmp = compare_states(
            &ctx,
            &StateCode::new("TX"),
            &StateCode::new("ZZ"),
            &DashboardSettings::default(),
            VarianceAssumption::Equal,
        );
        assert!(cmp.b.yearly.is_empty());
        assert_eq!(cmp.test, TTest::InsufficientData);
        assert_eq!(cmp.verdict, Verdict::InsufficientData);
    }

    #[test]
    fn test_period_split_is_inclusive_on_since_side() {
        let ctx = session(events_per_year(
            "KS",
            &[(1997, 2), (1998, 3), (1999, 2), (2000, 9), (2001, 10), (2002, 11)],
        ));
        let cmp = compare_periods(
            &ctx,
            &StateCode::new("KS"),
            &DashboardSettings::default(),
            VarianceAssumption::Equal,
        );
        assert_eq!(cmp.split_year, 2000);
        assert_eq!(cmp.before.yearly.keys().copied().collect::<Vec<_>>(), vec![1997, 1998, 1999]);
        assert_eq!(cmp.since.yearly.keys().copied().collect::<Vec<_>>(), vec![2000, 2001, 2002]);
        assert_eq!(cmp.before.label, "Before 2000");
        assert_eq!(cmp.verdict, Verdict::Significant { higher: Side::B });
    }
}
