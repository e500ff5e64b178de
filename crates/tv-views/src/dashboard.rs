//! Dashboard pages assembled from one session and one filter
//!
//! The overview page is recomputed from scratch for every filter; the
//! comparison page depends only on the two chosen states.

use serde::Serialize;

use tv_core::{DashboardSettings, EventFilter, SessionContext, StateCode, Year};

use crate::aggregate::{
    casualties_by_state, count_injuries_fatalities, counts_by_year_state, per_area_rate, AreaRate,
    StackedCounts, StateCasualties, Summary,
};
use crate::compare::{compare_periods, compare_states, PeriodComparison, StateComparison};
use crate::plots::{
    area_rate_figure, casualty_scatter, comparison_histogram, map_figure, period_lines_figure,
    stacked_counts_figure, BarChartConfig, Figure, HistogramConfig, LinePlotConfig,
    ScatterPlotConfig,
};
use crate::stats::VarianceAssumption;
use crate::traces::{build_animated_map, AnimatedMap};

/// Everything shown on the overview page for one filter
#[derive(Debug, Clone)]
pub struct Dashboard {
    pub filter: EventFilter,
    pub summary: Summary,
    pub stacked: StackedCounts,
    pub area_rates: Vec<AreaRate>,
    pub casualties: Vec<StateCasualties>,
    pub map: AnimatedMap,
    settings: DashboardSettings,
}

impl Dashboard {
    pub fn build(ctx: &SessionContext, filter: &EventFilter, settings: &DashboardSettings) -> Self {
        let events = ctx.filter(filter);
        let dashboard = Self {
            filter: filter.clone(),
            summary: count_injuries_fatalities(&events),
            stacked: counts_by_year_state(&events, settings.top_states),
            area_rates: per_area_rate(&events, ctx.areas()),
            casualties: casualties_by_state(&events),
            map: build_animated_map(ctx.years(), &events),
            settings: settings.clone(),
        };

        tracing::info!(
            "Dashboard: {} tornadoes, {} injuries, {} fatalities",
            dashboard.summary.total_events,
            dashboard.summary.total_injuries,
            dashboard.summary.total_fatalities
        );
        dashboard
    }

    /// Move the map to `year`; false when the year is not on the axis
    pub fn select_year(&mut self, year: Year) -> bool {
        self.map.select(year)
    }

    /// Named figures of the overview page, in page order
    pub fn figures(&self, ctx: &SessionContext) -> anyhow::Result<Vec<(&'static str, Figure)>> {
        Ok(vec![
            ("map", map_figure(&self.map, ctx.boundaries(), &self.settings.map)?),
            ("yearly_by_state", stacked_counts_figure(&self.stacked, &BarChartConfig::default())),
            ("per_square_mile", area_rate_figure(&self.area_rates, &BarChartConfig::area_rate())),
            ("injuries_vs_fatalities", casualty_scatter(&self.casualties, &ScatterPlotConfig::default())),
        ])
    }
}

/// The "compare two states" page
#[derive(Debug, Clone, Serialize)]
pub struct ComparisonPage {
    pub states: StateComparison,
    pub periods: Vec<PeriodComparison>,
}

impl ComparisonPage {
    pub fn build(
        ctx: &SessionContext,
        a: &StateCode,
        b: &StateCode,
        settings: &DashboardSettings,
    ) -> Self {
        for state in [a, b] {
            if !ctx.has_state(state) {
                tracing::warn!("No tornadoes recorded for {}", state);
            }
        }

        let assumption = VarianceAssumption::default();
        Self {
            states: compare_states(ctx, a, b, settings, assumption),
            periods: vec![
                compare_periods(ctx, a, settings, assumption),
                compare_periods(ctx, b, settings, assumption),
            ],
        }
    }

    pub fn figures(&self) -> Vec<(&'static str, Figure)> {
        vec![
            (
                "yearly_count_histogram",
                comparison_histogram(&self.states.a, &self.states.b, &HistogramConfig::default()),
            ),
            ("before_since", period_lines_figure(&self.periods, &LinePlotConfig::default())),
        ]
    }
}

/// Serializable summary of both pages
#[derive(Debug, Clone, Serialize)]
pub struct Report<'a> {
    pub filter: &'a EventFilter,
    pub summary: Summary,
    pub top_states: &'a [StateCode],
    pub area_rates: &'a [AreaRate],
    pub casualties: &'a [StateCasualties],
    pub comparison: &'a ComparisonPage,
}

impl<'a> Report<'a> {
    pub fn new(dashboard: &'a Dashboard, comparison: &'a ComparisonPage) -> Self {
        Self {
            filter: &dashboard.filter,
            summary: dashboard.summary,
            top_states: &dashboard.stacked.top_states,
            area_rates: &dashboard.area_rates,
            casualties: &dashboard.casualties,
            comparison,
        }
    }
}
