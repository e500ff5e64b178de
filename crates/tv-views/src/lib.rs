//! Derived views over a tornado session
//!
//! Aggregates, year-layered map traces, statistical comparisons and the
//! Plotly figures built from them. Everything here is a pure function of
//! the session context and the current filter.

pub mod aggregate;
pub mod compare;
pub mod dashboard;
pub mod export;
pub mod plots;
pub mod stats;
pub mod traces;

pub use aggregate::{
    casualties_by_state, count_injuries_fatalities, counts_by_year_state, per_area_rate,
    yearly_counts, AreaRate, StackedCounts, StateCasualties, Summary, YearStateCount, OTHER_GROUP,
};
pub use compare::{compare_periods, compare_states, PeriodComparison, SeriesReport, StateComparison};
pub use dashboard::{ComparisonPage, Dashboard, Report};
pub use export::{write_figure, write_json, write_report, ExportFormat};
pub use plots::Figure;
pub use stats::{compare, t_test, verdict, SeriesSummary, Side, TTest, VarianceAssumption, Verdict};
pub use traces::{build_animated_map, AnimatedMap, LayerKind, MapLayer, PathVertex, VisibilityIndex};
