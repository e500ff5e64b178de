//! Year-scrubbed map layers
//!
//! Every year of the axis gets its own group of layers (path lines, start
//! markers, end markers and single points). All layers are built once up
//! front; changing the selected year only flips visibility flags.

use std::ops::Range;

use ahash::AHashMap;
use serde::Serialize;

use tv_core::{FilteredEventSet, GeoPoint, PathShape, TornadoEvent, Year};

/// One entry of a layer's ordered coordinate sequence
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathVertex {
    Point(GeoPoint),
    /// Ends the current line so the next segment is drawn separately
    Break,
}

impl PathVertex {
    pub fn lon(&self) -> Option<f64> {
        match self {
            PathVertex::Point(p) => Some(p.lon),
            PathVertex::Break => None,
        }
    }

    pub fn lat(&self) -> Option<f64> {
        match self {
            PathVertex::Point(p) => Some(p.lat),
            PathVertex::Break => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LayerKind {
    PathLines,
    StartMarkers,
    EndMarkers,
    /// Events without a complete path, drawn at their one known point
    PointMarkers,
}

/// A renderable map layer belonging to one year
#[derive(Debug, Clone, PartialEq)]
pub struct MapLayer {
    pub year: Year,
    pub kind: LayerKind,
    pub vertices: Vec<PathVertex>,
    pub visible: bool,
}

impl MapLayer {
    fn new(year: Year, kind: LayerKind) -> Self {
        Self {
            year,
            kind,
            vertices: Vec::new(),
            visible: false,
        }
    }

    /// Longitudes with `None` at every break
    pub fn lons(&self) -> Vec<Option<f64>> {
        self.vertices.iter().map(PathVertex::lon).collect()
    }

    /// Latitudes with `None` at every break
    pub fn lats(&self) -> Vec<Option<f64>> {
        self.vertices.iter().map(PathVertex::lat).collect()
    }

    /// Number of real points, breaks excluded
    pub fn point_count(&self) -> usize {
        self.vertices
            .iter()
            .filter(|v| matches!(v, PathVertex::Point(_)))
            .count()
    }

    /// Identity key shared by every layer of the same year
    pub fn key(&self) -> String {
        self.year.to_string()
    }
}

/// Which layers belong to which year.
///
/// A year's layers are stored contiguously, so switching years touches
/// only the layers of the old and new year.
#[derive(Debug, Clone, Default)]
pub struct VisibilityIndex {
    ranges: AHashMap<Year, Range<usize>>,
    layer_count: usize,
}

impl VisibilityIndex {
    /// Layer indices shown when `year` is selected; empty if it has none
    pub fn layers_for(&self, year: Year) -> Range<usize> {
        self.ranges.get(&year).cloned().unwrap_or(0..0)
    }

    /// Full visibility vector for `year`, one flag per layer
    pub fn mask(&self, year: Year) -> Vec<bool> {
        let visible = self.layers_for(year);
        (0..self.layer_count).map(|idx| visible.contains(&idx)).collect()
    }

    pub fn layer_count(&self) -> usize {
        self.layer_count
    }
}

/// Animated map content for a filtered event set
#[derive(Debug, Clone, Default)]
pub struct AnimatedMap {
    years: Vec<Year>,
    layers: Vec<MapLayer>,
    index: VisibilityIndex,
    selected: Option<Year>,
}

impl AnimatedMap {
    /// Year axis, including years without any layer
    pub fn years(&self) -> &[Year] {
        &self.years
    }

    pub fn layers(&self) -> &[MapLayer] {
        &self.layers
    }

    pub fn index(&self) -> &VisibilityIndex {
        &self.index
    }

    /// Year whose layers are currently visible
    pub fn selected(&self) -> Option<Year> {
        self.selected
    }

    /// Layers of a single year
    pub fn bundle(&self, year: Year) -> &[MapLayer] {
        &self.layers[self.index.layers_for(year)]
    }

    /// Show exactly the layers of `year`. Returns false, changing nothing,
    /// when the year is not on the axis.
    pub fn select(&mut self, year: Year) -> bool {
        if self.years.binary_search(&year).is_err() {
            return false;
        }
        if let Some(previous) = self.selected {
            for layer in &mut self.layers[self.index.layers_for(previous)] {
                layer.visible = false;
            }
        }
        for layer in &mut self.layers[self.index.layers_for(year)] {
            layer.visible = true;
        }
        self.selected = Some(year);
        true
    }
}

/// Build the map layers for every year of `years` (sorted ascending).
///
/// The first year that produces any layer starts out visible.
pub fn build_animated_map(years: &[Year], events: &FilteredEventSet<'_>) -> AnimatedMap {
    let mut by_year: AHashMap<Year, Vec<&TornadoEvent>> = AHashMap::new();
    for event in events {
        by_year.entry(event.year).or_default().push(event);
    }

    let mut layers = Vec::new();
    let mut ranges = AHashMap::new();
    for &year in years {
        let Some(year_events) = by_year.remove(&year) else {
            continue;
        };
        let first = layers.len();
        layers.extend(year_layers(year, &year_events));
        if layers.len() > first {
            ranges.insert(year, first..layers.len());
        }
    }
    if !by_year.is_empty() {
        tracing::debug!("{} filtered years are missing from the year axis", by_year.len());
    }

    let mut map = AnimatedMap {
        years: years.to_vec(),
        index: VisibilityIndex {
            ranges,
            layer_count: layers.len(),
        },
        layers,
        selected: None,
    };

    let initial = map.years.iter().copied().find(|&year| !map.index.layers_for(year).is_empty());
    if let Some(year) = initial {
        map.select(year);
    }

    tracing::debug!(
        "Built {} map layers over {} years",
        map.layers.len(),
        map.years.len()
    );
    map
}

/// Layers for one year: lines, starts and ends for pathed events, then the
/// single-point layer. Empty layers are left out.
fn year_layers(year: Year, events: &[&TornadoEvent]) -> Vec<MapLayer> {
    let mut lines = MapLayer::new(year, LayerKind::PathLines);
    let mut starts = MapLayer::new(year, LayerKind::StartMarkers);
    let mut ends = MapLayer::new(year, LayerKind::EndMarkers);
    let mut points = MapLayer::new(year, LayerKind::PointMarkers);

    for event in events {
        match event.shape() {
            PathShape::Path { start, end } => {
                lines.vertices.extend([
                    PathVertex::Point(start),
                    PathVertex::Point(end),
                    PathVertex::Break,
                ]);
                starts.vertices.push(PathVertex::Point(start));
                ends.vertices.push(PathVertex::Point(end));
            }
            PathShape::Point(Some(point)) => points.vertices.push(PathVertex::Point(point)),
            PathShape::Point(None) => {}
        }
    }

    [lines, starts, ends, points]
        .into_iter()
        .filter(|layer| !layer.vertices.is_empty())
        .collect()
}
