//! State boundary polygons from a GeoJSON feature collection

use std::fs;
use std::path::Path;

use geojson::{Feature, GeoJson};
use tracing::warn;

use tv_core::{StateBoundary, StateCode};

use crate::DataError;

/// Feature property read for the display name, when present
const NAME_PROPERTY: &str = "NAME";

/// Load state boundaries, keyed by the `key_property` of each feature.
///
/// Features lacking a geometry or a key are skipped with a warning.
pub fn load_boundaries(path: &Path, key_property: &str) -> Result<Vec<StateBoundary>, DataError> {
    let text = fs::read_to_string(path)?;
    parse_boundaries(&text, key_property)
}

/// Parse boundaries from GeoJSON text
pub fn parse_boundaries(text: &str, key_property: &str) -> Result<Vec<StateBoundary>, DataError> {
    let features = match text.parse::<GeoJson>()? {
        GeoJson::FeatureCollection(collection) => collection.features,
        GeoJson::Feature(feature) => vec![feature],
        GeoJson::Geometry(_) => {
            return Err(DataError::GeoJson(
                "expected a feature collection, found a bare geometry".to_string(),
            ))
        }
    };

    let total = features.len();
    let boundaries: Vec<StateBoundary> = features
        .into_iter()
        .enumerate()
        .filter_map(|(idx, feature)| {
            let boundary = boundary_from_feature(feature, key_property);
            if boundary.is_none() {
                warn!("Skipping boundary feature {} without '{}' or geometry", idx, key_property);
            }
            boundary
        })
        .collect();

    if boundaries.len() < total {
        warn!("Kept {} of {} boundary features", boundaries.len(), total);
    }
    Ok(boundaries)
}

fn boundary_from_feature(feature: Feature, key_property: &str) -> Option<StateBoundary> {
    let property = |key: &str| {
        feature
            .properties
            .as_ref()
            .and_then(|props| props.get(key))
            .and_then(|value| value.as_str())
            .map(str::to_string)
    };

    let state = property(key_property).filter(|code| !code.trim().is_empty())?;
    let name = property(NAME_PROPERTY);
    let geometry = feature.geometry?;

    Some(StateBoundary {
        state: StateCode::new(state),
        name,
        geometry,
    })
}
