//! Animated tornado track map
//!
//! Trace 0 is a flat choropleth of the state outlines and stays visible for
//! every year. The remaining traces are the year layers of an
//! [`AnimatedMap`]; the year slider restyles their visibility.

use geojson::feature::Id;
use geojson::{Feature, FeatureCollection, JsonObject};
use serde_json::{json, Value};

use tv_core::{MapStyle, StateBoundary};

use super::Figure;
use crate::traces::{AnimatedMap, LayerKind, MapLayer};

/// Outline width of the state polygons
const BASE_LINE_WIDTH: f64 = 1.0;

/// Build the map figure for a set of year layers over the state outlines
pub fn map_figure(
    map: &AnimatedMap,
    boundaries: &[StateBoundary],
    style: &MapStyle,
) -> anyhow::Result<Figure> {
    let mut figure = Figure::new(map_layout(map, style));
    figure.push(base_trace(boundaries, style)?);
    for layer in map.layers() {
        figure.push(layer_trace(layer, style));
    }

    tracing::debug!(
        "Map figure has {} traces and {} slider steps",
        figure.trace_count(),
        map.years().len()
    );
    Ok(figure)
}

/// Gray choropleth of every boundary, one location per feature index
fn base_trace(boundaries: &[StateBoundary], style: &MapStyle) -> anyhow::Result<Value> {
    let features = boundaries
        .iter()
        .enumerate()
        .map(|(idx, boundary)| {
            let mut properties = JsonObject::new();
            properties.insert("state".to_string(), json!(boundary.state.as_str()));
            if let Some(name) = &boundary.name {
                properties.insert("name".to_string(), json!(name));
            }
            Feature {
                bbox: None,
                geometry: Some(boundary.geometry.clone()),
                id: Some(Id::Number(idx.into())),
                properties: Some(properties),
                foreign_members: None,
            }
        })
        .collect();
    let collection = FeatureCollection {
        bbox: None,
        features,
        foreign_members: None,
    };

    let locations: Vec<usize> = (0..boundaries.len()).collect();
    Ok(json!({
        "type": "choroplethmapbox",
        "geojson": serde_json::to_value(&collection)?,
        "locations": locations,
        "z": locations,
        "colorscale": [[0, style.base_fill], [1, style.base_fill]],
        "showscale": false,
        "marker": {
            "opacity": style.base_opacity,
            "line": { "width": BASE_LINE_WIDTH, "color": style.base_outline },
        },
        "hoverinfo": "skip",
        "visible": true,
    }))
}

fn layer_trace(layer: &MapLayer, style: &MapStyle) -> Value {
    let mut trace = json!({
        "type": "scattermapbox",
        "name": layer.key(),
        "lon": layer.lons(),
        "lat": layer.lats(),
        "visible": layer.visible,
    });

    let (mode, color, size, hover) = match layer.kind {
        LayerKind::PathLines => ("lines", &style.line_color, style.line_width, None),
        LayerKind::StartMarkers => ("markers", &style.start_color, style.marker_size, Some("Starting Point")),
        LayerKind::EndMarkers => ("markers", &style.end_color, style.marker_size, Some("Ending Point")),
        LayerKind::PointMarkers => ("markers", &style.point_color, style.marker_size, None),
    };
    trace["mode"] = json!(mode);
    trace["marker"] = json!({ "size": size, "color": color });
    if layer.kind == LayerKind::PathLines {
        trace["line"] = json!({ "width": style.line_width, "color": color });
    }
    if let Some(hover) = hover {
        trace["hovertemplate"] = json!(hover);
    }
    trace
}

fn map_layout(map: &AnimatedMap, style: &MapStyle) -> Value {
    let steps: Vec<Value> = map
        .years()
        .iter()
        .map(|&year| {
            let mut visible = Vec::with_capacity(map.index().layer_count() + 1);
            visible.push(true);
            visible.extend(map.index().mask(year));
            json!({
                "method": "restyle",
                "args": ["visible", visible],
                "label": year.to_string(),
            })
        })
        .collect();

    let active = map
        .selected()
        .and_then(|year| map.years().iter().position(|&y| y == year))
        .unwrap_or(0);

    json!({
        "sliders": [{
            "active": active,
            "y": 1.15,
            "currentvalue": { "prefix": "Year: " },
            "steps": steps,
        }],
        "showlegend": false,
        "mapbox": {
            "style": style.tile_style,
            "zoom": style.zoom,
            "center": { "lat": style.center_lat, "lon": style.center_lon },
        },
        "autosize": false,
        "width": style.width,
        "height": style.height,
        "margin": { "r": 0, "t": 0, "l": 0, "b": 0 },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traces::build_animated_map;
    use tv_core::{FilteredEventSet, GeoPoint, StateCode, TornadoEvent, Year};

    fn event(year: Year, start: (f64, f64), end: (f64, f64)) -> TornadoEvent {
        TornadoEvent {
            year,
            state: StateCode::new("OK"),
            magnitude: 2,
            start: GeoPoint::new(start.0, start.1),
            end: GeoPoint::new(end.0, end.1),
            injuries: 0,
            fatalities: 0,
            date: None,
        }
    }

    fn boundary(code: &str) -> StateBoundary {
        StateBoundary {
            state: StateCode::new(code),
            name: Some("Oklahoma".to_string()),
            geometry: geojson::Geometry::new(geojson::Value::Polygon(vec![vec![
                vec![-100.0, 34.0],
                vec![-94.5, 34.0],
                vec![-94.5, 37.0],
                vec![-100.0, 34.0],
            ]])),
        }
    }

    fn sample_figure() -> Figure {
        let events = vec![
            event(2010, (-97.5, 35.4), (-97.2, 35.6)),
            event(2011, (-98.0, 36.0), (0.0, 0.0)),
        ];
        let map = build_animated_map(&[2009, 2010, 2011], &FilteredEventSet::all(&events));
        map_figure(&map, &[boundary("OK")], &MapStyle::default()).unwrap()
    }

    #[test]
    fn test_base_layer_first_and_always_visible() {
        let figure = sample_figure();
        assert_eq!(figure.trace_count(), 1 + 3 + 1);
        assert_eq!(figure.data[0]["type"], "choroplethmapbox");
        assert_eq!(figure.data[0]["geojson"]["features"][0]["id"], 0);
        assert_eq!(figure.data[0]["colorscale"][0][1], "rgb(204, 204, 204)");

        let steps = figure.layout["sliders"][0]["steps"].as_array().unwrap();
        assert_eq!(steps.len(), 3);
        for step in steps {
            assert_eq!(step["args"][0], "visible");
            assert_eq!(step["args"][1][0], true);
            assert_eq!(step["args"][1].as_array().unwrap().len(), figure.trace_count());
        }
    }

    #[test]
    fn test_slider_masks_match_years() {
        let figure = sample_figure();
        let steps = figure.layout["sliders"][0]["steps"].as_array().unwrap();
        assert_eq!(steps[0]["label"], "2009");
        assert_eq!(steps[0]["args"][1], json!([true, false, false, false, false]));
        assert_eq!(steps[1]["args"][1], json!([true, true, true, true, false]));
        assert_eq!(steps[2]["args"][1], json!([true, false, false, false, true]));

        // 2009 has no layers, so 2010 starts out selected
        assert_eq!(figure.layout["sliders"][0]["active"], 1);
        assert_eq!(figure.layout["sliders"][0]["currentvalue"]["prefix"], "Year: ");
        assert_eq!(figure.data[1]["visible"], true);
        assert_eq!(figure.data[4]["visible"], false);
    }

    #[test]
    fn test_layer_styles() {
        let figure = sample_figure();
        let lines = &figure.data[1];
        assert_eq!(lines["mode"], "lines");
        assert_eq!(lines["lon"], json!([-97.5, -97.2, null]));
        assert_eq!(lines["line"]["color"], "Blue");
        assert_eq!(lines["name"], "2010");

        assert_eq!(figure.data[2]["marker"]["color"], "Green");
        assert_eq!(figure.data[2]["hovertemplate"], "Starting Point");
        assert_eq!(figure.data[3]["marker"]["color"], "Red");
        assert_eq!(figure.data[4]["marker"]["color"], "Blue");
        assert_eq!(figure.data[4]["marker"]["size"], 4.0);

        assert_eq!(figure.layout["mapbox"]["style"], "carto-positron");
        assert_eq!(figure.layout["mapbox"]["center"]["lat"], 37.0902);
    }
}
