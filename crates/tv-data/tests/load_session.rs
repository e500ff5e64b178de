use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use tv_core::{DataSource, StateCode};
use tv_data::{decode_events, load_session, schema, CsvSource, DataError, NullConfig, SourcePaths};

fn fixture(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures").join(name)
}

fn fixture_paths() -> SourcePaths {
    SourcePaths {
        events: fixture("events.csv"),
        boundaries: fixture("states.geojson"),
        areas: fixture("areas.csv"),
        boundary_key: "STUSPS".to_string(),
    }
}

#[test]
fn test_load_fixture_session() {
    let ctx = load_session(&fixture_paths(), &NullConfig::default()).unwrap();

    assert_eq!(ctx.events().len(), 4);
    assert_eq!(ctx.years(), &[2010, 2011, 2012]);
    assert_eq!(ctx.boundaries().len(), 2);
    assert_eq!(ctx.areas().square_miles(&StateCode::new("TX")), Some(268_596.0));

    let first = &ctx.events()[0];
    assert_eq!(first.state.as_str(), "TX");
    assert_eq!((first.injuries, first.fatalities), (5, 1));
    assert_eq!(first.date, NaiveDate::from_ymd_opt(2010, 4, 24));

    // Blank casualty cells load as zero, "NA" dates as absent
    let unknown = &ctx.events()[2];
    assert_eq!(unknown.magnitude, -1);
    assert_eq!((unknown.injuries, unknown.fatalities), (0, 0));
    assert_eq!(ctx.events()[3].date, None);
}

#[test]
fn test_event_source_keeps_schema_columns_only() {
    let source = CsvSource::open(&fixture("events.csv"), schema::event_schema(), &NullConfig::default()).unwrap();
    assert_eq!(source.row_count(), 4);
    assert_eq!(source.schema().fields().len(), 10);
    assert_eq!(source.source_name(), "events.csv");
    assert!(source.path().ends_with("events.csv"));

    let preview = source.preview(2).unwrap();
    assert!(preview.contains("slat"));
    assert!(!preview.contains("wid"));
}

#[test]
fn test_missing_file_is_fatal() {
    let mut paths = fixture_paths();
    paths.events = fixture("does_not_exist.csv");
    let err = load_session(&paths, &NullConfig::default()).unwrap_err();
    assert!(matches!(err, DataError::Io(_)));
}

#[test]
fn test_missing_column_is_fatal() {
    let result = CsvSource::open(&fixture("missing_state.csv"), schema::event_schema(), &NullConfig::default());
    match result {
        Err(DataError::MissingColumn { column, .. }) => assert_eq!(column, "st"),
        Err(other) => panic!("unexpected error: {other}"),
        Ok(_) => panic!("load should fail"),
    }
}

#[test]
fn test_unparseable_number_is_fatal() {
    let result = CsvSource::open(&fixture("bad_magnitude.csv"), schema::event_schema(), &NullConfig::default());
    assert!(matches!(
        result,
        Err(DataError::InvalidValue { ref column, row: 1, .. }) if column == "mag"
    ));
}

#[test]
fn test_truncated_row_is_fatal() {
    let result = CsvSource::open(&fixture("truncated_row.csv"), schema::event_schema(), &NullConfig::default());
    assert!(matches!(result, Err(DataError::Csv(_))));
}

#[test]
fn test_out_of_range_magnitude_is_fatal() {
    let source =
        CsvSource::open(&fixture("oversized_magnitude.csv"), schema::event_schema(), &NullConfig::default()).unwrap();
    match decode_events(&source) {
        Err(DataError::InvalidValue { column, row, value, .. }) => {
            assert_eq!((column.as_str(), row, value.as_str()), ("mag", 1, "99999999999"));
        }
        Err(other) => panic!("unexpected error: {other}"),
        Ok(events) => panic!("decoded {} events", events.len()),
    }
}
