//! Decoding of loaded record batches into domain records

use arrow::array::{Array, Date32Array, Float64Array, Int64Array, StringArray};
use arrow::record_batch::RecordBatch;
use chrono::{Duration, NaiveDate};

use tv_core::{DataSource, GeoPoint, StateAreaFact, StateCode, TornadoEvent, UNKNOWN_MAGNITUDE};

use crate::schema::columns;
use crate::DataError;

/// Typed access to the columns of a batch
struct Columns<'a> {
    batch: &'a RecordBatch,
    source_name: &'a str,
}

impl<'a> Columns<'a> {
    fn get<T: Array + 'static>(&self, name: &str) -> Result<&'a T, DataError> {
        self.batch
            .column_by_name(name)
            .and_then(|column| column.as_any().downcast_ref::<T>())
            .ok_or_else(|| DataError::MissingColumn {
                source_name: self.source_name.to_string(),
                column: name.to_string(),
            })
    }

    fn invalid_value(&self, column: &str, row: usize, value: impl ToString) -> DataError {
        DataError::InvalidValue {
            source_name: self.source_name.to_string(),
            column: column.to_string(),
            row: row + 1,
            value: value.to_string(),
        }
    }

    fn missing_value(&self, column: &str, row: usize) -> DataError {
        self.invalid_value(column, row, "")
    }

    /// Narrow an integer cell to `T`, failing on values outside its range
    fn narrow<T: TryFrom<i64>>(&self, column: &str, row: usize, value: i64) -> Result<T, DataError> {
        T::try_from(value).map_err(|_| self.invalid_value(column, row, value))
    }

    /// Casualty count; null loads as zero, negative or oversized values fail
    fn count(&self, array: &Int64Array, column: &str, row: usize) -> Result<u32, DataError> {
        opt_i64(array, row).map_or(Ok(0), |v| self.narrow(column, row, v))
    }
}

fn opt_i64(array: &Int64Array, row: usize) -> Option<i64> {
    array.is_valid(row).then(|| array.value(row))
}

fn opt_f64(array: &Float64Array, row: usize) -> Option<f64> {
    array.is_valid(row).then(|| array.value(row))
}

fn date(array: &Date32Array, row: usize) -> Option<NaiveDate> {
    if !array.is_valid(row) {
        return None;
    }
    NaiveDate::default().checked_add_signed(Duration::days(array.value(row) as i64))
}

/// Decode the event table.
///
/// A missing year or state fails the load, as does any number outside the
/// range of its field or a negative casualty count. Missing magnitudes
/// become [`UNKNOWN_MAGNITUDE`], missing coordinates the `0.0` sentinel and
/// missing casualty counts zero.
pub fn decode_events(source: &dyn DataSource) -> Result<Vec<TornadoEvent>, DataError> {
    let cols = Columns {
        batch: source.record_batch(),
        source_name: source.source_name(),
    };

    let years = cols.get::<Int64Array>(columns::YEAR)?;
    let states = cols.get::<StringArray>(columns::STATE)?;
    let magnitudes = cols.get::<Int64Array>(columns::MAGNITUDE)?;
    let slat = cols.get::<Float64Array>(columns::START_LAT)?;
    let slon = cols.get::<Float64Array>(columns::START_LON)?;
    let elat = cols.get::<Float64Array>(columns::END_LAT)?;
    let elon = cols.get::<Float64Array>(columns::END_LON)?;
    let injuries = cols.get::<Int64Array>(columns::INJURIES)?;
    let fatalities = cols.get::<Int64Array>(columns::FATALITIES)?;
    let dates = cols.get::<Date32Array>(columns::DATE)?;

    let point = |lon: &Float64Array, lat: &Float64Array, row: usize| {
        GeoPoint::new(
            opt_f64(lon, row).unwrap_or(0.0),
            opt_f64(lat, row).unwrap_or(0.0),
        )
    };

    (0..cols.batch.num_rows())
        .map(|row| {
            let year = opt_i64(years, row)
                .ok_or_else(|| cols.missing_value(columns::YEAR, row))
                .and_then(|y| cols.narrow(columns::YEAR, row, y))?;
            let state = states
                .is_valid(row)
                .then(|| StateCode::new(states.value(row)))
                .ok_or_else(|| cols.missing_value(columns::STATE, row))?;
            let magnitude = match opt_i64(magnitudes, row) {
                Some(m) => cols.narrow(columns::MAGNITUDE, row, m)?,
                None => UNKNOWN_MAGNITUDE,
            };

            Ok(TornadoEvent {
                year,
                state,
                magnitude,
                start: point(slon, slat, row),
                end: point(elon, elat, row),
                injuries: cols.count(injuries, columns::INJURIES, row)?,
                fatalities: cols.count(fatalities, columns::FATALITIES, row)?,
                date: date(dates, row),
            })
        })
        .collect()
}

/// Decode the state area table. Rows without a state or area are dropped.
pub fn decode_areas(source: &dyn DataSource) -> Result<Vec<StateAreaFact>, DataError> {
    let cols = Columns {
        batch: source.record_batch(),
        source_name: source.source_name(),
    };

    let state = cols.get::<StringArray>(columns::AREA_STATE)?;
    let square_miles = cols.get::<Float64Array>(columns::SQUARE_MILES)?;

    let facts = (0..cols.batch.num_rows())
        .filter_map(|row| {
            let area = opt_f64(square_miles, row)?;
            state.is_valid(row).then(|| StateAreaFact {
                state: StateCode::new(state.value(row)),
                square_miles: area,
            })
        })
        .collect();

    Ok(facts)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use arrow::array::ArrayRef;

    use super::*;
    use crate::schema::{area_schema, event_schema};

    struct BatchSource(RecordBatch);

    impl DataSource for BatchSource {
        fn schema(&self) -> arrow::datatypes::SchemaRef {
            self.0.schema()
        }

        fn record_batch(&self) -> &RecordBatch {
            &self.0
        }

        fn source_name(&self) -> &str {
            "memory"
        }
    }

    fn event_batch(years: Vec<Option<i64>>, mags: Vec<Option<i64>>) -> RecordBatch {
        let n = years.len();
        event_batch_with_counts(years, mags, vec![Some(5); n], vec![None; n])
    }

    fn event_batch_with_counts(
        years: Vec<Option<i64>>,
        mags: Vec<Option<i64>>,
        injuries: Vec<Option<i64>>,
        fatalities: Vec<Option<i64>>,
    ) -> RecordBatch {
        let n = years.len();
        let columns: Vec<ArrayRef> = vec![
            Arc::new(Int64Array::from(years)),
            Arc::new(StringArray::from(vec![Some("tx"); n])),
            Arc::new(Int64Array::from(mags)),
            Arc::new(Float64Array::from(vec![Some(32.0); n])),
            Arc::new(Float64Array::from(vec![Some(-97.0); n])),
            Arc::new(Float64Array::from(vec![None::<f64>; n])),
            Arc::new(Float64Array::from(vec![Some(0.0); n])),
            Arc::new(Int64Array::from(injuries)),
            Arc::new(Int64Array::from(fatalities)),
            Arc::new(Date32Array::from(vec![Some(14_610); n])),
        ];
        RecordBatch::try_new(event_schema(), columns).unwrap()
    }

    #[test]
    fn test_decode_events_defaults() {
        let source = BatchSource(event_batch(vec![Some(2010)], vec![None]));
        let events = decode_events(&source).unwrap();
        assert_eq!(events.len(), 1);

        let ev = &events[0];
        assert_eq!(ev.year, 2010);
        assert_eq!(ev.state.as_str(), "TX");
        assert_eq!(ev.magnitude, UNKNOWN_MAGNITUDE);
        assert_eq!(ev.start, GeoPoint::new(-97.0, 32.0));
        assert!(!ev.end.is_present());
        assert_eq!(ev.injuries, 5);
        assert_eq!(ev.fatalities, 0);
        assert_eq!(ev.date, NaiveDate::from_ymd_opt(2010, 1, 1));
    }

    #[test]
    fn test_missing_year_is_fatal() {
        let source = BatchSource(event_batch(vec![Some(2010), None], vec![Some(1), Some(2)]));
        let err = decode_events(&source).unwrap_err();
        assert!(matches!(err, DataError::InvalidValue { row: 2, .. }));
    }

    fn invalid_column(err: DataError) -> (String, String) {
        match err {
            DataError::InvalidValue { column, value, .. } => (column, value),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_oversized_magnitude_is_fatal() {
        let source = BatchSource(event_batch(vec![Some(2010)], vec![Some(99_999_999_999)]));
        let err = decode_events(&source).unwrap_err();
        assert_eq!(invalid_column(err), ("mag".to_string(), "99999999999".to_string()));
    }

    #[test]
    fn test_oversized_year_is_fatal() {
        let source = BatchSource(event_batch(vec![Some(i64::MAX)], vec![Some(1)]));
        let (column, _) = invalid_column(decode_events(&source).unwrap_err());
        assert_eq!(column, "yr");
    }

    #[test]
    fn test_negative_injuries_are_fatal() {
        let source = BatchSource(event_batch_with_counts(
            vec![Some(2010)],
            vec![Some(1)],
            vec![Some(-3)],
            vec![Some(0)],
        ));
        let err = decode_events(&source).unwrap_err();
        assert_eq!(invalid_column(err), ("inj".to_string(), "-3".to_string()));
    }

    #[test]
    fn test_oversized_fatalities_are_fatal() {
        let source = BatchSource(event_batch_with_counts(
            vec![Some(2010)],
            vec![Some(1)],
            vec![None],
            vec![Some(u32::MAX as i64 + 1)],
        ));
        let (column, _) = invalid_column(decode_events(&source).unwrap_err());
        assert_eq!(column, "fat");
    }

    #[test]
    fn test_decode_areas_skips_incomplete_rows() {
        let columns: Vec<ArrayRef> = vec![
            Arc::new(StringArray::from(vec![Some("TX"), None, Some("RI")])),
            Arc::new(Float64Array::from(vec![Some(268_596.0), Some(1.0), None])),
        ];
        let batch = RecordBatch::try_new(area_schema(), columns).unwrap();
        let facts = decode_areas(&BatchSource(batch)).unwrap();
        assert_eq!(facts.len(), 1);
        assert_eq!(facts[0].state.as_str(), "TX");
    }
}
