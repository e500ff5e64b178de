use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use arrow::array::*;
use arrow::datatypes::{DataType, SchemaRef};
use arrow::record_batch::RecordBatch;
use chrono::NaiveDate;
use csv::ReaderBuilder;
use tracing::debug;

use crate::config::NullConfig;
use crate::schema::resolve_columns;
use crate::DataError;

/// Date layouts accepted in date columns
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%m/%d/%Y", "%Y/%m/%d"];

/// CSV table read fully into memory against a fixed schema
pub struct CsvSource {
    /// Path to the CSV file
    path: PathBuf,
    /// File name used in messages
    name: String,
    /// All rows of the file
    batch: RecordBatch,
}

impl CsvSource {
    /// Read a CSV file, keeping the columns named in `schema`.
    ///
    /// Cells matching `null_config` load as nulls. A header missing a
    /// required column, or a cell that does not parse as its column's
    /// type, fails the whole load.
    pub fn open(path: &Path, schema: SchemaRef, null_config: &NullConfig) -> Result<Self, DataError> {
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("unknown.csv")
            .to_string();

        let file = File::open(path)?;
        let reader = BufReader::new(file);
        let mut csv_reader = ReaderBuilder::new()
            .has_headers(true)
            .from_reader(reader);

        let headers: Vec<String> = csv_reader.headers()?.iter().map(|s| s.to_string()).collect();
        let positions = resolve_columns(&schema, &headers).map_err(|column| DataError::MissingColumn {
            source_name: name.clone(),
            column,
        })?;

        let mut row_data: Vec<csv::StringRecord> = Vec::new();
        for result in csv_reader.records() {
            row_data.push(result?);
        }
        debug!("Read {} rows from {}", row_data.len(), name);

        let mut columns: Vec<ArrayRef> = Vec::with_capacity(schema.fields().len());
        for (field, position) in schema.fields().iter().zip(&positions) {
            let cells = ColumnCells {
                rows: &row_data,
                position: *position,
                null_config,
                source_name: &name,
                column: field.name(),
            };
            columns.push(cells.build(field.data_type())?);
        }

        let batch = RecordBatch::try_new(schema, columns)?;

        Ok(Self {
            path: path.to_path_buf(),
            name,
            batch,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// One column's raw cells, ready to be typed
struct ColumnCells<'a> {
    rows: &'a [csv::StringRecord],
    /// Header position, `None` for an absent optional column
    position: Option<usize>,
    null_config: &'a NullConfig,
    source_name: &'a str,
    column: &'a str,
}

impl ColumnCells<'_> {
    /// Cell text, or `None` when absent or null
    fn cell<'r>(&self, row: &'r csv::StringRecord) -> Option<&'r str> {
        let value = row.get(self.position?)?;
        if self.null_config.is_null(self.column, value) {
            None
        } else {
            Some(value.trim())
        }
    }

    fn parse_each<T>(&self, parse: impl Fn(&str) -> Option<T>) -> Result<Vec<Option<T>>, DataError> {
        self.rows
            .iter()
            .enumerate()
            .map(|(idx, row)| match self.cell(row) {
                None => Ok(None),
                Some(value) => parse(value).map(Some).ok_or_else(|| DataError::InvalidValue {
                    source_name: self.source_name.to_string(),
                    column: self.column.to_string(),
                    row: idx + 1,
                    value: value.to_string(),
                }),
            })
            .collect()
    }

    fn build(&self, data_type: &DataType) -> Result<ArrayRef, DataError> {
        let array: ArrayRef = match data_type {
            DataType::Int64 => {
                let values = self.parse_each(parse_integer)?;
                Arc::new(Int64Array::from(values))
            }
            DataType::Float64 => Arc::new(Float64Array::from(self.parse_each(|v| v.parse::<f64>().ok())?)),
            DataType::Date32 => {
                let values = self.parse_each(|v| parse_date(v).map(days_since_epoch))?;
                Arc::new(Date32Array::from(values))
            }
            _ => {
                let mut builder = StringBuilder::new();
                for row in self.rows {
                    builder.append_option(self.cell(row));
                }
                Arc::new(builder.finish())
            }
        };
        Ok(array)
    }
}

/// Parse an integer cell; whole floats such as "3.0" are accepted
fn parse_integer(value: &str) -> Option<i64> {
    value.parse::<i64>().ok().or_else(|| {
        value
            .parse::<f64>()
            .ok()
            .filter(|f| f.fract() == 0.0 && *f >= i64::MIN as f64 && *f < i64::MAX as f64)
            .map(|f| f as i64)
    })
}

/// Parse a calendar date, ignoring any time-of-day suffix
fn parse_date(value: &str) -> Option<NaiveDate> {
    let date_part = value.split([' ', 'T']).next().unwrap_or(value);
    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(date_part, format).ok())
}

fn days_since_epoch(date: NaiveDate) -> i32 {
    (date - NaiveDate::default()).num_days() as i32
}

impl tv_core::DataSource for CsvSource {
    fn schema(&self) -> SchemaRef {
        self.batch.schema()
    }

    fn record_batch(&self) -> &RecordBatch {
        &self.batch
    }

    fn source_name(&self) -> &str {
        &self.name
    }
}
