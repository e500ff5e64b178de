//! Fixed schemas of the input tables

use std::sync::Arc;

use ahash::AHashMap;
use arrow::datatypes::{DataType, Field, Schema, SchemaRef};

/// Column names of the event table
pub mod columns {
    pub const YEAR: &str = "yr";
    pub const STATE: &str = "st";
    pub const MAGNITUDE: &str = "mag";
    pub const START_LAT: &str = "slat";
    pub const START_LON: &str = "slon";
    pub const END_LAT: &str = "elat";
    pub const END_LON: &str = "elon";
    pub const INJURIES: &str = "inj";
    pub const FATALITIES: &str = "fat";
    pub const DATE: &str = "date";

    pub const AREA_STATE: &str = "st";
    pub const SQUARE_MILES: &str = "square_miles";
}

/// Columns that may be absent from a file; they load as all-null
const OPTIONAL_COLUMNS: &[&str] = &[columns::DATE];

/// Schema of the tornado event table
pub fn event_schema() -> SchemaRef {
    Arc::new(Schema::new(vec![
        Field::new(columns::YEAR, DataType::Int64, true),
        Field::new(columns::STATE, DataType::Utf8, true),
        Field::new(columns::MAGNITUDE, DataType::Int64, true),
        Field::new(columns::START_LAT, DataType::Float64, true),
        Field::new(columns::START_LON, DataType::Float64, true),
        Field::new(columns::END_LAT, DataType::Float64, true),
        Field::new(columns::END_LON, DataType::Float64, true),
        Field::new(columns::INJURIES, DataType::Int64, true),
        Field::new(columns::FATALITIES, DataType::Int64, true),
        Field::new(columns::DATE, DataType::Date32, true),
    ]))
}

/// Schema of the state area table
pub fn area_schema() -> SchemaRef {
    Arc::new(Schema::new(vec![
        Field::new(columns::AREA_STATE, DataType::Utf8, true),
        Field::new(columns::SQUARE_MILES, DataType::Float64, true),
    ]))
}

pub fn is_optional(column: &str) -> bool {
    OPTIONAL_COLUMNS.contains(&column)
}

/// Map each schema field to its position in the file header.
///
/// Returns `Err(column)` naming the first required column the header lacks.
/// Extra header columns are ignored; a repeated header resolves to its
/// first occurrence.
pub fn resolve_columns(schema: &Schema, headers: &[String]) -> Result<Vec<Option<usize>>, String> {
    let mut positions: AHashMap<&str, usize> = AHashMap::with_capacity(headers.len());
    for (idx, header) in headers.iter().enumerate() {
        positions.entry(header.trim()).or_insert(idx);
    }

    schema
        .fields()
        .iter()
        .map(|field| {
            match positions.get(field.name().as_str()).copied() {
                Some(idx) => Ok(Some(idx)),
                None if is_optional(field.name()) => Ok(None),
                None => Err(field.name().clone()),
            }
        })
        .collect()
}
