//! Column-to-row alignment of Open-Meteo time series.

use std::collections::HashMap;

use serde_json::Value;

use crate::models::RawSeries;

/// One row of an aligned series: the timestamp plus the value each requested
/// column held at the same position.
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesRecord {
    pub time: String,
    values: HashMap<String, Value>,
}

impl SeriesRecord {
    /// Raw value for `field`, `None` when the column was short or absent.
    pub fn value(&self, field: &str) -> Option<&Value> {
        self.values.get(field).filter(|v| !v.is_null())
    }

    pub fn number(&self, field: &str) -> Option<f64> {
        self.value(field).and_then(Value::as_f64)
    }

    pub fn integer(&self, field: &str) -> Option<i64> {
        self.value(field).and_then(as_integer)
    }

    pub fn text(&self, field: &str) -> Option<String> {
        self.value(field).and_then(Value::as_str).map(str::to_string)
    }
}

/// Reads an integral value that upstream may encode as `2` or `2.0`.
pub fn as_integer(value: &Value) -> Option<i64> {
    value.as_i64().or_else(|| value.as_f64().map(|f| f as i64))
}

/// Produces one record per entry of `time`, picking position `i` from each
/// of `fields`. Short or missing columns yield unknown values; surplus
/// column entries are ignored. Input order is preserved.
pub fn align(
    time: &[String],
    columns: &HashMap<String, Value>,
    fields: &[&str],
) -> Vec<SeriesRecord> {
    let picked: Vec<(&str, &[Value])> = fields
        .iter()
        .map(|field| {
            let column = columns
                .get(*field)
                .and_then(Value::as_array)
                .map(Vec::as_slice)
                .unwrap_or(&[]);
            (*field, column)
        })
        .collect();

    time.iter()
        .enumerate()
        .map(|(i, t)| SeriesRecord {
            time: t.clone(),
            values: picked
                .iter()
                .filter_map(|(field, column)| column.get(i).map(|v| (field.to_string(), v.clone())))
                .collect(),
        })
        .collect()
}

/// [`align`] over an optional series block; an absent block yields no rows.
pub fn align_series(series: Option<&RawSeries>, fields: &[&str]) -> Vec<SeriesRecord> {
    series
        .map(|s| align(&s.time, &s.columns, fields))
        .unwrap_or_default()
}
