use std::path::Path;

use polars::prelude::*;

use crate::constants::data::INFER_SCHEMA_ROWS;
use crate::error::{Result, VizError};

/// DataSource wraps a Polars DataFrame loaded from a CSV or Parquet file
pub struct DataSource {
    df: DataFrame,
}

impl DataSource {
    /// Load data from a file (CSV or Parquet)
    pub fn load(path: &Path) -> Result<Self> {
        let extension = path
            .extension()
            .and_then(|s| s.to_str())
            .ok_or_else(|| VizError::UnsupportedFormat {
                extension: "(none)".to_string(),
            })?;

        let lazy = match extension.to_lowercase().as_str() {
            "parquet" => LazyFrame::scan_parquet(path, Default::default())?,
            "csv" => LazyCsvReader::new(path)
                .with_has_header(true)
                .with_infer_schema_length(Some(INFER_SCHEMA_ROWS))
                .with_try_parse_dates(true)
                .finish()?,
            ext => {
                return Err(VizError::UnsupportedFormat {
                    extension: ext.to_string(),
                });
            }
        };

        Ok(Self {
            df: lazy.collect()?,
        })
    }

    /// Get all column names
    pub fn column_names(&self) -> Vec<String> {
        self.df
            .get_column_names()
            .iter()
            .map(|s| s.to_string())
            .collect()
    }

    /// Get the number of rows
    pub fn height(&self) -> usize {
        self.df.height()
    }

    /// Get the number of columns
    pub fn width(&self) -> usize {
        self.df.width()
    }

    /// Indices of columns eligible for chart axes: numeric (or datetime,
    /// coerced to timestamps) and not literally named "year"
    pub fn numeric_columns(&self) -> Vec<usize> {
        self.df
            .get_columns()
            .iter()
            .enumerate()
            .filter(|(_, col)| {
                is_chartable_dtype(col.dtype()) && !col.name().eq_ignore_ascii_case("year")
            })
            .map(|(idx, _)| idx)
            .collect()
    }

    /// Check if a column is a datetime or date type
    pub fn is_datetime_column(&self, col_idx: usize) -> bool {
        self.df
            .get_columns()
            .get(col_idx)
            .map(|col| matches!(col.dtype(), DataType::Datetime(_, _) | DataType::Date))
            .unwrap_or(false)
    }

    fn series_at(&self, col_idx: usize) -> Result<Series> {
        self.df
            .get_columns()
            .get(col_idx)
            .map(|col| col.as_materialized_series().clone())
            .ok_or(VizError::InvalidColumnIndex {
                index: col_idx,
                max: self.width().saturating_sub(1),
            })
    }

    /// Get a column's numeric values as Vec<f64>
    /// Non-numeric values are converted to NaN
    /// Datetime/Date columns are converted to Unix timestamps (seconds since epoch)
    pub fn column_as_f64(&self, col_idx: usize) -> Result<Vec<f64>> {
        let series = self.series_at(col_idx)?;

        match series.dtype() {
            DataType::Datetime(_, _) => {
                let timestamps = series
                    .datetime()?
                    .into_iter()
                    .map(|opt| opt.map(|ts| ts as f64 / 1_000_000.0).unwrap_or(f64::NAN))
                    .collect();
                return Ok(timestamps);
            }
            DataType::Date => {
                let timestamps = series
                    .date()?
                    .into_iter()
                    .map(|opt| opt.map(|days| days as f64 * 86400.0).unwrap_or(f64::NAN))
                    .collect();
                return Ok(timestamps);
            }
            _ => {}
        }

        match series.cast(&DataType::Float64) {
            Ok(s) => Ok(s
                .f64()?
                .into_iter()
                .map(|opt| opt.unwrap_or(f64::NAN))
                .collect()),
            Err(_) => {
                // For string columns, try to parse each cell as f64
                if let Ok(str_series) = series.str() {
                    Ok(str_series
                        .into_iter()
                        .map(|opt| {
                            opt.and_then(|s| s.trim().parse::<f64>().ok())
                                .unwrap_or(f64::NAN)
                        })
                        .collect())
                } else {
                    Ok(vec![f64::NAN; series.len()])
                }
            }
        }
    }

    /// Get a column's values rendered as strings (for strata keys, tooltips,
    /// and the data table)
    pub fn column_as_string(&self, col_idx: usize) -> Result<Vec<String>> {
        let series = self.series_at(col_idx)?;

        if let Ok(str_series) = series.str() {
            return Ok(str_series
                .into_iter()
                .map(|opt| opt.unwrap_or("").to_string())
                .collect());
        }

        let n = series.len();
        let mut result = Vec::with_capacity(n);
        let rechunked = series.rechunk();

        if let Ok(ca) = rechunked.f64() {
            for i in 0..n {
                result.push(ca.get(i).map(|v| v.to_string()).unwrap_or_default());
            }
        } else if let Ok(ca) = rechunked.i64() {
            for i in 0..n {
                result.push(ca.get(i).map(|v| v.to_string()).unwrap_or_default());
            }
        } else if let Ok(ca) = rechunked.bool() {
            for i in 0..n {
                result.push(ca.get(i).map(|v| v.to_string()).unwrap_or_default());
            }
        } else {
            let str_series = rechunked.cast(&DataType::String)?;
            let ca = str_series.str()?;
            for i in 0..n {
                result.push(ca.get(i).unwrap_or("").to_string());
            }
        }

        Ok(result)
    }

    /// Count NaN-producing cells per column after numeric coercion.
    /// Only chartable columns are inspected; others report zero.
    pub fn nan_counts(&self) -> Vec<usize> {
        let numeric: std::collections::HashSet<usize> =
            self.numeric_columns().into_iter().collect();
        (0..self.width())
            .map(|idx| {
                if !numeric.contains(&idx) {
                    return 0;
                }
                self.column_as_f64(idx)
                    .map(|vals| vals.iter().filter(|v| v.is_nan()).count())
                    .unwrap_or(0)
            })
            .collect()
    }
}

fn is_chartable_dtype(dtype: &DataType) -> bool {
    matches!(
        dtype,
        DataType::Int8
            | DataType::Int16
            | DataType::Int32
            | DataType::Int64
            | DataType::UInt8
            | DataType::UInt16
            | DataType::UInt32
            | DataType::UInt64
            | DataType::Float32
            | DataType::Float64
            | DataType::Datetime(_, _)
            | DataType::Date
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::Builder;

    fn write_csv(lines: &[&str]) -> tempfile::NamedTempFile {
        let mut file = Builder::new().suffix(".csv").tempfile().unwrap();
        for line in lines {
            writeln!(file, "{}", line).unwrap();
        }
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_csv_loading() {
        let file = write_csv(&["x,y,z", "1,2,3", "4,5,6", "7,8,9"]);
        let ds = DataSource::load(file.path()).unwrap();

        assert_eq!(ds.height(), 3);
        assert_eq!(ds.width(), 3);
        assert_eq!(ds.column_names(), vec!["x", "y", "z"]);

        let col_x = ds.column_as_f64(0).unwrap();
        assert_eq!(col_x, vec![1.0, 4.0, 7.0]);
    }

    #[test]
    fn test_numeric_columns_exclude_year() {
        let file = write_csv(&[
            "year,goals,team",
            "2020,13,Leeds",
            "2021,21,Leeds",
            "2022,8,Derby",
        ]);
        let ds = DataSource::load(file.path()).unwrap();

        // "year" is numeric but excluded; "team" is not numeric
        assert_eq!(ds.numeric_columns(), vec![1]);
    }

    #[test]
    fn test_non_numeric_cells_become_nan() {
        let file = write_csv(&["a,b", "1,x", "2,y"]);
        let ds = DataSource::load(file.path()).unwrap();

        let col_b = ds.column_as_f64(1).unwrap();
        assert_eq!(col_b.len(), 2);
        assert!(col_b.iter().all(|v| v.is_nan()));
    }

    #[test]
    fn test_column_as_string_for_strata() {
        let file = write_csv(&["team,score", "Leeds,3", "Derby,1", "Leeds,2"]);
        let ds = DataSource::load(file.path()).unwrap();

        let teams = ds.column_as_string(0).unwrap();
        assert_eq!(teams, vec!["Leeds", "Derby", "Leeds"]);

        // Numeric columns stringify too
        let scores = ds.column_as_string(1).unwrap();
        assert_eq!(scores, vec!["3", "1", "2"]);
    }

    #[test]
    fn test_datetime_column_to_timestamps() {
        let file = write_csv(&[
            "date,value",
            "2024-01-01,10.5",
            "2024-01-02,15.3",
            "2024-01-03,12.8",
        ]);
        let ds = DataSource::load(file.path()).unwrap();

        assert!(ds.is_datetime_column(0));

        let timestamps = ds.column_as_f64(0).unwrap();
        let start_ts = 1704067200.0; // 2024-01-01 00:00:00 UTC
        let end_ts = 1704326400.0; // 2024-01-04 00:00:00 UTC
        for &ts in &timestamps {
            assert!(ts >= start_ts && ts <= end_ts);
        }
    }

    #[test]
    fn test_unsupported_extension() {
        let file = Builder::new().suffix(".txt").tempfile().unwrap();
        assert!(matches!(
            DataSource::load(file.path()),
            Err(VizError::UnsupportedFormat { .. })
        ));
    }

    #[test]
    fn test_invalid_column_index() {
        let file = write_csv(&["a", "1"]);
        let ds = DataSource::load(file.path()).unwrap();
        assert!(matches!(
            ds.column_as_f64(5),
            Err(VizError::InvalidColumnIndex { .. })
        ));
    }
}
