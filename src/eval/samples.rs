//! CSV sample files
//!
//! Files hold one sample per row; in memory samples are columns
//! (`[features, samples]`), the layout the engine trains on.

use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

use ndarray::{Array2, ArrayView2};

use crate::error::{Error, Result};

/// Read samples from CSV, one per row.
///
/// # Errors
///
/// Returns [`Error::Csv`] for malformed or ragged rows and non-numeric
/// fields, and [`Error::EmptyData`] when there are no rows.
pub fn read_samples<R: Read>(reader: R, has_header: bool) -> Result<Array2<f64>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(has_header)
        .trim(csv::Trim::All)
        .from_reader(reader);

    // The reader is not flexible, so ragged rows already fail in `records()`
    let mut values = Vec::new();
    let mut features = None;
    let mut rows = 0usize;
    for (line, record) in reader.records().enumerate() {
        let record = record.map_err(|e| Error::Csv(e.to_string()))?;
        features.get_or_insert(record.len());
        for field in &record {
            let value: f64 = field
                .parse()
                .map_err(|e| Error::Csv(format!("row {}: '{field}': {e}", line + 1)))?;
            values.push(value);
        }
        rows += 1;
    }

    let features = features.unwrap_or(0);
    if rows == 0 || features == 0 {
        return Err(Error::EmptyData("sample file has no rows".to_string()));
    }

    // Rows were read sample-major; transpose to one sample per column
    let by_row = Array2::from_shape_vec((rows, features), values)
        .map_err(|e| Error::Csv(e.to_string()))?;
    Ok(by_row.reversed_axes().as_standard_layout().into_owned())
}

/// Read a CSV sample file.
pub fn load_samples<P: AsRef<Path>>(path: P, has_header: bool) -> Result<Array2<f64>> {
    let path = path.as_ref();
    let samples = read_samples(File::open(path)?, has_header)?;
    tracing::debug!(
        path = %path.display(),
        features = samples.nrows(),
        samples = samples.ncols(),
        "loaded samples"
    );
    Ok(samples)
}

/// Write `[features, samples]` as CSV, one sample per row, no header.
pub fn write_samples<W: Write>(writer: W, samples: ArrayView2<'_, f64>) -> Result<()> {
    let mut writer = csv::Writer::from_writer(writer);
    for sample in samples.columns() {
        writer
            .write_record(sample.iter().map(f64::to_string))
            .map_err(|e| Error::Csv(e.to_string()))?;
    }
    writer.flush()?;
    Ok(())
}
