use std::fs::File;
use std::io::Read;
use std::path::Path;

use ndarray::{Array1, ArrayView1};

use crate::error::{check_pairs, Result};
use crate::stats::AxisStats;

#[derive(Debug, serde::Deserialize)]
struct Record {
    x: f64,
    y: f64,
}

/// Paired samples `(x_i, y_i)`, at least two of them.
#[derive(Debug, Clone, PartialEq)]
pub struct SampleSet {
    x: Array1<f64>,
    y: Array1<f64>,
}

impl SampleSet {
    pub fn new(x: Array1<f64>, y: Array1<f64>) -> Result<SampleSet> {
        check_pairs(x.len(), y.len(), 2)?;

        Ok(SampleSet { x, y })
    }

    pub fn from_pairs(pairs: impl IntoIterator<Item = (f64, f64)>) -> Result<SampleSet> {
        let (x, y): (Vec<f64>, Vec<f64>) = pairs.into_iter().unzip();

        SampleSet::new(Array1::from(x), Array1::from(y))
    }

    /// Reads a CSV with an `x,y` header.
    pub fn from_csv_reader<R: Read>(reader: R) -> Result<SampleSet> {
        let records = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader)
            .deserialize()
            .collect::<std::result::Result<Vec<Record>, _>>()?;

        SampleSet::from_pairs(records.into_iter().map(|Record { x, y }| (x, y)))
    }

    pub fn from_csv_path<P: AsRef<Path>>(path: P) -> Result<SampleSet> {
        SampleSet::from_csv_reader(File::open(path)?)
    }

    pub fn x(&self) -> ArrayView1<f64> {
        self.x.view()
    }

    pub fn y(&self) -> ArrayView1<f64> {
        self.y.view()
    }

    pub fn len(&self) -> usize {
        self.x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    pub fn stats(&self) -> Result<(AxisStats, AxisStats)> {
        Ok((AxisStats::of(self.x())?, AxisStats::of(self.y())?))
    }
}
