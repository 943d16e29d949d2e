//! Elevation histograms

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::errors::{VectorError, VectorResult};

/// Default number of histogram bins
pub const DEFAULT_BINS: usize = 50;

/// Equal-width histogram of the finite values of an elevation model
#[derive(Debug, Clone, PartialEq)]
pub struct ElevationHistogram {
    /// Lower edge of the first bin
    pub min: f64,
    /// Upper edge of the last bin
    pub max: f64,
    /// Count per bin
    pub counts: Vec<usize>,
    /// Number of finite values counted
    pub count: usize,
    /// Number of NaN or infinite values skipped
    pub missing: usize,
    /// Mean of the counted values
    pub mean: f64,
}

impl ElevationHistogram {
    /// Compute a histogram over `bins` equal-width bins
    ///
    /// Bins span the range of the finite values. Every bin is half-open
    /// except the last, which includes the maximum. When all values are
    /// equal the range is widened to one unit around that value.
    ///
    /// # Errors
    /// `InvalidArgument` if `bins` is zero or no value is finite.
    pub fn compute(values: &[f64], bins: usize) -> VectorResult<Self> {
        if bins == 0 {
            return Err(VectorError::InvalidArgument("Histogram needs at least one bin".to_string()));
        }

        let finite: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
        let missing = values.len() - finite.len();
        if finite.is_empty() {
            return Err(VectorError::InvalidArgument("No finite elevation values".to_string()));
        }

        let mut min = finite.iter().copied().fold(f64::INFINITY, f64::min);
        let mut max = finite.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        if min == max {
            min -= 0.5;
            max += 0.5;
        }

        let width = (max - min) / bins as f64;
        let mut counts = vec![0usize; bins];
        for value in &finite {
            let index = (((value - min) / width) as usize).min(bins - 1);
            counts[index] += 1;
        }

        let mean = finite.iter().sum::<f64>() / finite.len() as f64;

        Ok(ElevationHistogram {
            min,
            max,
            counts,
            count: finite.len(),
            missing,
            mean,
        })
    }

    /// Width of each bin
    pub fn bin_width(&self) -> f64 {
        (self.max - self.min) / self.counts.len() as f64
    }

    /// Bins as (lower edge, upper edge, count)
    pub fn bins(&self) -> Vec<(f64, f64, usize)> {
        let width = self.bin_width();
        self.counts.iter().enumerate()
            .map(|(i, count)| {
                let start = self.min + width * i as f64;
                let end = if i + 1 == self.counts.len() { self.max } else { start + width };
                (start, end, *count)
            })
            .collect()
    }

    /// Save the bins as CSV (`bin_start,bin_end,count`)
    pub fn save_csv<P: AsRef<Path>>(&self, path: P) -> VectorResult<()> {
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);

        writeln!(writer, "bin_start,bin_end,count")?;
        for (start, end, count) in self.bins() {
            writeln!(writer, "{},{},{}", start, end, count)?;
        }

        writer.flush()?;
        Ok(())
    }
}
