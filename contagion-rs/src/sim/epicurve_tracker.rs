use super::{Health, Population, Reporter, Snapshot};
use crate::{params::Params, prelude::Real, utils::plot_vbars};
use serde::Serialize;
use std::path::Path;

const N: usize = Health::CARDINALITY;

/// Time series with the number of agents in each health state, one row per
/// step.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct EpicurveTracker {
    size: usize,
    data: [Vec<usize>; N],
}

#[derive(Serialize)]
struct EpicurveRow {
    step: usize,
    healthy: usize,
    infected: usize,
}

impl EpicurveTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a row of per-state counts.
    pub fn push(&mut self, counts: [usize; N]) {
        for (col, &x) in self.data.iter_mut().zip(counts.iter()) {
            col.push(x);
        }
        self.size += 1;
    }

    /// Count elements in each state of population and append as a new row.
    pub fn update(&mut self, population: &Population) {
        self.push(population.count_by_state())
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.size
    }

    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Return the i-th row.
    pub fn row(&self, i: usize) -> Option<[usize; N]> {
        if i >= self.size {
            return None;
        }
        let mut out = [0; N];
        for (k, vec) in self.data.iter().enumerate() {
            out[k] = vec[i];
        }
        Some(out)
    }

    /// Return the i-th column.
    pub fn col(&self, i: usize) -> Option<&[usize]> {
        self.data.get(i).map(|ptr| ptr.as_slice())
    }

    /// Column for the given state.
    pub fn curve(&self, state: Health) -> &[usize] {
        &self.data[state.index()]
    }

    /// Return the last row or an array of zeros.
    pub fn tip(&self) -> [usize; N] {
        self.size
            .checked_sub(1)
            .and_then(|i| self.row(i))
            .unwrap_or([0; N])
    }

    /// Render epicurves as CSV data, one line per row preceded by a header.
    pub fn render_csv(&self, sep: char) -> String {
        let mut data = String::from("step");
        for name in Health::CSV_HEADER.split(',') {
            data.push(sep);
            data.push_str(name);
        }
        for i in 0..self.size {
            data.push('\n');
            data.push_str(&i.to_string());
            for col in self.data.iter() {
                data.push(sep);
                data.push_str(&col[i].to_string());
            }
        }
        data
    }

    /// Write epicurves to a CSV file.
    pub fn write_csv<P: AsRef<Path>>(&self, path: P) -> csv::Result<()> {
        let mut writer = csv::Writer::from_path(path)?;
        for step in 0..self.size {
            writer.serialize(EpicurveRow {
                step,
                healthy: self.data[Health::Healthy.index()][step],
                infected: self.data[Health::Infected.index()][step],
            })?;
        }
        writer.flush()?;
        Ok(())
    }

    /// Chart of both curves with at most `width` columns. Healthy counts are
    /// drawn with '.', infected with '#'.
    pub fn render_ascii(&self, width: usize, height: usize) -> String {
        let healthy: Vec<Real> = self.curve(Health::Healthy).iter().map(|&x| x as Real).collect();
        let infected: Vec<Real> = self.curve(Health::Infected).iter().map(|&x| x as Real).collect();
        plot_vbars(
            &[(infected.as_slice(), '#'), (healthy.as_slice(), '.')],
            width,
            height,
        )
    }
}

impl Reporter for EpicurveTracker {
    fn process(&mut self, _params: &Params, snapshot: &Snapshot) {
        self.push(snapshot.counts());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tracker() -> EpicurveTracker {
        let mut tracker = EpicurveTracker::new();
        tracker.push([9, 1]);
        tracker.push([8, 3]);
        tracker.push([5, 4]);
        tracker
    }

    #[test]
    fn rows_and_columns() {
        let tracker = tracker();
        assert_eq!(tracker.len(), 3);
        assert_eq!(tracker.row(1), Some([8, 3]));
        assert_eq!(tracker.row(3), None);
        assert_eq!(tracker.col(1), Some(&[1, 3, 4][..]));
        assert_eq!(tracker.curve(Health::Healthy), &[9, 8, 5]);
        assert_eq!(tracker.tip(), [5, 4]);
        assert_eq!(EpicurveTracker::new().tip(), [0, 0]);
    }

    #[test]
    fn csv_rendering() {
        let csv = tracker().render_csv(',');
        assert_eq!(csv, "step,healthy,infected\n0,9,1\n1,8,3\n2,5,4");
    }

    #[test]
    fn csv_file_matches_rendering() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("epicurve.csv");
        tracker().write_csv(&path).unwrap();
        let data = std::fs::read_to_string(&path).unwrap();
        assert_eq!(data.trim_end(), tracker().render_csv(','));
    }

    #[test]
    fn ascii_chart_has_requested_height() {
        let chart = tracker().render_ascii(80, 6);
        assert_eq!(chart.lines().count(), 7);
        assert!(chart.contains('#'));
        assert!(chart.contains('.'));
    }
}
