use crate::prelude::Real;

/// ASCII plot of one or more sequences of positive values sharing the same
/// vertical scale.
///
/// Each point is drawn as a column filled with the curve's mark up to its
/// height. When several curves reach the same cell, the first curve in
/// `curves` wins. Sequences longer than `width` are resampled to `width`
/// columns.
pub fn plot_vbars(curves: &[(&[Real], char)], width: usize, height: usize) -> String {
    let curves: Vec<(Vec<Real>, char)> = curves
        .iter()
        .map(|(values, mark)| (resample(values, width), *mark))
        .collect();
    let max = curves
        .iter()
        .flat_map(|(values, _)| values.iter().cloned())
        .fold(0.0, Real::max);
    let columns = curves.iter().map(|(v, _)| v.len()).max().unwrap_or(0);
    if columns == 0 || height == 0 || max <= 0.0 {
        return String::new();
    }
    let step = max / height as Real;

    let mut out = String::with_capacity((columns + 1) * (height + 1));
    for i in 0..height {
        let h = (height - i) as Real * step;
        let mut ln = String::with_capacity(columns);
        for col in 0..columns {
            let mark = curves
                .iter()
                .find(|(values, _)| values.get(col).map_or(false, |&x| x >= h))
                .map_or(' ', |(_, mark)| *mark);
            ln.push(mark);
        }
        out.push_str(ln.trim_end());
        out.push('\n');
    }
    out.extend(std::iter::repeat('-').take(columns));
    out
}

/// Pick `width` evenly spaced samples from values. Short sequences are
/// returned unchanged.
pub fn resample(values: &[Real], width: usize) -> Vec<Real> {
    if width == 0 || values.len() <= width {
        return values.to_vec();
    }
    let last = (values.len() - 1) as Real;
    let denom = (width - 1).max(1) as Real;
    (0..width)
        .map(|i| values[((i as Real) * last / denom).round() as usize])
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn draws_columns_up_to_value() {
        let values = [1.0, 2.0, 4.0];
        let plot = plot_vbars(&[(&values[..], '*')], 10, 4);
        let lines: Vec<&str> = plot.lines().collect();
        assert_eq!(lines, vec!["  *", "  *", " **", "***", "---"]);
    }

    #[test]
    fn first_curve_wins_overlaps() {
        let a = [2.0, 2.0];
        let b = [1.0, 2.0];
        let plot = plot_vbars(&[(&b[..], 'b'), (&a[..], 'a')], 10, 2);
        let lines: Vec<&str> = plot.lines().collect();
        assert_eq!(lines, vec!["ab", "bb", "--"]);
    }

    #[test]
    fn empty_input_draws_nothing() {
        let empty: [Real; 0] = [];
        let zeros = [0.0, 0.0];
        assert_eq!(plot_vbars(&[(&empty[..], '*')], 10, 5), "");
        assert_eq!(plot_vbars(&[(&zeros[..], '*')], 10, 5), "");
    }

    #[test]
    fn resample_keeps_endpoints() {
        let values: Vec<Real> = (0..100).map(|x| x as Real).collect();
        let out = resample(&values, 5);
        assert_eq!(out.len(), 5);
        assert_eq!(out[0], 0.0);
        assert_eq!(out[4], 99.0);
        assert_eq!(resample(&values[..3], 5), vec![0.0, 1.0, 2.0]);
    }
}
