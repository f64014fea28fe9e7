//! Time-axis resampling.
//!
//! Source rows sit at positions `0..src_len`; target row `k` sits at
//! `k * (src_len - 1) / (target_len - 1)`, so both endpoints are kept. Each
//! column is interpolated linearly on that shared time base.

use ndarray::{Array2, ArrayView2, Zip};

/// Linear interpolation indices and fractional weights for resampling
/// `src_len` rows to `target_len` rows.
///
/// Row `k` of the output is `src[i0] + (src[i1] - src[i0]) * frac`.
/// Positions are computed in `f64` so that integer positions come out
/// exact.
pub fn interp_weights(src_len: usize, target_len: usize) -> Vec<(usize, usize, f64)> {
    if src_len == 0 {
        return Vec::new();
    }

    (0..target_len)
        .map(|k| {
            let pos = if target_len == 1 {
                0.0
            } else {
                (k * (src_len - 1)) as f64 / (target_len - 1) as f64
            };

            let i0 = (pos.floor() as usize).min(src_len - 1);
            let i1 = (i0 + 1).min(src_len - 1);
            let frac = pos - i0 as f64;

            (i0, i1, frac)
        })
        .collect()
}

/// Resample the rows of `input` to `target_len` rows.
///
/// A single source row is repeated. An empty input yields zeros.
pub fn resample_time(input: ArrayView2<'_, f32>, target_len: usize) -> Array2<f32> {
    let (src_len, cols) = input.dim();
    let mut out = Array2::zeros((target_len, cols));
    if src_len == 0 {
        return out;
    }

    for (k, (i0, i1, frac)) in interp_weights(src_len, target_len).into_iter().enumerate() {
        let mut dst = out.row_mut(k);
        let a = input.row(i0);

        if frac == 0.0 || i0 == i1 {
            dst.assign(&a);
            continue;
        }

        let b = input.row(i1);
        Zip::from(&mut dst).and(&a).and(&b).for_each(|d, &x0, &x1| {
            let (x0, x1) = (f64::from(x0), f64::from(x1));
            *d = (x0 + (x1 - x0) * frac) as f32;
        });
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::Array2;

    #[test]
    fn test_weights_identity() {
        for (k, (i0, i1, frac)) in interp_weights(5, 5).into_iter().enumerate() {
            assert_eq!(i0, k);
            assert_eq!(frac, 0.0);
            assert!(i1 == k + 1 || i1 == 4);
        }
    }

    #[test]
    fn test_weights_endpoints() {
        let w = interp_weights(120, 60);
        assert_eq!(w[0], (0, 1, 0.0));
        assert_eq!(w[59].0, 119);
        assert_eq!(w[59].2, 0.0);
    }

    #[test]
    fn test_upsample_midpoints() {
        let input = Array2::from_shape_vec((2, 1), vec![0.0f32, 1.0]).unwrap();
        let out = resample_time(input.view(), 5);

        let col: Vec<f32> = out.column(0).to_vec();
        assert_eq!(col, vec![0.0, 0.25, 0.5, 0.75, 1.0]);
    }

    #[test]
    fn test_single_row_repeats() {
        let input = Array2::from_shape_vec((1, 3), vec![0.1f32, 0.2, 0.3]).unwrap();
        let out = resample_time(input.view(), 60);

        assert_eq!(out.dim(), (60, 3));
        for row in out.rows() {
            assert_eq!(row.to_vec(), vec![0.1, 0.2, 0.3]);
        }
    }

    #[test]
    fn test_identity_is_exact() {
        let input = Array2::from_shape_fn((60, 4), |(t, c)| (t as f32).sin() * (c as f32 + 0.3));
        let out = resample_time(input.view(), 60);
        assert_eq!(out, input);
    }

    #[test]
    fn test_constant_signal_preserved() {
        let input = Array2::from_elem((120, 2), 0.37f32);
        let out = resample_time(input.view(), 60);
        assert!(out.iter().all(|&v| v == 0.37));
    }

    #[test]
    fn test_empty_input() {
        let input = Array2::<f32>::zeros((0, 4));
        let out = resample_time(input.view(), 6);
        assert_eq!(out.dim(), (6, 4));
        assert!(out.iter().all(|&v| v == 0.0));
    }

    #[test]
    fn test_target_one_takes_first_row() {
        let input = Array2::from_shape_vec((3, 1), vec![5.0f32, 6.0, 7.0]).unwrap();
        let out = resample_time(input.view(), 1);
        assert_eq!(out[[0, 0]], 5.0);
    }
}
