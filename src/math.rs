use nalgebra as na;
use ndarray::{Array2, ArrayView1, ArrayView2, Axis};
use num_traits::Float;

use crate::color::Bgr;

/// Clips a channel to `[0, 255]` and rounds it to the nearest integer.
#[inline]
pub fn clip_round<F: Float>(v: F) -> u8 {
    let lo = F::zero();
    let hi = F::from(255.0).unwrap_or(lo);

    // NaN lands on zero
    let v = if v.is_nan() { lo } else { v.max(lo).min(hi) };

    v.round().to_u8().unwrap_or(0)
}

#[inline]
pub fn to_color<F: Float>(v: &[F]) -> Bgr {
    [clip_round(v[0]), clip_round(v[1]), clip_round(v[2])]
}

#[inline]
pub fn to_point(v: ArrayView1<'_, f32>) -> na::Vector3<f32> {
    na::Vector3::new(v[0], v[1], v[2])
}

/// Channel-wise mean of the rows, `None` for an empty matrix
pub fn mean_rows(samples: ArrayView2<'_, f32>) -> Option<na::Vector3<f32>> {
    let mean = samples.mean_axis(Axis(0))?;

    Some(to_point(mean.view()))
}

/// Stacks colors into an `n x 3` float matrix.
pub fn colors_to_samples(colors: &[Bgr]) -> Array2<f32> {
    Array2::from_shape_fn((colors.len(), 3), |(i, c)| colors[i][c] as f32)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn clip_round_bounds() {
        assert_eq!(clip_round(-3.2f32), 0);
        assert_eq!(clip_round(300.0f32), 255);
        assert_eq!(clip_round(254.6f32), 255);
        assert_eq!(clip_round(12.4f64), 12);
        assert_eq!(clip_round(12.5f32), 13);
        assert_eq!(clip_round(f32::NAN), 0);
    }

    #[test]
    fn mean_of_rows() {
        let m = mean_rows(array![[0.0, 10.0, 20.0], [2.0, 20.0, 40.0]].view()).unwrap();
        approx::assert_relative_eq!(m, na::Vector3::new(1.0, 15.0, 30.0));
    }

    #[test]
    fn mean_of_nothing() {
        let empty = Array2::<f32>::zeros((0, 3));
        assert!(mean_rows(empty.view()).is_none());
    }

    #[test]
    fn samples_layout() {
        let s = colors_to_samples(&[[1, 2, 3], [4, 5, 6]]);
        assert_eq!(s, array![[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]]);
    }
}
