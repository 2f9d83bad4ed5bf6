use ndarray::{ArrayView3, Axis};

use crate::color::{Bgr, SENTINEL_COLOR};
use crate::math;

/// Mean color of the pixels that are not exactly black, rounded per channel.
///
/// Returns [`SENTINEL_COLOR`] when every pixel is black, including the empty image.
pub fn mean_color(img: ArrayView3<'_, u8>) -> Bgr {
    let mut sum = [0u64; 3];
    let mut count = 0u64;

    for px in img.lanes(Axis(2)) {
        if px.iter().all(|&c| c == 0) {
            continue;
        }

        for (s, &c) in sum.iter_mut().zip(px.iter()) {
            *s += c as u64;
        }
        count += 1;
    }

    if count == 0 {
        return SENTINEL_COLOR;
    }

    let n = count as f64;
    math::to_color(&[sum[0] as f64 / n, sum[1] as f64 / n, sum[2] as f64 / n])
}
