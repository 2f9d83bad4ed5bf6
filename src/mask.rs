use ndarray::{Array3, ArrayView3};
use opencv::{
    core::{self, Mat, Scalar},
    imgproc,
    prelude::*,
};

use crate::config::ShirtClassifierConfig;
use crate::error::Error;

/// Inclusive HSV range of background (pitch) pixels, OpenCV 8-bit convention
/// (hue in `[0, 180)`).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GreenBand {
    pub lower: [u8; 3],
    pub upper: [u8; 3],
}

impl Default for GreenBand {
    fn default() -> Self {
        Self {
            lower: [30, 40, 40],
            upper: [80, 255, 255],
        }
    }
}

impl From<&ShirtClassifierConfig> for GreenBand {
    fn from(cfg: &ShirtClassifierConfig) -> Self {
        Self {
            lower: cfg.green_lower,
            upper: cfg.green_upper,
        }
    }
}

fn scalar(v: [u8; 3]) -> Scalar {
    Scalar::new(v[0] as f64, v[1] as f64, v[2] as f64, 0.0)
}

impl GreenBand {
    /// Copy of the BGR `img` with every pixel whose HSV value falls in the band
    /// set to black.
    pub fn suppress(&self, img: ArrayView3<'_, u8>) -> Result<Array3<u8>, Error> {
        let (rows, cols, _) = img.dim();
        if rows == 0 || cols == 0 {
            return Ok(img.to_owned());
        }

        let (rows_i, cols_i) = (rows as i32, cols as i32);
        let data: Vec<u8> = img.iter().copied().collect();
        let bgr = Mat::from_slice(&data)?;
        let bgr = bgr.reshape(3, rows_i)?;

        let mut hsv = Mat::default();
        imgproc::cvt_color(&bgr, &mut hsv, imgproc::COLOR_BGR2HSV, 0)?;

        let mut pitch = Mat::default();
        core::in_range(&hsv, &scalar(self.lower), &scalar(self.upper), &mut pitch)?;

        let mut keep = Mat::default();
        core::bitwise_not(&pitch, &mut keep, &Mat::default())?;

        // masked-out pixels stay at zero
        let zero = Scalar::all(0.0);
        let mut out = Mat::new_rows_cols_with_default(rows_i, cols_i, core::CV_8UC3, zero)?;
        core::bitwise_and(&bgr, &bgr, &mut out, &keep)?;

        Ok(Array3::from_shape_vec((rows, cols, 3), out.data_bytes()?.to_vec())?)
    }
}
