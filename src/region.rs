use log::warn;
use ndarray::{s, Array3, ArrayView3};

use crate::track::Track;

/// Side of the all-black crop substituted for degenerate boxes
pub const PLACEHOLDER_SIDE: usize = 3;

/// All-black crop standing in for a box with no pixels.
///
/// Every pixel equals the suppression marker, so color reduction maps it to the
/// sentinel color.
#[inline]
pub fn placeholder() -> Array3<u8> {
    Array3::zeros((PLACEHOLDER_SIDE, PLACEHOLDER_SIDE, 3))
}

/// Cuts the track's box out of the frame, clipped to the image.
pub fn crop(image: ArrayView3<'_, u8>, track: &Track) -> Array3<u8> {
    let (rows, cols, _) = image.dim();
    let rect = track.bbox().as_ltrb().to_pixel_rect(cols, rows);

    if rect.is_empty() {
        warn!(
            "degenerate box ({}, {}, {}, {}) in {}x{} image, using placeholder",
            track.x, track.y, track.w, track.h, cols, rows
        );

        return placeholder();
    }

    image
        .slice(s![rect.top..rect.bottom, rect.left..rect.right, ..])
        .to_owned()
}

/// Top half of a crop, rounding the row count up.
pub fn torso(player: ArrayView3<'_, u8>) -> Array3<u8> {
    let rows = (player.dim().0 + 1) / 2;
    let torso = player.slice(s![..rows, .., ..]);

    if torso.is_empty() {
        return placeholder();
    }

    torso.to_owned()
}

/// Torso crop of one track.
#[inline]
pub fn extract(image: ArrayView3<'_, u8>, track: &Track) -> Array3<u8> {
    torso(crop(image, track).view())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gradient(rows: usize, cols: usize) -> Array3<u8> {
        Array3::from_shape_fn((rows, cols, 3), |(y, x, c)| ((y * 7 + x * 3 + c) % 251) as u8)
    }

    #[test]
    fn crop_matches_box() {
        let img = gradient(60, 80);
        let c = crop(img.view(), &Track::new(40.0, 30.0, 10.0, 20.0));

        assert_eq!(c.dim(), (20, 10, 3));
        assert_eq!(c[[0, 0, 0]], img[[20, 35, 0]]);
        assert_eq!(c[[19, 9, 2]], img[[39, 44, 2]]);
    }

    #[test]
    fn boxes_inside_image_give_bounded_crops() {
        let img = gradient(100, 120);

        for &(x, y, w, h) in &[
            (10.0, 10.0, 2.0, 2.0),
            (60.0, 50.0, 40.0, 80.0),
            (5.0, 95.0, 10.0, 10.0),
            (100.0, 20.0, 1.0, 1.0),
            (60.0, 50.0, 120.0, 100.0),
        ] {
            let t = Track::new(x, y, w, h);
            let c = crop(img.view(), &t);
            let (ch, cw, _) = c.dim();

            assert!(ch >= 1 && cw >= 1);
            assert!((ch * cw) as f32 <= t.bbox().area());
        }
    }

    #[test]
    fn outside_box_gives_placeholder() {
        let img = gradient(50, 50);
        let c = crop(img.view(), &Track::new(500.0, 500.0, 10.0, 10.0));

        assert_eq!(c, placeholder());
    }

    #[test]
    fn zero_sized_box_gives_placeholder() {
        let img = gradient(50, 50);
        let c = crop(img.view(), &Track::new(20.0, 20.0, 0.0, 10.0));

        assert_eq!(c, placeholder());
    }

    #[test]
    fn torso_rounds_rows_up() {
        let img = gradient(7, 4);
        let t = torso(img.view());

        assert_eq!(t.dim(), (4, 4, 3));
        assert_eq!(t, img.slice(s![..4, .., ..]));
    }

    #[test]
    fn torso_of_single_row() {
        let img = gradient(1, 5);
        assert_eq!(torso(img.view()).dim(), (1, 5, 3));
    }

    #[test]
    fn torso_of_empty_crop_is_placeholder() {
        let img = Array3::<u8>::zeros((0, 5, 3));
        assert_eq!(torso(img.view()), placeholder());
    }
}
