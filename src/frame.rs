use ndarray::Array3;

use crate::track::Track;

/// Input of a single classifier step.
///
/// `image` is laid out as (rows, cols, channel) with channels in B, G, R order.
/// `number` starts at 1 and must grow by exactly one per step.
pub struct Frame {
    pub number: u32,
    pub image: Array3<u8>,
    pub tracks: Vec<Track>,
}

impl Frame {
    #[inline]
    pub fn new(number: u32, image: Array3<u8>, tracks: Vec<Track>) -> Self {
        Self {
            number,
            image,
            tracks,
        }
    }

    /// (width, height) of the image
    #[inline]
    pub fn dims(&self) -> (usize, usize) {
        let (rows, cols, _) = self.image.dim();
        (cols, rows)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = &Track> {
        self.tracks.iter()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }
}
