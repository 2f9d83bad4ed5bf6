use ndarray::Array2;

use crate::color::Bgr;
use crate::error::Error;

/// Torso colors gathered during the bootstrap window, in arrival order.
#[derive(Debug, Clone, Default)]
pub struct EvidenceSet {
    colors: Vec<Bgr>,
}

impl EvidenceSet {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn extend(&mut self, colors: &[Bgr]) {
        self.colors.extend_from_slice(colors);
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    #[inline]
    pub fn clear(&mut self) {
        self.colors.clear()
    }

    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = &Bgr> {
        self.colors.iter()
    }

    /// Samples as an `n x 3` float matrix, one row per color
    pub fn samples(&self) -> Result<Array2<f32>, Error> {
        let flat: Vec<f32> = self
            .colors
            .iter()
            .flat_map(|c| c.iter().map(|&v| v as f32))
            .collect();

        Ok(Array2::from_shape_vec((self.colors.len(), 3), flat)?)
    }

    /// Empties the set, handing back everything gathered so far.
    pub fn take(&mut self) -> EvidenceSet {
        std::mem::take(self)
    }
}
