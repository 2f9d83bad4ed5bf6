use serde_derive::{Deserialize, Serialize};

use crate::error::Error;

/// Number of groups the bootstrap clustering forms: rest, team A and team B.
pub const NUM_CLASSES: usize = 3;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct ShirtClassifierConfig {
    /// Frame at which evidence is clustered and the classifier is trained
    pub cutoff_frame: u32,
    pub n_clusters: usize,
    pub n_neighbors: usize,

    /// Lower (H, S, V) bound of the suppressed background band, hue on [0, 180)
    pub green_lower: [u8; 3],
    /// Upper (H, S, V) bound of the suppressed background band, inclusive
    pub green_upper: [u8; 3],

    pub kmeans_max_iter: usize,
    pub kmeans_tolerance: f32,
}

impl Default for ShirtClassifierConfig {
    fn default() -> Self {
        Self {
            cutoff_frame: 8,
            n_clusters: NUM_CLASSES,
            n_neighbors: 8,
            green_lower: [30, 40, 40],
            green_upper: [80, 255, 255],
            kmeans_max_iter: 300,
            kmeans_tolerance: 1e-4,
        }
    }
}

impl ShirtClassifierConfig {
    pub fn with_cutoff_frame(mut self, cutoff_frame: u32) -> Self {
        self.cutoff_frame = cutoff_frame;
        self
    }

    pub fn with_neighbors(mut self, n_neighbors: usize) -> Self {
        self.n_neighbors = n_neighbors;
        self
    }

    pub fn validate(&self) -> Result<(), Error> {
        if self.cutoff_frame == 0 {
            return Err(Error::InvalidConfig("cutoff_frame must be at least 1".into()));
        }

        if self.n_clusters != NUM_CLASSES {
            return Err(Error::InvalidConfig(format!(
                "n_clusters must be {}, got {}",
                NUM_CLASSES, self.n_clusters
            )));
        }

        if self.n_neighbors == 0 {
            return Err(Error::InvalidConfig("n_neighbors must be at least 1".into()));
        }

        if self
            .green_lower
            .iter()
            .zip(self.green_upper.iter())
            .any(|(lo, hi)| lo > hi)
        {
            return Err(Error::InvalidConfig(format!(
                "green band is inverted: {:?} > {:?}",
                self.green_lower, self.green_upper
            )));
        }

        if self.green_upper[0] > 180 {
            return Err(Error::InvalidConfig(format!(
                "hue bound {} is outside [0, 180]",
                self.green_upper[0]
            )));
        }

        if self.kmeans_max_iter == 0 {
            return Err(Error::InvalidConfig("kmeans_max_iter must be at least 1".into()));
        }

        if !(self.kmeans_tolerance >= 0.0) {
            return Err(Error::InvalidConfig(format!(
                "kmeans_tolerance must be non-negative, got {}",
                self.kmeans_tolerance
            )));
        }

        Ok(())
    }
}
