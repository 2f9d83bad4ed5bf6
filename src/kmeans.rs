use log::trace;
use nalgebra as na;
use ndarray::ArrayView2;

use crate::config::ShirtClassifierConfig;
use crate::error::Error;
use crate::math::to_point;
use crate::Clusterer;

/// Lloyd's k-means over 3-channel color samples.
///
/// Seeding is deterministic: the sample closest to the data mean comes first, every
/// further seed is the sample farthest from the seeds chosen so far.
#[derive(Debug, Clone)]
pub struct KMeans {
    pub n_clusters: usize,
    pub max_iter: usize,
    pub tolerance: f32,
    centroids: Vec<na::Vector3<f32>>,
}

impl KMeans {
    pub fn new(n_clusters: usize, max_iter: usize, tolerance: f32) -> Self {
        Self {
            n_clusters,
            max_iter,
            tolerance,
            centroids: Vec::new(),
        }
    }

    pub fn from_config(cfg: &ShirtClassifierConfig) -> Self {
        Self::new(cfg.n_clusters, cfg.kmeans_max_iter, cfg.kmeans_tolerance)
    }

    /// Centroids of the last fit, indexed by cluster label
    #[inline]
    pub fn centroids(&self) -> &[na::Vector3<f32>] {
        &self.centroids
    }

    fn seed(&self, points: &[na::Vector3<f32>]) -> Vec<na::Vector3<f32>> {
        let mean = points
            .iter()
            .fold(na::Vector3::<f32>::zeros(), |acc, p| acc + p) / points.len() as f32;

        let first = nearest(&mean, points).0;
        let mut seeds = vec![points[first]];

        while seeds.len() < self.n_clusters {
            let mut best = (0, -1.0f32);

            for (idx, p) in points.iter().enumerate() {
                let d = nearest(p, &seeds).1;
                if d > best.1 {
                    best = (idx, d);
                }
            }

            seeds.push(points[best.0]);
        }

        seeds
    }
}

/// Index of and squared distance to the closest candidate, first one wins ties.
fn nearest(p: &na::Vector3<f32>, candidates: &[na::Vector3<f32>]) -> (usize, f32) {
    let mut best = (0, f32::INFINITY);

    for (idx, c) in candidates.iter().enumerate() {
        let d = (p - c).norm_squared();
        if d < best.1 {
            best = (idx, d);
        }
    }

    best
}

impl Clusterer for KMeans {
    fn fit_predict(&mut self, samples: ArrayView2<'_, f32>) -> Result<Vec<usize>, Error> {
        let (n, dim) = samples.dim();

        if dim != 3 {
            return Err(Error::Dimension {
                expected: 3,
                got: dim,
            });
        }

        if n < self.n_clusters || self.n_clusters == 0 {
            return Err(Error::InsufficientSamples {
                samples: n,
                required: self.n_clusters.max(1),
            });
        }

        let points: Vec<_> = samples.outer_iter().map(to_point).collect();
        let mut centroids = self.seed(&points);
        let mut labels = vec![0; n];

        for iter in 0..self.max_iter {
            for (label, p) in labels.iter_mut().zip(points.iter()) {
                *label = nearest(p, &centroids).0;
            }

            let mut sums = vec![na::Vector3::<f32>::zeros(); self.n_clusters];
            let mut counts = vec![0usize; self.n_clusters];

            for (&label, p) in labels.iter().zip(points.iter()) {
                sums[label] += p;
                counts[label] += 1;
            }

            let mut shift = 0.0f32;
            for ((c, sum), &count) in centroids.iter_mut().zip(sums).zip(counts.iter()) {
                // an emptied cluster keeps its previous centroid
                if count == 0 {
                    continue;
                }

                let next = sum / count as f32;
                shift = shift.max((next - *c).norm());
                *c = next;
            }

            if shift <= self.tolerance {
                trace!("kmeans converged after {} iterations", iter + 1);
                break;
            }
        }

        for (label, p) in labels.iter_mut().zip(points.iter()) {
            *label = nearest(p, &centroids).0;
        }

        self.centroids = centroids;

        Ok(labels)
    }

    fn reset(&mut self) {
        self.centroids = Vec::new();
    }
}
