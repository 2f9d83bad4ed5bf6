use ndarray::{Array2, ArrayView1, ArrayView2};

use crate::config::ShirtClassifierConfig;
use crate::error::Error;
use crate::Classifier;

/// Majority vote among the `k` closest training samples (Euclidean).
///
/// Equal distances are ordered by training index, and a tied vote goes to the
/// smallest label. With fewer than `k` training samples every sample votes.
#[derive(Debug, Clone)]
pub struct KNearestNeighbors {
    pub k: usize,
    samples: Option<Array2<f32>>,
    labels: Vec<usize>,
    num_labels: usize,
}

impl KNearestNeighbors {
    pub fn new(k: usize) -> Self {
        Self {
            k,
            samples: None,
            labels: Vec::new(),
            num_labels: 0,
        }
    }

    pub fn from_config(cfg: &ShirtClassifierConfig) -> Self {
        Self::new(cfg.n_neighbors)
    }

    #[inline]
    pub fn is_fitted(&self) -> bool {
        self.samples.is_some()
    }

    fn vote(&self, train: &Array2<f32>, x: ArrayView1<'_, f32>) -> usize {
        let mut dists: Vec<(f32, usize)> = train
            .outer_iter()
            .enumerate()
            .map(|(idx, row)| {
                let d = row
                    .iter()
                    .zip(x.iter())
                    .map(|(a, b)| (a - b) * (a - b))
                    .sum::<f32>();

                (d, idx)
            })
            .collect();

        dists.sort_by(|a, b| a.0.total_cmp(&b.0).then(a.1.cmp(&b.1)));

        let mut votes = vec![0usize; self.num_labels];
        for &(_, idx) in dists.iter().take(self.k.max(1)) {
            votes[self.labels[idx]] += 1;
        }

        let mut best = 0;
        for (label, &count) in votes.iter().enumerate() {
            if count > votes[best] {
                best = label;
            }
        }

        best
    }
}

impl Classifier for KNearestNeighbors {
    fn fit(&mut self, samples: ArrayView2<'_, f32>, labels: &[usize]) -> Result<(), Error> {
        let n = samples.nrows();

        if n != labels.len() {
            return Err(Error::SampleLabelMismatch {
                samples: n,
                labels: labels.len(),
            });
        }

        if n == 0 {
            return Err(Error::InsufficientSamples {
                samples: 0,
                required: 1,
            });
        }

        self.num_labels = labels.iter().copied().max().map_or(0, |m| m + 1);
        self.labels = labels.to_vec();
        self.samples = Some(samples.to_owned());

        Ok(())
    }

    fn predict(&self, samples: ArrayView2<'_, f32>) -> Result<Vec<usize>, Error> {
        let train = self.samples.as_ref().ok_or(Error::NotFitted)?;

        if samples.ncols() != train.ncols() {
            return Err(Error::Dimension {
                expected: train.ncols(),
                got: samples.ncols(),
            });
        }

        Ok(samples
            .outer_iter()
            .map(|x| self.vote(train, x))
            .collect())
    }

    fn reset(&mut self) {
        self.samples = None;
        self.labels = Vec::new();
        self.num_labels = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    fn two_groups() -> (Array2<f32>, Vec<usize>) {
        let x = array![
            [0.0, 0.0, 200.0],
            [0.0, 0.0, 205.0],
            [0.0, 0.0, 210.0],
            [200.0, 0.0, 0.0],
            [205.0, 0.0, 0.0],
            [210.0, 0.0, 0.0],
        ];

        (x, vec![1, 1, 1, 2, 2, 2])
    }

    #[test]
    fn predicts_nearest_group() {
        let (x, y) = two_groups();
        let mut knn = KNearestNeighbors::new(3);
        knn.fit(x.view(), &y).unwrap();

        let pred = knn
            .predict(array![[10.0, 10.0, 190.0], [190.0, 5.0, 5.0]].view())
            .unwrap();

        assert_eq!(pred, vec![1, 2]);
    }

    #[test]
    fn k_larger_than_training_set() {
        let (x, y) = two_groups();
        let mut knn = KNearestNeighbors::new(8);
        knn.fit(x.view(), &y).unwrap();

        // all six samples vote, 3:3 tie goes to the smaller label
        let pred = knn.predict(array![[200.0, 0.0, 0.0]].view()).unwrap();
        assert_eq!(pred, vec![1]);
    }

    #[test]
    fn majority_wins() {
        let x = array![[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [2.0, 0.0, 0.0], [50.0, 0.0, 0.0]];
        let mut knn = KNearestNeighbors::new(3);
        knn.fit(x.view(), &[0, 2, 2, 0]).unwrap();

        assert_eq!(knn.predict(array![[0.0, 0.0, 0.0]].view()).unwrap(), vec![2]);
    }

    #[test]
    fn empty_query() {
        let (x, y) = two_groups();
        let mut knn = KNearestNeighbors::new(8);
        knn.fit(x.view(), &y).unwrap();

        let q = Array2::<f32>::zeros((0, 3));
        assert!(knn.predict(q.view()).unwrap().is_empty());
    }

    #[test]
    fn errors() {
        let knn = KNearestNeighbors::new(8);
        assert!(!knn.is_fitted());
        assert!(matches!(
            knn.predict(array![[1.0, 2.0, 3.0]].view()),
            Err(Error::NotFitted)
        ));

        let (x, _) = two_groups();
        let mut knn = KNearestNeighbors::new(8);
        assert!(matches!(
            knn.fit(x.view(), &[1, 2]),
            Err(Error::SampleLabelMismatch {
                samples: 6,
                labels: 2
            })
        ));

        let empty = Array2::<f32>::zeros((0, 3));
        assert!(knn.fit(empty.view(), &[]).is_err());
    }

    #[test]
    fn reset_forgets_training_set() {
        let (x, y) = two_groups();
        let mut knn = KNearestNeighbors::new(3);
        knn.fit(x.view(), &y).unwrap();
        assert!(knn.is_fitted());

        knn.reset();
        assert!(!knn.is_fitted());
        assert!(matches!(
            knn.predict(array![[1.0, 2.0, 3.0]].view()),
            Err(Error::NotFitted)
        ));
    }
}
