pub mod bbox;
pub mod color;
pub mod config;
pub mod controller;
pub mod error;
pub mod evidence;
pub mod frame;
pub mod kmeans;
pub mod knn;
pub mod mask;
pub mod math;
pub mod reduce;
pub mod region;
pub mod resolve;
pub mod team;

mod track;

pub use config::ShirtClassifierConfig;
pub use controller::{Phase, ShirtClassifier, NAME};
pub use error::Error;
pub use frame::Frame;
pub use team::{TeamAssignment, TeamClass};
pub use track::Track;

use ndarray::ArrayView2;

/// Unsupervised grouping of samples (one row per sample).
///
/// Returned labels are arbitrary ids in `0..n_clusters`, one per row.
pub trait Clusterer {
    fn fit_predict(&mut self, samples: ArrayView2<'_, f32>) -> Result<Vec<usize>, Error>;

    /// Drops whatever the last fit left behind.
    fn reset(&mut self) {}
}

/// Supervised classifier trained once on labelled samples.
pub trait Classifier {
    fn fit(&mut self, samples: ArrayView2<'_, f32>, labels: &[usize]) -> Result<(), Error>;
    fn predict(&self, samples: ArrayView2<'_, f32>) -> Result<Vec<usize>, Error>;

    /// Forgets the training set; `predict` fails until the next `fit`.
    fn reset(&mut self) {}
}

impl<T: Clusterer + ?Sized> Clusterer for Box<T> {
    #[inline]
    fn fit_predict(&mut self, samples: ArrayView2<'_, f32>) -> Result<Vec<usize>, Error> {
        (**self).fit_predict(samples)
    }

    #[inline]
    fn reset(&mut self) {
        (**self).reset()
    }
}

impl<T: Classifier + ?Sized> Classifier for Box<T> {
    #[inline]
    fn fit(&mut self, samples: ArrayView2<'_, f32>, labels: &[usize]) -> Result<(), Error> {
        (**self).fit(samples, labels)
    }

    #[inline]
    fn predict(&self, samples: ArrayView2<'_, f32>) -> Result<Vec<usize>, Error> {
        (**self).predict(samples)
    }

    #[inline]
    fn reset(&mut self) {
        (**self).reset()
    }
}
