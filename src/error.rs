use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Frame out of order: expected frame {expected}, got {got}")]
    OutOfOrderFrame { expected: u32, got: u32 },

    #[error("Classifier is not started")]
    NotStarted,

    #[error("Classifier is stopped")]
    Stopped,

    #[error("Need at least {required} samples, got {samples}")]
    InsufficientSamples { samples: usize, required: usize },

    #[error("Expected samples with {expected} features, got {got}")]
    Dimension { expected: usize, got: usize },

    #[error("Got {samples} samples but {labels} labels")]
    SampleLabelMismatch { samples: usize, labels: usize },

    #[error("Label {label} out of range, expected less than {classes}")]
    InvalidLabel { label: usize, classes: usize },

    #[error("Classifier used before fit")]
    NotFitted,

    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    #[error("OpenCV Error: {0}")]
    OpenCv(#[from] opencv::Error),

    #[error("Shape Error: {0}")]
    Shape(#[from] ndarray::ShapeError),
}
