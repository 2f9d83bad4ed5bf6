//! Turning arbitrary cluster ids into team labels.
//!
//! Clustering hands out ids `{0, 1, 2}` in no meaningful order. The only signal
//! available is how many samples each id received: the rest group (ball, referees,
//! keepers, occlusions) is expected to be the smallest one, the two teams roughly
//! equal in size. [`resolve_permutation`] turns that histogram into a fixed
//! mapping, which is applied to the training labels once and never revisited.

use log::{debug, info, warn};
use ndarray::ArrayView2;

use crate::color::{Bgr, PLACEHOLDER_TEAM_A, PLACEHOLDER_TEAM_B};
use crate::config::NUM_CLASSES;
use crate::error::Error;
use crate::math;
use crate::team::TeamClass;
use crate::{Classifier, Clusterer};

/// Number of samples per raw cluster id
pub type Histogram = [usize; NUM_CLASSES];

pub fn histogram(labels: &[usize]) -> Histogram {
    let mut hist = [0; NUM_CLASSES];

    for &label in labels {
        if let Some(bin) = hist.get_mut(label) {
            *bin += 1;
        }
    }

    hist
}

/// Bijection on `{0, 1, 2}`: raw cluster id to resolved class label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Permutation([usize; NUM_CLASSES]);

impl Permutation {
    pub const IDENTITY: Permutation = Permutation([0, 1, 2]);

    /// Label 0 holds the most samples and the other two are tied.
    pub const SWAP_MAJORITY: Permutation = Permutation([1, 0, 2]);

    /// Label 1 is the rest group.
    pub const REST_FROM_1: Permutation = Permutation([1, 0, 2]);

    /// Label 2 is the rest group.
    pub const REST_FROM_2: Permutation = Permutation([2, 1, 0]);

    #[inline]
    pub fn apply(&self, raw: usize) -> usize {
        self.0[raw]
    }

    pub fn apply_all(&self, raw: &[usize]) -> Vec<usize> {
        raw.iter().map(|&l| self.apply(l)).collect()
    }

    #[inline]
    pub fn as_slice(&self) -> &[usize; NUM_CLASSES] {
        &self.0
    }
}

/// No reliable rest group: label 0 is (one of) the largest, labels 1 and 2 are equal.
pub fn is_ambiguous(hist: &Histogram) -> bool {
    let max = hist.iter().copied().max().unwrap_or(0);

    hist[0] == max && hist[1] == hist[2]
}

pub fn rest_is_label_1(hist: &Histogram) -> bool {
    hist[1] < hist[0] && hist[1] < hist[2]
}

pub fn rest_is_label_2(hist: &Histogram) -> bool {
    hist[2] < hist[0] && hist[2] < hist[1]
}

/// Chooses the mapping from raw cluster ids to `0 = rest, 1 = team A, 2 = team B`.
///
/// Rules are checked in order, first match wins:
///
/// 1. [`is_ambiguous`]: the majority label is demoted, `1 -> 0, 0 -> 1, 2 -> 2`.
///    This is a fallback for degenerate splits, not a statement about the data.
/// 2. [`rest_is_label_1`]: `1 -> 0, 0 -> 1, 2 -> 2`.
/// 3. [`rest_is_label_2`]: `2 -> 0, 1 -> 1, 0 -> 2`.
/// 4. Otherwise label 0 already is the smallest group and nothing moves.
pub fn resolve_permutation(hist: &Histogram) -> Permutation {
    if is_ambiguous(hist) {
        Permutation::SWAP_MAJORITY
    } else if rest_is_label_1(hist) {
        Permutation::REST_FROM_1
    } else if rest_is_label_2(hist) {
        Permutation::REST_FROM_2
    } else {
        Permutation::IDENTITY
    }
}

/// Channel-wise mean of the samples labelled `team`, clipped to `[0, 255]` and
/// then rounded. `None` when the team has no samples.
pub fn team_color(
    samples: ArrayView2<'_, f32>,
    resolved: &[usize],
    team: TeamClass,
) -> Option<Bgr> {
    let rows: Vec<usize> = resolved
        .iter()
        .enumerate()
        .filter(|&(_, &l)| l == team.label())
        .map(|(idx, _)| idx)
        .collect();

    let members = samples.select(ndarray::Axis(0), &rows);
    let mean = math::mean_rows(members.view())?;

    Some(math::to_color(mean.as_slice()))
}

/// Outcome of the one-time team resolution.
#[derive(Debug, Clone, PartialEq)]
pub struct Resolution {
    pub histogram: Histogram,
    pub permutation: Permutation,
    /// Resolved label per evidence sample
    pub labels: Vec<usize>,
    pub team_a_color: Bgr,
    pub team_b_color: Bgr,
}

/// Checks that `labels` holds one id in `0..NUM_CLASSES` per sample.
pub fn check_labels(labels: &[usize], samples: usize) -> Result<(), Error> {
    if labels.len() != samples {
        return Err(Error::SampleLabelMismatch {
            samples,
            labels: labels.len(),
        });
    }

    match labels.iter().find(|&&l| l >= NUM_CLASSES) {
        Some(&label) => Err(Error::InvalidLabel {
            label,
            classes: NUM_CLASSES,
        }),
        None => Ok(()),
    }
}

/// Clusters the evidence, resolves the label permutation, trains `classifier` on
/// the resolved labels and derives both team colors.
///
/// A team without members gets its placeholder color. Cluster ids outside
/// `0..NUM_CLASSES`, or one id too many or too few, fail the resolution.
pub fn resolve<C, K>(
    clusterer: &mut C,
    classifier: &mut K,
    samples: ArrayView2<'_, f32>,
) -> Result<Resolution, Error>
where
    C: Clusterer + ?Sized,
    K: Classifier + ?Sized,
{
    let raw = clusterer.fit_predict(samples)?;
    check_labels(&raw, samples.nrows())?;

    let hist = histogram(&raw);
    let permutation = resolve_permutation(&hist);

    debug!(
        "cluster histogram {:?}, permutation {:?}",
        hist,
        permutation.as_slice()
    );

    let labels = permutation.apply_all(&raw);
    classifier.fit(samples, &labels)?;

    let team_a_color = team_color(samples, &labels, TeamClass::TeamA).unwrap_or_else(|| {
        warn!("team A has no members, keeping placeholder color");
        PLACEHOLDER_TEAM_A
    });

    let team_b_color = team_color(samples, &labels, TeamClass::TeamB).unwrap_or_else(|| {
        warn!("team B has no members, keeping placeholder color");
        PLACEHOLDER_TEAM_B
    });

    info!(
        "teams resolved from {} samples: A = {:?}, B = {:?}",
        labels.len(),
        team_a_color,
        team_b_color
    );

    Ok(Resolution {
        histogram: hist,
        permutation,
        labels,
        team_a_color,
        team_b_color,
    })
}
