use log::{debug, trace, warn};
use ndarray::ArrayView3;

use crate::color::Bgr;
use crate::config::{ShirtClassifierConfig, NUM_CLASSES};
use crate::error::Error;
use crate::evidence::EvidenceSet;
use crate::frame::Frame;
use crate::kmeans::KMeans;
use crate::knn::KNearestNeighbors;
use crate::mask::GreenBand;
use crate::math::colors_to_samples;
use crate::reduce::mean_color;
use crate::region;
use crate::resolve::{self, Resolution};
use crate::team::{TeamAssignment, TeamClass};
use crate::track::Track;
use crate::{Classifier, Clusterer};

/// Host-visible module name. Recorded replays are keyed by it.
pub const NAME: &str = "Shirt Classifier";

/// Where a frame number falls relative to the cutoff frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Gathering evidence, output is provisional
    Bootstrap,
    /// Cutoff frame: cluster, resolve, train
    Resolve,
    /// Trained classifier only
    SteadyState,
}

impl Phase {
    pub fn of(frame: u32, cutoff: u32) -> Self {
        use std::cmp::Ordering::*;

        match frame.cmp(&cutoff) {
            Less => Phase::Bootstrap,
            Equal => Phase::Resolve,
            Greater => Phase::SteadyState,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RunState {
    Idle,
    Running,
    Stopped,
}

/// Frame-by-frame team assignment by shirt color.
///
/// Gathers one torso color per track while the frame number is below the cutoff,
/// resolves the teams once at the cutoff frame and classifies with the trained
/// model afterwards. One instance per video; it holds all cross-frame state.
pub struct ShirtClassifier<C = KMeans, K = KNearestNeighbors> {
    config: ShirtClassifierConfig,
    band: GreenBand,
    clusterer: C,
    classifier: K,

    state: RunState,
    current_frame: u32,
    evidence: EvidenceSet,
    current_colors: Vec<Bgr>,
    resolution: Option<Resolution>,
    last_output: Option<TeamAssignment>,
}

impl ShirtClassifier<KMeans, KNearestNeighbors> {
    /// Classifier with the reference models: 3-cluster k-means and 8-neighbour kNN.
    pub fn new(config: ShirtClassifierConfig) -> Result<Self, Error> {
        let clusterer = KMeans::from_config(&config);
        let classifier = KNearestNeighbors::from_config(&config);

        Self::with_models(config, clusterer, classifier)
    }
}

impl<C: Clusterer, K: Classifier> ShirtClassifier<C, K> {
    pub fn with_models(
        config: ShirtClassifierConfig,
        clusterer: C,
        classifier: K,
    ) -> Result<Self, Error> {
        config.validate()?;

        Ok(Self {
            band: GreenBand::from(&config),
            config,
            clusterer,
            classifier,
            state: RunState::Idle,
            current_frame: 1,
            evidence: EvidenceSet::new(),
            current_colors: Vec::new(),
            resolution: None,
            last_output: None,
        })
    }

    #[inline]
    pub fn name(&self) -> &'static str {
        NAME
    }

    #[inline]
    pub fn config(&self) -> &ShirtClassifierConfig {
        &self.config
    }

    /// Number the next frame must carry
    #[inline]
    pub fn frame_number(&self) -> u32 {
        self.current_frame
    }

    #[inline]
    pub fn phase(&self) -> Phase {
        Phase::of(self.current_frame, self.config.cutoff_frame)
    }

    #[inline]
    pub fn evidence(&self) -> &EvidenceSet {
        &self.evidence
    }

    /// Frozen (team A, team B) colors, once resolved
    pub fn team_colors(&self) -> Option<(Bgr, Bgr)> {
        self.resolution
            .as_ref()
            .map(|r| (r.team_a_color, r.team_b_color))
    }

    #[inline]
    pub fn resolution(&self) -> Option<&Resolution> {
        self.resolution.as_ref()
    }

    #[inline]
    pub fn last_output(&self) -> Option<&TeamAssignment> {
        self.last_output.as_ref()
    }

    #[inline]
    pub fn clusterer(&self) -> &C {
        &self.clusterer
    }

    #[inline]
    pub fn classifier(&self) -> &K {
        &self.classifier
    }

    /// Begins a run from frame 1, discarding anything left from a previous one.
    pub fn start(&mut self) {
        self.state = RunState::Running;
        self.current_frame = 1;
        self.evidence.clear();
        self.current_colors.clear();
        self.resolution = None;
        self.last_output = None;
        self.clusterer.reset();
        self.classifier.reset();

        debug!("{} started, cutoff at frame {}", NAME, self.config.cutoff_frame);
    }

    /// Ends the run and releases the gathered evidence and the trained model.
    pub fn stop(&mut self) {
        self.state = RunState::Stopped;
        self.evidence = EvidenceSet::new();
        self.current_colors = Vec::new();
        self.resolution = None;
        self.last_output = None;
        self.clusterer.reset();
        self.classifier.reset();

        debug!("{} stopped at frame {}", NAME, self.current_frame);
    }

    /// Torso color of one track: crop, upper half, background removed, mean.
    pub fn reduce_track(&self, image: ArrayView3<'_, u8>, track: &Track) -> Result<Bgr, Error> {
        let torso = region::extract(image, track);
        let masked = self.band.suppress(torso.view())?;

        Ok(mean_color(masked.view()))
    }

    /// Processes the next frame.
    ///
    /// Frames must be numbered 1, 2, 3, ... without gaps; anything else is rejected
    /// and leaves the state untouched, as does a failure while reducing colors.
    /// Once the colors are in the counter moves on even if resolution or
    /// prediction fails. Without a resolution every later frame is provisional.
    pub fn step(&mut self, frame: &Frame) -> Result<TeamAssignment, Error> {
        match self.state {
            RunState::Idle => return Err(Error::NotStarted),
            RunState::Stopped => return Err(Error::Stopped),
            RunState::Running => {}
        }

        if frame.number != self.current_frame {
            return Err(Error::OutOfOrderFrame {
                expected: self.current_frame,
                got: frame.number,
            });
        }

        let phase = self.phase();
        trace!(
            "frame {}: {:?} with {} tracks",
            self.current_frame,
            phase,
            frame.len()
        );

        let image = frame.image.view();
        let colors = frame
            .iter()
            .map(|t| self.reduce_track(image, t))
            .collect::<Result<Vec<Bgr>, Error>>()?;
        self.current_colors = colors;

        let result = match phase {
            Phase::Bootstrap => {
                self.evidence.extend(&self.current_colors);
                Ok(TeamAssignment::provisional(frame.len()))
            }
            Phase::Resolve => {
                self.evidence.extend(&self.current_colors);
                self.resolve_teams().and_then(|_| self.classify())
            }
            Phase::SteadyState if self.resolution.is_none() => {
                warn!(
                    "frame {}: teams were never resolved, output stays provisional",
                    self.current_frame
                );
                Ok(TeamAssignment::provisional(frame.len()))
            }
            Phase::SteadyState => self.classify(),
        };

        self.current_colors.clear();
        self.current_frame += 1;

        if let Ok(out) = &result {
            self.last_output = Some(out.clone());
        }

        result
    }

    fn resolve_teams(&mut self) -> Result<(), Error> {
        let evidence = self.evidence.take();
        let samples = evidence.samples()?;

        let resolution =
            resolve::resolve(&mut self.clusterer, &mut self.classifier, samples.view())?;
        self.resolution = Some(resolution);

        Ok(())
    }

    fn classify(&self) -> Result<TeamAssignment, Error> {
        let (team_a_color, team_b_color) = self.team_colors().ok_or(Error::NotFitted)?;

        let samples = colors_to_samples(&self.current_colors);
        let labels = self.classifier.predict(samples.view())?;
        resolve::check_labels(&labels, samples.nrows())?;

        let team_classes = labels
            .into_iter()
            .map(|label| {
                TeamClass::from_label(label)
                    .map(|class| class as u8)
                    .ok_or(Error::InvalidLabel {
                        label,
                        classes: NUM_CLASSES,
                    })
            })
            .collect::<Result<Vec<u8>, Error>>()?;

        Ok(TeamAssignment {
            team_a_color,
            team_b_color,
            team_classes,
        })
    }
}
