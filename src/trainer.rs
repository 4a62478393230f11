//! Utilities for training networks.

use crate::error::{Error, Result};
use crate::matrix::Matrix;
use crate::network::Network;
use crate::topology::Topology;

use log::info;
use std::time::{Duration, Instant};

/// A builder for training new networks.
///
/// # Example
///
/// Let's train a network to compute the OR of two inputs:
///
/// ```
/// # use sigmoid_net::*;
/// let inputs = Matrix::from_rows(&[[0.0, 0.0], [0.0, 1.0], [1.0, 0.0], [1.0, 1.0]]).unwrap();
/// let expected = [0.0, 1.0, 1.0, 1.0];
///
/// let (mut network, error) = Trainer::new(Topology::new(2, 1, 0.5, &[]).unwrap())
///     .seed(3)
///     .logging(Logging::Silent)
///     .stop_condition(StopCondition::Epochs(2000))
///     .train(&expected, &inputs)
///     .unwrap();
///
/// assert!(error > 0.0);
/// let prediction = network.feed_forward(&[1.0, 1.0]).unwrap();
/// assert!(prediction.output() > 0.0 && prediction.output() < 1.0);
/// ```
#[derive(Debug)]
pub struct Trainer {
    topology: Topology,
    seed: Option<u64>,
    logging: Logging,
    stop_condition: StopCondition,
}

impl Trainer {
    /// Creates a new Trainer instance.
    ///
    /// The trainer is initialized with some default values. These defaults are:
    ///
    /// * Weights drawn from OS entropy.
    /// * Stops after 1000 epochs.
    /// * Logs on training completion.
    pub fn new(topology: Topology) -> Self {
        Trainer {
            topology,
            seed: None,
            logging: Logging::Completion,
            stop_condition: StopCondition::Epochs(1000),
        }
    }

    /// Seeds the initial weights, making training reproducible.
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Sets the type of logging to be emitted during training.
    pub fn logging(mut self, logging: Logging) -> Self {
        self.logging = logging;
        self
    }

    /// Sets the condition to finish training.
    pub fn stop_condition<C>(mut self, condition: C) -> Self
    where
        C: Into<StopCondition>,
    {
        self.stop_condition = condition.into();
        self
    }

    /// Builds a network and trains it on the provided labelled data.
    ///
    /// Row `i` of `inputs` is labelled by `expected[i]`. The inputs are
    /// normalized once before the first epoch.
    ///
    /// Returns:
    ///   The trained network along with the accumulated squared error
    ///   divided by the number of epochs run.
    pub fn train(self, expected: &[f64], inputs: &Matrix) -> Result<(Network, f64)> {
        if let StopCondition::Epochs(0) = self.stop_condition {
            return Err(Error::EmptyTrainingSet);
        }
        let mut network = match self.seed {
            Some(seed) => Network::with_seed(self.topology, seed)?,
            None => Network::new(self.topology, &mut rand::thread_rng())?,
        };
        let error = network.run_training(expected, inputs, self.stop_condition, self.logging)?;
        Ok((network, error))
    }
}

/// Logging frequency to use during training
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Logging {
    /// No logs will be emitted
    Silent,
    /// A summary will be emitted at completion
    Completion,
    /// A summary will be emitted after every `n` epochs
    Epochs(usize),
}

impl Logging {
    /// Performs logging at the end of an `epoch`.
    pub(crate) fn epoch(&self, epoch: usize, epoch_error: f64) {
        if let Logging::Epochs(freq) = *self {
            if freq > 0 && epoch % freq == 0 {
                info!("epoch {}: squared error {}", epoch, epoch_error);
            }
        }
    }

    /// Performs logging at the end of training.
    pub(crate) fn completion(&self, epochs: usize, training_error: f64, start_time: Instant) {
        if let Logging::Silent = self {
            return;
        }
        info!(
            "trained {} epochs in {:.3} seconds, error {}",
            epochs,
            start_time.elapsed().as_secs_f64(),
            training_error
        );
    }
}

/// When to stop training
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum StopCondition {
    /// Stops after the provided number of epochs
    Epochs(usize),
    /// Stops once an epoch's summed squared error drops below the threshold
    ErrorThreshold(f64),
    /// Stops after the provided duration
    Duration(Duration),
}

impl From<Duration> for StopCondition {
    fn from(duration: Duration) -> StopCondition {
        StopCondition::Duration(duration)
    }
}

impl StopCondition {
    /// Returns true if training is complete.
    pub(crate) fn should_stop(&self, epoch: usize, epoch_error: f64, start_time: Instant) -> bool {
        match *self {
            StopCondition::Epochs(epochs) => epoch >= epochs,
            StopCondition::ErrorThreshold(threshold) => epoch_error < threshold,
            StopCondition::Duration(duration) => start_time.elapsed() > duration,
        }
    }
}
