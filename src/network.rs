//! A fully connected [feedforward neural network]
//! (https://en.wikipedia.org/wiki/Feedforward_neural_network) trained by
//! online backpropagation.
//!
//! # Example
//!
//! ```
//! # use sigmoid_net::*;
//! let topology = Topology::new(2, 1, 0.5, &[3]).unwrap();
//! let mut network = Network::with_seed(topology, 42).unwrap();
//!
//! let inputs = Matrix::from_rows(&[[0.0, 0.0], [0.0, 1.0], [1.0, 0.0], [1.0, 1.0]]).unwrap();
//! let error = network.train(&[0.0, 1.0, 1.0, 1.0], &inputs, 100).unwrap();
//! assert!(error.is_finite());
//!
//! let prediction = network.feed_forward(&[1.0, -1.0]).unwrap();
//! assert!(prediction.output() > 0.0 && prediction.output() < 1.0);
//! ```

use crate::error::{Error, Result};
use crate::layer::Layer;
use crate::matrix::Matrix;
use crate::neuron::Role;
use crate::normalize::normalize;
use crate::topology::Topology;
use crate::trainer::{Logging, StopCondition};

use log::{debug, trace};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::time::Instant;

/// The winning output neuron of a forward pass.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Prediction {
    index: usize,
    output: f64,
}

impl Prediction {
    /// Position of the neuron within the output layer.
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn output(&self) -> f64 {
        self.output
    }
}

/// A feedforward network of sigmoid neurons.
#[derive(Clone, Debug)]
pub struct Network {
    topology: Topology,
    /// The input layer, then each hidden layer, then the output layer.
    layers: Vec<Layer>,
}

impl Network {
    /// Creates a new, untrained network, drawing initial weights from `rng`.
    pub fn new<R: Rng + ?Sized>(topology: Topology, rng: &mut R) -> Result<Self> {
        topology.validate()?;

        let mut layers = Vec::with_capacity(topology.hidden_layers().len() + 2);
        layers.push(Layer::random(Role::Input, topology.input_count(), 1, rng));
        for &width in topology.hidden_layers() {
            let inputs = layers[layers.len() - 1].neuron_count();
            layers.push(Layer::random(Role::Hidden, width, inputs, rng));
        }
        let inputs = layers[layers.len() - 1].neuron_count();
        layers.push(Layer::random(Role::Output, topology.output_count(), inputs, rng));

        debug!(
            "built network with layer sizes {:?}",
            layers.iter().map(Layer::neuron_count).collect::<Vec<_>>()
        );
        Ok(Network { topology, layers })
    }

    /// Creates a new, untrained network whose weights depend only on `seed`.
    pub fn with_seed(topology: Topology, seed: u64) -> Result<Self> {
        Network::new(topology, &mut StdRng::seed_from_u64(seed))
    }

    pub fn topology(&self) -> &Topology {
        &self.topology
    }

    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    fn output_layer(&self) -> &Layer {
        &self.layers[self.layers.len() - 1]
    }

    /// Feeds `inputs` through the network, returning the output neuron with
    /// the highest activation.
    ///
    /// With a single output neuron, that neuron is always returned. Ties go
    /// to the earliest neuron.
    pub fn feed_forward(&mut self, inputs: &[f64]) -> Result<Prediction> {
        self.propagate(inputs)?;

        let neurons = self.output_layer().neurons();
        let mut best = Prediction {
            index: 0,
            output: neurons[0].output(),
        };
        for (index, neuron) in neurons.iter().enumerate().skip(1) {
            if neuron.output() > best.output {
                best = Prediction {
                    index,
                    output: neuron.output(),
                };
            }
        }
        Ok(best)
    }

    /// Feeds `inputs` through the network, returning every output neuron's
    /// activation.
    pub fn predict(&mut self, inputs: &[f64]) -> Result<Vec<f64>> {
        self.propagate(inputs)?;
        Ok(self.output_layer().outputs())
    }

    fn propagate(&mut self, inputs: &[f64]) -> Result<()> {
        if inputs.len() != self.topology.input_count() {
            return Err(Error::shape(
                "input signals",
                self.topology.input_count(),
                inputs.len(),
            ));
        }
        for (neuron, &signal) in self.layers[0].neurons_mut().iter_mut().zip(inputs) {
            neuron.activate(&[signal])?;
        }
        for i in 1..self.layers.len() {
            let signals = self.layers[i - 1].outputs();
            for neuron in self.layers[i].neurons_mut() {
                neuron.activate(&signals)?;
            }
        }
        Ok(())
    }

    /// Trains the network on labelled data for a fixed number of `epochs`.
    ///
    /// Row `j` of `inputs` is labelled by `expected[j]`. The inputs are
    /// normalized once, then every epoch visits the samples in order and
    /// updates the weights after each one.
    ///
    /// Returns the squared error accumulated over all epochs, divided by
    /// the number of epochs. This tracks training progress but is not a
    /// per-sample mean.
    pub fn train(&mut self, expected: &[f64], inputs: &Matrix, epochs: usize) -> Result<f64> {
        if epochs == 0 {
            return Err(Error::EmptyTrainingSet);
        }
        self.run_training(
            expected,
            inputs,
            StopCondition::Epochs(epochs),
            Logging::Completion,
        )
    }

    pub(crate) fn run_training(
        &mut self,
        expected: &[f64],
        inputs: &Matrix,
        stop_condition: StopCondition,
        logging: Logging,
    ) -> Result<f64> {
        self.validate_samples(expected, inputs)?;
        let signals = normalize(inputs)?;

        let start_time = Instant::now();
        let mut epoch = 0;
        let mut total_error = 0.0;
        loop {
            let mut epoch_error = 0.0;
            for (&target, row) in expected.iter().zip(signals.iter_rows()) {
                epoch_error += self.backpropagate(target, row)?;
            }
            total_error += epoch_error;
            epoch += 1;

            logging.epoch(epoch, epoch_error);
            if stop_condition.should_stop(epoch, epoch_error, start_time) {
                break;
            }
        }
        let training_error = total_error / epoch as f64;
        logging.completion(epoch, training_error, start_time);
        Ok(training_error)
    }

    /// Verifies that the labelled data fits this network, returning an
    /// error if something is wrong.
    fn validate_samples(&self, expected: &[f64], inputs: &Matrix) -> Result<()> {
        if expected.is_empty() {
            return Err(Error::EmptyTrainingSet);
        }
        if inputs.rows() != expected.len() {
            return Err(Error::shape("training rows", expected.len(), inputs.rows()));
        }
        if inputs.cols() != self.topology.input_count() {
            return Err(Error::shape(
                "training columns",
                self.topology.input_count(),
                inputs.cols(),
            ));
        }
        Ok(())
    }

    /// Runs a single online training step on one sample, returning its
    /// squared error.
    ///
    /// The output layer learns from `actual - expected` first. Walking
    /// backwards, each earlier neuron then learns from the sum of the next
    /// layer's deltas, weighted by that neuron's connection into each of
    /// them.
    pub fn backpropagate(&mut self, expected: f64, inputs: &[f64]) -> Result<f64> {
        let actual = self.feed_forward(inputs)?.output();
        let difference = actual - expected;
        let learning_rate = self.topology.learning_rate();

        let last = self.layers.len() - 1;
        for neuron in self.layers[last].neurons_mut() {
            neuron.learn(difference, learning_rate);
        }
        for i in (0..last).rev() {
            let (layer, next) = split_layers(&mut self.layers, i);
            for (j, neuron) in layer.neurons_mut().iter_mut().enumerate() {
                let error: f64 = next
                    .neurons()
                    .iter()
                    .map(|p| p.weights()[j] * p.delta())
                    .sum();
                neuron.learn(error, learning_rate);
            }
        }

        trace!("expected {}, got {}", expected, actual);
        Ok(difference * difference)
    }
}

/// Borrows layer `i` mutably alongside the layer after it.
fn split_layers(layers: &mut [Layer], i: usize) -> (&mut Layer, &Layer) {
    let (before, after) = layers[i..].split_at_mut(1);
    (&mut before[0], &after[0])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::activator::sigmoid;
    use crate::neuron::Neuron;
    use test_strategy::proptest;

    fn truth_table(label: impl Fn(&[f64]) -> bool) -> (Vec<f64>, Matrix) {
        let rows: Vec<Vec<f64>> = (0..16)
            .map(|i| (0..4).rev().map(|bit| ((i >> bit) & 1) as f64).collect())
            .collect();
        let expected = rows.iter().map(|r| if label(&r[..]) { 1.0 } else { 0.0 }).collect();
        (expected, Matrix::from_rows(&rows).unwrap())
    }

    fn network(inputs: usize, outputs: usize, hidden: &[usize]) -> Network {
        Network::with_seed(Topology::new(inputs, outputs, 0.1, hidden).unwrap(), 17).unwrap()
    }

    #[test]
    fn layers_match_topology() {
        let net = network(4, 3, &[5, 2]);
        let sizes: Vec<_> = net.layers().iter().map(Layer::neuron_count).collect();
        assert_eq!(sizes, vec![4, 5, 2, 3]);
        let roles: Vec<_> = net.layers().iter().map(Layer::role).collect();
        assert_eq!(roles, vec![Role::Input, Role::Hidden, Role::Hidden, Role::Output]);

        for neuron in net.layers()[0].neurons() {
            assert_eq!(neuron.weights(), &[1.0]);
        }
        for pair in net.layers().windows(2) {
            for neuron in pair[1].neurons() {
                assert_eq!(neuron.weights().len(), pair[0].neuron_count());
            }
        }
    }

    #[test]
    fn no_hidden_layers() {
        let mut net = network(3, 1, &[]);
        assert_eq!(net.layers().len(), 2);
        assert_eq!(net.layers()[1].neurons()[0].weights().len(), 3);
        let prediction = net.feed_forward(&[0.3, -2.0, 1.0]).unwrap();
        assert_eq!(prediction.index(), 0);
    }

    #[test]
    fn wrong_input_width() {
        let mut net = network(3, 1, &[2]);
        assert_eq!(
            net.feed_forward(&[1.0, 2.0]),
            Err(Error::shape("input signals", 3, 2))
        );
        assert!(net.predict(&[1.0, 2.0, 3.0, 4.0]).is_err());
    }

    #[test]
    fn feed_forward_matches_hand_computation() {
        let mut net = network(2, 1, &[]);
        net.layers[1] = Layer::new(
            Role::Output,
            vec![Neuron::with_weights(Role::Output, vec![0.5, -0.25])],
        )
        .unwrap();
        let (a, b) = (sigmoid(1.0), sigmoid(-2.0));
        let expected = sigmoid(0.5 * a - 0.25 * b);
        assert_eq!(net.feed_forward(&[1.0, -2.0]).unwrap().output(), expected);
    }

    #[test]
    fn picks_highest_output() {
        let mut net = network(1, 3, &[]);
        net.layers[1] = Layer::new(
            Role::Output,
            vec![
                Neuron::with_weights(Role::Output, vec![0.1]),
                Neuron::with_weights(Role::Output, vec![0.9]),
                Neuron::with_weights(Role::Output, vec![0.9]),
            ],
        )
        .unwrap();
        let prediction = net.feed_forward(&[1.0]).unwrap();
        assert_eq!(prediction.index(), 1);
        assert_eq!(prediction.output(), net.predict(&[1.0]).unwrap()[1]);
    }

    #[test]
    fn sole_output_is_returned_even_when_nan() {
        let mut net = network(2, 1, &[3]);
        let prediction = net.feed_forward(&[f64::NAN, 1.0]).unwrap();
        assert_eq!(prediction.index(), 0);
        assert!(prediction.output().is_nan());
        assert!(net.layers()[2].neurons()[0].output().is_nan());
    }

    #[test]
    fn training_shape_errors_leave_weights_alone() {
        let mut net = network(4, 1, &[2]);
        let before = net.clone();
        let (expected, inputs) = truth_table(|r| r[0] == 1.0);

        assert!(net.train(&expected[..3], &inputs, 5).is_err());
        assert_eq!(net.train(&expected, &inputs, 0), Err(Error::EmptyTrainingSet));
        assert_eq!(net.train(&[], &Matrix::zeros(0, 4), 5), Err(Error::EmptyTrainingSet));

        let mut narrow = network(3, 1, &[2]);
        assert_eq!(
            narrow.train(&expected, &inputs, 5),
            Err(Error::shape("training columns", 3, 4))
        );

        for (a, b) in net.layers().iter().zip(before.layers()) {
            for (na, nb) in a.neurons().iter().zip(b.neurons()) {
                assert_eq!(na.weights(), nb.weights());
            }
        }
    }

    #[test]
    fn single_sample_is_degenerate() {
        let mut net = network(2, 1, &[2]);
        let inputs = Matrix::from_rows(&[[1.0, 0.0]]).unwrap();
        assert_eq!(
            net.train(&[1.0], &inputs, 10),
            Err(Error::DegenerateColumn { column: 0 })
        );
    }

    #[test]
    fn backpropagate_reduces_sample_error() {
        let mut net = network(2, 1, &[3]);
        let first = net.backpropagate(0.0, &[1.0, -1.0]).unwrap();
        let second = net.backpropagate(0.0, &[1.0, -1.0]).unwrap();
        assert!(second < first);
    }

    #[test]
    fn backpropagate_leaves_input_weights_fixed() {
        let mut net = network(2, 1, &[3]);
        for _ in 0..10 {
            net.backpropagate(1.0, &[0.5, -1.5]).unwrap();
        }
        for neuron in net.layers()[0].neurons() {
            assert_eq!(neuron.weights(), &[1.0]);
        }
    }

    #[test]
    fn error_trends_down_on_or() {
        let (expected, inputs) = truth_table(|r| r[0] == 1.0 || r[1] == 1.0);
        let mut net = network(4, 1, &[2]);
        let errors: Vec<f64> = (0..300)
            .map(|_| net.train(&expected, &inputs, 1).unwrap())
            .collect();
        let first: f64 = errors[..10].iter().sum();
        let last: f64 = errors[errors.len() - 10..].iter().sum();
        assert!(last < first, "error went from {} to {}", first, last);
    }

    #[test]
    fn training_is_deterministic_under_seed() {
        let (expected, inputs) = truth_table(|r| r[2] == 1.0);
        let mut a = network(4, 1, &[3]);
        let mut b = network(4, 1, &[3]);
        assert_eq!(
            a.train(&expected, &inputs, 20).unwrap(),
            b.train(&expected, &inputs, 20).unwrap()
        );
        for (la, lb) in a.layers().iter().zip(b.layers()) {
            for (na, nb) in la.neurons().iter().zip(lb.neurons()) {
                assert_eq!(na.weights(), nb.weights());
            }
        }
    }

    #[proptest]
    fn single_output_is_in_sigmoid_range(
        seed: u64,
        #[strategy(proptest::collection::vec(-1e6..1e6f64, 3))] inputs: Vec<f64>,
    ) {
        let topology = Topology::new(3, 1, 0.1, &[4, 2]).unwrap();
        let mut net = Network::with_seed(topology, seed).unwrap();
        let output = net.feed_forward(&inputs).unwrap().output();
        assert!(output > 0.0 && output < 1.0);
    }
}
