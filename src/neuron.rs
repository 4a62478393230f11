//! A single sigmoid unit.

use crate::activator::{sigmoid, sigmoid_prime};
use crate::error::{Error, Result};

use rand::Rng;
use std::fmt;

/// The position class of a neuron within the network.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Role {
    /// Receives one external signal through a weight fixed at 1.
    Input,
    Hidden,
    Output,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            Role::Input => "input",
            Role::Hidden => "hidden",
            Role::Output => "output",
        };
        f.write_str(name)
    }
}

/// A neuron with its own weights and the inputs it last saw.
#[derive(Clone, Debug)]
pub struct Neuron {
    role: Role,
    /// One weight per incoming connection.
    weights: Vec<f64>,
    /// The inputs from the last call to `activate`, kept for `learn`.
    inputs: Vec<f64>,
    output: f64,
    delta: f64,
}

impl Neuron {
    /// Creates a neuron with `inputs` incoming connections.
    ///
    /// Input neurons get weights of exactly 1; every other role draws its
    /// weights uniformly from `[0, 1)` using `rng`.
    pub fn new<R: Rng + ?Sized>(role: Role, inputs: usize, rng: &mut R) -> Self {
        let weights = match role {
            Role::Input => vec![1.0; inputs],
            Role::Hidden | Role::Output => (0..inputs).map(|_| rng.gen::<f64>()).collect(),
        };
        Neuron::with_weights(role, weights)
    }

    /// Creates a neuron with the provided starting `weights`.
    pub fn with_weights(role: Role, weights: Vec<f64>) -> Self {
        Neuron {
            role,
            inputs: vec![0.0; weights.len()],
            weights,
            output: 0.0,
            delta: 0.0,
        }
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    pub fn inputs(&self) -> &[f64] {
        &self.inputs
    }

    /// The activation computed by the last call to `activate`.
    pub fn output(&self) -> f64 {
        self.output
    }

    /// The local gradient computed by the last call to `learn`.
    pub fn delta(&self) -> f64 {
        self.delta
    }

    /// Feeds `inputs` through the neuron, returning its new output.
    ///
    /// The output is the sigmoid of the weighted input sum for every role,
    /// including input neurons.
    pub fn activate(&mut self, inputs: &[f64]) -> Result<f64> {
        if inputs.len() != self.weights.len() {
            return Err(Error::shape("neuron inputs", self.weights.len(), inputs.len()));
        }
        self.inputs.copy_from_slice(inputs);
        let sum: f64 = inputs.iter().zip(&self.weights).map(|(x, w)| x * w).sum();
        self.output = sigmoid(sum);
        Ok(self.output)
    }

    /// Adjusts the weights against the provided upstream `error`.
    ///
    /// Input neurons never learn.
    pub fn learn(&mut self, error: f64, learning_rate: f64) {
        if self.role == Role::Input {
            return;
        }
        self.delta = error * sigmoid_prime(self.output);
        let step = self.delta * learning_rate;
        for (w, x) in self.weights.iter_mut().zip(&self.inputs) {
            *w -= x * step;
        }
    }
}

impl fmt::Display for Neuron {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.output)
    }
}
