use crate::error::{Error, Result};
use crate::neuron::{Neuron, Role};

use rand::Rng;
use std::fmt;

/// A fixed-size row of neurons that share a role.
#[derive(Clone, Debug)]
pub struct Layer {
    role: Role,
    neurons: Vec<Neuron>,
}

impl Layer {
    /// Wraps `neurons` into a layer, checking that all of them have `role`.
    pub fn new(role: Role, neurons: Vec<Neuron>) -> Result<Self> {
        if let Some(stray) = neurons.iter().find(|n| n.role() != role) {
            return Err(Error::RoleMismatch {
                expected: role,
                actual: stray.role(),
            });
        }
        Ok(Layer { role, neurons })
    }

    /// Initializes a layer of `size` fresh neurons, each with `inputs`
    /// incoming connections.
    pub fn random<R: Rng + ?Sized>(role: Role, size: usize, inputs: usize, rng: &mut R) -> Self {
        Layer {
            role,
            neurons: (0..size).map(|_| Neuron::new(role, inputs, rng)).collect(),
        }
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn neurons(&self) -> &[Neuron] {
        &self.neurons
    }

    pub(crate) fn neurons_mut(&mut self) -> &mut [Neuron] {
        &mut self.neurons
    }

    pub fn neuron_count(&self) -> usize {
        self.neurons.len()
    }

    /// Returns the current output of every neuron, in order.
    pub fn outputs(&self) -> Vec<f64> {
        self.neurons.iter().map(Neuron::output).collect()
    }
}

impl fmt::Display for Layer {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.role)
    }
}
