//! A small feedforward neural network of sigmoid neurons, trained one
//! sample at a time by backpropagation.

extern crate itertools;
extern crate log;
extern crate rand;
#[macro_use]
extern crate serde_derive;
extern crate thiserror;

pub mod activator;
pub mod error;
pub mod layer;
pub mod matrix;
pub mod network;
pub mod neuron;
pub mod normalize;
pub mod topology;
pub mod trainer;

pub use crate::error::{Error, Result};
pub use crate::layer::Layer;
pub use crate::matrix::Matrix;
pub use crate::network::{Network, Prediction};
pub use crate::neuron::{Neuron, Role};
pub use crate::normalize::{normalize, scale};
pub use crate::topology::Topology;
pub use crate::trainer::{Logging, StopCondition, Trainer};
