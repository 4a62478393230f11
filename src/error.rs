//! Errors raised by the network.

use crate::neuron::Role;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Caller-supplied data that the network cannot work with.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// A vector or matrix has the wrong dimensions.
    #[error("{what}: expected {expected}, got {actual}")]
    ShapeMismatch {
        what: &'static str,
        expected: usize,
        actual: usize,
    },

    /// A column can't be rescaled because all of its values are equal.
    #[error("column {column} has zero variance")]
    DegenerateColumn { column: usize },

    #[error("invalid topology: {0}")]
    InvalidTopology(String),

    /// A layer was assembled from neurons of another role.
    #[error("{actual} neuron in a layer of {expected} neurons")]
    RoleMismatch { expected: Role, actual: Role },

    #[error("nothing to train on")]
    EmptyTrainingSet,
}

impl Error {
    pub(crate) fn shape(what: &'static str, expected: usize, actual: usize) -> Self {
        Error::ShapeMismatch {
            what,
            expected,
            actual,
        }
    }
}
