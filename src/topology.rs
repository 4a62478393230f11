//! The shape of a network and the rate it learns at.

use crate::error::{Error, Result};

/// Describes a fully connected network.
///
/// Topologies can be loaded from any serde format, e.g. JSON:
///
/// ```
/// # use sigmoid_net::Topology;
/// let topology: Topology = serde_json::from_str(
///     r#"{"input_count": 4, "output_count": 1, "learning_rate": 0.1, "hidden_layers": [2]}"#,
/// ).unwrap();
/// assert_eq!(topology.hidden_layers(), &[2]);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Topology {
    input_count: usize,
    output_count: usize,
    learning_rate: f64,
    #[serde(default)]
    hidden_layers: Vec<usize>,
}

impl Topology {
    /// Creates a new topology.
    ///
    /// Arguments:
    ///
    ///  * `input_count` - the number of features in each sample.
    ///  * `output_count` - the number of output neurons.
    ///  * `learning_rate` - the gradient descent step size.
    ///  * `hidden_layers` - the width of each hidden layer, in order. May be
    ///                      empty, in which case inputs feed the output layer
    ///                      directly.
    pub fn new(
        input_count: usize,
        output_count: usize,
        learning_rate: f64,
        hidden_layers: &[usize],
    ) -> Result<Self> {
        let topology = Topology {
            input_count,
            output_count,
            learning_rate,
            hidden_layers: hidden_layers.into(),
        };
        topology.validate()?;
        Ok(topology)
    }

    pub fn input_count(&self) -> usize {
        self.input_count
    }

    pub fn output_count(&self) -> usize {
        self.output_count
    }

    pub fn learning_rate(&self) -> f64 {
        self.learning_rate
    }

    pub fn hidden_layers(&self) -> &[usize] {
        &self.hidden_layers
    }

    /// Checks the invariants that deserialization can't enforce.
    pub fn validate(&self) -> Result<()> {
        if self.input_count == 0 {
            return Err(Error::InvalidTopology("input count must be positive".into()));
        }
        if self.output_count == 0 {
            return Err(Error::InvalidTopology("output count must be positive".into()));
        }
        if !(self.learning_rate.is_finite() && self.learning_rate > 0.0) {
            return Err(Error::InvalidTopology(format!(
                "learning rate must be positive, got {}",
                self.learning_rate
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_inputs() {
        assert!(Topology::new(0, 1, 0.1, &[2]).is_err());
    }

    #[test]
    fn zero_outputs() {
        assert!(Topology::new(1, 0, 0.1, &[2]).is_err());
    }

    #[test]
    fn bad_learning_rate() {
        assert!(Topology::new(1, 1, 0.0, &[]).is_err());
        assert!(Topology::new(1, 1, -0.5, &[]).is_err());
        assert!(Topology::new(1, 1, f64::NAN, &[]).is_err());
    }

    #[test]
    fn no_hidden_layers() {
        let topology = Topology::new(3, 2, 0.5, &[]).unwrap();
        assert!(topology.hidden_layers().is_empty());
    }

    #[test]
    fn deserialized_topology_can_be_invalid() {
        let topology: Topology = serde_json::from_str(
            r#"{"input_count": 0, "output_count": 1, "learning_rate": 0.1}"#,
        )
        .unwrap();
        assert!(topology.hidden_layers().is_empty());
        assert!(matches!(
            topology.validate(),
            Err(Error::InvalidTopology(_))
        ));
    }
}
