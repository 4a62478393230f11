extern crate env_logger;
extern crate serde_json;
extern crate sigmoid_net;

use sigmoid_net::{normalize, Logging, Matrix, StopCondition, Topology, Trainer};
use std::error::Error;
use std::fs;

// Columns: bad temperature, good age, smoking, proper nutrition.
// Label: 1 if the patient is sick.
const PATIENTS: [([f64; 4], f64); 16] = [
    ([0.0, 0.0, 0.0, 0.0], 0.0),
    ([0.0, 0.0, 0.0, 1.0], 0.0),
    ([0.0, 0.0, 1.0, 0.0], 1.0),
    ([0.0, 0.0, 1.0, 1.0], 0.0),
    ([0.0, 1.0, 0.0, 0.0], 0.0),
    ([0.0, 1.0, 0.0, 1.0], 0.0),
    ([0.0, 1.0, 1.0, 0.0], 1.0),
    ([0.0, 1.0, 1.0, 1.0], 0.0),
    ([1.0, 0.0, 0.0, 0.0], 1.0),
    ([1.0, 0.0, 0.0, 1.0], 1.0),
    ([1.0, 0.0, 1.0, 0.0], 1.0),
    ([1.0, 0.0, 1.0, 1.0], 1.0),
    ([1.0, 1.0, 0.0, 0.0], 1.0),
    ([1.0, 1.0, 0.0, 1.0], 0.0),
    ([1.0, 1.0, 1.0, 0.0], 1.0),
    ([1.0, 1.0, 1.0, 1.0], 1.0),
];

/// Loads a JSON topology from the first argument, or falls back to a single
/// hidden layer of two neurons.
fn topology() -> Result<Topology, Box<dyn Error>> {
    match std::env::args().nth(1) {
        Some(path) => {
            let topology: Topology = serde_json::from_str(&fs::read_to_string(path)?)?;
            topology.validate()?;
            Ok(topology)
        }
        None => Ok(Topology::new(4, 1, 0.1, &[2])?),
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    let rows: Vec<[f64; 4]> = PATIENTS.iter().map(|&(row, _)| row).collect();
    let expected: Vec<f64> = PATIENTS.iter().map(|&(_, label)| label).collect();
    let inputs = Matrix::from_rows(&rows)?;

    let (mut network, error) = Trainer::new(topology()?)
        .seed(0)
        .logging(Logging::Epochs(1000))
        .stop_condition(StopCondition::Epochs(10_000))
        .train(&expected, &inputs)?;
    println!("Training error: {}", error);

    let signals = normalize(&inputs)?;
    let mut num_correct = 0;
    for (row, &label) in signals.iter_rows().zip(&expected) {
        let output = network.feed_forward(row)?.output();
        if output.round() == label {
            num_correct += 1;
        }
    }
    println!("{} of {} patients classified correctly", num_correct, expected.len());
    Ok(())
}
