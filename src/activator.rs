//! The [sigmoid](https://en.wikipedia.org/wiki/Sigmoid_function) activation.

/// Magnitude past which the exponential is not evaluated.
///
/// `1 / (1 + e^40)` is already below `f64::EPSILON`, so clamping here does
/// not change the result at double precision.
const CLAMP: f64 = 40.0;

/// Evaluates `1 / (1 + e^-x)`.
pub fn sigmoid(x: f64) -> f64 {
    1.0 / (1.0 + (-x.clamp(-CLAMP, CLAMP)).exp())
}

/// Evaluates the derivative of the sigmoid, where `y = sigmoid(x)`.
///
/// Note that this function takes in the *output* of the activation
/// function, rather than the input. Neurons only keep their activated
/// output, so this saves recomputing the weighted sum.
pub fn sigmoid_prime(y: f64) -> f64 {
    y * (1.0 - y)
}
