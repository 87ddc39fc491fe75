use ndarray::{Array1, ArrayView1};

/// Trait defining the interface for cost functions.
///
/// `cost` returns the total cost over one sample's output vector;
/// `derivative` returns the gradient of that cost with respect to the
/// network's output.
pub trait CostFunction: Send + Sync {
    /// Compute the cost for a single output vector and its expected values
    fn cost(&self, output: ArrayView1<f64>, expected: ArrayView1<f64>) -> f64;

    /// Compute the gradient of the cost with respect to the output
    fn derivative(&self, output: ArrayView1<f64>, expected: ArrayView1<f64>) -> Array1<f64>;

    /// Clone the cost function into a boxed trait object
    fn clone_box(&self) -> Box<dyn CostFunction>;
}

impl Clone for Box<dyn CostFunction> {
    fn clone(&self) -> Self {
        self.clone_box()
    }
}

/// Keeps logs and divisions away from 0 and 1.
const EPSILON: f64 = 1e-12;

/// Binary cross-entropy cost for classification
#[derive(Clone, Copy, Debug, Default)]
pub struct CrossEntropy;

impl CostFunction for CrossEntropy {
    fn cost(&self, output: ArrayView1<f64>, expected: ArrayView1<f64>) -> f64 {
        output
            .iter()
            .zip(expected.iter())
            .map(|(&a, &y)| {
                let a = a.clamp(EPSILON, 1.0 - EPSILON);
                -(y * a.ln() + (1.0 - y) * (1.0 - a).ln())
            })
            .sum()
    }

    fn derivative(&self, output: ArrayView1<f64>, expected: ArrayView1<f64>) -> Array1<f64> {
        Array1::from_shape_fn(output.len(), |i| {
            let a = output[i].clamp(EPSILON, 1.0 - EPSILON);
            (a - expected[i]) / (a * (1.0 - a))
        })
    }

    fn clone_box(&self) -> Box<dyn CostFunction> {
        Box::new(*self)
    }
}

/// Mean squared error cost for regression
#[derive(Clone, Copy, Debug, Default)]
pub struct MeanSquaredError;

impl CostFunction for MeanSquaredError {
    fn cost(&self, output: ArrayView1<f64>, expected: ArrayView1<f64>) -> f64 {
        output
            .iter()
            .zip(expected.iter())
            .map(|(&a, &y)| 0.5 * (a - y) * (a - y))
            .sum()
    }

    fn derivative(&self, output: ArrayView1<f64>, expected: ArrayView1<f64>) -> Array1<f64> {
        &output - &expected
    }

    fn clone_box(&self) -> Box<dyn CostFunction> {
        Box::new(*self)
    }
}
