use ndarray::Array1;
use serde::{Deserialize, Serialize};

/// An enumeration of the possible activation functions that can be used in a
/// network layer.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize, Default)]
pub enum Activation {
    #[default]
    Sigmoid,
    Relu,
    Tanh,
    Linear,
    LeakyRelu { alpha: f64 },
}

impl Activation {
    /// Apply the activation function to an input array in-place.
    pub fn apply(&self, input: &mut Array1<f64>) {
        match self {
            Activation::Sigmoid => {
                input.mapv_inplace(|v| 1.0 / (1.0 + (-v).exp()));
            }
            Activation::Relu => {
                input.mapv_inplace(|v| v.max(0.0));
            }
            Activation::Tanh => {
                input.mapv_inplace(|v| v.tanh());
            }
            Activation::Linear => {}
            Activation::LeakyRelu { alpha } => {
                let a = *alpha;
                input.mapv_inplace(|v| if v > 0.0 { v } else { a * v });
            }
        }
    }

    /// Compute the derivative of the activation function, evaluated at the
    /// pre-activation values.
    pub fn derivative(&self, input: &Array1<f64>) -> Array1<f64> {
        match self {
            Activation::Sigmoid => {
                input.mapv(|v| {
                    let sigmoid = 1.0 / (1.0 + (-v).exp());
                    sigmoid * (1.0 - sigmoid)
                })
            }
            Activation::Relu => {
                input.mapv(|v| if v > 0.0 { 1.0 } else { 0.0 })
            }
            Activation::Tanh => {
                input.mapv(|v| {
                    let tanh_v = v.tanh();
                    1.0 - tanh_v * tanh_v
                })
            }
            Activation::Linear => {
                Array1::ones(input.len())
            }
            Activation::LeakyRelu { alpha } => {
                let a = *alpha;
                input.mapv(|v| if v > 0.0 { 1.0 } else { a })
            }
        }
    }
}
