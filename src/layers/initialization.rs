use ndarray::{s, Array2};
use ndarray_rand::rand_distr::{Normal, Uniform};
use ndarray_rand::RandomExt;
use serde::{Deserialize, Serialize};

/// Weight initialization strategies.
///
/// Generated matrices are shaped `(units, input_size + 1)`: column 0 holds
/// the bias terms and always starts at zero, the remaining columns hold the
/// kernel.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub enum WeightInit {
    /// He/Kaiming normal initialization (for ReLU)
    HeNormal,

    /// Xavier/Glorot normal initialization
    #[default]
    GlorotNormal,

    /// Uniform distribution with custom range
    Uniform { min: f64, max: f64 },

    /// All zeros
    Zeros,
}

impl WeightInit {
    /// Generate a bias-augmented weight matrix for a layer with `input_size`
    /// incoming values and `units` outputs.
    pub fn generate(&self, input_size: usize, units: usize) -> Array2<f64> {
        let shape = (units, input_size + 1);

        let mut weights = match self {
            WeightInit::HeNormal => {
                let std = (2.0 / input_size as f64).sqrt();
                Array2::random(shape, Normal::new(0.0, std).unwrap())
            }

            WeightInit::GlorotNormal => {
                let std = (2.0 / (input_size + units) as f64).sqrt();
                Array2::random(shape, Normal::new(0.0, std).unwrap())
            }

            WeightInit::Uniform { min, max } => {
                Array2::random(shape, Uniform::new(*min, *max))
            }

            WeightInit::Zeros => Array2::zeros(shape),
        };

        // Bias column starts at zero regardless of strategy
        weights.slice_mut(s![.., 0]).fill(0.0);
        weights
    }

    /// Get the recommended initialization for an activation function
    pub fn for_activation(activation: &crate::activations::Activation) -> Self {
        use crate::activations::Activation;

        match activation {
            Activation::Relu | Activation::LeakyRelu { .. } => WeightInit::HeNormal,
            Activation::Sigmoid | Activation::Tanh | Activation::Linear => {
                WeightInit::GlorotNormal
            }
        }
    }
}
