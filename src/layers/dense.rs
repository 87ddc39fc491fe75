use ndarray::{s, Array1, Array2, ArrayView1, Axis};
use serde::{Deserialize, Serialize};

use crate::activations::Activation;
use crate::error::{MinervaError, Result};
use crate::layers::initialization::WeightInit;

/// A fully connected layer.
///
/// The bias is folded into the weight matrix: `weights` is shaped
/// `(units, input_size + 1)` and column 0 holds the bias terms, so the
/// forward pass is `W · [1; x]`. Weights stay unset until the layer is bound
/// into a network, which calls [`DenseLayer::set_input_size`] followed by
/// [`DenseLayer::initialize_weights`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DenseLayer {
    units: usize,
    input_size: Option<usize>,
    weights: Option<Array2<f64>>,
    /// Weights were supplied at construction and must not be regenerated.
    explicit_weights: bool,
    activation: Activation,
    initializer: WeightInit,
}

impl DenseLayer {
    /// Create a dense layer with the initializer recommended for the given
    /// activation function.
    pub fn new(units: usize, activation: Activation) -> Self {
        Self::with_initializer(units, WeightInit::for_activation(&activation), activation)
    }

    /// Create a dense layer with an explicit initialization strategy.
    pub fn with_initializer(units: usize, initializer: WeightInit, activation: Activation) -> Self {
        DenseLayer {
            units,
            input_size: None,
            weights: None,
            explicit_weights: false,
            activation,
            initializer,
        }
    }

    /// Create a dense layer with explicit, pre-trained or hand-picked
    /// weights. The shape is validated when the layer is bound into a
    /// network.
    pub fn with_weights(units: usize, weights: Array2<f64>, activation: Activation) -> Self {
        DenseLayer {
            units,
            input_size: None,
            weights: Some(weights),
            explicit_weights: true,
            activation,
            initializer: WeightInit::for_activation(&activation),
        }
    }

    pub fn units(&self) -> usize {
        self.units
    }

    pub fn input_size(&self) -> Option<usize> {
        self.input_size
    }

    pub fn activation(&self) -> Activation {
        self.activation
    }

    pub fn initializer(&self) -> WeightInit {
        self.initializer
    }

    pub fn weights(&self) -> Option<&Array2<f64>> {
        self.weights.as_ref()
    }

    pub fn weights_mut(&mut self) -> Option<&mut Array2<f64>> {
        self.weights.as_mut()
    }

    /// Record the incoming dimensionality. Does not touch the weights.
    pub fn set_input_size(&mut self, input_size: usize) {
        self.input_size = Some(input_size);
    }

    /// Bind the layer's weights for an input of size `input_size`.
    ///
    /// Explicit weights from construction are validated against the expected
    /// `(units, input_size + 1)` shape; otherwise a fresh matrix is drawn
    /// from the initializer.
    pub fn initialize_weights(&mut self, input_size: usize) -> Result<()> {
        self.input_size = Some(input_size);

        if self.explicit_weights {
            let weights = self.weights.as_ref().ok_or(MinervaError::UninitializedLayer)?;
            let expected = (self.units, input_size + 1);
            if weights.dim() != expected {
                return Err(MinervaError::shape_mismatch(
                    format!("weight matrix of shape {:?}", expected),
                    format!("weight matrix of shape {:?}", weights.dim()),
                ));
            }
        } else {
            self.weights = Some(self.initializer.generate(input_size, self.units));
        }
        Ok(())
    }

    fn bound_weights(&self) -> Result<&Array2<f64>> {
        self.weights.as_ref().ok_or(MinervaError::UninitializedLayer)
    }

    fn check_input(&self, input: ArrayView1<f64>) -> Result<&Array2<f64>> {
        let weights = self.bound_weights()?;
        let input_size = weights.ncols() - 1;
        if input.len() != input_size {
            return Err(MinervaError::shape_mismatch(
                format!("input vector of length {}", input_size),
                format!("input vector of length {}", input.len()),
            ));
        }
        Ok(weights)
    }

    /// Prepend the constant bias input to a vector.
    fn augment(input: ArrayView1<f64>) -> Array1<f64> {
        let mut augmented = Array1::ones(input.len() + 1);
        augmented.slice_mut(s![1..]).assign(&input);
        augmented
    }

    /// Compute the pre-activation values `W · [1; x]`.
    pub fn pre_activation(&self, input: ArrayView1<f64>) -> Result<Array1<f64>> {
        let weights = self.check_input(input)?;
        Ok(weights.dot(&Self::augment(input)))
    }

    /// Compute the layer's output: the activation applied to `W · [1; x]`.
    pub fn activate(&self, input: ArrayView1<f64>) -> Result<Array1<f64>> {
        let mut output = self.pre_activation(input)?;
        self.activation.apply(&mut output);
        Ok(output)
    }

    /// Propagate an error signal back to the previous layer.
    ///
    /// The bias column is excluded: the bias input is constant, so it carries
    /// no error to the previous layer's outputs.
    pub fn backpropagate(&self, error: ArrayView1<f64>) -> Result<Array1<f64>> {
        let weights = self.bound_weights()?;
        if error.len() != self.units {
            return Err(MinervaError::shape_mismatch(
                format!("error vector of length {}", self.units),
                format!("error vector of length {}", error.len()),
            ));
        }
        let kernel = weights.slice(s![.., 1..]);
        Ok(kernel.t().dot(&error))
    }

    /// Compute this layer's weight gradient for one sample: the outer
    /// product `error · [1; prev_output]^T`, plus the L2 term `lambda · W`
    /// on every column except the bias column.
    pub fn weight_gradient(
        &self,
        error: ArrayView1<f64>,
        prev_output: ArrayView1<f64>,
        lambda: f64,
    ) -> Result<Array2<f64>> {
        let weights = self.check_input(prev_output)?;
        if error.len() != self.units {
            return Err(MinervaError::shape_mismatch(
                format!("error vector of length {}", self.units),
                format!("error vector of length {}", error.len()),
            ));
        }

        let augmented = Self::augment(prev_output);
        let error_col = error.insert_axis(Axis(1));
        let augmented_row = augmented.view().insert_axis(Axis(0));
        let mut gradient = error_col.dot(&augmented_row);

        if lambda != 0.0 {
            let penalty = weights.slice(s![.., 1..]).to_owned() * lambda;
            let mut kernel_gradient = gradient.slice_mut(s![.., 1..]);
            kernel_gradient += &penalty;
        }
        Ok(gradient)
    }

    /// Apply a weight update: `W ← W − delta`.
    pub fn apply_update(&mut self, delta: &Array2<f64>) -> Result<()> {
        let weights = self.weights.as_mut().ok_or(MinervaError::UninitializedLayer)?;
        if delta.dim() != weights.dim() {
            return Err(MinervaError::shape_mismatch(
                format!("delta of shape {:?}", weights.dim()),
                format!("delta of shape {:?}", delta.dim()),
            ));
        }
        *weights -= delta;
        Ok(())
    }
}
