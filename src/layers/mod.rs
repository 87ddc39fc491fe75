//! Network layers: the input pass-through layer, the fully connected layer,
//! and weight initialization strategies.

pub mod dense;
pub mod initialization;
pub mod input;

pub use dense::DenseLayer;
pub use initialization::WeightInit;
pub use input::InputLayer;

use ndarray::{Array1, Array2, ArrayView1};
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// A layer of the network.
///
/// The set of layer kinds is closed: a network is always an [`InputLayer`]
/// followed by one or more [`DenseLayer`]s, and every operation dispatches
/// over exactly these two variants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Layer {
    Input(InputLayer),
    Dense(DenseLayer),
}

impl Layer {
    /// Convenience constructor for an input layer.
    pub fn input(units: usize) -> Self {
        Layer::Input(InputLayer::new(units))
    }

    /// Convenience constructor for a dense layer.
    pub fn dense(units: usize, activation: crate::activations::Activation) -> Self {
        Layer::Dense(DenseLayer::new(units, activation))
    }

    /// The layer's declared unit count.
    pub fn units(&self) -> usize {
        match self {
            Layer::Input(layer) => layer.units(),
            Layer::Dense(layer) => layer.units(),
        }
    }

    /// True for weightless layers that only pass values through.
    pub fn is_input(&self) -> bool {
        matches!(self, Layer::Input(_))
    }

    /// Record the incoming dimensionality. No-op for input layers.
    pub fn set_input_size(&mut self, input_size: usize) {
        match self {
            Layer::Input(_) => {}
            Layer::Dense(layer) => layer.set_input_size(input_size),
        }
    }

    /// Bind weights for the recorded input size. No-op for input layers.
    pub fn initialize_weights(&mut self, input_size: usize) -> Result<()> {
        match self {
            Layer::Input(_) => Ok(()),
            Layer::Dense(layer) => layer.initialize_weights(input_size),
        }
    }

    /// The layer's activation function, if it has one.
    pub fn activation(&self) -> Option<crate::activations::Activation> {
        match self {
            Layer::Input(_) => None,
            Layer::Dense(layer) => Some(layer.activation()),
        }
    }

    /// The layer's weight matrix, if it has one.
    pub fn weights(&self) -> Option<&Array2<f64>> {
        match self {
            Layer::Input(_) => None,
            Layer::Dense(layer) => layer.weights(),
        }
    }

    /// Mutable access to the layer's weight matrix, if it has one.
    pub fn weights_mut(&mut self) -> Option<&mut Array2<f64>> {
        match self {
            Layer::Input(_) => None,
            Layer::Dense(layer) => layer.weights_mut(),
        }
    }

    /// Pre-activation values for the given input (`W · [1; x]` for dense
    /// layers, the input itself for input layers).
    pub fn pre_activation(&self, input: ArrayView1<f64>) -> Result<Array1<f64>> {
        match self {
            Layer::Input(layer) => layer.pre_activation(input),
            Layer::Dense(layer) => layer.pre_activation(input),
        }
    }

    /// The layer's output for the given input.
    pub fn activate(&self, input: ArrayView1<f64>) -> Result<Array1<f64>> {
        match self {
            Layer::Input(layer) => layer.activate(input),
            Layer::Dense(layer) => layer.activate(input),
        }
    }

    /// Propagate an error signal to the previous layer.
    pub fn backpropagate(&self, error: ArrayView1<f64>) -> Result<Array1<f64>> {
        match self {
            Layer::Input(layer) => layer.backpropagate(error),
            Layer::Dense(layer) => layer.backpropagate(error),
        }
    }

    /// One sample's gradient contribution for this layer's weights.
    pub fn weight_gradient(
        &self,
        error: ArrayView1<f64>,
        prev_output: ArrayView1<f64>,
        lambda: f64,
    ) -> Result<Array2<f64>> {
        match self {
            Layer::Input(layer) => Ok(layer.weight_gradient()),
            Layer::Dense(layer) => layer.weight_gradient(error, prev_output, lambda),
        }
    }

    /// Apply a weight update. No-op for input layers.
    pub fn apply_update(&mut self, delta: &Array2<f64>) -> Result<()> {
        match self {
            Layer::Input(_) => Ok(()),
            Layer::Dense(layer) => layer.apply_update(delta),
        }
    }
}
