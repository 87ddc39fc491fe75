use crate::activations::Activation;
use crate::cost::{CostFunction, CrossEntropy};
use crate::error::{MinervaError, Result};
use crate::layers::{DenseLayer, Layer, WeightInit};
use crate::network::NeuralNetwork;
use crate::optimizer::Optimizer;

/// Builder for constructing neural networks with a fluent API
pub struct NetworkBuilder {
    layers: Vec<Layer>,
    cost: Option<Box<dyn CostFunction>>,
    optimizer: Option<Box<dyn Optimizer>>,
}

impl NetworkBuilder {
    /// Create a new network builder
    pub fn new() -> Self {
        NetworkBuilder {
            layers: Vec::new(),
            cost: None,
            optimizer: None,
        }
    }

    /// Declare the network's input dimensionality (always the first layer)
    pub fn input(mut self, units: usize) -> Self {
        self.layers.push(Layer::input(units));
        self
    }

    /// Add a dense layer with the initializer recommended for its activation
    pub fn dense(mut self, units: usize, activation: Activation) -> Self {
        self.layers.push(Layer::dense(units, activation));
        self
    }

    /// Add a dense layer with an explicit initialization strategy
    pub fn dense_with_initializer(
        mut self,
        units: usize,
        initializer: WeightInit,
        activation: Activation,
    ) -> Self {
        self.layers.push(Layer::Dense(DenseLayer::with_initializer(
            units,
            initializer,
            activation,
        )));
        self
    }

    /// Add a dense layer with explicit weights, shaped
    /// `(units, previous_units + 1)`
    pub fn dense_with_weights(
        mut self,
        units: usize,
        weights: ndarray::Array2<f64>,
        activation: Activation,
    ) -> Self {
        self.layers.push(Layer::Dense(DenseLayer::with_weights(
            units, weights, activation,
        )));
        self
    }

    /// Set the cost function (defaults to cross-entropy)
    pub fn cost(mut self, cost: Box<dyn CostFunction>) -> Self {
        self.cost = Some(cost);
        self
    }

    /// Set the optimizer
    pub fn optimizer(mut self, optimizer: Box<dyn Optimizer>) -> Self {
        self.optimizer = Some(optimizer);
        self
    }

    /// Build the neural network
    pub fn build(self) -> Result<NeuralNetwork> {
        let optimizer = self.optimizer.ok_or_else(|| {
            MinervaError::invalid_parameter("optimizer", "optimizer not specified")
        })?;
        let cost = self.cost.unwrap_or_else(|| Box::new(CrossEntropy));
        NeuralNetwork::from_layers(self.layers, cost, optimizer)
    }
}

impl Default for NetworkBuilder {
    fn default() -> Self {
        Self::new()
    }
}
