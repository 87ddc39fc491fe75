use log::{debug, info};
use ndarray::{s, Array1, Array2, ArrayView1, ArrayView2, Axis};

use crate::activations::Activation;
use crate::cost::CostFunction;
use crate::error::{MinervaError, Result};
use crate::layers::{DenseLayer, Layer};
use crate::metrics::CostRecord;
use crate::optimizer::Optimizer;

/// Working state of one sample's forward pass.
///
/// `outputs[i]` is layer i's post-activation output (`outputs[0]` is the raw
/// input, the last entry is the network's output for the sample).
/// `pre_activations[i]` caches layer i's `W · [1; x]` values so that
/// backpropagation evaluates activation derivatives at exactly the values the
/// forward pass produced.
pub struct ForwardTrace {
    pub outputs: Vec<Array1<f64>>,
    pub pre_activations: Vec<Array1<f64>>,
}

impl ForwardTrace {
    /// The network output for the traced sample.
    pub fn output(&self) -> &Array1<f64> {
        self.outputs.last().expect("trace is never empty")
    }
}

/// A feedforward neural network: an ordered sequence of layers, a cost
/// function, and an optimizer.
///
/// The first layer is always an input layer; adjacent layers are bound to
/// each other's sizes at construction and weights are initialized then, so a
/// successfully constructed network is always ready to train.
///
/// Cloning deep-copies every layer and the cost function and takes a
/// fresh-state copy of the optimizer, so clones can be trained independently
/// (for example in parallel experiments).
#[derive(Clone)]
pub struct NeuralNetwork {
    layers: Vec<Layer>,
    cost: Box<dyn CostFunction>,
    optimizer: Box<dyn Optimizer>,
}

impl NeuralNetwork {
    /// Assemble a network from a pre-built layer list.
    ///
    /// Validates the architecture (at least an input layer plus one dense
    /// layer, input layer first and nowhere else, no zero-unit layers), binds
    /// every layer to its predecessor's size, and initializes weights.
    /// Explicit weights supplied at layer construction are checked against
    /// the predecessor's size here; nothing is mutated if any check fails.
    pub fn from_layers(
        mut layers: Vec<Layer>,
        cost: Box<dyn CostFunction>,
        optimizer: Box<dyn Optimizer>,
    ) -> Result<Self> {
        if layers.len() < 2 {
            return Err(MinervaError::invalid_parameter(
                "layers",
                "a network needs an input layer and at least one dense layer",
            ));
        }
        if !layers[0].is_input() {
            return Err(MinervaError::invalid_parameter(
                "layers",
                "the first layer must be an input layer",
            ));
        }
        if layers[1..].iter().any(Layer::is_input) {
            return Err(MinervaError::invalid_parameter(
                "layers",
                "only the first layer may be an input layer",
            ));
        }
        if layers.iter().any(|layer| layer.units() == 0) {
            return Err(MinervaError::invalid_parameter(
                "layers",
                "every layer needs at least one unit",
            ));
        }

        // The layer list is owned here, so a failed shape check discards the
        // partially bound layers instead of leaking them to the caller.
        for i in 1..layers.len() {
            let input_size = layers[i - 1].units();
            // Explicit weight matrices carry their own input size in their
            // column count; it must agree with the predecessor's units.
            if let Some(weights) = layers[i].weights() {
                let declared = weights.ncols().saturating_sub(1);
                if declared != input_size {
                    return Err(MinervaError::ArchitectureMismatch {
                        layer: i,
                        expected: input_size,
                        actual: declared,
                    });
                }
            }
            layers[i].set_input_size(input_size);
            layers[i].initialize_weights(input_size)?;
        }

        Ok(NeuralNetwork {
            layers,
            cost,
            optimizer,
        })
    }

    /// Assemble a network from layer sizes and explicit per-layer weight
    /// matrices (one per dense layer, each shaped
    /// `(units, previous_units + 1)`).
    pub fn with_weights(
        layer_sizes: &[usize],
        weights: Vec<Array2<f64>>,
        activation: Activation,
        cost: Box<dyn CostFunction>,
        optimizer: Box<dyn Optimizer>,
    ) -> Result<Self> {
        if layer_sizes.len() < 2 {
            return Err(MinervaError::invalid_parameter(
                "layer_sizes",
                "a network needs at least an input size and one layer size",
            ));
        }
        if weights.len() != layer_sizes.len() - 1 {
            return Err(MinervaError::shape_mismatch(
                format!("{} weight matrices", layer_sizes.len() - 1),
                format!("{} weight matrices", weights.len()),
            ));
        }

        let mut layers = vec![Layer::input(layer_sizes[0])];
        for (&units, layer_weights) in layer_sizes[1..].iter().zip(weights) {
            layers.push(Layer::Dense(DenseLayer::with_weights(
                units,
                layer_weights,
                activation,
            )));
        }
        Self::from_layers(layers, cost, optimizer)
    }

    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    /// Mutable layer access, for inspection tools that perturb weights in
    /// place. Shape invariants still hold: weights can be edited but not
    /// replaced with a differently shaped matrix through a layer's API.
    pub fn layers_mut(&mut self) -> &mut [Layer] {
        &mut self.layers
    }

    pub fn total_layers(&self) -> usize {
        self.layers.len()
    }

    /// The network's declared input dimensionality.
    pub fn input_size(&self) -> usize {
        self.layers[0].units()
    }

    /// The network's output dimensionality.
    pub fn output_size(&self) -> usize {
        self.layers[self.layers.len() - 1].units()
    }

    /// Run one sample through every layer, recording each layer's output and
    /// pre-activation values.
    pub fn forward_trace(&self, input: ArrayView1<f64>) -> Result<ForwardTrace> {
        let mut outputs = Vec::with_capacity(self.layers.len());
        let mut pre_activations = Vec::with_capacity(self.layers.len());

        let first = self.layers[0].activate(input)?;
        pre_activations.push(first.clone());
        outputs.push(first);

        for i in 1..self.layers.len() {
            let z = self.layers[i].pre_activation(outputs[i - 1].view())?;
            let mut output = z.clone();
            if let Some(activation) = self.layers[i].activation() {
                activation.apply(&mut output);
            }
            pre_activations.push(z);
            outputs.push(output);
        }

        Ok(ForwardTrace {
            outputs,
            pre_activations,
        })
    }

    /// Compute the per-layer error signals for one sample.
    ///
    /// The output layer's error is the cost gradient times the activation
    /// derivative at the final pre-activation values (the chain-rule
    /// terminus); each earlier layer's error is the next layer's
    /// backpropagated signal times its own activation derivative. Index 0
    /// belongs to the input layer and stays zero.
    pub fn layer_errors(
        &self,
        expected: ArrayView1<f64>,
        trace: &ForwardTrace,
    ) -> Result<Vec<Array1<f64>>> {
        if expected.len() != self.output_size() {
            return Err(MinervaError::shape_mismatch(
                format!("expected output of length {}", self.output_size()),
                format!("expected output of length {}", expected.len()),
            ));
        }

        let last = self.layers.len() - 1;
        let mut errors = vec![Array1::zeros(0); self.layers.len()];

        let cost_gradient = self.cost.derivative(trace.outputs[last].view(), expected);
        let activation = self.layers[last]
            .activation()
            .ok_or(MinervaError::UninitializedLayer)?;
        errors[last] = cost_gradient * activation.derivative(&trace.pre_activations[last]);

        for i in (1..last).rev() {
            let back = self.layers[i + 1].backpropagate(errors[i + 1].view())?;
            let activation = self.layers[i]
                .activation()
                .ok_or(MinervaError::UninitializedLayer)?;
            errors[i] = back * activation.derivative(&trace.pre_activations[i]);
        }

        errors[0] = Array1::zeros(self.input_size());
        Ok(errors)
    }

    /// Allocate a zeroed gradient accumulator, one matrix per weighted layer,
    /// each matching that layer's weight shape.
    pub fn zeroed_gradients(&self) -> Result<Vec<Array2<f64>>> {
        self.layers[1..]
            .iter()
            .map(|layer| {
                layer
                    .weights()
                    .map(|w| Array2::zeros(w.dim()))
                    .ok_or(MinervaError::UninitializedLayer)
            })
            .collect()
    }

    /// Fold one sample's per-layer gradients into the batch accumulator.
    /// Accumulation is additive, which is what makes mini-batch summation
    /// work one sample at a time.
    pub fn accumulate_gradients(
        &self,
        errors: &[Array1<f64>],
        trace: &ForwardTrace,
        lambda: f64,
        gradients: &mut [Array2<f64>],
    ) -> Result<()> {
        if gradients.len() != self.layers.len() - 1 {
            return Err(MinervaError::shape_mismatch(
                format!("{} gradient matrices", self.layers.len() - 1),
                format!("{} gradient matrices", gradients.len()),
            ));
        }

        for i in 1..self.layers.len() {
            let contribution = self.layers[i].weight_gradient(
                errors[i].view(),
                trace.outputs[i - 1].view(),
                lambda,
            )?;
            gradients[i - 1] += &contribution;
        }
        Ok(())
    }

    /// One sample's full gradient contribution: forward trace, error signals,
    /// then accumulation.
    pub fn accumulate_sample(
        &self,
        input: ArrayView1<f64>,
        expected: ArrayView1<f64>,
        lambda: f64,
        gradients: &mut [Array2<f64>],
    ) -> Result<()> {
        let trace = self.forward_trace(input)?;
        let errors = self.layer_errors(expected, &trace)?;
        self.accumulate_gradients(&errors, &trace, lambda, gradients)
    }

    /// Average the accumulated gradients over the batch, map them through
    /// the optimizer, and apply the resulting deltas to each weighted layer.
    /// Returns the deltas actually applied.
    pub fn apply_gradients(
        &mut self,
        gradients: &[Array2<f64>],
        total_inputs: f64,
    ) -> Result<Vec<Array2<f64>>> {
        if total_inputs <= 0.0 {
            return Err(MinervaError::invalid_parameter(
                "total_inputs",
                "must be positive",
            ));
        }
        if gradients.len() != self.layers.len() - 1 {
            return Err(MinervaError::shape_mismatch(
                format!("{} gradient matrices", self.layers.len() - 1),
                format!("{} gradient matrices", gradients.len()),
            ));
        }

        let mut deltas = Vec::with_capacity(gradients.len());
        for (index, gradient) in gradients.iter().enumerate() {
            let averaged = gradient / total_inputs;
            let delta = self.optimizer.step(index, &averaged);
            self.layers[index + 1].apply_update(&delta)?;
            deltas.push(delta);
        }
        Ok(deltas)
    }

    /// Compute the network output for a single input vector.
    pub fn predict(&self, input: ArrayView1<f64>) -> Result<Array1<f64>> {
        let mut trace = self.forward_trace(input)?;
        Ok(trace.outputs.pop().expect("trace is never empty"))
    }

    /// Compute the network output for every row of an input matrix,
    /// preserving row order.
    pub fn predict_batch(&self, inputs: ArrayView2<f64>) -> Result<Array2<f64>> {
        self.validate_input_data(inputs)?;
        let mut outputs = Array2::zeros((inputs.nrows(), self.output_size()));
        for (i, row) in inputs.axis_iter(Axis(0)).enumerate() {
            let output = self.predict(row)?;
            outputs.row_mut(i).assign(&output);
        }
        Ok(outputs)
    }

    /// Total cost of one sample: the cost provider summed over the output
    /// vector.
    pub fn sample_cost(&self, output: ArrayView1<f64>, expected: ArrayView1<f64>) -> f64 {
        self.cost.cost(output, expected)
    }

    /// Mean sample cost over a dataset plus the L2 penalty
    /// `lambda/2 · Σ W²` over all non-bias weights.
    pub fn total_cost(
        &self,
        inputs: ArrayView2<f64>,
        targets: ArrayView2<f64>,
        lambda: f64,
    ) -> Result<f64> {
        self.validate_training_data(inputs, targets)?;
        self.validate_lambda(lambda)?;

        let mut total = 0.0;
        for (input, target) in inputs.axis_iter(Axis(0)).zip(targets.axis_iter(Axis(0))) {
            let output = self.predict(input)?;
            total += self.sample_cost(output.view(), target);
        }
        let mut cost = total / inputs.nrows() as f64;

        if lambda != 0.0 {
            let squared: f64 = self
                .layers
                .iter()
                .filter_map(Layer::weights)
                .map(|w| w.slice(s![.., 1..]).mapv(|v| v * v).sum())
                .sum();
            cost += lambda / 2.0 * squared;
        }
        Ok(cost)
    }

    /// Mean of an injectable per-sample comparison over a dataset.
    pub fn total_accuracy<F>(
        &self,
        inputs: ArrayView2<f64>,
        targets: ArrayView2<f64>,
        accuracy_fn: F,
    ) -> Result<f64>
    where
        F: Fn(ArrayView1<f64>, ArrayView1<f64>) -> f64,
    {
        self.validate_training_data(inputs, targets)?;

        let mut total = 0.0;
        for (input, target) in inputs.axis_iter(Axis(0)).zip(targets.axis_iter(Axis(0))) {
            let output = self.predict(input)?;
            total += accuracy_fn(output.view(), target);
        }
        Ok(total / inputs.nrows() as f64)
    }

    /// Train with mini-batch gradient descent.
    ///
    /// Runs `rounds` epochs over the data in order, partitioning samples
    /// into batches of `batch_size` (the final batch of an epoch may be
    /// short). Every `record_interval` batches the regularized total cost
    /// and argmax accuracy over the full dataset are appended to the
    /// returned history. All arguments are validated before any weight is
    /// touched. Shuffling, when wanted, is the caller's concern and keeps
    /// training deterministic here.
    pub fn train(
        &mut self,
        inputs: ArrayView2<f64>,
        targets: ArrayView2<f64>,
        lambda: f64,
        batch_size: usize,
        rounds: usize,
        record_interval: usize,
    ) -> Result<Vec<CostRecord>> {
        self.validate_training_data(inputs, targets)?;
        self.validate_lambda(lambda)?;
        if batch_size == 0 {
            return Err(MinervaError::invalid_parameter(
                "batch_size",
                "must be positive",
            ));
        }
        if rounds == 0 {
            return Err(MinervaError::invalid_parameter(
                "rounds",
                "must be positive",
            ));
        }
        if record_interval == 0 {
            return Err(MinervaError::invalid_parameter(
                "record_interval",
                "must be positive",
            ));
        }

        let samples = inputs.nrows();
        info!(
            "training on {} samples for {} rounds (batch size {}, lambda {})",
            samples, rounds, batch_size, lambda
        );

        let mut history = Vec::new();
        let mut batches = 0usize;

        for round in 0..rounds {
            let mut start = 0;
            while start < samples {
                let end = (start + batch_size).min(samples);

                let mut gradients = self.zeroed_gradients()?;
                for sample in start..end {
                    self.accumulate_sample(
                        inputs.row(sample),
                        targets.row(sample),
                        lambda,
                        &mut gradients,
                    )?;
                }
                self.apply_gradients(&gradients, (end - start) as f64)?;

                batches += 1;
                if batches % record_interval == 0 {
                    let cost = self.total_cost(inputs, targets, lambda)?;
                    let accuracy = self.total_accuracy(inputs, targets, argmax_match)?;
                    debug!(
                        "round {} batch {}: cost {:.6}, accuracy {:.4}",
                        round, batches, cost, accuracy
                    );
                    history.push(CostRecord {
                        round,
                        batch: batches,
                        cost,
                        accuracy,
                    });
                }

                start = end;
            }
        }
        Ok(history)
    }

    fn validate_input_data(&self, inputs: ArrayView2<f64>) -> Result<()> {
        if inputs.nrows() == 0 {
            return Err(MinervaError::invalid_parameter(
                "inputs",
                "must contain at least one sample",
            ));
        }
        if inputs.ncols() != self.input_size() {
            return Err(MinervaError::shape_mismatch(
                format!("{} input columns", self.input_size()),
                format!("{} input columns", inputs.ncols()),
            ));
        }
        Ok(())
    }

    fn validate_output_data(&self, targets: ArrayView2<f64>) -> Result<()> {
        if targets.nrows() == 0 {
            return Err(MinervaError::invalid_parameter(
                "targets",
                "must contain at least one sample",
            ));
        }
        if targets.ncols() != self.output_size() {
            return Err(MinervaError::shape_mismatch(
                format!("{} output columns", self.output_size()),
                format!("{} output columns", targets.ncols()),
            ));
        }
        Ok(())
    }

    fn validate_training_data(
        &self,
        inputs: ArrayView2<f64>,
        targets: ArrayView2<f64>,
    ) -> Result<()> {
        self.validate_input_data(inputs)?;
        self.validate_output_data(targets)?;
        if inputs.nrows() != targets.nrows() {
            return Err(MinervaError::shape_mismatch(
                format!("{} target rows", inputs.nrows()),
                format!("{} target rows", targets.nrows()),
            ));
        }
        Ok(())
    }

    fn validate_lambda(&self, lambda: f64) -> Result<()> {
        if !lambda.is_finite() || lambda < 0.0 {
            return Err(MinervaError::invalid_parameter(
                "lambda",
                "must be finite and non-negative",
            ));
        }
        Ok(())
    }
}

/// Default per-sample accuracy comparison.
///
/// Multi-output vectors compare argmax positions; single outputs are
/// thresholded at 0.5.
pub fn argmax_match(output: ArrayView1<f64>, expected: ArrayView1<f64>) -> f64 {
    let matched = if output.len() == 1 {
        (output[0] > 0.5) == (expected[0] > 0.5)
    } else {
        argmax(output) == argmax(expected)
    };
    if matched {
        1.0
    } else {
        0.0
    }
}

fn argmax(values: ArrayView1<f64>) -> usize {
    let mut best = 0;
    for (i, &v) in values.iter().enumerate() {
        if v > values[best] {
            best = i;
        }
    }
    best
}
