use ndarray::{Array2, ArrayView1, Axis};

use crate::error::{MinervaError, Result};
use crate::network::NeuralNetwork;

/// Compute central-difference numerical gradients of the regularized total
/// cost for a single sample, one matrix per weighted layer.
///
/// Every weight is perturbed by `±epsilon` in turn and restored afterwards,
/// so the network is unchanged on return.
pub fn numerical_gradients(
    network: &mut NeuralNetwork,
    input: ArrayView1<f64>,
    target: ArrayView1<f64>,
    lambda: f64,
    epsilon: f64,
) -> Result<Vec<Array2<f64>>> {
    if epsilon <= 0.0 {
        return Err(MinervaError::invalid_parameter(
            "epsilon",
            "must be positive",
        ));
    }

    let inputs = input.insert_axis(Axis(0));
    let targets = target.insert_axis(Axis(0));

    let mut gradients = Vec::with_capacity(network.total_layers() - 1);
    for layer_index in 1..network.total_layers() {
        let shape = network.layers()[layer_index]
            .weights()
            .ok_or(MinervaError::UninitializedLayer)?
            .dim();
        let mut gradient = Array2::zeros(shape);

        for i in 0..shape.0 {
            for j in 0..shape.1 {
                let original = perturb(network, layer_index, i, j, epsilon)?;
                let cost_plus = network.total_cost(inputs, targets, lambda)?;
                restore(network, layer_index, i, j, original - epsilon)?;
                let cost_minus = network.total_cost(inputs, targets, lambda)?;
                restore(network, layer_index, i, j, original)?;

                gradient[[i, j]] = (cost_plus - cost_minus) / (2.0 * epsilon);
            }
        }
        gradients.push(gradient);
    }
    Ok(gradients)
}

/// Compare the analytic single-sample gradient against the numerical one.
/// Returns the maximum absolute deviation per weighted layer.
pub fn gradient_check(
    network: &mut NeuralNetwork,
    input: ArrayView1<f64>,
    target: ArrayView1<f64>,
    lambda: f64,
    epsilon: f64,
) -> Result<Vec<f64>> {
    let mut analytic = network.zeroed_gradients()?;
    network.accumulate_sample(input, target, lambda, &mut analytic)?;
    let numerical = numerical_gradients(network, input, target, lambda, epsilon)?;

    Ok(analytic
        .iter()
        .zip(numerical.iter())
        .map(|(a, n)| {
            (a - n)
                .iter()
                .map(|&d| d.abs())
                .fold(0.0, f64::max)
        })
        .collect())
}

fn perturb(
    network: &mut NeuralNetwork,
    layer: usize,
    i: usize,
    j: usize,
    epsilon: f64,
) -> Result<f64> {
    let weights = network.layers_mut()[layer]
        .weights_mut()
        .ok_or(MinervaError::UninitializedLayer)?;
    let original = weights[[i, j]];
    weights[[i, j]] = original + epsilon;
    Ok(original)
}

fn restore(network: &mut NeuralNetwork, layer: usize, i: usize, j: usize, value: f64) -> Result<()> {
    let weights = network.layers_mut()[layer]
        .weights_mut()
        .ok_or(MinervaError::UninitializedLayer)?;
    weights[[i, j]] = value;
    Ok(())
}
