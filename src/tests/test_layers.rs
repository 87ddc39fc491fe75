use ndarray::{array, s, Array1, Array2};

use crate::activations::Activation;
use crate::error::MinervaError;
use crate::layers::{DenseLayer, InputLayer, Layer, WeightInit};

fn fixed_dense() -> DenseLayer {
    // 2 units, input size 2, bias in column 0
    let weights = array![[1.0, 2.0, 3.0], [0.0, -1.0, 1.0]];
    let mut layer = DenseLayer::with_weights(2, weights, Activation::Sigmoid);
    layer.initialize_weights(2).unwrap();
    layer
}

#[test]
fn test_dense_pre_activation_is_bias_augmented_product() {
    let layer = fixed_dense();
    let input = array![0.5, -1.0];

    let z = layer.pre_activation(input.view()).unwrap();
    assert_eq!(z.len(), 2);
    // z = W · [1; x]
    assert!((z[0] - (1.0 + 2.0 * 0.5 + 3.0 * -1.0)).abs() < 1e-12);
    assert!((z[1] - (0.0 + -1.0 * 0.5 + 1.0 * -1.0)).abs() < 1e-12);
}

#[test]
fn test_dense_activate_applies_activation_to_z() {
    let layer = fixed_dense();
    let input = array![0.5, -1.0];

    let z = layer.pre_activation(input.view()).unwrap();
    let output = layer.activate(input.view()).unwrap();
    for (o, zi) in output.iter().zip(z.iter()) {
        let sigmoid = 1.0 / (1.0 + (-zi).exp());
        assert!((o - sigmoid).abs() < 1e-12);
    }
}

#[test]
fn test_dense_rejects_wrong_input_length() {
    let layer = fixed_dense();
    let result = layer.pre_activation(array![1.0, 2.0, 3.0].view());
    assert!(matches!(result, Err(MinervaError::ShapeMismatch { .. })));
}

#[test]
fn test_dense_backpropagate_drops_bias_column() {
    let layer = fixed_dense();
    let error = array![2.0, -1.0];

    let back = layer.backpropagate(error.view()).unwrap();
    // kernel^T · error, kernel = W without column 0
    assert_eq!(back.len(), 2);
    assert!((back[0] - (2.0 * 2.0 + -1.0 * -1.0)).abs() < 1e-12);
    assert!((back[1] - (3.0 * 2.0 + 1.0 * -1.0)).abs() < 1e-12);
}

#[test]
fn test_dense_weight_gradient_outer_product() {
    let layer = fixed_dense();
    let error = array![2.0, -1.0];
    let prev_output = array![0.5, -1.0];

    let gradient = layer
        .weight_gradient(error.view(), prev_output.view(), 0.0)
        .unwrap();
    let expected = array![[2.0, 1.0, -2.0], [-1.0, -0.5, 1.0]];
    assert_eq!(gradient, expected);
}

#[test]
fn test_regularization_skips_bias_column() {
    let layer = fixed_dense();
    let error = array![2.0, -1.0];
    let prev_output = array![0.5, -1.0];
    let lambda = 0.1;

    let plain = layer
        .weight_gradient(error.view(), prev_output.view(), 0.0)
        .unwrap();
    let regularized = layer
        .weight_gradient(error.view(), prev_output.view(), lambda)
        .unwrap();

    // Bias column identical with and without lambda
    assert_eq!(plain.slice(s![.., 0]), regularized.slice(s![.., 0]));

    // Non-bias columns shifted by lambda * W
    let weights = layer.weights().unwrap();
    for i in 0..2 {
        for j in 1..3 {
            let expected = plain[[i, j]] + lambda * weights[[i, j]];
            assert!((regularized[[i, j]] - expected).abs() < 1e-12);
        }
    }
}

#[test]
fn test_zero_delta_update_leaves_weights_unchanged() {
    let mut layer = fixed_dense();
    let before = layer.weights().unwrap().clone();

    layer.apply_update(&Array2::zeros((2, 3))).unwrap();
    assert_eq!(layer.weights().unwrap(), &before);
}

#[test]
fn test_update_subtracts_delta() {
    let mut layer = fixed_dense();
    let delta = array![[0.5, 0.5, 0.5], [0.5, 0.5, 0.5]];

    layer.apply_update(&delta).unwrap();
    let expected = array![[0.5, 1.5, 2.5], [-0.5, -1.5, 0.5]];
    assert_eq!(layer.weights().unwrap(), &expected);
}

#[test]
fn test_update_rejects_wrong_shape() {
    let mut layer = fixed_dense();
    let result = layer.apply_update(&Array2::zeros((2, 2)));
    assert!(matches!(result, Err(MinervaError::ShapeMismatch { .. })));
}

#[test]
fn test_explicit_weights_shape_validation() {
    // 2 units with input size 3 needs a (2, 4) matrix; give (2, 3)
    let weights = Array2::zeros((2, 3));
    let mut layer = DenseLayer::with_weights(2, weights, Activation::Sigmoid);
    let result = layer.initialize_weights(3);
    assert!(matches!(result, Err(MinervaError::ShapeMismatch { .. })));
}

#[test]
fn test_initializer_generates_on_bind() {
    let mut layer =
        DenseLayer::with_initializer(4, WeightInit::GlorotNormal, Activation::Sigmoid);
    assert!(layer.weights().is_none());

    layer.initialize_weights(3).unwrap();
    let weights = layer.weights().unwrap();
    assert_eq!(weights.dim(), (4, 4));
}

#[test]
fn test_uninitialized_layer_is_rejected() {
    let layer = DenseLayer::new(2, Activation::Sigmoid);
    let result = layer.pre_activation(array![1.0, 2.0].view());
    assert!(matches!(result, Err(MinervaError::UninitializedLayer)));
}

#[test]
fn test_initializers_zero_the_bias_column() {
    for init in [
        WeightInit::HeNormal,
        WeightInit::GlorotNormal,
        WeightInit::Uniform { min: -0.5, max: 0.5 },
        WeightInit::Zeros,
    ] {
        let weights = init.generate(5, 3);
        assert_eq!(weights.dim(), (3, 6));
        assert!(weights.slice(s![.., 0]).iter().all(|&w| w == 0.0));
    }
}

#[test]
fn test_input_layer_passes_through() {
    let layer = InputLayer::new(3);
    let values = array![1.0, -2.0, 3.0];

    assert_eq!(layer.pre_activation(values.view()).unwrap(), values);
    assert_eq!(layer.activate(values.view()).unwrap(), values);
    assert_eq!(layer.backpropagate(values.view()).unwrap(), values);
    assert_eq!(layer.weight_gradient().len(), 0);
}

#[test]
fn test_input_layer_rejects_wrong_length() {
    let layer = InputLayer::new(3);
    let result = layer.activate(array![1.0, 2.0].view());
    assert!(matches!(result, Err(MinervaError::ShapeMismatch { .. })));
}

#[test]
fn test_layer_clone_is_independent() {
    let original = Layer::Dense(fixed_dense());
    let mut cloned = original.clone();

    cloned
        .apply_update(&Array2::from_elem((2, 3), 1.0))
        .unwrap();
    assert_ne!(original.weights().unwrap(), cloned.weights().unwrap());
}

#[test]
fn test_dense_gradient_shapes() {
    let layer = fixed_dense();
    let error = Array1::zeros(2);
    let prev_output = Array1::zeros(2);

    let gradient = layer
        .weight_gradient(error.view(), prev_output.view(), 0.0)
        .unwrap();
    assert_eq!(gradient.dim(), layer.weights().unwrap().dim());
}
