use ndarray::array;

use crate::cost::{CostFunction, CrossEntropy, MeanSquaredError};

#[test]
fn test_cross_entropy_cost() {
    let output = array![0.8];
    let expected = array![1.0];
    let cost = CrossEntropy.cost(output.view(), expected.view());
    assert!((cost - (-(0.8f64.ln()))).abs() < 1e-12);

    // Symmetric case for a zero target
    let output = array![0.2];
    let expected = array![0.0];
    let cost = CrossEntropy.cost(output.view(), expected.view());
    assert!((cost - (-(0.8f64.ln()))).abs() < 1e-12);
}

#[test]
fn test_cross_entropy_sums_over_units() {
    let output = array![0.8, 0.2];
    let expected = array![1.0, 0.0];
    let cost = CrossEntropy.cost(output.view(), expected.view());
    assert!((cost - 2.0 * (-(0.8f64.ln()))).abs() < 1e-12);
}

#[test]
fn test_cross_entropy_derivative() {
    let output = array![0.8];
    let expected = array![1.0];
    let grad = CrossEntropy.derivative(output.view(), expected.view());
    // (a - y) / (a (1 - a)) = -0.2 / 0.16
    assert!((grad[0] - (-1.25)).abs() < 1e-12);
}

#[test]
fn test_cross_entropy_clamps_extreme_outputs() {
    let output = array![0.0, 1.0];
    let expected = array![1.0, 0.0];
    let cost = CrossEntropy.cost(output.view(), expected.view());
    assert!(cost.is_finite());

    let grad = CrossEntropy.derivative(output.view(), expected.view());
    assert!(grad.iter().all(|g| g.is_finite()));
}

#[test]
fn test_mse_cost_and_derivative() {
    let output = array![0.8, 0.0];
    let expected = array![1.0, 0.0];

    let cost = MeanSquaredError.cost(output.view(), expected.view());
    assert!((cost - 0.5 * 0.04).abs() < 1e-12);

    let grad = MeanSquaredError.derivative(output.view(), expected.view());
    assert!((grad[0] - (-0.2)).abs() < 1e-12);
    assert!(grad[1].abs() < 1e-12);
}

#[test]
fn test_clone_box() {
    let cost: Box<dyn CostFunction> = Box::new(CrossEntropy);
    let cloned = cost.clone();

    let output = array![0.6];
    let expected = array![1.0];
    assert_eq!(
        cost.cost(output.view(), expected.view()),
        cloned.cost(output.view(), expected.view())
    );
}
