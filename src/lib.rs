//! # Minerva - Feedforward Neural-Network Library
//!
//! Minerva is a small library for assembling and training multilayer
//! perceptrons from composable pieces: layers, activation functions, weight
//! initializers, cost functions, and optimizers. Training is plain
//! mini-batch gradient descent with backpropagation and optional L2
//! regularization.
//!
//! ## Quick Start
//!
//! ```rust
//! use minerva::activations::Activation;
//! use minerva::builders::NetworkBuilder;
//! use minerva::cost::CrossEntropy;
//! use minerva::optimizer::Sgd;
//! use ndarray::array;
//!
//! let mut network = NetworkBuilder::new()
//!     .input(2)
//!     .dense(4, Activation::Sigmoid)
//!     .dense(1, Activation::Sigmoid)
//!     .cost(Box::new(CrossEntropy))
//!     .optimizer(Box::new(Sgd::new(0.5)))
//!     .build()
//!     .unwrap();
//!
//! let inputs = array![[0.0, 0.0], [0.0, 1.0], [1.0, 0.0], [1.0, 1.0]];
//! let targets = array![[0.0], [1.0], [1.0], [1.0]];
//!
//! let history = network
//!     .train(inputs.view(), targets.view(), 0.0, 4, 200, 100)
//!     .unwrap();
//! assert!(!history.is_empty());
//! ```
//!
//! ## Module Organization
//!
//! - [`activations`] - Activation functions (Sigmoid, ReLU, Tanh, ...)
//! - [`builders`] - Fluent network construction
//! - [`cost`] - Cost functions (cross-entropy, mean squared error)
//! - [`debug`] - Numerical gradient checking
//! - [`error`] - Error types and result handling
//! - [`layers`] - Input and dense layers, weight initialization
//! - [`metrics`] - Training history records
//! - [`network`] - The network itself: forward pass, backpropagation,
//!   batched training
//! - [`optimizer`] - Weight-update strategies (SGD, momentum)

pub mod activations;
pub mod builders;
pub mod cost;
pub mod debug;
pub mod error;
pub mod layers;
pub mod metrics;
pub mod network;
pub mod optimizer;

#[cfg(test)]
mod tests;
