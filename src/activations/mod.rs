//! # Activation Functions Module
//!
//! Elementwise nonlinearities applied to a layer's pre-activation values.
//! The derivative is always evaluated at the pre-activation values, which is
//! what backpropagation needs.
//!
//! ## Available Activations
//!
//! - **Sigmoid**: `1 / (1 + e^(-x))` - the default, outputs between 0 and 1
//! - **ReLU**: `max(0, x)`
//! - **Tanh**: hyperbolic tangent, outputs between -1 and 1
//! - **Linear**: identity, useful for regression output layers
//! - **LeakyReLU**: ReLU with a small negative slope
//!
//! ## Usage Example
//!
//! ```rust
//! use minerva::activations::Activation;
//! use ndarray::array;
//!
//! let mut data = array![1.0, -0.5, 0.0, 2.0];
//! Activation::Relu.apply(&mut data);
//! assert_eq!(data, array![1.0, 0.0, 0.0, 2.0]);
//! ```

pub mod functions;

pub use functions::Activation;
