//! Debugging utilities for verifying gradient computations.

pub mod gradient_check;

pub use gradient_check::{gradient_check, numerical_gradients};
