use ndarray::{Array1, Array2, ArrayView1};
use serde::{Deserialize, Serialize};

use crate::error::{MinervaError, Result};

/// The identity layer at the front of every network.
///
/// It has no weights and no activation: values pass through unchanged in both
/// directions. Its only job is to pin the network's input dimensionality and
/// reject vectors of the wrong length.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InputLayer {
    units: usize,
}

impl InputLayer {
    pub fn new(units: usize) -> Self {
        InputLayer { units }
    }

    pub fn units(&self) -> usize {
        self.units
    }

    fn check_size(&self, input: ArrayView1<f64>) -> Result<()> {
        if input.len() != self.units {
            return Err(MinervaError::shape_mismatch(
                format!("vector of length {}", self.units),
                format!("vector of length {}", input.len()),
            ));
        }
        Ok(())
    }

    /// Identity: an input layer has no weights, so the pre-activation values
    /// are the input itself.
    pub fn pre_activation(&self, input: ArrayView1<f64>) -> Result<Array1<f64>> {
        self.check_size(input)?;
        Ok(input.to_owned())
    }

    pub fn activate(&self, input: ArrayView1<f64>) -> Result<Array1<f64>> {
        self.check_size(input)?;
        Ok(input.to_owned())
    }

    /// Error signals pass through unchanged; input layers do not originate
    /// gradient.
    pub fn backpropagate(&self, error: ArrayView1<f64>) -> Result<Array1<f64>> {
        self.check_size(error)?;
        Ok(error.to_owned())
    }

    /// No weights, so no gradient contribution.
    pub fn weight_gradient(&self) -> Array2<f64> {
        Array2::zeros((0, 0))
    }
}
