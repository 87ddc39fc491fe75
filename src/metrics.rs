use serde::{Deserialize, Serialize};

/// One row of the training history.
///
/// Recorded every `record_interval` batches by
/// [`crate::network::NeuralNetwork::train`]: the epoch and global batch the
/// snapshot was taken at, the regularized total cost over the full training
/// set, and the mean accuracy under the default argmax comparison.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CostRecord {
    pub round: usize,
    pub batch: usize,
    pub cost: f64,
    pub accuracy: f64,
}
