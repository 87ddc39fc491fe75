use ndarray::Array2;

/// Trait defining the interface for weight-update strategies.
///
/// An optimizer maps a batch-averaged gradient to the delta that will be
/// subtracted from the layer's weights. Implementations may keep per-layer
/// state across calls (momentum accumulators and the like), keyed by the
/// `layer` index of each weighted layer.
pub trait Optimizer: Send + Sync {
    /// Turn an averaged gradient for the given weighted layer into a weight
    /// delta.
    fn step(&mut self, layer: usize, gradient: &Array2<f64>) -> Array2<f64>;

    /// Discard any accumulated state.
    fn reset(&mut self);

    /// Clone the optimizer into a boxed trait object with fresh state.
    fn clone_box(&self) -> Box<dyn Optimizer>;
}

impl Clone for Box<dyn Optimizer> {
    fn clone(&self) -> Self {
        self.clone_box()
    }
}

/// Plain stochastic gradient descent: `delta = learning_rate · gradient`.
#[derive(Clone, Copy, Debug)]
pub struct Sgd {
    pub learning_rate: f64,
}

impl Sgd {
    pub fn new(learning_rate: f64) -> Self {
        Sgd { learning_rate }
    }
}

impl Default for Sgd {
    fn default() -> Self {
        Self::new(0.1)
    }
}

impl Optimizer for Sgd {
    fn step(&mut self, _layer: usize, gradient: &Array2<f64>) -> Array2<f64> {
        gradient * self.learning_rate
    }

    fn reset(&mut self) {}

    fn clone_box(&self) -> Box<dyn Optimizer> {
        Box::new(*self)
    }
}

/// Gradient descent with momentum.
///
/// Keeps one velocity matrix per weighted layer:
/// `v ← gamma · v + learning_rate · gradient`, and the returned delta is the
/// updated velocity. Velocities are allocated lazily the first time a layer
/// index is seen.
///
/// Cloning keeps the hyperparameters and discards the velocities, matching
/// [`Optimizer::clone_box`]: a clone serves a different network, whose
/// gradient history starts empty.
#[derive(Debug)]
pub struct Momentum {
    pub learning_rate: f64,
    pub gamma: f64,
    velocities: Vec<Option<Array2<f64>>>,
}

impl Momentum {
    pub fn new(learning_rate: f64, gamma: f64) -> Self {
        Momentum {
            learning_rate,
            gamma,
            velocities: Vec::new(),
        }
    }
}

impl Default for Momentum {
    fn default() -> Self {
        Self::new(0.1, 0.9)
    }
}

impl Clone for Momentum {
    fn clone(&self) -> Self {
        Momentum::new(self.learning_rate, self.gamma)
    }
}

impl Optimizer for Momentum {
    fn step(&mut self, layer: usize, gradient: &Array2<f64>) -> Array2<f64> {
        if self.velocities.len() <= layer {
            self.velocities.resize(layer + 1, None);
        }
        let scaled = gradient * self.learning_rate;
        let velocity = match self.velocities[layer].take() {
            Some(previous) => previous * self.gamma + &scaled,
            None => scaled,
        };
        self.velocities[layer] = Some(velocity.clone());
        velocity
    }

    fn reset(&mut self) {
        self.velocities.clear();
    }

    fn clone_box(&self) -> Box<dyn Optimizer> {
        Box::new(self.clone())
    }
}
