use ndarray::{Array1, Array2, ArrayView1, ArrayView2, Axis};
use rand::{Rng, SeedableRng, rngs::StdRng, seq::SliceRandom};

use crate::{RegressErr, Result, model::Regressor};

const BETA1: f64 = 0.9;
const BETA2: f64 = 0.999;
const EPS: f64 = 1e-8;

/// Hyperparameters for [`MlpRegressor`].
#[derive(Debug, Clone, PartialEq)]
pub struct MlpConfig {
    pub hidden: Vec<usize>,
    pub learning_rate: f64,
    pub l2: f64,
    pub batch_size: usize,
    pub epochs: usize,
    pub seed: u64,
}

impl Default for MlpConfig {
    /// The demo network: four ReLU hidden layers trained with Adam.
    fn default() -> Self {
        Self {
            hidden: vec![128, 64, 32, 16],
            learning_rate: 1e-3,
            l2: 1e-3,
            batch_size: 16,
            epochs: 500,
            seed: 42,
        }
    }
}

/// A dense feed-forward regressor with ReLU hidden layers and a linear
/// output, trained by mini-batch Adam on the MSE loss.
#[derive(Debug, Clone)]
pub struct MlpRegressor {
    cfg: MlpConfig,
    weights: Vec<Array2<f64>>,
    biases: Vec<Array1<f64>>,
}

/// First- and second-moment buffers for Adam, one pair per parameter array.
struct AdamState {
    m_w: Vec<Array2<f64>>,
    v_w: Vec<Array2<f64>>,
    m_b: Vec<Array1<f64>>,
    v_b: Vec<Array1<f64>>,
    step: i32,
}

impl AdamState {
    fn new(weights: &[Array2<f64>], biases: &[Array1<f64>]) -> Self {
        Self {
            m_w: weights.iter().map(|w| Array2::zeros(w.dim())).collect(),
            v_w: weights.iter().map(|w| Array2::zeros(w.dim())).collect(),
            m_b: biases.iter().map(|b| Array1::zeros(b.dim())).collect(),
            v_b: biases.iter().map(|b| Array1::zeros(b.dim())).collect(),
            step: 0,
        }
    }

    /// Applies one Adam update to every parameter array.
    fn apply(
        &mut self,
        lr: f64,
        weights: &mut [Array2<f64>],
        biases: &mut [Array1<f64>],
        grad_w: &[Array2<f64>],
        grad_b: &[Array1<f64>],
    ) {
        self.step += 1;
        let bias1 = 1.0 - BETA1.powi(self.step);
        let bias2 = 1.0 - BETA2.powi(self.step);

        for l in 0..weights.len() {
            self.m_w[l].zip_mut_with(&grad_w[l], |m, &g| *m = BETA1 * *m + (1.0 - BETA1) * g);
            self.v_w[l].zip_mut_with(&grad_w[l], |v, &g| *v = BETA2 * *v + (1.0 - BETA2) * g * g);
            ndarray::Zip::from(&mut weights[l])
                .and(&self.m_w[l])
                .and(&self.v_w[l])
                .for_each(|w, &m, &v| {
                    *w -= lr * (m / bias1) / ((v / bias2).sqrt() + EPS);
                });

            self.m_b[l].zip_mut_with(&grad_b[l], |m, &g| *m = BETA1 * *m + (1.0 - BETA1) * g);
            self.v_b[l].zip_mut_with(&grad_b[l], |v, &g| *v = BETA2 * *v + (1.0 - BETA2) * g * g);
            ndarray::Zip::from(&mut biases[l])
                .and(&self.m_b[l])
                .and(&self.v_b[l])
                .for_each(|b, &m, &v| {
                    *b -= lr * (m / bias1) / ((v / bias2).sqrt() + EPS);
                });
        }
    }
}

impl MlpRegressor {
    /// Creates an unfitted net with the default demo hyperparameters.
    pub fn new() -> Self {
        Self::with_config(MlpConfig::default())
    }

    /// Creates an unfitted net with explicit hyperparameters.
    pub fn with_config(cfg: MlpConfig) -> Self {
        Self {
            cfg,
            weights: Vec::new(),
            biases: Vec::new(),
        }
    }

    /// Glorot-uniform initialization of every layer, seeded for determinism.
    fn init_params(&mut self, n_features: usize) {
        let mut dims = Vec::with_capacity(self.cfg.hidden.len() + 2);
        dims.push(n_features);
        dims.extend_from_slice(&self.cfg.hidden);
        dims.push(1);

        let mut rng = StdRng::seed_from_u64(self.cfg.seed);
        self.weights.clear();
        self.biases.clear();

        for pair in dims.windows(2) {
            let (fan_in, fan_out) = (pair[0], pair[1]);
            let limit = (6.0 / (fan_in + fan_out) as f64).sqrt();
            let w = Array2::from_shape_fn((fan_in, fan_out), |_| {
                rng.random_range(-limit..limit)
            });
            self.weights.push(w);
            self.biases.push(Array1::zeros(fan_out));
        }
    }

    /// Forward pass over a batch.
    ///
    /// Returns the pre-activations per layer and the post-activation inputs
    /// of each layer (index 0 is the batch itself), which backprop needs.
    fn forward(&self, batch: ArrayView2<f64>) -> (Vec<Array2<f64>>, Vec<Array2<f64>>) {
        let n_layers = self.weights.len();
        let mut zs = Vec::with_capacity(n_layers);
        let mut activations = Vec::with_capacity(n_layers + 1);
        activations.push(batch.to_owned());

        for (l, (w, b)) in self.weights.iter().zip(&self.biases).enumerate() {
            let mut z = activations[l].dot(w);
            z += b;

            let a = if l + 1 < n_layers {
                z.mapv(|v| v.max(0.0))
            } else {
                z.clone()
            };
            zs.push(z);
            activations.push(a);
        }

        (zs, activations)
    }

    /// Backward pass over one batch; returns parameter gradients.
    fn backward(
        &self,
        zs: &[Array2<f64>],
        activations: &[Array2<f64>],
        y: ArrayView1<f64>,
    ) -> (Vec<Array2<f64>>, Vec<Array1<f64>>) {
        let n_layers = self.weights.len();
        let batch_len = y.len() as f64;

        let mut grad_w: Vec<Array2<f64>> = self
            .weights
            .iter()
            .map(|w| Array2::zeros(w.dim()))
            .collect();
        let mut grad_b: Vec<Array1<f64>> = self
            .biases
            .iter()
            .map(|b| Array1::zeros(b.dim()))
            .collect();

        // dL/dz of the linear output layer for the MSE loss.
        let y_pred = activations[n_layers].column(0);
        let mut delta = Array2::from_shape_fn((y.len(), 1), |(i, _)| {
            (y_pred[i] - y[i]) / batch_len
        });

        for l in (0..n_layers).rev() {
            if l + 1 < n_layers {
                // Propagated through a ReLU layer: gate by its pre-activation.
                delta.zip_mut_with(&zs[l], |d, &z| {
                    if z <= 0.0 {
                        *d = 0.0;
                    }
                });
            }

            grad_w[l] = activations[l].t().dot(&delta);
            if self.cfg.l2 > 0.0 {
                grad_w[l].scaled_add(self.cfg.l2 / batch_len, &self.weights[l]);
            }
            grad_b[l] = delta.sum_axis(Axis(0));

            if l > 0 {
                delta = delta.dot(&self.weights[l].t());
            }
        }

        (grad_w, grad_b)
    }
}

impl Default for MlpRegressor {
    fn default() -> Self {
        Self::new()
    }
}

impl Regressor for MlpRegressor {
    fn fit(&mut self, x: ArrayView2<f64>, y: ArrayView1<f64>) -> Result<()> {
        if x.nrows() == 0 {
            return Err(RegressErr::EmptyInput("feature matrix"));
        }
        if y.len() != x.nrows() {
            return Err(RegressErr::ShapeMismatch {
                what: "targets",
                got: y.len(),
                expected: x.nrows(),
            });
        }
        if self.cfg.batch_size == 0 {
            return Err(RegressErr::InvalidParam("batch_size must be > 0"));
        }

        self.init_params(x.ncols());
        let mut adam = AdamState::new(&self.weights, &self.biases);
        let mut rng = StdRng::seed_from_u64(self.cfg.seed.wrapping_add(1));
        let mut order: Vec<usize> = (0..x.nrows()).collect();

        for _ in 0..self.cfg.epochs {
            order.shuffle(&mut rng);

            for chunk in order.chunks(self.cfg.batch_size) {
                let batch_x = x.select(Axis(0), chunk);
                let batch_y = y.select(Axis(0), chunk);

                let (zs, activations) = self.forward(batch_x.view());
                let (grad_w, grad_b) = self.backward(&zs, &activations, batch_y.view());

                adam.apply(
                    self.cfg.learning_rate,
                    &mut self.weights,
                    &mut self.biases,
                    &grad_w,
                    &grad_b,
                );
            }
        }

        Ok(())
    }

    fn predict(&self, x: ArrayView2<f64>) -> Result<Array1<f64>> {
        if self.weights.is_empty() {
            return Err(RegressErr::NotFitted {
                what: "neural network",
            });
        }
        if x.ncols() != self.weights[0].nrows() {
            return Err(RegressErr::ShapeMismatch {
                what: "columns",
                got: x.ncols(),
                expected: self.weights[0].nrows(),
            });
        }

        let (_, activations) = self.forward(x);
        let last = &activations[self.weights.len()];
        Ok(last.column(0).to_owned())
    }
}
