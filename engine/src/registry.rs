use std::time::Instant;

use log::info;
use parking_lot::RwLock;

use regression::{
    LinearRegression, MlpRegressor, PolynomialRegression, RandomForestRegressor,
    RegressionMetrics, Regressor,
    preprocess::{StandardScaler, train_test_split},
};

use crate::{
    EngineErr, Result, dataset,
    features::FeaturePipeline,
    record::{
        DatasetSummary, MetricsReport, ModelKind, ModelReport, PredictionInput,
        PredictionOutcome, SalaryRecord, TrainingStatus,
    },
};

/// Seed shared by the split and the seeded models.
const SEED: u64 = 42;

/// Held-out fraction used to score the models.
const TEST_FRACTION: f64 = 0.2;

/// One fitted model with the metrics cached from its test split.
struct TrainedModel {
    kind: ModelKind,
    model: Box<dyn Regressor>,
    metrics: RegressionMetrics,
}

/// Everything the predict operation needs, swapped in atomically by train.
struct TrainedState {
    pipeline: FeaturePipeline,
    scaler: StandardScaler,
    models: Vec<TrainedModel>,
}

/// Process-wide registry of the dataset and the trained model state.
///
/// Training replaces the whole state under a write lock; predictions only
/// take the read lock.
pub struct Registry {
    records: Vec<SalaryRecord>,
    state: RwLock<Option<TrainedState>>,
}

impl Registry {
    /// Creates a registry over an explicit record set.
    pub fn new(records: Vec<SalaryRecord>) -> Self {
        Self {
            records,
            state: RwLock::new(None),
        }
    }

    /// Creates a registry over the embedded demo dataset.
    pub fn with_sample_data() -> Self {
        Self::new(dataset::sample_records())
    }

    /// Returns the dataset rows.
    pub fn records(&self) -> &[SalaryRecord] {
        &self.records
    }

    /// Returns aggregate statistics over the dataset.
    pub fn summary(&self) -> DatasetSummary {
        dataset::summarize(&self.records)
    }

    /// Fits all four models and replaces the trained state.
    ///
    /// Preprocesses the records, splits 80/20 with a fixed seed, fits the
    /// scaler on the train split only, then fits each model (the polynomial
    /// pipeline on raw features, the rest on standardized ones) and scores
    /// it on the held-out split.
    ///
    /// # Errors
    /// Returns `EngineErr::EmptyDataset` for an empty registry and
    /// propagates numeric-core failures.
    pub fn train(&self) -> Result<Vec<ModelReport>> {
        let (pipeline, x, y) = FeaturePipeline::fit(&self.records)?;
        let split = train_test_split(x.view(), y.view(), TEST_FRACTION, SEED)
            .map_err(EngineErr::from)?;

        let scaler = StandardScaler::fit(split.x_train.view()).map_err(EngineErr::from)?;
        let x_train_scaled = scaler.transform(split.x_train.view()).map_err(EngineErr::from)?;
        let x_test_scaled = scaler.transform(split.x_test.view()).map_err(EngineErr::from)?;

        let mut models = Vec::with_capacity(ModelKind::ALL.len());
        let mut reports = Vec::with_capacity(ModelKind::ALL.len());

        for kind in ModelKind::ALL {
            let mut model = build_model(kind);
            let (x_train, x_test) = if kind.needs_scaling() {
                (x_train_scaled.view(), x_test_scaled.view())
            } else {
                (split.x_train.view(), split.x_test.view())
            };

            let started = Instant::now();
            model.fit(x_train, split.y_train.view()).map_err(EngineErr::from)?;
            let elapsed_ms = started.elapsed().as_millis() as u64;

            let predictions = model.predict(x_test).map_err(EngineErr::from)?;
            let metrics = RegressionMetrics::compute(split.y_test.view(), predictions.view())
                .map_err(EngineErr::from)?;

            info!(
                "trained {kind} in {elapsed_ms}ms, r2 {:.4}, rmse {:.0}",
                metrics.r2(),
                metrics.rmse()
            );

            reports.push(ModelReport {
                name: kind.name().to_owned(),
                metrics: MetricsReport::new(&metrics, elapsed_ms),
                predictions: predictions.to_vec(),
                trained: true,
                training_time: elapsed_ms,
            });
            models.push(TrainedModel {
                kind,
                model,
                metrics,
            });
        }

        *self.state.write() = Some(TrainedState {
            pipeline,
            scaler,
            models,
        });

        Ok(reports)
    }

    /// Predicts a salary with the best model by cached test r2.
    ///
    /// # Errors
    /// Returns `EngineErr::NotTrained` before the first successful train.
    pub fn predict(&self, input: &PredictionInput) -> Result<PredictionOutcome> {
        let guard = self.state.read();
        let state = guard.as_ref().ok_or(EngineErr::NotTrained)?;

        let raw = state.pipeline.encode_input(input);
        let scaled = state.scaler.transform(raw.view()).map_err(EngineErr::from)?;

        let best = state
            .models
            .iter()
            .max_by(|a, b| {
                a.metrics
                    .r2()
                    .partial_cmp(&b.metrics.r2())
                    .unwrap_or(std::cmp::Ordering::Equal)
            })
            .ok_or(EngineErr::NotTrained)?;

        let features = if best.kind.needs_scaling() {
            scaled.view()
        } else {
            raw.view()
        };
        let predicted = best.model.predict(features).map_err(EngineErr::from)?;

        let outcome = PredictionOutcome {
            prediction: predicted[0],
            best_model: best.kind.name().to_owned(),
        };
        info!(
            "predicted {:.0} with {} for {:?}",
            outcome.prediction, outcome.best_model, input.job_title
        );

        Ok(outcome)
    }

    /// Returns the training status and the trained model names.
    pub fn status(&self) -> TrainingStatus {
        let guard = self.state.read();
        match guard.as_ref() {
            Some(state) => TrainingStatus {
                trained: true,
                models: state
                    .models
                    .iter()
                    .map(|m| m.kind.name().to_owned())
                    .collect(),
            },
            None => TrainingStatus {
                trained: false,
                models: Vec::new(),
            },
        }
    }
}

/// Instantiates an unfitted model of the given kind with the demo
/// hyperparameters.
fn build_model(kind: ModelKind) -> Box<dyn Regressor> {
    match kind {
        ModelKind::Linear => Box::new(LinearRegression::new()),
        ModelKind::Polynomial => Box::new(PolynomialRegression::new(2)),
        ModelKind::NeuralNetwork => Box::new(MlpRegressor::new()),
        ModelKind::RandomForest => Box::new(RandomForestRegressor::new()),
    }
}
