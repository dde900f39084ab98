use serde::{Deserialize, Serialize};

use regression::RegressionMetrics;

/// One row of the embedded salary dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SalaryRecord {
    pub id: u32,
    pub years_experience: f64,
    pub education_level: String,
    pub job_title: String,
    pub location: String,
    pub company_size: String,
    pub skills: Vec<String>,
    pub salary: f64,
    pub industry: String,
    pub work_mode: String,
}

/// A salary prediction request: a record without its id and salary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PredictionInput {
    pub years_experience: f64,
    pub education_level: String,
    pub job_title: String,
    pub location: String,
    pub company_size: String,
    pub skills: Vec<String>,
    pub industry: String,
    pub work_mode: String,
}

/// The models the lab trains, in training order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelKind {
    Linear,
    Polynomial,
    NeuralNetwork,
    RandomForest,
}

impl ModelKind {
    pub const ALL: [Self; 4] = [
        Self::Linear,
        Self::Polynomial,
        Self::NeuralNetwork,
        Self::RandomForest,
    ];

    /// The display name used on the wire.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Linear => "Linear Regression",
            Self::Polynomial => "Polynomial Regression",
            Self::NeuralNetwork => "Neural Network",
            Self::RandomForest => "Random Forest",
        }
    }

    /// Whether this model consumes standardized features.
    ///
    /// The polynomial pipeline is fit on the raw feature matrix; expanding
    /// standardized features would distort the interaction terms.
    pub fn needs_scaling(&self) -> bool {
        !matches!(self, Self::Polynomial)
    }
}

impl std::fmt::Display for ModelKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Wire form of the evaluation metrics, with the training time attached.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricsReport {
    pub r2_score: f64,
    pub mae: f64,
    pub rmse: f64,
    pub mape: f64,
    pub accuracy: f64,
    pub training_time: u64,
}

impl MetricsReport {
    pub fn new(metrics: &RegressionMetrics, training_time_ms: u64) -> Self {
        Self {
            r2_score: metrics.r2(),
            mae: metrics.mae(),
            rmse: metrics.rmse(),
            mape: metrics.mape(),
            accuracy: metrics.accuracy(),
            training_time: training_time_ms,
        }
    }
}

/// Per-model training outcome returned by the train operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelReport {
    pub name: String,
    pub metrics: MetricsReport,
    pub predictions: Vec<f64>,
    pub trained: bool,
    pub training_time: u64,
}

/// Result of the predict operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PredictionOutcome {
    pub prediction: f64,
    pub best_model: String,
}

/// Result of the status operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrainingStatus {
    pub trained: bool,
    pub models: Vec<String>,
}

/// Salary bounds of the dataset.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SalaryRange {
    pub min: f64,
    pub max: f64,
}

/// One entry of the top-skills ranking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillCount {
    pub skill: String,
    pub count: usize,
}

/// Aggregate statistics over the embedded dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DatasetSummary {
    pub total_records: usize,
    pub avg_salary: f64,
    pub avg_experience: f64,
    pub unique_roles: usize,
    pub salary_range: SalaryRange,
    pub top_skills: Vec<SkillCount>,
}
