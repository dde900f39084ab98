use log::warn;
use ndarray::{Array1, Array2};

use regression::preprocess::LabelEncoder;

use crate::{
    EngineErr, Result,
    record::{PredictionInput, SalaryRecord},
};

/// The six categorical columns, in feature order.
const CATEGORICAL_COLUMNS: [&str; 6] = [
    "educationLevel",
    "jobTitle",
    "location",
    "companySize",
    "industry",
    "workMode",
];

/// Fitted feature pipeline: one label encoder per categorical column.
///
/// The feature layout is `[yearsExperience, skillsCount]` followed by the
/// encoded categorical columns in [`CATEGORICAL_COLUMNS`] order.
#[derive(Debug, Clone)]
pub struct FeaturePipeline {
    encoders: [LabelEncoder; 6],
}

impl FeaturePipeline {
    /// Fits the pipeline over the dataset and builds the feature matrix and
    /// target vector in one pass.
    ///
    /// # Errors
    /// Returns `EngineErr::EmptyDataset` when there are no records.
    pub fn fit(records: &[SalaryRecord]) -> Result<(Self, Array2<f64>, Array1<f64>)> {
        if records.is_empty() {
            return Err(EngineErr::EmptyDataset);
        }

        let encoders = [
            LabelEncoder::fit(records.iter().map(|r| r.education_level.as_str())),
            LabelEncoder::fit(records.iter().map(|r| r.job_title.as_str())),
            LabelEncoder::fit(records.iter().map(|r| r.location.as_str())),
            LabelEncoder::fit(records.iter().map(|r| r.company_size.as_str())),
            LabelEncoder::fit(records.iter().map(|r| r.industry.as_str())),
            LabelEncoder::fit(records.iter().map(|r| r.work_mode.as_str())),
        ];
        let pipeline = Self { encoders };

        let mut x = Array2::zeros((records.len(), pipeline.n_features()));
        for (i, r) in records.iter().enumerate() {
            let row = pipeline.encode_parts(
                r.years_experience,
                r.skills.len(),
                &[
                    &r.education_level,
                    &r.job_title,
                    &r.location,
                    &r.company_size,
                    &r.industry,
                    &r.work_mode,
                ],
            )?;
            x.row_mut(i).assign(&Array1::from(row));
        }

        let y = Array1::from_iter(records.iter().map(|r| r.salary));
        Ok((pipeline, x, y))
    }

    /// Encodes a prediction request as a single-row feature matrix.
    ///
    /// Categories never seen while fitting encode to 0, so a prediction for
    /// an unknown location or title still goes through.
    pub fn encode_input(&self, input: &PredictionInput) -> Array2<f64> {
        let columns = [
            &input.education_level,
            &input.job_title,
            &input.location,
            &input.company_size,
            &input.industry,
            &input.work_mode,
        ];

        let mut row = Vec::with_capacity(self.n_features());
        row.push(input.years_experience);
        row.push(input.skills.len() as f64);
        for (encoder, (name, value)) in self
            .encoders
            .iter()
            .zip(CATEGORICAL_COLUMNS.iter().zip(columns))
        {
            let code = encoder.transform(value).unwrap_or_else(|_| {
                warn!("unseen {name} category {value:?}, encoding as 0");
                0
            });
            row.push(code as f64);
        }

        let n = row.len();
        Array2::from_shape_vec((1, n), row).unwrap_or_else(|_| Array2::zeros((1, n)))
    }

    /// Number of columns the pipeline produces.
    pub fn n_features(&self) -> usize {
        2 + self.encoders.len()
    }

    /// Column names in feature order, using the wire-format spellings.
    pub fn feature_names(&self) -> Vec<String> {
        let mut names = vec!["yearsExperience".to_owned(), "skillsCount".to_owned()];
        names.extend(
            CATEGORICAL_COLUMNS
                .iter()
                .map(|col| format!("{col}_encoded")),
        );
        names
    }

    fn encode_parts(
        &self,
        years: f64,
        skills_count: usize,
        columns: &[&String; 6],
    ) -> Result<Vec<f64>> {
        let mut row = Vec::with_capacity(self.n_features());
        row.push(years);
        row.push(skills_count as f64);
        for (encoder, value) in self.encoders.iter().zip(columns) {
            // Fitting saw every value, so this cannot miss for dataset rows.
            row.push(encoder.transform(value).map_err(EngineErr::from)? as f64);
        }
        Ok(row)
    }
}
