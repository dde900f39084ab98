use serde::{Deserialize, Serialize};

use crate::{
    Registry,
    record::{DatasetSummary, ModelReport, PredictionInput, SalaryRecord},
};

/// One request line of the newline-delimited JSON protocol.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "camelCase")]
pub enum Request {
    /// Fetch the embedded dataset.
    Data,
    /// Fit all models and report their metrics.
    Train,
    /// Predict a salary for the given input.
    Predict { input: PredictionInput },
    /// Report whether models are trained.
    Status,
    /// Aggregate dataset statistics.
    Stats,
}

/// One response line of the newline-delimited JSON protocol.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Response {
    Data {
        records: Vec<SalaryRecord>,
    },
    Train {
        reports: Vec<ModelReport>,
    },
    #[serde(rename_all = "camelCase")]
    Predict {
        prediction: f64,
        best_model: String,
    },
    Status {
        trained: bool,
        models: Vec<String>,
    },
    Stats {
        summary: DatasetSummary,
    },
    Error {
        error: String,
    },
}

/// Dispatches one request against the registry.
///
/// Failures never escape: they come back as `Response::Error`, so a bad
/// request cannot take the connection down.
pub fn handle(registry: &Registry, request: Request) -> Response {
    match request {
        Request::Data => Response::Data {
            records: registry.records().to_vec(),
        },
        Request::Train => match registry.train() {
            Ok(reports) => Response::Train { reports },
            Err(e) => Response::Error {
                error: e.to_string(),
            },
        },
        Request::Predict { input } => match registry.predict(&input) {
            Ok(outcome) => Response::Predict {
                prediction: outcome.prediction,
                best_model: outcome.best_model,
            },
            Err(e) => Response::Error {
                error: e.to_string(),
            },
        },
        Request::Status => {
            let status = registry.status();
            Response::Status {
                trained: status.trained,
                models: status.models,
            }
        }
        Request::Stats => Response::Stats {
            summary: registry.summary(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_wire_format() {
        let req: Request = serde_json::from_str(r#"{"op":"status"}"#).unwrap();
        assert_eq!(req, Request::Status);

        let req: Request = serde_json::from_str(
            r#"{
                "op": "predict",
                "input": {
                    "yearsExperience": 3,
                    "educationLevel": "Bachelor's",
                    "jobTitle": "Frontend Developer",
                    "location": "Chennai",
                    "companySize": "Medium",
                    "skills": ["React", "CSS"],
                    "industry": "Technology",
                    "workMode": "Remote"
                }
            }"#,
        )
        .unwrap();
        assert!(matches!(req, Request::Predict { .. }));
    }

    #[test]
    fn response_wire_format() {
        let resp = Response::Predict {
            prediction: 1_250_000.0,
            best_model: "Random Forest".to_owned(),
        };
        let json = serde_json::to_string(&resp).unwrap();

        assert!(json.contains(r#""kind":"predict""#));
        assert!(json.contains(r#""bestModel":"Random Forest""#));
    }

    #[test]
    fn status_before_training() {
        let registry = Registry::with_sample_data();
        let resp = handle(&registry, Request::Status);

        assert_eq!(
            resp,
            Response::Status {
                trained: false,
                models: Vec::new()
            }
        );
    }

    #[test]
    fn predict_before_training_is_an_error_response() {
        let registry = Registry::with_sample_data();

        let input = PredictionInput {
            years_experience: 3.0,
            education_level: "Bachelor's".to_owned(),
            job_title: "Frontend Developer".to_owned(),
            location: "Chennai".to_owned(),
            company_size: "Medium".to_owned(),
            skills: vec!["React".to_owned()],
            industry: "Technology".to_owned(),
            work_mode: "Remote".to_owned(),
        };
        let resp = handle(&registry, Request::Predict { input });

        assert!(matches!(resp, Response::Error { .. }));
    }

    #[test]
    fn data_returns_all_records() {
        let registry = Registry::with_sample_data();
        let Response::Data { records } = handle(&registry, Request::Data) else {
            panic!("expected a data response");
        };
        assert_eq!(records.len(), 35);
    }
}
