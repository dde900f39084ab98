use engine::{
    EngineErr, Registry,
    record::{ModelKind, PredictionInput},
};

fn typical_input() -> PredictionInput {
    PredictionInput {
        years_experience: 5.0,
        education_level: "Master's".to_owned(),
        job_title: "Senior Software Engineer".to_owned(),
        location: "Hyderabad".to_owned(),
        company_size: "Large".to_owned(),
        skills: vec![
            "Python".to_owned(),
            "Django".to_owned(),
            "AWS".to_owned(),
            "Docker".to_owned(),
        ],
        industry: "Technology".to_owned(),
        work_mode: "Remote".to_owned(),
    }
}

#[test]
fn train_reports_all_four_models() {
    let registry = Registry::with_sample_data();
    let reports = registry.train().unwrap();

    let names: Vec<&str> = reports.iter().map(|r| r.name.as_str()).collect();
    let expected: Vec<&str> = ModelKind::ALL.iter().map(|k| k.name()).collect();
    assert_eq!(names, expected);

    for report in &reports {
        assert!(report.trained);
        // 20% of 35 records held out.
        assert_eq!(report.predictions.len(), 7);
        assert!(report.metrics.r2_score.is_finite());
        assert!(report.metrics.mae.is_finite() && report.metrics.mae >= 0.0);
        assert!(report.metrics.rmse >= 0.0);
        assert!(report.metrics.mape >= 0.0);
        assert!((0.0..=1.0).contains(&report.metrics.accuracy));
        assert_eq!(report.metrics.training_time, report.training_time);
    }
}

#[test]
fn status_flips_after_training() {
    let registry = Registry::with_sample_data();

    let before = registry.status();
    assert!(!before.trained);
    assert!(before.models.is_empty());

    registry.train().unwrap();

    let after = registry.status();
    assert!(after.trained);
    assert_eq!(after.models.len(), 4);
}

#[test]
fn predict_before_train_errors() {
    let registry = Registry::with_sample_data();
    let err = registry.predict(&typical_input()).unwrap_err();

    assert!(matches!(err, EngineErr::NotTrained));
}

#[test]
fn predict_after_train_returns_a_salary() {
    let registry = Registry::with_sample_data();
    registry.train().unwrap();

    let outcome = registry.predict(&typical_input()).unwrap();

    assert!(outcome.prediction.is_finite());
    let known: Vec<&str> = ModelKind::ALL.iter().map(|k| k.name()).collect();
    assert!(known.contains(&outcome.best_model.as_str()));
}

#[test]
fn best_model_matches_highest_cached_r2() {
    let registry = Registry::with_sample_data();
    let reports = registry.train().unwrap();

    let best_by_report = reports
        .iter()
        .max_by(|a, b| {
            a.metrics
                .r2_score
                .partial_cmp(&b.metrics.r2_score)
                .unwrap()
        })
        .map(|r| r.name.clone())
        .unwrap();

    let outcome = registry.predict(&typical_input()).unwrap();
    assert_eq!(outcome.best_model, best_by_report);
}

#[test]
fn unseen_categories_fall_back_instead_of_failing() {
    let registry = Registry::with_sample_data();
    registry.train().unwrap();

    let mut input = typical_input();
    input.location = "Atlantis".to_owned();
    input.job_title = "Prompt Wrangler".to_owned();

    let outcome = registry.predict(&input).unwrap();
    assert!(outcome.prediction.is_finite());
}

#[test]
fn training_is_repeatable() {
    let registry = Registry::with_sample_data();
    let first = registry.train().unwrap();
    let second = registry.train().unwrap();

    // Same seed and data: the deterministic models report identical metrics.
    for (a, b) in first.iter().zip(&second) {
        assert_eq!(a.name, b.name);
        assert_eq!(a.metrics.r2_score, b.metrics.r2_score);
        assert_eq!(a.predictions, b.predictions);
    }

    let outcome = registry.predict(&typical_input()).unwrap();
    assert!(outcome.prediction.is_finite());
}
