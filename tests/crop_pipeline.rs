mod common;

use agrinext::config::choices::{ForestParameters, LearnerChoice, NaiveBayesParameters};
use agrinext::config::learner_from_args;
use agrinext::tasks::{CropRecommender, crop_schema};
use agrinext::{OutcomeFormatter, PipelineError, extract, fit, format, predict};
use common::crop_table;
use std::collections::HashMap;
use std::sync::Arc;

fn rice_reading() -> HashMap<String, f64> {
    [
        ("N", 90.0),
        ("P", 42.0),
        ("K", 43.0),
        ("temperature", 20.8),
        ("humidity", 82.0),
        ("ph", 6.5),
        ("rainfall", 202.9),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v))
    .collect()
}

#[test]
fn extract_fit_predict_format_end_to_end() {
    let (_, samples) = crop_table();
    let schema = crop_schema().unwrap();

    let vector = extract(&rice_reading(), &schema).unwrap();
    assert_eq!(
        vector.as_slice(),
        &[90.0, 42.0, 43.0, 20.8, 82.0, 6.5, 202.9]
    );

    let choice = LearnerChoice::RandomForestClassifier(ForestParameters {
        n_estimators: 25,
        seed: Some(3),
        ..ForestParameters::default()
    });
    let model = fit(&samples, &choice).unwrap();
    let result = predict(&model, &vector).unwrap();

    let label = result.as_label().unwrap();
    assert!(model.labels().unwrap().values().iter().any(|l| l == label));
    let score = result.score.unwrap();
    assert!((0.0..=1.0).contains(&score));

    let text = format(&result).unwrap();
    assert!(text.starts_with(label), "{text}");
    assert!(text.ends_with("%)"), "{text}");
}

#[test]
fn empty_training_set_is_rejected() {
    let choice = LearnerChoice::NaiveBayes(NaiveBayesParameters::default());
    assert_eq!(fit(&[], &choice).unwrap_err(), PipelineError::EmptyDataset);
}

#[test]
fn same_seed_gives_the_same_forest() {
    let (_, samples) = crop_table();
    let choice = learner_from_args("random-forest-classifier", &["n_estimators=15", "seed=7"])
        .unwrap();
    let a = fit(&samples, &choice).unwrap();
    let b = fit(&samples, &choice).unwrap();
    assert_eq!(a.seed(), 7);

    let schema = crop_schema().unwrap();
    for (i, sample) in samples.iter().enumerate() {
        let mut reading = rice_reading();
        for (name, value) in schema.names().zip(&sample.features) {
            reading.insert(name.to_string(), *value);
        }
        let v = extract(&reading, &schema).unwrap();
        assert_eq!(
            a.predict(&v).unwrap(),
            b.predict(&v).unwrap(),
            "row #{i} differs"
        );
    }
}

#[test]
fn shared_model_predicts_from_many_threads() {
    let (_, samples) = crop_table();
    let recommender = Arc::new(CropRecommender::fit(&samples).unwrap());
    let expected = recommender.recommend(&rice_reading()).unwrap();

    std::thread::scope(|s| {
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let recommender = Arc::clone(&recommender);
                s.spawn(move || recommender.recommend(&rice_reading()).unwrap())
            })
            .collect();
        for h in handles {
            assert_eq!(h.join().unwrap(), expected);
        }
    });
}

#[test]
fn missing_reading_names_the_field() {
    let (_, samples) = crop_table();
    let recommender = CropRecommender::fit(&samples).unwrap();
    let mut reading = rice_reading();
    reading.remove("ph");
    assert_eq!(
        recommender.recommend(&reading).unwrap_err(),
        PipelineError::MissingFeature { name: "ph".into() }
    );
}

#[test]
fn formatter_settings_shape_the_text() {
    let (_, samples) = crop_table();
    let choice = learner_from_args("decision-tree-classifier", &[] as &[&str]).unwrap();
    let model = fit(&samples, &choice).unwrap();
    let vector = extract(&rice_reading(), &crop_schema().unwrap()).unwrap();
    let result = model.predict(&vector).unwrap();

    let formatter = OutcomeFormatter::default()
        .with_caption("Recommended Crop")
        .with_confidence(false);
    assert_eq!(
        formatter.format(&result).unwrap(),
        "Recommended Crop: rice"
    );
}
