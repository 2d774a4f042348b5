// ABOUTME: Integration tests for hazard scoring, combination, and downstream analyses
// ABOUTME: Covers levels, calibration, confidence, durations, health hazards, and recommendations
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
#![allow(missing_docs)]
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

mod common;

use chrono::Utc;
use climate_risk_engine::errors::ClimateError;
use climate_risk_engine::intelligence::predictors::formulas;
use climate_risk_engine::intelligence::{
    DurationEstimator, FeatureExtractor, FeatureMatrix, HealthImpactMapper, PredictorError,
    Prediction, RecommendationEngine, RiskCombiner,
};
use climate_risk_engine::models::{HazardType, LocationProfile, RiskLevel};
use common::{calm_days, hot_days, observation, test_location};
use std::collections::BTreeMap;

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

#[test]
fn test_risk_level_breakpoints() {
    assert_eq!(RiskLevel::from_score(0.81), RiskLevel::Extreme);
    assert_eq!(RiskLevel::from_score(0.65), RiskLevel::High);
    assert_eq!(RiskLevel::from_score(0.45), RiskLevel::Moderate);
    assert_eq!(RiskLevel::from_score(0.1), RiskLevel::Low);
    assert_eq!(RiskLevel::from_score(0.8), RiskLevel::Extreme);
    assert_eq!(RiskLevel::from_score(0.4), RiskLevel::Moderate);
}

#[test]
fn test_hazard_type_parsing() {
    assert_eq!("Flood".parse::<HazardType>().unwrap(), HazardType::Flood);
    assert_eq!(" blackout ".parse::<HazardType>().unwrap(), HazardType::Blackout);
    assert!(matches!(
        "tornado".parse::<HazardType>(),
        Err(ClimateError::Validation(_))
    ));
}

#[test]
fn test_location_bounds_are_enforced() {
    assert!(LocationProfile::new(91.0, 0.0, 0.0, "x").is_err());
    assert!(LocationProfile::new(0.0, -181.0, 0.0, "x").is_err());
    assert!(LocationProfile::new(0.0, 0.0, -500.0, "x").is_err());
    assert!(LocationProfile::new(-90.0, 180.0, -420.0, "x").is_ok());
}

#[test]
fn test_invalid_observations_are_dropped_from_batch() {
    let observations = vec![
        observation(0, 20.0, 2.0, 5.0, 1013.0),
        observation(1, 75.0, 2.0, 5.0, 1013.0),
        observation(2, 20.0, -1.0, 5.0, 1013.0),
        observation(3, 20.0, 2.0, 5.0, 700.0),
        observation(4, 21.0, 3.0, 6.0, 1012.0),
    ];

    let batch = FeatureExtractor::extract_batch(&observations);
    assert_eq!(batch.matrix.len(), 2);
    let rejected: Vec<usize> = batch.rejected.iter().map(|r| r.index).collect();
    assert_eq!(rejected, vec![1, 2, 3]);
    assert!(matches!(
        batch.rejected[0].error,
        ClimateError::InvalidObservation {
            field: "temperature",
            ..
        }
    ));
}

#[test]
fn test_non_finite_uv_is_rejected() {
    let obs = observation(0, 20.0, 2.0, 5.0, 1013.0).with_uv_index(f64::NAN);
    assert!(FeatureExtractor::validate(&obs).is_err());
}

#[test]
fn test_blackout_score_clips_at_one() {
    let stormy: Vec<_> = (0..20)
        .map(|d| observation(d, 38.0, 150.0, 60.0, 990.0))
        .collect();
    let matrix = FeatureExtractor::extract_batch(&stormy).matrix;
    assert!(approx(formulas::blackout_score(&matrix), 1.0));

    let single = FeatureMatrix::from_rows(vec![vec![36.0, 0.0, 60.0, 51.0, 1000.0, 0.0]]).unwrap();
    assert!(approx(formulas::blackout_score(&single), 0.5));
}

#[test]
fn test_calibration_shrinks_by_uncertainty() {
    let calibrated = RiskCombiner::calibrate(Prediction {
        score: 0.8,
        uncertainty: 0.25,
    });
    assert!(approx(calibrated, 0.6));
    assert!(approx(RiskCombiner::calibrate(Prediction::certain(1.7)), 1.0));
    assert!(approx(
        RiskCombiner::calibrate(Prediction {
            score: 0.5,
            uncertainty: 3.0
        }),
        0.0
    ));
}

#[test]
fn test_confidence_is_zeroed_below_threshold() {
    let combiner = RiskCombiner::new();
    // Heatwave threshold 0.85: |0.95 - 0.5| * 2 = 0.9 passes
    assert!(approx(combiner.confidence(HazardType::Heatwave, 0.95), 0.9));
    // |0.9 - 0.5| * 2 = 0.8 fails 0.85
    assert!(approx(combiner.confidence(HazardType::Heatwave, 0.9), 0.0));
    // Drought threshold 0.75 accepts 0.8
    assert!(approx(combiner.confidence(HazardType::Drought, 0.9), 0.8));
    assert!(approx(combiner.confidence(HazardType::Flood, 0.0), 1.0));
}

#[test]
fn test_combine_weights_and_failures() {
    let combiner = RiskCombiner::new();
    let location = test_location();
    let observations = calm_days(3);
    let raw = BTreeMap::from([
        (HazardType::Flood, Ok(Prediction::certain(1.0))),
        (HazardType::Heatwave, Ok(Prediction::certain(0.0))),
        (
            HazardType::Hurricane,
            Err(PredictorError::EmptyInput {
                hazard: HazardType::Hurricane,
            }),
        ),
    ]);

    let assessment = combiner
        .combine(&raw, &observations, &location, Utc::now())
        .unwrap();

    assert_eq!(assessment.scores().len(), 3);
    assert!(assessment.scores()[&HazardType::Hurricane].is_none());
    assert!(assessment
        .predictor_failures()
        .contains_key(&HazardType::Hurricane));
    // (0.30 * 1.0 + 0.25 * 0.0) / 0.55
    assert!(approx(assessment.overall_risk(), 0.3 / 0.55));
    assert_eq!(assessment.overall_level(), RiskLevel::Moderate);
}

#[test]
fn test_combine_rejects_empty_observations() {
    let combiner = RiskCombiner::new();
    let raw = BTreeMap::from([(HazardType::Flood, Ok(Prediction::certain(0.5)))]);
    let result = combiner.combine(&raw, &[], &test_location(), Utc::now());
    assert!(matches!(result, Err(ClimateError::NoData(_))));
}

#[test]
fn test_flood_score_is_reduced_at_elevation() {
    let combiner = RiskCombiner::new();
    let raw = BTreeMap::from([(HazardType::Flood, Ok(Prediction::certain(0.8)))]);
    let observations = calm_days(2);

    let sea_level = combiner
        .combine(&raw, &observations, &common::location_at(0.0), Utc::now())
        .unwrap();
    let upland = combiner
        .combine(&raw, &observations, &common::location_at(500.0), Utc::now())
        .unwrap();
    let summit = combiner
        .combine(&raw, &observations, &common::location_at(3000.0), Utc::now())
        .unwrap();

    assert!(approx(sea_level.score(HazardType::Flood).unwrap(), 0.8));
    assert!(approx(upland.score(HazardType::Flood).unwrap(), 0.4));
    assert!(approx(summit.score(HazardType::Flood).unwrap(), 0.08));
}

#[test]
fn test_score_windows_lie_within_assessment_window() {
    let service = common::service();
    let assessment = service.assess(&test_location(), &hot_days(5, 40.0)).unwrap();
    let window = assessment.window();
    assert_eq!(window.valid_from(), common::day(0));
    assert!(window.valid_to() > common::day(4));
    for score in assessment.scores().values().flatten() {
        assert!(window.contains(&score.window()));
    }
}

#[test]
fn test_assessment_scores_stay_in_unit_interval() {
    let service = common::service();
    let cases = [
        hot_days(5, 40.0),
        hot_days(3, -30.0),
        calm_days(10),
        (0..6)
            .map(|d| observation(d, 55.0, 1900.0, 400.0, 850.0))
            .collect(),
    ];

    for observations in &cases {
        let assessment = service.assess(&test_location(), observations).unwrap();
        assert_eq!(assessment.scores().len(), HazardType::ALL.len());
        for score in assessment.scores().values().flatten() {
            assert!((0.0..=1.0).contains(&score.score()));
            assert!((0.0..=1.0).contains(&score.confidence()));
            assert_eq!(score.level(), RiskLevel::from_score(score.score()));
        }
        assert!((0.0..=1.0).contains(&assessment.overall_risk()));
    }
}

#[test]
fn test_heatwave_assessment() {
    let service = common::service();
    let assessment = service.assess(&test_location(), &hot_days(5, 40.0)).unwrap();

    let heatwave = assessment.risk_score(HazardType::Heatwave).unwrap();
    assert!(approx(heatwave.score(), 1.0));
    assert!(approx(heatwave.confidence(), 1.0));
    assert_eq!(heatwave.level(), RiskLevel::Extreme);
    assert!(approx(assessment.score(HazardType::Drought).unwrap(), 1.0));
    assert!(approx(assessment.score(HazardType::Blackout).unwrap(), 1.0));
    assert!(approx(assessment.score(HazardType::Flood).unwrap(), 0.0));
    assert!(assessment.predictor_failures().is_empty());
    // (0.25 + 0.15 + 0.10) / 1.10
    assert!(approx(assessment.overall_risk(), 0.5 / 1.1));
}

#[test]
fn test_duration_for_empty_input_is_empty() {
    assert!(DurationEstimator::new().estimate(&[]).is_empty());
}

#[test]
fn test_duration_for_hot_spell() {
    let durations = DurationEstimator::new().estimate(&hot_days(5, 40.0));
    assert_eq!(durations[&HazardType::Heatwave], 4);
    assert_eq!(durations[&HazardType::Flood], 6);
    assert_eq!(durations[&HazardType::Hurricane], 2);
    assert_eq!(durations[&HazardType::Blackout], 6);
}

#[test]
fn test_duration_for_calm_weather() {
    let durations = DurationEstimator::new().estimate(&calm_days(5));
    assert_eq!(durations[&HazardType::Heatwave], 3);
    assert_eq!(durations[&HazardType::Flood], 2);
    assert_eq!(durations[&HazardType::Blackout], 1);
    assert_eq!(durations.len(), 4);
}

#[test]
fn test_duration_ignores_final_observation() {
    let mut observations = calm_days(3);
    observations.push(observation(3, 45.0, 0.0, 5.0, 1013.0));
    let estimator = DurationEstimator::new();
    assert_eq!(estimator.risk_days(&observations), 0);
    assert_eq!(estimator.estimate(&observations)[&HazardType::Flood], 2);
}

#[test]
fn test_health_hazards_by_tier() {
    let mapper = HealthImpactMapper::new();
    let risks = BTreeMap::from([
        (HazardType::Flood, 0.7),
        (HazardType::Heatwave, 0.3),
        (HazardType::Blackout, 0.9),
    ]);
    let health = mapper.map(&risks, &test_location());
    assert_eq!(health.immediate.len(), 3);
    assert!(health.ongoing.is_empty());
    assert_eq!(health.longterm.len(), 3);
    assert_eq!(health.total(), 6);
    assert!(approx(health.vulnerability_score, 1.0));
}

#[test]
fn test_health_thresholds_are_strict() {
    let mapper = HealthImpactMapper::new();
    let risks = BTreeMap::from([
        (HazardType::Flood, 0.6),
        (HazardType::Heatwave, 0.5),
        (HazardType::Blackout, 0.7),
    ]);
    assert_eq!(mapper.map(&risks, &test_location()).total(), 0);
}

#[test]
fn test_vulnerability_rises_with_indicators() {
    let vulnerable = test_location()
        .with_topography_feature("elderly_population", 0.9)
        .with_topography_feature("healthcare_access", 0.8);
    assert!(HealthImpactMapper::vulnerability_score(&vulnerable) > 1.0);
    let not_flagged = test_location().with_topography_feature("elderly_population", 0.1);
    assert!(approx(
        HealthImpactMapper::vulnerability_score(&not_flagged),
        1.0
    ));
}

#[test]
fn test_low_risk_recommendations() {
    let engine = RecommendationEngine::new();
    let mapper = HealthImpactMapper::new();
    let location = test_location();
    let risks: BTreeMap<HazardType, f64> =
        HazardType::ALL.into_iter().map(|h| (h, 0.1)).collect();

    let recommendations = engine.recommend(&risks, &mapper.map(&risks, &location), &location);
    assert!(recommendations.critical.is_empty());
    assert!(recommendations.important.is_empty());
    assert_eq!(recommendations.preparatory.len(), 1);
    assert_eq!(recommendations.total(), 1);
}

#[test]
fn test_high_risk_recommendations() {
    let engine = RecommendationEngine::new();
    let mapper = HealthImpactMapper::new();
    let location = test_location();
    let risks = BTreeMap::from([(HazardType::Flood, 0.85), (HazardType::Blackout, 0.65)]);

    let recommendations = engine.recommend(&risks, &mapper.map(&risks, &location), &location);
    assert_eq!(recommendations.critical.len(), 1);
    assert_eq!(recommendations.important.len(), 1);
    assert_eq!(recommendations.preparatory.len(), 1);

    let sorted = recommendations.all_sorted();
    let priorities: Vec<u8> = sorted.iter().map(|item| item.priority).collect();
    assert_eq!(priorities, vec![1, 2, 3]);
}
