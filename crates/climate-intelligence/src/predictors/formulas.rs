// ABOUTME: Deterministic hazard formulas over feature matrices
// ABOUTME: Blackout, heatwave, landslide scores and flood, hurricane, drought baselines
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::constants::hazard_thresholds::{
    BLACKOUT_PRECIPITATION_MM, BLACKOUT_PRECIPITATION_WEIGHT, BLACKOUT_TEMPERATURE_C,
    BLACKOUT_TEMPERATURE_WEIGHT, BLACKOUT_WIND_MS, BLACKOUT_WIND_WEIGHT, DROUGHT_PRECIPITATION_MM,
    DROUGHT_TEMPERATURE_C, FLOOD_ELEVATION_FACTOR_MIN, FLOOD_ELEVATION_SCALE_M,
    FLOOD_PRECIPITATION_SCALE_MM, HEATWAVE_BASELINE_C, HEATWAVE_SPAN_C, HURRICANE_PRESSURE_HPA,
    HURRICANE_PRESSURE_WEIGHT, HURRICANE_WIND_MS, HURRICANE_WIND_WEIGHT,
    LANDSLIDE_ELEVATION_SCALE_M, LANDSLIDE_HUMIDITY_PCT, LANDSLIDE_HUMIDITY_WEIGHT,
    LANDSLIDE_PRECIPITATION_MM, LANDSLIDE_PRECIPITATION_WEIGHT, LANDSLIDE_RELIEF_WEIGHT,
};
use crate::features::{columns, FeatureExtractor, FeatureMatrix};
use crate::models::{HazardType, LocationProfile, WeatherObservation};
use std::collections::BTreeMap;

/// Blackout contribution of a single observation
#[must_use]
pub fn blackout_contribution(temperature: f64, precipitation: f64, wind_speed: f64) -> f64 {
    let mut contribution = 0.0;
    if wind_speed > BLACKOUT_WIND_MS {
        contribution += BLACKOUT_WIND_WEIGHT;
    }
    if temperature > BLACKOUT_TEMPERATURE_C {
        contribution += BLACKOUT_TEMPERATURE_WEIGHT;
    }
    if precipitation > BLACKOUT_PRECIPITATION_MM {
        contribution += BLACKOUT_PRECIPITATION_WEIGHT;
    }
    contribution
}

/// Blackout severity for raw observations, summed then clipped once
#[must_use]
pub fn blackout_severity(observations: &[WeatherObservation]) -> f64 {
    observations
        .iter()
        .map(|obs| blackout_contribution(obs.temperature(), obs.precipitation(), obs.wind_speed()))
        .sum::<f64>()
        .clamp(0.0, 1.0)
}

/// Blackout score over a feature matrix
#[must_use]
pub fn blackout_score(features: &FeatureMatrix) -> f64 {
    features
        .sum_rows(|row| {
            blackout_contribution(
                row[columns::TEMPERATURE],
                row[columns::PRECIPITATION],
                row[columns::WIND_SPEED],
            )
        })
        .clamp(0.0, 1.0)
}

/// Heatwave score from mean temperature
#[must_use]
pub fn heatwave_score(features: &FeatureMatrix) -> f64 {
    features
        .column_mean(columns::TEMPERATURE)
        .map_or(0.0, |mean| {
            ((mean - HEATWAVE_BASELINE_C) / HEATWAVE_SPAN_C).clamp(0.0, 1.0)
        })
}

/// Landslide score from heavy rain, saturated air, and relief
#[must_use]
pub fn landslide_score(features: &FeatureMatrix) -> f64 {
    let heavy_rain =
        features.fraction_where(|row| row[columns::PRECIPITATION] > LANDSLIDE_PRECIPITATION_MM);
    let saturated = features.fraction_where(|row| row[columns::HUMIDITY] > LANDSLIDE_HUMIDITY_PCT);
    let relief = features
        .column_mean(columns::ELEVATION)
        .map_or(0.0, |elevation| {
            (elevation.max(0.0) / LANDSLIDE_ELEVATION_SCALE_M).min(1.0)
        });

    LANDSLIDE_RELIEF_WEIGHT
        .mul_add(
            relief,
            LANDSLIDE_PRECIPITATION_WEIGHT.mul_add(heavy_rain, LANDSLIDE_HUMIDITY_WEIGHT * saturated),
        )
        .clamp(0.0, 1.0)
}

/// Flood intensity before elevation adjustment
#[must_use]
pub fn flood_baseline(features: &FeatureMatrix) -> f64 {
    features
        .column_mean(columns::PRECIPITATION)
        .map_or(0.0, |mean| mean.max(0.0) / FLOOD_PRECIPITATION_SCALE_MM)
}

/// Hurricane baseline from hurricane-force wind and low pressure fractions
#[must_use]
pub fn hurricane_baseline(features: &FeatureMatrix) -> f64 {
    let high_wind = features.fraction_where(|row| row[columns::WIND_SPEED] >= HURRICANE_WIND_MS);
    let low_pressure = features.fraction_where(|row| row[columns::PRESSURE] < HURRICANE_PRESSURE_HPA);
    HURRICANE_WIND_WEIGHT.mul_add(high_wind, HURRICANE_PRESSURE_WEIGHT * low_pressure)
}

/// Drought baseline from the fraction of dry and hot rows
#[must_use]
pub fn drought_baseline(features: &FeatureMatrix) -> f64 {
    features.fraction_where(|row| {
        row[columns::PRECIPITATION] < DROUGHT_PRECIPITATION_MM
            && row[columns::TEMPERATURE] > DROUGHT_TEMPERATURE_C
    })
}

/// Flood multiplier decreasing with elevation, floored at 0.1
#[must_use]
pub fn elevation_factor(elevation: f64) -> f64 {
    (1.0 - elevation / FLOOD_ELEVATION_SCALE_M).max(FLOOD_ELEVATION_FACTOR_MIN)
}

/// Deterministic score for every hazard, flood adjusted for elevation
///
/// Used to describe what happened during historical windows, where no trained
/// model applies.
#[must_use]
pub fn deterministic_scores(
    observations: &[WeatherObservation],
    location: Option<&LocationProfile>,
) -> BTreeMap<HazardType, f64> {
    let matrix = FeatureExtractor::extract_batch(observations).matrix;
    let matrix = match location {
        Some(location) => matrix.with_location(location),
        None => matrix.with_coordinates(0.0, 0.0, 0.0),
    };
    let elevation = location.map_or(0.0, LocationProfile::elevation);

    HazardType::ALL
        .into_iter()
        .map(|hazard| {
            let score = match hazard {
                HazardType::Flood => {
                    (flood_baseline(&matrix) * elevation_factor(elevation)).min(1.0)
                }
                HazardType::Heatwave => heatwave_score(&matrix),
                HazardType::Hurricane => hurricane_baseline(&matrix),
                HazardType::Drought => drought_baseline(&matrix),
                HazardType::Landslide => landslide_score(&matrix),
                HazardType::Blackout => blackout_score(&matrix),
            };
            (hazard, score.clamp(0.0, 1.0))
        })
        .collect()
}
