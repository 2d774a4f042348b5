// ABOUTME: Output formatting helpers for climate-risk
// ABOUTME: JSON printing and human-readable report summaries
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use anyhow::Result;
use climate_risk_engine::intelligence::{ActionItem, HistoricalReport};
use climate_risk_engine::models::{AnalogueMatch, RiskLevel};
use climate_risk_engine::providers::IngestionReport;
use climate_risk_engine::ClimateReport;
use serde::Serialize;

/// Print any serializable value as pretty JSON on stdout
pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Print a full report as text
pub fn print_report(report: &ClimateReport) {
    let assessment = &report.assessment;
    println!("\nClimate risk report: {}", report.region);
    println!("{}", "=".repeat(60));
    println!(
        "Overall risk: {:.2} ({})",
        assessment.overall_risk(),
        assessment.overall_level()
    );
    println!(
        "Valid: {} to {}",
        assessment.window().valid_from().format("%Y-%m-%d %H:%M UTC"),
        assessment.window().valid_to().format("%Y-%m-%d %H:%M UTC")
    );

    println!("\nHazards:");
    for (hazard, score) in assessment.scores() {
        let days = report.durations.get(hazard).copied().unwrap_or(0);
        match score {
            Some(score) => println!(
                "   {:<10} score {:.2}  confidence {:.2}  {:<8}  {days} days",
                hazard.as_str(),
                score.score(),
                score.confidence(),
                score.level().as_str()
            ),
            None => println!(
                "   {:<10} unavailable: {}",
                hazard.as_str(),
                assessment
                    .predictor_failures()
                    .get(hazard)
                    .map_or("unknown error", String::as_str)
            ),
        }
    }

    let health = &report.health;
    println!(
        "\nHealth hazards (vulnerability {:.2}):",
        health.vulnerability_score
    );
    print_list("Immediate", &health.immediate);
    print_list("Ongoing", &health.ongoing);
    print_list("Long-term", &health.longterm);

    println!("\nRecommendations:");
    for item in report.recommendations.all_sorted() {
        print_action(item);
    }

    if let Some(historical) = &report.historical {
        print_historical(historical);
    }
}

fn print_list(label: &str, items: &[String]) {
    if items.is_empty() {
        println!("   {label}: none");
    } else {
        println!("   {label}: {}", items.join(", "));
    }
}

fn print_action(item: &ActionItem) {
    println!("   [P{}] {} ({})", item.priority, item.action, item.timeline);
    if !item.resources.is_empty() {
        println!("        needs: {}", item.resources.join(", "));
    }
}

/// Print trends, seasonality status, extremes, and analogues as text
pub fn print_historical(report: &HistoricalReport) {
    println!("\nHistorical trends:");
    for (variable, trend) in &report.trends {
        println!(
            "   {:<14} slope {:+.4}/day  r² {:.2}  {:?}",
            variable.as_str(),
            trend.slope,
            trend.r_squared,
            trend.significance()
        );
    }

    match &report.seasonality {
        Ok(decompositions) => {
            println!("\nSeasonality:");
            for (variable, decomposition) in decompositions {
                println!(
                    "   {:<14} amplitude {:.2}",
                    variable.as_str(),
                    decomposition.seasonal_amplitude()
                );
            }
        }
        Err(insufficient) => println!("\nSeasonality: skipped ({insufficient})"),
    }

    println!("\nExtremes:");
    for (variable, events) in &report.extremes {
        println!("   {}: {} events", variable.as_str(), events.len());
        for event in events.iter().take(3) {
            println!(
                "      {}  {:.1}  z={:+.2}",
                event.date, event.value, event.z_score
            );
        }
    }

    println!("\nAnalogues:");
    if report.analogues.is_empty() {
        println!("   none above threshold");
    }
    for analogue in &report.analogues {
        print_analogue(analogue);
    }
}

fn print_analogue(analogue: &AnalogueMatch) {
    let elevated: Vec<String> = analogue
        .outcome
        .hazard_levels
        .iter()
        .filter(|(_, level)| **level != RiskLevel::Low)
        .map(|(hazard, level)| format!("{hazard}={level}"))
        .collect();
    let basis = if analogue.outcome.from_subsequent {
        "following days"
    } else {
        "same window"
    };
    println!(
        "   {}  similarity {:.3}  outcome ({basis}): {}",
        analogue.start_date,
        analogue.similarity,
        if elevated.is_empty() {
            "all low".to_owned()
        } else {
            elevated.join(", ")
        }
    );
}

/// Summarize ingestion on stderr
pub fn print_ingestion(ingestion: &IngestionReport) {
    eprintln!(
        "Ingested {} observations from {} sources ({} rejected, {} duplicates)",
        ingestion.observations.len(),
        ingestion.succeeded.len(),
        ingestion.rejected,
        ingestion.duplicates
    );
    for (source, reason) in &ingestion.failures {
        eprintln!("   source {source} failed: {reason}");
    }
}
