use super::common::*;
use crate::applicant::EmploymentStatus;
use crate::scoring::{decide, score, Decision, Factor, RiskLevel, ScoringConfig, ScoringEngine};

#[test]
fn approved_scenario() {
    let result = engine().score(&approved_profile());

    assert_eq!(result.score, 715);
    assert_eq!(result.decision, Decision::Approved);
    assert_eq!(result.risk_level, RiskLevel::Low);
}

#[test]
fn review_scenario() {
    let result = engine().score(&review_profile());

    assert_eq!(result.score, 585);
    assert_eq!(result.decision, Decision::Review);
    assert_eq!(result.risk_level, RiskLevel::Medium);
}

#[test]
fn rejected_scenario() {
    let result = engine().score(&rejected_profile());

    assert_eq!(result.score, 365);
    assert_eq!(result.decision, Decision::Rejected);
    assert_eq!(result.risk_level, RiskLevel::High);
}

#[test]
fn engine_matches_free_function() {
    let config = ScoringConfig::default();
    let profile = review_profile();
    assert_eq!(ScoringEngine::new(config).score(&profile), score(&profile, &config));
}

#[test]
fn scoring_is_deterministic() {
    let engine = engine();
    let profile = approved_profile();
    assert_eq!(engine.score(&profile), engine.score(&profile));
}

#[test]
fn retired_applicant_with_assets_is_approved() {
    let mut profile = approved_profile();
    profile.age = 68;
    profile.income = 40_000.0;
    profile.credit_history_years = 30;
    profile.debt_to_income_ratio = 0.1;
    profile.savings = 80_000.0;
    profile.existing_loans = 0;
    profile.employment_status = EmploymentStatus::Retired;
    profile.employment_years = 0;

    let result = engine().score(&profile);

    assert_eq!(result.score, 720);
    assert_eq!(result.decision, Decision::Approved);
}

#[test]
fn breakdown_accounts_for_every_point() {
    let breakdown = engine().breakdown(&approved_profile());

    assert_eq!(breakdown.base_score, 575.0);
    assert_eq!(breakdown.components.len(), 7);
    assert_eq!(breakdown.points_for(Factor::ExistingLoans), -20);
    assert_eq!(breakdown.points_for(Factor::Employment), 30);
    assert_eq!(breakdown.adjustment(), 140);
    assert_eq!(breakdown.raw_score(), 715.0);
}

#[test]
fn score_clamps_to_max() {
    let config = ScoringConfig {
        min_score: 300,
        max_score: 700,
        approval_threshold: 650,
        review_threshold: 550,
    };
    let engine = ScoringEngine::new(config);
    let profile = excellent_profile();

    assert!(engine.breakdown(&profile).raw_score() > 700.0);
    let result = engine.score(&profile);
    assert_eq!(result.score, 700);
    assert_eq!(result.decision, Decision::Approved);
}

#[test]
fn score_clamps_to_min() {
    let config = ScoringConfig {
        min_score: 450,
        max_score: 600,
        approval_threshold: 550,
        review_threshold: 500,
    };
    let engine = ScoringEngine::new(config);
    let profile = rejected_profile();

    assert!(engine.breakdown(&profile).raw_score() < 450.0);
    let result = engine.score(&profile);
    assert_eq!(result.score, 450);
    assert_eq!(result.decision, Decision::Rejected);
    assert!(result.reason.starts_with("Low score of 450."));
}

#[test]
fn half_point_midpoint_rounds_to_nearest() {
    let config = ScoringConfig {
        max_score: 851,
        ..ScoringConfig::default()
    };

    let result = score(&approved_profile(), &config);

    assert_eq!(result.score, 716);
}

#[test]
fn inverted_config_does_not_panic() {
    let config = ScoringConfig {
        min_score: 850,
        max_score: 300,
        ..ScoringConfig::default()
    };

    let result = score(&approved_profile(), &config);

    assert_eq!(result.score, 300);
}

#[test]
fn decision_boundaries_favor_better_bucket() {
    let config = ScoringConfig::default();
    assert_eq!(decide(850, &config), Decision::Approved);
    assert_eq!(decide(650, &config), Decision::Approved);
    assert_eq!(decide(649, &config), Decision::Review);
    assert_eq!(decide(550, &config), Decision::Review);
    assert_eq!(decide(549, &config), Decision::Rejected);
    assert_eq!(decide(300, &config), Decision::Rejected);
}

#[test]
fn risk_level_follows_decision() {
    assert_eq!(Decision::Approved.risk_level(), RiskLevel::Low);
    assert_eq!(Decision::Review.risk_level(), RiskLevel::Medium);
    assert_eq!(Decision::Rejected.risk_level(), RiskLevel::High);
}

#[test]
fn many_loans_lower_the_score() {
    let engine = engine();
    let base = engine.score(&approved_profile());
    let mut loaded = approved_profile();
    loaded.existing_loans = 10;

    assert!(engine.score(&loaded).score < base.score);
}

#[test]
fn result_serializes_with_snake_case_labels() {
    let result = engine().score(&review_profile());
    let json = serde_json::to_value(&result).expect("serializes");

    assert_eq!(json["score"], 585);
    assert_eq!(json["decision"], "review");
    assert_eq!(json["risk_level"], "medium");
    assert!(json["reason"].as_str().is_some());
}
