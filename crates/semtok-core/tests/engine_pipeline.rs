//! Full pipeline through the facade

use pretty_assertions::assert_eq;
use semtok_core::{EngineConfig, TokenIntelligence};
use semtok_migrate::{Approach, ExecutionOptions, ExecutionStatus};
use semtok_test_utils::{healthy_store, legacy_store, sorted_pairs};
use semtok_token::TokenStore;

#[test]
fn healthy_store_outscores_legacy_store() {
    let engine = TokenIntelligence::default();
    let healthy = engine.audit(&healthy_store());
    let legacy = engine.audit(&legacy_store());

    assert!(healthy.score() > legacy.score());
    assert!(engine.assess_risk(&healthy).overall < engine.assess_risk(&legacy).overall);
}

#[test]
fn preview_then_apply_then_rollback() {
    let engine = TokenIntelligence::new(EngineConfig::default());
    let mut store = legacy_store();
    let original = sorted_pairs(&store);

    let (_, preview) = engine
        .migrate(&mut store, Approach::Progressive, &ExecutionOptions::preview())
        .unwrap();
    assert!(preview.dry_run);
    assert_eq!(sorted_pairs(&store), original);

    let (plan, applied) = engine
        .migrate(&mut store, Approach::Progressive, &ExecutionOptions::default())
        .unwrap();
    assert!(!applied.dry_run);
    assert_eq!(applied.scenario_id, plan.scenario(Approach::Progressive).unwrap().id);
    assert_ne!(applied.status, ExecutionStatus::Pending);
    assert!(store.contains("background.action.accent"));

    let after = engine.audit(&store);
    assert!(after.structure.compliance_rate > engine.audit(&legacy_store()).structure.compliance_rate);

    engine.rollback(&mut store, applied.snapshot.as_ref().unwrap());
    assert_eq!(sorted_pairs(&store), original);
}

#[test]
fn reference_comparison_against_itself_is_identical() {
    let engine = TokenIntelligence::default();
    let store = healthy_store();
    let comparison = engine.compare_with_reference(&store, &store);

    assert!((comparison.similarity - 1.0).abs() < 1e-9);
    assert!(comparison.missing_contexts.is_empty());
    assert!(comparison.extra_contexts.is_empty());
}

#[test]
fn legacy_store_is_far_from_healthy_reference() {
    let engine = TokenIntelligence::default();
    let comparison = engine.compare_with_reference(&legacy_store(), &healthy_store());

    assert!(comparison.similarity < 1.0);
    assert!(!comparison.missing_contexts.is_empty());
    assert!(!comparison.recommendations.is_empty());
}

#[test]
fn plan_serializes_camel_case() {
    let plan = TokenIntelligence::default().plan(&legacy_store());
    let json = serde_json::to_value(&plan).unwrap();

    assert!(json.get("audit").is_some());
    assert_eq!(json["scenarios"].as_array().unwrap().len(), 3);
    assert!(json["comparison"].get("recommended").is_some());
}
