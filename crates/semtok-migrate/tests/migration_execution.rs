//! End-to-end migration runs over the shared fixtures

use pretty_assertions::assert_eq;
use proptest::prelude::*;
use semtok_audit::Auditor;
use semtok_migrate::{
    assess_risk, create_snapshot, generate_scenarios, rollback, ActionKind, Approach,
    ExecutionOptions, ExecutionStatus, MigrationAction, MigrationConfig, MigrationExecutor, MigrationScenario,
};
use semtok_ontology::Ontology;
use semtok_test_utils::strategies::arb_store;
use semtok_test_utils::{healthy_store, legacy_store, referrers_of, sorted_pairs, store_pairs};
use semtok_token::{MemoryTokenStore, TokenStore};
use std::sync::Arc;

fn plan(ontology: &Arc<Ontology>, store: &MemoryTokenStore) -> Vec<MigrationScenario> {
    let audit = Auditor::new(Arc::clone(ontology)).audit(store);
    let risk = assess_risk(&audit);
    generate_scenarios(&audit, &risk, ontology, &MigrationConfig::default())
}

fn scenario(scenarios: &[MigrationScenario], approach: Approach) -> &MigrationScenario {
    scenarios.iter().find(|s| s.approach == approach).unwrap()
}

#[test]
fn rename_leaves_no_reference_to_the_old_path() {
    let ontology = Ontology::standard();
    let mut store = MemoryTokenStore::from_raw([
        ("x", "#3B82F6"),
        ("p", "{x}"),
        ("q", "0 0 0 1px {x}"),
        ("r", "{ x }"),
    ]);
    let action = MigrationAction::new("t.1", ActionKind::Rename, "rename x", vec!["x".to_string()])
        .with_new_paths(vec!["y".to_string()]);

    let ops = MigrationExecutor::new(&ontology)
        .run_action(&action, &mut store, false)
        .unwrap();

    assert!(ops[0].success);
    assert_eq!(ops[0].references_updated, vec!["p", "q", "r"]);
    assert!(referrers_of(&store, "x").is_empty());
    assert!(store_pairs(&store).iter().all(|(_, value)| !value.contains("{x}")));
    assert_eq!(store.get("p").unwrap().raw_text(), "{y}");
    assert_eq!(store.get("q").unwrap().raw_text(), "0 0 0 1px {y}");
    assert_eq!(store.get("y").unwrap().raw_text(), "#3B82F6");
}

#[test]
fn delete_of_referenced_token_is_refused() {
    let ontology = Ontology::standard();
    let mut store = MemoryTokenStore::from_raw([("a", "#fff"), ("b", "{a}")]);
    let before = sorted_pairs(&store);
    let action = MigrationAction::new("t.1", ActionKind::Delete, "drop a", vec!["a".to_string()]);

    let ops = MigrationExecutor::new(&ontology)
        .run_action(&action, &mut store, false)
        .unwrap();

    assert!(!ops[0].success);
    assert!(ops[0].error.as_deref().unwrap().contains("reference exists"));
    assert_eq!(sorted_pairs(&store), before);
}

#[test]
fn dry_run_never_mutates() {
    let ontology = Arc::new(Ontology::standard());
    let mut store = legacy_store();
    let before = store_pairs(&store);
    let scenarios = plan(&ontology, &store);
    let executor = MigrationExecutor::new(&ontology);

    for scenario in &scenarios {
        let execution = executor.execute(scenario, &mut store, &ExecutionOptions::preview());
        assert!(execution.dry_run);
        assert!(execution.snapshot.is_none());
        assert!(execution.stats.operations_succeeded > 0);
        assert_eq!(store_pairs(&store), before);
    }
}

#[test]
fn risk_orders_conservative_progressive_comprehensive() {
    let ontology = Arc::new(Ontology::standard());
    for store in [legacy_store(), healthy_store(), MemoryTokenStore::new()] {
        let scenarios = plan(&ontology, &store);
        let conservative = scenario(&scenarios, Approach::Conservative).risk_score;
        let progressive = scenario(&scenarios, Approach::Progressive).risk_score;
        let comprehensive = scenario(&scenarios, Approach::Comprehensive).risk_score;
        assert!(conservative <= progressive, "{conservative} > {progressive}");
        assert!(progressive <= comprehensive, "{progressive} > {comprehensive}");
    }
}

#[test]
fn progressive_run_on_legacy_store_keeps_references_intact() {
    let ontology = Arc::new(Ontology::standard());
    let mut store = legacy_store();
    let scenarios = plan(&ontology, &store);
    let progressive = scenario(&scenarios, Approach::Progressive);

    let execution = MigrationExecutor::new(&ontology).execute(
        progressive,
        &mut store,
        &ExecutionOptions::default().with_validate(true),
    );

    assert!(!execution.dry_run);
    assert!(execution.snapshot.is_some());
    assert!(store.contains("background.action.accent"));
    assert!(!store.contains("bg.button.primary"));
    for op in execution.operations().filter(|op| op.success) {
        if let Some(new_path) = &op.new_path {
            assert!(
                referrers_of(&store, &op.path).is_empty(),
                "{} still referenced after moving to {new_path}",
                op.path
            );
        }
    }
}

#[test]
fn comprehensive_merges_duplicates_after_renaming_them() {
    let ontology = Arc::new(Ontology::standard());
    let mut store = MemoryTokenStore::from_raw([
        ("bg.action.accent", "#3B82F6"),
        ("background.surface.accent", "#3B82F6"),
    ]);
    let scenarios = plan(&ontology, &store);
    let comprehensive = scenario(&scenarios, Approach::Comprehensive);

    let merges: Vec<&MigrationAction> = comprehensive
        .phases
        .iter()
        .flat_map(|p| &p.actions)
        .filter(|a| a.kind == ActionKind::Merge)
        .collect();
    assert_eq!(merges.len(), 1);
    assert!(merges[0].targets.iter().all(|t| t != "bg.action.accent"));

    let execution = MigrationExecutor::new(&ontology).execute(
        comprehensive,
        &mut store,
        &ExecutionOptions::default(),
    );

    for phase in &execution.phases {
        assert_eq!(phase.status, ExecutionStatus::Completed, "{}: {:?}", phase.phase_id, phase.errors);
    }
    assert_eq!(execution.status, ExecutionStatus::Completed);
    assert!(!store.contains("bg.action.accent"));
    let survivors: Vec<_> = store
        .iter()
        .filter(|t| t.raw_text() == "#3B82F6")
        .map(|t| t.path.clone())
        .collect();
    assert_eq!(survivors.len(), 1);
}

#[test]
fn snapshot_restores_after_applied_run() {
    let ontology = Arc::new(Ontology::standard());
    let mut store = legacy_store();
    let before = sorted_pairs(&store);
    let scenarios = plan(&ontology, &store);

    let execution = MigrationExecutor::new(&ontology).execute(
        scenario(&scenarios, Approach::Comprehensive),
        &mut store,
        &ExecutionOptions::default(),
    );
    assert_ne!(sorted_pairs(&store), before);

    rollback(&mut store, execution.snapshot.as_ref().unwrap());
    assert_eq!(sorted_pairs(&store), before);
}

proptest! {
    #[test]
    fn rollback_restores_any_store(mut store in arb_store(12)) {
        let before = sorted_pairs(&store);
        let snapshot = create_snapshot(&store, "prop");

        let paths = store.paths();
        for path in paths.iter().step_by(2) {
            store.remove(path);
        }
        rollback(&mut store, &snapshot);
        prop_assert_eq!(sorted_pairs(&store), before.clone());

        rollback(&mut store, &snapshot);
        prop_assert_eq!(sorted_pairs(&store), before);
    }
}
