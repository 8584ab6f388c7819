//! Migration executor
//!
//! Runs a scenario against a live store. Every phase and action moves
//! through `pending -> running -> {completed | failed | skipped}`.
//! Per-token failures are recorded on the operation; only an `Err` from an
//! action handler is treated as unexpected and caught at the phase
//! boundary.

use crate::error::Result;
use crate::plan::{ActionKind, Approach, MigrationAction, MigrationPhase, MigrationScenario, ScenarioId};
use crate::snapshot::{create_snapshot, MigrationSnapshot};
use crate::validation::{run_checks, ValidationResult};
use chrono::{DateTime, Utc};
use semtok_ontology::Ontology;
use semtok_token::reference::{pure_reference, rewrite_references, substitute_references};
use semtok_token::{insert_new, move_token, Token, TokenStore};
use serde::{Deserialize, Serialize};
use ulid::Ulid;

/// Lifecycle state of a phase, action, or whole execution
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExecutionStatus {
    /// Not started
    Pending,
    /// In progress
    Running,
    /// Finished, every step succeeded
    Completed,
    /// Finished, at least one step failed
    Failed,
    /// Not run
    Skipped,
}

/// Execution switches
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ExecutionOptions {
    /// Compute everything, mutate nothing
    pub dry_run: bool,
    /// Run each action's validation checks
    pub validate: bool,
    /// Abort the rest of the run on the first failed action
    pub stop_on_error: bool,
    /// Capture a snapshot before the first mutation
    pub create_snapshot: bool,
}

impl Default for ExecutionOptions {
    fn default() -> Self {
        Self {
            dry_run: false,
            validate: false,
            stop_on_error: false,
            create_snapshot: true,
        }
    }
}

impl ExecutionOptions {
    /// Preview options: dry run with validation, no snapshot
    #[inline]
    #[must_use]
    pub fn preview() -> Self {
        Self {
            dry_run: true,
            validate: true,
            stop_on_error: false,
            create_snapshot: false,
        }
    }

    /// With dry-run flag
    #[inline]
    #[must_use]
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// With validation flag
    #[inline]
    #[must_use]
    pub fn with_validate(mut self, validate: bool) -> Self {
        self.validate = validate;
        self
    }

    /// With stop-on-error flag
    #[inline]
    #[must_use]
    pub fn with_stop_on_error(mut self, stop: bool) -> Self {
        self.stop_on_error = stop;
        self
    }

    /// With snapshot flag
    #[inline]
    #[must_use]
    pub fn with_snapshot(mut self, snapshot: bool) -> Self {
        self.create_snapshot = snapshot;
        self
    }
}

/// Single token-level effect of an action
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenOperation {
    /// Kind of the owning action
    #[serde(rename = "type")]
    pub kind: ActionKind,
    /// Token operated on
    pub path: String,
    /// Destination, for moves and merges
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub new_path: Option<String>,
    /// Whether the operation succeeded
    pub success: bool,
    /// Failure reason
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Extra detail on a success
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    /// Tokens whose references were rewritten
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub references_updated: Vec<String>,
}

impl TokenOperation {
    fn ok(kind: ActionKind, path: &str) -> Self {
        Self {
            kind,
            path: path.to_string(),
            new_path: None,
            success: true,
            error: None,
            note: None,
            references_updated: Vec::new(),
        }
    }

    fn failed(kind: ActionKind, path: &str, error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: Some(error.into()),
            ..Self::ok(kind, path)
        }
    }

    fn moved_to(mut self, new_path: &str) -> Self {
        self.new_path = Some(new_path.to_string());
        self
    }

    fn noted(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }

    fn updating(mut self, referrers: Vec<String>) -> Self {
        self.references_updated = referrers;
        self
    }
}

/// Run record of one action
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionExecution {
    /// Action identifier
    pub action_id: String,
    /// Action kind
    #[serde(rename = "type")]
    pub kind: ActionKind,
    /// Final state
    pub status: ExecutionStatus,
    /// Token-level effects
    pub operations: Vec<TokenOperation>,
    /// Validation results, when requested
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub validation: Vec<ValidationResult>,
}

impl ActionExecution {
    fn with_status(action: &MigrationAction, status: ExecutionStatus) -> Self {
        Self {
            action_id: action.id.clone(),
            kind: action.kind,
            status,
            operations: Vec::new(),
            validation: Vec::new(),
        }
    }
}

/// Run record of one phase
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PhaseExecution {
    /// Phase identifier
    pub phase_id: String,
    /// Phase name
    pub name: String,
    /// Final state
    pub status: ExecutionStatus,
    /// Action records, in plan order
    pub actions: Vec<ActionExecution>,
    /// Unexpected failures caught at the phase boundary
    pub errors: Vec<String>,
    /// Start time, absent for skipped phases
    pub started_at: Option<DateTime<Utc>>,
    /// End time, absent for skipped phases
    pub finished_at: Option<DateTime<Utc>>,
}

impl PhaseExecution {
    fn skipped(phase: &MigrationPhase) -> Self {
        Self {
            phase_id: phase.id.clone(),
            name: phase.name.clone(),
            status: ExecutionStatus::Skipped,
            actions: phase
                .actions
                .iter()
                .map(|a| ActionExecution::with_status(a, ExecutionStatus::Skipped))
                .collect(),
            errors: Vec::new(),
            started_at: None,
            finished_at: None,
        }
    }
}

/// Aggregate counters of a run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecutionStats {
    /// Actions that completed
    pub actions_completed: usize,
    /// Actions that failed
    pub actions_failed: usize,
    /// Actions not run
    pub actions_skipped: usize,
    /// Successful operations
    pub operations_succeeded: usize,
    /// Failed operations
    pub operations_failed: usize,
    /// References rewritten by successful operations
    pub references_updated: usize,
}

impl ExecutionStats {
    fn tally(phases: &[PhaseExecution]) -> Self {
        let mut stats = Self::default();
        for action in phases.iter().flat_map(|p| &p.actions) {
            match action.status {
                ExecutionStatus::Completed => stats.actions_completed += 1,
                ExecutionStatus::Failed => stats.actions_failed += 1,
                ExecutionStatus::Skipped => stats.actions_skipped += 1,
                ExecutionStatus::Pending | ExecutionStatus::Running => {}
            }
            for op in &action.operations {
                if op.success {
                    stats.operations_succeeded += 1;
                    stats.references_updated += op.references_updated.len();
                } else {
                    stats.operations_failed += 1;
                }
            }
        }
        stats
    }
}

/// Run record of a whole scenario
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MigrationExecution {
    /// Run identifier
    pub id: Ulid,
    /// Scenario executed
    pub scenario_id: ScenarioId,
    /// Template of the scenario
    pub approach: Approach,
    /// Whether the run was a preview
    pub dry_run: bool,
    /// Final state
    pub status: ExecutionStatus,
    /// Phase records, in plan order
    pub phases: Vec<PhaseExecution>,
    /// Aggregate counters
    pub stats: ExecutionStats,
    /// Pre-run snapshot, when requested
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub snapshot: Option<MigrationSnapshot>,
    /// Start time
    pub started_at: DateTime<Utc>,
    /// End time
    pub finished_at: DateTime<Utc>,
}

impl MigrationExecution {
    /// Every operation, in execution order
    pub fn operations(&self) -> impl Iterator<Item = &TokenOperation> + '_ {
        self.phases
            .iter()
            .flat_map(|p| &p.actions)
            .flat_map(|a| &a.operations)
    }
}

/// Executes scenarios against a token store
#[derive(Debug, Clone, Copy)]
pub struct MigrationExecutor<'a> {
    ontology: &'a Ontology,
}

impl<'a> MigrationExecutor<'a> {
    /// Create executor
    #[inline]
    #[must_use]
    pub fn new(ontology: &'a Ontology) -> Self {
        Self { ontology }
    }

    /// Execute every phase of `scenario` in order
    pub fn execute(
        &self,
        scenario: &MigrationScenario,
        store: &mut dyn TokenStore,
        options: &ExecutionOptions,
    ) -> MigrationExecution {
        let started_at = Utc::now();
        tracing::info!(
            scenario = %scenario.id,
            approach = %scenario.approach,
            dry_run = options.dry_run,
            "Starting migration"
        );

        let snapshot = (options.create_snapshot && !options.dry_run)
            .then(|| create_snapshot(&*store, format!("before {} migration", scenario.approach)));

        let mut phases = Vec::with_capacity(scenario.phases.len());
        let mut halted = false;
        for phase in &scenario.phases {
            if halted {
                phases.push(PhaseExecution::skipped(phase));
                continue;
            }
            let record = self.run_phase(phase, store, options);
            if record.status == ExecutionStatus::Failed && options.stop_on_error {
                tracing::warn!(phase = %phase.id, "Phase failed, skipping the remaining phases");
                halted = true;
            }
            phases.push(record);
        }

        let status = if phases.iter().any(|p| p.status == ExecutionStatus::Failed) {
            ExecutionStatus::Failed
        } else {
            ExecutionStatus::Completed
        };
        let stats = ExecutionStats::tally(&phases);
        tracing::info!(
            status = ?status,
            completed = stats.actions_completed,
            failed = stats.actions_failed,
            skipped = stats.actions_skipped,
            "Migration finished"
        );

        MigrationExecution {
            id: Ulid::new(),
            scenario_id: scenario.id,
            approach: scenario.approach,
            dry_run: options.dry_run,
            status,
            phases,
            stats,
            snapshot,
            started_at,
            finished_at: Utc::now(),
        }
    }

    fn run_phase(
        &self,
        phase: &MigrationPhase,
        store: &mut dyn TokenStore,
        options: &ExecutionOptions,
    ) -> PhaseExecution {
        tracing::info!(phase = %phase.id, actions = phase.actions.len(), "Running phase");
        let mut record = PhaseExecution {
            phase_id: phase.id.clone(),
            name: phase.name.clone(),
            status: ExecutionStatus::Running,
            actions: Vec::with_capacity(phase.actions.len()),
            errors: Vec::new(),
            started_at: Some(Utc::now()),
            finished_at: None,
        };

        let mut aborted = false;
        for action in &phase.actions {
            if aborted {
                record
                    .actions
                    .push(ActionExecution::with_status(action, ExecutionStatus::Skipped));
                continue;
            }

            let mut execution = ActionExecution::with_status(action, ExecutionStatus::Running);
            match self.run_action(action, store, options.dry_run) {
                Ok(operations) => {
                    execution.status = if operations.iter().all(|op| op.success) {
                        ExecutionStatus::Completed
                    } else {
                        ExecutionStatus::Failed
                    };
                    if options.validate {
                        let touched: Vec<String> = operations
                            .iter()
                            .filter(|op| op.success && action.kind != ActionKind::Delete)
                            .map(|op| op.new_path.clone().unwrap_or_else(|| op.path.clone()))
                            .collect();
                        execution.validation =
                            run_checks(&action.validations, self.ontology, &*store, &touched);
                    }
                    execution.operations = operations;
                }
                Err(err) => {
                    tracing::warn!(action = %action.id, error = %err, "Action aborted");
                    record.errors.push(format!("{}: {err}", action.id));
                    execution.status = ExecutionStatus::Failed;
                }
            }

            tracing::debug!(action = %action.id, kind = %action.kind, status = ?execution.status, "Action finished");
            if execution.status == ExecutionStatus::Failed && options.stop_on_error {
                aborted = true;
            }
            record.actions.push(execution);
        }

        let failed = !record.errors.is_empty()
            || record
                .actions
                .iter()
                .any(|a| a.status == ExecutionStatus::Failed);
        record.status = if failed {
            ExecutionStatus::Failed
        } else {
            ExecutionStatus::Completed
        };
        record.finished_at = Some(Utc::now());
        record
    }

    /// Run one action outside a scenario
    ///
    /// # Errors
    /// Only when the store rejects a mutation whose preconditions were
    /// checked; per-token failures are returned as failed operations.
    pub fn run_action(
        &self,
        action: &MigrationAction,
        store: &mut dyn TokenStore,
        dry_run: bool,
    ) -> Result<Vec<TokenOperation>> {
        match action.kind {
            ActionKind::Rename => self.rename(action, store, dry_run),
            ActionKind::Merge => Ok(merge(action, store, dry_run)),
            ActionKind::Split => Ok(split(action, store, dry_run)),
            ActionKind::Restructure => self.restructure(action, store, dry_run),
            ActionKind::Delete => Ok(delete(action, store, dry_run)),
            ActionKind::Create => create(action, store, dry_run),
            ActionKind::UpdateReferences => Ok(self.update_references(action, store, dry_run)),
        }
    }

    fn rename(&self, action: &MigrationAction, store: &mut dyn TokenStore, dry_run: bool) -> Result<Vec<TokenOperation>> {
        let kind = action.kind;
        let mut operations = Vec::with_capacity(action.targets.len());

        for (index, target) in action.targets.iter().enumerate() {
            if !store.contains(target) {
                operations.push(TokenOperation::failed(kind, target, format!("token {target} not found")));
                continue;
            }
            let new_path = match action.new_path(index) {
                Some(path) => path.to_string(),
                None => match self.ontology.parse_lenient(target) {
                    Some(parse) => parse.suggested_path(),
                    None => {
                        operations.push(TokenOperation::failed(
                            kind,
                            target,
                            format!("no canonical path can be inferred for {target}"),
                        ));
                        continue;
                    }
                },
            };
            operations.push(move_with_references(store, kind, target, &new_path, dry_run)?);
        }
        Ok(operations)
    }

    fn restructure(
        &self,
        action: &MigrationAction,
        store: &mut dyn TokenStore,
        dry_run: bool,
    ) -> Result<Vec<TokenOperation>> {
        let kind = action.kind;
        let mut operations = Vec::with_capacity(action.targets.len());

        for target in &action.targets {
            if !store.contains(target) {
                operations.push(TokenOperation::failed(kind, target, format!("token {target} not found")));
                continue;
            }
            let Some(name) = self.ontology.parse_strict(target) else {
                operations.push(TokenOperation::failed(
                    kind,
                    target,
                    format!("{target} does not follow the naming scheme"),
                ));
                continue;
            };
            operations.push(move_with_references(store, kind, target, &name.build_path(), dry_run)?);
        }
        Ok(operations)
    }

    fn update_references(&self, action: &MigrationAction, store: &mut dyn TokenStore, dry_run: bool) -> Vec<TokenOperation> {
        let kind = action.kind;
        let targets = if action.targets.is_empty() {
            store
                .iter()
                .filter(|t| self.ontology.parse_strict(&t.path).is_some())
                .map(|t| t.path.clone())
                .collect()
        } else {
            action.targets.clone()
        };

        let mut operations = Vec::with_capacity(targets.len());
        for target in &targets {
            let Some(token) = store.get(target) else {
                operations.push(TokenOperation::failed(kind, target, format!("token {target} not found")));
                continue;
            };
            if token.description.as_deref().is_some_and(|d| !d.is_empty()) {
                operations.push(TokenOperation::ok(kind, target).noted("description already present"));
                continue;
            }
            let Some(name) = self.ontology.parse_strict(target) else {
                operations.push(TokenOperation::ok(kind, target).noted("no canonical description"));
                continue;
            };
            let description = self.ontology.describe(&name);
            if !dry_run {
                if let Some(token) = store.get_mut(target) {
                    token.description = Some(description.clone());
                }
            }
            operations.push(TokenOperation::ok(kind, target).noted(description));
        }
        operations
    }
}

/// Paths whose raw value references `target`
fn referrers_of(store: &dyn TokenStore, target: &str) -> Vec<String> {
    store
        .iter()
        .filter(|t| t.references(target))
        .map(|t| t.path.clone())
        .collect()
}

/// Point every reference to `old` held by `referrers` at `new`
fn redirect_references(store: &mut dyn TokenStore, referrers: &[String], old: &str, new: &str) {
    for path in referrers {
        let Some(token) = store.get_mut(path) else {
            continue;
        };
        let Some(text) = token.value.text_mut() else {
            continue;
        };
        if let Some(rewritten) = rewrite_references(text, old, new) {
            *text = rewritten;
            token.resolved_value = None;
        }
    }
}

/// Replace every reference `keep` holds to `source` with the source's value
///
/// A pure or bare reference takes the source value whole; embedded
/// references are substituted with its text.
fn inline_into_survivor(store: &mut dyn TokenStore, keep: &str, source: &str) {
    let Some(source_value) = store.get(source).map(|t| t.value.clone()) else {
        return;
    };
    let Some(token) = store.get_mut(keep) else {
        return;
    };
    let Some(text) = token.value.text_mut() else {
        return;
    };

    if text.trim() == source || pure_reference(text) == Some(source) {
        token.value = source_value;
    } else {
        let replacement = source_value.to_string();
        let Some(inlined) = substitute_references(text, |path| {
            Some(if path == source {
                replacement.clone()
            } else {
                format!("{{{path}}}")
            })
        }) else {
            return;
        };
        *text = inlined;
    }
    token.resolved_value = None;
}

/// Move `from` to `to` after rewriting every reference to it
fn move_with_references(
    store: &mut dyn TokenStore,
    kind: ActionKind,
    from: &str,
    to: &str,
    dry_run: bool,
) -> Result<TokenOperation> {
    if from == to {
        return Ok(TokenOperation::ok(kind, from).noted("already canonical"));
    }
    if store.contains(to) {
        return Ok(TokenOperation::failed(kind, from, format!("path {to} already exists")));
    }

    let referrers = referrers_of(store, from);
    if !dry_run {
        redirect_references(store, &referrers, from, to);
        move_token(store, from, to)?;
    }
    Ok(TokenOperation::ok(kind, from).moved_to(to).updating(referrers))
}

fn merge(action: &MigrationAction, store: &mut dyn TokenStore, dry_run: bool) -> Vec<TokenOperation> {
    let kind = action.kind;
    let [keep, sources @ ..] = action.targets.as_slice() else {
        return vec![TokenOperation::failed(kind, "", "merge needs at least 2 targets, got 0")];
    };
    if sources.is_empty() {
        return vec![TokenOperation::failed(kind, keep, "merge needs at least 2 targets, got 1")];
    }
    if !store.contains(keep) {
        return vec![TokenOperation::failed(kind, keep, format!("merge target {keep} not found"))];
    }

    let mut operations = Vec::with_capacity(sources.len());
    for source in sources {
        if !store.contains(source) {
            operations.push(TokenOperation::failed(kind, source, format!("token {source} not found")));
            continue;
        }
        let survivor_refers = store.get(keep).is_some_and(|t| t.references(source));
        let referrers: Vec<String> = referrers_of(store, source)
            .into_iter()
            .filter(|p| p != keep)
            .collect();
        if !dry_run {
            if survivor_refers {
                inline_into_survivor(store, keep, source);
            }
            redirect_references(store, &referrers, source, keep);
            store.remove(source);
        }
        let operation = TokenOperation::ok(kind, source).moved_to(keep).updating(referrers);
        operations.push(if survivor_refers {
            operation.noted("value inlined into survivor")
        } else {
            operation
        });
    }
    operations
}

fn split(action: &MigrationAction, store: &mut dyn TokenStore, dry_run: bool) -> Vec<TokenOperation> {
    let kind = action.kind;
    let note = format!("Manual split required: {}", action.description);

    action
        .targets
        .iter()
        .map(|target| {
            let Some(token) = store.get_mut(target) else {
                return TokenOperation::failed(kind, target, format!("token {target} not found"));
            };
            if !dry_run {
                token.description = Some(note.clone());
            }
            TokenOperation::ok(kind, target).noted("manual split required")
        })
        .collect()
}

fn delete(action: &MigrationAction, store: &mut dyn TokenStore, dry_run: bool) -> Vec<TokenOperation> {
    let kind = action.kind;
    let mut operations = Vec::with_capacity(action.targets.len());

    for target in &action.targets {
        if !store.contains(target) {
            operations.push(TokenOperation::failed(kind, target, format!("token {target} not found")));
            continue;
        }
        let referrers = referrers_of(store, target);
        if dry_run {
            let op = TokenOperation::ok(kind, target);
            operations.push(if referrers.is_empty() {
                op
            } else {
                op.noted(format!("reference exists: {}", referrers.join(", ")))
            });
            continue;
        }
        if !referrers.is_empty() {
            operations.push(TokenOperation::failed(
                kind,
                target,
                format!("reference exists: {} still reference {target}", referrers.join(", ")),
            ));
            continue;
        }
        store.remove(target);
        operations.push(TokenOperation::ok(kind, target));
    }
    operations
}

fn create(action: &MigrationAction, store: &mut dyn TokenStore, dry_run: bool) -> Result<Vec<TokenOperation>> {
    let kind = action.kind;
    let mut operations = Vec::with_capacity(action.targets.len());

    for target in &action.targets {
        if store.contains(target) {
            operations.push(TokenOperation::failed(kind, target, format!("path {target} already exists")));
            continue;
        }
        if !dry_run {
            let token = Token::from_raw(target.as_str(), action.value.as_deref().unwrap_or_default())
                .with_description(action.description.as_str());
            insert_new(store, token)?;
        }
        operations.push(TokenOperation::ok(kind, target));
    }
    Ok(operations)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plan::ValidationCheck;
    use semtok_token::{resolve_value, MemoryTokenStore, TokenValue};

    fn action(kind: ActionKind, targets: &[&str]) -> MigrationAction {
        MigrationAction::new(
            "test.1",
            kind,
            "test action",
            targets.iter().map(|s| (*s).to_string()).collect(),
        )
    }

    fn run(action: &MigrationAction, store: &mut MemoryTokenStore, dry_run: bool) -> Vec<TokenOperation> {
        let ontology = Ontology::standard();
        MigrationExecutor::new(&ontology)
            .run_action(action, store, dry_run)
            .unwrap()
    }

    fn raw(store: &MemoryTokenStore, path: &str) -> String {
        store.get(path).unwrap().raw_text()
    }

    #[test]
    fn rename_rewrites_pure_embedded_and_bare_references() {
        let mut store = MemoryTokenStore::from_raw([
            ("bg.button.primary", "#3B82F6"),
            ("pure", "{bg.button.primary}"),
            ("embedded", "0 0 0 2px { bg.button.primary }"),
            ("bare", "bg.button.primary"),
        ]);
        let ops = run(&action(ActionKind::Rename, &["bg.button.primary"]), &mut store, false);

        assert!(ops[0].success);
        assert_eq!(ops[0].new_path.as_deref(), Some("background.action.accent"));
        assert_eq!(ops[0].references_updated.len(), 3);
        assert!(store.contains("background.action.accent"));
        assert!(!store.contains("bg.button.primary"));
        assert_eq!(raw(&store, "pure"), "{background.action.accent}");
        assert_eq!(raw(&store, "embedded"), "0 0 0 2px {background.action.accent}");
        assert_eq!(raw(&store, "bare"), "background.action.accent");
    }

    #[test]
    fn rename_explicit_destination_and_missing_target() {
        let mut store = MemoryTokenStore::from_raw([("x", "#fff")]);
        let rename = action(ActionKind::Rename, &["x", "ghost"])
            .with_new_paths(vec!["text.base".to_string(), "text.muted".to_string()]);
        let ops = run(&rename, &mut store, false);

        assert!(ops[0].success);
        assert!(store.contains("text.base"));
        assert!(!ops[1].success);
        assert_eq!(ops[1].error.as_deref(), Some("token ghost not found"));
    }

    #[test]
    fn rename_refuses_occupied_destination() {
        let mut store = MemoryTokenStore::from_raw([("bg.base", "#fff"), ("background.base", "#000")]);
        let ops = run(&action(ActionKind::Rename, &["bg.base"]), &mut store, false);
        assert!(!ops[0].success);
        assert!(store.contains("bg.base"));
    }

    #[test]
    fn merge_redirects_and_deletes_sources() {
        let mut store = MemoryTokenStore::from_raw([
            ("background.action.accent", "#3B82F6"),
            ("background.surface.accent", "#3B82F6"),
            ("border.surface.accent", "{background.surface.accent}"),
        ]);
        let ops = run(
            &action(ActionKind::Merge, &["background.action.accent", "background.surface.accent"]),
            &mut store,
            false,
        );

        assert!(ops[0].success);
        assert!(!store.contains("background.surface.accent"));
        assert_eq!(raw(&store, "border.surface.accent"), "{background.action.accent}");
    }

    #[test]
    fn merge_inlines_source_into_referring_survivor() {
        let mut store = MemoryTokenStore::from_raw([
            ("background.surface.accent", "{background.action.accent}"),
            ("background.action.accent", "#3B82F6"),
            ("border.surface.accent", "0 0 0 1px {background.action.accent}"),
        ]);
        let ops = run(
            &action(ActionKind::Merge, &["background.surface.accent", "background.action.accent"]),
            &mut store,
            false,
        );

        assert!(ops[0].success);
        assert_eq!(ops[0].note.as_deref(), Some("value inlined into survivor"));
        assert!(!store.contains("background.action.accent"));
        assert_eq!(raw(&store, "background.surface.accent"), "#3B82F6");
        assert_eq!(raw(&store, "border.surface.accent"), "0 0 0 1px {background.surface.accent}");
        assert!(store.iter().all(|t| !t.references("background.action.accent")));
    }

    #[test]
    fn merge_substitutes_embedded_survivor_reference() {
        let mut store = MemoryTokenStore::from_raw([
            ("shadow.surface.accent", "0 0 0 2px {border.action.accent}"),
            ("border.action.accent", "#3B82F6"),
        ]);
        run(
            &action(ActionKind::Merge, &["shadow.surface.accent", "border.action.accent"]),
            &mut store,
            false,
        );

        assert_eq!(raw(&store, "shadow.surface.accent"), "0 0 0 2px #3B82F6");
    }

    #[test]
    fn redirected_references_drop_stale_resolved_value() {
        let mut store = MemoryTokenStore::from_raw([
            ("background.action.accent", "#3B82F6"),
            ("background.surface.accent", "#111111"),
        ]);
        store.insert(
            Token::from_raw("border.surface.accent", "{background.surface.accent}")
                .with_resolved(TokenValue::infer("#111111")),
        );
        run(
            &action(ActionKind::Merge, &["background.action.accent", "background.surface.accent"]),
            &mut store,
            false,
        );

        let border = store.get("border.surface.accent").unwrap();
        assert_eq!(border.raw_text(), "{background.action.accent}");
        assert!(border.resolved_value.is_none());
        assert_eq!(
            resolve_value(&store, "border.surface.accent"),
            Some(TokenValue::infer("#3B82F6"))
        );
    }

    #[test]
    fn merge_needs_two_existing_targets() {
        let mut store = MemoryTokenStore::from_raw([("a", "#fff"), ("b", "#fff")]);
        let ops = run(&action(ActionKind::Merge, &["a"]), &mut store, false);
        assert!(!ops[0].success);

        let ops = run(&action(ActionKind::Merge, &["missing", "a"]), &mut store, false);
        assert!(!ops[0].success);
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn split_annotates_only() {
        let mut store = MemoryTokenStore::from_raw([("text.base", "#000")]);
        let ops = run(&action(ActionKind::Split, &["text.base"]), &mut store, false);

        assert!(ops[0].success);
        assert_eq!(ops[0].note.as_deref(), Some("manual split required"));
        assert_eq!(
            store.get("text.base").unwrap().description.as_deref(),
            Some("Manual split required: test action")
        );
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn restructure_rebuilds_canonical_form() {
        let mut store = MemoryTokenStore::from_raw([
            ("background/action/accent/default", "#3B82F6"),
            ("text.action.accent", "#fff"),
            ("border.action.accent", "{background/action/accent/default}"),
        ]);
        let ops = run(
            &action(ActionKind::Restructure, &["background/action/accent/default", "text.action.accent"]),
            &mut store,
            false,
        );

        assert_eq!(ops[0].new_path.as_deref(), Some("background.action.accent"));
        assert_eq!(raw(&store, "border.action.accent"), "{background.action.accent}");
        assert!(ops[1].success);
        assert_eq!(ops[1].note.as_deref(), Some("already canonical"));
    }

    #[test]
    fn delete_guard_and_dry_run() {
        let mut store = MemoryTokenStore::from_raw([("a", "#fff"), ("b", "{a}"), ("c", "1px")]);

        let ops = run(&action(ActionKind::Delete, &["a"]), &mut store, false);
        assert!(!ops[0].success);
        assert!(ops[0].error.as_deref().unwrap().starts_with("reference exists"));
        assert!(store.contains("a"));

        let ops = run(&action(ActionKind::Delete, &["a"]), &mut store, true);
        assert!(ops[0].success);
        assert!(store.contains("a"));

        let ops = run(&action(ActionKind::Delete, &["c"]), &mut store, false);
        assert!(ops[0].success);
        assert!(!store.contains("c"));
    }

    #[test]
    fn create_refuses_existing_path() {
        let mut store = MemoryTokenStore::from_raw([("text.base", "#000")]);
        let create = action(ActionKind::Create, &["text.base", "text.muted"]).with_value("#6B7280");
        let ops = run(&create, &mut store, false);

        assert!(!ops[0].success);
        assert!(ops[1].success);
        let created = store.get("text.muted").unwrap();
        assert_eq!(created.raw_text(), "#6B7280");
        assert_eq!(created.description.as_deref(), Some("test action"));
    }

    #[test]
    fn update_references_backfills_descriptions() {
        let mut store = MemoryTokenStore::from_raw([("text.action.accent", "#fff"), ("legacy", "#000")]);
        let ops = run(&action(ActionKind::UpdateReferences, &[]), &mut store, false);

        assert_eq!(ops.len(), 1);
        let description = store.get("text.action.accent").unwrap().description.clone().unwrap();
        assert!(description.contains("in action elements"));

        let again = run(&action(ActionKind::UpdateReferences, &[]), &mut store, false);
        assert_eq!(again[0].note.as_deref(), Some("description already present"));
    }

    fn scenario(phases: Vec<MigrationPhase>) -> MigrationScenario {
        MigrationScenario {
            id: ScenarioId::new(),
            approach: Approach::Progressive,
            name: "test".to_string(),
            description: String::new(),
            risk_score: 0.0,
            phases,
            estimated_effort: 0,
            estimated_days: 0,
            success_probability: 1.0,
            benefits: Vec::new(),
            challenges: Vec::new(),
            prerequisites: Vec::new(),
        }
    }

    fn phase(id: &str, actions: Vec<MigrationAction>) -> MigrationPhase {
        MigrationPhase {
            id: id.to_string(),
            name: id.to_string(),
            description: String::new(),
            actions,
            effort_hours: 1,
            dependencies: Vec::new(),
            rollback_plan: String::new(),
        }
    }

    #[test]
    fn stop_on_error_skips_the_rest() {
        let mut store = MemoryTokenStore::from_raw([("a", "#fff")]);
        let scenario = scenario(vec![
            phase(
                "p1",
                vec![
                    action(ActionKind::Delete, &["missing"]),
                    action(ActionKind::Create, &["b"]),
                ],
            ),
            phase("p2", vec![action(ActionKind::Create, &["c"])]),
        ]);
        let ontology = Ontology::standard();
        let options = ExecutionOptions::default().with_stop_on_error(true);
        let execution = MigrationExecutor::new(&ontology).execute(&scenario, &mut store, &options);

        assert_eq!(execution.status, ExecutionStatus::Failed);
        assert_eq!(execution.phases[0].status, ExecutionStatus::Failed);
        assert_eq!(execution.phases[0].actions[1].status, ExecutionStatus::Skipped);
        assert_eq!(execution.phases[1].status, ExecutionStatus::Skipped);
        assert_eq!(execution.stats.actions_failed, 1);
        assert_eq!(execution.stats.actions_skipped, 2);
        assert!(!store.contains("b"));
        assert!(execution.snapshot.is_some());
    }

    #[test]
    fn without_stop_on_error_later_work_runs() {
        let mut store = MemoryTokenStore::from_raw([("a", "#fff")]);
        let scenario = scenario(vec![
            phase(
                "p1",
                vec![
                    action(ActionKind::Delete, &["missing"]),
                    action(ActionKind::Create, &["b"]),
                ],
            ),
            phase("p2", vec![action(ActionKind::Create, &["c"])]),
        ]);
        let ontology = Ontology::standard();
        let execution =
            MigrationExecutor::new(&ontology).execute(&scenario, &mut store, &ExecutionOptions::default());

        assert_eq!(execution.phases[0].status, ExecutionStatus::Failed);
        assert_eq!(execution.phases[1].status, ExecutionStatus::Completed);
        assert!(store.contains("b"));
        assert!(store.contains("c"));
    }

    #[test]
    fn validation_runs_only_when_requested() {
        let mut store = MemoryTokenStore::new();
        let create = action(ActionKind::Create, &["legacy.thing"])
            .with_validations(&[ValidationCheck::NamingConventionCompliance]);
        let scenario = scenario(vec![phase("p1", vec![create])]);
        let ontology = Ontology::standard();
        let executor = MigrationExecutor::new(&ontology);

        let quiet = executor.execute(&scenario, &mut store.clone(), &ExecutionOptions::default());
        assert!(quiet.phases[0].actions[0].validation.is_empty());

        let checked = executor.execute(
            &scenario,
            &mut store,
            &ExecutionOptions::default().with_validate(true),
        );
        let validation = &checked.phases[0].actions[0].validation;
        assert_eq!(validation.len(), 1);
        assert!(!validation[0].passed);
    }

    #[test]
    fn dry_run_validation_checks_planned_paths() {
        let mut store = MemoryTokenStore::from_raw([("bg.button.primary", "#3B82F6")]);
        let rename = action(ActionKind::Rename, &["bg.button.primary"])
            .with_validations(&[ValidationCheck::NamingConventionCompliance]);
        let create = action(ActionKind::Create, &["legacy.thing"])
            .with_validations(&[ValidationCheck::NamingConventionCompliance]);
        let scenario = scenario(vec![phase("p1", vec![rename, create])]);
        let ontology = Ontology::standard();

        let record = MigrationExecutor::new(&ontology).execute(
            &scenario,
            &mut store,
            &ExecutionOptions::default().with_dry_run(true).with_validate(true),
        );

        let actions = &record.phases[0].actions;
        assert!(actions[0].validation[0].passed);
        assert!(!actions[1].validation[0].passed);
        assert_eq!(actions[1].validation[0].paths, vec!["legacy.thing"]);
        assert!(!store.contains("legacy.thing"));
    }
}
