//! The smart daily update core.
//!
//! [`reconcile`] computes the minimal set of operations turning the current to-do list
//! into the target title set, without ever touching a card whose title is unchanged. \
//! [`apply`] executes such a plan against a [`TaskBoard`], best-effort.
//!
//! The reconciler only ever sees the to-do list. Cards a human has moved to another
//! list (e.g. marked done) are invisible to it, which is what keeps completed and
//! in-progress work safe from a daily refresh.

use std::collections::HashSet;
use std::fmt::{Display, Formatter};

use crate::error::TransportError;
use crate::task::{ListId, Task, TaskId};
use crate::traits::TaskBoard;

/// A task of the current set that has no matching target title
#[derive(Clone, Debug, PartialEq)]
pub struct PlannedRemoval {
    pub id: TaskId,
    pub title: String,
}

/// The computed edit converging the current set to the target set.
///
/// Computing a plan has no side effect; [`apply`] executes it as a separate step.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ReconciliationPlan {
    /// Titles to create, in target order
    pub to_add: Vec<String>,
    /// Tasks to delete
    pub to_remove: Vec<PlannedRemoval>,
    /// Titles present in both sets, kept with their original card untouched
    pub preserved: Vec<String>,
}

impl ReconciliationPlan {
    /// Whether this plan performs no operation at all
    pub fn is_empty(&self) -> bool {
        self.to_add.is_empty() && self.to_remove.is_empty()
    }

    /// How many board operations this plan will issue
    pub fn operation_count(&self) -> usize {
        self.to_add.len() + self.to_remove.len()
    }
}

/// A single failed operation during [`apply`]
#[derive(Debug)]
pub struct ApplyError {
    /// What was being done ("delete" or "create")
    pub operation: &'static str,
    /// The title involved (and, for deletions, the task id)
    pub subject: String,
    pub source: TransportError,
}

impl Display for ApplyError {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), std::fmt::Error> {
        write!(f, "{} {:?}: {}", self.operation, self.subject, self.source)
    }
}

/// The outcome of applying a [`ReconciliationPlan`]
#[derive(Debug, Default)]
pub struct ApplyReport {
    pub added: usize,
    pub removed: usize,
    pub preserved: usize,
    pub errors: Vec<ApplyError>,
}

impl ApplyReport {
    /// Whether every planned operation went through
    pub fn is_complete(&self) -> bool {
        self.errors.is_empty()
    }

    /// Whether nothing the plan asked for was achieved.
    /// Always false for an empty plan: converging on an already-converged list is a success.
    pub fn is_total_failure(&self) -> bool {
        self.added == 0 && self.removed == 0 && !self.errors.is_empty()
    }
}

impl Display for ApplyReport {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), std::fmt::Error> {
        write!(
            f,
            "{} preserved, {} added, {} removed, {} error(s)",
            self.preserved,
            self.added,
            self.removed,
            self.errors.len()
        )
    }
}

/// Computes the minimal edit turning `current_tasks` into `target_titles`.
///
/// Matching is by exact, case-sensitive title equality. The function is pure and total:
/// re-running it on the state produced by applying its plan yields an empty plan.
///
/// Duplicate handling:
/// * duplicate target titles are collapsed, first occurrence wins (order kept),
/// * among current tasks sharing a title, the one with the smallest id survives
///   (Trello ids sort in creation order, so this preserves the oldest card);
///   the extras are removed.
pub fn reconcile(target_titles: &[String], current_tasks: &[Task]) -> ReconciliationPlan {
    let mut seen = HashSet::new();
    let targets: Vec<&str> = target_titles
        .iter()
        .map(|t| t.as_str())
        .filter(|t| seen.insert(*t))
        .collect();
    let target_set: HashSet<&str> = targets.iter().copied().collect();

    let current_titles: HashSet<&str> = current_tasks.iter().map(|t| t.title()).collect();

    // Oldest card first, so that it is the one preserved among duplicates
    let mut current: Vec<&Task> = current_tasks.iter().collect();
    current.sort_by(|a, b| a.id().cmp(b.id()));

    let mut plan = ReconciliationPlan::default();
    let mut kept = HashSet::new();
    for task in current {
        if target_set.contains(task.title()) && kept.insert(task.title()) {
            log::debug!("*   keeping {:?} ({})", task.title(), task.id());
            plan.preserved.push(task.title().to_string());
        } else {
            log::debug!("*   {:?} ({}) is obsolete", task.title(), task.id());
            plan.to_remove.push(PlannedRemoval {
                id: task.id().clone(),
                title: task.title().to_string(),
            });
        }
    }

    for title in targets {
        if !current_titles.contains(title) {
            log::debug!("*   {:?} is missing from the list", title);
            plan.to_add.push(title.to_string());
        }
    }

    plan
}

/// Executes a plan against the board: deletions first, then creations, in plan order.
///
/// Deleting before creating frees list positions before new cards land, and means a
/// failure during the delete phase cannot have created duplicates yet.
///
/// Each operation is attempted regardless of earlier failures; failed ones are recorded
/// in the report. There is no rollback: a partially-applied plan leaves the board in a
/// valid state, and re-running the reconciliation converges from wherever it stopped.
pub async fn apply<B: TaskBoard + ?Sized>(
    plan: &ReconciliationPlan,
    board: &mut B,
    list: &ListId,
) -> ApplyReport {
    let mut report = ApplyReport {
        preserved: plan.preserved.len(),
        ..ApplyReport::default()
    };

    for removal in &plan.to_remove {
        log::debug!("> Deleting {:?} ({})", removal.title, removal.id);
        match board.delete_task(&removal.id).await {
            Ok(()) => report.removed += 1,
            Err(err) => {
                log::warn!("Unable to delete task {:?}: {}", removal.title, err);
                report.errors.push(ApplyError {
                    operation: "delete",
                    subject: format!("{} ({})", removal.title, removal.id),
                    source: err,
                });
            }
        }
    }

    for title in &plan.to_add {
        log::debug!("> Creating {:?}", title);
        match board.create_task(list, title).await {
            Ok(_) => report.added += 1,
            Err(err) => {
                log::warn!("Unable to create task {:?}: {}", title, err);
                report.errors.push(ApplyError {
                    operation: "create",
                    subject: title.clone(),
                    source: err,
                });
            }
        }
    }

    log::info!("Apply done: {}", report);
    report
}

#[cfg(test)]
mod tests {
    use super::*;

    fn task(id: &str, title: &str) -> Task {
        Task::new(TaskId::from(id), title.to_string(), ListId::from("todo"))
    }

    #[test]
    fn typical_day_change() {
        let current = vec![
            task("001", "SCARICO Fornitore ABC"),
            task("002", "CARICO Reparto Cucina"),
        ];
        let target = vec![
            "SCARICO Fornitore ABC".to_string(),
            "CARICO Reparto Bar".to_string(),
        ];

        let plan = reconcile(&target, &current);
        assert_eq!(plan.preserved, vec!["SCARICO Fornitore ABC"]);
        assert_eq!(plan.to_add, vec!["CARICO Reparto Bar"]);
        assert_eq!(plan.to_remove.len(), 1);
        assert_eq!(plan.to_remove[0].title, "CARICO Reparto Cucina");
    }

    #[test]
    fn empty_list_gets_all_creates() {
        let target = vec!["A".to_string(), "B".to_string(), "C".to_string()];
        let plan = reconcile(&target, &[]);
        assert_eq!(plan.to_add, vec!["A", "B", "C"]);
        assert!(plan.to_remove.is_empty());
    }

    #[test]
    fn empty_target_removes_everything() {
        let current = vec![task("001", "X")];
        let plan = reconcile(&[], &current);
        assert!(plan.to_add.is_empty());
        assert_eq!(plan.to_remove.len(), 1);
    }

    #[test]
    fn converged_state_yields_empty_plan() {
        let current = vec![task("001", "A"), task("002", "B")];
        let target = vec!["A".to_string(), "B".to_string()];
        let plan = reconcile(&target, &current);
        assert!(plan.is_empty());
        assert_eq!(plan.preserved.len(), 2);
    }

    #[test]
    fn duplicate_current_titles_keep_the_oldest_card() {
        // Two cards with the same title: the one with the smallest id survives
        let current = vec![task("002", "A"), task("001", "A")];
        let target = vec!["A".to_string()];

        let plan = reconcile(&target, &current);
        assert!(plan.to_add.is_empty());
        assert_eq!(plan.preserved, vec!["A"]);
        assert_eq!(plan.to_remove.len(), 1);
        assert_eq!(plan.to_remove[0].id, TaskId::from("002"));
    }

    #[test]
    fn duplicate_target_titles_are_collapsed() {
        let target = vec!["A".to_string(), "A".to_string(), "B".to_string()];
        let plan = reconcile(&target, &[]);
        assert_eq!(plan.to_add, vec!["A", "B"]);
    }

    #[test]
    fn matching_is_case_sensitive_and_exact() {
        let current = vec![task("001", "scarico fornitore"), task("002", "CARICO ")];
        let target = vec!["SCARICO Fornitore".to_string(), "CARICO".to_string()];

        let plan = reconcile(&target, &current);
        assert_eq!(plan.to_add.len(), 2);
        assert_eq!(plan.to_remove.len(), 2);
        assert!(plan.preserved.is_empty());
    }

    #[test]
    fn additions_keep_target_order() {
        let current = vec![task("001", "B")];
        let target = vec![
            "Z".to_string(),
            "B".to_string(),
            "A".to_string(),
            "M".to_string(),
        ];
        let plan = reconcile(&target, &current);
        assert_eq!(plan.to_add, vec!["Z", "A", "M"]);
    }

    #[test]
    fn minimality() {
        let current = vec![task("001", "A"), task("002", "B"), task("003", "C")];
        let target = vec!["B".to_string(), "D".to_string()];
        let plan = reconcile(&target, &current);

        // to_add contains no title already on the list
        for title in &plan.to_add {
            assert!(!current.iter().any(|t| t.title() == title));
        }
        // to_remove contains no task whose title is targeted
        for removal in &plan.to_remove {
            assert!(!target.contains(&removal.title));
        }
    }
}
