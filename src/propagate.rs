//! Unit propagation over the watched-literal index.
//!
//! Kept as free functions over explicitly borrowed pieces of a [`crate::Solver`]
//! rather than methods on a struct of its own: the decision level, the watch
//! index and the assignment are each owned by the solver and a dedicated
//! propagation struct would only have to re-borrow all three anyway.

use crate::{
    assignment::Assignment,
    clause::ClauseDb,
    levels::Levels,
    literal::Literal,
    watches::Watches,
};
use log::trace;

/// Outcome of draining the unit-propagation queue to a fixed point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimplifyOutcome {
    /// The queue drained without finding a falsified literal.
    Consistent,
    /// A literal was forced true while its negation was already assigned.
    Conflict,
}

/// Assigns `lit` true and reacts to the watch-list consequences of its
/// negation becoming false, pushing any newly forced literals onto
/// `unit_queue`.
///
/// Pass `record_in_level = false` when `lit` is a decision or a flip: the
/// level that was just opened for it already lists it first in its
/// `assigned` vector, so recording it again would duplicate the entry and
/// unassign it twice on backtrack.
pub fn assign_literal(
    lit: Literal,
    record_in_level: bool,
    clauses: &ClauseDb,
    watches: &mut Watches,
    assignment: &mut Assignment,
    levels: &mut Levels,
    unit_queue: &mut Vec<Literal>,
) {
    assignment.assign(lit);
    if record_in_level {
        levels.record_propagated(lit);
    }
    trace!("assigned {}", lit);
    let forced = watches.on_literal_falsified(!lit, assignment, clauses);
    unit_queue.extend(forced);
}

/// Drains the unit-propagation queue, a LIFO stack, to a fixed point.
///
/// Processing order does not affect correctness, only which conflict (if
/// any) is reported first.
pub fn unit_propagate(
    clauses: &ClauseDb,
    watches: &mut Watches,
    assignment: &mut Assignment,
    levels: &mut Levels,
    unit_queue: &mut Vec<Literal>,
) -> SimplifyOutcome {
    while let Some(next_lit) = unit_queue.pop() {
        if assignment.is_false(next_lit) {
            trace!("conflict propagating {}", next_lit);
            unit_queue.clear();
            return SimplifyOutcome::Conflict
        }
        if assignment.is_true(next_lit) {
            // Two different clauses can force the same literal before it
            // is dequeued the first time; the second entry is a no-op.
            continue
        }
        assign_literal(next_lit, true, clauses, watches, assignment, levels, unit_queue);
    }
    SimplifyOutcome::Consistent
}

/// Extension point for a pure-literal elimination pass.
///
/// A no-op in this crate: the search remains sound and complete without
/// it (see `Solver::simplify`), and no property in the test suite depends
/// on its behavior. Kept as an explicit type rather than inlined away so
/// a future pass has somewhere to attach without touching the fixed-point
/// driver in `Solver::simplify`.
#[derive(Debug, Default, Clone, Copy)]
pub struct PureLiteralRule;

impl PureLiteralRule {
    /// Runs the rule once. Returns `true` if it made progress (forced a
    /// new assignment), which would cause `simplify` to loop again.
    pub fn run(&self, _clauses: &ClauseDb, _assignment: &Assignment) -> bool {
        false
    }
}
