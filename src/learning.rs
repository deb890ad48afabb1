use crate::{
    clause::ClauseDb,
    levels::Levels,
    literal::Literal,
};
use log::warn;

/// Selects which conflict-clause learning policy the solver uses.
///
/// Dispatched by `match` rather than through a trait object: there are only
/// ever two policies, both cheap, and a `match` keeps the hot conflict path
/// free of a vtable indirection.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ClauseLearning {
    /// Learn nothing from conflicts; rely purely on chronological
    /// backtracking to make progress.
    None,
    /// Learn the clause formed by negating every decision literal still on
    /// the trail when the conflict occurred.
    ///
    /// This is not first-UIP learning: it ignores the structure of the
    /// implication graph and simply asserts "not all of these decisions
    /// again", which is always a valid (if not minimal) conflict clause.
    Naive,
}

impl Default for ClauseLearning {
    fn default() -> Self {
        ClauseLearning::None
    }
}

impl ClauseLearning {
    /// Computes the clause to learn from the conflict at the current
    /// decision levels, or `None` if this policy does not learn clauses.
    pub fn compute_conflict(self, levels: &Levels) -> Option<Vec<Literal>> {
        match self {
            ClauseLearning::None => None,
            ClauseLearning::Naive => Some(levels.decisions().map(|decision| !decision).collect()),
        }
    }

    /// Periodic maintenance hook over the clause database, run every few
    /// decisions alongside VSIDS decay.
    ///
    /// Neither policy currently prunes learned clauses; the hook exists so
    /// that a future policy with a clause-deletion strategy has a place to
    /// plug into the same maintenance cadence.
    pub fn clean_clauses(self, clauses: &mut ClauseDb) {
        warn!("clean_clauses invoked with {} clauses in the database, nothing to reduce", clauses.len());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lit(raw: i32) -> Literal {
        Literal::from_dimacs(raw)
    }

    #[test]
    fn none_policy_learns_nothing() {
        let mut levels = Levels::new();
        levels.new_decision_level(lit(1));
        assert_eq!(ClauseLearning::None.compute_conflict(&levels), None);
    }

    #[test]
    fn naive_policy_negates_every_decision() {
        let mut levels = Levels::new();
        levels.new_decision_level(lit(1));
        levels.new_decision_level(lit(-2));
        let learned = ClauseLearning::Naive.compute_conflict(&levels).unwrap();
        assert_eq!(learned, vec![lit(-1), lit(2)]);
    }
}
