use crate::learning::ClauseLearning;

/// Which decision heuristic the solver uses to pick the next branching
/// literal.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Heuristic {
    /// Variable State Independent Decaying Sum.
    Vsids,
}

impl Default for Heuristic {
    fn default() -> Self {
        Heuristic::Vsids
    }
}

/// Tunable parameters of a [`crate::Solver`].
///
/// Unlike the reference implementation this is distilled from, which
/// dispatched on free-form string selectors and raised at construction
/// time if the string was unrecognized, an unknown heuristic or learning
/// policy simply cannot be expressed here: the enums are closed, so the
/// equivalent failure mode is a compile error instead of a runtime one.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct SolverConfig {
    /// Branching heuristic used to pick undecided literals.
    pub heuristic: Heuristic,
    /// Conflict-clause learning policy.
    pub clause_learning: ClauseLearning,
    /// Number of decisions between rounds of periodic maintenance (VSIDS
    /// decay and clause-database cleanup).
    pub maintenance_interval: usize,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            heuristic: Heuristic::default(),
            clause_learning: ClauseLearning::default(),
            maintenance_interval: 500,
        }
    }
}
