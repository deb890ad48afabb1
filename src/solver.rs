use crate::{
    assignment::Assignment,
    clause::{
        Clause,
        ClauseDb,
    },
    config::{
        Heuristic,
        SolverConfig,
    },
    error::Error,
    heuristic::Vsids,
    levels::Levels,
    literal::Literal,
    model::Model,
    occurrence::{
        self,
        OccurrenceCount,
    },
    propagate::{
        self,
        PureLiteralRule,
        SimplifyOutcome,
    },
    watches::Watches,
};
use log::{
    debug,
    trace,
};

/// The upper bound on `num_variables` this crate's dense per-literal
/// arrays can address (`2 * num_variables` must fit in a `u32` index).
const MAX_VARIABLES: usize = (u32::MAX as usize) / 2;

/// The result of a complete call to [`Solver::find_model`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SolveOutcome {
    /// The formula is satisfiable; carries a complete model.
    Sat(Model),
    /// The formula is unsatisfiable.
    Unsat,
    /// The caller's abort hook requested the search stop early.
    ///
    /// No invariant is violated by stopping here: every level below the
    /// abort point remains intact, so a caller may resume the search by
    /// calling `find_model` again.
    Aborted,
}

impl SolveOutcome {
    /// Returns `true` if this outcome is [`SolveOutcome::Sat`].
    pub fn is_sat(&self) -> bool {
        matches!(self, Self::Sat(_))
    }

    /// Returns the model, if this outcome is [`SolveOutcome::Sat`].
    pub fn model(&self) -> Option<&Model> {
        match self {
            Self::Sat(model) => Some(model),
            _ => None,
        }
    }
}

/// A watched-literal CDCL/DPLL search core.
///
/// Owns every structure the search touches: the clause database, the
/// watch index, the current assignment and decision-level trail, the
/// VSIDS heuristic state and the occurrence counts that seed it. All of
/// it is built once by [`Solver::new`] and lives for the duration of one
/// [`Solver::find_model`] call; nothing is shared across solves.
#[derive(Debug, Clone)]
pub struct Solver {
    num_variables: usize,
    clauses: ClauseDb,
    original_num_clauses: usize,
    watches: Watches,
    occurrence: OccurrenceCount,
    assignment: Assignment,
    levels: Levels,
    vsids: Vsids,
    config: SolverConfig,
    unit_queue: Vec<Literal>,
    decisions_made: usize,
    pure_literal_rule: PureLiteralRule,
}

impl Solver {
    /// Builds a solver for `num_variables` Boolean variables over
    /// `clauses`, each an `IntoIterator` of nonzero DIMACS-style integer
    /// literals, with `initial_assignment` forced true before the first
    /// decision.
    ///
    /// # Errors
    ///
    /// - [`Error::ZeroLiteral`] if any literal is `0`.
    /// - [`Error::EmptyClause`] if a clause has no literals.
    /// - [`Error::LiteralOutOfRange`] if a literal's variable exceeds
    ///   `num_variables`.
    /// - [`Error::SelfConflictingClause`] if a clause contains both a
    ///   literal and its negation.
    /// - [`Error::ConflictingInitialAssignment`] if `initial_assignment`
    ///   asserts both a literal and its negation.
    /// - [`Error::TooManyVariables`] if `num_variables` exceeds what this
    ///   crate's dense index types can address.
    pub fn new<C, Cl, I>(
        clauses: C,
        num_variables: usize,
        initial_assignment: I,
        config: SolverConfig,
    ) -> Result<Self, Error>
    where
        C: IntoIterator<Item = Cl>,
        Cl: IntoIterator<Item = i32>,
        I: IntoIterator<Item = i32>,
    {
        if num_variables > MAX_VARIABLES {
            return Err(Error::TooManyVariables {
                requested: num_variables,
                max: MAX_VARIABLES,
            })
        }

        let mut clause_db = ClauseDb::new();
        let mut watches = Watches::with_num_variables(num_variables);
        let mut occurrence_count = OccurrenceCount::with_num_variables(num_variables);
        let mut assignment = Assignment::with_num_variables(num_variables);
        let mut levels = Levels::new();
        let mut unit_queue = Vec::new();

        for raw_clause in clauses {
            let literals = raw_clause
                .into_iter()
                .map(|raw| Literal::checked_from_dimacs(raw).ok_or(Error::ZeroLiteral))
                .collect::<Result<Vec<_>, _>>()?;
            let clause = Clause::new(literals, num_variables)?;
            if clause.is_unit() {
                let unit_lit = clause.get(0).expect("unit clause has exactly one literal");
                clause_db.push(clause);
                unit_queue.push(unit_lit);
            } else {
                occurrence::register_clause(&mut occurrence_count, clause.literals());
                let id = clause_db.push(clause);
                watches.watch_clause(id, clause_db.resolve(id));
            }
        }
        let original_num_clauses = clause_db.len();

        let vsids = Vsids::from_occurrence_counts(num_variables, |lit| occurrence_count.get(lit));

        for raw in initial_assignment {
            let lit = Literal::checked_from_dimacs(raw).ok_or(Error::ZeroLiteral)?;
            if lit.variable().into_index() >= num_variables {
                return Err(Error::LiteralOutOfRange {
                    literal: lit,
                    num_variables,
                })
            }
            if assignment.is_false(lit) {
                return Err(Error::ConflictingInitialAssignment)
            }
            if assignment.is_unassigned(lit) {
                propagate::assign_literal(
                    lit,
                    true,
                    &clause_db,
                    &mut watches,
                    &mut assignment,
                    &mut levels,
                    &mut unit_queue,
                );
            }
        }

        Ok(Self {
            num_variables,
            clauses: clause_db,
            original_num_clauses,
            watches,
            occurrence: occurrence_count,
            assignment,
            levels,
            vsids,
            config,
            unit_queue,
            decisions_made: 0,
            pure_literal_rule: PureLiteralRule,
        })
    }

    /// The number of variables this solver was built for.
    pub fn num_variables(&self) -> usize {
        self.num_variables
    }

    /// The number of clauses present at construction time, before any
    /// clause learned during search was appended.
    pub fn original_num_clauses(&self) -> usize {
        self.original_num_clauses
    }

    /// Runs unit propagation (and the pure-literal rule, a no-op in this
    /// crate) to a fixed point.
    fn simplify(&mut self) -> SimplifyOutcome {
        loop {
            let outcome = propagate::unit_propagate(
                &self.clauses,
                &mut self.watches,
                &mut self.assignment,
                &mut self.levels,
                &mut self.unit_queue,
            );
            if let SimplifyOutcome::Conflict = outcome {
                return SimplifyOutcome::Conflict
            }
            if !self.pure_literal_rule.run(&self.clauses, &self.assignment) {
                break
            }
        }
        SimplifyOutcome::Consistent
    }

    /// Assigns the current level's decision literal. The level must
    /// already carry `lit` as the first entry of its `assigned` list
    /// (true for both a fresh decision and a flip), so the underlying
    /// assignment is updated without recording it a second time.
    fn assign_decision(&mut self, lit: Literal) {
        propagate::assign_literal(
            lit,
            false,
            &self.clauses,
            &mut self.watches,
            &mut self.assignment,
            &mut self.levels,
            &mut self.unit_queue,
        );
    }

    /// Pops exactly one decision level, unassigning every literal it
    /// recorded and notifying the heuristic so those variables' literals
    /// become eligible for selection again.
    fn undo_one_level(&mut self) {
        let target = self.levels.current_level() - 1;
        let assignment = &mut self.assignment;
        let vsids = &mut self.vsids;
        self.levels.undo_to(target, |lit| {
            assignment.unassign(lit.variable());
            vsids.variable_unassigned(lit.variable());
        });
    }

    /// Appends a conflict clause learned at the current decision levels.
    ///
    /// A unit clause (possible under the naive policy whenever the
    /// conflict happened with exactly one decision level open) is stored
    /// for bookkeeping but not watched or enqueued: its single literal is
    /// always exactly the flip the driver is about to try next, so
    /// enqueuing it here would race the driver's own assignment of it.
    fn add_learned_clause(&mut self, literals: Vec<Literal>) {
        let clause = Clause::new(literals, self.num_variables)
            .expect("a learned clause's literals are always in range and non-conflicting");
        occurrence::register_clause(&mut self.occurrence, clause.literals());
        self.vsids.clause_added(clause.literals());
        debug!("learned clause with {} literals", clause.len());
        let id = self.clauses.push(clause);
        if self.clauses.resolve(id).len() >= 2 {
            self.watches.watch_clause(id, self.clauses.resolve(id));
        }
    }

    /// Runs periodic maintenance (VSIDS decay, learned-clause cleanup)
    /// every `config.maintenance_interval` decisions.
    fn maybe_run_periodic_maintenance(&mut self) {
        if self.decisions_made == 0 || self.decisions_made % self.config.maintenance_interval != 0 {
            return
        }
        trace!("periodic maintenance at {} decisions", self.decisions_made);
        self.vsids.decay();
        self.config.clause_learning.clean_clauses(&mut self.clauses);
    }

    /// Runs the decide/propagate/backtrack search loop to completion.
    ///
    /// `should_abort`, if given, is polled once per iteration; if it
    /// returns `true` the search stops and returns
    /// [`SolveOutcome::Aborted`] without violating any invariant.
    pub fn find_model(&mut self, should_abort: Option<&dyn Fn() -> bool>) -> SolveOutcome {
        if let SimplifyOutcome::Conflict = self.simplify() {
            return SolveOutcome::Unsat
        }

        let mut flip_var = false;
        loop {
            if let Some(abort) = should_abort {
                if abort() {
                    return SolveOutcome::Aborted
                }
            }
            self.maybe_run_periodic_maintenance();

            let literal = if flip_var {
                flip_var = false;
                self.levels
                    .current_decision()
                    .expect("a pending flip always re-enters with a decision already pushed")
            } else {
                match self.vsids.pick(&self.assignment) {
                    None => {
                        debug_assert!(self.assignment.is_total());
                        debug!("all variables assigned, reporting sat");
                        return SolveOutcome::Sat(Model::from_assignment(&self.assignment))
                    }
                    Some(lit) => {
                        trace!("deciding {} at level {}", lit, self.levels.current_level() + 1);
                        self.levels.new_decision_level(lit);
                        self.decisions_made += 1;
                        match self.config.heuristic {
                            Heuristic::Vsids => {}
                        }
                        lit
                    }
                }
            };

            self.assign_decision(literal);
            if let SimplifyOutcome::Consistent = self.simplify() {
                continue
            }

            // Conflict: undo already-flipped levels, which are exhausted.
            while !self.levels.is_root_level() && self.levels.current_is_flipped() {
                self.undo_one_level();
            }
            if self.levels.is_root_level() {
                debug!("both branches of the root level exhausted, reporting unsat");
                return SolveOutcome::Unsat
            }

            if let Some(learned) = self.config.clause_learning.compute_conflict(&self.levels) {
                self.add_learned_clause(learned);
            }

            let flip_lit = !self
                .levels
                .current_decision()
                .expect("a non-root, non-flipped level always carries a decision");
            trace!("flipping decision at level {} to {}", self.levels.current_level(), flip_lit);
            self.undo_one_level();
            self.levels.new_decision_level(flip_lit);
            self.levels.mark_current_flipped();
            flip_var = true;
        }
    }

    /// Convenience wrapper around [`Solver::find_model`] with no abort
    /// hook.
    pub fn solve(&mut self) -> SolveOutcome {
        self.find_model(None)
    }
}
