use crate::literal::Literal;

/// One decision level of the search.
///
/// Level 0 is the root level: it holds no decision, only literals forced by
/// unit propagation on the original clauses before any branching happened.
/// Every level above it starts with exactly one decision literal, and
/// records every literal (decision included) assigned while that level was
/// current so they can be undone together on backtrack.
#[derive(Debug, Clone)]
pub struct Level {
    /// The literal branched on to open this level. `None` for level 0.
    decision: Option<Literal>,
    /// `true` once this level's decision has already been flipped once.
    flipped: bool,
    /// Every literal assigned while this level was the current level, in
    /// the order they were assigned, decision first.
    assigned: Vec<Literal>,
}

impl Level {
    fn root() -> Self {
        Self {
            decision: None,
            flipped: false,
            assigned: Vec::new(),
        }
    }

    fn with_decision(decision: Literal) -> Self {
        Self {
            decision: Some(decision),
            flipped: false,
            assigned: vec![decision],
        }
    }

    /// Returns the decision literal that opened this level, if any.
    pub fn decision(&self) -> Option<Literal> {
        self.decision
    }

    /// Returns `true` if this level's decision has already been flipped.
    pub fn is_flipped(&self) -> bool {
        self.flipped
    }

    /// Returns every literal assigned while this level was current.
    pub fn assigned(&self) -> &[Literal] {
        &self.assigned
    }
}

/// The stack of decision levels maintained during search.
///
/// Mirrors a DPLL/CDCL trail: level 0 always exists and is never popped,
/// `new_decision_level` opens a new level on top with its branching
/// literal, and `undo_to` pops levels back down, invoking a callback for
/// every literal that gets unassigned in the process so the caller can
/// revert the [`crate::assignment::Assignment`] and heuristic state too.
#[derive(Debug, Clone)]
pub struct Levels {
    stack: Vec<Level>,
}

impl Default for Levels {
    fn default() -> Self {
        Self {
            stack: vec![Level::root()],
        }
    }
}

impl Levels {
    /// Creates a fresh level stack containing only the root level.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the index of the current (topmost) decision level.
    ///
    /// Level 0 is the root level reached before any decision was made.
    pub fn current_level(&self) -> usize {
        self.stack.len() - 1
    }

    /// Returns `true` if no decision has been made yet, i.e. the search is
    /// still at the root level.
    pub fn is_root_level(&self) -> bool {
        self.current_level() == 0
    }

    /// Records that `literal` was assigned while the current level is
    /// active, without opening a new level. Used for literals forced by
    /// unit propagation.
    pub fn record_propagated(&mut self, literal: Literal) {
        self.stack
            .last_mut()
            .expect("root level always present")
            .assigned
            .push(literal);
    }

    /// Opens a new decision level branching on `decision`.
    pub fn new_decision_level(&mut self, decision: Literal) {
        self.stack.push(Level::with_decision(decision));
    }

    /// Returns the decision literal of the current level, if the current
    /// level is not the root level.
    pub fn current_decision(&self) -> Option<Literal> {
        self.stack.last().and_then(Level::decision)
    }

    /// Returns `true` if the current level's decision has already been
    /// flipped once.
    pub fn current_is_flipped(&self) -> bool {
        self.stack
            .last()
            .expect("root level always present")
            .is_flipped()
    }

    /// Marks the current (just-opened) level as the flipped half of a
    /// decision, i.e. the one-sided retry after its sibling conflicted.
    ///
    /// Called right after [`Levels::new_decision_level`] pushed the
    /// level carrying the negated decision literal.
    pub fn mark_current_flipped(&mut self) {
        self.stack
            .last_mut()
            .expect("root level always present")
            .flipped = true;
    }

    /// Pops levels down to (and including re-opening) `target_level`,
    /// invoking `on_unassign` for every literal unassigned in the process,
    /// from most to least recently assigned.
    ///
    /// After this call `current_level() == target_level`.
    pub fn undo_to<F>(&mut self, target_level: usize, mut on_unassign: F)
    where
        F: FnMut(Literal),
    {
        while self.current_level() > target_level {
            let level = self.stack.pop().expect("current_level > target_level >= 0");
            for literal in level.assigned.into_iter().rev() {
                on_unassign(literal);
            }
        }
    }

    /// Returns every decision literal from level 1 upward, in level order.
    ///
    /// Level 0 is excluded since it holds no decision; used by conflict
    /// learning to build the negated-decisions clause.
    pub fn decisions(&self) -> impl Iterator<Item = Literal> + '_ {
        self.stack[1..].iter().filter_map(Level::decision)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lit(raw: i32) -> Literal {
        Literal::from_dimacs(raw)
    }

    #[test]
    fn starts_at_root_level() {
        let levels = Levels::new();
        assert_eq!(levels.current_level(), 0);
        assert!(levels.is_root_level());
        assert_eq!(levels.current_decision(), None);
    }

    #[test]
    fn new_decision_level_increments() {
        let mut levels = Levels::new();
        levels.new_decision_level(lit(1));
        assert_eq!(levels.current_level(), 1);
        assert_eq!(levels.current_decision(), Some(lit(1)));
    }

    #[test]
    fn undo_to_restores_prior_level_and_reports_literals() {
        let mut levels = Levels::new();
        levels.new_decision_level(lit(1));
        levels.record_propagated(lit(2));
        levels.new_decision_level(lit(3));
        levels.record_propagated(lit(4));

        let mut unassigned = Vec::new();
        levels.undo_to(1, |literal| unassigned.push(literal));

        assert_eq!(levels.current_level(), 1);
        assert_eq!(unassigned, vec![lit(4), lit(3)]);
    }

    #[test]
    fn mark_current_flipped_sets_flag_without_touching_decision() {
        let mut levels = Levels::new();
        levels.new_decision_level(lit(1));
        levels.undo_to(0, |_| {});
        levels.new_decision_level(lit(-1));
        levels.mark_current_flipped();
        assert_eq!(levels.current_decision(), Some(lit(-1)));
        assert!(levels.current_is_flipped());
        assert_eq!(levels.stack.last().unwrap().assigned(), &[lit(-1)]);
    }

    #[test]
    fn decisions_skips_root_level() {
        let mut levels = Levels::new();
        levels.new_decision_level(lit(1));
        levels.new_decision_level(lit(2));
        assert_eq!(levels.decisions().collect::<Vec<_>>(), vec![lit(1), lit(2)]);
    }
}
