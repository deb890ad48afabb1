use crate::{
    assignment::Assignment,
    literal::{
        Literal,
        Variable,
    },
    utils::BoundedArray,
};
use ordered_float::OrderedFloat;
use std::cmp::Reverse;
use std::collections::BinaryHeap;

/// VSIDS (Variable State Independent Decaying Sum) branching heuristic.
///
/// A literal's score starts at the negation of its static occurrence
/// count (so the most-frequent literal starts out most negative) and is
/// bumped toward zero — made *less* negative, i.e. worse — every time it
/// appears in a newly learned clause. Selection always wants the most
/// negative score, so the heap is a min-heap over `(score, literal)`
/// pairs, implemented with `std`'s max-heap `BinaryHeap` by wrapping the
/// score in `Reverse`.
///
/// The heap is lazy and stale-tolerant: entries are never removed when a
/// score changes, only ever added, and cleaned lazily at pop time by
/// discarding entries whose variable has since been assigned. A popped
/// entry's score is trusted even if a fresher entry for the same literal
/// exists deeper in the heap; decay only ever scales every score toward
/// zero by the same factor, so it can never make a stale top-of-heap
/// entry look better than it really is relative to everything pushed
/// after it.
#[derive(Debug, Clone)]
pub struct Vsids {
    /// Indexed by `Literal::dense_index()`.
    scores: BoundedArray<Literal, f64>,
    heap: BinaryHeap<(Reverse<OrderedFloat<f64>>, i32)>,
}

impl Vsids {
    /// Negates `count`, returning `0.0` rather than `-0.0` when `count`
    /// is zero so a never-occurring literal's score compares and prints
    /// the same as one that has decayed or been bumped back to exactly
    /// zero.
    fn initial_score(count: usize) -> f64 {
        if count == 0 {
            0.0
        } else {
            -(count as f64)
        }
    }

    /// Builds the initial heuristic state from the static occurrence
    /// counts of the problem's clauses: a literal's initial score is the
    /// negated number of clauses it appears in.
    pub fn from_occurrence_counts(num_variables: usize, count_of: impl Fn(Literal) -> usize) -> Self {
        let mut scores = BoundedArray::with_len(2 * num_variables);
        let mut heap = BinaryHeap::with_capacity(2 * num_variables);
        for var_index in 0..num_variables {
            let variable = Variable::from_index(var_index);
            for literal in [variable.pos_lit(), variable.neg_lit()] {
                let score = Self::initial_score(count_of(literal));
                *scores.get_mut(literal).expect("literal within bounds") = score;
                heap.push((Reverse(OrderedFloat(score)), literal.to_dimacs()));
            }
        }
        Self { scores, heap }
    }

    /// Grows the heuristic state to accommodate `num_variables` variables,
    /// seeding the new variables' scores at zero.
    pub fn increase_num_variables(&mut self, num_variables: usize) {
        let old_len = self.scores.len();
        self.scores
            .increase_len_to(2 * num_variables)
            .expect("num_variables never shrinks across a solver's lifetime");
        for dense_index in old_len..self.scores.len() {
            let literal = Literal::from_dense_index(dense_index);
            self.heap.push((Reverse(OrderedFloat(0.0)), literal.to_dimacs()));
        }
    }

    /// Halves every literal's score toward zero, the VSIDS decay step.
    ///
    /// Existing heap entries are left untouched: decay shrinks every
    /// score toward zero by the same factor, so the relative order
    /// promised by any entry already in the heap remains a valid (if
    /// conservative) bound.
    pub fn decay(&mut self) {
        for score in self.scores.iter_mut() {
            *score /= 2.0;
        }
    }

    /// Bumps the score of every literal in a newly added clause by one,
    /// making it less negative and so *worse* under the negated-score
    /// heap: a learned-clause literal is deprioritized, not favored.
    pub fn clause_added(&mut self, literals: &[Literal]) {
        for &literal in literals {
            let score = self.scores.get_mut(literal).expect("literal within bounds");
            *score += 1.0;
            self.heap.push((Reverse(OrderedFloat(*score)), literal.to_dimacs()));
        }
    }

    /// Called when a variable becomes unassigned (backtracked over),
    /// making both of its literals eligible for selection again.
    ///
    /// Pushes fresh entries carrying each literal's current score; any
    /// older, now-stale entries for the same literal are left in the heap
    /// and will be discarded lazily the next time they surface.
    pub fn variable_unassigned(&mut self, variable: Variable) {
        let pos = variable.pos_lit();
        let neg = variable.neg_lit();
        self.heap.push((Reverse(OrderedFloat(self.scores[pos])), pos.to_dimacs()));
        self.heap.push((Reverse(OrderedFloat(self.scores[neg])), neg.to_dimacs()));
    }

    /// Pops the lowest-scoring (most negative, i.e. most active) literal
    /// whose variable is still unassigned, discarding stale entries for
    /// already-assigned variables along the way.
    ///
    /// Returns `None` once the heap holds no entry for a still-unassigned
    /// variable.
    pub fn pick(&mut self, assignment: &Assignment) -> Option<Literal> {
        while let Some((_, raw)) = self.heap.pop() {
            let literal = Literal::from_dimacs(raw);
            if assignment.is_unassigned(literal) {
                return Some(literal)
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::literal::Variable;
    use proptest::prelude::*;

    #[test]
    fn picks_most_frequent_literal_first() {
        let counts = |lit: Literal| match lit.to_dimacs() {
            1 => 5,
            -1 => 1,
            2 => 3,
            -2 => 3,
            _ => 0,
        };
        let mut vsids = Vsids::from_occurrence_counts(2, counts);
        let assignment = Assignment::with_num_variables(2);
        assert_eq!(vsids.pick(&assignment), Some(Literal::from_dimacs(1)));
    }

    #[test]
    fn skips_already_assigned_variables() {
        let counts = |lit: Literal| match lit.to_dimacs() {
            1 => 5,
            -1 => 5,
            2 => 1,
            -2 => 1,
            _ => 0,
        };
        let mut vsids = Vsids::from_occurrence_counts(2, counts);
        let mut assignment = Assignment::with_num_variables(2);
        assignment.assign(Literal::from_dimacs(1));
        let picked = vsids.pick(&assignment).unwrap();
        assert_eq!(picked.variable(), Variable::from_index(1));
    }

    #[test]
    fn decay_halves_future_clause_added_bumps() {
        let counts = |_: Literal| 0;
        let mut vsids = Vsids::from_occurrence_counts(1, counts);
        vsids.clause_added(&[Literal::from_dimacs(1)]);
        vsids.decay();
        assert_eq!(vsids.scores[Literal::from_dimacs(1)], 0.5);
    }

    proptest! {
        /// After an arbitrary interleaving of `variable_unassigned` and
        /// `pick`, any literal `pick` returns names a variable that is
        /// actually still unassigned, regardless of how many stale
        /// entries `variable_unassigned` left behind in the heap.
        #[test]
        fn pick_never_returns_an_assigned_variable(
            num_vars in 1usize..8,
            steps in prop::collection::vec(0usize..16, 0..40),
        ) {
            let mut vsids = Vsids::from_occurrence_counts(num_vars, |_| 0);
            let mut assignment = Assignment::with_num_variables(num_vars);
            for step in steps {
                let var = Variable::from_index(step % num_vars);
                if assignment.is_unassigned(var.pos_lit()) {
                    assignment.assign(var.pos_lit());
                } else {
                    assignment.unassign(var);
                    vsids.variable_unassigned(var);
                }
                if let Some(picked) = vsids.pick(&assignment) {
                    prop_assert!(assignment.is_unassigned(picked));
                }
            }
        }
    }
}
