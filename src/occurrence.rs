use crate::{
    literal::Literal,
    utils::BoundedArray,
};

/// Tracks, for every literal, how many clauses currently in the database
/// mention it.
///
/// Used by the VSIDS heuristic to seed initial scores from the static
/// occurrence counts of the original problem, mirroring how a fresh
/// variable's activity starts out proportional to how often it appears.
#[derive(Debug, Clone, Default)]
pub struct OccurrenceCount {
    /// Indexed by `Literal::dense_index()`, sized `2 * num_variables`.
    counts: BoundedArray<Literal, usize>,
}

impl OccurrenceCount {
    /// Creates an occurrence count tracker for `num_variables` variables,
    /// all counts starting at zero.
    pub fn with_num_variables(num_variables: usize) -> Self {
        Self {
            counts: BoundedArray::with_len(2 * num_variables),
        }
    }

    /// Records that `literal` occurs once more, e.g. because a new clause
    /// mentioning it was just added to the database.
    pub fn bump(&mut self, literal: Literal) {
        *self.counts.get_mut(literal).expect("literal within bounds") += 1;
    }

    /// Returns how many clauses currently mention `literal`.
    pub fn get(&self, literal: Literal) -> usize {
        self.counts[literal]
    }

    /// Grows the tracker to accommodate `num_variables` variables.
    pub fn increase_num_variables(&mut self, num_variables: usize) {
        self.counts
            .increase_len_to(2 * num_variables)
            .expect("num_variables never shrinks across a solver's lifetime");
    }
}

/// Bumps the occurrence count of every literal in a freshly added clause.
pub fn register_clause(counts: &mut OccurrenceCount, literals: &[Literal]) {
    for &lit in literals {
        counts.bump(lit);
    }
}
