use crate::{
    assignment::Assignment,
    clause::{
        Clause,
        ClauseDb,
        ClauseId,
    },
    literal::Literal,
    utils::{
        BoundedArray,
        Index,
    },
};

/// The two-watched-literals index over a [`ClauseDb`].
///
/// Every non-unit clause watches exactly two of its literals. A clause only
/// needs attention when one of its watched literals becomes false: as long
/// as a clause has two literals that are either true or unassigned, it
/// cannot yet be unit or conflicting. Unit clauses are never registered
/// here; they are propagated directly at construction time.
#[derive(Debug, Clone)]
pub struct Watches {
    /// Indexed by `Literal::dense_index()`: which clauses currently watch
    /// this literal.
    lists: BoundedArray<Literal, Vec<ClauseId>>,
    /// Indexed by `ClauseId::into_index()`: the pair of literals a clause
    /// currently watches. Empty (unit or larger) clauses never appear here.
    pairs: Vec<(Literal, Literal)>,
}

impl Watches {
    /// Creates an empty watch index sized for `num_variables` variables.
    pub fn with_num_variables(num_variables: usize) -> Self {
        Self {
            lists: BoundedArray::with_len(2 * num_variables),
            pairs: Vec::new(),
        }
    }

    /// Grows the watch index to accommodate `num_variables` variables.
    pub fn increase_num_variables(&mut self, num_variables: usize) {
        self.lists
            .increase_len_to(2 * num_variables)
            .expect("num_variables never shrinks across a solver's lifetime");
    }

    /// Registers a freshly pushed clause of two or more literals into the
    /// watch scheme, watching its first two literals.
    ///
    /// # Panics
    ///
    /// Panics if `id` is not the next clause ID to be registered, i.e. this
    /// must be called once per clause, in the order the clauses were
    /// pushed to the database.
    pub fn watch_clause(&mut self, id: ClauseId, clause: &Clause) {
        assert_eq!(
            id.into_index(),
            self.pairs.len(),
            "clauses must be registered with watches in the order they are pushed"
        );
        let (a, b) = clause.initial_watches();
        self.pairs.push((a, b));
        self.lists.get_mut(a).expect("literal within bounds").push(id);
        self.lists.get_mut(b).expect("literal within bounds").push(id);
    }

    /// Returns the pair of literals currently watched by the clause with
    /// the given ID.
    pub fn watched_pair(&self, id: ClauseId) -> (Literal, Literal) {
        self.pairs[id.into_index()]
    }

    /// Reacts to `falsified` having just become false under `assignment`.
    ///
    /// Scans every clause watching `falsified` exactly once (clauses that
    /// decide to keep watching `falsified` are re-inserted for future
    /// scans, not re-visited in this call), looking for a replacement
    /// watch among the clause's unwatched literals.
    ///
    /// Returns the other watched literal of every clause for which no
    /// replacement was found. Such a literal is either newly forced (if
    /// still unassigned) or witnesses a conflict (if already false);
    /// distinguishing the two is left to the caller's propagation queue,
    /// which already must perform that check when a literal is dequeued.
    pub fn on_literal_falsified(
        &mut self,
        falsified: Literal,
        assignment: &Assignment,
        clauses: &ClauseDb,
    ) -> Vec<Literal> {
        let mut forced = Vec::new();
        let watchers = std::mem::take(self.lists.get_mut(falsified).expect("literal within bounds"));
        for id in watchers {
            let (w0, w1) = self.pairs[id.into_index()];
            let other = if w0 == falsified { w1 } else { w0 };
            if assignment.is_true(other) {
                self.lists.get_mut(falsified).expect("literal within bounds").push(id);
                continue
            }
            let clause = clauses.resolve(id);
            let replacement = (0..clause.len())
                .map(|index| clause.get(index).expect("index within clause bounds"))
                .find(|&lit| lit != w0 && lit != w1 && !assignment.is_false(lit));
            match replacement {
                Some(new_watch) => {
                    self.pairs[id.into_index()] = (other, new_watch);
                    self.lists.get_mut(new_watch).expect("literal within bounds").push(id);
                }
                None => {
                    self.lists.get_mut(falsified).expect("literal within bounds").push(id);
                    forced.push(other);
                }
            }
        }
        forced
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lit(raw: i32) -> Literal {
        Literal::from_dimacs(raw)
    }

    fn push(db: &mut ClauseDb, watches: &mut Watches, literals: Vec<Literal>, num_vars: usize) -> ClauseId {
        let clause = Clause::new(literals, num_vars).unwrap();
        let id = db.push(clause);
        if db.resolve(id).len() >= 2 {
            watches.watch_clause(id, db.resolve(id));
        }
        id
    }

    #[test]
    fn finds_replacement_watch() {
        let mut db = ClauseDb::new();
        let mut watches = Watches::with_num_variables(3);
        push(&mut db, &mut watches, vec![lit(1), lit(2), lit(3)], 3);

        let mut assignment = Assignment::with_num_variables(3);
        assignment.assign(lit(-1));
        let forced = watches.on_literal_falsified(lit(-1), &assignment, &db);
        assert!(forced.is_empty(), "a replacement watch should have been found among lit(2)/lit(3)");
    }

    #[test]
    fn forces_unit_when_no_replacement_found() {
        let mut db = ClauseDb::new();
        let mut watches = Watches::with_num_variables(2);
        push(&mut db, &mut watches, vec![lit(1), lit(2)], 2);

        let mut assignment = Assignment::with_num_variables(2);
        assignment.assign(lit(-1));
        let forced = watches.on_literal_falsified(lit(-1), &assignment, &db);
        assert_eq!(forced, vec![lit(2)]);
    }

    #[test]
    fn keeps_watching_falsified_when_other_watch_satisfied() {
        let mut db = ClauseDb::new();
        let mut watches = Watches::with_num_variables(2);
        let id = push(&mut db, &mut watches, vec![lit(1), lit(2)], 2);

        let mut assignment = Assignment::with_num_variables(2);
        assignment.assign(lit(2));
        assignment.assign(lit(-1));
        let forced = watches.on_literal_falsified(lit(-1), &assignment, &db);
        assert!(forced.is_empty());
        assert_eq!(watches.watched_pair(id), (lit(2), lit(1)));
    }
}
