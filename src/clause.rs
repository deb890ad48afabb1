use crate::{
    error::Error,
    literal::Literal,
    utils::Index,
};
use core::fmt;

/// Identifies a clause stored in a [`ClauseDb`].
///
/// Clause IDs are dense and stable: once a clause is pushed its ID never
/// changes, and the database never removes clauses, only ever appends.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[repr(transparent)]
pub struct ClauseId {
    value: usize,
}

impl Index for ClauseId {
    fn from_index(index: usize) -> Self {
        Self { value: index }
    }

    fn into_index(self) -> usize {
        self.value
    }
}

impl fmt::Display for ClauseId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "c{}", self.value)
    }
}

/// A disjunction of literals.
///
/// Clauses are validated and normalized at construction: literals are
/// sorted by their dense index and deduplicated, empty clauses are
/// rejected, and clauses that are trivially true (containing a literal
/// and its negation) are rejected as well.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Clause {
    literals: Vec<Literal>,
}

impl Clause {
    /// Creates a new clause from the given literals.
    ///
    /// # Errors
    ///
    /// - [`Error::EmptyClause`] if `literals` is empty.
    /// - [`Error::LiteralOutOfRange`] if a literal's variable index is not
    ///   within `0..num_variables`.
    /// - [`Error::SelfConflictingClause`] if the clause contains both a
    ///   literal and its negation.
    pub fn new(mut literals: Vec<Literal>, num_variables: usize) -> Result<Self, Error> {
        if literals.is_empty() {
            return Err(Error::EmptyClause)
        }
        for &lit in &literals {
            if lit.variable().into_index() >= num_variables {
                return Err(Error::LiteralOutOfRange {
                    literal: lit,
                    num_variables,
                })
            }
        }
        literals.sort_by_key(|lit| lit.dense_index());
        literals.dedup();
        for window in literals.windows(2) {
            if window[0].variable() == window[1].variable() {
                return Err(Error::SelfConflictingClause)
            }
        }
        Ok(Self { literals })
    }

    /// Returns the number of literals in the clause.
    pub fn len(&self) -> usize {
        self.literals.len()
    }

    /// Returns `true` if the clause is a unit clause, i.e. has exactly one literal.
    pub fn is_unit(&self) -> bool {
        self.len() == 1
    }

    /// Returns the clause's literals as a slice.
    pub fn literals(&self) -> &[Literal] {
        &self.literals
    }

    /// Returns the first two literals of the clause, used to seed the
    /// watched-literal scheme.
    ///
    /// # Panics
    ///
    /// Panics if the clause has fewer than two literals; callers must
    /// special-case unit clauses before watching them.
    pub fn initial_watches(&self) -> (Literal, Literal) {
        (self.literals[0], self.literals[1])
    }

    /// Returns the literal at the given position in the clause.
    pub fn get(&self, index: usize) -> Option<Literal> {
        self.literals.get(index).copied()
    }
}

/// An append-only database of clauses.
///
/// Mirrors the solver's own append-only growth: learned clauses are pushed
/// onto the same database as the original problem clauses and are never
/// removed during search.
#[derive(Debug, Clone, Default)]
pub struct ClauseDb {
    clauses: Vec<Clause>,
}

impl ClauseDb {
    /// Creates a new, empty clause database.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of clauses currently stored.
    pub fn len(&self) -> usize {
        self.clauses.len()
    }

    /// Returns `true` if the database holds no clauses.
    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    /// Appends a new clause to the database and returns its [`ClauseId`].
    pub fn push(&mut self, clause: Clause) -> ClauseId {
        let id = ClauseId::from_index(self.clauses.len());
        self.clauses.push(clause);
        id
    }

    /// Returns a shared reference to the clause with the given ID.
    pub fn resolve(&self, id: ClauseId) -> &Clause {
        &self.clauses[id.into_index()]
    }

    /// Returns an exclusive reference to the clause with the given ID.
    pub fn resolve_mut(&mut self, id: ClauseId) -> &mut Clause {
        &mut self.clauses[id.into_index()]
    }

    /// Returns an iterator over all clause IDs currently stored, in the
    /// order they were pushed.
    pub fn ids(&self) -> impl Iterator<Item = ClauseId> {
        (0..self.clauses.len()).map(ClauseId::from_index)
    }
}
