use crate::literal::Literal;
use thiserror::Error;

/// Errors that may occur while constructing or operating on a [`crate::Solver`].
#[derive(Debug, Error, Copy, Clone, PartialEq, Eq)]
pub enum Error {
    /// A clause was given with no literals in it.
    ///
    /// An empty clause can never be satisfied, so constructing one is
    /// rejected rather than silently producing an always-unsat solver.
    #[error("encountered an empty clause")]
    EmptyClause,

    /// A clause contained a literal whose variable index was out of the
    /// range declared for the problem.
    #[error(
        "literal {literal} refers to a variable outside of the declared \
         range of {num_variables} variables"
    )]
    LiteralOutOfRange {
        literal: Literal,
        num_variables: usize,
    },

    /// A clause contained both a literal and its negation, making it
    /// trivially satisfied. Such clauses carry no information and are
    /// rejected so callers don't accidentally pad the clause database.
    #[error("clause is self-conflicting, it contains both a literal and its negation")]
    SelfConflictingClause,

    /// A literal with raw value `0` was supplied; `0` has no sign and
    /// cannot name a variable.
    #[error("encountered a zero literal, which does not denote a variable")]
    ZeroLiteral,

    /// `initial_assignment` contained both a literal and its negation.
    #[error("initial assignment is self-conflicting, it asserts both a literal and its negation")]
    ConflictingInitialAssignment,

    /// The requested number of variables exceeds what can be addressed by
    /// the solver's internal index types.
    #[error("requested {requested} variables, which exceeds the supported maximum of {max}")]
    TooManyVariables { requested: usize, max: usize },
}
