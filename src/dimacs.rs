//! A thin DIMACS CNF adapter, at the crate's edge rather than in the core.
//!
//! Parsing a symbolic Boolean expression is out of scope for this crate
//! (see the crate-level docs), but DIMACS CNF is already expressed in
//! integer literals, so loading one is nothing more than assembling the
//! `Vec<Vec<i32>>` + variable count shape [`crate::Solver::new`] expects.
//! Grounded in the teacher's `cnf_parser`-based `Solver::from_cnf`
//! constructor (`SolverBuilder` implementing `cnf_parser::Output`); kept
//! here only so this crate's own tests and benchmarks can load instances
//! without hand-writing literal vectors, not as a general-purpose parser.

use cnf_parser::{
    Error as CnfError,
    Input,
    Output,
};
use std::convert::Infallible;

/// A parsed DIMACS CNF instance: a flat clause list paired with its
/// declared variable count.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DimacsInstance {
    /// The `N` declared on the `p cnf N M` problem line.
    pub num_variables: usize,
    /// Every clause, in file order, as DIMACS-style signed integers.
    pub clauses: Vec<Vec<i32>>,
}

/// Parses a DIMACS CNF document from `input`.
///
/// # Errors
///
/// Returns the underlying `cnf_parser` error if `input` is not a
/// well-formed DIMACS CNF document (missing problem line, malformed
/// literal, unterminated clause, and so on).
pub fn parse<I>(input: &mut I) -> Result<DimacsInstance, CnfError<Infallible>>
where
    I: Input,
{
    let mut collector = Collector::default();
    cnf_parser::parse_cnf(input, &mut collector)?;
    collector.finalize_current();
    Ok(DimacsInstance {
        num_variables: collector.num_variables,
        clauses: collector.clauses,
    })
}

#[derive(Debug, Default)]
struct Collector {
    num_variables: usize,
    clauses: Vec<Vec<i32>>,
    current: Vec<i32>,
}

impl Collector {
    fn finalize_current(&mut self) {
        if !self.current.is_empty() {
            self.clauses.push(std::mem::take(&mut self.current));
        }
    }
}

impl Output for Collector {
    type Error = Infallible;

    fn problem(&mut self, num_variables: u32, num_clauses: u32) -> Result<(), Self::Error> {
        self.num_variables = num_variables as usize;
        self.clauses.reserve(num_clauses as usize);
        Ok(())
    }

    fn literal(&mut self, literal: cnf_parser::Literal) -> Result<(), Self::Error> {
        self.current.push(literal.into_value().get());
        Ok(())
    }

    fn finalize_clause(&mut self) -> Result<(), Self::Error> {
        self.finalize_current();
        Ok(())
    }

    fn finish(&mut self) -> Result<(), Self::Error> {
        self.finalize_current();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_problem_line_and_clauses() {
        let instance = parse(
            &mut &br"
            p cnf 3 2
            1 -2 0
            3 0
        "[..],
        )
        .unwrap();
        assert_eq!(instance.num_variables, 3);
        assert_eq!(instance.clauses, vec![vec![1, -2], vec![3]]);
    }

    #[test]
    fn tolerates_missing_trailing_newline_after_last_clause() {
        let instance = parse(&mut &b"p cnf 1 1\n1 0"[..]).unwrap();
        assert_eq!(instance.clauses, vec![vec![1]]);
    }

    #[test]
    fn solver_accepts_a_parsed_instance() {
        let instance = parse(
            &mut &br"
            p cnf 2 1
            1 2 0
        "[..],
        )
        .unwrap();
        let mut solver = crate::Solver::new(
            instance.clauses,
            instance.num_variables,
            Vec::new(),
            crate::SolverConfig::default(),
        )
        .unwrap();
        assert!(solver.solve().is_sat());
    }
}
