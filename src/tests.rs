//! End-to-end scenarios over the public `Solver` API.
//!
//! One test per literal input/output pair worked through by hand; the
//! random-instance soundness/completeness sweep lives in
//! `tests/properties.rs` instead, since it needs a brute-force oracle
//! too large to keep alongside these.

use crate::{
    Literal,
    SolveOutcome,
    Solver,
    SolverConfig,
    Variable,
};

fn solve(clauses: Vec<Vec<i32>>, num_variables: usize, init: Vec<i32>) -> SolveOutcome {
    let mut solver = Solver::new(clauses, num_variables, init, SolverConfig::default()).unwrap();
    solver.solve()
}

fn var(one_indexed: u32) -> Variable {
    Variable::from_one_indexed(one_indexed)
}

#[test]
fn scenario_1_unit_clauses_contradict() {
    let outcome = solve(vec![vec![-1], vec![1]], 1, vec![]);
    assert_eq!(outcome, SolveOutcome::Unsat);
}

#[test]
fn scenario_2_units_leave_one_free_variable() {
    let outcome = solve(vec![vec![1], vec![-2]], 3, vec![]);
    let model = outcome.model().expect("expected sat");
    assert!(model.value_of(var(1)).into_bool());
    assert!(!model.value_of(var(2)).into_bool());
    // exactly one of +3, -3 is asserted by construction (Model is total).
    let _ = model.value_of(var(3));
}

#[test]
fn scenario_3_small_mixed_formula_is_sat() {
    let clauses = vec![
        vec![2, -3],
        vec![1],
        vec![3, -3],
        vec![2, -2],
        vec![3, -2],
    ];
    let outcome = solve(clauses.clone(), 3, vec![]);
    let model = outcome.model().expect("expected sat");
    for clause in &clauses {
        assert!(
            clause.iter().any(|&raw| model
                .value_of(Variable::from_one_indexed(raw.unsigned_abs()))
                .into_bool()
                == (raw > 0)),
            "clause {:?} not satisfied by model",
            clause
        );
    }
}

#[test]
fn scenario_4_four_clauses_over_two_vars_is_unsat() {
    let outcome = solve(vec![vec![1, 2], vec![-1, 2], vec![1, -2], vec![-1, -2]], 2, vec![]);
    assert_eq!(outcome, SolveOutcome::Unsat);
}

#[test]
fn scenario_5_both_all_true_and_all_false_excluded() {
    let outcome = solve(vec![vec![1, 2, 3], vec![-1, -2, -3]], 3, vec![]);
    let model = outcome.model().expect("expected sat");
    let values: Vec<bool> = (1..=3).map(|i| model.value_of(var(i)).into_bool()).collect();
    assert!(values.iter().any(|&v| v), "at least one positive literal must hold");
    assert!(values.iter().any(|&v| !v), "at least one negative literal must hold");
}

#[test]
fn scenario_6_initial_assignment_forces_propagation() {
    let outcome = solve(vec![vec![1, 2]], 2, vec![-1]);
    let model = outcome.model().expect("expected sat");
    assert!(!model.value_of(var(1)).into_bool());
    assert!(model.value_of(var(2)).into_bool());
}

#[test]
fn soundness_every_original_clause_is_satisfied_on_sat() {
    let clauses = vec![
        vec![1, 2, -3],
        vec![-1, 3],
        vec![2, 3],
        vec![-2, -3, 1],
    ];
    let outcome = solve(clauses.clone(), 3, vec![]);
    let model = outcome.model().expect("expected sat");
    for clause in &clauses {
        let satisfied = clause.iter().any(|&raw| {
            let lit = Literal::from_dimacs(raw);
            model.value_of(lit.variable()).into_bool() == lit.is_positive()
        });
        assert!(satisfied, "clause {:?} violated", clause);
    }
}

#[test]
fn assignment_is_total_on_sat() {
    let outcome = solve(vec![vec![1, 2, 3, 4, 5]], 5, vec![]);
    let model = outcome.model().expect("expected sat");
    assert_eq!(model.len(), 5);
}

#[test]
fn naive_learning_agrees_with_disabled_learning() {
    let clauses = vec![vec![1, 2], vec![-1, 2], vec![1, -2], vec![-1, -2]];
    let none = solve(clauses.clone(), 2, vec![]);
    let naive = {
        let config = SolverConfig {
            clause_learning: crate::ClauseLearning::Naive,
            ..SolverConfig::default()
        };
        let mut solver = Solver::new(clauses, 2, vec![], config).unwrap();
        solver.solve()
    };
    assert_eq!(none, SolveOutcome::Unsat);
    assert_eq!(naive, SolveOutcome::Unsat);
}
