use crate::{
    assignment::Assignment,
    literal::{
        VarAssignment,
        Variable,
    },
};
use core::fmt;

/// A complete satisfying assignment: every variable has a value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Model {
    values: Vec<VarAssignment>,
}

impl Model {
    /// Builds a model from a completed [`Assignment`].
    ///
    /// # Panics
    ///
    /// Panics if `assignment` is not total, i.e. has any unassigned
    /// variable; callers only construct a `Model` once the search loop has
    /// confirmed every variable is set.
    pub fn from_assignment(assignment: &Assignment) -> Self {
        assert!(assignment.is_total(), "model requested from a partial assignment");
        let values = (0..assignment.num_variables())
            .map(|index| {
                assignment
                    .value_of(Variable::from_index(index))
                    .expect("checked total above")
            })
            .collect();
        Self { values }
    }

    /// Returns the value assigned to `variable`.
    pub fn value_of(&self, variable: Variable) -> VarAssignment {
        self.values[variable.into_index()]
    }

    /// Returns the number of variables in this model.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns an iterator over every variable together with its assigned
    /// value, in variable order.
    pub fn iter(&self) -> impl Iterator<Item = (Variable, VarAssignment)> + '_ {
        self.values
            .iter()
            .enumerate()
            .map(|(index, &value)| (Variable::from_index(index), value))
    }
}

impl fmt::Display for Model {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let mut first = true;
        for (variable, value) in self.iter() {
            if !first {
                write!(f, " ")?;
            }
            first = false;
            match value {
                VarAssignment::True => write!(f, "{}", variable)?,
                VarAssignment::False => write!(f, "-{}", variable)?,
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_from_total_assignment() {
        let mut assignment = Assignment::with_num_variables(2);
        assignment.assign(crate::literal::Literal::from_dimacs(1));
        assignment.assign(crate::literal::Literal::from_dimacs(-2));
        let model = Model::from_assignment(&assignment);
        assert_eq!(model.value_of(Variable::from_index(0)), VarAssignment::True);
        assert_eq!(model.value_of(Variable::from_index(1)), VarAssignment::False);
    }

    #[test]
    #[should_panic]
    fn panics_on_partial_assignment() {
        let assignment = Assignment::with_num_variables(1);
        Model::from_assignment(&assignment);
    }
}
