use crate::{
    literal::{
        Literal,
        VarAssignment,
        Variable,
    },
    utils::{
        BoundedArray,
        BoundedBitmap,
    },
};

/// The current partial assignment of truth values to variables.
///
/// This is the single source of truth for "is this literal true, false, or
/// unassigned" queries used throughout propagation and the watch-list scan.
#[derive(Debug, Clone)]
pub struct Assignment {
    /// Indexed by `Variable::into_index()`. Only meaningful where
    /// `variable_set` marks the slot as assigned.
    values: BoundedArray<Variable, VarAssignment>,
    /// Dense presence bitmap: `variable_set[v]` is `true` once `v` has
    /// been assigned a value.
    variable_set: BoundedBitmap<Variable, bool>,
}

impl Assignment {
    /// Creates an assignment for `num_variables` variables, all unassigned.
    pub fn with_num_variables(num_variables: usize) -> Self {
        Self {
            values: BoundedArray::with_len(num_variables),
            variable_set: BoundedBitmap::with_len(num_variables),
        }
    }

    /// Grows the assignment to accommodate `num_variables` variables.
    pub fn increase_num_variables(&mut self, num_variables: usize) {
        self.values
            .increase_len_to(num_variables)
            .expect("num_variables never shrinks across a solver's lifetime");
        self.variable_set
            .increase_len(num_variables)
            .expect("num_variables never shrinks across a solver's lifetime");
    }

    /// Returns the number of variables tracked by this assignment.
    pub fn num_variables(&self) -> usize {
        self.values.len()
    }

    /// Returns the current value assigned to `variable`, if any.
    pub fn value_of(&self, variable: Variable) -> Option<VarAssignment> {
        let is_assigned = self.variable_set.get(variable).expect("variable within bounds");
        is_assigned.then(|| self.values[variable])
    }

    /// Returns `true` if `literal` is currently satisfied by the assignment.
    pub fn is_true(&self, literal: Literal) -> bool {
        self.value_of(literal.variable())
            .map_or(false, |value| literal.is_satisfied_by(value))
    }

    /// Returns `true` if the negation of `literal` is currently satisfied,
    /// i.e. `literal` itself is falsified by the assignment.
    pub fn is_false(&self, literal: Literal) -> bool {
        self.value_of(literal.variable())
            .map_or(false, |value| !literal.is_satisfied_by(value))
    }

    /// Returns `true` if `literal`'s variable has not been assigned yet.
    pub fn is_unassigned(&self, literal: Literal) -> bool {
        self.value_of(literal.variable()).is_none()
    }

    /// Assigns `literal`'s variable so that `literal` becomes true.
    ///
    /// # Panics
    ///
    /// Panics if the variable is already assigned; callers are expected to
    /// check [`Assignment::is_unassigned`] first.
    pub fn assign(&mut self, literal: Literal) {
        let (variable, value) = literal.into_var_and_assignment();
        let was_assigned = self.variable_set.get(variable).expect("variable within bounds");
        assert!(!was_assigned, "variable assigned twice without an intervening unassign");
        self.values[variable] = value;
        self.variable_set
            .set(variable, true)
            .expect("variable within bounds");
    }

    /// Clears the assignment of `variable`, making it unassigned again.
    pub fn unassign(&mut self, variable: Variable) {
        self.variable_set
            .set(variable, false)
            .expect("variable within bounds");
    }

    /// Returns `true` if every variable has been assigned a value.
    pub fn is_total(&self) -> bool {
        (&self.variable_set).into_iter().all(|is_assigned| is_assigned)
    }

    /// Returns an iterator over all variables together with their assigned
    /// value, skipping variables that are still unassigned.
    pub fn iter(&self) -> impl Iterator<Item = (Variable, VarAssignment)> + '_ {
        (0..self.num_variables()).filter_map(move |index| {
            let variable = Variable::from_index(index);
            self.value_of(variable).map(|value| (variable, value))
        })
    }
}
