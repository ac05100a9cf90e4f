//! # Linear programs as read from LP files
//!
//! A `Model` holds everything that the LP reader extracts from a document. Bounds are not
//! interpreted; they are kept as text and only searched for variable names.
use itertools::Itertools;

use crate::data::linear_program::constraint::Constraint;
use crate::data::linear_program::elements::{Objective, Sense};
use crate::data::linear_program::expression::LinearExpression;

/// Tokens on a bound line that are never variable names, apart from numbers.
const BOUND_KEYWORDS: [&str; 9] = ["<=", ">=", "=<", "=>", "<", ">", "=", ":", "free"];

/// A linear program in the shape of an LP file.
///
/// Variables are identified by name. The set of all variables (the "variable universe") is
/// derived from the other fields, see `variable_universe`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Model {
    /// Comment lines (starting with a backslash), written back unchanged.
    header: Vec<String>,
    /// Which direction does the objective function go?
    objective: Objective,
    /// Coefficients of the objective function.
    cost: LinearExpression,
    /// All constraints in the order in which they were read.
    constraints: Vec<Constraint>,
    /// Lines of the bounds section, verbatim.
    bounds: Vec<String>,
    /// Variables declared in the generals section.
    generals: Vec<String>,
    /// Variables declared in the binaries section.
    binaries: Vec<String>,
}

impl Model {
    /// Create a new model.
    #[must_use]
    pub fn new(
        header: Vec<String>,
        objective: Objective,
        cost: LinearExpression,
        constraints: Vec<Constraint>,
        bounds: Vec<String>,
        generals: Vec<String>,
        binaries: Vec<String>,
    ) -> Self {
        Self { header, objective, cost, constraints, bounds, generals, binaries }
    }

    /// All variable names, sorted and without duplicates.
    ///
    /// Collected from the objective function, the constraints, the bound lines (ignoring numbers
    /// and relational tokens), and the generals and binaries sections. This order is the column
    /// order of the canonical form and of the dense export.
    #[must_use]
    pub fn variable_universe(&self) -> Vec<String> {
        self.cost.variables()
            .chain(self.constraints.iter().flat_map(|constraint| constraint.lhs.variables()))
            .chain(self.bounds.iter().flat_map(|line| bound_line_variables(line)))
            .chain(self.generals.iter().map(String::as_str))
            .chain(self.binaries.iter().map(String::as_str))
            .sorted_unstable()
            .dedup()
            .map(str::to_string)
            .collect()
    }

    /// Whether the model is a maximization problem with only `<=` constraints whose rows, like the
    /// objective function, have an entry for exactly every variable in the universe.
    #[must_use]
    pub fn is_canonical(&self) -> bool {
        let universe = self.variable_universe();
        let is_dense = |expression: &LinearExpression| {
            expression.len() == universe.len() && expression.variables().eq(universe.iter().map(String::as_str))
        };

        self.objective == Objective::Maximize
            && is_dense(&self.cost)
            && self.constraints.iter()
                .all(|constraint| constraint.sense == Sense::Less && is_dense(&constraint.lhs))
    }

    /// Comment lines from the start of the file.
    #[must_use]
    pub fn header(&self) -> &[String] {
        &self.header
    }
    /// Direction of the objective function.
    #[must_use]
    pub fn objective(&self) -> Objective {
        self.objective
    }
    /// Coefficients of the objective function.
    #[must_use]
    pub fn cost(&self) -> &LinearExpression {
        &self.cost
    }
    /// All constraints, in the order in which they were read.
    #[must_use]
    pub fn constraints(&self) -> &[Constraint] {
        &self.constraints
    }
    /// Bound lines, verbatim.
    #[must_use]
    pub fn bounds(&self) -> &[String] {
        &self.bounds
    }
    /// Integer variables.
    #[must_use]
    pub fn generals(&self) -> &[String] {
        &self.generals
    }
    /// Binary variables.
    #[must_use]
    pub fn binaries(&self) -> &[String] {
        &self.binaries
    }
    /// Get the number of constraints.
    #[must_use]
    pub fn nr_constraints(&self) -> usize {
        self.constraints.len()
    }
    /// Get the number of variables.
    #[must_use]
    pub fn nr_variables(&self) -> usize {
        self.variable_universe().len()
    }

    pub(super) fn set_objective(&mut self, objective: Objective) {
        self.objective = objective;
    }
    pub(super) fn cost_mut(&mut self) -> &mut LinearExpression {
        &mut self.cost
    }
    pub(super) fn constraints_mut(&mut self) -> &mut [Constraint] {
        &mut self.constraints
    }
}

/// Tokens of a bound line that name variables.
///
/// Numbers (including `inf` and `-infinity`), relational operators and the `free` keyword are
/// skipped.
fn bound_line_variables(line: &str) -> impl Iterator<Item = &str> {
    line.split_whitespace()
        .filter(|token| !BOUND_KEYWORDS.iter().any(|keyword| token.eq_ignore_ascii_case(keyword)))
        .filter(|token| token.parse::<f64>().is_err())
}

#[cfg(test)]
mod test {
    use crate::data::linear_program::constraint::Constraint;
    use crate::data::linear_program::elements::{Objective, Sense};
    use crate::data::linear_program::model::{bound_line_variables, Model};

    #[test]
    fn bound_tokens() {
        assert_eq!(bound_line_variables(" 0 <= x <= 4").collect::<Vec<_>>(), vec!["x"]);
        assert_eq!(bound_line_variables(" -infinity <= y <= 1e3").collect::<Vec<_>>(), vec!["y"]);
        assert_eq!(bound_line_variables(" z free").collect::<Vec<_>>(), vec!["z"]);
        assert_eq!(bound_line_variables(" w >= -inf").collect::<Vec<_>>(), vec!["w"]);
    }

    #[test]
    fn universe() {
        let model = Model::new(
            vec![],
            Objective::Minimize,
            [("y", 1.0)].into_iter().collect(),
            vec![Constraint::new("c", [("x", 1.0), ("y", 1.0)].into_iter().collect(), Sense::Less, 1.0)],
            vec![" 0 <= b <= 3".to_string()],
            vec!["g".to_string()],
            vec!["a".to_string(), "x".to_string()],
        );

        assert_eq!(model.variable_universe(), vec!["a", "b", "g", "x", "y"]);
        assert_eq!(model.nr_variables(), 5);
        assert_eq!(model.nr_constraints(), 1);
        assert!(!model.is_canonical());
    }

    #[test]
    fn empty_model() {
        let model = Model::default();
        assert!(model.variable_universe().is_empty());
        assert_eq!(model.objective(), Objective::Minimize);
    }
}
