//! # Constraints
//!
//! A constraint relates a linear expression to a constant. Constraints of the same sense can be
//! summed into a new constraint.
use std::fmt;

use itertools::Itertools;

use crate::data::linear_program::elements::Sense;
use crate::data::linear_program::expression::LinearExpression;
use crate::io::lp::number::{format_number, snap_to_integer};

/// Separates the names of summed constraints in the name of the sum.
const COMBINED_NAME_SEPARATOR: &str = "_plus_";

/// A (named) constraint `lhs sense rhs`.
///
/// All constants are on the right-hand side.
#[derive(Clone, Debug, PartialEq)]
pub struct Constraint {
    /// Label of the constraint, empty when the constraint has none.
    pub name: String,
    /// Left-hand side.
    pub lhs: LinearExpression,
    /// Relation between the left- and right-hand side.
    pub sense: Sense,
    /// Right-hand side.
    pub rhs: f64,
}

impl Constraint {
    /// Create a new constraint.
    #[must_use]
    pub fn new(name: impl Into<String>, lhs: LinearExpression, sense: Sense, rhs: f64) -> Self {
        Self { name: name.into(), lhs, sense, rhs }
    }

    /// Sum constraints that all have the same sense.
    ///
    /// Each constraint is taken with multiplier one. The result is not necessarily implied by the
    /// inputs when those are not compatible (e.g. differently scaled variables); it is only their
    /// sum.
    ///
    /// # Return value
    ///
    /// `None` if there are no constraints or if the senses differ. Otherwise, a constraint with the
    /// common sense. It is named after the inputs if they all have a name.
    #[must_use]
    pub fn combine<'a>(constraints: impl IntoIterator<Item = &'a Constraint>) -> Option<Self> {
        let constraints = constraints.into_iter().collect::<Vec<_>>();
        let sense = constraints.iter().map(|constraint| constraint.sense).all_equal_value().ok()?;

        let mut lhs = LinearExpression::new();
        let mut rhs = 0.0;
        for constraint in &constraints {
            lhs += &constraint.lhs;
            rhs += constraint.rhs;
        }

        let name = if constraints.iter().all(|constraint| !constraint.name.is_empty()) {
            constraints.iter().map(|constraint| constraint.name.as_str()).join(COMBINED_NAME_SEPARATOR)
        } else {
            String::new()
        };

        Some(Self { name, lhs, sense, rhs })
    }

    /// Multiply both sides with a constant.
    ///
    /// A negative factor reverses the inequality.
    #[must_use]
    pub fn scaled(&self, factor: f64) -> Self {
        let mut lhs = self.lhs.clone();
        lhs.scale(factor);
        let sense = if factor < 0.0 { !self.sense } else { self.sense };

        Self { name: self.name.clone(), lhs, sense, rhs: self.rhs * factor }
    }

    /// Write the constraint without its name.
    ///
    /// The right-hand side is snapped to an integer when it is close to one.
    #[must_use]
    pub fn to_unnamed_string(&self) -> String {
        format!("{} {} {}", self.lhs, self.sense, format_number(snap_to_integer(self.rhs)))
    }
}

impl fmt::Display for Constraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.name.is_empty() {
            write!(f, "{}: ", self.name)?;
        }
        f.write_str(&self.to_unnamed_string())
    }
}
