//! # Linear expressions
//!
//! A linear expression maps variable names to coefficients. Terms are kept in the order in which
//! their variables were first seen, which is the order used when an expression is written without
//! an explicit column order.
use std::fmt;
use std::ops::{AddAssign, Neg};

use itertools::Itertools;
use num_traits::Zero;

use crate::io::lp::number::{format_number, snap_to_integer};

/// A variable name with its coefficient.
pub type Term = (String, f64);

/// Sum of terms, each variable appearing at most once.
///
/// Equality ignores both the order of the terms and terms with a zero coefficient.
#[derive(Clone, Debug, Default)]
pub struct LinearExpression {
    terms: Vec<Term>,
}

impl LinearExpression {
    /// Create an expression without any terms.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a coefficient to a variable.
    ///
    /// If the variable is already present, the coefficients are summed.
    pub fn add_term(&mut self, variable: &str, coefficient: f64) {
        match self.position(variable) {
            Some(index) => self.terms[index].1 += coefficient,
            None => self.terms.push((variable.to_string(), coefficient)),
        }
    }

    /// Set the coefficient of a variable, replacing any previous value.
    pub fn set_coefficient(&mut self, variable: &str, coefficient: f64) {
        match self.position(variable) {
            Some(index) => self.terms[index].1 = coefficient,
            None => self.terms.push((variable.to_string(), coefficient)),
        }
    }

    /// Coefficient of a variable, if the variable has an entry (possibly zero).
    #[must_use]
    pub fn coefficient(&self, variable: &str) -> Option<f64> {
        self.position(variable).map(|index| self.terms[index].1)
    }

    /// Whether the variable has an entry, zero or not.
    #[must_use]
    pub fn contains(&self, variable: &str) -> bool {
        self.position(variable).is_some()
    }

    /// Number of entries, including zero entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    /// Whether there are no entries at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// All entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> + '_ {
        self.terms.iter().map(|(variable, coefficient)| (variable.as_str(), *coefficient))
    }

    /// Names of all variables with an entry, in insertion order.
    pub fn variables(&self) -> impl Iterator<Item = &str> + '_ {
        self.terms.iter().map(|(variable, _)| variable.as_str())
    }

    /// Multiply every coefficient with a constant.
    pub fn scale(&mut self, factor: f64) {
        for (_, coefficient) in &mut self.terms {
            *coefficient *= factor;
        }
    }

    /// Copy with an entry for exactly the given columns, in that order.
    ///
    /// Columns without an entry in this expression get coefficient zero. Entries for variables
    /// that are not among the columns are dropped.
    #[must_use]
    pub fn densified(&self, columns: &[String]) -> Self {
        let terms = columns.iter()
            .map(|column| (column.clone(), self.coefficient(column).unwrap_or(0.0)))
            .collect();

        Self { terms }
    }

    /// Write the entries of the given columns, in the order of the columns.
    ///
    /// Columns without an entry are skipped. See the `Display` implementation for the format.
    #[must_use]
    pub fn to_string_ordered<'a>(&self, columns: impl IntoIterator<Item = &'a str>) -> String {
        render_terms(columns.into_iter()
            .filter_map(|column| self.coefficient(column).map(|coefficient| (column, coefficient))))
    }

    fn position(&self, variable: &str) -> Option<usize> {
        self.terms.iter().position(|(name, _)| name == variable)
    }
}

/// Render terms as `a*x + b*y`.
///
/// Coefficients are snapped to integers first, zero terms are left out, unit coefficients are not
/// written and `+ -` is shortened to `- `. Without any nonzero terms the result is `0`.
fn render_terms<'a>(terms: impl Iterator<Item = (&'a str, f64)>) -> String {
    let rendered = terms
        .filter_map(|(variable, coefficient)| {
            let coefficient = snap_to_integer(coefficient);
            if coefficient.is_zero() {
                None
            } else if coefficient == 1.0 {
                Some(variable.to_string())
            } else if coefficient == -1.0 {
                Some(format!("-{}", variable))
            } else {
                Some(format!("{}*{}", format_number(coefficient), variable))
            }
        })
        .join(" + ");

    if rendered.is_empty() {
        "0".to_string()
    } else {
        rendered.replace("+ -", "- ")
    }
}

impl fmt::Display for LinearExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&render_terms(self.iter()))
    }
}

impl PartialEq for LinearExpression {
    fn eq(&self, other: &Self) -> bool {
        let nonzero_here = self.iter().filter(|(_, coefficient)| !coefficient.is_zero()).count();
        let nonzero_there = other.iter().filter(|(_, coefficient)| !coefficient.is_zero()).count();

        nonzero_here == nonzero_there && self.iter()
            .filter(|(_, coefficient)| !coefficient.is_zero())
            .all(|(variable, coefficient)| other.coefficient(variable) == Some(coefficient))
    }
}

impl<S: AsRef<str>> FromIterator<(S, f64)> for LinearExpression {
    fn from_iter<I: IntoIterator<Item = (S, f64)>>(iter: I) -> Self {
        let mut expression = Self::new();
        for (variable, coefficient) in iter {
            expression.add_term(variable.as_ref(), coefficient);
        }

        expression
    }
}

impl AddAssign<&LinearExpression> for LinearExpression {
    fn add_assign(&mut self, rhs: &LinearExpression) {
        for (variable, coefficient) in rhs.iter() {
            self.add_term(variable, coefficient);
        }
    }
}

impl Neg for LinearExpression {
    type Output = Self;

    fn neg(mut self) -> Self::Output {
        self.scale(-1.0);
        self
    }
}
