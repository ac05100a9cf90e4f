//! # Reading constraints
//!
//! A constraint line looks like `[name:] <expression> <operator> <right-hand side>`. The first
//! operator that is found, trying `<=`, `>=`, `==` and `=` in that order, splits the line.
use std::fmt;

use crate::data::linear_program::constraint::Constraint;
use crate::data::linear_program::elements::Sense;
use crate::io::lp::expression::{parse_expression_with_diagnostics, TermDiagnostic};
use crate::io::lp::token::NAME_SEPARATOR;

/// Why a constraint line could not be read.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Malformed {
    /// No `name:` in front of the constraint, while one is required.
    MissingName,
    /// None of the relational operators appears.
    MissingOperator,
    /// The right-hand side is not a number.
    RightHandSide,
}

impl fmt::Display for Malformed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Malformed::MissingName => "constraint has no name",
            Malformed::MissingOperator => "no relational operator",
            Malformed::RightHandSide => "right-hand side is not a number",
        })
    }
}

/// Read a constraint that may or may not have a name.
///
/// Without a name, the constraint's name is empty.
///
/// # Return value
///
/// `None` if there is no operator or if the right-hand side is not a number.
#[must_use]
pub fn parse_constraint(line: &str) -> Option<Constraint> {
    read(line, false).ok().map(|(constraint, _)| constraint)
}

/// Read a constraint as it appears in the constraint section of an LP file, with a name.
///
/// The name may be empty, but the separating `:` has to be there.
///
/// # Return value
///
/// `None` if there is no name, no operator or if the right-hand side is not a number.
#[must_use]
pub fn parse_named_constraint(line: &str) -> Option<Constraint> {
    read(line, true).ok().map(|(constraint, _)| constraint)
}

/// Read a named constraint, reporting what went wrong if it can't be read.
///
/// Terms of the left-hand side that were skipped are returned alongside the constraint.
///
/// # Errors
///
/// When the name, operator or right-hand side is missing or malformed.
pub fn parse_named_constraint_with_diagnostics(
    line: &str,
) -> Result<(Constraint, Vec<TermDiagnostic>), Malformed> {
    read(line, true)
}

/// Sum constraints given as text, and write the sum without a name.
///
/// The right-hand side of the result is snapped to an integer when it is very close to one.
///
/// # Return value
///
/// `None` if any line can't be read, if the senses differ or if no lines are given.
///
/// # Examples
///
/// ```
/// use lincanon::io::lp::constraint::combine_texts;
///
/// assert_eq!(combine_texts(&["x + 2y <= 5", "3x <= 2"]), Some("4*x + 2*y <= 7".to_string()));
/// assert_eq!(combine_texts(&["x <= 5", "x >= 2"]), None);
/// ```
#[must_use]
pub fn combine_texts(lines: &[&str]) -> Option<String> {
    let constraints = lines.iter()
        .map(|line| parse_constraint(line))
        .collect::<Option<Vec<_>>>()?;

    Constraint::combine(&constraints).map(|combined| combined.to_unnamed_string())
}

fn read(line: &str, name_required: bool) -> Result<(Constraint, Vec<TermDiagnostic>), Malformed> {
    let (name, rest) = match line.split_once(NAME_SEPARATOR) {
        Some((name, rest)) => (name.trim(), rest),
        None if name_required => return Err(Malformed::MissingName),
        None => ("", line),
    };

    let (expression, sense, rhs) = Sense::OPERATORS.iter()
        .find_map(|&(operator, sense)| {
            rest.split_once(operator).map(|(expression, rhs)| (expression, sense, rhs))
        })
        .ok_or(Malformed::MissingOperator)?;
    let rhs = rhs.trim().parse::<f64>().map_err(|_| Malformed::RightHandSide)?;

    let (lhs, diagnostics) = parse_expression_with_diagnostics(expression);

    Ok((Constraint::new(name, lhs, sense, rhs), diagnostics))
}
