//! # Dense matrix view of a model
//!
//! The objective vector `c`, the constraint matrix `A` and the right-hand side `b`, all aligned to
//! the sorted variable universe, together with one human-readable string per constraint.
use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::data::linear_program::elements::Sense;
use crate::data::linear_program::expression::LinearExpression;
use crate::data::linear_program::model::Model;
use crate::io::lp::number::{format_general, READABLE_ZERO_TOLERANCE};

/// Positional variable references look like this prefix followed by a 1-based index.
const INDEXED_VARIABLE_PREFIX: char = 'x';

/// A model as vectors and a matrix.
///
/// Serializes to a record with the fields `variables`, `objective_coeffs`, `A`, `b`, `senses` and
/// `constraints_readable`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DenseModel {
    /// Column names, sorted.
    pub variables: Vec<String>,
    /// Objective function coefficient of each column.
    pub objective_coeffs: Vec<f64>,
    /// One dense row per constraint.
    #[serde(rename = "A")]
    pub a: Vec<Vec<f64>>,
    /// Right-hand side of each constraint.
    pub b: Vec<f64>,
    /// Sense of each constraint. All `<=` for a canonical model.
    pub senses: Vec<Sense>,
    /// Each constraint as text, e.g. `x - 2*y <= 4`.
    pub constraints_readable: Vec<String>,
}

impl From<&Model> for DenseModel {
    fn from(model: &Model) -> Self {
        let variables = model.variable_universe();
        let dense_row = |expression: &LinearExpression| {
            variables.iter()
                .map(|variable| expression.coefficient(variable).unwrap_or(0.0))
                .collect::<Vec<_>>()
        };

        let objective_coeffs = dense_row(model.cost());
        let a = model.constraints().iter()
            .map(|constraint| dense_row(&constraint.lhs))
            .collect::<Vec<_>>();
        let b = model.constraints().iter().map(|constraint| constraint.rhs).collect::<Vec<_>>();
        let senses = model.constraints().iter().map(|constraint| constraint.sense).collect::<Vec<_>>();
        let constraints_readable = a.iter().zip(&senses).zip(&b)
            .map(|((row, &sense), &rhs)| readable_constraint(&variables, row, sense, rhs))
            .collect();

        Self { variables, objective_coeffs, a, b, senses, constraints_readable }
    }
}

impl DenseModel {
    /// Get the number of variables.
    #[must_use]
    pub fn nr_variables(&self) -> usize {
        self.variables.len()
    }

    /// Get the number of constraints.
    #[must_use]
    pub fn nr_constraints(&self) -> usize {
        self.a.len()
    }

    /// Replace positional references `x1`, `x2`, ... by the name of that column.
    ///
    /// Indices start at 1. A reference only counts when the `x` does not continue a longer
    /// identifier. References to columns that don't exist are kept as they are.
    #[must_use]
    pub fn substitute_indexed(&self, text: &str) -> String {
        let mut result = String::with_capacity(text.len());
        let mut rest = text;
        let mut previous: Option<char> = None;

        while let Some(position) = rest.find(INDEXED_VARIABLE_PREFIX) {
            let (before, from_prefix) = rest.split_at(position);
            result.push_str(before);
            let previous_character = before.chars().next_back().or(previous);

            let after_prefix = &from_prefix[INDEXED_VARIABLE_PREFIX.len_utf8()..];
            let digits_length = after_prefix.find(|c: char| !c.is_ascii_digit()).unwrap_or(after_prefix.len());
            let starts_identifier = !previous_character.is_some_and(is_identifier_character);

            let replacement = if starts_identifier && digits_length > 0 {
                after_prefix[..digits_length].parse::<usize>().ok()
                    .and_then(|index| index.checked_sub(1))
                    .and_then(|index| self.variables.get(index))
            } else { None };

            match replacement {
                Some(name) => {
                    result.push_str(name);
                    previous = after_prefix[..digits_length].chars().next_back();
                    rest = &after_prefix[digits_length..];
                },
                None => {
                    result.push(INDEXED_VARIABLE_PREFIX);
                    rest = after_prefix;
                    previous = Some(INDEXED_VARIABLE_PREFIX);
                },
            }
        }
        result.push_str(rest);

        result
    }

    /// Write as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Only if a value can't be represented in JSON.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

fn is_identifier_character(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// Write a dense row as a constraint.
///
/// Entries with a magnitude below `READABLE_ZERO_TOLERANCE` are left out and a coefficient of
/// magnitude one is written without the number. Coefficients and the right-hand side use six
/// significant digits; a right-hand side that is almost zero is written as `0`.
#[must_use]
pub fn readable_constraint(variables: &[String], row: &[f64], sense: Sense, rhs: f64) -> String {
    let terms = variables.iter().zip(row)
        .filter(|&(_, &coefficient)| coefficient.abs() > READABLE_ZERO_TOLERANCE)
        .enumerate()
        .map(|(index, (variable, &coefficient))| {
            let sign = match (index, coefficient < 0.0) {
                (0, false) => "",
                (0, true) => "- ",
                (_, false) => "+ ",
                (_, true) => "- ",
            };
            if coefficient.abs() == 1.0 {
                format!("{}{}", sign, variable)
            } else {
                format!("{}{}*{}", sign, format_general(coefficient.abs()), variable)
            }
        })
        .join(" ");

    let lhs = if terms.is_empty() { "0".to_string() } else { terms };
    let rhs = if rhs.abs() < READABLE_ZERO_TOLERANCE { 0.0 } else { rhs };

    format!("{} {} {}", lhs, sense, format_general(rhs))
}
