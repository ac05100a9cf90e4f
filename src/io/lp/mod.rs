//! # Reading and writing LP files
//!
//! Reading of `.lp` files, in the CPLEX LP format. Only the linear part of the format is read.
//!
//! The file is read line by line. A line that starts with a section keyword switches to that
//! section; other lines are read according to the section they're in. Lines that can't be read
//! are skipped and reported, so reading always produces a model.
use std::fmt;
use std::str::FromStr;

use tracing::{debug, warn};

use crate::data::linear_program::elements::Objective;
use crate::data::linear_program::expression::LinearExpression;
use crate::data::linear_program::model::Model;
use crate::io::error::{Parse, ParseResult};
use crate::io::lp::constraint::{parse_named_constraint_with_diagnostics, Malformed};
use crate::io::lp::expression::{is_identifier, parse_expression_with_diagnostics, TermDiagnostic};
use crate::io::lp::token::{
    BINARIES, BINARIES_HEADER, BOUNDS, BOUNDS_HEADER, COMMENT_INDICATOR, END, END_HEADER, GENERALS,
    GENERALS_HEADER, MAXIMIZE, MINIMIZE, NAME_SEPARATOR, SUBJECT_TO, SUBJECT_TO_HEADER,
};

pub mod constraint;
pub mod expression;
pub mod number;
pub mod write;
mod token;

/// LP files are divided into sections, each announced by a keyword.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
enum Section {
    Objective(Objective),
    Constraints,
    Bounds,
    Generals,
    Binaries,
    End,
}

impl FromStr for Section {
    type Err = ();

    /// Read the section that a (trimmed) line announces.
    ///
    /// The keyword has to be at the start of the line, followed by the end of the line or by a
    /// character that can't be part of a name. That way, a constraint called `endurance` doesn't
    /// end the model. A keyword followed by the name separator is a constraint name, like in
    /// `end: x <= 3`.
    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let candidates: [(&[&str], Section); 7] = [
            (&MAXIMIZE, Section::Objective(Objective::Maximize)),
            (&MINIMIZE, Section::Objective(Objective::Minimize)),
            (&SUBJECT_TO, Section::Constraints),
            (&BOUNDS, Section::Bounds),
            (&GENERALS, Section::Generals),
            (&BINARIES, Section::Binaries),
            (&[END], Section::End),
        ];

        candidates.into_iter()
            .find(|(keywords, _)| keywords.iter().any(|keyword| starts_with_keyword(line, keyword)))
            .map(|(_, section)| section)
            .ok_or(())
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Section::Objective(objective) => objective.keyword(),
            Section::Constraints => SUBJECT_TO_HEADER,
            Section::Bounds => BOUNDS_HEADER,
            Section::Generals => GENERALS_HEADER,
            Section::Binaries => BINARIES_HEADER,
            Section::End => END_HEADER,
        })
    }
}

fn starts_with_keyword(line: &str, keyword: &str) -> bool {
    let is_prefix = line.len() >= keyword.len()
        && line.is_char_boundary(keyword.len())
        && line[..keyword.len()].eq_ignore_ascii_case(keyword);

    if !is_prefix {
        return false;
    }

    let rest = &line[keyword.len()..];
    !rest.starts_with(|c: char| c.is_ascii_alphanumeric() || c == '_')
        && !rest.trim_start().starts_with(NAME_SEPARATOR)
}

/// Why a line was skipped, entirely or in part.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Reason {
    /// The line is not a comment and comes before the first section.
    OutsideSection,
    /// A constraint line that couldn't be read.
    Constraint(Malformed),
    /// A term in the objective function or in a constraint that couldn't be read.
    Term(TermDiagnostic),
}

impl fmt::Display for Reason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reason::OutsideSection => f.write_str("line is not part of any section"),
            Reason::Constraint(malformed) => malformed.fmt(f),
            Reason::Term(diagnostic) => diagnostic.fmt(f),
        }
    }
}

/// A line of the file that was (partially) skipped.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct LineDiagnostic {
    /// Counting from 1.
    pub line_number: usize,
    /// The line, without the line ending.
    pub line: String,
    /// What was skipped, and why.
    pub reason: Reason,
}

impl fmt::Display for LineDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}: {} ({})", self.line_number, self.reason, self.line.trim())
    }
}

/// Result of reading an LP file.
#[derive(Clone, Debug, PartialEq)]
pub struct Parsed {
    /// Everything that could be read.
    pub model: Model,
    /// One entry per skipped line or term, in the order of the file.
    pub diagnostics: Vec<LineDiagnostic>,
}

impl Parsed {
    /// The model, if nothing was skipped.
    ///
    /// # Errors
    ///
    /// A `Parse` error pointing at the first line with a problem.
    pub fn strict(self) -> ParseResult<Model> {
        match self.diagnostics.first() {
            None => Ok(self.model),
            Some(diagnostic) => Err(Parse::with_location(
                format!("{} (and {} more problems)", diagnostic.reason, self.diagnostics.len() - 1),
                (diagnostic.line_number, diagnostic.line.as_str()),
            )),
        }
    }
}

/// Read an LP model.
///
/// # Arguments
///
/// * `program`: The input in LP format.
///
/// # Return value
///
/// The model with everything that could be read, along with a diagnostic for each line or term
/// that was skipped.
#[must_use]
pub fn parse(program: &str) -> Parsed {
    let mut header = Vec::new();
    let mut objective = None;
    let mut cost = LinearExpression::new();
    let mut constraints = Vec::new();
    let mut bounds = Vec::new();
    let mut generals = Vec::new();
    let mut binaries = Vec::new();
    let mut diagnostics = Vec::new();

    let mut section = None;
    for (index, line) in program.lines().enumerate() {
        let line_number = index + 1;
        let trimmed = line.trim();

        if trimmed.starts_with(COMMENT_INDICATOR) {
            header.push(line.to_string());
            continue;
        }
        if let Ok(new_section) = Section::from_str(trimmed) {
            debug!(line_number, section = %new_section, "entering section");
            if let Section::Objective(direction) = new_section {
                objective = Some(direction);
            }
            section = Some(new_section);
            continue;
        }
        if trimmed.is_empty() {
            continue;
        }

        let mut diagnose = |reason: Reason| {
            diagnostics.push(LineDiagnostic { line_number, line: line.to_string(), reason });
        };

        match section {
            None => {
                warn!(line_number, line = trimmed, "skipping line outside of any section");
                diagnose(Reason::OutsideSection);
            },
            Some(Section::Objective(_)) => {
                let (expression, skipped) = parse_expression_with_diagnostics(without_label(trimmed));
                cost += &expression;
                skipped.into_iter().map(Reason::Term).for_each(diagnose);
            },
            Some(Section::Constraints) => match parse_named_constraint_with_diagnostics(trimmed) {
                Ok((constraint, skipped)) => {
                    constraints.push(constraint);
                    skipped.into_iter().map(Reason::Term).for_each(diagnose);
                },
                Err(malformed) => {
                    warn!(line_number, line = trimmed, %malformed, "skipping constraint");
                    diagnose(Reason::Constraint(malformed));
                },
            },
            Some(Section::Bounds) => bounds.push(line.trim_end().to_string()),
            Some(Section::Generals) => generals.extend(trimmed.split_whitespace().map(str::to_string)),
            Some(Section::Binaries) => binaries.extend(trimmed.split_whitespace().map(str::to_string)),
            Some(Section::End) => {},
        }
    }

    if objective.is_none() {
        debug!("no objective direction given, assuming minimization");
    }
    let model = Model::new(
        header,
        objective.unwrap_or_default(),
        cost,
        constraints,
        bounds,
        generals,
        binaries,
    );

    Parsed { model, diagnostics }
}

/// Drop the `name:` label in front of an objective function.
fn without_label(line: &str) -> &str {
    match line.split_once(NAME_SEPARATOR) {
        Some((label, rest)) if is_identifier(label) => rest,
        _ => line,
    }
}
