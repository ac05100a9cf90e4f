//! # Writing LP files
//!
//! Models are written section by section. The objective function and the constraints list their
//! terms in the order of the variable universe, with every coefficient written out, so the same
//! model always gives the same text.
use std::fmt;

use crate::data::linear_program::expression::LinearExpression;
use crate::data::linear_program::model::Model;
use crate::io::lp::number::format_number;
use crate::io::lp::token::{
    BINARIES_HEADER, BOUNDS_HEADER, DEFAULT_HEADER, END_HEADER, FORMAT_MARKER, GENERALS_HEADER,
    SUBJECT_TO_HEADER,
};

/// How to write a model.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WriteOptions {
    /// Add a comment line saying that the file is in LP format, unless the header of the model
    /// already mentions it.
    pub default_header: bool,
}

impl Default for WriteOptions {
    fn default() -> Self {
        Self { default_header: true }
    }
}

impl WriteOptions {
    /// Create options with all defaults.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable the default header line.
    #[must_use]
    pub fn with_default_header(mut self, enabled: bool) -> Self {
        self.default_header = enabled;
        self
    }
}

/// Write a model in LP format.
///
/// Sections without content are left out, except for the objective function. Lines end with a
/// line feed, including the last one.
#[must_use]
pub fn write(model: &Model, options: &WriteOptions) -> String {
    let variables = model.variable_universe();
    let mut lines = Vec::new();

    lines.extend(model.header().iter().cloned());
    if options.default_header && !model.header().iter().any(|line| line.contains(FORMAT_MARKER)) {
        lines.push(DEFAULT_HEADER.to_string());
    }

    lines.push(model.objective().keyword().to_string());
    lines.push(format!("  {}", write_terms(model.cost(), &variables)));

    if !model.constraints().is_empty() {
        lines.push(SUBJECT_TO_HEADER.to_string());
        for constraint in model.constraints() {
            lines.push(format!(
                " {}: {} {} {}",
                constraint.name,
                write_terms(&constraint.lhs, &variables),
                constraint.sense,
                format_number(constraint.rhs),
            ));
        }
    }

    if !model.bounds().is_empty() {
        lines.push(BOUNDS_HEADER.to_string());
        lines.extend(model.bounds().iter().cloned());
    }
    if !model.binaries().is_empty() {
        lines.push(BINARIES_HEADER.to_string());
        lines.push(format!(" {}", model.binaries().join(" ")));
    }
    if !model.generals().is_empty() {
        lines.push(GENERALS_HEADER.to_string());
        lines.push(format!(" {}", model.generals().join(" ")));
    }

    lines.push(END_HEADER.to_string());

    let mut text = lines.join("\n");
    text.push('\n');
    text
}

/// Terms as `2 x - 3 y + 0 z`.
///
/// Only the sign of the first term is written if it is negative. Zero coefficients are written
/// too.
fn write_terms(expression: &LinearExpression, variables: &[String]) -> String {
    let mut text = String::new();

    let present = variables.iter()
        .filter_map(|variable| expression.coefficient(variable).map(|coefficient| (variable, coefficient)));
    for (index, (variable, coefficient)) in present.enumerate() {
        let sign = match (index, coefficient < 0.0) {
            (0, false) => "",
            (0, true) => "- ",
            (_, false) => " + ",
            (_, true) => " - ",
        };
        text.push_str(&format!("{}{} {}", sign, format_number(coefficient.abs()), variable));
    }

    text
}

impl fmt::Display for Model {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&write(self, &WriteOptions::default()))
    }
}

#[cfg(test)]
mod test {
    use crate::data::linear_program::constraint::Constraint;
    use crate::data::linear_program::elements::{Objective, Sense};
    use crate::data::linear_program::model::Model;
    use crate::io::lp::parse;
    use crate::io::lp::write::{write, WriteOptions};

    fn model(header: Vec<String>) -> Model {
        Model::new(
            header,
            Objective::Maximize,
            [("y", 2.0), ("x", -1.0), ("z", 0.0)].into_iter().collect(),
            vec![Constraint::new("c1", [("x", 1.0), ("y", -1.5)].into_iter().collect(), Sense::Less, 4.0)],
            vec![" 0 <= x <= 3".to_string()],
            vec!["z".to_string()],
            vec!["b1".to_string(), "b2".to_string()],
        )
    }

    #[test]
    fn all_sections() {
        let text = write(&model(vec![]), &WriteOptions::default());

        assert_eq!(text, "\
\\ LP format - for model browsing. Use MPS format to capture full model detail.
Maximize
  - 1 x + 2 y + 0 z
Subject To
 c1: 1 x - 1.5 y <= 4
Bounds
 0 <= x <= 3
Binaries
 b1 b2
Generals
 z
End
");
    }

    #[test]
    fn default_header() {
        let existing = vec!["\\ LP format - written elsewhere".to_string()];
        let text = write(&model(existing), &WriteOptions::default());
        assert!(text.starts_with("\\ LP format - written elsewhere\nMaximize\n"));

        let text = write(&model(vec![]), &WriteOptions::new().with_default_header(false));
        assert!(text.starts_with("Maximize\n"));
    }

    #[test]
    fn empty_model() {
        let text = write(&Model::default(), &WriteOptions::new().with_default_header(false));
        assert_eq!(text, "Minimize\n  \nEnd\n");
    }

    #[test]
    fn reads_back() {
        let original = model(vec!["\\ LP format".to_string()]);
        let text = original.to_string();

        let parsed = parse(&text);
        assert!(parsed.diagnostics.is_empty());
        assert_eq!(parsed.model, original);
    }
}
