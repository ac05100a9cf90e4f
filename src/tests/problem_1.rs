//! Small production planning problem, maximization with one `>=` constraint.
use crate::data::linear_program::constraint::Constraint;
use crate::data::linear_program::dense::DenseModel;
use crate::data::linear_program::elements::{Objective, Sense};
use crate::data::linear_program::model::Model;
use crate::io::lp::parse;
use crate::io::lp::write::{write, WriteOptions};

#[test]
fn conversion_pipeline() {
    // Model
    let parsed = parse(LP_LITERAL_STRING);
    assert!(parsed.diagnostics.is_empty());
    let mut model = parsed.model;
    assert_eq!(model, model_form());

    // Reading what was written gives the same model
    let text = write(&model, &WriteOptions::new().with_default_header(false));
    assert_eq!(parse(&text).model, model_form());

    // Canonical form
    let report = model.canonicalize();
    assert_eq!(model, canonical_form());
    assert!(model.is_canonical());
    assert!(!report.negated_objective);
    assert_eq!(report.flipped, vec!["c3"]);
    assert!(!report.is_lossy());

    // Canonical text
    let text = write(&model, &WriteOptions::default());
    assert_eq!(text, canonical_text());

    // Dense form
    assert_eq!(DenseModel::from(&model), dense_form());
}

#[test]
fn canonicalization_is_stable() {
    let mut model = parse(canonical_text()).model;
    let report = model.canonicalize();

    assert!(report.is_unchanged());
    assert_eq!(write(&model, &WriteOptions::default()), canonical_text());
}

const LP_LITERAL_STRING: &str = "\\ Problem name: production
Maximize
 obj: 3 x + 2 y
Subject To
 c1: x + y <= 4
 c2: x + 3 y <= 6
 c3: x >= 1
End
";

fn constraint(name: &str, terms: &[(&str, f64)], sense: Sense, rhs: f64) -> Constraint {
    Constraint::new(name, terms.iter().copied().collect(), sense, rhs)
}

fn model_form() -> Model {
    Model::new(
        vec!["\\ Problem name: production".to_string()],
        Objective::Maximize,
        [("x", 3.0), ("y", 2.0)].into_iter().collect(),
        vec![
            constraint("c1", &[("x", 1.0), ("y", 1.0)], Sense::Less, 4.0),
            constraint("c2", &[("x", 1.0), ("y", 3.0)], Sense::Less, 6.0),
            constraint("c3", &[("x", 1.0)], Sense::Greater, 1.0),
        ],
        vec![],
        vec![],
        vec![],
    )
}

fn canonical_form() -> Model {
    Model::new(
        vec!["\\ Problem name: production".to_string()],
        Objective::Maximize,
        [("x", 3.0), ("y", 2.0)].into_iter().collect(),
        vec![
            constraint("c1", &[("x", 1.0), ("y", 1.0)], Sense::Less, 4.0),
            constraint("c2", &[("x", 1.0), ("y", 3.0)], Sense::Less, 6.0),
            constraint("c3", &[("x", -1.0), ("y", 0.0)], Sense::Less, -1.0),
        ],
        vec![],
        vec![],
        vec![],
    )
}

fn canonical_text() -> &'static str {
    "\\ Problem name: production
\\ LP format - for model browsing. Use MPS format to capture full model detail.
Maximize
  3 x + 2 y
Subject To
 c1: 1 x + 1 y <= 4
 c2: 1 x + 3 y <= 6
 c3: - 1 x + 0 y <= -1
End
"
}

fn dense_form() -> DenseModel {
    DenseModel {
        variables: vec!["x".to_string(), "y".to_string()],
        objective_coeffs: vec![3.0, 2.0],
        a: vec![vec![1.0, 1.0], vec![1.0, 3.0], vec![-1.0, 0.0]],
        b: vec![4.0, 6.0, -1.0],
        senses: vec![Sense::Less; 3],
        constraints_readable: vec![
            "x + y <= 4".to_string(),
            "x + 3*y <= 6".to_string(),
            "- x <= -1".to_string(),
        ],
    }
}
