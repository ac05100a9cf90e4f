use std::path::Path;

use lincanon::data::linear_program::constraint::Constraint;
use lincanon::data::linear_program::dense::DenseModel;
use lincanon::data::linear_program::elements::{Objective, Sense};
use lincanon::data::linear_program::expression::LinearExpression;
use lincanon::data::linear_program::model::Model;
use lincanon::io::error::Import;
use lincanon::io::{import, import_strict};
use lincanon::io::lp::constraint::Malformed;
use lincanon::io::lp::write::{write, WriteOptions};
use lincanon::io::lp::{parse, Parsed, Reason};

use super::get_test_file_path;

fn read(file_name: &str) -> Parsed {
    import(&get_test_file_path(file_name)).unwrap()
}

fn assert_reads_back(model: &Model) {
    let text = write(model, &WriteOptions::new().with_default_header(false));
    let parsed = parse(&text);

    assert!(parsed.diagnostics.is_empty());
    assert_eq!(&parsed.model, model);
}

#[test]
fn knapsack() {
    let parsed = read("knapsack");
    assert!(parsed.diagnostics.is_empty());
    let mut model = parsed.strict().unwrap();
    assert_reads_back(&model);

    assert_eq!(model.variable_universe(), vec!["item_1", "item_2", "item_3"]);
    assert_eq!(model.binaries(), ["item_1", "item_2", "item_3"]);

    let report = model.canonicalize();
    assert!(report.is_unchanged());
    assert!(model.is_canonical());

    let text = model.to_string();
    assert!(text.starts_with("\\ Knapsack problem\n\\ LP format"));
    assert!(text.contains("\n  10 item_1 + 13 item_2 + 7 item_3\n"));
    assert!(text.contains("\n pair: 1 item_1 + 1 item_2 + 0 item_3 <= 1\n"));
    assert!(text.ends_with("Binaries\n item_1 item_2 item_3\nEnd\n"));

    let dense = DenseModel::from(&model);
    assert_eq!(dense.b, vec![10.0, 1.0]);
    assert_eq!(dense.a[0], vec![4.0, 6.0, 3.0]);
}

#[test]
fn diet() {
    let mut model = read("diet").strict().unwrap();
    assert_reads_back(&model);
    assert_eq!(model.objective(), Objective::Minimize);

    let report = model.canonicalize();
    assert!(report.negated_objective);
    assert_eq!(report.flipped, vec!["calories", "protein"]);
    assert_eq!(report.relaxed_equalities, vec!["servings"]);
    assert_eq!(report.variables, vec!["bread", "meat", "milk"]);

    let dense = DenseModel::from(&model);
    assert_eq!(dense.objective_coeffs, vec![-0.6, -2.5, -1.2]);
    assert_eq!(dense.b, vec![-2000.0, -55.0, 8.0]);
    assert_eq!(dense.senses, vec![Sense::Less; 3]);
    assert_eq!(dense.constraints_readable, vec![
        "- 300*bread - 250*meat - 150*milk <= -2000",
        "- 4*bread - 26*meat - 8*milk <= -55",
        "bread + meat + milk <= 8",
    ]);

    assert_eq!(model.bounds(), [" 0 <= milk <= 4"]);
}

#[test]
fn messy() {
    let parsed = read("messy");

    let problems = parsed.diagnostics.iter()
        .map(|diagnostic| (diagnostic.line_number, diagnostic.reason.clone()))
        .collect::<Vec<_>>();
    assert_eq!(problems.len(), 2);
    assert_eq!(problems[0], (7, Reason::Constraint(Malformed::MissingName)));
    assert!(matches!(&problems[1], (8, Reason::Term(skipped)) if skipped.term == "4"));

    let model = parsed.model;
    assert_eq!(model.objective(), Objective::Maximize);
    assert_eq!(model.cost(), &[("x", 2.0), ("y", 3.0), ("z", -1.0)].into_iter().collect::<LinearExpression>());
    assert_eq!(model.constraints(), [
        Constraint::new("endurance", [("x", 1.0), ("y", 1.0), ("z", 1.0)].into_iter().collect(), Sense::Less, 10.0),
        Constraint::new("c2", [("x", 2.0)].into_iter().collect(), Sense::Less, 12.0),
        Constraint::new("c3", [("x", 10.0), ("y", -0.5)].into_iter().collect(), Sense::Equal, 2.0),
    ]);
    assert_eq!(model.generals(), ["y"]);
    assert_reads_back(&model);

    let error = read("messy").strict().unwrap_err();
    assert_eq!(error.line_number(), Some(7));

    match import_strict(&get_test_file_path("messy")) {
        Err(Import::Parse(error)) => {
            assert_eq!(error.line_number(), Some(7));
            assert!(error.to_string().starts_with("ParseError: Skipped input in "));
        },
        other => panic!("expected a parse error, got {:?}", other),
    }
    assert_eq!(import_strict(&get_test_file_path("knapsack")).unwrap(), read("knapsack").model);
}

#[test]
fn import_errors() {
    assert!(matches!(import(Path::new(file!())), Err(Import::FileExtension(_))));
    assert!(matches!(import(&get_test_file_path("does_not_exist")), Err(Import::IO(_))));
    assert!(matches!(import_strict(&get_test_file_path("does_not_exist")), Err(Import::IO(_))));
}
