//! # Canonical form
//!
//! A model in canonical form maximizes, has only `<=` constraints, and every row (the objective
//! function included) has an entry for every variable, in the sorted order of the variable
//! universe.
//!
//! Equality constraints are relabeled as `<=` constraints without adding the `>=` half. This loses
//! information; every such constraint is listed in the `CanonicalizationReport` and logged.
use enum_map::EnumMap;
use tracing::{debug, warn};

use crate::data::linear_program::elements::{Objective, Sense};
use crate::data::linear_program::model::Model;

/// What canonicalization changed.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CanonicalizationReport {
    /// Column order of the canonical model.
    pub variables: Vec<String>,
    /// Whether a minimization problem was turned into a maximization problem by negating the
    /// objective function.
    ///
    /// If so, the optimal value of the canonical model is the negative of the original one.
    pub negated_objective: bool,
    /// Names of `>=` constraints that were multiplied by -1.
    pub flipped: Vec<String>,
    /// Names of equality constraints that were relabeled as `<=` without any other change.
    pub relaxed_equalities: Vec<String>,
    /// Number of constraints of each sense, before canonicalization.
    pub sense_counts: EnumMap<Sense, usize>,
}

impl CanonicalizationReport {
    /// Whether the canonical model may have a larger feasible region than the original.
    #[must_use]
    pub fn is_lossy(&self) -> bool {
        !self.relaxed_equalities.is_empty()
    }

    /// Whether the model was already in canonical form, apart from the order of its entries.
    #[must_use]
    pub fn is_unchanged(&self) -> bool {
        !self.negated_objective && self.flipped.is_empty() && self.relaxed_equalities.is_empty()
    }
}

impl Model {
    /// Bring the model in canonical form.
    ///
    /// Steps:
    /// * Compute the variable universe and give the objective function an entry for each variable.
    /// * Negate the objective function of a minimization problem, making it a maximization problem.
    /// * Multiply `>=` constraints by -1; relabel `=` constraints as `<=`.
    /// * Densify all rows over the sorted variable universe.
    ///
    /// Applying this to a model that is already canonical changes nothing.
    pub fn canonicalize(&mut self) -> CanonicalizationReport {
        let variables = self.variable_universe();
        let mut report = CanonicalizationReport::default();

        let cost = self.cost().densified(&variables);
        *self.cost_mut() = cost;

        if self.objective() == Objective::Minimize {
            self.cost_mut().scale(-1.0);
            self.set_objective(Objective::Maximize);
            report.negated_objective = true;
            debug!("negated the objective function of a minimization problem");
        }

        for constraint in self.constraints_mut() {
            report.sense_counts[constraint.sense] += 1;

            match constraint.sense {
                Sense::Less => {},
                Sense::Greater => {
                    constraint.lhs.scale(-1.0);
                    constraint.rhs = -constraint.rhs;
                    constraint.sense = Sense::Less;
                    report.flipped.push(constraint.name.clone());
                },
                Sense::Equal => {
                    warn!(
                        constraint = constraint.name.as_str(),
                        "equality constraint relabeled as <=, its >= half is dropped"
                    );
                    constraint.sense = Sense::Less;
                    report.relaxed_equalities.push(constraint.name.clone());
                },
            }

            constraint.lhs = constraint.lhs.densified(&variables);
        }

        report.variables = variables;
        report
    }
}
