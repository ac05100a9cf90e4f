//! # Building blocks to describe linear programs.
use std::fmt;
use std::ops::Not;

use enum_map::Enum;
use serde::{Deserialize, Serialize};

/// A `Sense` is a type of (in)equality.
///
/// These are read "from expression to right-hand side", meaning that `Sense::Less` describes
/// `<a, x> <= b`.
#[allow(missing_docs)]
#[derive(Enum, Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum Sense {
    #[serde(rename = "<=")]
    Less,
    #[serde(rename = ">=")]
    Greater,
    #[serde(rename = "=")]
    Equal,
}

impl Sense {
    /// Operator tokens, in the order in which a constraint line is searched for them.
    ///
    /// `<=` and `>=` come before `=`, because the latter is a substring of both.
    pub const OPERATORS: [(&'static str, Sense); 4] = [
        ("<=", Sense::Less),
        (">=", Sense::Greater),
        ("==", Sense::Equal),
        ("=", Sense::Equal),
    ];

    /// The operator as it is written in LP files.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Sense::Less => "<=",
            Sense::Greater => ">=",
            Sense::Equal => "=",
        }
    }
}

/// The sense after multiplying both sides with a negative number.
impl Not for Sense {
    type Output = Self;

    fn not(self) -> Self::Output {
        match self {
            Sense::Less => Sense::Greater,
            Sense::Greater => Sense::Less,
            Sense::Equal => Sense::Equal,
        }
    }
}

impl fmt::Display for Sense {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Direction of optimization.
#[allow(missing_docs)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Objective {
    Maximize,
    #[default]
    Minimize,
}

impl Objective {
    /// Section keyword with which the objective function is announced.
    #[must_use]
    pub fn keyword(self) -> &'static str {
        match self {
            Objective::Maximize => "Maximize",
            Objective::Minimize => "Minimize",
        }
    }
}

#[cfg(test)]
mod test {
    use crate::data::linear_program::elements::{Objective, Sense};

    #[test]
    fn negated_sense() {
        assert_eq!(!Sense::Less, Sense::Greater);
        assert_eq!(!Sense::Greater, Sense::Less);
        assert_eq!(!Sense::Equal, Sense::Equal);
    }

    #[test]
    fn operator_text() {
        assert_eq!(Sense::Less.to_string(), "<=");
        assert_eq!(Sense::Equal.to_string(), "=");
        assert_eq!(Objective::default().keyword(), "Minimize");
    }

    #[test]
    fn serialized_as_operator() {
        assert_eq!(serde_json::to_string(&Sense::Greater).unwrap(), "\">=\"");
        let sense: Sense = serde_json::from_str("\"=\"").unwrap();
        assert_eq!(sense, Sense::Equal);
    }
}
