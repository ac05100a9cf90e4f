//! # Tokens used in LP files
//!
//! Section keywords are matched without regard to case, at the start of a trimmed line.

/// Indicates a comment line. Comment lines are kept as the header of the model.
pub const COMMENT_INDICATOR: &str = "\\";

/// Separates the name of a constraint (or objective function) from its terms.
pub const NAME_SEPARATOR: char = ':';

/// Marks the end of the model; everything after it is ignored.
pub const END: &str = "end";

/// Announces a maximization problem, followed by the objective function.
pub const MAXIMIZE: [&str; 2] = ["maximize", "maximise"];

/// Announces a minimization problem, followed by the objective function.
pub const MINIMIZE: [&str; 2] = ["minimize", "minimise"];

/// Announces the constraints.
pub const SUBJECT_TO: [&str; 3] = ["subject to", "such that", "s.t."];

/// Announces the bound lines.
pub const BOUNDS: [&str; 2] = ["bounds", "bound"];

/// Announces the integer variables.
///
/// The longer keyword comes first, so that it is not cut short by the shorter one.
pub const GENERALS: [&str; 3] = ["generals", "general", "integers"];

/// Announces the binary variables.
pub const BINARIES: [&str; 2] = ["binaries", "binary"];

/// Section headers as they are written.
pub const SUBJECT_TO_HEADER: &str = "Subject To";
/// See `SUBJECT_TO_HEADER`.
pub const BOUNDS_HEADER: &str = "Bounds";
/// See `SUBJECT_TO_HEADER`.
pub const GENERALS_HEADER: &str = "Generals";
/// See `SUBJECT_TO_HEADER`.
pub const BINARIES_HEADER: &str = "Binaries";
/// See `SUBJECT_TO_HEADER`.
pub const END_HEADER: &str = "End";

/// Header comments that contain this text already say what format the file is in.
pub const FORMAT_MARKER: &str = "LP format";

/// Written at the top of a model whose header does not mention the format.
pub const DEFAULT_HEADER: &str = "\\ LP format - for model browsing. Use MPS format to capture full model detail.";
