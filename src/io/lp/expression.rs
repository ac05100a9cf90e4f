//! # Reading linear expressions
//!
//! A linear expression is a sequence of terms separated by `+` and `-`. A term is a variable,
//! optionally preceded by a coefficient (`2 x`, `2x`, `2 * x`, `3.5e-1 y`). The text is first split
//! into tokens, after which each group of tokens between two signs is matched against the shapes a
//! term can have.
//!
//! A number directly followed by `e` and digits is read in scientific notation (`1e3 a` is `1000 a`),
//! unless it's the whole term: then the exponent is a variable, and `2e1` is `2 e1`.
//!
//! Reading never fails. Terms that don't have one of the known shapes are skipped and reported.
use std::fmt;
use std::ops::Range;

use tracing::warn;

use crate::data::linear_program::expression::LinearExpression;

/// Smallest unit of an expression.
#[derive(Clone, Copy, Debug, PartialEq)]
enum Token<'a> {
    Number(f64),
    Identifier(&'a str),
    Star,
    Plus,
    Minus,
    /// Any character that can't start one of the other tokens.
    Unknown(char),
}

/// A token together with the byte range of its text.
type Spanned<'a> = (Token<'a>, Range<usize>);

/// Why a term was skipped.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SkipReason {
    /// A number without a variable.
    Constant,
    /// A minus sign at the end of the text, without a term following it.
    DanglingSign,
    /// Contains a character that can't be part of an expression.
    UnknownCharacter,
    /// Tokens in an order that isn't a term, like two variables next to each other.
    Malformed,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SkipReason::Constant => "constant term without a variable",
            SkipReason::DanglingSign => "sign without a term",
            SkipReason::UnknownCharacter => "unknown character",
            SkipReason::Malformed => "not of the form [coefficient [*]] variable",
        })
    }
}

/// A term that was skipped while reading an expression.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TermDiagnostic {
    /// Text of the term, as it was read.
    pub term: String,
    /// What was wrong with it.
    pub reason: SkipReason,
}

impl fmt::Display for TermDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "skipped term \"{}\": {}", self.term, self.reason)
    }
}

/// Read a linear expression, skipping terms that can't be read.
///
/// Coefficients of variables that appear more than once are summed.
///
/// # Examples
///
/// ```
/// use lincanon::io::lp::expression::parse_expression;
///
/// let expression = parse_expression("2x - 3.5 y + z - x");
/// assert_eq!(expression.coefficient("x"), Some(1.0));
/// assert_eq!(expression.coefficient("y"), Some(-3.5));
/// assert_eq!(expression.coefficient("z"), Some(1.0));
/// ```
#[must_use]
pub fn parse_expression(text: &str) -> LinearExpression {
    parse_expression_with_diagnostics(text).0
}

/// Read a linear expression, also returning a diagnostic for every term that was skipped.
///
/// Each skipped term is logged as a warning as well.
#[must_use]
pub fn parse_expression_with_diagnostics(text: &str) -> (LinearExpression, Vec<TermDiagnostic>) {
    let tokens = tokenize(text);

    let mut expression = LinearExpression::new();
    let mut diagnostics = Vec::new();
    let mut skip = |term: &str, reason: SkipReason| {
        warn!(term, %reason, "skipping term");
        diagnostics.push(TermDiagnostic { term: term.to_string(), reason });
    };

    let mut sign = 1.0;
    let mut last_sign = None;
    let mut start = 0;
    for (index, (token, span)) in tokens.iter().enumerate() {
        if !matches!(token, Token::Plus | Token::Minus) {
            continue;
        }

        if start < index {
            match read_term(text, &tokens[start..index]) {
                Ok((coefficient, variable)) => expression.add_term(variable, sign * coefficient),
                Err(reason) => skip(text_of(text, &tokens[start..index]), reason),
            }
            sign = 1.0;
        }
        if *token == Token::Minus {
            sign = -sign;
        }
        start = index + 1;
        last_sign = Some(span.clone());
    }

    if start < tokens.len() {
        match read_term(text, &tokens[start..]) {
            Ok((coefficient, variable)) => expression.add_term(variable, sign * coefficient),
            Err(reason) => skip(text_of(text, &tokens[start..]), reason),
        }
    } else if sign < 0.0 {
        if let Some(span) = last_sign {
            skip(&text[span], SkipReason::DanglingSign);
        }
    }

    (expression, diagnostics)
}

/// Whether the text is exactly one identifier, ignoring surrounding whitespace.
#[must_use]
pub fn is_identifier(text: &str) -> bool {
    matches!(tokenize(text).as_slice(), [(Token::Identifier(_), _)])
}

/// Match the tokens of one term, without its sign.
fn read_term<'a>(text: &'a str, tokens: &[Spanned<'a>]) -> Result<(f64, &'a str), SkipReason> {
    let shape = tokens.iter().map(|(token, _)| *token).collect::<Vec<_>>();
    match shape.as_slice() {
        [Token::Identifier(variable)] => Ok((1.0, *variable)),
        [Token::Star, Token::Identifier(variable)] => Ok((1.0, *variable)),
        [Token::Number(coefficient), Token::Identifier(variable)] => Ok((*coefficient, *variable)),
        [Token::Number(coefficient), Token::Star, Token::Identifier(variable)] => Ok((*coefficient, *variable)),
        [Token::Number(_)] => exponent_as_variable(text_of(text, tokens)).ok_or(SkipReason::Constant),
        tokens if tokens.iter().any(|token| matches!(token, Token::Unknown(_))) => {
            Err(SkipReason::UnknownCharacter)
        },
        _ => Err(SkipReason::Malformed),
    }
}

/// Split a number like `2e1` into the coefficient `2` and the variable `e1`.
fn exponent_as_variable(number: &str) -> Option<(f64, &str)> {
    let (coefficient, variable) = number.split_at(number.find(['e', 'E'])?);
    if is_identifier(variable) {
        coefficient.parse().ok().map(|coefficient| (coefficient, variable))
    } else {
        None
    }
}

/// The text covered by a nonempty sequence of tokens.
fn text_of<'a>(text: &'a str, tokens: &[Spanned<'_>]) -> &'a str {
    match (tokens.first(), tokens.last()) {
        (Some((_, first)), Some((_, last))) => &text[first.start..last.end],
        _ => "",
    }
}

fn tokenize(text: &str) -> Vec<Spanned<'_>> {
    let bytes = text.as_bytes();
    let mut tokens = Vec::new();

    let mut position = 0;
    while position < bytes.len() {
        let start = position;
        let token = match bytes[position] {
            b' ' | b'\t' | b'\r' | b'\n' => {
                position += 1;
                continue;
            },
            b'+' => {
                position += 1;
                Token::Plus
            },
            b'-' => {
                position += 1;
                Token::Minus
            },
            b'*' => {
                position += 1;
                Token::Star
            },
            b'0'..=b'9' | b'.' if starts_number(&bytes[position..]) => {
                position = number_end(bytes, position);
                match text[start..position].parse() {
                    Ok(value) => Token::Number(value),
                    Err(_) => Token::Unknown('.'),
                }
            },
            byte if byte.is_ascii_alphabetic() || byte == b'_' => {
                position = identifier_end(bytes, position);
                Token::Identifier(&text[start..position])
            },
            _ => {
                let character = text[position..].chars().next().unwrap_or('\u{fffd}');
                position += character.len_utf8();
                Token::Unknown(character)
            },
        };

        tokens.push((token, start..position));
    }

    tokens
}

fn starts_number(bytes: &[u8]) -> bool {
    match bytes {
        [b'0'..=b'9', ..] => true,
        [b'.', b'0'..=b'9', ..] => true,
        _ => false,
    }
}

/// End of the number starting at `position`.
///
/// An exponent is only part of the number if digits follow it, so in `2ex` the number is `2`.
fn number_end(bytes: &[u8], mut position: usize) -> usize {
    let digits = |bytes: &[u8], mut position: usize| {
        while position < bytes.len() && bytes[position].is_ascii_digit() {
            position += 1;
        }
        position
    };

    position = digits(bytes, position);
    if position < bytes.len() && bytes[position] == b'.' {
        position = digits(bytes, position + 1);
    }

    if position < bytes.len() && matches!(bytes[position], b'e' | b'E') {
        let mut exponent = position + 1;
        if exponent < bytes.len() && matches!(bytes[exponent], b'+' | b'-') {
            exponent += 1;
        }
        let exponent_end = digits(bytes, exponent);
        if exponent_end > exponent {
            position = exponent_end;
        }
    }

    position
}

/// End of the identifier starting at `position`.
///
/// Bracketed index suffixes like `[1]` or `[i,j]` are part of the identifier when closed.
fn identifier_end(bytes: &[u8], mut position: usize) -> usize {
    while position < bytes.len() {
        match bytes[position] {
            byte if byte.is_ascii_alphanumeric() || byte == b'_' || byte == b'.' => position += 1,
            b'[' => match bytes[position..].iter().position(|&byte| byte == b']') {
                Some(length) => position += length + 1,
                None => break,
            },
            _ => break,
        }
    }

    position
}
