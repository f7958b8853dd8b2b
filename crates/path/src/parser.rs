//! A `nom`-based parser for the path expression language.
//!
//! ```text
//! expression := simple ( '|' simple )*
//! simple     := '/'? step ( '/' step )*
//! step       := axis? node-test? predicate*
//! axis       := '/' | '..' | '.' | [a-z-]+ '::'
//! node-test  := '*' | [A-Za-z0-9_.$#-]+
//! predicate  := '[' ( '@' name '=' quoted | integer | '?' function | expression ) ']'
//! ```
//!
//! A step with no axis is on the child axis. A leading `/` only marks the
//! expression as absolute; an extra `/` at the start of a step selects the
//! descendant-or-self axis, which is how `//foo` and `a//b` are read.

use super::ast::*;
use crate::error::PathError;
use nom::{
    IResult, Parser,
    branch::alt,
    bytes::complete::{tag, take_while, take_while1},
    character::complete::{char, digit1, multispace0},
    combinator::{map, opt, peek, recognize, value},
    error::{ErrorKind, ParseError},
    multi::{many0, separated_list1},
    sequence::{delimited, pair, preceded, terminated},
};

/// A parse failure, carrying the input that remained when it happened.
#[derive(Debug, Clone, PartialEq)]
pub struct SyntaxError<'a> {
    input: &'a str,
    kind: SyntaxErrorKind<'a>,
}

#[derive(Debug, Clone, PartialEq)]
enum SyntaxErrorKind<'a> {
    Nom(ErrorKind),
    UnknownAxis(&'a str),
    MissingNodeTest(Axis),
    PositionOutOfRange(&'a str),
}

impl<'a> ParseError<&'a str> for SyntaxError<'a> {
    fn from_error_kind(input: &'a str, kind: ErrorKind) -> Self {
        Self {
            input,
            kind: SyntaxErrorKind::Nom(kind),
        }
    }

    fn append(_: &'a str, _: ErrorKind, other: Self) -> Self {
        other
    }
}

impl<'a> SyntaxError<'a> {
    fn into_path_error(self, expression: &str) -> PathError {
        let offset = expression.trim_end().len().saturating_sub(self.input.len());
        match self.kind {
            SyntaxErrorKind::UnknownAxis(axis) => PathError::UnknownAxis {
                expression: expression.to_string(),
                axis: axis.to_string(),
            },
            SyntaxErrorKind::MissingNodeTest(axis) => PathError::MissingNodeTest {
                expression: expression.to_string(),
                axis,
            },
            SyntaxErrorKind::PositionOutOfRange(digits) => PathError::Parse {
                expression: expression.to_string(),
                offset,
                message: format!("Position '{}' is out of range", digits),
            },
            SyntaxErrorKind::Nom(kind) => PathError::Parse {
                expression: expression.to_string(),
                offset,
                message: if self.input.is_empty() {
                    "Unexpected end of input".to_string()
                } else {
                    format!("Unexpected input '{}' ({:?})", self.input, kind)
                },
            },
        }
    }
}

type PResult<'a, T> = IResult<&'a str, T, SyntaxError<'a>>;

// --- Main Public Parser ---

/// Parses the full text of a path expression.
pub fn parse_path_expression(input: &str) -> Result<PathExpression, PathError> {
    let trimmed = input.trim();
    match path_expression(trimmed) {
        Ok(("", expr)) => Ok(expr),
        Ok((rem, _)) => Err(PathError::Parse {
            expression: input.to_string(),
            offset: input.trim_end().len() - rem.len(),
            message: format!("Parser did not consume all input. Remainder: '{}'", rem),
        }),
        Err(nom::Err::Error(e)) | Err(nom::Err::Failure(e)) => Err(e.into_path_error(input)),
        Err(nom::Err::Incomplete(_)) => Err(PathError::Parse {
            expression: input.to_string(),
            offset: input.len(),
            message: "Unexpected end of input".to_string(),
        }),
    }
}

// --- Combinators & Helpers ---

fn ws<'a, F, O, E>(inner: F) -> impl Parser<&'a str, Output = O, Error = E>
where
    F: Parser<&'a str, Output = O, Error = E>,
    E: ParseError<&'a str>,
{
    delimited(multispace0, inner, multispace0)
}

fn is_name_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.' | '$' | '#')
}

fn name(input: &str) -> PResult<'_, &str> {
    take_while1(is_name_char).parse(input)
}

fn quoted(input: &str) -> PResult<'_, &str> {
    alt((
        delimited(char('\''), take_while(|c| c != '\''), char('\'')),
        delimited(char('"'), take_while(|c| c != '"'), char('"')),
    ))
    .parse(input)
}

// --- Expression Parsers ---

fn path_expression(input: &str) -> PResult<'_, PathExpression> {
    map(
        separated_list1(ws(char('|')), simple_path_expression),
        |mut branches| {
            if branches.len() == 1 {
                branches.remove(0)
            } else {
                PathExpression::Union(branches)
            }
        },
    )
    .parse(input)
}

fn simple_path_expression(input: &str) -> PResult<'_, PathExpression> {
    map(
        pair(opt(char('/')), separated_list1(char('/'), step)),
        |(leading, steps)| PathExpression::simple(leading.is_some(), steps),
    )
    .parse(input)
}

// --- Step Parsers ---

fn axis_prefix(input: &str) -> PResult<'_, Axis> {
    alt((
        value(Axis::DescendantOrSelf, tag("/")),
        value(Axis::Parent, tag("..")),
        value(Axis::SelfAxis, tag(".")),
        named_axis,
    ))
    .parse(input)
}

fn named_axis(input: &str) -> PResult<'_, Axis> {
    let (i, axis_name) = terminated(
        take_while1(|c: char| c.is_ascii_lowercase() || c == '-'),
        tag("::"),
    )
    .parse(input)?;
    match Axis::from_name(axis_name) {
        Some(axis) => Ok((i, axis)),
        None => Err(nom::Err::Failure(SyntaxError {
            input,
            kind: SyntaxErrorKind::UnknownAxis(axis_name),
        })),
    }
}

fn node_test(input: &str) -> PResult<'_, NodeTest> {
    alt((
        value(NodeTest::Any, char('*')),
        map(name, NodeTest::named),
    ))
    .parse(input)
}

fn step(input: &str) -> PResult<'_, LocationStep> {
    let (i, axis) = opt(axis_prefix).parse(input)?;
    let (i, test) = opt(node_test).parse(i)?;
    let test = match (axis, test) {
        (_, Some(test)) => test,
        (Some(axis), None) if axis.allows_omitted_node_test() => NodeTest::Any,
        (Some(axis), None) => {
            return Err(nom::Err::Failure(SyntaxError {
                input: i,
                kind: SyntaxErrorKind::MissingNodeTest(axis),
            }));
        }
        (None, None) => {
            return Err(nom::Err::Error(SyntaxError::from_error_kind(
                input,
                ErrorKind::Verify,
            )));
        }
    };
    let (i, predicates) = many0(predicate).parse(i)?;
    Ok((
        i,
        LocationStep::new(axis.unwrap_or(Axis::Child), test, predicates),
    ))
}

// --- Predicate Parsers ---

fn predicate(input: &str) -> PResult<'_, Predicate> {
    delimited(
        char('['),
        ws(alt((
            attribute_equals,
            function_reference,
            position,
            map(path_expression, Predicate::nested),
        ))),
        char(']'),
    )
    .parse(input)
}

fn attribute_equals(input: &str) -> PResult<'_, Predicate> {
    map(
        preceded(char('@'), (name, ws(char('=')), quoted)),
        |(attribute, _, expected)| Predicate::attribute_equals(attribute, expected),
    )
    .parse(input)
}

fn function_reference(input: &str) -> PResult<'_, Predicate> {
    map(
        preceded(
            char('?'),
            recognize(pair(
                take_while1(|c: char| c.is_ascii_alphabetic() || c == '_'),
                take_while(|c: char| c.is_ascii_alphanumeric() || c == '_'),
            )),
        ),
        Predicate::function,
    )
    .parse(input)
}

// `[12]` is a position, but `[12abc]` is a nested path to a node named `12abc`.
fn position(input: &str) -> PResult<'_, Predicate> {
    let (i, digits) = terminated(digit1, peek(pair(multispace0, char(']')))).parse(input)?;
    match digits.parse::<usize>() {
        Ok(position) => Ok((i, Predicate::Position(position))),
        Err(_) => Err(nom::Err::Failure(SyntaxError {
            input,
            kind: SyntaxErrorKind::PositionOutOfRange(digits),
        })),
    }
}
