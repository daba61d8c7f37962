//! Recursive-descent parser for dispatch-table declarations.
//!
//! The input is a `;`-separated listing of C function-pointer declarations,
//! one per segment, following the fixed grammar:
//!
//! ```text
//! declaration := type '(' "JNICALL" '*' ident ')' '(' param-list ')'
//! type        := [ "const" ] ident [ '*' ]
//! param-list  := '' | param { ',' param } [ ',' "..." ]
//! param       := type ident
//! ```
//!
//! Segments parse independently: a grammar error drops that one declaration
//! and records a failure, so a bad segment can never corrupt the rest of the
//! listing.

use miette::Diagnostic;
use thiserror::Error;

use super::types::{CMethod, CParam, CType};

/// Per-segment grammar errors. All are recovered by dropping the segment.
#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
pub enum ParseError {
    /// No identifier token where a type or parameter name was expected.
    #[error("no identifier where one was expected")]
    #[diagnostic(code(jnigen::parse::missing_identifier))]
    MissingIdentifier,

    /// A second `*` after a pointer type.
    #[error("multi-level pointers are unsupported")]
    #[diagnostic(code(jnigen::parse::double_pointer))]
    DoublePointer,

    /// `const` directly followed by `*`.
    #[error("`const` pointers are unsupported")]
    #[diagnostic(code(jnigen::parse::const_pointer))]
    ConstPointer,

    /// The `(JNICALL *Name)` idiom is absent or malformed.
    #[error("function-pointer name pattern `(JNICALL *Name)` not found")]
    #[diagnostic(code(jnigen::parse::missing_name_pattern))]
    MissingNamePattern,

    /// The parameter list ran out before its closing `)`.
    #[error("parameter list ended unexpectedly")]
    #[diagnostic(code(jnigen::parse::unexpected_end))]
    UnexpectedEnd,
}

/// A dropped segment together with the error that dropped it.
#[derive(Debug, Clone)]
pub struct ParseFailure {
    /// The trimmed declaration text that failed to parse
    pub segment: String,

    /// What went wrong
    pub error: ParseError,
}

/// The ordered parse result: methods in input declaration order, plus the
/// segments that were dropped. Immutable after parse.
#[derive(Debug, Clone, Default)]
pub struct ParsedTable {
    /// Successfully parsed declarations, in input order
    pub methods: Vec<CMethod>,

    /// Dropped segments
    pub failures: Vec<ParseFailure>,
}

/// Rust keywords that cannot be used as parameter names in the generated
/// host bindings. Renamed by appending `_` once, at parse time.
const RUST_KEYWORDS: &[&str] = &[
    "as", "async", "await", "box", "break", "const", "continue", "crate", "dyn", "else", "enum",
    "extern", "false", "fn", "for", "if", "impl", "in", "let", "loop", "match", "mod", "move",
    "mut", "pub", "ref", "return", "self", "static", "struct", "super", "trait", "true", "type",
    "unsafe", "use", "where", "while",
];

fn sanitize_identifier(id: &str) -> String {
    if RUST_KEYWORDS.contains(&id) {
        format!("{}_", id)
    } else {
        id.to_string()
    }
}

/// Character cursor over one declaration segment.
struct Cursor<'a> {
    rest: &'a str,
}

impl<'a> Cursor<'a> {
    fn new(text: &'a str) -> Self {
        Cursor { rest: text }
    }

    fn skip_ws(&mut self) {
        self.rest = self.rest.trim_start();
    }

    fn peek(&mut self) -> Option<char> {
        self.skip_ws();
        self.rest.chars().next()
    }

    /// Consume `c` if it is the next non-whitespace character.
    fn eat(&mut self, c: char) -> bool {
        if self.peek() == Some(c) {
            self.rest = &self.rest[c.len_utf8()..];
            true
        } else {
            false
        }
    }

    /// Consume a leading `\w+` token, if any.
    fn take_ident(&mut self) -> Option<&'a str> {
        self.skip_ws();
        let end = self
            .rest
            .find(|c: char| !c.is_ascii_alphanumeric() && c != '_')
            .unwrap_or(self.rest.len());
        if end == 0 {
            return None;
        }
        let (ident, rest) = self.rest.split_at(end);
        self.rest = rest;
        Some(ident)
    }

    /// Consume a literal `...` marker, if present.
    fn eat_ellipsis(&mut self) -> bool {
        self.skip_ws();
        if let Some(rest) = self.rest.strip_prefix("...") {
            self.rest = rest;
            true
        } else {
            false
        }
    }
}

/// `type := [ "const" ] ident [ '*' ]`, or the `...` marker.
fn parse_type(cur: &mut Cursor) -> Result<CType, ParseError> {
    if cur.eat_ellipsis() {
        return Ok(CType::variadic_marker());
    }

    let first = cur.take_ident().ok_or(ParseError::MissingIdentifier)?;

    let mut ty = CType::default();
    if first == "const" {
        ty.is_const = true;
        if cur.peek() == Some('*') {
            return Err(ParseError::ConstPointer);
        }
        ty.name = cur
            .take_ident()
            .ok_or(ParseError::MissingIdentifier)?
            .to_string();
    } else {
        ty.name = first.to_string();
    }

    if cur.eat('*') {
        ty.pointer = true;
        if cur.peek() == Some('*') {
            return Err(ParseError::DoublePointer);
        }
    }

    Ok(ty)
}

/// `'(' "JNICALL" '*' ident ')'`
fn parse_pointer_name(cur: &mut Cursor) -> Result<String, ParseError> {
    if !cur.eat('(') {
        return Err(ParseError::MissingNamePattern);
    }
    match cur.take_ident() {
        Some("JNICALL") => {}
        _ => return Err(ParseError::MissingNamePattern),
    }
    if !cur.eat('*') {
        return Err(ParseError::MissingNamePattern);
    }
    let name = cur.take_ident().ok_or(ParseError::MissingNamePattern)?;
    if !cur.eat(')') {
        return Err(ParseError::MissingNamePattern);
    }
    Ok(name.to_string())
}

/// `'(' param-list ')'`
fn parse_param_list(cur: &mut Cursor) -> Result<Vec<CParam>, ParseError> {
    if !cur.eat('(') {
        return Err(ParseError::UnexpectedEnd);
    }

    let mut params = Vec::new();
    loop {
        match cur.peek() {
            Some(')') => {
                cur.eat(')');
                break;
            }
            Some(',') => {
                cur.eat(',');
                continue;
            }
            None => return Err(ParseError::UnexpectedEnd),
            Some(_) => {}
        }

        let ty = parse_type(cur)?;
        if ty.variadic {
            // `...` is only accepted as the final entry, with no identifier.
            if cur.peek() != Some(')') {
                return Err(ParseError::UnexpectedEnd);
            }
            params.push(CParam::new(ty, ""));
            continue;
        }

        let name = cur.take_ident().ok_or(ParseError::UnexpectedEnd)?;
        params.push(CParam::new(ty, sanitize_identifier(name)));
    }

    Ok(params)
}

/// Parse one trimmed declaration segment.
pub fn parse_declaration(segment: &str) -> Result<CMethod, ParseError> {
    let mut cur = Cursor::new(segment);
    let ret = parse_type(&mut cur)?;
    let name = parse_pointer_name(&mut cur)?;
    let params = parse_param_list(&mut cur)?;
    Ok(CMethod::new(name, ret, params))
}

/// Parse a full `;`-separated listing.
///
/// Empty segments are skipped; failed segments are dropped and recorded,
/// never fatal.
pub fn parse_method_table(text: &str) -> ParsedTable {
    let mut table = ParsedTable::default();

    for segment in text.split(';') {
        let segment = segment.trim();
        if segment.is_empty() {
            continue;
        }

        match parse_declaration(segment) {
            Ok(method) => table.methods.push(method),
            Err(error) => {
                tracing::warn!(segment, %error, "dropping declaration");
                table.failures.push(ParseFailure {
                    segment: segment.to_string(),
                    error,
                });
            }
        }
    }

    table
}
