//! Search layer — boolean keyword expressions over [`Record`] values.
//!
//! An expression is compiled once into an immutable [`Expr`] tree and then
//! evaluated against each record. Compilation runs in three stages:
//!
//! 1. **Normalisation** ([`normalize`]): every `,` becomes ` OR`, then the
//!    standalone words `AND`, `OR`, `NOT` are lower-cased in any casing.
//!    The order matters: the `OR` introduced by a comma is itself lower-cased
//!    by the second step.
//! 2. **Lexing**: double-quoted strings (quotes stripped, may contain spaces)
//!    and bare words made of letters, digits, `-` and `_`. After
//!    normalisation the exact words `and`, `or`, `not` are operators.
//! 3. **Parsing**: recursive descent with precedence `not` > `and` > `or`,
//!    `not` right-associative, the binary operators left-associative,
//!    parentheses for grouping. The whole input must be consumed.
//!
//! # Grammar
//!
//! ```text
//! or_expr  := and_expr ( "or" and_expr )*
//! and_expr := not_expr ( "and" not_expr )*
//! not_expr := "not" not_expr | atom
//! atom     := "(" or_expr ")" | TERM
//! ```
//!
//! # Matching
//!
//! A term matches a record when any non-null field value, rendered as text,
//! contains the term case-insensitively. Field names are never searched.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

use crate::types::Record;

static OPERATOR_WORDS: LazyLock<[(Regex, &'static str); 3]> = LazyLock::new(|| {
    [
        (operator_regex("AND"), "and"),
        (operator_regex("OR"), "or"),
        (operator_regex("NOT"), "not"),
    ]
});

fn operator_regex(word: &str) -> Regex {
    Regex::new(&format!(r"(?i)\b{word}\b")).expect("operator pattern is a valid regex")
}

// ---------------------------------------------------------------------------
// AST
// ---------------------------------------------------------------------------

/// Compiled search expression.
///
/// `Term` holds its text already lower-cased. Chains such as `a or b or c`
/// compile to a single n-ary node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expr {
    Term(String),
    And(Vec<Expr>),
    Or(Vec<Expr>),
    Not(Box<Expr>),
}

impl Expr {
    pub fn term(text: &str) -> Self {
        Expr::Term(text.to_lowercase())
    }

    /// Evaluate against a record. Pure: no state is read or written besides
    /// the tree and the record.
    pub fn matches(&self, record: &Record) -> bool {
        match self {
            Expr::Term(needle) => record
                .texts()
                .any(|text| text.to_lowercase().contains(needle.as_str())),
            Expr::And(children) => children.iter().all(|c| c.matches(record)),
            Expr::Or(children) => children.iter().any(|c| c.matches(record)),
            Expr::Not(child) => !child.matches(record),
        }
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn join(f: &mut fmt::Formatter<'_>, children: &[Expr], op: &str) -> fmt::Result {
            f.write_str("(")?;
            for (i, child) in children.iter().enumerate() {
                if i > 0 {
                    write!(f, " {op} ")?;
                }
                write!(f, "{child}")?;
            }
            f.write_str(")")
        }
        match self {
            Expr::Term(text) => write!(f, "{text:?}"),
            Expr::And(children) => join(f, children, "and"),
            Expr::Or(children) => join(f, children, "or"),
            Expr::Not(child) => write!(f, "not {child}"),
        }
    }
}

/// Evaluate an optional expression; no expression matches everything.
pub fn evaluate(expr: Option<&Expr>, record: &Record) -> bool {
    expr.map_or(true, |e| e.matches(record))
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// A search expression that could not be compiled.
///
/// `expression` is the normalised text; `kind` positions are byte offsets
/// into it.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind} in search expression {expression:?}")]
pub struct ParseError {
    pub expression: String,
    pub kind: ParseErrorKind,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseErrorKind {
    #[error("empty expression")]
    Empty,
    #[error("empty quoted term at position {pos}")]
    EmptyTerm { pos: usize },
    #[error("unterminated quote starting at position {pos}")]
    UnterminatedQuote { pos: usize },
    #[error("invalid character {ch:?} at position {pos}")]
    InvalidCharacter { ch: char, pos: usize },
    #[error("unexpected end of expression, expected {expected}")]
    UnexpectedEnd { expected: &'static str },
    #[error("unexpected {found} at position {pos}")]
    UnexpectedToken { found: String, pos: usize },
    #[error("unclosed parenthesis opened at position {pos}")]
    UnclosedParen { pos: usize },
    #[error("unexpected trailing {found} at position {pos}")]
    TrailingInput { found: String, pos: usize },
}

// ---------------------------------------------------------------------------
// Compilation
// ---------------------------------------------------------------------------

/// Rewrite commas and operator words into canonical form.
pub fn normalize(text: &str) -> String {
    let mut out = text.replace(',', " OR");
    for (pattern, canonical) in OPERATOR_WORDS.iter() {
        out = pattern.replace_all(&out, *canonical).into_owned();
    }
    out
}

/// Compile expression text into an [`Expr`].
pub fn compile(text: &str) -> Result<Expr, ParseError> {
    let expression = normalize(text);
    let result = lex(&expression).and_then(|tokens| Parser::new(tokens).parse());
    match result {
        Ok(expr) => {
            tracing::debug!(input = text, compiled = %expr, "search: compiled expression");
            Ok(expr)
        }
        Err(kind) => Err(ParseError { expression, kind }),
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Token {
    LParen,
    RParen,
    And,
    Or,
    Not,
    Term(String),
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::LParen => f.write_str("'('"),
            Token::RParen => f.write_str("')'"),
            Token::And => f.write_str("operator 'and'"),
            Token::Or => f.write_str("operator 'or'"),
            Token::Not => f.write_str("operator 'not'"),
            Token::Term(t) => write!(f, "term {t:?}"),
        }
    }
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '-' || c == '_'
}

fn lex(input: &str) -> Result<Vec<(Token, usize)>, ParseErrorKind> {
    let mut tokens = Vec::new();
    let mut chars = input.char_indices().peekable();

    while let Some(&(pos, c)) = chars.peek() {
        match c {
            c if c.is_whitespace() => {
                chars.next();
            }
            '(' => {
                chars.next();
                tokens.push((Token::LParen, pos));
            }
            ')' => {
                chars.next();
                tokens.push((Token::RParen, pos));
            }
            '"' => {
                chars.next();
                let start = pos + 1;
                let end = loop {
                    match chars.next() {
                        Some((i, '"')) => break i,
                        Some(_) => {}
                        None => return Err(ParseErrorKind::UnterminatedQuote { pos }),
                    }
                };
                let text = &input[start..end];
                if text.is_empty() {
                    return Err(ParseErrorKind::EmptyTerm { pos });
                }
                tokens.push((Token::Term(text.to_string()), pos));
            }
            c if is_word_char(c) => {
                let mut end = input.len();
                while let Some(&(i, c)) = chars.peek() {
                    if !is_word_char(c) {
                        end = i;
                        break;
                    }
                    chars.next();
                }
                let token = match &input[pos..end] {
                    "and" => Token::And,
                    "or" => Token::Or,
                    "not" => Token::Not,
                    word => Token::Term(word.to_string()),
                };
                tokens.push((token, pos));
            }
            other => return Err(ParseErrorKind::InvalidCharacter { ch: other, pos }),
        }
    }

    Ok(tokens)
}

struct Parser {
    tokens: Vec<(Token, usize)>,
    cursor: usize,
}

impl Parser {
    fn new(tokens: Vec<(Token, usize)>) -> Self {
        Self { tokens, cursor: 0 }
    }

    fn parse(mut self) -> Result<Expr, ParseErrorKind> {
        if self.tokens.is_empty() {
            return Err(ParseErrorKind::Empty);
        }
        let expr = self.parse_or()?;
        match self.tokens.get(self.cursor) {
            None => Ok(expr),
            Some((token, pos)) => Err(ParseErrorKind::TrailingInput {
                found: token.to_string(),
                pos: *pos,
            }),
        }
    }

    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.cursor).map(|(t, _)| t)
    }

    fn eat(&mut self, expected: &Token) -> bool {
        if self.peek() == Some(expected) {
            self.cursor += 1;
            true
        } else {
            false
        }
    }

    fn parse_or(&mut self) -> Result<Expr, ParseErrorKind> {
        let mut operands = vec![self.parse_and()?];
        while self.eat(&Token::Or) {
            operands.push(self.parse_and()?);
        }
        Ok(collapse(operands, Expr::Or))
    }

    fn parse_and(&mut self) -> Result<Expr, ParseErrorKind> {
        let mut operands = vec![self.parse_not()?];
        while self.eat(&Token::And) {
            operands.push(self.parse_not()?);
        }
        Ok(collapse(operands, Expr::And))
    }

    fn parse_not(&mut self) -> Result<Expr, ParseErrorKind> {
        if self.eat(&Token::Not) {
            Ok(Expr::Not(Box::new(self.parse_not()?)))
        } else {
            self.parse_atom()
        }
    }

    fn parse_atom(&mut self) -> Result<Expr, ParseErrorKind> {
        let Some((token, pos)) = self.tokens.get(self.cursor).cloned() else {
            return Err(ParseErrorKind::UnexpectedEnd {
                expected: "a term or '('",
            });
        };
        self.cursor += 1;
        match token {
            Token::Term(text) => Ok(Expr::term(&text)),
            Token::LParen => {
                let inner = self.parse_or()?;
                if self.eat(&Token::RParen) {
                    return Ok(inner);
                }
                match self.tokens.get(self.cursor) {
                    Some((found, found_pos)) => Err(ParseErrorKind::UnexpectedToken {
                        found: found.to_string(),
                        pos: *found_pos,
                    }),
                    None => Err(ParseErrorKind::UnclosedParen { pos }),
                }
            }
            other => Err(ParseErrorKind::UnexpectedToken {
                found: other.to_string(),
                pos,
            }),
        }
    }
}

fn collapse(mut operands: Vec<Expr>, node: fn(Vec<Expr>) -> Expr) -> Expr {
    if operands.len() == 1 {
        operands.remove(0)
    } else {
        node(operands)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
