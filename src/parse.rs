//! Parsing assembly source lines.
//!
//! The dialect is strictly line-oriented: every line is at most one
//! label, followed by at most one directive or instruction. This module
//! converts a single cleaned-up line into a [`Line`] value, and provides
//! the small text utilities the preprocessor and the passes share
//! (comment stripping, whitespace normalization, label validation, and
//! the `.data`/`.string` argument parsers).
//!
//! The parser module consists of:
//! - [`lex`]: the token-level lexer
//! - [`parse_line`]: the line-level parser
//! - the free helper functions

pub mod lex;

use std::borrow::Cow;

use logos::{Lexer, Logos};

use crate::ast::{Instr, Opcode, Operand};
use crate::err::ErrorKind;
use lex::{LexErr, Token};

/// Longest accepted source line, in bytes, excluding the newline.
pub const MAX_LINE_LENGTH: usize = 80;
/// Longest accepted label or macro name, in bytes.
pub const MAX_LABEL_LENGTH: usize = 31;

/// Any error that occurs while parsing a line.
#[derive(Debug, PartialEq, Eq)]
pub struct ParseErr {
    kind: ErrorKind,
    msg: Cow<'static, str>,
}
impl ParseErr {
    fn new<C: Into<Cow<'static, str>>>(kind: ErrorKind, msg: C) -> Self {
        Self { kind, msg: msg.into() }
    }
}
impl std::fmt::Display for ParseErr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.msg)
    }
}
impl std::error::Error for ParseErr {}
impl crate::err::Error for ParseErr {
    fn kind(&self) -> ErrorKind {
        self.kind
    }
}
impl From<LexErr> for ParseErr {
    fn from(e: LexErr) -> Self {
        ParseErr::new(crate::err::Error::kind(&e), e.to_string())
    }
}

/// Truncates a line at its first `;`.
pub fn remove_comment(line: &str) -> &str {
    match line.find(';') {
        Some(at) => &line[..at],
        None => line,
    }
}

/// Trims a line and rewrites its whitespace.
///
/// Tabs become spaces. When `collapse` is set, every whitespace run
/// becomes a single space; otherwise run lengths are preserved.
pub fn normalize(line: &str, collapse: bool) -> String {
    let mut out = String::with_capacity(line.len());
    let mut in_space = false;

    for c in line.trim_start().chars() {
        if c.is_whitespace() {
            if !in_space {
                out.push(' ');
                in_space = collapse;
            }
        } else {
            out.push(c);
            in_space = false;
        }
    }
    while out.ends_with(' ') {
        out.pop();
    }
    out
}

/// Whether `name` is a well-formed label: an ASCII letter followed by
/// letters, digits, or underscores, at most [`MAX_LABEL_LENGTH`] bytes.
pub fn is_valid_label(name: &str) -> bool {
    let mut chars = name.chars();
    let Some(first) = chars.next() else { return false };

    first.is_ascii_alphabetic()
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        && name.len() <= MAX_LABEL_LENGTH
}

/// Whether `name` collides with a directive, macro keyword, or mnemonic.
pub fn is_reserved(name: &str) -> bool {
    matches!(name, "data" | "string" | "entry" | "extern" | "mcro" | "endmcro")
        || Opcode::from_name(name).is_some()
}

/// Parses a `.data` argument list: comma-separated, optionally signed
/// decimal integers, each within the 21-bit signed content range.
pub fn parse_data_values(args: &str) -> Result<Vec<i32>, ParseErr> {
    let mut lx = Token::lexer(args);
    let mut values = vec![];

    match lx.next() {
        None => return Err(ParseErr::new(ErrorKind::Syntax, "missing data values")),
        Some(tok) => values.push(expect_int(tok)?),
    }
    loop {
        match lx.next() {
            None => return Ok(values),
            Some(Ok(Token::Comma)) => {}
            Some(Err(e)) => return Err(e.into()),
            Some(Ok(_)) => return Err(ParseErr::new(ErrorKind::Syntax, "expected comma between data values")),
        }
        match lx.next() {
            None => return Err(ParseErr::new(ErrorKind::Syntax, "trailing comma in data values")),
            Some(tok) => values.push(expect_int(tok)?),
        }
    }
}
fn expect_int(tok: Result<Token, LexErr>) -> Result<i32, ParseErr> {
    match tok {
        Ok(Token::Int(n)) => Ok(n),
        Err(e) => Err(e.into()),
        Ok(_) => Err(ParseErr::new(ErrorKind::Syntax, "expected numeric value")),
    }
}

/// Parses a `.string` argument: a double-quoted run of bytes.
///
/// The interior is copied verbatim (there are no escapes) and a
/// terminating 0 is appended, so `""` yields exactly `[0]`.
pub fn parse_string_value(args: &str) -> Result<Vec<u8>, ParseErr> {
    let Some(inner) = args.trim().strip_prefix('"').and_then(|r| r.strip_suffix('"')) else {
        return Err(ParseErr::new(ErrorKind::Syntax, "string must be enclosed in double quotes"));
    };

    let mut values: Vec<u8> = inner.bytes().collect();
    values.push(0);
    Ok(values)
}

/// A parsed source line.
#[derive(Debug, PartialEq, Eq)]
pub struct Line {
    /// The leading label, when the line has one.
    pub label: Option<String>,
    /// What the rest of the line holds.
    pub body: LineBody,
}

/// The statement part of a [`Line`].
#[derive(Debug, PartialEq, Eq)]
pub enum LineBody {
    /// Nothing after the label (or nothing at all).
    Empty,
    /// A dot-directive and the verbatim remainder of the line.
    Directive {
        /// The directive name, without the dot.
        name: String,
        /// Everything after the directive, trimmed.
        args: String,
    },
    /// An instruction with parsed operands.
    Instr(Instr),
}

/// Parses one comment-stripped, normalized line.
///
/// The leading token is taken as a label only when the lexer saw an
/// adjacent colon; directive arguments are handed over as raw text since
/// `.string` needs its bytes verbatim, while instruction operands are
/// fully tokenized here.
pub fn parse_line(line: &str) -> Result<Line, ParseErr> {
    let mut lx = Token::lexer(line);

    let mut tok = lx.next();
    let label = match tok {
        Some(Ok(Token::Label(name))) => {
            tok = lx.next();
            Some(name)
        }
        _ => None,
    };

    match tok {
        None => Ok(Line { label, body: LineBody::Empty }),
        Some(Err(e)) => Err(e.into()),
        Some(Ok(Token::Directive(name))) => {
            let args = lx.remainder().trim().to_string();
            Ok(Line { label, body: LineBody::Directive { name, args } })
        }
        Some(Ok(Token::Ident(name))) => {
            let Some(opcode) = Opcode::from_name(&name) else {
                return Err(ParseErr::new(ErrorKind::Instruction, format!("unknown instruction: {name}")));
            };
            let operands = parse_operands(&mut lx)?;
            Ok(Line { label, body: LineBody::Instr(Instr { opcode, operands }) })
        }
        Some(Ok(_)) => Err(ParseErr::new(ErrorKind::Syntax, "expected a directive or instruction")),
    }
}

fn parse_operands(lx: &mut Lexer<'_, Token>) -> Result<Vec<Operand>, ParseErr> {
    let mut operands = vec![];

    let Some(first) = lx.next() else { return Ok(operands) };
    operands.push(expect_operand(first)?);

    while let Some(tok) = lx.next() {
        match tok {
            Ok(Token::Comma) => {}
            Err(e) => return Err(e.into()),
            Ok(_) => return Err(ParseErr::new(ErrorKind::Syntax, "expected comma between operands")),
        }
        match lx.next() {
            None => return Err(ParseErr::new(ErrorKind::Syntax, "trailing comma after operand")),
            Some(tok) => operands.push(expect_operand(tok)?),
        }
    }
    Ok(operands)
}
fn expect_operand(tok: Result<Token, LexErr>) -> Result<Operand, ParseErr> {
    match tok {
        Ok(Token::Imm(n)) => Ok(Operand::Imm(n)),
        Ok(Token::Ident(s)) => Ok(Operand::Direct(s)),
        Ok(Token::RelLabel(s)) => Ok(Operand::Relative(s)),
        Ok(Token::Reg(r)) => Ok(Operand::Reg(r)),
        Err(e) => Err(e.into()),
        Ok(_) => Err(ParseErr::new(ErrorKind::Syntax, "expected an operand")),
    }
}
