//! Tokenizing one line of assembly.
//!
//! The dialect is line-oriented, so the lexer only ever sees a single
//! line that has already had its comment stripped. The module's key data
//! structure is the [`Token`] enum, which lists the units a line can be
//! built from: an optional leading label, a dot-directive, and either
//! directive arguments or instruction operands.
//!
//! Labels are only labels when the colon is *adjacent* to the identifier
//! (`LOOP:` yes, `LOOP :` no); the regex encodes that, so a bare
//! identifier never has to be un-read.

use std::num::IntErrorKind;

use logos::{Lexer, Logos};

use crate::err::ErrorKind;
use crate::word::{MAX_CONTENT, MIN_CONTENT};

/// A unit of information in one source line.
#[derive(Debug, Logos, PartialEq, Eq, Clone)]
#[logos(skip r"[ \t]+", error = LexErr)]
pub enum Token {
    /// A label definition: an identifier with its terminating `:` attached
    /// (e.g., `LOOP:`). The colon is not part of the carried name.
    #[regex(r"[A-Za-z][A-Za-z0-9_]*:", |lx| { let s = lx.slice(); s[..s.len() - 1].to_string() })]
    Label(String),

    /// A directive token (e.g., `.data`, `.string`), without the dot.
    #[regex(r"\.[A-Za-z][A-Za-z0-9_]*", |lx| lx.slice()[1..].to_string())]
    Directive(String),

    /// An optionally signed decimal integer (e.g., `7`, `-3`, `+42`),
    /// as found in `.data` argument lists.
    #[regex(r"[-+]?\d+", lex_int)]
    Int(i32),

    /// An immediate operand (e.g., `#5`, `#-12`).
    #[regex(r"#[-+]?\w*", lex_imm)]
    Imm(i32),

    /// A relative operand (e.g., `&LOOP`), without the ampersand.
    #[regex(r"&\w*", lex_rel)]
    RelLabel(String),

    /// A register operand (i.e., `@r0`-`@r7`).
    #[regex(r"@\w*", lex_reg)]
    Reg(u8),

    /// A bare identifier: an opcode mnemonic or a direct symbol reference.
    #[regex(r"[A-Za-z][A-Za-z0-9_]*", |lx| lx.slice().to_string())]
    Ident(String),

    /// A comma, which delineates data values and instruction operands.
    #[token(",")]
    Comma,
}

/// Any errors raised in attempting to tokenize a line.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Default)]
pub enum LexErr {
    /// Numeric literal cannot fit within the signed 21-bit content range.
    DoesNotFitWord,
    /// Numeric literal has invalid digits (i.e., not 0-9).
    InvalidNumeric,
    /// Numeric prefix with no digits after it (just `#` or `#-`).
    EmptyNumeric,
    /// Token had the register prefix, but what follows isn't r0-r7.
    InvalidReg,
    /// Token had the relative prefix, but what follows isn't a label.
    InvalidLabel,
    /// A symbol was used which does not occur in any token of the dialect.
    #[default]
    InvalidSymbol,
}
impl std::fmt::Display for LexErr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LexErr::DoesNotFitWord => f.write_str("numeric value out of range"),
            LexErr::InvalidNumeric => f.write_str("invalid decimal literal"),
            LexErr::EmptyNumeric   => f.write_str("missing digits in numeric literal"),
            LexErr::InvalidReg     => f.write_str("invalid register"),
            LexErr::InvalidLabel   => f.write_str("invalid label reference"),
            LexErr::InvalidSymbol  => f.write_str("unrecognized symbol"),
        }
    }
}
impl std::error::Error for LexErr {}
impl crate::err::Error for LexErr {
    fn kind(&self) -> ErrorKind {
        match self {
            LexErr::DoesNotFitWord => ErrorKind::Range,
            _ => ErrorKind::Syntax,
        }
    }
    fn help(&self) -> Option<std::borrow::Cow<str>> {
        match self {
            LexErr::DoesNotFitWord => Some(format!("the content range is [{MIN_CONTENT}, {MAX_CONTENT}]").into()),
            LexErr::InvalidNumeric => Some("a decimal literal only consists of digits 0-9".into()),
            LexErr::EmptyNumeric   => Some("there should be digits (0-9) here".into()),
            LexErr::InvalidReg     => Some("this must be @r0-@r7".into()),
            LexErr::InvalidLabel   => Some("a label starts with a letter and continues with letters, digits, or underscores".into()),
            LexErr::InvalidSymbol  => None,
        }
    }
}

/// Parses a decimal literal, rejecting anything outside the content range.
fn parse_ranged(src: &str) -> Result<i32, LexErr> {
    let n = src.parse::<i64>().map_err(|e| match e.kind() {
        IntErrorKind::Empty | IntErrorKind::InvalidDigit if src == "-" || src == "+" || src.is_empty() => LexErr::EmptyNumeric,
        IntErrorKind::InvalidDigit => LexErr::InvalidNumeric,
        IntErrorKind::PosOverflow | IntErrorKind::NegOverflow => LexErr::DoesNotFitWord,
        _ => LexErr::InvalidNumeric,
    })?;

    match (MIN_CONTENT as i64..=MAX_CONTENT as i64).contains(&n) {
        true  => Ok(n as i32),
        false => Err(LexErr::DoesNotFitWord),
    }
}

fn lex_int(lx: &Lexer<'_, Token>) -> Result<i32, LexErr> {
    parse_ranged(lx.slice())
}
fn lex_imm(lx: &Lexer<'_, Token>) -> Result<i32, LexErr> {
    let Some(digits) = lx.slice().strip_prefix('#') else {
        unreachable!("lexer slice should have contained a #");
    };
    parse_ranged(digits)
}
fn lex_rel(lx: &Lexer<'_, Token>) -> Result<String, LexErr> {
    let Some(label) = lx.slice().strip_prefix('&') else {
        unreachable!("lexer slice should have contained a &");
    };
    match super::is_valid_label(label) {
        true  => Ok(label.to_string()),
        false => Err(LexErr::InvalidLabel),
    }
}
fn lex_reg(lx: &Lexer<'_, Token>) -> Result<u8, LexErr> {
    lx.slice()
        .strip_prefix("@r")
        .and_then(|n| n.parse::<u8>().ok())
        .filter(|&r| r < 8)
        .ok_or(LexErr::InvalidReg)
}
