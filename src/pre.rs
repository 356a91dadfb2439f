//! The macro preprocessor.
//!
//! This is the first stage of the pipeline: it reads the raw `.as` text,
//! collects parameterless macro definitions (`mcro NAME` … `endmcro`),
//! and writes the expanded `.am` text that both assembler passes consume.
//!
//! Keyword tests run against a whitespace-collapsed copy of each line,
//! and macro bodies are stored in that normalized form; every other line
//! is copied through byte-for-byte. An invocation is a line consisting of
//! nothing but a macro's name.
//!
//! Unlike the passes, the preprocessor stops at its first failure: the
//! rest of the file cannot be interpreted without a complete macro table.

use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::fmt;

use crate::err::{ErrorKind, Reporter};
use crate::parse::{is_reserved, is_valid_label, normalize};

/// Start-of-definition keyword.
pub const MACRO_START: &str = "mcro";
/// End-of-definition keyword.
pub const MACRO_END: &str = "endmcro";

/// A macro-specific violation found while building the table.
#[derive(Debug, PartialEq, Eq)]
pub enum MacroErr {
    /// `mcro` with nothing after it.
    MissingName,
    /// The name is not label-shaped or is over-long.
    InvalidName(String),
    /// The name is a directive, keyword, or mnemonic.
    ReservedName(String),
    /// The name is already defined.
    DuplicateName(String),
}
impl fmt::Display for MacroErr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MacroErr::MissingName       => f.write_str("macro definition is missing a name"),
            MacroErr::InvalidName(n)    => write!(f, "invalid macro name: {n}"),
            MacroErr::ReservedName(n)   => write!(f, "macro name is a reserved word: {n}"),
            MacroErr::DuplicateName(n)  => write!(f, "macro already defined: {n}"),
        }
    }
}
impl std::error::Error for MacroErr {}
impl crate::err::Error for MacroErr {
    fn kind(&self) -> ErrorKind {
        ErrorKind::Macro
    }
}

/// The macro table: name to ordered body lines.
///
/// Lives only for the duration of preprocessing; the passes never
/// consult it.
#[derive(Debug, Default)]
pub struct MacroTable {
    macros: HashMap<String, Vec<String>>,
}
impl MacroTable {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Validates a prospective macro name against the dialect and the
    /// names already present.
    pub fn check_name(&self, name: &str) -> Result<(), MacroErr> {
        if name.is_empty() {
            return Err(MacroErr::MissingName);
        }
        if !is_valid_label(name) {
            return Err(MacroErr::InvalidName(name.to_string()));
        }
        if is_reserved(name) {
            return Err(MacroErr::ReservedName(name.to_string()));
        }
        match self.macros.contains_key(name) {
            true  => Err(MacroErr::DuplicateName(name.to_string())),
            false => Ok(()),
        }
    }

    /// Stores a completed macro body under `name`.
    ///
    /// The name is expected to have passed [`MacroTable::check_name`];
    /// a clashing insert leaves the earlier definition in place.
    pub fn insert(&mut self, name: String, body: Vec<String>) {
        if let Entry::Vacant(e) = self.macros.entry(name) {
            e.insert(body);
        }
    }

    /// Looks up a macro body by name.
    pub fn get(&self, name: &str) -> Option<&[String]> {
        self.macros.get(name).map(Vec::as_slice)
    }

    /// Number of macros defined.
    pub fn len(&self) -> usize {
        self.macros.len()
    }
    /// Whether the table holds no macros.
    pub fn is_empty(&self) -> bool {
        self.macros.is_empty()
    }
}

/// Expands all macros in `src`, producing the `.am` text.
///
/// Returns `None` after reporting the first failure; the reporter's line
/// context is kept up to date as input is consumed.
pub fn expand(src: &str, rep: &mut Reporter) -> Option<String> {
    let mut table = MacroTable::new();
    let mut out = String::new();
    // Name and body of the definition currently being read, if any.
    let mut defining: Option<(String, Vec<String>)> = None;

    for (n, raw) in src.lines().enumerate() {
        rep.set_line(n as u32 + 1);
        let norm = normalize(raw, true);

        if norm.starts_with(MACRO_START) {
            if defining.is_some() {
                rep.report(ErrorKind::Syntax, "nested macro definition");
                return None;
            }
            let name = norm[MACRO_START.len()..]
                .trim_start()
                .split(' ')
                .next()
                .unwrap_or("");
            if let Err(e) = table.check_name(name) {
                rep.report_err(&e);
                return None;
            }
            defining = Some((name.to_string(), vec![]));
        } else if norm.starts_with(MACRO_END) {
            match defining.take() {
                Some((name, body)) => table.insert(name, body),
                None => {
                    rep.report(ErrorKind::Syntax, "endmcro outside of a macro definition");
                    return None;
                }
            }
        } else if let Some((_, body)) = &mut defining {
            body.push(norm);
        } else if let Some(body) = table.get(&norm) {
            for line in body {
                out.push_str(line);
                out.push('\n');
            }
        } else {
            out.push_str(raw);
            out.push('\n');
        }
    }

    if defining.is_some() {
        rep.report(ErrorKind::Syntax, "unterminated macro definition");
        return None;
    }
    Some(out)
}
