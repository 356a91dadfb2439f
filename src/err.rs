//! Error interfaces for this crate.
//!
//! Every failure surfaced to a user goes through a [`Reporter`]:
//! the passes tag it with the file and line they are currently reading,
//! classify it with an [`ErrorKind`], and the reporter stores the
//! resulting [`Diagnostic`]s in the order they occurred.
//!
//! A reporter lives for exactly one source file. Recoverable errors do not
//! stop a pass; the file as a whole fails if the reporter holds any
//! diagnostics at the end.

use std::borrow::Cow;
use std::fmt;

/// Unified interface for the error values produced inside this crate.
///
/// The [`Display`] implementation is used for the brief message handed to
/// the [`Reporter`], [`Error::kind`] supplies its classification, and
/// [`Error::help`] may add a clarifying message for interactive callers.
///
/// [`Display`]: std::fmt::Display
pub trait Error: std::error::Error {
    /// The classification this error reports under.
    fn kind(&self) -> ErrorKind;

    /// A clarifying message to help aid someone in how to fix the error.
    ///
    /// If there is none to add, this can be left as `None`.
    fn help(&self) -> Option<Cow<str>> {
        None
    }
}

/// Classification of a reported error.
///
/// The set is stable: `Memory`, `Directive`, and `General` are part of the
/// taxonomy even though the current pipeline has no producer for them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// I/O or path errors.
    File,
    /// Allocation failure.
    Memory,
    /// Malformed line, unknown directive, unterminated macro, over-long line.
    Syntax,
    /// Numeric literal outside the 21-bit signed content range.
    Range,
    /// Duplicate definition, missing reference, entry/extern conflicts.
    Symbol,
    /// Reserved for directive-specific violations.
    Directive,
    /// Macro-specific violations.
    Macro,
    /// Bad mnemonic, operand count, or addressing mode.
    Instruction,
    /// Anything else.
    General,
}
impl ErrorKind {
    /// The label used when rendering a diagnostic.
    pub fn label(self) -> &'static str {
        match self {
            ErrorKind::File        => "File",
            ErrorKind::Memory      => "Memory",
            ErrorKind::Syntax      => "Syntax",
            ErrorKind::Range       => "Range",
            ErrorKind::Symbol      => "Symbol",
            ErrorKind::Directive   => "Directive",
            ErrorKind::Macro       => "Macro",
            ErrorKind::Instruction => "Instruction",
            ErrorKind::General     => "General",
        }
    }
}
impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One reported error event, with whatever context was known at report time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// Classification of the event.
    pub kind: ErrorKind,
    /// The file being read when the event was reported, if any.
    pub file: Option<String>,
    /// 1-based line number; 0 when no line applies.
    pub line: u32,
    /// Human-readable description.
    pub message: String,
}
impl fmt::Display for Diagnostic {
    /// Renders as `[Error - <Kind>] in file "<name>" at line <N>: <message>`,
    /// with the file clause dropped when unknown and the line clause dropped
    /// when the line is 0.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[Error - {}]", self.kind)?;
        if let Some(file) = &self.file {
            write!(f, " in file \"{file}\"")?;
        }
        if self.line > 0 {
            write!(f, " at line {}", self.line)?;
        }
        write!(f, ": {}", self.message)
    }
}

/// The diagnostics sink threaded through the preprocessor and both passes.
#[derive(Debug, Default)]
pub struct Reporter {
    file: Option<String>,
    line: u32,
    diags: Vec<Diagnostic>,
}
impl Reporter {
    /// Creates an empty reporter with no file or line context.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the file tagged onto subsequent diagnostics.
    pub fn set_file(&mut self, name: impl Into<String>) {
        self.file = Some(name.into());
    }
    /// Sets the 1-based line tagged onto subsequent diagnostics (0 clears it).
    pub fn set_line(&mut self, line: u32) {
        self.line = line;
    }

    /// Records an error event under the current file/line context.
    pub fn report(&mut self, kind: ErrorKind, message: impl Into<String>) {
        self.diags.push(Diagnostic {
            kind,
            file: self.file.clone(),
            line: self.line,
            message: message.into(),
        });
    }

    /// Records a crate error value under the current file/line context.
    pub fn report_err(&mut self, err: &impl Error) {
        self.report(err.kind(), err.to_string());
    }

    /// Number of diagnostics reported so far.
    pub fn error_count(&self) -> usize {
        self.diags.len()
    }
    /// All diagnostics, in report order.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diags
    }
}

#[cfg(test)]
mod test {
    use super::{ErrorKind, Reporter};

    #[test]
    fn renders_with_full_context() {
        let mut rep = Reporter::new();
        rep.set_file("prog.as");
        rep.set_line(12);
        rep.report(ErrorKind::Symbol, "Symbol already exists: M1");

        let rendered = rep.diagnostics()[0].to_string();
        assert_eq!(
            rendered,
            "[Error - Symbol] in file \"prog.as\" at line 12: Symbol already exists: M1"
        );
    }

    #[test]
    fn suppresses_missing_file_and_line() {
        let mut rep = Reporter::new();
        rep.report(ErrorKind::General, "whoops");
        assert_eq!(rep.diagnostics()[0].to_string(), "[Error - General]: whoops");

        rep.set_file("a.as");
        rep.report(ErrorKind::File, "cannot open");
        assert_eq!(
            rep.diagnostics()[1].to_string(),
            "[Error - File] in file \"a.as\": cannot open"
        );
        assert_eq!(rep.error_count(), 2);
    }
}
