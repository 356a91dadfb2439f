//! Assembling expanded source into an object image.
//!
//! This module drives the two passes over the preprocessed (`.am`) text:
//! - the first pass sizes every instruction, fills the data image, and
//!   builds the [`SymbolTable`]
//! - the second pass encodes the code image against the now-complete
//!   table, marks `.entry` symbols, and records every use of an `.extern`
//!   symbol
//!
//! The passes share one [`Assembler`] value per source file. Both passes
//! keep going after recoverable errors so that a single run surfaces as
//! many diagnostics as possible; the file fails if any were reported.
//!
//! The assembler module notably consists of:
//! - [`Assembler`]: the per-file state and the two passes
//! - [`SymbolTable`]: the name/address bindings collected in pass one
//! - [`ObjectFile`]: the finished product handed to the emitter

pub mod encoding;

use std::fmt;

use crate::ast::{Instr, Operand};
use crate::err::{ErrorKind, Reporter};
use crate::parse::{
    is_valid_label, normalize, parse_data_values, parse_line, parse_string_value,
    remove_comment, LineBody, MAX_LINE_LENGTH,
};
use crate::word::{Are, MachineWord};

/// Absolute address of the first code word; data follows the code block.
pub const BASE_ADDRESS: u32 = 100;

/// Classification of a [`Symbol`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SymKind {
    /// Defined by a label on an instruction line.
    Code,
    /// Defined by a label on a `.data`/`.string` line.
    Data,
    /// Declared by `.extern`; defined elsewhere, value 0.
    Extern,
    /// Added directly as an exported name.
    Entry,
}

/// A named address binding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Symbol {
    /// The symbol's name. The table owns the storage.
    pub name: String,
    /// Its address (or 0 for externs). Data symbols hold a data-relative
    /// offset until the first pass finalizes them.
    pub value: i32,
    /// What defined it.
    pub kind: SymKind,
    /// Whether `.entry` exported it.
    pub entry: bool,
}

/// Error from operating on the symbol table.
#[derive(Debug, PartialEq, Eq)]
pub enum SymErr {
    /// The name is already bound.
    Duplicate(String),
    /// The name is not bound.
    NotFound(String),
    /// An extern symbol was (or would be) marked as entry.
    ExternEntry(String),
}
impl fmt::Display for SymErr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SymErr::Duplicate(n)   => write!(f, "Symbol already exists: {n}"),
            SymErr::NotFound(n)    => write!(f, "Symbol not found: {n}"),
            SymErr::ExternEntry(n) => write!(f, "Symbol cannot be both extern and entry: {n}"),
        }
    }
}
impl std::error::Error for SymErr {}
impl crate::err::Error for SymErr {
    fn kind(&self) -> ErrorKind {
        ErrorKind::Symbol
    }
}

/// The symbol table built by the first assembler pass.
///
/// Names are unique; iteration follows insertion order. The table lives
/// for exactly one source file.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct SymbolTable {
    symbols: Vec<Symbol>,
}
impl SymbolTable {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    fn find(&self, name: &str) -> Option<usize> {
        self.symbols.iter().position(|s| s.name == name)
    }

    /// Binds `name` to `value`, failing on a duplicate.
    ///
    /// Adding with [`SymKind::Entry`] sets the entry flag immediately.
    pub fn add(&mut self, name: &str, value: i32, kind: SymKind) -> Result<(), SymErr> {
        if self.find(name).is_some() {
            return Err(SymErr::Duplicate(name.to_string()));
        }
        self.symbols.push(Symbol {
            name: name.to_string(),
            value,
            kind,
            entry: kind == SymKind::Entry,
        });
        Ok(())
    }

    /// The value bound to `name`, if any.
    pub fn get(&self, name: &str) -> Option<i32> {
        self.lookup(name).map(|s| s.value)
    }

    /// The full record bound to `name`, if any.
    pub fn lookup(&self, name: &str) -> Option<&Symbol> {
        self.find(name).map(|i| &self.symbols[i])
    }

    /// Rebinds `name` to a new value.
    pub fn update(&mut self, name: &str, value: i32) -> Result<(), SymErr> {
        match self.find(name) {
            Some(i) => {
                self.symbols[i].value = value;
                Ok(())
            }
            None => Err(SymErr::NotFound(name.to_string())),
        }
    }

    /// Sets the entry flag on `name`; externs cannot be exported.
    pub fn mark_entry(&mut self, name: &str) -> Result<(), SymErr> {
        match self.find(name) {
            Some(i) if self.symbols[i].kind == SymKind::Extern => {
                Err(SymErr::ExternEntry(name.to_string()))
            }
            Some(i) => {
                self.symbols[i].entry = true;
                Ok(())
            }
            None => Err(SymErr::NotFound(name.to_string())),
        }
    }

    /// Shifts every data symbol by `ic`, turning data-relative offsets
    /// into absolute addresses once the code size is known.
    pub fn adjust_data_addresses(&mut self, ic: i32) {
        for sym in &mut self.symbols {
            if sym.kind == SymKind::Data {
                sym.value += ic;
            }
        }
    }

    /// Checks that no symbol is simultaneously extern and entry.
    pub fn validate(&self) -> Result<(), SymErr> {
        match self.symbols.iter().find(|s| s.kind == SymKind::Extern && s.entry) {
            Some(sym) => Err(SymErr::ExternEntry(sym.name.clone())),
            None => Ok(()),
        }
    }

    /// Number of symbols in the table.
    pub fn len(&self) -> usize {
        self.symbols.len()
    }
    /// Whether the table is empty.
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }
    /// Iterates over the symbols in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, Symbol> {
        self.symbols.iter()
    }
}
impl<'t> IntoIterator for &'t SymbolTable {
    type Item = &'t Symbol;
    type IntoIter = std::slice::Iter<'t, Symbol>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// One recorded use of an external symbol.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtRef {
    /// The extern symbol's name.
    pub name: String,
    /// Absolute address of the word that references it.
    pub address: u32,
}

/// The assembler! Runs the two passes and accumulates the images.
#[derive(Debug)]
pub struct Assembler<'s> {
    /// The expanded source being assembled.
    src: &'s str,
    sym: SymbolTable,
    code: Vec<MachineWord>,
    data: Vec<MachineWord>,
    ic: u32,
    dc: u32,
    externals: Vec<ExtRef>,
}
impl<'s> Assembler<'s> {
    /// Creates an assembler over preprocessed source text.
    pub fn new(src: &'s str) -> Self {
        Self {
            src,
            sym: SymbolTable::new(),
            code: vec![],
            data: vec![],
            ic: 0,
            dc: 0,
            externals: vec![],
        }
    }

    /// The symbol table in its current state.
    pub fn symbols(&self) -> &SymbolTable {
        &self.sym
    }
    /// Words in the code image so far.
    pub fn ic(&self) -> u32 {
        self.ic
    }
    /// Words in the data image so far.
    pub fn dc(&self) -> u32 {
        self.dc
    }
    /// The data image.
    pub fn data_image(&self) -> &[MachineWord] {
        &self.data
    }
    /// The code image.
    pub fn code_image(&self) -> &[MachineWord] {
        &self.code
    }

    fn add_symbol(&mut self, rep: &mut Reporter, name: &str, value: i32, kind: SymKind) {
        if let Err(e) = self.sym.add(name, value, kind) {
            rep.report_err(&e);
        }
    }

    /// Runs the first pass: builds the symbol table and the data image,
    /// and counts how many words the code image will need.
    ///
    /// Returns whether the pass completed without reporting anything.
    pub fn first_pass(&mut self, rep: &mut Reporter) -> bool {
        let before = rep.error_count();

        for (n, raw) in self.src.lines().enumerate() {
            rep.set_line(n as u32 + 1);

            if raw.len() > MAX_LINE_LENGTH {
                rep.report(ErrorKind::Syntax, format!("line exceeds {MAX_LINE_LENGTH} characters"));
                continue;
            }
            let line = normalize(remove_comment(raw), true);
            if line.is_empty() {
                continue;
            }

            let parsed = match parse_line(&line) {
                Ok(parsed) => parsed,
                Err(e) => {
                    rep.report_err(&e);
                    continue;
                }
            };
            let label = match parsed.label {
                Some(name) if !is_valid_label(&name) => {
                    rep.report(ErrorKind::Syntax, format!("invalid label: {name}"));
                    None
                }
                other => other,
            };

            match parsed.body {
                LineBody::Empty => {
                    rep.report(ErrorKind::Syntax, "label with no statement");
                }
                LineBody::Directive { name, args } => match name.as_str() {
                    "data" => match parse_data_values(&args) {
                        Ok(values) => {
                            if let Some(label) = label {
                                self.add_symbol(rep, &label, self.dc as i32, SymKind::Data);
                            }
                            for value in values {
                                self.data.push(MachineWord::new(value, Are::Absolute));
                                self.dc += 1;
                            }
                        }
                        Err(e) => rep.report_err(&e),
                    },
                    "string" => match parse_string_value(&args) {
                        Ok(bytes) => {
                            if let Some(label) = label {
                                self.add_symbol(rep, &label, self.dc as i32, SymKind::Data);
                            }
                            for byte in bytes {
                                self.data.push(MachineWord::new(i32::from(byte), Are::Absolute));
                                self.dc += 1;
                            }
                        }
                        Err(e) => rep.report_err(&e),
                    },
                    "extern" => {
                        // A label prefix on an .extern line is ignored.
                        let name = args.trim();
                        if is_valid_label(name) {
                            self.add_symbol(rep, name, 0, SymKind::Extern);
                        } else {
                            rep.report(ErrorKind::Syntax, format!("invalid extern name: {name}"));
                        }
                    }
                    // .entry is resolved in the second pass, once the table is complete.
                    "entry" => {}
                    other => rep.report(ErrorKind::Syntax, format!("unknown directive: .{other}")),
                },
                LineBody::Instr(instr) => {
                    if let Some(label) = label {
                        self.add_symbol(rep, &label, (BASE_ADDRESS + self.ic) as i32, SymKind::Code);
                    }
                    match instr.validate() {
                        Ok(()) => self.ic += instr.words(),
                        Err(e) => rep.report_err(&e),
                    }
                }
            }
        }

        // Data sits right after the code block; its symbols become absolute.
        self.sym.adjust_data_addresses((BASE_ADDRESS + self.ic) as i32);
        if let Err(e) = self.sym.validate() {
            rep.report_err(&e);
        }

        rep.error_count() == before
    }

    /// Runs the second pass: encodes the code image, marks `.entry`
    /// symbols, and records external references at their use sites.
    ///
    /// Expects a successful first pass over the same source.
    pub fn second_pass(&mut self, rep: &mut Reporter) -> bool {
        let before = rep.error_count();
        self.ic = 0;

        for (n, raw) in self.src.lines().enumerate() {
            rep.set_line(n as u32 + 1);

            let line = normalize(remove_comment(raw), true);
            if line.is_empty() {
                continue;
            }
            // Anything unparseable was already reported in the first pass.
            let Ok(parsed) = parse_line(&line) else { continue };

            match parsed.body {
                LineBody::Directive { name, args } if name == "entry" => {
                    if let Err(e) = self.sym.mark_entry(args.trim()) {
                        rep.report_err(&e);
                    }
                }
                LineBody::Instr(instr) => self.encode_instr(&instr, rep),
                LineBody::Directive { .. } | LineBody::Empty => {}
            }
        }

        if let Err(e) = self.sym.validate() {
            rep.report_err(&e);
        }

        rep.error_count() == before
    }

    fn push_code(&mut self, word: MachineWord) {
        self.code.push(word);
        self.ic += 1;
    }

    fn encode_instr(&mut self, instr: &Instr, rep: &mut Reporter) {
        let first_addr = BASE_ADDRESS + self.ic;

        let mut content = instr.opcode.code() << 15 | instr.opcode.funct();
        if let Some(op) = instr.src() {
            content |= op.mode().code() << 13 | op.reg() << 10;
        }
        if let Some(op) = instr.dst() {
            content |= op.mode().code() << 8 | op.reg() << 5;
        }
        self.push_code(MachineWord::new(content as i32, Are::Absolute));

        for op in &instr.operands {
            match op {
                Operand::Reg(_) => {}
                Operand::Imm(n) => self.push_code(MachineWord::new(*n, Are::Absolute)),
                Operand::Direct(name) => {
                    let word_addr = BASE_ADDRESS + self.ic;
                    let target = self.sym.lookup(name).map(|s| (s.value, s.kind));
                    match target {
                        None => {
                            rep.report_err(&SymErr::NotFound(name.clone()));
                            self.push_code(MachineWord::new(0, Are::Absolute));
                        }
                        Some((_, SymKind::Extern)) => {
                            self.externals.push(ExtRef { name: name.clone(), address: word_addr });
                            self.push_code(MachineWord::new(0, Are::External));
                        }
                        Some((value, _)) => {
                            self.push_code(MachineWord::new(value, Are::Relocatable));
                        }
                    }
                }
                Operand::Relative(name) => {
                    let target = self.sym.lookup(name).map(|s| (s.value, s.kind));
                    match target {
                        None => {
                            rep.report_err(&SymErr::NotFound(name.clone()));
                            self.push_code(MachineWord::new(0, Are::Absolute));
                        }
                        Some((_, SymKind::Extern)) => {
                            // The distance to an extern is unknowable here.
                            rep.report(
                                ErrorKind::Instruction,
                                format!("relative reference to external symbol: {name}"),
                            );
                            self.push_code(MachineWord::new(0, Are::Absolute));
                        }
                        Some((value, _)) => {
                            let distance = value - first_addr as i32;
                            self.push_code(MachineWord::new(distance, Are::Absolute));
                        }
                    }
                }
            }
        }
    }

    /// Consumes the assembler, producing the finished [`ObjectFile`].
    pub fn into_object(self) -> ObjectFile {
        let entries = self
            .sym
            .iter()
            .filter(|s| s.entry)
            .map(|s| (s.name.clone(), s.value))
            .collect();

        ObjectFile {
            ic: self.ic,
            dc: self.dc,
            code: self.code,
            data: self.data,
            entries,
            externals: self.externals,
        }
    }
}

/// Runs both passes over expanded source text.
///
/// Returns the object product, or `None` once either pass has reported
/// errors (the reporter holds the details).
pub fn assemble(src: &str, rep: &mut Reporter) -> Option<ObjectFile> {
    let mut asm = Assembler::new(src);
    if !asm.first_pass(rep) {
        return None;
    }
    if !asm.second_pass(rep) {
        return None;
    }
    Some(asm.into_object())
}

/// The finished product of the two passes.
///
/// The writers that turn this into the `.ob`/`.ent`/`.ext` artifacts
/// live in [`encoding`].
#[derive(Debug, PartialEq, Eq)]
pub struct ObjectFile {
    /// Number of code words.
    pub ic: u32,
    /// Number of data words.
    pub dc: u32,
    /// The code image, based at [`BASE_ADDRESS`].
    pub code: Vec<MachineWord>,
    /// The data image, laid out immediately after the code.
    pub data: Vec<MachineWord>,
    /// Exported symbols and their final addresses, in table order.
    pub entries: Vec<(String, i32)>,
    /// External references, in use-site order.
    pub externals: Vec<ExtRef>,
}

#[cfg(test)]
mod test {
    use crate::err::{ErrorKind, Reporter};
    use crate::word::{Are, MachineWord};

    use super::{assemble, Assembler, ExtRef, SymErr, SymKind, SymbolTable, BASE_ADDRESS};

    #[test]
    fn table_add_get_update() {
        let mut sym = SymbolTable::new();
        sym.add("A", 5, SymKind::Code).unwrap();
        sym.add("B", -1, SymKind::Data).unwrap();

        assert_eq!(sym.get("A"), Some(5));
        // -1 is a legitimate value, not a missing-symbol sentinel.
        assert_eq!(sym.get("B"), Some(-1));
        assert_eq!(sym.get("C"), None);

        assert_eq!(sym.add("A", 9, SymKind::Code), Err(SymErr::Duplicate("A".to_string())));
        assert_eq!(sym.get("A"), Some(5));

        sym.update("A", 9).unwrap();
        assert_eq!(sym.get("A"), Some(9));
        assert_eq!(sym.update("C", 0), Err(SymErr::NotFound("C".to_string())));
    }

    #[test]
    fn table_entry_marking_and_validation() {
        let mut sym = SymbolTable::new();
        sym.add("X", 0, SymKind::Extern).unwrap();
        sym.add("M", 100, SymKind::Code).unwrap();

        assert_eq!(sym.mark_entry("X"), Err(SymErr::ExternEntry("X".to_string())));
        assert_eq!(sym.mark_entry("Q"), Err(SymErr::NotFound("Q".to_string())));
        sym.mark_entry("M").unwrap();
        sym.validate().unwrap();

        // Adding with the entry kind sets the flag up front.
        sym.add("E", 200, SymKind::Entry).unwrap();
        assert!(sym.lookup("E").unwrap().entry);
    }

    #[test]
    fn table_adjusts_only_data_symbols() {
        let mut sym = SymbolTable::new();
        sym.add("C", 100, SymKind::Code).unwrap();
        sym.add("D", 2, SymKind::Data).unwrap();
        sym.add("X", 0, SymKind::Extern).unwrap();

        sym.adjust_data_addresses(105);
        assert_eq!(sym.get("C"), Some(100));
        assert_eq!(sym.get("D"), Some(107));
        assert_eq!(sym.get("X"), Some(0));
    }

    #[test]
    fn table_iterates_in_insertion_order() {
        let mut sym = SymbolTable::new();
        for name in ["Z", "A", "M"] {
            sym.add(name, 0, SymKind::Code).unwrap();
        }
        let names: Vec<_> = sym.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, ["Z", "A", "M"]);
    }

    #[test]
    fn data_line_builds_image_and_symbol() {
        let mut rep = Reporter::new();
        let mut asm = Assembler::new("LEN: .data 7, -3, 42\n");
        assert!(asm.first_pass(&mut rep));

        assert_eq!(asm.ic(), 0);
        assert_eq!(asm.dc(), 3);
        assert_eq!(
            asm.data_image(),
            [
                MachineWord::new(7, Are::Absolute),
                MachineWord::new(-3, Are::Absolute),
                MachineWord::new(42, Are::Absolute),
            ]
        );
        // With no code, LEN lands right at the base address.
        assert_eq!(asm.symbols().get("LEN"), Some(100));
        assert_eq!(asm.symbols().lookup("LEN").unwrap().kind, SymKind::Data);
    }

    #[test]
    fn string_line_is_bytes_plus_terminator() {
        let mut rep = Reporter::new();
        let mut asm = Assembler::new("STR: .string \"ab\"\n");
        assert!(asm.first_pass(&mut rep));

        assert_eq!(asm.dc(), 3);
        let contents: Vec<_> = asm.data_image().iter().map(|w| w.content()).collect();
        assert_eq!(contents, [97, 98, 0]);
        assert_eq!(asm.symbols().get("STR"), Some((BASE_ADDRESS + asm.ic()) as i32));
    }

    #[test]
    fn duplicate_label_keeps_first_definition() {
        let mut rep = Reporter::new();
        let mut asm = Assembler::new("M1: .data 1\nM1: .data 2\n");
        assert!(!asm.first_pass(&mut rep));

        let diag = &rep.diagnostics()[0];
        assert_eq!(diag.kind, ErrorKind::Symbol);
        assert!(diag.message.contains("M1"));
        assert_eq!(diag.line, 2);
        // First binding survives; both values still land in the image.
        assert_eq!(asm.symbols().len(), 1);
        assert_eq!(asm.symbols().get("M1"), Some(100));
    }

    #[test]
    fn entry_of_extern_is_rejected_once() {
        let mut rep = Reporter::new();
        let mut asm = Assembler::new(".extern X\n.entry X\n");
        assert!(asm.first_pass(&mut rep));
        assert!(!asm.second_pass(&mut rep));

        assert_eq!(rep.error_count(), 1);
        assert_eq!(rep.diagnostics()[0].kind, ErrorKind::Symbol);
        assert_eq!(rep.diagnostics()[0].line, 2);
    }

    #[test]
    fn entry_of_unknown_symbol_is_one_error() {
        let mut rep = Reporter::new();
        assert!(assemble(".entry NOWHERE\n", &mut rep).is_none());
        assert_eq!(rep.error_count(), 1);
        assert_eq!(rep.diagnostics()[0].kind, ErrorKind::Symbol);
    }

    #[test]
    fn range_violation_reports_range() {
        let mut rep = Reporter::new();
        assert!(assemble(".data 1048576\n", &mut rep).is_none());
        assert_eq!(rep.diagnostics()[0].kind, ErrorKind::Range);
    }

    #[test]
    fn unknown_directive_reports_syntax() {
        let mut rep = Reporter::new();
        assert!(assemble(".bogus 1\n", &mut rep).is_none());
        assert_eq!(rep.diagnostics()[0].kind, ErrorKind::Syntax);
        assert!(rep.diagnostics()[0].message.contains("bogus"));
    }

    #[test]
    fn over_long_line_reports_syntax() {
        let mut rep = Reporter::new();
        let line = format!("; {}\n", "x".repeat(90));
        assert!(assemble(&line, &mut rep).is_none());
        assert_eq!(rep.diagnostics()[0].kind, ErrorKind::Syntax);
    }

    #[test]
    fn instructions_size_by_addressing_mode() {
        let mut rep = Reporter::new();
        let mut asm = Assembler::new("mov @r1, @r2\nmov #5, @r1\nmov X, Y\nstop\nX: .data 1\nY: .data 2\n");
        assert!(asm.first_pass(&mut rep), "{:?}", rep.diagnostics());
        // 1 + 2 + 3 + 1 words of code.
        assert_eq!(asm.ic(), 7);
    }

    #[test]
    fn recoverable_errors_accumulate() {
        let src = "\
.data 1048576
M1: .data 1
M1: .data 2
.bogus
mov #1
";
        let mut rep = Reporter::new();
        assert!(assemble(src, &mut rep).is_none());

        let kinds: Vec<_> = rep.diagnostics().iter().map(|d| d.kind).collect();
        assert_eq!(
            kinds,
            [ErrorKind::Range, ErrorKind::Symbol, ErrorKind::Syntax, ErrorKind::Instruction]
        );
    }

    #[test]
    fn assembles_a_full_program() {
        let src = "\
.extern W
MAIN: mov #5, @r1
      lea STR, @r2
LOOP: jmp &MAIN
      cmp @r1, W
      stop
STR: .string \"ab\"
LEN: .data 7, -3, 42
.entry MAIN
.entry LEN
";
        let mut rep = Reporter::new();
        let obj = assemble(src, &mut rep).unwrap_or_else(|| panic!("{:?}", rep.diagnostics()));

        assert_eq!(obj.ic, 9);
        assert_eq!(obj.dc, 6);
        assert_eq!(obj.code.len(), 9);
        assert_eq!(obj.data.len(), 6);

        // mov #5, @r1: opcode 0, src immediate, dst register r1.
        assert_eq!(obj.code[0], MachineWord::new((3 << 8) | (1 << 5), Are::Absolute));
        assert_eq!(obj.code[1], MachineWord::new(5, Are::Absolute));
        // lea's source resolves to STR, relocated after the code block.
        assert_eq!(obj.code[3], MachineWord::new(109, Are::Relocatable));
        // jmp &MAIN at address 104 jumps back 4 words.
        assert_eq!(obj.code[5], MachineWord::new(-4, Are::Absolute));
        // cmp's extern operand is an all-zero external word.
        assert_eq!(obj.code[7], MachineWord::new(0, Are::External));

        assert_eq!(
            obj.entries,
            [("MAIN".to_string(), 100), ("LEN".to_string(), 112)]
        );
        assert_eq!(
            obj.externals,
            [ExtRef { name: "W".to_string(), address: 107 }]
        );
    }

    #[test]
    fn relative_reference_to_extern_fails() {
        let mut rep = Reporter::new();
        assert!(assemble(".extern FAR\njmp &FAR\n", &mut rep).is_none());
        assert_eq!(rep.diagnostics()[0].kind, ErrorKind::Instruction);
    }

    #[test]
    fn unresolved_direct_operand_fails() {
        let mut rep = Reporter::new();
        assert!(assemble("prn MISSING\n", &mut rep).is_none());
        assert_eq!(rep.diagnostics()[0].kind, ErrorKind::Symbol);
        assert!(rep.diagnostics()[0].message.contains("MISSING"));
    }
}
