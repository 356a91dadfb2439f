//! A two-pass assembler for a 24-bit word-oriented instruction set.
//!
//! Compilation of one source file runs through three stages:
//! 1. [`pre::expand`] replaces macro invocations with their bodies,
//!    producing the expanded (`.am`) text.
//! 2. [`asm::Assembler::first_pass`] sizes the code, fills the data
//!    image, and builds the symbol table.
//! 3. [`asm::Assembler::second_pass`] encodes the code image, marks
//!    exported symbols, and records external references.
//!
//! The result is an [`asm::ObjectFile`] whose writers produce the
//! object (`.ob`), entry (`.ent`), and external (`.ext`) artifacts.
//! Diagnostics flow through an [`err::Reporter`] threaded through every
//! stage; assembly of a file fails when the reporter is non-empty.

#![warn(missing_docs)]

pub mod asm;
pub mod ast;
pub mod err;
pub mod parse;
pub mod pre;
pub mod word;
