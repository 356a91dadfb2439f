//! Statement components shared by both assembler passes.
//!
//! This module holds the pieces a parsed line decomposes into:
//! - [`Opcode`]: the 16 mnemonics of the instruction set, with their
//!   opcode/funct field values and allowed addressing modes
//! - [`Operand`] and [`AddrMode`]: one instruction operand and its
//!   addressing classification
//! - [`Instr`]: an opcode with its operand list, which knows how many
//!   words it occupies and whether its operands are legal
//!
//! The same [`Instr`] value drives sizing in the first pass and encoding
//! in the second, so the two passes cannot disagree about layout.

use std::fmt;

use crate::err::ErrorKind;

macro_rules! opcode_enum {
    ($($Variant:ident: $name:literal => ($code:literal, $funct:literal)),+ $(,)?) => {
        /// An opcode mnemonic.
        ///
        /// Mnemonics are lowercase and case-sensitive; `MOV` is a plain
        /// identifier (and therefore a symbol reference), not an opcode.
        #[derive(Debug, Clone, Copy, PartialEq, Eq)]
        pub enum Opcode {
            $(
                #[allow(missing_docs)]
                $Variant
            ),+
        }

        impl Opcode {
            /// Looks up a mnemonic, returning `None` for anything that is
            /// not one of the 16 instruction names.
            pub fn from_name(name: &str) -> Option<Self> {
                match name {
                    $($name => Some(Self::$Variant),)+
                    _ => None,
                }
            }

            /// The 6-bit opcode field value.
            pub fn code(self) -> u32 {
                match self {
                    $(Self::$Variant => $code),+
                }
            }

            /// The 5-bit funct field value (0 for opcodes without one).
            pub fn funct(self) -> u32 {
                match self {
                    $(Self::$Variant => $funct),+
                }
            }
        }

        impl fmt::Display for Opcode {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                match self {
                    $(Self::$Variant => f.write_str($name)),+
                }
            }
        }
    };
}
opcode_enum! {
    Mov:  "mov"  => (0, 0),
    Cmp:  "cmp"  => (1, 0),
    Add:  "add"  => (2, 1),
    Sub:  "sub"  => (2, 2),
    Lea:  "lea"  => (4, 0),
    Clr:  "clr"  => (5, 1),
    Not:  "not"  => (5, 2),
    Inc:  "inc"  => (5, 3),
    Dec:  "dec"  => (5, 4),
    Jmp:  "jmp"  => (9, 1),
    Bne:  "bne"  => (9, 2),
    Jsr:  "jsr"  => (9, 3),
    Red:  "red"  => (12, 0),
    Prn:  "prn"  => (13, 0),
    Rts:  "rts"  => (14, 0),
    Stop: "stop" => (15, 0),
}

const ANY: &[AddrMode] = &[AddrMode::Immediate, AddrMode::Direct, AddrMode::Register];
const STORE: &[AddrMode] = &[AddrMode::Direct, AddrMode::Register];
const JUMP: &[AddrMode] = &[AddrMode::Direct, AddrMode::Relative];

impl Opcode {
    /// Allowed addressing modes for the source operand,
    /// or `None` when the opcode takes no source operand.
    pub fn src_modes(self) -> Option<&'static [AddrMode]> {
        match self {
            Opcode::Mov | Opcode::Cmp | Opcode::Add | Opcode::Sub => Some(ANY),
            Opcode::Lea => Some(&[AddrMode::Direct]),
            _ => None,
        }
    }

    /// Allowed addressing modes for the destination operand,
    /// or `None` when the opcode takes no operands at all.
    pub fn dst_modes(self) -> Option<&'static [AddrMode]> {
        match self {
            Opcode::Mov | Opcode::Add | Opcode::Sub => Some(STORE),
            Opcode::Cmp | Opcode::Prn => Some(ANY),
            Opcode::Lea => Some(STORE),
            Opcode::Clr | Opcode::Not | Opcode::Inc | Opcode::Dec | Opcode::Red => Some(STORE),
            Opcode::Jmp | Opcode::Bne | Opcode::Jsr => Some(JUMP),
            Opcode::Rts | Opcode::Stop => None,
        }
    }

    /// How many operands the opcode takes (0, 1, or 2).
    pub fn operand_count(self) -> usize {
        self.src_modes().is_some() as usize + self.dst_modes().is_some() as usize
    }
}

/// Addressing classification of one operand.
///
/// The discriminants are the 2-bit mode field values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddrMode {
    /// A literal value (`#n`).
    Immediate = 0,
    /// A symbol reference resolved to an address (`LABEL`).
    Direct = 1,
    /// A jump distance from the instruction (`&LABEL`).
    Relative = 2,
    /// A register (`@r0`-`@r7`).
    Register = 3,
}
impl AddrMode {
    /// The 2-bit mode field value.
    pub fn code(self) -> u32 {
        self as u32
    }
}
impl fmt::Display for AddrMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AddrMode::Immediate => f.write_str("immediate"),
            AddrMode::Direct    => f.write_str("direct"),
            AddrMode::Relative  => f.write_str("relative"),
            AddrMode::Register  => f.write_str("register"),
        }
    }
}

/// One instruction operand.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operand {
    /// `#n` — the value itself.
    Imm(i32),
    /// `LABEL` — the address of a symbol.
    Direct(String),
    /// `&LABEL` — the distance to a symbol.
    Relative(String),
    /// `@rN` — a register.
    Reg(u8),
}
impl Operand {
    /// The addressing mode this operand uses.
    pub fn mode(&self) -> AddrMode {
        match self {
            Operand::Imm(_)      => AddrMode::Immediate,
            Operand::Direct(_)   => AddrMode::Direct,
            Operand::Relative(_) => AddrMode::Relative,
            Operand::Reg(_)      => AddrMode::Register,
        }
    }

    /// The register number carried in the first word (0 for non-registers).
    pub fn reg(&self) -> u32 {
        match *self {
            Operand::Reg(r) => u32::from(r),
            _ => 0,
        }
    }

    /// Whether the operand occupies an extra word after the first.
    pub fn takes_word(&self) -> bool {
        !matches!(self, Operand::Reg(_))
    }
}
impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operand::Imm(n)      => write!(f, "#{n}"),
            Operand::Direct(s)   => f.write_str(s),
            Operand::Relative(s) => write!(f, "&{s}"),
            Operand::Reg(r)      => write!(f, "@r{r}"),
        }
    }
}

/// An instruction statement: an opcode and its operands, in source order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Instr {
    /// The mnemonic.
    pub opcode: Opcode,
    /// Up to two operands; for two-operand forms the first is the source.
    pub operands: Vec<Operand>,
}
impl Instr {
    /// The source operand, present only for two-operand forms.
    pub fn src(&self) -> Option<&Operand> {
        (self.operands.len() == 2).then(|| &self.operands[0])
    }
    /// The destination operand: the last operand, when there is one.
    pub fn dst(&self) -> Option<&Operand> {
        self.operands.last()
    }

    /// How many machine words the instruction occupies:
    /// the first word plus one per non-register operand.
    pub fn words(&self) -> u32 {
        1 + self.operands.iter().filter(|op| op.takes_word()).count() as u32
    }

    /// Checks operand count and addressing-mode legality.
    pub fn validate(&self) -> Result<(), InstrErr> {
        let expected = self.opcode.operand_count();
        if self.operands.len() != expected {
            return Err(InstrErr::WrongOperandCount {
                opcode: self.opcode,
                expected,
                found: self.operands.len(),
            });
        }

        let roles = [
            (self.opcode.src_modes(), self.src(), "source"),
            (self.opcode.dst_modes(), self.dst(), "destination"),
        ];
        for (modes, operand, role) in roles {
            let (Some(modes), Some(operand)) = (modes, operand) else { continue };
            if !modes.contains(&operand.mode()) {
                return Err(InstrErr::BadMode {
                    opcode: self.opcode,
                    role,
                    mode: operand.mode(),
                });
            }
        }
        Ok(())
    }
}

/// An operand-shape violation found while validating an [`Instr`].
#[derive(Debug, PartialEq, Eq)]
pub enum InstrErr {
    /// The operand list is the wrong length for the opcode.
    WrongOperandCount {
        /// The mnemonic in question.
        opcode: Opcode,
        /// How many operands it takes.
        expected: usize,
        /// How many the line supplied.
        found: usize,
    },
    /// An operand uses an addressing mode the opcode does not accept.
    BadMode {
        /// The mnemonic in question.
        opcode: Opcode,
        /// `"source"` or `"destination"`.
        role: &'static str,
        /// The offending mode.
        mode: AddrMode,
    },
}
impl fmt::Display for InstrErr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InstrErr::WrongOperandCount { opcode, expected, found } => {
                write!(f, "{opcode} takes {expected} operand(s), found {found}")
            }
            InstrErr::BadMode { opcode, role, mode } => {
                write!(f, "{opcode} does not accept {mode} addressing for its {role} operand")
            }
        }
    }
}
impl std::error::Error for InstrErr {}
impl crate::err::Error for InstrErr {
    fn kind(&self) -> ErrorKind {
        ErrorKind::Instruction
    }
}

#[cfg(test)]
mod test {
    use super::{AddrMode, Instr, InstrErr, Opcode, Operand};

    #[test]
    fn mnemonic_lookup_is_case_sensitive() {
        assert_eq!(Opcode::from_name("mov"), Some(Opcode::Mov));
        assert_eq!(Opcode::from_name("MOV"), None);
        assert_eq!(Opcode::from_name("movs"), None);
    }

    #[test]
    fn opcode_and_funct_fields() {
        assert_eq!((Opcode::Mov.code(), Opcode::Mov.funct()), (0, 0));
        assert_eq!((Opcode::Sub.code(), Opcode::Sub.funct()), (2, 2));
        assert_eq!((Opcode::Jsr.code(), Opcode::Jsr.funct()), (9, 3));
        assert_eq!((Opcode::Stop.code(), Opcode::Stop.funct()), (15, 0));
    }

    #[test]
    fn sizing_counts_non_register_operands() {
        let i = Instr {
            opcode: Opcode::Mov,
            operands: vec![Operand::Reg(1), Operand::Reg(2)],
        };
        assert_eq!(i.words(), 1);

        let i = Instr {
            opcode: Opcode::Mov,
            operands: vec![Operand::Imm(5), Operand::Direct("X".to_string())],
        };
        assert_eq!(i.words(), 3);

        let i = Instr { opcode: Opcode::Stop, operands: vec![] };
        assert_eq!(i.words(), 1);
    }

    #[test]
    fn validation_checks_count_and_modes() {
        let i = Instr { opcode: Opcode::Mov, operands: vec![Operand::Reg(1)] };
        assert_eq!(
            i.validate(),
            Err(InstrErr::WrongOperandCount { opcode: Opcode::Mov, expected: 2, found: 1 })
        );

        // mov cannot store into an immediate.
        let i = Instr {
            opcode: Opcode::Mov,
            operands: vec![Operand::Reg(1), Operand::Imm(3)],
        };
        assert_eq!(
            i.validate(),
            Err(InstrErr::BadMode { opcode: Opcode::Mov, role: "destination", mode: AddrMode::Immediate })
        );

        // cmp may compare against an immediate.
        let i = Instr {
            opcode: Opcode::Cmp,
            operands: vec![Operand::Reg(1), Operand::Imm(3)],
        };
        assert_eq!(i.validate(), Ok(()));

        // jumps take direct or relative targets, not registers.
        let i = Instr { opcode: Opcode::Jmp, operands: vec![Operand::Reg(2)] };
        assert!(matches!(i.validate(), Err(InstrErr::BadMode { .. })));
        let i = Instr { opcode: Opcode::Jmp, operands: vec![Operand::Relative("L".to_string())] };
        assert_eq!(i.validate(), Ok(()));

        // lea's source must be a direct symbol.
        let i = Instr {
            opcode: Opcode::Lea,
            operands: vec![Operand::Imm(1), Operand::Reg(0)],
        };
        assert!(matches!(i.validate(), Err(InstrErr::BadMode { role: "source", .. })));
    }
}
