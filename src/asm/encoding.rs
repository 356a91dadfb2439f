//! Writing an object product to its output artifacts.
//!
//! Three writers, one per suffix:
//! - `.ob` — the object listing: a `<IC> <DC>` header, then one line per
//!   word with its absolute address and packed hex value
//! - `.ent` — exported symbols, in symbol-table order
//! - `.ext` — external references, in use-site order
//!
//! Addresses print as zero-padded 4-digit decimal; words use the
//! 6-digit uppercase hex encoding of the machine word.

use std::io::{self, Write};

use super::{ObjectFile, BASE_ADDRESS};

impl ObjectFile {
    /// Writes the `.ob` artifact: header, code block, then data block.
    pub fn write_object(&self, out: &mut impl Write) -> io::Result<()> {
        writeln!(out, "{} {}", self.ic, self.dc)?;

        for (i, word) in self.code.iter().enumerate() {
            writeln!(out, "{:04} {}", BASE_ADDRESS + i as u32, word.to_hex())?;
        }
        // Data addresses continue where the code block ends.
        for (i, word) in self.data.iter().enumerate() {
            writeln!(out, "{:04} {}", BASE_ADDRESS + self.ic + i as u32, word.to_hex())?;
        }
        Ok(())
    }

    /// Writes the `.ent` artifact: one `<name> <address>` line per entry.
    pub fn write_entries(&self, out: &mut impl Write) -> io::Result<()> {
        for (name, value) in &self.entries {
            writeln!(out, "{name} {value:04}")?;
        }
        Ok(())
    }

    /// Writes the `.ext` artifact: one `<name> <address>` line per
    /// recorded external reference.
    pub fn write_externals(&self, out: &mut impl Write) -> io::Result<()> {
        for ext in &self.externals {
            writeln!(out, "{} {:04}", ext.name, ext.address)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use crate::asm::assemble;
    use crate::err::Reporter;

    fn render(src: &str) -> (String, String, String) {
        let mut rep = Reporter::new();
        let obj = assemble(src, &mut rep).unwrap_or_else(|| panic!("{:?}", rep.diagnostics()));

        let (mut ob, mut ent, mut ext) = (vec![], vec![], vec![]);
        obj.write_object(&mut ob).unwrap();
        obj.write_entries(&mut ent).unwrap();
        obj.write_externals(&mut ext).unwrap();
        (
            String::from_utf8(ob).unwrap(),
            String::from_utf8(ent).unwrap(),
            String::from_utf8(ext).unwrap(),
        )
    }

    #[test]
    fn object_lists_data_after_header() {
        let (ob, ent, ext) = render("LEN: .data 7, -3, 42\n");
        // 7, -3, and 42 as absolute words: (content << 3) | 4.
        assert_eq!(ob, "0 3\n0100 00003C\n0101 FFFFEC\n0102 000154\n");
        assert_eq!(ent, "");
        assert_eq!(ext, "");
    }

    #[test]
    fn object_addresses_continue_across_blocks() {
        let (ob, _, _) = render("stop\nV: .data 1\n");
        let lines: Vec<_> = ob.lines().collect();
        assert_eq!(lines[0], "1 1");
        // stop: opcode 15 in the top six content bits.
        assert_eq!(lines[1], format!("0100 {:06X}", (15u32 << 15) << 3 | 4));
        assert_eq!(lines[2], format!("0101 {:06X}", (1u32 << 3) | 4));
    }

    #[test]
    fn entry_and_extern_listings() {
        let src = "\
.extern UP
MAIN: prn UP
      stop
.entry MAIN
";
        let (ob, ent, ext) = render(src);
        assert!(ob.starts_with("3 0\n"));
        assert_eq!(ent, "MAIN 0100\n");
        // prn's operand word sits one past the first word of MAIN.
        assert_eq!(ext, "UP 0101\n");
    }
}
