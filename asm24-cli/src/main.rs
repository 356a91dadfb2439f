use std::fs;
use std::io::{self, Write as _};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{ArgAction, Parser};
use color_print::cprintln;

use asm24::asm;
use asm24::err::{ErrorKind, Reporter};
use asm24::pre;

#[derive(Parser)]
#[command(
    name = "assembler",
    version,
    disable_version_flag = true,
    about = "Two-pass assembler for a 24-bit word machine"
)]
struct Args {
    /// Assembly source files (.as).
    #[arg(required = true)]
    files: Vec<PathBuf>,

    /// Print version information.
    #[arg(short = 'v', long = "version", action = ArgAction::Version)]
    version: Option<bool>,
}

fn main() -> ExitCode {
    let Args { files, .. } = Args::parse();

    let mut failures = 0usize;
    for path in &files {
        match process_file(path) {
            Ok(()) => cprintln!("<green,bold>done</>: {}", path.display()),
            Err(()) => {
                failures += 1;
                cprintln!("<red,bold>failed</>: {}", path.display());
            }
        }
    }

    match failures {
        0 => ExitCode::SUCCESS,
        _ => ExitCode::FAILURE,
    }
}

/// Runs the whole pipeline for one source file.
///
/// Each file gets a fresh reporter, so one file's failure never leaks
/// into the next; its diagnostics are printed before returning.
fn process_file(path: &Path) -> Result<(), ()> {
    let mut rep = Reporter::new();
    rep.set_file(path.display().to_string());

    let result = run_pipeline(path, &mut rep);
    for diag in rep.diagnostics() {
        eprintln!("{diag}");
    }
    result
}

fn run_pipeline(path: &Path, rep: &mut Reporter) -> Result<(), ()> {
    if path.extension().map_or(true, |ext| ext != "as") {
        rep.report(ErrorKind::File, "expected a .as source file");
        return Err(());
    }
    let src = match fs::read_to_string(path) {
        Ok(src) => src,
        Err(e) => {
            rep.report(ErrorKind::File, format!("cannot read file: {e}"));
            return Err(());
        }
    };

    let Some(expanded) = pre::expand(&src, rep) else { return Err(()) };
    write_with(path, "am", rep, |f| f.write_all(expanded.as_bytes()))?;

    let Some(obj) = asm::assemble(&expanded, rep) else { return Err(()) };
    write_with(path, "ob", rep, |f| obj.write_object(f))?;
    write_with(path, "ent", rep, |f| obj.write_entries(f))?;
    write_with(path, "ext", rep, |f| obj.write_externals(f))?;
    Ok(())
}

/// Writes one artifact next to the source file, swapping its suffix.
fn write_with(
    path: &Path,
    ext: &str,
    rep: &mut Reporter,
    write: impl FnOnce(&mut fs::File) -> io::Result<()>,
) -> Result<(), ()> {
    // File-level failures carry no line context.
    rep.set_line(0);

    let out = path.with_extension(ext);
    fs::File::create(&out)
        .and_then(|mut file| write(&mut file))
        .map_err(|e| rep.report(ErrorKind::File, format!("cannot write {}: {e}", out.display())))
}
