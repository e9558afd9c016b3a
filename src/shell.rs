//! Interactive command loop

use crate::config::Config;
use crate::run::generate_report;
use std::io::{self, BufRead, Write};
use std::path::Path;

const COMMANDS: &str = "Available commands:
    report <source-dir> <report-file>   analyze a source tree and write the report
    help                                show this list
    exit                                quit";

const USAGE: &str = "Usage: report <source-dir> <report-file>";

/// Reads commands from `input` until `exit` or end of input. Command
/// failures are printed and the loop continues.
pub fn run_shell<R: BufRead, W: Write>(input: R, out: &mut W, config: &Config) -> io::Result<()> {
    writeln!(out, "classmeter - Java class metrics and dependency report")?;
    writeln!(out, "{COMMANDS}")?;

    let mut lines = input.lines();
    loop {
        write!(out, "\n>>> ")?;
        out.flush()?;
        let Some(line) = lines.next() else {
            writeln!(out)?;
            return Ok(());
        };
        let line = line?;
        let parts: Vec<&str> = line.split_whitespace().collect();

        match parts.as_slice() {
            [] => {}
            ["exit"] => {
                writeln!(out, "Bye.")?;
                return Ok(());
            }
            ["help"] => writeln!(out, "{COMMANDS}")?,
            ["report", source, output] => report_command(out, source, output, config)?,
            ["report", ..] => writeln!(out, "{USAGE}")?,
            _ => writeln!(out, "Unknown command. Available commands: report, help, exit")?,
        }
    }
}

fn report_command<W: Write>(out: &mut W, source: &str, output: &str, config: &Config) -> io::Result<()> {
    writeln!(out, "Analyzing {source} ...")?;
    match generate_report(Path::new(source), Path::new(output), config) {
        Ok(outcome) => {
            writeln!(
                out,
                "Done: {} classes from {} files. Report saved to {output}",
                outcome.classes, outcome.files_scanned
            )?;
            if outcome.files_skipped > 0 {
                writeln!(out, "{} files could not be parsed and were skipped", outcome.files_skipped)?;
            }
        }
        Err(e) => writeln!(out, "Error: {e}")?,
    }
    Ok(())
}
