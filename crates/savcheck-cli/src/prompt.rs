//! Interactive resolution of missing required columns.

use std::io::{self, BufRead, Write};

use anyhow::{Context, Result};
use savcheck_core::{ColumnResolver, MissingColumnChoice};

/// Resolver that asks the operator on stdin what to do about missing
/// columns. The prompt blocks until an answer arrives; there is no
/// timeout and no default choice.
pub struct StdinResolver;

impl ColumnResolver for StdinResolver {
    fn choose(&mut self, missing: &[String]) -> Result<MissingColumnChoice> {
        let mut stderr = io::stderr().lock();
        writeln!(stderr, "Required columns not found in the file:")?;
        for name in missing {
            writeln!(stderr, "  - {name}")?;
        }
        loop {
            write!(
                stderr,
                "[c]ontinue without them, or [e]dit the column list? "
            )?;
            stderr.flush()?;
            let answer = read_line().context("failed to read prompt answer")?;
            match answer.trim().to_lowercase().as_str() {
                "c" | "continue" => return Ok(MissingColumnChoice::Proceed),
                "e" | "edit" => return Ok(MissingColumnChoice::Replace),
                other => {
                    writeln!(stderr, "unrecognized answer: {other:?}")?;
                }
            }
        }
    }

    fn replacement_list(&mut self) -> Result<Option<String>> {
        let mut stderr = io::stderr().lock();
        write!(stderr, "Enter the columns to use, comma separated: ")?;
        stderr.flush()?;
        let answer = read_line().context("failed to read column list")?;
        Ok(Some(answer))
    }
}

fn read_line() -> Result<String> {
    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(line)
}
