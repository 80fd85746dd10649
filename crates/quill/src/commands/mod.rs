//! CLI command implementations.

pub(crate) mod document;
pub(crate) mod layout;

use std::io::{self, Read, Write};
use std::path::Path;

pub(crate) use document::{DocumentArgs, ExcerptArgs};
pub(crate) use layout::LayoutArgs;

use crate::error::CliError;

/// Read a JSON input file, or stdin when the path is `-`.
pub(crate) fn read_input(path: &Path) -> Result<String, CliError> {
    let read_error = |source| CliError::Read {
        path: path.display().to_string(),
        source,
    };

    if path == Path::new("-") {
        let mut input = String::new();
        io::stdin().read_to_string(&mut input).map_err(read_error)?;
        return Ok(input);
    }
    std::fs::read_to_string(path).map_err(read_error)
}

/// Write a command result to stdout, ending with a newline.
pub(crate) fn write_result(text: &str) -> Result<(), CliError> {
    let mut stdout = io::stdout().lock();
    stdout.write_all(text.as_bytes())?;
    if !text.ends_with('\n') {
        stdout.write_all(b"\n")?;
    }
    stdout.flush()?;
    Ok(())
}
