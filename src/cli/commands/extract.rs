//! Extract command handler.

use anyhow::Result;
use std::io::{self, Write};

use crate::harmony::extract_output;
use crate::input::InputReader;

/// Prints the final-channel text of a saved raw response.
///
/// Reads from `file`, or stdin when `None`. Output follows the same rules as
/// chat replies, so reasoning-only input prints the fallback notice.
pub fn run_extract(file: Option<&str>) -> Result<()> {
    let raw = InputReader::read(file)?;
    let output = extract_output(&raw);

    let mut stdout = io::stdout().lock();
    if output.ends_with('\n') {
        write!(stdout, "{output}")?;
    } else {
        writeln!(stdout, "{output}")?;
    }
    stdout.flush()?;
    Ok(())
}
