use anyhow::{Context, Result, bail};
use std::fs;
use std::io::{self, Read};

/// Upper bound on a saved response fed to `extract`.
pub const MAX_INPUT_SIZE: usize = 1024 * 1024; // 1MB

/// Reads raw model output from a file or stdin.
pub struct InputReader;

impl InputReader {
    pub fn read(file_path: Option<&str>) -> Result<String> {
        file_path.map_or_else(Self::read_stdin, Self::read_file)
    }

    fn read_file(path: &str) -> Result<String> {
        let metadata =
            fs::metadata(path).with_context(|| format!("Failed to access file: {path}"))?;

        let size = metadata.len() as usize;
        if size > MAX_INPUT_SIZE {
            bail!(too_large(size));
        }

        fs::read_to_string(path).with_context(|| format!("Failed to read file: {path}"))
    }

    #[allow(clippy::significant_drop_tightening)]
    fn read_stdin() -> Result<String> {
        let mut buffer = Vec::new();
        let mut stdin = io::stdin().lock();

        // Read one byte past the limit so oversize input is detected without
        // buffering all of it.
        stdin
            .by_ref()
            .take(MAX_INPUT_SIZE as u64 + 1)
            .read_to_end(&mut buffer)
            .context("Failed to read from stdin")?;

        if buffer.len() > MAX_INPUT_SIZE {
            bail!(too_large(buffer.len()));
        }

        String::from_utf8(buffer).context("Input is not valid UTF-8")
    }
}

fn too_large(size: usize) -> String {
    format!(
        "Input size ({:.1} MB) exceeds maximum allowed size (1 MB)",
        size as f64 / 1024.0 / 1024.0
    )
}
