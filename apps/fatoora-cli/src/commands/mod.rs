pub mod code128;
pub mod decode;
pub mod pdf_meta;
pub mod qr;
pub mod vat;

use std::path::Path;

use tracing::info;

use crate::error::CliError;

/// Write an output file, naming the path on failure.
pub fn write_output(path: &Path, bytes: &[u8]) -> Result<(), CliError> {
    std::fs::write(path, bytes).map_err(|e| CliError::io(path, e))?;
    info!(path = %path.display(), bytes = bytes.len(), "Wrote output file");
    Ok(())
}

/// Read an input file, naming the path on failure.
pub fn read_input(path: &Path) -> Result<Vec<u8>, CliError> {
    std::fs::read(path).map_err(|e| CliError::io(path, e))
}
