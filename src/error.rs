//! Fatal run conditions that map to distinct process exit codes.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExtractError {
    /// Input directory does not exist.
    #[error("missing headers directory: {}", .0.display())]
    MissingInputDirectory(PathBuf),

    /// Input directory holds no `.h` files.
    #[error("no .h files found in {}", .0.display())]
    NoHeadersFound(PathBuf),

    /// Every header was scanned and none yielded a prototype.
    #[error("no function prototypes found in {headers} header file(s)")]
    NoFunctionsFound { headers: usize },
}

impl ExtractError {
    /// Process exit code for this condition. `1` is reserved for other errors.
    pub fn exit_code(&self) -> u8 {
        match self {
            ExtractError::MissingInputDirectory(_) => 2,
            ExtractError::NoHeadersFound(_) => 3,
            ExtractError::NoFunctionsFound { .. } => 4,
        }
    }
}
