use std::path::PathBuf;

/// Errors raised while reading a pages directory
#[derive(Debug, thiserror::Error)]
pub enum ScanError {
    #[error("pages directory not found: {}", .0.display())]
    MissingDir(PathBuf),

    #[error("page path is not valid UTF-8: {}", .0.display())]
    InvalidName(PathBuf),

    #[error("failed to walk pages directory: {0}")]
    Walk(#[from] walkdir::Error),
}
