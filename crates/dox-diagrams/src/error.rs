use std::path::PathBuf;

/// Diagram rendering error.
#[derive(Debug, thiserror::Error)]
pub enum DotError {
    /// Reading the source or writing the image failed.
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// Kroki request failed or returned an error status.
    #[error("HTTP error: {0}")]
    Http(String),
    /// The source path has no file name to derive the image name from.
    #[error("diagram source has no file name: {}", .0.display())]
    InvalidPath(PathBuf),
}
