use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Why a rename did not take effect. Nothing on disk changed in any case.
#[derive(Debug, Error)]
pub enum RenameError {
    #[error("'{0}' is not a valid file name")]
    InvalidName(String),

    #[error("'{}' already exists", .0.display())]
    TargetExists(PathBuf),

    #[error("could not rename '{}' to '{}': {source}", from.display(), to.display())]
    Io {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: io::Error,
    },
}

#[derive(Debug, Error)]
pub enum SessionError {
    /// The row was resolved against a list that has since been rebuilt.
    #[error("the file list changed; select the file again")]
    StaleHandle,

    #[error(transparent)]
    Rename(#[from] RenameError),
}
