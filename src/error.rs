use std::path::PathBuf;
use thiserror::Error;

/// Pipeline failures, split by severity so callers can branch: `Fatal*`
/// variants abort the entire run, everything else is logged and skipped.
#[derive(Debug, Error)]
pub enum CurateError {
    #[error("input directory does not exist: {0}")]
    FatalMissingRoot(PathBuf),

    #[error("culture mapping file does not exist: {0}")]
    FatalMissingMapping(PathBuf),

    #[error("sample {library} has no bins directory at {path}")]
    MissingBins { library: String, path: PathBuf },

    #[error("library {0} has no entry in the culture mapping")]
    UnmappedLibrary(String),

    #[error("could not read bin file {path}: {source}")]
    UnreadableBin {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl CurateError {
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            CurateError::FatalMissingRoot(_) | CurateError::FatalMissingMapping(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::CurateError;
    use std::path::PathBuf;

    #[test]
    fn severity_split() {
        assert!(CurateError::FatalMissingRoot(PathBuf::from("/nope")).is_fatal());
        assert!(CurateError::FatalMissingMapping(PathBuf::from("/nope")).is_fatal());
        assert!(!CurateError::UnmappedLibrary("s1".to_string()).is_fatal());
        assert!(!CurateError::MissingBins {
            library: "s1".to_string(),
            path: PathBuf::from("/nope/bins"),
        }
        .is_fatal());
    }
}
