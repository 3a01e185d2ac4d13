//! Sound request value object

use std::path::{Path, PathBuf};

/// One file to decode and play.
///
/// `block` selects whether the caller waits for rendering to finish
/// or receives a pending handle straight away.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SoundRequest {
    path: PathBuf,
    block: bool,
}

impl SoundRequest {
    /// Request played on the worker pool
    pub fn background(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            block: false,
        }
    }

    /// Request played on the calling thread
    pub fn blocking(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            block: true,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn is_blocking(&self) -> bool {
        self.block
    }

    pub fn into_path(self) -> PathBuf {
        self.path
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn background_is_not_blocking() {
        let request = SoundRequest::background("ready.mp3");
        assert!(!request.is_blocking());
        assert_eq!(request.path(), Path::new("ready.mp3"));
    }

    #[test]
    fn blocking_request() {
        let request = SoundRequest::blocking(PathBuf::from("sound.mp3"));
        assert!(request.is_blocking());
        assert_eq!(request.into_path(), PathBuf::from("sound.mp3"));
    }
}
