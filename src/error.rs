//! Error types for the image-process crate.

use std::path::PathBuf;

/// Errors that can occur while validating arguments or processing images.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A required command-line argument was not supplied.
    #[error("missing required argument: {arg}")]
    MissingArgument {
        /// Flag name, e.g. `--inputDir`.
        arg: String,
    },

    /// Neither a watermark nor a resize dimension was requested.
    #[error("at least one of --watermark or --resize is required")]
    InvalidArgumentCombination,

    /// The resize dimension was zero.
    #[error("resize dimension must be greater than 0")]
    ZeroResize,

    /// A path that must exist could not be accessed.
    #[error("path does not exist: {}", path.display())]
    PathNotFound {
        /// The path that was checked.
        path: PathBuf,
    },

    /// The output directory could not be created.
    #[error("failed to create directory {}: {source}", path.display())]
    CreateDir {
        /// Directory that was being created.
        path: PathBuf,
        /// Underlying I/O failure.
        source: std::io::Error,
    },

    /// Loading, encoding or writing a specific image failed.
    #[error("failed to process image {}: {source}", path.display())]
    ImageProcessing {
        /// The image being read or written.
        path: PathBuf,
        /// Underlying image library failure.
        source: image::ImageError,
    },

    /// The output format cannot be written.
    #[error("unsupported image format: {0}")]
    UnsupportedFormat(String),

    /// An I/O error occurred while reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    pub(crate) fn image(path: impl Into<PathBuf>, source: image::ImageError) -> Self {
        Self::ImageProcessing {
            path: path.into(),
            source,
        }
    }
}

/// A specialized `Result` type for this crate.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_messages() {
        let io_err = Error::Io(std::io::Error::new(std::io::ErrorKind::NotFound, "gone"));
        assert!(io_err.to_string().contains("gone"));

        let missing = Error::MissingArgument {
            arg: "--inputDir".to_string(),
        };
        assert!(missing.to_string().contains("--inputDir"));

        let not_found = Error::PathNotFound {
            path: PathBuf::from("/nope/logo.png"),
        };
        assert!(not_found.to_string().contains("/nope/logo.png"));

        let unsupported = Error::UnsupportedFormat("tiff".to_string());
        assert!(unsupported.to_string().contains("tiff"));

        let combo = Error::InvalidArgumentCombination.to_string();
        assert!(combo.contains("--watermark"));
        assert!(combo.contains("--resize"));
    }

    #[test]
    fn create_dir_error_names_the_directory() {
        let err = Error::CreateDir {
            path: PathBuf::from("out/nested"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "no parent"),
        };
        let msg = err.to_string();
        assert!(msg.contains("out/nested"));
        assert!(msg.contains("no parent"));
    }
}
