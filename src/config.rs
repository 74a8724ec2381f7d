//! Run configuration built from command-line arguments.

use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Validated, immutable description of a processing run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    input_dir: PathBuf,
    output_dir: PathBuf,
    watermark: Option<PathBuf>,
    resize: Option<u32>,
}

impl Config {
    /// Build a configuration from optional argument values.
    ///
    /// # Errors
    ///
    /// - [`Error::MissingArgument`] if `input_dir` or `output_dir` is absent.
    /// - [`Error::InvalidArgumentCombination`] if neither `watermark` nor `resize` is given.
    /// - [`Error::ZeroResize`] if `resize` is `Some(0)`.
    pub fn new(
        input_dir: Option<PathBuf>,
        output_dir: Option<PathBuf>,
        watermark: Option<PathBuf>,
        resize: Option<u32>,
    ) -> Result<Self> {
        let input_dir = input_dir.ok_or_else(|| Error::MissingArgument {
            arg: "--inputDir".to_string(),
        })?;
        let output_dir = output_dir.ok_or_else(|| Error::MissingArgument {
            arg: "--outputDir".to_string(),
        })?;

        if watermark.is_none() && resize.is_none() {
            return Err(Error::InvalidArgumentCombination);
        }
        if resize == Some(0) {
            return Err(Error::ZeroResize);
        }

        Ok(Self {
            input_dir,
            output_dir,
            watermark,
            resize,
        })
    }

    /// Directory of source images.
    #[must_use]
    pub fn input_dir(&self) -> &Path {
        &self.input_dir
    }

    /// Directory processed images are written to.
    #[must_use]
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Image composited onto every output, if any.
    #[must_use]
    pub fn watermark(&self) -> Option<&Path> {
        self.watermark.as_deref()
    }

    /// Target length of the longest side, if any.
    #[must_use]
    pub fn resize(&self) -> Option<u32> {
        self.resize
    }

    /// Return a copy with every path joined onto `base`.
    ///
    /// Absolute paths are left untouched.
    #[must_use]
    pub fn resolve_against(&self, base: &Path) -> Self {
        Self {
            input_dir: base.join(&self.input_dir),
            output_dir: base.join(&self.output_dir),
            watermark: self.watermark.as_ref().map(|w| base.join(w)),
            resize: self.resize,
        }
    }
}

/// Options controlling run-time behavior.
#[derive(Debug, Clone, Default)]
pub struct ProcessOptions {
    /// Record per-file failures and continue instead of aborting the run.
    pub keep_going: bool,
}
