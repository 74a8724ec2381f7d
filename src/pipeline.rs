//! Batch image pipeline: validate paths, list images, transform, save.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use image::{DynamicImage, ImageFormat, RgbaImage};
use tracing::{debug, info, warn};

use crate::config::{Config, ProcessOptions};
use crate::error::{Error, Result};
use crate::paths::{path_exists, path_if_not_exists};
use crate::transform;

/// Prefix prepended to every output file name.
pub const OUTPUT_PREFIX: &str = "processed_";

/// JPEG quality used when the output extension is `.jpg`/`.jpeg`.
const JPEG_QUALITY: u8 = 90;

/// Outcome of processing a single input image.
#[derive(Debug)]
pub struct ProcessResult {
    /// Source image path.
    pub input: PathBuf,
    /// Destination path (written only on success).
    pub output: PathBuf,
    /// The failure, if processing did not complete.
    pub error: Option<Error>,
}

impl ProcessResult {
    /// Whether the output file was written.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }
}

/// Per-file outcomes of a run, in processing order.
#[derive(Debug, Default)]
pub struct Report {
    /// One entry per matching input image.
    pub results: Vec<ProcessResult>,
}

impl Report {
    /// Number of images written successfully.
    #[must_use]
    pub fn processed_count(&self) -> usize {
        self.results.iter().filter(|r| r.is_success()).count()
    }

    /// Number of images that failed (only non-zero with `keep_going`).
    #[must_use]
    pub fn failed_count(&self) -> usize {
        self.results.len() - self.processed_count()
    }
}

/// A validated pipeline ready to process a directory.
///
/// Construction resolves and checks every path and decodes the watermark,
/// so a pipeline that exists is one whose inputs were all reachable.
pub struct ImagePipeline {
    config: Config,
    watermark: Option<RgbaImage>,
}

impl ImagePipeline {
    /// Build a pipeline with paths resolved against the current directory.
    ///
    /// # Errors
    ///
    /// See [`ImagePipeline::with_base`].
    pub fn new(config: &Config) -> Result<Self> {
        let cwd = std::env::current_dir()?;
        Self::with_base(config, &cwd)
    }

    /// Build a pipeline with paths resolved against `base`.
    ///
    /// Checks, in order: the input directory exists, the output directory
    /// exists (creating it if needed), the watermark exists and decodes.
    ///
    /// # Errors
    ///
    /// - [`Error::PathNotFound`] if the input directory or watermark is missing.
    /// - [`Error::CreateDir`] if the output directory cannot be created.
    /// - [`Error::ImageProcessing`] if the watermark cannot be decoded.
    pub fn with_base(config: &Config, base: &Path) -> Result<Self> {
        let config = config.resolve_against(base);
        debug!("input directory: {}", config.input_dir().display());
        debug!("output directory: {}", config.output_dir().display());

        path_exists(config.input_dir())?;
        path_if_not_exists(config.output_dir())?;

        let watermark = match config.watermark() {
            Some(path) => {
                path_exists(path)?;
                debug!("watermark: {}", path.display());
                let img = image::open(path).map_err(|e| Error::image(path, e))?;
                Some(img.to_rgba8())
            }
            None => None,
        };

        Ok(Self { config, watermark })
    }

    /// The resolved configuration.
    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// List supported images in the input directory, sorted by file name.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if the directory cannot be read.
    pub fn images(&self) -> Result<Vec<PathBuf>> {
        let mut images = Vec::new();
        for entry in std::fs::read_dir(self.config.input_dir())? {
            let path = entry?.path();
            // follows symlinks, so linked images are kept and directories are not
            if !path.is_file() {
                continue;
            }
            if is_supported_image(&path) {
                images.push(path);
            }
        }
        images.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
        Ok(images)
    }

    /// Load, transform and save one image; returns the output path.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ImageProcessing`] on load or save failure, or
    /// [`Error::UnsupportedFormat`] if the output extension cannot be encoded.
    pub fn process_file(&self, input: &Path) -> Result<PathBuf> {
        let output = processed_output_path(self.config.output_dir(), input);

        let mut img = image::open(input).map_err(|e| Error::image(input, e))?;

        if let Some(size) = self.config.resize() {
            img = transform::resize_longest_side(&img, size);
            debug!("resized to {}x{}", img.width(), img.height());
        }

        if let Some(watermark) = &self.watermark {
            transform::apply_watermark(&mut img, watermark);
        }

        save_image(&img, &output)?;
        Ok(output)
    }

    /// Process every supported image in the input directory.
    ///
    /// Without `keep_going`, the first failure aborts the run and is returned
    /// as the error. With it, failures are recorded in the [`Report`].
    ///
    /// # Errors
    ///
    /// Returns the listing error, or the first per-file error unless
    /// `opts.keep_going` is set.
    pub fn run(&self, opts: &ProcessOptions) -> Result<Report> {
        let mut report = Report::default();

        for input in self.images()? {
            let name = file_name_lossy(&input);
            info!("Processing image: {name}");

            match self.process_file(&input) {
                Ok(output) => report.results.push(ProcessResult {
                    input,
                    output,
                    error: None,
                }),
                Err(e) if opts.keep_going => {
                    warn!("{name}: {e}");
                    let output = processed_output_path(self.config.output_dir(), &input);
                    report.results.push(ProcessResult {
                        input,
                        output,
                        error: Some(e),
                    });
                }
                Err(e) => return Err(e),
            }
        }

        Ok(report)
    }
}

/// Validate paths and process every supported image under `config`.
///
/// Paths are resolved against the current working directory.
///
/// # Errors
///
/// Any error from [`ImagePipeline::new`] or [`ImagePipeline::run`].
pub fn process_images(config: &Config, opts: &ProcessOptions) -> Result<Report> {
    ImagePipeline::new(config)?.run(opts)
}

/// Check if a file has a supported image extension (case-insensitive).
#[must_use]
pub fn is_supported_image(path: &Path) -> bool {
    match path.extension().and_then(|e| e.to_str()) {
        Some(ext) => matches!(
            ext.to_lowercase().as_str(),
            "jpg" | "jpeg" | "png" | "gif" | "webp"
        ),
        None => false,
    }
}

/// Output location for `input`: `output_dir/processed_<file name>`.
///
/// Example: `"in/photo.jpg"` becomes `"out/processed_photo.jpg"`.
/// Non-UTF-8 names are carried through unchanged.
#[must_use]
pub fn processed_output_path(output_dir: &Path, input: &Path) -> PathBuf {
    let mut name = OsString::from(OUTPUT_PREFIX);
    name.push(input.file_name().unwrap_or(input.as_os_str()));
    output_dir.join(name)
}

/// Save an image, inferring the format from the file extension.
///
/// JPEG output drops alpha; GIF and WebP are written as 8-bit RGBA.
///
/// # Errors
///
/// Returns an error if the format is unsupported or writing fails.
pub fn save_image(img: &DynamicImage, path: &Path) -> Result<()> {
    let format =
        ImageFormat::from_path(path).map_err(|e| Error::UnsupportedFormat(e.to_string()))?;

    match format {
        ImageFormat::Jpeg => {
            let file = std::fs::File::create(path)?;
            let mut writer = std::io::BufWriter::new(file);
            let encoder =
                image::codecs::jpeg::JpegEncoder::new_with_quality(&mut writer, JPEG_QUALITY);
            DynamicImage::ImageRgb8(img.to_rgb8())
                .write_with_encoder(encoder)
                .map_err(|e| Error::image(path, e))?;
        }
        ImageFormat::Png => {
            img.save(path).map_err(|e| Error::image(path, e))?;
        }
        ImageFormat::Gif | ImageFormat::WebP => {
            DynamicImage::ImageRgba8(img.to_rgba8())
                .save(path)
                .map_err(|e| Error::image(path, e))?;
        }
        _ => {
            return Err(Error::UnsupportedFormat(format!("{format:?}")));
        }
    }

    Ok(())
}

fn file_name_lossy(path: &Path) -> String {
    path.file_name().map_or_else(
        || path.display().to_string(),
        |f| f.to_string_lossy().to_string(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{GenericImageView, Rgb, RgbImage};

    #[test]
    fn is_supported_image_accepts_common_formats() {
        assert!(is_supported_image(Path::new("photo.jpg")));
        assert!(is_supported_image(Path::new("photo.JPEG")));
        assert!(is_supported_image(Path::new("photo.png")));
        assert!(is_supported_image(Path::new("anim.GIF")));
        assert!(is_supported_image(Path::new("photo.webp")));
    }

    #[test]
    fn is_supported_image_rejects_unsupported_formats() {
        assert!(!is_supported_image(Path::new("photo.bmp")));
        assert!(!is_supported_image(Path::new("notes.txt")));
        assert!(!is_supported_image(Path::new("photo")));
        assert!(!is_supported_image(Path::new("png")));
    }

    #[test]
    fn processed_output_path_prefixes_file_name() {
        let p = processed_output_path(Path::new("/tmp/out"), Path::new("/data/in/photo.jpg"));
        assert_eq!(p, PathBuf::from("/tmp/out/processed_photo.jpg"));
    }

    #[cfg(unix)]
    #[test]
    fn processed_output_path_keeps_non_utf8_names_distinct() {
        use std::os::unix::ffi::OsStrExt;

        let out = Path::new("/tmp/out");
        let a = processed_output_path(out, Path::new(std::ffi::OsStr::from_bytes(b"a\xff.png")));
        let b = processed_output_path(out, Path::new(std::ffi::OsStr::from_bytes(b"a\xfe.png")));

        assert_ne!(a, b);
        assert_eq!(a.file_name().unwrap().as_bytes(), b"processed_a\xff.png");
    }

    #[test]
    fn save_image_rejects_unknown_extension() {
        let dir = tempfile::tempdir().unwrap();
        let img = DynamicImage::ImageRgb8(RgbImage::new(4, 4));
        let err = save_image(&img, &dir.path().join("out.xyz")).unwrap_err();
        assert!(matches!(err, Error::UnsupportedFormat(_)));
    }

    #[test]
    fn save_image_writes_jpeg_from_rgba() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.jpg");
        let img = DynamicImage::ImageRgba8(RgbaImage::new(8, 6));

        save_image(&img, &path).unwrap();

        let back = image::open(&path).unwrap();
        assert_eq!(back.dimensions(), (8, 6));
    }

    #[test]
    fn save_image_writes_gif_and_webp() {
        let dir = tempfile::tempdir().unwrap();
        let img = DynamicImage::ImageRgb8(RgbImage::from_pixel(5, 7, Rgb([9, 9, 9])));

        for name in ["out.gif", "out.webp"] {
            let path = dir.path().join(name);
            save_image(&img, &path).unwrap();
            assert_eq!(image::open(&path).unwrap().dimensions(), (5, 7));
        }
    }

    #[test]
    fn report_counts_successes_and_failures() {
        let report = Report {
            results: vec![
                ProcessResult {
                    input: "a.png".into(),
                    output: "processed_a.png".into(),
                    error: None,
                },
                ProcessResult {
                    input: "b.png".into(),
                    output: "processed_b.png".into(),
                    error: Some(Error::UnsupportedFormat("x".into())),
                },
            ],
        };
        assert_eq!(report.processed_count(), 1);
        assert_eq!(report.failed_count(), 1);
    }
}
