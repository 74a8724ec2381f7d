//! Batch-resize and watermark a directory of images.
//!
//! For each `.jpg`, `.jpeg`, `.png`, `.gif` or `.webp` file in an input
//! directory, optionally resize it so its longest side matches a target,
//! optionally composite a watermark at offset (20, 20), and write the result
//! to an output directory as `processed_<name>`.
//!
//! # Quick Start
//!
//! ```no_run
//! use image_process::{process_images, Config, ProcessOptions};
//!
//! let config = Config::new(
//!     Some("images".into()),
//!     Some("result".into()),
//!     Some("logo.png".into()),
//!     Some(500),
//! )
//! .expect("invalid arguments");
//! let report = process_images(&config, &ProcessOptions::default()).expect("run failed");
//! println!("Processed {} images", report.processed_count());
//! ```
//!
//! # Failure policy
//!
//! By default the first failing file aborts the run. Set
//! [`ProcessOptions::keep_going`] to record failures in the [`Report`]
//! and continue with the remaining files.

#![deny(missing_docs)]

pub mod config;
pub mod error;
pub mod paths;
mod pipeline;
pub mod transform;

pub use config::{Config, ProcessOptions};
pub use error::{Error, Result};
pub use pipeline::{
    is_supported_image, process_images, processed_output_path, save_image, ImagePipeline,
    ProcessResult, Report, OUTPUT_PREFIX,
};
