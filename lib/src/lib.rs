//! # scoreprep
//!
//! Fit-once, replay-anywhere preprocessing for the student performance
//! dataset, with strict separation between fitting and inference.
//!
//! ## Core Design Principles
//!
//! - **Two-phase transformers**: an unfitted configuration type has `fit`;
//!   only the fitted type it returns has `transform`. A fitted transformer is
//!   immutable, so the evaluation split can never leak into learned statistics.
//! - **Plain-data persistence**: fitted state is extracted into serde
//!   `*Params` structs and written with bincode; loading rebuilds an
//!   identical transformer.
//! - **One error at the top**: lower layers return typed errors; the
//!   transformation run wraps them into [`ProcessingError`] with a message and
//!   the source location where they were observed.
//!
//! ## Quick Start
//!
//! ```ignore
//! use scoreprep::config::TransformationConfig;
//! use scoreprep::transformation::DataTransformation;
//!
//! let run = DataTransformation::new(TransformationConfig::default());
//! let output = run.transform("artifacts/train.csv", "artifacts/test.csv")?;
//! println!("train {:?}, test {:?}", output.train.dim(), output.test.dim());
//!
//! // Later, replay the fitted preprocessing on new rows:
//! let fitted = DataTransformation::load_preprocessor(&output.preprocessor_path)?;
//! ```
//!
//! ## Module Structure
//!
//! - `dataset`: CSV loading into a column-oriented [`Table`](dataset::Table)
//! - `preprocessing`: imputers, encoder, scaler, pipelines and column transformer
//! - `serialization`: byte encoding and file persistence of fitted parameters
//! - `transformation`: the fixed student schema, its builder and the train/test run
//! - `error`: [`ProcessingError`] and the [`Context`](error::Context) extension trait
//! - `config` / `logging`: layered configuration and tracing setup for the binary

/// CSV loading and column extraction.
pub mod dataset;

/// Uniform error type for transformation runs.
pub mod error;

/// Layered run configuration.
pub mod config;

/// Tracing subscriber setup.
pub mod logging;

/// Data preprocessing transformers for ML pipelines.
pub mod preprocessing;

/// Persistence of fitted parameters.
pub mod serialization;

/// Student performance transformation workflow.
pub mod transformation;

pub use error::{Context, ProcessingError};
pub use transformation::{DataTransformation, TransformationOutput};
