//! Student performance data transformation.
//!
//! [`build_preprocessor`] defines the untrained composite transformer for the
//! fixed schema in [`schema`]; [`DataTransformation`] fits it on a training
//! CSV, applies it to both splits and persists it.
//!
//! # Example
//!
//! ```ignore
//! use scoreprep::config::TransformationConfig;
//! use scoreprep::transformation::DataTransformation;
//!
//! let run = DataTransformation::new(TransformationConfig::default());
//! let (train, test, path) = run.transform("data/train.csv", "data/test.csv")?.into_parts();
//! ```

pub mod builder;
pub mod orchestrator;
pub mod schema;

pub use builder::{build_preprocessor, categorical_pipeline, numerical_pipeline};
pub use orchestrator::{DataTransformation, TransformationOutput};
