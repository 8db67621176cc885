//! Pipeline utilities for chaining transformers.
//!
//! | Component | Description |
//! |-----------|-------------|
//! | [`Pipeline`] | Chain named transformers sequentially over one feature block |
//!
//! # Example
//!
//! ```ignore
//! use scoreprep::preprocessing::pipeline::{Block, Pipeline};
//! use scoreprep::preprocessing::{ImputeStrategy, SimpleImputer, StandardScaler, Transformer};
//!
//! let pipeline = Pipeline::new()
//!     .add_step("imputer", SimpleImputer::new(ImputeStrategy::Median))
//!     .add_step("scaler", StandardScaler::new());
//!
//! let fitted = pipeline.fit(&Block::Numeric(data))?;
//! let transformed = fitted.transform(&Block::Numeric(new_data))?;
//! ```

#[allow(clippy::module_inception)]
pub mod pipeline;

pub use pipeline::{
    Block, ColumnKind, FittedPipeline, FittedPipelineStep, Pipeline, PipelineParams, PipelineStep,
    StepParams,
};
