//! Data preprocessing transformers.
//!
//! Every transformer comes in two types: an unfitted configuration that
//! implements [`Transformer`] and a fitted, immutable value that implements
//! [`FittedTransformer`]. Fitted transformers expose their learned state as a
//! serde-serializable `*Params` struct, which is what gets persisted.
//!
//! # Available Transformers
//!
//! ## Imputation
//! - [`SimpleImputer`]: Fill NaN with mean, median, most_frequent, or constant
//! - [`CategoricalImputer`]: Fill missing categories with the mode or a constant
//!
//! ## Encoding
//! - [`OneHotEncoder`]: Dense one-hot indicator columns
//!
//! ## Scaling
//! - [`StandardScaler`]: Z-score normalization
//!
//! ## Composition
//! - [`Pipeline`]: Chain named transformers over a single feature block
//! - [`ColumnTransformer`]: Apply a pipeline per named group of table columns
//!
//! # Example
//!
//! ```ignore
//! use scoreprep::preprocessing::{FittedStandardScaler, FittedTransformer, StandardScaler, Transformer};
//!
//! let fitted = StandardScaler::new().fit(&training_data)?;
//! let scaled_train = fitted.transform(&training_data)?;
//!
//! fitted.save_to_file("scaler.bin")?;
//!
//! let loaded = FittedStandardScaler::load_from_file("scaler.bin")?;
//! let scaled_test = loaded.transform(&test_data)?;
//! ```

pub mod column_transformer;
pub mod encoding;
pub mod error;
pub mod imputation;
pub mod pipeline;
pub mod scaling;
pub mod traits;

// Re-export main types
pub use column_transformer::{
    ColumnTransformer, ColumnTransformerParams, FeatureGroup, FeatureGroupParams,
    FittedColumnTransformer, FittedFeatureGroup,
};
pub use encoding::{FittedOneHotEncoder, HandleUnknown, OneHotEncoder, OneHotEncoderParams};
pub use error::PreprocessingError;
pub use imputation::{
    CategoricalImputer, CategoricalImputerParams, CategoricalStrategy, FittedCategoricalImputer,
    FittedSimpleImputer, ImputeStrategy, SimpleImputer, SimpleImputerParams,
};
pub use pipeline::{
    Block, ColumnKind, FittedPipeline, FittedPipelineStep, Pipeline, PipelineParams, PipelineStep,
    StepParams,
};
pub use scaling::{
    FittedStandardScaler, StandardScaler, StandardScalerConfig, StandardScalerParams,
};
pub use traits::{FittedTransformer, Transformer};
