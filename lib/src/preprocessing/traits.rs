//! Core traits for preprocessing transformers.
//!
//! This module defines the two central traits:
//! - [`Transformer`]: Used during fitting; has hyperparameters and can learn from data.
//! - [`FittedTransformer`]: After fitting; ready for inference and serialization.
//!
//! Keeping the two phases in separate types means an unfitted transformer has
//! no `transform` method at all, and a fitted one has no `fit` method, so it
//! cannot be re-fitted on evaluation data by accident.

use crate::preprocessing::error::PreprocessingError;
use crate::serialization::{load_object, save_object, PersistenceError, SerializableParams};
use std::path::Path;

/// Trait for unfitted transformers with hyperparameters.
///
/// # Type Parameters
/// - `Input`: Input data type (a numeric or categorical matrix, or a table).
/// - `Output`: Output data type.
/// - `Params`: Serializable representation of learned parameters.
/// - `Fitted`: The corresponding fitted transformer type.
///
/// # Example
/// ```ignore
/// use scoreprep::preprocessing::{Transformer, StandardScaler};
///
/// let scaler = StandardScaler::new();
/// let fitted = scaler.fit(&data)?;
/// let transformed = fitted.transform(&new_data)?;
/// ```
pub trait Transformer: Clone {
    /// Input data type for transformation.
    type Input;
    /// Output data type after transformation.
    type Output;
    /// Serializable representation of learned parameters.
    type Params: SerializableParams<Error = bincode::Error>;
    /// The fitted transformer type ready for inference.
    type Fitted: FittedTransformer<Params = Self::Params, Input = Self::Input, Output = Self::Output>;

    /// Fit the transformer to the training data.
    ///
    /// # Errors
    /// Returns [`PreprocessingError`] if the data is empty, has an
    /// incompatible shape, or contains values the transformer cannot learn from.
    fn fit(&self, data: &Self::Input) -> Result<Self::Fitted, PreprocessingError>;

    /// Fit the transformer and transform the same data in one step.
    fn fit_transform(&self, data: &Self::Input) -> Result<Self::Output, PreprocessingError> {
        let fitted = self.fit(data)?;
        fitted.transform(data)
    }
}

/// Trait for fitted transformers ready for inference.
///
/// # Guarantees
/// - `extract_params()` + `from_params()` is a round-trip.
/// - `save_to_file` / `load_from_file` reproduce transform output bit-for-bit.
pub trait FittedTransformer: Clone {
    /// Input data type for transformation.
    type Input;
    /// Output data type after transformation.
    type Output;
    /// Serializable representation of learned parameters.
    type Params: SerializableParams<Error = bincode::Error>;

    /// Transform data using learned parameters.
    ///
    /// # Errors
    /// Returns [`PreprocessingError`] if the input doesn't match the shape
    /// seen during fit or contains values that cannot be transformed.
    fn transform(&self, data: &Self::Input) -> Result<Self::Output, PreprocessingError>;

    /// Extract learned parameters as a serializable representation.
    fn extract_params(&self) -> Self::Params;

    /// Reconstruct a fitted transformer from parameters.
    fn from_params(params: Self::Params) -> Result<Self, PreprocessingError>
    where
        Self: Sized;

    /// Returns the number of features seen during fit.
    fn n_features_in(&self) -> usize;

    /// Returns the number of features produced by `transform`.
    fn n_features_out(&self) -> usize {
        self.n_features_in()
    }

    /// Save the fitted transformer to a file, creating parent directories.
    fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), PersistenceError> {
        save_object(path, &self.extract_params())
    }

    /// Load a fitted transformer from a file written by [`save_to_file`](Self::save_to_file).
    fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, PreprocessingError>
    where
        Self: Sized,
    {
        let params: Self::Params = load_object(path)
            .map_err(|e| PreprocessingError::SerializationError(e.to_string()))?;
        Self::from_params(params)
    }
}
