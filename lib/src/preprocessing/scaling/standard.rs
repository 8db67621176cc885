//! Standard Scaler (Z-score normalization).
//!
//! Transforms features by removing the mean and scaling to unit variance.
//!
//! The standard score of a sample `x` is calculated as:
//! ```text
//! z = (x - u) / s
//! ```
//! where `u` is the mean of the training samples, and `s` is the population
//! standard deviation (ddof = 0). NaN cells are ignored while fitting and
//! pass through `transform` unchanged.
//!
//! # Example
//! ```ignore
//! use scoreprep::preprocessing::{FittedTransformer, StandardScaler, Transformer};
//!
//! let scaler = StandardScaler::new()
//!     .with_mean(true)
//!     .with_std(true);
//!
//! let fitted = scaler.fit(&data)?;
//! let scaled = fitted.transform(&data)?;
//!
//! // Later, for inference:
//! let loaded = FittedStandardScaler::load_from_file("scaler.bin")?;
//! let new_scaled = loaded.transform(&new_data)?;
//! ```

use crate::preprocessing::error::PreprocessingError;
use crate::preprocessing::traits::{FittedTransformer, Transformer};
use ndarray::{Array1, Array2, Axis};
use serde::{Deserialize, Serialize};

/// Configuration for StandardScaler.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StandardScalerConfig {
    /// If true, center the data before scaling.
    pub with_mean: bool,
    /// If true, scale the data to unit variance.
    pub with_std: bool,
}

impl Default for StandardScalerConfig {
    fn default() -> Self {
        Self {
            with_mean: true,
            with_std: true,
        }
    }
}

/// Serializable parameters for a fitted StandardScaler.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StandardScalerParams {
    /// Configuration options.
    pub config: StandardScalerConfig,
    /// Mean of each feature (zeros if with_mean=false).
    pub mean: Vec<f64>,
    /// Standard deviation of each feature (ones if with_std=false).
    pub std: Vec<f64>,
    /// Number of features seen during fit.
    pub n_features: usize,
}

/// StandardScaler transformer (unfitted).
///
/// Transforms features by removing the mean and scaling to unit variance.
#[derive(Clone, Debug, Default)]
pub struct StandardScaler {
    config: StandardScalerConfig,
}

impl StandardScaler {
    /// Create a new StandardScaler with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set whether to center data by mean.
    pub fn with_mean(mut self, with_mean: bool) -> Self {
        self.config.with_mean = with_mean;
        self
    }

    /// Set whether to scale data to unit variance.
    pub fn with_std(mut self, with_std: bool) -> Self {
        self.config.with_std = with_std;
        self
    }

    pub fn config(&self) -> &StandardScalerConfig {
        &self.config
    }
}

/// Mean and population std of the non-NaN values in a column.
fn column_moments(values: impl Iterator<Item = f64> + Clone) -> Option<(f64, f64)> {
    let (sum, count) = values
        .clone()
        .filter(|v| !v.is_nan())
        .fold((0.0, 0usize), |(s, n), v| (s + v, n + 1));
    if count == 0 {
        return None;
    }
    let mean = sum / count as f64;
    let var = values
        .filter(|v| !v.is_nan())
        .map(|v| (v - mean).powi(2))
        .sum::<f64>()
        / count as f64;
    Some((mean, var.sqrt()))
}

/// A std at rounding-error level relative to the mean marks a constant column.
fn is_constant_scale(std: f64, mean: f64) -> bool {
    std <= 10.0 * f64::EPSILON * mean.abs().max(1.0)
}

impl Transformer for StandardScaler {
    type Input = Array2<f64>;
    type Output = Array2<f64>;
    type Params = StandardScalerParams;
    type Fitted = FittedStandardScaler;

    fn fit(&self, data: &Self::Input) -> Result<Self::Fitted, PreprocessingError> {
        let (rows, cols) = data.dim();

        if rows == 0 {
            return Err(PreprocessingError::EmptyData(
                "Cannot fit StandardScaler on empty data".to_string(),
            ));
        }

        let mut mean = Array1::<f64>::zeros(cols);
        let mut std = Array1::<f64>::ones(cols);

        for (col, column) in data.axis_iter(Axis(1)).enumerate() {
            let (m, s) = match column_moments(column.iter().copied()) {
                Some(moments) => moments,
                None => {
                    tracing::warn!(column = col, "StandardScaler column has no observed values");
                    (0.0, 1.0)
                }
            };
            if self.config.with_mean {
                mean[col] = m;
            }
            if self.config.with_std {
                // Constant features keep their centered value of zero.
                std[col] = if is_constant_scale(s, m) { 1.0 } else { s };
            }
        }

        Ok(FittedStandardScaler {
            config: self.config.clone(),
            mean,
            std,
            n_features: cols,
        })
    }
}

/// Fitted StandardScaler ready for inference.
#[derive(Clone, Debug)]
pub struct FittedStandardScaler {
    config: StandardScalerConfig,
    mean: Array1<f64>,
    std: Array1<f64>,
    n_features: usize,
}

impl FittedStandardScaler {
    /// Get the mean values for each feature.
    pub fn mean(&self) -> &Array1<f64> {
        &self.mean
    }

    /// Get the standard deviation values for each feature.
    pub fn std(&self) -> &Array1<f64> {
        &self.std
    }
}

impl FittedTransformer for FittedStandardScaler {
    type Input = Array2<f64>;
    type Output = Array2<f64>;
    type Params = StandardScalerParams;

    fn transform(&self, data: &Self::Input) -> Result<Self::Output, PreprocessingError> {
        let cols = data.ncols();

        if cols != self.n_features {
            return Err(PreprocessingError::FeatureMismatch {
                expected_features: self.n_features,
                got_features: cols,
            });
        }

        let mut result = data.clone();

        if self.config.with_mean {
            result -= &self.mean;
        }

        if self.config.with_std {
            result /= &self.std;
        }

        Ok(result)
    }

    fn extract_params(&self) -> Self::Params {
        StandardScalerParams {
            config: self.config.clone(),
            mean: self.mean.to_vec(),
            std: self.std.to_vec(),
            n_features: self.n_features,
        }
    }

    fn from_params(params: Self::Params) -> Result<Self, PreprocessingError> {
        if params.mean.len() != params.n_features || params.std.len() != params.n_features {
            return Err(PreprocessingError::InvalidShape {
                expected: format!("{} means and stds", params.n_features),
                got: format!("{} means, {} stds", params.mean.len(), params.std.len()),
            });
        }
        if params.std.iter().any(|&s| s == 0.0 || !s.is_finite()) {
            return Err(PreprocessingError::InvalidParameter(
                "StandardScaler std values must be finite and non-zero".to_string(),
            ));
        }

        Ok(Self {
            config: params.config,
            mean: Array1::from(params.mean),
            std: Array1::from(params.std),
            n_features: params.n_features,
        })
    }

    fn n_features_in(&self) -> usize {
        self.n_features
    }
}
