//! One-hot encoding for categorical features.
//!
//! Transforms string categories to dense one-hot (dummy) indicator columns.

use crate::preprocessing::encoding::HandleUnknown;
use crate::preprocessing::error::PreprocessingError;
use crate::preprocessing::traits::{FittedTransformer, Transformer};
use ndarray::{Array2, Axis};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// One-hot encoder for categorical features.
///
/// Each input column is treated as a categorical feature, and the encoder
/// learns the unique values (categories) present in each column during
/// fitting, sorted lexicographically. The output is always a dense matrix;
/// downstream scaling relies on that.
///
/// # Example
/// ```ignore
/// use scoreprep::preprocessing::{OneHotEncoder, Transformer};
///
/// // Input: 3 samples with 1 categorical feature each
/// let fitted = OneHotEncoder::new().fit(&data)?;
///
/// // Output: 3x3 one-hot matrix, columns ordered [blue, green, red]
/// let encoded = fitted.transform(&data)?;
/// ```
#[derive(Clone, Debug, Default)]
pub struct OneHotEncoder {
    /// How to handle unknown categories during transform.
    handle_unknown: HandleUnknown,
}

impl OneHotEncoder {
    /// Create a new OneHotEncoder with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the strategy for handling unknown categories.
    pub fn with_handle_unknown(mut self, strategy: HandleUnknown) -> Self {
        self.handle_unknown = strategy;
        self
    }
}

/// Serializable parameters for a fitted OneHotEncoder.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct OneHotEncoderParams {
    /// Categories (unique sorted values) for each input column.
    pub categories: Vec<Vec<String>>,
    /// Number of input features.
    pub n_features_in: usize,
    /// Handle unknown strategy.
    pub handle_unknown: HandleUnknown,
}

/// Fitted OneHotEncoder ready for inference.
#[derive(Clone, Debug)]
pub struct FittedOneHotEncoder {
    categories: Vec<Vec<String>>,
    /// Offset of each input column's block in the output.
    offsets: Vec<usize>,
    n_features_out: usize,
    handle_unknown: HandleUnknown,
}

impl FittedOneHotEncoder {
    fn from_categories(categories: Vec<Vec<String>>, handle_unknown: HandleUnknown) -> Self {
        let mut offsets = Vec::with_capacity(categories.len());
        let mut n_features_out = 0;
        for cats in &categories {
            offsets.push(n_features_out);
            n_features_out += cats.len();
        }
        Self {
            categories,
            offsets,
            n_features_out,
            handle_unknown,
        }
    }

    /// Get the categories learned for each feature.
    pub fn categories(&self) -> &[Vec<String>] {
        &self.categories
    }

    /// Get the number of categories per input feature.
    pub fn n_values(&self) -> Vec<usize> {
        self.categories.iter().map(Vec::len).collect()
    }

    /// Output column names as `<input>_<category>`.
    pub fn feature_names_out(&self, input_features: &[String]) -> Vec<String> {
        input_features
            .iter()
            .zip(&self.categories)
            .flat_map(|(name, cats)| cats.iter().map(move |c| format!("{}_{}", name, c)))
            .collect()
    }
}

impl Transformer for OneHotEncoder {
    type Input = Array2<Option<String>>;
    type Output = Array2<f64>;
    type Params = OneHotEncoderParams;
    type Fitted = FittedOneHotEncoder;

    fn fit(&self, data: &Self::Input) -> Result<Self::Fitted, PreprocessingError> {
        let (rows, cols) = data.dim();

        if rows == 0 {
            return Err(PreprocessingError::EmptyData(
                "Cannot fit OneHotEncoder on empty data".to_string(),
            ));
        }

        let mut categories = Vec::with_capacity(cols);
        for (col, column) in data.axis_iter(Axis(1)).enumerate() {
            let mut col_cats: BTreeSet<&str> = BTreeSet::new();
            for (row, cell) in column.iter().enumerate() {
                match cell {
                    Some(value) => {
                        col_cats.insert(value.as_str());
                    }
                    None => {
                        return Err(PreprocessingError::MissingValues(format!(
                            "OneHotEncoder found a missing value at ({}, {}); impute first",
                            row, col
                        )));
                    }
                }
            }
            categories.push(col_cats.into_iter().map(str::to_string).collect());
        }

        Ok(FittedOneHotEncoder::from_categories(
            categories,
            self.handle_unknown,
        ))
    }
}

impl FittedTransformer for FittedOneHotEncoder {
    type Input = Array2<Option<String>>;
    type Output = Array2<f64>;
    type Params = OneHotEncoderParams;

    fn transform(&self, data: &Self::Input) -> Result<Self::Output, PreprocessingError> {
        let (rows, cols) = data.dim();

        if cols != self.categories.len() {
            return Err(PreprocessingError::FeatureMismatch {
                expected_features: self.categories.len(),
                got_features: cols,
            });
        }

        let mut result = Array2::<f64>::zeros((rows, self.n_features_out));

        for (row, record) in data.axis_iter(Axis(0)).enumerate() {
            for (col, cell) in record.iter().enumerate() {
                let value = cell.as_deref().ok_or_else(|| {
                    PreprocessingError::MissingValues(format!(
                        "OneHotEncoder found a missing value at ({}, {}); impute first",
                        row, col
                    ))
                })?;

                // Categories are sorted, so binary search finds the index.
                match self.categories[col].binary_search_by(|c| c.as_str().cmp(value)) {
                    Ok(idx) => result[[row, self.offsets[col] + idx]] = 1.0,
                    Err(_) if self.handle_unknown == HandleUnknown::Ignore => {}
                    Err(_) => {
                        return Err(PreprocessingError::UnknownCategory {
                            column: col,
                            name: None,
                            category: value.to_string(),
                        })
                    }
                }
            }
        }

        Ok(result)
    }

    fn extract_params(&self) -> Self::Params {
        OneHotEncoderParams {
            categories: self.categories.clone(),
            n_features_in: self.categories.len(),
            handle_unknown: self.handle_unknown,
        }
    }

    fn from_params(params: Self::Params) -> Result<Self, PreprocessingError> {
        if params.categories.len() != params.n_features_in {
            return Err(PreprocessingError::InvalidShape {
                expected: format!("{} category lists", params.n_features_in),
                got: format!("{} category lists", params.categories.len()),
            });
        }
        if params
            .categories
            .iter()
            .any(|cats| cats.windows(2).any(|w| w[0] >= w[1]))
        {
            return Err(PreprocessingError::InvalidParameter(
                "OneHotEncoder categories must be sorted and unique".to_string(),
            ));
        }
        Ok(Self::from_categories(
            params.categories,
            params.handle_unknown,
        ))
    }

    fn n_features_in(&self) -> usize {
        self.categories.len()
    }

    fn n_features_out(&self) -> usize {
        self.n_features_out
    }
}
