//! Simple Imputer for numeric columns.
//!
//! Imputation transformer for completing missing values.
//! Supports mean, median, most_frequent, and constant strategies.
//!
//! Note: This implementation treats NaN as missing values.
//!
//! # Example
//! ```ignore
//! use scoreprep::preprocessing::{Transformer, SimpleImputer, ImputeStrategy};
//!
//! let imputer = SimpleImputer::new(ImputeStrategy::Median);
//! let fitted = imputer.fit(&data)?;
//! let imputed = fitted.transform(&data)?;
//! ```

use crate::preprocessing::error::PreprocessingError;
use crate::preprocessing::traits::{FittedTransformer, Transformer};
use ndarray::{Array2, ArrayView1, Axis};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::BTreeMap;

/// Strategy for imputing missing numeric values.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub enum ImputeStrategy {
    /// Replace missing values with the mean of each column.
    #[default]
    Mean,
    /// Replace missing values with the median of each column.
    Median,
    /// Replace missing values with the most frequent value of each column.
    MostFrequent,
    /// Replace missing values with a constant value.
    Constant(f64),
}

/// Serializable parameters for a fitted SimpleImputer.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SimpleImputerParams {
    /// Strategy used for imputation.
    pub strategy: ImputeStrategy,
    /// Statistics (fill values) for each feature.
    pub statistics: Vec<f64>,
    /// Number of features seen during fit.
    pub n_features: usize,
}

/// SimpleImputer transformer (unfitted).
#[derive(Clone, Debug, Default)]
pub struct SimpleImputer {
    strategy: ImputeStrategy,
}

impl SimpleImputer {
    /// Create a new SimpleImputer with the specified strategy.
    pub fn new(strategy: ImputeStrategy) -> Self {
        Self { strategy }
    }

    /// The configured strategy.
    pub fn strategy(&self) -> &ImputeStrategy {
        &self.strategy
    }
}

/// Median of an unsorted slice. Even counts average the two middle values.
fn median(values: &mut [f64]) -> f64 {
    values.sort_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));
    let n = values.len();
    if n % 2 == 0 {
        (values[n / 2 - 1] + values[n / 2]) / 2.0
    } else {
        values[n / 2]
    }
}

/// Most frequent value; ties go to the smallest value.
fn most_frequent(values: &[f64]) -> f64 {
    let mut counts: BTreeMap<OrderedBits, usize> = BTreeMap::new();
    for &v in values {
        *counts.entry(OrderedBits(v)).or_insert(0) += 1;
    }
    // BTreeMap iterates in ascending order; keep the first maximum.
    let mut best: Option<(f64, usize)> = None;
    for (key, count) in counts {
        if best.map_or(true, |(_, c)| count > c) {
            best = Some((key.0, count));
        }
    }
    best.map(|(v, _)| v).unwrap_or(0.0)
}

/// Total ordering wrapper so non-NaN floats can key a `BTreeMap`.
#[derive(Clone, Copy, PartialEq)]
struct OrderedBits(f64);

impl Eq for OrderedBits {}

impl PartialOrd for OrderedBits {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for OrderedBits {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

/// Compute the fill value for a single column, ignoring NaN values.
fn column_statistic(column: ArrayView1<'_, f64>, strategy: &ImputeStrategy) -> Option<f64> {
    if let ImputeStrategy::Constant(val) = strategy {
        return Some(*val);
    }

    let mut present: Vec<f64> = column.iter().copied().filter(|v| !v.is_nan()).collect();
    if present.is_empty() {
        return None;
    }

    Some(match strategy {
        ImputeStrategy::Mean => present.iter().sum::<f64>() / present.len() as f64,
        ImputeStrategy::Median => median(&mut present),
        ImputeStrategy::MostFrequent => most_frequent(&present),
        ImputeStrategy::Constant(val) => *val,
    })
}

impl Transformer for SimpleImputer {
    type Input = Array2<f64>;
    type Output = Array2<f64>;
    type Params = SimpleImputerParams;
    type Fitted = FittedSimpleImputer;

    fn fit(&self, data: &Self::Input) -> Result<Self::Fitted, PreprocessingError> {
        let (rows, cols) = data.dim();

        if rows == 0 {
            return Err(PreprocessingError::EmptyData(
                "Cannot fit SimpleImputer on empty data".to_string(),
            ));
        }

        let statistics = data
            .axis_iter(Axis(1))
            .enumerate()
            .map(|(col, column)| {
                column_statistic(column, &self.strategy).unwrap_or_else(|| {
                    tracing::warn!(column = col, "all values missing, imputing 0.0");
                    0.0
                })
            })
            .collect();

        Ok(FittedSimpleImputer {
            strategy: self.strategy.clone(),
            statistics,
            n_features: cols,
        })
    }
}

/// Fitted SimpleImputer ready for inference.
#[derive(Clone, Debug)]
pub struct FittedSimpleImputer {
    strategy: ImputeStrategy,
    statistics: Vec<f64>,
    n_features: usize,
}

impl FittedSimpleImputer {
    /// Get the imputation statistics (fill values) for each feature.
    pub fn statistics(&self) -> &[f64] {
        &self.statistics
    }

    /// The strategy the statistics were computed with.
    pub fn strategy(&self) -> &ImputeStrategy {
        &self.strategy
    }
}

impl FittedTransformer for FittedSimpleImputer {
    type Input = Array2<f64>;
    type Output = Array2<f64>;
    type Params = SimpleImputerParams;

    fn transform(&self, data: &Self::Input) -> Result<Self::Output, PreprocessingError> {
        let cols = data.ncols();

        if cols != self.n_features {
            return Err(PreprocessingError::FeatureMismatch {
                expected_features: self.n_features,
                got_features: cols,
            });
        }

        let mut result = data.clone();
        for (mut column, &fill) in result.axis_iter_mut(Axis(1)).zip(&self.statistics) {
            column.mapv_inplace(|v| if v.is_nan() { fill } else { v });
        }
        Ok(result)
    }

    fn extract_params(&self) -> Self::Params {
        SimpleImputerParams {
            strategy: self.strategy.clone(),
            statistics: self.statistics.clone(),
            n_features: self.n_features,
        }
    }

    fn from_params(params: Self::Params) -> Result<Self, PreprocessingError> {
        if params.statistics.len() != params.n_features {
            return Err(PreprocessingError::InvalidShape {
                expected: format!("{} statistics", params.n_features),
                got: format!("{} statistics", params.statistics.len()),
            });
        }

        Ok(Self {
            strategy: params.strategy,
            statistics: params.statistics,
            n_features: params.n_features,
        })
    }

    fn n_features_in(&self) -> usize {
        self.n_features
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    fn create_test_data_with_missing() -> Array2<f64> {
        array![[1.0, f64::NAN], [3.0, 4.0], [5.0, 6.0]]
    }

    #[test]
    fn test_simple_imputer_mean() {
        let data = create_test_data_with_missing();
        let imputer = SimpleImputer::new(ImputeStrategy::Mean);
        let fitted = imputer.fit(&data).unwrap();

        let stats = fitted.statistics();
        // Column 0: mean of [1, 3, 5] = 3
        // Column 1: mean of [4, 6] = 5 (NaN excluded)
        assert!((stats[0] - 3.0).abs() < 1e-12);
        assert!((stats[1] - 5.0).abs() < 1e-12);

        let imputed = fitted.transform(&data).unwrap();
        assert_eq!(imputed, array![[1.0, 5.0], [3.0, 4.0], [5.0, 6.0]]);
    }

    #[test]
    fn test_simple_imputer_median() {
        let data = array![[1.0, f64::NAN], [3.0, 4.0], [5.0, 6.0], [100.0, 10.0]];
        let imputer = SimpleImputer::new(ImputeStrategy::Median);
        let fitted = imputer.fit(&data).unwrap();

        let stats = fitted.statistics();
        // Column 0: median of [1, 3, 5, 100] = 4
        // Column 1: median of [4, 6, 10] = 6
        assert!((stats[0] - 4.0).abs() < 1e-12);
        assert!((stats[1] - 6.0).abs() < 1e-12);

        let imputed = fitted.transform(&data).unwrap();
        assert!((imputed[[0, 1]] - 6.0).abs() < 1e-12);
    }

    #[test]
    fn test_simple_imputer_constant() {
        let data = create_test_data_with_missing();
        let imputer = SimpleImputer::new(ImputeStrategy::Constant(-1.0));
        let fitted = imputer.fit(&data).unwrap();

        assert_eq!(fitted.statistics(), &[-1.0, -1.0]);

        let imputed = fitted.transform(&data).unwrap();
        assert!((imputed[[0, 1]] - (-1.0)).abs() < 1e-12);
    }

    #[test]
    fn test_simple_imputer_most_frequent() {
        // col 0: [1, 1, 2], col 1: [NaN, 2, 2]
        let data = array![[1.0, f64::NAN], [1.0, 2.0], [2.0, 2.0]];

        let imputer = SimpleImputer::new(ImputeStrategy::MostFrequent);
        let fitted = imputer.fit(&data).unwrap();

        assert_eq!(fitted.statistics(), &[1.0, 2.0]);
    }

    #[test]
    fn test_simple_imputer_most_frequent_tie_picks_smallest() {
        let data = array![[3.0], [1.0], [3.0], [1.0], [2.0]];
        let fitted = SimpleImputer::new(ImputeStrategy::MostFrequent)
            .fit(&data)
            .unwrap();

        assert_eq!(fitted.statistics(), &[1.0]);
    }

    #[test]
    fn test_simple_imputer_all_missing_column() {
        let data = array![[f64::NAN, 1.0], [f64::NAN, 2.0]];
        let fitted = SimpleImputer::new(ImputeStrategy::Median)
            .fit(&data)
            .unwrap();

        assert_eq!(fitted.statistics(), &[0.0, 1.5]);
    }

    #[test]
    fn test_simple_imputer_serialization() {
        let data = create_test_data_with_missing();
        let imputer = SimpleImputer::new(ImputeStrategy::Median);
        let fitted = imputer.fit(&data).unwrap();

        let params = fitted.extract_params();
        let restored = FittedSimpleImputer::from_params(params).unwrap();

        assert_eq!(
            fitted.transform(&data).unwrap(),
            restored.transform(&data).unwrap()
        );
    }

    #[test]
    fn test_simple_imputer_from_params_rejects_bad_shape() {
        let params = SimpleImputerParams {
            strategy: ImputeStrategy::Mean,
            statistics: vec![1.0],
            n_features: 2,
        };
        assert!(matches!(
            FittedSimpleImputer::from_params(params),
            Err(PreprocessingError::InvalidShape { .. })
        ));
    }

    #[test]
    fn test_simple_imputer_feature_mismatch() {
        let data = create_test_data_with_missing(); // 2 features
        let fitted = SimpleImputer::new(ImputeStrategy::Mean).fit(&data).unwrap();

        let wrong_data = array![[1.0, 2.0, 3.0]];
        let result = fitted.transform(&wrong_data);

        assert!(matches!(
            result,
            Err(PreprocessingError::FeatureMismatch {
                expected_features: 2,
                got_features: 3
            })
        ));
    }

    #[test]
    fn test_simple_imputer_empty_data() {
        let data = Array2::<f64>::zeros((0, 2));
        let result = SimpleImputer::new(ImputeStrategy::Mean).fit(&data);

        assert!(matches!(result, Err(PreprocessingError::EmptyData(_))));
    }

    #[test]
    fn test_simple_imputer_save_load_file() {
        let data = create_test_data_with_missing();
        let fitted = SimpleImputer::new(ImputeStrategy::Mean).fit(&data).unwrap();

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("imputer.bin");
        fitted.save_to_file(&path).unwrap();

        let loaded = FittedSimpleImputer::load_from_file(&path).unwrap();

        assert_eq!(loaded.n_features_in(), fitted.n_features_in());
        assert_eq!(
            loaded.transform(&data).unwrap(),
            fitted.transform(&data).unwrap()
        );
    }
}
