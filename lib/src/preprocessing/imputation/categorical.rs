//! Imputer for string-valued categorical columns.
//!
//! Missing cells are `None`. The fitted imputer fills them with a value per
//! column: the most frequent category seen during fit, or a constant.

use crate::preprocessing::error::PreprocessingError;
use crate::preprocessing::traits::{FittedTransformer, Transformer};
use ndarray::{Array2, Axis};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Strategy for imputing missing categories.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub enum CategoricalStrategy {
    /// Most frequent category; ties resolve to the lexicographically smallest.
    #[default]
    MostFrequent,
    /// Fill with a literal category.
    Constant(String),
}

/// Serializable parameters for a fitted CategoricalImputer.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CategoricalImputerParams {
    pub strategy: CategoricalStrategy,
    pub fill_values: Vec<String>,
    pub n_features: usize,
}

/// CategoricalImputer transformer (unfitted).
#[derive(Clone, Debug, Default)]
pub struct CategoricalImputer {
    strategy: CategoricalStrategy,
}

impl CategoricalImputer {
    pub fn new(strategy: CategoricalStrategy) -> Self {
        Self { strategy }
    }

    pub fn strategy(&self) -> &CategoricalStrategy {
        &self.strategy
    }
}

fn most_frequent<'a>(values: impl Iterator<Item = &'a str>) -> Option<String> {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for v in values {
        *counts.entry(v).or_insert(0) += 1;
    }
    let mut best: Option<(&str, usize)> = None;
    for (value, count) in counts {
        if best.map_or(true, |(_, c)| count > c) {
            best = Some((value, count));
        }
    }
    best.map(|(v, _)| v.to_string())
}

impl Transformer for CategoricalImputer {
    type Input = Array2<Option<String>>;
    type Output = Array2<Option<String>>;
    type Params = CategoricalImputerParams;
    type Fitted = FittedCategoricalImputer;

    fn fit(&self, data: &Self::Input) -> Result<Self::Fitted, PreprocessingError> {
        let (rows, cols) = data.dim();

        if rows == 0 {
            return Err(PreprocessingError::EmptyData(
                "Cannot fit CategoricalImputer on empty data".to_string(),
            ));
        }

        let fill_values = match &self.strategy {
            CategoricalStrategy::Constant(value) => vec![value.clone(); cols],
            CategoricalStrategy::MostFrequent => data
                .axis_iter(Axis(1))
                .enumerate()
                .map(|(col, column)| {
                    most_frequent(column.iter().filter_map(|v| v.as_deref())).ok_or_else(|| {
                        PreprocessingError::MissingValues(format!(
                            "column {} has no observed category to impute with",
                            col
                        ))
                    })
                })
                .collect::<Result<Vec<_>, _>>()?,
        };

        Ok(FittedCategoricalImputer {
            strategy: self.strategy.clone(),
            fill_values,
            n_features: cols,
        })
    }
}

/// Fitted CategoricalImputer ready for inference.
#[derive(Clone, Debug)]
pub struct FittedCategoricalImputer {
    strategy: CategoricalStrategy,
    fill_values: Vec<String>,
    n_features: usize,
}

impl FittedCategoricalImputer {
    /// Fill value learned for each column.
    pub fn fill_values(&self) -> &[String] {
        &self.fill_values
    }
}

impl FittedTransformer for FittedCategoricalImputer {
    type Input = Array2<Option<String>>;
    type Output = Array2<Option<String>>;
    type Params = CategoricalImputerParams;

    fn transform(&self, data: &Self::Input) -> Result<Self::Output, PreprocessingError> {
        let cols = data.ncols();

        if cols != self.n_features {
            return Err(PreprocessingError::FeatureMismatch {
                expected_features: self.n_features,
                got_features: cols,
            });
        }

        let mut result = data.clone();
        for (mut column, fill) in result.axis_iter_mut(Axis(1)).zip(&self.fill_values) {
            for cell in column.iter_mut().filter(|c| c.is_none()) {
                *cell = Some(fill.clone());
            }
        }
        Ok(result)
    }

    fn extract_params(&self) -> Self::Params {
        CategoricalImputerParams {
            strategy: self.strategy.clone(),
            fill_values: self.fill_values.clone(),
            n_features: self.n_features,
        }
    }

    fn from_params(params: Self::Params) -> Result<Self, PreprocessingError> {
        if params.fill_values.len() != params.n_features {
            return Err(PreprocessingError::InvalidShape {
                expected: format!("{} fill values", params.n_features),
                got: format!("{} fill values", params.fill_values.len()),
            });
        }

        Ok(Self {
            strategy: params.strategy,
            fill_values: params.fill_values,
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

    fn cells(rows: &[&[Option<&str>]]) -> Array2<Option<String>> {
        let n_rows = rows.len();
        let n_cols = rows.first().map_or(0, |r| r.len());
        let flat = rows
            .iter()
            .flat_map(|r| r.iter().map(|c| c.map(str::to_string)))
            .collect();
        Array2::from_shape_vec((n_rows, n_cols), flat).unwrap()
    }

    #[test]
    fn test_categorical_imputer_most_frequent() {
        let data = cells(&[
            &[Some("female"), None],
            &[Some("male"), Some("standard")],
            &[Some("female"), Some("standard")],
            &[None, Some("free/reduced")],
        ]);

        let fitted = CategoricalImputer::default().fit(&data).unwrap();
        assert_eq!(fitted.fill_values(), &["female", "standard"]);

        let imputed = fitted.transform(&data).unwrap();
        assert_eq!(imputed[[0, 1]].as_deref(), Some("standard"));
        assert_eq!(imputed[[3, 0]].as_deref(), Some("female"));
        assert!(imputed.iter().all(Option::is_some));
    }

    #[test]
    fn test_categorical_imputer_tie_picks_smallest() {
        let data = cells(&[&[Some("b")], &[Some("a")], &[Some("b")], &[Some("a")]]);
        let fitted = CategoricalImputer::default().fit(&data).unwrap();
        assert_eq!(fitted.fill_values(), &["a"]);
    }

    #[test]
    fn test_categorical_imputer_constant() {
        let data = cells(&[&[None], &[Some("x")]]);
        let fitted = CategoricalImputer::new(CategoricalStrategy::Constant("missing".into()))
            .fit(&data)
            .unwrap();

        let imputed = fitted.transform(&data).unwrap();
        assert_eq!(imputed[[0, 0]].as_deref(), Some("missing"));
    }

    #[test]
    fn test_categorical_imputer_all_missing_column() {
        let data = cells(&[&[Some("a"), None], &[Some("b"), None]]);
        let result = CategoricalImputer::default().fit(&data);
        assert!(matches!(result, Err(PreprocessingError::MissingValues(_))));
    }

    #[test]
    fn test_categorical_imputer_empty_data() {
        let data = Array2::<Option<String>>::from_elem((0, 3), None);
        let result = CategoricalImputer::default().fit(&data);
        assert!(matches!(result, Err(PreprocessingError::EmptyData(_))));
    }

    #[test]
    fn test_categorical_imputer_feature_mismatch() {
        let fitted = CategoricalImputer::default()
            .fit(&cells(&[&[Some("a")]]))
            .unwrap();
        let result = fitted.transform(&cells(&[&[Some("a"), Some("b")]]));
        assert!(matches!(
            result,
            Err(PreprocessingError::FeatureMismatch { .. })
        ));
    }

    #[test]
    fn test_categorical_imputer_params_round_trip() {
        let data = cells(&[&[Some("a"), None], &[Some("a"), Some("z")]]);
        let fitted = CategoricalImputer::default().fit(&data).unwrap();

        let restored = FittedCategoricalImputer::from_params(fitted.extract_params()).unwrap();
        assert_eq!(
            restored.transform(&data).unwrap(),
            fitted.transform(&data).unwrap()
        );
    }
}
