//! Train/test transformation run.
//!
//! Reads both splits, fits the preprocessing object on the training features
//! only, transforms both splits with it, appends the target as the last
//! column and persists the fitted object.

use super::builder::build_preprocessor;
use super::schema::TARGET_COLUMN;
use crate::config::TransformationConfig;
use crate::dataset::{DatasetError, Table};
use crate::error::{Context, ProcessingError};
use crate::preprocessing::{
    ColumnTransformerParams, FittedColumnTransformer, FittedTransformer, Transformer,
};
use crate::serialization::load_object;
use ndarray::{concatenate, Array1, Array2, Axis, ShapeError};
use std::path::{Path, PathBuf};
use tracing::info;

/// Arrays produced by [`DataTransformation::transform`].
#[derive(Debug, Clone)]
pub struct TransformationOutput {
    /// Transformed training features with the target as the last column.
    pub train: Array2<f64>,
    /// Transformed evaluation features with the target as the last column.
    pub test: Array2<f64>,
    /// Where the fitted preprocessing object was written.
    pub preprocessor_path: PathBuf,
}

impl TransformationOutput {
    pub fn into_parts(self) -> (Array2<f64>, Array2<f64>, PathBuf) {
        (self.train, self.test, self.preprocessor_path)
    }
}

#[derive(Debug, Clone, Default)]
pub struct DataTransformation {
    config: TransformationConfig,
}

impl DataTransformation {
    pub fn new(config: TransformationConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &TransformationConfig {
        &self.config
    }

    /// Fit on `train_path`, transform both files and persist the fitted object.
    ///
    /// Both tables are read before anything is fit, so a bad path leaves any
    /// existing artifact untouched.
    pub fn transform(
        &self,
        train_path: impl AsRef<Path>,
        test_path: impl AsRef<Path>,
    ) -> Result<TransformationOutput, ProcessingError> {
        let train_path = train_path.as_ref();
        let test_path = test_path.as_ref();

        let train = Table::from_csv_path(train_path)
            .with_context(|| format!("reading training data from {}", train_path.display()))?;
        let test = Table::from_csv_path(test_path)
            .with_context(|| format!("reading test data from {}", test_path.display()))?;
        info!(
            train_rows = train.n_rows(),
            test_rows = test.n_rows(),
            "Reading of train and test data is completed"
        );

        info!("Obtaining preprocessing object");
        let preprocessor = build_preprocessor()?;

        let (train_features, train_target) =
            split_target(&train).context("separating target from training data")?;
        let (test_features, test_target) =
            split_target(&test).context("separating target from test data")?;

        info!("Applying preprocessing object on training and testing data");
        let fitted = preprocessor
            .fit(&train_features)
            .context("fitting preprocessing object on training data")?;
        let train_x = fitted
            .transform(&train_features)
            .context("transforming training data")?;
        let test_x = fitted
            .transform(&test_features)
            .context("transforming test data")?;

        let train = append_target(train_x, &train_target)
            .context("appending target to training features")?;
        let test =
            append_target(test_x, &test_target).context("appending target to test features")?;

        let preprocessor_path = self.config.preprocessor_path.clone();
        fitted.save_to_file(&preprocessor_path).with_context(|| {
            format!(
                "saving preprocessing object to {}",
                preprocessor_path.display()
            )
        })?;
        info!(
            path = %preprocessor_path.display(),
            n_features_out = fitted.n_features_out(),
            "Saved preprocessing object"
        );

        Ok(TransformationOutput {
            train,
            test,
            preprocessor_path,
        })
    }

    /// Load a preprocessing object written by [`transform`](Self::transform).
    pub fn load_preprocessor(
        path: impl AsRef<Path>,
    ) -> Result<FittedColumnTransformer, ProcessingError> {
        let path = path.as_ref();
        let params: ColumnTransformerParams = load_object(path)
            .with_context(|| format!("loading preprocessing object from {}", path.display()))?;
        FittedColumnTransformer::from_params(params).context("restoring preprocessing object")
    }
}

/// Split a table into feature columns and the numeric target.
///
/// Missing target cells become NaN.
fn split_target(table: &Table) -> Result<(Table, Array1<f64>), DatasetError> {
    let target = table.numeric_column(TARGET_COLUMN)?;
    let features = table.drop_column(TARGET_COLUMN)?;
    Ok((features, target))
}

fn append_target(features: Array2<f64>, target: &Array1<f64>) -> Result<Array2<f64>, ShapeError> {
    concatenate(
        Axis(1),
        &[features.view(), target.view().insert_axis(Axis(1))],
    )
}
