//! Construction of the untrained preprocessing object.

use super::schema::{
    CATEGORICAL_FEATURES, CATEGORICAL_GROUP, IMPUTER_STEP, NUMERICAL_FEATURES, NUMERICAL_GROUP,
    ONE_HOT_ENCODER_STEP, SCALER_STEP,
};
use crate::error::{Context, ProcessingError};
use crate::preprocessing::{
    CategoricalImputer, CategoricalStrategy, ColumnKind, ColumnTransformer, FeatureGroup,
    ImputeStrategy, OneHotEncoder, Pipeline, SimpleImputer, StandardScaler,
};

/// Median imputation followed by standardization.
pub fn numerical_pipeline() -> Pipeline {
    Pipeline::new()
        .add_step(IMPUTER_STEP, SimpleImputer::new(ImputeStrategy::Median))
        .add_step(SCALER_STEP, StandardScaler::new())
}

/// Mode imputation, dense one-hot encoding, then standardization of the indicators.
pub fn categorical_pipeline() -> Pipeline {
    Pipeline::new()
        .add_step(
            IMPUTER_STEP,
            CategoricalImputer::new(CategoricalStrategy::MostFrequent),
        )
        .add_step(ONE_HOT_ENCODER_STEP, OneHotEncoder::new())
        .add_step(SCALER_STEP, StandardScaler::new())
}

/// Build the composite transformer for the student schema.
///
/// Numeric features come first in the output, then the one-hot block.
/// Columns outside both groups, the target included, are dropped. No data is
/// seen here; statistics are learned when the result is fit.
pub fn build_preprocessor() -> Result<ColumnTransformer, ProcessingError> {
    let preprocessor = ColumnTransformer::new()
        .add_group(FeatureGroup::new(
            NUMERICAL_GROUP,
            ColumnKind::Numeric,
            NUMERICAL_FEATURES,
            numerical_pipeline(),
        ))
        .add_group(FeatureGroup::new(
            CATEGORICAL_GROUP,
            ColumnKind::Categorical,
            CATEGORICAL_FEATURES,
            categorical_pipeline(),
        ));

    preprocessor
        .validate()
        .context("building the preprocessing object")?;

    tracing::info!(columns = ?NUMERICAL_FEATURES, "numerical features pipeline");
    tracing::info!(columns = ?CATEGORICAL_FEATURES, "categorical features pipeline");

    Ok(preprocessor)
}
