//! ColumnTransformer for applying different pipelines to different columns.
//!
//! Each [`FeatureGroup`] names a subset of table columns, declares whether
//! they are numeric or categorical, and owns the pipeline applied to them.

#[allow(clippy::module_inception)]
mod column_transformer;

pub use column_transformer::{
    ColumnTransformer, ColumnTransformerParams, FeatureGroup, FeatureGroupParams,
    FittedColumnTransformer, FittedFeatureGroup,
};
