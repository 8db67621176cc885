//! ColumnTransformer implementation.
//!
//! Applies a pipeline to each named group of table columns and concatenates
//! the results horizontally, in group declaration order. Columns not claimed
//! by any group are dropped.

use crate::dataset::Table;
use crate::preprocessing::error::PreprocessingError;
use crate::preprocessing::pipeline::{Block, ColumnKind, FittedPipeline, Pipeline, PipelineParams};
use crate::preprocessing::traits::{FittedTransformer, Transformer};
use ndarray::{concatenate, Array2, ArrayView2, Axis};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// A named set of columns of one kind, processed by one pipeline.
#[derive(Clone, Debug)]
pub struct FeatureGroup {
    name: String,
    kind: ColumnKind,
    columns: Vec<String>,
    pipeline: Pipeline,
}

impl FeatureGroup {
    pub fn new<I, S>(name: impl Into<String>, kind: ColumnKind, columns: I, pipeline: Pipeline) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            kind,
            columns: columns.into_iter().map(Into::into).collect(),
            pipeline,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> ColumnKind {
        self.kind
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn pipeline(&self) -> &Pipeline {
        &self.pipeline
    }

    fn validate(&self) -> Result<(), PreprocessingError> {
        if self.columns.is_empty() {
            return Err(PreprocessingError::InvalidParameter(format!(
                "feature group '{}' has no columns",
                self.name
            )));
        }

        let mut seen = HashSet::new();
        if let Some(dup) = self.columns.iter().find(|c| !seen.insert(c.as_str())) {
            return Err(PreprocessingError::InvalidParameter(format!(
                "feature group '{}' lists column '{}' more than once",
                self.name, dup
            )));
        }

        let output = self.pipeline.validate(self.kind)?;
        if output != ColumnKind::Numeric {
            return Err(PreprocessingError::InvalidParameter(format!(
                "feature group '{}' must produce numeric output, pipeline ends {}",
                self.name, output
            )));
        }
        Ok(())
    }
}

/// ColumnTransformer (unfitted).
///
/// # Example
/// ```ignore
/// let ct = ColumnTransformer::new()
///     .add_group(FeatureGroup::new("numerical_features", ColumnKind::Numeric, ["reading_score"], numeric))
///     .add_group(FeatureGroup::new("categorical_features", ColumnKind::Categorical, ["gender"], categorical));
///
/// let fitted = ct.fit(&train)?;
/// let features = fitted.transform(&test)?;
/// ```
#[derive(Clone, Debug, Default)]
pub struct ColumnTransformer {
    groups: Vec<FeatureGroup>,
}

impl ColumnTransformer {
    /// Create a new empty ColumnTransformer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a feature group.
    pub fn add_group(mut self, group: FeatureGroup) -> Self {
        self.groups.push(group);
        self
    }

    /// Get the number of groups.
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    /// Check if there are no groups.
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn groups(&self) -> &[FeatureGroup] {
        &self.groups
    }

    /// Check the configuration without looking at any data.
    pub fn validate(&self) -> Result<(), PreprocessingError> {
        if self.groups.is_empty() {
            return Err(PreprocessingError::InvalidParameter(
                "Cannot fit empty ColumnTransformer".to_string(),
            ));
        }

        let mut names = HashSet::new();
        for group in &self.groups {
            if !names.insert(group.name.as_str()) {
                return Err(PreprocessingError::InvalidParameter(format!(
                    "duplicate feature group name '{}'",
                    group.name
                )));
            }
            group.validate()?;
        }
        Ok(())
    }
}

/// Serializable parameters for one fitted feature group.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FeatureGroupParams {
    pub name: String,
    pub kind: ColumnKind,
    pub columns: Vec<String>,
    pub pipeline: PipelineParams,
}

/// Serializable parameters for a fitted ColumnTransformer.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ColumnTransformerParams {
    /// Groups in output order.
    pub groups: Vec<FeatureGroupParams>,
    /// Number of output features.
    pub n_features_out: usize,
}

/// A feature group with its fitted pipeline.
#[derive(Clone, Debug)]
pub struct FittedFeatureGroup {
    name: String,
    kind: ColumnKind,
    columns: Vec<String>,
    pipeline: FittedPipeline,
}

impl FittedFeatureGroup {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> ColumnKind {
        self.kind
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn pipeline(&self) -> &FittedPipeline {
        &self.pipeline
    }

    fn transform(&self, table: &Table) -> Result<Array2<f64>, PreprocessingError> {
        let block = extract_block(table, self.kind, &self.columns)?;
        match self.pipeline.transform(&block) {
            Ok(output) => output.into_numeric(&self.name),
            // Categorical steps keep column positions, so the index maps to a group column.
            Err(PreprocessingError::UnknownCategory {
                column,
                name: None,
                category,
            }) => Err(PreprocessingError::UnknownCategory {
                column,
                name: self.columns.get(column).cloned(),
                category,
            }),
            Err(e) => Err(e),
        }
    }
}

/// Fitted ColumnTransformer ready for inference.
#[derive(Clone, Debug)]
pub struct FittedColumnTransformer {
    groups: Vec<FittedFeatureGroup>,
    n_features_out: usize,
}

impl FittedColumnTransformer {
    pub fn groups(&self) -> &[FittedFeatureGroup] {
        &self.groups
    }

    /// Look up a fitted group by name.
    pub fn group(&self, name: &str) -> Option<&FittedFeatureGroup> {
        self.groups.iter().find(|g| g.name == name)
    }

    /// Output column names, e.g. `reading_score` or `gender_female`.
    pub fn feature_names_out(&self) -> Vec<String> {
        self.groups
            .iter()
            .flat_map(|g| g.pipeline.feature_names_out(&g.columns))
            .collect()
    }
}

impl Transformer for ColumnTransformer {
    type Input = Table;
    type Output = Array2<f64>;
    type Params = ColumnTransformerParams;
    type Fitted = FittedColumnTransformer;

    fn fit(&self, data: &Self::Input) -> Result<Self::Fitted, PreprocessingError> {
        self.validate()?;

        if data.n_rows() == 0 {
            return Err(PreprocessingError::EmptyData(
                "Cannot fit ColumnTransformer on empty data".to_string(),
            ));
        }

        let mut groups = Vec::with_capacity(self.groups.len());
        let mut n_features_out = 0;

        for group in &self.groups {
            let block = extract_block(data, group.kind, &group.columns)?;
            let pipeline = group.pipeline.fit(&block)?;

            tracing::debug!(
                group = %group.name,
                n_features_in = group.columns.len(),
                n_features_out = pipeline.n_features_out(),
                steps = ?pipeline.step_names(),
                "fitted feature group"
            );

            n_features_out += pipeline.n_features_out();
            groups.push(FittedFeatureGroup {
                name: group.name.clone(),
                kind: group.kind,
                columns: group.columns.clone(),
                pipeline,
            });
        }

        Ok(FittedColumnTransformer {
            groups,
            n_features_out,
        })
    }
}

impl FittedTransformer for FittedColumnTransformer {
    type Input = Table;
    type Output = Array2<f64>;
    type Params = ColumnTransformerParams;

    fn transform(&self, data: &Self::Input) -> Result<Self::Output, PreprocessingError> {
        for group in &self.groups {
            check_columns(data, &group.columns)?;
        }

        if data.n_rows() == 0 {
            return Ok(Array2::zeros((0, self.n_features_out)));
        }

        let outputs = self
            .groups
            .iter()
            .map(|g| g.transform(data))
            .collect::<Result<Vec<_>, _>>()?;

        hcat(&outputs)
    }

    fn extract_params(&self) -> Self::Params {
        ColumnTransformerParams {
            groups: self
                .groups
                .iter()
                .map(|g| FeatureGroupParams {
                    name: g.name.clone(),
                    kind: g.kind,
                    columns: g.columns.clone(),
                    pipeline: g.pipeline.extract_params(),
                })
                .collect(),
            n_features_out: self.n_features_out,
        }
    }

    fn from_params(params: Self::Params) -> Result<Self, PreprocessingError> {
        if params.groups.is_empty() {
            return Err(PreprocessingError::InvalidParameter(
                "ColumnTransformer params contain no groups".to_string(),
            ));
        }

        let mut groups = Vec::with_capacity(params.groups.len());
        let mut n_features_out = 0;

        for g in params.groups {
            let pipeline = FittedPipeline::from_params(g.pipeline)?;
            if pipeline.input_kind() != g.kind || pipeline.output_kind() != ColumnKind::Numeric {
                return Err(PreprocessingError::InvalidParameter(format!(
                    "feature group '{}' pipeline does not map {} input to numeric output",
                    g.name, g.kind
                )));
            }
            if pipeline.n_features_in() != g.columns.len() {
                return Err(PreprocessingError::FeatureMismatch {
                    expected_features: g.columns.len(),
                    got_features: pipeline.n_features_in(),
                });
            }
            n_features_out += pipeline.n_features_out();
            groups.push(FittedFeatureGroup {
                name: g.name,
                kind: g.kind,
                columns: g.columns,
                pipeline,
            });
        }

        if n_features_out != params.n_features_out {
            return Err(PreprocessingError::InvalidShape {
                expected: format!("{} output features", params.n_features_out),
                got: format!("{} output features", n_features_out),
            });
        }

        Ok(Self {
            groups,
            n_features_out,
        })
    }

    fn n_features_in(&self) -> usize {
        self.groups.iter().map(|g| g.columns.len()).sum()
    }

    fn n_features_out(&self) -> usize {
        self.n_features_out
    }
}

fn check_columns(table: &Table, columns: &[String]) -> Result<(), PreprocessingError> {
    match columns.iter().find(|c| !table.has_column(c)) {
        Some(missing) => Err(PreprocessingError::MissingColumn(missing.clone())),
        None => Ok(()),
    }
}

/// Extract the given columns of a table as a block of the given kind.
fn extract_block(
    table: &Table,
    kind: ColumnKind,
    columns: &[String],
) -> Result<Block, PreprocessingError> {
    check_columns(table, columns)?;
    Ok(match kind {
        ColumnKind::Numeric => Block::Numeric(table.numeric_matrix(columns)?),
        ColumnKind::Categorical => Block::Categorical(table.categorical_matrix(columns)?),
    })
}

/// Horizontally concatenate group outputs.
fn hcat(blocks: &[Array2<f64>]) -> Result<Array2<f64>, PreprocessingError> {
    let views: Vec<ArrayView2<f64>> = blocks.iter().map(|b| b.view()).collect();
    concatenate(Axis(1), &views).map_err(|e| PreprocessingError::InvalidShape {
        expected: "group outputs with equal row counts".to_string(),
        got: e.to_string(),
    })
}
