//! Pipeline for chaining transformers over a single feature block.
//!
//! A Pipeline holds named steps, where the output of one step becomes the
//! input to the next. Blocks are either numeric (`Array2<f64>`) or
//! categorical (`Array2<Option<String>>`); each step declares which kind it
//! accepts and which kind it produces, so a categorical group can run an
//! imputer, then a one-hot encoder, then a scaler.
//!
//! # Example
//! ```ignore
//! use scoreprep::preprocessing::{
//!     Block, CategoricalImputer, OneHotEncoder, Pipeline, StandardScaler, Transformer,
//! };
//!
//! let pipeline = Pipeline::new()
//!     .add_step("imputer", CategoricalImputer::default())
//!     .add_step("one_hot_encoder", OneHotEncoder::new())
//!     .add_step("scaler", StandardScaler::new());
//!
//! let fitted = pipeline.fit(&Block::Categorical(data))?;
//! let transformed = fitted.transform(&Block::Categorical(new_data))?;
//! ```

use crate::preprocessing::encoding::{FittedOneHotEncoder, OneHotEncoder, OneHotEncoderParams};
use crate::preprocessing::error::PreprocessingError;
use crate::preprocessing::imputation::{
    CategoricalImputer, CategoricalImputerParams, FittedCategoricalImputer, FittedSimpleImputer,
    SimpleImputer, SimpleImputerParams,
};
use crate::preprocessing::scaling::{FittedStandardScaler, StandardScaler, StandardScalerParams};
use crate::preprocessing::traits::{FittedTransformer, Transformer};
use ndarray::Array2;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

/// Kind of values held by a feature block.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ColumnKind {
    /// Floating point values, NaN marks a missing cell.
    Numeric,
    /// String values, `None` marks a missing cell.
    Categorical,
}

impl ColumnKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ColumnKind::Numeric => "numeric",
            ColumnKind::Categorical => "categorical",
        }
    }
}

impl fmt::Display for ColumnKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A feature block flowing through a pipeline.
#[derive(Clone, Debug, PartialEq)]
pub enum Block {
    Numeric(Array2<f64>),
    Categorical(Array2<Option<String>>),
}

impl Block {
    pub fn kind(&self) -> ColumnKind {
        match self {
            Block::Numeric(_) => ColumnKind::Numeric,
            Block::Categorical(_) => ColumnKind::Categorical,
        }
    }

    pub fn nrows(&self) -> usize {
        match self {
            Block::Numeric(a) => a.nrows(),
            Block::Categorical(a) => a.nrows(),
        }
    }

    pub fn ncols(&self) -> usize {
        match self {
            Block::Numeric(a) => a.ncols(),
            Block::Categorical(a) => a.ncols(),
        }
    }

    /// Unwrap a numeric block; `context` names the consumer for the error.
    pub fn into_numeric(self, context: &str) -> Result<Array2<f64>, PreprocessingError> {
        match self {
            Block::Numeric(a) => Ok(a),
            Block::Categorical(_) => Err(PreprocessingError::InvalidInput {
                step: context.to_string(),
                expected: ColumnKind::Numeric.as_str(),
                got: ColumnKind::Categorical.as_str(),
            }),
        }
    }
}

/// An unfitted pipeline step.
#[derive(Clone, Debug)]
pub enum PipelineStep {
    SimpleImputer(SimpleImputer),
    CategoricalImputer(CategoricalImputer),
    OneHotEncoder(OneHotEncoder),
    StandardScaler(StandardScaler),
}

impl PipelineStep {
    /// Get the step type name for debugging.
    pub fn step_name(&self) -> &'static str {
        match self {
            PipelineStep::SimpleImputer(_) => "SimpleImputer",
            PipelineStep::CategoricalImputer(_) => "CategoricalImputer",
            PipelineStep::OneHotEncoder(_) => "OneHotEncoder",
            PipelineStep::StandardScaler(_) => "StandardScaler",
        }
    }

    /// Block kind accepted by this step.
    pub fn input_kind(&self) -> ColumnKind {
        match self {
            PipelineStep::SimpleImputer(_) | PipelineStep::StandardScaler(_) => ColumnKind::Numeric,
            PipelineStep::CategoricalImputer(_) | PipelineStep::OneHotEncoder(_) => {
                ColumnKind::Categorical
            }
        }
    }

    /// Block kind produced by this step.
    pub fn output_kind(&self) -> ColumnKind {
        match self {
            PipelineStep::CategoricalImputer(_) => ColumnKind::Categorical,
            _ => ColumnKind::Numeric,
        }
    }

    fn fit(&self, data: &Block) -> Result<FittedPipelineStep, PreprocessingError> {
        match (self, data) {
            (PipelineStep::SimpleImputer(t), Block::Numeric(x)) => {
                t.fit(x).map(FittedPipelineStep::SimpleImputer)
            }
            (PipelineStep::CategoricalImputer(t), Block::Categorical(x)) => {
                t.fit(x).map(FittedPipelineStep::CategoricalImputer)
            }
            (PipelineStep::OneHotEncoder(t), Block::Categorical(x)) => {
                t.fit(x).map(FittedPipelineStep::OneHotEncoder)
            }
            (PipelineStep::StandardScaler(t), Block::Numeric(x)) => {
                t.fit(x).map(FittedPipelineStep::StandardScaler)
            }
            _ => Err(kind_error(self.step_name(), self.input_kind(), data.kind())),
        }
    }
}

impl From<SimpleImputer> for PipelineStep {
    fn from(t: SimpleImputer) -> Self {
        PipelineStep::SimpleImputer(t)
    }
}

impl From<CategoricalImputer> for PipelineStep {
    fn from(t: CategoricalImputer) -> Self {
        PipelineStep::CategoricalImputer(t)
    }
}

impl From<OneHotEncoder> for PipelineStep {
    fn from(t: OneHotEncoder) -> Self {
        PipelineStep::OneHotEncoder(t)
    }
}

impl From<StandardScaler> for PipelineStep {
    fn from(t: StandardScaler) -> Self {
        PipelineStep::StandardScaler(t)
    }
}

fn kind_error(step: &str, expected: ColumnKind, got: ColumnKind) -> PreprocessingError {
    PreprocessingError::InvalidInput {
        step: step.to_string(),
        expected: expected.as_str(),
        got: got.as_str(),
    }
}

/// A fitted pipeline step.
#[derive(Clone, Debug)]
pub enum FittedPipelineStep {
    SimpleImputer(FittedSimpleImputer),
    CategoricalImputer(FittedCategoricalImputer),
    OneHotEncoder(FittedOneHotEncoder),
    StandardScaler(FittedStandardScaler),
}

/// Serializable parameters of a single fitted step.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum StepParams {
    SimpleImputer(SimpleImputerParams),
    CategoricalImputer(CategoricalImputerParams),
    OneHotEncoder(OneHotEncoderParams),
    StandardScaler(StandardScalerParams),
}

impl FittedPipelineStep {
    pub fn step_name(&self) -> &'static str {
        match self {
            FittedPipelineStep::SimpleImputer(_) => "SimpleImputer",
            FittedPipelineStep::CategoricalImputer(_) => "CategoricalImputer",
            FittedPipelineStep::OneHotEncoder(_) => "OneHotEncoder",
            FittedPipelineStep::StandardScaler(_) => "StandardScaler",
        }
    }

    fn input_kind(&self) -> ColumnKind {
        match self {
            FittedPipelineStep::SimpleImputer(_) | FittedPipelineStep::StandardScaler(_) => {
                ColumnKind::Numeric
            }
            _ => ColumnKind::Categorical,
        }
    }

    fn output_kind(&self) -> ColumnKind {
        match self {
            FittedPipelineStep::CategoricalImputer(_) => ColumnKind::Categorical,
            _ => ColumnKind::Numeric,
        }
    }

    fn transform_step(&self, data: &Block) -> Result<Block, PreprocessingError> {
        match (self, data) {
            (FittedPipelineStep::SimpleImputer(t), Block::Numeric(x)) => {
                t.transform(x).map(Block::Numeric)
            }
            (FittedPipelineStep::CategoricalImputer(t), Block::Categorical(x)) => {
                t.transform(x).map(Block::Categorical)
            }
            (FittedPipelineStep::OneHotEncoder(t), Block::Categorical(x)) => {
                t.transform(x).map(Block::Numeric)
            }
            (FittedPipelineStep::StandardScaler(t), Block::Numeric(x)) => {
                t.transform(x).map(Block::Numeric)
            }
            _ => Err(kind_error(self.step_name(), self.input_kind(), data.kind())),
        }
    }

    pub fn n_features_in(&self) -> usize {
        match self {
            FittedPipelineStep::SimpleImputer(t) => t.n_features_in(),
            FittedPipelineStep::CategoricalImputer(t) => t.n_features_in(),
            FittedPipelineStep::OneHotEncoder(t) => t.n_features_in(),
            FittedPipelineStep::StandardScaler(t) => t.n_features_in(),
        }
    }

    pub fn n_features_out(&self) -> usize {
        match self {
            FittedPipelineStep::SimpleImputer(t) => t.n_features_out(),
            FittedPipelineStep::CategoricalImputer(t) => t.n_features_out(),
            FittedPipelineStep::OneHotEncoder(t) => t.n_features_out(),
            FittedPipelineStep::StandardScaler(t) => t.n_features_out(),
        }
    }

    pub fn extract_params(&self) -> StepParams {
        match self {
            FittedPipelineStep::SimpleImputer(t) => StepParams::SimpleImputer(t.extract_params()),
            FittedPipelineStep::CategoricalImputer(t) => {
                StepParams::CategoricalImputer(t.extract_params())
            }
            FittedPipelineStep::OneHotEncoder(t) => StepParams::OneHotEncoder(t.extract_params()),
            FittedPipelineStep::StandardScaler(t) => {
                StepParams::StandardScaler(t.extract_params())
            }
        }
    }

    pub fn from_params(params: StepParams) -> Result<Self, PreprocessingError> {
        Ok(match params {
            StepParams::SimpleImputer(p) => {
                FittedPipelineStep::SimpleImputer(FittedSimpleImputer::from_params(p)?)
            }
            StepParams::CategoricalImputer(p) => {
                FittedPipelineStep::CategoricalImputer(FittedCategoricalImputer::from_params(p)?)
            }
            StepParams::OneHotEncoder(p) => {
                FittedPipelineStep::OneHotEncoder(FittedOneHotEncoder::from_params(p)?)
            }
            StepParams::StandardScaler(p) => {
                FittedPipelineStep::StandardScaler(FittedStandardScaler::from_params(p)?)
            }
        })
    }

    /// Output column names given the step's input column names.
    fn feature_names_out(&self, input: Vec<String>) -> Vec<String> {
        match self {
            FittedPipelineStep::OneHotEncoder(t) => t.feature_names_out(&input),
            _ => input,
        }
    }
}

/// Pipeline transformer (unfitted).
///
/// Chains named steps together. Step names must be unique.
#[derive(Clone, Debug, Default)]
pub struct Pipeline {
    steps: Vec<(String, PipelineStep)>,
}

impl Pipeline {
    /// Create a new empty pipeline.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a named step.
    pub fn add_step(mut self, name: impl Into<String>, step: impl Into<PipelineStep>) -> Self {
        self.steps.push((name.into(), step.into()));
        self
    }

    /// Get the number of steps in the pipeline.
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Check if the pipeline is empty.
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Get the names of all steps in the pipeline.
    pub fn step_names(&self) -> Vec<&str> {
        self.steps.iter().map(|(name, _)| name.as_str()).collect()
    }

    pub fn steps(&self) -> &[(String, PipelineStep)] {
        &self.steps
    }

    /// Check step names and block kinds for an input of kind `input`.
    ///
    /// Returns the kind of block the pipeline produces.
    pub fn validate(&self, input: ColumnKind) -> Result<ColumnKind, PreprocessingError> {
        if self.steps.is_empty() {
            return Err(PreprocessingError::InvalidParameter(
                "Cannot fit an empty pipeline".to_string(),
            ));
        }

        let mut seen = HashSet::new();
        let mut kind = input;
        for (name, step) in &self.steps {
            if !seen.insert(name.as_str()) {
                return Err(PreprocessingError::InvalidParameter(format!(
                    "duplicate step name '{}'",
                    name
                )));
            }
            if step.input_kind() != kind {
                return Err(kind_error(name, step.input_kind(), kind));
            }
            kind = step.output_kind();
        }
        Ok(kind)
    }
}

/// Serializable representation of a fitted pipeline.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PipelineParams {
    /// Named step parameters in execution order.
    pub steps: Vec<(String, StepParams)>,
    /// Kind of block the pipeline accepts.
    pub input_kind: ColumnKind,
    /// Number of features seen during fit.
    pub n_features: usize,
}

impl Transformer for Pipeline {
    type Input = Block;
    type Output = Block;
    type Params = PipelineParams;
    type Fitted = FittedPipeline;

    fn fit(&self, data: &Self::Input) -> Result<Self::Fitted, PreprocessingError> {
        self.validate(data.kind())?;

        if data.nrows() == 0 {
            return Err(PreprocessingError::EmptyData(
                "Cannot fit pipeline on empty data".to_string(),
            ));
        }

        let mut fitted_steps = Vec::with_capacity(self.steps.len());
        let mut current = data.clone();

        for (name, step) in &self.steps {
            let fitted = step.fit(&current)?;
            current = fitted.transform_step(&current)?;
            tracing::trace!(step = %name, n_features_out = current.ncols(), "fitted pipeline step");
            fitted_steps.push((name.clone(), fitted));
        }

        Ok(FittedPipeline {
            steps: fitted_steps,
            input_kind: data.kind(),
            n_features: data.ncols(),
        })
    }
}

/// Fitted Pipeline ready for inference.
#[derive(Clone, Debug)]
pub struct FittedPipeline {
    steps: Vec<(String, FittedPipelineStep)>,
    input_kind: ColumnKind,
    n_features: usize,
}

impl FittedPipeline {
    /// Get the number of steps in the pipeline.
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Check if the pipeline is empty.
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Get the names of all steps in the pipeline.
    pub fn step_names(&self) -> Vec<&str> {
        self.steps.iter().map(|(name, _)| name.as_str()).collect()
    }

    /// Look up a fitted step by name.
    pub fn named_step(&self, name: &str) -> Option<&FittedPipelineStep> {
        self.steps
            .iter()
            .find(|(step_name, _)| step_name == name)
            .map(|(_, step)| step)
    }

    pub fn input_kind(&self) -> ColumnKind {
        self.input_kind
    }

    pub fn output_kind(&self) -> ColumnKind {
        self.steps
            .last()
            .map_or(self.input_kind, |(_, step)| step.output_kind())
    }

    /// Output column names given the pipeline's input column names.
    pub fn feature_names_out(&self, input_features: &[String]) -> Vec<String> {
        self.steps
            .iter()
            .fold(input_features.to_vec(), |names, (_, step)| {
                step.feature_names_out(names)
            })
    }
}

impl FittedTransformer for FittedPipeline {
    type Input = Block;
    type Output = Block;
    type Params = PipelineParams;

    fn transform(&self, data: &Self::Input) -> Result<Self::Output, PreprocessingError> {
        if data.kind() != self.input_kind {
            return Err(kind_error("Pipeline", self.input_kind, data.kind()));
        }

        let cols = data.ncols();
        if cols != self.n_features {
            return Err(PreprocessingError::FeatureMismatch {
                expected_features: self.n_features,
                got_features: cols,
            });
        }

        let mut result = data.clone();
        for (_, step) in &self.steps {
            result = step.transform_step(&result)?;
        }
        Ok(result)
    }

    fn extract_params(&self) -> Self::Params {
        PipelineParams {
            steps: self
                .steps
                .iter()
                .map(|(name, step)| (name.clone(), step.extract_params()))
                .collect(),
            input_kind: self.input_kind,
            n_features: self.n_features,
        }
    }

    fn from_params(params: Self::Params) -> Result<Self, PreprocessingError> {
        if params.steps.is_empty() {
            return Err(PreprocessingError::InvalidParameter(
                "Pipeline params contain no steps".to_string(),
            ));
        }

        let mut steps = Vec::with_capacity(params.steps.len());
        let mut kind = params.input_kind;
        let mut width = params.n_features;
        for (name, step_params) in params.steps {
            let step = FittedPipelineStep::from_params(step_params)?;
            if step.input_kind() != kind {
                return Err(kind_error(&name, step.input_kind(), kind));
            }
            if step.n_features_in() != width {
                return Err(PreprocessingError::FeatureMismatch {
                    expected_features: width,
                    got_features: step.n_features_in(),
                });
            }
            kind = step.output_kind();
            width = step.n_features_out();
            steps.push((name, step));
        }

        Ok(Self {
            steps,
            input_kind: params.input_kind,
            n_features: params.n_features,
        })
    }

    fn n_features_in(&self) -> usize {
        self.n_features
    }

    fn n_features_out(&self) -> usize {
        self.steps
            .last()
            .map_or(self.n_features, |(_, step)| step.n_features_out())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::preprocessing::imputation::{CategoricalStrategy, ImputeStrategy};
    use ndarray::array;

    fn numeric_data() -> Block {
        Block::Numeric(array![[1.0, 10.0], [f64::NAN, 20.0], [3.0, f64::NAN], [5.0, 40.0]])
    }

    fn categorical_data() -> Block {
        let cells = vec![
            Some("female".to_string()),
            Some("standard".to_string()),
            Some("male".to_string()),
            None,
            None,
            Some("free/reduced".to_string()),
            Some("female".to_string()),
            Some("standard".to_string()),
        ];
        Block::Categorical(Array2::from_shape_vec((4, 2), cells).unwrap())
    }

    fn numeric_pipeline() -> Pipeline {
        Pipeline::new()
            .add_step("imputer", SimpleImputer::new(ImputeStrategy::Median))
            .add_step("scaler", StandardScaler::new())
    }

    fn categorical_pipeline() -> Pipeline {
        Pipeline::new()
            .add_step("imputer", CategoricalImputer::new(CategoricalStrategy::MostFrequent))
            .add_step("one_hot_encoder", OneHotEncoder::new())
            .add_step("scaler", StandardScaler::new().with_mean(false))
    }

    #[test]
    fn test_pipeline_numeric() {
        let data = numeric_data();
        let fitted = numeric_pipeline().fit(&data).unwrap();

        assert_eq!(fitted.len(), 2);
        assert_eq!(fitted.step_names(), vec!["imputer", "scaler"]);

        let out = fitted.transform(&data).unwrap().into_numeric("test").unwrap();
        assert_eq!(out.dim(), (4, 2));
        assert!(out.iter().all(|v| v.is_finite()));

        for col in out.columns() {
            assert!(col.mean().unwrap().abs() < 1e-10);
        }
    }

    #[test]
    fn test_pipeline_named_step_exposes_statistics() {
        let fitted = numeric_pipeline().fit(&numeric_data()).unwrap();
        match fitted.named_step("imputer") {
            Some(FittedPipelineStep::SimpleImputer(imp)) => {
                assert_eq!(imp.statistics(), &[3.0, 20.0]);
            }
            other => panic!("unexpected step: {:?}", other),
        }
        assert!(fitted.named_step("missing").is_none());
    }

    #[test]
    fn test_pipeline_categorical_to_numeric() {
        let data = categorical_data();
        let fitted = categorical_pipeline().fit(&data).unwrap();

        assert_eq!(fitted.input_kind(), ColumnKind::Categorical);
        assert_eq!(fitted.output_kind(), ColumnKind::Numeric);
        // gender: female, male; lunch: free/reduced, standard
        assert_eq!(fitted.n_features_out(), 4);

        let out = fitted.transform(&data).unwrap();
        assert_eq!(out.kind(), ColumnKind::Numeric);
        assert_eq!(out.ncols(), 4);
    }

    #[test]
    fn test_pipeline_feature_names_out() {
        let fitted = categorical_pipeline().fit(&categorical_data()).unwrap();
        let names = fitted.feature_names_out(&["gender".to_string(), "lunch".to_string()]);
        assert_eq!(
            names,
            vec![
                "gender_female",
                "gender_male",
                "lunch_free/reduced",
                "lunch_standard"
            ]
        );
    }

    #[test]
    fn test_pipeline_wrong_step_order() {
        let pipeline = Pipeline::new()
            .add_step("one_hot_encoder", OneHotEncoder::new())
            .add_step("imputer", CategoricalImputer::default());

        let result = pipeline.validate(ColumnKind::Categorical);
        assert!(matches!(
            result,
            Err(PreprocessingError::InvalidInput { ref step, .. }) if step == "imputer"
        ));
    }

    #[test]
    fn test_pipeline_wrong_block_kind() {
        let result = numeric_pipeline().fit(&categorical_data());
        assert!(matches!(
            result,
            Err(PreprocessingError::InvalidInput {
                expected: "numeric",
                got: "categorical",
                ..
            })
        ));
    }

    #[test]
    fn test_pipeline_duplicate_step_name() {
        let pipeline = Pipeline::new()
            .add_step("scaler", StandardScaler::new())
            .add_step("scaler", StandardScaler::new());
        assert!(matches!(
            pipeline.validate(ColumnKind::Numeric),
            Err(PreprocessingError::InvalidParameter(_))
        ));
    }

    #[test]
    fn test_pipeline_empty() {
        let result = Pipeline::new().fit(&numeric_data());
        assert!(result.is_err());
    }

    #[test]
    fn test_pipeline_empty_data() {
        let data = Block::Numeric(Array2::zeros((0, 2)));
        let result = numeric_pipeline().fit(&data);
        assert!(matches!(result, Err(PreprocessingError::EmptyData(_))));
    }

    #[test]
    fn test_pipeline_feature_mismatch() {
        let fitted = numeric_pipeline().fit(&numeric_data()).unwrap();
        let result = fitted.transform(&Block::Numeric(array![[1.0, 2.0, 3.0]]));
        assert!(matches!(
            result,
            Err(PreprocessingError::FeatureMismatch {
                expected_features: 2,
                got_features: 3
            })
        ));
    }

    #[test]
    fn test_pipeline_params_round_trip() {
        let data = categorical_data();
        let fitted = categorical_pipeline().fit(&data).unwrap();

        let restored = FittedPipeline::from_params(fitted.extract_params()).unwrap();
        assert_eq!(restored.step_names(), fitted.step_names());
        assert_eq!(
            restored.transform(&data).unwrap(),
            fitted.transform(&data).unwrap()
        );
    }

    #[test]
    fn test_pipeline_save_load_file() {
        let data = numeric_data();
        let fitted = numeric_pipeline().fit(&data).unwrap();

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pipeline.bin");
        fitted.save_to_file(&path).unwrap();

        let loaded = FittedPipeline::load_from_file(&path).unwrap();
        assert_eq!(
            loaded.transform(&data).unwrap(),
            fitted.transform(&data).unwrap()
        );
    }

    #[test]
    fn test_pipeline_from_params_rejects_width_mismatch() {
        let fitted = numeric_pipeline().fit(&numeric_data()).unwrap();
        let mut params = fitted.extract_params();
        params.n_features = 3;
        assert!(FittedPipeline::from_params(params).is_err());
    }
}
