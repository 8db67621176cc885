//! Error types for preprocessing operations.

use crate::dataset::DatasetError;
use thiserror::Error;

fn column_label(index: usize, name: Option<&str>) -> String {
    match name {
        Some(name) => format!("'{}'", name),
        None => index.to_string(),
    }
}

/// Error type for preprocessing operations.
#[derive(Debug, Error)]
pub enum PreprocessingError {
    /// Shape mismatch between expected and actual matrix dimensions.
    #[error("Invalid shape: expected {expected}, got {got}")]
    InvalidShape { expected: String, got: String },
    /// Data contains missing values where they cannot be handled.
    #[error("Missing values: {0}")]
    MissingValues(String),
    /// Invalid hyperparameter or configuration value.
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),
    /// A step received a feature block of the wrong kind.
    #[error("Invalid input: {step} expects {expected} input, got {got}")]
    InvalidInput {
        step: String,
        expected: &'static str,
        got: &'static str,
    },
    /// Category not seen during fit.
    ///
    /// `column` is the position within the encoded block; `name` is filled in
    /// when the block came from named table columns.
    #[error("Unknown category {category:?} in column {}", column_label(*.column, .name.as_deref()))]
    UnknownCategory {
        column: usize,
        name: Option<String>,
        category: String,
    },
    /// Column required by a feature group is absent from the table.
    #[error("Missing column: {0}")]
    MissingColumn(String),
    /// Table cells could not be read as the block kind a group declares.
    #[error("Invalid data: {0}")]
    Data(#[from] DatasetError),
    /// Serialization or deserialization error.
    #[error("Serialization error: {0}")]
    SerializationError(String),
    /// Empty data provided where non-empty was required.
    #[error("Empty data: {0}")]
    EmptyData(String),
    /// Feature dimension mismatch.
    #[error("Feature mismatch: expected {expected_features} features, got {got_features}")]
    FeatureMismatch {
        expected_features: usize,
        got_features: usize,
    },
}

impl From<bincode::Error> for PreprocessingError {
    fn from(err: bincode::Error) -> Self {
        PreprocessingError::SerializationError(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_invalid_shape() {
        let err = PreprocessingError::InvalidShape {
            expected: "(2, 3)".to_string(),
            got: "(3, 2)".to_string(),
        };
        assert!(err.to_string().contains("Invalid shape"));
    }

    #[test]
    fn test_error_display_invalid_input() {
        let err = PreprocessingError::InvalidInput {
            step: "StandardScaler".to_string(),
            expected: "numeric",
            got: "categorical",
        };
        assert_eq!(
            err.to_string(),
            "Invalid input: StandardScaler expects numeric input, got categorical"
        );
    }

    #[test]
    fn test_error_display_unknown_category() {
        let err = PreprocessingError::UnknownCategory {
            column: 2,
            name: None,
            category: "other".to_string(),
        };
        assert!(err.to_string().contains("\"other\""));
        assert!(err.to_string().contains("column 2"));
    }

    #[test]
    fn test_error_display_unknown_category_named() {
        let err = PreprocessingError::UnknownCategory {
            column: 1,
            name: Some("race_ethnicity".to_string()),
            category: "group F".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Unknown category \"group F\" in column 'race_ethnicity'"
        );
    }

    #[test]
    fn test_error_display_feature_mismatch() {
        let err = PreprocessingError::FeatureMismatch {
            expected_features: 5,
            got_features: 3,
        };
        assert!(err.to_string().contains("Feature mismatch"));
    }

    #[test]
    fn test_error_from_bincode_error() {
        let bad_bytes: &[u8] = &[0xff, 0xff, 0xff, 0xff];
        let bincode_result: Result<String, bincode::Error> = bincode::deserialize(bad_bytes);
        if let Err(e) = bincode_result {
            let err: PreprocessingError = e.into();
            assert!(matches!(err, PreprocessingError::SerializationError(_)));
        }
    }
}
