//! Column layout of the student performance dataset.

/// Numeric target, appended as the last output column and never transformed.
pub const TARGET_COLUMN: &str = "math_score";

pub const NUMERICAL_FEATURES: [&str; 2] = ["reading_score", "writing_score"];

pub const CATEGORICAL_FEATURES: [&str; 5] = [
    "gender",
    "race_ethnicity",
    "parental_level_of_education",
    "lunch",
    "test_preparation_course",
];

pub const NUMERICAL_GROUP: &str = "numerical_features";
pub const CATEGORICAL_GROUP: &str = "categorical_features";

// Step names inside the group pipelines.
pub const IMPUTER_STEP: &str = "imputer";
pub const ONE_HOT_ENCODER_STEP: &str = "one_hot_encoder";
pub const SCALER_STEP: &str = "scaler";
