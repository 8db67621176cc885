//! Student Performance Preprocessing Pipeline
//!
//! This example runs the full train/test transformation on a small inline
//! sample of the student performance dataset:
//! - Median / most-frequent imputation of missing cells
//! - Dense one-hot encoding of the five categorical columns
//! - Standardization of every feature column
//! - Persistence of the fitted preprocessor and replay on new rows
//!
//! Run with: cargo run --example student_pipeline

use ndarray::s;
use scoreprep::{
    config::TransformationConfig,
    dataset::Table,
    preprocessing::FittedTransformer,
    transformation::schema::TARGET_COLUMN,
    DataTransformation,
};
use std::error::Error;

const TRAIN: &str = "\
gender,race_ethnicity,parental_level_of_education,lunch,test_preparation_course,math_score,reading_score,writing_score
female,group B,bachelor's degree,standard,none,72,72,74
female,group C,some college,standard,completed,69,90,88
female,group B,master's degree,standard,none,90,95,93
male,group A,associate's degree,free/reduced,none,47,57,44
male,group C,some college,standard,none,76,78,75
female,group B,associate's degree,standard,none,71,,78
female,group B,some college,standard,completed,88,95,92
male,group B,some college,free/reduced,none,40,43,39
male,group D,high school,free/reduced,completed,64,64,67
female,group B,high school,free/reduced,none,38,60,50
male,group C,associate's degree,standard,none,58,54,52
male,group D,associate's degree,standard,none,40,52,43
female,group B,high school,standard,none,65,81,73
male,group A,some college,standard,completed,78,72,70
female,group A,master's degree,NA,none,50,53,58
female,group C,some high school,standard,none,69,75,78
male,group C,high school,standard,none,88,89,86
female,group B,some high school,free/reduced,none,18,32,28
male,group C,master's degree,free/reduced,none,46,42,46
female,group C,associate's degree,free/reduced,none,54,58,61
male,group E,high school,standard,completed,66,69,63
";

const TEST: &str = "\
gender,race_ethnicity,parental_level_of_education,lunch,test_preparation_course,math_score,reading_score,writing_score
female,group D,some college,free/reduced,none,65,75,70
male,group E,bachelor's degree,standard,completed,44,54,53
,group C,high school,standard,none,69,73,73
female,group A,some high school,free/reduced,completed,74,71,
";

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt().with_target(false).init();

    let workdir = std::env::temp_dir().join("scoreprep_example");
    std::fs::create_dir_all(&workdir)?;
    let train_path = workdir.join("train.csv");
    let test_path = workdir.join("test.csv");
    std::fs::write(&train_path, TRAIN)?;
    std::fs::write(&test_path, TEST)?;

    // ========================================================================
    // Fit on train, transform both splits, persist the preprocessor
    // ========================================================================
    let config = TransformationConfig {
        preprocessor_path: workdir.join("artifacts").join("preprocessor.pkl"),
        ..TransformationConfig::default()
    };
    let (train, test, artifact) = DataTransformation::new(config)
        .transform(&train_path, &test_path)?
        .into_parts();

    println!("train array: {:?}", train.dim());
    println!("test array:  {:?}", test.dim());
    println!("preprocessor saved to {}", artifact.display());

    // ========================================================================
    // Reload the preprocessor and replay it on the test features
    // ========================================================================
    let fitted = DataTransformation::load_preprocessor(&artifact)?;
    let names = fitted.feature_names_out();
    println!("\n{} output features:", names.len());
    for name in &names {
        println!("  {}", name);
    }

    let features = Table::from_csv_path(&test_path)?.drop_column(TARGET_COLUMN)?;
    let replayed = fitted.transform(&features)?;
    let identical = test.slice(s![.., ..replayed.ncols()]) == replayed;
    println!("\nreplayed test features match: {}", identical);

    Ok(())
}
