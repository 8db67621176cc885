//! scoreprep: fit the student performance preprocessing on a training CSV
//! and apply it to a test CSV.

use clap::Parser;
use ndarray::Array2;
use scoreprep::config::TransformationConfig;
use scoreprep::error::{Context, ProcessingError};
use scoreprep::logging::init_logging;
use scoreprep::transformation::schema::TARGET_COLUMN;
use scoreprep::transformation::DataTransformation;
use std::error::Error;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

/// Fit preprocessing on the training split, transform both splits, and save the fitted object
#[derive(Parser, Debug)]
#[command(name = "scoreprep", version, about, long_about = None)]
struct Cli {
    /// Training CSV (fit and transformed)
    #[arg(long)]
    train: PathBuf,

    /// Test CSV (transformed only)
    #[arg(long)]
    test: PathBuf,

    /// TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Where to write the fitted preprocessor (overrides the config)
    #[arg(long)]
    artifact: Option<PathBuf>,

    /// Directory for train_array.csv and test_array.csv
    #[arg(long)]
    output_dir: Option<PathBuf>,

    /// Increase verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {}", err);
            let mut cause = err.source();
            while let Some(inner) = cause {
                eprintln!("  caused by: {}", inner);
                cause = inner.source();
            }
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), ProcessingError> {
    let mut config =
        TransformationConfig::load(cli.config.as_deref()).context("loading configuration")?;
    if let Some(artifact) = cli.artifact {
        config.preprocessor_path = artifact;
    }
    match cli.verbose {
        0 => {}
        1 => config.logging.level = "debug".to_string(),
        _ => config.logging.level = "trace".to_string(),
    }

    let _guard = init_logging(&config.logging).context("initialising logging")?;

    let output = DataTransformation::new(config).transform(&cli.train, &cli.test)?;

    let fitted = DataTransformation::load_preprocessor(&output.preprocessor_path)?;
    let feature_names = fitted.feature_names_out();

    let mut written = Vec::new();
    if let Some(dir) = &cli.output_dir {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("creating output directory {}", dir.display()))?;
        for (name, array) in [("train_array.csv", &output.train), ("test_array.csv", &output.test)]
        {
            let path = dir.join(name);
            write_array(&path, &feature_names, array)
                .with_context(|| format!("writing {}", path.display()))?;
            written.push(path);
        }
    }

    let summary = serde_json::json!({
        "train_shape": output.train.shape(),
        "test_shape": output.test.shape(),
        "preprocessor_path": output.preprocessor_path,
        "feature_names": feature_names,
        "target": TARGET_COLUMN,
        "written": written,
    });
    let text = serde_json::to_string_pretty(&summary).context("rendering summary")?;
    println!("{}", text);

    Ok(())
}

fn write_array(path: &Path, feature_names: &[String], array: &Array2<f64>) -> csv::Result<()> {
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(
        feature_names
            .iter()
            .map(String::as_str)
            .chain(std::iter::once(TARGET_COLUMN)),
    )?;
    for row in array.rows() {
        writer.write_record(row.iter().map(|v| v.to_string()))?;
    }
    writer.flush()?;
    Ok(())
}
