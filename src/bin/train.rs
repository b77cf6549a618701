//! Tréningový vstupný bod: načíta dataset, natrénuje oba modely a uloží
//! artefakty do `<out-dir>/models` a `<out-dir>/data/processed`.

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use credit_default::TrainingPipeline;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(
    name = "train",
    version,
    about = "Train the credit-card default classifier",
    long_about = "Loads the dataset, performs a stratified train/test split, fits a\n\
        standard scaler, trains a logistic regression and a random forest, and\n\
        keeps the one with the higher ROC AUC as models/best_model.json."
)]
struct Cli {
    /// Dataset (CSV or JSON) with Income, Age, Loan, Loan to Income and Default
    #[arg(long)]
    data_path: PathBuf,

    /// Output directory for models/ and data/processed/
    #[arg(long, default_value = ".")]
    out_dir: PathBuf,

    /// Seed for the split and the forest bootstrap
    #[arg(long, default_value_t = 42)]
    random_state: u64,

    /// Fraction of rows held out for evaluation
    #[arg(long, default_value_t = 0.2)]
    test_size: f64,

    /// Number of trees in the random forest
    #[arg(long, default_value_t = 200)]
    n_estimators: usize,

    /// Maximum depth of each tree (unlimited when omitted)
    #[arg(long)]
    max_depth: Option<u16>,

    /// Increase verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let mut builder = TrainingPipeline::builder()
        .data_path(&cli.data_path)
        .out_dir(&cli.out_dir)
        .random_state(cli.random_state)
        .test_size(cli.test_size)
        .model_param("random_forest", "n_estimators", &cli.n_estimators.to_string());
    if let Some(depth) = cli.max_depth {
        builder = builder.model_param("random_forest", "max_depth", &depth.to_string());
    }

    let pipeline = builder.build().context("invalid training configuration")?;
    let summary = pipeline
        .run()
        .with_context(|| format!("training on {} failed", cli.data_path.display()))?;

    println!(
        "Saved models. Best model: {} AUCs: {:?}",
        summary.best_model, summary.auc
    );
    Ok(())
}
