use clap::Parser;
use log::info;

use regresja::{fit_standardized, SampleSet, TrainConfig, UpdateRule};

#[derive(Parser, Debug)]
#[command(author, version, about = "Gradient descent line fit on Z-score normalized samples", long_about = None)]
struct Args {
    #[clap(short, long, default_value = "data/samples.csv")]
    data: String,

    #[clap(short, long, default_value_t = 500_000)]
    epochs: usize,

    #[clap(short, long, default_value_t = 1e-4)]
    learning_rate: f64,

    /// Log the loss every this many epochs.
    #[clap(short, long, default_value_t = 100_000)]
    report_every: usize,

    /// `batch` or `online`.
    #[clap(short, long, default_value = "batch")]
    update_rule: UpdateRule,
}

impl From<&Args> for TrainConfig {
    fn from(args: &Args) -> Self {
        TrainConfig {
            epochs: args.epochs,
            learning_rate: args.learning_rate,
            reporting_interval: args.report_every,
            update_rule: args.update_rule,
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let config = TrainConfig::from(&args);

    info!("reading samples from {}..", args.data);

    let samples = SampleSet::from_csv_path(&args.data)?;

    info!("training with {:?}", config);

    let report = fit_standardized(&samples, config)?;

    info!("standardized: {}", report.standardized);
    info!("R^2: {}", report.r_squared);
    info!("equation: {}", report.params);

    Ok(())
}
