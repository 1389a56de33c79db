use clap::Parser;
use log::info;

use regresja::poly_fit::{PolynomialSetup, DEFAULT_DEGREE};
use regresja::SampleSet;

#[derive(Parser, Debug)]
#[command(author, version, about = "Polynomial model set-up (not trained)", long_about = None)]
struct Args {
    #[clap(short, long, default_value = "data/samples.csv")]
    data: String,

    #[clap(long, default_value_t = DEFAULT_DEGREE)]
    degree: usize,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let Args { data, degree } = Args::parse();

    info!("reading samples from {}..", data);

    let samples = SampleSet::from_csv_path(&data)?;
    let setup = PolynomialSetup::new(&samples, degree)?;

    info!(
        "mean x: {}, std dev x: {}",
        setup.x_stats.mean, setup.x_stats.std_dev
    );
    info!(
        "mean y: {}, std dev y: {}",
        setup.y_stats.mean, setup.y_stats.std_dev
    );
    info!(
        "degree {} model: {} weights, bias {}, {} normalized samples",
        setup.degree(),
        setup.weights.len(),
        setup.bias,
        setup.x_std.len()
    );

    Ok(())
}
