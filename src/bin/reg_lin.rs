use clap::Parser;
use log::info;

use regresja::reg_lin::{fit_linear, normal_equations};
use regresja::SampleSet;

#[derive(Parser, Debug)]
#[command(author, version, about = "Closed-form least squares line fit", long_about = None)]
struct Args {
    #[clap(short, long, default_value = "data/samples.csv")]
    data: String,

    /// Also solve the matrix normal equations and log both solutions.
    #[clap(short, long)]
    cross_check: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let Args { data, cross_check } = Args::parse();

    info!("reading samples from {}..", data);

    let samples = SampleSet::from_csv_path(&data)?;

    info!("{} samples loaded", samples.len());

    let report = fit_linear(samples.x(), samples.y())?;

    info!("slope: {}", report.slope);
    info!("y-intercept: {}", report.intercept);
    info!("sum of squared residuals: {}", report.ss_residual);
    info!("standard deviation of residuals: {}", report.std_dev_residual);
    info!("R^2: {}", report.r_squared);

    if cross_check {
        let params = normal_equations(samples.x(), samples.y())?;

        info!("normal equations: {}", params);
        info!(
            "difference: slope {:e}, intercept {:e}",
            params.slope - report.slope,
            params.intercept - report.intercept
        );
    }

    Ok(())
}
