//! sigmaprop CLI - measurement uncertainty for radiocarbon and cooling estimates.

mod config;
mod observer;
mod report;

use std::{path::PathBuf, time::Duration};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use jiff::civil::Time as ClockTime;
use sigmaprop_core::Measurement;
use sigmaprop_propagate::linear::Config;
use sigmaprop_scenarios::{cooling, radiocarbon, time_of_death};
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, FmtSubscriber, filter::LevelFilter};

use crate::{
    config::AppConfig,
    observer::TraceObserver,
    report::{CoolingReport, RadiocarbonReport, TimeOfDeathReport},
};

#[derive(Parser)]
#[command(name = "sigmaprop")]
#[command(version)]
#[command(about = "First-order uncertainty propagation for physical estimates")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to a TOML configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Relative finite-difference step, overriding the config file
    #[arg(long, global = true)]
    rel_step: Option<f64>,

    /// Stop propagating after this many milliseconds
    #[arg(long, global = true)]
    timeout_ms: Option<u64>,

    /// Print each input's share of the uncertainty
    #[arg(short, long, global = true)]
    budget: bool,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Date a sample from its remaining carbon-14
    Radiocarbon(RadiocarbonArgs),

    /// Cooling constant from two body readings
    Cooling(CoolingArgs),

    /// Estimate the time of death from body readings
    TimeOfDeath {
        #[command(flatten)]
        readings: CoolingArgs,

        /// Living body temperature
        #[arg(long)]
        body: Option<f64>,

        /// Uncertainty of the living body temperature
        #[arg(long)]
        body_sigma: Option<f64>,

        /// Clock time of the first reading (HH:MM:SS)
        #[arg(long)]
        discovered_at: Option<ClockTime>,
    },

    /// Print the default configuration
    Defaults,
}

#[derive(Args)]
struct RadiocarbonArgs {
    /// Carbon-14 half-life, in years
    #[arg(long)]
    half_life: Option<f64>,

    /// Uncertainty of the half-life, in years
    #[arg(long)]
    half_life_sigma: Option<f64>,

    /// Percent of modern carbon-14 remaining
    #[arg(long)]
    percent: Option<f64>,

    /// Uncertainty of the percent remaining
    #[arg(long)]
    percent_sigma: Option<f64>,
}

#[derive(Args)]
struct CoolingArgs {
    /// Ambient temperature
    #[arg(long)]
    ambient: Option<f64>,

    /// Uncertainty of the ambient temperature
    #[arg(long)]
    ambient_sigma: Option<f64>,

    /// First body reading
    #[arg(long)]
    first: Option<f64>,

    /// Uncertainty of the first body reading
    #[arg(long)]
    first_sigma: Option<f64>,

    /// Second body reading
    #[arg(long)]
    second: Option<f64>,

    /// Uncertainty of the second body reading
    #[arg(long)]
    second_sigma: Option<f64>,

    /// Hours between the two readings
    #[arg(long)]
    interval_hours: Option<f64>,
}

impl RadiocarbonArgs {
    fn apply(&self, config: &mut AppConfig) {
        let section = &mut config.radiocarbon;
        overlay(&mut section.half_life_years, self.half_life, self.half_life_sigma);
        overlay(&mut section.percent_modern, self.percent, self.percent_sigma);
    }
}

impl CoolingArgs {
    fn apply(&self, config: &mut AppConfig) {
        let section = &mut config.cooling;
        overlay(&mut section.ambient, self.ambient, self.ambient_sigma);
        overlay(&mut section.first, self.first, self.first_sigma);
        overlay(&mut section.second, self.second, self.second_sigma);
        if let Some(hours) = self.interval_hours {
            section.interval_hours = hours;
        }
    }
}

/// Replaces whichever parts of a measurement were given on the command line.
fn overlay(measurement: &mut Measurement, value: Option<f64>, sigma: Option<f64>) {
    if let Some(value) = value {
        measurement.value = value;
    }
    if let Some(sigma) = sigma {
        measurement.sigma = sigma;
    }
}

fn setup_logging(verbose: bool) -> Result<()> {
    let level = if verbose {
        LevelFilter::DEBUG
    } else {
        LevelFilter::INFO
    };
    let filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .compact()
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to set tracing subscriber")
}

/// Loads the config file, if any, and applies the global overrides.
fn load_config(cli: &Cli) -> Result<AppConfig> {
    let mut config = AppConfig::load(cli.config.as_deref())
        .with_context(|| format!("Failed to load config from {:?}", cli.config))?;
    if let Some(rel_step) = cli.rel_step {
        config.engine.rel_step = rel_step;
    }
    Ok(config)
}

fn engine_config(config: &AppConfig) -> Result<Config> {
    config
        .engine
        .propagation()
        .context("Invalid engine configuration")
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_logging(cli.verbose)?;

    let mut observer = TraceObserver::new(cli.timeout_ms.map(Duration::from_millis));

    match &cli.command {
        Commands::Defaults => {
            print!("{}", AppConfig::default().to_toml()?);
            return Ok(());
        }

        Commands::Radiocarbon(args) => {
            let mut config = load_config(&cli)?;
            args.apply(&mut config);
            let engine = engine_config(&config)?;
            let sample = config.radiocarbon.sample();
            info!(
                half_life = %sample.half_life,
                percent_modern = %sample.percent_modern,
                "dating sample"
            );

            let date = radiocarbon::date(&sample, &engine, observer.by_ref())
                .context("Radiocarbon dating failed")?;
            info!(age = date.propagation.value, sigma = date.propagation.sigma, "dated");
            print!(
                "{}",
                RadiocarbonReport {
                    date: &date,
                    budget: cli.budget,
                }
            );
        }

        Commands::Cooling(args) => {
            let mut config = load_config(&cli)?;
            args.apply(&mut config);
            let engine = engine_config(&config)?;
            let readings = config.cooling.case().readings;
            info!(
                ambient = %readings.ambient,
                first = %readings.first,
                second = %readings.second,
                "computing cooling constant"
            );

            let k = cooling::cooling_constant(&readings, &engine, observer.by_ref())
                .context("Cooling constant failed")?;
            info!(k = k.value, sigma = k.sigma, "cooling constant");
            print!(
                "{}",
                CoolingReport {
                    k: &k,
                    budget: cli.budget,
                }
            );
        }

        Commands::TimeOfDeath {
            readings,
            body,
            body_sigma,
            discovered_at,
        } => {
            let mut config = load_config(&cli)?;
            readings.apply(&mut config);
            overlay(&mut config.cooling.body, *body, *body_sigma);
            if let Some(time) = discovered_at {
                config.cooling.discovered_at = *time;
            }
            let case = config.cooling.case();
            let engine = engine_config(&config)?;
            info!(
                body = %case.body,
                discovered_at = %case.discovered_at,
                "estimating time of death"
            );

            let estimate = time_of_death::estimate(&case, &engine, observer.by_ref())
                .context("Time-of-death estimate failed")?;
            info!(
                elapsed_hours = estimate.elapsed.value,
                sigma = estimate.elapsed.sigma,
                death = %estimate.death,
                "estimated"
            );
            print!(
                "{}",
                TimeOfDeathReport {
                    estimate: &estimate,
                    discovered_at: case.discovered_at,
                    budget: cli.budget,
                }
            );
        }
    }

    if observer.expired() {
        warn!("Propagation stopped at the deadline; reported uncertainties are incomplete");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn overlay_replaces_only_given_parts() {
        let mut m = Measurement::new(79.5, 0.2).unwrap();
        overlay(&mut m, None, Some(0.5));
        assert_relative_eq!(m.value, 79.5);
        assert_relative_eq!(m.sigma, 0.5);

        overlay(&mut m, Some(80.0), None);
        assert_relative_eq!(m.value, 80.0);
        assert_relative_eq!(m.sigma, 0.5);
    }

    #[test]
    fn time_of_death_flags_override_config() {
        let cli = Cli::try_parse_from([
            "sigmaprop",
            "time-of-death",
            "--ambient",
            "70",
            "--body-sigma",
            "0.4",
            "--discovered-at",
            "22:00:00",
        ])
        .unwrap();

        let mut config = AppConfig::default();
        let Commands::TimeOfDeath {
            readings,
            body,
            body_sigma,
            discovered_at,
        } = cli.command
        else {
            panic!("expected time-of-death");
        };
        readings.apply(&mut config);
        overlay(&mut config.cooling.body, body, body_sigma);

        assert_relative_eq!(config.cooling.ambient.value, 70.0);
        assert_relative_eq!(config.cooling.ambient.sigma, 0.5);
        assert_relative_eq!(config.cooling.body.sigma, 0.4);
        assert_eq!(discovered_at, Some(jiff::civil::time(22, 0, 0, 0)));
    }

    #[test]
    fn radiocarbon_flags_override_config() {
        let cli = Cli::try_parse_from(["sigmaprop", "radiocarbon", "--percent", "50"]).unwrap();
        let Commands::Radiocarbon(args) = cli.command else {
            panic!("expected radiocarbon");
        };

        let mut config = AppConfig::default();
        args.apply(&mut config);
        assert_relative_eq!(config.radiocarbon.percent_modern.value, 50.0);
        assert_relative_eq!(config.radiocarbon.percent_modern.sigma, 0.10);
    }

    #[test]
    fn huge_reading_interval_still_estimates() {
        let cli = Cli::try_parse_from(["sigmaprop", "time-of-death", "--interval-hours", "1e20"])
            .unwrap();
        let Commands::TimeOfDeath { readings, .. } = cli.command else {
            panic!("expected time-of-death");
        };

        let mut config = AppConfig::default();
        readings.apply(&mut config);
        let estimate = time_of_death::estimate_unobserved(
            &config.cooling.case(),
            &engine_config(&config).unwrap(),
        );
        assert!(estimate.is_ok(), "{estimate:?}");
    }
}
