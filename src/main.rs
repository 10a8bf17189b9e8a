use clap::{Parser, Subcommand};
use lensify::{
    api, compute_aperture_equivalence, compute_focal_equivalence, config, logging, output, sensors,
};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "lensify")]
#[command(about = "Sensor-size equivalence calculator")]
#[command(long_about = "\
Sensor-size equivalence calculator

Converts an aperture to its full-frame equivalent for a given sensor, and
models a focal-length change as digital zoom: the crop factor, equivalent
aperture, angle of view and effective sensor size after cropping.

Examples:

  lensify aperture --sensor micro-four-thirds --aperture 1.8
  lensify focal --sensor full-frame --original-focal 50 --new-focal 35 --aperture 1.4
  lensify focal --sensor 1/2.3 --original-focal 4.3 --new-focal 8.6 --aperture 3.5 --json
  lensify serve --port 8787

Run 'lensify sensors' for the list of sensor ids.
Run 'lensify gen-config' to generate a documented lensify.toml.")]
#[command(version)]
struct Cli {
    /// Config file for `serve` [default: lensify.toml, if present]
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Print results as JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List the known sensor formats and their crop factors
    Sensors,
    /// Full-frame equivalent aperture for a sensor
    Aperture {
        /// Sensor id (see `lensify sensors`)
        #[arg(long)]
        sensor: String,
        /// f-number, e.g. 2.8
        #[arg(long, allow_negative_numbers = true)]
        aperture: f64,
    },
    /// Equivalence report for a focal-length change done as digital zoom
    Focal {
        /// Original sensor id (see `lensify sensors`)
        #[arg(long)]
        sensor: String,
        /// Focal length the lens actually has, in mm
        #[arg(long, allow_negative_numbers = true)]
        original_focal: f64,
        /// Focal length to simulate, in mm
        #[arg(long, allow_negative_numbers = true)]
        new_focal: f64,
        /// f-number, e.g. 1.8
        #[arg(long, allow_negative_numbers = true)]
        aperture: f64,
    },
    /// Serve the JSON API and calculator page over HTTP
    Serve {
        /// Listen address (overrides server.bind)
        #[arg(long)]
        bind: Option<String>,
        /// Listen port (overrides server.port)
        #[arg(long)]
        port: Option<u16>,
    },
    /// Print a stock lensify.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Command::Sensors => {
            if cli.json {
                println!("{}", serde_json::to_string_pretty(sensors::all())?);
            } else {
                output::print_sensors(sensors::all());
            }
        }
        Command::Aperture { sensor, aperture } => {
            let result = or_exit(compute_aperture_equivalence(&sensor, aperture));
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else {
                output::print_aperture(&result);
            }
        }
        Command::Focal {
            sensor,
            original_focal,
            new_focal,
            aperture,
        } => {
            let report = or_exit(compute_focal_equivalence(
                &sensor,
                original_focal,
                new_focal,
                aperture,
            ));
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                output::print_focal(&report);
            }
        }
        Command::Serve { bind, port } => {
            let overrides = config::ServerOverrides { bind, port };
            let config = config::load_config(cli.config.as_deref(), &overrides)?;
            logging::init_logging(&config.logging.level);
            tokio::runtime::Runtime::new()?.block_on(api::serve(&config))?;
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

/// Unwrap a calculation result, or print the validation message and exit 1.
fn or_exit<T>(result: Result<T, lensify::ValidationError>) -> T {
    result.unwrap_or_else(|err| {
        eprintln!("error: {err}");
        std::process::exit(1);
    })
}
