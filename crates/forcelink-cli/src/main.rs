//! forcelink CLI — run, validate and inspect a force-generating participant.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;

#[derive(Parser)]
#[command(name = "forcelink")]
#[command(version, about = "forcelink — force-generating co-simulation participant")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Force law used by `run`.
#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum LawKind {
    /// Constant force once the displacement magnitude reaches the threshold.
    Threshold,
    /// Logistic ramp centered on the threshold.
    Sigmoid,
    /// Constant force between --pulse-start and --pulse-stop.
    Pulse,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the participant against the built-in rigid-body driver.
    Run(RunArgs),

    /// Validate a settings document (.toml) or a point-cloud file.
    Validate {
        /// Path to the file.
        path: PathBuf,

        /// Reject malformed numeric tokens in point clouds.
        #[arg(long)]
        strict: bool,
    },

    /// Print settings (defaults, or loaded from a document).
    Settings {
        /// Settings document (TOML).
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}

#[derive(clap::Args)]
pub struct RunArgs {
    /// Settings document (TOML). Defaults are used when omitted.
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Point-cloud file (x,y,z per line).
    #[arg(short, long)]
    pub points: PathBuf,

    /// Force law.
    #[arg(long, value_enum, default_value = "threshold")]
    pub law: LawKind,

    /// Force magnitude along +z (N).
    #[arg(long, default_value_t = 0.0588)]
    pub force: f64,

    /// Activation distance for threshold and sigmoid laws (m).
    #[arg(long, default_value_t = 0.07)]
    pub threshold: f64,

    /// Sigmoid transition width (m).
    #[arg(long, default_value_t = 0.005)]
    pub width: f64,

    #[arg(long, default_value_t = 0.06)]
    pub pulse_start: f64,

    #[arg(long, default_value_t = 0.25)]
    pub pulse_stop: f64,

    /// Body mass (kg). Defaults to a 6.35 mm magnet cylinder.
    #[arg(long)]
    pub mass: Option<f64>,

    /// Use the checkpointed implicit coupling scheme.
    #[arg(long)]
    pub implicit: bool,

    #[arg(long, default_value_t = 20)]
    pub max_iterations: u32,

    #[arg(long, default_value_t = 1e-10)]
    pub tolerance: f64,

    /// Cap on the participant's preferred step size.
    #[arg(long)]
    pub max_dt: Option<f64>,

    /// Record (displacement, force) per solve into forces.csv.
    #[arg(long)]
    pub sample: bool,

    /// Directory forces.csv is written to.
    #[arg(short, long, default_value = ".")]
    pub output_dir: PathBuf,

    /// Reject malformed numeric tokens in the point cloud.
    #[arg(long)]
    pub strict: bool,
}

fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "forcelink=info,forcelink_adapter=info,forcelink_driver=info,forcelink_io=info"
                    .into()
            }),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Run(args) => commands::run(&args),
        Commands::Validate { path, strict } => commands::validate(&path, strict),
        Commands::Settings { config } => commands::settings(config.as_deref()),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
