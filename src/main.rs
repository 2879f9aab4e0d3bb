use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing::debug;

use diffuse::{GraphDescription, JacobiEigenSolver, Policy, Simulation, SimulationConfig};

/// Diffusion load-balancing simulator: runs one round per distinct laplacian
/// eigenvalue, then error correcting rounds, and prints the resulting loads.
#[derive(Parser, Debug)]
#[command(name = "diffuse", version, about)]
struct Cli {
    /// Input file: node count, one line of task sizes per node, adjacency matrix.
    input: PathBuf,

    /// Load policy: disc, cont or cont-mod.
    #[arg(default_value = "disc")]
    policy: Policy,

    /// JSON file with a SimulationConfig; flags below override it.
    #[arg(long, env = "DIFFUSE_CONFIG")]
    config: Option<PathBuf>,

    /// Decimal digits eigenvalues are rounded to before deduplication.
    #[arg(long, env = "DIFFUSE_EIGEN_DIGITS")]
    eigen_digits: Option<i32>,

    /// Fail instead of looping when error correction needs more rounds than this.
    #[arg(long, env = "DIFFUSE_MAX_CORRECTION_ROUNDS")]
    max_correction_rounds: Option<usize>,

    /// Print the report as JSON.
    #[arg(long)]
    json: bool,
}

fn load_config(cli:&Cli) -> anyhow::Result<SimulationConfig> {
    let mut config = match &cli.config {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("reading config {}", path.display()))?;
            serde_json::from_str(&text)
                .with_context(|| format!("parsing config {}", path.display()))?
        }
        None => SimulationConfig::default(),
    };
    config.policy = cli.policy;
    if let Some(digits) = cli.eigen_digits {
        config.eigenvalue_digits = digits;
    }
    if cli.max_correction_rounds.is_some() {
        config.max_correction_rounds = cli.max_correction_rounds;
    }
    Ok(config)
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();
    let config = load_config(&cli)?;
    debug!(?config, "configuration loaded");

    let description = GraphDescription::from_path(&cli.input)
        .with_context(|| format!("loading {}", cli.input.display()))?;

    let mut simulation = Simulation::new(&description, config, &JacobiEigenSolver::new())
        .context("preparing simulation")?;
    let report = simulation.run().context("running simulation")?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{report}");
    }
    Ok(())
}
