use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use vgw_cli::commands::{self, parse_weight_pair};
use vgw_cli::{CliError, logging};
use vgw_core::config;
use vgw_core::operators::{AddOutcome, GroupChoice};

#[derive(Parser)]
#[command(version, about = "Vertex group weights overlay")]
struct Cli {
    /// Config file; defaults to the user config
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Debug logging (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the overlay for one frame and write it as PNG
    Render {
        scene: PathBuf,
        #[arg(short, long, default_value = "overlay.png")]
        output: PathBuf,
    },
    /// Print the weights panel for the current selection
    Panel {
        scene: PathBuf,
        /// List every selected vertex, not only the active one
        #[arg(short, long)]
        all: bool,
    },
    /// List the groups a vertex can be added to
    Groups {
        scene: PathBuf,
        #[arg(long)]
        vertex: Option<u32>,
    },
    /// Add a vertex to a group with weight 1.0
    Add {
        scene: PathBuf,
        #[arg(long)]
        vertex: Option<u32>,
        #[arg(long, conflicts_with = "new", required_unless_present = "new")]
        group: Option<u32>,
        /// Create a new group instead
        #[arg(long)]
        new: bool,
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Remove a vertex from a group
    Remove {
        scene: PathBuf,
        #[arg(long)]
        vertex: Option<u32>,
        #[arg(long)]
        group: u32,
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Rewrite every weight of a vertex
    Assign {
        scene: PathBuf,
        #[arg(long)]
        vertex: Option<u32>,
        /// GROUP=WEIGHT, once per group the vertex belongs to
        #[arg(short, long = "weight", value_parser = parse_weight_pair, required = true)]
        weights: Vec<(u32, f32)>,
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn run(cli: Cli) -> Result<(), CliError> {
    let app_config = config::resolve(cli.config.as_deref())?;
    let mut stdout = std::io::stdout().lock();

    match cli.command {
        Commands::Render { scene, output } => {
            commands::render(&scene, &output, &app_config)?;
        }
        Commands::Panel { scene, all } => {
            commands::panel(&scene, all, &app_config, &mut stdout)?;
        }
        Commands::Groups { scene, vertex } => {
            commands::groups(&scene, vertex, &mut stdout)?;
        }
        Commands::Add {
            scene,
            vertex,
            group,
            new,
            output,
        } => {
            let choice = match group {
                Some(index) if !new => GroupChoice::Existing(index),
                _ => GroupChoice::NewGroup,
            };
            if let AddOutcome::AlreadyMember { group_index } =
                commands::add(&scene, vertex, choice, output.as_deref())?
            {
                tracing::warn!(group = group_index, "Vertex is already in this group");
            }
        }
        Commands::Remove {
            scene,
            vertex,
            group,
            output,
        } => {
            commands::remove(&scene, vertex, group, output.as_deref())?;
        }
        Commands::Assign {
            scene,
            vertex,
            weights,
            output,
        } => {
            commands::assign(&scene, vertex, &weights, output.as_deref())?;
        }
    }
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init_logging(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
