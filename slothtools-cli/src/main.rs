//! slothtools command line interface
//!
//! One subcommand per cleanup operator, plus `run` for any operator by id.
//! Scenes are read from OBJ or JSON and written back with `--output`.

mod commands;

use clap::{Parser, Subcommand};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

/// Batch scene cleanup tools
#[derive(Parser)]
#[command(name = "slothtools")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Batch mesh, material and texture cleanup", long_about = None)]
struct Cli {
    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info", global = true)]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List available operators by panel section
    List,
    /// Run an operator by id
    Run(commands::run::RunArgs),
    /// Clear custom split normals on selected meshes
    ClearNormals(commands::run::ToolArgs),
    /// Make every material opaque
    RemoveAlpha(commands::run::ToolArgs),
    /// Set roughness on every material
    SetRoughness(commands::run::ToolArgs),
    /// Rewrite texture paths to .png
    RemapTextures(commands::run::ToolArgs),
    /// Keep only trunk-sized faces on selected meshes
    CleanTrees(commands::run::ToolArgs),
    /// Write a settings file with default values
    InitConfig(commands::config::InitConfigArgs),
}

fn parse_level(level: &str) -> Level {
    match level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let subscriber = FmtSubscriber::builder()
        .with_max_level(parse_level(&cli.log_level))
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    match cli.command {
        Commands::List => commands::list::execute(),
        Commands::Run(args) => commands::run::execute(args),
        Commands::ClearNormals(args) => {
            commands::run::execute_operator("sloths.clear_custom_split_normals_selected", args)
        }
        Commands::RemoveAlpha(args) => {
            commands::run::execute_operator("sloths.remove_alpha_all_materials", args)
        }
        Commands::SetRoughness(args) => {
            commands::run::execute_operator("sloths.set_all_materials_roughness", args)
        }
        Commands::RemapTextures(args) => {
            commands::run::execute_operator("sloths.remap_image_paths_to_png", args)
        }
        Commands::CleanTrees(args) => {
            commands::run::execute_operator("sloths.clean_trees_selected", args)
        }
        Commands::InitConfig(args) => commands::config::execute(args),
    }
}
