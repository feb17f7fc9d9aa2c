//! sales-loader CLI entry point

use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use sales_loader::{
    commands::{
        cmd_init, cmd_load, cmd_status, cmd_validate, print_load_report, print_status,
        print_validation_report,
    },
    config::Config,
    error::Result,
};
use std::path::PathBuf;
use tracing::error;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "sales-loader")]
#[command(version, about = "Batch CSV-to-PostgreSQL sales warehouse loader", long_about = None)]
struct Cli {
    /// Path to config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize sales-loader configuration
    Init {
        /// Force overwrite existing config
        #[arg(long)]
        force: bool,
    },

    /// Load the CSV extract into the warehouse table
    Load {
        /// CSV extract to load (overrides config)
        #[arg(long)]
        csv: Option<PathBuf>,

        /// Destination table name (overrides config)
        #[arg(long)]
        table: Option<String>,
    },

    /// Parse the CSV extract without writing to the warehouse
    Validate {
        /// CSV extract to validate (overrides config)
        #[arg(long)]
        csv: Option<PathBuf>,
    },

    /// Show warehouse connection and table status
    Status,

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        error!("{}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"))
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    // Handle init command specially (doesn't need existing config)
    if matches!(cli.command, Commands::Init { .. }) {
        return handle_init(cli).await;
    }

    // Handle completions command (doesn't need config)
    if let Commands::Completions { shell } = cli.command {
        let mut cmd = Cli::command();
        generate(shell, &mut cmd, "sales-loader", &mut std::io::stdout());
        return Ok(());
    }

    // Load configuration
    let config = load_config(cli.config.as_deref())?;

    // Handle commands
    match cli.command {
        Commands::Init { .. } => unreachable!(),

        Commands::Load { csv, table } => {
            let mut config = config;
            if let Some(csv) = csv {
                config.load.csv_path = csv;
            }
            if let Some(table) = table {
                config.load.table = table;
            }
            config.validate()?;

            let report = cmd_load(config).await?;

            if cli.json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                print_load_report(&report);
            }
        }

        Commands::Validate { csv } => {
            let csv_path = csv.unwrap_or_else(|| config.load.csv_path.clone());
            let report = cmd_validate(&csv_path)?;

            if cli.json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                print_validation_report(&report);
            }
        }

        Commands::Status => {
            let status = cmd_status(&config).await?;

            if cli.json {
                println!("{}", serde_json::to_string_pretty(&status)?);
            } else {
                print_status(&status);
            }
        }

        Commands::Completions { .. } => unreachable!(),
    }

    Ok(())
}

async fn handle_init(cli: Cli) -> Result<()> {
    let Commands::Init { force } = cli.command else {
        unreachable!()
    };

    // Get the base directory: if user specifies a config file, use its parent
    let (base_dir, config_path) = if let Some(path) = cli.config {
        let base = path
            .parent()
            .map(PathBuf::from)
            .unwrap_or_else(Config::default_base_dir);
        let config = if path.extension().map_or(false, |e| e == "toml") {
            path // User specified a .toml file
        } else {
            path.join("config.toml") // User specified a directory
        };
        (base, config)
    } else {
        let base = Config::default_base_dir();
        (base.clone(), base.join("config.toml"))
    };

    if config_path.exists() && !force {
        eprintln!(
            "Config file already exists at: {}\nUse --force to overwrite.",
            config_path.display()
        );
        std::process::exit(1);
    }

    cmd_init(Some(base_dir), force).await?;

    println!("✓ sales-loader initialized successfully");
    println!("  Config: {}", config_path.display());
    println!("\nNext steps:");
    println!("  1. Edit the config file with your warehouse connection");
    println!("  2. Export the warehouse password (WAREHOUSE_POSTGRES_PASSWORD)");
    println!("  3. Run a load: sales-loader load --csv /path/to/extract.csv");

    Ok(())
}

fn load_config(path: Option<&std::path::Path>) -> Result<Config> {
    let config_path = path
        .map(PathBuf::from)
        .unwrap_or_else(Config::default_config_path);

    if !config_path.exists() {
        eprintln!(
            "Config file not found: {}\nRun 'sales-loader init' first.",
            config_path.display()
        );
        std::process::exit(1);
    }

    Config::load(&config_path)
}
