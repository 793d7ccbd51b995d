mod commands;
mod logging;
mod output;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use medcheck_core::config::Config;
use medcheck_core::error::MedcheckError;
use medcheck_core::Inventory;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "medcheck",
    version,
    about = "Medicine inventory tracking and quality monitoring"
)]
struct Cli {
    /// Directory holding the CSV stores (overrides MEDCHECK_DATA_DIR)
    #[arg(long, global = true, value_name = "DIR")]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Operator credentials required by inventory commands.
#[derive(Args)]
struct Credentials {
    /// Registered username
    #[arg(short, long, env = "MEDCHECK_USER")]
    user: String,

    /// Password for the user
    #[arg(long, env = "MEDCHECK_PASSWORD", hide_env_values = true)]
    password: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Register a new operator
    Register { username: String, password: String },
    /// Check a username and password
    Login { username: String, password: String },
    /// Add a medicine to the inventory
    Add {
        #[command(flatten)]
        credentials: Credentials,

        /// Medicine name
        #[arg(long)]
        name: String,

        /// Expiry date (YYYY-MM-DD)
        #[arg(long)]
        expiry: String,

        /// Whether the package is sealed (yes/no)
        #[arg(long)]
        sealed: String,

        /// Measured chemical composition
        #[arg(long)]
        chemical: String,

        /// Declared standard composition
        #[arg(long = "std", value_name = "STD")]
        std_composition: String,

        /// Barcode
        #[arg(long)]
        barcode: String,

        /// Amount in stock
        #[arg(long)]
        amount: String,

        /// Batch number
        #[arg(long)]
        batch: String,
    },
    /// Grade every stored medicine and log rejections
    Check {
        #[command(flatten)]
        credentials: Credentials,

        /// Evaluate expiry against this date instead of today (YYYY-MM-DD)
        #[arg(long, value_name = "DATE")]
        today: Option<NaiveDate>,

        /// Output format: table (default) or json
        #[arg(short, long, default_value = "table")]
        output: String,
    },
    /// Find medicines by barcode
    Search {
        #[command(flatten)]
        credentials: Credentials,

        /// Barcode to look up
        barcode: String,

        /// Output format: table (default) or json
        #[arg(short, long, default_value = "table")]
        output: String,
    },
    /// Show the rejection log
    Rejected {
        #[command(flatten)]
        credentials: Credentials,

        /// Output format: table (default) or json
        #[arg(short, long, default_value = "table")]
        output: String,
    },
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), MedcheckError> {
    let mut config = Config::from_env()?;
    if let Some(dir) = cli.data_dir {
        config = config.with_data_dir(dir);
    }
    logging::init_tracing(&config.log_level);

    let inventory = Inventory::open(&config)?;

    match cli.command {
        Commands::Register { username, password } => {
            commands::auth::register(&inventory, &username, &password)
        }
        Commands::Login { username, password } => {
            commands::auth::login(&inventory, &username, &password)
        }
        Commands::Add {
            credentials,
            name,
            expiry,
            sealed,
            chemical,
            std_composition,
            barcode,
            amount,
            batch,
        } => {
            require_login(&inventory, &credentials)?;
            commands::medicine::add(
                &inventory,
                commands::medicine::NewMedicine {
                    name,
                    expiry,
                    sealed,
                    chemical,
                    std_composition,
                    barcode,
                    amount,
                    batch,
                },
            )
        }
        Commands::Check {
            credentials,
            today,
            output,
        } => {
            require_login(&inventory, &credentials)?;
            let today = today.unwrap_or_else(|| chrono::Local::now().date_naive());
            commands::quality::check(&inventory, today, &output)
        }
        Commands::Search {
            credentials,
            barcode,
            output,
        } => {
            require_login(&inventory, &credentials)?;
            commands::medicine::search(&inventory, &barcode, &output)
        }
        Commands::Rejected {
            credentials,
            output,
        } => {
            require_login(&inventory, &credentials)?;
            commands::quality::rejected(&inventory, &output)
        }
    }
}

fn require_login(inventory: &Inventory, credentials: &Credentials) -> Result<(), MedcheckError> {
    inventory.login(&credentials.user, &credentials.password)
}
