//! catctl: catalog CLI client
//!
//! Control and test interface for catalogd.

use std::fs;
use std::io::{self, IsTerminal, Read};
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use futures_util::StreamExt;

use catalog::client::ServiceClient;
use catalog::{Category, CategoryStore, NewCategory};

/// Catalog CLI client
#[derive(Parser)]
#[command(name = "catctl")]
#[command(version = catalog::PKG_VERSION)]
#[command(about = "Catalog category service client")]
struct Args {
    /// Server address
    #[arg(
        short,
        long,
        env = "CATALOG_ADDRESS",
        default_value = "http://127.0.0.1:50051"
    )]
    address: String,

    /// Read and print categories as JSON lines
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Create a single category
    Create {
        /// Category name
        name: String,
        /// Category description
        #[arg(default_value = "")]
        description: String,
    },

    /// List all categories
    List,

    /// Show one category
    Get {
        /// Category id
        id: String,
    },

    /// Create categories from `name<TAB>description` lines in one client
    /// stream; prints them once all are stored
    Import {
        /// Input file (or omit to read from stdin)
        file: Option<PathBuf>,
    },

    /// Create categories from `name<TAB>description` lines over the
    /// bidirectional stream; prints each as it is confirmed
    Sync {
        /// Input file (or omit to read from stdin)
        file: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialise tracing (default: warn for CLI; override with RUST_LOG).
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let args = Args::parse();
    let client = ServiceClient::connect(&args.address).await?;

    match args.command {
        Command::Create { name, description } => {
            let category = client.create(&name, &description).await?;
            print_category(&category, args.json)?;
        }

        Command::List => {
            let categories = client.find_all().await?;
            if categories.is_empty() && !args.json {
                println!("no categories");
            }
            for category in &categories {
                print_category(category, args.json)?;
            }
        }

        Command::Get { id } => {
            let category = client.find_by_id(&id).await?;
            print_category(&category, args.json)?;
        }

        Command::Import { file } => {
            let items = read_items(file, "import", args.json)?;
            let created = client.create_stream(items).await?;
            for category in &created {
                print_category(category, args.json)?;
            }
            if !args.json {
                println!("imported {} categories", created.len());
            }
        }

        Command::Sync { file } => {
            let items = read_items(file, "sync", args.json)?;
            let mut confirmations = client.create_bidirectional_stream(items).await?;
            while let Some(category) = confirmations.next().await {
                print_category(&category?, args.json)?;
            }
        }
    }

    Ok(())
}

/// Read category lines from `file`, or from stdin when no file is given.
/// With `--json` each line is a JSON object, otherwise `name<TAB>description`.
fn read_items(
    file: Option<PathBuf>,
    command: &str,
    json: bool,
) -> Result<Vec<NewCategory>, Box<dyn std::error::Error>> {
    let input = match file {
        Some(path) => fs::read_to_string(&path)
            .map_err(|e| format!("{command}: failed to read {}: {e}", path.display()))?,
        None if !io::stdin().is_terminal() => {
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf)?;
            buf
        }
        None => {
            return Err(format!("{command}: no input provided (pass a file or pipe via stdin)").into());
        }
    };

    Ok(NewCategory::parse_lines(&input, json)?)
}

fn print_category(category: &Category, json: bool) -> Result<(), catalog::CatalogError> {
    if json {
        println!("{}", serde_json::to_string(category)?);
    } else {
        println!("{}\t{}\t{}", category.id, category.name, category.description);
    }
    Ok(())
}
