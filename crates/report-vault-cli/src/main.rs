use anyhow::Result;
use clap::{Parser, Subcommand};
use report_vault_core::StorageSettings;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod commands;

#[derive(Parser)]
#[command(name = "report-vault")]
#[command(about = "Content-addressed report uploads with expiring retention", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging (-v for debug, -vv for trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Upload a zip archive under its content digest and set its retention rule
    Upload {
        /// Filename (or path) of the local zip file to upload
        #[arg(short, long)]
        file: String,

        /// Customer name associated with the specified file
        #[arg(short, long)]
        customer: String,

        /// Target bucket
        #[arg(short, long, env = "REPORT_VAULT_BUCKET")]
        bucket: String,

        /// AWS region
        #[arg(long)]
        region: Option<String>,

        /// Custom endpoint URL (for S3-compatible services like MinIO)
        #[arg(long)]
        endpoint: Option<String>,
    },

    /// List every object in the bucket with metadata and expiration
    List {
        /// Target bucket
        #[arg(short, long, env = "REPORT_VAULT_BUCKET")]
        bucket: String,

        /// AWS region
        #[arg(long)]
        region: Option<String>,

        /// Custom endpoint URL (for S3-compatible services like MinIO)
        #[arg(long)]
        endpoint: Option<String>,
    },
}

fn storage_settings(
    bucket: String,
    region: Option<String>,
    endpoint: Option<String>,
) -> StorageSettings {
    // Custom endpoints are S3-compatible services that need path-style
    // addressing.
    let force_path_style = endpoint.is_some();

    StorageSettings::S3 {
        bucket,
        region,
        endpoint,
        access_key: None,
        secret_key: None,
        force_path_style,
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    // Priority: RUST_LOG env var > verbose flag > default (info)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else {
        match cli.verbose {
            0 => EnvFilter::new("info"),
            1 => EnvFilter::new("debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();

    match cli.command {
        Commands::Upload {
            file,
            customer,
            bucket,
            region,
            endpoint,
        } => {
            let settings = storage_settings(bucket, region, endpoint);
            commands::upload::run(&file, &customer, &settings).await?;
        }
        Commands::List {
            bucket,
            region,
            endpoint,
        } => {
            let settings = storage_settings(bucket, region, endpoint);
            commands::list::run(&settings).await?;
        }
    }

    Ok(())
}
