use std::path::PathBuf;

use clap::Parser;
use importer::{CsvWorkoutImporter, PgWorkoutStore, parse_records};
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "repbook-import")]
#[command(about = "RepBook workout history CSV importer", long_about = None)]
#[command(version)]
struct Cli {
    /// CSV file to import
    file: PathBuf,

    /// User the imported records belong to
    #[arg(short, long)]
    user_id: String,

    #[arg(long, env = "DATABASE_URL")]
    database_url: String,

    /// Parse and validate the file without writing to the database
    #[arg(long)]
    dry_run: bool,

    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("import={log_level},importer={log_level}").into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Reading CSV from: {}", cli.file.display());
    let csv_text = tokio::fs::read_to_string(&cli.file).await?;

    if cli.dry_run {
        let records = parse_records(&csv_text)?;
        tracing::info!("✓ Validation successful: {} data rows", records.len());
        println!("{}", serde_json::to_string_pretty(&records)?);
        return Ok(());
    }

    tracing::info!("Connecting to database...");
    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&cli.database_url)
        .await?;

    let store = PgWorkoutStore::new(pool);
    let importer = CsvWorkoutImporter::new(&store);
    let records = importer.import(&cli.user_id, &csv_text).await?;

    tracing::info!("✓ Imported {} workout records", records.len());
    println!("{}", serde_json::to_string_pretty(&records)?);

    Ok(())
}
