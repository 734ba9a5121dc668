/// Main entry point for the Morning Routine MCP server
///
/// Sets up logging, parses command line arguments and starts the MCP server,
/// which listens for JSON-RPC requests over stdin/stdout.

use clap::Parser;
use std::path::PathBuf;
use tracing::info;

use morning_routine_mcp::MorningRoutineServer;

const DB_FILE: &str = "routine.db";

/// Pick a writable directory for the database
fn get_default_database_path() -> Result<PathBuf, Box<dyn std::error::Error>> {
    let candidates = [
        dirs::home_dir().map(|p| p.join(".morning_routine")),
        dirs::data_dir().map(|p| p.join("morning_routine")),
        dirs::config_dir().map(|p| p.join("morning_routine")),
        std::env::current_dir().ok().map(|p| p.join(".morning_routine")),
    ];

    for dir in candidates.iter().flatten() {
        if std::fs::create_dir_all(dir).is_err() {
            continue;
        }
        let marker = dir.join(".test_write");
        if std::fs::write(&marker, "test").is_ok() {
            let _ = std::fs::remove_file(&marker);
            return Ok(dir.join(DB_FILE));
        }
    }

    let temp_dir = std::env::temp_dir().join("morning_routine");
    std::fs::create_dir_all(&temp_dir)?;
    let db_path = temp_dir.join(DB_FILE);

    tracing::warn!("Using temporary directory for database: {}", db_path.display());
    Ok(db_path)
}

/// Command line arguments for the Morning Routine MCP server
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the SQLite database file
    /// If not provided, uses a default location in the user's home directory
    #[arg(long)]
    database: Option<PathBuf>,

    /// Profile whose routine and streak the tools work on
    #[arg(long, default_value = "default")]
    profile: String,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,

    /// Enable verbose output (implies debug)
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let log_level = if args.verbose {
        "debug"
    } else if args.debug {
        "info"
    } else {
        "warn"
    };

    // stdout carries the protocol, so logs go to stderr
    tracing_subscriber::fmt()
        .with_env_filter(format!("morning_routine_mcp={}", log_level))
        .with_writer(std::io::stderr)
        .init();

    info!("Starting Morning Routine MCP server");

    let db_path = match args.database {
        Some(path) => {
            if let Some(parent) = path.parent() {
                if !parent.as_os_str().is_empty() && !parent.exists() {
                    std::fs::create_dir_all(parent)?;
                }
            }
            path
        }
        None => get_default_database_path()?,
    };

    info!("Using database at: {} (profile '{}')", db_path.display(), args.profile);

    let server = MorningRoutineServer::new(db_path, args.profile).await?;
    server.run().await?;

    info!("Morning Routine MCP server shutdown complete");
    Ok(())
}
