//! # Taskish CLI
//!
//! Command-line interface for the Taskish task-management backend.
//!
//! ## Usage
//!
//! ```bash
//! taskish serve    # Start the API server (runs migrations automatically)
//! taskish migrate  # Run database migrations
//! taskish --help   # Show help
//! ```

use clap::{Args, CommandFactory as _, Parser, Subcommand};
use error::Result;
use migration::MigratorTrait;

mod config;
mod server;

use config::Settings;

/// Taskish - team task management API
#[derive(Parser, Debug)]
#[command(name = "taskish")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Log level (debug, info, warn, error)
    #[arg(short = 'L', long, env = "RUST_LOG", default_value = "info")]
    log_level: String,

    /// Output format (json, pretty, compact)
    #[arg(short, long, env = "TASKISH_LOG_FORMAT", default_value = "pretty")]
    log_format: String,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Start the API server
    Serve(ServeArgs),

    /// Run database migrations
    Migrate(MigrateArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(Args, Debug)]
struct ServeArgs {
    /// Server host to bind to
    #[arg(long, env = "TASKISH_HOST", default_value = "0.0.0.0")]
    host: String,

    /// Server port to bind to
    #[arg(short, long, env = "TASKISH_PORT", default_value = "3000")]
    port: u16,
}

#[derive(Args, Debug)]
struct MigrateArgs {
    /// Rollback the last migration
    #[arg(long)]
    rollback: bool,
}

#[derive(Args, Debug)]
struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    shell: clap_complete::Shell,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    logging::init(&cli.log_level, &cli.log_format)
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))?;

    match cli.command {
        Commands::Serve(args) => {
            let settings = Settings::from_env()?;
            server::run(&settings, &args.host, args.port).await?;
        },
        Commands::Migrate(args) => migrate(&args).await?,
        Commands::Completions(args) => completions(&args)?,
    }

    Ok(())
}

async fn migrate(args: &MigrateArgs) -> Result<()> {
    let settings = Settings::from_env()?;

    let db = migration::connect_to_database(&settings.database_url)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to connect to database: {}", e))?;

    if args.rollback {
        logging::info!(target: "migrate", "Rolling back the last migration...");
        migration::Migrator::down(&db, None)
            .await
            .map_err(|e| anyhow::anyhow!("Rollback failed: {}", e))?;
        logging::info!(target: "migrate", "Rollback completed successfully");
        return Ok(());
    }

    migration::Migrator::up(&db, None)
        .await
        .map_err(|e| anyhow::anyhow!("Migration failed: {}", e))?;
    logging::info!(target: "migrate", "Migrations completed successfully");

    Ok(())
}

fn completions(args: &CompletionsArgs) -> Result<()> {
    clap_complete::generate(
        args.shell,
        &mut Cli::command(),
        "taskish",
        &mut std::io::stdout(),
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_cli_parse_serve() {
        let cli = Cli::parse_from(["taskish", "serve", "--host", "127.0.0.1", "--port", "8080"]);
        match cli.command {
            Commands::Serve(args) => {
                assert_eq!(args.host, "127.0.0.1");
                assert_eq!(args.port, 8080);
            },
            _ => panic!("Expected Serve command"),
        }
    }

    #[test]
    fn test_cli_default_values() {
        let cli = Cli::parse_from(["taskish", "migrate"]);
        assert_eq!(cli.log_level, "info");
        assert_eq!(cli.log_format, "pretty");
    }

    #[test]
    fn test_migrate_rollback() {
        let cli = Cli::parse_from(["taskish", "migrate", "--rollback"]);
        match cli.command {
            Commands::Migrate(args) => assert!(args.rollback),
            _ => panic!("Expected Migrate command"),
        }
    }

    #[test]
    fn test_cli_command_factory() {
        let cmd = Cli::command();
        assert_eq!(cmd.get_name(), "taskish");
    }

    #[test]
    fn test_completions_returns_ok() {
        let args = CompletionsArgs {
            shell: clap_complete::Shell::Bash,
        };
        assert!(completions(&args).is_ok());
    }
}
