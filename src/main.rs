use anyhow::{Context, Result};
use bank_accounts::{
    logging, AccountProps, AccountService, AccountUpdate, AppConfig, ErrorCategory, StoreConfig,
};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "bank-accounts")]
#[command(about = "Create, read and update bank accounts", version)]
struct Cli {
    /// TOML config file (otherwise BANK_ACCOUNTS_* environment variables are used)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// SQLite database path; overrides the store from --config or the environment
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    #[arg(short, long, global = true, help = "Enable verbose output")]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Open a new account
    Create {
        #[arg(long)]
        name: String,
        #[arg(long)]
        owner: String,
    },
    /// Show an account
    Read { id: String },
    /// Rename an account or set its welcome message
    Update {
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        welcome_message: Option<String>,
    },
}

/// `--config` wins over the environment; an explicit `--db` wins over both.
fn resolve_config(cli: &Cli) -> Result<AppConfig> {
    let mut config = match &cli.config {
        Some(path) => AppConfig::load(path)?,
        None => AppConfig::from_env()?,
    };
    if let Some(path) = cli.db.clone() {
        config.store = StoreConfig::Sqlite { path };
    }
    Ok(config)
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let config = resolve_config(&cli)?;
    if config.store == StoreConfig::Memory {
        tracing::warn!("Using the in-memory store: accounts will not outlive this process");
    }

    let service = AccountService::new(config.store.open_store()?);

    let outcome = match cli.command {
        Command::Create { name, owner } => service.create(AccountProps::new(name, owner)),
        Command::Read { id } => service.read(&id),
        Command::Update {
            id,
            name,
            welcome_message,
        } => service.update(
            &id,
            AccountUpdate {
                name,
                welcome_message,
            },
        ),
    };

    match outcome {
        Ok(account) => {
            let json = serde_json::to_string_pretty(&account).context("Failed to render account")?;
            println!("{}", json);
            Ok(())
        }
        Err(error) => {
            eprintln!("❌ {}", error);
            if let Some(details) = &error.details {
                eprintln!("   {}", details);
            }
            let exit_code = match error.category() {
                ErrorCategory::Validation | ErrorCategory::NotFound => 1,
                ErrorCategory::Infrastructure => 2,
            };
            std::process::exit(exit_code);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_config(dir: &tempfile::TempDir, body: &str) -> PathBuf {
        let path = dir.path().join("bank-accounts.toml");
        std::fs::write(&path, body).unwrap();
        path
    }

    #[test]
    fn test_config_file_store_is_kept_without_db_flag() {
        let dir = tempfile::tempdir().unwrap();
        let config_path = write_config(&dir, "[store]\nbackend = \"memory\"\n");

        let cli = Cli::try_parse_from([
            "bank-accounts",
            "--config",
            config_path.to_str().unwrap(),
            "read",
            "some-id",
        ])
        .unwrap();

        assert!(cli.db.is_none());
        assert_eq!(resolve_config(&cli).unwrap().store, StoreConfig::Memory);
    }

    #[test]
    fn test_explicit_db_flag_overrides_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let config_path = write_config(&dir, "[store]\nbackend = \"memory\"\n");
        let db_path = dir.path().join("accounts.db");

        let cli = Cli::try_parse_from([
            "bank-accounts",
            "--config",
            config_path.to_str().unwrap(),
            "--db",
            db_path.to_str().unwrap(),
            "create",
            "--name",
            "Main",
            "--owner",
            "u1",
        ])
        .unwrap();

        assert_eq!(
            resolve_config(&cli).unwrap().store,
            StoreConfig::Sqlite { path: db_path }
        );
    }
}
