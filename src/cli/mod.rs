use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use crate::application::{ExpenseService, SecretAuth};
use crate::http::{run_server, ServerConfig};

/// Mensal - Monthly Household Expense Ledger
#[derive(Parser)]
#[command(name = "mensal")]
#[command(about = "A self-hosted monthly household expense ledger with an HTTP API")]
#[command(version)]
pub struct Cli {
    /// Database file path
    #[arg(short, long, default_value = "mensal.db")]
    pub database: String,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize a new database
    Init,

    /// Run the HTTP API server
    Serve {
        /// Address to bind to
        #[arg(long, default_value = "127.0.0.1:8000")]
        bind: String,

        /// Allow any CORS origin (development only)
        #[arg(long)]
        cors_permissive: bool,
    },

    /// Category management commands
    #[command(subcommand)]
    Category(CategoryCommands),
}

#[derive(Subcommand)]
pub enum CategoryCommands {
    /// Create a new category
    Add {
        /// Category name (must be unique)
        name: String,
    },

    /// List all categories
    List,
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        match self.command {
            Commands::Init => {
                ExpenseService::init(&self.database).await?;
                println!("Initialized database at {}", self.database);
                Ok(())
            }

            Commands::Serve {
                bind,
                cors_permissive,
            } => {
                let bind_addr = bind
                    .parse()
                    .with_context(|| format!("Invalid bind address: {bind}"))?;

                // The admin credential is bound to configuration, never a
                // built-in default.
                let secret = std::env::var("ADMIN_PASSWORD")
                    .context("ADMIN_PASSWORD must be set (in the environment or a .env file)")?;

                let service = ExpenseService::init(&self.database).await?;
                let auth = Arc::new(SecretAuth::new(secret));

                let config = ServerConfig {
                    bind_addr,
                    cors_permissive,
                };
                run_server(service, auth, config).await?;
                Ok(())
            }

            Commands::Category(command) => {
                let service = ExpenseService::init(&self.database).await?;
                match command {
                    CategoryCommands::Add { name } => {
                        let category = service.add_category(&name).await?;
                        println!("Created category '{}' (id {})", category.name, category.id);
                    }
                    CategoryCommands::List => {
                        let categories = service.list_categories().await?;
                        if categories.is_empty() {
                            println!("No categories yet");
                        } else {
                            for category in categories {
                                println!("{:>4}  {}", category.id, category.name);
                            }
                        }
                    }
                }
                Ok(())
            }
        }
    }
}
