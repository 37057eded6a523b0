//! Operator CLI for short-url-service.
//!
//! Provisions accounts, shows counts, and runs database diagnostics without
//! going through the HTTP API.
//!
//! # Usage
//!
//! ```bash
//! # Create an admin account (password is generated when omitted)
//! cargo run --bin admin -- account create --email ops@example.com --username ops --admin
//!
//! # List accounts
//! cargo run --bin admin -- account list
//!
//! # View counts
//! cargo run --bin admin -- stats
//!
//! # Check database connection
//! cargo run --bin admin -- db check
//! ```
//!
//! # Environment Variables
//!
//! - `DATABASE_URL` (required): PostgreSQL connection string
//! - `JWT_SECRET` (optional): only needed so the account service can be built;
//!   the CLI never issues tokens
//! - `PASSWORD_HASH_ITERATIONS` (optional): PBKDF2 work factor for new accounts

use short_url_service::application::services::{AccountService, ShortUrlService};
use short_url_service::domain::entities::Role;
use short_url_service::infrastructure::persistence::Repositories;
use short_url_service::state::{AppState, TokenSettings};
use short_url_service::utils::code_generator::DEFAULT_CODE_LENGTH;
use short_url_service::utils::password::DEFAULT_ITERATIONS;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::{Confirm, Input};
use sqlx::PgPool;
use std::sync::Arc;

/// Length of generated passwords.
const GENERATED_PASSWORD_LEN: usize = 20;

/// CLI tool for managing short-url-service.
#[derive(Parser)]
#[command(name = "admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage accounts
    Account {
        #[command(subcommand)]
        action: AccountAction,
    },

    /// Show counts of short URLs and accounts
    Stats,

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

#[derive(Subcommand)]
enum AccountAction {
    /// Create a new account
    Create {
        #[arg(short, long)]
        email: Option<String>,

        #[arg(short, long)]
        username: Option<String>,

        /// Password (auto-generated if not provided)
        #[arg(short, long)]
        password: Option<String>,

        /// Grant the Admin role instead of User
        #[arg(long)]
        admin: bool,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },

    /// List all accounts
    List,
}

#[derive(Subcommand)]
enum DbAction {
    /// Check database connection
    Check,

    /// Show database info
    Info,

    /// Apply pending migrations
    Migrate,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let database_url = std::env::var("DATABASE_URL").context("DATABASE_URL must be set")?;

    let pool = PgPool::connect(&database_url)
        .await
        .context("Failed to connect to database")?;

    match cli.command {
        Commands::Account { action } => handle_account_action(action, &pool).await?,
        Commands::Stats => handle_stats(&pool).await?,
        Commands::Db { action } => handle_db_action(action, &pool).await?,
    }

    Ok(())
}

/// Wires the services against the database. Tokens are never issued here, so
/// a missing `JWT_SECRET` falls back to a random throwaway key.
fn build_state(pool: &PgPool) -> Result<AppState> {
    let password_iterations = match std::env::var("PASSWORD_HASH_ITERATIONS") {
        Ok(value) => value
            .parse()
            .context("PASSWORD_HASH_ITERATIONS must be a positive integer")?,
        Err(_) => DEFAULT_ITERATIONS,
    };
    let secret = std::env::var("JWT_SECRET").unwrap_or_else(|_| generate_secret(48));
    let tokens = TokenSettings {
        secret,
        issuer: "short-url-service".to_string(),
        audience: "short-url-service".to_string(),
        ttl: chrono::Duration::hours(1),
    };

    Ok(AppState::new(
        Repositories::postgres(Arc::new(pool.clone())),
        &tokens,
        DEFAULT_CODE_LENGTH as i32,
        password_iterations,
    ))
}

async fn handle_account_action(action: AccountAction, pool: &PgPool) -> Result<()> {
    let state = build_state(pool)?;

    match action {
        AccountAction::Create {
            email,
            username,
            password,
            admin,
            yes,
        } => {
            // Role rows must exist before one can be assigned.
            state
                .bootstrap()
                .seed_roles()
                .await
                .map_err(|e| anyhow::anyhow!("Failed to seed roles: {}", e))?;

            let role = if admin { Role::Admin } else { Role::User };
            create_account(&state.account_service, email, username, password, role, yes).await?;
        }
        AccountAction::List => list_accounts(&state.account_service).await?,
    }

    Ok(())
}

/// Creates an account with interactive prompts for missing fields.
///
/// A generated password is printed once and cannot be recovered later; only
/// its salted hash is stored.
async fn create_account(
    accounts: &AccountService,
    email: Option<String>,
    username: Option<String>,
    password: Option<String>,
    role: Role,
    skip_confirm: bool,
) -> Result<()> {
    println!("{}", "👤 Create Account".bright_blue().bold());
    println!();

    let email = match email {
        Some(e) => e,
        None => Input::new().with_prompt("Email").interact_text()?,
    };
    let username = match username {
        Some(u) => u,
        None => Input::new().with_prompt("Username").interact_text()?,
    };

    let (password, generated) = match password {
        Some(p) => (p, false),
        None => (generate_secret(GENERATED_PASSWORD_LEN), true),
    };

    println!();
    println!("{}", "Account details:".bright_white().bold());
    println!("  Email:    {}", email.cyan());
    println!("  Username: {}", username.cyan());
    println!("  Role:     {}", role.to_string().cyan());
    if generated {
        println!("  Password: {}", password.bright_yellow().bold());
        println!();
        println!(
            "{}",
            "⚠️  Save this password now! It won't be shown again."
                .red()
                .bold()
        );
    }
    println!();

    if !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt("Create this account?")
            .default(true)
            .interact()?;

        if !confirmed {
            println!("{}", "❌ Cancelled".red());
            return Ok(());
        }
    }

    let account = accounts
        .provision(&email, &username, &password, role)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to create account: {}", e))?;

    println!();
    println!("{}", "✅ Account created successfully!".green().bold());
    println!("  ID: {}", account.id.to_string().bright_black());
    println!();

    Ok(())
}

/// Lists all accounts, oldest first.
///
/// ```text
/// 📋 Accounts
///
///   Username             Email                          Role    Created
///   ───────────────────────────────────────────────────────────────────────────
///   admin                admin@example.com              Admin   2026-01-15 10:30
/// ```
async fn list_accounts(accounts: &AccountService) -> Result<()> {
    println!("{}", "📋 Accounts".bright_blue().bold());
    println!();

    let accounts = accounts
        .list()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to list accounts: {}", e))?;

    if accounts.is_empty() {
        println!("{}", "  No accounts found".yellow());
        println!();
        println!(
            "  Create one with: {} admin account create",
            "cargo run --bin".bright_cyan()
        );
        return Ok(());
    }

    println!(
        "  {:<20} {:<30} {:<7} {}",
        "Username".bright_white().bold(),
        "Email".bright_white().bold(),
        "Role".bright_white().bold(),
        "Created".bright_white().bold()
    );
    println!("  {}", "─".repeat(75).bright_black());

    for account in &accounts {
        let role = match account.effective_role() {
            Role::Admin => "Admin".magenta(),
            Role::User => "User".green(),
        };

        println!(
            "  {:<20} {:<30} {:<7} {}",
            account.username.cyan(),
            account.email,
            role,
            account
                .created_at
                .format("%Y-%m-%d %H:%M")
                .to_string()
                .bright_black()
        );
    }

    println!();
    println!(
        "  Total: {}",
        accounts.len().to_string().bright_white().bold()
    );
    println!();

    Ok(())
}

/// Displays the number of short URLs, accounts and admins.
async fn handle_stats(pool: &PgPool) -> Result<()> {
    println!("{}", "📊 Statistics".bright_blue().bold());
    println!();

    let state = build_state(pool)?;
    let short_urls: &ShortUrlService = &state.short_url_service;

    let url_count = short_urls
        .count()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to count short URLs: {}", e))?;

    let accounts = state
        .account_service
        .list()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to list accounts: {}", e))?;
    let admin_count = accounts
        .iter()
        .filter(|a| a.effective_role() == Role::Admin)
        .count();

    println!(
        "  Short URLs: {}",
        url_count.to_string().bright_green().bold()
    );
    println!(
        "  Accounts:   {}",
        accounts.len().to_string().bright_green().bold()
    );
    println!(
        "  Admins:     {}",
        admin_count.to_string().bright_green().bold()
    );
    println!();

    Ok(())
}

async fn handle_db_action(action: DbAction, pool: &PgPool) -> Result<()> {
    match action {
        DbAction::Check => {
            println!("{}", "🔍 Checking database connection...".bright_blue());

            sqlx::query("SELECT 1").fetch_one(pool).await?;

            println!("{}", "✅ Database connection OK".green().bold());
        }
        DbAction::Info => {
            println!("{}", "ℹ️  Database Information".bright_blue().bold());
            println!();

            let version: String = sqlx::query_scalar("SELECT version()")
                .fetch_one(pool)
                .await?;

            println!("  PostgreSQL: {}", version.bright_white());
            println!();
        }
        DbAction::Migrate => {
            println!("{}", "🛠  Applying migrations...".bright_blue());

            sqlx::migrate!("./migrations")
                .run(pool)
                .await
                .context("Failed to apply migrations")?;

            println!("{}", "✅ Migrations applied".green().bold());
        }
    }

    Ok(())
}

/// Random alphanumeric string of `len` characters.
fn generate_secret(len: usize) -> String {
    use rand::Rng;
    const CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";

    let mut rng = rand::rng();

    (0..len)
        .map(|_| {
            let idx = rng.random_range(0..CHARSET.len());
            CHARSET[idx] as char
        })
        .collect()
}
