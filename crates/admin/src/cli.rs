//! Command-line surface.

use clap::{Args, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "fundhub-admin", version, about = "FundHub marketplace admin client")]
pub struct Cli {
    /// Override `FUNDHUB_API_URL`.
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Sign in and persist the session.
    Login {
        #[arg(long)]
        email: String,
        #[arg(long, env = "FUNDHUB_ADMIN_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Forget the stored session.
    Logout,
    /// Show the stored session profile.
    Whoami,
    /// Marketplace user accounts.
    Users {
        #[command(subcommand)]
        action: AccountAction,
    },
    /// Registered businesses.
    Businesses {
        #[command(subcommand)]
        action: VerifiedAction,
    },
    /// Registered investors.
    Investors {
        #[command(subcommand)]
        action: VerifiedAction,
    },
    /// Fundability test results.
    Tests {
        #[command(subcommand)]
        action: ReadAction,
    },
}

#[derive(Debug, Clone, Args)]
pub struct PageArgs {
    #[arg(long)]
    pub page: Option<u32>,
    #[arg(long)]
    pub limit: Option<u32>,
}

/// Actions available on every resource.
#[derive(Debug, Clone, Subcommand)]
pub enum ReadAction {
    /// Fetch one page of records.
    List(PageArgs),
    /// Fetch one record in full.
    Show { id: String },
    /// Server-side search.
    Search { query: String },
    /// Delete a record.
    Delete { id: String },
    /// Headline counts.
    Dashboard,
}

/// Actions on resources that can be suspended.
#[derive(Debug, Clone, Subcommand)]
pub enum AccountAction {
    #[command(flatten)]
    Read(ReadAction),
    /// Suspend an account.
    Suspend { id: String },
    /// Lift a suspension.
    Unsuspend { id: String },
}

/// Actions on resources that also go through verification.
#[derive(Debug, Clone, Subcommand)]
pub enum VerifiedAction {
    #[command(flatten)]
    Account(AccountAction),
    /// Mark a record as verified.
    Verify { id: String },
}
