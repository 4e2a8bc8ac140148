//! `fundhub-admin` -- command-line admin client for the FundHub marketplace.
//!
//! Signs in against the REST API, keeps the session in a JSON file and
//! drives the resource stores. Results are printed to stdout as JSON; logs
//! go to stderr.
//!
//! # Environment variables
//!
//! | Variable                       | Default                 |
//! |--------------------------------|-------------------------|
//! | `FUNDHUB_API_URL`              | `http://localhost:5000` |
//! | `FUNDHUB_REQUEST_TIMEOUT_SECS` | `30`                    |
//! | `FUNDHUB_SESSION_FILE`         | `.fundhub/session.json` |
//! | `FUNDHUB_PAGE_LIMIT`           | `10`                    |
//! | `FUNDHUB_SEARCH_DEBOUNCE_MS`   | `300`                   |
//! | `FUNDHUB_ADMIN_PASSWORD`       | -- (for `login`)        |

mod cli;
mod commands;

use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use fundhub_events::EventBus;
use fundhub_gateway::{FileStorage, GatewayConfig, HttpGateway, LoggingNavigator, SessionStore};
use fundhub_stores::{StoreOptions, Stores};

use cli::{Cli, Command};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "fundhub_admin=info,fundhub_stores=info,fundhub_gateway=info".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let mut config = GatewayConfig::from_env()?;
    if let Some(api_url) = cli.api_url {
        config.api_url = api_url;
    }
    tracing::debug!(api_url = %config.api_url, session_file = %config.session_file.display(), "Configuration loaded");

    let events = Arc::new(EventBus::default());
    let storage = Arc::new(FileStorage::open(config.session_file.clone())?);
    let session = Arc::new(SessionStore::new(storage, events.clone()));
    session.restore().await?;

    let gateway = Arc::new(HttpGateway::new(
        &config,
        session.clone(),
        Arc::new(LoggingNavigator),
    )?);
    let stores = Stores::new(gateway.clone(), events, StoreOptions::from(&config));

    let output = match cli.command {
        Command::Login { email, password } => commands::login(&gateway, &email, &password).await?,
        Command::Logout => commands::logout(&gateway).await,
        Command::Whoami => commands::whoami(&session).await,
        Command::Users { action } => commands::account(stores.users.as_ref(), action).await?,
        Command::Businesses { action } => commands::verified(stores.businesses.as_ref(), action).await?,
        Command::Investors { action } => commands::verified(stores.investors.as_ref(), action).await?,
        Command::Tests { action } => commands::read(stores.tests.as_ref(), action).await?,
    };

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
