//! Plantomart CLI - Inspect and edit the persisted cart and wishlist.
//!
//! # Usage
//!
//! ```bash
//! # Show the cart with badge and subtotal
//! pm-cli cart list
//!
//! # Add a catalog item to the cart (adds one more unit if already present)
//! pm-cli cart add --id 1 --title "Snake Plant" --price 250 --tag Bestseller
//!
//! # Change a line's quantity (values below 1 are ignored)
//! pm-cli cart qty 1 3
//!
//! # Save an item, then add it to the cart
//! pm-cli wishlist add --id 7 --title "Boston Fern" --price 349
//! pm-cli wishlist move 7
//!
//! # List the featured collections
//! pm-cli collections
//! ```
//!
//! # Commands
//!
//! - `cart` - List, add, change quantity, remove
//! - `wishlist` - List, add, remove, move to cart
//! - `collections` - Featured collections shown on the home page
//!
//! Lists are read from and written to `PLANTOMART_STORAGE_DIR`, using the same
//! storage keys as the storefront, so edits show up in any running tab.

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};
use plantomart_storefront::StorefrontConfig;
use sentry::integrations::tracing as sentry_tracing;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;

use commands::ItemArgs;

#[derive(Parser)]
#[command(name = "pm-cli")]
#[command(author, version, about = "Plantomart CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage the shopping cart
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
    /// Manage the wishlist
    Wishlist {
        #[command(subcommand)]
        action: WishlistAction,
    },
    /// List the featured collections
    Collections,
}

#[derive(Subcommand)]
enum CartAction {
    /// Show cart lines, badge and subtotal
    List,
    /// Add one unit of an item
    Add(ItemArgs),
    /// Set the quantity of a line
    Qty {
        /// Item id
        id: String,
        /// New quantity (values below 1 are ignored)
        #[arg(allow_negative_numbers = true)]
        quantity: i64,
    },
    /// Remove a line
    Remove {
        /// Item id
        id: String,
    },
}

#[derive(Subcommand)]
enum WishlistAction {
    /// Show saved items and badge
    List,
    /// Save an item
    Add(ItemArgs),
    /// Remove a saved item
    Remove {
        /// Item id
        id: String,
    },
    /// Add a saved item to the cart (it stays in the wishlist)
    Move {
        /// Item id
        id: String,
    },
}

/// Initialize Sentry error tracking and return guard that must be kept alive.
fn init_sentry(config: &StorefrontConfig) -> Option<sentry::ClientInitGuard> {
    let dsn = config.sentry_dsn.as_ref()?;

    let guard = sentry::init((
        dsn.as_str(),
        sentry::ClientOptions {
            release: sentry::release_name!(),
            environment: config
                .sentry_environment
                .clone()
                .map(std::borrow::Cow::Owned),
            attach_stacktrace: true,
            ..Default::default()
        },
    ));

    Some(guard)
}

/// Filter tracing events to Sentry event types.
fn sentry_event_filter(metadata: &tracing::Metadata<'_>) -> sentry_tracing::EventFilter {
    match *metadata.level() {
        tracing::Level::ERROR | tracing::Level::WARN => sentry_tracing::EventFilter::Event,
        tracing::Level::INFO | tracing::Level::DEBUG => sentry_tracing::EventFilter::Breadcrumb,
        _ => sentry_tracing::EventFilter::Ignore,
    }
}

fn main() {
    let cli = Cli::parse();

    // Configuration errors are reported after tracing is up
    let config = StorefrontConfig::from_env();

    // Initialize Sentry (must be done before tracing subscriber)
    let _sentry_guard = config.as_ref().ok().and_then(init_sentry);

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "plantomart_cli=info,plantomart_storefront=info".into());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().without_time().with_target(false))
        .with(sentry_tracing::layer().event_filter(sentry_event_filter))
        .init();

    let result = config
        .map_err(commands::CommandError::from)
        .and_then(|config| run(cli, config));

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli, config: StorefrontConfig) -> Result<(), commands::CommandError> {
    let open_tab = || commands::open_tab(config);

    match cli.command {
        Commands::Cart { action } => {
            let tab = open_tab()?;
            match action {
                CartAction::List => commands::cart::list(&tab),
                CartAction::Add(item) => commands::cart::add(&tab, item)?,
                CartAction::Qty { id, quantity } => {
                    commands::cart::set_quantity(&tab, &id, quantity)?;
                }
                CartAction::Remove { id } => commands::cart::remove(&tab, &id)?,
            }
        }
        Commands::Wishlist { action } => {
            let tab = open_tab()?;
            match action {
                WishlistAction::List => commands::wishlist::list(&tab),
                WishlistAction::Add(item) => commands::wishlist::add(&tab, item)?,
                WishlistAction::Remove { id } => commands::wishlist::remove(&tab, &id)?,
                WishlistAction::Move { id } => commands::wishlist::move_to_cart(&tab, &id)?,
            }
        }
        Commands::Collections => commands::collections::list(),
    }
    Ok(())
}
