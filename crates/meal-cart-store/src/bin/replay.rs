//! # Cart Action Replay
//!
//! Feeds a recorded list of cart actions through a fresh store and prints
//! the resulting cart. Handy for reproducing a cart bug from a UI log.
//!
//! ## Usage
//! ```bash
//! cargo run -p meal-cart-store --bin meal-cart-replay -- actions.json
//!
//! # With an explicit config file
//! cargo run -p meal-cart-store --bin meal-cart-replay -- --config cart.toml actions.json
//! ```
//!
//! ## Input
//! A JSON array of actions in the UI's wire format:
//! ```json
//! [
//!   {"type": "ADD_ITEM", "item": {"id": "m1", "name": "Mac & Cheese", "price": 899}},
//!   {"type": "ADD_ITEM", "item": {"id": "m1", "name": "Mac & Cheese", "price": 899}},
//!   {"type": "REMOVE_ITEM", "id": "m1"},
//!   {"type": "CLEAR_CART"}
//! ]
//! ```
//! Unknown action types are applied as no-ops. A rejected action (invalid
//! candidate, or a missing item under the `reject` policy) is reported on
//! stderr and the replay continues.

use std::env;
use std::path::PathBuf;

use meal_cart_core::CartAction;
use meal_cart_store::{init_tracing, CartHandle, CartStore, StoreConfig};
use serde::Serialize;
use tracing::{info, warn};

/// Final output printed to stdout.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ReplaySummary {
    applied: usize,
    rejected: usize,
    total_quantity: u64,
    total_price: String,
    cart: meal_cart_core::CartSnapshot,
}

/// What the command line asked for.
#[derive(Debug, PartialEq, Eq)]
enum Command {
    Help,
    Replay {
        config_path: Option<PathBuf>,
        actions_path: PathBuf,
    },
}

/// Parses the arguments after the program name.
fn parse_args(args: &[String]) -> Result<Command, String> {
    let mut config_path: Option<PathBuf> = None;
    let mut actions_path: Option<PathBuf> = None;

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--config" | "-c" => {
                let path = args
                    .get(i + 1)
                    .ok_or_else(|| format!("{} requires a path", args[i]))?;
                config_path = Some(PathBuf::from(path));
                i += 1;
            }
            "--help" | "-h" => return Ok(Command::Help),
            other => actions_path = Some(PathBuf::from(other)),
        }
        i += 1;
    }

    let actions_path =
        actions_path.ok_or_else(|| "missing <ACTIONS.json> argument (see --help)".to_string())?;

    Ok(Command::Replay {
        config_path,
        actions_path,
    })
}

fn print_help() {
    println!("Meal Cart Action Replay");
    println!();
    println!("Usage: meal-cart-replay [OPTIONS] <ACTIONS.json>");
    println!();
    println!("Options:");
    println!("  -c, --config <PATH>  Cart config file (default: platform config dir)");
    println!("  -h, --help           Show this help message");
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().skip(1).collect();

    let (config_path, actions_path) = match parse_args(&args)? {
        Command::Help => {
            print_help();
            return Ok(());
        }
        Command::Replay {
            config_path,
            actions_path,
        } => (config_path, actions_path),
    };

    let config = StoreConfig::load(config_path)?;
    init_tracing(&config.logging.filter);

    let contents = std::fs::read_to_string(&actions_path)?;
    let actions: Vec<CartAction> = serde_json::from_str(&contents)?;
    info!(path = ?actions_path, count = actions.len(), "Replaying cart actions");

    let store = CartStore::with_settings(config.cart.clone());
    let mut applied = 0;
    let mut rejected = 0;

    for (index, action) in actions.into_iter().enumerate() {
        let kind = action.kind();
        match store.dispatch(action) {
            Ok(_) => applied += 1,
            Err(e) => {
                rejected += 1;
                warn!(index, action = kind, error = %e, "Action rejected");
            }
        }
    }

    let cart = store.current_items();
    let summary = ReplaySummary {
        applied,
        rejected,
        total_quantity: cart.total_quantity(),
        total_price: cart.total_price().to_string(),
        cart,
    };

    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}
