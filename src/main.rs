use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use gocart::{CartConfig, CartStore, FileStorage, NewItem};

#[derive(Parser)]
#[command(name = "gocart", about = "Local shopping cart", version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Add a product to the cart, or bump its quantity if already present.
    Add {
        id: String,
        #[arg(long)]
        title: String,
        #[arg(long, default_value = "")]
        image_url: String,
        #[arg(long, default_value_t = 0.0)]
        price: f64,
    },
    /// Increase the quantity of a product already in the cart.
    Increment { id: String },
    /// Decrease the quantity of a product; removes it at zero.
    Decrement { id: String },
    /// Print the cart contents.
    List,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let config = CartConfig::load().context("loading configuration")?;
    let storage = Arc::new(FileStorage::new(config.storage_path()));
    let cart = CartStore::hydrate(storage).await;

    match cli.command {
        Command::Add {
            id,
            title,
            image_url,
            price,
        } => {
            let quantity = cart.add_to_cart(NewItem {
                id: id.clone(),
                title,
                image_url,
                price,
            });
            println!("{id} x{quantity}");
        }
        Command::Increment { id } => {
            let quantity = cart.increment(&id)?;
            println!("{id} x{quantity}");
        }
        Command::Decrement { id } => match cart.decrement(&id)? {
            Some(quantity) => println!("{id} x{quantity}"),
            None => println!("{id} removed"),
        },
        Command::List => {
            for item in cart.products() {
                println!(
                    "{} x{}  {}  ${:.2}",
                    item.id, item.quantity, item.title, item.price
                );
            }
        }
    }

    // The process exits right after this; wait for the write-through to land.
    cart.flush().await.context("persisting cart")?;
    Ok(())
}
