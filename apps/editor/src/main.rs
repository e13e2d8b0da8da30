use anyhow::Result;
use clap::Parser;
use form_core::{HttpProductLookup, ProductForm};
use shared::domain::ProductType;
use tokio::io::{stdin, AsyncBufReadExt, BufReader};
use tracing_subscriber::EnvFilter;

mod commands;
mod render;
mod session;

use commands::{parse_command, ParseCommandError};
use session::{apply, Step};

#[derive(Parser, Debug)]
#[command(about = "Edit a product's name/value properties and generate JSON")]
struct Args {
    #[arg(long, env = "PRODUCT_SERVER_URL", default_value = "http://127.0.0.1:3000")]
    server_url: String,
    /// Fetch this product before the first prompt.
    #[arg(long)]
    handle: Option<String>,
    #[arg(long, default_value_t = ProductType::Furniture)]
    product_type: ProductType,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();
    let args = Args::parse();

    let lookup = HttpProductLookup::new(args.server_url);
    let mut form = ProductForm::new(args.product_type);
    if let Some(handle) = args.handle {
        form.set_handle(handle);
        form.fetch_current(&lookup).await;
    }

    println!("{}", render::render(&form));
    println!("type 'help' for commands");

    let mut lines = BufReader::new(stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let command = match parse_command(&line) {
            Ok(command) => command,
            Err(ParseCommandError::Empty) => continue,
            Err(err) => {
                println!("{err}");
                continue;
            }
        };

        match apply(&mut form, &lookup, command).await {
            Step::Quit => break,
            Step::Continue { status } => {
                println!("{}", render::render(&form));
                if let Some(status) = status {
                    println!("{status}");
                }
            }
        }
    }

    Ok(())
}
