use std::sync::Arc;

use clap::Parser;
use color_eyre::eyre::Result;
use tracing::info;

use crate::{
  app::App,
  cli::Cli,
  config::Config,
  utils::{initialize_logging, initialize_panic_handler},
  wardrobe::HttpWardrobeStore,
};

pub mod action;
pub mod app;
pub mod cli;
pub mod components;
pub mod config;
pub mod error;
pub mod mode;
pub mod tui;
pub mod utils;
pub mod wardrobe;

async fn tokio_main() -> Result<()> {
  initialize_logging()?;
  initialize_panic_handler()?;

  let args = Cli::parse();
  let mut config = Config::new()?;
  if let Some(api_url) = args.api_url {
    config.store.base_url = api_url;
  }
  if args.type_filter.is_some() {
    config.list.type_filter = args.type_filter;
  }
  config.list.picker_filter |= args.picker;
  config.list.fixed_select_mode |= args.fixed_select;

  info!("Using wardrobe service at {}", config.store.base_url);
  let store = match HttpWardrobeStore::new(&config.store.base_url, config.store.timeout()) {
    Ok(store) => store,
    Err(e) => {
      eprintln!("Error: {e}");
      std::process::exit(1);
    },
  };

  let mut app = App::new(config, Arc::new(store), args.tick_rate, args.frame_rate);
  app.run().await?;

  Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
  if let Err(e) = tokio_main().await {
    eprintln!("{} error: Something went wrong", env!("CARGO_PKG_NAME"));
    Err(e)
  } else {
    Ok(())
  }
}
