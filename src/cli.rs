use clap::Parser;

use crate::utils::version;

#[derive(Parser, Debug)]
#[command(author, version = version(), about)]
pub struct Cli {
  #[arg(short, long, value_name = "FLOAT", help = "Tick rate, i.e. number of ticks per second", default_value_t = 10.0)]
  pub tick_rate: f64,

  #[arg(short, long, value_name = "FLOAT", help = "Frame rate, i.e. number of frames per second", default_value_t = 30.0)]
  pub frame_rate: f64,

  /// Base url of the wardrobe service, overrides `store.base_url`.
  #[arg(long, value_name = "URL")]
  pub api_url: Option<String>,

  /// Only show clothes of this type.
  #[arg(long, value_name = "TYPE")]
  pub type_filter: Option<String>,

  /// Show the category picker above the grid.
  #[arg(long)]
  pub picker: bool,

  /// Start in select mode and stay there.
  #[arg(long)]
  pub fixed_select: bool,
}
