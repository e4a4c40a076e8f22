use std::path::PathBuf;

use clap::Parser;
use staged_ascent::scenario;

#[derive(Parser)]
#[command(author, version, about = "Print the configured summary of a catalog rocket")]
struct Cli {
    /// Rocket name from the catalog (case-insensitive)
    #[arg(long)]
    rocket: String,

    /// Catalog directory holding `rockets/`
    #[arg(long, default_value = "configs")]
    config_dir: PathBuf,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let rockets = scenario::load_rockets(cli.config_dir.join("rockets"))?;
    let rocket_cfg = scenario::select_rocket(&rockets, &cli.rocket)?;
    let rocket = scenario::build_rocket(rocket_cfg)?;
    println!("{rocket}");
    Ok(())
}
