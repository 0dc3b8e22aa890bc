use clap::{Parser, Subcommand};

use crate::multi_depot::MultiDepotArgs;

mod multi_depot;
mod parsers;
mod report;

#[derive(Parser)]
#[clap(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    #[arg(short, long)]
    debug: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Two depots, eight pickups and vehicle dependent service times
    #[command(visible_alias = "md")]
    MultiDepot {
        #[command(flatten)]
        args: MultiDepotArgs,
    },
}

fn main() -> Result<(), anyhow::Error> {
    let cli = Cli::parse();
    tracing_subscriber::fmt()
        .with_max_level(if cli.debug {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        })
        .init();

    match cli.command {
        Some(Commands::MultiDepot { args }) => multi_depot::run(args)?,
        None => {
            tracing::warn!("No command provided, try `vrp multi-depot --help`");
        }
    }

    Ok(())
}
