mod cli;
mod options;
mod tally_files;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Commands};
use dotenv::dotenv;
use env_logger::Env;
use log::info;
use options::load_options;
use tally_files::{resolve_files, tally_files, tally_files_by_player};

fn main() -> Result<()> {
    dotenv().ok();
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    match &cli.command {
        Commands::Count(count_args) => {
            let options = load_options(count_args.config.as_ref())?;
            let player = options.resolve_player(count_args.player);
            let files = resolve_files(&count_args.files)?;

            info!("Tallying {} files for player {}", files.len(), player);

            let tally = tally_files(&files, player)?;

            if count_args.json || options.json {
                println!("{}", serde_json::to_string_pretty(&tally)?);
            } else {
                println!("player {}: {}", player, tally);
            }
        }
        Commands::Players(players_args) => {
            let options = load_options(players_args.config.as_ref())?;
            let files = resolve_files(&players_args.files)?;

            info!("Tallying {} files for every player", files.len());

            let tallies = tally_files_by_player(&files)?;

            if players_args.json || options.json {
                println!("{}", serde_json::to_string_pretty(&tallies)?);
            } else {
                for (player, tally) in &tallies {
                    println!("player {}: {}", player, tally);
                }
            }
        }
    }

    Ok(())
}
