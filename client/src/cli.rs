use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[clap(author, version)]
#[clap(name = "Optima Sample Tally")]
#[clap(about = "Counts self-play sample values by sign", long_about = None)]
pub struct Cli {
    #[clap(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    Count(CountCommand),
    Players(PlayersCommand),
}

#[derive(Args)]
#[clap(about = "Tallies the values of the samples where one player was to move.", long_about = None)]
pub struct CountCommand {
    #[clap(short, long)]
    pub config: Option<String>,

    /// Player to tally, overrides the config. Defaults to -1, the second mover.
    #[clap(short, long, allow_negative_numbers = true)]
    pub player: Option<i32>,

    #[clap(long)]
    pub json: bool,

    /// Samples files, or directories of them.
    #[clap(required = true)]
    pub files: Vec<String>,
}

#[derive(Args)]
#[clap(about = "Tallies the sample values of every player.", long_about = None)]
pub struct PlayersCommand {
    #[clap(short, long)]
    pub config: Option<String>,

    #[clap(long)]
    pub json: bool,

    #[clap(required = true)]
    pub files: Vec<String>,
}
