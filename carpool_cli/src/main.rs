use clap::{Parser, Subcommand};

use crate::{results::ResultsArgs, summary::SummaryArgs};

mod file_utils;
mod parsers;
mod pricing;
mod results;
mod summary;

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
    /// Print the results of proposal snapshots as JSON
    Results {
        #[command(flatten)]
        args: ResultsArgs,
    },
    /// Print one table row per result
    #[command(visible_alias = "s")]
    Summary {
        #[command(flatten)]
        args: SummaryArgs,
    },
}

fn main() -> Result<(), anyhow::Error> {
    dotenvy::from_filename("./.env.local").ok();
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    tracing_subscriber::fmt()
        .with_max_level(if cli.debug {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        })
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Some(Commands::Results { args }) => results::run(args)?,
        Some(Commands::Summary { args }) => summary::run(args)?,
        None => {}
    }

    Ok(())
}
