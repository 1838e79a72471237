use std::{fs::File, io::BufWriter, path::PathBuf};

use anyhow::Context;
use carpool_results::{CarpoolResult, ResultSet};
use clap::Args;
use tracing::{info, warn};

use crate::{file_utils::load_proposals, pricing::PricingArgs};

#[derive(Args)]
pub struct ResultsArgs {
    /// A proposal snapshot, or a folder of them
    #[arg(short, long)]
    input: PathBuf,

    /// Write the results to this file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    #[arg(long)]
    pretty: bool,

    #[command(flatten)]
    pricing: PricingArgs,
}

pub fn log_diagnostics(sets: &[ResultSet]) {
    for set in sets {
        for diagnostic in &set.diagnostics {
            warn!(proposal = %set.proposal, "Skipped {diagnostic}");
        }
    }
}

pub fn run(args: ResultsArgs) -> anyhow::Result<()> {
    let proposals = load_proposals(&args.input)?;
    info!("Loaded {} proposals from {:?}", proposals.len(), args.input);

    let sets = args.pricing.manager().create_results_for_all(&proposals);
    log_diagnostics(&sets);

    let results: Vec<&[CarpoolResult]> = sets.iter().map(|set| set.results.as_slice()).collect();

    match args.output {
        Some(path) => {
            let file = File::create(&path)
                .with_context(|| format!("Cannot create {}", path.display()))?;
            let writer = BufWriter::new(file);
            if args.pretty {
                serde_json::to_writer_pretty(writer, &results)?;
            } else {
                serde_json::to_writer(writer, &results)?;
            }
            info!("Results written to {:?}", path);
        }
        None => {
            let json = if args.pretty {
                serde_json::to_string_pretty(&results)?
            } else {
                serde_json::to_string(&results)?
            };
            println!("{json}");
        }
    }

    Ok(())
}
