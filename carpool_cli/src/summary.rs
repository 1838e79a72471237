use std::path::PathBuf;

use carpool_results::{
    CarpoolResult,
    proposal::{address::Address, week::Day},
};
use clap::Args;
use comfy_table::{Table, presets::UTF8_FULL};
use jiff::civil::Time;

use crate::{file_utils::load_proposals, pricing::PricingArgs, results::log_diagnostics};

#[derive(Args)]
pub struct SummaryArgs {
    /// A proposal snapshot, or a folder of them
    #[arg(short, long)]
    input: PathBuf,

    #[command(flatten)]
    pricing: PricingArgs,
}

fn place(address: Option<&Address>) -> String {
    match address {
        Some(address) => match (&address.address_locality, &address.name) {
            (Some(locality), _) => locality.clone(),
            (None, Some(name)) => name.clone(),
            (None, None) => match (address.latitude, address.longitude) {
                (Some(lat), Some(lon)) => format!("{lat:.4}, {lon:.4}"),
                _ => String::from("?"),
            },
        },
        None => String::from("-"),
    }
}

fn format_time(time: Option<Time>) -> String {
    time.map_or_else(|| String::from("-"), |time| time.strftime("%H:%M").to_string())
}

fn days(result: &CarpoolResult) -> String {
    let days: Vec<String> = result
        .week
        .checked_days()
        .map(|day: Day| day.to_string()[..3].to_owned())
        .collect();
    if days.is_empty() {
        String::from("-")
    } else {
        days.join(" ")
    }
}

fn roles(result: &CarpoolResult) -> &'static str {
    match (&result.result_driver, &result.result_passenger) {
        (Some(_), Some(_)) => "driver/passenger",
        (None, Some(_)) => "driver",
        (Some(_), None) => "passenger",
        (None, None) => "-",
    }
}

fn summary_row(result: &CarpoolResult) -> Vec<String> {
    let when = match result.date {
        Some(date) => format!("{date} {}", format_time(result.time)),
        None => format!(
            "{} / {}",
            format_time(result.outward_time),
            format_time(result.return_time)
        ),
    };

    vec![
        result.id.to_string(),
        roles(result).to_owned(),
        place(result.origin.as_ref()),
        place(result.destination.as_ref()),
        when,
        days(result),
        result.seats.to_string(),
        result
            .rounded_price
            .map_or_else(|| String::from("-"), |price| format!("{price:.2}")),
        if result.has_return { "yes" } else { "no" }.to_owned(),
    ]
}

pub fn run(args: SummaryArgs) -> anyhow::Result<()> {
    let proposals = load_proposals(&args.input)?;
    let sets = args.pricing.manager().create_results_for_all(&proposals);
    log_diagnostics(&sets);

    for set in &sets {
        let mut table = Table::new();
        table.load_preset(UTF8_FULL).set_header(vec![
            "Counterpart",
            "Counterpart role",
            "Origin",
            "Destination",
            "When",
            "Days",
            "Seats",
            "Price",
            "Return",
        ]);
        for result in &set.results {
            table.add_row(summary_row(result));
        }

        println!("Proposal {}", set.proposal);
        println!("{table}");
    }

    Ok(())
}
