//! `slots` CLI — query barber availability from a provider catalog.
//!
//! The catalog is a JSON array of provider records, read from a file or stdin.
//! Every subcommand prints JSON to stdout; logs go to stderr.
//!
//! ## Usage
//!
//! ```sh
//! # Whole-day status of every provider
//! slots -i catalog.json status --date 2024-06-10
//!
//! # Status of one provider at one time
//! slots -i catalog.json status --id 1 --date 2024-06-10 --time 10:00
//!
//! # Free slots for a day
//! slots -i catalog.json slots --id 1 --date 2024-06-10
//!
//! # Rank the catalog for a search
//! cat catalog.json | slots rank --date 2024-06-10 --time 10:00
//!
//! # Days with room in a range
//! slots -i catalog.json dates --id 1 --from 2024-06-10 --to 2024-06-16
//!
//! # Location search with a quick filter
//! slots -i catalog.json search --location kadikoy --filter popular
//!
//! # Price a booking for one slot (nothing is reserved)
//! slots -i catalog.json book --id 1 --date 2024-06-10 --time 09:00 --service 1,2
//!
//! # Ask to be notified for a slot
//! slots -i catalog.json waitlist --id 1 --date 2024-06-10 --time 10:00
//! ```

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};
use log::debug;
use serde_json::{json, Value};
use slot_engine::catalog::{apply_filter, filter_by_name};
use slot_engine::{
    BookingRequest, Catalog, ClockTime, ListFilter, Provider, SearchFilters, WaitlistRequest,
};
use std::io::{self, Read};

#[derive(Parser)]
#[command(name = "slots", version, about = "Barber availability query CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Provider catalog JSON file (reads from stdin if omitted)
    #[arg(short, long, global = true)]
    input: Option<String>,

    /// Output file (writes to stdout if omitted)
    #[arg(short, long, global = true)]
    output: Option<String>,

    /// Pretty-print the JSON output
    #[arg(long, global = true)]
    pretty: bool,

    /// Log at debug level unless RUST_LOG says otherwise
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Classify providers as available, full or closed
    Status {
        /// Date (YYYY-MM-DD)
        #[arg(long)]
        date: String,
        /// Time (HH:mm); whole-day status if omitted
        #[arg(long)]
        time: Option<String>,
        /// Only this provider (all providers if omitted)
        #[arg(long)]
        id: Option<String>,
    },
    /// List free slot start times for a provider on a date
    Slots {
        #[arg(long)]
        id: String,
        /// Date (YYYY-MM-DD)
        #[arg(long)]
        date: String,
    },
    /// Rank the catalog by availability, popularity and rating
    Rank {
        /// Date (YYYY-MM-DD)
        #[arg(long)]
        date: String,
        /// Time (HH:mm); whole-day status if omitted
        #[arg(long)]
        time: Option<String>,
    },
    /// List dates in a range on which a provider has a free slot
    Dates {
        #[arg(long)]
        id: String,
        /// First date (YYYY-MM-DD), inclusive
        #[arg(long)]
        from: String,
        /// Last date (YYYY-MM-DD), inclusive
        #[arg(long)]
        to: String,
    },
    /// Search providers by location with an optional quick filter
    Search {
        /// Address substring (case-insensitive)
        #[arg(long, default_value = "")]
        location: String,
        /// Date (YYYY-MM-DD)
        #[arg(long)]
        date: Option<String>,
        /// Time (HH:mm); with --date, ranks the results
        #[arg(long, requires = "date")]
        time: Option<String>,
        #[arg(long, value_enum, default_value_t = FilterArg::All)]
        filter: FilterArg,
        /// Name substring (case-insensitive)
        #[arg(long)]
        query: Option<String>,
    },
    /// Price the chosen services for a slot without reserving it
    Book {
        #[arg(long)]
        id: String,
        /// Date (YYYY-MM-DD)
        #[arg(long)]
        date: String,
        /// Time (HH:mm)
        #[arg(long)]
        time: String,
        /// Service ids, repeated or comma-separated
        #[arg(long = "service", required = true, value_delimiter = ',')]
        services: Vec<String>,
    },
    /// Request a notification for a slot
    Waitlist {
        #[arg(long)]
        id: String,
        /// Date (YYYY-MM-DD)
        #[arg(long)]
        date: String,
        /// Time (HH:mm)
        #[arg(long)]
        time: String,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum FilterArg {
    All,
    Available,
    Popular,
    Nearby,
}

impl From<FilterArg> for ListFilter {
    fn from(arg: FilterArg) -> Self {
        match arg {
            FilterArg::All => ListFilter::All,
            FilterArg::Available => ListFilter::Available,
            FilterArg::Popular => ListFilter::Popular,
            FilterArg::Nearby => ListFilter::Nearby,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    let raw = read_input(cli.input.as_deref())?;
    let catalog = Catalog::from_json(&raw).context("Failed to load provider catalog")?;
    debug!("catalog has {} providers", catalog.len());

    let result = run(&catalog, cli.command)?;

    let rendered = if cli.pretty {
        serde_json::to_string_pretty(&result)?
    } else {
        serde_json::to_string(&result)?
    };
    write_output(cli.output.as_deref(), &rendered)
}

fn run(catalog: &Catalog, command: Commands) -> Result<Value> {
    let value = match command {
        Commands::Status { date, time, id } => {
            let date = parse_date(&date)?;
            let time = parse_optional_time(time.as_deref())?;
            match id {
                Some(id) => {
                    let provider = find(catalog, &id)?;
                    status_entry(provider, date, time)
                }
                None => Value::Array(
                    catalog
                        .providers()
                        .iter()
                        .map(|p| status_entry(p, date, time))
                        .collect(),
                ),
            }
        }
        Commands::Slots { id, date } => {
            let provider = find(catalog, &id)?;
            let date = parse_date(&date)?;
            json!({
                "id": provider.id,
                "date": date,
                "slots": slot_engine::available_slots(provider, date),
            })
        }
        Commands::Rank { date, time } => {
            let date = parse_date(&date)?;
            let time = parse_optional_time(time.as_deref())?;
            Value::Array(
                slot_engine::rank_providers(catalog.providers(), date, time)
                    .into_iter()
                    .map(|ranked| {
                        json!({
                            "id": ranked.provider.id,
                            "name": ranked.provider.name,
                            "status": ranked.status,
                            "isPopular": ranked.provider.is_popular,
                            "rating": ranked.provider.rating,
                        })
                    })
                    .collect(),
            )
        }
        Commands::Dates { id, from, to } => {
            let provider = find(catalog, &id)?;
            let from = parse_date(&from)?;
            let to = parse_date(&to)?;
            json!({
                "id": provider.id,
                "from": from,
                "to": to,
                "dates": slot_engine::available_dates(provider, from, to),
            })
        }
        Commands::Search {
            location,
            date,
            time,
            filter,
            query,
        } => {
            let date = date.as_deref().map(parse_date).transpose()?;
            let time = parse_optional_time(time.as_deref())?;
            let filters = SearchFilters {
                location,
                date,
                time,
            };

            let mut found = catalog.search(&filters);
            if let Some(query) = query.as_deref() {
                found = filter_by_name(found, query);
            }
            let found = apply_filter(found, filter.into(), date, time);

            Value::Array(
                found
                    .into_iter()
                    .map(|p| {
                        let mut entry = json!({
                            "id": p.id,
                            "name": p.name,
                            "address": p.address,
                            "distanceKm": p.distance_km,
                        });
                        if let Some(date) = date {
                            entry["status"] = json!(slot_engine::provider_status(p, date, time));
                        }
                        entry
                    })
                    .collect(),
            )
        }
        Commands::Book {
            id,
            date,
            time,
            services,
        } => {
            let request = BookingRequest {
                provider_id: id,
                date: parse_date(&date)?,
                time: parse_time(&time)?,
                service_ids: services,
            };
            let quote = catalog.quote_booking(&request).context("Booking rejected")?;
            serde_json::to_value(quote)?
        }
        Commands::Waitlist { id, date, time } => {
            let request = WaitlistRequest {
                provider_id: id,
                date: parse_date(&date)?,
                time: parse_time(&time)?,
            };
            let confirmation = catalog
                .request_waitlist(&request)
                .context("Waitlist request rejected")?;
            serde_json::to_value(confirmation)?
        }
    };

    Ok(value)
}

fn status_entry(provider: &Provider, date: NaiveDate, time: Option<ClockTime>) -> Value {
    let mut entry = json!({
        "id": provider.id,
        "date": date,
        "status": slot_engine::provider_status(provider, date, time),
    });
    if let Some(time) = time {
        entry["time"] = json!(time);
    }
    entry
}

fn find<'a>(catalog: &'a Catalog, id: &str) -> Result<&'a Provider> {
    catalog
        .find_by_id(id)
        .with_context(|| format!("Provider not found: {}", id))
}

fn parse_date(s: &str) -> Result<NaiveDate> {
    slot_engine::parse_date(s).with_context(|| format!("Invalid --date value: {}", s))
}

fn parse_time(s: &str) -> Result<ClockTime> {
    s.parse::<ClockTime>()
        .with_context(|| format!("Invalid --time value: {}", s))
}

fn parse_optional_time(s: Option<&str>) -> Result<Option<ClockTime>> {
    s.map(parse_time).transpose()
}

fn read_input(path: Option<&str>) -> Result<String> {
    match path {
        Some(path) => {
            std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {}", path))
        }
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read from stdin")?;
            Ok(buf)
        }
    }
}

fn write_output(path: Option<&str>, content: &str) -> Result<()> {
    match path {
        Some(path) => {
            std::fs::write(path, content)
                .with_context(|| format!("Failed to write file: {}", path))?;
        }
        None => {
            println!("{}", content);
        }
    }
    Ok(())
}
