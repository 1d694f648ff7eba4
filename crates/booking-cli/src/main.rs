//! `coachcal` CLI — a single coach's call calendar from the command line.
//!
//! ## Usage
//!
//! ```sh
//! # The bookable start times for any day
//! coachcal slots
//!
//! # Register a client, then book a weekly follow-up until the end of June
//! coachcal client add "Ada Lovelace" 555-0100
//! coachcal book 2024-06-03 11:10 follow-up --client 555-0100 --recurring --until 2024-06-24
//!
//! # Render a day, or ask whether a slot is free
//! coachcal day 2024-06-10
//! coachcal check 2024-06-10 11:30 onboarding
//!
//! # List the dates a series occurs on, then cancel it
//! coachcal series b-1 --from 2024-06-01 --to 2024-07-31
//! coachcal cancel b-1
//! ```
//!
//! Data lives in a JSON document (`--store`, or `COACHCAL_STORE`, default
//! `coachcal.json`).

mod store;

use std::path::{Path, PathBuf};
use std::process;

use anyhow::{Context, Result};
use booking_engine::{
    generate_time_slots, occurrences, Booking, BookingId, BookingOutcome, BookingRequest,
    CalendarDate, CallType, Client, ClientStore, ClockTime, Scheduler,
};
use clap::{Parser, Subcommand};
use tracing::debug;

use crate::store::JsonFileStore;

#[derive(Parser)]
#[command(
    name = "coachcal",
    version,
    about = "Single-coach call calendar with weekly follow-up series"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to the JSON store document
    #[arg(long, global = true, env = "COACHCAL_STORE", default_value = "coachcal.json")]
    store: PathBuf,

    /// Print machine-readable JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    /// Enable debug logging on stderr
    #[arg(long, short, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// List the bookable start times
    Slots,
    /// Show the booking counts and slot grid for a date
    Day {
        /// Date to render (YYYY-MM-DD)
        date: CalendarDate,
    },
    /// Check whether a call would overlap an existing booking
    Check {
        date: CalendarDate,
        /// Start time (HH:MM)
        time: ClockTime,
        /// onboarding | follow-up
        call_type: CallType,
    },
    /// Book a call for a registered client
    Book {
        date: CalendarDate,
        time: ClockTime,
        call_type: CallType,
        /// Phone number of the client
        #[arg(long)]
        client: String,
        /// Repeat weekly (follow-up only)
        #[arg(long)]
        recurring: bool,
        /// Last date of a weekly series (inclusive)
        #[arg(long, requires = "recurring")]
        until: Option<CalendarDate>,
    },
    /// Delete a booking; a weekly series is removed entirely
    Cancel { id: String },
    /// List the dates a booking occurs on within a window
    Series {
        id: String,
        #[arg(long)]
        from: CalendarDate,
        #[arg(long)]
        to: CalendarDate,
    },
    /// Manage the client list
    #[command(subcommand)]
    Client(ClientCommands),
}

#[derive(Subcommand)]
enum ClientCommands {
    /// Add a client, or rename the client with this phone number
    Add { name: String, phone: String },
    /// List clients
    List,
    /// Remove the client with this phone number
    Remove { phone: String },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let Cli {
        command,
        store,
        json,
        ..
    } = cli;
    debug!(path = %store.display(), "using store");

    match command {
        Commands::Slots => {
            let slots = generate_time_slots();
            if json {
                println!("{}", serde_json::to_string(&slots)?);
            } else {
                for slot in slots {
                    println!("{}", slot);
                }
            }
        }
        Commands::Day { date } => {
            let scheduler = Scheduler::new(open_store(&store)?);
            let grid = scheduler.day(date)?;
            let summary = scheduler.summary(date)?;
            if json {
                let out = serde_json::json!({ "summary": summary, "grid": grid });
                println!("{}", serde_json::to_string_pretty(&out)?);
            } else {
                println!("{} ({:?})", date, date.weekday());
                println!(
                    "{} booked: {} onboarding, {} follow-up",
                    summary.total, summary.onboarding, summary.follow_up
                );
                for row in grid {
                    match row.booking {
                        Some(b) => println!("{}  {}", row.time, describe(&b)),
                        None => println!("{}  -", row.time),
                    }
                }
            }
        }
        Commands::Check {
            date,
            time,
            call_type,
        } => {
            let scheduler = Scheduler::new(open_store(&store)?);
            let day = scheduler.active_on(date)?;
            let hit = booking_engine::find_overlap(time, call_type, &day);
            if json {
                println!("{}", serde_json::to_string(&hit)?);
            } else {
                match hit {
                    Some(b) => println!("conflict: {}  {}", b.time, describe(b)),
                    None => println!("free"),
                }
            }
        }
        Commands::Book {
            date,
            time,
            call_type,
            client,
            recurring,
            until,
        } => {
            let file = open_store(&store)?;
            let client = file
                .find_client(&client)
                .cloned()
                .with_context(|| format!("Unknown client phone: {}", client))?;

            let mut scheduler = Scheduler::new(file);
            let outcome = scheduler.book(BookingRequest {
                client,
                call_type,
                date,
                time,
                recurring,
                end_date: until,
            })?;

            match outcome {
                BookingOutcome::Booked(b) => {
                    scheduler.store().save()?;
                    if json {
                        println!("{}", serde_json::to_string_pretty(&b)?);
                    } else {
                        println!("booked {}", b.id);
                    }
                }
                BookingOutcome::Rejected(rejection) => {
                    if json {
                        println!("{}", serde_json::to_string_pretty(&rejection)?);
                    } else {
                        println!("rejected: {}", rejection);
                    }
                    process::exit(1);
                }
            }
        }
        Commands::Cancel { id } => {
            let mut scheduler = Scheduler::new(open_store(&store)?);
            scheduler.cancel(&BookingId(id.clone()))?;
            scheduler.store().save()?;
            println!("cancelled {}", id);
        }
        Commands::Series { id, from, to } => {
            let file = open_store(&store)?;
            let booking = file
                .find_booking(&BookingId(id.clone()))
                .with_context(|| format!("No booking with id '{}'", id))?;
            let dates = occurrences(booking, from, to);
            if json {
                println!("{}", serde_json::to_string(&dates)?);
            } else {
                for date in dates {
                    println!("{} {}", date, booking.time);
                }
            }
        }
        Commands::Client(cmd) => run_client_command(&store, cmd, json)?,
    }

    Ok(())
}

fn run_client_command(path: &Path, cmd: ClientCommands, json: bool) -> Result<()> {
    let mut file = open_store(path)?;
    match cmd {
        ClientCommands::Add { name, phone } => {
            if name.trim().is_empty() || phone.trim().is_empty() {
                anyhow::bail!("Both name and phone are required");
            }
            file.add_client(Client { name, phone })?;
            file.save()?;
        }
        ClientCommands::List => {
            let clients = file.list_clients()?;
            if json {
                println!("{}", serde_json::to_string_pretty(&clients)?);
            } else {
                for c in clients {
                    println!("{} ({})", c.name, c.phone);
                }
            }
        }
        ClientCommands::Remove { phone } => {
            file.remove_client(&phone)?;
            file.save()?;
        }
    }
    Ok(())
}

fn open_store(path: &Path) -> Result<JsonFileStore> {
    JsonFileStore::open(path)
}

fn describe(b: &Booking) -> String {
    let series = match (b.is_weekly_series(), b.end_date) {
        (true, Some(end)) => format!(", weekly until {}", end),
        (true, None) => ", weekly".to_string(),
        (false, _) => String::new(),
    };
    format!(
        "{} {} ({}) [{}{}]",
        b.call_type, b.client_name, b.client_phone, b.id, series
    )
}

fn init_logging(verbose: bool) {
    use tracing_subscriber::{fmt, EnvFilter};
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .try_init();
}
