//! `itinerary`: keep trips on disk and print them as a map summary and a
//! day-by-day timeline.
//!
//! # Usage
//!
//! ```text
//! itinerary demo
//! itinerary show
//! itinerary geocode Shibuya Crossing, Tokyo
//! itinerary reverse 35.6595 139.7005
//! ```

use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::DateTime;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use itinerary::domain::{
    Activity, ActivityCategory, Flight, ItineraryItem, Location, Timestamp, Trip, now,
};
use itinerary::geocode::{GeocodeError, Geocoder, GeocoderConfig, NominatimClient};
use itinerary::state::{SharedTrips, TripAction};
use itinerary::storage::{FileStore, TripRepository};
use itinerary::views::{group_by_day, route_locations, trip_bounds};

#[derive(Parser, Debug)]
#[command(name = "itinerary", version, about = "Plan trips and view their timeline")]
struct Args {
    /// Directory holding the saved trips.
    #[arg(long, env = "ITINERARY_DATA_DIR", default_value = "itinerary-data")]
    data_dir: PathBuf,

    /// Base URL of a Nominatim-compatible geocoder.
    #[arg(long, env = "GEOCODER_BASE_URL")]
    geocoder_url: Option<String>,

    /// Client identifier sent to the geocoder.
    #[arg(long, env = "GEOCODER_USER_AGENT")]
    user_agent: Option<String>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug, PartialEq)]
enum Command {
    /// Print the selected trip, or every trip when none is selected (default).
    Show,
    /// Add the Japan 2024 example trip and select it.
    Demo,
    /// Resolve an address to coordinates.
    Geocode {
        #[arg(required = true)]
        address: Vec<String>,
    },
    /// Find the address of a point.
    Reverse {
        #[arg(allow_negative_numbers = true)]
        lat: f64,
        #[arg(allow_negative_numbers = true)]
        lng: f64,
    },
}

impl Args {
    fn trips(&self) -> SharedTrips<FileStore> {
        SharedTrips::open(TripRepository::new(FileStore::new(&self.data_dir)))
    }

    fn geocoder(&self) -> Result<Geocoder<NominatimClient>> {
        let mut config = GeocoderConfig::new();
        if let Some(url) = &self.geocoder_url {
            config = config.with_base_url(url.as_str());
        }
        if let Some(agent) = &self.user_agent {
            config = config.with_user_agent(agent.as_str());
        }
        Geocoder::nominatim(&config).context("building geocoder")
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    match args.command.as_ref().unwrap_or(&Command::Show) {
        Command::Show => {
            show(&args.trips()).await;
            Ok(())
        }
        Command::Demo => demo(&args.trips()).await,
        Command::Geocode { address } => {
            let location = args
                .geocoder()?
                .resolve(&address.join(" "))
                .await
                .map_err(lookup_failed)?;
            println!("{}, {}  {}", location.lat(), location.lng(), location.address());
            Ok(())
        }
        Command::Reverse { lat, lng } => {
            let address = args
                .geocoder()?
                .reverse(*lat, *lng)
                .await
                .map_err(lookup_failed)?;
            println!("{address}");
            Ok(())
        }
    }
}

/// Print the selected trip (or every trip) as a map summary and timeline.
async fn show(trips: &SharedTrips<FileStore>) {
    let state = trips.snapshot().await;
    let selected: Vec<&Trip> = match state.current_trip() {
        Some(trip) => vec![trip],
        None => state.trips().iter().collect(),
    };

    if selected.is_empty() {
        println!("No trips yet. Run `itinerary demo` to add an example.");
        return;
    }

    for trip in selected {
        println!(
            "{} ({} to {}, {} days)",
            trip.name(),
            trip.start().date_naive(),
            trip.end().date_naive(),
            trip.day_count()
        );

        if let Some(bounds) = trip_bounds(trip.items()) {
            println!(
                "  Map: {:.4},{:.4} to {:.4},{:.4}",
                bounds.south, bounds.west, bounds.north, bounds.east
            );
        }

        let route: Vec<&str> = route_locations(trip.items())
            .iter()
            .map(|l| l.address())
            .collect();
        if !route.is_empty() {
            println!("  Route: {}", route.join(" → "));
        }

        for (day, items) in group_by_day(trip.items()) {
            println!("  {day}");
            for item in items {
                println!("    {}  {}", item.start().format("%H:%M"), item.title());
            }
        }
        println!();
    }
}

async fn demo(trips: &SharedTrips<FileStore>) -> Result<()> {
    let trip = Trip::new(
        "Japan 2024",
        at("2024-04-01T00:00:00+09:00")?,
        at("2024-04-10T00:00:00+09:00")?,
        now(),
    )?;
    let id = trip.id();

    let nrt = Location::new(35.772, 140.3929, "Narita International Airport")?;
    let hnd = Location::new(35.5494, 139.7798, "Haneda Airport")?;
    let shibuya = Location::new(35.6595, 139.7005, "Shibuya Crossing")?;

    let flight = ItineraryItem::flight(
        id,
        Flight::new(
            nrt,
            hnd,
            at("2024-04-01T08:00:00Z")?,
            at("2024-04-01T18:00:00Z")?,
        ),
    )?;
    let crossing = ItineraryItem::activity(
        id,
        at("2024-04-02T10:00:00+09:00")?,
        Activity::new("Shibuya Crossing", shibuya, ActivityCategory::Attraction),
    )?;

    for action in [
        TripAction::CreateTrip(trip),
        TripAction::SelectTrip(Some(id)),
        TripAction::AddItem(flight),
        TripAction::AddItem(crossing),
    ] {
        trips.dispatch(action).await.context("saving example trip")?;
    }

    println!("Added example trip {id}");
    show(trips).await;
    Ok(())
}

fn at(text: &str) -> Result<Timestamp> {
    DateTime::parse_from_rfc3339(text).with_context(|| format!("parsing timestamp {text:?}"))
}

fn lookup_failed(err: GeocodeError) -> anyhow::Error {
    if err.is_transport() {
        anyhow::Error::new(err).context("geocoding service unavailable, try again later")
    } else {
        err.into()
    }
}
