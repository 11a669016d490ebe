use std::process::ExitCode;

use tracing_subscriber::EnvFilter;

use showtime_engine::schedule::{ScheduleConfig, fetch_schedule};
use showtime_engine::source::FixtureSource;

/// Directory of recorded listing pages when SHOWTIME_DATA_DIR is unset.
const DEFAULT_DATA_DIR: &str = "./data";

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let Some(arg) = std::env::args().nth(1) else {
        eprintln!("Usage: showtime-engine <cinema-id>");
        return ExitCode::FAILURE;
    };
    let cinema_id: u32 = match arg.parse() {
        Ok(id) => id,
        Err(e) => {
            eprintln!("Invalid cinema id {arg:?}: {e}");
            return ExitCode::FAILURE;
        }
    };

    let config = ScheduleConfig::from_env();
    let data_dir =
        std::env::var("SHOWTIME_DATA_DIR").unwrap_or_else(|_| DEFAULT_DATA_DIR.to_string());
    let source = FixtureSource::new(data_dir);

    let built = match fetch_schedule(&source, cinema_id, &config) {
        Ok(built) => built,
        Err(e) => {
            eprintln!(
                "Failed to build schedule for cinema {cinema_id} from {}: {e}",
                source.dir().display()
            );
            return ExitCode::FAILURE;
        }
    };

    let schedule = &built.schedule;
    tracing::info!(
        cinema_id,
        start = %schedule.period.start(),
        end = %schedule.period.end(),
        "Schedule ready"
    );

    if let Some(name) = &schedule.cinema.name {
        println!("{name}");
    }
    for session in &schedule.sessions {
        println!("{session}");
    }
    println!(
        "{} sessions, {} warnings",
        schedule.len(),
        built.diagnostics.len()
    );

    ExitCode::SUCCESS
}
