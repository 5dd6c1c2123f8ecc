//! trip-plan — plan an hours-of-service compliant truck trip from the
//! command line.
//!
//! ```text
//! trip-plan <current> <pickup> <dropoff> <cycle-hours-used> [--final-day-dropoff]
//! ```
//!
//! Places are resolved against an embedded gazetteer and routed with the
//! offline straight-line router, or through Openrouteservice when
//! `ORS_API_KEY` is set (feature `ors`, on by default).  The duty log is
//! printed to stdout as JSON and appended as CSV under `output/trip-plan`
//! (or `trips.db` with the `sqlite` feature).
//!
//! | Variable         | Meaning                                              |
//! |------------------|------------------------------------------------------|
//! | `ORS_API_KEY`    | Openrouteservice key; selects the online backend     |
//! | `HOS_START`      | Trip start, e.g. `2024-01-01T06:00:00` (default now) |
//! | `HOS_LOG`        | `off`, `error`, `warn`, `info` (default), `debug`…   |
//! | `HOS_GAZETTEER`  | Path to a `name,lon,lat` CSV replacing the built-in  |
//! | `HOS_OUTPUT`     | Output directory (default `output/trip-plan`)        |

mod gazetteer;
mod logger;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use chrono::{Local, NaiveDate, NaiveDateTime};

use hos_core::{DayLog, DropoffPlacement, DutyEvent, Remark};
use hos_output::{OutputWriter, TripOutputObserver};
use hos_route::{Geocoder, OrsConfig, RouteProvider, StraightLineRouter};
use hos_sim::{LogObserver, SimObserver, SimulationResult, TripPlanner, TripRequest};

// ── Constants ─────────────────────────────────────────────────────────────────

const DEFAULT_OUTPUT_DIR: &str = "output/trip-plan";
const USAGE: &str =
    "usage: trip-plan <current> <pickup> <dropoff> <cycle-hours-used> [--final-day-dropoff]";

// ── Arguments ─────────────────────────────────────────────────────────────────

#[derive(Debug, PartialEq)]
struct Args {
    request: TripRequest,
    dropoff: DropoffPlacement,
}

impl Args {
    fn parse(args: impl IntoIterator<Item = String>) -> Result<Self> {
        let mut dropoff = DropoffPlacement::EveryDay;
        let mut positional = Vec::new();
        for arg in args {
            match arg.as_str() {
                "--final-day-dropoff" => dropoff = DropoffPlacement::FinalDayOnly,
                "-h" | "--help" => bail!(USAGE),
                flag if flag.starts_with("--") => bail!("unknown flag {flag:?}\n{USAGE}"),
                _ => positional.push(arg),
            }
        }

        let [current, pickup, dropoff_at, cycle]: [String; 4] = positional
            .try_into()
            .map_err(|got: Vec<String>| anyhow::anyhow!("expected 4 arguments, got {}\n{USAGE}", got.len()))?;
        let cycle_hours_used = cycle
            .parse()
            .with_context(|| format!("cycle hours used {cycle:?} is not a number"))?;

        Ok(Self {
            request: TripRequest {
                current_location: current,
                pickup_location:  pickup,
                dropoff_location: dropoff_at,
                cycle_hours_used,
            },
            dropoff,
        })
    }
}

/// `HOS_START` as a naive local datetime, or the wall clock when unset.
fn start_instant(value: Option<&str>) -> Result<NaiveDateTime> {
    match value {
        None => Ok(Local::now().naive_local()),
        Some(s) => s
            .trim()
            .parse()
            .with_context(|| format!("HOS_START {s:?} is not a datetime like 2024-01-01T06:00:00")),
    }
}

/// Openrouteservice settings when `ORS_API_KEY` holds a non-blank key.
fn ors_config(api_key: Option<&str>) -> Option<OrsConfig> {
    api_key
        .map(str::trim)
        .filter(|key| !key.is_empty())
        .map(OrsConfig::new)
}

// ── Observer fan-out ──────────────────────────────────────────────────────────

/// Logs progress and records output in the same run.
struct ReportingObserver<W: OutputWriter> {
    log:    LogObserver,
    output: TripOutputObserver<W>,
}

impl<W: OutputWriter> SimObserver for ReportingObserver<W> {
    fn on_day_start(&mut self, day: usize, date: NaiveDate) {
        self.log.on_day_start(day, date);
        self.output.on_day_start(day, date);
    }

    fn on_event(&mut self, day: usize, event: &DutyEvent, remark: Remark) {
        self.log.on_event(day, event, remark);
        self.output.on_event(day, event, remark);
    }

    fn on_day_end(&mut self, day: usize, log: &DayLog) {
        self.log.on_day_end(day, log);
        self.output.on_day_end(day, log);
    }

    fn on_sim_end(&mut self, result: &SimulationResult) {
        self.log.on_sim_end(result);
        self.output.on_sim_end(result);
    }
}

#[cfg(not(feature = "sqlite"))]
fn open_writer(dir: &Path) -> Result<hos_output::CsvWriter> {
    Ok(hos_output::CsvWriter::new(dir)?)
}

#[cfg(feature = "sqlite")]
fn open_writer(dir: &Path) -> Result<hos_output::SqliteWriter> {
    Ok(hos_output::SqliteWriter::new(dir)?)
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    logger::init(logger::parse_level(std::env::var("HOS_LOG").ok().as_deref())?)?;

    let args = Args::parse(std::env::args().skip(1))?;
    let start = start_instant(std::env::var("HOS_START").ok().as_deref())?;
    let ors = ors_config(std::env::var("ORS_API_KEY").ok().as_deref());

    #[cfg(feature = "ors")]
    {
        if let Some(config) = ors {
            use hos_route::{OrsClient, UreqTransport};

            log::info!("routing with openrouteservice at {}", config.base_url);
            let transport = UreqTransport::new();
            let planner = TripPlanner::builder(
                OrsClient::new(config.clone(), transport.clone()),
                OrsClient::new(config, transport),
            )
            .dropoff(args.dropoff)
            .build()?;
            return run(&planner, &args, start);
        }
    }
    #[cfg(not(feature = "ors"))]
    {
        if ors.is_some() {
            log::warn!("ORS_API_KEY is set but trip-plan was built without the `ors` feature");
        }
    }

    let gazetteer_path = std::env::var_os("HOS_GAZETTEER").map(PathBuf::from);
    let gazetteer = gazetteer::load(gazetteer_path.as_deref()).context("loading gazetteer")?;
    log::info!("gazetteer: {} places", gazetteer.len());

    let planner = TripPlanner::builder(gazetteer, StraightLineRouter::default())
        .dropoff(args.dropoff)
        .build()?;
    run(&planner, &args, start)
}

/// Plan the trip, record it, and print the result as JSON.
fn run<G: Geocoder, R: RouteProvider>(
    planner: &TripPlanner<G, R>,
    args:    &Args,
    start:   NaiveDateTime,
) -> Result<()> {
    let created_at = Local::now().naive_local();
    let output_dir = std::env::var_os("HOS_OUTPUT")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_DIR));
    std::fs::create_dir_all(&output_dir)
        .with_context(|| format!("creating {}", output_dir.display()))?;

    let trip_id = created_at.and_utc().timestamp_millis().max(0) as u64;
    let mut obs = ReportingObserver {
        log:    LogObserver,
        output: TripOutputObserver::new(open_writer(&output_dir)?, trip_id, &args.request, created_at),
    };

    let result = planner.plan_observed(&args.request, start, &mut obs)?;
    if let Some(e) = obs.output.take_error() {
        log::error!("output error: {e}");
    } else {
        log::info!("trip {trip_id} written to {}", output_dir.display());
    }

    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Result<Args> {
        Args::parse(list.iter().map(|s| s.to_string()))
    }

    #[test]
    fn parses_positionals_and_flag() {
        let a = args(&["New York, NY", "New York, NY", "Chicago, IL", "10.5", "--final-day-dropoff"])
            .unwrap();
        assert_eq!(a.request.dropoff_location, "Chicago, IL");
        assert_eq!(a.request.cycle_hours_used, 10.5);
        assert_eq!(a.dropoff, DropoffPlacement::FinalDayOnly);
    }

    #[test]
    fn rejects_missing_and_bad_arguments() {
        assert!(args(&["New York, NY", "Chicago, IL"]).is_err());
        assert!(args(&["a", "b", "c", "ten"]).is_err());
        assert!(args(&["a", "b", "c", "1", "--fast"]).is_err());
    }

    #[test]
    fn start_from_env_value() {
        let start = start_instant(Some("2024-01-01T06:00:00")).unwrap();
        assert_eq!(start.to_string(), "2024-01-01 06:00:00");
        assert!(start_instant(Some("tomorrow")).is_err());
    }

    #[test]
    fn api_key_selects_openrouteservice() {
        assert!(ors_config(None).is_none());
        assert!(ors_config(Some("  ")).is_none());
        let config = ors_config(Some(" key-1 ")).unwrap();
        assert_eq!(config.api_key, "key-1");
        assert_eq!(config.base_url, "https://api.openrouteservice.org");
    }

    #[cfg(feature = "ors")]
    #[test]
    fn openrouteservice_planner_builds() {
        use hos_route::{OrsClient, UreqTransport};

        let config = ors_config(Some("key-1")).unwrap();
        let transport = UreqTransport::new();
        let planner = TripPlanner::builder(
            OrsClient::new(config.clone(), transport.clone()),
            OrsClient::new(config, transport),
        )
        .dropoff(DropoffPlacement::FinalDayOnly)
        .build();
        assert!(planner.is_ok());
    }

    #[test]
    fn log_level_defaults_to_info() {
        assert_eq!(logger::parse_level(None).unwrap(), log::LevelFilter::Info);
        assert_eq!(logger::parse_level(Some("debug")).unwrap(), log::LevelFilter::Debug);
        assert!(logger::parse_level(Some("loud")).is_err());
    }

    #[test]
    fn embedded_gazetteer_plans_a_trip() {
        let places = gazetteer::load(None).unwrap();
        assert_eq!(places.len(), 20);

        let planner = TripPlanner::builder(places, StraightLineRouter::default())
            .build()
            .unwrap();
        let request = args(&["new york, ny", "New York, NY", "Chicago, IL", "10.5"])
            .unwrap()
            .request;
        let start = start_instant(Some("2024-01-01T00:00:00")).unwrap();
        let result = planner.plan(&request, start).unwrap();
        assert!(result.days.len() >= 2);
    }
}
