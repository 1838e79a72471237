use std::{fs::File, path::PathBuf};

use carpool_results::{
    ResultManager, ResultParams, StepRounder,
    json::read_proposal,
    proposal::{
        address::Address,
        criteria::{Criteria, Frequency},
        matching::{Matching, MatchingFilters, RawRouteStep},
        proposal::Proposal,
        waypoint::Waypoint,
        week::{Day, WeekSchedule},
    },
};
use jiff::civil::{Date, Time};
use serde_json::Value;

fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

pub fn load_fixture(name: &str) -> Proposal {
    let file = File::open(fixture_path(name)).unwrap();
    read_proposal(file).unwrap()
}

/// The raw JSON of a fixture, to be altered before parsing.
pub fn load_fixture_value(name: &str) -> Value {
    let file = File::open(fixture_path(name)).unwrap();
    serde_json::from_reader(file).unwrap()
}

/// Cents for one-off trips, half units for regular ones.
pub fn create_manager() -> ResultManager<StepRounder> {
    ResultManager::new(ResultParams::default(), StepRounder::new(0.01, 0.5))
}

pub fn address(lat: f64, lon: f64) -> Address {
    Address::from_lat_lon(lat, lon)
}

/// Driver from (0, 0) to (0, 3), passenger picked up at (0, 1) after
/// `pickup` seconds and dropped at (0, 2).
pub fn create_route(pickup: f64) -> Vec<RawRouteStep> {
    let step = |candidate, position, duration, lon| {
        RawRouteStep::new(candidate, position, duration, &address(0.0, lon))
    };

    vec![
        step(1, 0, 0.0, 0.0),
        step(2, 0, pickup, 1.0),
        step(2, 1, pickup + 1200.0, 2.0),
        step(1, 1, pickup + 1500.0, 3.0),
    ]
}

pub fn create_filters(
    route: Vec<RawRouteStep>,
    original_distance: f64,
    detour_distance: f64,
    common_distance: f64,
) -> MatchingFilters {
    MatchingFilters {
        route: Some(route),
        original_distance: Some(original_distance.into()),
        detour_distance: Some(detour_distance.into()),
        common_distance: Some(common_distance.into()),
        ..Default::default()
    }
}

fn create_proposal(id: u64, criteria: Criteria) -> Proposal {
    let mut proposal = Proposal::new(id, criteria);
    proposal.waypoints = vec![
        Waypoint::new(0, address(0.0, 0.0), false),
        Waypoint::new(1, address(0.0, 3.0), true),
    ];
    proposal
}

pub fn create_punctual_proposal(id: u64, date: Date, time: Option<Time>) -> Proposal {
    create_proposal(
        id,
        Criteria {
            frequency: Frequency::Punctual,
            from_date: Some(date),
            from_time: time,
            ..Default::default()
        },
    )
}

pub fn create_regular_proposal(id: u64, days: &[(Day, Time)]) -> Proposal {
    let mut week = WeekSchedule::default();
    for &(day, time) in days {
        week.set(day, true, Some(time));
    }

    create_proposal(
        id,
        Criteria {
            frequency: Frequency::Regular,
            week,
            ..Default::default()
        },
    )
}

pub fn create_matching(counterpart: Proposal, pickup: f64) -> Matching {
    Matching::new(
        counterpart,
        create_filters(create_route(pickup), 10_000.0, 1_000.0, 8_000.0),
    )
}
