use jiff::civil::{Date, Time};

use crate::proposal::{
    address::Address,
    criteria::{Criteria, Frequency},
    matching::{MatchingFilters, RawRouteStep},
    meters::Meters,
    proposal::Proposal,
    route_filters::DetourStatistics,
    waypoint::Waypoint,
    week::{Day, WeekSchedule},
};

/// A distinct address per (tag, position) pair.
pub fn step_address(tag: u8, position: i64) -> Address {
    Address::from_lat_lon(48.0 + tag as f64, 7.0 + position as f64 * 0.01)
}

pub fn raw_step(tag: u8, position: i64, duration: f64) -> RawRouteStep {
    RawRouteStep::new(tag, position, duration, &step_address(tag, position))
}

pub fn complete_filters(
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

pub fn statistics(
    original_distance: f64,
    detour_distance: f64,
    common_distance: f64,
) -> DetourStatistics {
    DetourStatistics {
        original_distance: Meters::new(original_distance),
        detour_distance: Meters::new(detour_distance),
        common_distance: Meters::new(common_distance),
        ..Default::default()
    }
}

pub fn punctual_criteria(date: Date, time: Option<Time>) -> Criteria {
    Criteria {
        frequency: Frequency::Punctual,
        from_date: Some(date),
        from_time: time,
        ..Default::default()
    }
}

pub fn regular_criteria(days: &[(Day, Time)]) -> Criteria {
    let week = days
        .iter()
        .fold(WeekSchedule::default(), |week, &(day, time)| {
            week.with_day(day, time)
        });

    Criteria {
        frequency: Frequency::Regular,
        week,
        ..Default::default()
    }
}

fn with_waypoints(mut proposal: Proposal) -> Proposal {
    let id = proposal.id.get() as f64;
    proposal.waypoints = vec![
        Waypoint::new(0, Address::from_lat_lon(45.0, id), false),
        Waypoint::new(1, Address::from_lat_lon(46.0, id), true),
    ];
    proposal
}

pub fn punctual_proposal(id: u64, date: Date, time: Option<Time>) -> Proposal {
    with_waypoints(Proposal::new(id, punctual_criteria(date, time)))
}

pub fn regular_proposal(id: u64, days: &[(Day, Time)]) -> Proposal {
    with_waypoints(Proposal::new(id, regular_criteria(days)))
}

/// Rounds to the cent.
pub fn rounder(amount: f64, _frequency: Frequency) -> f64 {
    (amount * 100.0).round() / 100.0
}
