use jiff::civil::Time;
use serde::Serialize;

use crate::proposal::{
    address::Address,
    route_filters::{Role, RouteFilters},
};

use super::perspective::{Perspective, Person};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum WaypointKind {
    Origin,
    Step,
    Destination,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResultWaypoint {
    /// Index of the step in the matching route.
    pub id: usize,
    pub person: Person,
    pub role: Role,
    pub time: Option<Time>,
    pub address: Address,
    #[serde(rename = "type")]
    pub kind: WaypointKind,
}

/// Labelled waypoints of one leg plus the ends of both routes.
///
/// `origin` and `destination` are the carpooler's.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Timeline {
    pub waypoints: Vec<ResultWaypoint>,
    pub origin: Option<Address>,
    pub destination: Option<Address>,
    pub origin_driver: Option<Address>,
    pub destination_driver: Option<Address>,
    pub origin_passenger: Option<Address>,
    pub destination_passenger: Option<Address>,
}

fn first_seen(slot: &mut Option<Address>, address: &Address) {
    if slot.is_none() {
        *slot = Some(address.clone());
    }
}

impl Timeline {
    fn record_end(&mut self, role: Role, kind: WaypointKind, address: &Address, carpooler: Role) {
        let (role_slot, carpooler_slot) = match (role, kind) {
            (Role::Driver, WaypointKind::Origin) => (&mut self.origin_driver, &mut self.origin),
            (Role::Driver, WaypointKind::Destination) => {
                (&mut self.destination_driver, &mut self.destination)
            }
            (Role::Passenger, WaypointKind::Origin) => {
                (&mut self.origin_passenger, &mut self.origin)
            }
            (Role::Passenger, WaypointKind::Destination) => {
                (&mut self.destination_passenger, &mut self.destination)
            }
            (_, WaypointKind::Step) => return,
        };

        first_seen(role_slot, address);
        if role == carpooler {
            first_seen(carpooler_slot, address);
        }
    }
}

/// Stamps every route step with the time elapsed since `anchor`, the
/// driver's departure, and labels it for `perspective`. The route order is
/// kept as is.
pub fn build_timeline(
    filters: &RouteFilters,
    anchor: Option<Time>,
    perspective: Perspective,
) -> Timeline {
    let last_driver = filters.last_position(Role::Driver);
    let last_passenger = filters.last_position(Role::Passenger);
    let carpooler = perspective.carpooler_role();

    let mut timeline = Timeline {
        waypoints: Vec::with_capacity(filters.route.len()),
        ..Default::default()
    };

    for (id, step) in filters.route.iter().enumerate() {
        let last = match step.role {
            Role::Driver => last_driver,
            Role::Passenger => last_passenger,
        };
        let kind = if step.position == 0 {
            WaypointKind::Origin
        } else if step.position == last {
            WaypointKind::Destination
        } else {
            WaypointKind::Step
        };

        timeline.record_end(step.role, kind, &step.address, carpooler);
        timeline.waypoints.push(ResultWaypoint {
            id,
            person: perspective.person(step.role),
            role: step.role,
            time: anchor.map(|anchor| anchor.wrapping_add(step.duration)),
            address: step.address.clone(),
            kind,
        });
    }

    timeline
}
