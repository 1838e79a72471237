use jiff::{SignedDuration, civil::Time};
use serde::Serialize;

use crate::proposal::route_filters::Role;

/// Which of the two parties a route step belongs to, seen from the
/// proposal owner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Person {
    Requester,
    Carpooler,
}

/// The role played by the proposal owner in the result being built.
///
/// `Driver` builds `resultDriver` (the counterpart is a passenger),
/// `Passenger` builds `resultPassenger` (the counterpart is a driver).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Perspective {
    Driver,
    Passenger,
}

impl Perspective {
    pub fn requester_role(self) -> Role {
        match self {
            Perspective::Driver => Role::Driver,
            Perspective::Passenger => Role::Passenger,
        }
    }

    pub fn carpooler_role(self) -> Role {
        match self {
            Perspective::Driver => Role::Passenger,
            Perspective::Passenger => Role::Driver,
        }
    }

    pub fn person(self, role: Role) -> Person {
        if role == self.requester_role() {
            Person::Requester
        } else {
            Person::Carpooler
        }
    }

    /// Moves the counterpart's natural time by the pickup offset.
    ///
    /// As a driver, the owner must leave `offset` before the passenger's
    /// time. As a passenger, the owner is collected `offset` after the
    /// driver's departure.
    pub fn shift(self, natural: Time, offset: SignedDuration) -> Time {
        match self {
            Perspective::Driver => natural.wrapping_sub(offset),
            Perspective::Passenger => natural.wrapping_add(offset),
        }
    }
}
