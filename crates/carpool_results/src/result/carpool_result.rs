use jiff::civil::{Date, Time};
use serde::Serialize;

use crate::proposal::{
    address::Address,
    criteria::Frequency,
    proposal::{Proposal, ProposalId, UserId},
    week::WeekSchedule,
};

use super::{result_item::ResultItem, result_role::ResultRole};

/// Everything the owner of a proposal needs to know about one counterpart.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CarpoolResult {
    /// The counterpart proposal.
    pub id: ProposalId,
    pub frequency: Frequency,
    pub frequency_result: Option<Frequency>,
    pub carpooler: Option<UserId>,
    pub comment: Option<String>,
    pub result_driver: Option<ResultRole>,
    pub result_passenger: Option<ResultRole>,

    pub origin: Option<Address>,
    pub destination: Option<Address>,
    pub origin_first: bool,
    pub destination_last: bool,
    pub origin_driver: Option<Address>,
    pub destination_driver: Option<Address>,
    pub origin_passenger: Option<Address>,
    pub destination_passenger: Option<Address>,

    pub date: Option<Date>,
    pub time: Option<Time>,
    pub start_date: Option<Date>,
    pub to_date: Option<Date>,
    #[serde(flatten)]
    pub week: WeekSchedule,
    pub outward_time: Option<Time>,
    pub return_time: Option<Time>,

    pub seats: u32,
    pub price: Option<f64>,
    pub rounded_price: Option<f64>,
    #[serde(rename = "return")]
    pub has_return: bool,
}

fn same_place(a: Option<&Address>, b: Option<&Address>) -> bool {
    match (a, b) {
        (Some(a), Some(b)) => a.same_coordinates(b),
        _ => false,
    }
}

impl CarpoolResult {
    /// The role the summary is read from. A counterpart that can drive
    /// takes precedence.
    pub fn main_role(&self) -> Option<&ResultRole> {
        self.result_passenger.as_ref().or(self.result_driver.as_ref())
    }

    fn role_slot(&mut self, passenger_only: bool) -> &mut Option<ResultRole> {
        if passenger_only {
            &mut self.result_driver
        } else {
            &mut self.result_passenger
        }
    }

    /// Fills the summary fields from the result roles.
    pub fn summarize(&mut self, owner: &Proposal) {
        let passenger_only = self.result_passenger.is_none();
        let Some(role) = self.role_slot(passenger_only).take() else {
            return;
        };
        self.summarize_role(&role, owner, passenger_only);
        *self.role_slot(passenger_only) = Some(role);
    }

    fn summarize_role(&mut self, role: &ResultRole, owner: &Proposal, passenger_only: bool) {
        let outward = &role.outward;

        // The passenger's trip is the one displayed.
        if passenger_only {
            self.origin = outward.origin.clone();
            self.destination = outward.destination.clone();
            self.origin_first = same_place(self.origin.as_ref(), owner.origin());
            self.destination_last = same_place(self.destination.as_ref(), owner.destination());
        } else {
            self.origin = owner.origin().cloned();
            self.destination = owner.destination().cloned();
            self.origin_first = same_place(self.origin.as_ref(), outward.origin.as_ref());
            self.destination_last =
                same_place(self.destination.as_ref(), outward.destination.as_ref());
        }
        self.origin_driver = outward.origin_driver.clone();
        self.destination_driver = outward.destination_driver.clone();
        self.origin_passenger = outward.origin_passenger.clone();
        self.destination_passenger = outward.destination_passenger.clone();

        match self.frequency {
            Frequency::Punctual => {
                self.date = outward.date;
                self.time = outward.time;
            }
            Frequency::Regular => {
                self.start_date = outward.from_date;
                self.to_date = outward.to_date;
            }
        }
        self.price = outward.computed_price();
        self.rounded_price = outward.computed_rounded_price();
        self.seats = role.seats;

        let return_item = role.return_item.as_ref();
        self.week = match return_item {
            Some(return_item) => outward.week.union_flags(&return_item.week),
            None => outward.week.flags_only(),
        };
        self.outward_time = outward.display_time();
        self.return_time = return_item.and_then(ResultItem::display_time);
        self.has_return = role.has_return();
    }
}
