use serde::{Deserialize, Serialize};

use crate::define_id_newtype;

use super::{
    address::Address,
    criteria::{Criteria, Frequency},
    matching::Matching,
    waypoint::Waypoint,
};

define_id_newtype!(ProposalId);
define_id_newtype!(UserId);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProposalType {
    #[default]
    OneWay,
    Outward,
    Return,
}

/// One leg of a carpool intent, with the matchings computed for it.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Proposal {
    pub id: ProposalId,
    #[serde(rename = "type", default)]
    pub proposal_type: ProposalType,
    pub comment: Option<String>,
    pub user: Option<UserId>,
    /// The other leg of a round trip.
    pub linked: Option<Box<Proposal>>,
    #[serde(default)]
    pub waypoints: Vec<Waypoint>,
    pub criteria: Criteria,
    /// Matchings where this proposal is the offer: the counterpart is a passenger.
    #[serde(default)]
    pub matching_requests: Vec<Matching>,
    /// Matchings where this proposal is the request: the counterpart is a driver.
    #[serde(default)]
    pub matching_offers: Vec<Matching>,
}

impl Proposal {
    pub fn new(id: impl Into<ProposalId>, criteria: Criteria) -> Self {
        Proposal {
            id: id.into(),
            proposal_type: ProposalType::OneWay,
            comment: None,
            user: None,
            linked: None,
            waypoints: Vec::new(),
            criteria,
            matching_requests: Vec::new(),
            matching_offers: Vec::new(),
        }
    }

    pub fn frequency(&self) -> Frequency {
        self.criteria.frequency
    }

    pub fn linked_criteria(&self) -> Option<&Criteria> {
        self.linked.as_deref().map(|linked| &linked.criteria)
    }

    pub fn origin(&self) -> Option<&Address> {
        self.waypoints
            .iter()
            .find(|waypoint| waypoint.position == 0)
            .map(|waypoint| &waypoint.address)
    }

    /// The waypoint flagged as destination, or the last one by position.
    pub fn destination(&self) -> Option<&Address> {
        self.waypoints
            .iter()
            .find(|waypoint| waypoint.destination)
            .or_else(|| self.waypoints.iter().max_by_key(|waypoint| waypoint.position))
            .map(|waypoint| &waypoint.address)
    }

    /// Non-blank comment.
    pub fn comment(&self) -> Option<&str> {
        self.comment
            .as_deref()
            .filter(|comment| !comment.trim().is_empty())
    }
}
