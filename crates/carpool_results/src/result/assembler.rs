use std::fmt::Display;

use fxhash::FxHashMap;
use rayon::prelude::*;
use tracing::{instrument, warn};

use crate::{
    proposal::{
        matching::{Matching, MatchingId},
        proposal::{Proposal, ProposalId},
        route_filters::FilterError,
    },
    utils::first_present::first_present,
};

use super::{
    carpool_result::CarpoolResult,
    fare::PriceRounder,
    item_builder::{build_item, degraded_item},
    params::ResultParams,
    perspective::Perspective,
    result_item::ResultItem,
    result_role::ResultRole,
};

/// A matching left out of the results because its filter bag is unusable.
#[derive(Debug, Clone, PartialEq)]
pub struct Diagnostic {
    pub counterpart: ProposalId,
    pub matching: Option<MatchingId>,
    pub error: FilterError,
}

impl Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.matching {
            Some(matching) => write!(
                f,
                "matching {matching} with proposal {}: {}",
                self.counterpart, self.error
            ),
            None => write!(f, "matching with proposal {}: {}", self.counterpart, self.error),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ResultSet {
    pub proposal: ProposalId,
    /// One result per counterpart, in order of first appearance.
    pub results: Vec<CarpoolResult>,
    pub diagnostics: Vec<Diagnostic>,
}

/// The matchings found for one counterpart proposal.
#[derive(Default)]
struct CounterpartMatchings<'a> {
    /// The counterpart travels as passenger.
    request: Option<&'a Matching>,
    /// The counterpart travels as driver.
    offer: Option<&'a Matching>,
}

impl CounterpartMatchings<'_> {
    fn counterparts(&self) -> impl Iterator<Item = &Proposal> {
        [self.request, self.offer]
            .into_iter()
            .flatten()
            .map(|matching| matching.counterpart.as_ref())
    }
}

/// Groups matchings by counterpart, keeping the order in which the
/// counterparts first appear, requests before offers.
fn group_by_counterpart(proposal: &Proposal) -> Vec<(ProposalId, CounterpartMatchings<'_>)> {
    let mut index: FxHashMap<ProposalId, usize> = FxHashMap::default();
    let mut groups: Vec<(ProposalId, CounterpartMatchings)> = Vec::new();

    let tagged = proposal
        .matching_requests
        .iter()
        .map(|matching| (Perspective::Driver, matching))
        .chain(
            proposal
                .matching_offers
                .iter()
                .map(|matching| (Perspective::Passenger, matching)),
        );

    for (perspective, matching) in tagged {
        let id = matching.counterpart.id;
        let position = *index.entry(id).or_insert_with(|| {
            groups.push((id, CounterpartMatchings::default()));
            groups.len() - 1
        });

        let group = &mut groups[position].1;
        let slot = match perspective {
            Perspective::Driver => &mut group.request,
            Perspective::Passenger => &mut group.offer,
        };
        // Later duplicates replace earlier ones.
        *slot = Some(matching);
    }

    groups
}

/// Entry point of the result synthesis.
pub struct ResultManager<R> {
    params: ResultParams,
    rounder: R,
}

impl<R: PriceRounder> ResultManager<R> {
    pub fn new(params: ResultParams, rounder: R) -> Self {
        ResultManager { params, rounder }
    }

    /// Builds one result per counterpart of `proposal`. Matchings with an
    /// unusable filter bag are skipped and reported as diagnostics.
    #[instrument(skip_all, fields(proposal = %proposal.id))]
    pub fn create_results(&self, proposal: &Proposal) -> ResultSet {
        let mut diagnostics = Vec::new();
        let mut results = Vec::new();

        for (id, matchings) in group_by_counterpart(proposal) {
            let result_driver = matchings.request.and_then(|matching| {
                self.build_role(proposal, matching, Perspective::Driver, &mut diagnostics)
            });
            let result_passenger = matchings.offer.and_then(|matching| {
                self.build_role(proposal, matching, Perspective::Passenger, &mut diagnostics)
            });

            if result_driver.is_none() && result_passenger.is_none() {
                continue;
            }

            let mut result = CarpoolResult {
                id,
                frequency: proposal.frequency(),
                frequency_result: first_present(
                    matchings.counterparts().map(|p| Some(p.frequency())),
                ),
                carpooler: first_present(matchings.counterparts().map(|p| p.user)),
                comment: first_present(
                    matchings
                        .counterparts()
                        .map(|p| p.comment().map(str::to_owned)),
                ),
                result_driver,
                result_passenger,
                ..Default::default()
            };
            result.summarize(proposal);
            results.push(result);
        }

        ResultSet {
            proposal: proposal.id,
            results,
            diagnostics,
        }
    }

    fn build_role(
        &self,
        proposal: &Proposal,
        matching: &Matching,
        perspective: Perspective,
        diagnostics: &mut Vec<Diagnostic>,
    ) -> Option<ResultRole> {
        let counterpart = &matching.counterpart;

        let outward = match build_item(
            &proposal.criteria,
            matching,
            perspective,
            &self.params,
            &self.rounder,
        ) {
            Ok(outward) => outward,
            Err(error) => {
                report(diagnostics, counterpart.id, matching.id, error);
                return None;
            }
        };

        let seats = match perspective {
            Perspective::Driver => proposal.criteria.seats_or_default(),
            Perspective::Passenger => counterpart.criteria.seats_or_default(),
        };

        let return_item = self.build_return(proposal, matching, perspective, diagnostics);

        Some(ResultRole::new(seats, outward).with_return(return_item))
    }

    /// Return leg of a regular round trip.
    fn build_return(
        &self,
        proposal: &Proposal,
        matching: &Matching,
        perspective: Perspective,
        diagnostics: &mut Vec<Diagnostic>,
    ) -> Option<ResultItem> {
        let counterpart = &matching.counterpart;
        let counterpart_linked = counterpart.linked.as_deref()?;
        if !proposal.criteria.is_regular() || !counterpart.criteria.is_regular() {
            return None;
        }

        let owner = proposal.linked_criteria().unwrap_or(&proposal.criteria);

        let Some(related) = matching.related.as_deref() else {
            return Some(degraded_item(owner, counterpart_linked, None));
        };

        match build_item(owner, related, perspective, &self.params, &self.rounder) {
            Ok(item) => Some(item),
            Err(error) => {
                report(diagnostics, related.counterpart.id, related.id, error);
                Some(degraded_item(owner, counterpart_linked, related.id))
            }
        }
    }
}

impl<R: PriceRounder + Sync> ResultManager<R> {
    /// Independent syntheses for many proposals, in parallel.
    pub fn create_results_for_all(&self, proposals: &[Proposal]) -> Vec<ResultSet> {
        proposals
            .par_iter()
            .map(|proposal| self.create_results(proposal))
            .collect()
    }
}

fn report(
    diagnostics: &mut Vec<Diagnostic>,
    counterpart: ProposalId,
    matching: Option<MatchingId>,
    error: FilterError,
) {
    let diagnostic = Diagnostic {
        counterpart,
        matching,
        error,
    };
    warn!("Skipping {diagnostic}");
    diagnostics.push(diagnostic);
}

#[cfg(test)]
mod tests {
    use jiff::civil::{date, time};

    use crate::{
        proposal::matching::Matching,
        test_utils::{complete_filters, punctual_proposal, raw_step, rounder},
    };

    use super::*;

    fn matching_with(id: u64) -> Matching {
        let route = vec![
            raw_step(1, 0, 0.0),
            raw_step(2, 0, 60.0),
            raw_step(2, 1, 600.0),
            raw_step(1, 1, 900.0),
        ];
        Matching::new(
            punctual_proposal(id, date(2025, 6, 10), Some(time(9, 0, 0, 0))),
            complete_filters(route, 10_000.0, 500.0, 8_000.0),
        )
    }

    #[test]
    fn test_grouping_keeps_first_appearance_order() {
        let mut proposal = punctual_proposal(1, date(2025, 6, 10), Some(time(8, 0, 0, 0)));
        proposal.matching_requests = vec![matching_with(20), matching_with(10)];
        proposal.matching_offers = vec![matching_with(30), matching_with(20)];

        let groups = group_by_counterpart(&proposal);
        let ids: Vec<u64> = groups.iter().map(|(id, _)| id.get()).collect();

        assert_eq!(ids, vec![20, 10, 30]);
        assert!(groups[0].1.request.is_some());
        assert!(groups[0].1.offer.is_some());
        assert!(groups[2].1.request.is_none());
    }

    #[test]
    fn test_skipped_matching_is_reported() {
        let mut proposal = punctual_proposal(1, date(2025, 6, 10), Some(time(8, 0, 0, 0)));
        let mut broken = matching_with(10);
        broken.id = Some(MatchingId::new(99));
        broken.filters.route = None;
        proposal.matching_requests = vec![broken, matching_with(20)];

        let manager = ResultManager::new(ResultParams::default(), rounder);
        let set = manager.create_results(&proposal);

        assert_eq!(set.results.len(), 1);
        assert_eq!(set.results[0].id.get(), 20);
        assert_eq!(
            set.diagnostics,
            vec![Diagnostic {
                counterpart: ProposalId::new(10),
                matching: Some(MatchingId::new(99)),
                error: FilterError::MissingKey("route"),
            }]
        );
        assert_eq!(
            set.diagnostics[0].to_string(),
            "matching 99 with proposal 10: missing filter key `route`"
        );
    }

    #[test]
    fn test_bidirectional_counterpart_merges_roles() {
        let mut proposal = punctual_proposal(1, date(2025, 6, 10), Some(time(8, 0, 0, 0)));
        proposal.matching_requests = vec![matching_with(10)];
        proposal.matching_offers = vec![matching_with(10)];

        let manager = ResultManager::new(ResultParams::default(), rounder);
        let set = manager.create_results(&proposal);

        assert_eq!(set.results.len(), 1);
        let result = &set.results[0];
        assert!(result.result_driver.is_some());
        assert!(result.result_passenger.is_some());
        // The counterpart as driver wins: 09:00 plus the 60s pickup.
        assert_eq!(result.time, Some(time(9, 1, 0, 0)));
    }
}
