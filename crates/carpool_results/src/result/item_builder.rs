use tracing::debug;

use crate::proposal::{
    criteria::Criteria,
    matching::{Matching, MatchingId},
    proposal::Proposal,
    route_filters::{FilterError, RouteFilters},
};

use super::{
    fare::{PriceRounder, compute_fares},
    params::ResultParams,
    perspective::Perspective,
    result_item::ResultItem,
    temporal::reconcile,
    timeline::build_timeline,
};

/// Builds one leg of a result from `matching`, for the owner whose
/// criteria for this leg are `owner`.
///
/// Fails only when the filter bag is unusable. A schedule that cannot be
/// reconciled yields a degraded item.
pub fn build_item(
    owner: &Criteria,
    matching: &Matching,
    perspective: Perspective,
    params: &ResultParams,
    rounder: &impl PriceRounder,
) -> Result<ResultItem, FilterError> {
    let filters = RouteFilters::try_from(&matching.filters)?;
    let counterpart = &matching.counterpart;

    let schedule = match reconcile(
        owner,
        &counterpart.criteria,
        perspective,
        filters.pickup_offset(),
        filters.pickup_days.as_deref(),
    ) {
        Ok(schedule) => schedule,
        Err(conflict) => {
            debug!(
                counterpart = %counterpart.id,
                matching = ?matching.id,
                "Degraded result item: {conflict}"
            );
            return Ok(degraded_item(owner, counterpart, matching.id));
        }
    };

    let timeline = build_timeline(&filters, schedule.anchor, perspective);

    let (driver, passenger) = match perspective {
        Perspective::Driver => (owner, &counterpart.criteria),
        Perspective::Passenger => (&counterpart.criteria, owner),
    };
    let fares = compute_fares(
        driver,
        passenger,
        &filters.statistics,
        params.default_price_km,
        owner.frequency,
        rounder,
    );

    Ok(ResultItem {
        proposal_id: counterpart.id,
        matching_id: matching.id,
        date: schedule.date,
        time: schedule.time,
        week: schedule.week,
        multiple_times: schedule.multiple_times,
        from_date: schedule.from_date,
        to_date: schedule.to_date,
        waypoints: timeline.waypoints,
        origin: timeline.origin,
        destination: timeline.destination,
        origin_driver: timeline.origin_driver,
        destination_driver: timeline.destination_driver,
        origin_passenger: timeline.origin_passenger,
        destination_passenger: timeline.destination_passenger,
        statistics: Some(filters.statistics),
        fares: Some(fares),
    })
}

/// A leg reduced to what both schedules say on their own: the
/// counterpart's weekdays and validity window, or the trip date.
pub fn degraded_item(
    owner: &Criteria,
    counterpart: &Proposal,
    matching_id: Option<MatchingId>,
) -> ResultItem {
    let criteria = &counterpart.criteria;
    let date = if owner.is_punctual() {
        owner.from_date.or(criteria.from_date)
    } else {
        None
    };

    ResultItem {
        proposal_id: counterpart.id,
        matching_id,
        date,
        week: criteria.week.flags_only(),
        from_date: criteria.from_date,
        to_date: criteria.to_date,
        ..Default::default()
    }
}
