use std::hint::black_box;

use carpool_results::{
    ResultManager, ResultParams, StepRounder,
    proposal::{
        address::Address,
        criteria::{Criteria, Frequency},
        matching::{Matching, MatchingFilters, RawNumber, RawRouteStep},
        proposal::Proposal,
        week::{Day, WeekSchedule},
    },
};
use criterion::{Criterion, criterion_group, criterion_main};
use jiff::civil::time;

fn regular_criteria(hour: i8) -> Criteria {
    let week = [0, 1, 2, 3, 4]
        .into_iter()
        .fold(WeekSchedule::default(), |week, index| {
            week.with_day(Day::ALL[index], time(hour, (index * 5) as i8, 0, 0))
        });

    Criteria {
        frequency: Frequency::Regular,
        week,
        ..Default::default()
    }
}

fn route(steps: usize) -> Vec<RawRouteStep> {
    let mut route = Vec::with_capacity(steps * 2);
    for position in 0..steps {
        for candidate in [1, 2] {
            route.push(RawRouteStep::new(
                candidate,
                position as i64,
                (position * 300 + candidate as usize * 60) as f64,
                &Address::from_lat_lon(48.0 + position as f64 * 0.01, 7.0),
            ));
        }
    }
    route
}

fn synthetic_proposal(matchings: u64) -> Proposal {
    let mut proposal = Proposal::new(1, regular_criteria(8));

    for id in 0..matchings {
        let mut counterpart = Proposal::new(id + 2, regular_criteria(7));
        counterpart.linked = Some(Box::new(Proposal::new(id + 100_000, regular_criteria(17))));

        let filters = MatchingFilters {
            route: Some(route(6)),
            original_distance: Some(RawNumber::from(25_000.0)),
            detour_distance: Some(RawNumber::from(2_000.0)),
            common_distance: Some(RawNumber::from(20_000.0)),
            ..Default::default()
        };
        let matching = Matching::new(counterpart, filters);

        if id % 2 == 0 {
            proposal.matching_requests.push(matching);
        } else {
            proposal.matching_offers.push(matching);
        }
    }

    proposal
}

fn create_results_benchmark(c: &mut Criterion) {
    let manager = ResultManager::new(ResultParams::default(), StepRounder::new(0.01, 0.5));
    let proposal = synthetic_proposal(200);

    c.bench_function("create_results (200 matchings)", |b| {
        b.iter(|| manager.create_results(black_box(&proposal)))
    });

    let proposals: Vec<Proposal> = (0..16).map(|_| synthetic_proposal(50)).collect();
    c.bench_function("create_results_for_all (16 proposals)", |b| {
        b.iter(|| manager.create_results_for_all(black_box(&proposals)))
    });
}

criterion_group!(benches, create_results_benchmark);
criterion_main!(benches);
