use serde::Serialize;

use crate::proposal::{
    criteria::{Criteria, Frequency},
    meters::Meters,
    route_filters::DetourStatistics,
};

/// Currency rounding, supplied by the caller.
pub trait PriceRounder {
    fn round_price(&self, amount: f64, frequency: Frequency) -> f64;
}

impl<F> PriceRounder for F
where
    F: Fn(f64, Frequency) -> f64,
{
    fn round_price(&self, amount: f64, frequency: Frequency) -> f64 {
        self(amount, frequency)
    }
}

/// Rounds to the nearest multiple of a step, one step per frequency.
/// A non-positive step leaves amounts untouched.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepRounder {
    pub punctual_step: f64,
    pub regular_step: f64,
}

impl StepRounder {
    pub fn new(punctual_step: f64, regular_step: f64) -> Self {
        StepRounder {
            punctual_step,
            regular_step,
        }
    }
}

impl PriceRounder for StepRounder {
    fn round_price(&self, amount: f64, frequency: Frequency) -> f64 {
        let step = match frequency {
            Frequency::Punctual => self.punctual_step,
            Frequency::Regular => self.regular_step,
        };

        if !step.is_finite() || step <= 0.0 {
            return amount;
        }

        (amount / step).round() * step
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Fares {
    pub driver_price_km: f64,
    pub driver_original_price: f64,
    pub driver_original_rounded_price: f64,
    pub passenger_price_km: f64,
    pub passenger_original_price: f64,
    pub passenger_original_rounded_price: f64,
    pub computed_price: f64,
    pub computed_rounded_price: f64,
}

fn price_for(distance: Meters, price_km: f64) -> f64 {
    distance.km() * price_km
}

/// Fares of one leg.
///
/// Each side uses its own rate, or `default_price_km` when unset. The
/// driver's fallback price covers their whole route, the passenger's only
/// the shared section. The payable price always uses the driver's rate.
pub fn compute_fares(
    driver: &Criteria,
    passenger: &Criteria,
    statistics: &DetourStatistics,
    default_price_km: f64,
    frequency: Frequency,
    rounder: &impl PriceRounder,
) -> Fares {
    let driver_price_km = driver.price_km().unwrap_or(default_price_km);
    let driver_original_price = driver
        .price()
        .unwrap_or_else(|| price_for(statistics.original_distance, driver_price_km));

    let passenger_price_km = passenger.price_km().unwrap_or(default_price_km);
    let passenger_original_price = passenger
        .price()
        .unwrap_or_else(|| price_for(statistics.common_distance, passenger_price_km));

    let computed_price = price_for(
        statistics.common_distance + statistics.detour_distance,
        driver_price_km,
    );

    Fares {
        driver_price_km,
        driver_original_price,
        driver_original_rounded_price: rounder.round_price(driver_original_price, frequency),
        passenger_price_km,
        passenger_original_price,
        passenger_original_rounded_price: rounder.round_price(passenger_original_price, frequency),
        computed_price,
        computed_rounded_price: rounder.round_price(computed_price, frequency),
    }
}

#[cfg(test)]
mod tests {
    use crate::test_utils::statistics;

    use super::*;

    fn identity(amount: f64, _: Frequency) -> f64 {
        amount
    }

    #[test]
    fn test_default_rate_fallback() {
        let fares = compute_fares(
            &Criteria::default(),
            &Criteria::default(),
            &statistics(10_000.0, 0.0, 10_000.0),
            0.06,
            Frequency::Punctual,
            &identity,
        );

        assert_eq!(fares.driver_price_km, 0.06);
        assert!((fares.driver_original_price - 0.6).abs() < 1e-9);
        assert!((fares.passenger_original_price - 0.6).abs() < 1e-9);
    }

    #[test]
    fn test_explicit_rates_and_prices() {
        let driver = Criteria {
            price_km: Some(0.1),
            price: Some(12.0),
            ..Default::default()
        };
        let passenger = Criteria {
            price_km: Some(0.08),
            ..Default::default()
        };

        let fares = compute_fares(
            &driver,
            &passenger,
            &statistics(100_000.0, 5_000.0, 50_000.0),
            0.06,
            Frequency::Punctual,
            &identity,
        );

        assert_eq!(fares.driver_original_price, 12.0);
        assert!((fares.passenger_original_price - 4.0).abs() < 1e-9);
        assert!((fares.computed_price - 5.5).abs() < 1e-9);
    }

    #[test]
    fn test_computed_price_ignores_passenger_rate() {
        let passenger = Criteria {
            price_km: Some(1.0),
            ..Default::default()
        };

        let fares = compute_fares(
            &Criteria::default(),
            &passenger,
            &statistics(10_000.0, 2_000.0, 8_000.0),
            0.05,
            Frequency::Punctual,
            &identity,
        );

        assert!((fares.computed_price - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_computed_price_is_monotonic() {
        let mut previous = 0.0;
        for common in (0..20).map(|km| km as f64 * 1_000.0) {
            let fares = compute_fares(
                &Criteria::default(),
                &Criteria::default(),
                &statistics(20_000.0, 500.0, common),
                0.06,
                Frequency::Punctual,
                &identity,
            );
            assert!(fares.computed_price >= previous);
            previous = fares.computed_price;
        }
    }

    #[test]
    fn test_rounding_depends_on_frequency() {
        let rounder = StepRounder::new(0.5, 1.0);

        assert_eq!(rounder.round_price(2.3, Frequency::Punctual), 2.5);
        assert_eq!(rounder.round_price(2.3, Frequency::Regular), 2.0);
        assert_eq!(StepRounder::new(0.0, 0.0).round_price(2.3, Frequency::Regular), 2.3);

        let fares = compute_fares(
            &Criteria::default(),
            &Criteria::default(),
            &statistics(38_000.0, 0.0, 38_000.0),
            0.06,
            Frequency::Regular,
            &rounder,
        );

        assert_eq!(fares.computed_rounded_price, 2.0);
        assert_eq!(fares.driver_original_rounded_price, 2.0);
    }
}
