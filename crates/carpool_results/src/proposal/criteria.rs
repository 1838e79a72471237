use jiff::civil::{Date, Time};
use serde::{Deserialize, Serialize};

use super::week::{Day, WeekSchedule};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Frequency {
    #[default]
    Punctual,
    Regular,
}

/// Schedule and pricing facet of a proposal.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Criteria {
    #[serde(default)]
    pub frequency: Frequency,
    pub from_date: Option<Date>,
    pub to_date: Option<Date>,
    pub from_time: Option<Time>,
    #[serde(flatten)]
    pub week: WeekSchedule,
    pub price_km: Option<f64>,
    pub price: Option<f64>,
    pub rounded_price: Option<f64>,
    pub seats: Option<u32>,
}

impl Criteria {
    pub fn is_regular(&self) -> bool {
        self.frequency == Frequency::Regular
    }

    pub fn is_punctual(&self) -> bool {
        self.frequency == Frequency::Punctual
    }

    pub fn time_for(&self, day: Day) -> Option<Time> {
        self.week.time(day)
    }

    /// Rate per km, when one is explicitly set. Zero means "not set".
    pub fn price_km(&self) -> Option<f64> {
        self.price_km.filter(|rate| rate.is_finite() && *rate > 0.0)
    }

    /// Absolute price override, when one is explicitly set.
    pub fn price(&self) -> Option<f64> {
        self.price.filter(|price| price.is_finite() && *price > 0.0)
    }

    pub fn seats_or_default(&self) -> u32 {
        match self.seats {
            Some(seats) if seats > 0 => seats,
            _ => 1,
        }
    }

    /// Whether `date` falls in the validity window of a regular criteria.
    /// Missing bounds are open.
    pub fn covers(&self, date: Date) -> bool {
        self.from_date.is_none_or(|from| from <= date) && self.to_date.is_none_or(|to| date <= to)
    }
}
