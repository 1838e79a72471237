use std::ops::Add;

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
#[serde(transparent)]
pub struct Meters(f64);

impl Meters {
    pub const ZERO: Meters = Meters(0.0);

    pub fn new(value: f64) -> Self {
        Meters(value)
    }

    /// Distances coming from the route computation service are clamped:
    /// negative or non-finite values become zero.
    pub fn sanitized(value: f64) -> Self {
        if value.is_finite() && value > 0.0 {
            Meters(value)
        } else {
            Meters::ZERO
        }
    }

    pub fn value(&self) -> f64 {
        self.0
    }

    pub fn km(&self) -> f64 {
        self.0 / 1000.0
    }
}

impl Add for Meters {
    type Output = Meters;

    fn add(self, other: Meters) -> Meters {
        Meters(self.0 + other.0)
    }
}
