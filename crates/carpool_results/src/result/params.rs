#[derive(Clone, Debug, PartialEq)]
pub struct ResultParams {
    /// Rate per km used when a side has none of its own.
    pub default_price_km: f64,
}

pub const DEFAULT_PRICE_KM: f64 = 0.06;

impl Default for ResultParams {
    fn default() -> Self {
        ResultParams {
            default_price_km: DEFAULT_PRICE_KM,
        }
    }
}
