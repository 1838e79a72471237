use carpool_results::{
    ResultManager, ResultParams, StepRounder, result::params::DEFAULT_PRICE_KM,
};
use clap::Args;

use crate::parsers;

#[derive(Args)]
pub struct PricingArgs {
    /// Rate per km for proposals without one
    #[arg(
        long,
        env = "CARPOOL_DEFAULT_PRICE_KM",
        value_parser = parsers::parse_amount,
        default_value_t = DEFAULT_PRICE_KM
    )]
    default_price_km: f64,

    /// Rounding step of one-off trip prices (0 disables rounding)
    #[arg(
        long,
        env = "CARPOOL_PUNCTUAL_STEP",
        value_parser = parsers::parse_amount,
        default_value_t = 0.01
    )]
    punctual_step: f64,

    /// Rounding step of regular trip prices (0 disables rounding)
    #[arg(
        long,
        env = "CARPOOL_REGULAR_STEP",
        value_parser = parsers::parse_amount,
        default_value_t = 0.01
    )]
    regular_step: f64,
}

impl PricingArgs {
    pub fn manager(&self) -> ResultManager<StepRounder> {
        ResultManager::new(
            ResultParams {
                default_price_km: self.default_price_km,
            },
            StepRounder::new(self.punctual_step, self.regular_step),
        )
    }
}
